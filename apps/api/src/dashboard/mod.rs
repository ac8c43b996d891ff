// Composed home view: profile, plan state, next actions, and job
// recommendations in one response.

pub mod handlers;
