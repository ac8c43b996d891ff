// User profile and recorded skills.

pub mod handlers;
pub mod store;
