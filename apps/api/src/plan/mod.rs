// Learning-plan domain: wall-clock scheduling, progress derivation, and
// plan/progress persistence behind a typed document boundary.

pub mod handlers;
pub mod progress;
pub mod schedule;
pub mod store;
