// Shared row and wire types. Domain logic lives with its owning module
// (jobs/, plan/, profile/, dashboard/); these are the shapes they exchange.

pub mod job;
pub mod plan;
pub mod profile;
pub mod progress;
