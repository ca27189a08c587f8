mod resolver;
mod types;

pub use resolver::OwnershipResolver;
pub use types::{ApproverSet, EffectiveOwners, OwnerResolution};
