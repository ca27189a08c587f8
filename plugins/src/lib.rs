pub mod factory;
pub mod source;

pub use factory::build_source;
