mod index;

pub use index::DependencyIndex;
