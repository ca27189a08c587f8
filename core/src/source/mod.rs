pub mod memory;
mod parse;
pub mod r#trait;

pub use memory::MemoryDeclarationSource;
pub use parse::parse_declaration;
pub use r#trait::DeclarationSource;
