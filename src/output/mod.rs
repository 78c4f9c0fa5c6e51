pub mod codegen;
pub mod emit;
pub mod files;
pub mod ident;

pub use self::emit::{emit_datapack, GeneratedFile};
pub use self::files::write_output;
