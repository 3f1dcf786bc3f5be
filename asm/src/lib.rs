pub mod assembler;
pub mod error;
pub mod eval;
pub mod label;
pub mod parser;

pub use assembler::{assemble, to_hex, Assembler};
pub use error::{Error, ErrorKind};
