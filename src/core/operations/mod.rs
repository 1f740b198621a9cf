pub mod export;
pub mod file_ops;

pub use export::*;
pub use file_ops::*;
