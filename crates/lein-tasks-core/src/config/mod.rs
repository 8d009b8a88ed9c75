//! Build file discovery and loading

pub mod defaults;
mod loader;

pub use defaults::*;
pub use loader::*;
