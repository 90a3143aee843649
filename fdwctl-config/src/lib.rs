// Submodules
pub mod core;
pub mod database;
pub mod error;
pub mod fdw;

pub use core::Config;
pub use database::Database;
pub use error::Error;
pub use fdw::{ForeignServer, ImportForeignSchema};
