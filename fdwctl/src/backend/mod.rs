//! Database connection and DDL execution.

pub mod error;
pub mod fdw;
pub mod server;

pub use error::{Error, ExecutionError};
pub use server::{DryRun, Executor, Server};
