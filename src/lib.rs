pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod init;
pub mod input;
pub mod platform;
pub mod progress;
pub mod script;
pub mod video;

pub use error::{ErrorKind, PipelineError};
