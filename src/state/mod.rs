mod config;
mod environment;
mod searchpath;

pub use config::{Configuration, FailurePolicy};
pub use environment::Environment;
