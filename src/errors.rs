use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use crate::init::ModuleSpec;

/// `Result` alias which automatically uses `PrepError` as the error type.
pub type Result<T> = std::result::Result<T, PrepError>;
pub trait Handle<T> {
    /// Replaces any error kind with a new one, without overriding the default error message.
    /// Useful in situations where additional context provides no additional clarity.
    fn replace_err<F: FnOnce() -> PrepError>(self, new_error: F) -> Result<T>;
    /// Replaces any error kind with a new one, overriding the default error message with the
    /// provided one. Useful in situations where additional context can provide additional clarity.
    fn replace_err_with_msg<F: FnOnce() -> PrepError>(
        self,
        new_error: F,
        context: &str,
    ) -> Result<T>;
}

impl<T, E> Handle<T> for std::result::Result<T, E> {
    fn replace_err<F: FnOnce() -> PrepError>(self, new_error: F) -> Result<T> {
        self.map_err(|_| new_error())
    }

    fn replace_err_with_msg<F: FnOnce() -> PrepError>(
        self,
        new_error: F,
        context: &str,
    ) -> Result<T> {
        self.map_err(|_| new_error().set_context(context))
    }
}

impl<T> Handle<T> for std::option::Option<T> {
    fn replace_err<F: FnOnce() -> PrepError>(self, new_error: F) -> Result<T> {
        self.ok_or_else(new_error)
    }

    fn replace_err_with_msg<F: FnOnce() -> PrepError>(
        self,
        new_error: F,
        context: &str,
    ) -> Result<T> {
        self.ok_or_else(|| new_error().set_context(context))
    }
}

/// Error type for modprep.
/// Contains an error kind and optionally a custom message,
/// which is used to override the default error message.
#[derive(Debug)]
pub struct PrepError {
    kind: ErrorKind,
    custom_message: Option<String>,
}

impl Display for PrepError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // If the error has a custom message, use it instead of the default error message.
        match &self.custom_message {
            Some(message) => write!(f, "{}", message),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl PrepError {
    /// Creates a `PrepError` with no custom message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            custom_message: None,
        }
    }

    /// Takes a `PrepError` and gives it a custom message.
    pub fn set_context(mut self, context: &str) -> Self {
        self.custom_message = Some(context.to_owned());
        self
    }
}

/// Enum representing every type of error which can occur in modprep.
/// Downstream error variants will typically include data providing basic information
/// about how the error occurred, such as the module which failed to activate.
#[derive(Debug)]
pub enum ErrorKind {
    Config(ConfigError),
    Module(ModuleError),
    Executable(ExecutableError),
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Config(error) => write!(f, "{}", error),
            ErrorKind::Module(error) => write!(f, "{}", error),
            ErrorKind::Executable(error) => write!(f, "{}", error),
        }
    }
}

/// Error type for errors which occur while reading the configuration file.
#[derive(Debug)]
pub enum ConfigError {
    FailedToOpenConfigFile(PathBuf),
    FailedToReadConfigFile(PathBuf),
    UnknownKey(String),
    InvalidValue(String),
    InvalidModuleSpec(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FailedToOpenConfigFile(path) => {
                write!(f, "Failed to open configuration file: {}", path.display())
            }
            ConfigError::FailedToReadConfigFile(path) => {
                write!(f, "Failed to read configuration file: {}", path.display())
            }
            ConfigError::UnknownKey(key) => {
                write!(f, "Unknown configuration key: {}", key)
            }
            ConfigError::InvalidValue(value) => {
                write!(f, "Invalid configuration value: {}", value)
            }
            ConfigError::InvalidModuleSpec(token) => {
                write!(
                    f,
                    "Invalid module specifier (expected name/version): {}",
                    token
                )
            }
        }
    }
}

/// Error type for errors which occur while activating modules through the host module system.
#[derive(Debug)]
pub enum ModuleError {
    CommandNotFound(String),
    CouldNotWait,
    ActivationFailed(ModuleSpec, isize),
}

impl Display for ModuleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleError::CommandNotFound(command) => {
                write!(f, "Module command could not be invoked: {}", command)
            }
            ModuleError::CouldNotWait => {
                write!(f, "Failed to wait for module command to complete")
            }
            ModuleError::ActivationFailed(module, exit_code) => {
                write!(
                    f,
                    "Module '{}' failed to activate with exit code: {}",
                    module, exit_code
                )
            }
        }
    }
}

/// Error type for errors which occur while running the downstream command.
#[derive(Debug)]
pub enum ExecutableError {
    FailedToSpawn(String),
    CouldNotWait,
    FailedToExecute(isize),
}

impl Display for ExecutableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutableError::FailedToSpawn(command) => {
                write!(f, "Failed to run command: {}", command)
            }
            ExecutableError::CouldNotWait => {
                write!(f, "Failed to wait for command to complete")
            }
            ExecutableError::FailedToExecute(exit_code) => {
                write!(f, "Command failed with exit code: {}", exit_code)
            }
        }
    }
}

/// Shortcut for creating a `PrepError::Config` without explicit imports
macro_rules! config_err {
    ($content:expr) => {{
        use crate::errors::ConfigError::*;
        use crate::errors::ErrorKind;
        use crate::errors::PrepError;
        PrepError::new(ErrorKind::Config($content))
    }};
}

/// Shortcut for creating a `PrepError::Module` without explicit imports
macro_rules! module_err {
    ($content:expr) => {{
        use crate::errors::ErrorKind;
        use crate::errors::ModuleError::*;
        use crate::errors::PrepError;
        PrepError::new(ErrorKind::Module($content))
    }};
}

/// Shortcut for creating a `PrepError::Executable` without explicit imports
macro_rules! executable_err {
    ($content:expr) => {{
        use crate::errors::ErrorKind;
        use crate::errors::ExecutableError::*;
        use crate::errors::PrepError;
        PrepError::new(ErrorKind::Executable($content))
    }};
}
