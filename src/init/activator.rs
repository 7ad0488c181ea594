use std::fmt::{Display, Formatter};
use std::process::Command as Process;

use crate::errors::{Handle, Result};

/// A named, versioned unit of software known to the host module system,
/// e.g. `python/3.6.1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    pub name: String,
    pub version: String,
}

impl Display for ModuleSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

impl ModuleSpec {
    /// Parses a `name/version` token into a module specifier
    pub fn parse(token: &str) -> Result<Self> {
        let (name, version) = token
            .split_once('/')
            .replace_err(|| config_err!(InvalidModuleSpec(token.to_owned())))?;

        if name.is_empty() || version.is_empty() {
            return Err(config_err!(InvalidModuleSpec(token.to_owned())));
        }

        Ok(Self {
            name: name.to_owned(),
            version: version.to_owned(),
        })
    }
}

/// Seam between the initializer and the host's environment-module system
/// The initializer requests activations through this trait so that tests can
/// substitute a stub for the real module command
pub trait Activator {
    fn activate(&self, module: &ModuleSpec) -> Result<()>;
}

/// Invokes the host's module-management command as a child process
/// The side effects of a successful activation are owned entirely by the host
/// system and are opaque to this tool
pub struct ModuleCommand {
    command: String,
}

impl ModuleCommand {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_owned(),
        }
    }
}

impl Activator for ModuleCommand {
    fn activate(&self, module: &ModuleSpec) -> Result<()> {
        // No local validation is performed against the host's module repository;
        // an unknown module/version surfaces as a non-zero exit status
        let mut process = Process::new(&self.command)
            .arg("load")
            .arg(&module.name)
            .arg(&module.version)
            .spawn()
            .replace_err(|| module_err!(CommandNotFound(self.command.clone())))?;

        let status = process.wait().replace_err(|| module_err!(CouldNotWait))?;

        match status.success() {
            true => Ok(()),
            false => {
                // * 126 is a special exit code that means that the command was found but could not be executed
                // * as per https://tldp.org/LDP/abs/html/exitcodes.html
                Err(module_err!(ActivationFailed(
                    module.clone(),
                    status.code().unwrap_or(126) as isize
                )))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_name_and_version() {
        let module = ModuleSpec::parse("python/3.6.1").unwrap();
        assert_eq!(module.name, "python");
        assert_eq!(module.version, "3.6.1");
        assert_eq!(module.to_string(), "python/3.6.1");
    }

    #[test]
    fn rejects_token_without_version() {
        assert!(ModuleSpec::parse("python").is_err());
        assert!(ModuleSpec::parse("python/").is_err());
        assert!(ModuleSpec::parse("/3.6.1").is_err());
    }

    #[test]
    fn version_may_contain_further_slashes() {
        let module = ModuleSpec::parse("gcc/mainline/13.2").unwrap();
        assert_eq!(module.name, "gcc");
        assert_eq!(module.version, "mainline/13.2");
    }

    #[test]
    fn succeeding_command_activates() {
        // `true` ignores its arguments and exits successfully
        let activator = ModuleCommand::new("true");
        let module = ModuleSpec::parse("python/3.6.1").unwrap();
        assert!(activator.activate(&module).is_ok());
    }

    #[test]
    fn failing_command_reports_activation_failure() {
        let activator = ModuleCommand::new("false");
        let module = ModuleSpec::parse("python/3.6.1").unwrap();
        assert!(activator.activate(&module).is_err());
    }

    #[test]
    fn missing_command_reports_invocation_failure() {
        let activator = ModuleCommand::new("definitely-not-a-real-module-command");
        let module = ModuleSpec::parse("python/3.6.1").unwrap();
        assert!(activator.activate(&module).is_err());
    }
}
