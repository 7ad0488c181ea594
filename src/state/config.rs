use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use fs_err::File;

use crate::errors::{Handle, Result};
use crate::init::ModuleSpec;

/// Policy applied when a module activation fails
/// `Continue` matches the original behavior of sourced bootstrap scripts, where
/// every statement runs regardless of the outcome of earlier ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    Continue,
    Abort,
}

/// Represents the settings of the initializer, most of which can be configured by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Name of the host's module-management command
    pub module_command: String,
    /// Whether a failed activation aborts the remaining steps
    pub on_failure: FailurePolicy,
    /// Modules to activate, in order
    pub modules: Vec<ModuleSpec>,
    /// The colon-delimited variable the path additions are appended to
    pub search_path_variable: String,
    /// Paths to append, in order
    pub additions: Vec<String>,
}

impl Default for Configuration {
    /// Mirrors the session-preparation defaults for the workflow this tool
    /// was written for: a Python runtime, a SQLite build and a Java runtime,
    /// with the workflow package directories appended to `PYTHONPATH`
    fn default() -> Self {
        Self {
            module_command: String::from("module"),
            on_failure: FailurePolicy::Continue,
            modules: vec![
                ModuleSpec {
                    name: String::from("python"),
                    version: String::from("3.6.1"),
                },
                ModuleSpec {
                    name: String::from("sqlite3"),
                    version: String::from("3.24.0"),
                },
                ModuleSpec {
                    name: String::from("java"),
                    version: String::from("8u131"),
                },
            ],
            search_path_variable: String::from("PYTHONPATH"),
            additions: vec![
                String::from("/gpfs/projects/pr1ejg00/UnifiedCSWFlow"),
                String::from("/gpfs/projects/pr1ejg00/UnifiedCSWFlow/unifiedCSWFlow"),
            ],
        }
    }
}

impl Configuration {
    /// Scans a configuration file for settings and updates the configuration accordingly
    pub fn from_file(filename: &str) -> Result<Self> {
        let filename = PathBuf::from(filename);

        let mut config = Self::default();
        // The first occurrence of a repeatable key replaces the compiled-in
        // default list instead of extending it
        let mut replaced_modules = false;
        let mut replaced_additions = false;

        let file = File::open(filename.clone())
            .replace_err(|| config_err!(FailedToOpenConfigFile(filename.clone())))?;
        let reader = BufReader::new(file);

        for line in reader.lines() {
            let line =
                line.replace_err(|| config_err!(FailedToReadConfigFile(filename.clone())))?;
            // Blank lines and comments are skipped
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let tokens = line.split(": ").collect::<Vec<&str>>();
            if tokens.len() != 2 {
                return Err(config_err!(FailedToReadConfigFile(filename)));
            }

            let (key, value) = (tokens[0], tokens[1]);

            match key {
                "module-command" => config.module_command = value.to_owned(),
                "on-failure" => {
                    config.on_failure = match value {
                        "continue" => FailurePolicy::Continue,
                        "abort" => FailurePolicy::Abort,
                        _ => return Err(config_err!(InvalidValue(value.to_owned()))),
                    }
                }
                "load-module" => {
                    if !replaced_modules {
                        config.modules.clear();
                        replaced_modules = true;
                    }

                    config.modules.push(ModuleSpec::parse(value)?);
                }
                "search-path-variable" => config.search_path_variable = value.to_owned(),
                "append-path" => {
                    if !replaced_additions {
                        config.additions.clear();
                        replaced_additions = true;
                    }

                    config.additions.push(value.to_owned());
                }
                _ => return Err(config_err!(UnknownKey(key.to_owned()))),
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_the_session_bootstrap() {
        let config = Configuration::default();
        assert_eq!(config.module_command, "module");
        assert_eq!(config.on_failure, FailurePolicy::Continue);
        assert_eq!(config.modules.len(), 3);
        assert_eq!(config.search_path_variable, "PYTHONPATH");
        assert_eq!(config.additions.len(), 2);
    }

    #[test]
    fn file_settings_override_defaults() {
        let file = write_config(
            "module-command: modulecmd\n\
             on-failure: abort\n\
             load-module: python/3.9.5\n\
             search-path-variable: PERL5LIB\n\
             append-path: /opt/flow\n",
        );

        let config = Configuration::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.module_command, "modulecmd");
        assert_eq!(config.on_failure, FailurePolicy::Abort);
        assert_eq!(config.modules, vec![ModuleSpec::parse("python/3.9.5").unwrap()]);
        assert_eq!(config.search_path_variable, "PERL5LIB");
        assert_eq!(config.additions, vec![String::from("/opt/flow")]);
    }

    #[test]
    fn repeated_keys_accumulate_in_order() {
        let file = write_config(
            "load-module: python/3.9.5\n\
             load-module: java/11\n\
             append-path: /opt/flow\n\
             append-path: /opt/flow/pkg\n",
        );

        let config = Configuration::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.modules.len(), 2);
        assert_eq!(config.modules[1], ModuleSpec::parse("java/11").unwrap());
        assert_eq!(config.additions, vec![
            String::from("/opt/flow"),
            String::from("/opt/flow/pkg"),
        ]);
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        let file = write_config("# session setup\n\nload-module: python/3.9.5\n");
        let config = Configuration::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.modules.len(), 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("load-modules: python/3.9.5\n");
        assert!(Configuration::from_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn invalid_failure_policy_is_rejected() {
        let file = write_config("on-failure: retry\n");
        assert!(Configuration::from_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Configuration::from_file("/nonexistent/modprep.conf").is_err());
    }
}
