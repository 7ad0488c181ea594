use super::activator::{Activator, ModuleSpec};
use crate::errors::{PrepError, Result};
use crate::state::{Configuration, Environment, FailurePolicy};

/// The ordered steps of the session initializer: a linear sequence of module
/// activations followed by search-path appends, with no branching beyond the
/// explicit failure policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    command: String,
    modules: Vec<ModuleSpec>,
    variable: String,
    additions: Vec<String>,
}

impl From<&Configuration> for Plan {
    fn from(config: &Configuration) -> Self {
        Self {
            command: config.module_command.clone(),
            modules: config.modules.clone(),
            variable: config.search_path_variable.clone(),
            additions: config.additions.clone(),
        }
    }
}

/// Outcome of the activation steps under the `Continue` policy
/// Failures are collected rather than propagated so later steps still run
#[derive(Debug, Default)]
pub struct ActivationReport {
    pub attempted: usize,
    pub failures: Vec<(ModuleSpec, PrepError)>,
}

impl ActivationReport {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Plan {
    /// Requests each module activation from the host system, in order
    /// Under `FailurePolicy::Continue` every activation is attempted and failures
    /// are collected into the report; under `FailurePolicy::Abort` the first
    /// failure is returned and the remaining activations are skipped
    pub fn activate_modules(
        &self,
        activator: &dyn Activator,
        policy: FailurePolicy,
    ) -> Result<ActivationReport> {
        let mut report = ActivationReport::default();

        for module in &self.modules {
            report.attempted += 1;
            if let Err(error) = activator.activate(module) {
                match policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Continue => report.failures.push((module.clone(), error)),
                }
            }
        }

        Ok(report)
    }

    /// The pure half of the initializer: appends each path addition to the
    /// search-path variable of the given environment, returning the new
    /// environment without mutating any other variable
    /// No existence check is performed on the appended directories
    pub fn apply(&self, environment: &Environment) -> Environment {
        let mut new_environment = environment.clone();
        for path in &self.additions {
            new_environment.append_search_path(&self.variable, path);
        }

        new_environment
    }

    /// Renders the plan as shell statements for sourcing, e.g.
    /// `eval "$(modprep print)"`
    /// The emitted statements run unconditionally in the sourcing shell, which
    /// preserves the best-effort-continue contract of a sourced bootstrap script
    /// Expansion of the prior search-path value is deferred to the shell, since
    /// the module loads run first and may extend the variable themselves
    pub fn render_script(&self) -> String {
        let mut script = String::new();
        for module in &self.modules {
            script.push_str(&format!(
                "{} load {} {}\n",
                self.command, module.name, module.version
            ));
        }

        if !self.additions.is_empty() {
            // ${VAR:+${VAR}:} expands to the prior value plus a delimiter only
            // when the variable is set and non-empty, so an unset base still
            // produces no leading delimiter
            script.push_str(&format!(
                "export {variable}=\"${{{variable}:+${{{variable}}}:}}{additions}\"\n",
                variable = self.variable,
                additions = self.additions.join(":")
            ));
        }

        script
    }

    pub fn modules(&self) -> &[ModuleSpec] {
        &self.modules
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn additions(&self) -> &[String] {
        &self.additions
    }
}
