mod activator;
mod plan;

pub use activator::{Activator, ModuleCommand, ModuleSpec};
pub use plan::{ActivationReport, Plan};
