#[macro_use]
mod errors;
mod cli;
mod init;
mod state;

use std::process::Command as Process;

use clap::Parser;
use crossterm::style::Stylize;

use cli::{Cli, ExecArgs, PrepSubcommand};
use errors::{Handle, Result};
use init::{ModuleCommand, Plan};
use state::{Configuration, Environment};

const DEFAULT_CONFIG_PATH: &str = "./config/modprep.conf";

fn main() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_panic(info);
    }));

    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("{} {}", "Error:".dark_red().bold(), error);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        // An explicitly-provided file must be readable, but the default
        // location is optional and falls back to the compiled-in defaults
        Some(path) => Configuration::from_file(path)?,
        None => Configuration::from_file(DEFAULT_CONFIG_PATH).unwrap_or_default(),
    };

    let plan = Plan::from(&config);

    match &cli.subcommand {
        PrepSubcommand::Print(_) => {
            // The sourcing shell executes the emitted statements itself and
            // expands the prior search-path value after the module loads have
            // run, so this surface performs no activations and reads no
            // process state at all
            print!("{}", plan.render_script());
            Ok(())
        }
        PrepSubcommand::Exec(args) => exec_command(&config, &plan, args),
        PrepSubcommand::Show(_) => {
            show_plan(&plan);
            Ok(())
        }
    }
}

/// Activates the configured modules, then spawns the given command with the
/// search-path additions applied to its environment
fn exec_command(config: &Configuration, plan: &Plan, args: &ExecArgs) -> Result<()> {
    let activator = ModuleCommand::new(&config.module_command);
    let report = plan.activate_modules(&activator, config.on_failure)?;
    for (module, error) in &report.failures {
        eprintln!(
            "{} module '{}' was not activated: {}",
            "Warning:".dark_yellow().bold(),
            module,
            error
        );
    }

    let environment = plan.apply(&Environment::from_process());

    let mut process = Process::new(&args.command)
        .args(&args.arguments)
        .envs(environment.vars())
        .spawn()
        .replace_err(|| executable_err!(FailedToSpawn(args.command.clone())))?;

    let status = process.wait().replace_err(|| executable_err!(CouldNotWait))?;

    match status.success() {
        true => Ok(()),
        false => Err(executable_err!(FailedToExecute(
            status.code().unwrap_or(126) as isize
        ))),
    }
}

/// Displays the resolved plan without performing any of its steps
fn show_plan(plan: &Plan) {
    println!("{}", "modules".dark_blue().bold());
    for (i, module) in plan.modules().iter().enumerate() {
        println!("[{i}]: {module}");
    }

    println!("{} {}", "appends to".dark_blue().bold(), plan.variable());
    for (i, path) in plan.additions().iter().enumerate() {
        println!("[{i}]: {path}");
    }
}
