use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "modprep",
    about = "Prepares a cluster shell session by activating environment modules and extending an interpreter search path"
)]
pub struct Cli {
    #[arg(
        short = 'c',
        long = "config",
        help = "Path to the configuration file (compiled-in defaults are used when omitted)"
    )]
    pub config: Option<String>,
    #[clap(subcommand)]
    pub subcommand: PrepSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrepSubcommand {
    #[clap(
        about = "Emit the module-load and export statements for sourcing, e.g. eval \"$(modprep print)\""
    )]
    Print(PrintArgs),
    #[clap(about = "Activate the modules and run a command with the prepared environment")]
    Exec(ExecArgs),
    #[clap(about = "Display the resolved plan without performing any of its steps")]
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct PrintArgs {}

#[derive(Args, Debug)]
pub struct ExecArgs {
    #[arg(help = "The command to run")]
    pub command: String,
    #[arg(
        help = "The arguments to pass to the command",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub arguments: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {}
