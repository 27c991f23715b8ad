use crate::demo::{run_demo, run_diff, run_evaluate, DiffArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use spend_policy::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Spend Policy Engine",
    about = "Evaluate corporate spend scenarios over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a scenario JSON file and print the decision
    Evaluate(EvaluateArgs),
    /// Compare two scenario JSON files and print the classified changes
    Diff(DiffArgs),
    /// Walk through the reference scenarios and a corrective diff
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Diff(args) => run_diff(args),
        Command::Demo => run_demo(),
    }
}
