use crate::demo::{run_demo, run_evaluate, run_import, DemoArgs, EvaluateArgs, ImportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use edugrade::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "EduGrade",
    about = "Score educational apps, suggest improvements, and export quality reports",
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
    /// Score one app from the command line and optionally export its report
    Evaluate(EvaluateArgs),
    /// Score every row of a CSV export and print a ranked summary
    Import(ImportArgs),
    /// Evaluate the bundled sample app end to end
    Demo(DemoArgs),
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
        Command::Import(args) => run_import(args),
        Command::Demo(args) => run_demo(args),
    }
}
