use clap::{Args, Parser, Subcommand};
use mindcheck::error::AppError;

use crate::demo::{run_classify, run_demo, ClassifyArgs, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Mental-Health Screening Service",
    about = "Run the screening intake service or exercise the risk classifier from the command line",
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
    /// Classify one questionnaire and print the assessment
    Classify(ClassifyArgs),
    /// Run an end-to-end demo covering intake, storage, and alert dispatch
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
        Command::Classify(args) => run_classify(args),
        Command::Demo(args) => run_demo(args),
    }
}
