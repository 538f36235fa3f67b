use crate::demo::{run_assess, run_demo, run_questions, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use eligibility_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Eligibility Assessment Service",
    about = "Score treatment eligibility and recommend providers from the command line or over HTTP",
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
    /// Score a single set of answers and print the result
    Assess(AssessArgs),
    /// List the questionnaire with option values and weights
    Questions,
    /// Run the reference scenarios against the embedded provider catalog
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
        Command::Assess(args) => run_assess(args),
        Command::Questions => run_questions(),
        Command::Demo => run_demo(),
    }
}
