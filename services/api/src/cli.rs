use crate::demo::{run_classify, run_demo, run_list, ClassifyArgs, DemoArgs, ListArgs};
use crate::server;
use award_desk::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Award Desk",
    about = "Run the scholarship award portal backend or inspect award status from the command line",
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
    /// Inspect awards and their derived status
    Awards {
        #[command(subcommand)]
        command: AwardsCommand,
    },
    /// Walk a student through drafting and submitting against a sample catalogue
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum AwardsCommand {
    /// Classify a single deadline
    Classify(ClassifyArgs),
    /// List awards from a catalogue CSV with their status
    List(ListArgs),
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
        Command::Awards {
            command: AwardsCommand::Classify(args),
        } => {
            run_classify(args);
            Ok(())
        }
        Command::Awards {
            command: AwardsCommand::List(args),
        } => run_list(args),
        Command::Demo(args) => run_demo(args),
    }
}
