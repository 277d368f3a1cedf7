use crate::demo::{run_dashboard_evaluate, run_demo, DashboardEvaluateArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hiring_portal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hiring Portal",
    about = "Serve and inspect the applicant hiring dashboard from the command line",
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
    /// Inspect how a fetched application renders on the dashboard
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommand,
    },
    /// Walk through the reference applicant scenarios
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DashboardCommand {
    /// Compute completion, active stage and access for a snapshot file
    Evaluate(DashboardEvaluateArgs),
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
        Command::Dashboard {
            command: DashboardCommand::Evaluate(args),
        } => run_dashboard_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}
