use crate::demo::{run_demo, run_rubric, run_traces, DemoArgs, TracesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use trace_portal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Trace Portal",
    about = "Run the writing community portal or explore its traces rubric from the command line",
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
    /// Compute the traces awarded for a single activity
    Traces(TracesArgs),
    /// Print the full traces rubric
    Rubric,
    /// Run an in-memory walkthrough: registrations, submissions, rankings and bulletins
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
        Command::Traces(args) => run_traces(args),
        Command::Rubric => run_rubric(),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["trace-portal-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_traces_arguments() {
        let cli = Cli::try_parse_from([
            "trace-portal-api",
            "traces",
            "--kind",
            "rol",
            "--words",
            "800",
            "--comments",
            "12",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Traces(args)) => {
                assert_eq!(args.kind, "rol");
                assert_eq!(args.words, 800);
                assert_eq!(args.comments, 12);
            }
            other => panic!("expected traces command, got {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["trace-portal-api", "serve", "--port", "8080"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
