//! Testimania CLI: render, embed and preview the testimonial widget
//!
//! ## Usage
//!
//! ```bash
//! testimania render --slug acme --fixtures fixtures.json -o preview.html
//! testimania render --slug acme --api-base https://app.example.com --fragment
//! testimania snippet --slug acme --layout carousel --theme dark
//! testimania serve --fixtures fixtures.json --port 8080
//! ```

use clap::Parser;
use std::process::ExitCode;
use testimania::loader::LoadOutcome;
use testimania_cli::{
    handlers, logging, write_output, Cli, CliConfig, CliError, CliResult, Commands, Reporter,
    Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    logging::init(&config);
    let reporter = Reporter::from_config(&config);

    match cli.command {
        Commands::Render(args) => {
            let report = runtime()?.block_on(handlers::execute_render(&args))?;
            write_output(args.output.as_deref(), &report.html)?;
            match &report.mounted.outcome {
                LoadOutcome::Loaded(_) => reporter.success(&report.summary()),
                LoadOutcome::Empty | LoadOutcome::Failed(_) => reporter.warning(&report.summary()),
            }
            if let Some(path) = &args.output {
                reporter.info(&format!("wrote {}", path.display()));
            }
            Ok(())
        }
        Commands::Snippet(args) => {
            let snippet = handlers::execute_snippet(&args)?;
            write_output(args.output.as_deref(), &snippet)?;
            if let Some(path) = &args.output {
                reporter.success(&format!("wrote {}", path.display()));
            }
            Ok(())
        }
        Commands::Serve(args) => runtime()?.block_on(handlers::execute_serve(&args)),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.into())
        .with_log_format(cli.log_format.into())
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server(format!("failed to start async runtime: {e}")))
}
