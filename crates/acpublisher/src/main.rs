//! acpublisher - App Center APK publishing CLI

mod cli;
mod exit_codes;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;

            // Help and version requests are not failures.
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                let _ = err.print();
                std::process::exit(exit_codes::SUCCESS);
            }

            eprintln!("{err}");
            std::process::exit(exit_codes::ERROR);
        }
    };

    init_tracing(cli.verbose, cli.debug);

    if let Err(err) = cli.execute() {
        eprintln!("{} {:#}", style("✗").red().bold(), err);
        std::process::exit(exit_codes::ERROR);
    }
}

/// Console-only subscriber on stderr; the level comes from the flags:
/// default `info`, `--debug` adds step detail, `--verbose` adds the full
/// wire traces.
fn init_tracing(verbose: bool, debug: bool) {
    let level = if verbose {
        "trace"
    } else if debug {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
