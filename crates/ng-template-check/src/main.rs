//! ng-template-check: reports parse errors in AngularJS templates.

mod check;
mod cli;
mod diagnostic;
mod output;

use clap::Parser;
use cli::Args;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ng_template_check=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let summary = check::run(&args).into_diagnostic()?;

    if summary.error_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}
