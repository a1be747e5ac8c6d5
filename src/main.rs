use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chorale=info,chorale_core=warn")),
        )
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        chorale::start()?;
        return Ok(ExitCode::SUCCESS);
    };

    // One-shot mode: check the file and exit non-zero on violations
    let chorale = chorale::read_chorale(&path)?;
    let checker = chorale_core::ChoraleChecker::default();
    let report = checker
        .check(&chorale)
        .with_context(|| format!("Failed to check {}", path.display()))?;
    println!("{}", report);

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
