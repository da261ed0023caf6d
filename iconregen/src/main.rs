use anyhow::Result;
use clap::Parser;
use iconregen::{Config, DEFAULT_ICONS_DIR, DEFAULT_SOURCE};
use std::path::PathBuf;

/// Regenerates the png, ico and icns icons of an app from one master image,
/// keeping the sizes the existing files already have.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Master image
    #[clap(long, default_value = DEFAULT_SOURCE)]
    source: PathBuf,
    /// Directory holding the icons to regenerate
    #[clap(long, default_value = DEFAULT_ICONS_DIR)]
    icons_dir: PathBuf,
}

fn main() -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
    tracing_log::LogTracer::init().ok();
    let env = std::env::var("ICONREGEN_LOG").unwrap_or_else(|_| "error".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ACTIVE | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    log_panics::init();
    let args = Args::parse();
    let config = Config {
        source: args.source,
        icons_dir: args.icons_dir,
    };
    iconregen::generate_icons(&config)?;
    println!("Icons generated in {}", config.icons_dir.display());
    Ok(())
}
