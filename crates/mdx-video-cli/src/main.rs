use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdx_video_cli::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean HTML
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(cli.level().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    mdx_video_cli::run(&cli)
}
