use anyhow::Result;
use report_generator::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_level().as_str().to_lowercase()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli.execute()
}
