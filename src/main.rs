mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use kubedmp::source::DumpSource;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let source = || DumpSource::detect(Some(&cli.dump_file), cli.dump_dir.as_deref());

    match cli.command {
        Commands::Version => commands::version::run(),
        Commands::Types => commands::types::run(),
        Commands::Get(ref args) => commands::get::run(&source()?, args),
        Commands::Describe(ref args) => commands::describe::run(&source()?, args),
        Commands::Show => commands::show::run(&source()?),
        Commands::Logs {
            ref pod,
            ref namespace,
            ref container,
        } => commands::logs::run(&source()?, pod, namespace, container.clone()).await,
    }
}
