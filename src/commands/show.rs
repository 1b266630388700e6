use anyhow::Context;
use chrono::Utc;
use kubedmp::show::show_dump;
use kubedmp::source::DumpSource;
use tracing::info;

pub fn run(source: &DumpSource) -> anyhow::Result<()> {
    let shown = show_dump(source, Utc::now(), |section| println!("{section}"))
        .with_context(|| format!("Failed to show {}", source.root().display()))?;
    info!(documents = shown, "show_completed");
    Ok(())
}
