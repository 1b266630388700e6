use anyhow::Context;
use chrono::Utc;
use kubedmp::describe::describe_items;
use kubedmp::source::DumpSource;
use tracing::debug;

use crate::cli::QueryArgs;

pub fn run(source: &DumpSource, args: &QueryArgs) -> anyhow::Result<()> {
    let query = super::query_from(args)?;
    let items = source
        .load(&query)
        .with_context(|| format!("Failed to load {} from {}", query.resource.plural, source.root().display()))?;
    debug!(kind = query.resource.name, count = items.len(), "describe_selected");

    println!("{}", describe_items(query.resource.kind, &items, Utc::now()));
    Ok(())
}
