pub mod describe;
pub mod get;
pub mod logs;
pub mod show;
pub mod types;
pub mod version;

use anyhow::Context;
use kubedmp::dispatch::Query;

use crate::cli::QueryArgs;

/// Build a dispatcher query from `get`/`describe` arguments.
pub fn query_from(args: &QueryArgs) -> anyhow::Result<Query> {
    Query::new(
        &args.resource,
        args.namespace.clone(),
        args.name.clone(),
        args.all_namespaces,
    )
    .with_context(|| format!("Cannot query '{}'", args.resource))
}
