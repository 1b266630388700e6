use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kubedmp::source::DEFAULT_DUMP_FILE;

#[derive(Parser)]
#[command(name = "kubedmp")]
#[command(about = "Display Kubernetes cluster-info dumps like kubectl does")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to a `kubectl cluster-info dump` file
    #[arg(short = 'f', long = "dumpfile", env = "KUBEDMP_DUMPFILE", global = true, default_value = DEFAULT_DUMP_FILE)]
    pub dump_file: PathBuf,

    /// Path to a dump directory or a sosreport `sos_commands/kubernetes` directory
    #[arg(short = 'd', long = "dumpdir", env = "KUBEDMP_DUMPDIR", global = true)]
    pub dump_dir: Option<PathBuf>,

    /// Emit diagnostics as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct QueryArgs {
    /// Resource type, e.g. po, svc, deploy
    pub resource: String,

    /// Object name
    pub name: Option<String>,

    /// Only show objects in this namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Show objects in all namespaces
    #[arg(short = 'A', long)]
    pub all_namespaces: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display one or many resources
    Get(QueryArgs),

    /// Show details of a specific resource or group of resources
    Describe(QueryArgs),

    /// Print the logs for a container in a pod
    Logs {
        /// Pod name
        pod: String,

        /// Namespace of the pod
        #[arg(short, long, default_value = kubedmp::logs::DEFAULT_LOG_NAMESPACE)]
        namespace: String,

        /// Container name; all containers when omitted
        #[arg(short, long)]
        container: Option<String>,
    },

    /// Show every resource in the dump
    Show,

    /// List supported resource types and their aliases
    Types,

    /// Display application version
    Version,
}
