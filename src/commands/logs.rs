use std::io::Write;

use anyhow::Context;
use kubedmp::logs::{LogRequest, stream_logs};
use kubedmp::source::DumpSource;

pub async fn run(
    source: &DumpSource,
    pod: &str,
    namespace: &str,
    container: Option<String>,
) -> anyhow::Result<()> {
    let request = LogRequest::new(pod, Some(namespace.to_string()), container);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;
    stream_logs(source, &request, |line| {
        if write_error.is_none() {
            if let Err(e) = writeln!(out, "{line}") {
                write_error = Some(e);
            }
        }
    })
    .await?;

    if let Some(e) = write_error {
        return Err(e).context("Failed to write logs to stdout");
    }
    Ok(())
}
