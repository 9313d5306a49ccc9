//! Tracing setup shared by the workspace binaries

use tracing_subscriber::EnvFilter;

/// Initialize the stdout tracing subscriber with a per-crate filter.
///
/// Workspace crates log at `log_level`; the noisier HTTP internals are
/// pinned to `warn` so request bodies and connection chatter stay out of
/// normal runs.
pub fn init_tracing(log_level: &str) {
    let filter = format!(
        "webserver={log_level},pipeline={log_level},shared={log_level},tower_http=warn,reqwest=warn,hyper=warn"
    );

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
