pub mod api; // REST transport: POST /predict
pub mod config;
pub mod context; // Application context built once at startup
pub mod prediction; // Encoder, classifier seam, prediction service
pub mod reference; // Vocabulary, labels, explanation tables
pub mod server;
pub mod ui; // Direct and proxy form UIs

use tracing_subscriber::EnvFilter;

/// Initialize the fmt subscriber on stderr.
///
/// Without `-v`, `RUST_LOG` is honored and falls back to
/// [`config::default_log_filter`]; `-v` selects debug, `-vv` trace.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        1 => EnvFilter::new("symptom_triage=debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
