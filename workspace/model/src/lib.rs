pub mod entities;

// Re-export tracing so downstream crates log through the same dependency
pub use tracing;

// Stand-alone tracing setup for uses of this crate outside the API binary
#[cfg(not(test))]
pub fn init_tracing() {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    // Log to stdout, level controlled via RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_span_events(FmtSpan::CLOSE)
        .init();
}
