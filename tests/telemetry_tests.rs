use timeline_chart::telemetry::{DEFAULT_TRACING_DIRECTIVE, init_default_tracing, init_tracing_with_fallback};

#[test]
fn tracing_installs_at_most_once() {
    assert_eq!(DEFAULT_TRACING_DIRECTIVE, "info");
    let first = init_default_tracing();
    assert_eq!(first, cfg!(feature = "telemetry"));
    // A global subscriber can only be set once.
    assert!(!init_tracing_with_fallback("timeline_chart=trace"));
}
