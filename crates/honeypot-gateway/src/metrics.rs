//! Prometheus metrics for Honeypot Gateway
//!
//! Exposes metrics for monitoring engagement volume, detections and auth.

use honeypot_protocol::EngagementResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_gauge_vec,
    register_histogram, Counter, CounterVec, Gauge, GaugeVec, Histogram,
};

lazy_static! {
    // ============================================================================
    // Engagement Metrics
    // ============================================================================

    /// Total messages handled by the engagement engine
    pub static ref ENGAGEMENTS_TOTAL: Counter =
        register_counter!("honeypot_engagements_total", "Total scammer messages handled").unwrap();

    /// Turns by the category the transcript classified as
    pub static ref TURNS_BY_SCAM_TYPE: CounterVec = register_counter_vec!(
        "honeypot_turns_by_scam_type_total",
        "Handled turns by classified scam type",
        &["scam_type"]
    ).unwrap();

    /// Artifacts reported per response
    pub static ref ARTIFACTS_PER_RESPONSE: Histogram = register_histogram!(
        "honeypot_artifacts_per_response",
        "Intelligence artifacts reported in each response",
        vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0]
    ).unwrap();

    /// Artifacts reported, by kind
    pub static ref ARTIFACTS_BY_KIND: CounterVec = register_counter_vec!(
        "honeypot_artifacts_reported_total",
        "Intelligence artifacts reported in responses, by kind",
        &["kind"]
    ).unwrap();

    /// Engagement handling latency
    pub static ref ENGAGEMENT_LATENCY: Histogram = register_histogram!(
        "honeypot_engagement_latency_seconds",
        "Engagement handling latency in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]
    ).unwrap();

    /// Conversations currently held in the store
    pub static ref CONVERSATIONS_TRACKED: Gauge =
        register_gauge!("honeypot_conversations_tracked", "Conversations held in memory").unwrap();

    // ============================================================================
    // Auth Metrics
    // ============================================================================

    /// Requests rejected for a missing or wrong API key
    pub static ref AUTH_FAILURES: Counter =
        register_counter!("honeypot_auth_failures_total", "Requests rejected by API key auth").unwrap();

    // ============================================================================
    // System Metrics
    // ============================================================================

    /// Build info
    pub static ref BUILD_INFO: GaugeVec =
        register_gauge_vec!("honeypot_build_info", "Build information", &["version", "commit"]).unwrap();
}

/// Initialize metrics with build info
pub fn init_metrics() {
    BUILD_INFO
        .with_label_values(&[
            env!("CARGO_PKG_VERSION"),
            option_env!("GIT_COMMIT_SHA").unwrap_or("unknown"),
        ])
        .set(1.0);
}

/// Record one handled engagement turn
pub fn record_engagement(response: &EngagementResponse) {
    ENGAGEMENTS_TOTAL.inc();
    TURNS_BY_SCAM_TYPE
        .with_label_values(&[response.scam_type.as_str()])
        .inc();
    let intel = &response.extracted_intelligence;
    ARTIFACTS_PER_RESPONSE.observe(intel.artifact_count() as f64);
    for (kind, values) in [
        ("bank_account", &intel.bank_accounts),
        ("upi_id", &intel.upi_ids),
        ("phishing_link", &intel.phishing_links),
    ] {
        ARTIFACTS_BY_KIND
            .with_label_values(&[kind])
            .inc_by(values.len() as f64);
    }
}

/// Export metrics in Prometheus format
pub fn export() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "failed to encode metrics");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
