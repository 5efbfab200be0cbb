use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};
use service::customize::{SectionOutcome, SectionReport, SubmissionReport};

// Prometheus metrics (default registry)
pub static SUBMISSIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "site_customize_submissions_total",
        "Total customize form submissions applied"
    )
    .expect("register submissions_total")
});

pub static CONTENT_WRITES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "site_customize_content_writes_total",
        "Total content asset writes"
    )
    .expect("register content_writes_total")
});

pub static CONTENT_DELETES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "site_customize_content_deletes_total",
        "Total content asset deletions"
    )
    .expect("register content_deletes_total")
});

pub static CACHE_INVALIDATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "site_customize_cache_invalidations_total",
        "Total cache keys invalidated by submissions"
    )
    .expect("register cache_invalidations_total")
});

pub static MOTTO_UPDATES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "site_customize_motto_updates_total",
        "Total motto updates"
    )
    .expect("register motto_updates_total")
});

fn record_section(section: &SectionReport) {
    match section.outcome {
        SectionOutcome::Written => CONTENT_WRITES_TOTAL.inc(),
        SectionOutcome::Deleted => CONTENT_DELETES_TOTAL.inc(),
        SectionOutcome::Absent => {}
    }
    CACHE_INVALIDATIONS_TOTAL.inc_by(section.cache_keys_invalidated as u64);
}

pub fn record_submission(report: &SubmissionReport) {
    SUBMISSIONS_TOTAL.inc();
    record_section(&report.about_us);
    record_section(&report.custom_terms);
    if report.motto_saved {
        MOTTO_UPDATES_TOTAL.inc();
    }
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
