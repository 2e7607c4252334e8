//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wallet_http_requests_total` (counter): requests by method, route, status
//! - `wallet_http_request_duration_seconds` (histogram): latency distribution
//! - `wallet_transfers_total` (counter): sends by chain and outcome
//! - `wallet_balance_fetches_total` (counter): indexer calls by chain bucket and outcome;
//!   an upstream body with an `error` field counts as an error
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

fn outcome(ok: bool) -> &'static str {
    if ok {
        "success"
    } else {
        "error"
    }
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("wallet_http_requests_total", &labels[..]).increment(1);
    metrics::histogram!("wallet_http_request_duration_seconds", &labels[..])
        .record(start.elapsed().as_secs_f64());
}

pub fn record_send(chain: &'static str, ok: bool) {
    metrics::counter!("wallet_transfers_total", "chain" => chain, "outcome" => outcome(ok))
        .increment(1);
}

/// `chain` must come from a fixed set; callers bucket free-form input first.
pub fn record_balance_fetch(chain: &'static str, ok: bool) {
    metrics::counter!("wallet_balance_fetches_total", "chain" => chain, "outcome" => outcome(ok))
        .increment(1);
}
