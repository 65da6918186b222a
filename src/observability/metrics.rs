//! Metrics collection and exposition.
//!
//! # Metrics
//! - `route_sync_ticks_total` (counter): ticks by result (success, failure)
//! - `route_sync_tick_failures_total` (counter): failed ticks by stage
//! - `route_sync_tick_duration_seconds` (histogram): wall time per tick
//! - `route_sync_active_domains` (gauge): domains in the last rendered document
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - The Prometheus exporter is optional and configured at startup

use std::net::SocketAddr;

use crate::reconcile::TickOutcome;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), metrics_exporter_prometheus::BuildError> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_tick(outcome: &TickOutcome) {
    let result = if outcome.is_success() { "success" } else { "failure" };
    metrics::counter!("route_sync_ticks_total", "result" => result).increment(1);
    metrics::histogram!("route_sync_tick_duration_seconds").record(outcome.elapsed.as_secs_f64());

    if let Some(stage) = outcome.failed_stage() {
        metrics::counter!("route_sync_tick_failures_total", "stage" => stage.as_str()).increment(1);
    }
    if let (Some(domains), true) = (outcome.domains, outcome.is_success()) {
        metrics::gauge!("route_sync_active_domains").set(domains as f64);
    }
}
