//! Metrics exposition over HTTP
//!
//! Samples from a collection pass are folded into a fresh Prometheus
//! registry and served in the text exposition format from a single
//! `/metrics` route.

use crate::collector::orchestrator::Collector;
use crate::dispatch::FAMILIES;
use crate::error::Result;
use crate::types::Sample;
use anyhow::Context;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

/// Encode samples into the Prometheus text format.
///
/// Each family with at least one sample becomes a `CounterVec` in a
/// registry built fresh for this pass; families with zero samples are
/// omitted. Values accumulate if two samples share a label set, which the
/// record invariants rule out upstream.
pub fn encode_samples(samples: &[Sample]) -> Result<String> {
    let registry = Registry::new();

    for spec in FAMILIES {
        let family_samples: Vec<&Sample> =
            samples.iter().filter(|s| s.family == spec.name).collect();
        if family_samples.is_empty() {
            continue;
        }

        let counters = CounterVec::new(Opts::new(spec.name, spec.help), spec.labels)
            .with_context(|| format!("Failed to declare metric family {}", spec.name))?;
        registry
            .register(Box::new(counters.clone()))
            .with_context(|| format!("Failed to register metric family {}", spec.name))?;

        for sample in family_samples {
            let values: Vec<&str> = spec
                .labels
                .iter()
                .map(|label| sample.label(label).unwrap_or_default())
                .collect();
            counters.with_label_values(&values).inc_by(sample.value);
        }
    }

    let encoder = TextEncoder::new();
    encoder
        .encode_to_string(&registry.gather())
        .context("Failed to encode metrics")
}

/// Shared state for the exposition server
#[derive(Clone)]
struct ExpositionState {
    collector: Arc<Mutex<Collector>>,
}

/// HTTP server exposing the single pull-based metrics endpoint
pub struct MetricsServer {
    host: String,
    port: u16,
    state: ExpositionState,
    shutdown_tx: broadcast::Sender<()>,
}

impl MetricsServer {
    pub fn new(host: String, port: u16, collector: Arc<Mutex<Collector>>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            host,
            port,
            state: ExpositionState { collector },
            shutdown_tx,
        }
    }

    /// Start serving; returns when a shutdown signal is sent via [`stop`]
    ///
    /// [`stop`]: MetricsServer::stop
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .context("Invalid metrics server address")?;

        let app = self.create_router();
        let listener = TcpListener::bind(addr).await?;

        info!("Metrics server listening on http://{}/metrics", addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("Metrics server shutdown signal received");
            })
            .await?;

        info!("Metrics server stopped");
        Ok(())
    }

    fn create_router(&self) -> Router {
        Router::new()
            .route("/metrics", get(metrics_handler))
            .with_state(self.state.clone())
    }

    /// Stop the exposition server
    pub fn stop(&self) {
        if let Err(e) = self.shutdown_tx.send(()) {
            warn!("Failed to send shutdown signal to metrics server: {}", e);
        }
    }
}

/// Scrape endpoint handler: runs one collection pass under the shared lock
async fn metrics_handler(State(state): State<ExpositionState>) -> impl IntoResponse {
    debug!("Scrape requested");

    let samples = {
        let mut collector = state.collector.lock().await;
        collector.collect().await
    };

    match encode_samples(&samples) {
        Ok(body) => {
            debug!("Serving {} samples", samples.len());
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, TextEncoder::new().format_type())],
                body,
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to encode metrics",
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample;

    #[test]
    fn test_encode_groups_samples_into_families() {
        let samples = vec![
            Sample::new("player_jumps", 42.0, vec![("player", "Notch".to_string())]),
            Sample::new("player_jumps", 7.0, vec![("player", "Alice".to_string())]),
            Sample::new(
                "cm_traveled",
                100.0,
                vec![
                    ("player", "Notch".to_string()),
                    ("method", "walking".to_string()),
                ],
            ),
        ];

        let output = encode_samples(&samples).unwrap();
        assert!(output.contains("# HELP player_jumps How often a player has jumped"));
        assert!(output.contains("# TYPE player_jumps counter"));
        assert!(output.contains(r#"player_jumps{player="Notch"} 42"#));
        assert!(output.contains(r#"player_jumps{player="Alice"} 7"#));
        assert!(output.contains(r#"cm_traveled{method="walking",player="Notch"} 100"#));
    }

    #[test]
    fn test_empty_families_are_omitted() {
        let samples = vec![Sample::new(
            "player_jumps",
            1.0,
            vec![("player", "Notch".to_string())],
        )];

        let output = encode_samples(&samples).unwrap();
        assert!(!output.contains("blocks_mined"));
        assert!(!output.contains("overall_tps"));
    }

    #[test]
    fn test_encode_no_samples_yields_empty_output() {
        let output = encode_samples(&[]).unwrap();
        assert!(output.is_empty());
    }
}
