//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use lazy_static::lazy_static;
use prometheus::{HistogramOpts, IntCounterVec, IntGauge, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("restodir_http_requests_total", "Total number of HTTP requests"),
        &["method", "status"]
    ).expect("metric can be created");
    pub static ref HTTP_REQUEST_DURATION_SECONDS: prometheus::HistogramVec = prometheus::HistogramVec::new(
        HistogramOpts::new(
            "restodir_http_request_duration_seconds",
            "HTTP request duration in seconds"
        ).buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        &["method"]
    ).expect("metric can be created");

    // Database Metrics
    pub static ref DB_QUERIES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("restodir_db_queries_total", "Total number of database queries"),
        &["operation"]
    ).expect("metric can be created");
    pub static ref DB_CONNECTIONS_ACTIVE: IntGauge = IntGauge::new(
        "restodir_db_connections_active",
        "Current number of checked-out database connections"
    ).expect("metric can be created");

    // Application Metrics
    pub static ref RESTAURANTS_TOTAL: IntGauge = IntGauge::new(
        "restodir_restaurants_total",
        "Number of stored restaurants as of the last full listing"
    ).expect("metric can be created");
    pub static ref SYNCS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("restodir_syncs_total", "Total number of replace-style syncs"),
        &["status"]
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("restodir_errors_total", "Total number of error responses"),
        &["error_type"]
    ).expect("metric can be created");
}

/// Initialize metrics registry.
///
/// Safe to call more than once; later calls leave the registry untouched.
pub fn init_metrics() {
    static INIT: std::sync::Once = std::sync::Once::new();

    INIT.call_once(|| {
        REGISTRY
            .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
            .expect("HTTP_REQUESTS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
            .expect("HTTP_REQUEST_DURATION_SECONDS can be registered");
        REGISTRY
            .register(Box::new(DB_QUERIES_TOTAL.clone()))
            .expect("DB_QUERIES_TOTAL can be registered");
        REGISTRY
            .register(Box::new(DB_CONNECTIONS_ACTIVE.clone()))
            .expect("DB_CONNECTIONS_ACTIVE can be registered");
        REGISTRY
            .register(Box::new(RESTAURANTS_TOTAL.clone()))
            .expect("RESTAURANTS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(SYNCS_TOTAL.clone()))
            .expect("SYNCS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(ERRORS_TOTAL.clone()))
            .expect("ERRORS_TOTAL can be registered");

        tracing::info!("Metrics registry initialized");
    });
}

/// Record one finished HTTP request.
pub fn observe_http_request(method: &str, status: u16, elapsed: std::time::Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method])
        .observe(elapsed.as_secs_f64());
}
