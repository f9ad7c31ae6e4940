//! Metric definitions for the relay.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

pub const REQUESTS: MetricDef = MetricDef {
    name: "update_requests",
    metric_type: MetricType::Counter,
    description: "Inbound update requests. Tagged with status.",
};

pub const REQUEST_DURATION: MetricDef = MetricDef {
    name: "update_request.duration",
    metric_type: MetricType::Histogram,
    description: "End-to-end request duration in seconds, outbound calls included.",
};

pub const UPSTREAM_WRITES: MetricDef = MetricDef {
    name: "wordpress.writes",
    metric_type: MetricType::Counter,
    description: "Outbound WordPress calls. Tagged with kind (meta or title).",
};

pub const ALL_METRICS: &[MetricDef] = &[REQUESTS, REQUEST_DURATION, UPSTREAM_WRITES];
