use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub deliveries_created_total: IntCounter,
    pub delivery_accepts_total: IntCounterVec,
    pub pending_deliveries: IntGauge,
    pub match_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let deliveries_created_total = IntCounter::new(
            "deliveries_created_total",
            "Total delivery requests created",
        )
        .expect("valid deliveries_created_total metric");

        let delivery_accepts_total = IntCounterVec::new(
            Opts::new("delivery_accepts_total", "Accept attempts by outcome"),
            &["outcome"],
        )
        .expect("valid delivery_accepts_total metric");

        let pending_deliveries = IntGauge::new(
            "pending_deliveries",
            "Current number of unassigned pending delivery requests",
        )
        .expect("valid pending_deliveries metric");

        let match_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "match_duration_seconds",
            "Time spent filtering available deliveries for one poll",
        ))
        .expect("valid match_duration_seconds metric");

        registry
            .register(Box::new(deliveries_created_total.clone()))
            .expect("register deliveries_created_total");
        registry
            .register(Box::new(delivery_accepts_total.clone()))
            .expect("register delivery_accepts_total");
        registry
            .register(Box::new(pending_deliveries.clone()))
            .expect("register pending_deliveries");
        registry
            .register(Box::new(match_duration_seconds.clone()))
            .expect("register match_duration_seconds");

        Self {
            registry,
            deliveries_created_total,
            delivery_accepts_total,
            pending_deliveries,
            match_duration_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
