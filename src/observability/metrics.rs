use prometheus::{
    Encoder, GaugeVec, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub recalculations_total: IntCounterVec,
    pub recalculation_latency_seconds: HistogramVec,
    pub cache_lookups_total: IntCounterVec,
    pub courier_trust_score: GaugeVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let recalculations_total = IntCounterVec::new(
            Opts::new(
                "trust_recalculations_total",
                "Total trust score recalculations by outcome",
            ),
            &["outcome"],
        )
        .expect("valid trust_recalculations_total metric");

        let recalculation_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "trust_recalculation_latency_seconds",
                "Latency of trust score recalculation in seconds",
            ),
            &["outcome"],
        )
        .expect("valid trust_recalculation_latency_seconds metric");

        let cache_lookups_total = IntCounterVec::new(
            Opts::new(
                "trust_cache_lookups_total",
                "Trust score cache lookups by result",
            ),
            &["result"],
        )
        .expect("valid trust_cache_lookups_total metric");

        let courier_trust_score = GaugeVec::new(
            Opts::new("courier_trust_score", "Last computed trust score [0..100]"),
            &["courier_id"],
        )
        .expect("valid courier_trust_score metric");

        registry
            .register(Box::new(recalculations_total.clone()))
            .expect("register trust_recalculations_total");
        registry
            .register(Box::new(recalculation_latency_seconds.clone()))
            .expect("register trust_recalculation_latency_seconds");
        registry
            .register(Box::new(cache_lookups_total.clone()))
            .expect("register trust_cache_lookups_total");
        registry
            .register(Box::new(courier_trust_score.clone()))
            .expect("register courier_trust_score");

        Self {
            registry,
            recalculations_total,
            recalculation_latency_seconds,
            cache_lookups_total,
            courier_trust_score,
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

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
