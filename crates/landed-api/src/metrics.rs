//! Prometheus registry behind `/metrics`
use landed_quality::QualityTier;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct ApiMetrics {
    registry: Registry,
    /// Report evaluations by resolved tier
    pub evaluations: IntCounterVec,
    pub range_estimates: IntCounter,
    pub margin_requests: IntCounter,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let evaluations = IntCounterVec::new(
            Opts::new("landed_report_evaluations_total", "Report evaluations by quality tier"),
            &["tier"],
        )?;
        // every tier is exported from the first scrape, at zero
        for tier in QualityTier::all() {
            evaluations.with_label_values(&[tier.as_str()]);
        }
        let range_estimates =
            IntCounter::new("landed_range_estimates_total", "Standalone FOB range estimates")?;
        let margin_requests =
            IntCounter::new("landed_margin_requests_total", "Standalone margin scenario requests")?;

        registry.register(Box::new(evaluations.clone()))?;
        registry.register(Box::new(range_estimates.clone()))?;
        registry.register(Box::new(margin_requests.clone()))?;

        Ok(Self {
            registry,
            evaluations,
            range_estimates,
            margin_requests,
        })
    }

    /// Text exposition of every registered family
    pub fn render(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}
