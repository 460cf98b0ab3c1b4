use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::OnceLock;

// It's important to use the exported crate `prometheus_exporter::prometheus`
// instead of `prometheus`, as different versions of that crate have
// incompatible global registries.
use prometheus_exporter::prometheus;

pub struct PrometheusMetrics {
    pub resolver_requests: prometheus::IntCounterVec,
}

static METRICS: OnceLock<PrometheusMetrics> = OnceLock::new();

pub fn metrics() -> &'static PrometheusMetrics {
    METRICS.get_or_init(|| PrometheusMetrics::new(prometheus::default_registry().clone()))
}

impl PrometheusMetrics {
    fn new(registry: prometheus::Registry) -> Self {
        let resolver_requests = prometheus::register_int_counter_vec_with_registry!(
            "linkfeed_resolver_requests",
            "Number of resolved GraphQL operations",
            &["operation", "success"],
            registry
        )
        .expect("invalid metric definition");

        Self { resolver_requests }
    }

    /// Counts one resolution of `operation`.
    pub fn observe<T, E>(&self, operation: &str, result: &Result<T, E>) {
        let success = if result.is_ok() { "true" } else { "false" };
        self.resolver_requests
            .with_label_values(&[operation, success])
            .inc();
    }
}

#[derive(Debug)]
pub struct PrometheusExporter {
    binding: SocketAddr,
    _exporter: prometheus_exporter::Exporter,
}

impl PrometheusExporter {
    /// Starts exporting Prometheus metrics at `http://0.0.0.0:{port}/metrics`. The server
    /// will keep running until the returned [`PrometheusExporter`] is dropped.
    pub fn start(port: u16, registry: prometheus::Registry) -> anyhow::Result<Self> {
        let binding = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port));
        let exporter = {
            let mut builder = prometheus_exporter::Builder::new(binding);
            builder.with_registry(registry);
            builder.start()?
        };

        Ok(Self {
            binding,
            _exporter: exporter,
        })
    }

    /// Returns the port this Prometheus exporter is bound to.
    pub fn port(&self) -> u16 {
        self.binding.port()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_counts_by_outcome() {
        let metrics = PrometheusMetrics::new(prometheus::Registry::new());

        metrics.observe("feed", &Ok::<_, ()>(()));
        metrics.observe("feed", &Ok::<_, ()>(()));
        metrics.observe("feed", &Err::<(), _>(()));

        let counter = |success| {
            metrics
                .resolver_requests
                .with_label_values(&["feed", success])
                .get()
        };
        assert_eq!(counter("true"), 2);
        assert_eq!(counter("false"), 1);
    }

    #[tokio::test]
    async fn server_is_alive() {
        let exporter = PrometheusExporter::start(13370, prometheus::Registry::new()).unwrap();
        reqwest::get(&format!("http://0.0.0.0:{}/metrics", exporter.port()))
            .await
            .unwrap();
    }
}
