//! Server lookups and metrics.

use crate::actions::ServerActionsEndpoint;
use crate::models::{Metrics, MetricsEnvelope, MetricsParams, Server, ServerEnvelope};
use crate::Result;
use hcloud_core::client::{ApiRequest, Transport};
use hcloud_core::id::ServerId;
use hcloud_core::Error;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Endpoint for servers.
#[derive(Clone)]
pub struct ServersEndpoint {
    transport: Arc<dyn Transport>,
    actions: ServerActionsEndpoint,
}

impl fmt::Debug for ServersEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServersEndpoint").finish_non_exhaustive()
    }
}

impl ServersEndpoint {
    /// Create the endpoint on top of a transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            actions: ServerActionsEndpoint::new(Arc::clone(&transport)),
            transport,
        }
    }

    /// Fetch a server by id.
    pub async fn get(&self, server: impl Into<ServerId>) -> Result<Server> {
        let server = server.into();
        debug!(server = %server, "Fetching server");
        let request = ApiRequest::get(format!("servers/{server}"));
        let value = self.transport.execute(request).await?;
        let envelope: ServerEnvelope = serde_json::from_value(value)
            .map_err(|err| Error::Parse(format!("Failed to parse server {server}: {err}")))?;
        Ok(envelope.server)
    }

    /// Fetch CPU, disk or network metrics of a server.
    pub async fn get_metrics(
        &self,
        server: impl Into<ServerId>,
        params: &MetricsParams,
    ) -> Result<Metrics> {
        let server = server.into();
        debug!(server = %server, "Fetching server metrics");
        let request =
            ApiRequest::get(format!("servers/{server}/metrics")).with_query(params.to_pairs());
        let value = self.transport.execute(request).await?;
        let envelope: MetricsEnvelope = serde_json::from_value(value).map_err(|err| {
            Error::Parse(format!("Failed to parse metrics of server {server}: {err}"))
        })?;
        Ok(envelope.metrics)
    }

    /// Actions of servers.
    #[must_use]
    pub fn actions(&self) -> &ServerActionsEndpoint {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetricType, ServerStatus};
    use chrono::{TimeZone, Utc};
    use hcloud_core::client::HttpTransport;
    use serde_json::json;
    use std::io;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    async fn endpoint(server: &MockServer) -> ServersEndpoint {
        let transport = HttpTransport::builder(server.uri(), "token")
            .unwrap()
            .build()
            .unwrap();
        ServersEndpoint::new(Arc::new(transport))
    }

    #[tokio::test]
    async fn get_server() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers/42"))
            .and(header("authorization", "Bearer token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "server": {"id": 42, "name": "my-server", "status": "running"}
            })))
            .expect(1)
            .mount(&mock)
            .await;

        let server = endpoint(&mock).await.get(42_u64).await.unwrap();
        assert_eq!(server.id, ServerId::new(42));
        assert_eq!(server.status, ServerStatus::Running);
    }

    #[tokio::test]
    async fn get_server_logs_request() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "server": {"id": 42, "name": "my-server", "status": "off"}
            })))
            .mount(&mock)
            .await;

        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        endpoint(&mock).await.get(42_u64).await.unwrap();

        let output = logs.contents();
        assert!(output.contains("Fetching server"), "{output}");
        assert!(output.contains("server=42"), "{output}");
    }

    #[tokio::test]
    async fn get_metrics_sends_window() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers/42/metrics"))
            .and(query_param("type", "cpu,network"))
            .and(query_param("start", "2024-01-01T00:00:00+00:00"))
            .and(query_param("end", "2024-01-01T01:00:00+00:00"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "metrics": {
                    "start": "2024-01-01T00:00:00Z",
                    "end": "2024-01-01T01:00:00Z",
                    "step": 60,
                    "time_series": {
                        "cpu": {"values": [[1704067200.0, "3.5"]]}
                    }
                }
            })))
            .expect(1)
            .mount(&mock)
            .await;

        let params = MetricsParams::new(
            vec![MetricType::Cpu, MetricType::Network],
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap(),
        );
        let metrics = endpoint(&mock)
            .await
            .get_metrics(42_u64, &params)
            .await
            .unwrap();

        let cpu = &metrics.time_series["cpu"];
        assert_eq!(cpu.points().next(), Some((1_704_067_200.0, Some(3.5))));
    }

    #[tokio::test]
    async fn get_missing_server_is_not_found() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers/1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"code": "not_found", "message": "server with ID '1' not found"}
            })))
            .mount(&mock)
            .await;

        let err = endpoint(&mock).await.get(1_u64).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
