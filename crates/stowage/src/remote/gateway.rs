//! Packing Gateway: the HTTP boundary to the packing service.

use super::wire::{PackData, PackRequest, PackResponse};
use crate::config::GatewayConfig;
use crate::error::PackingError;
use std::io;
use std::time::Duration;

/// Sends a packing request to the service and returns its payload.
///
/// Implementations make exactly one attempt per call.
pub trait PackingGateway: Send + Sync {
    /// Submits `request`. `timeout` overrides the gateway's default when set.
    fn submit(
        &self,
        request: &PackRequest,
        timeout: Option<Duration>,
    ) -> Result<PackData, PackingError>;
}

/// Blocking HTTP gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    agent: ureq::Agent,
    url: String,
    timeout: Duration,
}

impl HttpGateway {
    /// Creates a gateway from its configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, PackingError> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(PackingError::Configuration(
                "packing gateway base_url is empty".into(),
            ));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(PackingError::Configuration(format!(
                "packing gateway base_url '{base_url}' must start with http:// or https://"
            )));
        }

        let endpoint = config.endpoint.trim_start_matches('/');
        let timeout = Duration::from_millis(config.timeout_ms);
        Ok(Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            url: format!("{base_url}/{endpoint}"),
            timeout,
        })
    }

    /// Returns the full request URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PackingGateway for HttpGateway {
    fn submit(
        &self,
        request: &PackRequest,
        timeout: Option<Duration>,
    ) -> Result<PackData, PackingError> {
        let body =
            serde_json::to_string(request).map_err(|e| PackingError::Encoding(e.to_string()))?;
        log::debug!(
            "POST {} with {} item types ({} bytes)",
            self.url,
            request.items.len(),
            body.len()
        );

        let response = self
            .agent
            .post(&self.url)
            .timeout(timeout.unwrap_or(self.timeout))
            .set("Content-Type", "application/json")
            .send_string(&body);

        let (status, response) = match response {
            Ok(response) => (response.status(), response),
            Err(ureq::Error::Status(status, response)) => (status, response),
            Err(ureq::Error::Transport(transport)) => {
                return Err(PackingError::Transport {
                    status: None,
                    message: transport.to_string(),
                });
            }
        };

        let text = response
            .into_string()
            .map_err(|e| body_read_error(status, &e))?;

        decode_response(status, &text)
    }
}

/// A 2xx body that is not text is undecodable; any other read failure is a
/// transport failure.
fn body_read_error(status: u16, err: &io::Error) -> PackingError {
    if (200..300).contains(&status) && err.kind() == io::ErrorKind::InvalidData {
        PackingError::Decoding {
            status,
            message: format!("response body is not valid UTF-8: {err}"),
        }
    } else {
        PackingError::Transport {
            status: Some(status),
            message: format!("failed to read response body: {err}"),
        }
    }
}

/// Interprets a service response.
///
/// Non-2xx statuses are transport errors carrying the service message when one
/// can be extracted. A 2xx body must parse, report success, and carry data.
pub fn decode_response(status: u16, body: &str) -> Result<PackData, PackingError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<PackResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string());
        log::warn!("packing service answered HTTP {status}: {message}");
        return Err(PackingError::Transport {
            status: Some(status),
            message,
        });
    }

    let response: PackResponse =
        serde_json::from_str(body).map_err(|e| PackingError::Decoding {
            status,
            message: e.to_string(),
        })?;

    if !response.success {
        let error = response.error.unwrap_or_default();
        return Err(PackingError::Service {
            code: error.code,
            message: error.message,
        });
    }

    response.data.ok_or_else(|| {
        PackingError::ContractViolation("response reported success but carried no data".into())
    })
}
