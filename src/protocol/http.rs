// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP gateway implementation.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::GatewayError;
use crate::protocol::{Gateway, GatewayRequest, RequestOutcome};
use crate::response::{DeviceIdentity, ModeResult};
use crate::types::{MacAddress, Mode, SettingsId};

// ============================================================================
// HttpConfig - Configuration for the HTTP gateway
// ============================================================================

/// Configuration for an HTTP device gateway.
///
/// # Examples
///
/// ```
/// use evk_session::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = HttpConfig::new("localhost");
/// assert_eq!(config.base_url(), "http://localhost:5000");
///
/// // With all options
/// let config = HttpConfig::new("gateway.lab")
///     .with_port(8443)
///     .with_https()
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "https://gateway.lab:8443");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: Option<u16>,
    use_https: bool,
    timeout: Duration,
}

impl HttpConfig {
    /// Default gateway port.
    pub const DEFAULT_PORT: u16 = 5000;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the specified gateway host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the gateway
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            use_https: false,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, 443 is used instead of the
    /// default gateway port.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        self
    }

    /// Sets the bounded wait applied to every request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port, falling back to the scheme's default.
    #[must_use]
    pub fn port(&self) -> u16 {
        match (self.port, self.use_https) {
            (Some(port), _) => port,
            (None, true) => Self::DEFAULT_HTTPS_PORT,
            (None, false) => Self::DEFAULT_PORT,
        }
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port = self.port();
        let port_suffix = if (self.use_https && port == 443) || (!self.use_https && port == 80) {
            String::new()
        } else {
            format!(":{port}")
        };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an `HttpGateway` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_gateway(self) -> Result<HttpGateway, GatewayError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GatewayError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpGateway {
            base_url: self.base_url(),
            client,
        })
    }
}

// ============================================================================
// HttpGateway
// ============================================================================

/// Gateway reached over HTTP with JSON bodies.
///
/// Routes:
/// - `POST /connect` answers with the device identity object
/// - `POST /mode1`, `POST /mode2` answer with a result object
///
/// # Examples
///
/// ```no_run
/// use evk_session::protocol::{Gateway, HttpConfig};
/// use evk_session::types::{MacAddress, SettingsId};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = HttpConfig::new("localhost").into_gateway()?;
/// let mac = MacAddress::parse("AA:BB:CC:DD:EE:FF")?;
/// let identity = gateway.connect("router1", mac, SettingsId::DEFAULT).await?;
/// println!("firmware {:?}", identity.firmware_version());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: Client,
}

/// Error body the gateway sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpGateway {
    /// Creates a gateway client for the specified host with default settings.
    ///
    /// The host may carry an explicit `http://` or `https://` scheme and
    /// port, in which case it is used verbatim as the base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, GatewayError> {
        let host = host.into();
        if host.starts_with("http://") || host.starts_with("https://") {
            let mut gateway = HttpConfig::new(String::new()).into_gateway()?;
            gateway.base_url = host.trim_end_matches('/').to_string();
            Ok(gateway)
        } else {
            HttpConfig::new(host).into_gateway()
        }
    }

    /// Returns the base URL of the gateway.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL for a route.
    fn build_url(&self, route: &str) -> String {
        format!("{}/{route}", self.base_url)
    }

    /// Posts a request body and returns the response text of a 2xx answer.
    async fn post(&self, route: &str, request: &GatewayRequest<'_>) -> RequestOutcome<String> {
        let url = self.build_url(route);

        tracing::debug!(
            url = %url,
            dev = request.dev,
            mac = %request.mac,
            setting = %request.setting,
            "Sending gateway request"
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(GatewayError::protocol(status_message(status, &body)));
        }

        tracing::debug!(body = %body, "Received gateway response");

        Ok(body)
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::timeout()
    } else {
        GatewayError::network(error.to_string())
    }
}

fn status_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error }) => format!("HTTP {} - {error}", status.as_u16()),
        Err(_) => format!(
            "HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ),
    }
}

impl Gateway for HttpGateway {
    async fn connect(
        &self,
        device_name: &str,
        mac: MacAddress,
        settings_id: SettingsId,
    ) -> RequestOutcome<DeviceIdentity> {
        let request = GatewayRequest::new(device_name, mac, settings_id);
        let body = self.post("connect", &request).await?;
        DeviceIdentity::from_response(device_name, mac, settings_id, &body)
    }

    async fn execute(
        &self,
        mode: Mode,
        device_name: &str,
        mac: MacAddress,
        settings_id: SettingsId,
    ) -> RequestOutcome<ModeResult> {
        let request = GatewayRequest::new(device_name, mac, settings_id);
        let body = self.post(mode.route(), &request).await?;
        ModeResult::from_response(mode, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_for_routes() {
        let gateway = HttpGateway::new("192.168.1.100").unwrap();
        assert_eq!(gateway.build_url("connect"), "http://192.168.1.100:5000/connect");
        assert_eq!(
            gateway.build_url(Mode::Mode2.route()),
            "http://192.168.1.100:5000/mode2"
        );
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let gateway = HttpGateway::new("https://gateway.lab:9000/").unwrap();
        assert_eq!(gateway.base_url(), "https://gateway.lab:9000");
    }

    #[test]
    fn status_message_prefers_error_body() {
        let msg = status_message(StatusCode::NOT_FOUND, r#"{"error": "Device 'x' not found"}"#);
        assert_eq!(msg, "HTTP 404 - Device 'x' not found");
    }

    #[test]
    fn status_message_falls_back_to_reason() {
        let msg = status_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(msg, "HTTP 500 - Internal Server Error");
    }

    // =========================================================================
    // HttpConfig tests
    // =========================================================================

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("localhost");
        assert_eq!(config.host(), "localhost");
        assert_eq!(config.port(), 5000);
        assert!(!config.use_https());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn http_config_with_https() {
        let config = HttpConfig::new("gateway.lab").with_https();
        assert!(config.use_https());
        assert_eq!(config.port(), 443);
        assert_eq!(config.base_url(), "https://gateway.lab");
    }

    #[test]
    fn http_config_with_https_custom_port() {
        let config = HttpConfig::new("gateway.lab").with_port(8443).with_https();
        assert_eq!(config.port(), 8443);
        assert_eq!(config.base_url(), "https://gateway.lab:8443");
    }

    #[test]
    fn http_config_explicit_default_port_survives_https() {
        let config = HttpConfig::new("gateway.lab")
            .with_port(HttpConfig::DEFAULT_PORT)
            .with_https();
        assert_eq!(config.port(), 5000);
        assert_eq!(config.base_url(), "https://gateway.lab:5000");
    }

    #[test]
    fn http_config_port_80_is_implicit() {
        let config = HttpConfig::new("gateway.lab").with_port(80);
        assert_eq!(config.base_url(), "http://gateway.lab");
    }

    #[test]
    fn http_config_into_gateway() {
        let gateway = HttpConfig::new("10.0.0.2")
            .with_timeout(Duration::from_millis(250))
            .into_gateway()
            .unwrap();
        assert_eq!(gateway.base_url(), "http://10.0.0.2:5000");
    }
}
