//! Blocking Opengear REST client.
//!
//! Transport failures are returned as [`Error::ConnectionError`]. Anything the
//! appliance decides (a rejected login, a non-200 status, a missing field) is
//! reported as `Ok(None)` so callers check for absence instead of matching
//! on errors.

use crate::models::{ModemStatus, NodeDescription, SerialPort, SystemVersion};
use crate::Result;
use opengear_core::{
    ApplianceConfig, AuthenticatedSession, Credentials, Error, SessionState, SessionToken,
};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = concat!("opengear-api/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT_SECS: u64 = 10;

const SESSIONS_PATH: &str = "/sessions";
const VERSION_PATH: &str = "/system/version";
const NODE_DESCRIPTION_PATH: &str = "/nodeDescription";
const SERIAL_PORTS_PATH: &str = "/serialPorts";
const MODEM_STATUS_PATH: &str = "/interfaces/cellmodem/status";

static INSECURE_NOTICE: Once = Once::new();

/// Read-only accessors exposed by an appliance.
pub trait ApplianceApi {
    /// `GET /system/version`, extracting `system_version`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionError`] on transport failure and
    /// [`Error::ParseError`] when a 200 body is not JSON.
    fn get_version(&self) -> Result<Option<SystemVersion>>;

    /// `GET /nodeDescription`.
    ///
    /// # Errors
    ///
    /// See [`ApplianceApi::get_version`].
    fn get_device(&self) -> Result<Option<NodeDescription>>;

    /// `GET /serialPorts`, extracting `serialports`.
    ///
    /// # Errors
    ///
    /// See [`ApplianceApi::get_version`].
    fn get_serial_ports(&self) -> Result<Option<Vec<SerialPort>>>;

    /// `GET /interfaces/cellmodem/status`.
    ///
    /// # Errors
    ///
    /// See [`ApplianceApi::get_version`].
    fn get_modem_status(&self) -> Result<Option<ModemStatus>>;
}

/// Builder for [`OpengearClient`].
#[derive(Debug, Clone)]
pub struct OpengearClientBuilder {
    config: ApplianceConfig,
}

impl OpengearClientBuilder {
    /// Create a builder from the appliance configuration.
    #[must_use]
    pub const fn new(config: ApplianceConfig) -> Self {
        Self { config }
    }

    /// Build an unauthenticated client. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns a validation or configuration error when the settings do not
    /// form a usable URL or the HTTP client cannot be created.
    pub fn build(self) -> Result<OpengearClient> {
        self.config.parse_base_url()?;

        let mut builder = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(self.config.timeout())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));

        if !self.config.tls_verify {
            INSECURE_NOTICE.call_once(|| {
                debug!("TLS certificate verification disabled for Opengear clients");
            });
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!("Failed to build Opengear HTTP client: {err}"))
        })?;

        Ok(OpengearClient {
            http,
            base_url: self.config.base_url(),
            config: self.config,
            session: SessionState::Unauthenticated,
        })
    }
}

/// Blocking client bound to one appliance.
///
/// The underlying connections are released when the client is dropped.
#[derive(Debug)]
pub struct OpengearClient {
    http: Client,
    base_url: String,
    config: ApplianceConfig,
    session: SessionState,
}

impl OpengearClient {
    /// Build a client and log in immediately.
    ///
    /// A rejected login still yields a client; check
    /// [`OpengearClient::is_authenticated`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionError`] if the appliance cannot be reached,
    /// or a configuration error from [`OpengearClientBuilder::build`].
    pub fn connect(config: ApplianceConfig, credentials: &Credentials) -> Result<Self> {
        let mut client = OpengearClientBuilder::new(config).build()?;
        client.login(credentials)?;
        Ok(client)
    }

    /// Start a builder for the provided configuration.
    #[must_use]
    pub const fn builder(config: ApplianceConfig) -> OpengearClientBuilder {
        OpengearClientBuilder::new(config)
    }

    /// The composed base URL, e.g. `https://10.0.0.1:443/api/v1.8`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ApplianceConfig {
        &self.config
    }

    /// Whether the last login succeeded.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Log in with `POST /sessions` and install the session headers.
    ///
    /// Returns `Ok(false)` when the appliance answers with anything other
    /// than 200, omits the `session` token or issues a token that cannot be
    /// sent as a header. Any previous session is discarded first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionError`] on transport failure and
    /// [`Error::ParseError`] if a 200 response is not JSON.
    pub fn login(&mut self, credentials: &Credentials) -> Result<bool> {
        self.session = SessionState::Unauthenticated;

        let url = self.build_url(SESSIONS_PATH)?;
        let username = credentials.username();
        debug!(username, "Opengear login");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&credentials.login_request())
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(username, %status, "Opengear login rejected");
            return Ok(false);
        }

        let bytes = response.bytes()?;
        let body: Value = deserialize_body(SESSIONS_PATH, &bytes)?;
        let Some(token) = body.get("session").and_then(Value::as_str) else {
            warn!(username, "Opengear login response carried no session token");
            return Ok(false);
        };

        let session = match AuthenticatedSession::new(&SessionToken::new(token)) {
            Ok(session) => session,
            Err(err) => {
                warn!(username, %err, "Opengear login returned an unusable session token");
                return Ok(false);
            }
        };
        self.session = SessionState::Authenticated(session);
        info!(username, base_url = %self.base_url, "Opengear session established");
        Ok(true)
    }

    /// Generic GET. Returns the raw body on HTTP 200, `None` otherwise or
    /// when not authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionError`] on transport failure.
    pub fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Option<String>> {
        self.send(Method::GET, path, params, None)
    }

    /// Generic POST with an optional JSON body. Returns the raw body on
    /// HTTP 200, `None` otherwise or when not authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionError`] on transport failure.
    pub fn post(
        &self,
        path: &str,
        params: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Option<String>> {
        self.send(Method::POST, path, params, body)
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        let url = if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };
        Url::parse(&url).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid Opengear path `{path}`: {err}"))
        })
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Option<String>> {
        let Some(headers) = self.session.headers() else {
            debug!(%method, path, "no Opengear session, request skipped");
            return Ok(None);
        };

        let url = self.build_url(path)?;
        let mut request = self
            .http
            .request(method.clone(), url)
            .headers(headers.clone())
            .query(params);
        if let Some(payload) = body {
            request = request.json(payload);
        }

        debug!(%method, path, "Opengear request");
        let response = request.send()?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%method, path, %status, "Opengear request returned no data");
            return Ok(None);
        }

        Ok(Some(response.text()?))
    }

    fn get_json(&self, path: &str) -> Result<Option<Value>> {
        self.get(path, &[])?
            .map(|body| deserialize_body(path, body.as_bytes()))
            .transpose()
    }

    fn get_body<T>(&self, path: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        Ok(self
            .get_json(path)?
            .and_then(|value| decode_value(path, value)))
    }

    fn get_field<T>(&self, path: &str, field: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(mut body) = self.get_json(path)? else {
            return Ok(None);
        };
        let value = body.get_mut(field).map(Value::take).unwrap_or(Value::Null);
        if value.is_null() {
            debug!(path, field, "Opengear response missing expected field");
            return Ok(None);
        }
        Ok(decode_value(path, value))
    }
}

impl ApplianceApi for OpengearClient {
    fn get_version(&self) -> Result<Option<SystemVersion>> {
        self.get_field(VERSION_PATH, "system_version")
    }

    fn get_device(&self) -> Result<Option<NodeDescription>> {
        self.get_body(NODE_DESCRIPTION_PATH)
    }

    fn get_serial_ports(&self) -> Result<Option<Vec<SerialPort>>> {
        self.get_field(SERIAL_PORTS_PATH, "serialports")
    }

    fn get_modem_status(&self) -> Result<Option<ModemStatus>> {
        self.get_body(MODEM_STATUS_PATH)
    }
}

fn deserialize_body<R>(path: &str, bytes: &[u8]) -> Result<R>
where
    R: DeserializeOwned,
{
    serde_json::from_slice(bytes).map_err(|err| {
        Error::ParseError(format!("Failed to parse Opengear response for `{path}`: {err}"))
    })
}

// The body is valid JSON, so a shape the model cannot hold is server-side
// data and reads as absent.
fn decode_value<R>(path: &str, value: Value) -> Option<R>
where
    R: DeserializeOwned,
{
    serde_json::from_value(value)
        .map_err(|err| warn!(path, %err, "unexpected Opengear response shape"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::builtin_uart_labels;
    use opengear_core::Scheme;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ApplianceConfig {
        let address = server.address();
        ApplianceConfig::new(address.ip().to_string())
            .with_port(address.port())
            .with_scheme(Scheme::Http)
    }

    fn credentials() -> Credentials {
        Credentials::new("root", "default")
    }

    async fn mount_login(server: &MockServer, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/v1.8/sessions"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"username": "root", "password": "default"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": token})))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_get(server: &MockServer, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1.8{route}").as_str()))
            .and(header("authorization", "Token abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn login_installs_token_header() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        Mock::given(method("GET"))
            .and(path("/api/v1.8/system/version"))
            .and(header("authorization", "Token abc"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "system_version": {"firmware_version": "4.1.2", "rest_api_version": "v1.8"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let (authenticated, version) = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            (client.is_authenticated(), client.get_version().unwrap())
        })
        .await
        .unwrap();

        assert!(authenticated);
        let version = version.unwrap();
        assert_eq!(version.firmware_version.as_deref(), Some("4.1.2"));
        assert_eq!(version.extra["rest_api_version"], "v1.8");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn rejected_login_skips_every_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.8/sessions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1.8/ports"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = config_for(&server);
        tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            assert!(!client.is_authenticated());
            assert!(client.get_version().unwrap().is_none());
            assert!(client.get_device().unwrap().is_none());
            assert!(client.get_serial_ports().unwrap().is_none());
            assert!(client.get_modem_status().unwrap().is_none());
            assert!(client.get("/system/version", &[]).unwrap().is_none());
            assert!(client.post("/ports", &[], None).unwrap().is_none());
        })
        .await
        .unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn login_without_session_field_is_not_authenticated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.8/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "ok"})))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let authenticated = tokio::task::spawn_blocking(move || {
            OpengearClient::connect(config, &credentials())
                .unwrap()
                .is_authenticated()
        })
        .await
        .unwrap();

        assert!(!authenticated);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn login_with_unusable_token_is_not_authenticated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.8/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": "a\nb"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let (authenticated, version) = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            (client.is_authenticated(), client.get_version().unwrap())
        })
        .await
        .unwrap();

        assert!(!authenticated);
        assert!(version.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn login_with_non_json_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.8/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let result =
            tokio::task::spawn_blocking(move || OpengearClient::connect(config, &credentials()))
                .await
                .unwrap();

        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn serial_ports_filtered_to_builtin_uart() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        mount_get(
            &server,
            "/serialPorts",
            json!({
                "serialports": [
                    {"id": "ports-1", "label": "Console-1", "hardwareType": "builtInUART"},
                    {"id": "ports-2", "label": "USB-1"}
                ]
            }),
        )
        .await;

        let config = config_for(&server);
        let ports = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            client.get_serial_ports().unwrap()
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(ports.len(), 2);
        assert_eq!(builtin_uart_labels(&ports), vec!["Console-1"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn device_and_modem_return_whole_body() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        mount_get(
            &server,
            "/nodeDescription",
            json!({
                "model_number": "OM2248",
                "serial_number": "123456789",
                "firmware_version": "24.03.0"
            }),
        )
        .await;
        mount_get(
            &server,
            "/interfaces/cellmodem/status",
            json!({
                "up": true,
                "links": [{"wwan": {"signalStrength": 72, "carrier": "Telstra", "technology": "LTE"}}]
            }),
        )
        .await;

        let config = config_for(&server);
        let (device, modem) = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            (
                client.get_device().unwrap().unwrap(),
                client.get_modem_status().unwrap().unwrap(),
            )
        })
        .await
        .unwrap();

        assert_eq!(device.model_number.as_deref(), Some("OM2248"));
        assert_eq!(modem.up, Some(true));
        assert_eq!(
            modem.primary_wwan().and_then(|wwan| wwan.carrier.as_deref()),
            Some("Telstra")
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn non_success_status_degrades_to_none() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        Mock::given(method("GET"))
            .and(path("/api/v1.8/serialPorts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1.8/nodeDescription"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1.8/interfaces/cellmodem/status"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let config = config_for(&server);
        tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            assert!(client.is_authenticated());
            assert!(client.get_serial_ports().unwrap().is_none());
            assert!(client.get_device().unwrap().is_none());
            assert!(client.get_modem_status().unwrap().is_none());
        })
        .await
        .unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_field_degrades_to_none() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        mount_get(&server, "/system/version", json!({"version": "4.1.2"})).await;

        let config = config_for(&server);
        let version = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            client.get_version().unwrap()
        })
        .await
        .unwrap();

        assert!(version.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn null_field_degrades_to_none() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        mount_get(&server, "/system/version", json!({"system_version": null})).await;
        mount_get(&server, "/serialPorts", json!({"serialports": null})).await;

        let config = config_for(&server);
        let (version, ports) = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            (
                client.get_version().unwrap(),
                client.get_serial_ports().unwrap(),
            )
        })
        .await
        .unwrap();

        assert!(version.is_none());
        assert!(ports.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn partial_bodies_are_returned() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        mount_get(
            &server,
            "/nodeDescription",
            json!({"model_number": "OM2248", "firmware_version": "24.03"}),
        )
        .await;
        mount_get(
            &server,
            "/serialPorts",
            json!({
                "serialports": [
                    {"id": "ports-1", "label": "Console-1", "hardwareType": "builtInUART"},
                    {"id": "ports-9", "mode": "disabled"}
                ]
            }),
        )
        .await;
        mount_get(&server, "/interfaces/cellmodem/status", json!({"links": []})).await;

        let config = config_for(&server);
        let (device, ports, modem) = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            (
                client.get_device().unwrap().unwrap(),
                client.get_serial_ports().unwrap().unwrap(),
                client.get_modem_status().unwrap().unwrap(),
            )
        })
        .await
        .unwrap();

        assert_eq!(device.model_number.as_deref(), Some("OM2248"));
        assert!(device.serial_number.is_none());
        assert_eq!(device.summary(), "model=OM2248,serial=unknown,version=24.03");

        assert_eq!(ports.len(), 2);
        assert!(ports[1].label.is_none());
        assert_eq!(builtin_uart_labels(&ports), vec!["Console-1"]);

        assert!(modem.up.is_none());
        assert!(modem.links.is_empty());
        assert!(modem.summary().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unexpected_shape_degrades_to_none() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        mount_get(&server, "/serialPorts", json!({"serialports": "none configured"})).await;
        mount_get(&server, "/nodeDescription", json!(["not", "an", "object"])).await;

        let config = config_for(&server);
        let (ports, device) = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            (
                client.get_serial_ports().unwrap(),
                client.get_device().unwrap(),
            )
        })
        .await
        .unwrap();

        assert!(ports.is_none());
        assert!(device.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        Mock::given(method("GET"))
            .and(path("/api/v1.8/nodeDescription"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let result = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            client.get_device()
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn generic_post_returns_raw_body() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        Mock::given(method("POST"))
            .and(path("/api/v1.8/ports/ports-1/sessions"))
            .and(query_param("verbose", "true"))
            .and(header("authorization", "Token abc"))
            .and(body_json(json!({"action": "clear"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let body = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            client
                .post(
                    "ports/ports-1/sessions",
                    &[("verbose", "true")],
                    Some(&json!({"action": "clear"})),
                )
                .unwrap()
        })
        .await
        .unwrap();

        assert_eq!(body.as_deref(), Some(r#"{"ok":true}"#));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn request_timeout_is_connection_error() {
        let server = MockServer::start().await;
        mount_login(&server, "abc").await;
        Mock::given(method("GET"))
            .and(path("/api/v1.8/nodeDescription"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let config = config_for(&server).with_timeout(1);
        let result = tokio::task::spawn_blocking(move || {
            let client = OpengearClient::connect(config, &credentials()).unwrap();
            client.get_device()
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(Error::ConnectionError(_))));
    }

    #[test]
    fn connection_refused_is_connection_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = ApplianceConfig::new("127.0.0.1")
            .with_port(port)
            .with_scheme(Scheme::Http);

        let err = OpengearClient::connect(config, &credentials()).unwrap_err();
        assert!(err.is_connection_error());
    }

    #[test]
    fn builder_composes_base_url_without_network() {
        let config = ApplianceConfig::new("10.0.0.1").with_port(8443);
        let client = OpengearClient::builder(config).build().unwrap();
        assert_eq!(client.base_url(), "https://10.0.0.1:8443/api/v1.8");
        assert!(!client.is_authenticated());
        assert!(!client.config().tls_verify);
    }

    #[test]
    fn repeated_insecure_builds_succeed() {
        for _ in 0..2 {
            let config = ApplianceConfig::new("10.0.0.1").with_tls_verify(false);
            let client = OpengearClient::builder(config).build().unwrap();
            assert!(!client.config().tls_verify);
        }
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let config = ApplianceConfig::new("10.0.0.1").with_api_prefix("api");
        let err = OpengearClient::builder(config).build().unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }
}
