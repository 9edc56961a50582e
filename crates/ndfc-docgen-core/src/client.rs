//! Minimal REST client for an NDFC controller.
//!
//! The client logs in once, keeps the bearer token, and sends DELETE, GET,
//! POST and PUT requests. Every request is awaited in sequence; nothing is
//! retried.
//!
//! ```no_run
//! use ndfc_docgen_core::client::NdfcClient;
//! use ndfc_docgen_core::config::Config;
//!
//! # async fn run() -> ndfc_docgen_core::Result<()> {
//! let mut client = NdfcClient::new(Config::from_env()?)?;
//! client.login().await?;
//! let template = client.fetch_template("Easy_Fabric").await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONNECTION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value as JsonValue};

use crate::config::Config;
use crate::Error;

/// Path of the v1 REST API below the controller address
pub const API_V1: &str = "/appcenter/cisco/ndfc/api/v1";

/// HTTP verbs the controller API accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Delete,
    Get,
    Post,
    Put,
}

impl Verb {
    pub const ALL: [Verb; 4] = [Self::Delete, Self::Get, Self::Post, Self::Put];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::Delete => Method::DELETE,
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(Verb::as_str).collect();
                Error::usage(format!(
                    "Invalid verb {s}. Expected one of {}",
                    expected.join(",")
                ))
            })
    }
}

/// Which headers accompany a request
#[derive(Debug, Clone, Default)]
pub enum RequestHeaders {
    /// Bearer token and JSON content type
    #[default]
    Standard,
    /// No headers at all
    Empty,
    Custom(HeaderMap),
}

/// A single controller request
#[derive(Debug, Clone)]
pub struct NdfcRequest {
    pub verb: Verb,
    pub url: String,
    pub headers: RequestHeaders,
    /// Query parameters, sent with GET only
    pub params: Vec<(String, String)>,
    /// Body, sent with POST and PUT only. Defaults to `{}`.
    pub payload: Option<JsonValue>,
}

impl NdfcRequest {
    pub fn new(verb: Verb, url: impl Into<String>) -> Self {
        Self {
            verb,
            url: url.into(),
            headers: RequestHeaders::Standard,
            params: Vec::new(),
            payload: None,
        }
    }

    pub fn headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn payload(mut self, payload: JsonValue) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Body of a successful response
#[derive(Debug, Clone, PartialEq)]
pub enum NdfcResponse {
    Json(JsonValue),
    /// The body was not valid JSON
    Raw(String),
}

impl NdfcResponse {
    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// The JSON body, or a config error if the controller sent something else
    pub fn into_json(self) -> crate::Result<JsonValue> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Raw(text) => {
                let preview: String = text.chars().take(80).collect();
                Err(Error::config(format!(
                    "Expected a JSON response from the controller, got: {preview}"
                )))
            }
        }
    }
}

/// Authenticated client for one controller
pub struct NdfcClient {
    config: Config,
    base_url: String,
    http: reqwest::Client,
    bearer_token: Option<String>,
}

impl fmt::Debug for NdfcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdfcClient")
            .field("config", &self.config)
            .field("base_url", &self.base_url)
            .field("logged_in", &self.bearer_token.is_some())
            .finish()
    }
}

impl NdfcClient {
    /// Client for `https://<config.ip4>`
    pub fn new(config: Config) -> crate::Result<Self> {
        let base_url = config.base_url()?;
        Self::with_base_url(config, base_url.as_str())
    }

    /// Client for an explicit base URL, e.g. a local test server
    pub fn with_base_url(config: Config, base_url: &str) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.request_verify)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
            http,
            bearer_token: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_logged_in(&self) -> bool {
        self.bearer_token.is_some()
    }

    pub fn url_base(&self) -> &str {
        &self.base_url
    }

    pub fn url_login(&self) -> String {
        format!("{}/login", self.base_url)
    }

    pub fn url_api_v1(&self) -> String {
        format!("{}{}", self.base_url, API_V1)
    }

    pub fn url_templates(&self) -> String {
        format!(
            "{}/configtemplate/rest/config/templates",
            self.url_api_v1()
        )
    }

    pub fn url_template(&self, name: &str) -> String {
        format!("{}/{}", self.url_templates(), name)
    }

    pub fn url_control_fabrics(&self) -> String {
        format!("{}/lan-fabric/rest/control/fabrics", self.url_api_v1())
    }

    pub fn url_top_down_fabrics(&self) -> String {
        format!("{}/lan-fabric/rest/top-down/fabrics", self.url_api_v1())
    }

    pub fn url_control_policies_switches(&self) -> String {
        format!(
            "{}/lan-fabric/rest/control/policies/switches",
            self.url_api_v1()
        )
    }

    /// Log in and keep the returned token for later requests.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the response carries no `jwttoken`.
    pub async fn login(&mut self) -> crate::Result<()> {
        let url = self.url_login();
        let payload = json!({
            "userName": self.config.username,
            "userPasswd": self.config.password,
            "domain": self.config.domain,
        });
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        log::debug!("Logging in to {url} as {}", self.config.username);
        let response = self
            .http
            .post(&url)
            .headers(headers)
            .body(payload.to_string())
            .send()
            .await
            .map_err(|e| {
                log::error!("Unable to connect to {url}: {e}");
                Error::Http(e)
            })?;
        let status = response.status();
        let text = response.text().await?;

        let token = serde_json::from_str::<JsonValue>(&text)
            .ok()
            .and_then(|body| body.get("jwttoken").and_then(JsonValue::as_str).map(str::to_string));
        match token {
            Some(token) => {
                self.bearer_token = Some(format!("Bearer {token}"));
                log::info!("Logged in to {}", self.base_url);
                Ok(())
            }
            None => {
                log::error!("POST response from controller during {url} status: {status}");
                Err(Error::auth(
                    "Response missing jwttoken. Check password or username?",
                ))
            }
        }
    }

    /// Authorization and content type headers the controller expects.
    ///
    /// # Errors
    ///
    /// Returns an authentication error before `login` has succeeded.
    pub fn make_headers(&self) -> crate::Result<HeaderMap> {
        let token = self
            .bearer_token
            .as_deref()
            .ok_or_else(|| Error::auth("Call NdfcClient.login() before sending requests"))?;
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(token)
                .map_err(|e| Error::auth(format!("Unusable bearer token: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Send a request.
    ///
    /// Only HTTP 200 counts as success. A body that isn't JSON comes back as
    /// [`NdfcResponse::Raw`].
    pub async fn ndfc_action(&self, request: NdfcRequest) -> crate::Result<NdfcResponse> {
        let NdfcRequest {
            verb,
            url,
            headers,
            params,
            payload,
        } = request;
        let headers = match headers {
            RequestHeaders::Standard => self.make_headers()?,
            RequestHeaders::Empty => HeaderMap::new(),
            RequestHeaders::Custom(headers) => headers,
        };

        let mut builder = self.http.request(verb.method(), &url).headers(headers);
        match verb {
            Verb::Get if !params.is_empty() => builder = builder.query(&params),
            Verb::Post | Verb::Put => {
                let body = payload.unwrap_or_else(|| json!({}));
                builder = builder.body(serde_json::to_string(&body)?);
            }
            _ => {}
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                log::error!("Timed out connecting to {url}: {e}");
            } else {
                log::error!("Unable to connect to {url}: {e}");
            }
            Error::Http(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            log::error!("{verb} response from controller during {url} status: {status}");
            return Err(Error::Request {
                verb: verb.to_string(),
                url,
                status: status.as_u16(),
            });
        }
        log::debug!("{verb} succeeded {url}");

        let text = response.text().await?;
        Ok(match serde_json::from_str(&text) {
            Ok(value) => NdfcResponse::Json(value),
            Err(_) => NdfcResponse::Raw(text),
        })
    }

    pub async fn get(&self, url: impl Into<String>) -> crate::Result<NdfcResponse> {
        self.ndfc_action(NdfcRequest::new(Verb::Get, url)).await
    }

    pub async fn post(
        &self,
        url: impl Into<String>,
        payload: JsonValue,
    ) -> crate::Result<NdfcResponse> {
        self.ndfc_action(NdfcRequest::new(Verb::Post, url).payload(payload))
            .await
    }

    pub async fn put(
        &self,
        url: impl Into<String>,
        payload: JsonValue,
    ) -> crate::Result<NdfcResponse> {
        self.ndfc_action(NdfcRequest::new(Verb::Put, url).payload(payload))
            .await
    }

    pub async fn delete(&self, url: impl Into<String>) -> crate::Result<NdfcResponse> {
        self.ndfc_action(NdfcRequest::new(Verb::Delete, url)).await
    }

    /// One template by name
    pub async fn fetch_template(&self, name: &str) -> crate::Result<JsonValue> {
        log::info!("Fetching template {name}");
        self.get(self.url_template(name)).await?.into_json()
    }

    /// Every template the controller knows
    pub async fn fetch_all_templates(&self) -> crate::Result<JsonValue> {
        log::info!("Fetching all templates");
        self.get(self.url_templates()).await?.into_json()
    }
}
