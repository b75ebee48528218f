//! Thin client for the hosted relational store's REST interface (PostgREST).
//!
//! Owns connection configuration (project URL, public API key, application
//! name header) and turns non-success responses into [`GatewayError`]s. It
//! knows nothing about ideas or votes; see `repository` for that.

use std::fmt;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::StoreError;

const REQUEST_TIMEOUT_SECS: u64 = 15;
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Connection, TLS, or timeout failure before a response arrived.
    Transport(String),
    /// The service answered with a non-success status.
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// The response body did not have the expected shape.
    Decode(String),
    /// The client could not be configured.
    Setup(String),
}

impl GatewayError {
    /// A SQLSTATE code, when present, decides; a bare 409 counts only without one.
    /// PostgREST also answers 409 for foreign-key violations (`23503`).
    pub fn is_unique_violation(&self) -> bool {
        match self {
            GatewayError::Status { code: Some(code), .. } => code == UNIQUE_VIOLATION,
            GatewayError::Status { status, code: None, .. } => *status == 409,
            _ => false,
        }
    }

    /// Build a status error from a PostgREST error body (`{code, message, details, hint}`).
    pub fn from_body(status: u16, body: &str) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            code: Option<String>,
            message: Option<String>,
            details: Option<String>,
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => {
                let message = match (parsed.message, parsed.details) {
                    (Some(m), Some(d)) if !d.is_empty() => format!("{m} ({d})"),
                    (Some(m), _) => m,
                    (None, Some(d)) => d,
                    (None, None) => body.to_string(),
                };
                GatewayError::Status { status, code: parsed.code, message }
            }
            Err(_) => GatewayError::Status { status, code: None, message: body.trim().to_string() },
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(e) => write!(f, "request failed: {e}"),
            GatewayError::Status { status, code: Some(code), message } => {
                write!(f, "status={status} code={code}: {message}")
            }
            GatewayError::Status { status, code: None, message } => {
                write!(f, "status={status}: {message}")
            }
            GatewayError::Decode(e) => write!(f, "unexpected response: {e}"),
            GatewayError::Setup(e) => write!(f, "client setup failed: {e}"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<GatewayError> for StoreError {
    fn from(e: GatewayError) -> Self {
        StoreError::Remote(e.to_string())
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else {
            GatewayError::Transport(e.to_string())
        }
    }
}

/// Query-string builder for PostgREST filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.params.push(("order".to_string(), format!("{column}.{dir}")));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }
}

#[derive(Debug, Clone)]
pub struct RestGateway {
    base_url: String,
    client: reqwest::Client,
}

impl RestGateway {
    pub fn new(base_url: &str, api_key: &str, app_name: &str) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| GatewayError::Setup(format!("invalid api key header: {e}")))?;
        headers.insert(HeaderName::from_static("apikey"), key);
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| GatewayError::Setup(format!("invalid auth header: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        let app = HeaderValue::from_str(app_name)
            .map_err(|e| GatewayError::Setup(format!("invalid application name: {e}")))?;
        headers.insert(HeaderName::from_static("x-application-name"), app);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::Setup(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Project base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared HTTP client carrying the auth headers.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, GatewayError> {
        let resp = self
            .request(Method::GET, &self.table_url(table))
            .query(query.pairs())
            .send()
            .await?;
        let resp = check(resp).await?;
        resp.json::<Vec<T>>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Insert rows and return them as stored (server-assigned columns filled in).
    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        rows: &[B],
    ) -> Result<Vec<T>, GatewayError> {
        let resp = self
            .request(Method::POST, &self.table_url(table))
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        let resp = check(resp).await?;
        resp.json::<Vec<T>>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Insert rows without reading them back.
    pub async fn insert_minimal<B: Serialize>(
        &self,
        table: &str,
        rows: &[B],
    ) -> Result<(), GatewayError> {
        let resp = self
            .request(Method::POST, &self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        check(resp).await.map(|_| ())
    }

    pub async fn delete(&self, table: &str, query: &Query) -> Result<(), GatewayError> {
        let resp = self
            .request(Method::DELETE, &self.table_url(table))
            .query(query.pairs())
            .send()
            .await?;
        check(resp).await.map(|_| ())
    }

    /// Call a server-side procedure; its return value is ignored.
    pub async fn rpc<A: Serialize>(&self, function: &str, args: &A) -> Result<(), GatewayError> {
        let resp = self
            .request(Method::POST, &self.rpc_url(function))
            .json(args)
            .send()
            .await?;
        check(resp).await.map(|_| ())
    }
}

/// Pass success responses through; read the body of failures into an error.
pub(crate) async fn check(resp: Response) -> Result<Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(GatewayError::from_body(status.as_u16(), &body))
}
