// Device-action HTTP client
//
// Wraps `reqwest::Client` with the fixed vendor URL. One method, one POST:
// the body is whatever the caller hands in, serialized as JSON, untouched.

use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Momentary-actuation endpoint of the Cellgate device-action service.
pub const ACTUATION_URL: &str =
    "https://deviceaction.zapopen.com/api/EVOhttp/EVOWTMMomentaryActuationRequest";

/// Longest response body kept in a `Status` error.
const BODY_PREVIEW_CHARS: usize = 200;

/// What the vendor answered to a successful actuation request.
///
/// The body is kept as text for logging only; it is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuationReceipt {
    pub status: u16,
    pub body: String,
}

/// HTTP client for the momentary-actuation endpoint.
///
/// Cheap to clone: the inner `reqwest::Client` is reference-counted, so
/// every accessory on a bridge can share one connection pool.
#[derive(Debug, Clone)]
pub struct ActuationClient {
    http: reqwest::Client,
    url: Url,
}

impl ActuationClient {
    /// Create a client pointed at [`ACTUATION_URL`].
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let url = Url::parse(ACTUATION_URL)?;
        Ok(Self { http, url })
    }

    /// Create a client with a pre-built `reqwest::Client` and endpoint.
    ///
    /// Used by tests to aim the client at a mock server.
    pub fn with_client(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// The endpoint this client posts to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// POST `body` as JSON to the actuation endpoint.
    ///
    /// Any 2xx status is success. Anything else, including a transport
    /// failure, comes back as an `Err`; the caller decides what to do with it.
    pub async fn actuate(&self, body: &(impl Serialize + Sync)) -> Result<ActuationReceipt, Error> {
        debug!("POST {}", self.url);

        let resp = self
            .http
            .post(self.url.clone())
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;
        trace!(status = status.as_u16(), bytes = text.len(), "actuation response");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: text.chars().take(BODY_PREVIEW_CHARS).collect(),
            });
        }

        Ok(ActuationReceipt {
            status: status.as_u16(),
            body: text,
        })
    }
}
