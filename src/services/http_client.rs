//! HTTP client for the remote start-game and optimal-move services.

use super::{
    MoveService, OptimalMoveRequest, OptimalMoveResponse, PotService, ServiceError,
    StartGameRequest, StartGameResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Talks to a server exposing `/api/start-game` and `/api/optimal-move`.
#[derive(Debug, Clone)]
pub struct HttpServiceClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpServiceClient {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:8080`).
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be built.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ServiceError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Sending service request");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ServiceError::new(format!("{} returned {}: {}", path, status, text)));
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ServiceError::new(format!("Malformed response from {}: {}", path, e)))
    }
}

#[async_trait::async_trait]
impl PotService for HttpServiceClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn start_game(
        &self,
        request: &StartGameRequest,
    ) -> Result<StartGameResponse, ServiceError> {
        let response: StartGameResponse = self.post("/api/start-game", request).await?;
        if response.pots.len() != request.pot_count {
            return Err(ServiceError::new(format!(
                "asked for {} pots, received {}",
                request.pot_count,
                response.pots.len()
            )));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl MoveService for HttpServiceClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn optimal_move(
        &self,
        request: &OptimalMoveRequest,
    ) -> Result<OptimalMoveResponse, ServiceError> {
        self.post("/api/optimal-move", request).await
    }
}
