use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use validator::Validate;

use crate::features::search::resolver::build_request;
use crate::features::search::schemas::{ListingView, PageResult, SearchQuery, SearchResponse};
use crate::utilities::{config::Config, errors::AppError};

const GENERIC_FETCH_ERROR: &str = "Unable to load listings. Please try again.";

/// Error envelope the search API uses for non-success statuses.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
}

pub struct SearchApi {
    endpoint: String,
    client: Client,
}

impl SearchApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.search_api_endpoint.clone())
    }

    /// Fetch one page of listings for the reconciled query. The server owns
    /// all filtering and pagination semantics; failures map to a user-facing
    /// message, preferring whatever the server put in its error body.
    pub async fn search(&self, query: &SearchQuery) -> Result<PageResult, AppError> {
        let request = build_request(query);
        request.validate()?;

        debug!(endpoint = %self.endpoint, page = request.page_number, "fetching listings");

        let res = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string());
            warn!(%status, "search request failed");
            return Err(AppError::ExternalServiceError(message));
        }

        match serde_json::from_str::<SearchResponse>(&text) {
            Ok(response) => Ok(PageResult::from(response)),
            Err(err) => {
                debug!("parsing search response failed, {err}");
                Err(AppError::ExternalServiceError(
                    GENERIC_FETCH_ERROR.to_string(),
                ))
            }
        }
    }
}

/// Monotonic dispatch counter. A response is applied only while its token is
/// still the latest dispatched one; anything older is stale.
#[derive(Debug, Default)]
struct Generation(AtomicU64);

impl Generation {
    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

/// Fetch coordinator for the listing page. The dependency set can change
/// again while a fetch is in flight; rather than letting the last response to
/// arrive win, each fetch captures a generation token at dispatch and a stale
/// response is discarded silently (`None`).
pub struct ListingFetcher {
    api: SearchApi,
    generation: Generation,
}

impl ListingFetcher {
    pub fn new(api: SearchApi) -> Self {
        Self {
            api,
            generation: Generation::default(),
        }
    }

    pub async fn fetch(&self, query: &SearchQuery) -> Option<Result<PageResult, AppError>> {
        let token = self.generation.next();
        let result = self.api.search(query).await;
        if !self.generation.is_current(token) {
            debug!(token, "discarding stale search response");
            return None;
        }
        Some(result)
    }

    /// Like `fetch`, but already folded into the render state: errors fail
    /// closed into an empty view carrying the user message.
    pub async fn fetch_view(&self, query: &SearchQuery) -> Option<ListingView> {
        self.fetch(query).await.map(|result| match result {
            Ok(page) => ListingView::from_result(page),
            Err(error) => ListingView::failed(&error),
        })
    }
}
