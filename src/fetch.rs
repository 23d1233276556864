//! Upstream fetch: extract the mission location array embedded in the
//! defence ministry missions page.
//!
//! The page assigns `window.globeLocations = [...]` inline; the array is
//! found by marker regex and delimited by bracket counting, since it nests
//! arrays and objects that a regex capture cannot balance.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Settings;

/// Default page carrying the globe location data.
pub const DEFAULT_MISSIONS_URL: &str = "https://www.mil.be/nl/onze-missies/";

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"window\.globeLocations\s*=\s*").unwrap());

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("globeLocations marker not found in page")]
    MarkerNotFound,

    #[error("globeLocations array is unterminated")]
    Unterminated,

    #[error("globeLocations payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build the HTTP client from settings (user agent, timeout).
pub fn build_client(settings: &Settings) -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(Duration::from_secs(settings.request_timeout))
        .build()?)
}

/// Slice the `window.globeLocations` array out of page text and parse it.
pub fn extract_embedded_array(page: &str) -> Result<Vec<Value>, FetchError> {
    let start = MARKER
        .find(page)
        .ok_or(FetchError::MarkerNotFound)?
        .end();

    // Scan forward balancing brackets. The payload contains no bracket
    // characters inside string literals, so plain depth counting suffices.
    let mut depth = 0usize;
    let mut entered = false;
    let mut end = None;

    for (i, ch) in page[start..].char_indices() {
        match ch {
            '[' => {
                depth += 1;
                entered = true;
            }
            ']' => {
                depth = depth.checked_sub(1).ok_or(FetchError::Unterminated)?;
                if depth == 0 && entered {
                    end = Some(start + i + 1);
                    break;
                }
            }
            _ => {}
        }
    }

    let end = end.ok_or(FetchError::Unterminated)?;
    debug!(bytes = end - start, "sliced globeLocations array");
    Ok(serde_json::from_str(&page[start..end])?)
}

/// Fetch the missions page and extract its location array.
pub async fn fetch_globe_locations(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<Value>, FetchError> {
    info!(url, "fetching globe locations");
    let page = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let locations = extract_embedded_array(&page)?;
    info!(count = locations.len(), "extracted globe locations");
    Ok(locations)
}
