use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::Url;
use serde_json::Value;

use crate::utilities::api_utils::{DetectStatusError, FetchError};
use crate::utilities::variant::RequestOptions;

pub async fn fetch(
    http_client: &reqwest::Client,
    endpoint: Url,
    options: RequestOptions,
) -> Result<Value, FetchError> {
    let mut request = http_client.get(endpoint);

    if options.accept_json {
        request = request.header(ACCEPT, "application/json");
    }

    if options.no_store {
        request = request.header(CACHE_CONTROL, "no-store").header(PRAGMA, "no-cache");
    }

    let body = request.send().await?.status_error()?.bytes().await?;

    Ok(serde_json::from_slice(&body)?)
}
