use std::sync::Arc;

use reqwest::Url;
use tokio::task::JoinHandle;

use crate::apis::content;
use crate::utilities::display::{DisplayRegion, DisplayState};
use crate::utilities::variant::{Extracted, Variant};

pub const TRIGGER_ID: &str = "fetchBtn";
pub const RESULT_ID: &str = "result";

/// Fetches one piece of content per trigger and renders it into the result
/// region. Overlapping triggers are not sequenced, whichever request
/// resolves last decides what stays on screen.
pub struct FetchAndRenderWidget {
    http_client: reqwest::Client,
    endpoint: Url,
    variant: Variant,
    display: DisplayRegion,
}

impl FetchAndRenderWidget {
    pub const fn new(
        http_client: reqwest::Client,
        endpoint: Url,
        variant: Variant,
        display: DisplayRegion,
    ) -> Self {
        Self { http_client, endpoint, variant, display }
    }

    pub const fn display(&self) -> &DisplayRegion {
        &self.display
    }

    pub fn click(self: &Arc<Self>) -> JoinHandle<()> {
        let widget = self.clone();
        tokio::spawn(async move { widget.fetch_and_render().await })
    }

    pub async fn fetch_and_render(&self) {
        let color = self.variant.errors.color;
        self.display.show(DisplayState::Loading, color);

        log::debug!("fetching {} from {}", self.variant.name, self.endpoint);
        let state =
            match content::fetch(&self.http_client, self.endpoint.clone(), self.variant.request)
                .await
            {
                Ok(payload) => {
                    let Extracted { text, attribution } = self.variant.shape.extract(&payload);
                    DisplayState::Success { text, attribution }
                }
                Err(err) => {
                    log::warn!("fetching {} failed: {err}", self.variant.name);
                    DisplayState::Error(self.variant.errors.message(&err))
                }
            };

        self.display.show(state, color);
    }
}
