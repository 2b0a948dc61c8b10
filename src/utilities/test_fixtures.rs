use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use reqwest::Url;
use tokio::net::TcpListener;

#[derive(Clone, Copy)]
pub struct StubResponse {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
}

impl StubResponse {
    pub const fn new(status: StatusCode, body: &'static str) -> Self {
        Self { status, body, delay: Duration::ZERO }
    }

    pub const fn ok(body: &'static str) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub struct StubServer {
    pub url: Url,
    requests: Arc<Mutex<Vec<HeaderMap>>>,
}

impl StubServer {
    pub fn requests(&self) -> Vec<HeaderMap> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serves `responses` in order on `/`, repeating the last one once they run
/// out, and records the headers of every request.
pub async fn serve(responses: Vec<StubResponse>) -> StubServer {
    assert!(!responses.is_empty());

    let requests = Arc::new(Mutex::new(Vec::new()));
    let counter = Arc::new(AtomicUsize::new(0));
    let responses = Arc::new(responses);

    let app = Router::new().route(
        "/",
        get({
            let requests = requests.clone();
            move |headers: HeaderMap| async move {
                requests.lock().unwrap().push(headers);
                let index = counter.fetch_add(1, Ordering::SeqCst).min(responses.len() - 1);
                let response = responses[index];
                tokio::time::sleep(response.delay).await;
                (response.status, response.body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    StubServer { url: Url::parse(&format!("http://{address}/")).unwrap(), requests }
}

/// An endpoint nothing listens on.
pub async fn closed_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    Url::parse(&format!("http://{address}/")).unwrap()
}
