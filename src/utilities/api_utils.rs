use std::fmt;

use reqwest::{Response, StatusCode};

#[derive(Debug)]
pub enum FetchError {
    Network(reqwest::Error),
    HttpStatus(StatusCode),
    Parse(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(err) => write!(f, "{err}"),
            Self::HttpStatus(status) => write!(f, "HTTP {}", status.as_u16()),
            Self::Parse(err) => write!(f, "invalid JSON: {err}"),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        Self::Network(value)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

pub trait DetectStatusError {
    fn status_error(self) -> Result<Response, FetchError>;
}

impl DetectStatusError for Response {
    fn status_error(self) -> Result<Response, FetchError> {
        if !self.status().is_success() {
            return Err(FetchError::HttpStatus(self.status()));
        }

        Ok(self)
    }
}
