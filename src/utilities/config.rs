use std::{env, fmt};

use reqwest::{Client, Url};

use super::variant::{JOKE, UnknownVariant, Variant};

const DEFAULT_LOG_FILE: &str = ".log";

pub struct Config {
    pub variant: Variant,
    pub user_agent: Option<String>,
    pub log_file: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Variant(UnknownVariant),
    Endpoint(url::ParseError),
    HttpClient(reqwest::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variant(err) => write!(f, "POPUP_VARIANT: {err}"),
            Self::Endpoint(err) => write!(f, "invalid endpoint: {err}"),
            Self::HttpClient(err) => write!(f, "cannot build HTTP client: {err}"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let variant = match lookup("POPUP_VARIANT") {
            Some(name) => name.parse().map_err(ConfigError::Variant)?,
            None => JOKE,
        };

        Ok(Self {
            variant,
            user_agent: lookup("USER_AGENT").filter(|user_agent| !user_agent.is_empty()),
            log_file: lookup("POPUP_LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.into()),
        })
    }

    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        Url::parse(self.variant.endpoint).map_err(ConfigError::Endpoint)
    }

    pub fn http_client(&self) -> Result<Client, ConfigError> {
        let mut http_client = Client::builder();

        if let Some(user_agent) = &self.user_agent {
            http_client = http_client.user_agent(user_agent);
        }

        http_client.build().map_err(ConfigError::HttpClient)
    }
}
