use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::api_utils::FetchError;

/// A named bundle of everything that differs between the joke and quote
/// popups: where to fetch from, how to ask, how to read the answer, and how
/// to word a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Variant {
    pub name: &'static str,
    pub endpoint: &'static str,
    pub request: RequestOptions,
    pub shape: ResponseShape,
    pub errors: ErrorPolicy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestOptions {
    pub accept_json: bool,
    pub no_store: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponseShape {
    /// Tried in order, the first one that is `present` wins.
    pub text_fields: &'static [&'static str],
    pub present: Presence,
    /// Always held to [`Presence::Truthy`].
    pub attribution_field: Option<&'static str>,
}

/// When a field counts as there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    /// Any value but `null`, including `""`, `0` and `false`.
    NotNull,
    /// Non-empty strings, non-zero numbers, `true`, arrays and objects.
    Truthy,
}

impl Presence {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::NotNull => !value.is_null(),
            Self::Truthy => match value {
                Value::Null => false,
                Value::Bool(value) => *value,
                Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.),
                Value::String(value) => !value.is_empty(),
                Value::Array(_) | Value::Object(_) => true,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorPolicy {
    pub fallback: Option<&'static str>,
    pub color: &'static str,
}

pub const JOKE: Variant = Variant {
    name: "joke",
    endpoint: match option_env!("JOKE_API_URL") {
        Some(url) => url,
        None => "https://icanhazdadjoke.com/",
    },
    request: RequestOptions { accept_json: true, no_store: false },
    shape: ResponseShape {
        text_fields: &["joke"],
        present: Presence::NotNull,
        attribution_field: None,
    },
    errors: ErrorPolicy { fallback: Some("Oops! Couldn't load a joke."), color: "red" },
};

pub const QUOTE: Variant = Variant {
    name: "quote",
    endpoint: match option_env!("QUOTE_API_URL") {
        Some(url) => url,
        None => "http://localhost:3000/quotes/random",
    },
    request: RequestOptions { accept_json: false, no_store: true },
    shape: ResponseShape {
        text_fields: &["content", "text"],
        present: Presence::Truthy,
        attribution_field: Some("author"),
    },
    errors: ErrorPolicy { fallback: None, color: "#d32f2f" },
};

pub const VARIANTS: [Variant; 2] = [JOKE, QUOTE];

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = VARIANTS.map(|variant| variant.name).join(", ");
        write!(f, "unknown variant {:?}, expected one of: {names}", self.0)
    }
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VARIANTS
            .into_iter()
            .find(|variant| variant.name.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant(s.into()))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub attribution: Option<String>,
}

impl ResponseShape {
    pub fn extract(&self, payload: &Value) -> Extracted {
        let text = self
            .text_fields
            .iter()
            .find_map(|field| field_text(payload, field, self.present))
            .unwrap_or_else(|| payload.to_string());
        let attribution = self
            .attribution_field
            .and_then(|field| field_text(payload, field, Presence::Truthy));

        Extracted { text, attribution }
    }
}

fn field_text(payload: &Value, field: &str, present: Presence) -> Option<String> {
    let value = payload.get(field).filter(|value| present.accepts(value))?;

    Some(value.as_str().map_or_else(|| value.to_string(), Into::into))
}

impl ErrorPolicy {
    pub fn message(&self, error: &FetchError) -> String {
        match (self.fallback, error) {
            (Some(fallback), FetchError::HttpStatus(status)) => {
                format!("{fallback} (HTTP {})", status.as_u16())
            }
            (Some(fallback), _) => fallback.into(),
            (None, error) => format!("Error: {error}"),
        }
    }
}
