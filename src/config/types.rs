use serde::Deserialize;

/// Poll settings read from `restpoll.toml` / `restpoll.json`.
///
/// Every field is optional; values given on the command line or through the
/// environment take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub interval: Option<SecondsValue>,
    pub timeout: Option<SecondsValue>,
    pub count: Option<u64>,
    pub headers: Option<Vec<String>>,
    pub insecure: Option<bool>,
    pub raw: Option<bool>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

/// A duration in seconds, written either as a number (`0.5`) or a string (`"0.5"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SecondsValue {
    Number(f64),
    Text(String),
}

impl SecondsValue {
    pub(crate) fn as_text(&self) -> String {
        match self {
            SecondsValue::Number(value) => value.to_string(),
            SecondsValue::Text(text) => text.clone(),
        }
    }
}
