//! Placeholder substitution
//!
//! Policy templates reference organization data as `{{ key }}` tokens.
//! [`substitute`] fills the tokens it has values for and leaves the rest in
//! place; the classifier strips whatever survives.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("token regex is valid"));

/// Substitution values keyed by lowercase token name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    /// Create an empty variable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value; keys are case-insensitive
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(key.as_ref().trim().to_lowercase(), value.into());
    }

    /// Builder-style [`Variables::set`]
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.trim().to_lowercase()).map(String::as_str)
    }

    /// Parse a flat TOML table of string values
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        let raw: BTreeMap<String, String> = toml::from_str(toml_str)?;
        Ok(raw.into_iter().fold(Self::new(), |vars, (k, v)| vars.with(k, v)))
    }

    /// Parse a `key=value` pair as given on the command line
    pub fn parse_pair(pair: &str) -> Option<(String, String)> {
        let (key, value) = pair.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), value.to_string()))
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Replace known `{{ key }}` tokens with their values
pub fn substitute(text: &str, vars: &Variables) -> String {
    if vars.is_empty() {
        return text.to_string();
    }
    TOKEN_RE
        .replace_all(text, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
