//! Placeholder substitution.
//!
//! Two token styles are supported:
//! - `{$$name}` in command strings, resolved against a [`RenderContext`]
//! - `$$name` in changelog and release-note documents, filled by [`fill_document`]
//!
//! Substituted values are never scanned for other names, so a value that
//! happens to contain another `{$$name}` token is inserted verbatim. The one
//! exception is the random marker, which is expanded wherever it ends up.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use rand::Rng;
use regex::{Captures, Regex};
use tracing::trace;

use crate::config::RunnerConfig;
use crate::error::{Result, TapprError};

const TOKEN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn context_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\$\$([^{}]+)\}").expect("context token regex is valid"))
}

fn env_indirection_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\{\$\$?([A-Za-z_][A-Za-z0-9_]*)\}$").expect("env indirection regex is valid")
    })
}

/// Generate a lowercase alphanumeric string of `len` characters
pub fn random_token<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// Key/value store used to resolve `{$$name}` tokens.
///
/// The random marker is not stored: every occurrence of `{$$<marker>}`
/// resolves to a fresh value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
    random_marker: String,
    random_length: usize,
}

impl RenderContext {
    pub fn new(random_marker: impl Into<String>, random_length: usize) -> Self {
        RenderContext {
            values: BTreeMap::new(),
            random_marker: random_marker.into(),
            random_length,
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(config.random_token.clone(), config.random_length)
    }

    /// Build a context from caller supplied pairs
    pub fn with_values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in values {
            self.insert(k, v);
        }
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Replace values of the form `{$NAME}` / `{$$NAME}` with environment variables.
    pub fn resolve_env(&mut self) -> Result<()> {
        self.resolve_env_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve_env`](Self::resolve_env) with an injectable lookup.
    pub fn resolve_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (key, value) in self.values.iter_mut() {
            let Some(caps) = env_indirection_regex().captures(value) else {
                continue;
            };
            let name = caps[1].to_string();
            let resolved = lookup(&name).ok_or_else(|| TapprError::missing_env(&name))?;
            trace!(key = %key, env = %name, "resolved context value from environment");
            *value = resolved;
        }
        Ok(())
    }

    /// Resolve every `{$$name}` token in `text` using the thread-local RNG.
    pub fn resolve(&self, text: &str) -> String {
        self.resolve_with(text, &mut rand::thread_rng())
    }

    /// Resolve known names, then expand every random marker, including one
    /// brought in by a value. Unknown names are left untouched.
    pub fn resolve_with<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let named = context_token_regex().replace_all(text, |caps: &Captures| {
            match self.values.get(&caps[1]) {
                Some(value) if caps[1] != self.random_marker => value.clone(),
                _ => caps[0].to_string(),
            }
        });

        let marker = format!("{{$${}}}", self.random_marker);
        let mut pieces = named.split(marker.as_str());
        let mut resolved = pieces.next().unwrap_or_default().to_string();
        for piece in pieces {
            resolved.push_str(&random_token(rng, self.random_length));
            resolved.push_str(piece);
        }
        resolved
    }
}

/// Replace `$$name` tokens in a document template in a single pass.
///
/// Longer names are matched first so `$$docs_list` is not mistaken for `$$docs`.
pub fn fill_document(template: &str, values: &[(&str, &str)]) -> String {
    if values.is_empty() {
        return template.to_string();
    }

    let mut names: Vec<&str> = values.iter().map(|(name, _)| *name).collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = names
        .iter()
        .map(|name| regex::escape(&format!("$${}", name)))
        .collect::<Vec<_>>()
        .join("|");

    let re = match Regex::new(&alternation) {
        Ok(re) => re,
        Err(_) => return template.to_string(),
    };

    re.replace_all(template, |caps: &Captures| {
        let token = &caps[0][2..];
        values
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, value)| value.to_string())
            .unwrap_or_default()
    })
    .into_owned()
}

/// Names from `names` whose `$$name` token does not appear in `template`
pub fn missing_placeholders<'a>(template: &str, names: &[&'a str]) -> Vec<&'a str> {
    names
        .iter()
        .filter(|name| !template.contains(&format!("$${}", name)))
        .copied()
        .collect()
}
