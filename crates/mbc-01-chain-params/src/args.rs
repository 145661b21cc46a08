//! # Runtime Overrides
//!
//! Chain construction reads a handful of operator arguments through the
//! [`ArgsSource`] trait:
//!
//! | Key | Network | Effect |
//! |-----|---------|--------|
//! | `signetchallenge` | signet | Custom challenge script (hex), derives magic |
//! | `signetseednode` | signet | Replaces the seed list |
//! | `vbparams` | regtest | `deployment:start:end[:min_activation_height]` |
//! | `fastprune` | regtest | Prune after 100 blocks |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Signet challenge script key.
pub const ARG_SIGNET_CHALLENGE: &str = "signetchallenge";
/// Signet seed node key.
pub const ARG_SIGNET_SEED_NODE: &str = "signetseednode";
/// Version-bits override key.
pub const ARG_VBPARAMS: &str = "vbparams";
/// Fast-prune flag key.
pub const ARG_FASTPRUNE: &str = "fastprune";

/// Typed lookup over operator arguments.
pub trait ArgsSource {
    /// Whether `key` was given at all.
    fn is_arg_set(&self, key: &str) -> bool;

    /// Every value given for `key`, in order.
    fn get_args(&self, key: &str) -> Vec<String>;

    /// Last value of `key` as a boolean, or `default` when unset.
    fn get_bool_arg(&self, key: &str, default: bool) -> bool;
}

fn normalize(key: &str) -> &str {
    key.trim_start_matches('-')
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// In-memory multi-valued argument map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgsMap {
    values: HashMap<String, Vec<String>>,
}

impl ArgsMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value for `key`.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.values
            .entry(normalize(key).to_string())
            .or_default()
            .push(value.into());
        self
    }

    /// Builder form of [`ArgsMap::insert`].
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Parses `-key=value`, `-key` and `-nokey` tokens. Tokens without a
    /// leading dash are ignored.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for token in tokens {
            let token = token.as_ref();
            if !token.starts_with('-') {
                continue;
            }
            let body = normalize(token);
            match body.split_once('=') {
                Some((key, value)) => {
                    map.insert(key, value);
                }
                None => match body.strip_prefix("no") {
                    Some(negated) if !negated.is_empty() => {
                        map.insert(negated, "0");
                    }
                    _ => {
                        map.insert(body, "1");
                    }
                },
            }
        }
        map
    }
}

impl ArgsSource for ArgsMap {
    fn is_arg_set(&self, key: &str) -> bool {
        self.values.contains_key(normalize(key))
    }

    fn get_args(&self, key: &str) -> Vec<String> {
        self.values.get(normalize(key)).cloned().unwrap_or_default()
    }

    fn get_bool_arg(&self, key: &str, default: bool) -> bool {
        self.values
            .get(normalize(key))
            .and_then(|v| v.last())
            .and_then(|v| parse_bool(v))
            .unwrap_or(default)
    }
}

/// Typed view of the overrides, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainOptions {
    /// `-signetchallenge` values
    pub signet_challenge: Vec<String>,
    /// `-signetseednode` values
    pub signet_seed_nodes: Vec<String>,
    /// `-vbparams` values
    pub vbparams: Vec<String>,
    /// `-fastprune`
    pub fastprune: bool,
}

impl ChainOptions {
    /// Reads the four recognised keys from `args`.
    pub fn from_args(args: &dyn ArgsSource) -> Self {
        Self {
            signet_challenge: args.get_args(ARG_SIGNET_CHALLENGE),
            signet_seed_nodes: args.get_args(ARG_SIGNET_SEED_NODE),
            vbparams: args.get_args(ARG_VBPARAMS),
            fastprune: args.get_bool_arg(ARG_FASTPRUNE, false),
        }
    }

    /// Parses options from a JSON object. Missing fields take defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl ArgsSource for ChainOptions {
    fn is_arg_set(&self, key: &str) -> bool {
        match normalize(key) {
            ARG_SIGNET_CHALLENGE => !self.signet_challenge.is_empty(),
            ARG_SIGNET_SEED_NODE => !self.signet_seed_nodes.is_empty(),
            ARG_VBPARAMS => !self.vbparams.is_empty(),
            ARG_FASTPRUNE => self.fastprune,
            _ => false,
        }
    }

    fn get_args(&self, key: &str) -> Vec<String> {
        match normalize(key) {
            ARG_SIGNET_CHALLENGE => self.signet_challenge.clone(),
            ARG_SIGNET_SEED_NODE => self.signet_seed_nodes.clone(),
            ARG_VBPARAMS => self.vbparams.clone(),
            ARG_FASTPRUNE if self.fastprune => vec!["1".to_string()],
            _ => Vec::new(),
        }
    }

    fn get_bool_arg(&self, key: &str, default: bool) -> bool {
        match normalize(key) {
            ARG_FASTPRUNE => self.fastprune,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let args = ArgsMap::from_tokens([
            "-vbparams=taproot:1:2",
            "--vbparams=testdummy:3:4",
            "-fastprune",
            "-nolisten",
            "regtest",
        ]);
        assert_eq!(args.get_args("vbparams"), vec!["taproot:1:2", "testdummy:3:4"]);
        assert!(args.get_bool_arg("-fastprune", false));
        assert!(!args.get_bool_arg("listen", true));
        assert!(!args.is_arg_set("regtest"));
        assert!(args.get_args("signetchallenge").is_empty());
    }

    #[test]
    fn test_bool_parsing() {
        let args = ArgsMap::new()
            .with("a", "yes")
            .with("b", "0")
            .with("c", "maybe");
        assert!(args.get_bool_arg("a", false));
        assert!(!args.get_bool_arg("b", true));
        assert!(args.get_bool_arg("c", true));
        assert!(!args.get_bool_arg("missing", false));
    }

    #[test]
    fn test_options_from_args_and_json() {
        let args = ArgsMap::new()
            .with("-signetchallenge", "51")
            .with("signetseednode", "127.0.0.1:38333")
            .with("fastprune", "1");
        let options = ChainOptions::from_args(&args);
        assert_eq!(options.signet_challenge, vec!["51"]);
        assert_eq!(options.signet_seed_nodes, vec!["127.0.0.1:38333"]);
        assert!(options.fastprune);

        let parsed: ChainOptions =
            ChainOptions::from_json(r#"{"vbparams": ["taproot:1:2"], "fastprune": true}"#).unwrap();
        assert_eq!(parsed.get_args("-vbparams"), vec!["taproot:1:2"]);
        assert!(parsed.is_arg_set("fastprune"));
        assert!(!parsed.is_arg_set("signetchallenge"));
    }
}
