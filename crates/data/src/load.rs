use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use yahtzee_autoplay::OpponentConfig;

/// Fields missing from the file keep their defaults.
pub fn load_opponent_config(path: &Path) -> anyhow::Result<OpponentConfig> {
    load_json(path)
}

pub(crate) fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
