use crate::{load_json, ResultFile, StoredResult, RESULTS_SCHEMA_VERSION};
use anyhow::{bail, Context};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use yahtzee_core::{MatchResult, MatchStats, ResultSink};

pub fn default_results_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("YAHTZEE_RESULTS") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".yahtzee_results.json"))
}

/// Finished matches kept in a single JSON file. A missing file is an empty
/// store; the file is created on the first insert.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stores `result` and returns its id.
    pub fn insert(&mut self, result: &MatchResult) -> anyhow::Result<u64> {
        let mut file = self.read()?;
        let id = file.next_id;
        file.next_id += 1;
        file.results.push(StoredResult {
            id,
            result: result.clone(),
        });
        self.write(&file)?;
        info!(id, path = %self.path.display(), outcome = %result.outcome, "result stored");
        Ok(id)
    }

    /// Every stored result, newest first.
    pub fn load_all(&self) -> anyhow::Result<Vec<StoredResult>> {
        let mut results = self.read()?.results;
        results.sort_by(|a, b| {
            b.result
                .timestamp
                .cmp(&a.result.timestamp)
                .then(b.id.cmp(&a.id))
        });
        Ok(results)
    }

    pub fn stats(&self) -> anyhow::Result<Option<MatchStats>> {
        let results: Vec<MatchResult> = self
            .load_all()?
            .into_iter()
            .map(|stored| stored.result)
            .collect();
        Ok(MatchStats::from_results(&results))
    }

    /// Drops every record and returns how many there were. Ids keep counting.
    pub fn clear(&mut self) -> anyhow::Result<usize> {
        let mut file = self.read()?;
        let removed = file.results.len();
        file.results.clear();
        self.write(&file)?;
        info!(removed, path = %self.path.display(), "results cleared");
        Ok(removed)
    }

    fn read(&self) -> anyhow::Result<ResultFile> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no result file yet");
            return Ok(ResultFile::default());
        }
        let file: ResultFile = load_json(&self.path)?;
        if file.version != RESULTS_SCHEMA_VERSION {
            bail!(
                "unsupported results version {} (expected {})",
                file.version,
                RESULTS_SCHEMA_VERSION
            );
        }
        Ok(file)
    }

    fn write(&self, file: &ResultFile) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, body).with_context(|| format!("write {}", self.path.display()))
    }
}

impl ResultSink for ResultStore {
    type Error = anyhow::Error;

    fn save_result(&mut self, result: &MatchResult) -> Result<(), Self::Error> {
        self.insert(result).map(|_| ())
    }
}
