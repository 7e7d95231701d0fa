//! The player's best score and furthest unlocked level, kept in a small TOML file
//! between runs.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
  #[error("could not access records file: {0}")]
  Io(#[from] io::Error),
  #[error("records file is malformed: {0}")]
  Decode(#[from] toml::de::Error),
  #[error("could not encode records: {0}")]
  Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
  pub best_score: i64,
  /// The highest level the player may start, 1-based.
  pub highest_level: usize,
}

impl Default for Records {
  fn default() -> Self {
    Self {
      best_score: 0,
      highest_level: 1,
    }
  }
}

impl Records {
  /// Notes that `level` was solved with `score`. Returns whether that was a new best score.
  pub fn record_win(&mut self, level: usize, score: i64) -> bool {
    self.highest_level = self.highest_level.max(level + 1);
    if score > self.best_score {
      self.best_score = score;
      true
    } else {
      false
    }
  }

  /// The level to continue from: the highest unlocked one, within the catalog.
  pub fn continue_level(&self) -> usize {
    self.highest_level.clamp(1, crossword::catalog::len())
  }
}

/// [Records] together with the file they live in.
#[derive(Debug)]
pub struct RecordsFile {
  path: PathBuf,
  records: Records,
}

impl RecordsFile {
  /// Reads the records at `path`. A missing file means nothing has been recorded yet.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, RecordsError> {
    let path = path.into();
    let records = match std::fs::read_to_string(&path) {
      Ok(text) => toml::from_str(&text)?,
      Err(e) if e.kind() == io::ErrorKind::NotFound => Records::default(),
      Err(e) => return Err(e.into()),
    };
    Ok(Self { path, records })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn records(&self) -> &Records {
    &self.records
  }

  /// Forgets everything and writes the empty records out.
  pub fn reset(&mut self) -> Result<(), RecordsError> {
    self.records = Records::default();
    self.save()
  }

  /// Records a win and writes the records out. Returns whether that was a new best score.
  pub fn record_win(&mut self, level: usize, score: i64) -> Result<bool, RecordsError> {
    let best = self.records.record_win(level, score);
    self.save()?;
    Ok(best)
  }

  fn save(&self) -> Result<(), RecordsError> {
    let text = toml::to_string(&self.records)?;
    std::fs::write(&self.path, text)?;
    log::debug!("saved {:?} to {}", self.records, self.path.display());
    Ok(())
  }
}
