//! This crate is meant to be used as the foundation for a casual crossword game.
//! It provides no UI itself, but see `crosstui` for an example of how you can use it
//! to produce a crossword app.
//!
//! A puzzle is described by a [PuzzleDefinition]: a title, the size of its square grid,
//! and a list of clues, each anchored at a grid position. [PuzzleEngine] builds a playable
//! grid from that description and then tracks selection, typed letters, hints and score.
//! A fixed set of levels ships with the crate in [catalog].

use Direction::{Across, Down};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::Not;

pub mod catalog;
mod definition;
mod engine;
mod grid;
pub mod scoring;

pub use definition::{ClueDefinition, ClueId, PuzzleDefinition};
pub use engine::{ActiveClue, Progress, PuzzleEngine, Selection};
pub use grid::{Cell, CellState, Grid, GridPosIter, Inconsistency, Square};

/// The two crossword directions: `Across` and `Down`
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Across,
  Down,
}

impl Direction {
  /// The position `offset` squares away from `start` in this direction, or `None` if
  /// that position can't be represented.
  pub fn step(self, (row, col): Pos, offset: usize) -> Option<Pos> {
    match self {
      Across => Some((row, col.checked_add(offset)?)),
      Down => Some((row.checked_add(offset)?, col)),
    }
  }
}

impl Not for Direction {
  type Output = Self;
  fn not(self) -> Self {
    match self {
      Across => Down,
      Down => Across,
    }
  }
}

impl Display for Direction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Across => write!(f, "Across"),
      Down => write!(f, "Down"),
    }
  }
}

/// A position in a grid: (row, column)
pub type Pos = (usize, usize);

/// The errors that may be produced by functions in this crate.
///
/// Playing a puzzle never fails; these only come from loading puzzles and from
/// [PuzzleEngine::strict].
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The puzzle was built with [PuzzleEngine::strict] and construction had to
  /// paper over one or more problems.
  #[error("puzzle has {} construction inconsistencies", .0.len())]
  Inconsistent(Vec<Inconsistency>),
  /// There is no catalog level with the given (1-based) number.
  #[error("there is no level {0} in the catalog")]
  UnknownLevel(usize),
  /// A puzzle file could not be decoded.
  #[error("failed to decode puzzle: {0}")]
  Decode(#[from] toml::de::Error),
  /// A puzzle could not be encoded.
  #[error("failed to encode puzzle: {0}")]
  Encode(#[from] toml::ser::Error),
  /// An [I/O error](std::io::Error) occurred.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
