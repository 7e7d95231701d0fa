//! Immutable puzzle descriptions, as authored.

use crate::{Direction, Error, Pos};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Index of a clue within its [PuzzleDefinition]'s clue list.
pub type ClueId = usize;

/// One clue of a puzzle: its printed number and direction, the prompt shown to the
/// player, the answer, and the square where the answer starts.
///
/// Several clues may share a number or a start square, typically one Across and one Down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueDefinition {
  pub number: u32,
  pub direction: Direction,
  pub text: String,
  pub answer: String,
  pub row: usize,
  pub col: usize,
}

impl ClueDefinition {
  pub fn new(
    number: u32,
    direction: Direction,
    text: impl Into<String>,
    answer: impl Into<String>,
    (row, col): Pos,
  ) -> Self {
    Self {
      number,
      direction,
      text: text.into(),
      answer: answer.into(),
      row,
      col,
    }
  }

  /// The square holding the first letter of the answer.
  pub fn start(&self) -> Pos {
    (self.row, self.col)
  }

  /// Each letter of the answer, in order, together with the square it belongs in.
  /// The square is `None` if it can't even be represented as a position.
  pub fn path(&self) -> impl Iterator<Item = (Option<Pos>, char)> + '_ {
    self
      .answer
      .chars()
      .enumerate()
      .map(|(i, letter)| (self.direction.step(self.start(), i), letter))
  }

  /// A short label such as "12 Down".
  pub fn label(&self) -> String {
    format!("{} {}", self.number, self.direction)
  }
}

/// Everything needed to build a puzzle: a title, the side length of its square grid,
/// and its clues. Puzzles can be written by hand as TOML:
///
/// ```toml
/// title = "Pets"
/// size = 3
///
/// [[clues]]
/// number = 1
/// direction = "across"
/// text = "Feline pet"
/// answer = "CAT"
/// row = 0
/// col = 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
  pub title: String,
  pub size: usize,
  pub clues: Vec<ClueDefinition>,
}

impl PuzzleDefinition {
  pub fn new(title: impl Into<String>, size: usize, clues: Vec<ClueDefinition>) -> Self {
    Self {
      title: title.into(),
      size,
      clues,
    }
  }

  /// Decodes a puzzle from TOML text.
  pub fn from_toml(text: &str) -> Result<Self, Error> {
    Ok(toml::from_str(text)?)
  }

  /// Reads and decodes a TOML puzzle file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
    let text = std::fs::read_to_string(path)?;
    Self::from_toml(&text)
  }

  pub fn to_toml(&self) -> Result<String, Error> {
    Ok(toml::to_string_pretty(self)?)
  }

  /// The clues in the given direction, sorted by number. Clues with equal numbers
  /// keep their authored order.
  pub fn clues_in(&self, direction: Direction) -> Vec<&ClueDefinition> {
    let mut clues: Vec<_> = self
      .clues
      .iter()
      .filter(|clue| clue.direction == direction)
      .collect();
    clues.sort_by_key(|clue| clue.number);
    clues
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Direction::{Across, Down};

  #[test]
  fn path_walks_the_answer() {
    let across = ClueDefinition::new(1, Across, "Feline pet", "CAT", (1, 2));
    assert_eq!(
      across.path().collect::<Vec<_>>(),
      vec![(Some((1, 2)), 'C'), (Some((1, 3)), 'A'), (Some((1, 4)), 'T')]
    );

    let down = ClueDefinition::new(1, Down, "Bovine", "COW", (0, 0));
    assert_eq!(
      down.path().map(|(pos, _)| pos).collect::<Vec<_>>(),
      vec![Some((0, 0)), Some((1, 0)), Some((2, 0))]
    );
    assert_eq!(down.label(), "1 Down");
  }

  #[test]
  fn clues_in_sorts_by_number() {
    let puzzle = PuzzleDefinition::new(
      "Sorting",
      5,
      vec![
        ClueDefinition::new(4, Across, "d", "DD", (3, 0)),
        ClueDefinition::new(1, Down, "a", "AA", (0, 0)),
        ClueDefinition::new(1, Across, "b", "BB", (0, 0)),
        ClueDefinition::new(2, Across, "c", "CC", (1, 0)),
      ],
    );

    let numbers = |clues: Vec<&ClueDefinition>| clues.iter().map(|c| c.number).collect::<Vec<_>>();
    assert_eq!(numbers(puzzle.clues_in(Across)), vec![1, 2, 4]);
    assert_eq!(numbers(puzzle.clues_in(Down)), vec![1]);
  }

  #[test]
  fn parse_toml() {
    let puzzle = PuzzleDefinition::from_toml(
      r#"
        title = "Pets"
        size = 3

        [[clues]]
        number = 1
        direction = "across"
        text = "Feline pet"
        answer = "CAT"
        row = 0
        col = 0

        [[clues]]
        number = 1
        direction = "down"
        text = "Bovine"
        answer = "COW"
        row = 0
        col = 0
      "#,
    )
    .unwrap();

    assert_eq!(puzzle.title, "Pets");
    assert_eq!(puzzle.size, 3);
    assert_eq!(
      puzzle.clues[1],
      ClueDefinition::new(1, Down, "Bovine", "COW", (0, 0))
    );
    assert_eq!(PuzzleDefinition::from_toml(&puzzle.to_toml().unwrap()).unwrap(), puzzle);
  }

  #[test]
  fn reject_unknown_direction() {
    let result = PuzzleDefinition::from_toml(
      r#"
        title = "Bad"
        size = 3
        [[clues]]
        number = 1
        direction = "sideways"
        text = "?"
        answer = "CAT"
        row = 0
        col = 0
      "#,
    );
    assert!(matches!(result, Err(Error::Decode(_))));
  }
}
