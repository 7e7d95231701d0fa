use crate::Direction::{Across, Down};
use crate::scoring::HINT_PENALTY;
use crate::{ClueDefinition, ClueId, Direction, Error, Grid, Inconsistency, Pos, PuzzleDefinition};

/// Where the cursor is. The selected square is always one of the squares of the
/// selected clue, so there is no way to have one without the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
  /// Nothing is selected yet.
  #[default]
  None,
  /// The cursor is on the `index`th square of `clue`.
  Selected { clue: ClueId, index: usize },
}

/// The clue currently driving the word highlight and cursor movement, together with the
/// squares it covers in answer order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveClue {
  pub id: ClueId,
  pub clue: ClueDefinition,
  pub cells: Vec<Pos>,
}

impl ActiveClue {
  pub fn direction(&self) -> Direction {
    self.clue.direction
  }
}

/// How much of the grid has been filled in, whether correctly or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
  pub filled: usize,
  pub total: usize,
}

impl Progress {
  /// Percentage of open squares that hold a letter, rounded down. 0 for an empty grid.
  pub fn percent(&self) -> usize {
    if self.total == 0 {
      0
    } else {
      self.filled * 100 / self.total
    }
  }
}

impl From<Progress> for (usize, usize) {
  fn from(progress: Progress) -> Self {
    (progress.filled, progress.total)
  }
}

/// Represents a puzzle being played: the grid built from a [PuzzleDefinition], the
/// cursor, the score, and the number of hints used. When implementing a crossword app,
/// this will be the main structure you will use.
///
/// None of the operations fail. Selecting a square that can't be selected, or typing
/// with nothing selected, simply has no effect.
#[derive(Debug)]
pub struct PuzzleEngine {
  definition: PuzzleDefinition,
  grid: Grid,
  selection: Selection,
  score: i64,
  hints_used: u32,
}

impl PuzzleEngine {
  /// Builds a playable puzzle. Problems in the definition are tolerated; see
  /// [with_report](Self::with_report) to find out what they were.
  pub fn new(definition: PuzzleDefinition) -> Self {
    Self::with_report(definition).0
  }

  /// Builds a playable puzzle, and also returns everything about the definition that
  /// had to be tolerated along the way.
  pub fn with_report(definition: PuzzleDefinition) -> (Self, Vec<Inconsistency>) {
    let (grid, inconsistencies) = Grid::build(&definition);

    let (_, open) = grid.fill_counts();
    log::debug!(
      "built '{}': {}x{} grid, {} clues, {} open squares",
      definition.title,
      definition.size,
      definition.size,
      definition.clues.len(),
      open
    );
    for inconsistency in &inconsistencies {
      log::warn!("'{}': {}", definition.title, inconsistency);
    }

    let engine = Self {
      definition,
      grid,
      selection: Selection::None,
      score: 0,
      hints_used: 0,
    };
    (engine, inconsistencies)
  }

  /// Builds a playable puzzle, refusing definitions with overflowing answers or
  /// crossings that disagree.
  pub fn strict(definition: PuzzleDefinition) -> Result<Self, Error> {
    let (engine, inconsistencies) = Self::with_report(definition);
    if inconsistencies.is_empty() {
      Ok(engine)
    } else {
      Err(Error::Inconsistent(inconsistencies))
    }
  }

  pub fn title(&self) -> &str {
    &self.definition.title
  }

  /// The side length of the grid.
  pub fn size(&self) -> usize {
    self.grid.size()
  }

  pub fn definition(&self) -> &PuzzleDefinition {
    &self.definition
  }

  /// Returns a reference to the current puzzle grid.
  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  pub fn clue(&self, id: ClueId) -> Option<&ClueDefinition> {
    self.definition.clues.get(id)
  }

  pub fn score(&self) -> i64 {
    self.score
  }

  pub fn hints_used(&self) -> u32 {
    self.hints_used
  }

  pub fn selection(&self) -> Selection {
    self.selection
  }

  /// The position of the cursor, if anything is selected.
  pub fn selected_pos(&self) -> Option<Pos> {
    let index = self.selected_index()?;
    Some(self.grid.cell_at(index).pos())
  }

  fn selected_index(&self) -> Option<usize> {
    match self.selection {
      Selection::None => None,
      Selection::Selected { clue, index } => Some(self.grid.word(clue)[index]),
    }
  }

  /// The clue the cursor is in, if anything is selected.
  pub fn active_clue(&self) -> Option<ActiveClue> {
    let Selection::Selected { clue, .. } = self.selection else {
      return None;
    };
    Some(ActiveClue {
      id: clue,
      clue: self.definition.clues[clue].clone(),
      cells: self.grid.word_positions(clue),
    })
  }

  /// The first open square, reading left to right and top to bottom.
  pub fn first_open_cell(&self) -> Option<Pos> {
    self.grid.positions().find(|&pos| self.grid.is_open(pos))
  }

  /// Moves the cursor to `pos` and makes one of the clues covering it active.
  ///
  /// A square covered by only one clue selects that clue. Otherwise Across is preferred,
  /// except when `pos` is already selected: then the direction flips, so selecting the
  /// same square repeatedly alternates between its Across and Down clues.
  ///
  /// Returns `None`, changing nothing, if `pos` is outside the grid or blocked.
  pub fn select_cell(&mut self, pos: Pos) -> Option<ActiveClue> {
    let target = self.grid.index_of(pos)?;
    if self.grid.cell_at(target).is_blocked() {
      return None;
    }

    let covering: Vec<ClueId> = self.grid.clues_at(target).collect();
    let first = *covering.first()?;
    let prefer = |direction: Direction| {
      covering
        .iter()
        .copied()
        .find(|&id| self.definition.clues[id].direction == direction)
        .unwrap_or(first)
    };

    let repeated = self.selected_index() == Some(target);
    let clue = match self.active_direction() {
      _ if covering.len() == 1 => first,
      Some(direction) if repeated => prefer(!direction),
      _ => prefer(Across),
    };
    let index = self.grid.word(clue).iter().position(|&i| i == target)?;

    self.grid.clear_marks();
    self.grid.highlight(clue);
    self.grid.state_at_mut(target).selected = true;
    self.selection = Selection::Selected { clue, index };

    log::trace!(
      "selected {:?} in {}",
      pos,
      self.definition.clues[clue].label()
    );
    self.active_clue()
  }

  fn active_direction(&self) -> Option<Direction> {
    match self.selection {
      Selection::None => None,
      Selection::Selected { clue, .. } => Some(self.definition.clues[clue].direction),
    }
  }

  /// Writes `letter`, uppercased, into the selected square and moves the cursor to the
  /// next square of the active clue (staying put on its last square).
  ///
  /// Returns whether every square of the clue the letter went into now holds its
  /// solution letter. Does nothing and returns false if nothing is selected.
  pub fn enter_letter(&mut self, letter: char) -> bool {
    let Selection::Selected { clue, .. } = self.selection else {
      return false;
    };
    let Some(target) = self.selected_index() else {
      return false;
    };

    self.grid.state_at_mut(target).letter = normalize(letter);
    log::trace!("entered {:?} at {:?}", letter, self.grid.cell_at(target).pos());
    self.advance();
    self.grid.is_word_solved(clue)
  }

  /// Erases the letter in the selected square. If that square is already empty, moves
  /// the cursor back one square in the active clue instead.
  ///
  /// Always returns false.
  pub fn delete_letter(&mut self) -> bool {
    let Some(target) = self.selected_index() else {
      return false;
    };

    let state = self.grid.state_at_mut(target);
    if state.letter.is_some() {
      state.letter = None;
    } else {
      self.retreat();
    }
    false
  }

  /// Fills the selected square with its solution letter, at a cost of
  /// [HINT_PENALTY] points (the score doesn't drop below 0), and moves the cursor on
  /// as [enter_letter](Self::enter_letter) does.
  pub fn reveal_current_cell(&mut self) {
    let Some(target) = self.selected_index() else {
      return;
    };

    let solution = self.grid.cell_at(target).solution();
    let state = self.grid.state_at_mut(target);
    state.letter = solution;
    state.revealed = true;
    self.hints_used += 1;
    self.score = self.score.saturating_sub(HINT_PENALTY).max(0);
    log::trace!(
      "revealed {:?}, {} hints used",
      self.grid.cell_at(target).pos(),
      self.hints_used
    );
    self.advance();
  }

  /// Whether every open square holds its solution letter.
  pub fn is_solved(&self) -> bool {
    self.grid.is_solved()
  }

  pub fn progress(&self) -> Progress {
    let (filled, total) = self.grid.fill_counts();
    Progress { filled, total }
  }

  /// Adds `points` to the score. Unlike hint penalties, this doesn't stop at 0, only at
  /// the limits of `i64`.
  pub fn add_score(&mut self, points: i64) {
    self.score = self.score.saturating_add(points);
  }

  /// The Across clues, sorted by number.
  pub fn across_clues(&self) -> Vec<&ClueDefinition> {
    self.definition.clues_in(Across)
  }

  /// The Down clues, sorted by number.
  pub fn down_clues(&self) -> Vec<&ClueDefinition> {
    self.definition.clues_in(Down)
  }

  /// Starts the puzzle over: clears every letter, the cursor, the score and the hint count.
  pub fn restart(&mut self) {
    self.grid.reset_states();
    self.selection = Selection::None;
    self.score = 0;
    self.hints_used = 0;
    log::debug!("restarted '{}'", self.definition.title);
  }

  /// Moves the cursor one square forward in the active clue, if it's not on the last one.
  fn advance(&mut self) {
    if let Selection::Selected { clue, index } = self.selection {
      if index + 1 < self.grid.word(clue).len() {
        self.move_cursor(clue, index + 1);
      }
    }
  }

  /// Moves the cursor one square back in the active clue, if it's not on the first one.
  fn retreat(&mut self) {
    if let Selection::Selected { clue, index } = self.selection {
      if index > 0 {
        self.move_cursor(clue, index - 1);
      }
    }
  }

  /// Moves the cursor within `clue`. The word highlight stays as it is.
  fn move_cursor(&mut self, clue: ClueId, index: usize) {
    self.selection = Selection::Selected { clue, index };
    self.grid.clear_selection();
    let square = self.grid.word(clue)[index];
    self.grid.state_at_mut(square).selected = true;
  }
}

/// Uppercases a typed letter. Whitespace erases.
fn normalize(letter: char) -> Option<char> {
  if letter.is_whitespace() {
    return None;
  }
  let mut upper = letter.to_uppercase();
  match (upper.next(), upper.next()) {
    (Some(single), None) => Some(single),
    _ => Some(letter),
  }
}
