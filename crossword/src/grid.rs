//! The cell arena, and how it is built from a [PuzzleDefinition].

use crate::{ClueId, Pos, PuzzleDefinition};
use std::fmt::Debug;
use std::fmt::Display;

/// A square in a crossword grid, as a renderer sees it.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Square {
  /// A black square where nothing can be entered.
  Black,
  /// A square where a letter could be entered, but that is currently empty.
  Empty,
  /// A square with a letter written in it.
  Letter(char),
}

impl Square {
  /// Whether this is [Square::Black].
  pub fn is_black(&self) -> bool {
    *self == Self::Black
  }

  pub fn is_empty(&self) -> bool {
    *self == Self::Empty
  }

  /// Whether this is not a black square, i.e. either a [Square::Empty] or [Square::Letter].
  pub fn is_white(&self) -> bool {
    !self.is_black()
  }
}

impl Debug for Square {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Black => write!(f, "■"),
      Self::Empty => write!(f, " "),
      Self::Letter(c) => write!(f, "{}", c),
    }?;
    Ok(())
  }
}

impl Display for Square {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}", self)
  }
}

/// Permanent puzzle data for one square. Fixed once the grid is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
  pos: Pos,
  solution: Option<char>,
  blocked: bool,
  number: Option<u32>,
}

impl Cell {
  fn blocked(pos: Pos) -> Self {
    Self {
      pos,
      solution: None,
      blocked: true,
      number: None,
    }
  }

  pub fn pos(&self) -> Pos {
    self.pos
  }

  /// The correct letter for this square. Only `None` for blocked squares, unless the
  /// puzzle's answers put whitespace here.
  pub fn solution(&self) -> Option<char> {
    self.solution
  }

  /// Whether no clue covers this square.
  pub fn is_blocked(&self) -> bool {
    self.blocked
  }

  /// The number printed in the corner of this square, if one or more clues start here.
  pub fn number(&self) -> Option<u32> {
    self.number
  }
}

/// Play state for one square: what the player has written, and how the square should
/// currently be drawn. Everything here is cleared when a puzzle is restarted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellState {
  pub(crate) letter: Option<char>,
  pub(crate) selected: bool,
  pub(crate) highlighted: bool,
  pub(crate) revealed: bool,
}

impl CellState {
  /// The letter the player has written here, if any.
  pub fn letter(&self) -> Option<char> {
    self.letter
  }

  /// Whether the cursor is on this square.
  pub fn is_selected(&self) -> bool {
    self.selected
  }

  /// Whether this square belongs to the active clue.
  pub fn is_highlighted(&self) -> bool {
    self.highlighted
  }

  /// Whether the letter here was filled in by a hint.
  pub fn is_revealed(&self) -> bool {
    self.revealed
  }
}

/// Something wrong with a [PuzzleDefinition] that grid construction tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
  /// The clue's start square lies outside the grid, so its number is not shown.
  StartOutOfBounds { clue: ClueId },
  /// The last `skipped` letters of the clue's answer fell outside the grid and were dropped.
  OutOfBounds { clue: ClueId, skipped: usize },
  /// The clue crosses a square that an earlier clue already lettered differently.
  /// The earlier letter was kept.
  Conflict {
    clue: ClueId,
    pos: Pos,
    kept: char,
    rejected: char,
  },
}

impl Inconsistency {
  /// The clue this inconsistency was found in.
  pub fn clue(&self) -> ClueId {
    match *self {
      Self::StartOutOfBounds { clue }
      | Self::OutOfBounds { clue, .. }
      | Self::Conflict { clue, .. } => clue,
    }
  }
}

impl Display for Inconsistency {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::StartOutOfBounds { clue } => write!(f, "clue #{clue} starts outside the grid"),
      Self::OutOfBounds { clue, skipped } => {
        write!(f, "clue #{clue} runs {skipped} letter(s) past the edge of the grid")
      }
      Self::Conflict {
        clue,
        pos: (row, col),
        kept,
        rejected,
      } => write!(
        f,
        "clue #{clue} wants '{rejected}' at ({row}, {col}) but an earlier clue put '{kept}' there"
      ),
    }
  }
}

/// The grid of a puzzle: one [Cell] and one [CellState] per square, stored row by row,
/// plus the squares each clue covers.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
  size: usize,
  cells: Vec<Cell>,
  states: Vec<CellState>,
  /// For each clue, the arena indices of its squares in answer order.
  words: Vec<Vec<usize>>,
}

impl Grid {
  /// Lays out every clue of `definition`. Never fails: letters that fall outside the
  /// grid are dropped, and where two clues disagree on a square the first one wins.
  /// Everything that had to be tolerated is returned alongside the grid.
  pub(crate) fn build(definition: &PuzzleDefinition) -> (Self, Vec<Inconsistency>) {
    let size = definition.size;
    let mut cells: Vec<Cell> = GridPosIter::new((size, size)).map(Cell::blocked).collect();
    let mut inconsistencies = vec![];
    let mut words = Vec::with_capacity(definition.clues.len());

    for (clue, def) in definition.clues.iter().enumerate() {
      let mut word = Vec::with_capacity(def.answer.len());
      let mut skipped = 0;

      for (pos, letter) in def.path() {
        let Some((pos, index)) = pos.and_then(|p| Some((p, index_of(size, p)?))) else {
          skipped += 1;
          continue;
        };

        let letter = solution_letter(letter);
        let cell = &mut cells[index];
        if cell.blocked {
          cell.blocked = false;
          cell.solution = letter;
        } else {
          match (cell.solution, letter) {
            (None, _) => cell.solution = letter,
            (Some(kept), Some(rejected)) if kept != rejected => {
              inconsistencies.push(Inconsistency::Conflict {
                clue,
                pos,
                kept,
                rejected,
              });
            }
            _ => {}
          }
        }
        word.push(index);
      }

      if skipped > 0 {
        inconsistencies.push(Inconsistency::OutOfBounds { clue, skipped });
      }
      words.push(word);
    }

    for (clue, def) in definition.clues.iter().enumerate() {
      match index_of(size, def.start()) {
        Some(index) => {
          cells[index].number.get_or_insert(def.number);
        }
        None => inconsistencies.push(Inconsistency::StartOutOfBounds { clue }),
      }
    }

    let grid = Self {
      size,
      states: vec![CellState::default(); cells.len()],
      cells,
      words,
    };
    (grid, inconsistencies)
  }

  /// The side length of this (square) grid.
  pub fn size(&self) -> usize {
    self.size
  }

  /// An iterator over all the positions of this grid, from left to right and top to bottom.
  pub fn positions(&self) -> GridPosIter {
    GridPosIter::new((self.size, self.size))
  }

  pub(crate) fn index_of(&self, pos: Pos) -> Option<usize> {
    index_of(self.size, pos)
  }

  /// Returns the [Cell] at the given [Pos], or `None` if it's outside the grid.
  pub fn cell(&self, pos: Pos) -> Option<&Cell> {
    self.cells.get(self.index_of(pos)?)
  }

  /// Returns the [CellState] at the given [Pos], or `None` if it's outside the grid.
  pub fn state(&self, pos: Pos) -> Option<&CellState> {
    self.states.get(self.index_of(pos)?)
  }

  /// How the square at `pos` should be drawn, going by what the player has written.
  /// Positions outside the grid are black.
  pub fn get(&self, pos: Pos) -> Square {
    match self.index_of(pos) {
      Some(index) if !self.cells[index].blocked => match self.states[index].letter {
        Some(letter) => Square::Letter(letter),
        None => Square::Empty,
      },
      _ => Square::Black,
    }
  }

  /// Whether the square at `pos` is inside the grid and not blocked.
  pub fn is_open(&self, pos: Pos) -> bool {
    self.get(pos).is_white()
  }

  pub(crate) fn cell_at(&self, index: usize) -> &Cell {
    &self.cells[index]
  }

  pub(crate) fn state_at_mut(&mut self, index: usize) -> &mut CellState {
    &mut self.states[index]
  }

  /// The arena indices covered by `clue`, in answer order.
  pub(crate) fn word(&self, clue: ClueId) -> &[usize] {
    &self.words[clue]
  }

  /// The positions covered by `clue`, in answer order.
  pub fn word_positions(&self, clue: ClueId) -> Vec<Pos> {
    self.words[clue].iter().map(|&i| self.cells[i].pos).collect()
  }

  /// Every clue covering the square with the given arena index, in authored order.
  pub(crate) fn clues_at(&self, index: usize) -> impl Iterator<Item = ClueId> + '_ {
    self
      .words
      .iter()
      .enumerate()
      .filter(move |(_, word)| word.contains(&index))
      .map(|(clue, _)| clue)
  }

  /// Whether every square of `clue` holds its solution letter.
  pub(crate) fn is_word_solved(&self, clue: ClueId) -> bool {
    self.words[clue]
      .iter()
      .all(|&i| self.states[i].letter == self.cells[i].solution)
  }

  fn open_cells(&self) -> impl Iterator<Item = (&Cell, &CellState)> {
    self
      .cells
      .iter()
      .zip(&self.states)
      .filter(|(cell, _)| !cell.blocked)
  }

  /// Whether every open square holds its solution letter.
  pub(crate) fn is_solved(&self) -> bool {
    self
      .open_cells()
      .all(|(cell, state)| state.letter == cell.solution)
  }

  /// (filled, total) over the open squares.
  pub(crate) fn fill_counts(&self) -> (usize, usize) {
    self
      .open_cells()
      .fold((0, 0), |(filled, total), (_, state)| {
        (filled + usize::from(state.letter.is_some()), total + 1)
      })
  }

  /// Clears the cursor and the word highlight from every square.
  pub(crate) fn clear_marks(&mut self) {
    for state in &mut self.states {
      state.selected = false;
      state.highlighted = false;
    }
  }

  pub(crate) fn highlight(&mut self, clue: ClueId) {
    for &i in &self.words[clue] {
      self.states[i].highlighted = true;
    }
  }

  /// Clears only the cursor from every square.
  pub(crate) fn clear_selection(&mut self) {
    for state in &mut self.states {
      state.selected = false;
    }
  }

  /// Forgets everything the player did. Permanent puzzle data stays as it is.
  pub(crate) fn reset_states(&mut self) {
    self.states.fill(CellState::default());
  }

  /// Returns the position of the next open square above `pos`.
  pub fn next_up_neighbor(&self, pos: Pos) -> Option<Pos> {
    let (mut row, col) = pos;
    loop {
      if row == 0 {
        return None;
      }
      row -= 1;
      if self.is_open((row, col)) {
        return Some((row, col));
      }
    }
  }

  /// Returns the position of the next open square below `pos`.
  pub fn next_down_neighbor(&self, pos: Pos) -> Option<Pos> {
    let (mut row, col) = pos;
    loop {
      if row + 1 >= self.size {
        return None;
      }
      row += 1;
      if self.is_open((row, col)) {
        return Some((row, col));
      }
    }
  }

  /// Returns the position of the next open square to the left of `pos`.
  pub fn next_left_neighbor(&self, pos: Pos) -> Option<Pos> {
    let (row, mut col) = pos;
    loop {
      if col == 0 {
        return None;
      }
      col -= 1;
      if self.is_open((row, col)) {
        return Some((row, col));
      }
    }
  }

  /// Returns the position of the next open square to the right of `pos`.
  pub fn next_right_neighbor(&self, pos: Pos) -> Option<Pos> {
    let (row, mut col) = pos;
    loop {
      if col + 1 >= self.size {
        return None;
      }
      col += 1;
      if self.is_open((row, col)) {
        return Some((row, col));
      }
    }
  }

  /// The solution, drawn the same way as the grid itself. Handy for checking a puzzle.
  pub fn solution_text(&self) -> String {
    let mut text = String::with_capacity(self.cells.len() * 2);
    for row in self.cells.chunks(self.size.max(1)) {
      for cell in row {
        let square = match (cell.blocked, cell.solution) {
          (true, _) => Square::Black,
          (false, Some(letter)) => Square::Letter(letter),
          (false, None) => Square::Empty,
        };
        text.push_str(&square.to_string());
      }
      text.push('\n');
    }
    text
  }
}

/// The arena index of `pos` in a grid with the given side length.
fn index_of(size: usize, (row, col): Pos) -> Option<usize> {
  (row < size && col < size).then(|| row * size + col)
}

/// Whitespace in an answer leaves a square without a solution letter.
fn solution_letter(letter: char) -> Option<char> {
  (!letter.is_whitespace()).then_some(letter)
}

/// Iterator over all the positions in the grid.
pub struct GridPosIter {
  pos: (usize, usize),
  size: (usize, usize),
}

impl GridPosIter {
  fn new(size: (usize, usize)) -> Self {
    Self { pos: (0, 0), size }
  }
}

impl Iterator for GridPosIter {
  type Item = Pos;
  fn next(&mut self) -> Option<Self::Item> {
    let (width, height) = self.size;
    let (row, col) = self.pos;

    if row == height || width == 0 {
      return None;
    }

    if col == width - 1 {
      self.pos = (row + 1, 0);
    } else {
      self.pos = (row, col + 1);
    }

    Some((row, col))
  }
}

impl Debug for Grid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for row in 0..self.size {
      for col in 0..self.size {
        write!(f, "{}", self.get((row, col)))?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

impl Display for Grid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "\n{:?}", self)
  }
}
