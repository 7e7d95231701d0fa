use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
  self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
  MouseEventKind,
};
use crossword::Direction::{Across, Down};
use crossword::scoring::{self, HINT_PENALTY, WORD_COMPLETE_POINTS};
use crossword::{
  ActiveClue, Cell, CellState, ClueDefinition, Direction, Grid, Pos, PuzzleDefinition,
  PuzzleEngine, catalog,
};
use ratatui::{
  DefaultTerminal, Frame,
  buffer::Buffer,
  layout::{Constraint, Flex, Layout, Position, Rect},
  style::{Color, Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::{Block, Clear, List, ListItem, Padding, Paragraph, Widget, Wrap},
};
use ratatui_macros::line;

use crate::records::RecordsFile;

const SQUARE_WIDTH: u16 = 7;
const SQUARE_HEIGHT: u16 = 3;
const COL_STRIDE: u16 = SQUARE_WIDTH + 1;
const ROW_STRIDE: u16 = SQUARE_HEIGHT + 1;

/// How long to wait for input before redrawing the clock.
const TICK: Duration = Duration::from_millis(250);

/// Builds an engine for `definition`, refusing inconsistent puzzles if `strict` is set.
pub(crate) fn build_engine(
  definition: PuzzleDefinition,
  strict: bool,
) -> Result<PuzzleEngine, crossword::Error> {
  if strict {
    PuzzleEngine::strict(definition)
  } else {
    Ok(PuzzleEngine::new(definition))
  }
}

#[derive(Debug)]
enum SquareStyle {
  // Default styling
  Standard,
  // The cursor is positioned on this square.
  Cursor,
  // This cursor is not on this square, but the word indicated by the cursor includes this square.
  Word,
  // The letter here came from a hint.
  Revealed,
}

impl From<&CellState> for SquareStyle {
  fn from(state: &CellState) -> Self {
    if state.is_selected() {
      SquareStyle::Cursor
    } else if state.is_highlighted() {
      SquareStyle::Word
    } else if state.is_revealed() {
      SquareStyle::Revealed
    } else {
      SquareStyle::Standard
    }
  }
}

impl From<SquareStyle> for Style {
  fn from(value: SquareStyle) -> Self {
    let base_style = match value {
      SquareStyle::Standard => Style::new().bg(Color::White),
      SquareStyle::Cursor => Style::new().bg(Color::LightRed),
      SquareStyle::Word => Style::new().bg(Color::LightYellow),
      SquareStyle::Revealed => Style::new().bg(Color::LightCyan),
    };
    base_style.fg(Color::Black).add_modifier(Modifier::BOLD)
  }
}

/// What the player achieved when the puzzle was solved.
#[derive(Debug, Clone, Copy)]
struct Solved {
  elapsed: Duration,
  time_bonus: i64,
  new_best: bool,
}

/// Where everything goes on screen.
struct Areas {
  title: Rect,
  grid: Rect,
  clues: Rect,
  status: Rect,
}

impl Areas {
  fn new(area: Rect, size: usize) -> Self {
    let [title, main, status] = Layout::vertical([
      Constraint::Length(2),
      Constraint::Fill(1),
      Constraint::Length(1),
    ])
    .areas(area);

    let [puzzle, clues] =
      Layout::horizontal([Constraint::Fill(1), Constraint::Length(45)]).areas(main);

    let grid = center(
      puzzle,
      Constraint::Length(grid_extent(size, COL_STRIDE)),
      Constraint::Length(grid_extent(size, ROW_STRIDE)),
    );

    Self {
      title,
      grid,
      clues,
      status,
    }
  }
}

/// Screen cells needed for `size` squares laid out every `stride` cells.
fn grid_extent(size: usize, stride: u16) -> u16 {
  u16::try_from(size)
    .unwrap_or(u16::MAX)
    .saturating_mul(stride)
    .saturating_sub(1)
}

/// The area of the square at (row, col) in a grid drawn at `grid`.
fn square_area(grid: Rect, (row, col): Pos) -> Rect {
  let offset = |index: usize, stride: u16| u16::try_from(index).unwrap_or(u16::MAX).saturating_mul(stride);
  Rect {
    x: grid.x.saturating_add(offset(col, COL_STRIDE)),
    y: grid.y.saturating_add(offset(row, ROW_STRIDE)),
    width: SQUARE_WIDTH,
    height: SQUARE_HEIGHT,
  }
}

/// The square under the terminal cell (column, row), if there is one. The gaps between
/// squares don't belong to any square.
fn square_at(grid: Rect, column: u16, row: u16) -> Option<Pos> {
  if !grid.contains(Position::new(column, row)) {
    return None;
  }
  let (dx, dy) = (column - grid.x, row - grid.y);
  if dx % COL_STRIDE >= SQUARE_WIDTH || dy % ROW_STRIDE >= SQUARE_HEIGHT {
    return None;
  }
  Some(((dy / ROW_STRIDE).into(), (dx / COL_STRIDE).into()))
}

/// Formats a duration as MM:SS.
fn format_elapsed(elapsed: Duration) -> String {
  let seconds = elapsed.as_secs();
  format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug)]
pub struct App {
  engine: PuzzleEngine,
  /// The catalog level being played, or `None` for a puzzle loaded from a file.
  level: Option<usize>,
  records: RecordsFile,
  strict: bool,
  started: Instant,
  solved: Option<Solved>,
  message: Option<String>,
  /// The terminal area of the last frame drawn, for mapping mouse clicks to squares.
  frame_area: Rect,
  running: bool,
}

impl App {
  pub fn new(
    engine: PuzzleEngine,
    level: Option<usize>,
    records: RecordsFile,
    strict: bool,
  ) -> Self {
    let mut app = Self {
      engine,
      level,
      records,
      strict,
      started: Instant::now(),
      solved: None,
      message: None,
      frame_area: Rect::default(),
      running: true,
    };
    app.select_first_cell();
    app
  }

  pub fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
    self.running = true;
    while self.running {
      terminal.draw(|frame| self.draw(frame))?;
      self.handle_crossterm_events()?;
    }
    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame) {
    self.frame_area = frame.area();
    frame.render_widget(&*self, frame.area());
  }

  /// Reads the crossterm events and updates the state of [`App`].
  ///
  /// Waits at most [TICK] for an event, so that the clock keeps moving.
  fn handle_crossterm_events(&mut self) -> io::Result<()> {
    if !event::poll(TICK)? {
      return Ok(());
    }
    match event::read()? {
      // it's important to check KeyEventKind::Press to avoid handling key release events
      Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
      Event::Mouse(mouse) => self.on_mouse_event(mouse),
      _ => {}
    }
    Ok(())
  }

  /// Handles the key events and updates the state of [`App`].
  fn on_key_event(&mut self, key: KeyEvent) {
    self.message = None;
    match (key.modifiers, key.code) {
      (_, KeyCode::Esc)
      | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
      (KeyModifiers::CONTROL, KeyCode::Char('r') | KeyCode::Char('R')) => self.restart(),
      (_, KeyCode::Char('n') | KeyCode::Char('N')) if self.solved.is_some() => self.next_level(),
      // Once solved, the grid is read-only.
      _ if self.solved.is_some() => {}
      (_, KeyCode::Backspace | KeyCode::Delete) => {
        self.engine.delete_letter();
      }
      (_, KeyCode::Tab | KeyCode::Char(' ')) => self.toggle_direction(),
      (_, KeyCode::Up) => self.step(Grid::next_up_neighbor, Down),
      (_, KeyCode::Down) => self.step(Grid::next_down_neighbor, Down),
      (_, KeyCode::Left) => self.step(Grid::next_left_neighbor, Across),
      (_, KeyCode::Right) => self.step(Grid::next_right_neighbor, Across),
      (_, KeyCode::Char('?')) => self.hint(),
      (_, KeyCode::Char('[')) => self.jump(-1),
      (_, KeyCode::Char(']')) => self.jump(1),
      (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) if c.is_alphabetic() => {
        self.type_letter(c)
      }
      _ => {}
    }
  }

  /// Selects the square under a left click.
  fn on_mouse_event(&mut self, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.solved.is_some() {
      return;
    }
    let areas = Areas::new(self.frame_area, self.engine.size());
    if let Some(pos) = square_at(areas.grid, mouse.column, mouse.row) {
      self.engine.select_cell(pos);
    }
  }

  /// Set running to false to quit the application.
  fn quit(&mut self) {
    self.running = false;
  }

  fn elapsed(&self) -> Duration {
    match self.solved {
      Some(solved) => solved.elapsed,
      None => self.started.elapsed(),
    }
  }

  fn select_first_cell(&mut self) {
    if let Some(pos) = self.engine.first_open_cell() {
      self.engine.select_cell(pos);
    }
  }

  /// Selects `pos`, then selects it again if that picked the clue in the other direction.
  fn select_in_direction(&mut self, pos: Pos, direction: Direction) {
    let active = self.engine.select_cell(pos);
    if active.is_some_and(|active| active.direction() != direction) {
      self.engine.select_cell(pos);
    }
  }

  fn toggle_direction(&mut self) {
    if let Some(pos) = self.engine.selected_pos() {
      self.engine.select_cell(pos);
    }
  }

  /// Moves to the open square found by `neighbor`, preferring a clue in `direction`.
  fn step(&mut self, neighbor: fn(&Grid, Pos) -> Option<Pos>, direction: Direction) {
    let Some(pos) = self.engine.selected_pos() else {
      self.select_first_cell();
      return;
    };
    if let Some(next) = neighbor(self.engine.grid(), pos) {
      self.select_in_direction(next, direction);
    }
  }

  /// Moves to the start of the clue `offset` places away from the active one, among
  /// clues in the same direction.
  fn jump(&mut self, offset: isize) {
    let Some(active) = self.engine.active_clue() else {
      self.select_first_cell();
      return;
    };
    let clues = match active.direction() {
      Across => self.engine.across_clues(),
      Down => self.engine.down_clues(),
    };
    let Some(current) = clues.iter().position(|clue| **clue == active.clue) else {
      return;
    };
    let count = clues.len() as isize;
    let next = (current as isize + offset).rem_euclid(count) as usize;
    let (start, direction) = (clues[next].start(), clues[next].direction);
    self.select_in_direction(start, direction);
  }

  fn type_letter(&mut self, letter: char) {
    if self.engine.enter_letter(letter) {
      self.engine.add_score(WORD_COMPLETE_POINTS);
      self.message = Some(format!("Word complete! +{}", WORD_COMPLETE_POINTS));
    }
    self.check_solved();
  }

  fn hint(&mut self) {
    let before = self.engine.hints_used();
    self.engine.reveal_current_cell();
    if self.engine.hints_used() > before {
      self.message = Some(format!("Letter revealed! -{} points", HINT_PENALTY));
    }
    self.check_solved();
  }

  /// Hands out the solve bonus and saves records the first time the puzzle is solved.
  fn check_solved(&mut self) {
    if self.solved.is_some() || !self.engine.is_solved() {
      return;
    }

    let elapsed = self.started.elapsed();
    let time_bonus = scoring::time_bonus(elapsed);
    self.engine.add_score(scoring::solve_bonus(elapsed));

    let mut new_best = false;
    if let Some(level) = self.level {
      match self.records.record_win(level, self.engine.score()) {
        Ok(best) => new_best = best,
        Err(e) => {
          log::error!("{}: {}", self.records.path().display(), e);
          self.message = Some(format!("Could not save progress: {}", e));
        }
      }
    }

    log::info!(
      "solved '{}' in {} with {} hints, score {}",
      self.engine.title(),
      format_elapsed(elapsed),
      self.engine.hints_used(),
      self.engine.score()
    );
    self.solved = Some(Solved {
      elapsed,
      time_bonus,
      new_best,
    });
  }

  fn has_next_level(&self) -> bool {
    self.level.is_some_and(|level| level < catalog::len())
  }

  fn next_level(&mut self) {
    let Some(level) = self.level.filter(|_| self.has_next_level()) else {
      self.message = Some("You completed all levels!".to_string());
      return;
    };
    let next = level + 1;
    match build_engine(catalog::level(next).clone(), self.strict) {
      Ok(engine) => self.start(engine, Some(next)),
      Err(e) => {
        log::error!("level {}: {}", next, e);
        self.message = Some(format!("Level {} can't be played: {}", next, e));
      }
    }
  }

  fn start(&mut self, engine: PuzzleEngine, level: Option<usize>) {
    self.engine = engine;
    self.level = level;
    self.started = Instant::now();
    self.solved = None;
    self.select_first_cell();
  }

  fn restart(&mut self) {
    self.engine.restart();
    self.started = Instant::now();
    self.solved = None;
    self.select_first_cell();
    self.message = Some("Puzzle restarted".to_string());
  }

  fn render_square(&self, cell: &Cell, state: &CellState, square_area: Rect, buf: &mut Buffer) {
    if cell.is_blocked() {
      Block::new()
        .style(Style::new().bg(Color::Black))
        .render(square_area, buf);
      return;
    }

    let number = cell.number().map(|n| n.to_string()).unwrap_or_default();
    let letter = state.letter().map(String::from).unwrap_or_default();
    let letter = if state.is_revealed() {
      Span::from(letter).fg(Color::Blue)
    } else {
      Span::from(letter)
    };

    Paragraph::new(vec![
      Line::from(number).left_aligned(),
      Line::from(letter).centered(),
    ])
    .block(Block::new().style(SquareStyle::from(state)))
    .render(square_area, buf);
  }

  fn render_clue_list(
    &self,
    title: &str,
    clues: Vec<&ClueDefinition>,
    active: Option<&ActiveClue>,
    area: Rect,
    buf: &mut Buffer,
  ) {
    let items: Vec<ListItem> = clues
      .into_iter()
      .map(|clue| {
        let item = ListItem::new(format!("{:>2}. {}", clue.number, clue.text));
        if active.is_some_and(|active| active.clue == *clue) {
          item.style(Style::new().bg(Color::LightBlue).fg(Color::Black))
        } else {
          item
        }
      })
      .collect();

    List::new(items)
      .block(Block::bordered().title(Line::from(title).centered()))
      .render(area, buf);
  }

  fn render_solved(&self, solved: &Solved, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
      line!["Puzzle solved!".bold()],
      Line::default(),
      line!["Time: ", format_elapsed(solved.elapsed)],
      line!["Hints used: ", self.engine.hints_used().to_string()],
      line!["Time bonus: +", solved.time_bonus.to_string()],
      line!["Final score: ", self.engine.score().to_string()],
    ];
    if solved.new_best {
      lines.push(line!["New best score!".yellow()]);
    } else {
      lines.push(line!["Best score: ", self.records.records().best_score.to_string()]);
    }
    if self.level.is_some() {
      let unlocked = self.records.records().continue_level();
      lines.push(line!["Unlocked: level ", format!("{}/{}", unlocked, catalog::len())]);
    }
    lines.push(Line::default());
    lines.push(if self.has_next_level() {
      line!["n: next level   Esc: quit".dim()]
    } else {
      line!["Esc: quit".dim()]
    });

    let area = center(area, Constraint::Length(40), Constraint::Length(14));
    Clear.render(area, buf);
    Paragraph::new(lines)
      .centered()
      .block(Block::bordered().padding(Padding::uniform(1)))
      .render(area, buf);
  }
}

impl Widget for &App {
  fn render(self, area: Rect, buf: &mut Buffer) {
    let areas = Areas::new(area, self.engine.size());

    let [title_area, help_area] =
      Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(areas.title);
    line![
      "Ratatui Crossword".bold().blue(),
      ": ".bold(),
      self.engine.title().to_string().bold(),
    ]
    .centered()
    .render(title_area, buf);
    line!["letters: type   tab: switch direction   ?: hint   [ ]: previous/next clue   ctrl-r: restart   esc: quit"
      .dim()]
    .centered()
    .render(help_area, buf);

    for pos in self.engine.grid().positions() {
      let square_area = square_area(areas.grid, pos).intersection(area);
      if square_area.is_empty() {
        continue;
      }
      if let (Some(cell), Some(state)) = (self.engine.grid().cell(pos), self.engine.grid().state(pos)) {
        self.render_square(cell, state, square_area, buf);
      }
    }

    let [current_area, across_area, down_area] = Layout::vertical([
      Constraint::Length(5),
      Constraint::Fill(1),
      Constraint::Fill(1),
    ])
    .areas(areas.clues);

    let active = self.engine.active_clue();
    let current = match &active {
      Some(active) => format!("{} {}: {}", active.clue.number, active.direction(), active.clue.text),
      None => "Select a square".to_string(),
    };
    Paragraph::new(current)
      .wrap(Wrap { trim: true })
      .block(
        Block::bordered()
          .title(Line::from("Current clue").centered())
          .padding(Padding::horizontal(1)),
      )
      .render(current_area, buf);
    self.render_clue_list("Across", self.engine.across_clues(), active.as_ref(), across_area, buf);
    self.render_clue_list("Down", self.engine.down_clues(), active.as_ref(), down_area, buf);

    let progress = self.engine.progress();
    let mut status = line![
      "Score: ".bold(),
      self.engine.score().to_string(),
      "   ",
      "Hints: ".bold(),
      self.engine.hints_used().to_string(),
      "   ",
      "Progress: ".bold(),
      format!("{}/{} ({}%)", progress.filled, progress.total, progress.percent()),
      "   ",
      "Time: ".bold(),
      format_elapsed(self.elapsed()),
      "   ",
      "Best: ".bold(),
      self.records.records().best_score.to_string(),
    ];
    if let Some(level) = self.level {
      status.push_span("   ");
      status.push_span(format!("Level {}/{}", level, catalog::len()).bold());
    }
    if let Some(message) = &self.message {
      status.push_span("   ");
      status.push_span(message.clone().italic());
    }
    status.render(areas.status, buf);

    if let Some(solved) = &self.solved {
      self.render_solved(solved, area, buf);
    }
  }
}

/// https://ratatui.rs/recipes/layout/center-a-widget/
fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
  let [area] = Layout::horizontal([horizontal])
    .flex(Flex::Center)
    .areas(area);
  let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
  area
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::records::Records;
  use crossword::scoring::SOLVE_BONUS;

  fn definition() -> PuzzleDefinition {
    PuzzleDefinition::new(
      "Frame",
      4,
      vec![
        ClueDefinition::new(1, Across, "Birthday treat", "CAKE", (0, 0)),
        ClueDefinition::new(1, Down, "Secret writing", "CODE", (0, 0)),
        ClueDefinition::new(2, Down, "Make money", "EARN", (0, 3)),
        ClueDefinition::new(3, Across, "Not odd", "EVEN", (3, 0)),
      ],
    )
  }

  fn app(definition: PuzzleDefinition, level: Option<usize>, dir: &tempfile::TempDir) -> App {
    let records = RecordsFile::load(dir.path().join("records.toml")).unwrap();
    App::new(PuzzleEngine::new(definition), level, records, false)
  }

  fn press(app: &mut App, code: KeyCode) {
    app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
  }

  fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
      press(app, KeyCode::Char(c));
    }
  }

  fn active(app: &App) -> (u32, Direction) {
    let active = app.engine.active_clue().unwrap();
    (active.clue.number, active.direction())
  }

  #[test]
  fn squares_under_the_pointer() {
    let grid = Rect::new(10, 5, grid_extent(4, COL_STRIDE), grid_extent(4, ROW_STRIDE));
    assert_eq!(grid.width, 31);
    assert_eq!(grid.height, 15);

    assert_eq!(square_at(grid, 10, 5), Some((0, 0)));
    assert_eq!(square_at(grid, 16, 7), Some((0, 0)));
    // The gap to the right of and below the first square.
    assert_eq!(square_at(grid, 17, 5), None);
    assert_eq!(square_at(grid, 10, 8), None);
    assert_eq!(square_at(grid, 10 + 2 * COL_STRIDE, 5 + 3 * ROW_STRIDE + 1), Some((3, 2)));
    assert_eq!(square_at(grid, 9, 5), None);
    assert_eq!(square_at(grid, 41, 5), None);

    assert_eq!(square_area(grid, (3, 2)).x, 10 + 2 * COL_STRIDE);
  }

  #[test]
  fn clock_format() {
    assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
    assert_eq!(format_elapsed(Duration::from_millis(61_900)), "01:01");
    assert_eq!(format_elapsed(Duration::from_secs(3600)), "60:00");
  }

  #[test]
  fn starts_on_the_first_square() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(definition(), None, &dir);
    assert_eq!(app.engine.selected_pos(), Some((0, 0)));
    assert_eq!(active(&app), (1, Across));
  }

  #[test]
  fn arrows_prefer_their_direction() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(definition(), None, &dir);

    press(&mut app, KeyCode::Down);
    assert_eq!(app.engine.selected_pos(), Some((1, 0)));
    assert_eq!(active(&app), (1, Down));

    press(&mut app, KeyCode::Right);
    assert_eq!(app.engine.selected_pos(), Some((1, 3)));
    assert_eq!(active(&app), (2, Down));

    press(&mut app, KeyCode::Up);
    assert_eq!(app.engine.selected_pos(), Some((0, 3)));
    assert_eq!(active(&app), (2, Down));

    press(&mut app, KeyCode::Left);
    assert_eq!(app.engine.selected_pos(), Some((0, 2)));
    assert_eq!(active(&app), (1, Across));
  }

  #[test]
  fn tab_switches_direction() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(definition(), None, &dir);
    press(&mut app, KeyCode::Tab);
    assert_eq!(active(&app), (1, Down));
    press(&mut app, KeyCode::Tab);
    assert_eq!(active(&app), (1, Across));
  }

  #[test]
  fn brackets_jump_between_clues() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(definition(), None, &dir);

    press(&mut app, KeyCode::Char(']'));
    assert_eq!(active(&app), (3, Across));
    assert_eq!(app.engine.selected_pos(), Some((3, 0)));
    press(&mut app, KeyCode::Char(']'));
    assert_eq!(active(&app), (1, Across));

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('['));
    assert_eq!(active(&app), (2, Down));
    assert_eq!(app.engine.selected_pos(), Some((0, 3)));
  }

  #[test]
  fn completed_words_score() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(definition(), None, &dir);

    type_text(&mut app, "cake");
    assert_eq!(app.engine.score(), WORD_COMPLETE_POINTS);
    assert_eq!(app.message.as_deref(), Some("Word complete! +100"));

    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.message, None);
    assert_eq!(app.engine.progress().filled, 3);
  }

  #[test]
  fn hints_cost_points() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(definition(), None, &dir);
    app.engine.add_score(120);

    press(&mut app, KeyCode::Char('?'));
    assert_eq!(app.engine.score(), 70);
    assert_eq!(app.engine.hints_used(), 1);
    assert_eq!(app.engine.selected_pos(), Some((0, 1)));
  }

  #[test]
  fn solving_a_level_saves_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(definition(), Some(3), &dir);

    type_text(&mut app, "CAKE");
    press(&mut app, KeyCode::Char(']'));
    type_text(&mut app, "EVEN");
    app.engine.select_cell((1, 0));
    type_text(&mut app, "OD");
    app.engine.select_cell((1, 3));
    type_text(&mut app, "AR");

    let solved = app.solved.expect("puzzle should be solved");
    assert_eq!(
      app.engine.score(),
      4 * WORD_COMPLETE_POINTS + SOLVE_BONUS + solved.time_bonus
    );
    assert!(solved.new_best);

    let records = RecordsFile::load(dir.path().join("records.toml")).unwrap();
    assert_eq!(
      *records.records(),
      Records {
        best_score: app.engine.score(),
        highest_level: 4
      }
    );

    // Typing is ignored until the next level starts.
    press(&mut app, KeyCode::Backspace);
    assert!(app.engine.is_solved());
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.level, Some(4));
    assert_eq!(app.engine.title(), catalog::level(4).title);
    assert!(app.solved.is_none());
  }

  #[test]
  fn file_puzzles_leave_records_alone() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(definition(), None, &dir);
    for _ in 0..12 {
      let empty = app
        .engine
        .grid()
        .positions()
        .find(|&pos| app.engine.grid().get(pos).is_empty());
      if let Some(pos) = empty {
        app.engine.select_cell(pos);
        press(&mut app, KeyCode::Char('?'));
      }
    }
    assert!(app.solved.is_some());
    assert!(!dir.path().join("records.toml").exists());

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.message.as_deref(), Some("You completed all levels!"));
  }

  #[test]
  fn restart_clears_the_board() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(definition(), None, &dir);
    type_text(&mut app, "CA");
    app.on_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
    assert_eq!(app.engine.progress().filled, 0);
    assert_eq!(app.engine.selected_pos(), Some((0, 0)));
  }

  #[test]
  fn clicks_select_squares() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(definition(), None, &dir);
    app.frame_area = Rect::new(0, 0, 120, 40);
    let grid = Areas::new(app.frame_area, 4).grid;

    let click = |column, row| MouseEvent {
      kind: MouseEventKind::Down(MouseButton::Left),
      column,
      row,
      modifiers: KeyModifiers::NONE,
    };
    app.on_mouse_event(click(grid.x + 3 * COL_STRIDE + 1, grid.y + 2 * ROW_STRIDE + 1));
    assert_eq!(app.engine.selected_pos(), Some((2, 3)));

    // Blocked squares can't be selected.
    app.on_mouse_event(click(grid.x + COL_STRIDE + 1, grid.y + ROW_STRIDE + 1));
    assert_eq!(app.engine.selected_pos(), Some((2, 3)));
  }

  #[test]
  fn renders_title_and_clues() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(definition(), Some(3), &dir);
    let area = Rect::new(0, 0, 120, 40);
    let mut buf = Buffer::empty(area);
    (&app).render(area, &mut buf);

    let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
    assert!(text.contains("Frame"));
    assert!(text.contains("Birthday treat"));
    assert!(text.contains("1 Across: Birthday treat"));
    assert!(text.contains("Progress: 0/12 (0%)"));
    assert!(text.contains("Best: 0"));
    assert!(text.contains("Level 3/10"));
  }

  #[test]
  fn solved_panel_shows_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.toml");
    let mut records = RecordsFile::load(&path).unwrap();
    records.record_win(5, 1_000_000).unwrap();

    let mut app = App::new(PuzzleEngine::new(definition()), Some(2), records, false);
    type_text(&mut app, "CAKE");
    press(&mut app, KeyCode::Char(']'));
    type_text(&mut app, "EVEN");
    app.engine.select_cell((1, 0));
    type_text(&mut app, "OD");
    app.engine.select_cell((1, 3));
    type_text(&mut app, "AR");
    assert!(app.solved.is_some_and(|solved| !solved.new_best));

    let area = Rect::new(0, 0, 120, 40);
    let mut buf = Buffer::empty(area);
    (&app).render(area, &mut buf);
    let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
    assert!(text.contains("Puzzle solved!"));
    assert!(text.contains("Best score: 1000000"));
    assert!(text.contains("Unlocked: level 6/10"));
    assert!(text.contains("Best: 1000000"));
  }
}
