use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossword::{PuzzleDefinition, PuzzleEngine, catalog};
use log::LevelFilter;

mod app;
mod records;

use app::{App, build_engine};
use records::RecordsFile;

/// Play crosswords in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
  /// Catalog level to play. Defaults to the highest level unlocked so far.
  #[arg(short, long)]
  level: Option<usize>,

  /// Play a puzzle from a TOML file instead of the catalog.
  #[arg(short, long, conflicts_with = "level")]
  puzzle: Option<PathBuf>,

  /// Where best score and unlocked levels are kept.
  #[arg(long, default_value = "crossword-records.toml")]
  records: PathBuf,

  /// Refuse to play puzzles whose clues don't fit together.
  #[arg(long)]
  strict: bool,

  /// Forget the best score and unlocked levels before starting.
  #[arg(long)]
  reset: bool,

  /// Write logs to this file. The terminal is taken by the game, so nothing is
  /// logged without it.
  #[arg(long)]
  log_file: Option<PathBuf>,

  #[arg(long, default_value_t = LevelFilter::Info)]
  log_level: LevelFilter,
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
  let Some(path) = &args.log_file else {
    return Ok(());
  };
  let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
  env_logger::Builder::new()
    .filter_level(args.log_level)
    .parse_default_env()
    .target(env_logger::Target::Pipe(Box::new(file)))
    .format_timestamp_secs()
    .try_init()?;
  Ok(())
}

/// Picks the puzzle to play: the `--puzzle` file, or a catalog level.
fn load_puzzle(
  args: &Args,
  records: &RecordsFile,
) -> anyhow::Result<(PuzzleDefinition, Option<usize>)> {
  if let Some(path) = &args.puzzle {
    let definition =
      PuzzleDefinition::load(path).with_context(|| format!("loading {}", path.display()))?;
    return Ok((definition, None));
  }
  let unlocked = records.records().continue_level();
  let level = args.level.unwrap_or(unlocked);
  let definition = catalog::level_checked(level)?;
  if level > unlocked {
    bail!("level {} is locked; solve level {} first", level, unlocked);
  }
  Ok((definition.clone(), Some(level)))
}

/// Builds the engine, listing what's wrong with the puzzle if `strict` refuses it.
fn start_engine(definition: PuzzleDefinition, strict: bool) -> anyhow::Result<PuzzleEngine> {
  let title = definition.title.clone();
  match build_engine(definition, strict) {
    Ok(engine) => Ok(engine),
    Err(crossword::Error::Inconsistent(inconsistencies)) => {
      for inconsistency in &inconsistencies {
        eprintln!("  {}", inconsistency);
      }
      bail!("'{}' has {} inconsistencies", title, inconsistencies.len());
    }
    Err(e) => Err(e.into()),
  }
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();
  init_logging(&args)?;

  let mut records = RecordsFile::load(&args.records)
    .with_context(|| format!("reading {}", args.records.display()))?;
  if args.reset {
    records.reset()?;
    log::info!("reset records in {}", records.path().display());
  }

  let (definition, level) = load_puzzle(&args, &records)?;
  let engine = start_engine(definition, args.strict)?;
  log::info!("playing '{}'", engine.title());

  let app = App::new(engine, level, records, args.strict);

  let terminal = ratatui::init();
  execute!(io::stdout(), EnableMouseCapture)?;
  let result = app.run(terminal);
  let released = execute!(io::stdout(), DisableMouseCapture);
  ratatui::restore();
  result?;
  released?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossword::{ClueDefinition, Direction};

  fn setup(extra: &[&str]) -> (tempfile::TempDir, Args, RecordsFile) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.toml");
    let mut argv = vec!["crosstui", "--records", path.to_str().unwrap()];
    argv.extend_from_slice(extra);
    let args = Args::parse_from(argv);
    let records = RecordsFile::load(&args.records).unwrap();
    (dir, args, records)
  }

  #[test]
  fn continues_at_the_highest_unlocked_level() {
    let (_dir, args, mut records) = setup(&[]);
    let (definition, level) = load_puzzle(&args, &records).unwrap();
    assert_eq!(level, Some(1));
    assert_eq!(definition, *catalog::level(1));

    records.record_win(3, 800).unwrap();
    let (_, level) = load_puzzle(&args, &records).unwrap();
    assert_eq!(level, Some(4));
  }

  #[test]
  fn locked_levels_are_refused() {
    let (_dir, args, mut records) = setup(&["--level", "7"]);
    let err = load_puzzle(&args, &records).unwrap_err();
    assert!(err.to_string().contains("level 7 is locked"), "{}", err);

    records.record_win(6, 800).unwrap();
    let (definition, level) = load_puzzle(&args, &records).unwrap();
    assert_eq!(level, Some(7));
    assert_eq!(definition.title, "Level 7 - Geography");
  }

  #[test]
  fn earlier_levels_can_be_replayed() {
    let (_dir, args, mut records) = setup(&["--level", "2"]);
    records.record_win(4, 800).unwrap();
    let (_, level) = load_puzzle(&args, &records).unwrap();
    assert_eq!(level, Some(2));
  }

  #[test]
  fn unknown_levels_are_refused() {
    let (_dir, args, records) = setup(&["--level", "11"]);
    let err = load_puzzle(&args, &records).unwrap_err();
    assert!(matches!(
      err.downcast_ref::<crossword::Error>(),
      Some(crossword::Error::UnknownLevel(11))
    ));
  }

  #[test]
  fn strict_mode_refuses_inconsistent_puzzles() {
    let level_one = catalog::level(1).clone();
    let err = start_engine(level_one.clone(), true).unwrap_err();
    assert!(err.to_string().contains("inconsistencies"), "{}", err);

    let engine = start_engine(level_one, false).unwrap();
    assert_eq!(engine.title(), "Level 1 - Getting Started");

    let clean = PuzzleDefinition::new(
      "Pets",
      3,
      vec![ClueDefinition::new(1, Direction::Across, "Feline pet", "CAT", (0, 0))],
    );
    assert!(start_engine(clean, true).is_ok());
  }
}
