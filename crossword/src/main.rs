use crossword::{Error, PuzzleDefinition, PuzzleEngine, catalog};
use std::env;
use std::fs;
use std::path::Path;

/// Builds `definition` and reports how it went. Returns whether it built cleanly.
fn check(source: &str, definition: PuzzleDefinition) -> bool {
  let (engine, inconsistencies) = PuzzleEngine::with_report(definition);

  if inconsistencies.is_empty() {
    println!("Built '{}' cleanly from {}", engine.title(), source);
  } else {
    println!(
      "Built '{}' from {} with {} inconsistencies:",
      engine.title(),
      source,
      inconsistencies.len()
    );
    for inconsistency in &inconsistencies {
      let label = engine
        .clue(inconsistency.clue())
        .map(|clue| clue.label())
        .unwrap_or_default();
      println!("  {}: {}", label, inconsistency);
    }
  }
  print!("{}", engine.grid().solution_text());
  println!();

  inconsistencies.is_empty()
}

fn check_file(path: &Path) -> Result<bool, Error> {
  let definition = PuzzleDefinition::load(path)?;
  Ok(check(&path.display().to_string(), definition))
}

/// A simple CLI for checking puzzles: with no arguments, every catalog level;
/// otherwise a level number, a TOML puzzle file, or a directory of them.
fn main() -> Result<(), Error> {
  env_logger::init();
  let args: Vec<String> = env::args().collect();

  let mut clean = 0;
  let mut inconsistent = 0;
  let mut tally = |ok: bool| {
    if ok {
      clean += 1;
    } else {
      inconsistent += 1;
    }
  };

  match args.get(1) {
    None => {
      for (index, definition) in catalog::levels().iter().enumerate() {
        tally(check(&format!("level {}", index + 1), definition.clone()));
      }
    }
    Some(arg) => {
      if let Ok(number) = arg.parse::<usize>() {
        let definition = catalog::level_checked(number)?.clone();
        tally(check(&format!("level {}", number), definition));
      } else if fs::metadata(arg)?.is_dir() {
        for entry in fs::read_dir(arg)? {
          let path = entry?.path();
          if path.extension().is_none_or(|ext| ext != "toml") {
            continue;
          }
          match check_file(&path) {
            Ok(ok) => tally(ok),
            Err(e) => {
              println!("Failed with {:?} from {}", e, path.display());
              tally(false);
            }
          }
        }
      } else {
        tally(check_file(Path::new(arg))?);
      }
    }
  }

  dbg!(clean, inconsistent);
  Ok(())
}
