//! The levels that ship with the game, numbered from 1.
//!
//! These are played exactly as authored. Several of them have answers that run off the
//! edge of the grid or crossings that disagree; [PuzzleEngine](crate::PuzzleEngine)
//! copes with both, and the `crossword` binary lists them.

use crate::Direction::{Across, Down};
use crate::{ClueDefinition, Direction, Error, PuzzleDefinition};
use std::sync::LazyLock;

static LEVELS: LazyLock<Vec<PuzzleDefinition>> = LazyLock::new(|| {
  vec![
    puzzle(
      "Level 1 - Getting Started",
      5,
      &[
        (1, Across, "Opposite of night", "DAY", 0, 0),
        (2, Across, "Feline pet", "CAT", 1, 0),
        (3, Across, "Canine pet", "DOG", 2, 0),
        (4, Across, "Bright star", "SUN", 3, 0),
        (5, Across, "Baked good", "PIE", 4, 0),
        (1, Down, "Moisture from sky", "DCDSP", 0, 0),
        (6, Down, "Definite article", "ATOES", 0, 1),
        (7, Down, "You and I", "YAGUI", 0, 2),
      ],
    ),
    puzzle(
      "Level 2 - Animals",
      5,
      &[
        (1, Across, "King of the jungle", "LION", 0, 0),
        (2, Across, "Largest mammal", "WHALE", 2, 0),
        (3, Across, "Man's best friend", "DOG", 4, 0),
        (1, Down, "Large body of water", "LAWD", 0, 0),
        (4, Down, "Intelligent primate", "IHOLE", 0, 1),
        (5, Down, "Bird of prey", "OAAG", 0, 2),
      ],
    ),
    puzzle(
      "Level 3 - Food",
      5,
      &[
        (1, Across, "Tropical yellow fruit", "MANGO", 0, 0),
        (2, Across, "Italian flat bread", "PIZZA", 2, 0),
        (3, Across, "Baked breakfast item", "TOAST", 4, 0),
        (1, Down, "Dairy product", "MAPIT", 0, 0),
        (4, Down, "Spicy condiment", "NIZOA", 0, 1),
        (5, Down, "Sweetener", "GZAS", 0, 2),
      ],
    ),
    puzzle(
      "Level 4 - Nature",
      5,
      &[
        (1, Across, "Tallest tree type", "OAK", 0, 0),
        (2, Across, "Flowing water body", "RIVER", 1, 0),
        (3, Across, "Frozen water", "ICE", 2, 1),
        (4, Across, "Rocky peak", "MOUNT", 3, 0),
        (5, Across, "Sandy shore", "BEACH", 4, 0),
        (1, Down, "Open grassy land", "ORIMB", 0, 0),
        (6, Down, "Desert feature", "AVCAE", 0, 1),
        (7, Down, "Woodland creature home", "KIEAC", 0, 2),
      ],
    ),
    puzzle(
      "Level 5 - Colors",
      5,
      &[
        (1, Across, "Color of the sky", "BLUE", 0, 0),
        (2, Across, "Color of grass", "GREEN", 1, 0),
        (3, Across, "Color of fire", "RED", 2, 0),
        (4, Across, "Color of sun", "GOLD", 3, 0),
        (5, Across, "Color of snow", "WHITE", 4, 0),
        (1, Down, "Dark shade", "BGRGW", 0, 0),
        (6, Down, "Light purple", "LREDO", 0, 1),
        (7, Down, "Mixed color", "UEEDI", 0, 2),
      ],
    ),
    puzzle(
      "Level 6 - Sports",
      6,
      &[
        (1, Across, "Olympic swimming stroke", "CRAWL", 0, 0),
        (2, Across, "Court net sport", "TENNIS", 2, 0),
        (3, Across, "Ice rink sport", "HOCKEY", 4, 0),
        (1, Down, "Track competition", "CTHKR", 0, 0),
        (4, Down, "Water sport paddle", "REOAO", 0, 1),
        (5, Down, "Goal scoring sport", "AISNC", 0, 2),
      ],
    ),
    puzzle(
      "Level 7 - Geography",
      6,
      &[
        (1, Across, "Largest continent", "ASIA", 0, 0),
        (2, Across, "Amazon country", "BRAZIL", 2, 0),
        (3, Across, "Island country", "JAPAN", 4, 0),
        (1, Down, "African desert", "ABAJ", 0, 0),
        (4, Down, "European river", "SRBRA", 0, 1),
        (5, Down, "Highest mountain range", "IIZAN", 0, 2),
      ],
    ),
    puzzle(
      "Level 8 - Science",
      6,
      &[
        (1, Across, "Basic unit of matter", "ATOM", 0, 0),
        (2, Across, "Force that pulls objects down", "GRAVITY", 2, 0),
        (3, Across, "Speed of light unit", "METER", 4, 0),
        (1, Down, "Chemical symbol H", "AGM", 0, 0),
        (4, Down, "Charged particle", "TRIAE", 0, 1),
        (5, Down, "Scientific test", "OAVEN", 0, 2),
      ],
    ),
    puzzle(
      "Level 9 - Technology",
      6,
      &[
        (1, Across, "Global network", "INTERNET", 0, 0),
        (2, Across, "Wireless protocol", "BLUETOOTH", 2, 0),
        (3, Across, "Mobile app store platform", "ANDROID", 4, 0),
        (1, Down, "Processing chip", "IBA", 0, 0),
        (4, Down, "Data storage", "NLOA", 0, 1),
        (5, Down, "Screen interface", "TTND", 0, 2),
      ],
    ),
    puzzle(
      "Level 10 - Master",
      7,
      &[
        (1, Across, "Musical instrument with keys", "PIANO", 0, 0),
        (2, Across, "Shakespeare's language", "ENGLISH", 2, 0),
        (3, Across, "Ancient Egyptian structure", "PYRAMID", 4, 0),
        (4, Across, "Space exploration agency", "NASA", 6, 0),
        (1, Down, "Literary masterpiece", "PEPN", 0, 0),
        (5, Down, "Artistic expression", "INGYA", 0, 1),
        (6, Down, "Scientific discovery", "ALSMA", 0, 2),
        (7, Down, "Historical period", "NGIIDS", 0, 3),
      ],
    ),
  ]
});

type ClueRow = (u32, Direction, &'static str, &'static str, usize, usize);

fn puzzle(title: &str, size: usize, clues: &[ClueRow]) -> PuzzleDefinition {
  let clues = clues
    .iter()
    .map(|&(number, direction, text, answer, row, col)| {
      ClueDefinition::new(number, direction, text, answer, (row, col))
    })
    .collect();
  PuzzleDefinition::new(title, size, clues)
}

/// Every level, in order. Level `n` is at index `n - 1`.
pub fn levels() -> &'static [PuzzleDefinition] {
  &LEVELS
}

/// The number of levels.
pub fn len() -> usize {
  LEVELS.len()
}

/// The given level, with out-of-range numbers clamped to the first or last level.
pub fn level(number: usize) -> &'static PuzzleDefinition {
  &LEVELS[number.clamp(1, len()) - 1]
}

/// The given level, if there is one.
pub fn level_checked(number: usize) -> Result<&'static PuzzleDefinition, Error> {
  number
    .checked_sub(1)
    .and_then(|index| LEVELS.get(index))
    .ok_or(Error::UnknownLevel(number))
}
