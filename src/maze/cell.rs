//! Cell codes and their text form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a single maze cell contains.
///
/// Exactly one meaning per code. The numeric codes match the maze file
/// format of the original game; the char form is what [`crate::maze::Maze`]
/// parses and renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellCode {
    Empty,
    Wall,
    /// Bonus item: goggles.
    Goggles,
    /// Bonus item: speed potion.
    SpeedPotion,
    /// Hazard: fog.
    Fog,
    /// Hazard: slowpoke potion.
    SlowpokePotion,
    Goal,
}

impl CellCode {
    /// Numeric code as stored in maze grids.
    pub fn code(self) -> u8 {
        match self {
            CellCode::Empty => 0,
            CellCode::Wall => 1,
            CellCode::Goggles => 2,
            CellCode::SpeedPotion => 3,
            CellCode::Fog => 4,
            CellCode::SlowpokePotion => 5,
            CellCode::Goal => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<CellCode> {
        match code {
            0 => Some(CellCode::Empty),
            1 => Some(CellCode::Wall),
            2 => Some(CellCode::Goggles),
            3 => Some(CellCode::SpeedPotion),
            4 => Some(CellCode::Fog),
            5 => Some(CellCode::SlowpokePotion),
            6 => Some(CellCode::Goal),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            CellCode::Empty => '.',
            CellCode::Wall => '#',
            CellCode::Goggles => 'g',
            CellCode::SpeedPotion => 's',
            CellCode::Fog => 'f',
            CellCode::SlowpokePotion => 'p',
            CellCode::Goal => 'G',
        }
    }

    /// Parse a maze text character. The start marker `@` is not a cell code;
    /// the grid parser handles it separately.
    pub fn from_char(c: char) -> Option<CellCode> {
        match c {
            '.' | ' ' => Some(CellCode::Empty),
            '#' => Some(CellCode::Wall),
            'g' => Some(CellCode::Goggles),
            's' => Some(CellCode::SpeedPotion),
            'f' => Some(CellCode::Fog),
            'p' => Some(CellCode::SlowpokePotion),
            'G' => Some(CellCode::Goal),
            _ => None,
        }
    }

    pub fn is_wall(self) -> bool {
        self == CellCode::Wall
    }
}

impl fmt::Display for CellCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
