//! Built-in maze layouts for the CLI and tests.

use crate::{
    error::{Error, Result},
    maze::grid::Maze,
};

/// An unobstructed field. Useful as a learning smoke test: every policy
/// should reach the goal here once exploration settles.
const OPEN: &str = "\
@......
.......
.......
.......
......G
";

/// Walled rooms with both bonus items and both hazards on the way.
const ROOMS: &str = "\
#########
#@......#
#.##.##.#
#.#g..#.#
#.##p##.#
#f.....G#
#########
";

/// A two-corridor gauntlet: hazards on the short path, bonuses on the long.
const TRIALS: &str = "\
###########
#@..f..p..#
#.#######.#
#...g...sG#
###########
";

/// Built-in layout names and one-line descriptions.
pub fn catalog() -> &'static [(&'static str, &'static str)] {
    &[
        ("open", "unobstructed 5x7 field, goal in the far corner"),
        ("rooms", "walled 7x9 rooms with items and hazards"),
        ("trials", "two-corridor gauntlet trading hazards for bonuses"),
    ]
}

/// Look up a built-in layout by name.
///
/// # Errors
///
/// Returns [`Error::UnknownLayout`] listing the known names.
pub fn builtin(name: &str) -> Result<Maze> {
    let text = match name {
        "open" => OPEN,
        "rooms" => ROOMS,
        "trials" => TRIALS,
        _ => {
            return Err(Error::UnknownLayout {
                name: name.to_string(),
                expected: catalog()
                    .iter()
                    .map(|(n, _)| *n)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
    };
    text.parse()
}
