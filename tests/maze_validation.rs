//! Integration tests for the maze contract and text format.

use qmaze::{
    CellCode, Coordinate,
    error::Error,
    maze::{Maze, layouts},
};

#[test]
fn contract_surface_reports_size_and_cells() {
    let maze: Maze = "\
#####
#@.g#
#.#G#
#####
"
    .parse()
    .unwrap();

    assert_eq!(maze.size(), (4, 5));
    assert_eq!(maze.cell_at(Coordinate::new(0, 0)).unwrap(), CellCode::Wall);
    assert_eq!(
        maze.cell_at(Coordinate::new(1, 3)).unwrap(),
        CellCode::Goggles
    );
    assert_eq!(maze.cell_at(Coordinate::new(2, 3)).unwrap(), CellCode::Goal);
    assert_eq!(maze.start_marker(), Some(Coordinate::new(1, 1)));
    assert_eq!(maze.find_cell(CellCode::Goal), Some(Coordinate::new(2, 3)));
}

#[test]
fn off_grid_queries_fail_with_out_of_range() {
    let maze: Maze = "..G\n".parse().unwrap();
    for coord in [
        Coordinate::new(1, 0),
        Coordinate::new(0, 3),
        Coordinate::new(10, 10),
    ] {
        let err = maze.cell_at(coord).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }), "{coord}");
        assert!(maze.cell(coord).is_none());
    }
}

#[test]
fn malformed_text_is_rejected() {
    assert!(matches!("".parse::<Maze>(), Err(Error::EmptyMaze)));
    assert!(matches!(
        "...\n....\n".parse::<Maze>(),
        Err(Error::RaggedRow { .. })
    ));
    assert!(matches!(
        "..z\n".parse::<Maze>(),
        Err(Error::InvalidCellCharacter { character: 'z', .. })
    ));
    assert!(matches!(
        "@.\n.@\n".parse::<Maze>(),
        Err(Error::DuplicateStartMarker { .. })
    ));
}

#[test]
fn builtin_layouts_are_well_formed() {
    for (name, _) in layouts::catalog() {
        let maze = layouts::builtin(name).unwrap();
        let start = maze.start_marker().expect("layout start");
        let goal = maze.find_cell(CellCode::Goal).expect("layout goal");

        // Start and goal are usable: in bounds and not walls.
        assert!(maze.cell(start).is_some_and(|c| !c.is_wall()));
        assert_eq!(maze.cell(goal), Some(CellCode::Goal));
        assert_ne!(start, goal);
    }
}

#[test]
fn unknown_layout_is_an_error() {
    assert!(matches!(
        layouts::builtin("nope"),
        Err(Error::UnknownLayout { .. })
    ));
}
