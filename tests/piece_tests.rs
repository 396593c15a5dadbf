//! Piece tests - catalog masks, coordinate mapping and movement

use tui_bitris::core::{collides, shape_encoding, Field, Game, Piece};
use tui_bitris::types::{Intent, Rotation, ShapeKind, FIELD_WIDTH};

#[test]
fn test_masks_match_catalog() {
    assert_eq!(shape_encoding(ShapeKind::T, Rotation::R0), 19968);
    assert_eq!(shape_encoding(ShapeKind::J, Rotation::R3), 17600);
    assert_eq!(shape_encoding(ShapeKind::O, Rotation::R2), 26112);
    assert_eq!(shape_encoding(ShapeKind::I, Rotation::R1), 17476);
}

#[test]
fn test_every_piece_has_four_cells() {
    for shape in ShapeKind::ALL {
        for r in 0..4 {
            let piece = Piece {
                rotation: Rotation::from_index(r),
                ..Piece::spawn(shape)
            };
            assert_eq!(piece.cells().len(), 4, "{shape:?} rotation {r}");
        }
    }
}

#[test]
fn test_i_piece_coordinates() {
    let piece = Piece {
        x: 0,
        y: 0,
        ..Piece::spawn(ShapeKind::I)
    };
    // Horizontal I lies on local row 2
    assert_eq!(piece.cells().as_slice(), &[(0, 2), (1, 2), (2, 2), (3, 2)]);

    let vertical = piece.rotated_cw();
    assert_eq!(vertical.cells().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    assert_eq!(vertical.bottom(), 3);
}

#[test]
fn test_rotation_wraps_both_ways() {
    let piece = Piece::spawn(ShapeKind::J);

    let cw = (0..4).fold(piece, |p, _| p.rotated_cw());
    let ccw = (0..4).fold(piece, |p, _| p.rotated_ccw());
    assert_eq!(cw, piece);
    assert_eq!(ccw, piece);
    assert_eq!(piece.rotated_ccw().rotation, Rotation::R3);
}

#[test]
fn test_quit_is_not_a_movement() {
    assert_eq!(Piece::spawn(ShapeKind::S).with_intent(Intent::Quit), None);
}

#[test]
fn test_move_left_stops_at_wall() {
    let mut game = Game::new(7);

    while game.apply_intent(Intent::MoveLeft) {}

    let min_x = game.piece().cells().iter().map(|&(x, _)| x).min();
    assert_eq!(min_x, Some(0));
    // Rejected again without moving
    let before = game.piece();
    assert!(!game.apply_intent(Intent::MoveLeft));
    assert_eq!(game.piece(), before);
}

#[test]
fn test_move_right_stops_at_wall() {
    let mut game = Game::new(7);

    while game.apply_intent(Intent::MoveRight) {}

    let max_x = game.piece().cells().iter().map(|&(x, _)| x).max();
    assert_eq!(max_x, Some(FIELD_WIDTH - 1));
}

#[test]
fn test_rotation_in_open_space_cycles() {
    let mut game = Game::new(99);
    let start = game.piece();

    for _ in 0..4 {
        assert!(game.apply_intent(Intent::RotateCw));
    }
    assert_eq!(game.piece(), start);

    assert!(game.apply_intent(Intent::RotateCcw));
    assert_eq!(game.piece().rotation, Rotation::R3);
}

#[test]
fn test_blocked_rotation_is_discarded() {
    // A locked cell just under the spawn row: a horizontal I fits above it,
    // the vertical I through column 5 does not.
    let mut field = Field::new();
    field.set(5, 1, true).unwrap();
    let seed = (1..10_000)
        .find(|&s| Game::new(s).piece().shape == ShapeKind::I)
        .expect("some seed opens with an I");
    let mut game = Game::with_field(seed, field);
    let before = game.piece();
    assert!(!collides(&field, &before));

    assert!(!game.apply_intent(Intent::RotateCw));
    assert_eq!(game.piece(), before);
    assert!(!game.apply_intent(Intent::RotateCcw));
    assert_eq!(game.piece(), before);
}
