use super::*;
use crate::options::BoardOptions;

fn board_with(positions: &[(f64, f64)]) -> (Board, Vec<SquareId>) {
    let mut board = Board::new(BoardOptions::default());
    let ids = positions
        .iter()
        .map(|&(x, y)| board.add_square(Point::new(x, y)))
        .collect();
    (board, ids)
}

// =============================================================
// Body
// =============================================================

#[test]
fn empty_board_hits_nothing() {
    let (board, _) = board_with(&[]);
    assert!(hit_test(Point::new(10.0, 10.0), &board).is_none());
}

#[test]
fn body_hit_inside() {
    let (board, ids) = board_with(&[(100.0, 100.0)]);
    let hit = hit_test(Point::new(125.0, 125.0), &board).unwrap();
    assert_eq!(hit, Hit { square_id: ids[0].clone(), part: HitPart::Body });
}

#[test]
fn body_edge_is_not_a_hit() {
    let (board, _) = board_with(&[(100.0, 100.0)]);
    assert!(hit_test(Point::new(100.0, 150.0), &board).is_none());
}

#[test]
fn body_one_unit_inside_is_a_hit() {
    let (board, _) = board_with(&[(100.0, 100.0)]);
    assert!(hit_test(Point::new(101.0, 149.0), &board).is_some());
}

#[test]
fn later_square_wins_overlap() {
    let (board, ids) = board_with(&[(100.0, 100.0), (120.0, 120.0)]);
    let hit = hit_test(Point::new(130.0, 130.0), &board).unwrap();
    assert_eq!(hit.square_id, ids[1]);
    let hit = hit_test(Point::new(110.0, 110.0), &board).unwrap();
    assert_eq!(hit.square_id, ids[0]);
}

// =============================================================
// Sockets
// =============================================================

#[test]
fn hidden_socket_is_not_hit() {
    let (board, _) = board_with(&[(100.0, 100.0)]);
    // Top socket center is (125, 95); disabled and not selected.
    assert!(hit_test(Point::new(125.0, 95.0), &board).is_none());
}

#[test]
fn selected_square_exposes_disabled_sockets() {
    let (mut board, ids) = board_with(&[(100.0, 100.0)]);
    board.select(Some(ids[0].clone()));
    let hit = hit_test(Point::new(125.0, 95.0), &board).unwrap();
    assert_eq!(hit.part, HitPart::Socket(SocketAlignment::Top));
}

#[test]
fn enabled_socket_is_hit_without_selection() {
    let (mut board, ids) = board_with(&[(100.0, 100.0)]);
    board.set_socket_enabled(&ids[0], SocketAlignment::Left, true);
    let hit = hit_test(Point::new(96.0, 124.0), &board).unwrap();
    assert_eq!(hit.part, HitPart::Socket(SocketAlignment::Left));
}

#[test]
fn socket_boundary_is_not_a_hit() {
    let (mut board, ids) = board_with(&[(100.0, 100.0)]);
    board.select(Some(ids[0].clone()));
    // Right socket at (155, 125), radius 5: x = 160 lies on the boundary.
    assert!(hit_test(Point::new(160.0, 125.0), &board).is_none());
}

#[test]
fn newer_body_beats_older_socket() {
    let (mut board, ids) = board_with(&[(100.0, 100.0), (110.0, 60.0)]);
    board.set_socket_enabled(&ids[0], SocketAlignment::Top, true);
    let hit = hit_test(Point::new(125.0, 95.0), &board).unwrap();
    assert_eq!(hit, Hit { square_id: ids[1].clone(), part: HitPart::Body });
}

// =============================================================
// over_selected
// =============================================================

#[test]
fn over_selected_requires_selection() {
    let (mut board, ids) = board_with(&[(100.0, 100.0)]);
    assert!(over_selected(Point::new(125.0, 125.0), &board).is_none());
    board.select(Some(ids[0].clone()));
    assert_eq!(over_selected(Point::new(125.0, 125.0), &board), Some(ids[0].clone()));
    assert!(over_selected(Point::new(300.0, 300.0), &board).is_none());
}
