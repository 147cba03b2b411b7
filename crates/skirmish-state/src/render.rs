//! Text rendering of a coalesced board from one player's point of view.

use skirmish_board::{Coordinate, Dimensions};

use crate::{CoalescedBoard, CoalescedCell, PlayerId, PlayerStatus};

/// Renders the picture a single viewer sees.
///
/// Glyphs:
/// - `#` — wall;
/// - space — walkable cell with no players;
/// - `@` — the viewer, alive (any other occupants of the cell are hidden);
/// - `&` — the viewer, dead;
/// - `x` — a cell whose occupants are all dead (viewer elsewhere);
/// - `1`–`9` — that many alive occupants (dead ones are not counted);
/// - `*` — more than nine alive occupants.
///
/// Rows are emitted from the highest row index down to row 0, so the
/// printed picture has a bottom-left visual origin even though storage
/// coordinates are top-left. Every row ends with `\n`.
pub fn render_view(
    board_state: &CoalescedBoard,
    dimensions: Dimensions,
    viewer: &PlayerId,
) -> String {
    // +1 per row for the newline.
    let mut out = String::with_capacity(dimensions.rows * (dimensions.cols + 1));
    for row in (0..dimensions.rows).rev() {
        for col in 0..dimensions.cols {
            let glyph = board_state
                .get(&Coordinate::new(row, col))
                .map_or(' ', |cell| render_cell(cell, viewer));
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn render_cell(cell: &CoalescedCell, viewer: &PlayerId) -> char {
    let players = match cell {
        CoalescedCell::Wall => return '#',
        CoalescedCell::Floor => return ' ',
        CoalescedCell::Players(players) => players,
    };

    if let Some(status) = players.get(viewer) {
        return match status {
            PlayerStatus::Alive => '@',
            PlayerStatus::Dead => '&',
        };
    }

    match cell.alive_count() {
        0 => 'x',
        n @ 1..=9 => char::from_digit(n as u32, 10).expect("single digit"),
        _ => '*',
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn viewer() -> PlayerId {
        PlayerId::new("me")
    }

    fn occupants(entries: &[(&str, PlayerStatus)]) -> CoalescedCell {
        CoalescedCell::Players(
            entries
                .iter()
                .map(|(id, status)| (PlayerId::new(*id), *status))
                .collect(),
        )
    }

    /// A 3x3 board_state with walls on the border cells and a single
    /// floor cell at (1, 1).
    fn ring() -> (CoalescedBoard, Dimensions) {
        let dims = Dimensions { rows: 3, cols: 3 };
        let mut board_state = HashMap::new();
        for row in 0..3 {
            for col in 0..3 {
                let cell = if row == 1 && col == 1 {
                    CoalescedCell::Floor
                } else {
                    CoalescedCell::Wall
                };
                board_state.insert(Coordinate::new(row, col), cell);
            }
        }
        (board_state, dims)
    }

    #[test]
    fn test_render_walls_and_floor() {
        let (board_state, dims) = ring();
        assert_eq!(render_view(&board_state, dims, &viewer()), "###\n# #\n###\n");
    }

    #[test]
    fn test_render_viewer_alive_hides_other_occupants() {
        let (mut board_state, dims) = ring();
        board_state.insert(
            Coordinate::new(1, 1),
            occupants(&[
                ("me", PlayerStatus::Alive),
                ("other", PlayerStatus::Alive),
                ("corpse", PlayerStatus::Dead),
            ]),
        );
        assert_eq!(render_view(&board_state, dims, &viewer()), "###\n#@#\n###\n");
    }

    #[test]
    fn test_render_viewer_dead() {
        let (mut board_state, dims) = ring();
        board_state.insert(
            Coordinate::new(1, 1),
            occupants(&[("me", PlayerStatus::Dead), ("other", PlayerStatus::Alive)]),
        );
        assert_eq!(render_view(&board_state, dims, &viewer()), "###\n#&#\n###\n");
    }

    #[test]
    fn test_render_all_dead_cell() {
        let (mut board_state, dims) = ring();
        board_state.insert(
            Coordinate::new(1, 1),
            occupants(&[("a", PlayerStatus::Dead), ("b", PlayerStatus::Dead)]),
        );
        assert_eq!(render_view(&board_state, dims, &viewer()), "###\n#x#\n###\n");
    }

    #[test]
    fn test_render_alive_count_digit() {
        let (mut board_state, dims) = ring();
        board_state.insert(
            Coordinate::new(1, 1),
            occupants(&[
                ("a", PlayerStatus::Alive),
                ("b", PlayerStatus::Alive),
                ("c", PlayerStatus::Dead),
            ]),
        );
        // Dead occupants are not counted.
        assert_eq!(render_view(&board_state, dims, &viewer()), "###\n#2#\n###\n");
    }

    #[test]
    fn test_render_more_than_nine_alive() {
        let (mut board_state, dims) = ring();
        let entries: Vec<(String, PlayerStatus)> = (0..10)
            .map(|i| (format!("p{i}"), PlayerStatus::Alive))
            .collect();
        board_state.insert(
            Coordinate::new(1, 1),
            CoalescedCell::Players(
                entries
                    .into_iter()
                    .map(|(id, status)| (PlayerId::new(id), status))
                    .collect(),
            ),
        );
        assert_eq!(render_view(&board_state, dims, &viewer()), "###\n#*#\n###\n");
    }

    #[test]
    fn test_render_prints_row_zero_last() {
        let dims = Dimensions { rows: 2, cols: 1 };
        let mut board_state = HashMap::new();
        board_state.insert(Coordinate::new(0, 0), CoalescedCell::Wall);
        board_state.insert(Coordinate::new(1, 0), CoalescedCell::Floor);
        // Row 1 (floor) prints first, row 0 (wall) last.
        assert_eq!(render_view(&board_state, dims, &viewer()), " \n#\n");
    }
}
