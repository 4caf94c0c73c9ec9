use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;

/// Piece-placement field plus side to move, the inverse of `parse_layout`.
pub fn generate_layout(grid: &Grid, active_color: Color) -> String {
    let side = match active_color {
        Color::White => "w",
        Color::Black => "b",
    };
    format!("{} {}", generate_board_field(grid), side)
}

pub fn generate_board_field(grid: &Grid) -> String {
    let mut out = String::new();

    for row in 0..grid.rows() {
        let mut empty_count = 0u8;

        for column in 0..grid.columns() {
            let square = SquarePosition { row, column };
            match grid.occupant_at(square).ok().flatten() {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push_str(&piece.descriptor().to_string());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row + 1 < grid.rows() {
            out.push('/');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::piece::Piece;

    #[test]
    fn empty_grid_is_all_eights() {
        assert_eq!(generate_board_field(&Grid::new()), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn pieces_are_written_with_color_case() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        grid.place(Piece::new(1, PieceKind::King, Color::Black), SquarePosition::new(0, 4)?)?;
        grid.place(Piece::new(2, PieceKind::King, Color::White), SquarePosition::new(7, 4)?)?;
        grid.place(Piece::new(3, PieceKind::Rook, Color::White), SquarePosition::new(7, 7)?)?;
        assert_eq!(generate_layout(&grid, Color::Black), "4k3/8/8/8/8/8/8/4K2R b");
        Ok(())
    }
}
