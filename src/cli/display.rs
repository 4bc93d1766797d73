use crate::chess::executor::MoveRecord;
use crate::chess::{attack, Color, Piece, Position, Square};

/// Board rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub unicode: bool,
    pub show_coordinates: bool,
    pub perspective: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            unicode: true,
            show_coordinates: true,
            perspective: Color::White,
        }
    }
}

fn piece_symbol(piece: &Piece, unicode: bool) -> String {
    if unicode {
        piece.to_string()
    } else {
        piece.fen_char().to_string()
    }
}

/// Render the board inside a box-drawing grid.
///
/// From White's perspective rank 8 is at the top; from Black's, rank 1 is
/// at the top and files run h to a.
pub fn render_board(position: &Position, options: RenderOptions) -> String {
    let ranks: Vec<u8> = match options.perspective {
        Color::White => (0..8).rev().collect(),
        Color::Black => (0..8).collect(),
    };
    let files: Vec<u8> = match options.perspective {
        Color::White => (0..8).collect(),
        Color::Black => (0..8).rev().collect(),
    };

    let mut out = String::new();
    out.push_str("  ┌─┬─┬─┬─┬─┬─┬─┬─┐\n");

    for (row, &rank) in ranks.iter().enumerate() {
        let rank_label = if options.show_coordinates {
            format!("{}", rank + 1)
        } else {
            " ".to_string()
        };
        out.push_str(&format!("{} │", rank_label));

        for &file in &files {
            let symbol = position
                .get_piece(Square::new_unchecked(file, rank))
                .map(|piece| piece_symbol(&piece, options.unicode))
                .unwrap_or_else(|| " ".to_string());
            out.push_str(&format!("{}│", symbol));
        }

        if options.show_coordinates {
            out.push_str(&format!(" {}", rank + 1));
        }
        out.push('\n');

        if row < 7 {
            out.push_str("  ├─┼─┼─┼─┼─┼─┼─┼─┤\n");
        }
    }

    out.push_str("  └─┴─┴─┴─┴─┴─┴─┴─┘");
    if options.show_coordinates {
        let labels: Vec<String> = files
            .iter()
            .map(|&f| ((b'a' + f) as char).to_string())
            .collect();
        out.push_str(&format!("\n   {}", labels.join(" ")));
    }
    out
}

/// Side to move, move number, check and pending promotion
pub fn render_status(position: &Position) -> String {
    let mut lines = vec![
        format!("To move: {}", position.turn()),
        format!("Move #: {}", position.fullmove_number()),
    ];

    if position.halfmove_clock() > 0 {
        lines.push(format!(
            "Halfmove clock: {} (50-move rule)",
            position.halfmove_clock()
        ));
    }

    let turn = position.turn();
    if let Some(king) = attack::king_square(position, turn) {
        let checkers = attack::attackers(position, king, turn.opposite());
        if !checkers.is_empty() {
            let from: Vec<String> = checkers.iter().map(|sq| sq.to_string()).collect();
            lines.push(format!("{} is in check (from {})", turn, from.join(", ")));
        }
    }

    if let Some(square) = position.pending_promotion() {
        lines.push(format!(
            "Pawn on {} must promote: choose q, r, b or n",
            square
        ));
    }

    lines.join("\n")
}

/// Move history as numbered White/Black pairs
pub fn render_move_history(history: &[MoveRecord]) -> String {
    if history.is_empty() {
        return "No moves in history.".to_string();
    }

    let mut out = String::new();
    out.push_str("┌──────┬─────────┬─────────┐\n");
    out.push_str("│ Move │  White  │  Black  │\n");
    out.push_str("├──────┼─────────┼─────────┤\n");

    // A history that starts with Black to move gets a blank White cell
    let mut cells: Vec<String> = Vec::new();
    if history[0].piece.color == Color::Black {
        cells.push("...".to_string());
    }
    cells.extend(history.iter().map(|record| record.mv.to_string()));

    let first_move = history[0].prior_fullmove_number as usize;
    for (i, pair) in cells.chunks(2).enumerate() {
        let white = pair.first().map(String::as_str).unwrap_or("-");
        let black = pair.get(1).map(String::as_str).unwrap_or("-");
        out.push_str(&format!(
            "│ {:>4} │ {:^7} │ {:^7} │\n",
            first_move + i,
            white,
            black
        ));
    }

    out.push_str("└──────┴─────────┴─────────┘");
    out
}
