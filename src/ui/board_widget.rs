use crate::game::{Board, CellState, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Symbol and color for one cell.
pub fn cell_style(cell: CellState) -> (&'static str, Style) {
    match cell {
        CellState::Empty => (" \u{b7} ", Style::default().fg(Color::DarkGray)),
        CellState::White => (
            " \u{25cb} ",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        CellState::Black => (" \u{25cf} ", Style::default().fg(Color::Cyan)),
    }
}

/// File letters on top, then one line per rank with rank 1 first.
pub fn board_lines(board: &Board) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let mut lines = Vec::with_capacity(ROWS + 1);

    let mut header = vec![Span::raw("   ")];
    for column in 0..COLS {
        let letter = (b'A' + column as u8) as char;
        header.push(Span::styled(format!(" {letter} "), label));
    }
    lines.push(Line::from(header));

    for row in 0..ROWS {
        let mut spans = vec![Span::styled(format!(" {} ", row + 1), label)];
        for column in 0..COLS {
            let cell = board
                .cell(row as i32, column as i32)
                .unwrap_or(CellState::Empty);
            let (symbol, style) = cell_style(cell);
            spans.push(Span::styled(symbol, style));
        }
        lines.push(Line::from(spans));
    }

    lines
}

/// Render the board in a bordered block, centered in `area`.
pub fn render_board(frame: &mut Frame, board: &Board, area: Rect) {
    let widget = Paragraph::new(board_lines(board))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Board"));
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_initial_board_lines() {
        let lines = board_lines(&Board::initial());
        assert_eq!(lines.len(), 5);
        assert_eq!(text(&lines[0]), "    A  B  C  D ");
        assert_eq!(text(&lines[1]), " 1  \u{25cb}  \u{25cf}  \u{25cb}  \u{25cf} ");
        assert_eq!(text(&lines[2]), " 2  \u{b7}  \u{b7}  \u{b7}  \u{b7} ");
        assert_eq!(text(&lines[4]), " 4  \u{25cf}  \u{25cb}  \u{25cf}  \u{25cb} ");
    }

    #[test]
    fn test_pieces_are_colored_by_side() {
        let (_, white) = cell_style(CellState::White);
        let (_, black) = cell_style(CellState::Black);
        assert_ne!(white.fg, black.fg);
    }
}
