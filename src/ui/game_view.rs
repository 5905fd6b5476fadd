use super::board_widget;
use crate::game::rules::MAX_MOVES;
use crate::game::{GameState, Side};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Text shown in the message block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
    /// Game result
    Banner(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) | Notice::Banner(text) => text,
        }
    }

    fn style(&self) -> Style {
        match self {
            Notice::Info(_) => Style::default().fg(Color::Yellow),
            Notice::Error(_) => Style::default().fg(Color::Red),
            Notice::Banner(_) => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        }
    }
}

pub fn render(
    frame: &mut Frame,
    state: &GameState,
    finished: bool,
    prompt: &str,
    notice: Option<&Notice>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Prompt
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, state, finished, chunks[0]);
    board_widget::render_board(frame, state.board(), chunks[1]);
    render_message(frame, notice, chunks[2]);
    render_prompt(frame, prompt, chunks[3]);
    render_controls(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, state: &GameState, finished: bool, area: Rect) {
    let [white, black] = state.players();
    let side = state.current_side();
    let color = match side {
        Side::White => Color::White,
        Side::Black => Color::Cyan,
    };

    let status = if finished {
        "Game over".to_string()
    } else {
        format!(
            "Turn: {} ({})  |  Moves: {}/{}",
            state.current_player(),
            side.name(),
            state.move_count(),
            MAX_MOVES
        )
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("TacTickle: {white} (White) vs {black} (Black)")),
        );

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, notice: Option<&Notice>, area: Rect) {
    let (text, style) = match notice {
        Some(notice) => (notice.text(), notice.style()),
        None => ("", Style::default()),
    };
    let msg_widget = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_prompt(frame: &mut Frame, prompt: &str, area: Rect) {
    let widget = Paragraph::new(Line::from(prompt.to_string()))
        .block(Block::default().borders(Borders::ALL).title("Input"));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(
        "Cell + Enter: pick  |  w/a/s/d or arrows: slide  |  Esc: back/quit",
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
