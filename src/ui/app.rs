use std::io;
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Frame, Terminal};
use tracing::{debug, info, warn};

use super::game_view::{self, Notice};
use crate::game::{validator, Coordinate, Direction, GameEngine, MoveOutcome, WinRecord};
use crate::persistence::SaveManager;
use crate::records::RecordSink;

/// Longest text the input line accepts.
const MAX_INPUT: usize = 32;

/// How an interactive game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Won(WinRecord),
    Draw,
    /// The players left; `saved` is the save file if they kept the game.
    Quit { saved: Option<PathBuf> },
}

/// What the input line is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompt {
    Piece,
    Direction(Coordinate),
    ConfirmSave,
    SaveName,
    GameOver,
}

/// One interactive game: key handling, moves, and what happens at the end.
pub struct App<'a> {
    engine: GameEngine,
    saves: Option<&'a SaveManager>,
    records: &'a mut dyn RecordSink,
    prompt: Prompt,
    input: String,
    notice: Option<Notice>,
    end: Option<SessionEnd>,
    should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(
        engine: GameEngine,
        saves: Option<&'a SaveManager>,
        records: &'a mut dyn RecordSink,
    ) -> Self {
        App {
            engine,
            saves,
            records,
            prompt: Prompt::Piece,
            input: String::new(),
            notice: None,
            end: None,
            should_quit: false,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// How the game ended, once it has.
    pub fn end(&self) -> Option<&SessionEnd> {
        self.end.as_ref()
    }

    /// Main application loop. Returns once the game is won, drawn, or abandoned
    /// and the players have dismissed the last screen.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<SessionEnd> {
        info!(
            white = %self.engine.state().players()[0],
            black = %self.engine.state().players()[1],
            moves = self.engine.state().move_count(),
            "session started"
        );

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }

        Ok(self.end.clone().unwrap_or(SessionEnd::Quit { saved: None }))
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        // Clear message on any key press
        self.notice = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if self.end.is_none() {
                self.end = Some(SessionEnd::Quit { saved: None });
            }
            self.should_quit = true;
            return;
        }

        match self.prompt {
            Prompt::Piece => match key.code {
                KeyCode::Esc => self.begin_exit(),
                code => {
                    if let Some(line) = self.edit_input(code) {
                        self.submit_piece(&line);
                    }
                }
            },
            Prompt::Direction(from) => self.handle_direction_key(from, key.code),
            Prompt::ConfirmSave => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.prompt = Prompt::SaveName,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.leave(None),
                _ => {}
            },
            Prompt::SaveName => match key.code {
                KeyCode::Esc => self.leave(None),
                code => {
                    if let Some(name) = self.edit_input(code) {
                        self.save_and_leave(&name);
                    }
                }
            },
            Prompt::GameOver => self.should_quit = true,
        }
    }

    /// Line editing for text prompts; returns the line when Enter is pressed.
    fn edit_input(&mut self, code: KeyCode) -> Option<String> {
        match code {
            KeyCode::Char(c) => {
                if self.input.chars().count() < MAX_INPUT {
                    self.input.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter => Some(std::mem::take(&mut self.input)),
            _ => None,
        }
    }

    fn submit_piece(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if is_quit(line) {
            self.begin_exit();
            return;
        }

        let from = match Coordinate::from_notation(line) {
            Ok(coord) => coord,
            Err(err) => {
                self.notice = Some(Notice::Error(format!("{err}. Use A1-D4.")));
                return;
            }
        };

        let color = self.engine.current_player_color();
        let board = self.engine.state().board();
        if !validator::can_select_piece(board, from, color) {
            let found = board.get(from);
            self.notice = Some(Notice::Error(format!(
                "that is not your piece: {from} holds {found}, you play {color}"
            )));
            return;
        }

        self.prompt = Prompt::Direction(from);
    }

    fn handle_direction_key(&mut self, from: Coordinate, code: KeyCode) {
        let direction = match code {
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            KeyCode::Esc => {
                self.prompt = Prompt::Piece;
                self.notice = Some(Notice::Info("Move cancelled".to_string()));
                return;
            }
            KeyCode::Char(c) => match c.to_string().parse::<Direction>() {
                Ok(direction) => direction,
                Err(_) => {
                    self.notice = Some(Notice::Error(
                        "unknown direction. Use w, s, a or d.".to_string(),
                    ));
                    return;
                }
            },
            _ => return,
        };

        self.prompt = Prompt::Piece;
        let player = self.engine.state().current_player().to_string();
        let outcome = self.engine.make_move(from, direction);
        let message = outcome.message();

        match outcome {
            MoveOutcome::Rejected(err) => {
                debug!(%from, %direction, error = %err, "move rejected");
                self.notice = Some(Notice::Error(message));
            }
            MoveOutcome::Continue => {
                debug!(%player, %from, %direction, "move applied");
                self.notice = Some(Notice::Info(format!("{player} moved {from} {direction}")));
            }
            MoveOutcome::Win(record) => self.finish_won(record, message),
            MoveOutcome::Draw => self.finish_draw(message),
        }
    }

    fn finish_won(&mut self, record: WinRecord, banner: String) {
        info!(winner = %record.winner, moves = record.move_count, "game won");
        self.notice = Some(match self.records.record_win(&record) {
            Ok(()) => Notice::Banner(format!("{banner} Press any key to exit.")),
            Err(err) => {
                warn!(error = %err, "failed to store match record");
                Notice::Error(format!("{banner} Could not store the match record: {err}"))
            }
        });
        self.end = Some(SessionEnd::Won(record));
        self.prompt = Prompt::GameOver;
    }

    fn finish_draw(&mut self, banner: String) {
        info!(moves = self.engine.state().move_count(), "game drawn");
        self.notice = Some(Notice::Banner(format!("{banner} Press any key to exit.")));
        self.end = Some(SessionEnd::Draw);
        self.prompt = Prompt::GameOver;
    }

    /// Ask about saving when a save store is attached, otherwise leave.
    fn begin_exit(&mut self) {
        if self.saves.is_some() {
            self.prompt = Prompt::ConfirmSave;
        } else {
            self.leave(None);
        }
    }

    fn save_and_leave(&mut self, name: &str) {
        let Some(saves) = self.saves else {
            self.leave(None);
            return;
        };

        match saves.save(self.engine.state(), name) {
            Ok(path) => self.leave(Some(path)),
            Err(err) => {
                warn!(error = %err, "failed to save game");
                self.notice = Some(Notice::Error(format!("could not save the game: {err}")));
                self.prompt = Prompt::ConfirmSave;
            }
        }
    }

    fn leave(&mut self, saved: Option<PathBuf>) {
        self.end = Some(SessionEnd::Quit { saved });
        self.should_quit = true;
    }

    fn prompt_line(&self) -> String {
        match self.prompt {
            Prompt::Piece => format!("Piece to move (e.g. A1), or 'quit': {}", self.input),
            Prompt::Direction(from) => {
                format!("Move {from}: w=up s=down a=left d=right, Esc to cancel")
            }
            Prompt::ConfirmSave => "Save the game? (y/n)".to_string(),
            Prompt::SaveName => format!("Save name (blank for automatic): {}", self.input),
            Prompt::GameOver => "Press any key to exit".to_string(),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        game_view::render(
            frame,
            self.engine.state(),
            self.engine.is_finished(),
            &self.prompt_line(),
            self.notice.as_ref(),
        );
    }
}

fn is_quit(input: &str) -> bool {
    ["quit", "exit", "q"]
        .iter()
        .any(|word| input.eq_ignore_ascii_case(word))
}
