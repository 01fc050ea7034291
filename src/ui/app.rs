//! Application state shared by the two input modes.

use crate::ai::{AiError, AiSession, SolveDone, SolveJob};
use crate::calculator::{Keypad, KeypadAction, copy_to_clipboard};
use crate::history::{History, SharedHistory};

use super::keys::{Command, Mode};

pub struct App {
    mode: Mode,
    keypad: Keypad,
    ai: AiSession,
    history: SharedHistory,
    show_history: bool,
    /// Index of the first history item shown in the overlay.
    history_scroll: usize,
    /// Transient message for the status line.
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(mode: Mode) -> Self {
        let history = History::shared();
        Self {
            mode,
            keypad: Keypad::new(history.clone()),
            ai: AiSession::new(history.clone()),
            history,
            show_history: false,
            history_scroll: 0,
            status: None,
            should_quit: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn ai(&self) -> &AiSession {
        &self.ai
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }

    pub fn show_history(&self) -> bool {
        self.show_history
    }

    pub fn history_scroll(&self) -> usize {
        self.history_scroll
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply a command. Returns a job when a solve should be started.
    pub fn handle_command(&mut self, command: Command) -> Option<SolveJob> {
        self.status = None;

        if self.show_history {
            match command {
                Command::ToggleHistory
                | Command::Erase
                | Command::Keypad(KeypadAction::Clear) => self.show_history = false,
                Command::ClearHistory => {
                    self.history.borrow_mut().clear();
                    self.history_scroll = 0;
                }
                Command::ScrollUp => self.history_scroll = self.history_scroll.saturating_sub(1),
                Command::ScrollDown => {
                    let last = self.history.borrow().len().saturating_sub(1);
                    self.history_scroll = (self.history_scroll + 1).min(last);
                }
                Command::Quit => self.should_quit = true,
                _ => {}
            }
            return None;
        }

        match command {
            Command::Keypad(action) => self.keypad.apply(action),
            Command::Type(c) => self.ai.insert_char(c),
            Command::Newline => self.ai.insert_newline(),
            Command::Backspace => self.ai.backspace(),
            Command::Submit => return self.submit(),
            Command::Erase => self.ai.erase(),
            Command::SwitchMode => self.mode = self.mode.toggle(),
            Command::ToggleHistory => {
                self.show_history = true;
                self.history_scroll = 0;
            }
            Command::ClearHistory | Command::ScrollUp | Command::ScrollDown => {}
            Command::Copy => self.copy_result(),
            Command::Quit => self.should_quit = true,
        }
        None
    }

    /// Show a finished solve.
    pub fn finish_solve(&mut self, done: SolveDone) {
        self.ai.complete(done);
    }

    /// Fail the pending solve because the worker can no longer answer it.
    pub fn abandon_solve(&mut self, error: AiError) {
        self.ai.abandon(error);
    }

    fn submit(&mut self) -> Option<SolveJob> {
        let job = self.ai.submit();
        if let Some(job) = &job {
            tracing::info!(chars = job.prompt.chars().count(), "Submitting prompt");
            tracing::debug!(prompt = %job.prompt, "Prompt text");
        }
        job
    }

    /// The raw text that a copy would put on the clipboard.
    pub fn copy_text(&self) -> Option<String> {
        match self.mode {
            Mode::Calc => self.keypad.state().current_operand.clone(),
            Mode::Ai => self
                .ai
                .response()
                .filter(|response| !response.is_error())
                .map(|response| response.result.clone()),
        }
    }

    fn copy_result(&mut self) {
        let Some(text) = self.copy_text() else {
            return;
        };
        self.status = Some(match copy_to_clipboard(&text) {
            Ok(()) => format!("Copied {}", text),
            Err(e) => {
                tracing::error!("{:#}", e);
                "Clipboard unavailable".to_string()
            }
        });
    }
}
