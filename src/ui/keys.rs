//! Key bindings.
//!
//! Maps terminal key events to application commands. The same key can mean
//! different things in the two modes: in calculator mode `n` negates, in AI
//! mode it is just a letter of the prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::calculator::{KeypadAction, Operation};

/// Which input surface is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Standard keypad.
    #[default]
    Calc,
    /// Free-text AI solver.
    Ai,
}

impl Mode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Calc => Self::Ai,
            Self::Ai => Self::Calc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Calc => "Calc",
            Self::Ai => "AI",
        }
    }
}

/// Something the user asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// A keypad button press.
    Keypad(KeypadAction),
    /// Type a character into the prompt.
    Type(char),
    Newline,
    Backspace,
    Submit,
    /// Clear the prompt and the shown answer.
    Erase,
    SwitchMode,
    ToggleHistory,
    ClearHistory,
    /// Move the history overlay towards newer items.
    ScrollUp,
    /// Move the history overlay towards older items.
    ScrollDown,
    /// Copy the current result to the clipboard.
    Copy,
    Quit,
}

/// Translate a key event into a command for the given mode.
pub fn command_for(key: KeyEvent, mode: Mode) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('o') => Some(Command::ToggleHistory),
            KeyCode::Char('d') => Some(Command::ClearHistory),
            KeyCode::Char('y') => Some(Command::Copy),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => return Some(Command::SwitchMode),
        KeyCode::Up | KeyCode::PageUp => return Some(Command::ScrollUp),
        KeyCode::Down | KeyCode::PageDown => return Some(Command::ScrollDown),
        _ => {}
    }

    match mode {
        Mode::Calc => calc_command(key.code),
        Mode::Ai => ai_command(key),
    }
}

fn calc_command(code: KeyCode) -> Option<Command> {
    let action = match code {
        KeyCode::Char(c @ ('0'..='9' | '.')) => KeypadAction::AddDigit(c),
        KeyCode::Char(',') => KeypadAction::AddDigit('.'),
        KeyCode::Char('+') => KeypadAction::ChooseOperation(Operation::Add),
        KeyCode::Char('-') => KeypadAction::ChooseOperation(Operation::Subtract),
        KeyCode::Char('*' | 'x' | 'X' | '×') => KeypadAction::ChooseOperation(Operation::Multiply),
        KeyCode::Char('/' | '÷') => KeypadAction::ChooseOperation(Operation::Divide),
        KeyCode::Char('=') | KeyCode::Enter => KeypadAction::Evaluate,
        KeyCode::Char('%') => KeypadAction::Percentage,
        KeyCode::Char('n' | 'N') => KeypadAction::Negate,
        KeyCode::Backspace => KeypadAction::Delete,
        KeyCode::Esc | KeyCode::Delete => KeypadAction::Clear,
        KeyCode::Char('q') => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Keypad(action))
}

fn ai_command(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
        {
            Some(Command::Newline)
        }
        KeyCode::Enter => Some(Command::Submit),
        KeyCode::Backspace => Some(Command::Backspace),
        KeyCode::Esc => Some(Command::Erase),
        KeyCode::Char(c) => Some(Command::Type(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn operation(op: Operation) -> Option<Command> {
        Some(Command::Keypad(KeypadAction::ChooseOperation(op)))
    }

    #[test]
    fn test_calc_digits_and_operators() {
        assert_eq!(
            command_for(key(KeyCode::Char('7')), Mode::Calc),
            Some(Command::Keypad(KeypadAction::AddDigit('7')))
        );
        assert_eq!(
            command_for(key(KeyCode::Char('x')), Mode::Calc),
            operation(Operation::Multiply)
        );
        assert_eq!(
            command_for(key(KeyCode::Char('/')), Mode::Calc),
            operation(Operation::Divide)
        );
        assert_eq!(
            command_for(key(KeyCode::Enter), Mode::Calc),
            Some(Command::Keypad(KeypadAction::Evaluate))
        );
        assert_eq!(
            command_for(key(KeyCode::Esc), Mode::Calc),
            Some(Command::Keypad(KeypadAction::Clear))
        );
    }

    #[test]
    fn test_same_key_differs_by_mode() {
        assert_eq!(
            command_for(key(KeyCode::Char('n')), Mode::Calc),
            Some(Command::Keypad(KeypadAction::Negate))
        );
        assert_eq!(
            command_for(key(KeyCode::Char('n')), Mode::Ai),
            Some(Command::Type('n'))
        );
        assert_eq!(
            command_for(key(KeyCode::Char('q')), Mode::Ai),
            Some(Command::Type('q'))
        );
    }

    #[test]
    fn test_enter_submits_without_modifier() {
        assert_eq!(
            command_for(key(KeyCode::Enter), Mode::Ai),
            Some(Command::Submit)
        );
        for modifier in [KeyModifiers::SHIFT, KeyModifiers::ALT] {
            let event = KeyEvent::new(KeyCode::Enter, modifier);
            assert_eq!(command_for(event, Mode::Ai), Some(Command::Newline));
        }
    }

    #[test]
    fn test_global_bindings() {
        for mode in [Mode::Calc, Mode::Ai] {
            let bindings = [
                (ctrl('c'), Command::Quit),
                (ctrl('o'), Command::ToggleHistory),
                (ctrl('d'), Command::ClearHistory),
                (ctrl('y'), Command::Copy),
                (key(KeyCode::Tab), Command::SwitchMode),
                (key(KeyCode::Up), Command::ScrollUp),
                (key(KeyCode::Down), Command::ScrollDown),
            ];
            for (event, command) in bindings {
                assert_eq!(command_for(event, mode), Some(command));
            }
        }
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = key(KeyCode::Char('1'));
        event.kind = KeyEventKind::Release;
        assert_eq!(command_for(event, Mode::Calc), None);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::Calc.toggle(), Mode::Ai);
        assert_eq!(Mode::Ai.toggle(), Mode::Calc);
        assert_eq!(Mode::default(), Mode::Calc);
    }
}
