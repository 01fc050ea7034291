//! Keypad state machine.
//!
//! Interprets button presses into a running computation over two operand
//! strings and one pending operation. The phase of entry (idle, first operand,
//! operator chosen, second operand, showing a result) is implied by which
//! fields of [`CalculatorState`] are populated.
//!
//! Invalid presses never fail: they leave the state untouched.

use std::fmt;

use crate::history::{HistoryKind, SharedHistory};

use super::number::{format_number, parse_operand};

/// A binary operation on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// The symbol printed on the button.
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Look up an operation by its button symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '×' => Some(Self::Multiply),
            '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Apply the operation with IEEE semantics; division by zero is not special-cased.
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The renderable state of the keypad.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalculatorState {
    pub current_operand: Option<String>,
    pub previous_operand: Option<String>,
    pub operation: Option<Operation>,
    /// The next digit replaces the current operand instead of extending it.
    pub overwrite: bool,
}

/// A single button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeypadAction {
    AddDigit(char),
    ChooseOperation(Operation),
    Clear,
    Delete,
    Evaluate,
    Percentage,
    Negate,
}

/// The keypad flow: owns its state and appends evaluations to the shared history.
pub struct Keypad {
    state: CalculatorState,
    history: SharedHistory,
}

impl Keypad {
    pub fn new(history: SharedHistory) -> Self {
        Self::with_state(CalculatorState::default(), history)
    }

    /// Start from an arbitrary state.
    pub fn with_state(state: CalculatorState, history: SharedHistory) -> Self {
        Self { state, history }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Dispatch a button press.
    pub fn apply(&mut self, action: KeypadAction) {
        match action {
            KeypadAction::AddDigit(digit) => self.add_digit(digit),
            KeypadAction::ChooseOperation(operation) => self.choose_operation(operation),
            KeypadAction::Clear => self.clear(),
            KeypadAction::Delete => self.delete_digit(),
            KeypadAction::Evaluate => self.evaluate(),
            KeypadAction::Percentage => self.percentage(),
            KeypadAction::Negate => self.negate(),
        }
        tracing::debug!(?action, state = ?self.state, "Keypad transition");
    }

    /// Append a digit or decimal point to the current operand.
    pub fn add_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() && digit != '.' {
            return;
        }

        if self.state.overwrite {
            self.state.current_operand = Some(digit.to_string());
            self.state.overwrite = false;
            return;
        }

        let current = self.state.current_operand.as_deref().unwrap_or("");
        if digit == '.' && current.contains('.') {
            return;
        }
        if digit == '0' && current == "0" {
            return;
        }

        let mut next = current.to_string();
        next.push(digit);
        self.state.current_operand = Some(next);
    }

    /// Remove the last character of the current operand.
    pub fn delete_digit(&mut self) {
        if self.state.overwrite {
            self.state.current_operand = None;
            self.state.overwrite = false;
            return;
        }

        let Some(current) = self.state.current_operand.as_mut() else {
            return;
        };
        current.pop();
        if current.is_empty() {
            self.state.current_operand = None;
        }
    }

    /// Pick the pending operation, chaining a computation when both operands are present.
    pub fn choose_operation(&mut self, operation: Operation) {
        let has_current = self.state.current_operand.is_some();
        let has_previous = self.state.previous_operand.is_some();

        if !has_current && !has_previous {
            return;
        }

        if !has_current {
            self.state.operation = Some(operation);
            return;
        }

        if !has_previous {
            self.state.previous_operand = self.state.current_operand.take();
            self.state.operation = Some(operation);
            return;
        }

        self.evaluate();
        self.state.previous_operand = self.state.current_operand.take();
        self.state.operation = Some(operation);
        self.state.overwrite = false;
    }

    /// Compute `previous <op> current`, record it in history and show the result.
    pub fn evaluate(&mut self) {
        let (Some(operation), Some(current), Some(previous)) = (
            self.state.operation,
            self.state.current_operand.as_deref(),
            self.state.previous_operand.as_deref(),
        ) else {
            return;
        };

        let (Some(lhs), Some(rhs)) = (parse_operand(previous), parse_operand(current)) else {
            return;
        };

        let result = format_number(operation.apply(lhs, rhs));
        let expression = format!("{} {} {}", previous, operation, current);

        self.history
            .borrow_mut()
            .record(expression, result.clone(), HistoryKind::Standard);

        self.state = CalculatorState {
            current_operand: Some(result),
            previous_operand: None,
            operation: None,
            overwrite: true,
        };
    }

    /// Divide the current operand by 100. Leaves any pending operation in place.
    pub fn percentage(&mut self) {
        let Some(value) = self.current_value() else {
            return;
        };
        self.state.current_operand = Some(format_number(value / 100.0));
        self.state.overwrite = true;
    }

    /// Flip the sign of the current operand.
    pub fn negate(&mut self) {
        let Some(value) = self.current_value() else {
            return;
        };
        self.state.current_operand = Some(format_number(value * -1.0));
    }

    /// Reset everything.
    pub fn clear(&mut self) {
        self.state = CalculatorState::default();
    }

    fn current_value(&self) -> Option<f64> {
        parse_operand(self.state.current_operand.as_deref()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HISTORY_LIMIT, History};

    fn keypad() -> (Keypad, SharedHistory) {
        let history = History::shared();
        (Keypad::new(history.clone()), history)
    }

    fn press_digits(keypad: &mut Keypad, digits: &str) {
        for digit in digits.chars() {
            keypad.add_digit(digit);
        }
    }

    fn current(keypad: &Keypad) -> Option<&str> {
        keypad.state().current_operand.as_deref()
    }

    #[test]
    fn test_digits_concatenate() {
        let (mut keypad, _) = keypad();
        let mut entered = String::new();
        for digit in "1234567890".chars() {
            keypad.add_digit(digit);
            entered.push(digit);
            assert_eq!(current(&keypad), Some(entered.as_str()));
        }
    }

    #[test]
    fn test_single_decimal_point() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "3..1.4");
        assert_eq!(current(&keypad), Some("3.14"));
    }

    #[test]
    fn test_leading_zero_not_duplicated() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "000");
        assert_eq!(current(&keypad), Some("0"));
        press_digits(&mut keypad, ".05");
        assert_eq!(current(&keypad), Some("0.05"));
    }

    #[test]
    fn test_non_digit_ignored() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "1a2");
        assert_eq!(current(&keypad), Some("12"));
    }

    #[test]
    fn test_delete_digit() {
        let (mut keypad, _) = keypad();
        keypad.delete_digit();
        assert_eq!(keypad.state(), &CalculatorState::default());

        press_digits(&mut keypad, "42");
        keypad.delete_digit();
        assert_eq!(current(&keypad), Some("4"));
        keypad.delete_digit();
        assert_eq!(current(&keypad), None);
    }

    #[test]
    fn test_delete_after_result_clears() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "6");
        keypad.choose_operation(Operation::Multiply);
        press_digits(&mut keypad, "7");
        keypad.evaluate();
        assert!(keypad.state().overwrite);

        keypad.delete_digit();
        assert_eq!(current(&keypad), None);
        assert!(!keypad.state().overwrite);
    }

    #[test]
    fn test_choose_operation_without_operands_is_noop() {
        let (mut keypad, _) = keypad();
        keypad.choose_operation(Operation::Add);
        assert_eq!(keypad.state(), &CalculatorState::default());
    }

    #[test]
    fn test_choose_operation_promotes_current() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "12");
        keypad.choose_operation(Operation::Add);

        let state = keypad.state();
        assert_eq!(state.previous_operand.as_deref(), Some("12"));
        assert_eq!(state.operation, Some(Operation::Add));
        assert_eq!(state.current_operand, None);
    }

    #[test]
    fn test_choose_operation_replaces_pending() {
        let (mut keypad, history) = keypad();
        press_digits(&mut keypad, "8");
        keypad.choose_operation(Operation::Add);
        keypad.choose_operation(Operation::Divide);

        assert_eq!(keypad.state().operation, Some(Operation::Divide));
        assert_eq!(keypad.state().previous_operand.as_deref(), Some("8"));
        assert!(history.borrow().is_empty());
    }

    #[test]
    fn test_chained_operations() {
        let (mut keypad, history) = keypad();
        press_digits(&mut keypad, "2");
        keypad.choose_operation(Operation::Add);
        press_digits(&mut keypad, "3");
        keypad.choose_operation(Operation::Subtract);

        assert_eq!(keypad.state().previous_operand.as_deref(), Some("5"));
        assert_eq!(keypad.state().operation, Some(Operation::Subtract));
        assert_eq!(current(&keypad), None);

        press_digits(&mut keypad, "1");
        keypad.evaluate();
        assert_eq!(current(&keypad), Some("4"));

        let expressions: Vec<String> = history
            .borrow()
            .iter()
            .map(|item| format!("{} = {}", item.expression, item.result))
            .collect();
        assert_eq!(expressions, vec!["5 - 1 = 4", "2 + 3 = 5"]);
    }

    #[test]
    fn test_evaluate_records_history() {
        let (mut keypad, history) = keypad();
        press_digits(&mut keypad, "1.5");
        keypad.choose_operation(Operation::Multiply);
        press_digits(&mut keypad, "4");
        keypad.evaluate();

        let state = keypad.state();
        assert_eq!(state.current_operand.as_deref(), Some("6"));
        assert_eq!(state.previous_operand, None);
        assert_eq!(state.operation, None);
        assert!(state.overwrite);

        let history = history.borrow();
        let item = history.latest().expect("evaluation should be recorded");
        assert_eq!(item.expression, "1.5 × 4");
        assert_eq!(item.result, "6");
        assert_eq!(item.kind, HistoryKind::Standard);
    }

    #[test]
    fn test_evaluate_requires_previous_operand() {
        let (_, history) = keypad();
        let state = CalculatorState {
            current_operand: Some("3".to_string()),
            previous_operand: None,
            operation: Some(Operation::Add),
            overwrite: false,
        };
        let mut keypad = Keypad::with_state(state.clone(), history.clone());
        keypad.evaluate();

        assert_eq!(keypad.state(), &state);
        assert!(history.borrow().is_empty());
    }

    #[test]
    fn test_evaluate_without_second_operand_is_noop() {
        let (mut keypad, history) = keypad();
        press_digits(&mut keypad, "9");
        keypad.choose_operation(Operation::Subtract);
        let before = keypad.state().clone();
        keypad.evaluate();

        assert_eq!(keypad.state(), &before);
        assert!(history.borrow().is_empty());
    }

    #[test]
    fn test_evaluate_unparseable_operand_is_noop() {
        let (mut keypad, history) = keypad();
        press_digits(&mut keypad, "4");
        keypad.choose_operation(Operation::Add);
        press_digits(&mut keypad, ".");
        let before = keypad.state().clone();
        keypad.evaluate();

        assert_eq!(keypad.state(), &before);
        assert!(history.borrow().is_empty());
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "1");
        keypad.choose_operation(Operation::Divide);
        press_digits(&mut keypad, "0");
        keypad.evaluate();
        assert_eq!(current(&keypad), Some("Infinity"));

        keypad.clear();
        press_digits(&mut keypad, "0");
        keypad.choose_operation(Operation::Divide);
        press_digits(&mut keypad, "0");
        keypad.evaluate();
        assert_eq!(current(&keypad), Some("NaN"));
    }

    #[test]
    fn test_infinity_flows_into_next_operation() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "1");
        keypad.choose_operation(Operation::Divide);
        press_digits(&mut keypad, "0");
        keypad.choose_operation(Operation::Add);
        press_digits(&mut keypad, "1");
        keypad.evaluate();
        assert_eq!(current(&keypad), Some("Infinity"));
    }

    #[test]
    fn test_percentage_sets_overwrite() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "50");
        keypad.percentage();
        assert_eq!(current(&keypad), Some("0.5"));
        assert!(keypad.state().overwrite);

        keypad.add_digit('7');
        assert_eq!(current(&keypad), Some("7"));
        assert!(!keypad.state().overwrite);
    }

    #[test]
    fn test_percentage_keeps_pending_operation() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "200");
        keypad.choose_operation(Operation::Multiply);
        press_digits(&mut keypad, "10");
        keypad.percentage();

        let state = keypad.state();
        assert_eq!(state.previous_operand.as_deref(), Some("200"));
        assert_eq!(state.operation, Some(Operation::Multiply));
        assert_eq!(state.current_operand.as_deref(), Some("0.1"));

        keypad.evaluate();
        assert_eq!(current(&keypad), Some("20"));
    }

    #[test]
    fn test_negate_does_not_set_overwrite() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "12");
        keypad.negate();
        assert_eq!(current(&keypad), Some("-12"));
        assert!(!keypad.state().overwrite);

        keypad.add_digit('3');
        assert_eq!(current(&keypad), Some("-123"));

        keypad.negate();
        assert_eq!(current(&keypad), Some("123"));
    }

    #[test]
    fn test_percentage_and_negate_need_operand() {
        let (mut keypad, _) = keypad();
        keypad.percentage();
        keypad.negate();
        assert_eq!(keypad.state(), &CalculatorState::default());
    }

    #[test]
    fn test_negate_zero_stays_zero() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "0");
        keypad.negate();
        assert_eq!(current(&keypad), Some("0"));
    }

    #[test]
    fn test_result_replaced_by_next_digit() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "2");
        keypad.choose_operation(Operation::Add);
        press_digits(&mut keypad, "2");
        keypad.evaluate();
        press_digits(&mut keypad, "9");
        assert_eq!(current(&keypad), Some("9"));
    }

    #[test]
    fn test_result_can_start_new_operation() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "2");
        keypad.choose_operation(Operation::Add);
        press_digits(&mut keypad, "2");
        keypad.evaluate();
        keypad.choose_operation(Operation::Multiply);
        press_digits(&mut keypad, "3");
        keypad.evaluate();
        assert_eq!(current(&keypad), Some("12"));
    }

    #[test]
    fn test_clear_resets_state() {
        let (mut keypad, _) = keypad();
        press_digits(&mut keypad, "5");
        keypad.choose_operation(Operation::Add);
        press_digits(&mut keypad, "5");
        keypad.clear();
        assert_eq!(keypad.state(), &CalculatorState::default());
    }

    #[test]
    fn test_apply_dispatches_actions() {
        let (mut keypad, history) = keypad();
        for action in [
            KeypadAction::AddDigit('9'),
            KeypadAction::ChooseOperation(Operation::Divide),
            KeypadAction::AddDigit('3'),
            KeypadAction::Evaluate,
        ] {
            keypad.apply(action);
        }
        assert_eq!(current(&keypad), Some("3"));
        assert_eq!(history.borrow().len(), 1);
    }

    #[test]
    fn test_history_stays_capped_through_keypad() {
        let (mut keypad, history) = keypad();
        for _ in 0..HISTORY_LIMIT + 5 {
            keypad.clear();
            press_digits(&mut keypad, "1");
            keypad.choose_operation(Operation::Add);
            press_digits(&mut keypad, "1");
            keypad.evaluate();
        }
        assert_eq!(history.borrow().len(), HISTORY_LIMIT);
    }

    #[test]
    fn test_operation_symbols() {
        for operation in [
            Operation::Add,
            Operation::Subtract,
            Operation::Multiply,
            Operation::Divide,
        ] {
            assert_eq!(Operation::from_symbol(operation.symbol()), Some(operation));
        }
        assert_eq!(Operation::from_symbol('*'), None);
    }
}
