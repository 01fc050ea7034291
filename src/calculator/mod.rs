//! Keypad calculator.
//!
//! This module provides:
//! - The keypad state machine that turns button presses into computations
//! - Conversion between operand text and numbers
//! - Display formatting with thousand separators
//! - Copying results to the clipboard

mod clipboard;
mod display;
mod keypad;
mod number;

pub use clipboard::copy_to_clipboard;
pub use display::{format_current, format_operand};
pub use keypad::{CalculatorState, Keypad, KeypadAction, Operation};
