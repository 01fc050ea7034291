//! Keypad calculator with an AI math solver.
//!
//! The keypad and the AI solver are independent input flows that both append
//! to one shared, capped [`history::History`].

pub mod ai;
pub mod calculator;
pub mod config;
pub mod history;
pub mod ui;
