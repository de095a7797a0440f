//! Operator-facing console messages
//!
//! With the `tui` feature these render as cliclack log lines; without it they
//! fall back to plain colored output. Failures to write to the terminal are
//! not actionable and are ignored.

use std::fmt::Display;

#[cfg(not(feature = "tui"))]
use colored::Colorize;

#[cfg(feature = "tui")]
pub fn intro(title: impl Display) {
    let _ = cliclack::intro(title);
}

#[cfg(feature = "tui")]
pub fn outro(message: impl Display) {
    let _ = cliclack::outro(message);
}

#[cfg(feature = "tui")]
pub fn outro_cancel(message: impl Display) {
    let _ = cliclack::outro_cancel(message);
}

#[cfg(feature = "tui")]
pub fn step(message: impl Display) {
    let _ = cliclack::log::step(message);
}

#[cfg(feature = "tui")]
pub fn info(message: impl Display) {
    let _ = cliclack::log::info(message);
}

#[cfg(feature = "tui")]
pub fn success(message: impl Display) {
    let _ = cliclack::log::success(message);
}

#[cfg(feature = "tui")]
pub fn warning(message: impl Display) {
    let _ = cliclack::log::warning(message);
}

#[cfg(feature = "tui")]
pub fn error(message: impl Display) {
    let _ = cliclack::log::error(message);
}

#[cfg(not(feature = "tui"))]
pub fn intro(title: impl Display) {
    println!("{}", title.to_string().cyan().bold());
}

#[cfg(not(feature = "tui"))]
pub fn outro(message: impl Display) {
    println!("{}", message.to_string().cyan());
}

#[cfg(not(feature = "tui"))]
pub fn outro_cancel(message: impl Display) {
    eprintln!("{}", message.to_string().red());
}

#[cfg(not(feature = "tui"))]
pub fn step(message: impl Display) {
    println!("{} {}", "\u{2192}".dimmed(), message);
}

#[cfg(not(feature = "tui"))]
pub fn info(message: impl Display) {
    println!("{} {}", "\u{2192}".dimmed(), message);
}

#[cfg(not(feature = "tui"))]
pub fn success(message: impl Display) {
    println!("{} {}", "\u{2192}".dimmed(), message.to_string().green());
}

#[cfg(not(feature = "tui"))]
pub fn warning(message: impl Display) {
    eprintln!("{} {}", "\u{2192}".dimmed(), message.to_string().yellow());
}

#[cfg(not(feature = "tui"))]
pub fn error(message: impl Display) {
    eprintln!("{} {}", "\u{2192}".dimmed(), message.to_string().red());
}
