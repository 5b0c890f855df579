//! Terminal styling helpers
//!
//! Styling goes through `anstream` printing plus these extension methods,
//! so colors degrade cleanly when stdout is not a terminal.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Extension methods for styled terminal output
pub trait Stylize {
    /// De-emphasized secondary text
    fn muted(&self) -> String;
    /// Highlighted value (names, URLs, SHAs)
    fn accent(&self) -> String;
    /// Positive outcome
    fn success(&self) -> String;
    /// Warning text
    fn warn(&self) -> String;
    /// Error text
    fn error(&self) -> String;
    /// Bold emphasis
    fn emphasis(&self) -> String;
}

impl<T: std::fmt::Display> Stylize for T {
    fn muted(&self) -> String {
        self.if_supports_color(Stdout, |t| t.dimmed()).to_string()
    }

    fn accent(&self) -> String {
        self.if_supports_color(Stdout, |t| t.cyan()).to_string()
    }

    fn success(&self) -> String {
        self.if_supports_color(Stdout, |t| t.green()).to_string()
    }

    fn warn(&self) -> String {
        self.if_supports_color(Stdout, |t| t.yellow()).to_string()
    }

    fn error(&self) -> String {
        self.if_supports_color(Stdout, |t| t.red()).to_string()
    }

    fn emphasis(&self) -> String {
        self.if_supports_color(Stdout, |t| t.bold()).to_string()
    }
}
