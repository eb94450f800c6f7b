//! Colour handling for terminal output.

use owo_colors::{OwoColorize, colors::css};

fn enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Extension trait for colourising output, falling back to plain text when
/// stdout is not a colour-capable terminal.
pub trait Colorize {
    /// Colour as success (green).
    fn success(&self) -> String;
    /// Colour as warning (amber).
    fn warning(&self) -> String;
    /// Colour as info (blue).
    fn info(&self) -> String;
    /// Dim the text.
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        let text = self.as_ref();
        if enabled() {
            text.fg::<css::Green>().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self) -> String {
        let text = self.as_ref();
        if enabled() {
            text.fg::<css::Orange>().to_string()
        } else {
            text.to_string()
        }
    }

    fn info(&self) -> String {
        let text = self.as_ref();
        if enabled() {
            text.fg::<css::LightBlue>().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self) -> String {
        let text = self.as_ref();
        if enabled() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
