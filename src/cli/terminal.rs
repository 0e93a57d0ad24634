//! Coloured status lines for the terminal.

use owo_colors::{OwoColorize, Style};

/// Widest separator drawn between listed animals.
const RULE_WIDTH: usize = 26;

fn colour_enabled() -> bool {
    supports_color::on_cached(supports_color::Stream::Stdout).is_some()
}

fn paint(text: &str, style: Style) -> String {
    if colour_enabled() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// A dimmed separator, narrowed to fit the terminal.
pub fn rule() -> String {
    let width = terminal_size::terminal_size()
        .map_or(RULE_WIDTH, |(width, _)| usize::from(width.0).min(RULE_WIDTH));
    paint(&"-".repeat(width), Style::new().dimmed())
}

/// Styles for the registry's status messages.
pub trait Colorize {
    /// Something was registered, saved or loaded.
    fn success(&self) -> String;
    /// An operation was refused or input was rejected.
    fn warning(&self) -> String;
    /// A section heading.
    fn info(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), Style::new().green())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), Style::new().yellow())
    }

    fn info(&self) -> String {
        paint(self.as_ref(), Style::new().bright_blue().bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_is_never_wider_than_default() {
        assert!(rule().matches('-').count() <= RULE_WIDTH);
    }

    #[test]
    fn styles_keep_text() {
        assert!("saved".success().contains("saved"));
        assert!(String::from("careful").warning().contains("careful"));
        assert!("heading".info().contains("heading"));
    }
}
