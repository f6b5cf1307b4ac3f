//! Output helpers shared by the selection commands.

use dialoguer::console::style;
use modelpick_models::HandleStatus;
use std::io::{self, Write};

const HEADER_WIDTH: usize = 48;

/// Draws a boxed header with the given title.
pub fn print_header(title: &str) -> io::Result<()> {
    print_header_to(&mut io::stdout(), title)
}

/// Draws a boxed header to a writer (for testing).
pub fn print_header_to<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    let border = "─".repeat(HEADER_WIDTH);
    writeln!(w, "┌{}┐", border)?;
    writeln!(w, "│ {:<width$} │", title, width = HEADER_WIDTH - 2)?;
    writeln!(w, "└{}┘", border)?;
    writeln!(w)?;
    Ok(())
}

/// Prints a success message with a green checkmark.
pub fn print_success(message: &str) -> io::Result<()> {
    print_success_to(&mut io::stdout(), message)
}

/// Prints a success message to a writer (for testing).
pub fn print_success_to<W: Write>(w: &mut W, message: &str) -> io::Result<()> {
    writeln!(w, "{} {}", style("✓").green().bold(), style(message).green())
}

/// Warns when the latest model handle could not be built.
pub fn print_status(status: &HandleStatus) -> io::Result<()> {
    print_status_to(&mut io::stdout(), status)
}

/// Writes the handle warning to a writer (for testing). Prints nothing when ready.
pub fn print_status_to<W: Write>(w: &mut W, status: &HandleStatus) -> io::Result<()> {
    match status {
        HandleStatus::Ready => Ok(()),
        HandleStatus::Unavailable { reason } => writeln!(
            w,
            "{} {}",
            style("!").yellow().bold(),
            style(format!("Model unavailable: {reason}")).yellow()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_header_draws_box_with_title() {
        let mut output = Vec::new();
        print_header_to(&mut output, "Pick a model").unwrap();
        let result = String::from_utf8(output).unwrap();

        assert!(result.contains("┌"), "Missing top-left corner");
        assert!(result.contains("┘"), "Missing bottom-right corner");
        assert!(result.contains("Pick a model"), "Missing title");
    }

    #[test]
    fn print_header_border_has_fixed_width() {
        let mut output = Vec::new();
        print_header_to(&mut output, "Short").unwrap();
        let result = String::from_utf8(output).unwrap();

        let border_line = result.lines().next().unwrap();
        assert_eq!(
            border_line.chars().filter(|&c| c == '─').count(),
            HEADER_WIDTH
        );
    }

    #[test]
    fn print_success_shows_checkmark() {
        let mut output = Vec::new();
        print_success_to(&mut output, "Saved").unwrap();
        let result = String::from_utf8(output).unwrap();

        assert!(result.contains('✓'), "Should contain checkmark");
        assert!(result.contains("Saved"), "Should contain message");
        assert!(result.ends_with('\n'), "Should end with newline");
    }

    #[test]
    fn ready_status_prints_nothing() {
        let mut output = Vec::new();
        print_status_to(&mut output, &HandleStatus::Ready).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn unavailable_status_shows_reason() {
        let mut output = Vec::new();
        let status = HandleStatus::Unavailable {
            reason: "invalid API key format".to_string(),
        };
        print_status_to(&mut output, &status).unwrap();
        let result = String::from_utf8(output).unwrap();

        assert!(result.contains("invalid API key format"));
    }
}
