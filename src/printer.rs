//! Frames responses for the terminal.

use crossterm::style::Stylize;

/// Draws a message between two border lines, indenting every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePrinter {
    line_length: usize,
    line_symbol: char,
    indentation: usize,
    colour: bool,
}

impl Default for MessagePrinter {
    fn default() -> Self {
        MessagePrinter::new(50, '*', 2)
    }
}

impl MessagePrinter {
    pub fn new(line_length: usize, line_symbol: char, indentation: usize) -> Self {
        MessagePrinter {
            line_length,
            line_symbol,
            indentation,
            colour: false,
        }
    }

    /// Colour error messages. Only worth enabling when stdout is a terminal.
    pub fn with_colour(mut self, colour: bool) -> Self {
        self.colour = colour;
        self
    }

    fn border(&self) -> String {
        std::iter::repeat(self.line_symbol)
            .take(self.line_length)
            .collect()
    }

    /// The framed form of `msg`.
    pub fn frame(&self, msg: &str) -> String {
        let indent = " ".repeat(self.indentation);
        let body = msg
            .lines()
            .map(|line| format!("{indent}{line}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{border}\n{body}\n{border}", border = self.border())
    }

    /// Framed form of an error message, in red when colour is on.
    pub fn frame_error(&self, msg: &str) -> String {
        let framed = self.frame(msg);
        if self.colour {
            framed.red().to_string()
        } else {
            framed
        }
    }
}
