use crate::constants::{ANSI_GREEN, ANSI_RED, ANSI_RESET, ANSI_YELLOW};

/// The handful of colors the REPL knows how to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Red,
    Yellow,
    Green,
}

impl ColorClass {
    /// ANSI escape sequence that switches the terminal to this color.
    pub fn code(self) -> &'static str {
        match self {
            ColorClass::Red => ANSI_RED,
            ColorClass::Yellow => ANSI_YELLOW,
            ColorClass::Green => ANSI_GREEN,
        }
    }
}

/// Wrap `text` in `color` followed by a reset.
pub fn paint(color: ColorClass, text: &str) -> String {
    format!("{}{}{}", color.code(), text, ANSI_RESET)
}
