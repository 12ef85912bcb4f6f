//! Interactive console menu
//!
//! Choices map to [`MenuAction`] through the constant [`MENU`] table; the
//! caller dispatches the returned action with a `match`.

use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Actions offered by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    CheckSetup,
    RunConversation,
    RunTests,
    ShowSample,
    Exit,
}

/// One menu line
pub struct MenuEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub action: MenuAction,
}

pub const MENU: [MenuEntry; 5] = [
    MenuEntry {
        key: "1",
        label: "Check setup and dependencies",
        action: MenuAction::CheckSetup,
    },
    MenuEntry {
        key: "2",
        label: "Run conversation",
        action: MenuAction::RunConversation,
    },
    MenuEntry {
        key: "3",
        label: "Run test suite",
        action: MenuAction::RunTests,
    },
    MenuEntry {
        key: "4",
        label: "Show sample transcript",
        action: MenuAction::ShowSample,
    },
    MenuEntry {
        key: "5",
        label: "Exit",
        action: MenuAction::Exit,
    },
];

/// Look up the action for a typed choice
pub fn parse_choice(input: &str) -> Option<MenuAction> {
    let input = input.trim();
    MENU.iter()
        .find(|entry| entry.key == input)
        .map(|entry| entry.action)
}

pub fn render_menu() -> String {
    let line = "=".repeat(50);
    let mut out = format!("\n{}\n{}\n", "codecrew".cyan().bold(), line);
    for entry in &MENU {
        out.push_str(&format!("{}. {}\n", entry.key, entry.label));
    }
    out.push_str(&line);
    out.push('\n');
    out
}

/// Menu bound to an input and an output stream
pub struct ConsoleMenu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleMenu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show the menu until a valid choice is made
    ///
    /// End of input counts as [`MenuAction::Exit`].
    pub fn next_action(&mut self) -> io::Result<MenuAction> {
        loop {
            write!(self.output, "{}", render_menu())?;
            write!(self.output, "Select an option (1-{}): ", MENU.len())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(MenuAction::Exit);
            }
            match parse_choice(&line) {
                Some(action) => return Ok(action),
                None => writeln!(
                    self.output,
                    "{} Invalid choice. Please select 1-{}.",
                    "x".red(),
                    MENU.len()
                )?,
            }
        }
    }
}
