//! Numbered demo menu.
//!
//! Prints the 0-5 menu, reads a selection from stdin, and re-prompts on
//! anything that is not a valid choice. Choice parsing is a pure function
//! so the re-prompt rule is testable without a terminal.

use std::io::{BufRead, Write};

use console::style;

use crate::cli::Demo;

/// A valid menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    Demo(Demo),
}

/// Parse one menu input line. Returns `None` for anything outside 0-5.
pub fn parse_choice(raw: &str) -> Option<MenuChoice> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Some(MenuChoice::Exit),
        Ok(1) => Some(MenuChoice::Demo(Demo::Parser)),
        Ok(2) => Some(MenuChoice::Demo(Demo::Retrieval)),
        Ok(3) => Some(MenuChoice::Demo(Demo::Conversation)),
        Ok(4) => Some(MenuChoice::Demo(Demo::Agent)),
        Ok(5) => Some(MenuChoice::Demo(Demo::Memory)),
        _ => None,
    }
}

fn print_menu() {
    println!();
    println!("{}", style("=== Weft Demo Menu ===").cyan().bold());
    println!("Please select a demo to run:");
    println!("0. Exit");
    println!("1. Prompt & Output Parser");
    println!("2. Retrieval Chain");
    println!("3. Conversation Retrieval Chain");
    println!("4. Agent Chat");
    println!("5. Memory Chat");
    println!("{}", style("======================").cyan().bold());
}

/// Show the menu and block until the user enters a valid choice.
///
/// Returns `MenuChoice::Exit` on end of input as well, so a closed stdin
/// ends the program cleanly.
pub fn prompt_selection() -> MenuChoice {
    print_menu();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Enter your choice (0-5): ");
        let _ = std::io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            return MenuChoice::Exit;
        };
        match parse_choice(&line) {
            Some(choice) => return choice,
            None => println!("Invalid choice. Please enter 0, 1, 2, 3, 4 or 5."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_choices() {
        assert_eq!(parse_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_choice("1"), Some(MenuChoice::Demo(Demo::Parser)));
        assert_eq!(parse_choice("2"), Some(MenuChoice::Demo(Demo::Retrieval)));
        assert_eq!(parse_choice("3"), Some(MenuChoice::Demo(Demo::Conversation)));
        assert_eq!(parse_choice("4"), Some(MenuChoice::Demo(Demo::Agent)));
        assert_eq!(parse_choice("5"), Some(MenuChoice::Demo(Demo::Memory)));
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        assert_eq!(parse_choice(" 3 "), Some(MenuChoice::Demo(Demo::Conversation)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(parse_choice("6"), None);
        assert_eq!(parse_choice("42"), None);
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert_eq!(parse_choice("agent"), None);
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("-1"), None);
        assert_eq!(parse_choice("2.5"), None);
    }
}
