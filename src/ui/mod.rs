//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, IsTerminal, Write};

use crate::domain::Module;
use crate::error::{Result, VerbumpError};
use crate::workspace::{ModuleSelector, Selection};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_modules, display_proposed_bump, display_report, display_status,
    display_success, display_warning,
};

/// Interactive module selector reading answers from stdin
///
/// Presents a numbered list; the user answers with "all" (or Enter),
/// numbers like "1,3", or "q" to cancel.
pub struct PromptSelector;

impl PromptSelector {
    pub fn new() -> Self {
        PromptSelector
    }
}

impl Default for PromptSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleSelector for PromptSelector {
    fn select(&self, modules: &[Module]) -> Result<Selection> {
        if modules.len() == 1 {
            return Ok(Selection::All);
        }

        println!("\n\x1b[1mModules found:\x1b[0m");
        for (i, module) in modules.iter().enumerate() {
            println!(
                "  {}. {} ({})",
                i + 1,
                module.label(),
                module.current_version
            );
        }

        print!(
            "\nSelect modules (e.g. 1,3), 'all', or 'q' to cancel [all]: "
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let answer = input.trim().to_lowercase();

        match answer.as_str() {
            "" | "all" | "a" => Ok(Selection::All),
            "q" | "quit" => Ok(Selection::Cancelled),
            _ => {
                let mut indexes = Vec::new();
                for part in answer.split(',') {
                    let part = part.trim();
                    if part.is_empty() {
                        continue;
                    }
                    let number: usize = part.parse().map_err(|_| {
                        VerbumpError::selection(format!("invalid selection '{}'", part))
                    })?;
                    if number == 0 || number > modules.len() {
                        return Err(VerbumpError::selection(format!(
                            "selection {} is out of range (1-{})",
                            number,
                            modules.len()
                        )));
                    }
                    indexes.push(number - 1);
                }

                if indexes.is_empty() {
                    return Err(VerbumpError::selection("empty selection"));
                }
                Ok(Selection::Subset(indexes))
            }
        }
    }
}

/// Whether the invocation can prompt the user at all
///
/// Interactive prompting is skipped for piped stdin and CI environments;
/// selection then defaults to the entire module list.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && std::env::var_os("CI").is_none()
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Default is "no" if user presses Enter.
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
