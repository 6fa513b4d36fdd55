//! Some utility functions

use std::io::{BufRead, Write};

use crate::schedule::WeekBlocks;
use crate::todo::TodoStore;
use crate::traits::Confirm;

/// A debug utility that renders the blocks of a week, one line per day
pub fn format_week(blocks: &WeekBlocks) -> String {
    let mut lines = Vec::new();
    for (day, day_blocks) in blocks.iter() {
        let cells: Vec<String> = day_blocks.blocks().iter()
            .map(|block| {
                let name = block.subject.as_deref().unwrap_or("-");
                if block.duration > 1 {
                    format!("{} ({} Std.)", name, block.duration)
                } else {
                    name.to_string()
                }
            })
            .collect();
        lines.push(format!("{:<10} | {}", day.name(), cells.join(" | ")));
    }
    lines.join("\n")
}

/// A debug utility that pretty-prints the blocks of a week
pub fn print_week(blocks: &WeekBlocks) {
    println!("{}", format_week(blocks));
}

/// A debug utility that pretty-prints to-dos
pub fn print_todos(todos: &TodoStore) {
    for (key, item) in todos.iter() {
        let completion = if item.done { "✓" } else { " " };
        println!("    {} {}\t{}", completion, item.text, key);
    }
}


/// Asks confirmation questions on a text stream, e.g. stdin/stdout.
///
/// Any answer starting with `j` or `y` (case-insensitive) means yes. Anything else, including a read error, means no.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptConfirm<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Ask on the terminal
    pub fn terminal() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        if let Err(err) = write!(self.output, "{} [j/n] ", question).and_then(|_| self.output.flush()) {
            log::warn!("Unable to ask for confirmation: {}", err);
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Err(err) => {
                log::warn!("Unable to read the confirmation: {}", err);
                false
            },
            Ok(_) => {
                let answer = answer.trim().to_lowercase();
                answer.starts_with('j') || answer.starts_with('y')
            },
        }
    }
}
