use colored::Colorize;
use std::io::{self, Write};

use crate::copy::CopySummary;

const APP_URL: &str = "https://bsky.app";

/// Console status output for a run. Counters are redrawn in place with `\r`,
/// so anything else printed while one is open starts on a fresh line.
#[derive(Debug, Default)]
pub struct Progress {
    line_open: bool,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, message: &str) {
        self.end_line();
        println!("{}", message.cyan());
    }

    pub fn fetched(&mut self, total: usize) {
        self.redraw(&format!("  Fetched {} follows...", total));
    }

    pub fn found(&mut self, total: usize) {
        self.end_line();
        println!("Found {} follows", total.to_string().bold());
    }

    pub fn no_follows(&mut self) {
        self.end_line();
        println!("{}", "No follows found for this user.".yellow());
    }

    pub fn added(&mut self, position: usize, total: usize) {
        self.redraw(&format!("  Added {}/{} members...", position, total));
    }

    pub fn member_failed(&mut self, handle: &str, error: &str) {
        self.end_line();
        eprintln!("{} failed to add {}: {}", "Warning:".yellow().bold(), handle, error);
    }

    pub fn done(&mut self, list_name: &str, summary: &CopySummary) {
        self.end_line();
        println!("{}", done_line(list_name, summary.added));
        if !summary.failed.is_empty() {
            println!(
                "  {} of {} follows could not be added.",
                summary.failed.len().to_string().yellow(),
                summary.total
            );
        }
        println!(
            "View at: {}/profile/{}/lists",
            APP_URL, summary.account_handle
        );
    }

    fn redraw(&mut self, line: &str) {
        print!("\r{}", line);
        let _ = io::stdout().flush();
        self.line_open = true;
    }

    fn end_line(&mut self) {
        if self.line_open {
            println!();
            self.line_open = false;
        }
    }
}

fn done_line(list_name: &str, added: usize) -> String {
    format!(
        "{} List \"{}\" created with {} members.",
        "✓ Done!".green().bold(),
        list_name,
        added
    )
}
