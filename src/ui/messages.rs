use std::fmt;
use std::io::{self, Write};

/// ANSI codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn flagged<T: fmt::Display>(color: &str, icon: &str, msg: T) -> String {
    format!("{}{}{}{} {}", color, BOLD, icon, RESET, msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", flagged(FG_CYAN, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", flagged(FG_GREEN, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", flagged(FG_YELLOW, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", flagged(FG_RED, ICON_ERR, msg));
}

/// Section header for multi-line outputs.
pub fn header<T: fmt::Display>(title: T) {
    println!("{}{}── {} ──{}", FG_CYAN, BOLD, title, RESET);
}

/// Ask a yes/no question on stdin. Anything but y/yes declines.
pub fn confirm<T: fmt::Display>(question: T) -> bool {
    print!("{}{}?{} {} [y/N]: ", FG_YELLOW, BOLD, RESET, question);
    io::stdout().flush().ok();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
