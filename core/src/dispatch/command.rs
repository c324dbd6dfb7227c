#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Greet,
    Quit,
    Help,
    List,
    Add,
    Remove,
    Edit,
    Unknown,
}

impl Command {
    /// Commands that only match when written alone on the line.
    fn is_bare(self) -> bool {
        matches!(self, Command::Quit | Command::Help | Command::List)
    }
}

pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Split a raw line into its command and the (trimmed) argument text.
///
/// Matching is exact and case-sensitive on the first space-delimited token.
pub fn classify(line: &str) -> (Command, &str) {
    let text = strip_line_ending(line);
    let (keyword, rest) = match text.split_once(' ') {
        // A keyword followed only by blanks is not an exact match.
        Some((_, rest)) if rest.trim().is_empty() => return (Command::Unknown, ""),
        Some((kw, rest)) => (kw, rest.trim()),
        None => (text, ""),
    };

    let cmd = match keyword {
        "hello" => Command::Greet,
        "quit" | "exit" => Command::Quit,
        "help" => Command::Help,
        "list" => Command::List,
        "add" => Command::Add,
        "remove" => Command::Remove,
        "edit" => Command::Edit,
        _ => Command::Unknown,
    };

    if cmd == Command::Unknown || (cmd.is_bare() && !rest.is_empty()) {
        return (Command::Unknown, "");
    }
    (cmd, rest)
}
