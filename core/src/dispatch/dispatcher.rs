use std::io::{self, BufRead, Write};

use tracing::debug;

use super::command::{classify, strip_line_ending, Command};
use super::registry::{CommandRegistry, RegistryError};

pub const SEPARATOR: &str = "--------------------";

const HELP_TEXT: &str = "available commands: hello, hello <name>, quit, exit, help, list, \
add <text>, remove [n], edit [n] <text>";

/// What the caller should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Dispatcher<W> {
    registry: CommandRegistry,
    out: W,
}

impl<W: Write> Dispatcher<W> {
    pub fn new(out: W) -> Self {
        Self::with_registry(CommandRegistry::default(), out)
    }

    pub fn with_registry(registry: CommandRegistry, out: W) -> Self {
        Self { registry, out }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn greet(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "Welcome to {name}'s application!")?;
        writeln!(self.out, "{SEPARATOR}")?;
        self.out.flush()
    }

    /// Handle one raw input line. Only write failures surface as errors.
    pub fn dispatch(&mut self, line: &str) -> io::Result<Flow> {
        let (cmd, arg) = classify(line);
        let flow = match cmd {
            Command::Greet => {
                if arg.is_empty() {
                    writeln!(self.out, "hello!")?;
                } else {
                    writeln!(self.out, "hello {arg}!")?;
                }
                Flow::Continue
            }
            Command::Quit => {
                writeln!(self.out, "Quitting now, goodbye!")?;
                Flow::Quit
            }
            Command::Help => {
                writeln!(self.out, "{HELP_TEXT}")?;
                Flow::Continue
            }
            Command::List => {
                self.list()?;
                Flow::Continue
            }
            Command::Add => {
                match self.registry.add(arg) {
                    Ok(_) => writeln!(self.out, "added: \"{arg}\"")?,
                    Err(e) => self.report(e)?,
                }
                Flow::Continue
            }
            Command::Remove => {
                let result = if arg.is_empty() {
                    self.registry.remove(None)
                } else {
                    match arg.parse::<usize>() {
                        Ok(pos) => self.registry.remove(Some(pos)),
                        Err(_) => Err(RegistryError::NoSuchEntry(arg.to_string())),
                    }
                };
                match result {
                    Ok(entry) => writeln!(self.out, "removed: \"{entry}\"")?,
                    Err(e) => self.report(e)?,
                }
                Flow::Continue
            }
            Command::Edit => {
                let (position, text) = split_position(arg);
                match self.registry.edit(position, text) {
                    Ok(pos) => writeln!(self.out, "edited {pos}: \"{text}\"")?,
                    Err(e) => self.report(e)?,
                }
                Flow::Continue
            }
            Command::Unknown => {
                debug!(input = %strip_line_ending(line), "unknown command");
                writeln!(self.out, "unknown command: \"{}\"", line.trim())?;
                Flow::Continue
            }
        };
        self.out.flush()?;
        Ok(flow)
    }

    /// Dispatch lines until a quit command or end of input.
    pub fn run<R: BufRead>(&mut self, mut reader: R) -> io::Result<Flow> {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                debug!("input closed before quit");
                return Ok(Flow::Continue);
            }
            if self.dispatch(&line)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn list(&mut self) -> io::Result<()> {
        if self.registry.is_empty() {
            return writeln!(self.out, "(empty)");
        }
        for (i, entry) in self.registry.entries().iter().enumerate() {
            writeln!(self.out, "{}: {}", i + 1, entry)?;
        }
        Ok(())
    }

    fn report(&mut self, err: RegistryError) -> io::Result<()> {
        writeln!(self.out, "error: {err}")
    }
}

/// `"2 new text"` -> `(Some(2), "new text")`; anything else targets the last entry.
fn split_position(arg: &str) -> (Option<usize>, &str) {
    if let Some((head, rest)) = arg.split_once(' ') {
        if let Ok(pos) = head.parse::<usize>() {
            return (Some(pos), rest.trim());
        }
    }
    (None, arg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_lines(lines: &[&str]) -> (String, Dispatcher<Vec<u8>>) {
        let mut d = Dispatcher::new(Vec::new());
        for line in lines {
            d.dispatch(line).unwrap();
        }
        let out = String::from_utf8(d.out.clone()).unwrap();
        (out, d)
    }

    #[test]
    fn greeting_banner() {
        let mut d = Dispatcher::new(Vec::new());
        d.greet("Alaa hijazi").unwrap();
        let out = String::from_utf8(d.into_output()).unwrap();
        assert_eq!(
            out,
            "Welcome to Alaa hijazi's application!\n--------------------\n"
        );
    }

    #[test]
    fn hello_with_and_without_name() {
        let (out, _) = run_lines(&["hello\n", "hello Codi\n"]);
        assert_eq!(out, "hello!\nhello Codi!\n");
    }

    #[test]
    fn quit_and_exit_stop_the_loop() {
        for word in ["quit\n", "exit\n"] {
            let mut d = Dispatcher::new(Vec::new());
            assert_eq!(d.dispatch(word).unwrap(), Flow::Quit);
            assert_eq!(
                String::from_utf8(d.into_output()).unwrap(),
                "Quitting now, goodbye!\n"
            );
        }
    }

    #[test]
    fn unknown_input_is_echoed_trimmed() {
        let (out, d) = run_lines(&["  batata  \n"]);
        assert_eq!(out, "unknown command: \"batata\"\n");
        assert_eq!(d.registry(), &CommandRegistry::default());
    }

    #[test]
    fn unknown_input_does_not_quit() {
        let mut d = Dispatcher::new(Vec::new());
        assert_eq!(d.dispatch("Quit\n").unwrap(), Flow::Continue);
    }

    #[test]
    fn quit_with_trailing_blank_is_unknown() {
        let mut d = Dispatcher::new(Vec::new());
        assert_eq!(d.dispatch("quit \n").unwrap(), Flow::Continue);
        assert_eq!(
            String::from_utf8(d.into_output()).unwrap(),
            "unknown command: \"quit\"\n"
        );
    }

    #[test]
    fn help_lists_commands() {
        let (out, _) = run_lines(&["help\n"]);
        assert!(out.starts_with("available commands: hello"));
        assert!(out.contains("remove [n]"));
    }

    #[test]
    fn list_numbers_entries() {
        let (out, _) = run_lines(&["list\n"]);
        assert_eq!(out, "1: hello\n2: quit\n3: help\n");
    }

    #[test]
    fn add_remove_edit_round() {
        let (out, d) = run_lines(&[
            "add buy milk\n",
            "remove 1\n",
            "edit 2 call mom\n",
            "edit renamed\n",
            "remove\n",
        ]);
        assert_eq!(
            out,
            "added: \"buy milk\"\n\
             removed: \"hello\"\n\
             edited 2: \"call mom\"\n\
             edited 3: \"renamed\"\n\
             removed: \"renamed\"\n"
        );
        assert_eq!(d.registry().entries(), &["quit", "call mom"]);
    }

    #[test]
    fn registry_errors_are_reported_not_raised() {
        let (out, d) = run_lines(&["add\n", "edit\n", "remove 9\n", "remove x\n"]);
        assert_eq!(
            out,
            "error: nothing to add\n\
             error: nothing to edit\n\
             error: entry 9 does not exist\n\
             error: entry x does not exist\n"
        );
        assert_eq!(d.registry(), &CommandRegistry::default());
    }

    #[test]
    fn run_stops_at_quit_and_ignores_the_rest() {
        let input = "hello\nquit\nhello\n";
        let mut d = Dispatcher::new(Vec::new());
        assert_eq!(d.run(input.as_bytes()).unwrap(), Flow::Quit);
        assert_eq!(
            String::from_utf8(d.into_output()).unwrap(),
            "hello!\nQuitting now, goodbye!\n"
        );
    }

    #[test]
    fn run_reports_end_of_input() {
        let mut d = Dispatcher::new(Vec::new());
        assert_eq!(d.run("list\n".as_bytes()).unwrap(), Flow::Continue);
    }

    #[test]
    fn numeric_edit_without_text_replaces_last() {
        assert_eq!(split_position("3"), (None, "3"));
        assert_eq!(split_position("3 x"), (Some(3), "x"));
        assert_eq!(split_position("new text"), (None, "new text"));
    }
}
