use thiserror::Error;

pub const DEFAULT_ENTRIES: &[&str] = &["hello", "quit", "help"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("nothing to {0}")]
    Empty(&'static str),

    #[error("entry {0} does not exist")]
    NoSuchEntry(String),
}

/// Ordered, mutable list of entries shown by `list`.
///
/// Positions are 1-based at this API, matching what the prompt prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRegistry {
    entries: Vec<String>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES.iter().map(|s| s.to_string()))
    }
}

impl CommandRegistry {
    pub fn new(entries: impl IntoIterator<Item = String>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, text: &str) -> Result<usize, RegistryError> {
        if text.is_empty() {
            return Err(RegistryError::Empty("add"));
        }
        self.entries.push(text.to_string());
        Ok(self.entries.len())
    }

    /// Removes entry `position`, or the last one when `None`.
    pub fn remove(&mut self, position: Option<usize>) -> Result<String, RegistryError> {
        let idx = self.resolve(position, "remove")?;
        Ok(self.entries.remove(idx))
    }

    /// Replaces entry `position` (or the last one) and returns its position.
    pub fn edit(&mut self, position: Option<usize>, text: &str) -> Result<usize, RegistryError> {
        if text.is_empty() {
            return Err(RegistryError::Empty("edit"));
        }
        let idx = self.resolve(position, "edit")?;
        self.entries[idx] = text.to_string();
        Ok(idx + 1)
    }

    fn resolve(&self, position: Option<usize>, verb: &'static str) -> Result<usize, RegistryError> {
        match position {
            None => self
                .entries
                .len()
                .checked_sub(1)
                .ok_or(RegistryError::Empty(verb)),
            Some(p) if (1..=self.entries.len()).contains(&p) => Ok(p - 1),
            Some(p) => Err(RegistryError::NoSuchEntry(p.to_string())),
        }
    }
}
