//! Line-oriented text command prompt.
//!
//! Each input line is classified into a [`Command`] and run against a
//! [`CommandRegistry`] owned by the [`Dispatcher`].

mod command;
mod dispatcher;
mod registry;

pub use command::{classify, strip_line_ending, Command};
pub use dispatcher::{Dispatcher, Flow, SEPARATOR};
pub use registry::{CommandRegistry, RegistryError, DEFAULT_ENTRIES};
