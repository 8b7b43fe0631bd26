use std::fmt::Display;

use crate::{CliError, CliResult};

pub trait ResultExt<T> {
    /// Turns the error into a [`CliError::CommandError`] explaining what failed.
    fn handle_error(self, context: &str) -> CliResult<T>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn handle_error(self, context: &str) -> CliResult<T> {
        self.map_err(|err| CliError::CommandError(format!("{context} ({err})")))
    }
}
