use std::{env, io::ErrorKind};

use scale_wheel_cli::{CliError, CliResult};

fn main() -> CliResult<()> {
    env_logger::init();

    match scale_wheel_cli::run_in_shell_env(env::args()) {
        // Output piped into a process that exited early, e.g. `head`.
        Err(CliError::IoError(err)) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
