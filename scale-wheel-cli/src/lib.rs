mod dto;
mod error;
mod profile;
mod scale;
mod session;
mod svg;

use std::{
    fmt::{self, Debug, Display},
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use scale::{CodeOptions, ScaleOptions};
use scale_wheel::{scale::ScaleError, widget::WidgetLayout};
use session::{DragOptions, SvgOptions};

#[derive(Parser)]
#[command(
    name = "scale-wheel",
    version,
    about = "Explore diatonic scales on a rotating note wheel"
)]
struct MainOptions {
    /// Write output to a file instead of stdout
    #[arg(long = "of", global = true)]
    output_file: Option<PathBuf>,

    /// YAML profile overriding the widget layout
    #[arg(long = "profile", global = true)]
    profile_location: Option<PathBuf>,

    #[command(subcommand)]
    command: MainCommand,
}

#[derive(Subcommand)]
enum MainCommand {
    /// Print the degrees of a scale
    #[command(name = "scale")]
    Scale(ScaleOptions),

    /// Print the code listing of a scale
    #[command(name = "code")]
    Code(CodeOptions),

    /// Render the whole widget as an SVG document
    #[command(name = "svg")]
    Svg(SvgOptions),

    /// Replay a pointer session on the widget and print the resulting state
    #[command(name = "drag")]
    Drag(DragOptions),
}

impl MainOptions {
    fn run(self) -> CliResult<()> {
        let layout = match &self.profile_location {
            Some(location) => profile::load(location)?,
            None => WidgetLayout::default(),
        };

        let stdout = io::stdout();
        let output: Box<dyn Write> = match self.output_file {
            Some(output_file) => Box::new(File::create(output_file)?),
            None => Box::new(stdout.lock()),
        };

        let mut app = App { output, layout };

        self.command.run(&mut app)
    }
}

impl MainCommand {
    fn run(self, app: &mut App) -> CliResult<()> {
        match self {
            MainCommand::Scale(options) => options.run(app)?,
            MainCommand::Code(options) => options.run(app)?,
            MainCommand::Svg(options) => options.run(app)?,
            MainCommand::Drag(options) => options.run(app)?,
        }
        Ok(())
    }
}

pub fn run_in_shell_env(args: impl IntoIterator<Item = String>) -> CliResult<()> {
    let options = match MainOptions::try_parse_from(args) {
        Err(err) => {
            return if err.use_stderr() {
                Err(CliError::CommandError(err.to_string()))
            } else {
                println!("{err}");
                Ok(())
            };
        }
        Ok(options) => options,
    };

    options.run()
}

struct App<'a> {
    output: Box<dyn 'a + Write>,
    layout: WidgetLayout,
}

impl App<'_> {
    pub fn write(&mut self, message: impl Display) -> io::Result<()> {
        write!(&mut self.output, "{message}")
    }

    pub fn writeln(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(&mut self.output, "{message}")
    }
}

pub type CliResult<T> = Result<T, CliError>;

pub enum CliError {
    IoError(io::Error),
    CommandError(String),
}

impl Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::IoError(err) => write!(f, "IO error / {err}"),
            CliError::CommandError(err) => write!(f, "The command failed / {err}"),
        }
    }
}

impl From<String> for CliError {
    fn from(v: String) -> Self {
        CliError::CommandError(v)
    }
}

impl From<ScaleError> for CliError {
    fn from(v: ScaleError) -> Self {
        CliError::CommandError(format!("Could not create scale ({v})"))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(v: serde_yaml::Error) -> Self {
        CliError::CommandError(format!("Invalid YAML ({v})"))
    }
}

impl From<io::Error> for CliError {
    fn from(v: io::Error) -> Self {
        CliError::IoError(v)
    }
}
