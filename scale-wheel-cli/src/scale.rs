use clap::Args;
use scale_wheel::{
    note::{Mode, NoteLetter},
    scale::Scale,
};

use crate::{
    dto::{ScaleDto, ScaleWheelDto},
    error::ResultExt,
    App, CliResult,
};

#[derive(Args)]
pub struct ScaleSelection {
    /// Tonic given as letter (C, D, .., B) or as index (0 = C, .., 6 = B)
    tonic: String,

    /// Use the natural minor scale instead of the major scale
    #[arg(long = "minor")]
    minor: bool,
}

impl ScaleSelection {
    pub fn mode(&self) -> Mode {
        if self.minor {
            Mode::Minor
        } else {
            Mode::Major
        }
    }

    pub fn tonic(&self) -> CliResult<NoteLetter> {
        Ok(match self.tonic.parse::<usize>() {
            Ok(index) => NoteLetter::from_index(index)?,
            Err(_) => self.tonic.parse()?,
        })
    }

    pub fn to_scale(&self) -> CliResult<Scale> {
        Ok(Scale::new(self.tonic()?, self.mode()))
    }
}

#[derive(Args)]
pub struct ScaleOptions {
    #[command(flatten)]
    selection: ScaleSelection,

    /// Print a YAML document instead of a table
    #[arg(long = "yaml")]
    yaml: bool,
}

impl ScaleOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let scale = self.selection.to_scale()?;

        if self.yaml {
            let dto = ScaleWheelDto::Scale(ScaleDto::from_scale(&scale));
            let yaml = serde_yaml::to_string(&dto).handle_error("Could not serialize scale")?;
            return Ok(app.write(yaml)?);
        }

        let mode_name = if scale.mode().is_major() {
            "major"
        } else {
            "minor"
        };
        app.writeln(format_args!("{} {}", scale.tonic(), mode_name))?;

        let mut steps = scale.steps();
        for degree in scale.degrees() {
            let step = steps.next().map(|kind| kind.name()).unwrap_or_default();
            let row = format!(
                "{index:>2} | {spelling:<2} | {note:<7} | MIDI {midi:>3} | {step}",
                index = degree.index + 1,
                spelling = degree.spelling(),
                note = degree.note,
                midi = degree.note.midi_number(),
            );
            app.writeln(row.trim_end())?;
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct CodeOptions {
    #[command(flatten)]
    selection: ScaleSelection,
}

impl CodeOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let scale = self.selection.to_scale()?;
        let block = app.layout.code.layout(&scale);
        Ok(app.write(block)?)
    }
}
