use std::{fs::File, path::Path};

use log::info;
use scale_wheel::widget::WidgetLayout;

use crate::{error::ResultExt, CliResult};

/// Loads a widget layout from a YAML file. Missing entries keep their default value.
pub fn load(location: &Path) -> CliResult<WidgetLayout> {
    let file = File::open(location)
        .handle_error(&format!("Could not open profile `{}`", location.display()))?;

    info!("Loading profile `{}`", location.display());
    Ok(serde_yaml::from_reader(file)?)
}
