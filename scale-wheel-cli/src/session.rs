//! Commands driving a mounted widget through pointer events.

use clap::Args;
use scale_wheel::{
    geometry::{Point, ScreenPoint, Transform},
    surface::{RenderSurface, Scene},
    synth::{LoggingSynthesizer, Synthesizer},
    widget::ScaleWidget,
};

use crate::{scale::ScaleSelection, svg::SvgDocument, App, CliError, CliResult};

/// Size of the SVG view box in local coordinates.
const VIEW_BOX: (f64, f64) = (100.0, 145.0);

/// Largest rotation applied by a single scripted pointer move.
const MAX_ROTATION_PER_MOVE: f64 = 45.0;

#[derive(Args)]
pub struct SvgOptions {
    #[command(flatten)]
    selection: ScaleSelection,

    /// Rotate the wheel by dragging it clockwise by the given number of degrees
    #[arg(
        long = "rotation",
        default_value = "0",
        allow_hyphen_values = true,
        value_parser = parse_finite
    )]
    rotation: f64,
}

impl SvgOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let mut widget = mount_widget(app, &self.selection, Transform::identity())?;
        if self.rotation != 0.0 {
            rotate_wheel(&mut widget, self.rotation)?;
        }
        write_svg(app, widget.surface())
    }
}

#[derive(Args)]
pub struct DragOptions {
    #[command(flatten)]
    selection: ScaleSelection,

    /// Pointer positions in screen coordinates, e.g. 50,19. The first one presses, the last one releases.
    #[arg(long = "path", required = true, num_args = 1.., value_parser = parse_point)]
    path: Vec<Point>,

    /// Scale factor between local and screen coordinates
    #[arg(long = "scale", default_value = "1", value_parser = parse_display_scale)]
    display_scale: f64,

    /// Print the resulting SVG document instead of the state
    #[arg(long = "svg")]
    svg: bool,
}

impl DragOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let screen_transform = Transform::scaling(self.display_scale, self.display_scale);
        let mut widget = mount_widget(app, &self.selection, screen_transform)?;

        let (first, rest) = self
            .path
            .split_first()
            .ok_or_else(|| CliError::CommandError("The path is empty".to_owned()))?;

        widget.on_pointer_down(*first);
        let mut last = *first;
        for &position in rest {
            widget.on_pointer_move(position);
            last = position;
        }
        widget.on_pointer_up(last);

        if self.svg {
            return write_svg(app, widget.surface());
        }

        let mode_name = if widget.mode().is_major() {
            "major"
        } else {
            "minor"
        };
        app.writeln(format_args!("tonic: {}", widget.tonic()))?;
        app.writeln(format_args!("mode: {mode_name}"))?;
        app.writeln(format_args!("rotation: {:.2}", widget.rotation_angle()))?;
        Ok(())
    }
}

fn mount_widget(
    app: &App,
    selection: &ScaleSelection,
    screen_transform: Transform,
) -> CliResult<ScaleWidget<Scene, LoggingSynthesizer>> {
    let mut scene = Scene::new();
    scene.mount(screen_transform);

    let mut widget = ScaleWidget::new(scene, LoggingSynthesizer, app.layout.clone())
        .with_scale(selection.tonic()?, selection.mode());
    widget.mount();
    Ok(widget)
}

/// Drags the wheel around its center by `degrees`, clockwise on screen for positive values.
fn rotate_wheel<S: RenderSurface, Y: Synthesizer>(
    widget: &mut ScaleWidget<S, Y>,
    degrees: f64,
) -> CliResult<()> {
    let wheel = widget.layout().wheel.clone();
    let grip = wheel
        .center
        .polar_offset(wheel.radius * 0.8, 90f64.to_radians());

    let surface = widget.surface();
    let (Some(center), Some(grip)) = (
        surface.local_to_screen(wheel.center),
        surface.local_to_screen(grip),
    ) else {
        return Err(CliError::CommandError("Widget is not mounted".to_owned()));
    };

    let radius = center.distance(grip);
    let start_angle = center.screen_angle_to(grip);
    let num_moves = (degrees.abs() / MAX_ROTATION_PER_MOVE).ceil().max(1.0) as usize;

    widget.on_pointer_down(grip);
    let mut position = grip;
    for index in 1..=num_moves {
        let angle = start_angle + (degrees * index as f64 / num_moves as f64).to_radians();
        position = center + radius * Point::from_angle(angle);
        widget.on_pointer_move(position);
    }
    widget.on_pointer_up(position);

    Ok(())
}

fn write_svg(app: &mut App, scene: &Scene) -> CliResult<()> {
    let (width, height) = VIEW_BOX;
    Ok(app.write(SvgDocument {
        scene,
        width,
        height,
    })?)
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("Invalid point '{s}'. Expected x,y"))?;
    let coordinate = |value: &str| {
        parse_finite(value).map_err(|err| format!("Invalid coordinate in '{s}': {err}"))
    };
    Ok(Point::new(coordinate(x)?, coordinate(y)?))
}

fn parse_finite(s: &str) -> Result<f64, String> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("Invalid number '{s}': {err}"))?;
    if !value.is_finite() {
        return Err(format!("Expected a finite number but got '{s}'"));
    }
    Ok(value)
}

fn parse_display_scale(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;
    if value <= 0.0 {
        return Err(format!("Expected a positive scale factor but got '{s}'"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_parsed() {
        assert_eq!(parse_point("50,19"), Ok(Point::new(50.0, 19.0)));
        assert_eq!(parse_point(" 1.5 , -2"), Ok(Point::new(1.5, -2.0)));
        assert!(parse_point("50").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("NaN,39").is_err());
        assert!(parse_point("50,inf").is_err());
    }

    #[test]
    fn numbers_must_be_finite() {
        assert_eq!(parse_finite("-90"), Ok(-90.0));
        assert!(parse_finite("inf").is_err());
        assert!(parse_finite("-infinity").is_err());
        assert!(parse_finite("NaN").is_err());

        assert_eq!(parse_display_scale("2"), Ok(2.0));
        assert!(parse_display_scale("0").is_err());
        assert!(parse_display_scale("-1").is_err());
        assert!(parse_display_scale("inf").is_err());
    }
}
