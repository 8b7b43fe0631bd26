//! Serialization of the retained scene into a standalone SVG document.

use std::fmt::{self, Display, Formatter};

use scale_wheel::{
    geometry::{Shape, Transform},
    scale::{DegreePosition, StepKind},
    surface::{Layer, Primitive, Role, Scene},
};

const STYLE: &str = "\
.wheel{stroke:#333;stroke-width:0.3}\
.wheel.major{fill:#f6d8a8}.wheel.minor{fill:#a8c8f6}\
.wheel-text{font-family:sans-serif;dominant-baseline:middle}\
.picker{fill:#c33}\
.button{fill:#eee;stroke:#333;stroke-width:0.3}\
text.button{fill:#333;font-family:sans-serif;dominant-baseline:middle}\
.staff-lines,.staff{stroke:#000;stroke-width:0.3;fill:none}\
ellipse.staff{fill:#000}\
.step{fill:none;stroke-width:0.3}.step.whole{stroke:#393}.step.half{stroke:#c63}\
.code-block{fill:#222}\
.code,.comment{font-family:monospace;dominant-baseline:middle}\
.code{fill:#eee}.comment{fill:#999}\
.highlighted{stroke:#c33;fill:#c33}";

/// A scene rendered into a fixed view box.
pub struct SvgDocument<'a> {
    pub scene: &'a Scene,
    pub width: f64,
    pub height: f64,
}

impl Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
            Num(self.width),
            Num(self.height)
        )?;
        writeln!(f, "<style>{STYLE}</style>")?;

        for layer in Layer::ALL {
            let primitives = self.scene.layer_primitives(layer);
            if primitives.is_empty() {
                continue;
            }
            write!(f, r#"<g class="layer-{}""#, layer_name(layer))?;
            write_transform(f, &self.scene.layer_transform(layer))?;
            writeln!(f, ">")?;
            for primitive in primitives {
                write_primitive(f, primitive)?;
            }
            writeln!(f, "</g>")?;
        }

        writeln!(f, "</svg>")
    }
}

fn layer_name(layer: Layer) -> &'static str {
    match layer {
        Layer::Wheel => "wheel",
        Layer::Picker => "picker",
        Layer::Button => "button",
        Layer::Staff => "staff",
        Layer::Code => "code",
    }
}

/// CSS classes encoding the label and the styling state of a primitive.
pub fn class_names(primitive: &Primitive) -> String {
    let label = &primitive.label;
    let mut classes = vec![match label.role {
        Role::Wheel => "wheel",
        Role::WheelText => "wheel-text",
        Role::Picker => "picker",
        Role::Button => "button",
        Role::StaffLines => "staff-lines",
        Role::Staff => "staff",
        Role::Step(StepKind::Whole) => "step whole",
        Role::Step(StepKind::Half) => "step half",
        Role::CodeBlock => "code-block",
        Role::Code => "code",
        Role::Comment => "comment",
    }
    .to_owned()];

    if let Some(letter) = label.letter {
        classes.push(format!("note-{}", letter.name().to_ascii_lowercase()));
    }
    match label.position {
        Some(DegreePosition::First) => classes.push("first".to_owned()),
        Some(DegreePosition::Last) => classes.push("last".to_owned()),
        _ => {}
    }
    classes.push(if primitive.mode.is_major() { "major" } else { "minor" }.to_owned());
    if primitive.highlighted {
        classes.push("highlighted".to_owned());
    }

    classes.join(" ")
}

fn write_primitive(f: &mut Formatter, primitive: &Primitive) -> fmt::Result {
    let class = class_names(primitive);
    match &primitive.shape {
        Shape::Sector {
            center,
            radius,
            start_angle,
            sweep,
        } => {
            let (left, right) = Shape::sector_corners(*center, *radius, *start_angle, *sweep);
            let large_arc = u8::from(*sweep > std::f64::consts::PI);
            write!(
                f,
                r#"<path class="{class}" d="M {} {} L {} {} A {} {} 0 {large_arc} 0 {} {} Z""#,
                Num(center.x),
                Num(center.y),
                Num(right.x),
                Num(right.y),
                Num(*radius),
                Num(*radius),
                Num(left.x),
                Num(left.y),
            )?;
        }
        Shape::Polygon(points) | Shape::Polyline(points) => {
            let element = if matches!(primitive.shape, Shape::Polygon(_)) {
                "polygon"
            } else {
                "polyline"
            };
            write!(f, r#"<{element} class="{class}" points=""#)?;
            for (index, point) in points.iter().enumerate() {
                if index > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{},{}", Num(point.x), Num(point.y))?;
            }
            write!(f, r#"""#)?;
        }
        Shape::Line(from, to) => {
            write!(
                f,
                r#"<line class="{class}" x1="{}" y1="{}" x2="{}" y2="{}""#,
                Num(from.x),
                Num(from.y),
                Num(to.x),
                Num(to.y)
            )?;
        }
        Shape::Rect {
            origin,
            width,
            height,
            corner_radius,
        } => {
            write!(
                f,
                r#"<rect class="{class}" x="{}" y="{}" width="{}" height="{}" rx="{}""#,
                Num(origin.x),
                Num(origin.y),
                Num(*width),
                Num(*height),
                Num(*corner_radius)
            )?;
        }
        Shape::Ellipse {
            center,
            rx,
            ry,
            rotation,
        } => {
            write!(
                f,
                r#"<ellipse class="{class}" cx="{}" cy="{}" rx="{}" ry="{}" transform="rotate({} {} {})""#,
                Num(center.x),
                Num(center.y),
                Num(*rx),
                Num(*ry),
                Num(*rotation),
                Num(center.x),
                Num(center.y)
            )?;
        }
        Shape::Arc {
            from,
            to,
            rx,
            ry,
            rotation,
        } => {
            write!(
                f,
                r#"<path class="{class}" d="M {} {} A {} {} {} 0 1 {} {}""#,
                Num(from.x),
                Num(from.y),
                Num(*rx),
                Num(*ry),
                Num(*rotation),
                Num(to.x),
                Num(to.y)
            )?;
        }
        Shape::Text {
            anchor,
            content,
            size,
        } => {
            write!(
                f,
                r#"<text class="{class}" x="{}" y="{}" font-size="{}""#,
                Num(anchor.x),
                Num(anchor.y),
                Num(*size)
            )?;
            write_transform(f, &primitive.transform)?;
            return writeln!(f, ">{}</text>", Escaped(content));
        }
        Shape::Image {
            href,
            origin,
            width,
            height,
        } => {
            write!(
                f,
                r#"<image class="{class}" href="{}" x="{}" y="{}" width="{}" height="{}""#,
                Escaped(href),
                Num(origin.x),
                Num(origin.y),
                Num(*width),
                Num(*height)
            )?;
        }
    }
    write_transform(f, &primitive.transform)?;
    writeln!(f, "/>")
}

fn write_transform(f: &mut Formatter, transform: &Transform) -> fmt::Result {
    if transform.is_identity() {
        return Ok(());
    }
    let [a, b, c, d, e, translate_y] = transform.to_svg_matrix();
    write!(
        f,
        r#" transform="matrix({} {} {} {} {} {})""#,
        Num(a),
        Num(b),
        Num(c),
        Num(d),
        Num(e),
        Num(translate_y)
    )
}

/// A coordinate printed with at most three decimals.
struct Num(f64);

impl Display for Num {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let formatted = format!("{:.3}", self.0);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        match trimmed {
            "-0" | "" => write!(f, "0"),
            other => write!(f, "{other}"),
        }
    }
}

struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => write!(f, "&amp;")?,
                '<' => write!(f, "&lt;")?,
                '>' => write!(f, "&gt;")?,
                '"' => write!(f, "&quot;")?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use scale_wheel::{
        geometry::Point,
        note::{Mode, NoteLetter},
        surface::{RenderSurface, ShapeLabel},
    };

    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(Num(12.5).to_string(), "12.5");
        assert_eq!(Num(3.0).to_string(), "3");
        assert_eq!(Num(-0.0001).to_string(), "0");
        assert_eq!(Num(1.23456).to_string(), "1.235");
        assert_eq!(Num(120.0).to_string(), "120");
    }

    #[test]
    fn classes_reflect_label_and_state() {
        let mut primitive = Primitive::new(
            Shape::Line(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
            ShapeLabel::of_note(Role::Staff, NoteLetter::F, Some(DegreePosition::Last)),
            Mode::Minor,
        );
        assert_eq!(class_names(&primitive), "staff note-f last minor");

        primitive.highlighted = true;
        assert_eq!(class_names(&primitive), "staff note-f last minor highlighted");
    }

    #[test]
    fn text_is_escaped() {
        let mut scene = Scene::new();
        scene.paint(
            Layer::Code,
            vec![Primitive::new(
                Shape::Text {
                    anchor: Point::new(1.0, 2.0),
                    content: "a<b & c".to_owned(),
                    size: 3.0,
                },
                ShapeLabel::of_role(Role::Comment),
                Mode::Major,
            )],
        );

        let svg = SvgDocument {
            scene: &scene,
            width: 10.0,
            height: 10.0,
        }
        .to_string();
        assert!(svg.contains(
            r#"<text class="comment major" x="1" y="2" font-size="3">a&lt;b &amp; c</text>"#
        ));
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">"#));
    }
}
