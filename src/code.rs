//! A pseudo-code listing mirroring the pitch number of every scale degree.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Shape},
    scale::{Scale, ScaleDegree},
    surface::{Layer, Primitive, RenderSurface, Role, ShapeLabel},
};

const TEXT_SIZE: f64 = 3.0;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CodeBlockGeometry {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub line_height: f64,
}

impl Default for CodeBlockGeometry {
    fn default() -> Self {
        Self {
            origin: Point::new(26.5, 96.0),
            width: 47.5,
            height: 45.0,
            line_height: 5.0,
        }
    }
}

/// One line of the listing: a `playSound(..)` call followed by a comment naming the note.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeLine {
    pub degree: ScaleDegree,
    pub call: String,
    pub comment: String,
    pub call_anchor: Point,
    pub comment_anchor: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CodeBlock {
    pub lines: Vec<CodeLine>,
}

impl CodeBlockGeometry {
    /// Derives the listing of `scale`.
    ///
    /// ```
    /// # use scale_wheel::code::CodeBlockGeometry;
    /// # use scale_wheel::note::{Mode, NoteLetter};
    /// # use scale_wheel::scale::Scale;
    /// let block = CodeBlockGeometry::default().layout(&Scale::new(NoteLetter::E, Mode::Major));
    ///
    /// assert_eq!(block.lines[0].call, "playSound(64)");
    /// assert_eq!(block.lines[1].comment, "# F♯");
    /// assert_eq!(block.lines[7].call, "playSound(76)");
    /// ```
    pub fn layout(&self, scale: &Scale) -> CodeBlock {
        let center_x = self.origin.x + self.width / 2.0;

        let lines = scale
            .degrees()
            .iter()
            .map(|degree| {
                let row = degree.index as f64 * self.line_height;
                CodeLine {
                    degree: *degree,
                    call: format!("playSound({})", degree.note.midi_number()),
                    comment: format!("# {}", degree.spelling()),
                    call_anchor: Point::new(center_x - 4.5, self.origin.y + 5.0 + row),
                    comment_anchor: Point::new(center_x + 12.5, self.origin.y + 6.3 + row),
                }
            })
            .collect();

        CodeBlock { lines }
    }

    pub fn paint(&self, surface: &mut impl RenderSurface, scale: &Scale, block: &CodeBlock) {
        let mode = scale.mode();
        let mut primitives = vec![Primitive::new(
            Shape::Rect {
                origin: self.origin,
                width: self.width,
                height: self.height,
                corner_radius: 2.0,
            },
            ShapeLabel::of_role(Role::CodeBlock),
            mode,
        )];

        for line in &block.lines {
            let letter = line.degree.letter;
            let position = Some(line.degree.position());
            primitives.push(Primitive::new(
                Shape::Text {
                    anchor: line.comment_anchor,
                    content: line.comment.clone(),
                    size: TEXT_SIZE,
                },
                ShapeLabel::of_note(Role::Comment, letter, position),
                mode,
            ));
            primitives.push(Primitive::new(
                Shape::Text {
                    anchor: line.call_anchor,
                    content: line.call.clone(),
                    size: TEXT_SIZE,
                },
                ShapeLabel::of_note(Role::Code, letter, position),
                mode,
            ));
        }

        surface.paint(Layer::Code, primitives);
    }
}

impl Display for CodeBlock {
    /// ```
    /// # use scale_wheel::code::CodeBlockGeometry;
    /// # use scale_wheel::note::{Mode, NoteLetter};
    /// # use scale_wheel::scale::Scale;
    /// let block = CodeBlockGeometry::default().layout(&Scale::new(NoteLetter::D, Mode::Minor));
    /// let listing = block.to_string();
    /// assert_eq!(listing.lines().nth(5), Some("playSound(70)  # B♭"));
    /// ```
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{:<14} {}", line.call, line.comment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;

    use crate::note::{Mode, NoteLetter};

    use super::*;

    #[test]
    fn listing_of_g_minor() {
        let block = CodeBlockGeometry::default().layout(&Scale::new(NoteLetter::G, Mode::Minor));
        assert_eq!(
            block.to_string(),
            "playSound(67)  # G\n\
             playSound(69)  # A\n\
             playSound(70)  # B♭\n\
             playSound(72)  # C\n\
             playSound(74)  # D\n\
             playSound(75)  # E♭\n\
             playSound(77)  # F\n\
             playSound(79)  # G\n"
        );
    }

    #[test]
    fn line_anchors() {
        let block = CodeBlockGeometry::default().layout(&Scale::new(NoteLetter::C, Mode::Major));
        assert_approx_eq!(block.lines[0].call_anchor.x, 45.75);
        assert_approx_eq!(block.lines[0].call_anchor.y, 101.0);
        assert_approx_eq!(block.lines[3].comment_anchor.x, 62.75);
        assert_approx_eq!(block.lines[3].comment_anchor.y, 117.3);
    }
}
