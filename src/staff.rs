//! Lay out a scale on a five-line treble staff.
//!
//! Vertical note positions are linear in the number of natural-note steps above middle C, so accidentals never move a note head.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Shape},
    note::Accidental,
    scale::{Scale, ScaleDegree, StepKind},
    surface::{Layer, Primitive, RenderSurface, Role, ShapeLabel},
};

pub const NUM_STAFF_LINES: usize = 5;

/// Distance between a note's y and the inner bound of the staff beyond which a ledger line is drawn.
const LEDGER_MARGIN: f64 = 2.0;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StaffGeometry {
    /// y of the highest staff line.
    pub top: f64,
    pub line_spacing: f64,
    pub left: f64,
    pub right: f64,
    /// Position of middle C, i.e. of the lowest tonic.
    pub origin: Point,
    pub horizontal_step: f64,
    /// Vertical distance between two adjacent natural notes.
    pub vertical_step: f64,
    pub clef: ClefGeometry,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ClefGeometry {
    pub href: String,
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Default for StaffGeometry {
    fn default() -> Self {
        Self {
            top: 70.0,
            line_spacing: 3.25,
            left: 0.0,
            right: 100.0,
            origin: Point::new(18.0, 86.0),
            horizontal_step: 11.0,
            vertical_step: 1.6,
            clef: ClefGeometry {
                href: "/assets/images/treble_clef.png".to_owned(),
                origin: Point::new(0.0, 64.0),
                width: 15.0,
                height: 25.0,
            },
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StemDirection {
    Up,
    Down,
}

/// A straight line segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        }
    }
}

/// The drawing of an accidental next to a note head.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AccidentalGlyph {
    /// Two slanted horizontal strokes followed by two vertical strokes.
    Sharp([Segment; 4]),
    /// A vertical stroke with a small bowl.
    Flat { stem: Segment, bowl: (Point, Point) },
}

impl AccidentalGlyph {
    /// Places the glyph relative to the note head at `head`.
    pub fn at(accidental: Accidental, head: Point) -> Self {
        let Point { x, y } = head;
        match accidental {
            Accidental::Sharp => AccidentalGlyph::Sharp([
                Segment::new(x - 5.0, y + 1.0, x - 3.0, y - 1.0),
                Segment::new(x - 5.0, y + 3.0, x - 3.0, y + 1.0),
                Segment::new(x - 4.35, y + 4.5, x - 4.35, y - 1.5),
                Segment::new(x - 3.55, y + 3.5, x - 3.55, y - 2.5),
            ]),
            Accidental::Flat => AccidentalGlyph::Flat {
                stem: Segment::new(x - 4.35, y + 1.5, x - 4.35, y - 4.5),
                bowl: (Point::new(x - 4.35, y), Point::new(x - 4.35, y + 1.5)),
            },
        }
    }

    pub fn accidental(&self) -> Accidental {
        match self {
            AccidentalGlyph::Sharp(_) => Accidental::Sharp,
            AccidentalGlyph::Flat { .. } => Accidental::Flat,
        }
    }

    fn shapes(&self) -> Vec<Shape> {
        match self {
            AccidentalGlyph::Sharp(segments) => segments
                .iter()
                .map(|segment| Shape::Line(segment.from, segment.to))
                .collect(),
            AccidentalGlyph::Flat { stem, bowl } => vec![
                Shape::Line(stem.from, stem.to),
                Shape::Arc {
                    from: bowl.0,
                    to: bowl.1,
                    rx: 2.5,
                    ry: 0.5,
                    rotation: -45.0,
                },
            ],
        }
    }
}

/// A scale degree placed on the staff.
#[derive(Clone, Debug, PartialEq)]
pub struct StaffNote {
    pub degree: ScaleDegree,
    pub head: Point,
    pub stem_direction: StemDirection,
    pub stem: Segment,
    pub ledger: Option<Segment>,
    pub accidental: Option<AccidentalGlyph>,
}

/// A chevron between two adjacent notes marking a whole or a half step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepMarker {
    pub kind: StepKind,
    pub points: [Point; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct StaffLayout {
    pub lines: [f64; NUM_STAFF_LINES],
    pub notes: Vec<StaffNote>,
    pub steps: Vec<StepMarker>,
}

impl StaffGeometry {
    pub fn bottom(&self) -> f64 {
        self.top + self.line_spacing * (NUM_STAFF_LINES - 1) as f64
    }

    /// Vertical center used to decide the stem direction.
    pub fn center(&self) -> f64 {
        (self.top + self.bottom()) / 2.0
    }

    /// Position of a note head `staff_step` natural notes above middle C, in column `column`.
    pub fn note_position(&self, column: usize, staff_step: usize) -> Point {
        Point::new(
            self.origin.x + self.horizontal_step * column as f64,
            self.origin.y - self.vertical_step * staff_step as f64,
        )
    }

    /// Computes the staff geometry of all eight degrees of `scale`.
    ///
    /// ```
    /// # use scale_wheel::note::{Accidental, Mode, NoteLetter};
    /// # use scale_wheel::scale::Scale;
    /// # use scale_wheel::staff::{StaffGeometry, StemDirection};
    /// let layout = StaffGeometry::default().layout(&Scale::new(NoteLetter::D, Mode::Major));
    ///
    /// assert_eq!(layout.notes.len(), 8);
    /// assert_eq!(layout.steps.len(), 7);
    /// assert_eq!(layout.notes[0].stem_direction, StemDirection::Up);
    /// assert!(layout.notes[0].ledger.is_none());
    /// assert_eq!(
    ///     layout.notes[2].accidental.map(|glyph| glyph.accidental()),
    ///     Some(Accidental::Sharp)
    /// );
    /// ```
    pub fn layout(&self, scale: &Scale) -> StaffLayout {
        let lines = std::array::from_fn(|index| self.top + self.line_spacing * index as f64);

        let notes: Vec<_> = scale
            .degrees()
            .iter()
            .map(|degree| self.place(scale, degree))
            .collect();

        let steps = notes
            .iter()
            .zip(scale.steps())
            .map(|(note, kind)| {
                let Point { x, y } = note.head;
                StepMarker {
                    kind,
                    points: [
                        Point::new(x + 0.6, y + 2.2),
                        Point::new(x + 5.5, y + 6.0),
                        Point::new(x + 5.5, y + 6.0),
                        Point::new(x + 10.4, y + 0.6),
                    ],
                }
            })
            .collect();

        StaffLayout {
            lines,
            notes,
            steps,
        }
    }

    fn place(&self, scale: &Scale, degree: &ScaleDegree) -> StaffNote {
        let staff_step = degree.staff_step(scale.tonic());
        let head = self.note_position(degree.index, staff_step);
        let Point { x, y } = head;

        let (stem_direction, stem) = if y > self.center() {
            (StemDirection::Up, Segment::new(x + 1.9, y - 0.8, x + 1.9, y - 9.5))
        } else {
            (StemDirection::Down, Segment::new(x - 1.9, y + 0.8, x - 1.9, y + 9.5))
        };

        StaffNote {
            degree: *degree,
            head,
            stem_direction,
            stem,
            ledger: self.ledger(head, staff_step),
            accidental: degree
                .accidental
                .map(|accidental| AccidentalGlyph::at(accidental, head)),
        }
    }

    /// A ledger line for notes outside the staff.
    ///
    /// Even steps from middle C sit on a line, odd steps between two lines, so the ledger line then goes towards the staff.
    fn ledger(&self, head: Point, staff_step: usize) -> Option<Segment> {
        let upper_bound = self.top - LEDGER_MARGIN;
        let lower_bound = self.bottom() + LEDGER_MARGIN;
        let Point { x, y } = head;

        if y >= upper_bound && y <= lower_bound {
            return None;
        }

        let line_y = if staff_step % 2 == 0 {
            y + 0.25
        } else if y < upper_bound {
            y + 1.25
        } else {
            y - 1.25
        };
        Some(Segment::new(x - 3.0, line_y, x + 2.7, line_y))
    }

    /// Paints the staff lines, the clef, all notes and the step markers.
    pub fn paint(&self, surface: &mut impl RenderSurface, scale: &Scale, layout: &StaffLayout) {
        let mode = scale.mode();
        let mut primitives = Vec::new();

        for &y in &layout.lines {
            primitives.push(Primitive::new(
                Shape::Line(Point::new(self.left, y), Point::new(self.right, y)),
                ShapeLabel::of_role(Role::StaffLines),
                mode,
            ));
        }
        primitives.push(Primitive::new(
            Shape::Image {
                href: self.clef.href.clone(),
                origin: self.clef.origin,
                width: self.clef.width,
                height: self.clef.height,
            },
            ShapeLabel::of_role(Role::StaffLines),
            mode,
        ));

        for (index, note) in layout.notes.iter().enumerate() {
            if let Some(step) = layout.steps.get(index) {
                primitives.push(Primitive::new(
                    Shape::Polyline(step.points.to_vec()),
                    ShapeLabel::of_role(Role::Step(step.kind)),
                    mode,
                ));
            }

            let label = ShapeLabel::of_note(
                Role::Staff,
                note.degree.letter,
                Some(note.degree.position()),
            );
            let mut shapes = vec![
                Shape::Ellipse {
                    center: note.head,
                    rx: 2.0,
                    ry: 1.2,
                    rotation: -18.0,
                },
                Shape::Line(note.stem.from, note.stem.to),
            ];
            shapes.extend(note.ledger.map(|ledger| Shape::Line(ledger.from, ledger.to)));
            shapes.extend(note.accidental.iter().flat_map(AccidentalGlyph::shapes));

            primitives.extend(
                shapes
                    .into_iter()
                    .map(|shape| Primitive::new(shape, label, mode)),
            );
        }

        surface.paint(Layer::Staff, primitives);
    }
}
