//! The rotating note-picker wheel.
//!
//! The wheel is split into seven equal sectors, one per note letter. Dragging rotates the painted wheel and the letter under the fixed pick point becomes the tonic.
//! Sectors are laid out once from the tonic current at layout time. Afterwards only the rotation transform changes which sector sits under the pick point.
//!
//! Rotations follow the SVG convention: positive angles turn the wheel clockwise on screen, which brings the letter *below* the current tonic under the pick point.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, ScreenPoint, Shape, Transform},
    math,
    note::{Mode, NoteLetter},
    surface::{Layer, Primitive, RenderSurface, Role, ShapeLabel},
};

pub const NUM_SECTORS: usize = 7;

/// Angle covered by one sector, in degrees.
pub const SECTOR_ANGLE: f64 = 360.0 / NUM_SECTORS as f64;

/// Size of the letters printed on the sectors.
const LABEL_SIZE: f64 = 5.0;

/// Pointer samples closer than this to the wheel center, in screen units, have no usable direction.
const MIN_GRIP_RADIUS: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelGeometry {
    pub center: Point,
    pub radius: f64,
    /// Angle in degrees at which sector 0 starts, counterclockwise from the positive x axis.
    pub offset: f64,
    /// The fixed point, in local coordinates, whose sector determines the tonic.
    pub pick_point: Point,
    /// Corners of the triangular pick indicator.
    pub picker: Vec<Point>,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            center: Point::new(50.0, 39.0),
            radius: 25.0,
            offset: 12.83,
            pick_point: Point::new(50.0, 18.0),
            picker: vec![
                Point::new(50.0, 18.0),
                Point::new(47.0, 11.0),
                Point::new(53.0, 11.0),
            ],
        }
    }
}

/// A sector of the wheel as laid out, before any rotation.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelSector {
    pub index: usize,
    pub letter: NoteLetter,
    pub shape: Shape,
    /// Where the letter is printed: the centroid of the sector's triangle.
    pub label_anchor: Point,
}

impl WheelGeometry {
    /// Lays out the seven sectors for the given tonic.
    ///
    /// Sector `i` spans `[offset + i * SECTOR_ANGLE, offset + (i + 1) * SECTOR_ANGLE)` and shows the letter `tonic + 1 - i`.
    /// With the default geometry the tonic's sector (sector 1) is centered on the pick point.
    ///
    /// ```
    /// # use scale_wheel::note::NoteLetter;
    /// # use scale_wheel::wheel::WheelGeometry;
    /// let sectors = WheelGeometry::default().layout_sectors(NoteLetter::C);
    /// let letters: Vec<_> = sectors.iter().map(|sector| sector.letter).collect();
    /// assert_eq!(
    ///     letters,
    ///     [
    ///         NoteLetter::D,
    ///         NoteLetter::C,
    ///         NoteLetter::B,
    ///         NoteLetter::A,
    ///         NoteLetter::G,
    ///         NoteLetter::F,
    ///         NoteLetter::E
    ///     ]
    /// );
    /// ```
    pub fn layout_sectors(&self, tonic: NoteLetter) -> Vec<WheelSector> {
        let sweep = SECTOR_ANGLE.to_radians();
        (0..NUM_SECTORS)
            .map(|index| {
                let start_angle = self.offset.to_radians() + index as f64 * sweep;
                let (left, right) = Shape::sector_corners(self.center, self.radius, start_angle, sweep);
                WheelSector {
                    index,
                    letter: tonic.plus_steps(1 - index as i32),
                    shape: Shape::Sector {
                        center: self.center,
                        radius: self.radius,
                        start_angle,
                        sweep,
                    },
                    label_anchor: Point::new(
                        (left.x + right.x + self.center.x) / 3.0,
                        (left.y + right.y + self.center.y) / 3.0,
                    ),
                }
            })
            .collect()
    }

    /// Paints the wheel body and the pick indicator.
    pub fn paint(&self, surface: &mut impl RenderSurface, sectors: &[WheelSector], mode: Mode) {
        let mut primitives = Vec::with_capacity(2 * sectors.len());
        for sector in sectors {
            primitives.push(Primitive::new(
                sector.shape.clone(),
                ShapeLabel::of_note(Role::Wheel, sector.letter, None),
                mode,
            ));
        }
        for sector in sectors {
            primitives.push(Primitive::new(
                Shape::Text {
                    anchor: sector.label_anchor,
                    content: sector.letter.to_string(),
                    size: LABEL_SIZE,
                },
                ShapeLabel::of_note(Role::WheelText, sector.letter, None),
                mode,
            ));
        }
        surface.paint(Layer::Wheel, primitives);
        surface.set_layer_transform(Layer::Wheel, Transform::identity());

        surface.paint(
            Layer::Picker,
            vec![Primitive::new(
                Shape::Polygon(self.picker.clone()),
                ShapeLabel::of_role(Role::Picker),
                mode,
            )],
        );
    }

    /// Applies `rotation` degrees to the wheel body and counter-rotates every letter around its anchor so it stays upright.
    pub fn apply_rotation(&self, surface: &mut impl RenderSurface, rotation: f64) {
        surface.set_layer_transform(Layer::Wheel, Transform::rotation_about(rotation, self.center));
        surface.set_primitive_transforms(Layer::Wheel, &|primitive| match &primitive.shape {
            Shape::Text { anchor, .. } if primitive.label.role == Role::WheelText => {
                Some(Transform::rotation_about(-rotation, *anchor))
            }
            _ => None,
        });
    }

    /// Finds the letter of the painted sector currently under the pick point.
    ///
    /// Returns [`None`] if no sector is hit, e.g. if the wheel has not been painted yet.
    pub fn pick(&self, surface: &impl RenderSurface) -> Option<NoteLetter> {
        surface
            .hit_test(self.pick_point)
            .into_iter()
            .find(|label| label.role == Role::Wheel)
            .and_then(|label| label.letter)
    }
}

/// A drag in progress, from pointer-down until pointer-up.
#[derive(Copy, Clone, Debug, PartialEq)]
struct PointerGesture {
    /// Last usable pointer position in screen coordinates.
    last_position: Point,
}

/// Rotation state of the wheel. The tonic is not stored here but read off the painted wheel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WheelState {
    rotation_angle: f64,
    baseline_angle: f64,
    gesture: Option<PointerGesture>,
}

impl WheelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated rotation in degrees. Not bounded, i.e. full turns are kept.
    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    /// Rotation at which the wheel came to rest on the last pointer-up.
    ///
    /// Unlike [`WheelState::rotation_angle`] it does not change while a drag is in progress.
    pub fn baseline_angle(&self) -> f64 {
        self.baseline_angle
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Starts a drag at `position` (screen coordinates).
    pub fn pointer_down(&mut self, position: Point) {
        if !position.is_finite() {
            log::trace!("Ignoring pointer-down at non-finite position {position}");
            return;
        }
        self.gesture = Some(PointerGesture {
            last_position: position,
        });
    }

    /// Adds the angle swept by the pointer around `screen_center` since the last sample.
    ///
    /// Returns the applied delta in degrees, or [`None`] if no drag is active or the sample was ignored.
    /// Samples at non-finite positions or too close to the center to have a direction are ignored.
    ///
    /// ```
    /// # use assert_approx_eq::assert_approx_eq;
    /// # use scale_wheel::geometry::Point;
    /// # use scale_wheel::wheel::WheelState;
    /// let center = Point::new(0.0, 0.0);
    /// let mut state = WheelState::new();
    ///
    /// assert_eq!(state.pointer_move(Point::new(0.0, 10.0), center), None);
    ///
    /// state.pointer_down(Point::new(10.0, 0.0));
    /// let delta = state.pointer_move(Point::new(0.0, 10.0), center).unwrap();
    /// assert_approx_eq!(delta, 90.0);
    /// assert_approx_eq!(state.rotation_angle(), 90.0);
    /// ```
    pub fn pointer_move(&mut self, position: Point, screen_center: Point) -> Option<f64> {
        let gesture = self.gesture.as_mut()?;
        if !position.is_finite() {
            log::trace!("Ignoring pointer sample at non-finite position {position}");
            return None;
        }
        if position.distance(screen_center) < MIN_GRIP_RADIUS {
            log::trace!("Ignoring pointer sample {position} next to the wheel center");
            return None;
        }
        if gesture.last_position.distance(screen_center) < MIN_GRIP_RADIUS {
            gesture.last_position = position;
            return None;
        }

        let previous = screen_center.screen_angle_to(gesture.last_position);
        let current = screen_center.screen_angle_to(position);
        let delta = math::unwrap_degrees((current - previous).to_degrees());
        if !delta.is_finite() {
            log::trace!("Ignoring pointer sample {position} with non-finite delta");
            return None;
        }

        gesture.last_position = position;
        self.rotation_angle += delta;
        Some(delta)
    }

    /// Ends the drag, if any, and records the current rotation as the baseline.
    pub fn pointer_up(&mut self) {
        self.gesture = None;
        self.baseline_angle = self.rotation_angle;
    }
}
