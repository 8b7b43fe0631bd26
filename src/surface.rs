//! The rendering surface the widget paints on and hit-tests against.
//!
//! [`Scene`] is a retained, in-memory implementation of [`RenderSurface`]. Hosts with a real canvas can implement the trait themselves.

use crate::{
    geometry::{Point, Shape, Transform},
    note::{Mode, NoteLetter},
    scale::{DegreePosition, StepKind},
};

/// Part of the widget a primitive belongs to.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Role {
    /// A sector of the note wheel.
    Wheel,
    /// The letter printed on a wheel sector.
    WheelText,
    /// The fixed pick indicator above the wheel.
    Picker,
    /// The major/minor toggle button.
    Button,
    /// Staff lines and the clef.
    StaffLines,
    /// A note drawn on the staff, including stem, ledger line and accidental.
    Staff,
    /// A whole or half step marker between two staff notes.
    Step(StepKind),
    /// The background of the code block.
    CodeBlock,
    /// A `playSound(..)` line of the code block.
    Code,
    /// The trailing comment of a code line.
    Comment,
}

/// Semantic metadata attached to every painted primitive.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct ShapeLabel {
    pub role: Role,
    pub letter: Option<NoteLetter>,
    pub position: Option<DegreePosition>,
}

impl ShapeLabel {
    pub fn of_role(role: Role) -> Self {
        Self {
            role,
            letter: None,
            position: None,
        }
    }

    pub fn of_note(role: Role, letter: NoteLetter, position: Option<DegreePosition>) -> Self {
        Self {
            role,
            letter: Some(letter),
            position,
        }
    }

    /// Whether pressing this shape should sound a note.
    pub fn is_note(&self) -> bool {
        matches!(self.role, Role::Wheel | Role::Staff | Role::Code) && self.letter.is_some()
    }

    /// Whether `other` is highlighted together with `self` while `self` is hovered.
    ///
    /// The first and the last scale degree share their letter, so hovering one of them only highlights shapes of the same position plus the wheel sector.
    pub fn hover_group_contains(&self, other: &ShapeLabel) -> bool {
        if !self.is_note() || !other.is_note() || self.letter != other.letter {
            return false;
        }
        match self.position {
            Some(DegreePosition::First) | Some(DegreePosition::Last) => {
                other.role == Role::Wheel || other.position == self.position
            }
            _ => true,
        }
    }
}

/// Groups of primitives that are replaced and transformed as a whole. Layers are painted in declaration order.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Layer {
    Wheel,
    Picker,
    Button,
    Staff,
    Code,
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::Wheel,
        Layer::Picker,
        Layer::Button,
        Layer::Staff,
        Layer::Code,
    ];
}

/// A shape together with its own transform, its label and its styling state.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub transform: Transform,
    pub label: ShapeLabel,
    pub mode: Mode,
    pub highlighted: bool,
}

impl Primitive {
    pub fn new(shape: Shape, label: ShapeLabel, mode: Mode) -> Self {
        Self {
            shape,
            transform: Transform::identity(),
            label,
            mode,
            highlighted: false,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// The host rendering surface.
///
/// All points passed to [`RenderSurface::hit_test`] are in the surface's local coordinates.
pub trait RenderSurface {
    /// The transform from local to screen coordinates, or [`None`] before the first layout.
    fn screen_transform(&self) -> Option<Transform>;

    /// Labels of all primitives painted at `point`, topmost first.
    fn hit_test(&self, point: Point) -> Vec<ShapeLabel>;

    /// Replaces all primitives of `layer`.
    fn paint(&mut self, layer: Layer, primitives: Vec<Primitive>);

    /// Sets the transform applied to the whole `layer`.
    fn set_layer_transform(&mut self, layer: Layer, transform: Transform);

    /// Replaces the transform of every primitive of `layer` whose label matches.
    fn set_primitive_transforms(
        &mut self,
        layer: Layer,
        transform_of: &dyn Fn(&Primitive) -> Option<Transform>,
    );

    /// Highlights exactly those primitives that satisfy `predicate`.
    fn highlight(&mut self, predicate: &dyn Fn(&ShapeLabel) -> bool);

    /// Maps a screen position to local coordinates.
    fn screen_to_local(&self, point: Point) -> Option<Point> {
        self.screen_transform()?
            .inverse()
            .map(|inverse| inverse.transform_point(point))
    }

    /// Maps a local position to screen coordinates.
    fn local_to_screen(&self, point: Point) -> Option<Point> {
        self.screen_transform().map(|ctm| ctm.transform_point(point))
    }
}

#[derive(Clone, Debug, Default)]
struct SceneLayer {
    transform: Transform,
    primitives: Vec<Primitive>,
}

/// A retained scene graph that keeps painted primitives in memory.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    screen_transform: Option<Transform>,
    layers: Vec<(Layer, SceneLayer)>,
}

impl Scene {
    /// Creates an unmounted scene. Geometry queries are no-ops until [`Scene::mount`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the scene available on screen with the given local-to-screen transform.
    pub fn mount(&mut self, screen_transform: Transform) {
        self.screen_transform = Some(screen_transform);
    }

    /// Iterates over all painted primitives in paint order, with the layer transform already applied.
    pub fn primitives(&self) -> impl Iterator<Item = (Layer, Transform, &Primitive)> + '_ {
        self.layers.iter().flat_map(|(layer, scene_layer)| {
            scene_layer
                .primitives
                .iter()
                .map(move |primitive| (*layer, scene_layer.transform, primitive))
        })
    }

    pub fn layer_transform(&self, layer: Layer) -> Transform {
        self.layer(layer)
            .map(|scene_layer| scene_layer.transform)
            .unwrap_or_default()
    }

    pub fn layer_primitives(&self, layer: Layer) -> &[Primitive] {
        self.layer(layer)
            .map(|scene_layer| &scene_layer.primitives[..])
            .unwrap_or_default()
    }

    fn layer(&self, layer: Layer) -> Option<&SceneLayer> {
        self.layers
            .iter()
            .find(|(candidate, _)| *candidate == layer)
            .map(|(_, scene_layer)| scene_layer)
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut SceneLayer {
        let index = match self.layers.iter().position(|(candidate, _)| *candidate == layer) {
            Some(index) => index,
            None => {
                let index = self
                    .layers
                    .iter()
                    .position(|(candidate, _)| *candidate > layer)
                    .unwrap_or(self.layers.len());
                self.layers.insert(index, (layer, SceneLayer::default()));
                index
            }
        };
        &mut self.layers[index].1
    }
}

impl RenderSurface for Scene {
    fn screen_transform(&self) -> Option<Transform> {
        self.screen_transform
    }

    fn hit_test(&self, point: Point) -> Vec<ShapeLabel> {
        let mut hits = Vec::new();
        for (_, scene_layer) in self.layers.iter().rev() {
            for primitive in scene_layer.primitives.iter().rev() {
                let to_local = (scene_layer.transform * primitive.transform).inverse();
                if let Some(to_local) = to_local {
                    if primitive.shape.contains(to_local.transform_point(point)) {
                        hits.push(primitive.label);
                    }
                }
            }
        }
        hits
    }

    fn paint(&mut self, layer: Layer, primitives: Vec<Primitive>) {
        self.layer_mut(layer).primitives = primitives;
    }

    fn set_layer_transform(&mut self, layer: Layer, transform: Transform) {
        self.layer_mut(layer).transform = transform;
    }

    fn set_primitive_transforms(
        &mut self,
        layer: Layer,
        transform_of: &dyn Fn(&Primitive) -> Option<Transform>,
    ) {
        for primitive in &mut self.layer_mut(layer).primitives {
            if let Some(transform) = transform_of(primitive) {
                primitive.transform = transform;
            }
        }
    }

    fn highlight(&mut self, predicate: &dyn Fn(&ShapeLabel) -> bool) {
        for (_, scene_layer) in &mut self.layers {
            for primitive in &mut scene_layer.primitives {
                primitive.highlighted = predicate(&primitive.label);
            }
        }
    }
}
