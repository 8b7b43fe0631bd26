//! The interactive scale widget: wheel, mode button, staff and code block.
//!
//! All state is owned by one [`ScaleWidget`] and mutated synchronously from the host's pointer events.

use serde::{Deserialize, Serialize};

use crate::{
    code::{CodeBlock, CodeBlockGeometry},
    geometry::{Point, Shape},
    note::{Mode, NoteLetter},
    scale::{DegreePosition, Scale},
    staff::{StaffGeometry, StaffLayout},
    surface::{Layer, Primitive, RenderSurface, Role, ShapeLabel},
    synth::{NoteSound, Synthesizer},
    wheel::{WheelGeometry, WheelSector, WheelState},
};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonGeometry {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
}

impl Default for ButtonGeometry {
    fn default() -> Self {
        Self {
            origin: Point::new(2.0, 2.0),
            width: 26.0,
            height: 10.0,
            corner_radius: 2.0,
        }
    }
}

impl ButtonGeometry {
    pub fn paint(&self, surface: &mut impl RenderSurface, mode: Mode) {
        let label = ShapeLabel::of_role(Role::Button);
        let caption = mode.caption();
        let text_size = 3.0;
        let text_width = caption.chars().count() as f64 * text_size * 0.6;

        surface.paint(
            Layer::Button,
            vec![
                Primitive::new(
                    Shape::Rect {
                        origin: self.origin,
                        width: self.width,
                        height: self.height,
                        corner_radius: self.corner_radius,
                    },
                    label,
                    mode,
                ),
                Primitive::new(
                    Shape::Text {
                        anchor: Point::new(
                            self.origin.x + (self.width - text_width) / 2.0,
                            self.origin.y + self.height / 2.0,
                        ),
                        content: caption.to_owned(),
                        size: text_size,
                    },
                    label,
                    mode,
                ),
            ],
        );
    }
}

/// All geometry of the widget. Every part defaults to the reference rendering.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WidgetLayout {
    pub wheel: WheelGeometry,
    pub button: ButtonGeometry,
    pub staff: StaffGeometry,
    pub code: CodeBlockGeometry,
}

pub struct ScaleWidget<S, Y> {
    surface: S,
    synth: Y,
    layout: WidgetLayout,
    scale: Scale,
    staff: StaffLayout,
    code: CodeBlock,
    sectors: Vec<WheelSector>,
    wheel: WheelState,
    sound: NoteSound,
    hovered: Option<ShapeLabel>,
}

impl<S: RenderSurface, Y: Synthesizer> ScaleWidget<S, Y> {
    /// Creates a widget showing C major. Nothing is painted before [`ScaleWidget::mount`].
    pub fn new(surface: S, synth: Y, layout: WidgetLayout) -> Self {
        let scale = Scale::new(NoteLetter::C, Mode::Major);
        Self {
            staff: layout.staff.layout(&scale),
            code: layout.code.layout(&scale),
            sectors: layout.wheel.layout_sectors(scale.tonic()),
            scale,
            surface,
            synth,
            layout,
            wheel: WheelState::new(),
            sound: NoteSound::default(),
            hovered: None,
        }
    }

    /// Selects the initial tonic and mode. Intended to be called before mounting.
    pub fn with_scale(mut self, tonic: NoteLetter, mode: Mode) -> Self {
        self.set_scale(tonic, mode);
        self.sectors = self.layout.wheel.layout_sectors(tonic);
        self
    }

    pub fn tonic(&self) -> NoteLetter {
        self.scale.tonic()
    }

    pub fn mode(&self) -> Mode {
        self.scale.mode()
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn staff(&self) -> &StaffLayout {
        &self.staff
    }

    pub fn code(&self) -> &CodeBlock {
        &self.code
    }

    pub fn sectors(&self) -> &[WheelSector] {
        &self.sectors
    }

    pub fn wheel_state(&self) -> &WheelState {
        &self.wheel
    }

    pub fn rotation_angle(&self) -> f64 {
        self.wheel.rotation_angle()
    }

    pub fn hovered(&self) -> Option<&ShapeLabel> {
        self.hovered.as_ref()
    }

    pub fn layout(&self) -> &WidgetLayout {
        &self.layout
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn synth(&self) -> &Y {
        &self.synth
    }

    pub fn synth_mut(&mut self) -> &mut Y {
        &mut self.synth
    }

    /// Paints everything for the first time. The surface must be able to provide a screen transform by now.
    pub fn mount(&mut self) {
        self.render(true, true);
    }

    /// Recomputes and repaints the parts affected by a mode and/or tonic change.
    ///
    /// A mode change regenerates the wheel from the current tonic with zero rotation. A tonic change only regenerates the staff and the code block.
    pub fn update(&mut self, mode_changed: bool, tonic_changed: bool) {
        if mode_changed {
            self.render(false, true);
        }
        if tonic_changed {
            self.render(false, false);
        }
    }

    fn render(&mut self, first: bool, regenerate_wheel: bool) {
        if self.surface.screen_transform().is_none() {
            log::trace!("Surface not mounted yet. Skipping render");
            return;
        }

        let mode = self.scale.mode();

        if first || regenerate_wheel {
            self.sectors = self.layout.wheel.layout_sectors(self.scale.tonic());
            self.wheel = WheelState::new();
            self.layout.wheel.paint(&mut self.surface, &self.sectors, mode);
            self.layout.button.paint(&mut self.surface, mode);
        }

        self.staff = self.layout.staff.layout(&self.scale);
        self.layout.staff.paint(&mut self.surface, &self.scale, &self.staff);

        self.code = self.layout.code.layout(&self.scale);
        self.layout.code.paint(&mut self.surface, &self.scale, &self.code);

        self.apply_highlight();
    }

    fn set_scale(&mut self, tonic: NoteLetter, mode: Mode) {
        self.scale = Scale::new(tonic, mode);
        self.staff = self.layout.staff.layout(&self.scale);
        self.code = self.layout.code.layout(&self.scale);
    }

    /// Handles a pointer press at `position` (screen coordinates).
    ///
    /// A press on the wheel starts a drag. A press on a note-bearing shape starts its note.
    pub fn on_pointer_down(&mut self, position: Point) {
        let Some(local) = self.surface.screen_to_local(position) else {
            log::trace!("Ignoring pointer-down before mount");
            return;
        };
        let hits = self.surface.hit_test(local);

        if hits
            .iter()
            .any(|label| matches!(label.role, Role::Wheel | Role::WheelText | Role::Picker))
        {
            self.wheel.pointer_down(position);
        }

        if let Some(label) = hits.first().filter(|label| label.is_note()) {
            self.press_note(label);
        }
    }

    /// Handles a pointer movement anywhere on the page.
    ///
    /// While dragging, the wheel follows the pointer. In any case the sector under the pick point is re-evaluated and becomes the tonic.
    pub fn on_pointer_move(&mut self, position: Point) {
        let Some(screen_center) = self.surface.local_to_screen(self.layout.wheel.center) else {
            log::trace!("Ignoring pointer-move before mount");
            return;
        };

        if self.wheel.pointer_move(position, screen_center).is_some() {
            self.layout
                .wheel
                .apply_rotation(&mut self.surface, self.wheel.rotation_angle());
        }

        if let Some(letter) = self.layout.wheel.pick(&self.surface) {
            if letter != self.scale.tonic() {
                log::debug!(
                    "Picked {letter} at {:.2}° (started on {})",
                    self.wheel.rotation_angle(),
                    self.sectors[1].letter,
                );
            }
            self.set_scale(letter, self.scale.mode());
            self.update(false, true);
        }

        self.update_hover(position);
    }

    /// Handles a pointer release anywhere on the page. Ends the drag and releases the sounding note.
    pub fn on_pointer_up(&mut self, position: Point) {
        if self.wheel.is_dragging() {
            self.wheel.pointer_up();
            log::debug!(
                "Wheel released at {position}, resting at {:.2}°",
                self.wheel.baseline_angle()
            );
        }
        self.sound.release(&mut self.synth);
    }

    /// Handles a click. A click on the mode button toggles between major and minor.
    pub fn on_click(&mut self, position: Point) {
        let Some(local) = self.surface.screen_to_local(position) else {
            return;
        };
        let on_button = self
            .surface
            .hit_test(local)
            .first()
            .is_some_and(|label| label.role == Role::Button);

        if on_button {
            self.toggle_mode();
        }
    }

    /// Handles the pointer leaving the widget.
    pub fn on_pointer_leave(&mut self) {
        if self.hovered.take().is_some() {
            self.apply_highlight();
        }
    }

    pub fn toggle_mode(&mut self) {
        let mode = self.scale.mode().toggled();
        log::debug!("Switching to {}", mode.caption());
        self.set_scale(self.scale.tonic(), mode);
        self.update(true, false);
    }

    fn press_note(&mut self, label: &ShapeLabel) {
        let Some(letter) = label.letter else {
            return;
        };
        let position = label.position.unwrap_or(DegreePosition::Interior);
        let note = self.scale.degree_of(letter, position).note;
        self.sound.press(&mut self.synth, note);
    }

    fn update_hover(&mut self, position: Point) {
        let Some(local) = self.surface.screen_to_local(position) else {
            return;
        };
        let hovered = self
            .surface
            .hit_test(local)
            .into_iter()
            .next()
            .filter(ShapeLabel::is_note);

        if hovered != self.hovered {
            self.hovered = hovered;
            self.apply_highlight();
        }
    }

    fn apply_highlight(&mut self) {
        match self.hovered {
            Some(hovered) => self
                .surface
                .highlight(&|label| hovered.hover_group_contains(label)),
            None => self.surface.highlight(&|_| false),
        }
    }
}
