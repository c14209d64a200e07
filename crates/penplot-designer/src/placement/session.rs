//! Placement session: the single gate for artwork transform edits
//!
//! Every edit path (reducer actions, drags, handles, keyboard nudges and
//! numeric fields) funnels through [`PlacementSession::apply_if_valid`], which
//! rejects candidates that would leave the work area.

use penplot_core::{MachineConfig, Point2};
use serde::Serialize;
use tracing::{debug, trace};

use super::bed::{base_scale, BedMetrics, ViewportSize};
use super::containment::is_inside_work_area;
use super::handles::{drag_to_transform, handle_transform_end, NodeState};
use super::snap::SnapSettings;
use crate::commands::{reduce, ArtTransform, ArtTransformAction, ArtTransformPatch, MIN_SCALE};
use crate::nudge::{action_for_key, Modifiers, NudgeKey, NudgeOutcome, NudgeSettings};
use crate::svg::SvgSize;

/// Result of a gated edit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApplyOutcome {
    pub accepted: bool,
    /// Transform in effect after the edit.
    pub transform: ArtTransform,
}

/// Individually editable transform fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformField {
    XMm,
    YMm,
    ScaleX,
    ScaleY,
    Rotation,
}

/// Artwork placement state over a machine work area
#[derive(Debug, Clone)]
pub struct PlacementSession {
    transform: ArtTransform,
    initial: ArtTransform,
    machine: MachineConfig,
    viewport: ViewportSize,
    art: Option<SvgSize>,
    warning: bool,
    snap: SnapSettings,
    nudge: NudgeSettings,
    rotate_mode: bool,
}

impl PlacementSession {
    pub fn new(machine: MachineConfig, viewport: ViewportSize) -> Self {
        Self {
            transform: ArtTransform::default(),
            initial: ArtTransform::default(),
            machine: machine.sanitized(),
            viewport,
            art: None,
            warning: false,
            snap: SnapSettings::default(),
            nudge: NudgeSettings::default(),
            rotate_mode: false,
        }
    }

    /// Sets the transform restored by `Reset`, and makes it current.
    pub fn with_initial(mut self, initial: ArtTransform) -> Self {
        self.initial = initial;
        self.transform = initial;
        self
    }

    pub fn with_snap(mut self, snap: SnapSettings) -> Self {
        self.snap = snap;
        self
    }

    pub fn with_nudge(mut self, nudge: NudgeSettings) -> Self {
        self.nudge = nudge;
        self
    }

    pub fn transform(&self) -> &ArtTransform {
        &self.transform
    }

    pub fn initial(&self) -> &ArtTransform {
        &self.initial
    }

    pub fn machine(&self) -> &MachineConfig {
        &self.machine
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn art(&self) -> Option<SvgSize> {
        self.art
    }

    /// True after a rejected edit, until a later edit is accepted.
    pub fn warning(&self) -> bool {
        self.warning
    }

    pub fn snap(&self) -> &SnapSettings {
        &self.snap
    }

    pub fn rotate_mode(&self) -> bool {
        self.rotate_mode
    }

    pub fn set_rotate_mode(&mut self, enabled: bool) {
        self.rotate_mode = enabled;
    }

    pub fn set_snap(&mut self, snap: SnapSettings) {
        self.snap = snap;
    }

    pub fn set_machine(&mut self, machine: MachineConfig) {
        self.machine = machine.sanitized();
    }

    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
    }

    /// Sets or clears the artwork size. Existing transforms are not re-validated.
    pub fn set_art(&mut self, art: Option<SvgSize>) {
        self.art = art;
    }

    pub fn bed(&self) -> BedMetrics {
        BedMetrics::compute(self.viewport, &self.machine)
    }

    /// Base fit scale of the current artwork, 1 without artwork.
    pub fn base_scale(&self) -> f64 {
        match self.art {
            Some(art) => {
                let bed = self.bed();
                base_scale(art.width, art.height, bed.bed_w, bed.bed_h)
            }
            None => 1.0,
        }
    }

    /// Whether `candidate` keeps the artwork inside the work area.
    pub fn is_valid(&self, candidate: &ArtTransform) -> bool {
        let Some(art) = self.art else {
            return true;
        };
        let bed = self.bed();
        let scale = base_scale(art.width, art.height, bed.bed_w, bed.bed_h);
        is_inside_work_area(candidate, art, scale, &bed)
    }

    /// Commits `candidate` when it keeps the artwork inside the work area.
    ///
    /// Both scale axes are floored at [`MIN_SCALE`] before the check.
    pub fn apply_if_valid(&mut self, candidate: ArtTransform) -> ApplyOutcome {
        let candidate = ArtTransform {
            scale_x: candidate.scale_x.max(MIN_SCALE),
            scale_y: candidate.scale_y.max(MIN_SCALE),
            ..candidate
        };
        if self.is_valid(&candidate) {
            self.transform = candidate;
            self.warning = false;
            trace!("Accepted transform {:?}", candidate);
            ApplyOutcome {
                accepted: true,
                transform: candidate,
            }
        } else {
            self.warning = true;
            debug!("Rejected transform outside work area: {:?}", candidate);
            ApplyOutcome {
                accepted: false,
                transform: self.transform,
            }
        }
    }

    /// Reduces `action` against the current transform, then gates the result.
    pub fn dispatch(&mut self, action: &ArtTransformAction) -> ApplyOutcome {
        let candidate = reduce(&self.transform, action, &self.initial);
        self.apply_if_valid(candidate)
    }

    /// Artwork dragged so its centre sits at `node_px` (scene pixels).
    pub fn drag_to(&mut self, node_px: Point2) -> ApplyOutcome {
        let patch = drag_to_transform(node_px, &self.bed(), &self.snap);
        self.dispatch(&ArtTransformAction::Patch { value: patch })
    }

    /// End of a resize/rotate handle interaction.
    pub fn end_handle_transform(&mut self, node: &NodeState) -> ApplyOutcome {
        let patch = handle_transform_end(node, &self.bed(), self.base_scale());
        self.dispatch(&ArtTransformAction::Patch { value: patch })
    }

    /// Keyboard nudge. Returns `None` when the key had no placement effect.
    ///
    /// Keys are ignored while no artwork is loaded.
    pub fn nudge(&mut self, key: NudgeKey, modifiers: Modifiers) -> Option<ApplyOutcome> {
        self.art?;
        match action_for_key(
            key,
            modifiers,
            self.rotate_mode,
            &self.transform,
            &self.snap,
            &self.nudge,
        ) {
            NudgeOutcome::Ignored => None,
            NudgeOutcome::ToggleRotateMode => {
                self.rotate_mode = !self.rotate_mode;
                debug!("Rotate nudge mode: {}", self.rotate_mode);
                None
            }
            NudgeOutcome::Action(action) => Some(self.dispatch(&action)),
        }
    }

    /// Numeric field edit. Scale fields are floored at [`MIN_SCALE`].
    pub fn set_field(&mut self, field: TransformField, value: f64) -> ApplyOutcome {
        let mut patch = ArtTransformPatch::default();
        match field {
            TransformField::XMm => patch.x_mm = Some(value),
            TransformField::YMm => patch.y_mm = Some(value),
            TransformField::ScaleX => patch.scale_x = Some(value.max(MIN_SCALE)),
            TransformField::ScaleY => patch.scale_y = Some(value.max(MIN_SCALE)),
            TransformField::Rotation => patch.rotation = Some(value),
        }
        self.dispatch(&ArtTransformAction::Patch { value: patch })
    }

    /// Returns to the initial transform, gated like any other edit.
    pub fn reset(&mut self) -> ApplyOutcome {
        self.dispatch(&ArtTransformAction::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use penplot_core::LengthUnit;

    fn session() -> PlacementSession {
        // Bed 700 x 350 px at 3.5 px/mm
        let machine = MachineConfig::new(200.0, 100.0, LengthUnit::Mm);
        PlacementSession::new(machine, ViewportSize::new(1000.0, 1000.0))
    }

    #[test]
    fn test_everything_accepted_without_art() {
        let mut session = session();
        let outcome = session.dispatch(&ArtTransformAction::Move {
            dx_mm: 10_000.0,
            dy_mm: 0.0,
        });
        assert!(outcome.accepted);
        assert_eq!(session.transform().x_mm, 10_000.0);
        assert!(!session.warning());
    }

    #[test]
    fn test_rejected_edit_keeps_transform_and_warns() {
        let mut session = session();
        // Fills the full bed height at scale 1
        session.set_art(Some(SvgSize {
            width: 100.0,
            height: 100.0,
        }));
        let before = *session.transform();

        let outcome = session.dispatch(&ArtTransformAction::Move {
            dx_mm: 0.0,
            dy_mm: 1.0,
        });
        assert!(!outcome.accepted);
        assert_eq!(outcome.transform, before);
        assert!(session.warning());

        let outcome = session.dispatch(&ArtTransformAction::Move {
            dx_mm: 10.0,
            dy_mm: 0.0,
        });
        assert!(outcome.accepted);
        assert!(!session.warning());
    }

    #[test]
    fn test_nudge_requires_art() {
        let mut session = session().with_initial(ArtTransform::new(0.0, 0.0, 0.5, 0.0));
        assert!(session.nudge(NudgeKey::ArrowLeft, Modifiers::NONE).is_none());

        session.set_art(Some(SvgSize {
            width: 10.0,
            height: 10.0,
        }));
        let outcome = session.nudge(NudgeKey::ArrowLeft, Modifiers::NONE).unwrap();
        assert!(outcome.accepted);
        assert_eq!(session.transform().x_mm, -1.0);

        assert!(session.nudge(NudgeKey::Char('r'), Modifiers::NONE).is_none());
        assert!(session.rotate_mode());
        session.nudge(NudgeKey::ArrowRight, Modifiers::shift());
        assert_eq!(session.transform().rotation, 5.0);
    }

    #[test]
    fn test_set_field_floors_scale() {
        let mut session = session();
        let outcome = session.set_field(TransformField::ScaleX, 0.0);
        assert_eq!(outcome.transform.scale_x, MIN_SCALE);
    }

    #[test]
    fn test_gate_floors_dispatched_scale() {
        let mut session = session();
        session.set_art(Some(SvgSize {
            width: 10.0,
            height: 10.0,
        }));

        let outcome = session.dispatch(&ArtTransformAction::Patch {
            value: ArtTransformPatch {
                scale_x: Some(0.0),
                ..ArtTransformPatch::default()
            },
        });
        assert!(outcome.accepted);
        assert_eq!(session.transform().scale_x, MIN_SCALE);
        assert_eq!(session.transform().scale_y, 1.0);

        let outcome = session.dispatch(&ArtTransformAction::Set {
            value: ArtTransform::new(0.0, 0.0, -2.0, 0.0),
        });
        assert_eq!(outcome.transform.scale_x, MIN_SCALE);
        assert_eq!(outcome.transform.scale_y, MIN_SCALE);
    }

    #[test]
    fn test_drag_round_trip() {
        let mut session = session().with_snap(SnapSettings::new(true, 1.0));
        session.set_art(Some(SvgSize {
            width: 10.0,
            height: 10.0,
        }));
        let bed = session.bed();
        let outcome = session.drag_to(Point2::new(bed.bed_cx + 3.5 * 20.2, bed.bed_cy));
        assert!(outcome.accepted);
        assert_eq!(session.transform().x_mm, 20.0);
    }
}
