//! Keyboard nudging of the artwork placement
//!
//! Maps key presses to transform actions. Arrows move the artwork; in rotate
//! mode Left/Right rotate and Up/Down scale. `R` toggles rotate mode.

use serde::{Deserialize, Serialize};

use crate::commands::{ArtTransform, ArtTransformAction, ArtTransformPatch, MIN_SCALE};
use crate::placement::SnapSettings;

/// Keys relevant to nudging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NudgeKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
}

impl NudgeKey {
    /// Parses a DOM-style key name (`"ArrowUp"`, `"r"`, ...).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::Char(c)),
                    _ => None,
                }
            }
        }
    }

    fn is_rotate_toggle(self) -> bool {
        matches!(self, Self::Char(c) if c.eq_ignore_ascii_case(&'r'))
    }
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }
}

/// Step sizes for keyboard nudging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NudgeSettings {
    pub move_mm: f64,
    pub move_coarse_mm: f64,
    pub move_fine_mm: f64,
    pub rotate_deg: f64,
    pub rotate_coarse_deg: f64,
    pub scale_step: f64,
    pub scale_coarse_step: f64,
}

impl Default for NudgeSettings {
    fn default() -> Self {
        Self {
            move_mm: 1.0,
            move_coarse_mm: 10.0,
            move_fine_mm: 0.2,
            rotate_deg: 1.0,
            rotate_coarse_deg: 5.0,
            scale_step: 0.02,
            scale_coarse_step: 0.1,
        }
    }
}

/// Result of a key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NudgeOutcome {
    /// Key is not a nudge key, or a Ctrl/Meta chord.
    Ignored,
    /// Rotate mode should flip.
    ToggleRotateMode,
    /// Transform action to dispatch.
    Action(ArtTransformAction),
}

/// Maps a key press to a nudge outcome.
pub fn action_for_key(
    key: NudgeKey,
    modifiers: Modifiers,
    rotate_mode: bool,
    current: &ArtTransform,
    snap: &SnapSettings,
    settings: &NudgeSettings,
) -> NudgeOutcome {
    if modifiers.ctrl || modifiers.meta {
        return NudgeOutcome::Ignored;
    }
    if key.is_rotate_toggle() {
        return NudgeOutcome::ToggleRotateMode;
    }

    let (dx, dy) = match key {
        NudgeKey::ArrowLeft => (-1.0, 0.0),
        NudgeKey::ArrowRight => (1.0, 0.0),
        NudgeKey::ArrowUp => (0.0, -1.0),
        NudgeKey::ArrowDown => (0.0, 1.0),
        NudgeKey::Char(_) => return NudgeOutcome::Ignored,
    };

    if rotate_mode {
        let rotate = if modifiers.shift {
            settings.rotate_coarse_deg
        } else {
            settings.rotate_deg
        };
        let scale = if modifiers.shift {
            settings.scale_coarse_step
        } else {
            settings.scale_step
        };
        let action = if dx != 0.0 {
            ArtTransformAction::Rotate {
                delta_deg: dx * rotate,
            }
        } else {
            // Up grows, Down shrinks
            ArtTransformAction::ScaleUniform {
                delta: -dy * scale,
                min: Some(MIN_SCALE),
            }
        };
        return NudgeOutcome::Action(action);
    }

    let step = if modifiers.shift {
        settings.move_coarse_mm
    } else if modifiers.alt {
        settings.move_fine_mm
    } else {
        settings.move_mm
    };
    let (dx_mm, dy_mm) = (dx * step, dy * step);

    if snap.enabled {
        return NudgeOutcome::Action(ArtTransformAction::Patch {
            value: ArtTransformPatch::position(
                snap.apply(current.x_mm + dx_mm),
                snap.apply(current.y_mm + dy_mm),
            ),
        });
    }

    NudgeOutcome::Action(ArtTransformAction::Move { dx_mm, dy_mm })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: NudgeKey, modifiers: Modifiers, rotate_mode: bool) -> NudgeOutcome {
        action_for_key(
            key,
            modifiers,
            rotate_mode,
            &ArtTransform::default(),
            &SnapSettings::default(),
            &NudgeSettings::default(),
        )
    }

    #[test]
    fn test_move_steps() {
        assert_eq!(
            press(NudgeKey::ArrowRight, Modifiers::NONE, false),
            NudgeOutcome::Action(ArtTransformAction::Move {
                dx_mm: 1.0,
                dy_mm: 0.0
            })
        );
        assert_eq!(
            press(NudgeKey::ArrowUp, Modifiers::shift(), false),
            NudgeOutcome::Action(ArtTransformAction::Move {
                dx_mm: 0.0,
                dy_mm: -10.0
            })
        );
        assert_eq!(
            press(NudgeKey::ArrowLeft, Modifiers::alt(), false),
            NudgeOutcome::Action(ArtTransformAction::Move {
                dx_mm: -0.2,
                dy_mm: 0.0
            })
        );
    }

    #[test]
    fn test_rotate_mode() {
        assert_eq!(
            press(NudgeKey::ArrowLeft, Modifiers::NONE, true),
            NudgeOutcome::Action(ArtTransformAction::Rotate { delta_deg: -1.0 })
        );
        assert_eq!(
            press(NudgeKey::ArrowRight, Modifiers::shift(), true),
            NudgeOutcome::Action(ArtTransformAction::Rotate { delta_deg: 5.0 })
        );
        assert_eq!(
            press(NudgeKey::ArrowDown, Modifiers::shift(), true),
            NudgeOutcome::Action(ArtTransformAction::ScaleUniform {
                delta: -0.1,
                min: Some(MIN_SCALE)
            })
        );
        assert_eq!(
            press(NudgeKey::ArrowUp, Modifiers::NONE, true),
            NudgeOutcome::Action(ArtTransformAction::ScaleUniform {
                delta: 0.02,
                min: Some(MIN_SCALE)
            })
        );
    }

    #[test]
    fn test_toggle_and_ignored() {
        assert_eq!(
            press(NudgeKey::Char('R'), Modifiers::NONE, false),
            NudgeOutcome::ToggleRotateMode
        );
        assert_eq!(press(NudgeKey::Char('x'), Modifiers::NONE, false), NudgeOutcome::Ignored);

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(press(NudgeKey::ArrowUp, ctrl, false), NudgeOutcome::Ignored);
        assert_eq!(press(NudgeKey::Char('r'), ctrl, false), NudgeOutcome::Ignored);
    }

    #[test]
    fn test_snapped_move_becomes_patch() {
        let current = ArtTransform::new(3.0, 0.0, 1.0, 0.0);
        let outcome = action_for_key(
            NudgeKey::ArrowRight,
            Modifiers::NONE,
            false,
            &current,
            &SnapSettings::new(true, 5.0),
            &NudgeSettings::default(),
        );
        assert_eq!(
            outcome,
            NudgeOutcome::Action(ArtTransformAction::Patch {
                value: ArtTransformPatch::position(5.0, 0.0)
            })
        );
    }

    #[test]
    fn test_key_names() {
        assert_eq!(NudgeKey::from_key_name("ArrowDown"), Some(NudgeKey::ArrowDown));
        assert_eq!(NudgeKey::from_key_name("r"), Some(NudgeKey::Char('r')));
        assert_eq!(NudgeKey::from_key_name("Escape"), None);
    }
}
