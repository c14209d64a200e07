//! Artwork transform commands
//!
//! A pure reducer over [`ArtTransform`]. Every edit to the artwork placement
//! is expressed as an [`ArtTransformAction`]; geometric validation happens
//! later in the placement gate, never here.

use serde::{Deserialize, Serialize};

/// Smallest scale factor reachable through uniform scaling.
pub const MIN_SCALE: f64 = 0.05;

/// Placement of the artwork relative to the bed centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtTransform {
    /// Horizontal offset from the bed centre in millimetres.
    pub x_mm: f64,
    /// Vertical offset from the bed centre in millimetres (y-down).
    pub y_mm: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation in degrees, unbounded.
    pub rotation: f64,
}

impl Default for ArtTransform {
    fn default() -> Self {
        Self {
            x_mm: 0.0,
            y_mm: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }
}

impl ArtTransform {
    pub fn new(x_mm: f64, y_mm: f64, scale: f64, rotation: f64) -> Self {
        Self {
            x_mm,
            y_mm,
            scale_x: scale,
            scale_y: scale,
            rotation,
        }
    }

    /// Overlays the fields present in `patch`.
    pub fn patched(mut self, patch: &ArtTransformPatch) -> Self {
        if let Some(v) = patch.x_mm {
            self.x_mm = v;
        }
        if let Some(v) = patch.y_mm {
            self.y_mm = v;
        }
        if let Some(v) = patch.scale_x {
            self.scale_x = v;
        }
        if let Some(v) = patch.scale_y {
            self.scale_y = v;
        }
        if let Some(v) = patch.rotation {
            self.rotation = v;
        }
        self
    }
}

/// Partial transform; absent fields are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtTransformPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl ArtTransformPatch {
    /// Patch that only moves the artwork.
    pub fn position(x_mm: f64, y_mm: f64) -> Self {
        Self {
            x_mm: Some(x_mm),
            y_mm: Some(y_mm),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// An edit to the artwork transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ArtTransformAction {
    /// Replace the whole transform.
    Set { value: ArtTransform },
    /// Overlay the present fields.
    Patch { value: ArtTransformPatch },
    /// Translate by a millimetre delta.
    Move { dx_mm: f64, dy_mm: f64 },
    /// Rotate by a degree delta.
    Rotate { delta_deg: f64 },
    /// Add `delta` to both scale axes, flooring each at `min` (default [`MIN_SCALE`]).
    ScaleUniform {
        delta: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
    },
    /// Return to the initial transform.
    Reset,
}

/// Applies `action` to `state`. `initial` is the target of [`ArtTransformAction::Reset`].
pub fn reduce(
    state: &ArtTransform,
    action: &ArtTransformAction,
    initial: &ArtTransform,
) -> ArtTransform {
    match *action {
        ArtTransformAction::Set { value } => value,
        ArtTransformAction::Patch { ref value } => state.patched(value),
        ArtTransformAction::Move { dx_mm, dy_mm } => ArtTransform {
            x_mm: state.x_mm + dx_mm,
            y_mm: state.y_mm + dy_mm,
            ..*state
        },
        ArtTransformAction::Rotate { delta_deg } => ArtTransform {
            rotation: state.rotation + delta_deg,
            ..*state
        },
        ArtTransformAction::ScaleUniform { delta, min } => {
            let min = min.unwrap_or(MIN_SCALE);
            ArtTransform {
                scale_x: (state.scale_x + delta).max(min),
                scale_y: (state.scale_y + delta).max(min),
                ..*state
            }
        }
        ArtTransformAction::Reset => *initial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_and_rotate() {
        let initial = ArtTransform::default();
        let moved = reduce(
            &initial,
            &ArtTransformAction::Move {
                dx_mm: 5.0,
                dy_mm: -2.0,
            },
            &initial,
        );
        assert_eq!(moved.x_mm, 5.0);
        assert_eq!(moved.y_mm, -2.0);

        let rotated = reduce(&moved, &ArtTransformAction::Rotate { delta_deg: 400.0 }, &initial);
        assert_eq!(rotated.rotation, 400.0);
    }

    #[test]
    fn test_scale_uniform_floor() {
        let initial = ArtTransform::default();
        let state = ArtTransform {
            scale_x: 0.06,
            scale_y: 2.0,
            ..initial
        };
        let next = reduce(
            &state,
            &ArtTransformAction::ScaleUniform {
                delta: -0.1,
                min: None,
            },
            &initial,
        );
        assert_eq!(next.scale_x, MIN_SCALE);
        assert!((next.scale_y - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_patch_and_reset() {
        let initial = ArtTransform::new(1.0, 1.0, 1.0, 0.0);
        let state = ArtTransform::new(10.0, 10.0, 2.0, 45.0);
        let patched = reduce(
            &state,
            &ArtTransformAction::Patch {
                value: ArtTransformPatch {
                    rotation: Some(0.0),
                    ..Default::default()
                },
            },
            &initial,
        );
        assert_eq!(patched, ArtTransform::new(10.0, 10.0, 2.0, 0.0));
        assert_eq!(reduce(&patched, &ArtTransformAction::Reset, &initial), initial);
    }

    #[test]
    fn test_transform_json() {
        let json = serde_json::to_string(&ArtTransform::default()).unwrap();
        assert_eq!(
            json,
            r#"{"xMm":0.0,"yMm":0.0,"scaleX":1.0,"scaleY":1.0,"rotation":0.0}"#
        );
    }

    #[test]
    fn test_action_json() {
        let action: ArtTransformAction =
            serde_json::from_str(r#"{"type":"move","dxMm":1.5,"dyMm":0}"#).unwrap();
        assert_eq!(
            action,
            ArtTransformAction::Move {
                dx_mm: 1.5,
                dy_mm: 0.0
            }
        );

        let action: ArtTransformAction =
            serde_json::from_str(r#"{"type":"scaleUniform","delta":0.1}"#).unwrap();
        assert_eq!(
            action,
            ArtTransformAction::ScaleUniform {
                delta: 0.1,
                min: None
            }
        );

        let action: ArtTransformAction =
            serde_json::from_str(r#"{"type":"patch","value":{"xMm":3}}"#).unwrap();
        assert_eq!(
            action,
            ArtTransformAction::Patch {
                value: ArtTransformPatch {
                    x_mm: Some(3.0),
                    ..Default::default()
                }
            }
        );
    }
}
