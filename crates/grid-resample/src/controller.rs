//! Pointer and wheel input mapped onto [`Transform`] updates.
//!
//! [`reduce`] is the pure reducer for zoom, pan and reset. The
//! [`TransformController`] adds the drag state machine on top of it:
//!
//! ```text
//! Idle --Press--> Dragging --Release/Leave--> Idle
//! ```
//!
//! Pan events only move the viewport while `Dragging`.

use crate::transform::{clamp_scale, Transform};

/// Wheel delta multiplier.
pub const ZOOM_SENSITIVITY: f64 = 0.001;

/// Zoom step relative to the current scale.
pub const ZOOM_FACTOR: f64 = 5.0;

/// Screen-to-source pan multiplier, before dividing by scale.
pub const PAN_SENSITIVITY: f64 = 2.0;

/// A discrete input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformEvent {
    /// Wheel tick; negative deltas zoom in.
    Zoom { delta: f64 },
    /// Pointer movement in screen pixels.
    Pan { dx: f64, dy: f64 },
    /// Pointer pressed over the viewport.
    Press,
    /// Pointer released.
    Release,
    /// Pointer left the viewport.
    Leave,
    /// Back to the identity transform.
    Reset,
}

/// Pure reducer for transform-changing events.
///
/// Zoom is proportional to the current scale so it stays usable across the
/// whole range. Pan divides by scale so a screen-pixel drag covers less
/// source space when zoomed in. Pointer state events leave the transform
/// unchanged.
///
/// ```
/// use grid_resample::{reduce, Transform, TransformEvent};
///
/// let t = reduce(Transform::IDENTITY, &TransformEvent::Zoom { delta: -100.0 });
/// assert!((t.scale - 1.5).abs() < 1e-12);
/// ```
pub fn reduce(prev: Transform, event: &TransformEvent) -> Transform {
    match *event {
        TransformEvent::Zoom { delta } if delta.is_finite() => {
            let scale = prev.scale + (-delta * ZOOM_SENSITIVITY) * prev.scale * ZOOM_FACTOR;
            Transform {
                scale: clamp_scale(scale),
                ..prev
            }
        }
        TransformEvent::Pan { dx, dy } if dx.is_finite() && dy.is_finite() => Transform {
            x: prev.x + dx * PAN_SENSITIVITY / prev.scale,
            y: prev.y + dy * PAN_SENSITIVITY / prev.scale,
            scale: prev.scale,
        },
        TransformEvent::Reset => Transform::IDENTITY,
        _ => prev,
    }
}

/// Whether a drag gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Current transform plus drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformController {
    transform: Transform,
    drag: DragState,
}

impl TransformController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[inline]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    /// Apply one event and return the resulting transform.
    pub fn apply(&mut self, event: TransformEvent) -> Transform {
        match event {
            TransformEvent::Press => self.drag = DragState::Dragging,
            TransformEvent::Release | TransformEvent::Leave => self.drag = DragState::Idle,
            TransformEvent::Pan { .. } if !self.is_dragging() => {}
            TransformEvent::Reset => self.reset(),
            _ => self.transform = reduce(self.transform, &event),
        }
        self.transform
    }

    /// Identity transform and no drag in progress. Used for `Reset` and on
    /// every new source.
    pub fn reset(&mut self) {
        self.transform = Transform::IDENTITY;
        self.drag = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{MAX_SCALE, MIN_SCALE};

    #[test]
    fn test_pan_reducer_at_unit_scale() {
        let t = reduce(
            Transform::IDENTITY,
            &TransformEvent::Pan { dx: 10.0, dy: 0.0 },
        );
        assert_eq!(t.x, 20.0);
        assert_eq!(t.y, 0.0);
        assert_eq!(t.scale, 1.0);
    }

    #[test]
    fn test_pan_reducer_divides_by_scale() {
        let t = reduce(
            Transform::new(0.0, 0.0, 4.0),
            &TransformEvent::Pan { dx: 10.0, dy: -6.0 },
        );
        assert_eq!(t.x, 5.0);
        assert_eq!(t.y, -3.0);
    }

    #[test]
    fn test_zoom_reducer() {
        let t = reduce(Transform::IDENTITY, &TransformEvent::Zoom { delta: -100.0 });
        assert!((t.scale - 1.5).abs() < 1e-12);

        let t = reduce(Transform::IDENTITY, &TransformEvent::Zoom { delta: 100.0 });
        assert!((t.scale - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_reducer_clamps() {
        let t = reduce(
            Transform::new(0.0, 0.0, 19.0),
            &TransformEvent::Zoom { delta: -1000.0 },
        );
        assert_eq!(t.scale, MAX_SCALE);

        let t = reduce(
            Transform::new(0.0, 0.0, 0.2),
            &TransformEvent::Zoom { delta: 1000.0 },
        );
        assert_eq!(t.scale, MIN_SCALE);
    }

    #[test]
    fn test_zoom_keeps_offsets() {
        let t = reduce(
            Transform::new(7.0, -3.0, 1.0),
            &TransformEvent::Zoom { delta: -50.0 },
        );
        assert_eq!((t.x, t.y), (7.0, -3.0));
    }

    #[test]
    fn test_reset_from_any_state() {
        let t = reduce(Transform::new(12.0, -40.0, 7.5), &TransformEvent::Reset);
        assert_eq!(t, Transform::IDENTITY);
    }

    #[test]
    fn test_non_finite_deltas_are_ignored() {
        let prev = Transform::new(1.0, 2.0, 3.0);
        assert_eq!(
            reduce(prev, &TransformEvent::Zoom { delta: f64::NAN }),
            prev
        );
        assert_eq!(
            reduce(
                prev,
                &TransformEvent::Pan {
                    dx: f64::INFINITY,
                    dy: 0.0
                }
            ),
            prev
        );
    }

    #[test]
    fn test_pan_ignored_while_idle() {
        let mut ctl = TransformController::new();
        let t = ctl.apply(TransformEvent::Pan { dx: 10.0, dy: 10.0 });
        assert_eq!(t, Transform::IDENTITY);
    }

    #[test]
    fn test_drag_state_machine() {
        let mut ctl = TransformController::new();
        assert_eq!(ctl.drag_state(), DragState::Idle);

        ctl.apply(TransformEvent::Press);
        assert!(ctl.is_dragging());
        let t = ctl.apply(TransformEvent::Pan { dx: 5.0, dy: 1.0 });
        assert_eq!((t.x, t.y), (10.0, 2.0));

        ctl.apply(TransformEvent::Release);
        assert!(!ctl.is_dragging());
        let t = ctl.apply(TransformEvent::Pan { dx: 5.0, dy: 1.0 });
        assert_eq!((t.x, t.y), (10.0, 2.0));

        ctl.apply(TransformEvent::Press);
        ctl.apply(TransformEvent::Leave);
        assert_eq!(ctl.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_zoom_applies_without_drag() {
        let mut ctl = TransformController::new();
        let t = ctl.apply(TransformEvent::Zoom { delta: -100.0 });
        assert!((t.scale - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_reset_clears_drag() {
        let mut ctl = TransformController::new();
        ctl.apply(TransformEvent::Press);
        ctl.apply(TransformEvent::Pan { dx: 3.0, dy: 3.0 });
        ctl.reset();
        assert_eq!(ctl.transform(), Transform::IDENTITY);
        assert_eq!(ctl.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_reset_event_ends_drag() {
        let mut ctl = TransformController::new();
        ctl.apply(TransformEvent::Press);
        ctl.apply(TransformEvent::Zoom { delta: -100.0 });

        let t = ctl.apply(TransformEvent::Reset);
        assert_eq!(t, Transform::IDENTITY);
        assert_eq!(ctl.drag_state(), DragState::Idle);

        // Pans after a reset need a fresh press
        let t = ctl.apply(TransformEvent::Pan { dx: 4.0, dy: 4.0 });
        assert_eq!(t, Transform::IDENTITY);
    }
}
