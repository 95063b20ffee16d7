//! Pointer tilt
//!
//! Elements that lean toward the pointer in 3-D while it is over them and
//! settle back flat when it leaves. Each change retargets a tween from the
//! element's current rotation.

use folio_animation::{Easing, SchedulerHandle, StylePatch};
use folio_core::{Point, Rect, TargetId};

/// Minimum angle change (degrees) worth a new tween
const ANGLE_EPSILON: f32 = 0.01;

/// Tilt state of one element
#[derive(Clone, Debug, PartialEq)]
pub struct Tilt {
    target: TargetId,
    /// Degrees per unit of normalized offset from the center
    strength: f32,
    duration_ms: u32,
    easing: Easing,
    /// `(rotate_x, rotate_y)` last tweened toward; `None` when flat
    current: Option<(f32, f32)>,
}

impl Tilt {
    pub fn new(target: TargetId, strength: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            target,
            strength,
            duration_ms,
            easing,
            current: None,
        }
    }

    /// Hero portrait: up to ±7.5° over 500 ms
    pub fn portrait(target: TargetId) -> Self {
        Self::new(target, 15.0, 500, Easing::CubicOut)
    }

    /// Project card: up to ±5° over 400 ms
    pub fn card(target: TargetId) -> Self {
        Self::new(target, 10.0, 400, Easing::CubicOut)
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn is_tilted(&self) -> bool {
        self.current.is_some()
    }

    /// `(rotate_x, rotate_y)` for a pointer over `rect`, `None` outside it
    pub fn angles_for(&self, rect: &Rect, pointer: Point) -> Option<(f32, f32)> {
        if !rect.contains(pointer) {
            return None;
        }
        let (x, y) = rect.normalized(pointer)?;
        let (dx, dy) = (x - 0.5, y - 0.5);
        Some((-dy * self.strength, dx * self.strength))
    }

    /// Follow the pointer; returns whether a new tween was started
    ///
    /// `rect` and `pointer` are both in document coordinates.
    pub fn update(
        &mut self,
        rect: Option<Rect>,
        pointer: Option<Point>,
        scheduler: &SchedulerHandle,
    ) -> bool {
        let next = match (rect, pointer) {
            (Some(rect), Some(pointer)) => self.angles_for(&rect, pointer),
            _ => None,
        };

        let changed = match (self.current, next) {
            (None, None) => false,
            (Some((ax, ay)), Some((bx, by))) => {
                (ax - bx).abs() > ANGLE_EPSILON || (ay - by).abs() > ANGLE_EPSILON
            }
            _ => true,
        };
        if !changed {
            return false;
        }

        let (rotate_x, rotate_y) = next.unwrap_or((0.0, 0.0));
        self.current = next;
        scheduler
            .animate_to(
                self.target,
                StylePatch::new().rotate_x(rotate_x).rotate_y(rotate_y),
                self.duration_ms,
                self.easing,
            )
            .is_some()
    }
}
