//! Scale tweens for newly placed objects.
//!
//! At most one tween runs per [`ObjectHandle`]. Starting another on the same
//! handle replaces the running one, and [`TweenSet::cancel`] stops it where
//! it is.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::scene::{ObjectHandle, Scene};

/// Easing curves mapping linear progress `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Overshoots past 1 before settling, like a released spring.
    BackOut { overshoot: f32 },
}

impl Easing {
    /// Endpoints are exact: 0 maps to 0 and 1 maps to 1.
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::BackOut { overshoot: s } => {
                let p = t - 1.0;
                p * p * ((s + 1.0) * p + s) + 1.0
            }
        }
    }
}

/// Interpolates an object's scale between two values over time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleTween {
    pub from: Vec3,
    pub to: Vec3,
    /// Seconds. Non-positive durations finish on the first tick.
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
}

impl ScaleTween {
    pub fn new(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn sample(&self) -> Vec3 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Running tweens keyed by the object they animate.
#[derive(Debug, Default)]
pub struct TweenSet {
    active: FxHashMap<ObjectHandle, ScaleTween>,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tween` on `handle`, writing its first frame immediately.
    /// Returns the tween it replaced, if one was running.
    pub fn start(
        &mut self,
        handle: ObjectHandle,
        tween: ScaleTween,
        scene: &mut dyn Scene,
    ) -> Option<ScaleTween> {
        if let Some(transform) = scene.transform_mut(handle) {
            transform.scale = tween.sample();
        }
        let replaced = self.active.insert(handle, tween);
        if replaced.is_some() {
            log::debug!("Replaced running scale tween on {handle:?}");
        }
        replaced
    }

    /// Stop the tween on `handle`, leaving the current scale in place.
    pub fn cancel(&mut self, handle: ObjectHandle) -> bool {
        self.active.remove(&handle).is_some()
    }

    pub fn is_animating(&self, handle: ObjectHandle) -> bool {
        self.active.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Advance every tween by `dt` seconds and write scales into `scene`.
    /// Finished tweens land exactly on their end value and are dropped, as are
    /// tweens whose object left the scene.
    pub fn tick(&mut self, dt: f32, scene: &mut dyn Scene) {
        self.active.retain(|handle, tween| {
            tween.elapsed += dt.max(0.0);
            let Some(transform) = scene.transform_mut(*handle) else {
                return false;
            };
            if tween.is_finished() {
                transform.scale = tween.to;
                false
            } else {
                transform.scale = tween.sample();
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneGraph, SceneNode};

    fn back_out() -> Easing {
        Easing::BackOut { overshoot: 1.7 }
    }

    #[test]
    fn test_back_out_endpoints_and_overshoot() {
        let e = back_out();
        assert!(e.apply(0.0).abs() < 1e-6);
        assert!((e.apply(1.0) - 1.0).abs() < 1e-6);
        let peak = (1..100).map(|i| e.apply(i as f32 / 100.0)).fold(0.0, f32::max);
        assert!(peak > 1.05, "back-out should overshoot, peak {peak}");
    }

    #[test]
    fn test_tween_runs_to_completion() {
        let mut scene = SceneGraph::new();
        let handle = scene.insert(SceneNode::group("cow"));
        let mut tweens = TweenSet::new();
        tweens.start(
            handle,
            ScaleTween::new(Vec3::ZERO, Vec3::ONE, 2.0, back_out()),
            &mut scene,
        );
        assert_eq!(scene.get(handle).unwrap().transform.scale, Vec3::ZERO);

        tweens.tick(1.0, &mut scene);
        let mid = scene.get(handle).unwrap().transform.scale;
        assert!(mid.x > 0.5);
        assert!(tweens.is_animating(handle));

        tweens.tick(1.5, &mut scene);
        assert_eq!(scene.get(handle).unwrap().transform.scale, Vec3::ONE);
        assert!(tweens.is_empty());
    }

    #[test]
    fn test_restart_replaces_running_tween() {
        let mut scene = SceneGraph::new();
        let handle = scene.insert(SceneNode::group("sheep"));
        let mut tweens = TweenSet::new();
        let first = ScaleTween::new(Vec3::ZERO, Vec3::ONE, 2.0, back_out());
        assert!(tweens.start(handle, first.clone(), &mut scene).is_none());
        tweens.tick(0.5, &mut scene);

        let second = ScaleTween::new(Vec3::ZERO, Vec3::splat(2.0), 1.0, Easing::Linear);
        let replaced = tweens.start(handle, second, &mut scene).unwrap();
        assert_eq!(replaced.to, first.to);
        assert_eq!(tweens.len(), 1);

        tweens.tick(0.5, &mut scene);
        assert_eq!(scene.get(handle).unwrap().transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_cancel_freezes_scale() {
        let mut scene = SceneGraph::new();
        let handle = scene.insert(SceneNode::group("chicken"));
        let mut tweens = TweenSet::new();
        tweens.start(
            handle,
            ScaleTween::new(Vec3::ZERO, Vec3::ONE, 1.0, Easing::Linear),
            &mut scene,
        );
        tweens.tick(0.25, &mut scene);
        assert!(tweens.cancel(handle));
        assert!(!tweens.cancel(handle));
        tweens.tick(1.0, &mut scene);
        assert_eq!(scene.get(handle).unwrap().transform.scale, Vec3::splat(0.25));
    }

    #[test]
    fn test_removed_object_drops_tween() {
        let mut scene = SceneGraph::new();
        let handle = scene.insert(SceneNode::group("cow"));
        let mut tweens = TweenSet::new();
        tweens.start(
            handle,
            ScaleTween::new(Vec3::ZERO, Vec3::ONE, 1.0, Easing::Linear),
            &mut scene,
        );
        scene.remove(handle);
        tweens.tick(0.1, &mut scene);
        assert!(tweens.is_empty());
    }
}
