use crate::animation::{AnimationKey, AnimationSpec, FillMode, Property};
use crate::layer::{Layer, LayerId};
use derive_more::{Display, From, Into};
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct AnimationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEventKind {
    Started,
    Stopped { finished: bool },
}

/// Lifecycle notification for one scheduled animation. Consumers filter
/// stale notifications by comparing `id` against the animation currently
/// registered under the same key.
#[derive(Debug, Clone)]
pub struct AnimationEvent {
    pub id: AnimationId,
    pub layer: LayerId,
    pub key: AnimationKey,
    pub kind: AnimationEventKind,
}

impl AnimationEvent {
    pub fn finished(&self) -> bool {
        matches!(self.kind, AnimationEventKind::Stopped { finished: true })
    }
}

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("unknown layer {0}")]
    UnknownLayer(LayerId),
}

#[derive(Debug)]
struct Scheduled {
    id: AnimationId,
    layer: LayerId,
    key: AnimationKey,
    spec: AnimationSpec,
    started_at: Duration,
    finished: bool,
}

impl Scheduled {
    fn progress(&self, now: Duration) -> f64 {
        if self.spec.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.spec.duration.as_secs_f64()).min(1.0)
    }
}

/// Retained layer set plus the animations currently running on it.
///
/// Time never comes from a clock: the host supplies it to [`advance`], and
/// lifecycle events queued by any operation are returned from the next
/// `advance` call, in order. Completed animations with [`FillMode::Removed`]
/// stay queryable until the advance after the one that completed them, so an
/// event and the key lookup that validates it always observe the same
/// animation.
///
/// [`advance`]: Timeline::advance
#[derive(Debug, Default)]
pub struct Timeline {
    now: Duration,
    layers: Vec<Option<Layer>>,
    animations: Vec<Scheduled>,
    events: VecDeque<AnimationEvent>,
    next_animation_id: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId::from(self.layers.len());
        self.layers.push(Some(layer));
        id
    }

    /// Removes a layer and every animation attached to it, without emitting
    /// stop events.
    pub fn remove_layer(&mut self, id: LayerId) {
        if let Some(slot) = self.layers.get_mut(usize::from(id)) {
            *slot = None;
        }
        self.animations.retain(|a| a.layer != id);
    }

    pub fn layer(&self, id: LayerId) -> Result<&Layer, TimelineError> {
        self.layers
            .get(usize::from(id))
            .and_then(|slot| slot.as_ref())
            .ok_or(TimelineError::UnknownLayer(id))
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Result<&mut Layer, TimelineError> {
        self.layers
            .get_mut(usize::from(id))
            .and_then(|slot| slot.as_mut())
            .ok_or(TimelineError::UnknownLayer(id))
    }

    /// Schedules `spec` on `layer` under `key`, starting at the current
    /// time. An animation already registered under the same key is replaced;
    /// if it was still running it receives a `finished: false` stop.
    pub fn add_animation(
        &mut self,
        layer: LayerId,
        key: &str,
        spec: AnimationSpec,
    ) -> Result<AnimationId, TimelineError> {
        self.layer(layer)?;

        if let Some(pos) = self
            .animations
            .iter()
            .position(|a| a.layer == layer && a.key.as_ref() == key)
        {
            let old = self.animations.remove(pos);
            if !old.finished {
                self.events.push_back(AnimationEvent {
                    id: old.id,
                    layer: old.layer,
                    key: old.key,
                    kind: AnimationEventKind::Stopped { finished: false },
                });
            }
        }

        let id = AnimationId::from(self.next_animation_id);
        self.next_animation_id += 1;
        let key = AnimationKey::from(key);
        log::trace!("add animation {} ({}) on layer {}", key, id, layer);

        self.events.push_back(AnimationEvent {
            id,
            layer,
            key: key.clone(),
            kind: AnimationEventKind::Started,
        });
        self.animations.push(Scheduled {
            id,
            layer,
            key,
            spec,
            started_at: self.now,
            finished: false,
        });
        Ok(id)
    }

    /// Removes every animation on `layer`. In-flight animations receive a
    /// `finished: false` stop; already-completed ones are dropped silently.
    pub fn remove_all_animations(&mut self, layer: LayerId) -> Result<(), TimelineError> {
        self.layer(layer)?;
        log::trace!("remove all animations on layer {}", layer);

        let mut kept = Vec::with_capacity(self.animations.len());
        for anim in self.animations.drain(..) {
            if anim.layer != layer {
                kept.push(anim);
                continue;
            }
            if !anim.finished {
                self.events.push_back(AnimationEvent {
                    id: anim.id,
                    layer: anim.layer,
                    key: anim.key,
                    kind: AnimationEventKind::Stopped { finished: false },
                });
            }
        }
        self.animations = kept;
        Ok(())
    }

    /// The animation currently registered under `key` on `layer`, if any.
    pub fn animation_for_key(&self, layer: LayerId, key: &str) -> Option<AnimationId> {
        self.animations
            .iter()
            .rev()
            .find(|a| a.layer == layer && a.key.as_ref() == key)
            .map(|a| a.id)
    }

    /// Moves time forward, completes due animations, and returns all queued
    /// lifecycle events in order.
    pub fn advance(&mut self, now: Duration) -> Vec<AnimationEvent> {
        self.animations
            .retain(|a| !(a.finished && a.spec.fill == FillMode::Removed));
        self.now = now;

        for anim in &mut self.animations {
            if !anim.finished && anim.started_at + anim.spec.duration <= now {
                anim.finished = true;
                self.events.push_back(AnimationEvent {
                    id: anim.id,
                    layer: anim.layer,
                    key: anim.key.clone(),
                    kind: AnimationEventKind::Stopped { finished: true },
                });
            }
        }

        self.events.drain(..).collect()
    }

    /// The layer as currently rendered: model values with running and
    /// forward-filling animations applied. Later-added animations win when
    /// several drive the same property.
    pub fn presentation(&self, id: LayerId) -> Result<Layer, TimelineError> {
        let mut snapshot = self.layer(id)?.clone();

        for anim in self.animations.iter().filter(|a| a.layer == id) {
            if anim.finished && anim.spec.fill == FillMode::Removed {
                continue;
            }
            let progress = anim.spec.easing.apply(anim.progress(self.now));
            for track in &anim.spec.tracks {
                let value = track.from + (track.to - track.from) * progress;
                match track.property {
                    Property::Scale => snapshot.scale = value,
                    Property::Rotation => snapshot.rotation = value,
                    Property::Opacity => snapshot.opacity = value,
                }
            }
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;
    use crate::geom::{Point, Size};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn grow(duration: Duration) -> AnimationSpec {
        AnimationSpec::new(duration).with_track(Property::Scale, 1.0, 10.0)
    }

    fn timeline_with_layer() -> (Timeline, LayerId) {
        let mut timeline = Timeline::new();
        let layer = timeline.add_layer(Layer::new(Size::new(44.0, 44.0)));
        (timeline, layer)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn presentation_interpolates_linearly() {
        let (mut timeline, layer) = timeline_with_layer();
        timeline.add_animation(layer, "grow", grow(ms(200))).unwrap();

        timeline.advance(ms(80));
        assert_close(timeline.presentation(layer).unwrap().scale, 4.6);
    }

    #[test]
    fn forward_fill_retains_end_value_and_registration() {
        let (mut timeline, layer) = timeline_with_layer();
        let id = timeline
            .add_animation(layer, "grow", grow(ms(200)).retained())
            .unwrap();

        let events = timeline.advance(ms(250));
        assert!(events.iter().any(|e| e.id == id && e.finished()));
        assert_close(timeline.presentation(layer).unwrap().scale, 10.0);
        assert_eq!(timeline.animation_for_key(layer, "grow"), Some(id));
    }

    #[test]
    fn removed_fill_falls_back_to_model_and_is_pruned() {
        let (mut timeline, layer) = timeline_with_layer();
        timeline.add_animation(layer, "grow", grow(ms(200))).unwrap();

        timeline.advance(ms(250));
        assert_close(timeline.presentation(layer).unwrap().scale, 1.0);

        // Gone entirely one advance later.
        timeline.advance(ms(260));
        assert_eq!(timeline.animation_for_key(layer, "grow"), None);
    }

    #[test]
    fn started_and_stopped_arrive_in_order() {
        let (mut timeline, layer) = timeline_with_layer();
        let id = timeline.add_animation(layer, "grow", grow(ms(100))).unwrap();

        let events = timeline.advance(ms(150));
        let kinds: Vec<_> = events
            .iter()
            .filter(|e| e.id == id)
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                AnimationEventKind::Started,
                AnimationEventKind::Stopped { finished: true },
            ]
        );
    }

    #[test]
    fn same_key_replacement_stops_old_animation() {
        let (mut timeline, layer) = timeline_with_layer();
        let first = timeline.add_animation(layer, "grow", grow(ms(200))).unwrap();
        let second = timeline.add_animation(layer, "grow", grow(ms(200))).unwrap();

        assert_eq!(timeline.animation_for_key(layer, "grow"), Some(second));
        let events = timeline.advance(ms(10));
        assert!(events.iter().any(|e| {
            e.id == first && e.kind == AnimationEventKind::Stopped { finished: false }
        }));
    }

    #[test]
    fn remove_all_stops_running_animations_only() {
        let (mut timeline, layer) = timeline_with_layer();
        let done = timeline
            .add_animation(layer, "grow", grow(ms(100)).retained())
            .unwrap();
        timeline.advance(ms(150));
        let running = timeline.add_animation(layer, "fade", grow(ms(200))).unwrap();
        timeline.advance(ms(160));

        timeline.remove_all_animations(layer).unwrap();
        let events = timeline.advance(ms(170));

        assert!(events.iter().any(|e| {
            e.id == running && e.kind == AnimationEventKind::Stopped { finished: false }
        }));
        assert!(!events.iter().any(|e| e.id == done));
        assert_eq!(timeline.animation_for_key(layer, "grow"), None);
        assert_eq!(timeline.animation_for_key(layer, "fade"), None);
    }

    #[test]
    fn later_animation_wins_for_same_property() {
        let (mut timeline, layer) = timeline_with_layer();
        timeline.add_animation(layer, "grow", grow(ms(200))).unwrap();
        timeline
            .add_animation(
                layer,
                "shrink",
                AnimationSpec::new(ms(200)).with_track(Property::Scale, 4.0, 2.0),
            )
            .unwrap();

        timeline.advance(ms(100));
        assert_close(timeline.presentation(layer).unwrap().scale, 3.0);
    }

    #[test]
    fn grouped_tracks_share_timing() {
        let (mut timeline, layer) = timeline_with_layer();
        timeline
            .add_animation(
                layer,
                "spin",
                AnimationSpec::new(ms(100))
                    .with_track(Property::Rotation, 0.0, 2.0)
                    .with_track(Property::Opacity, 0.0, 1.0),
            )
            .unwrap();

        timeline.advance(ms(50));
        let snapshot = timeline.presentation(layer).unwrap();
        assert_close(snapshot.rotation, 1.0);
        assert_close(snapshot.opacity, 0.5);
    }

    #[test]
    fn ease_out_runs_ahead_of_linear() {
        let (mut timeline, layer) = timeline_with_layer();
        timeline
            .add_animation(layer, "grow", grow(ms(200)).with_easing(Easing::EaseOut))
            .unwrap();

        timeline.advance(ms(100));
        let scale = timeline.presentation(layer).unwrap().scale;
        assert!(scale > 5.5 && scale < 10.0, "got {scale}");
    }

    #[test]
    fn unknown_layer_is_an_error() {
        let (mut timeline, layer) = timeline_with_layer();
        timeline.remove_layer(layer);

        assert!(matches!(
            timeline.layer(layer),
            Err(TimelineError::UnknownLayer(_))
        ));
        assert!(timeline.add_animation(layer, "grow", grow(ms(100))).is_err());
    }

    #[test]
    fn remove_layer_drops_animations_silently() {
        let (mut timeline, layer) = timeline_with_layer();
        timeline.add_animation(layer, "grow", grow(ms(200))).unwrap();
        timeline.advance(ms(10));

        timeline.remove_layer(layer);
        assert!(timeline.advance(ms(20)).is_empty());
    }

    #[test]
    fn model_mutation_shows_through_when_no_animation_runs() {
        let (mut timeline, layer) = timeline_with_layer();
        timeline.layer_mut(layer).unwrap().position = Point::new(3.0, 4.0);
        timeline.layer_mut(layer).unwrap().opacity = 0.0;

        let snapshot = timeline.presentation(layer).unwrap();
        assert_eq!(snapshot.position, Point::new(3.0, 4.0));
        assert_close(snapshot.opacity, 0.0);
    }
}
