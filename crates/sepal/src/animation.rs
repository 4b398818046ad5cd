use derive_more::{AsRef, Deref, Display, From, Into};
use std::time::Duration;

/// Name under which an animation is registered on a layer. Adding another
/// animation with the same key on the same layer replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct AnimationKey(String);

crate::impl_string_newtype!(AnimationKey);

/// A layer property an animation track can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Scale,
    Rotation,
    Opacity,
}

/// One animated property with explicit endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub property: Property,
    pub from: f64,
    pub to: f64,
}

/// What happens to an animation once its duration elapses.
///
/// `Forwards` keeps the animation registered and its end value applied to
/// presentation queries; `Removed` drops it, letting presentation fall back
/// to the layer's model values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Forwards,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Parameters for one visual transition. One spec may group several property
/// tracks under a shared duration and easing.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub tracks: Vec<Track>,
    pub duration: Duration,
    pub easing: Easing,
    pub fill: FillMode,
}

impl AnimationSpec {
    pub fn new(duration: Duration) -> Self {
        Self {
            tracks: Vec::new(),
            duration,
            easing: Easing::Linear,
            fill: FillMode::Removed,
        }
    }

    pub fn with_track(mut self, property: Property, from: f64, to: f64) -> Self {
        self.tracks.push(Track { property, from, to });
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Keeps the end value applied after completion instead of clearing it.
    pub fn retained(mut self) -> Self {
        self.fill = FillMode::Forwards;
        self
    }
}
