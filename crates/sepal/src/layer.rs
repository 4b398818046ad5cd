use crate::geom::{Point, Size};
use derive_more::{Display, From, Into};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct LayerId(usize);

/// Model values of a layer. These are the declarative state; running
/// animations override them transiently in [`presentation`] queries.
///
/// [`presentation`]: crate::timeline::Timeline::presentation
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub bounds: Size,
    pub position: Point,
    /// Uniform scale applied around the layer center.
    pub scale: f64,
    /// Rotation about the z axis, in radians.
    pub rotation: f64,
    pub opacity: f64,
}

impl Layer {
    pub fn new(bounds: Size) -> Self {
        Self {
            bounds,
            position: Point::default(),
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}
