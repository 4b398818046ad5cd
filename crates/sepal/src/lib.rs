pub mod animation;
pub mod geom;
pub mod layer;
pub mod macros;
pub mod timeline;

pub use animation::{AnimationKey, AnimationSpec, Easing, FillMode, Property, Track};
pub use geom::{Point, Size};
pub use layer::{Layer, LayerId};
pub use timeline::{AnimationEvent, AnimationEventKind, AnimationId, Timeline, TimelineError};
