use std::f64::consts::PI;
use std::time::Duration;

pub mod animation;
pub mod layout;
pub mod model;

pub use layout::circular_positions;
pub use model::{MenuState, PetalButton, PetalInit, PetalMenu};

pub const CONTROL_SIZE: f64 = 44.0;
pub const CONTAINER_INSET: f64 = 10.0; // per side
pub const PETAL_SIZE: f64 = 10.0;
pub const PETAL_RADIUS: f64 = 13.0; // orbital radius of the petal ring
pub const SCALE_FACTOR: f64 = 10.0;
pub const ROTATION_ARC: f64 = PI; // half turn during open/close
pub const OPEN_DURATION: Duration = Duration::from_millis(200);
pub const ROTATE_OVERSHOOT: Duration = Duration::from_millis(100); // rotation outlasts scale

pub const ZOOM_IN_KEY: &str = "zoomin";
pub const ZOOM_OUT_KEY: &str = "zoomout";
pub const ROTATE_KEY: &str = "rotate";
pub const REVERSE_ROTATE_KEY: &str = "reverserotate";
