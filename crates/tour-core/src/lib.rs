pub mod animation;
pub mod audio;
pub mod config;
pub mod constants;
pub mod culling;
pub mod error;
pub mod gesture;
pub mod idle;
pub mod keyframes;
pub mod lighting;
pub mod math;
pub mod music;
pub mod navigator;
pub mod path;
pub mod registry;
pub mod sink;
pub mod speed_profile;
pub mod tour;
pub mod transition;
pub mod triggers;
pub mod yaw;
pub mod zone;
pub mod zoom;

pub use animation::*;
pub use audio::*;
pub use config::*;
pub use culling::*;
pub use error::*;
pub use gesture::*;
pub use idle::*;
pub use keyframes::*;
pub use lighting::*;
pub use math::*;
pub use music::*;
pub use navigator::*;
pub use path::*;
pub use registry::*;
pub use sink::*;
pub use speed_profile::*;
pub use tour::*;
pub use transition::*;
pub use triggers::*;
pub use yaw::*;
pub use zone::*;
pub use zoom::*;
