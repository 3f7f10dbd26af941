//! View-state controller for a 360° panorama viewer.
//!
//! Pointer drags, touch swipes and pinches, wheel steps and device
//! orientation samples are turned into a target yaw/pitch/fov; once per
//! frame [`Controller::tick`] eases the rendered view toward that target
//! and hands the result to whatever renderer draws the panorama.

pub mod angle;
pub mod config;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod gyro;
pub mod input;
pub mod navigator;
pub mod view_state;

pub use config::Config;
pub use controller::{Controller, GyroToggle};
pub use error::ConfigError;
pub use gesture::Swipe;
pub use gyro::{GyroPermission, GyroState, OrientationSample};
pub use input::InputHandler;
pub use navigator::{Gallery, Navigator};
pub use view_state::{Orientation, ViewSnapshot, ViewState};
