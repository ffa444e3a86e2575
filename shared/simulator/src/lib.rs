pub mod angle;
pub mod config;
pub mod drag;
pub mod easing;
pub mod heading;
pub mod layout;
pub mod session;
pub mod simulation;
pub mod snapshot;
pub mod ticker;
pub mod timeline;
pub mod wind;
