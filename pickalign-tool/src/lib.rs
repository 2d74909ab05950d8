//! Interactive point-pick alignment
//!
//! This crate wires the alignment geometry into something a 3D viewer can
//! host:
//! - An [`AlignmentSession`] state machine that collects picks per object
//! - The [`AlignmentTool`] interface a host dispatches input to
//! - TOML configuration and logging setup
//! - In-memory transform and marker collaborators

pub mod config;
pub mod logging;
pub mod scene;
pub mod session;
pub mod tool;

pub use config::*;
pub use logging::*;
pub use scene::*;
pub use session::*;
pub use tool::*;
