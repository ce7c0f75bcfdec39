// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Node Control Loops
//!
//! - [`remote`] - Handheld remote: stick sampling, drive-byte transmission, fault display.
//! - [`robot`] - Mobile robot: ranging, drive actuation, collision handshake.

pub mod remote;
pub mod robot;

pub use remote::{AlertFrame, FaultDisplay, RemoteNode};
pub use robot::{RobotNode, RobotTick};
