// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Link Protocol
//!
//! - [`messages`] - Wire bytes: drive-control bytes, fault codes, acknowledgement.
//! - [`link`] - Serial seam and message-level send/poll.
//! - [`fault_monitor`] - Edge-triggered obstacle reporting (robot → remote).
//! - [`handshake`] - Blocking collision confirmation (robot side).

pub mod fault_monitor;
pub mod handshake;
pub mod link;
pub mod messages;

pub use fault_monitor::ObstacleMonitor;
pub use handshake::{CollisionHandshake, HandshakeState};
pub use link::{Link, SerialLink};
pub use messages::{DriveControlByte, FaultCode, LinkMessage, Motor, COLLISION_ACK};
