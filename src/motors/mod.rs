// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Actuator Abstractions
//!
//! - [`actuator`] - Motor actuator seam and drive-byte decoding on the robot.
//! - [`jingle`] - Startup tune played through the motors' PWM.

pub mod actuator;
pub mod jingle;

pub use actuator::{DriveCommand, Gear, MotorActuator};
