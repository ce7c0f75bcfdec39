// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sensors
//!
//! - [`range_finder`] - Ultrasonic echo timing and the [`DistanceSensor`] seam.
//! - [`collision`] - Accelerometer threshold collision detection.
//! - [`joystick`] - Analog stick axes and the confirm button on the remote.

pub mod collision;
pub mod joystick;
pub mod range_finder;

pub use collision::{Accelerometer, CollisionDetector};
pub use joystick::{AdcRead, Axis, ConfirmButton, Joystick, AXIS_ERROR_SAMPLE};
pub use range_finder::{micros_to_cm, DistanceSensor, RangeFinder};
