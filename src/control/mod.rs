// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Stick Control
//!
//! This module turns raw analog stick samples into motor control bytes on the remote.
//!
//! ## Modules
//!
//! - [`calibration`] - Per-axis, per-direction calibration derived from the stick orientation.
//! - [`stick_encoder`] - Throttle and steering blend producing one control byte per motor.

pub mod calibration;
pub mod stick_encoder;

pub use calibration::{
    compute_ranges, AxisCalibration, AxisSide, CalibratedAxis, CalibrationError,
    StickCalibration,
};
pub use stick_encoder::StickEncoder;
