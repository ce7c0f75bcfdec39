// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # RedBot Firmware Core
//!
//! Hardware-independent logic for the RedBot remote-controlled robot: a handheld remote with an
//! analog stick and a two-motor robot with an ultrasonic range finder and an accelerometer, joined
//! by a 9600 baud serial link.
//!
//! Board support lives in the `firmware` crate, which implements the hardware traits defined here
//! for an STM32F767 and runs the node loops from [`node`].
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`timing`] | Microsecond clock over an overflowing hardware timer |
//! | [`sensors`] | Range finder, collision detection, stick and button |
//! | [`control`] | Stick calibration and drive-byte encoding |
//! | [`protocol`] | Single-byte link messages, obstacle signaling, collision handshake |
//! | [`motors`] | Motor actuator trait, drive decoding, startup jingle |
//! | [`node`] | Remote and robot control loops |
//! | [`config`] | Compile-time constants for both nodes |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Build and flash a node:
//!
//! ```bash
//! cd firmware && cargo run --release --bin robot
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod error;
pub mod motors;
pub mod node;
pub mod protocol;
pub mod sensors;
pub mod timing;

#[cfg(test)]
mod testutil;

pub use error::{Error, Result};
