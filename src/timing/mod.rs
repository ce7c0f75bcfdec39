// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Timing
//!
//! - [`clock`] - Microsecond clock over an overflowing hardware counter.

pub mod clock;

pub use clock::{ClockConfig, MicrosecondClock, OverflowCounter, TimerCounter};
