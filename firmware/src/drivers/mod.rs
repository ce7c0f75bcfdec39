// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod bridge;
pub mod mpu6050;
pub mod status_panel;

pub use bridge::DualBridge;
pub use mpu6050::Mpu6050;
pub use status_panel::StatusPanel;
