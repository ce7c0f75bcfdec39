// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # RedBot Board Support
//!
//! STM32F767 implementations of the `redbot` hardware seams.
//!
//! ## Modules
//!
//! - [`hw`] - Register-level peripherals: USART, ADC, timers, PWM, LEDs, pins, delay.
//! - [`drivers`] - Devices built on `hw`: H-bridge, MPU-6050, status panel.
//!
//! The node binaries live in `src/bin/`.

#![no_std]

pub mod drivers;
pub mod hw;
