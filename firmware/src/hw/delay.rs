// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Busy-wait delay counted in core cycles.

use embedded_hal::delay::DelayNs;

/// Blocking delay derived from the core clock. Never shorter than requested.
#[derive(Copy, Clone)]
pub struct CycleDelay {
    cycles_per_us: u32,
}

impl CycleDelay {
    pub fn new(sysclk_hz: u32) -> Self {
        Self {
            cycles_per_us: (sysclk_hz / 1_000_000).max(1),
        }
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns as u64 * self.cycles_per_us as u64).div_ceil(1_000);
        cortex_m::asm::delay(cycles.min(u32::MAX as u64) as u32);
    }

    fn delay_us(&mut self, us: u32) {
        let cycles = us as u64 * self.cycles_per_us as u64;
        cortex_m::asm::delay(cycles.min(u32::MAX as u64) as u32);
    }
}
