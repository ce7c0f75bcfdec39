// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration for both nodes.
//!
//! All values are fixed constants; nothing is persisted and calibration is recomputed at every
//! startup. Each struct has a `DEFAULT` matching the assembled hardware and `with_*` builders for
//! boards that differ.

use crate::timing::ClockConfig;

/// Serial link speed shared by both nodes (8 data bits, no parity, 1 stop bit).
pub const LINK_BAUD_RATE: u32 = 9_600;

/// Timer input clock on both boards.
pub const TIMER_CLOCK_HZ: u32 = 16_000_000;

/// Echo-pulse timer: /64 prescaler on a 16-bit counter, 4 µs per tick.
pub const RANGING_CLOCK: ClockConfig = ClockConfig::new(64, 65_536, TIMER_CLOCK_HZ);

/// Motor PWM timer: /1024 prescaler on an 8-bit counter.
pub const PWM_CLOCK: ClockConfig = ClockConfig::new(1024, 256, TIMER_CLOCK_HZ);

/// Raw ADC readings of one stick axis at its rest position and both mechanical extremes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisOrientation {
    pub zero: u8,
    pub negative_extreme: u8,
    pub positive_extreme: u8,
}

impl AxisOrientation {
    pub const fn new(zero: u8, negative_extreme: u8, positive_extreme: u8) -> Self {
        Self {
            zero,
            negative_extreme,
            positive_extreme,
        }
    }
}

/// Remote-side stick and mixing parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StickConfig {
    /// X axis: negative is stick left, positive is stick right.
    pub x: AxisOrientation,
    /// Y axis: negative is stick down (reverse), positive is stick up (forward).
    pub y: AxisOrientation,
    /// Half-width of the Y dead-zone around `y.zero`.
    pub zero_offset: u8,
    /// Share of the X deflection taken off the inner motor while turning.
    pub steering_sensitivity: f32,
    /// Share of the Y deflection passed on as throttle.
    pub throttle_sensitivity: f32,
}

impl StickConfig {
    pub const DEFAULT: Self = Self {
        x: AxisOrientation::new(133, 255, 0),
        y: AxisOrientation::new(127, 255, 0),
        zero_offset: 5,
        steering_sensitivity: 0.3,
        throttle_sensitivity: 0.7,
    };

    pub fn with_x(mut self, x: AxisOrientation) -> Self {
        self.x = x;
        self
    }

    pub fn with_y(mut self, y: AxisOrientation) -> Self {
        self.y = y;
        self
    }

    pub fn with_zero_offset(mut self, zero_offset: u8) -> Self {
        self.zero_offset = zero_offset;
        self
    }

    pub fn with_sensitivity(mut self, steering: f32, throttle: f32) -> Self {
        self.steering_sensitivity = steering;
        self.throttle_sensitivity = throttle;
        self
    }
}

impl Default for StickConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Remote node parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RemoteConfig {
    pub stick: StickConfig,
    /// ADC channel of the stick's X axis.
    pub x_channel: u8,
    /// ADC channel of the stick's Y axis.
    pub y_channel: u8,
    /// Period of each frame of the collision alert.
    pub alert_blink_ms: u32,
}

impl RemoteConfig {
    pub const DEFAULT: Self = Self {
        stick: StickConfig::DEFAULT,
        x_channel: 1,
        y_channel: 0,
        alert_blink_ms: 500,
    };

    pub fn with_stick(mut self, stick: StickConfig) -> Self {
        self.stick = stick;
        self
    }

    pub fn with_channels(mut self, x_channel: u8, y_channel: u8) -> Self {
        self.x_channel = x_channel;
        self.y_channel = y_channel;
        self
    }

    pub fn with_alert_blink_ms(mut self, ms: u32) -> Self {
        self.alert_blink_ms = ms;
        self
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Robot node parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RobotConfig {
    /// Obstacle distance below which forward motion is refused.
    pub distance_limit_cm: u16,
    /// Accelerometer output with the robot level and still (x, y, z).
    pub accel_zero: [i16; 3],
    /// Deviation from `accel_zero` on any axis that counts as a collision.
    pub collision_limit: i16,
    /// Pause between fault signaling and drive-byte reception.
    pub settle_delay_ms: u32,
}

impl RobotConfig {
    pub const DEFAULT: Self = Self {
        distance_limit_cm: 30,
        accel_zero: [-350, -35, 1930],
        collision_limit: 10_000,
        settle_delay_ms: 10,
    };

    pub fn with_distance_limit_cm(mut self, cm: u16) -> Self {
        self.distance_limit_cm = cm;
        self
    }

    pub fn with_accel_zero(mut self, zero: [i16; 3]) -> Self {
        self.accel_zero = zero;
        self
    }

    pub fn with_collision_limit(mut self, limit: i16) -> Self {
        self.collision_limit = limit;
        self
    }

    pub fn with_settle_delay_ms(mut self, ms: u32) -> Self {
        self.settle_delay_ms = ms;
        self
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
