// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the robot and remote boards (STM32F767, Nucleo-144 headers).

use stm32f7xx_hal::{
    gpio::{
        gpioa, gpiob, gpiod, gpioe, Alternate, Analog, Floating, Input, OpenDrain, Output,
        PushPull,
    },
    pac,
    prelude::*,
};

/// USART2 remote ↔ robot link, 9600 8N1 on both boards.
pub struct LinkPins {
    pub tx: gpiod::PD5<Alternate<7>>,
    pub rx: gpiod::PD6<Alternate<7>>,
}

/// USART3 debug console, routed to the ST-LINK virtual COM port.
pub struct ConsolePins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// H-bridge inputs. Each direction pair is (forward, reverse).
pub struct BridgePins {
    pub left_en: gpiod::PD12<Alternate<2>>,  // TIM4_CH1 (PWM)
    pub right_en: gpiod::PD13<Alternate<2>>, // TIM4_CH2 (PWM)
    pub left_fwd: gpioe::PE2<Output<PushPull>>,
    pub left_rev: gpioe::PE3<Output<PushPull>>,
    pub right_fwd: gpioe::PE4<Output<PushPull>>,
    pub right_rev: gpioe::PE5<Output<PushPull>>,
}

/// Ultrasonic ranger. The echo line raises EXTI3 on both edges.
pub struct RangerPins {
    pub trigger: gpiob::PB1<Output<PushPull>>,
    pub echo: gpiob::PB3<Input<Floating>>,
}

/// I2C1 to the accelerometer.
pub struct I2c1Pins {
    pub scl: gpiob::PB8<Alternate<4, OpenDrain>>,
    pub sda: gpiob::PB9<Alternate<4, OpenDrain>>,
}

/// All robot pins. Construct this once at startup using:
///
/// ```rust
/// let pins = RobotPins::new(dp.GPIOB, dp.GPIOD, dp.GPIOE);
/// ```
pub struct RobotPins {
    pub link: LinkPins,
    pub bridge: BridgePins,
    pub ranger: RangerPins,
    pub i2c1: I2c1Pins,
}

impl RobotPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpiob: pac::GPIOB, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            link: LinkPins {
                tx: gpiod.pd5.into_alternate::<7>(),
                rx: gpiod.pd6.into_alternate::<7>(),
            },

            bridge: BridgePins {
                left_en: gpiod.pd12.into_alternate::<2>(),
                right_en: gpiod.pd13.into_alternate::<2>(),
                left_fwd: gpioe.pe2.into_push_pull_output(),
                left_rev: gpioe.pe3.into_push_pull_output(),
                right_fwd: gpioe.pe4.into_push_pull_output(),
                right_rev: gpioe.pe5.into_push_pull_output(),
            },

            ranger: RangerPins {
                trigger: gpiob.pb1.into_push_pull_output(),
                echo: gpiob.pb3.into_floating_input(),
            },

            i2c1: I2c1Pins {
                scl: gpiob.pb8.into_alternate_open_drain::<4>(),
                sda: gpiob.pb9.into_alternate_open_drain::<4>(),
            },
        }
    }
}

/// Two-axis stick on ADC1: Y on IN0, X on IN1.
pub struct StickPins {
    pub y: gpioa::PA0<Analog>,
    pub x: gpioa::PA1<Analog>,
}

/// Fault indicators on the Nucleo user LEDs.
pub struct LedPins {
    pub green: gpiob::PB0<Output<PushPull>>,
    pub yellow: gpiob::PB7<Output<PushPull>>,
    pub red: gpiob::PB14<Output<PushPull>>,
}

/// All remote pins.
pub struct RemotePins {
    pub link: LinkPins,
    pub console: ConsolePins,
    pub stick: StickPins,
    /// Confirmation push button to ground.
    pub button: gpioe::PE0<Input<Floating>>,
    pub leds: LedPins,
}

impl RemotePins {
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            link: LinkPins {
                tx: gpiod.pd5.into_alternate::<7>(),
                rx: gpiod.pd6.into_alternate::<7>(),
            },

            console: ConsolePins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            stick: StickPins {
                y: gpioa.pa0.into_analog(),
                x: gpioa.pa1.into_analog(),
            },

            button: gpioe.pe0.into_floating_input(),

            leds: LedPins {
                green: gpiob.pb0.into_push_pull_output(),
                yellow: gpiob.pb7.into_push_pull_output(),
                red: gpiob.pb14.into_push_pull_output(),
            },
        }
    }
}
