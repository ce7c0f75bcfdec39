// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod adc;
pub mod delay;
pub mod digital;
pub mod led;
pub mod pins;
pub mod pwm;
pub mod timer;
pub mod usart;

pub use adc::Adc;
pub use delay::CycleDelay;
pub use digital::{OutPin, PullUpPin};
pub use led::Led;
pub use pins::{RemotePins, RobotPins};
pub use pwm::DualPwm;
pub use timer::CounterTimer;
pub use usart::{PortError, SerialPort, Usart};
