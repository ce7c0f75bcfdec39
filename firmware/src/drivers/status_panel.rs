// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Remote operator display: three fault LEDs plus text on the debug console.
//!
//! | LED | Meaning |
//! | --- | ------- |
//! | green | link healthy |
//! | yellow | obstacle ahead, forward motion refused |
//! | red | collision, blinks with the alert frames |

use core::convert::Infallible;
use core::fmt::Write;

use redbot::node::{AlertFrame, FaultDisplay};
use redbot::protocol::{DriveControlByte, Motor};
use stm32f7xx_hal::serial::Instance;

use crate::hw::{Led, Usart};

pub type GreenLed = Led<'B', 0>;
pub type YellowLed = Led<'B', 7>;
pub type RedLed = Led<'B', 14>;

pub struct StatusPanel<U: Instance> {
    console: Usart<U>,
    green: GreenLed,
    yellow: YellowLed,
    red: RedLed,
}

impl<U: Instance> StatusPanel<U> {
    pub fn new(console: Usart<U>, green: GreenLed, yellow: YellowLed, red: RedLed) -> Self {
        Self {
            console,
            green,
            yellow,
            red,
        }
    }

    /// Print the power-on banner and light the link LED.
    pub fn splash(&mut self) {
        self.console.println("");
        self.console.println("RedBot remote");
        self.green.on();
    }
}

impl<U: Instance> FaultDisplay for StatusPanel<U> {
    type Error = Infallible;

    fn clear_faults(&mut self) -> Result<(), Infallible> {
        self.red.off();
        self.yellow.off();
        self.green.on();
        self.console.println("faults cleared");
        Ok(())
    }

    fn show_collision_alert(&mut self, frame: AlertFrame) -> Result<(), Infallible> {
        match frame {
            AlertFrame::Picture => {
                self.red.on();
                self.console.println("*** COLLISION ***");
            }
            AlertFrame::Text => {
                self.red.off();
                self.console.println("COLLISION! Press and hold the button to confirm.");
            }
        }
        Ok(())
    }

    fn show_obstacle_warning(&mut self) -> Result<(), Infallible> {
        self.yellow.on();
        self.console.println("OBSTACLE WARNING: forward motion disabled");
        Ok(())
    }

    fn show_comm_error(&mut self) -> Result<(), Infallible> {
        self.green.off();
        self.console.println("COMMUNICATION ERROR");
        Ok(())
    }

    fn show_drive_byte(&mut self, byte: DriveControlByte) -> Result<(), Infallible> {
        let motor = match byte.motor() {
            Motor::Left => 'L',
            Motor::Right => 'R',
        };
        let direction = if byte.is_forward() { "FWD" } else { "REV" };
        let _ = write!(
            self.console,
            "Motor {} {} {:>3}\r\n",
            motor,
            direction,
            byte.magnitude()
        );
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), Infallible> {
        self.red.off();
        // ANSI erase display, cursor home
        self.console.write_str("\x1b[2J\x1b[H");
        Ok(())
    }
}
