// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Remote control loop.
//!
//! One tick:
//!
//! 1. A pressed confirm button clears the fault display.
//! 2. If the robot sent a byte, act on it (see [`RemoteNode::handle_byte`]).
//! 3. Sample X then Y.
//! 4. Encode, display and send the left byte, then the right byte.
//!
//! A collision report blocks the loop in step 2 until the operator presses the button, so no drive
//! bytes go out while the alert is showing.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use defmt_or_log::{info, warn};

use crate::config::RemoteConfig;
use crate::control::StickEncoder;
use crate::error::{Error, Result};
use crate::protocol::{DriveControlByte, FaultCode, Link, LinkMessage, Motor, SerialLink};
use crate::sensors::{AdcRead, Axis, ConfirmButton, Joystick};

/// The two alternating frames of the collision alert.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlertFrame {
    Picture,
    Text,
}

/// Operator-facing status output of the remote.
pub trait FaultDisplay {
    type Error: Debug;

    /// Remove any fault indication.
    fn clear_faults(&mut self) -> core::result::Result<(), Self::Error>;

    fn show_collision_alert(&mut self, frame: AlertFrame) -> core::result::Result<(), Self::Error>;

    fn show_obstacle_warning(&mut self) -> core::result::Result<(), Self::Error>;

    fn show_comm_error(&mut self) -> core::result::Result<(), Self::Error>;

    /// Show the motor, direction and magnitude of a byte just sent.
    fn show_drive_byte(&mut self, byte: DriveControlByte) -> core::result::Result<(), Self::Error>;

    /// Blank the whole display.
    fn clear_screen(&mut self) -> core::result::Result<(), Self::Error>;
}

pub struct RemoteNode<S, A, B, F, D> {
    link: Link<S>,
    stick: Joystick<A>,
    button: ConfirmButton<B>,
    display: F,
    delay: D,
    encoder: StickEncoder,
    config: RemoteConfig,
}

impl<S, A, B, F, D> RemoteNode<S, A, B, F, D>
where
    S: SerialLink,
    A: AdcRead,
    B: InputPin,
    F: FaultDisplay,
    D: DelayNs,
{
    /// Calibrate the stick and assemble the node. Fails only on unusable stick constants.
    pub fn new(
        serial: S,
        adc: A,
        button: B,
        display: F,
        delay: D,
        config: RemoteConfig,
    ) -> Result<Self> {
        let encoder = StickEncoder::new(&config.stick)?;
        info!(
            "remote: stick on channels x {} y {}",
            config.x_channel, config.y_channel
        );
        Ok(Self {
            link: Link::new(serial),
            stick: Joystick::new(adc, config.x_channel, config.y_channel),
            button: ConfirmButton::new(button),
            display,
            delay,
            encoder,
            config,
        })
    }

    /// Run one tick and return the two bytes sent.
    pub fn tick(&mut self) -> Result<[DriveControlByte; 2]> {
        if self.button_pressed()? {
            self.update_display(|d| d.clear_faults())?;
        }

        match self.link.poll() {
            Ok(Some(byte)) => self.handle_byte(byte)?,
            Ok(None) => {}
            Err(_) => self.update_display(|d| d.show_comm_error())?,
        }

        let x = self.stick.position(Axis::X).map_err(|_| Error::Input)?;
        let y = self.stick.position(Axis::Y).map_err(|_| Error::Input)?;

        // Both bytes go out even if the readout fails.
        let mut shown = Ok(());
        let mut sent = [DriveControlByte::from_raw(0); 2];
        for (slot, motor) in sent.iter_mut().zip([Motor::Left, Motor::Right]) {
            let byte = self.encoder.encode(x, y, motor);
            self.link.send(LinkMessage::Drive(byte))?;
            *slot = byte;
            shown = shown.and(self.update_display(|d| d.show_drive_byte(byte)));
        }
        shown?;
        Ok(sent)
    }

    /// Tick forever, logging failed ticks.
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(e) = self.tick() {
                warn!("remote: tick failed: {}", e);
            }
        }
    }

    /// Act on one byte from the robot's fault channel.
    ///
    /// - `'0'`: clear the fault display
    /// - `'1'`: blink the collision alert until the button is pressed, then send `'1'` back and
    ///   blank the screen
    /// - `'2'`: show the obstacle warning
    /// - anything else: show a communication error
    pub fn handle_byte(&mut self, byte: u8) -> Result<()> {
        match FaultCode::try_from(byte) {
            Ok(FaultCode::Clear) => self.update_display(|d| d.clear_faults()),
            Ok(FaultCode::Collision) => self.confirm_collision(),
            Ok(FaultCode::ObstacleAhead) => self.update_display(|d| d.show_obstacle_warning()),
            Err(_) => {
                warn!("remote: unexpected byte {} from robot", byte);
                self.update_display(|d| d.show_comm_error())
            }
        }
    }

    fn confirm_collision(&mut self) -> Result<()> {
        info!("remote: collision reported, waiting for operator");
        let blink = self.config.alert_blink_ms;
        loop {
            self.update_display(|d| d.show_collision_alert(AlertFrame::Picture))?;
            self.delay.delay_ms(blink);
            self.update_display(|d| d.show_collision_alert(AlertFrame::Text))?;
            self.delay.delay_ms(blink);

            if self.button_pressed()? {
                break;
            }
        }
        info!("remote: collision confirmed");
        self.link.send(LinkMessage::CollisionAck)?;
        self.update_display(|d| d.clear_screen())
    }

    fn button_pressed(&mut self) -> Result<bool> {
        self.button.is_pressed().map_err(|_| Error::Input)
    }

    fn update_display(
        &mut self,
        update: impl FnOnce(&mut F) -> core::result::Result<(), F::Error>,
    ) -> Result<()> {
        update(&mut self.display).map_err(|_| Error::Display)
    }

    #[inline]
    pub fn encoder(&self) -> &StickEncoder {
        &self.encoder
    }

    #[inline]
    pub fn link(&mut self) -> &mut Link<S> {
        &mut self.link
    }

    #[inline]
    pub fn display_mut(&mut self) -> &mut F {
        &mut self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::link::tests::ScriptedSerial;
    use crate::testutil::{FakeDelay, ScriptedPin};
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shown {
        ClearFaults,
        Alert(AlertFrame),
        Obstacle,
        CommError,
        Drive(u8),
        ClearScreen,
    }

    /// Records every update. With the flag set, the drive-byte readout fails.
    #[derive(Default)]
    struct LogDisplay(Vec<Shown>, bool);

    impl LogDisplay {
        fn faults(&self) -> Vec<Shown> {
            self.0
                .iter()
                .copied()
                .filter(|s| !matches!(s, Shown::Drive(_)))
                .collect()
        }
    }

    impl FaultDisplay for LogDisplay {
        type Error = ();

        fn clear_faults(&mut self) -> core::result::Result<(), ()> {
            self.0.push(Shown::ClearFaults);
            Ok(())
        }

        fn show_collision_alert(&mut self, frame: AlertFrame) -> core::result::Result<(), ()> {
            self.0.push(Shown::Alert(frame));
            Ok(())
        }

        fn show_obstacle_warning(&mut self) -> core::result::Result<(), ()> {
            self.0.push(Shown::Obstacle);
            Ok(())
        }

        fn show_comm_error(&mut self) -> core::result::Result<(), ()> {
            self.0.push(Shown::CommError);
            Ok(())
        }

        fn show_drive_byte(&mut self, byte: DriveControlByte) -> core::result::Result<(), ()> {
            if self.1 {
                return Err(());
            }
            self.0.push(Shown::Drive(byte.raw()));
            Ok(())
        }

        fn clear_screen(&mut self) -> core::result::Result<(), ()> {
            self.0.push(Shown::ClearScreen);
            Ok(())
        }
    }

    /// Stick held at a fixed position.
    struct HeldStick {
        x: u8,
        y: u8,
    }

    impl AdcRead for HeldStick {
        type Error = ();
        const RESOLUTION_BITS: u32 = 8;

        fn read_channel(&mut self, channel: u8) -> core::result::Result<u16, ()> {
            match channel {
                1 => Ok(self.x as u16),
                0 => Ok(self.y as u16),
                _ => Err(()),
            }
        }
    }

    type TestRemote = RemoteNode<ScriptedSerial, HeldStick, ScriptedPin, LogDisplay, FakeDelay>;

    fn remote(rx: &[u8], x: u8, y: u8, button: &[bool]) -> TestRemote {
        RemoteNode::new(
            ScriptedSerial::with_rx(rx),
            HeldStick { x, y },
            ScriptedPin::new(button),
            LogDisplay::default(),
            FakeDelay::default(),
            RemoteConfig::DEFAULT,
        )
        .unwrap()
    }

    const RELEASED: bool = true;
    const PRESSED: bool = false;

    #[test]
    fn sends_left_then_right_every_tick() {
        let mut r = remote(&[], 133, 0, &[RELEASED]);

        let [left, right] = r.tick().unwrap();

        assert_eq!(left.motor(), Motor::Left);
        assert_eq!(right.motor(), Motor::Right);
        assert_eq!(r.link().inner().tx, [left.raw(), right.raw()]);
        assert_eq!(
            r.display.0,
            [Shown::Drive(left.raw()), Shown::Drive(right.raw())]
        );
    }

    #[test]
    fn readout_failure_still_sends_both_bytes() {
        let mut r = remote(&[], 133, 0, &[RELEASED]);
        r.display.1 = true;

        assert_eq!(r.tick(), Err(Error::Display));

        let tx = &r.link().inner().tx;
        assert_eq!(tx.len(), 2);
        assert_eq!(DriveControlByte::from_raw(tx[0]).motor(), Motor::Left);
        assert_eq!(DriveControlByte::from_raw(tx[1]).motor(), Motor::Right);
    }

    #[test]
    fn fault_bytes_drive_the_display() {
        let mut r = remote(&[b'2', b'0', b'x'], 133, 127, &[RELEASED]);
        for _ in 0..3 {
            r.tick().unwrap();
        }
        assert_eq!(
            r.display.faults(),
            [Shown::Obstacle, Shown::ClearFaults, Shown::CommError]
        );
    }

    #[test]
    fn receive_error_shows_comm_error() {
        let mut r = remote(&[], 133, 127, &[RELEASED]);
        r.link().inner().fail_next_read = true;
        r.tick().unwrap();
        assert_eq!(r.display.faults(), [Shown::CommError]);
    }

    #[test]
    fn button_clears_faults() {
        let mut r = remote(&[], 133, 127, &[PRESSED]);
        r.tick().unwrap();
        assert_eq!(r.display.faults(), [Shown::ClearFaults]);
    }

    #[test]
    fn collision_blinks_until_confirmed() {
        // Start-of-tick check, then two blink cycles unconfirmed, then pressed.
        let mut r = remote(&[b'1'], 133, 0, &[RELEASED, RELEASED, RELEASED, PRESSED]);

        let [left, right] = r.tick().unwrap();

        use AlertFrame::*;
        assert_eq!(
            r.display.faults(),
            [
                Shown::Alert(Picture),
                Shown::Alert(Text),
                Shown::Alert(Picture),
                Shown::Alert(Text),
                Shown::Alert(Picture),
                Shown::Alert(Text),
                Shown::ClearScreen,
            ]
        );
        assert_eq!(r.delay.total_ns, 6 * 500 * 1_000_000);
        // The ack goes out before this tick's drive bytes.
        assert_eq!(r.link().inner().tx, [b'1', left.raw(), right.raw()]);
    }

    #[test]
    fn centered_stick_sends_zero_magnitude() {
        let mut r = remote(&[], 200, 127, &[RELEASED]);
        let bytes = r.tick().unwrap();
        assert!(bytes.iter().all(|b| b.magnitude() == 0));
        assert!(!r.encoder().is_forward());
    }

    #[test]
    fn bad_stick_constants_fail_startup() {
        use crate::config::{AxisOrientation, StickConfig};
        let config = RemoteConfig::DEFAULT
            .with_stick(StickConfig::DEFAULT.with_x(AxisOrientation::new(133, 255, 132)));
        let r = RemoteNode::new(
            ScriptedSerial::default(),
            HeldStick { x: 0, y: 0 },
            ScriptedPin::new(&[RELEASED]),
            LogDisplay::default(),
            FakeDelay::default(),
            config,
        );
        assert!(matches!(
            r,
            Err(Error::Calibration(crate::control::CalibrationError::ZeroRange))
        ));
    }
}
