// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Robot-side collision confirmation handshake.
//!
//! On a detected collision the robot stops both motors, sends `'1'` once and then refuses to do
//! anything else until the remote answers with `'1'`. Any other byte, including a receive error,
//! leaves it waiting. There is no timeout.
//!
//! ```text
//!            collision / stop motors, send '1'
//!   Running ─────────────────────────────────▶ AwaitingCollisionAck
//!      ▲                                              │
//!      └──────────────── rx == '1' ───────────────────┘
//! ```

use defmt_or_log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::motors::MotorActuator;
use crate::protocol::{
    DriveControlByte, FaultCode, Link, LinkMessage, SerialLink, COLLISION_ACK,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HandshakeState {
    /// Normal tick processing.
    Running,
    /// Halted until the operator confirms the collision.
    AwaitingCollisionAck,
}

pub struct CollisionHandshake {
    state: HandshakeState,
}

impl CollisionHandshake {
    pub fn new() -> Self {
        Self {
            state: HandshakeState::Running,
        }
    }

    #[inline]
    pub fn state(&self) -> HandshakeState {
        self.state
    }

    #[inline]
    pub fn is_awaiting_ack(&self) -> bool {
        self.state == HandshakeState::AwaitingCollisionAck
    }

    /// Interpret a byte received from the remote in the current phase.
    ///
    /// While running every byte is a drive-control byte. While awaiting acknowledgement only `'1'`
    /// means anything; other bytes decode to `None`.
    pub fn decode(&self, byte: u8) -> Option<LinkMessage> {
        match self.state {
            HandshakeState::Running => Some(LinkMessage::Drive(DriveControlByte::from_raw(byte))),
            HandshakeState::AwaitingCollisionAck if byte == COLLISION_ACK => {
                Some(LinkMessage::CollisionAck)
            }
            HandshakeState::AwaitingCollisionAck => None,
        }
    }

    /// Stop the motors, report the collision and enter [`HandshakeState::AwaitingCollisionAck`].
    ///
    /// The state changes even if the stop or the send fails; the caller still has to wait for
    /// the acknowledgement.
    pub fn begin<S, A>(&mut self, link: &mut Link<S>, actuator: &mut A) -> Result<()>
    where
        S: SerialLink,
        A: MotorActuator,
    {
        self.state = HandshakeState::AwaitingCollisionAck;
        info!("handshake: collision, awaiting acknowledgement");

        let stopped = actuator.stop().map_err(|_| {
            warn!("handshake: emergency stop failed");
            Error::Actuator
        });
        link.send(LinkMessage::Fault(FaultCode::Collision))?;
        stopped
    }

    /// Feed one received byte. Returns the state after the byte.
    pub fn on_byte(&mut self, byte: u8) -> HandshakeState {
        if let Some(LinkMessage::CollisionAck) = self.decode(byte) {
            if self.is_awaiting_ack() {
                info!("handshake: collision acknowledged");
                self.state = HandshakeState::Running;
            }
        } else if self.is_awaiting_ack() {
            debug!("handshake: ignoring byte {} while awaiting ack", byte);
        }
        self.state
    }

    /// Busy-poll the link until the acknowledgement arrives.
    ///
    /// Never returns while the remote stays silent or sends anything other than `'1'`.
    pub fn wait_for_ack<S: SerialLink>(&mut self, link: &mut Link<S>) {
        while self.is_awaiting_ack() {
            match link.poll() {
                Ok(Some(byte)) => {
                    self.on_byte(byte);
                }
                Ok(None) => {}
                Err(_) => warn!("handshake: receive error while awaiting ack"),
            }
        }
    }
}

impl Default for CollisionHandshake {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motors::actuator::tests::RecordingActuator;
    use crate::motors::Gear;
    use crate::protocol::link::tests::ScriptedSerial;
    use crate::protocol::Motor;

    #[test]
    fn begin_stops_motors_and_reports_once() {
        let mut link = Link::new(ScriptedSerial::default());
        let mut actuator = RecordingActuator::default();
        actuator.duty = [200, 120];
        actuator.gear = [Gear::Forward, Gear::Forward];

        let mut handshake = CollisionHandshake::new();
        handshake.begin(&mut link, &mut actuator).unwrap();

        assert_eq!(handshake.state(), HandshakeState::AwaitingCollisionAck);
        assert_eq!(actuator.duty, [0, 0]);
        assert_eq!(actuator.gear, [Gear::Neutral, Gear::Neutral]);
        assert_eq!(link.free().tx, [b'1']);
    }

    #[test]
    fn only_ack_byte_releases() {
        let mut handshake = CollisionHandshake::new();
        handshake.state = HandshakeState::AwaitingCollisionAck;

        for byte in [b'0', b'2', 0x00, 0xFF, 0b1010_0111] {
            assert_eq!(
                handshake.on_byte(byte),
                HandshakeState::AwaitingCollisionAck
            );
        }
        assert_eq!(handshake.on_byte(b'1'), HandshakeState::Running);
    }

    #[test]
    fn running_decodes_every_byte_as_drive() {
        let handshake = CollisionHandshake::new();
        let byte = DriveControlByte::new(Motor::Left, true, 0x30).raw();
        assert_eq!(
            handshake.decode(b'1'),
            Some(LinkMessage::Drive(DriveControlByte::from_raw(b'1')))
        );
        assert_eq!(
            handshake.decode(byte).map(|m| m.to_byte()),
            Some(byte)
        );
    }

    #[test]
    fn ack_while_running_is_a_drive_byte() {
        let mut handshake = CollisionHandshake::new();
        assert_eq!(handshake.on_byte(b'1'), HandshakeState::Running);
    }

    #[test]
    fn wait_for_ack_skips_noise_and_errors() {
        let mut serial = ScriptedSerial::with_rx(&[b'0', b'2']);
        serial.rx.push_back(None);
        serial.rx.push_back(Some(0x7F));
        serial.rx.push_back(Some(b'1'));
        serial.rx.push_back(Some(b'9'));
        serial.fail_next_read = true;
        let mut link = Link::new(serial);

        let mut handshake = CollisionHandshake::new();
        handshake.state = HandshakeState::AwaitingCollisionAck;
        handshake.wait_for_ack(&mut link);

        assert_eq!(handshake.state(), HandshakeState::Running);
        // Bytes after the ack stay queued for normal processing.
        assert_eq!(link.poll(), Ok(Some(b'9')));
    }
}
