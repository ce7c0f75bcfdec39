// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Robot control loop.
//!
//! One tick, in order:
//!
//! 1. Measure distance.
//! 2. Send `'2'` or `'0'` if the obstacle state changed.
//! 3. Wait the settle delay.
//! 4. If a drive byte has arrived, set both gears and the addressed motor's duty.
//! 5. Sample the accelerometer; on a collision stop, send `'1'` and block until the remote
//!    acknowledges.
//!
//! A tick either completes or blocks in step 5, so actuation always uses the distance measured in
//! the same tick.

use embedded_hal::delay::DelayNs;

use defmt_or_log::{info, warn};

use crate::config::RobotConfig;
use crate::error::{Error, Result};
use crate::motors::{DriveCommand, MotorActuator};
use crate::protocol::{
    CollisionHandshake, DriveControlByte, FaultCode, Link, LinkMessage, ObstacleMonitor,
    SerialLink,
};
use crate::sensors::{Accelerometer, CollisionDetector, DistanceSensor};

/// What happened during one robot tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RobotTick {
    pub distance_cm: u16,
    /// Fault code sent on the obstacle channel, if any.
    pub fault_sent: Option<FaultCode>,
    /// Drive byte applied to the motors, if one arrived.
    pub drive: Option<DriveControlByte>,
    /// A collision was detected and acknowledged.
    pub collision: bool,
}

pub struct RobotNode<S, A, R, M, D> {
    link: Link<S>,
    actuator: A,
    ranger: R,
    accel: M,
    delay: D,
    config: RobotConfig,
    obstacles: ObstacleMonitor,
    collisions: CollisionDetector,
    handshake: CollisionHandshake,
}

impl<S, A, R, M, D> RobotNode<S, A, R, M, D>
where
    S: SerialLink,
    A: MotorActuator,
    R: DistanceSensor,
    M: Accelerometer,
    D: DelayNs,
{
    pub fn new(serial: S, actuator: A, ranger: R, accel: M, delay: D, config: RobotConfig) -> Self {
        info!(
            "robot: distance limit {} cm, collision limit {}",
            config.distance_limit_cm, config.collision_limit
        );
        Self {
            link: Link::new(serial),
            actuator,
            ranger,
            accel,
            delay,
            obstacles: ObstacleMonitor::new(config.distance_limit_cm),
            collisions: CollisionDetector::from_config(&config),
            handshake: CollisionHandshake::new(),
            config,
        }
    }

    /// Run one tick. Returns after a collision only once it has been acknowledged.
    ///
    /// The accelerometer is sampled on every tick. A failed range reading or drive update is
    /// reported only after the collision check has run; the first error wins.
    pub fn tick(&mut self) -> Result<RobotTick> {
        let mut report = RobotTick::default();

        let driven = match self.ranger.distance_cm() {
            Ok(distance) => self.signal_and_drive(distance, &mut report),
            Err(_) => {
                warn!("robot: range reading failed, skipping drive update");
                self.delay.delay_ms(self.config.settle_delay_ms);
                Err(Error::Ranging)
            }
        };

        let collided = self
            .collisions
            .check(&mut self.accel)
            .map_err(|_| Error::Accelerometer);

        let mut halted = Ok(());
        if collided == Ok(true) {
            report.collision = true;
            halted = self.handshake.begin(&mut self.link, &mut self.actuator);
            self.handshake.wait_for_ack(&mut self.link);
        }

        driven.and(collided).and(halted)?;
        Ok(report)
    }

    /// Tick forever, logging failed ticks.
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(e) = self.tick() {
                warn!("robot: tick failed: {}", e);
            }
        }
    }

    /// Obstacle signaling, settle delay and drive reception for a valid range reading.
    fn signal_and_drive(&mut self, distance: u16, report: &mut RobotTick) -> Result<()> {
        report.distance_cm = distance;

        if let Some(code) = self.obstacles.update(distance) {
            info!("robot: obstacle state {} at {} cm", u8::from(code), distance);
            self.link.send(LinkMessage::Fault(code))?;
            report.fault_sent = Some(code);
        }

        self.delay.delay_ms(self.config.settle_delay_ms);

        report.drive = self.receive_drive(distance)?;
        Ok(())
    }

    fn receive_drive(&mut self, distance: u16) -> Result<Option<DriveControlByte>> {
        let byte = match self.link.poll() {
            Ok(Some(byte)) => byte,
            Ok(None) => return Ok(None),
            // Logged by the link; the tick carries on without a drive update.
            Err(_) => return Ok(None),
        };

        match self.handshake.decode(byte) {
            Some(LinkMessage::Drive(drive)) => {
                DriveCommand::new(drive)
                    .apply(&mut self.actuator, self.obstacles.is_obstacle(distance))
                    .map_err(|_| Error::Actuator)?;
                Ok(Some(drive))
            }
            _ => Ok(None),
        }
    }

    #[inline]
    pub fn handshake(&self) -> &CollisionHandshake {
        &self.handshake
    }

    #[inline]
    pub fn actuator(&mut self) -> &mut A {
        &mut self.actuator
    }

    #[inline]
    pub fn link(&mut self) -> &mut Link<S> {
        &mut self.link
    }

    #[inline]
    pub fn ranger(&mut self) -> &mut R {
        &mut self.ranger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motors::actuator::tests::RecordingActuator;
    use crate::motors::Gear;
    use crate::protocol::link::tests::ScriptedSerial;
    use crate::protocol::Motor;
    use crate::testutil::FakeDelay;
    use std::collections::VecDeque;

    struct Distances(VecDeque<u16>);

    impl DistanceSensor for Distances {
        type Error = ();

        fn distance_cm(&mut self) -> core::result::Result<u16, ()> {
            Ok(self.0.pop_front().unwrap_or(100))
        }
    }

    struct Accel(VecDeque<[i16; 3]>);

    impl Accelerometer for Accel {
        type Error = ();

        fn read_raw_accel(&mut self) -> core::result::Result<[i16; 3], ()> {
            Ok(self.0.pop_front().unwrap_or([-350, -35, 1930]))
        }
    }

    type TestRobot = RobotNode<ScriptedSerial, RecordingActuator, Distances, Accel, FakeDelay>;

    fn robot(rx: &[u8], distances: &[u16]) -> TestRobot {
        RobotNode::new(
            ScriptedSerial::with_rx(rx),
            RecordingActuator::default(),
            Distances(distances.iter().copied().collect()),
            Accel(VecDeque::new()),
            FakeDelay::default(),
            RobotConfig::DEFAULT,
        )
    }

    #[test]
    fn drive_byte_reaches_motors() {
        let fwd = DriveControlByte::new(Motor::Right, true, 120);
        let mut bot = robot(&[fwd.raw()], &[80]);

        let tick = bot.tick().unwrap();

        assert_eq!(tick.drive, Some(fwd));
        assert_eq!(tick.fault_sent, None);
        assert_eq!(bot.actuator.gear, [Gear::Forward; 2]);
        assert_eq!(bot.actuator.duty, [0, 120]);
        assert_eq!(bot.delay.total_ns, 10_000_000);
    }

    #[test]
    fn one_byte_per_tick() {
        let left = DriveControlByte::new(Motor::Left, true, 40);
        let right = DriveControlByte::new(Motor::Right, true, 44);
        let mut bot = robot(&[left.raw(), right.raw()], &[]);

        assert_eq!(bot.tick().unwrap().drive, Some(left));
        assert_eq!(bot.actuator.duty, [40, 0]);
        assert_eq!(bot.tick().unwrap().drive, Some(right));
        assert_eq!(bot.actuator.duty, [40, 44]);
        assert_eq!(bot.tick().unwrap().drive, None);
    }

    #[test]
    fn obstacle_blocks_forward_in_same_tick() {
        let fwd = DriveControlByte::new(Motor::Left, true, 200);
        let mut bot = robot(&[fwd.raw()], &[12]);

        let tick = bot.tick().unwrap();

        assert_eq!(tick.fault_sent, Some(FaultCode::ObstacleAhead));
        assert_eq!(bot.actuator.gear, [Gear::Neutral; 2]);
        assert_eq!(bot.link.inner().tx, [b'2']);
    }

    #[test]
    fn zero_distance_does_not_block_forward() {
        let fwd = DriveControlByte::new(Motor::Left, true, 200);
        let mut bot = robot(&[fwd.raw()], &[0]);
        bot.tick().unwrap();
        assert_eq!(bot.actuator.gear, [Gear::Forward; 2]);
        assert!(bot.link.inner().tx.is_empty());
    }

    #[test]
    fn fault_channel_is_edge_triggered() {
        let mut bot = robot(&[], &[40, 40, 25, 25, 25, 35, 35]);
        for _ in 0..7 {
            bot.tick().unwrap();
        }
        assert_eq!(bot.link.inner().tx, [b'2', b'0']);
    }

    #[test]
    fn collision_halts_until_acknowledged() {
        let fwd = DriveControlByte::new(Motor::Left, true, 100);
        let mut bot = robot(&[fwd.raw(), b'0', b'2', b'1', 0x47], &[]);
        bot.accel.0.push_back([12_000, 0, 1930]);
        bot.actuator.gear = [Gear::Forward; 2];

        let tick = bot.tick().unwrap();

        assert!(tick.collision);
        assert!(!bot.handshake().is_awaiting_ack());
        assert_eq!(bot.actuator.gear, [Gear::Neutral; 2]);
        assert_eq!(bot.actuator.duty, [0, 0]);
        assert_eq!(bot.link.inner().tx, [b'1']);

        // The byte after the ack is a drive byte again.
        let tick = bot.tick().unwrap();
        assert_eq!(tick.drive, Some(DriveControlByte::from_raw(0x47)));
    }

    #[test]
    fn receive_error_skips_drive_update() {
        let mut bot = robot(&[0xFF], &[]);
        bot.link.inner().fail_next_read = true;

        assert_eq!(bot.tick().unwrap().drive, None);
        assert_eq!(bot.tick().unwrap().drive, Some(DriveControlByte::from_raw(0xFF)));
    }

    struct DeadRanger;

    impl DistanceSensor for DeadRanger {
        type Error = ();

        fn distance_cm(&mut self) -> core::result::Result<u16, ()> {
            Err(())
        }
    }

    #[test]
    fn collision_checked_when_ranging_fails() {
        let mut bot = RobotNode::new(
            ScriptedSerial::with_rx(&[b'1']),
            RecordingActuator::default(),
            DeadRanger,
            Accel([[12_000, -35, 1930]].into_iter().collect()),
            FakeDelay::default(),
            RobotConfig::DEFAULT,
        );
        bot.actuator.gear = [Gear::Forward; 2];
        bot.actuator.duty = [200, 200];

        assert_eq!(bot.tick(), Err(Error::Ranging));

        assert_eq!(bot.actuator.gear, [Gear::Neutral; 2]);
        assert_eq!(bot.actuator.duty, [0, 0]);
        assert_eq!(bot.link.inner().tx, [b'1']);
        assert!(!bot.handshake().is_awaiting_ack());
    }

    #[test]
    fn collision_checked_when_drive_update_fails() {
        let mut bot = robot(&[0x03, b'1'], &[]);
        bot.accel.0.push_back([-350, -35, -9_000]);
        bot.actuator.fail = true;

        assert_eq!(bot.tick(), Err(Error::Actuator));

        assert!(bot.accel.0.is_empty());
        assert_eq!(bot.link.inner().tx, [b'1']);
        assert!(!bot.handshake().is_awaiting_ack());
    }

    #[test]
    fn actuator_failure_surfaces() {
        let mut bot = robot(&[0x03], &[]);
        bot.actuator.fail = true;
        assert_eq!(bot.tick(), Err(Error::Actuator));
    }
}
