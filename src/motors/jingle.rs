// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Audible startup jingle played through the drive motors.
//!
//! With one motor forward and the other reversed, the PWM duty sets the pitch of the whine the
//! motors make. The robot stays in place because the two wheels fight each other only briefly per
//! note.

use embedded_hal::delay::DelayNs;

use crate::motors::{Gear, MotorActuator};
use crate::protocol::Motor;

/// One note: PWM duty and how long to hold it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub duty: u8,
    pub duration_ms: u32,
}

const fn note(duty: u8, duration_ms: u32) -> Note {
    Note { duty, duration_ms }
}

const T1: u32 = 240;
const T2: u32 = 480;
const T4: u32 = 960;
const T6: u32 = 1440;

const F2: u8 = 88;
const G2: u8 = 98;
const AB: u8 = 104;
const BB: u8 = 117;
const C: u8 = 131;
const D: u8 = 147;
const EB: u8 = 156;
const F3: u8 = 175;
const G3: u8 = 196;

/// Theme played at robot startup.
pub const THEME: &[Note] = &[
    note(G3, T6),
    note(C, T6),
    note(EB, T1),
    note(F3, T1),
    note(G3, T4),
    note(C, T4),
    note(EB, T1),
    note(F3, T1),
    note(D, T2),
    note(G2, T2),
    note(BB, T1),
    note(C, T1),
    note(D, T2),
    note(G2, T2),
    note(BB, T1),
    note(C, T1),
    note(D, T2),
    note(G2, T2),
    note(BB, T1),
    note(C, T1),
    note(D, T2),
    note(G2, T2),
    note(BB, T2),
    note(F3, T6),
    note(BB, T6),
    note(EB, T1),
    note(D, T1),
    note(F3, T4),
    note(BB, T6),
    note(EB, T1),
    note(D, T1),
    note(F2, T2),
    note(AB, T1),
    note(BB, T1),
    note(C, T2),
    note(F2, T2),
    note(AB, T1),
    note(BB, T1),
    note(C, T2),
    note(F2, T2),
    note(AB, T1),
    note(BB, T1),
    note(C, T2),
    note(F2, T2),
    note(AB, T2),
];

/// Play `notes` and leave the motors stopped.
pub fn play<A, D>(actuator: &mut A, delay: &mut D, notes: &[Note]) -> Result<(), A::Error>
where
    A: MotorActuator,
    D: DelayNs,
{
    actuator.set_gear(Motor::Left, Gear::Forward)?;
    actuator.set_gear(Motor::Right, Gear::Reverse)?;

    for n in notes {
        actuator.set_both_duties(n.duty)?;
        delay.delay_ms(n.duration_ms);
    }

    actuator.stop()
}
