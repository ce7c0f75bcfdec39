// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Edge-triggered obstacle signaling on the robot's fault channel.
//!
//! The robot reports an obstacle once when the measured distance first drops below the limit and
//! reports the all-clear once when it first rises back to or above it. While the condition is
//! unchanged nothing is sent. A reading of 0 cm means no echo was timed and is ignored.

use crate::protocol::FaultCode;

pub struct ObstacleMonitor {
    limit_cm: u16,
    warning_sent: bool,
}

impl ObstacleMonitor {
    pub fn new(limit_cm: u16) -> Self {
        Self {
            limit_cm,
            warning_sent: false,
        }
    }

    #[inline]
    pub fn limit_cm(&self) -> u16 {
        self.limit_cm
    }

    /// Whether the last reported state is "obstacle ahead".
    #[inline]
    pub fn warning_active(&self) -> bool {
        self.warning_sent
    }

    /// Whether `distance_cm` is a valid reading inside the limit.
    #[inline]
    pub fn is_obstacle(&self, distance_cm: u16) -> bool {
        distance_cm != 0 && distance_cm < self.limit_cm
    }

    /// Feed one distance reading. Returns the code to transmit on a state change.
    pub fn update(&mut self, distance_cm: u16) -> Option<FaultCode> {
        if distance_cm == 0 {
            return None;
        }

        if distance_cm < self.limit_cm && !self.warning_sent {
            self.warning_sent = true;
            Some(FaultCode::ObstacleAhead)
        } else if distance_cm >= self.limit_cm && self.warning_sent {
            self.warning_sent = false;
            Some(FaultCode::Clear)
        } else {
            None
        }
    }
}
