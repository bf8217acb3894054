//! Wire shapes exchanged with the water-monitoring device through the
//! realtime database.
//!
//! No route serves these yet. They pin the JSON contract the firmware and the
//! dashboard already agree on (camelCase keys, `0`/`1` for booleans).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CommandError;

/// Highest servo angle the gate actuator accepts.
pub const SERVO_MAX_ANGLE: i32 = 180;

/// Water level below this distance (cm) is critical.
pub const WATER_CRITICAL_CM: f64 = 5.0;
/// Water level below this distance (cm) is low.
pub const WATER_LOW_CM: f64 = 15.0;
/// pH below this is acidic.
pub const PH_ACIDIC_BELOW: f64 = 6.5;
/// pH above this is alkaline.
pub const PH_ALKALINE_ABOVE: f64 = 7.5;

/// One telemetry sample published by the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorData {
    /// Ultrasonic distance to the water surface, in cm.
    pub distance: f64,
    /// Calibrated pH reading.
    pub ph: f64,
    /// Raw pH probe voltage.
    pub ph_volt: f64,
    /// Primary servo position, in degrees.
    pub servo: i32,
    /// Secondary (gate) servo position, in degrees.
    pub servo2: i32,
    /// Pump state: 1 running, 0 stopped.
    pub pump: u8,
    /// Water sensor: 1 wet, 0 dry.
    pub water_detected: u8,
    /// Device uptime in milliseconds when the sample was taken.
    pub timestamp: u64,
}

impl SensorData {
    /// Whether the pump is running.
    pub fn is_pump_on(&self) -> bool {
        self.pump == 1
    }

    /// Whether the water sensor is wet.
    pub fn is_water_detected(&self) -> bool {
        self.water_detected == 1
    }

    /// Classify the water level from the measured distance.
    pub fn water_level(&self) -> WaterLevel {
        if self.distance < WATER_CRITICAL_CM {
            WaterLevel::Critical
        } else if self.distance < WATER_LOW_CM {
            WaterLevel::Low
        } else {
            WaterLevel::Normal
        }
    }

    /// Classify the pH reading.
    pub fn ph_level(&self) -> PhLevel {
        if self.ph < PH_ACIDIC_BELOW {
            PhLevel::Acidic
        } else if self.ph > PH_ALKALINE_ABOVE {
            PhLevel::Alkaline
        } else {
            PhLevel::Neutral
        }
    }
}

/// Water level band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WaterLevel {
    Critical,
    Low,
    Normal,
}

/// pH band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PhLevel {
    Acidic,
    Neutral,
    Alkaline,
}

/// Control mode of the device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceMode {
    /// Firmware drives the actuators from sensor thresholds.
    #[default]
    Auto,
    /// Actuators follow commands written by the dashboard.
    Manual,
}

impl DeviceMode {
    /// Get the other mode.
    pub fn toggled(&self) -> Self {
        match self {
            DeviceMode::Auto => DeviceMode::Manual,
            DeviceMode::Manual => DeviceMode::Auto,
        }
    }
}

/// Status record the device reports on boot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Status code; 1 means online.
    pub status: i32,
    /// Current control mode.
    pub mode: DeviceMode,
}

impl DeviceStatus {
    /// Whether the device reported itself online.
    pub fn is_online(&self) -> bool {
        self.status == 1
    }
}

/// Actuator command. Unset fields leave that actuator untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Target servo angle, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servo: Option<i32>,
    /// Target pump state: 1 on, 0 off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump: Option<u8>,
}

impl CommandRequest {
    /// Check the command is non-empty and within actuator limits.
    pub fn validate(&self) -> Result<(), CommandError> {
        if self.servo.is_none() && self.pump.is_none() {
            return Err(CommandError::Empty);
        }

        if let Some(angle) = self.servo {
            if !(0..=SERVO_MAX_ANGLE).contains(&angle) {
                return Err(CommandError::ServoOutOfRange(angle));
            }
        }

        if let Some(state) = self.pump {
            if state > 1 {
                return Err(CommandError::InvalidPumpState(state));
            }
        }

        Ok(())
    }
}
