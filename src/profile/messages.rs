//! Profile messages written to workout files.
//!
//! Each message starts from a fixed baseline (its [`Default`]), so fields
//! never supplied keep a sensible value.

use chrono::Utc;

use crate::{
    avec::{FieldSink, IntoValue, ToRecord},
    sans::data::Value,
};

use super::types::{DurationType, FileType, Intensity, Sport, TargetType};

/// Offset in seconds of the FIT epoch (1989-12-31T00:00:00Z) from the Unix
/// epoch.
pub const FIT_EPOCH: i64 = 631_065_600;

/// Manufacturer code of Garmin.
pub const MANUFACTURER_GARMIN: u16 = 1;

/// Product code of the Garmin Edge 500.
pub const PRODUCT_EDGE_500: u16 = 1036;

/// Largest valid `message_index`; `0xFFFF` marks an invalid index.
pub const MAX_MESSAGE_INDEX: u16 = 0xFFFE;

/// The current time as a FIT timestamp.
pub fn now() -> u32 {
    let seconds = Utc::now().timestamp() - FIT_EPOCH;
    u32::try_from(seconds.max(0)).unwrap_or(u32::MAX)
}

/// `file_id`
#[derive(Debug, Clone, PartialEq, ToRecord)]
#[record(0)]
pub struct FileId {
    #[field(0)]
    pub type_: Option<FileType>,
    #[field(1)]
    pub manufacturer: Option<u16>,
    #[field(2)]
    pub product: Option<u16>,
    #[field(3, |v: &u32| Value::U32Z(*v))]
    pub serial_number: Option<u32>,
    #[field(4)]
    pub time_created: Option<u32>,
    #[field(5)]
    pub number: Option<u16>,
    #[field(8)]
    pub product_name: Option<String>,
}

impl Default for FileId {
    fn default() -> Self {
        Self {
            type_: Some(FileType::Workout),
            manufacturer: Some(MANUFACTURER_GARMIN),
            product: Some(PRODUCT_EDGE_500),
            serial_number: Some(54321),
            time_created: Some(now()),
            number: None,
            product_name: None,
        }
    }
}

/// `file_creator`
#[derive(Debug, Clone, Default, PartialEq, ToRecord)]
#[record(49)]
pub struct FileCreator {
    #[field(0)]
    pub software_version: Option<u16>,
    #[field(1)]
    pub hardware_version: Option<u8>,
}

/// `workout`
#[derive(Debug, Clone, PartialEq, ToRecord)]
#[record(26)]
pub struct Workout {
    #[field(4)]
    pub sport: Option<Sport>,
    #[field(5, |v: &u32| Value::U32Z(*v))]
    pub capabilities: Option<u32>,
    #[field(6)]
    pub num_valid_steps: Option<u16>,
    #[field(8)]
    pub wkt_name: Option<String>,
}

impl Default for Workout {
    fn default() -> Self {
        Self {
            sport: Some(Sport::Cycling),
            capabilities: None,
            num_valid_steps: Some(1),
            wkt_name: None,
        }
    }
}

impl Workout {
    /// The number of steps this workout declares.
    pub fn declared_steps(&self) -> u16 {
        self.num_valid_steps.unwrap_or(0)
    }
}

/// `workout_step`
#[derive(Debug, Clone, PartialEq, ToRecord)]
#[record(27)]
pub struct WorkoutStep {
    #[field(254)]
    pub message_index: Option<u16>,
    #[field(0)]
    pub wkt_step_name: Option<String>,
    #[field(1)]
    pub duration_type: Option<DurationType>,
    #[field(2, |v: &DurationValue| Value::U32(v.raw()))]
    pub duration_value: Option<DurationValue>,
    #[field(3)]
    pub target_type: Option<TargetType>,
    #[field(4, |v: &TargetValue| Value::U32(v.raw()))]
    pub target_value: Option<TargetValue>,
    #[field(5, |v: &CustomTarget| Value::U32(v.raw()))]
    pub custom_target_value_low: Option<CustomTarget>,
    #[field(6, |v: &CustomTarget| Value::U32(v.raw()))]
    pub custom_target_value_high: Option<CustomTarget>,
    #[field(7)]
    pub intensity: Option<Intensity>,
    #[field(8)]
    pub notes: Option<String>,
}

impl Default for WorkoutStep {
    fn default() -> Self {
        Self {
            message_index: None,
            wkt_step_name: None,
            duration_type: Some(DurationType::Open),
            duration_value: None,
            target_type: Some(TargetType::Open),
            target_value: None,
            custom_target_value_low: None,
            custom_target_value_high: None,
            intensity: None,
            notes: None,
        }
    }
}

/// A heart rate, either relative to the athlete's maximum or absolute.
///
/// Stored in FIT data as a percentage from 0 to 100, or as beats per minute
/// offset by 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartRate {
    Percent(u32),
    Bpm(u32),
}

impl HeartRate {
    pub fn from_raw(raw: u32) -> Self {
        if raw <= 100 {
            Self::Percent(raw)
        } else {
            Self::Bpm(raw - 100)
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::Percent(percent) => percent,
            Self::Bpm(bpm) => bpm + 100,
        }
    }
}

/// A power, either relative to the athlete's functional threshold or
/// absolute.
///
/// Stored in FIT data as a percentage from 0 to 1000, or as watts offset by
/// 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    Percent(u32),
    Watts(u32),
}

impl Power {
    pub fn from_raw(raw: u32) -> Self {
        if raw <= 1000 {
            Self::Percent(raw)
        } else {
            Self::Watts(raw - 1000)
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::Percent(percent) => percent,
            Self::Watts(watts) => watts + 1000,
        }
    }
}

/// The condition ending a step, interpreted according to its duration type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationValue {
    /// Seconds.
    Time(f64),
    /// Meters.
    Distance(f64),
    HeartRate(HeartRate),
    Calories(u32),
    /// Index of the step to repeat from.
    Step(u32),
    Power(Power),
}

impl DurationValue {
    pub fn raw(&self) -> u32 {
        match *self {
            Self::Time(seconds) => scaled(seconds, 1000.0),
            Self::Distance(meters) => scaled(meters, 100.0),
            Self::HeartRate(heart_rate) => heart_rate.raw(),
            Self::Calories(calories) => calories,
            Self::Step(index) => index,
            Self::Power(power) => power.raw(),
        }
    }
}

/// The target of a step, or the limit of a repeat, interpreted according to
/// the step's target and duration types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetValue {
    SpeedZone(u32),
    /// Zone from 1 to 5, or 0 for a custom range.
    HeartRateZone(u32),
    CadenceZone(u32),
    /// Zone from 1 to 7, or 0 for a custom range.
    PowerZone(u32),
    RepeatSteps(u32),
    /// Seconds.
    RepeatTime(f64),
    /// Meters.
    RepeatDistance(f64),
    RepeatCalories(u32),
    RepeatHeartRate(HeartRate),
    RepeatPower(Power),
}

impl TargetValue {
    pub fn raw(&self) -> u32 {
        match *self {
            Self::SpeedZone(zone)
            | Self::HeartRateZone(zone)
            | Self::CadenceZone(zone)
            | Self::PowerZone(zone) => zone,
            Self::RepeatSteps(count) => count,
            Self::RepeatTime(seconds) => scaled(seconds, 1000.0),
            Self::RepeatDistance(meters) => scaled(meters, 100.0),
            Self::RepeatCalories(calories) => calories,
            Self::RepeatHeartRate(heart_rate) => heart_rate.raw(),
            Self::RepeatPower(power) => power.raw(),
        }
    }
}

/// One end of a custom target range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomTarget {
    /// Meters per second.
    Speed(f64),
    HeartRate(HeartRate),
    /// Revolutions per minute.
    Cadence(u32),
    Power(Power),
}

impl CustomTarget {
    pub fn raw(&self) -> u32 {
        match *self {
            Self::Speed(speed) => scaled(speed, 1000.0),
            Self::HeartRate(heart_rate) => heart_rate.raw(),
            Self::Cadence(rpm) => rpm,
            Self::Power(power) => power.raw(),
        }
    }
}

fn scaled(value: f64, scale: f64) -> u32 {
    (value * scale).round().clamp(0.0, f64::from(u32::MAX)) as u32
}
