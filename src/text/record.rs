//! Record parsers.
//!
//! A record block is a sequence of field names, each followed by its value,
//! closed by `end` and the record kind:
//!
//! ```text
//! serial_number
//! 2501
//! end
//! file_id
//! ```
//!
//! The opening `begin` and record kind are read by the
//! [`machine`](super::machine) before the parser takes over.

use std::io::BufRead;

use tracing::debug;

use crate::{
    avec::ToRecord,
    profile::{
        CustomTarget, DurationValue, FileCreator, FileId, HeartRate, Power, TargetValue, Workout,
        WorkoutStep,
    },
};

use super::{Error, token::Tokens, value::Keyword};

/// Most steps a workout may declare.
pub const MAX_STEPS: u16 = 10000;

/// Longest duration or repeat time in seconds representable in milliseconds.
const MAX_SECONDS: f64 = 4_294_967.0;

/// Longest distance in meters representable in centimeters.
const MAX_METERS: f64 = 42_949_672.0;

/// Fastest speed in meters per second representable in millimeters per
/// second.
const MAX_SPEED: f64 = 4_294_967.0;

/// Largest raw heart rate: 255 bpm, offset by 100.
const MAX_HEART_RATE: u32 = 355;

/// Largest raw power: 10000 watts, offset by 1000.
const MAX_POWER: u32 = 11000;

/// A record read from text.
pub trait ParseRecord: Default + ToRecord {
    /// The record kind closing a block after `end`.
    const KIND: &'static str;

    /// The fields accepted inside a block.
    type Field: Keyword;

    /// Read the value of a field, storing it in the record.
    fn apply<R: BufRead>(
        &mut self,
        field: Self::Field,
        tokens: &mut Tokens<R>,
    ) -> Result<(), Error>;
}

/// Parse fields into a record until its closing marker, starting from the
/// record's defaults.
pub fn parse_record<T: ParseRecord, R: BufRead>(tokens: &mut Tokens<R>) -> Result<T, Error> {
    let mut record = T::default();

    loop {
        let token = tokens.parse_string()?;

        if token == "end" {
            let kind = tokens.parse_string()?;

            if kind != T::KIND {
                Err(Error::UnknownKeyword(kind))?
            }

            debug!(kind = T::KIND, line = tokens.line(), "parsed record");
            return Ok(record);
        }

        let Some(field) = T::Field::lookup(&token) else {
            Err(Error::UnknownField {
                record: T::KIND,
                token,
            })?
        };

        record.apply(field, tokens)?;
    }
}

macro_rules! keywords {
    ($(#[$attr:meta])* $name:ident { $($variant:ident => $text:literal,)* }) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)*
        }

        impl Keyword for $name {
            const TABLE: &'static [(&'static str, Self)] = &[$(($text, Self::$variant),)*];
        }
    };
}

keywords! {
    /// Record kinds named by `begin` and `end` markers.
    RecordKind {
        FileId => "file_id",
        FileCreator => "file_creator",
        Workout => "workout",
        WorkoutStep => "workout_step",
    }
}

keywords! {
    FileIdField {
        Type => "type",
        Manufacturer => "manufacturer",
        Product => "product",
        SerialNumber => "serial_number",
        TimeCreated => "time_created",
        Number => "number",
        ProductName => "product_name",
    }
}

impl ParseRecord for FileId {
    const KIND: &'static str = "file_id";
    type Field = FileIdField;

    fn apply<R: BufRead>(
        &mut self,
        field: FileIdField,
        tokens: &mut Tokens<R>,
    ) -> Result<(), Error> {
        match field {
            FileIdField::Type => self.type_ = Some(tokens.parse_keyword()?),
            FileIdField::Manufacturer => self.manufacturer = Some(tokens.parse()?),
            FileIdField::Product => self.product = Some(tokens.parse()?),
            FileIdField::SerialNumber => self.serial_number = Some(tokens.parse()?),
            FileIdField::TimeCreated => self.time_created = Some(tokens.parse()?),
            FileIdField::Number => self.number = Some(tokens.parse()?),
            FileIdField::ProductName => self.product_name = Some(tokens.parse_string()?),
        }

        Ok(())
    }
}

keywords! {
    FileCreatorField {
        SoftwareVersion => "software_version",
        HardwareVersion => "hardware_version",
    }
}

impl ParseRecord for FileCreator {
    const KIND: &'static str = "file_creator";
    type Field = FileCreatorField;

    fn apply<R: BufRead>(
        &mut self,
        field: FileCreatorField,
        tokens: &mut Tokens<R>,
    ) -> Result<(), Error> {
        match field {
            FileCreatorField::SoftwareVersion => self.software_version = Some(tokens.parse()?),
            FileCreatorField::HardwareVersion => self.hardware_version = Some(tokens.parse()?),
        }

        Ok(())
    }
}

keywords! {
    WorkoutField {
        Sport => "sport",
        Capabilities => "capabilities",
        NumValidSteps => "num_valid_steps",
        WktName => "wkt_name",
    }
}

impl ParseRecord for Workout {
    const KIND: &'static str = "workout";
    type Field = WorkoutField;

    fn apply<R: BufRead>(
        &mut self,
        field: WorkoutField,
        tokens: &mut Tokens<R>,
    ) -> Result<(), Error> {
        match field {
            WorkoutField::Sport => self.sport = Some(tokens.parse_keyword()?),
            WorkoutField::Capabilities => self.capabilities = Some(tokens.parse()?),
            WorkoutField::NumValidSteps => {
                self.num_valid_steps = Some(tokens.parse_bounded(1, MAX_STEPS)?)
            }
            WorkoutField::WktName => self.wkt_name = Some(tokens.parse_string()?),
        }

        Ok(())
    }
}

keywords! {
    WorkoutStepField {
        WktStepName => "wkt_step_name",
        Intensity => "intensity",
        Notes => "notes",
        DurationType => "duration_type",
        DurationTime => "duration_time",
        DurationDistance => "duration_distance",
        DurationHr => "duration_hr",
        DurationCalories => "duration_calories",
        DurationStep => "duration_step",
        DurationPower => "duration_power",
        TargetType => "target_type",
        TargetSpeedZone => "target_speed_zone",
        TargetHrZone => "target_hr_zone",
        TargetCadenceZone => "target_cadence_zone",
        TargetPowerZone => "target_power_zone",
        RepeatSteps => "repeat_steps",
        RepeatTime => "repeat_time",
        RepeatDistance => "repeat_distance",
        RepeatCalories => "repeat_calories",
        RepeatHr => "repeat_hr",
        RepeatPower => "repeat_power",
        CustomTargetSpeedLow => "custom_target_speed_low",
        CustomTargetSpeedHigh => "custom_target_speed_high",
        CustomTargetHeartRateLow => "custom_target_heart_rate_low",
        CustomTargetHeartRateHigh => "custom_target_heart_rate_high",
        CustomTargetCadenceLow => "custom_target_cadence_low",
        CustomTargetCadenceHigh => "custom_target_cadence_high",
        CustomTargetPowerLow => "custom_target_power_low",
        CustomTargetPowerHigh => "custom_target_power_high",
    }
}

impl ParseRecord for WorkoutStep {
    const KIND: &'static str = "workout_step";
    type Field = WorkoutStepField;

    fn apply<R: BufRead>(
        &mut self,
        field: WorkoutStepField,
        tokens: &mut Tokens<R>,
    ) -> Result<(), Error> {
        use WorkoutStepField as F;

        // Fields sharing a FIT field overwrite each other.
        let duration = &mut self.duration_value;
        let target = &mut self.target_value;
        let low = &mut self.custom_target_value_low;
        let high = &mut self.custom_target_value_high;

        match field {
            F::WktStepName => self.wkt_step_name = Some(tokens.parse_string()?),
            F::Intensity => self.intensity = Some(tokens.parse_keyword()?),
            F::Notes => self.notes = Some(tokens.parse_string()?),

            F::DurationType => self.duration_type = Some(tokens.parse_keyword()?),
            F::DurationTime => {
                *duration = Some(DurationValue::Time(tokens.parse_bounded(0.0, MAX_SECONDS)?))
            }
            F::DurationDistance => {
                *duration = Some(DurationValue::Distance(tokens.parse_bounded(0.0, MAX_METERS)?))
            }
            F::DurationHr => *duration = Some(DurationValue::HeartRate(heart_rate(tokens)?)),
            F::DurationCalories => *duration = Some(DurationValue::Calories(tokens.parse()?)),
            F::DurationStep => {
                *duration = Some(DurationValue::Step(
                    tokens.parse_bounded(0, u32::from(MAX_STEPS) - 1)?,
                ))
            }
            F::DurationPower => *duration = Some(DurationValue::Power(power(tokens)?)),

            F::TargetType => self.target_type = Some(tokens.parse_keyword()?),
            F::TargetSpeedZone => *target = Some(TargetValue::SpeedZone(tokens.parse()?)),
            F::TargetHrZone => {
                *target = Some(TargetValue::HeartRateZone(tokens.parse_bounded(0, 5)?))
            }
            F::TargetCadenceZone => *target = Some(TargetValue::CadenceZone(tokens.parse()?)),
            F::TargetPowerZone => {
                *target = Some(TargetValue::PowerZone(tokens.parse_bounded(0, 7)?))
            }
            F::RepeatSteps => {
                *target = Some(TargetValue::RepeatSteps(tokens.parse_bounded(1, 1000)?))
            }
            F::RepeatTime => {
                *target = Some(TargetValue::RepeatTime(tokens.parse_bounded(0.0, MAX_SECONDS)?))
            }
            F::RepeatDistance => {
                *target = Some(TargetValue::RepeatDistance(
                    tokens.parse_bounded(0.0, MAX_METERS)?,
                ))
            }
            F::RepeatCalories => *target = Some(TargetValue::RepeatCalories(tokens.parse()?)),
            F::RepeatHr => *target = Some(TargetValue::RepeatHeartRate(heart_rate(tokens)?)),
            F::RepeatPower => *target = Some(TargetValue::RepeatPower(power(tokens)?)),

            F::CustomTargetSpeedLow => *low = Some(speed(tokens)?),
            F::CustomTargetSpeedHigh => *high = Some(speed(tokens)?),
            F::CustomTargetHeartRateLow => {
                *low = Some(CustomTarget::HeartRate(heart_rate(tokens)?))
            }
            F::CustomTargetHeartRateHigh => {
                *high = Some(CustomTarget::HeartRate(heart_rate(tokens)?))
            }
            F::CustomTargetCadenceLow => *low = Some(CustomTarget::Cadence(tokens.parse()?)),
            F::CustomTargetCadenceHigh => *high = Some(CustomTarget::Cadence(tokens.parse()?)),
            F::CustomTargetPowerLow => *low = Some(CustomTarget::Power(power(tokens)?)),
            F::CustomTargetPowerHigh => *high = Some(CustomTarget::Power(power(tokens)?)),
        }

        Ok(())
    }
}

fn heart_rate<R: BufRead>(tokens: &mut Tokens<R>) -> Result<HeartRate, Error> {
    Ok(HeartRate::from_raw(tokens.parse_bounded(0, MAX_HEART_RATE)?))
}

fn power<R: BufRead>(tokens: &mut Tokens<R>) -> Result<Power, Error> {
    Ok(Power::from_raw(tokens.parse_bounded(0, MAX_POWER)?))
}

fn speed<R: BufRead>(tokens: &mut Tokens<R>) -> Result<CustomTarget, Error> {
    Ok(CustomTarget::Speed(tokens.parse_bounded(0.0, MAX_SPEED)?))
}
