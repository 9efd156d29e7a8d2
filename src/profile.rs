//! The subset of the FIT profile used by workout files.
//!
//! [`types`] holds the enumerations, each with the keyword table used to read
//! it from text, and [`messages`] holds the records themselves with their
//! default values.

pub mod messages;
pub mod types;

pub use messages::{
    CustomTarget, DurationValue, FileCreator, FileId, HeartRate, Power, TargetValue, Workout,
    WorkoutStep,
};
pub use types::{DurationType, FileType, Intensity, Sport, TargetType};
