//! Profile enumerations.

use crate::{avec::IntoValue, sans::data::Value, text::value::Keyword};

macro_rules! profile_enum {
    ($(#[$attr:meta])* $name:ident { $($variant:ident = $code:literal => $text:literal,)* }) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $code,)*
        }

        impl $name {
            /// The code written to FIT data.
            pub fn code(self) -> u8 {
                self as u8
            }
        }

        impl Keyword for $name {
            const TABLE: &'static [(&'static str, Self)] = &[$(($text, Self::$variant),)*];
        }

        impl IntoValue for $name {
            fn to_value(&self) -> Value<'_> {
                Value::Enum(self.code())
            }
        }
    };
}

profile_enum! {
    /// `file`
    FileType {
        Device = 1 => "device",
        Settings = 2 => "settings",
        Sport = 3 => "sport",
        Activity = 4 => "activity",
        Workout = 5 => "workout",
        Course = 6 => "course",
        Schedules = 7 => "schedules",
        Weight = 9 => "weight",
        Totals = 10 => "totals",
        Goals = 11 => "goals",
        BloodPressure = 14 => "blood_pressure",
        MonitoringA = 15 => "monitoring_a",
        ActivitySummary = 20 => "activity_summary",
        MonitoringDaily = 28 => "monitoring_daily",
        MonitoringB = 32 => "monitoring_b",
        Segment = 34 => "segment",
        SegmentList = 35 => "segment_list",
    }
}

profile_enum! {
    /// `sport`
    Sport {
        Generic = 0 => "generic",
        Running = 1 => "running",
        Cycling = 2 => "cycling",
        Transition = 3 => "transition",
        FitnessEquipment = 4 => "fitness_equipment",
        Swimming = 5 => "swimming",
        Basketball = 6 => "basketball",
        Soccer = 7 => "soccer",
        Tennis = 8 => "tennis",
        AmericanFootball = 9 => "american_football",
        Training = 10 => "training",
        Walking = 11 => "walking",
        CrossCountrySkiing = 12 => "cross_country_skiing",
        AlpineSkiing = 13 => "alpine_skiing",
        Snowboarding = 14 => "snowboarding",
        Rowing = 15 => "rowing",
        Mountaineering = 16 => "mountaineering",
        Hiking = 17 => "hiking",
        Multisport = 18 => "multisport",
        Paddling = 19 => "paddling",
        Flying = 20 => "flying",
        EBiking = 21 => "e_biking",
        Motorcycling = 22 => "motorcycling",
        Boating = 23 => "boating",
        Driving = 24 => "driving",
        Golf = 25 => "golf",
        HangGliding = 26 => "hang_gliding",
        HorsebackRiding = 27 => "horseback_riding",
        Hunting = 28 => "hunting",
        Fishing = 29 => "fishing",
        InlineSkating = 30 => "inline_skating",
        RockClimbing = 31 => "rock_climbing",
        Sailing = 32 => "sailing",
        IceSkating = 33 => "ice_skating",
        SkyDiving = 34 => "sky_diving",
        Snowshoeing = 35 => "snowshoeing",
        Snowmobiling = 36 => "snowmobiling",
        StandUpPaddleboarding = 37 => "stand_up_paddleboarding",
        Surfing = 38 => "surfing",
        Wakeboarding = 39 => "wakeboarding",
        WaterSkiing = 40 => "water_skiing",
        Kayaking = 41 => "kayaking",
        Rafting = 42 => "rafting",
        Windsurfing = 43 => "windsurfing",
        Kitesurfing = 44 => "kitesurfing",
    }
}

profile_enum! {
    /// `intensity`
    Intensity {
        Active = 0 => "active",
        Rest = 1 => "rest",
        Warmup = 2 => "warmup",
        Cooldown = 3 => "cooldown",
    }
}

profile_enum! {
    /// `wkt_step_duration`
    DurationType {
        Time = 0 => "time",
        Distance = 1 => "distance",
        HrLessThan = 2 => "hr_less_than",
        HrGreaterThan = 3 => "hr_greater_than",
        Calories = 4 => "calories",
        Open = 5 => "open",
        RepeatUntilStepsCmplt = 6 => "repeat_until_steps_cmplt",
        RepeatUntilTime = 7 => "repeat_until_time",
        RepeatUntilDistance = 8 => "repeat_until_distance",
        RepeatUntilCalories = 9 => "repeat_until_calories",
        RepeatUntilHrLessThan = 10 => "repeat_until_hr_less_than",
        RepeatUntilHrGreaterThan = 11 => "repeat_until_hr_greater_than",
        RepeatUntilPowerLessThan = 12 => "repeat_until_power_less_than",
        RepeatUntilPowerGreaterThan = 13 => "repeat_until_power_greater_than",
        PowerLessThan = 14 => "power_less_than",
        PowerGreaterThan = 15 => "power_greater_than",
        TrainingPeaksTss = 16 => "training_peaks_tss",
    }
}

profile_enum! {
    /// `wkt_step_target`
    TargetType {
        Speed = 0 => "speed",
        HeartRate = 1 => "heart_rate",
        Open = 2 => "open",
        Cadence = 3 => "cadence",
        Power = 4 => "power",
        Grade = 5 => "grade",
        Resistance = 6 => "resistance",
    }
}
