//! Translation of line-oriented workout descriptions into records.
//!
//! Input holds one token per line. Blocks open with `begin` and a record
//! kind, list field names each followed by a value, and close with `end` and
//! the same kind:
//!
//! ```text
//! begin
//! workout
//! sport
//! running
//! num_valid_steps
//! 1
//! end
//! workout
//! begin
//! workout_step
//! intensity
//! active
//! duration_type
//! time
//! duration_time
//! 600
//! end
//! workout_step
//! ```
//!
//! Most users should call [`convert`]. The [`machine`], [`record`] and
//! [`value`] modules expose each layer for finer control, down to the
//! [`Tokens`] reader.

pub mod machine;
pub mod record;
pub mod token;
pub mod value;

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info};

use crate::avec::{Encoder, writer};

pub use machine::{Mode, Summary};
pub use token::Tokens;

/// Errors occurring while converting text to records.
#[derive(Debug, Error)]
pub enum Error {
    /// Input ended where more was required.
    #[error("Unexpected end of input.")]
    EndOfStream,
    /// An error from the supplied reader.
    #[error("I/O error: {0}.")]
    Io(#[from] io::Error),
    /// A token is not a valid literal of the expected type.
    #[error("Bad syntax near \"{0}\".")]
    Syntax(String),
    /// A value lies outside the range accepted for its field.
    #[error("Value {value} is out of range [{min}, {max}].")]
    OutOfRange {
        value: String,
        min: String,
        max: String,
    },
    /// A token is not one of the values of an enumeration.
    #[error("Invalid enum value \"{0}\".")]
    UnknownEnumToken(String),
    /// A field name is not accepted by the record being read.
    #[error("Unknown field \"{token}\" in {record}.")]
    UnknownField { record: &'static str, token: String },
    /// A token cannot start or close a block.
    #[error("Unknown keyword \"{0}\".")]
    UnknownKeyword(String),
    /// A block appears out of order.
    #[error("Expected {expected}, found {found}.")]
    UnexpectedRecord {
        expected: &'static str,
        found: &'static str,
    },
    /// The number of steps differs from the number the workout declares.
    #[error("Workout declares {declared} steps, found {found}.")]
    StepCountMismatch { declared: u16, found: usize },
    /// More steps than message indices can number.
    #[error("More than {0} workout steps.")]
    TooManySteps(usize),
    /// The encoder failed to finish the document.
    #[error("FIT encoder failed: {0}")]
    Encode(#[from] writer::Error),
}

/// Convert text read from `input` into a FIT document written to `output`.
///
/// The document is finished, and written, even when conversion fails partway,
/// holding every record completed before the failure. Callers wanting no
/// output on failure should write to a buffer.
///
/// Returns the writer on success.
pub fn convert<R: BufRead, W: Write>(input: R, output: W, mode: Mode) -> Result<W, Error> {
    let mut tokens = Tokens::new(input);
    let mut encoder = Encoder::open(output);

    let outcome = machine::run(mode, &mut tokens, &mut encoder);
    let closed = encoder.close();

    let summary = outcome.inspect_err(|err| {
        debug!(line = tokens.line(), %err, "conversion failed");
    })?;
    let output = closed?;

    info!(
        records = summary.records,
        steps = summary.steps,
        "converted workout"
    );

    Ok(output)
}
