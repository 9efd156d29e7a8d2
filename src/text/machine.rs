//! Sequencing of record blocks.
//!
//! Each block opens with `begin` and a record kind on separate lines, and is
//! handed to the matching record parser. Every record reaches the sink as
//! soon as its block closes.
//!
//! In [`Mode::Workout`] blocks must follow the layout of a workout file:
//!
//! ```text
//! file_id? file_creator? workout workout_step{num_valid_steps}
//! ```
//!
//! When the first block is not `file_id`, a default file identity is written
//! in its place. Steps receive message indices in the order they are read.
//!
//! In [`Mode::Records`] blocks of any kind may appear in any order and any
//! number, including none. Steps are still indexed in order.

use std::io::BufRead;

use tracing::debug;

use crate::{
    avec::{RecordSink, ToRecord},
    profile::{FileCreator, FileId, Workout, WorkoutStep, messages::MAX_MESSAGE_INDEX},
};

use super::{
    Error,
    record::{ParseRecord, RecordKind, parse_record},
    token::Tokens,
    value::Keyword,
};

/// How blocks may be arranged in the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// A single workout, with its declared number of steps.
    #[default]
    Workout,
    /// Free-form records without ordering or counting rules.
    Records,
}

/// Counts of what a conversion produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Records handed to the sink, including any default file identity.
    pub records: usize,
    /// Workout steps among those records.
    pub steps: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Identified,
    Created,
    Steps { declared: u16, parsed: u16 },
    Finish { declared: u16 },
}

impl State {
    fn steps(declared: u16, parsed: u16) -> Self {
        if parsed < declared {
            Self::Steps { declared, parsed }
        } else {
            Self::Finish { declared }
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Self::Start => "file_id, file_creator or workout",
            Self::Identified => "file_creator or workout",
            Self::Created => "workout",
            Self::Steps { .. } => "workout_step",
            Self::Finish { .. } => "end of input",
        }
    }
}

/// Read every block from the input, handing records to a sink.
pub fn run<R: BufRead, S: RecordSink + ?Sized>(
    mode: Mode,
    tokens: &mut Tokens<R>,
    sink: &mut S,
) -> Result<Summary, Error> {
    let mut machine = Machine {
        tokens,
        sink,
        summary: Summary::default(),
    };

    match mode {
        Mode::Workout => machine.workout()?,
        Mode::Records => machine.records()?,
    }

    Ok(machine.summary)
}

struct Machine<'a, R, S: ?Sized> {
    tokens: &'a mut Tokens<R>,
    sink: &'a mut S,
    summary: Summary,
}

impl<R: BufRead, S: RecordSink + ?Sized> Machine<'_, R, S> {
    fn workout(&mut self) -> Result<(), Error> {
        let mut state = State::Start;

        while let Some(kind) = self.next_block()? {
            state = self.advance(state, kind)?;
        }

        match state {
            State::Finish { .. } => Ok(()),
            State::Steps { declared, parsed } => Err(Error::StepCountMismatch {
                declared,
                found: usize::from(parsed),
            }),
            _ => Err(Error::EndOfStream),
        }
    }

    fn advance(&mut self, state: State, kind: RecordKind) -> Result<State, Error> {
        Ok(match (state, kind) {
            (State::Start, RecordKind::FileId) => {
                self.emit::<FileId>()?;
                State::Identified
            }
            (State::Start, _) => {
                debug!("writing default file identity");
                self.write(&FileId::default());
                self.advance(State::Identified, kind)?
            }
            (State::Identified, RecordKind::FileCreator) => {
                self.emit::<FileCreator>()?;
                State::Created
            }
            (State::Identified | State::Created, RecordKind::Workout) => {
                let workout = self.emit::<Workout>()?;
                let declared = workout.declared_steps();
                debug!(declared, "expecting workout steps");
                State::steps(declared, 0)
            }
            (State::Steps { declared, parsed }, RecordKind::WorkoutStep) => {
                self.step(parsed)?;
                State::steps(declared, parsed + 1)
            }
            (State::Finish { declared }, RecordKind::WorkoutStep) => {
                Err(Error::StepCountMismatch {
                    declared,
                    found: usize::from(declared) + 1,
                })?
            }
            (state, kind) => Err(Error::UnexpectedRecord {
                expected: state.expected(),
                found: kind.name(),
            })?,
        })
    }

    fn records(&mut self) -> Result<(), Error> {
        let mut steps: u16 = 0;

        while let Some(kind) = self.next_block()? {
            match kind {
                RecordKind::FileId => {
                    self.emit::<FileId>()?;
                }
                RecordKind::FileCreator => {
                    self.emit::<FileCreator>()?;
                }
                RecordKind::Workout => {
                    self.emit::<Workout>()?;
                }
                RecordKind::WorkoutStep if steps <= MAX_MESSAGE_INDEX => {
                    self.step(steps)?;
                    steps += 1;
                }
                RecordKind::WorkoutStep => {
                    Err(Error::TooManySteps(usize::from(MAX_MESSAGE_INDEX) + 1))?
                }
            }
        }

        Ok(())
    }

    /// Read the opening marker of the next block, if any input remains.
    fn next_block(&mut self) -> Result<Option<RecordKind>, Error> {
        let Some(token) = self.tokens.next_token()? else {
            return Ok(None);
        };

        let token = token.trim();
        if token != "begin" {
            Err(Error::UnknownKeyword(token.to_owned()))?
        }

        let kind = self.tokens.parse_string()?;
        RecordKind::lookup(&kind)
            .map(Some)
            .ok_or(Error::UnknownKeyword(kind))
    }

    fn emit<T: ParseRecord>(&mut self) -> Result<T, Error> {
        let record = parse_record::<T, R>(self.tokens)?;
        self.write(&record);
        Ok(record)
    }

    fn step(&mut self, index: u16) -> Result<(), Error> {
        let mut step = parse_record::<WorkoutStep, R>(self.tokens)?;
        step.message_index = Some(index);
        self.write(&step);
        self.summary.steps += 1;
        Ok(())
    }

    fn write(&mut self, record: &dyn ToRecord) {
        self.sink.add_record(record);
        self.summary.records += 1;
    }
}
