mod common;

use std::io::Cursor;

use cassette::{
    Error, Mode,
    avec::{RecordSink, ToRecord},
    convert,
    text::{Summary, Tokens, machine::run},
};
use common::{Collect, decode, validate};

fn text(lines: &[&str]) -> String {
    lines.join("\n") + "\n"
}

fn collect(mode: Mode, text: &str) -> Result<(Summary, Collect), Error> {
    let mut sink = Collect::default();
    let summary = run(mode, &mut Tokens::new(Cursor::new(text.as_bytes())), &mut sink)?;
    Ok((summary, sink))
}

fn step() -> [&'static str; 4] {
    ["begin", "workout_step", "end", "workout_step"]
}

fn workout(steps: usize) -> Vec<String> {
    let mut lines = vec![
        "begin".to_string(),
        "workout".to_string(),
        "num_valid_steps".to_string(),
        steps.to_string(),
        "end".to_string(),
        "workout".to_string(),
    ];

    for _ in 0..steps {
        lines.extend(step().map(String::from));
    }

    lines
}

#[test]
fn scenario_a() {
    let input = include_str!("fixtures/scenario-a.txt");
    let output = convert(input.as_bytes(), Vec::new(), Mode::Workout).unwrap();

    let decoded = decode(&output);
    validate(&decoded, "tests/fixtures/scenario-a.csv");
}

#[test]
fn intervals() {
    let input = include_str!("fixtures/intervals.txt");
    let output = convert(input.as_bytes(), Vec::new(), Mode::Workout).unwrap();

    validate(&decode(&output), "tests/fixtures/intervals.csv");
}

#[test]
fn too_few_steps() {
    let input = text(&[
        "begin",
        "workout",
        "num_valid_steps",
        "2",
        "end",
        "workout",
        "begin",
        "workout_step",
        "duration_type",
        "time",
        "duration_time",
        "60",
        "end",
        "workout_step",
    ]);

    let err = convert(input.as_bytes(), Vec::new(), Mode::Workout).unwrap_err();
    assert!(matches!(
        err,
        Error::StepCountMismatch {
            declared: 2,
            found: 1
        }
    ));
    assert_eq!(err.to_string(), "Workout declares 2 steps, found 1.");
}

#[test]
fn partial_document_on_failure() {
    let input = text(&[
        "begin",
        "workout",
        "num_valid_steps",
        "2",
        "end",
        "workout",
        "begin",
        "workout_step",
        "end",
        "workout_step",
    ]);

    let mut output = Vec::new();
    assert!(convert(input.as_bytes(), &mut output, Mode::Workout).is_err());

    let decoded = decode(&output);
    let globals: Vec<_> = decoded.rows.iter().map(|row| row[0].as_str()).collect();
    assert_eq!(globals, ["0", "26", "27"]);
}

#[test]
fn out_of_range_zone() {
    let mut lines = workout(0);
    lines[3] = "1".to_string();
    lines.extend(
        ["begin", "workout_step", "target_hr_zone", "6", "end", "workout_step"].map(String::from),
    );

    let err = collect(Mode::Workout, &(lines.join("\n") + "\n")).unwrap_err();
    assert!(matches!(
        &err,
        Error::OutOfRange { value, min, max } if value == "6" && min == "0" && max == "5"
    ));
}

#[test]
fn declared_steps_are_indexed() {
    let (summary, sink) = collect(Mode::Workout, &(workout(3).join("\n") + "\n")).unwrap();

    assert_eq!(summary, Summary { records: 5, steps: 3 });
    assert_eq!(sink.globals(), [0, 26, 27, 27, 27]);
    assert_eq!(sink.values(27, 254), ["0", "1", "2"]);
}

#[test]
fn too_many_steps() {
    let mut lines = workout(1);
    lines.extend(step().map(String::from));

    let err = collect(Mode::Workout, &(lines.join("\n") + "\n")).unwrap_err();
    assert!(matches!(
        err,
        Error::StepCountMismatch {
            declared: 1,
            found: 2
        }
    ));
}

#[test]
fn no_steps_declared() {
    let err = collect(Mode::Workout, &(workout(0).join("\n") + "\n")).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }));
}

#[test]
fn default_file_id() {
    let (_, sink) = collect(Mode::Workout, &(workout(1).join("\n") + "\n")).unwrap();

    assert_eq!(sink.globals(), [0, 26, 27]);
    assert_eq!(sink.values(0, 0), ["5"]);
    assert_eq!(sink.values(0, 3), ["54321"]);
}

#[test]
fn creator_without_file_id() {
    let mut lines: Vec<String> = ["begin", "file_creator", "end", "file_creator"]
        .map(String::from)
        .to_vec();
    lines.extend(workout(1));

    let (_, sink) = collect(Mode::Workout, &(lines.join("\n") + "\n")).unwrap();
    assert_eq!(sink.globals(), [0, 49, 26, 27]);
}

#[test]
fn repeated_file_id() {
    let input = text(&[
        "begin", "file_id", "end", "file_id", "begin", "file_id", "end", "file_id",
    ]);

    let err = collect(Mode::Workout, &input).unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedRecord {
            expected: "file_creator or workout",
            found: "file_id"
        }
    ));
}

#[test]
fn step_before_workout() {
    let err = collect(Mode::Workout, &text(&step())).unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedRecord {
            found: "workout_step",
            ..
        }
    ));
}

#[test]
fn block_after_steps() {
    let mut lines = workout(1);
    lines.extend(["begin", "file_creator", "end", "file_creator"].map(String::from));

    let err = collect(Mode::Workout, &(lines.join("\n") + "\n")).unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedRecord {
            expected: "end of input",
            found: "file_creator"
        }
    ));
}

#[test]
fn empty_input() {
    let err = convert(&b""[..], Vec::new(), Mode::Workout).unwrap_err();
    assert!(matches!(err, Error::EndOfStream));

    let output = convert(&b""[..], Vec::new(), Mode::Records).unwrap();
    assert_eq!(output.len(), 16);
    assert!(decode(&output).rows.is_empty());
}

#[test]
fn missing_steps_at_end_of_file_id() {
    let err = collect(Mode::Workout, &text(&["begin", "file_id", "end", "file_id"])).unwrap_err();
    assert!(matches!(err, Error::EndOfStream));
}

#[test]
fn unknown_keywords() {
    let err = collect(Mode::Workout, &text(&["start"])).unwrap_err();
    assert!(matches!(&err, Error::UnknownKeyword(token) if token == "start"));

    let err = collect(Mode::Workout, &text(&["begin", "lap"])).unwrap_err();
    assert!(matches!(&err, Error::UnknownKeyword(token) if token == "lap"));

    let err = collect(Mode::Records, &text(&["", "begin", "workout"])).unwrap_err();
    assert!(matches!(&err, Error::UnknownKeyword(token) if token.is_empty()));
}

#[test]
fn records_in_any_order() {
    let mut lines: Vec<String> = Vec::new();
    lines.extend(step().map(String::from));
    lines.extend(["begin", "workout", "end", "workout"].map(String::from));
    lines.extend(step().map(String::from));
    lines.extend(["begin", "file_id", "end", "file_id"].map(String::from));

    let (summary, sink) = collect(Mode::Records, &(lines.join("\n") + "\n")).unwrap();

    assert_eq!(summary, Summary { records: 4, steps: 2 });
    assert_eq!(sink.globals(), [27, 26, 27, 0]);
    assert_eq!(sink.values(27, 254), ["0", "1"]);
}

#[test]
fn records_ignore_declared_steps() {
    let (summary, _) = collect(Mode::Records, &text(&["begin", "workout", "end", "workout"])).unwrap();
    assert_eq!(summary, Summary { records: 1, steps: 0 });
}

#[test]
fn records_number_every_message_index() {
    struct Count(usize);

    impl RecordSink for Count {
        fn add_record(&mut self, _: &dyn ToRecord) {
            self.0 += 1;
        }
    }

    let block = "begin\nworkout_step\nend\nworkout_step\n";

    let input = block.repeat(0xFFFF);
    let mut sink = Count(0);
    let summary = run(
        Mode::Records,
        &mut Tokens::new(Cursor::new(input.as_bytes())),
        &mut sink,
    )
    .unwrap();
    assert_eq!(summary.steps, 0xFFFF);
    assert_eq!(sink.0, 0xFFFF);

    let input = block.repeat(0x10000);
    let err = run(
        Mode::Records,
        &mut Tokens::new(Cursor::new(input.as_bytes())),
        &mut Count(0),
    )
    .unwrap_err();
    assert!(matches!(err, Error::TooManySteps(0xFFFF)));
    assert_eq!(err.to_string(), "More than 65535 workout steps.");
}
