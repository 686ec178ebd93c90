//! Line-oriented driving surface.
//!
//! Every prompt reads one line. `q` or `quit` at any prompt, or the end of
//! input, aborts the exploration.

use std::io::{BufRead, Write};
use std::str::FromStr;

use explore_core::{
    Abort, Direction, DirectionInput, DrivingSurface, PlaceAction, Point, Report, Speed,
};
use tracing::warn;

/// Why a line could not be understood.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("'{0}' is not a direction; use N NE E SE S SW W NW or - to stay")]
    Direction(String),
    #[error("'{0}' is not a point; use row,col")]
    Point(String),
    #[error("'{0}' is not a pace; use slow, normal or fast")]
    Speed(String),
    #[error("'{0}' is not a number")]
    Number(String),
    #[error("answer y or n")]
    YesNo,
    #[error("pick one of 1-{0}, or press enter to go on")]
    Choice(usize),
}

/// Parses a direction code, or `speed` / `goto`.
pub fn parse_direction(line: &str) -> Result<DirectionInput, ParseError> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "speed" | "pace" => return Ok(DirectionInput::ChangeSpeed),
        "goto" | "go" | "route" => return Ok(DirectionInput::RouteTo),
        "." => return Ok(DirectionInput::Move(Direction::Nowhere)),
        _ => {}
    }
    Direction::from_str(line)
        .map(DirectionInput::Move)
        .map_err(|_| ParseError::Direction(line.to_string()))
}

/// Parses `row,col` (a space works as the separator too).
pub fn parse_point(line: &str) -> Result<Point, ParseError> {
    let invalid = || ParseError::Point(line.trim().to_string());
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let row = parts.next().ok_or_else(invalid)?;
    let col = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    match (row.parse(), col.parse()) {
        (Ok(row), Ok(col)) => Ok(Point::new(row, col)),
        _ => Err(invalid()),
    }
}

pub fn parse_yes_no(line: &str) -> Result<bool, ParseError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(ParseError::YesNo),
    }
}

/// Reads answers from `input` and writes prompts and reports to `output`.
pub struct LineSurface<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineSurface<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        if let Err(error) = writeln!(self.output, "{text}") {
            warn!(%error, "failed to write to the terminal");
        }
    }

    /// Shows `text` and reads one trimmed line.
    fn ask(&mut self, text: &str) -> Result<String, Abort> {
        if let Err(error) = write!(self.output, "{text}").and_then(|()| self.output.flush()) {
            warn!(%error, "failed to write to the terminal");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Err(Abort),
            Ok(_) => {
                let line = line.trim().to_string();
                if matches!(line.to_ascii_lowercase().as_str(), "q" | "quit") {
                    Err(Abort)
                } else {
                    Ok(line)
                }
            }
            Err(error) => {
                warn!(%error, "failed to read from the terminal");
                Err(Abort)
            }
        }
    }

    /// Repeats the question until `parse` accepts the answer.
    fn ask_until<T>(
        &mut self,
        text: &str,
        parse: impl Fn(&str) -> Result<T, ParseError>,
    ) -> Result<T, Abort> {
        loop {
            let line = self.ask(text)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(error) => self.say(&error.to_string()),
            }
        }
    }
}

impl<R: BufRead, W: Write> DrivingSurface for LineSurface<R, W> {
    fn read_movement_points(&mut self) -> Result<u32, Abort> {
        self.ask_until("Movement points: ", |line| {
            line.parse().map_err(|_| ParseError::Number(line.to_string()))
        })
    }

    fn read_direction(&mut self, at: Point, speed: Speed) -> Result<DirectionInput, Abort> {
        let text = format!("{at} ({speed}) direction [N NE E SE S SW W NW -, speed, goto, q]: ");
        self.ask_until(&text, parse_direction)
    }

    fn read_destination(&mut self, at: Point) -> Result<Point, Abort> {
        self.ask_until(&format!("From {at} go to row,col: "), parse_point)
    }

    fn choose_speed(&mut self, current: Speed) -> Result<Speed, Abort> {
        let text = format!("Pace [slow, normal, fast] (now {current}): ");
        self.ask_until(&text, |line| {
            if line.is_empty() {
                return Ok(current);
            }
            Speed::from_str(line).map_err(|_| ParseError::Speed(line.to_string()))
        })
    }

    fn confirm(&mut self, question: &str) -> Result<bool, Abort> {
        self.ask_until(&format!("{question} [y/n/q] "), parse_yes_no)
    }

    fn choose_place_action(
        &mut self,
        options: &[PlaceAction],
    ) -> Result<Option<PlaceAction>, Abort> {
        for (index, option) in options.iter().enumerate() {
            self.say(&format!("  {}) {option}", index + 1));
        }
        self.ask_until("Choice (enter to go on): ", |line| {
            if line.is_empty() || line == "0" {
                return Ok(None);
            }
            line.parse::<usize>()
                .ok()
                .and_then(|choice| choice.checked_sub(1))
                .and_then(|index| options.get(index).copied())
                .map(Some)
                .ok_or(ParseError::Choice(options.len()))
        })
    }

    fn report(&mut self, report: Report) {
        self.say(&report.to_string());
    }
}
