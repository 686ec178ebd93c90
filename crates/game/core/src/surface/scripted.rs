//! Driving surface that replays a fixed list of answers.
//!
//! Used by tests and by batch tools. Running out of answers, or meeting an
//! answer of the wrong kind, behaves like end-of-input: the prompt aborts.

use std::collections::VecDeque;

use super::{Abort, DirectionInput, DrivingSurface, PlaceAction, Report};
use crate::state::{Direction, Point, Speed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    Points(u32),
    Direction(DirectionInput),
    Destination(Point),
    Speed(Speed),
    Confirm(bool),
    Place(Option<PlaceAction>),
}

impl Answer {
    pub fn step(direction: Direction) -> Self {
        Answer::Direction(DirectionInput::Move(direction))
    }
}

#[derive(Debug, Default)]
pub struct ScriptedSurface {
    answers: VecDeque<Answer>,
    reports: Vec<Report>,
    questions: Vec<String>,
}

impl ScriptedSurface {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, answer: Answer) {
        self.answers.push_back(answer);
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Yes/no questions asked so far, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self) -> Result<Answer, Abort> {
        self.answers.pop_front().ok_or(Abort)
    }
}

impl DrivingSurface for ScriptedSurface {
    fn read_movement_points(&mut self) -> Result<u32, Abort> {
        match self.next()? {
            Answer::Points(points) => Ok(points),
            _ => Err(Abort),
        }
    }

    fn read_direction(&mut self, _at: Point, _speed: Speed) -> Result<DirectionInput, Abort> {
        match self.next()? {
            Answer::Direction(input) => Ok(input),
            _ => Err(Abort),
        }
    }

    fn read_destination(&mut self, _at: Point) -> Result<Point, Abort> {
        match self.next()? {
            Answer::Destination(point) => Ok(point),
            _ => Err(Abort),
        }
    }

    fn choose_speed(&mut self, _current: Speed) -> Result<Speed, Abort> {
        match self.next()? {
            Answer::Speed(speed) => Ok(speed),
            _ => Err(Abort),
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool, Abort> {
        self.questions.push(question.to_owned());
        match self.next()? {
            Answer::Confirm(answer) => Ok(answer),
            _ => Err(Abort),
        }
    }

    fn choose_place_action(
        &mut self,
        _options: &[PlaceAction],
    ) -> Result<Option<PlaceAction>, Abort> {
        match self.next()? {
            Answer::Place(choice) => Ok(choice),
            _ => Err(Abort),
        }
    }

    fn report(&mut self, report: Report) {
        self.reports.push(report);
    }
}
