use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{LessonId, Score};
use crate::stats::round_percent;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Rejected lesson session transitions. The session is left untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStepError {
    #[error("already at the last step")]
    AtLastStep,

    #[error("already at the first step")]
    AtFirstStep,

    #[error("lesson can only be completed from the summary step")]
    NotAtSummary,

    #[error("lesson session already completed")]
    AlreadyCompleted,
}

//
// ─── STEPS ─────────────────────────────────────────────────────────────────────
//

/// The four stages of a lesson walkthrough, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LessonStep {
    Overview,
    Phrases,
    Dialogue,
    Summary,
}

impl LessonStep {
    pub const ALL: [LessonStep; 4] = [
        LessonStep::Overview,
        LessonStep::Phrases,
        LessonStep::Dialogue,
        LessonStep::Summary,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            LessonStep::Overview => 0,
            LessonStep::Phrases => 1,
            LessonStep::Dialogue => 2,
            LessonStep::Summary => 3,
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LessonStep::Overview => "Overview",
            LessonStep::Phrases => "Phrases",
            LessonStep::Dialogue => "Dialogue",
            LessonStep::Summary => "Summary",
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Result of completing a lesson session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonCompletion {
    pub lesson_id: LessonId,
    pub score: Score,
    pub time_spent_secs: u64,
    pub completed_at: DateTime<Utc>,
}

/// Linear walkthrough of a single lesson.
///
/// `next` marks the current step as completed before advancing; `back` never
/// touches the completed set. Once `complete` succeeds the session is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSession {
    lesson_id: LessonId,
    started_at: DateTime<Utc>,
    current: LessonStep,
    completed: BTreeSet<LessonStep>,
    completion: Option<LessonCompletion>,
}

impl LessonSession {
    #[must_use]
    pub fn start(lesson_id: LessonId, started_at: DateTime<Utc>) -> Self {
        Self {
            lesson_id,
            started_at,
            current: LessonStep::Overview,
            completed: BTreeSet::new(),
            completion: None,
        }
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_step(&self) -> LessonStep {
        self.current
    }

    /// 1-based position of the current step.
    #[must_use]
    pub fn step_number(&self) -> usize {
        self.current.index() + 1
    }

    #[must_use]
    pub fn is_step_completed(&self, step: LessonStep) -> bool {
        self.completed.contains(&step)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn completion(&self) -> Option<&LessonCompletion> {
        self.completion.as_ref()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.is_completed() && self.current.previous().is_some()
    }

    #[must_use]
    pub fn can_complete(&self) -> bool {
        !self.is_completed() && self.current == LessonStep::Summary
    }

    /// Walkthrough progress in percent; reaching the summary counts as one more step.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        let at_summary = usize::from(self.current == LessonStep::Summary);
        let done = (self.completed.len() + at_summary).min(LessonStep::ALL.len());
        u8::try_from(round_percent(done, LessonStep::ALL.len())).unwrap_or(100)
    }

    /// Advance to the next step.
    ///
    /// # Errors
    ///
    /// Returns `SessionStepError::AtLastStep` on the summary step and
    /// `SessionStepError::AlreadyCompleted` after completion.
    pub fn next(&mut self) -> Result<LessonStep, SessionStepError> {
        self.ensure_open()?;
        let next = self.current.next().ok_or(SessionStepError::AtLastStep)?;
        self.completed.insert(self.current);
        self.current = next;
        Ok(next)
    }

    /// Go back one step.
    ///
    /// # Errors
    ///
    /// Returns `SessionStepError::AtFirstStep` on the overview step and
    /// `SessionStepError::AlreadyCompleted` after completion.
    pub fn back(&mut self) -> Result<LessonStep, SessionStepError> {
        self.ensure_open()?;
        let previous = self.current.previous().ok_or(SessionStepError::AtFirstStep)?;
        self.current = previous;
        Ok(previous)
    }

    /// Finish the lesson from the summary step.
    ///
    /// # Errors
    ///
    /// Returns `SessionStepError::NotAtSummary` when called on any other step
    /// and `SessionStepError::AlreadyCompleted` when called twice.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<LessonCompletion, SessionStepError> {
        self.ensure_open()?;
        if self.current != LessonStep::Summary {
            return Err(SessionStepError::NotAtSummary);
        }

        let score = completion_score(self.completed.len());
        let time_spent_secs = u64::try_from((now - self.started_at).num_seconds()).unwrap_or(0);
        self.completed.insert(LessonStep::Summary);

        let completion = LessonCompletion {
            lesson_id: self.lesson_id,
            score,
            time_spent_secs,
            completed_at: now,
        };
        self.completion = Some(completion);
        Ok(completion)
    }

    fn ensure_open(&self) -> Result<(), SessionStepError> {
        if self.is_completed() {
            return Err(SessionStepError::AlreadyCompleted);
        }
        Ok(())
    }
}

/// `min(100, round(100 * (completed + 1) / 4))`.
#[must_use]
pub fn completion_score(completed_before_summary: usize) -> Score {
    let percent = round_percent(completed_before_summary + 1, LessonStep::ALL.len());
    Score::clamped(i64::from(percent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn walk_to_summary(session: &mut LessonSession) {
        for _ in 0..3 {
            session.next().unwrap();
        }
    }

    #[test]
    fn next_marks_steps_completed_in_order() {
        let mut session = LessonSession::start(LessonId::new(1), fixed_now());
        assert_eq!(session.next().unwrap(), LessonStep::Phrases);
        assert!(session.is_step_completed(LessonStep::Overview));
        assert!(!session.is_step_completed(LessonStep::Phrases));
        assert_eq!(session.step_number(), 2);
    }

    #[test]
    fn back_does_not_touch_completed_set() {
        let mut session = LessonSession::start(LessonId::new(1), fixed_now());
        session.next().unwrap();
        session.next().unwrap();
        assert_eq!(session.back().unwrap(), LessonStep::Phrases);
        assert_eq!(session.completed_count(), 2);
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut session = LessonSession::start(LessonId::new(1), fixed_now());
        assert_eq!(session.back(), Err(SessionStepError::AtFirstStep));
        assert_eq!(
            session.complete(fixed_now()),
            Err(SessionStepError::NotAtSummary)
        );
        walk_to_summary(&mut session);
        assert_eq!(session.next(), Err(SessionStepError::AtLastStep));
        assert_eq!(session.current_step(), LessonStep::Summary);
    }

    #[test]
    fn full_walkthrough_scores_hundred() {
        let start = fixed_now();
        let mut session = LessonSession::start(LessonId::new(7), start);
        walk_to_summary(&mut session);
        let completion = session.complete(start + Duration::seconds(95)).unwrap();

        assert_eq!(completion.score, Score::MAX);
        assert_eq!(completion.time_spent_secs, 95);
        assert_eq!(completion.lesson_id, LessonId::new(7));
        assert!(session.is_completed());
        assert_eq!(
            session.complete(start),
            Err(SessionStepError::AlreadyCompleted)
        );
        assert_eq!(session.back(), Err(SessionStepError::AlreadyCompleted));
    }

    #[test]
    fn revisiting_steps_does_not_inflate_score() {
        let start = fixed_now();
        let mut session = LessonSession::start(LessonId::new(7), start);
        session.next().unwrap();
        session.back().unwrap();
        session.next().unwrap();
        walk_to_summary_from(&mut session, LessonStep::Phrases);
        let completion = session.complete(start).unwrap();
        assert_eq!(completion.score, Score::MAX);
    }

    fn walk_to_summary_from(session: &mut LessonSession, from: LessonStep) {
        assert_eq!(session.current_step(), from);
        while session.current_step() != LessonStep::Summary {
            session.next().unwrap();
        }
    }

    #[test]
    fn clock_skew_never_yields_negative_time() {
        let start = fixed_now();
        let mut session = LessonSession::start(LessonId::new(1), start);
        walk_to_summary(&mut session);
        let completion = session.complete(start - Duration::seconds(30)).unwrap();
        assert_eq!(completion.time_spent_secs, 0);
    }

    #[test]
    fn score_formula_matches_completed_count() {
        assert_eq!(completion_score(0).value(), 25);
        assert_eq!(completion_score(1).value(), 50);
        assert_eq!(completion_score(2).value(), 75);
        assert_eq!(completion_score(3).value(), 100);
        assert_eq!(completion_score(9).value(), 100);
    }

    #[test]
    fn progress_counts_summary_as_reached() {
        let mut session = LessonSession::start(LessonId::new(1), fixed_now());
        assert_eq!(session.progress_percent(), 0);
        session.next().unwrap();
        assert_eq!(session.progress_percent(), 25);
        session.next().unwrap();
        session.next().unwrap();
        assert_eq!(session.progress_percent(), 100);
    }

    #[test]
    fn step_navigation_helpers() {
        assert_eq!(LessonStep::Overview.previous(), None);
        assert_eq!(LessonStep::Summary.next(), None);
        assert_eq!(LessonStep::Phrases.next(), Some(LessonStep::Dialogue));
        assert_eq!(LessonStep::Dialogue.label(), "Dialogue");
    }
}
