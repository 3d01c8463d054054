use crate::logger;
use crate::models::{Question, SessionState, TimerPolicy};
use std::collections::{BTreeMap, BTreeSet};

/// State of one pass through a fixed list of questions.
///
/// Every operation is a guarded no-op when the session is not in a state
/// that accepts it, so callers can forward UI events without pre-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    answers: BTreeMap<usize, Option<String>>,
    credited: BTreeSet<usize>,
    elapsed_seconds: u64,
    remaining_seconds: Option<u64>,
    timer_policy: TimerPolicy,
    state: SessionState,
}

impl QuizSession {
    pub fn load(questions: Vec<Question>, timer_policy: TimerPolicy) -> Self {
        let mut session = Self {
            questions,
            current_index: 0,
            answers: BTreeMap::new(),
            credited: BTreeSet::new(),
            elapsed_seconds: 0,
            remaining_seconds: None,
            timer_policy,
            state: SessionState::InProgress,
        };
        session.reset_countdown();
        session
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn timer_policy(&self) -> TimerPolicy {
        self.timer_policy
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Seconds left on the current question, only under a countdown policy.
    pub fn remaining_seconds(&self) -> Option<u64> {
        self.remaining_seconds
    }

    /// The recorded answer for `index`: `None` if never answered,
    /// `Some(None)` if submitted without a choice.
    pub fn answer_for(&self, index: usize) -> Option<Option<&str>> {
        self.answers.get(&index).map(|a| a.as_deref())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Whether question `index` earned credit with its first answer.
    pub fn is_credited(&self, index: usize) -> bool {
        self.credited.contains(&index)
    }

    pub fn correct_count(&self) -> usize {
        self.credited.len()
    }

    /// Everything that did not earn credit, skipped questions included.
    pub fn incorrect_count(&self) -> usize {
        self.questions.len().saturating_sub(self.correct_count())
    }

    /// Questions without credit that never received a concrete option.
    pub fn unanswered_count(&self) -> usize {
        (0..self.questions.len())
            .filter(|i| !self.credited.contains(i))
            .filter(|i| !matches!(self.answers.get(i), Some(Some(_))))
            .count()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Advance the session clock by one second.
    ///
    /// Returns `true` when a countdown expired and an empty answer was
    /// submitted on the user's behalf.
    pub fn tick(&mut self) -> bool {
        if self.state != SessionState::InProgress {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);

        let Some(remaining) = self.remaining_seconds else {
            return false;
        };
        let remaining = remaining.saturating_sub(1);
        self.remaining_seconds = Some(remaining);
        if remaining == 0 && !self.questions.is_empty() {
            logger::log(&format!(
                "Countdown expired on question {}",
                self.current_index + 1
            ));
            self.select_answer(None);
            return true;
        }
        false
    }

    /// Record `option` for the current question and move on.
    ///
    /// Correctness is judged only the first time an index is answered;
    /// later changes update the recorded answer but not the score.
    pub fn select_answer(&mut self, option: Option<&str>) {
        if self.state != SessionState::InProgress {
            return;
        }
        let index = self.current_index;
        let Some(question) = self.questions.get(index) else {
            return;
        };

        if let Some(choice) = option
            && !question.options.iter().any(|o| o == choice)
        {
            logger::log(&format!(
                "Recording answer outside the options of question {}",
                index + 1
            ));
        }

        let first_answer = !self.answers.contains_key(&index);
        if first_answer && option.is_some_and(|choice| question.is_correct(choice)) {
            self.credited.insert(index);
        }
        self.answers.insert(index, option.map(str::to_string));
        self.advance();
    }

    /// Select the option at `position` (0 = A) of the current question.
    pub fn select_option(&mut self, position: usize) {
        let Some(option) = self
            .current_question()
            .and_then(|q| q.options.get(position))
            .cloned()
        else {
            return;
        };
        self.select_answer(Some(&option));
    }

    pub fn skip(&mut self) {
        if self.state != SessionState::InProgress || self.questions.is_empty() {
            return;
        }
        self.advance();
    }

    pub fn go_to_previous(&mut self) {
        if self.state != SessionState::InProgress || self.current_index == 0 {
            return;
        }
        self.current_index -= 1;
        self.reset_countdown();
    }

    pub fn request_exit(&mut self) {
        if self.state == SessionState::InProgress {
            self.state = SessionState::ConfirmingExit;
        }
    }

    pub fn confirm_exit(&mut self, confirmed: bool) {
        if self.state != SessionState::ConfirmingExit {
            return;
        }
        self.state = if confirmed {
            SessionState::ShowingSummary
        } else {
            SessionState::InProgress
        };
    }

    /// Whether the summary can be dismissed, ending the session.
    pub fn can_close(&self) -> bool {
        self.state == SessionState::ShowingSummary
    }

    fn advance(&mut self) {
        if self.is_last_question() {
            self.state = SessionState::ShowingSummary;
        } else {
            self.current_index += 1;
            self.reset_countdown();
        }
    }

    fn reset_countdown(&mut self) {
        self.remaining_seconds = match self.timer_policy {
            TimerPolicy::Elapsed => None,
            TimerPolicy::Countdown { seconds } => Some(seconds.max(1)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| {
                Question::new(
                    &format!("Question {}?", i + 1),
                    &["alpha", "beta", "gamma", "delta"],
                    ["alpha", "beta", "gamma", "delta"][i % 4],
                )
            })
            .collect()
    }

    fn new_session(count: usize) -> QuizSession {
        QuizSession::load(sample_questions(count), TimerPolicy::Elapsed)
    }

    fn correct_option(session: &QuizSession) -> String {
        session.current_question().unwrap().answer.clone()
    }

    #[test]
    fn test_load_initial_state() {
        let session = new_session(3);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.remaining_seconds(), None);
    }

    #[test]
    fn test_correct_answer_scores_and_advances() {
        let mut session = new_session(3);
        let answer = correct_option(&session);
        session.select_answer(Some(&answer));

        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.answer_for(0), Some(Some(answer.as_str())));
    }

    #[test]
    fn test_changing_answer_does_not_double_count() {
        let mut session = new_session(3);
        let answer = correct_option(&session);
        session.select_answer(Some(&answer));
        assert_eq!(session.correct_count(), 1);

        session.go_to_previous();
        session.select_answer(Some("delta"));
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.answer_for(0), Some(Some("delta")));

        session.go_to_previous();
        session.select_answer(Some(&answer));
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn test_wrong_first_answer_is_never_credited() {
        let mut session = new_session(2);
        session.select_answer(Some("delta"));
        session.go_to_previous();
        session.select_answer(Some("alpha"));
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.answer_for(0), Some(Some("alpha")));
    }

    #[test]
    fn test_go_to_previous_keeps_answers_and_score() {
        let mut session = new_session(3);
        let answer = correct_option(&session);
        session.select_answer(Some(&answer));
        session.select_answer(Some("alpha"));

        let answers_before = session.answers.clone();
        let correct_before = session.correct_count();
        session.go_to_previous();

        assert_eq!(session.current_index(), 1);
        assert_eq!(session.answers, answers_before);
        assert_eq!(session.correct_count(), correct_before);
    }

    #[test]
    fn test_go_to_previous_at_first_question_is_noop() {
        let mut session = new_session(3);
        let before = session.clone();
        session.go_to_previous();
        assert_eq!(session, before);
    }

    #[test]
    fn test_skip_does_not_record_answer() {
        let mut session = new_session(3);
        session.skip();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.answer_for(0), None);
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn test_skip_on_last_question_shows_summary() {
        let mut session = new_session(2);
        session.skip();
        session.skip();
        assert_eq!(session.state(), SessionState::ShowingSummary);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_skipped_question_can_be_answered_later() {
        let mut session = new_session(3);
        session.skip();
        session.go_to_previous();
        let answer = correct_option(&session);
        session.select_answer(Some(&answer));
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn test_exit_cancelled_restores_identical_state() {
        let mut session = new_session(4);
        session.select_answer(Some("alpha"));
        session.skip();
        session.tick();
        let before = session.clone();

        session.request_exit();
        assert_eq!(session.state(), SessionState::ConfirmingExit);
        session.confirm_exit(false);

        assert_eq!(session, before);
    }

    #[test]
    fn test_exit_confirmed_shows_summary() {
        let mut session = new_session(4);
        session.request_exit();
        session.confirm_exit(true);
        assert_eq!(session.state(), SessionState::ShowingSummary);
        assert!(session.can_close());
        assert_eq!(session.incorrect_count(), 4);
    }

    #[test]
    fn test_confirm_exit_requires_pending_request() {
        let mut session = new_session(2);
        session.confirm_exit(true);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn test_summary_is_not_resumable() {
        let mut session = new_session(1);
        session.skip();
        assert_eq!(session.state(), SessionState::ShowingSummary);

        session.request_exit();
        session.confirm_exit(false);
        session.go_to_previous();
        session.select_answer(Some("alpha"));
        assert_eq!(session.state(), SessionState::ShowingSummary);
        assert_eq!(session.correct_count(), 0);
    }

    #[test]
    fn test_correct_incorrect_skip_scenario() {
        let mut session = new_session(3);
        let answer = correct_option(&session);
        session.select_answer(Some(&answer));
        session.select_answer(Some("delta"));
        session.skip();

        assert_eq!(session.state(), SessionState::ShowingSummary);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.incorrect_count(), 2);
        assert_eq!(session.unanswered_count(), 1);
    }

    #[test]
    fn test_empty_session_derived_values() {
        let mut session = new_session(0);
        assert_eq!(session.incorrect_count(), 0);
        assert_eq!(session.correct_count(), 0);
        assert!(session.current_question().is_none());

        session.select_answer(Some("alpha"));
        session.select_option(0);
        session.skip();
        session.go_to_previous();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn test_all_correct_in_sequence() {
        let mut session = new_session(5);
        for _ in 0..5 {
            assert_eq!(session.state(), SessionState::InProgress);
            let answer = correct_option(&session);
            session.select_answer(Some(&answer));
        }
        assert_eq!(session.state(), SessionState::ShowingSummary);
        assert_eq!(session.correct_count(), 5);
        assert_eq!(session.incorrect_count(), 0);
    }

    #[test]
    fn test_correct_count_stays_within_bounds() {
        let mut session = new_session(4);
        let steps: [fn(&mut QuizSession); 6] = [
            |s: &mut QuizSession| s.select_option(0),
            |s: &mut QuizSession| s.go_to_previous(),
            |s: &mut QuizSession| s.select_option(1),
            |s: &mut QuizSession| s.skip(),
            |s: &mut QuizSession| s.select_answer(None),
            |s: &mut QuizSession| s.select_option(2),
        ];
        for step in steps.iter().cycle().take(30) {
            step(&mut session);
            assert!(session.correct_count() <= session.len());
        }
    }

    #[test]
    fn test_tick_only_counts_in_progress() {
        let mut session = new_session(2);
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);

        session.request_exit();
        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);

        session.confirm_exit(true);
        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);
    }

    #[test]
    fn test_elapsed_not_reset_between_questions() {
        let mut session = new_session(3);
        session.tick();
        session.select_option(0);
        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);
    }

    #[test]
    fn test_select_option_out_of_range_is_noop() {
        let mut session = new_session(2);
        session.select_option(7);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn test_unknown_option_recorded_as_is() {
        let mut session = new_session(2);
        session.select_answer(Some("not an option"));
        assert_eq!(session.answer_for(0), Some(Some("not an option")));
        assert_eq!(session.correct_count(), 0);
    }

    #[test]
    fn test_countdown_expiry_submits_empty_answer() {
        let mut session =
            QuizSession::load(sample_questions(2), TimerPolicy::Countdown { seconds: 3 });
        assert_eq!(session.remaining_seconds(), Some(3));

        assert!(!session.tick());
        assert!(!session.tick());
        assert!(session.tick());

        assert_eq!(session.current_index(), 1);
        assert_eq!(session.answer_for(0), Some(None));
        assert_eq!(session.remaining_seconds(), Some(3));
        assert_eq!(session.elapsed_seconds(), 3);
    }

    #[test]
    fn test_countdown_resets_on_answer() {
        let mut session =
            QuizSession::load(sample_questions(3), TimerPolicy::Countdown { seconds: 10 });
        session.tick();
        session.tick();
        assert_eq!(session.remaining_seconds(), Some(8));
        session.select_option(1);
        assert_eq!(session.remaining_seconds(), Some(10));
    }

    #[test]
    fn test_countdown_on_last_question_ends_session() {
        let mut session =
            QuizSession::load(sample_questions(1), TimerPolicy::Countdown { seconds: 1 });
        assert!(session.tick());
        assert_eq!(session.state(), SessionState::ShowingSummary);
        assert_eq!(session.incorrect_count(), 1);
    }

    #[test]
    fn test_is_credited_follows_first_answer() {
        let mut session = new_session(3);
        session.select_option(1);
        session.select_option(1);
        assert!(!session.is_credited(0));
        assert!(session.is_credited(1));

        session.go_to_previous();
        session.go_to_previous();
        session.select_option(0);
        assert!(!session.is_credited(0));
        assert_eq!(session.answer_for(0), Some(Some("alpha")));

        session.select_answer(None);
        assert!(session.is_credited(1));
        assert_eq!(session.answer_for(1), Some(None));
        assert!(!session.is_credited(7));
    }
}
