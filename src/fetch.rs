use crate::controller::FetchTicket;
use crate::error::SourceError;
use crate::logger;
use crate::models::Question;
use crate::source::QuestionSource;
use crossbeam_channel::Sender;
use std::sync::Arc;
use tokio::runtime::Handle;

#[derive(Debug)]
pub struct FetchCompleted {
    pub ticket: FetchTicket,
    pub result: Result<Vec<Question>, SourceError>,
}

/// Run one question fetch on `runtime` and report back through `tx`.
///
/// The fetch itself cannot be cancelled; the receiver decides whether the
/// result still applies by checking its ticket.
pub fn spawn_fetch(
    runtime: &Handle,
    source: Arc<dyn QuestionSource>,
    ticket: FetchTicket,
    tx: Sender<FetchCompleted>,
) {
    runtime.spawn(async move {
        logger::log(&format!("Fetching questions from {}", source.describe()));
        let result = source.fetch_questions().await;
        if tx.send(FetchCompleted { ticket, result }).is_err() {
            logger::log("Fetch receiver gone, dropping result");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ExitSignal, QuizController};
    use crate::models::TimerPolicy;
    use crate::source::StaticQuestionSource;
    use std::time::Duration;

    #[test]
    fn test_spawned_fetch_reports_result() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();
        let source = Arc::new(StaticQuestionSource::new(vec![Question::new(
            "Q",
            &["a", "b"],
            "b",
        )]));

        let mut controller = QuizController::new(TimerPolicy::Elapsed, ExitSignal::default());
        let ticket = controller.begin_fetch();
        spawn_fetch(runtime.handle(), source, ticket, tx);

        let completed = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(completed.ticket, ticket);
        assert!(controller.apply_fetch(completed.ticket, completed.result));
        assert_eq!(controller.session().unwrap().len(), 1);
    }

    #[test]
    fn test_result_for_torn_down_screen_is_ignored() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();
        let source = Arc::new(StaticQuestionSource::new(vec![Question::new(
            "Q",
            &["a"],
            "a",
        )]));

        let mut controller = QuizController::new(TimerPolicy::Elapsed, ExitSignal::default());
        let ticket = controller.begin_fetch();
        spawn_fetch(runtime.handle(), source, ticket, tx);
        controller.teardown();

        let completed = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(!controller.apply_fetch(completed.ticket, completed.result));
        assert!(controller.session().is_none());
    }
}
