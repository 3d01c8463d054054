use crate::error::SourceError;
use crate::logger;
use crate::models::{Question, SessionState, TimerPolicy};
use crate::session::QuizSession;
use crate::timer::Ticker;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// The host shell's side of leaving the quiz screen.
pub trait Navigator {
    fn on_exit(&mut self);
}

/// Records that the screen asked to be popped.
#[derive(Debug, Default)]
pub struct ExitSignal {
    exited: bool,
}

impl ExitSignal {
    pub fn exited(&self) -> bool {
        self.exited
    }
}

impl Navigator for ExitSignal {
    fn on_exit(&mut self) {
        self.exited = true;
    }
}

/// Identifies one question fetch. Tickets are unique for the whole process,
/// so a result can only ever be applied by the controller that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    Empty,
    Unavailable(String),
    Active(QuizSession),
    Closed,
}

/// Owns one visit to the quiz screen: the pending fetch, the session, and
/// the one-second ticker that drives it.
#[derive(Debug)]
pub struct QuizController<N: Navigator> {
    phase: Phase,
    ticker: Option<Ticker>,
    pending: Option<FetchTicket>,
    timer_policy: TimerPolicy,
    navigator: N,
}

impl<N: Navigator> QuizController<N> {
    pub fn new(timer_policy: TimerPolicy, navigator: N) -> Self {
        Self {
            phase: Phase::Loading,
            ticker: None,
            pending: None,
            timer_policy,
            navigator,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            Phase::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// Start (or restart) loading. Any result from an earlier fetch becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let ticket = FetchTicket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed));
        self.pending = Some(ticket);
        self.ticker = None;
        self.phase = Phase::Loading;
        ticket
    }

    /// Apply a finished fetch. Returns `false` if the result was stale.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Question>, SourceError>,
    ) -> bool {
        if self.pending != Some(ticket) || self.phase != Phase::Loading {
            logger::log("Discarding stale question fetch");
            return false;
        }
        self.pending = None;

        match result {
            Ok(questions) if questions.is_empty() => {
                logger::log("Question source returned no questions");
                self.phase = Phase::Empty;
            }
            Ok(questions) => {
                logger::log(&format!("Loaded {} questions", questions.len()));
                self.load(questions);
            }
            Err(e) => {
                logger::log(&format!("Question fetch failed: {}", e));
                self.phase = Phase::Unavailable(e.to_string());
            }
        }
        true
    }

    /// Begin a session over `questions` and acquire its ticker.
    pub fn load(&mut self, questions: Vec<Question>) {
        let session = QuizSession::load(questions, self.timer_policy);
        self.ticker = if session.is_empty() {
            None
        } else {
            Some(Ticker::start())
        };
        self.phase = if session.is_empty() {
            Phase::Empty
        } else {
            Phase::Active(session)
        };
    }

    /// Apply every whole second that passed since the last call.
    pub fn pump_ticks(&mut self) {
        self.pump_ticks_at(Instant::now());
    }

    /// Seconds that pass outside `InProgress` are consumed without reaching
    /// the session.
    pub fn pump_ticks_at(&mut self, now: Instant) {
        let Some(ticker) = self.ticker.as_mut() else {
            return;
        };
        let due = ticker.due_at(now);
        for _ in 0..due {
            if self.session().map(QuizSession::state) != Some(SessionState::InProgress) {
                break;
            }
            self.tick();
        }
    }

    pub fn tick(&mut self) {
        self.with_session(|s| {
            s.tick();
        });
    }

    pub fn select_option(&mut self, position: usize) {
        self.with_session(|s| s.select_option(position));
    }

    pub fn select_answer(&mut self, option: Option<&str>) {
        self.with_session(|s| s.select_answer(option));
    }

    pub fn skip(&mut self) {
        self.with_session(QuizSession::skip);
    }

    pub fn go_to_previous(&mut self) {
        self.with_session(QuizSession::go_to_previous);
    }

    pub fn confirm_exit(&mut self, confirmed: bool) {
        self.with_session(|s| s.confirm_exit(confirmed));
    }

    /// Route a back navigation. During a quiz this asks for confirmation
    /// instead of leaving.
    pub fn on_back_pressed(&mut self) {
        match self.session().map(QuizSession::state) {
            Some(SessionState::InProgress) => self.with_session(QuizSession::request_exit),
            Some(SessionState::ConfirmingExit) => self.confirm_exit(false),
            Some(SessionState::ShowingSummary) => self.close_summary(),
            None => {
                self.teardown();
                self.navigator.on_exit();
            }
        }
    }

    /// Dismiss the summary, ending the session and leaving the screen.
    pub fn close_summary(&mut self) {
        if !self.session().is_some_and(QuizSession::can_close) {
            return;
        }
        self.teardown();
        self.navigator.on_exit();
    }

    /// Release everything tied to this screen. Pending fetches become stale.
    pub fn teardown(&mut self) {
        self.ticker = None;
        self.pending = None;
        self.phase = Phase::Closed;
    }

    fn with_session(&mut self, op: impl FnOnce(&mut QuizSession)) {
        let Phase::Active(session) = &mut self.phase else {
            return;
        };
        op(session);
        if session.state() == SessionState::ShowingSummary {
            self.ticker = None;
        }
    }
}
