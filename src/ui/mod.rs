pub mod layout;
mod menu;
mod placeholder;
mod quiz;
mod summary;

pub use layout::{calculate_quiz_chunks, calculate_summary_chunks};
pub use menu::draw_menu;
pub use placeholder::draw_placeholder;
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use summary::draw_summary;

use crate::controller::{Navigator, Phase, QuizController};
use crate::models::SessionState;
use ratatui::Frame;

/// Render whatever the quiz screen currently shows.
pub fn draw_quiz_screen<N: Navigator>(f: &mut Frame, controller: &QuizController<N>, title: &str) {
    match controller.phase() {
        Phase::Active(session) => match session.state() {
            SessionState::InProgress => draw_quiz(f, session, title),
            SessionState::ConfirmingExit => {
                draw_quiz(f, session, title);
                draw_quit_confirmation(f);
            }
            SessionState::ShowingSummary => draw_summary(f, session, title),
        },
        phase => draw_placeholder(f, phase, title),
    }
}
