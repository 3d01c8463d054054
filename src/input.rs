use crate::controller::{Navigator, Phase, QuizController};
use crate::models::{label_index, SessionState};
use crossterm::event::{KeyCode, KeyEvent};

/// What the shell must do after a key was handled on the quiz screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizInput {
    Handled,
    Retry,
}

pub fn handle_quiz_input<N: Navigator>(
    controller: &mut QuizController<N>,
    key: KeyEvent,
) -> QuizInput {
    let state = match controller.phase() {
        Phase::Active(session) => Some(session.state()),
        _ => None,
    };
    let Some(state) = state else {
        return handle_placeholder(controller, key);
    };

    match state {
        SessionState::InProgress => handle_in_progress(controller, key),
        SessionState::ConfirmingExit => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => controller.confirm_exit(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                controller.confirm_exit(false)
            }
            _ => {}
        },
        SessionState::ShowingSummary => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('c') => controller.close_summary(),
            _ => {}
        },
    }
    QuizInput::Handled
}

/// Keys on the loading, empty, and unavailable screens.
fn handle_placeholder<N: Navigator>(controller: &mut QuizController<N>, key: KeyEvent) -> QuizInput {
    let retryable = matches!(controller.phase(), Phase::Empty | Phase::Unavailable(_));
    match key.code {
        KeyCode::Char('r') if retryable => QuizInput::Retry,
        KeyCode::Esc | KeyCode::Char('q') if !controller.is_closed() => {
            controller.on_back_pressed();
            QuizInput::Handled
        }
        _ => QuizInput::Handled,
    }
}

fn handle_in_progress<N: Navigator>(controller: &mut QuizController<N>, key: KeyEvent) {
    let option_count = controller
        .session()
        .and_then(|s| s.current_question())
        .map_or(0, |q| q.options.len());

    // Navigation letters win over option labels; digits still reach those options.
    match key.code {
        KeyCode::Left | KeyCode::Char('p') => controller.go_to_previous(),
        KeyCode::Right | KeyCode::Char('s') => controller.skip(),
        KeyCode::Enter | KeyCode::Char('n') => controller.select_answer(None),
        KeyCode::Esc => controller.on_back_pressed(),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(position) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1))
                && position < option_count
            {
                controller.select_option(position);
            }
        }
        KeyCode::Char(c) if label_index(c).is_some_and(|i| i < option_count) => {
            if let Some(position) = label_index(c) {
                controller.select_option(position);
            }
        }
        _ => {}
    }
}
