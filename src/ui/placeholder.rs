use crate::controller::Phase;
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Loading, empty, and error states of the quiz screen.
pub fn draw_placeholder(f: &mut Frame, phase: &Phase, title: &str) {
    let (message, color, retry) = match phase {
        Phase::Loading => (format!("Loading questions from {}...", title), Color::Cyan, false),
        Phase::Empty => (format!("No questions in {}.", title), Color::Yellow, true),
        Phase::Unavailable(reason) => (
            format!("Could not load questions: {}", reason),
            Color::Red,
            true,
        ),
        Phase::Active(_) | Phase::Closed => return,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let mut help = Vec::new();
    if retry {
        help.extend([
            Span::styled(
                "r",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Retry  "),
        ]);
    }
    help.extend([
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Back"),
    ]);
    lines.push(Line::from(help));

    let area = centered_rect(70, 7, f.area());
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Quiz Challenge"));
    f.render_widget(body, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(phase: &Phase) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| draw_placeholder(f, phase, "questions"))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_unavailable_offers_retry() {
        let text = render(&Phase::Unavailable("offline".to_string()));
        assert!(text.contains("offline"));
        assert!(text.contains("Retry"));
    }

    #[test]
    fn test_loading_has_no_retry() {
        let text = render(&Phase::Loading);
        assert!(text.contains("Loading questions"));
        assert!(!text.contains("Retry"));
    }

    #[test]
    fn test_empty_state() {
        assert!(render(&Phase::Empty).contains("No questions in questions."));
    }
}
