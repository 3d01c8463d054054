use crate::session::QuizSession;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::{format_clock, truncate_string};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_summary(f: &mut Frame, session: &QuizSession, title: &str) {
    let layout = calculate_summary_chunks(f.area());

    let header = Paragraph::new(format!("Quiz Summary - {}", title))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let unanswered = session.unanswered_count();
    let mut score = Text::default();
    score.push_line(Line::from(Span::styled(
        format!("Correct Answers: {}", session.correct_count()),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    score.push_line(Line::from(Span::styled(
        if unanswered > 0 {
            format!(
                "Incorrect Answers: {} ({} unanswered)",
                session.incorrect_count(),
                unanswered
            )
        } else {
            format!("Incorrect Answers: {}", session.incorrect_count())
        },
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    score.push_line(Line::from(format!(
        "Time: {}",
        format_clock(session.elapsed_seconds())
    )));
    let score = Paragraph::new(score)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(score, layout.score_area);

    let mut detail = Text::default();
    for (i, question) in session.questions().iter().enumerate() {
        let recorded = session.answer_for(i).flatten();
        let marker = match recorded {
            _ if session.is_credited(i) => "[✓]",
            Some(_) => "[✗]",
            None => "[ ]",
        };
        detail.push_line(Line::from(format!(
            "{} {}. {}",
            marker,
            i + 1,
            truncate_string(&question.prompt, 60)
        )));
        if let Some(answer) = recorded {
            detail.push_line(Line::from(format!(
                "   Your Answer: {}",
                truncate_string(answer, 56)
            )));
        }
    }
    let detail = Paragraph::new(detail)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Answers"));
    f.render_widget(detail, layout.detail_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Close  "),
        Span::styled(
            "Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
