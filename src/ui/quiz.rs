use crate::models::{option_label, TimerPolicy};
use crate::session::QuizSession;
use crate::ui::layout::{calculate_quiz_chunks, centered_rect};
use crate::utils::format_clock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn timer_text(session: &QuizSession) -> String {
    match (session.timer_policy(), session.remaining_seconds()) {
        (TimerPolicy::Countdown { .. }, Some(remaining)) => {
            format!("Time left: {} seconds", remaining)
        }
        _ => format!("Elapsed: {}", format_clock(session.elapsed_seconds())),
    }
}

pub fn draw_quiz(f: &mut Frame, session: &QuizSession, title: &str) {
    let Some(question) = session.current_question() else {
        return;
    };
    let layout = calculate_quiz_chunks(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(
                "Question {} / {} - {}",
                session.current_index() + 1,
                session.len(),
                title
            ),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from("   "),
        Span::styled(timer_text(session), Style::default().fg(Color::Yellow)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let prompt = Paragraph::new(Text::from(question.prompt.as_str()))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(prompt, layout.question_area);

    let recorded = session.answer_for(session.current_index()).flatten();
    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = if recorded == Some(option.as_str()) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}. {}", option_label(i), option)).style(style)
        })
        .collect();
    let options = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, layout.options_area);

    let previous_style = if session.current_index() == 0 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let answer_keys = match question.options.len() {
        0 | 1 => option_label(0).to_string(),
        n => format!("{}-{}", option_label(0), option_label(n - 1)),
    };
    let help_text = vec![
        Line::from(vec![
            key_span(&answer_keys),
            Span::from(" Answer  "),
            key_span("←/p"),
            Span::styled(" Previous  ", previous_style),
            key_span("→/s"),
            Span::from(" Skip  "),
            key_span("Enter/n"),
            Span::from(" Next"),
        ]),
        Line::from(vec![
            key_span("Esc"),
            Span::from(" Quit Quiz  "),
            key_span("Ctrl+C"),
            Span::from(" Exit App"),
        ]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let area = centered_rect(60, 11, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new("Quit Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Finish now and see your score?")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Show Score)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
