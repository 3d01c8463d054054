use crate::db::document::CollectionSummary;
use crate::models::TimerPolicy;
use crate::utils::format_updated_date;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn format_collection_item(collection: &CollectionSummary) -> String {
    format!(
        "{} ({} questions, updated {})",
        collection.name,
        collection.documents,
        format_updated_date(collection.updated_at)
    )
}

pub fn draw_menu(
    f: &mut Frame,
    collections: &[CollectionSummary],
    selected_index: usize,
    timer: TimerPolicy,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let timer_label = match timer {
        TimerPolicy::Elapsed => "elapsed timer".to_string(),
        TimerPolicy::Countdown { seconds } => format!("{}s per question", seconds),
    };
    let title = Paragraph::new(format!("Quiz Challenge ({})", timer_label))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    if collections.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from("No question collections found."),
            Line::from(""),
            Line::from("Import one with: quiz-challenge import <file.csv> --collection <name>"),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Collections"));
        f.render_widget(empty, chunks[1]);
    } else {
        let items: Vec<ListItem> = collections
            .iter()
            .enumerate()
            .map(|(i, collection)| {
                let style = if i == selected_index {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if i == selected_index { "> " } else { "  " };
                ListItem::new(format!("{}{}", prefix, format_collection_item(collection)))
                    .style(style)
            })
            .collect();
        let list =
            List::new(items).block(Block::default().borders(Borders::ALL).title("Collections"));
        f.render_widget(list, chunks[1]);
    }

    let help_text = vec![Line::from(vec![
        Span::styled(
            "↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Navigate  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Start Quiz  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
