use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use super::app::{App, FormField, Mode};
use crate::model::Priority;
use crate::validate::parse_due_date;

/// Color tier for a priority value; anything unrecognised is gray.
pub fn priority_color(priority: Option<&str>) -> Color {
    match priority.and_then(|p| Priority::parse(p).ok()) {
        Some(Priority::High) => Color::Red,
        Some(Priority::Medium) => Color::Yellow,
        Some(Priority::Low) => Color::Green,
        None => Color::Gray,
    }
}

/// Readable form of a stored due date, or the raw value if it does not parse.
pub fn format_due_date(raw: &str) -> String {
    match parse_due_date(raw) {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from("Task Manager").bold()).alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_tasks(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let editing = app.mode == Mode::Form;

    let label = |field: FormField, name: &'static str| {
        if editing && form.focused == field {
            Span::styled(format!("> {name:<9}"), Style::default().fg(Color::Magenta).bold())
        } else {
            Span::raw(format!("  {name:<9}"))
        }
    };

    let text = if form.text.is_empty() && !(editing && form.focused == FormField::Text) {
        Span::styled("What needs to be done?", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(form.text.clone())
    };
    let due = if form.due_date.is_empty() {
        Span::styled("YYYY-MM-DD", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(form.due_date.clone())
    };

    let lines = vec![
        Line::from(vec![label(FormField::Text, "Task"), text]),
        Line::from(vec![
            label(FormField::Category, "Category"),
            Span::raw(format!("< {} >", form.category())),
        ]),
        Line::from(vec![
            label(FormField::Priority, "Priority"),
            Span::styled(
                format!("< {} >", form.priority.label()),
                Style::default().fg(priority_color(Some(form.priority.as_str()))),
            ),
        ]),
        Line::from(vec![label(FormField::DueDate, "Due"), due]),
    ];

    let border = if editing {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Add Task ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_tasks(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Tasks ");

    if app.loading {
        frame.render_widget(Paragraph::new("Loading...").block(block), area);
        return;
    }
    if app.tasks.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from("No tasks yet!"),
            Line::from("Add your first task above").fg(Color::DarkGray),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .map(|task| {
            let (check, check_style) = if task.completed {
                ("[x] ", Style::default().fg(Color::Green))
            } else {
                ("[ ] ", Style::default().fg(Color::Magenta))
            };
            let text_style = if task.completed {
                Style::default()
                    .add_modifier(Modifier::CROSSED_OUT)
                    .fg(Color::DarkGray)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::styled(check, check_style),
                Span::styled(task.text.clone(), text_style),
            ];
            if let Some(category) = &task.category {
                spans.push(Span::styled(
                    format!("  [{category}]"),
                    Style::default().fg(Color::Cyan),
                ));
            }
            if let Some(priority) = &task.priority {
                spans.push(Span::styled(
                    format!("  !{priority}"),
                    Style::default().fg(priority_color(Some(priority))),
                ));
            }
            if let Some(due) = &task.due_date {
                spans.push(Span::styled(
                    format!("  due {}", format_due_date(due)),
                    Style::default().fg(Color::Cyan),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let highlight = if app.mode == Mode::List {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match (&app.error, app.mode) {
        (Some(error), _) => Line::from(error.as_str()).fg(Color::Red),
        (None, Mode::List) => {
            Line::from("j/k move  space toggle  d delete  a add  r refresh  q quit")
                .fg(Color::DarkGray)
        }
        (None, Mode::Form) => {
            Line::from("tab next field  ←/→ choose  enter add  esc back").fg(Color::DarkGray)
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
