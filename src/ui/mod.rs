//! UI module for rendering the TUI

mod field_renderer;

use crate::app::App;
use crate::form::{Field, Notification};
use field_renderer::{draw_field, draw_submit_button, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Reserve bottom line for status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_form(frame, chunks[0], app);
    draw_status_bar(frame, chunks[1], app);
}

/// Draw every field followed by the submit button
fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Cadastro ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = Field::ALL
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(FIELD_HEIGHT)); // Submit button
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let controller = &app.controller;
    for (row, field) in rows.iter().zip(Field::ALL) {
        let masked = field.is_secret() && !app.show_password;
        draw_field(
            frame,
            *row,
            field,
            &controller.form().value(field),
            controller.error(field),
            app.focused == field,
            masked,
        );
    }

    if let Some(row) = rows.get(Field::ALL.len()) {
        draw_submit_button(frame, *row, controller.is_submitting());
    }
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " Tab:next  Enter:cadastrar  ^P:senha  Esc:sair ",
        Style::default().fg(Color::Gray),
    )];

    match &app.status_message {
        Some(Notification::Success(msg)) => {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
        }
        Some(Notification::Failure(msg)) => {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(msg, Style::default().fg(Color::Red)));
        }
        None => {}
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
