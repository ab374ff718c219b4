//! Field rendering utilities for the form

use crate::form::{Field, FieldValue};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one bordered field
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a form field, with its error (if any) on the bottom border
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: Field,
    value: &FieldValue,
    error: Option<&str>,
    is_active: bool,
    masked: bool,
) {
    let color = match (is_active, error.is_some()) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Red,
        (false, false) => Color::DarkGray,
    };
    let style = Style::default().fg(color);

    let display = display_value(value, masked, field);
    let cursor = if is_active && !field.is_flag() { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let mut block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(style);
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(content.block(block), area);
}

fn display_value(value: &FieldValue, masked: bool, field: Field) -> String {
    match value {
        FieldValue::Flag(true) => "[x] sim".to_string(),
        FieldValue::Flag(false) => "[ ] não".to_string(),
        FieldValue::Text(text) if masked => "•".repeat(text.chars().count()),
        FieldValue::Text(text) if text.is_empty() && field == Field::Address => {
            "(preenchido pelo CEP)".to_string()
        }
        FieldValue::Text(text) => text.clone(),
    }
}

/// Draw the submit button, showing progress while a request is in flight
pub fn draw_submit_button(frame: &mut Frame, area: Rect, submitting: bool) {
    let (label, color) = if submitting {
        ("Enviando...", Color::DarkGray)
    } else {
        ("Cadastrar", Color::Green)
    };

    let button = Paragraph::new(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(button, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_value_hides_characters() {
        let value = FieldValue::Text("segredo".to_string());
        assert_eq!(display_value(&value, true, Field::Password), "•••••••");
        assert_eq!(display_value(&value, false, Field::Password), "segredo");
    }

    #[test]
    fn test_flag_display() {
        assert_eq!(display_value(&FieldValue::Flag(true), false, Field::Terms), "[x] sim");
        assert_eq!(display_value(&FieldValue::Flag(false), false, Field::Terms), "[ ] não");
    }

    #[test]
    fn test_empty_address_shows_hint() {
        let empty = FieldValue::Text(String::new());
        assert_eq!(display_value(&empty, false, Field::Address), "(preenchido pelo CEP)");
        assert_eq!(display_value(&empty, false, Field::City), "");
    }
}
