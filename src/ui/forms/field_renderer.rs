//! Field rendering utilities for forms
//!
//! Schema fields go through a view model first: [`render_field`] maps a
//! field and its current answer to a [`FieldView`], and the draw functions
//! only turn views into widgets.

use crate::state::{Field, FieldInput, FieldKind, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// One entry of a choice widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub label: String,
    /// Chosen (dropdown/radio) or checked (checkbox)
    pub selected: bool,
    /// Under the keyboard cursor
    pub highlighted: bool,
}

/// Input widget a field is shown as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    TextInput { value: String },
    NumberInput { value: String },
    Select { options: Vec<ChoiceView> },
    RadioGroup { options: Vec<ChoiceView> },
    CheckboxGroup { options: Vec<ChoiceView> },
}

/// Everything needed to draw one schema field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub required: bool,
    pub focused: bool,
    pub widget: Widget,
}

/// Map a field and its answer to the widget that shows it
pub fn render_field(field: &Field, input: &FieldInput, focused: bool) -> FieldView {
    let widget = match (&field.kind, input) {
        (FieldKind::Text, FieldInput::Text(value)) => Widget::TextInput {
            value: value.clone(),
        },
        (FieldKind::Text, _) => Widget::TextInput {
            value: String::new(),
        },
        (FieldKind::Number, FieldInput::Number(value)) => Widget::NumberInput {
            value: value.clone(),
        },
        (FieldKind::Number, _) => Widget::NumberInput {
            value: String::new(),
        },
        (FieldKind::Dropdown { options }, input) => {
            let selected = match input {
                FieldInput::Dropdown { selected } => *selected,
                _ => 0,
            };
            Widget::Select {
                options: choices(options, |i| i == selected),
            }
        }
        (FieldKind::Radio { options }, input) => {
            let selected = match input {
                FieldInput::Radio { selected } => *selected,
                _ => None,
            };
            Widget::RadioGroup {
                options: choices(options, |i| selected == Some(i)),
            }
        }
        (FieldKind::Checkbox { options }, input) => {
            let checked: &[bool] = match input {
                FieldInput::Checkbox { checked } => checked,
                _ => &[],
            };
            Widget::CheckboxGroup {
                options: choices(options, |i| checked.get(i).copied().unwrap_or(false)),
            }
        }
    };

    FieldView {
        label: field.label.clone(),
        required: field.kind.is_required(),
        focused,
        widget,
    }
}

fn choices(options: &[String], is_selected: impl Fn(usize) -> bool) -> Vec<ChoiceView> {
    options
        .iter()
        .enumerate()
        .map(|(i, label)| ChoiceView {
            label: label.clone(),
            selected: is_selected(i),
            highlighted: false,
        })
        .collect()
}

impl FieldView {
    /// Mark the option under the keyboard cursor of a radio or checkbox group
    pub fn with_cursor(mut self, cursor: usize) -> Self {
        if let Widget::RadioGroup { options } | Widget::CheckboxGroup { options } =
            &mut self.widget
        {
            for (i, option) in options.iter_mut().enumerate() {
                option.highlighted = i == cursor;
            }
        }
        self
    }

    /// Title of the field's box
    pub fn title(&self) -> String {
        if self.required {
            format!(" {} * ", self.label)
        } else {
            format!(" {} ", self.label)
        }
    }

    /// Rows needed including the border
    pub fn height(&self) -> u16 {
        u16::try_from(self.lines().len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let value_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let cursor = if self.focused { CURSOR } else { "" };

        match &self.widget {
            Widget::TextInput { value } | Widget::NumberInput { value } => {
                let shown = if value.is_empty() && !self.focused {
                    Span::styled("(empty)", Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(value.clone(), value_style)
                };
                vec![Line::from(vec![
                    shown,
                    Span::styled(cursor, Style::default().fg(Color::Cyan)),
                ])]
            }
            Widget::Select { options } => {
                let current = options
                    .iter()
                    .find(|o| o.selected)
                    .map(|o| o.label.clone())
                    .unwrap_or_default();
                let arrow_style = if self.focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                vec![Line::from(vec![
                    Span::styled("◂ ", arrow_style),
                    Span::styled(current, value_style.add_modifier(Modifier::BOLD)),
                    Span::styled(" ▸", arrow_style),
                ])]
            }
            Widget::RadioGroup { options } => options
                .iter()
                .map(|o| self.choice_line(o, if o.selected { "(•)" } else { "( )" }))
                .collect(),
            Widget::CheckboxGroup { options } => options
                .iter()
                .map(|o| self.choice_line(o, if o.selected { "[x]" } else { "[ ]" }))
                .collect(),
        }
    }

    fn choice_line(&self, option: &ChoiceView, marker: &str) -> Line<'static> {
        let highlighted = self.focused && option.highlighted;
        let prefix = if highlighted { "▸ " } else { "  " };
        let style = if highlighted {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if option.selected {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(Span::styled(
            format!("{prefix}{marker} {}", option.label),
            style,
        ))
    }
}

/// Draw a schema field view in a bordered box
pub fn draw_field_view(frame: &mut Frame, area: Rect, view: &FieldView) {
    let border_style = if view.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(view.title())
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(view.lines()).block(block), area);
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    draw_field_with_value(
        frame,
        area,
        &field.label,
        &field.display_value(),
        is_active,
        field.is_multiline,
    );
}

/// Draw a labelled input box holding `value`
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { CURSOR } else { "" };

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        if is_active {
            // A trailing newline starts an empty line the cursor sits on
            if display_value.ends_with('\n') || lines.is_empty() {
                lines.push(Line::from(""));
            }
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a one-line key help footer
pub fn draw_help_text(frame: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, action) in keys {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {action}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
