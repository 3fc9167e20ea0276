//! Rendering of the target picker
//!
//! Everything is drawn as a single paragraph: key help, the search text when a
//! search is active, the target list and finally the output of the last run.

use crate::app::App;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

fn target_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn chosen_target_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

fn command_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn search_text_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn help_line(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(keys, command_style()), Span::raw(action)])
}

/// The lines making up the picker, top to bottom
pub fn lines<R>(app: &App<R>) -> Vec<Line<'_>> {
    let mut lines = vec![
        help_line("Press q", " to quit."),
        help_line("Press r", " to drop output."),
        Line::default(),
    ];

    if app.mode.is_search() {
        lines.push(Line::from(vec![
            Span::styled("Search text:", search_text_title_style()),
            Span::raw(" "),
            Span::raw(app.buffer.as_str()),
        ]));
        lines.push(Line::default());
    }

    lines.push(Line::raw("Makefile's targets:"));
    for (i, choice) in app.choices.iter().enumerate() {
        let line = if i == app.selected {
            Line::from(vec![
                Span::raw("> "),
                Span::styled(choice.as_str(), chosen_target_style()),
            ])
        } else {
            Line::from(vec![
                Span::raw("  "),
                Span::styled(choice.as_str(), target_style()),
            ])
        };
        lines.push(line);
    }

    if !app.output.is_empty() {
        lines.push(Line::default());
        lines.extend(app.output.lines().map(Line::raw));
    }

    lines
}

pub fn render<R>(frame: &mut Frame, app: &App<R>) {
    let paragraph = Paragraph::new(lines(app)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}
