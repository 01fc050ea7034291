//! Drawing the calculator screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::calculator::{format_current, format_operand};

use super::app::App;
use super::keys::Mode;

const ACCENT: Color = Color::Rgb(255, 159, 10);
const AI_ACCENT: Color = Color::Rgb(96, 120, 240);
const MUTED: Color = Color::DarkGray;

/// Keypad legend, laid out like the on-screen buttons.
const KEYPAD_ROWS: [[(&str, &str); 4]; 5] = [
    [("AC", "esc"), ("+/-", "n"), ("%", "%"), ("÷", "/")],
    [("7", "7"), ("8", "8"), ("9", "9"), ("×", "*")],
    [("4", "4"), ("5", "5"), ("6", "6"), ("-", "-")],
    [("1", "1"), ("2", "2"), ("3", "3"), ("+", "+")],
    [("0", "0"), ("", ""), (".", "."), ("=", "enter")],
];

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .split(area);

    draw_header(frame, app, chunks[0]);
    match app.mode() {
        Mode::Calc => draw_calculator(frame, app, chunks[1]),
        Mode::Ai => draw_solver(frame, app, chunks[1]),
    }
    draw_status(frame, app, chunks[2]);

    if app.show_history() {
        draw_history(frame, app, area);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for mode in [Mode::Calc, Mode::Ai] {
        let label = format!(" {} ", mode.label());
        let style = if mode == app.mode() {
            let bg = if mode == Mode::Ai { AI_ACCENT } else { Color::Gray };
            Style::default()
                .fg(Color::Black)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let count = app.history().borrow().len();
    let history_style = if app.show_history() {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };
    spans.push(Span::styled(
        format!("  history ({})", count),
        history_style,
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_calculator(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(5)]).split(area);

    let state = app.keypad().state();
    let mut previous = Vec::new();
    if let Some(operand) = format_operand(state.previous_operand.as_deref()) {
        previous.push(Span::styled(operand, Style::default().fg(Color::Gray)));
    }
    if let Some(operation) = state.operation {
        previous.push(Span::raw(" "));
        previous.push(Span::styled(
            operation.symbol().to_string(),
            Style::default().fg(ACCENT),
        ));
    }

    let current = Span::styled(
        format_current(state.current_operand.as_deref()),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let screen = Paragraph::new(vec![Line::from(previous), Line::from(current)])
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED)),
        );
    frame.render_widget(screen, chunks[0]);

    let rows: Vec<Line> = KEYPAD_ROWS
        .iter()
        .flat_map(|row| {
            let buttons: Vec<Span> = row
                .iter()
                .map(|&(label, _)| {
                    let style = if matches!(label, "÷" | "×" | "-" | "+" | "=") {
                        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
                    } else if matches!(label, "AC" | "+/-" | "%") {
                        Style::default().fg(Color::Gray)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    Span::styled(format!("{:^5}", label), style)
                })
                .collect();
            let hints: Vec<Span> = row
                .iter()
                .map(|&(_, key)| Span::styled(format!("{:^5}", key), Style::default().fg(MUTED)))
                .collect();
            [Line::from(buttons), Line::from(hints)]
        })
        .collect();

    frame.render_widget(
        Paragraph::new(rows).alignment(Alignment::Center),
        chunks[1],
    );
}

fn draw_solver(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.ai();
    let input_lines = session.input().split('\n').count() as u16;
    let input_height = input_lines.clamp(1, 4) + 2;
    let chunks =
        Layout::vertical([Constraint::Min(3), Constraint::Length(input_height)]).split(area);

    let heading = Style::default().fg(MUTED).add_modifier(Modifier::BOLD);
    let body: Vec<Line> = if session.is_pending() {
        vec![
            Line::raw(""),
            Line::styled("Crunching numbers...", Style::default().fg(AI_ACCENT)),
        ]
    } else if let Some(response) = session.response() {
        let result_style = if response.is_error() {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        vec![
            Line::styled("ANSWER", heading),
            Line::styled(response.result.clone(), result_style),
            Line::raw(""),
            Line::styled("EXPLANATION", heading),
            Line::styled(
                response.explanation.clone(),
                Style::default().fg(Color::Gray),
            ),
        ]
    } else {
        vec![
            Line::raw(""),
            Line::styled("Ask any math question.", Style::default().fg(MUTED)),
            Line::styled(
                "\"What is the square root of 5 + 20?\"",
                Style::default().fg(MUTED),
            ),
        ]
    };
    let answer_alignment = if session.response().is_some() && !session.is_pending() {
        Alignment::Left
    } else {
        Alignment::Center
    };
    frame.render_widget(
        Paragraph::new(body)
            .alignment(answer_alignment)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(MUTED)),
            ),
        chunks[0],
    );

    let input = if session.input().is_empty() {
        Paragraph::new(Line::styled(
            "Type a math problem...",
            Style::default().fg(MUTED),
        ))
    } else {
        Paragraph::new(session.input().to_string())
            .wrap(Wrap { trim: false })
    };
    let border = if session.can_submit() { AI_ACCENT } else { MUTED };
    frame.render_widget(
        input.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        ),
        chunks[1],
    );
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.status() {
        Some(status) => status.to_string(),
        None if app.show_history() => {
            " ↑/↓ scroll  ctrl+d clear  ctrl+o/esc close  ctrl+c quit".to_string()
        }
        None => match app.mode() {
            Mode::Calc => " tab AI  ctrl+o history  ctrl+y copy  q quit".to_string(),
            Mode::Ai => {
                " enter solve  shift+enter newline  esc clear  tab calc  ctrl+c quit".to_string()
            }
        },
    };
    frame.render_widget(
        Paragraph::new(Line::styled(text, Style::default().fg(MUTED))),
        area,
    );
}

fn draw_history(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(4).max(10).min(area.width);
    let height = area.height.saturating_sub(2).max(3).min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let history = app.history().borrow();
    let mut lines = Vec::new();
    if history.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("No history yet", Style::default().fg(MUTED)));
    }
    if app.history_scroll() > 0 {
        lines.push(Line::styled(
            format!("{} newer", app.history_scroll()),
            Style::default().fg(MUTED),
        ));
    }
    for item in history.iter().skip(app.history_scroll()) {
        lines.push(Line::styled(
            item.expression.clone(),
            Style::default().fg(Color::Gray),
        ));
        let mut result = vec![Span::styled(
            item.result.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(label) = item.kind.label() {
            result.push(Span::styled(
                format!("  {}", label),
                Style::default().fg(AI_ACCENT),
            ));
        }
        lines.push(Line::from(result));
        lines.push(Line::raw(""));
    }
    let alignment = if history.is_empty() {
        Alignment::Center
    } else {
        Alignment::Right
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .title(" History ")
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(alignment)
            .wrap(Wrap { trim: false })
            .block(block),
        popup,
    );
}
