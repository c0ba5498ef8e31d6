/*
[INPUT]:  AppState task list, selection, and focus
[OUTPUT]: Task rows with status badge and per-row controls, or the empty placeholder
[POS]:    TUI UI task list rendering
[UPDATE]: When changing row layout or status colors
*/

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use action_engine::{Task, TaskStatus};

use crate::tui::app::{AppState, Focus};
use crate::tui::runtime::{border_style, focused_border_style};

const EMPTY_PLACEHOLDER: &str = "No tasks yet. Add a task to get started!";
const HIGHLIGHT_SYMBOL: &str = "> ";
const EXECUTE_CONTROL: &str = "[e] Execute";
const DELETE_CONTROL: &str = "[d] Delete";
// " EXECUTING " is the widest badge
const BADGE_WIDTH: usize = 11;

pub(in crate::tui) fn draw_task_list(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::List {
            focused_border_style()
        } else {
            border_style()
        })
        .title(format!("Tasks ({})", app.controller.len()));

    if app.controller.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            EMPTY_PLACEHOLDER,
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let row_width = (area.width as usize).saturating_sub(2 + HIGHLIGHT_SYMBOL.len());
    let items = app
        .controller
        .tasks()
        .iter()
        .map(|task| ListItem::new(task_row(task, row_width)))
        .collect::<Vec<_>>();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

pub(in crate::tui) fn status_color(status: TaskStatus) -> Color {
    let (r, g, b) = status.badge_rgb();
    Color::Rgb(r, g, b)
}

fn task_row(task: &Task, row_width: usize) -> Line<'static> {
    let status = task.status();
    let badge = format!("{:^width$}", status.badge(), width = BADGE_WIDTH);
    let badge_style = Style::default()
        .fg(Color::White)
        .bg(status_color(status))
        .add_modifier(Modifier::BOLD);

    let mut controls = Vec::new();
    if status.can_execute() {
        controls.push(Span::styled(
            format!("  {EXECUTE_CONTROL}"),
            Style::default().fg(status_color(TaskStatus::Completed)),
        ));
    }
    controls.push(Span::styled(
        format!("  {DELETE_CONTROL}"),
        Style::default().fg(Color::Rgb(0xef, 0x44, 0x44)),
    ));
    let controls_width: usize = controls.iter().map(|span| span.content.width()).sum();

    let text_budget = row_width.saturating_sub(BADGE_WIDTH + 1 + controls_width);
    let text = truncate_to_width(task.text(), text_budget);
    let padding = " ".repeat(text_budget.saturating_sub(text.width()));

    let mut spans = vec![
        Span::styled(badge, badge_style),
        Span::raw(" "),
        Span::raw(text),
        Span::raw(padding),
    ];
    spans.extend(controls);
    Line::from(spans)
}

/// Cut `text` to at most `max_width` display columns, marking the cut with `…`.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
