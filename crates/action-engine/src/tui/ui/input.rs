/*
[INPUT]:  Controller input buffer and current focus
[OUTPUT]: Task input box with placeholder and cursor
[POS]:    TUI UI input rendering
[UPDATE]: When changing input box presentation
*/

use ratatui::layout::Position;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{AppState, Focus};
use crate::tui::runtime::{border_style, focused_border_style};

const PLACEHOLDER: &str = "Enter a task to execute...";

pub(in crate::tui) fn draw_input(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState,
) {
    let focused = app.focus == Focus::Input;
    let input = app.controller.input();

    let line = if input.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(input)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            focused_border_style()
        } else {
            border_style()
        })
        .title("New Task")
        .title_bottom(Line::from(" [Enter] Add Task ").right_aligned());
    let inner = block.inner(area);

    // keep the cursor in view for long input; text width is unbounded
    let width = input.width();
    let visible = usize::from(inner.width.saturating_sub(1));
    let scroll = u16::try_from(width.saturating_sub(visible)).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(line).block(block).scroll((0, scroll)), area);

    if focused {
        let cursor = u16::try_from(width.min(visible)).unwrap_or(0);
        frame.set_cursor_position(Position::new(inner.x.saturating_add(cursor), inner.y));
    }
}
