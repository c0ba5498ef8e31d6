/*
[INPUT]:  Frame area
[OUTPUT]: Title and subtitle banner
[POS]:    TUI UI header rendering
[UPDATE]: When changing product copy
*/

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::runtime::border_style;

const TITLE: &str = "Action Engine";
const SUBTITLE: &str = "Execute tasks, automate workflows, and extend your reach";

pub(in crate::tui) fn draw_header(frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
    let title = Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    let subtitle = Line::from(Span::styled(
        SUBTITLE,
        Style::default().fg(Color::Rgb(0xe0, 0xe7, 0xff)),
    ));

    let widget = Paragraph::new(Text::from(vec![title, subtitle]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style()),
        );
    frame.render_widget(widget, area);
}
