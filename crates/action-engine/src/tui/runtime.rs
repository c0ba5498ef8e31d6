/*
[INPUT]:  TaskListController, crossterm input events, completion timers, log buffer
[OUTPUT]: Ratatui-based TUI run loop and frame composition
[POS]:    TUI runtime loop and shared style helpers
[UPDATE]: When changing TUI layout, keybindings, or loop scheduling
*/

use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use action_engine::logging::LogBufferHandle;
use action_engine::{EngineConfig, TaskListController};

use super::app::{AppState, Focus};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::{draw_header, draw_input, draw_logs, draw_task_list};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

enum UiEvent {
    Input(CrosstermEvent),
}

/// Run the interactive session until the user quits or `shutdown` fires.
///
/// Input, timer completions and redraw ticks are all handled on this one
/// task, so every controller mutation is serialized.
pub async fn run_tui(
    controller: TaskListController,
    config: &EngineConfig,
    log_buffer: LogBufferHandle,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = shutdown.child_token();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    if event_tx.send(UiEvent::Input(event)).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut app = AppState::new(controller, log_buffer, config.ui.show_logs);
    let mut tick = tokio::time::interval(config.tick_interval());
    let mut should_quit = false;
    tracing::info!("ui started");

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {}
            _ = shutdown.cancelled() => {
                should_quit = true;
            }
            completed = app.controller.next_completion() => {
                if let Some(id) = completed {
                    app.complete(id);
                }
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) => {
                        if handle_key_event(&mut app, key) {
                            should_quit = true;
                        }
                    }
                    Some(UiEvent::Input(_)) => {}
                    None => should_quit = true,
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    app.controller.shutdown();
    tracing::info!(remaining = app.controller.len(), "ui stopped");
    Ok(())
}

pub(super) fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(area);

    draw_header(frame, layout[0]);
    draw_input(frame, layout[1], app);

    if app.show_logs {
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[2]);
        draw_task_list(frame, middle[0], app);
        draw_logs(frame, middle[1], &app.log_buffer);
    } else {
        draw_task_list(frame, layout[2], app);
    }

    draw_footer(frame, layout[3], app);
}

fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line1 = match app.focus {
        Focus::Input => Line::from(vec![
            Span::styled("[Enter]", key_style),
            Span::raw(" Add Task  "),
            Span::styled("[Tab]", key_style),
            Span::raw(" Tasks  "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Quit"),
        ]),
        Focus::List => Line::from(vec![
            Span::styled("[Up/Down]", key_style),
            Span::raw(" Select  "),
            Span::styled("[e]", key_style),
            Span::raw(" Execute  "),
            Span::styled("[d]", key_style),
            Span::raw(" Delete  "),
            Span::styled("[i]", key_style),
            Span::raw(" Input  "),
            Span::styled("[l]", key_style),
            Span::raw(" Logs  "),
            Span::styled("[q]", key_style),
            Span::raw(" Quit"),
        ]),
    };
    let line2 = Line::from(format!("Status: {}", app.status_message));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(vec![line1, line2]))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn focused_border_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}
