use std::{io, ops::ControlFlow, sync::Arc};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
};
use parking_lot::Mutex;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table},
};
use tokio::sync::{Mutex as AsyncMutex, mpsc};

use crate::{
    controller::{
        clipboard::Clipboard,
        dispatch::Interaction,
        notification::{Notification, NotificationKind},
        prompt::Prompt,
    },
    view::{
        locale::Messages,
        page::{ActionKind, ClickTarget, Field, LinkRow, Page, TableRow},
    },
};

pub const HELP: &str =
    "shorten <url> [code] | copy | delete <code> | dismiss <n> | help | quit    (Ctrl-C exits)";

/// What the bottom of the screen shows: the line being typed, the pending
/// confirmation question and the last console message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub text: String,
    pub question: Option<String>,
    pub status: String,
}

/// Keyboard-driven console. Completed lines feed both the command loop and
/// the confirmation dialog.
pub struct Console {
    line: Mutex<InputLine>,
    sender: mpsc::UnboundedSender<String>,
    receiver: AsyncMutex<mpsc::UnboundedReceiver<String>>,
}

impl Console {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Console {
            line: Mutex::new(InputLine {
                text: String::new(),
                question: None,
                status: HELP.to_string(),
            }),
            sender,
            receiver: AsyncMutex::new(receiver),
        }
    }

    /// Applies a key press to the input line. Breaks when the user asks to
    /// leave.
    pub fn on_key(&self, key: KeyEvent) -> ControlFlow<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            return ControlFlow::Break(());
        }

        let mut line = self.line.lock();
        match key.code {
            KeyCode::Enter => {
                let text = std::mem::take(&mut line.text);
                line.status = HELP.to_string();
                if self.sender.send(text).is_err() {
                    tracing::warn!("Console input closed; dropping line");
                }
            }
            KeyCode::Backspace => {
                line.text.pop();
            }
            KeyCode::Esc => line.text.clear(),
            KeyCode::Char(c) => line.text.push(c),
            _ => {}
        }
        ControlFlow::Continue(())
    }

    pub async fn next_line(&self) -> Option<String> {
        self.receiver.lock().await.recv().await
    }

    pub fn set_status(&self, status: impl Into<String>) {
        self.line.lock().status = status.into();
    }

    pub fn input_line(&self) -> InputLine {
        self.line.lock().clone()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for Arc<Console> {
    async fn confirm(&self, message: &str) -> bool {
        self.line.lock().question = Some(format!("{} [y/N]", message));
        let answer = self.next_line().await;
        self.line.lock().question = None;
        answer.is_some_and(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

impl Clipboard for Arc<Console> {
    async fn write_text(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Print(osc52_sequence(text)))
    }
}

/// OSC 52 escape asking the terminal to set its clipboard.
fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

#[derive(Debug, Parser)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
struct ConsoleLine {
    #[command(subcommand)]
    command: ConsoleCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ConsoleCommand {
    /// Create a short link, optionally with a custom code
    Shorten { url: Option<String>, code: Option<String> },
    /// Copy the last created short link
    Copy,
    /// Delete a short link
    Delete { code: String },
    /// Dismiss a notification by its position on screen, starting at 1
    Dismiss { position: usize },
    Help,
    #[command(alias = "exit")]
    Quit,
}

impl ConsoleCommand {
    /// The surface interactions this command stands for. Commands that only
    /// concern the console stand for none.
    pub fn interactions(&self, page: &Page) -> Vec<Interaction> {
        match self {
            ConsoleCommand::Shorten { url, code } => vec![
                Interaction::Input {
                    field: Field::LongUrl,
                    value: url.clone().unwrap_or_default(),
                },
                Interaction::Input {
                    field: Field::CustomCode,
                    value: code.clone().unwrap_or_default(),
                },
                Interaction::Submit,
            ],
            ConsoleCommand::Copy => page
                .result
                .as_ref()
                .and_then(|result| result.copy.clone())
                .map(Interaction::Click)
                .into_iter()
                .collect(),
            ConsoleCommand::Delete { code } => vec![Interaction::Click(ClickTarget::action(
                ActionKind::Delete,
                code.clone(),
            ))],
            ConsoleCommand::Dismiss { .. } | ConsoleCommand::Help | ConsoleCommand::Quit => {
                Vec::new()
            }
        }
    }
}

/// Parses one console line. A blank line is no command.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, clap::Error> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    ConsoleLine::try_parse_from(line.split_whitespace()).map(|parsed| Some(parsed.command))
}

/// First line of a clap error, short enough for the status bar.
pub fn usage_error(err: &clap::Error) -> String {
    err.to_string().lines().next().unwrap_or_default().to_string()
}

/// Draws notifications first, then the result panel, counters, the links
/// table and the input line.
pub fn draw(
    frame: &mut Frame<'_>,
    page: &Page,
    notifications: &[Notification],
    messages: &Messages,
    input: &InputLine,
) {
    let created = page.result.as_ref().and_then(|r| r.created.as_ref());
    let [notices_area, result_area, counters_area, table_area, input_area] = Layout::vertical([
        Constraint::Length(notifications.len() as u16),
        Constraint::Length(if created.is_some() { 3 } else { 0 }),
        Constraint::Length(if page.counters.is_some() { 1 } else { 0 }),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    render_notifications(frame, notices_area, notifications);

    if let Some(created) = created {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{}: ", messages.short_link_label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(created.short_url.as_str()),
            ]),
            Line::from(format!("{}: {}", messages.long_link_label, created.long_url)),
            Line::from(Span::styled(
                format!("[{}] copy", messages.copy_label),
                Style::default().fg(Color::Cyan),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), result_area);
    }

    if let Some(counters) = page.counters.as_ref() {
        let line = format!(
            "{}: {}    {}: {}",
            messages.total_links_label,
            counters.total_links,
            messages.total_hits_label,
            counters.total_hits
        );
        frame.render_widget(Paragraph::new(line), counters_area);
    }

    if let Some(table) = page.table.as_ref() {
        render_links(frame, table_area, &table.rows, messages);
    }

    render_input(frame, input_area, page, input);
}

fn render_notifications(frame: &mut Frame<'_>, area: Rect, notifications: &[Notification]) {
    let items: Vec<ListItem> = notifications
        .iter()
        .enumerate()
        .map(|(i, notification)| {
            let (tag, color) = match notification.kind {
                NotificationKind::Success => ("ok", Color::Green),
                NotificationKind::Error => ("error", Color::Red),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}. [{}] ", i + 1, tag), Style::default().fg(color)),
                Span::raw(notification.message.as_str()),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), area);
}

fn render_links(frame: &mut Frame<'_>, area: Rect, rows: &[TableRow], messages: &Messages) {
    let block = Block::default().borders(Borders::TOP);

    let links: Vec<&LinkRow> = rows
        .iter()
        .filter_map(|row| match row {
            TableRow::Link(link) => Some(link),
            TableRow::Placeholder(_) => None,
        })
        .collect();
    if links.is_empty() {
        let placeholder: Vec<Line> = rows
            .iter()
            .filter_map(|row| match row {
                TableRow::Placeholder(text) => Some(Line::from(text.as_str())),
                TableRow::Link(_) => None,
            })
            .collect();
        frame.render_widget(Paragraph::new(placeholder).block(block), area);
        return;
    }

    let header = Row::new([
        messages.short_link_label,
        messages.long_link_label,
        messages.hits_label,
        messages.created_at_label,
        "",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));
    let body = links.into_iter().map(|link| {
        Row::new([
            link.short_url.clone(),
            link.long_url_display.clone(),
            link.hit_count.to_string(),
            link.created_at.clone(),
            format!("[{} {}]", messages.delete_label, link.code),
        ])
    });
    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Length(6),
        Constraint::Length(22),
        Constraint::Length(16),
    ];
    frame.render_widget(Table::new(body, widths).header(header).block(block), area);
}

fn render_input(frame: &mut Frame<'_>, area: Rect, page: &Page, input: &InputLine) {
    let prefix = match input.question.as_deref() {
        Some(question) => format!("{} ", question),
        None => "> ".to_string(),
    };
    let status = match page.form.as_ref() {
        Some(form) if form.submit.disabled => form.submit.label.as_str(),
        _ => input.status.as_str(),
    };
    let lines = vec![
        Line::from(format!("{}{}", prefix, input.text)),
        Line::from(Span::styled(status, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP)),
        area,
    );

    let cursor_x = area.x + (prefix.chars().count() + input.text.chars().count()) as u16;
    frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y + 1));
}
