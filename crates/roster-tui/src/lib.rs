// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use roster_app::{
    DialogState, LayoutKind, NavMenuVisibility, Record, RecordId, UiCommand, UiState,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;

const TILE_CARD_WIDTH: u16 = 30;
const TILE_CARD_HEIGHT: u16 = 6;
const NAV_MENU_ENTRIES: [&str; 2] = ["Sub-menu 1", "Sub-menu 2"];

/// Seam between the view and the data source. The real implementation
/// performs one HTTP GET per call; tests substitute canned records.
pub trait AppRuntime {
    fn load_records(&mut self) -> Result<Vec<Record>>;
}

pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Default)]
struct ViewData {
    records: Vec<Record>,
    cursor: usize,
    loaded_at: Option<OffsetDateTime>,
    help_visible: bool,
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(state: &mut UiState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    // Single fetch before the first frame. A failure leaves the list
    // empty and lands on the status line instead of crashing.
    reload_records(state, runtime, &mut view_data, &internal_tx);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(state: &mut UiState, view_data: &ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(UiCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut UiState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(UiCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn reload_records<R: AppRuntime>(
    state: &mut UiState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match runtime.load_records() {
        Ok(records) => {
            view_data.cursor = 0;
            view_data.loaded_at = Some(OffsetDateTime::now_utc());
            let count = records.len();
            view_data.records = records;
            emit_status(state, view_data, internal_tx, format!("{count} records"));
        }
        Err(error) => {
            // Previous contents stay put; on first load that is an empty list.
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("load failed: {error:#}; press r to retry"),
            );
        }
    }
}

fn handle_key_event<R: AppRuntime>(
    state: &mut UiState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.dialog.is_open() {
        handle_dialog_key(state, view_data, internal_tx, key);
        return false;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    if state.selected.is_some() {
        if key.code == KeyCode::Esc {
            state.dispatch(UiCommand::ClearDetail);
        }
        return false;
    }

    if state.nav_menu == NavMenuVisibility::Visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('m')) {
            state.dispatch(UiCommand::ToggleNavMenu);
            return false;
        }
        // Any other gesture closes the menu and still performs its own action.
        state.dispatch(UiCommand::OutsideInteraction);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('m'), KeyModifiers::NONE) => {
            state.dispatch(UiCommand::ToggleNavMenu);
        }
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            state.dispatch(UiCommand::SelectLayout(LayoutKind::Grid));
        }
        (KeyCode::Char('t'), KeyModifiers::NONE) => {
            state.dispatch(UiCommand::SelectLayout(LayoutKind::Tile));
        }
        (KeyCode::Char('j') | KeyCode::Down, _) => move_cursor(view_data, 1),
        (KeyCode::Char('k') | KeyCode::Up, _) => move_cursor(view_data, -1),
        (KeyCode::Enter, _) => {
            if let Some(id) = record_id_at_cursor(view_data) {
                state.dispatch(UiCommand::OpenDetail(id));
            }
        }
        (KeyCode::Char('.'), KeyModifiers::NONE) => {
            if let Some(id) = record_id_at_cursor(view_data) {
                state.dispatch(UiCommand::ToggleInlineMenu(id));
            }
        }
        (KeyCode::Char('e'), KeyModifiers::NONE) => {
            if let Some(id) = state.inline_menu {
                state.dispatch(UiCommand::RequestEdit(id));
            }
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) => {
            if let Some(id) = state.inline_menu {
                state.dispatch(UiCommand::RequestDelete(id));
            }
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => {
            reload_records(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('?'), KeyModifiers::NONE) => {
            view_data.help_visible = true;
        }
        (KeyCode::Esc, _) => {
            if let Some(id) = state.inline_menu {
                state.dispatch(UiCommand::ToggleInlineMenu(id));
            }
        }
        _ => {}
    }

    false
}

fn handle_dialog_key(
    state: &mut UiState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            let stub = match state.dialog {
                DialogState::ConfirmDelete(_) => "delete is a stub; nothing was changed",
                DialogState::Edit(_) => "edit is a stub; nothing was changed",
                DialogState::Closed => return,
            };
            state.dispatch(UiCommand::ConfirmDialog);
            emit_status(state, view_data, internal_tx, stub);
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            state.dispatch(UiCommand::DismissDialog);
        }
        _ => {}
    }
}

fn move_cursor(view_data: &mut ViewData, delta: isize) {
    if view_data.records.is_empty() {
        view_data.cursor = 0;
        return;
    }
    let last = view_data.records.len() - 1;
    let next = view_data.cursor.saturating_add_signed(delta);
    view_data.cursor = next.min(last);
}

fn record_id_at_cursor(view_data: &ViewData) -> Option<RecordId> {
    view_data.records.get(view_data.cursor).map(|record| record.id)
}

fn record_by_id(view_data: &ViewData, id: RecordId) -> Option<&Record> {
    view_data.records.iter().find(|record| record.id == id)
}

fn render(frame: &mut ratatui::Frame<'_>, state: &UiState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let selected = LayoutKind::ALL
        .iter()
        .position(|layout| *layout == state.layout)
        .unwrap_or(0);
    let tabs = Tabs::new(LayoutKind::ALL.map(LayoutKind::label).to_vec())
        .block(Block::default().title("roster").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    match state.layout {
        LayoutKind::Grid => render_grid(frame, layout[1], state, view_data),
        LayoutKind::Tile => render_tiles(frame, layout[1], state, view_data),
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if state.nav_menu == NavMenuVisibility::Visible {
        let area = nav_menu_rect(frame.area());
        frame.render_widget(Clear, area);
        let menu = Paragraph::new(NAV_MENU_ENTRIES.join("\n"))
            .block(Block::default().title("menu").borders(Borders::ALL));
        frame.render_widget(menu, area);
    }

    if let Some(record) = state.selected.and_then(|id| record_by_id(view_data, id)) {
        let area = centered_rect(60, 62, frame.area());
        frame.render_widget(Clear, area);
        let detail = Paragraph::new(detail_text(record)).block(
            Block::default()
                .title(record.name.clone())
                .borders(Borders::ALL),
        );
        frame.render_widget(detail, area);
    }

    if state.dialog.is_open() {
        let area = centered_rect(46, 22, frame.area());
        frame.render_widget(Clear, area);
        let dialog = Paragraph::new(dialog_text(state.dialog, view_data)).block(
            Block::default()
                .title(dialog_title(state.dialog))
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(dialog, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 64, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_grid(frame: &mut ratatui::Frame<'_>, area: Rect, state: &UiState, view_data: &ViewData) {
    let header = Row::new(
        GRID_COLUMNS.iter().map(|label| {
            Cell::from(*label).style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        }),
    );

    let rows = view_data.records.iter().enumerate().map(|(index, record)| {
        let mut style = Style::default();
        if index == view_data.cursor {
            style = style.bg(Color::DarkGray);
        }
        Row::new(grid_row(record).into_iter().map(Cell::from)).style(style)
    });

    let widths = vec![Constraint::Min(8); GRID_COLUMNS.len()];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(body_title(state.layout, view_data))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn render_tiles(frame: &mut ratatui::Frame<'_>, area: Rect, state: &UiState, view_data: &ViewData) {
    let outer = Block::default()
        .title(body_title(state.layout, view_data))
        .borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if view_data.records.is_empty() || inner.width == 0 || inner.height == 0 {
        return;
    }

    let per_row = (inner.width / TILE_CARD_WIDTH).max(1) as usize;
    for (chunk_index, chunk) in view_data.records.chunks(per_row).enumerate() {
        let y = inner.y + chunk_index as u16 * TILE_CARD_HEIGHT;
        if y + TILE_CARD_HEIGHT > inner.y + inner.height {
            break;
        }
        for (slot, record) in chunk.iter().enumerate() {
            let index = chunk_index * per_row + slot;
            let card_area = Rect {
                x: inner.x + slot as u16 * TILE_CARD_WIDTH,
                y,
                width: TILE_CARD_WIDTH.min(inner.width - slot as u16 * TILE_CARD_WIDTH),
                height: TILE_CARD_HEIGHT,
            };
            let mut block = Block::default()
                .title(record.name.clone())
                .borders(Borders::ALL);
            if index == view_data.cursor {
                block = block.style(Style::default().fg(Color::Cyan));
            }
            let body = tile_card_text(record, state.inline_menu == Some(record.id));
            frame.render_widget(Paragraph::new(body).block(block), card_area);
        }
    }
}

const GRID_COLUMNS: [&str; 7] = [
    "name", "email", "username", "phone", "website", "company", "city",
];

fn grid_row(record: &Record) -> Vec<String> {
    vec![
        record.name.clone(),
        record.email.clone(),
        record.username.clone(),
        record.phone.clone(),
        record.website.clone(),
        record.company_name.clone(),
        record.address.city.clone(),
    ]
}

fn tile_card_text(record: &Record, inline_menu_open: bool) -> String {
    let mut lines = vec![record.email.clone()];
    if inline_menu_open {
        lines.push("e) edit".to_owned());
        lines.push("d) delete".to_owned());
    } else {
        lines.push(". actions".to_owned());
    }
    lines.join("\n")
}

fn detail_text(record: &Record) -> String {
    [
        format!("email:    {}", record.email),
        format!("username: {}", record.username),
        format!("phone:    {}", record.phone),
        format!("website:  {}", record.website),
        format!("company:  {}", record.company_name),
        format!("city:     {}", record.address.city),
        format!("street:   {}", record.address.street),
        format!("suite:    {}", record.address.suite),
        format!("zipcode:  {}", record.address.zipcode),
        String::new(),
        "esc to close".to_owned(),
    ]
    .join("\n")
}

fn dialog_title(dialog: DialogState) -> &'static str {
    match dialog {
        DialogState::ConfirmDelete(_) => "confirm delete",
        DialogState::Edit(_) => "edit record",
        DialogState::Closed => "",
    }
}

fn dialog_text(dialog: DialogState, view_data: &ViewData) -> String {
    let name = |id: RecordId| {
        record_by_id(view_data, id)
            .map(|record| record.name.clone())
            .unwrap_or_else(|| format!("record {}", id.get()))
    };
    match dialog {
        DialogState::ConfirmDelete(id) => {
            format!(
                "Are you sure you want to delete {}?\n\ny confirm / n cancel",
                name(id)
            )
        }
        DialogState::Edit(id) => {
            format!("Editing details for {}...\n\ny confirm / n cancel", name(id))
        }
        DialogState::Closed => String::new(),
    }
}

fn body_title(layout: LayoutKind, view_data: &ViewData) -> String {
    format!("{} ({})", layout.label(), view_data.records.len())
}

fn status_text(state: &UiState, view_data: &ViewData) -> String {
    if let Some(message) = &state.status_line {
        return message.clone();
    }

    let loaded = view_data
        .loaded_at
        .and_then(|stamp| {
            stamp
                .format(&time::macros::format_description!(
                    "[hour]:[minute]:[second]"
                ))
                .ok()
        })
        .map(|stamp| format!(" · loaded {stamp} UTC"))
        .unwrap_or_default();
    format!(
        "{} records{loaded} · g/t layout · m menu · ? help",
        view_data.records.len()
    )
}

fn help_overlay_text() -> String {
    [
        "g / t        grid or tile layout",
        "j / k        move between records",
        "enter        open record detail",
        ".            toggle the record's action menu",
        "e / d        edit or delete from the action menu",
        "y / n        confirm or cancel a dialog",
        "m            toggle the navigation menu",
        "r            reload from the directory",
        "esc          close the topmost overlay",
        "ctrl-q       quit",
    ]
    .join("\n")
}

// Anchored to the top-right corner, over the tab bar.
fn nav_menu_rect(frame_area: Rect) -> Rect {
    let width = frame_area.width.min(18);
    let height = frame_area.height.min(NAV_MENU_ENTRIES.len() as u16 + 2);
    Rect {
        x: frame_area.x + frame_area.width.saturating_sub(width),
        y: frame_area.y,
        width,
        height,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
