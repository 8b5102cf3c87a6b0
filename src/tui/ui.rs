//! Stateless UI rendering for the memory board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_memory::{CardSlot, GameSession, Phase, PlayerId, Scheduler};

use super::app::App;

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;

/// Renders the whole screen.
pub fn draw<S: Scheduler>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Counters
            Constraint::Min(6),    // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Strictly Match - Memory")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_counters(frame, chunks[1], app.session());
    draw_board(frame, chunks[2], app);

    let status = Paragraph::new(status_line(app))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = format!(
        "←↑↓→ move  Enter flip  s new game ({} pairs, {})  p size  t mode  r replay  m sound  q quit",
        app.next_pairs(),
        if app.next_two_player() { "2P" } else { "1P" }
    );
    frame.render_widget(
        Paragraph::new(help)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[4],
    );
}

fn draw_counters<S>(frame: &mut Frame, area: Rect, session: &GameSession<S>) {
    let aggregates = session.aggregates();
    let sound_icon = if session.sound_enabled() { "🔊" } else { "🔇" };
    let mut spans = vec![
        Span::raw(format!("Moves: {}  ", session.move_count())),
        Span::raw(format!(
            "Pairs: {}/{}  ",
            session.matched_count(),
            session.pairs()
        )),
        Span::styled(
            format!("Wins: {}  ", aggregates.wins()),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("Losses: {}  ", aggregates.losses()),
            Style::default().fg(Color::Red),
        ),
        Span::raw(format!("Games: {}  ", aggregates.games_played())),
        Span::raw(sound_icon),
    ];
    if let Some(note) = session.turn_note() {
        let scores = session.scores();
        spans.push(Span::styled(
            format!(
                "   {}  (P1 {} : P2 {})",
                note,
                scores.get(PlayerId::One),
                scores.get(PlayerId::Two)
            ),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    }

    let counters = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(counters, area);
}

fn draw_board<S: Scheduler>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let board = app.session().board();
    let columns = app.columns().max(1);
    let rows = board.len().div_ceil(columns);

    let width = (columns as u16).saturating_mul(CELL_WIDTH);
    let height = (rows as u16).saturating_mul(CELL_HEIGHT);
    let board_area = center_rect(area, width, height);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); rows])
        .split(board_area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CELL_WIDTH); columns])
            .split(*row_area);
        for (col, cell) in cells.iter().enumerate() {
            let position = row * columns + col;
            if let Some(slot) = board.get(position) {
                draw_card(frame, *cell, slot, position == app.cursor());
            }
        }
    }
}

fn draw_card(frame: &mut Frame, area: Rect, slot: &CardSlot, selected: bool) {
    let (r, g, b) = slot.identity().rgb();
    let color = Color::Rgb(r, g, b);

    let (label, style) = if *slot.matched() {
        (" ✓ ", Style::default().bg(color).fg(Color::Black))
    } else if *slot.face_up() {
        ("   ", Style::default().bg(color))
    } else if *slot.disabled() {
        (" · ", Style::default().fg(Color::DarkGray))
    } else {
        (" ? ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    };

    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let card = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(card, area);
}

fn status_line<S: Scheduler>(app: &App<S>) -> String {
    let session = app.session();
    match (session.phase(), session.message()) {
        (Phase::Won(_) | Phase::Lost, Some(message)) => {
            format!("{}  Press 'r' to replay or 's' for a new game.", message)
        }
        _ => format!(
            "{}  ({} moves left)",
            app.status_message(),
            session.moves_remaining()
        ),
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
