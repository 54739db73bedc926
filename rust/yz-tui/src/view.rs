//! Per-mode drawing. Reads the engine, never mutates it.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use yz_core::{Category, Mode, Outcome, Player, HOW_TO_PLAY, NUM_DICE};

use crate::keys::help_line;
use crate::App;

const COL: usize = 16;

fn title(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn dim(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(Color::DarkGray))
}

pub(crate) fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(f.area());

    let mode = app.engine().mode();
    match mode {
        Mode::ModeSelection => draw_menu(f, chunks[0]),
        Mode::NameInput => draw_names(f, app, chunks[0]),
        Mode::HowToPlay => draw_help(f, chunks[0]),
        Mode::Playing => draw_playing(f, app, chunks[0]),
        Mode::GameOver => draw_game_over(f, app, chunks[0]),
    }

    let status = Paragraph::new(Line::from(help_line(mode)))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);
}

fn draw_menu(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Y A T Z Y".to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  [1]  one player"),
        Line::from("  [2]  two players"),
        Line::from(""),
        Line::from("  [h]  how to play"),
        Line::from("  [q]  quit"),
    ];
    let p = Paragraph::new(lines)
        .block(Block::default().title(title("YATZY")).borders(Borders::ALL));
    f.render_widget(p, area);
}

fn draw_names(f: &mut Frame, app: &App, area: Rect) {
    let max = app.engine().config().game.max_name_len;
    let mut lines = vec![Line::from(""), Line::from("  Enter player names:"), Line::from("")];
    for (i, draft) in app.engine().name_drafts().iter().enumerate() {
        let focused = i == app.name_focus();
        let marker = if focused { "  ▸ " } else { "    " };
        let value = if draft.is_empty() {
            dim(format!("(Player {})", i + 1))
        } else {
            Span::styled(
                draft.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        };
        let mut spans = vec![Span::raw(marker), Span::raw(format!("Player {}: ", i + 1)), value];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(dim(format!(
        "  Up to {max} characters. Empty names get a default."
    ))));
    let p = Paragraph::new(lines)
        .block(Block::default().title(title("Players")).borders(Borders::ALL));
    f.render_widget(p, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = HOW_TO_PLAY
        .iter()
        .map(|l| Line::from(format!("  {l}")))
        .collect();
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title("How to play")).borders(Borders::ALL));
    f.render_widget(p, area);
}

fn dice_lines(app: &App) -> Vec<Line<'static>> {
    let Some(p) = app.engine().current_player() else {
        return Vec::new();
    };
    let t = p.turn;
    let mut faces = vec![Span::raw("  ")];
    let mut labels = vec![Span::raw("  ")];
    for i in 0..NUM_DICE {
        let face = if t.hand[i] == 0 {
            " ".to_string()
        } else {
            t.hand[i].to_string()
        };
        let style = if t.held[i] {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        faces.push(Span::styled(format!("[{face}]"), style));
        faces.push(Span::raw(" "));
        labels.push(dim(format!(" {} ", i + 1)));
        labels.push(Span::raw(" "));
    }
    let held: Vec<String> = (0..NUM_DICE)
        .filter(|&i| t.held[i])
        .map(|i| (i + 1).to_string())
        .collect();
    vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Turn: "),
            Span::styled(
                p.name.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(faces),
        Line::from(labels),
        Line::from(""),
        Line::from(format!("  Rolls left: {}", t.rolls_remaining)),
        Line::from(format!(
            "  Held: {}",
            if held.is_empty() { "-".to_string() } else { held.join(" ") }
        )),
    ]
}

fn advice_line(app: &App) -> Line<'static> {
    let e = app.engine();
    if !e.advice_enabled() {
        return Line::from(dim("Roll the dice to get advice."));
    }
    match e.advice_text() {
        Some(text) => Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(Color::Green),
        )),
        None if e.is_advice_loading() => Line::from(dim("Fetching advice...")),
        None => Line::from(dim("Thinking about your next move...")),
    }
}

fn cell(s: String) -> String {
    format!("{s:>COL$}")
}

fn scorecard_lines(app: &App) -> Vec<Line<'static>> {
    let e = app.engine();
    let players = e.players();
    let cur = e.current_turn();
    let playing = e.mode() == Mode::Playing;

    let mut header = format!("  {:<COL$}", "");
    for (i, p) in players.iter().enumerate() {
        let name = if playing && i == cur {
            format!("*{}", p.name)
        } else {
            p.name.clone()
        };
        header.push_str(&cell(name));
    }
    let mut lines = vec![Line::from(Span::styled(
        header,
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for cat in Category::ALL {
        let selected = playing && cat.index() == app.cursor();
        let marker = if selected { "▸ " } else { "  " };
        let mut spans = vec![Span::raw(format!("{marker}{:<COL$}", cat.name()))];
        for (i, p) in players.iter().enumerate() {
            let span = match p.score(cat) {
                Some(v) => Span::raw(cell(v.to_string())),
                None if playing && i == cur => match e.preview(cat) {
                    Some(v) => Span::styled(
                        cell(format!("({v})")),
                        Style::default().fg(Color::Yellow),
                    ),
                    None => dim(cell("-".to_string())),
                },
                None => dim(cell("-".to_string())),
            };
            spans.push(span);
        }
        let mut line = Line::from(spans);
        if selected {
            line = line.style(Style::default().add_modifier(Modifier::REVERSED));
        }
        lines.push(line);
        if cat == Category::Sixes {
            lines.extend(summary_rows(players));
        }
    }
    lines.push(Line::from(""));
    let mut total = format!("  {:<COL$}", "Total");
    for p in players {
        total.push_str(&cell(p.grand_total().to_string()));
    }
    lines.push(Line::from(Span::styled(
        total,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines
}

fn summary_rows(players: &[Player]) -> Vec<Line<'static>> {
    let mut upper = format!("  {:<COL$}", "Upper (63)");
    let mut bonus = format!("  {:<COL$}", "Bonus (+35)");
    for p in players {
        upper.push_str(&cell(p.upper_total().to_string()));
        bonus.push_str(&cell(p.bonus().to_string()));
    }
    vec![Line::from(dim(upper)), Line::from(dim(bonus))]
}

fn draw_playing(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(30)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(3)])
        .split(cols[0]);

    let dice = Paragraph::new(dice_lines(app))
        .block(Block::default().title(title("Dice")).borders(Borders::ALL));
    f.render_widget(dice, left[0]);

    let advice = Paragraph::new(advice_line(app))
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title("Advice")).borders(Borders::ALL));
    f.render_widget(advice, left[1]);

    let card = Paragraph::new(scorecard_lines(app))
        .block(Block::default().title(title("Scorecard")).borders(Borders::ALL));
    f.render_widget(card, cols[1]);
}

fn draw_game_over(f: &mut Frame, app: &App, area: Rect) {
    let e = app.engine();
    let players = e.players();
    let mut lines = vec![Line::from("")];
    for p in players {
        lines.push(Line::from(format!(
            "  {:<COL$} {:>4}   (upper {} + bonus {})",
            p.name,
            p.grand_total(),
            p.upper_total(),
            p.bonus()
        )));
    }
    lines.push(Line::from(""));
    let verdict = match e.outcome() {
        Some(Outcome::Winner(i)) => players
            .get(i)
            .map(|p| format!("  {} wins!", p.name))
            .unwrap_or_default(),
        Some(Outcome::Tie) => "  It's a tie!".to_string(),
        None => String::new(),
    };
    lines.push(Line::from(Span::styled(
        verdict,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(52), Constraint::Min(30)])
        .split(area);
    let p = Paragraph::new(lines)
        .block(Block::default().title(title("Game over")).borders(Borders::ALL));
    f.render_widget(p, cols[0]);
    let card = Paragraph::new(scorecard_lines(app))
        .block(Block::default().title(title("Scorecard")).borders(Borders::ALL));
    f.render_widget(card, cols[1]);
}
