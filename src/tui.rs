//! TUI (Terminal User Interface) front end.
//!
//! Renders the board, the coloured keyboard, and the current settings with
//! Ratatui, and turns crossterm key events into session [`Input`]s.
//!
//! # Event loop
//! Each pass draws the session, waits briefly for a terminal event, hands it
//! to the session, then drains whatever the service worker has posted in the
//! meantime. Nothing blocks on the network, so the screen keeps redrawing
//! while a word is being fetched or checked.

use crate::evaluator::Classification;
use crate::game_state::{CursorMove, GameRound, Phase};
use crate::i18n::Catalog;
use crate::keyboard::{KeyboardState, QWERTY_ROWS};
use crate::session::{GameEvent, GameInterface, GamePhase, Input, Notice, Session};
use crate::settings::GameSettings;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const NOTICE_WIDTH: u16 = 44;
const NOTICE_HEIGHT: u16 = 5;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const CURSOR_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::White)
    .add_modifier(Modifier::BOLD);

/// Background and foreground for a cell or key.
fn colors(state: Option<Classification>) -> (Color, Color) {
    match state {
        None => (Color::DarkGray, Color::White),
        Some(Classification::Correct) => (Color::Green, Color::Black),
        Some(Classification::WrongPosition) => (Color::Yellow, Color::Black),
        Some(Classification::Absent) => (Color::Gray, Color::White),
    }
}

fn cell_style(state: Option<Classification>) -> Style {
    let (bg, fg) = colors(state);
    Style::default().fg(fg).bg(bg)
}

/// What a key press means to the front end.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Game(Input),
}

/// Translates a key press. `notice_open` turns every key but Esc, Ctrl-C
/// and the F2-F5 settings keys into a dismissal.
pub fn map_key(key: KeyEvent, notice_open: bool, settings: &GameSettings) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Esc => return Some(KeyAction::Quit),
        KeyCode::Char('c') if ctrl => return Some(KeyAction::Quit),
        KeyCode::F(2) => return Some(KeyAction::Game(Input::NewWord)),
        KeyCode::F(3) => {
            let language = settings.next_language().to_string();
            return Some(KeyAction::Game(Input::SetLanguage(language)));
        }
        KeyCode::F(4) => {
            return Some(KeyAction::Game(Input::SetWordLength(settings.next_word_length())));
        }
        KeyCode::F(5) => {
            return Some(KeyAction::Game(Input::SetDifficulty(settings.difficulty.next())));
        }
        _ => {}
    }
    if notice_open {
        return Some(KeyAction::Game(Input::Dismiss));
    }
    let input = match key.code {
        // Garbage from escape sequences (e.g. alt-tab) shows up as these.
        KeyCode::Char(c)
            if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD || ctrl || alt =>
        {
            return None;
        }
        KeyCode::Char(c) => Input::Letter(c),
        KeyCode::Backspace => Input::Backspace,
        KeyCode::Delete => Input::Delete,
        KeyCode::Left | KeyCode::BackTab => Input::Move(CursorMove::Left),
        KeyCode::Right | KeyCode::Tab => Input::Move(CursorMove::Right),
        KeyCode::Enter => Input::Submit,
        _ => return None,
    };
    Some(KeyAction::Game(input))
}

/// Everything a frame needs, borrowed for the duration of one draw.
struct RenderContext<'a> {
    session: &'a Session,
    catalog: &'a Catalog,
}

impl RenderContext<'_> {
    fn text<'k>(&'k self, key: &'k str) -> &'k str {
        self.catalog.text(&self.session.settings().language, key)
    }
}

/// Full-screen terminal interface.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, cursor::Hide)?;
        info_log!("Terminal setup complete: alternate screen, bracketed paste, cursor hidden");
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self, session: &Session, catalog: &Catalog) -> Result<(), io::Error> {
        let ctx = RenderContext { session, catalog };
        self.terminal.draw(|f| {
            render(f, &ctx);
        })?;
        Ok(())
    }

    /// Waits up to one poll interval for a terminal event and applies it.
    /// Returns `false` once the player asked to quit.
    fn handle_terminal_event(session: &mut Session) -> Result<bool, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(true);
        }
        match event::read()? {
            Event::Key(key) => {
                debug_log!("handle_terminal_event() - key {:?} {:?}", key.code, key.modifiers);
                match map_key(key, session.notice().is_some(), session.settings()) {
                    Some(KeyAction::Quit) => {
                        info_log!("handle_terminal_event() - quit requested");
                        return Ok(false);
                    }
                    Some(KeyAction::Game(input)) => session.handle(GameEvent::Input(input)),
                    None => {}
                }
            }
            Event::Paste(text) => session.handle(GameEvent::Input(Input::Paste(text))),
            other => {
                debug_log!("handle_terminal_event() - ignoring {:?}", other);
            }
        }
        Ok(true)
    }
}

impl GameInterface for TuiInterface {
    fn run(
        &mut self,
        session: &mut Session,
        events: &Receiver<GameEvent>,
        catalog: &Catalog,
    ) -> io::Result<()> {
        info_log!("TuiInterface::run() - entering event loop");
        loop {
            self.draw(session, catalog)?;
            if !Self::handle_terminal_event(session)? {
                break;
            }
            while let Ok(event) = events.try_recv() {
                session.handle(event);
            }
        }
        Ok(())
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[allow(clippy::cast_possible_truncation)]
fn board_height(session: &Session) -> u16 {
    let rows = session
        .round()
        .map_or(session.settings().max_tries(), GameRound::max_tries);
    rows as u16 * ROW_SPACING + 1
}

fn render(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                          // Title
            Constraint::Length(3),                          // Settings
            Constraint::Length(board_height(ctx.session)),  // Board
            Constraint::Length(7),                          // Keyboard
            Constraint::Length(3),                          // Status
            Constraint::Min(4),                             // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0], ctx);
    render_settings(f, chunks[1], ctx);
    render_board(f, chunks[2], ctx);
    render_keyboard(f, chunks[3], ctx.session.keyboard());
    render_status(f, chunks[4], ctx);
    render_instructions(f, chunks[5], ctx);
    if let Some(notice) = ctx.session.notice() {
        render_notice(f, notice, ctx);
    }
}

fn render_title(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let title = Paragraph::new(ctx.text("title"))
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_settings(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let settings = ctx.session.settings();
    let tier = format!("difficulty-levels.{}", settings.difficulty.key());
    let line = Line::from(vec![
        Span::styled(format!("{}: ", ctx.text("language")), INFO_STYLE),
        Span::raw(format!("{}   ", settings.language)),
        Span::styled(format!("{}: ", ctx.text("wordLength")), INFO_STYLE),
        Span::raw(format!("{}   ", settings.word_length)),
        Span::styled(format!("{}: ", ctx.text("difficulty")), INFO_STYLE),
        Span::raw(ctx.text(&tier).to_string()),
    ]);
    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let block = Block::default().borders(Borders::LEFT | Borders::RIGHT | Borders::TOP);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(round) = ctx.session.round() else {
        let hint = if ctx.session.is_loading() {
            ctx.text("loading").to_string()
        } else {
            format!("F2: {}", ctx.text("generateWord"))
        };
        f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), inner);
        return;
    };

    let editing = matches!(round.phase(), Phase::Collecting | Phase::Validating);
    for index in 0..round.max_tries() {
        let spans: Vec<Span> = if let Some(row) = round.rows().get(index) {
            row.cells()
                .iter()
                .flat_map(|cell| {
                    letter_span(cell.letter.unwrap_or(' '), cell_style(cell.classification))
                })
                .collect()
        } else if index == round.active_index() && editing {
            active_row_spans(round)
        } else {
            (0..round.word_length())
                .flat_map(|_| letter_span(' ', cell_style(None)))
                .collect()
        };
        render_row(f, inner, index, spans);
    }
}

fn active_row_spans(round: &GameRound) -> Vec<Span<'static>> {
    let show_cursor = round.phase() == Phase::Collecting;
    round
        .active_row()
        .cells()
        .iter()
        .enumerate()
        .flat_map(|(i, cell)| {
            let style = if show_cursor && i == round.cursor() {
                CURSOR_STYLE
            } else {
                cell_style(None)
            };
            letter_span(cell.letter.unwrap_or(' '), style)
        })
        .collect()
}

fn letter_span(letter: char, style: Style) -> [Span<'static>; 2] {
    [Span::styled(format!(" {letter} "), style), Span::raw(" ")]
}

#[allow(clippy::cast_possible_truncation)]
fn render_row(f: &mut Frame, area: Rect, index: usize, spans: Vec<Span>) {
    let y = area.y + (index as u16 * ROW_SPACING);
    if y >= area.y + area.height {
        return;
    }
    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(
        paragraph,
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_keyboard(f: &mut Frame, area: Rect, keyboard: &KeyboardState) {
    let key_line = |letters: Vec<char>| {
        let spans: Vec<Span> = letters
            .into_iter()
            .flat_map(|c| letter_span(c, cell_style(keyboard.get(c))))
            .collect();
        Line::from(spans)
    };
    let mut lines: Vec<Line> = QWERTY_ROWS
        .iter()
        .map(|row| key_line(row.chars().collect()))
        .collect();
    let extra = keyboard.extra_letters();
    if !extra.is_empty() {
        lines.push(key_line(extra));
    }
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let session = ctx.session;
    let (text, style) = match session.phase() {
        GamePhase::AwaitingWord if session.is_loading() => {
            (ctx.text("loading").to_string(), MESSAGE_STYLE)
        }
        GamePhase::AwaitingWord => match session.last_error() {
            Some(err) => (format!("{err} - F2 to retry"), ERROR_STYLE),
            None => (format!("F2: {}", ctx.text("generateWord")), MESSAGE_STYLE),
        },
        GamePhase::Collecting => {
            let (row, tries) = session
                .round()
                .map_or((0, 0), |r| (r.active_index() + 1, r.max_tries()));
            (format!("{row} / {tries}"), MESSAGE_STYLE)
        }
        GamePhase::Validating => {
            let guess = session
                .round()
                .map(|r| r.active_row().word())
                .unwrap_or_default();
            (format!("{guess}..."), MESSAGE_STYLE)
        }
        GamePhase::Won => (ctx.text("win").to_string(), SUCCESS_STYLE),
        GamePhase::Lost => {
            let target = session.round().map(GameRound::target).unwrap_or_default();
            (format!("{} {target}", ctx.text("lose")), ERROR_STYLE)
        }
    };
    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let lines = vec![
        Line::from(ctx.text("instructions").to_string()),
        Line::from(Span::styled(
            "ENTER: Submit | ←/→/TAB: Move | BACKSPACE/DEL: Erase | F2: New word | F3: Language | F4: Length | F5: Difficulty | ESC: Quit",
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_notice(f: &mut Frame, notice: &Notice, ctx: &RenderContext) {
    let area = f.area();
    let width = NOTICE_WIDTH.min(area.width);
    let height = NOTICE_HEIGHT.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    let message = match notice {
        Notice::WordNotFound(word) => format!("{}: {word}", ctx.text("wordNotFound")),
    };
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(message, ERROR_STYLE)),
        Line::from(""),
        Line::from(Span::styled("Press any key", Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letters_and_editing_keys() {
        let settings = GameSettings::default();
        assert_eq!(
            map_key(press(KeyCode::Char('a')), false, &settings),
            Some(KeyAction::Game(Input::Letter('a')))
        );
        assert_eq!(
            map_key(press(KeyCode::Enter), false, &settings),
            Some(KeyAction::Game(Input::Submit))
        );
        assert_eq!(
            map_key(press(KeyCode::Tab), false, &settings),
            Some(KeyAction::Game(Input::Move(CursorMove::Right)))
        );
        assert_eq!(
            map_key(press(KeyCode::Delete), false, &settings),
            Some(KeyAction::Game(Input::Delete))
        );
    }

    #[test]
    fn test_function_keys_cycle_settings() {
        let settings = GameSettings::new("en", 8, Difficulty::Hard).unwrap();
        assert_eq!(
            map_key(press(KeyCode::F(3)), false, &settings),
            Some(KeyAction::Game(Input::SetLanguage("es".to_string())))
        );
        assert_eq!(
            map_key(press(KeyCode::F(4)), false, &settings),
            Some(KeyAction::Game(Input::SetWordLength(3)))
        );
        assert_eq!(
            map_key(press(KeyCode::F(5)), false, &settings),
            Some(KeyAction::Game(Input::SetDifficulty(Difficulty::Easy)))
        );
        assert_eq!(
            map_key(press(KeyCode::F(2)), false, &settings),
            Some(KeyAction::Game(Input::NewWord))
        );
    }

    #[test]
    fn test_shift_and_garbage_are_ignored() {
        let settings = GameSettings::default();
        assert_eq!(
            map_key(press(KeyCode::Modifier(event::ModifierKeyCode::LeftShift)), false, &settings),
            None
        );
        assert_eq!(map_key(press(KeyCode::Char('\u{FFFD}')), false, &settings), None);
        let alt = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(map_key(alt, false, &settings), None);
        let shifted = KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT);
        assert_eq!(
            map_key(shifted, false, &settings),
            Some(KeyAction::Game(Input::Letter('X')))
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let settings = GameSettings::default();
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release, false, &settings), None);
    }

    #[test]
    fn test_notice_swallows_keys() {
        let settings = GameSettings::default();
        assert_eq!(
            map_key(press(KeyCode::Char('a')), true, &settings),
            Some(KeyAction::Game(Input::Dismiss))
        );
        assert_eq!(map_key(press(KeyCode::Esc), true, &settings), Some(KeyAction::Quit));
        assert_eq!(
            map_key(press(KeyCode::F(2)), true, &settings),
            Some(KeyAction::Game(Input::NewWord))
        );
        assert_eq!(
            map_key(press(KeyCode::F(5)), true, &settings),
            Some(KeyAction::Game(Input::SetDifficulty(Difficulty::Medium)))
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, false, &settings), Some(KeyAction::Quit));
    }

    #[test]
    fn test_cell_colors() {
        assert_eq!(colors(Some(Classification::Correct)).0, Color::Green);
        assert_eq!(colors(Some(Classification::WrongPosition)).0, Color::Yellow);
        assert_eq!(colors(Some(Classification::Absent)).0, Color::Gray);
        assert_eq!(colors(None).0, Color::DarkGray);
    }
}
