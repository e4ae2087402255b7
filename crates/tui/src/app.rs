use std::{
    io, thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use movielink_core::{
    GameController, GamePhase, GameState, Movie, MovieDatabase, Player, TurnResult, WinCondition,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::{spawn, sync::mpsc};
use tracing::{debug, error, info, warn};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_NAME_LEN: usize = 24;
const MAX_TITLE_LEN: usize = 120;
const FEED_LEN: usize = 6;
const WARNING_SECS: u64 = 10;
const DANGER_SECS: u64 = 5;

#[derive(Debug, Clone)]
struct Theme {
    accent: Color,
    muted: Color,
    selection_bg: Color,
    selection_fg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    PlayerOneName,
    PlayerTwoName,
    ChooseRule,
    InGame,
    GameOver,
}

/// Single-line text field with a character cursor.
#[derive(Debug, Clone)]
struct InputLine {
    input: String,
    cursor: usize,
    max_len: usize,
}

impl InputLine {
    fn new(max_len: usize) -> Self {
        Self {
            input: String::new(),
            cursor: 0,
            max_len,
        }
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(index, _)| index)
            .unwrap_or(self.input.len())
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.char_len() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len) as usize;
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    fn insert(&mut self, ch: char) {
        if ch.is_control() || self.char_len() >= self.max_len {
            return;
        }
        let index = self.byte_index();
        self.input.insert(index, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index();
            self.input.remove(index);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let index = self.byte_index();
            self.input.remove(index);
        }
    }

    fn set(&mut self, text: &str) {
        self.input = text.chars().take(self.max_len).collect();
        self.cursor = self.char_len();
    }

    fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn text(&self) -> &str {
        &self.input
    }

    fn value(&self) -> &str {
        self.input.trim()
    }

    /// Returns true when the key edited the text.
    fn handle_edit_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::Backspace => {
                self.backspace();
                return true;
            }
            KeyCode::Delete => {
                self.delete();
                return true;
            }
            KeyCode::Char(ch)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.insert(ch);
                return true;
            }
            _ => {}
        }
        false
    }
}

/// Per-turn countdown. A zero limit disables it.
#[derive(Debug, Clone)]
struct TurnClock {
    limit: Duration,
    remaining: Duration,
    last_tick: Instant,
    paused: bool,
}

impl TurnClock {
    fn new(limit: Duration, now: Instant) -> Self {
        Self {
            limit,
            remaining: limit,
            last_tick: now,
            paused: false,
        }
    }

    fn is_enabled(&self) -> bool {
        !self.limit.is_zero()
    }

    fn reset(&mut self, now: Instant) {
        self.remaining = self.limit;
        self.last_tick = now;
        self.paused = false;
    }

    fn pause(&mut self, now: Instant) {
        self.advance(now);
        self.paused = true;
    }

    fn resume(&mut self, now: Instant) {
        self.last_tick = now;
        self.paused = false;
    }

    /// Returns true once the time has run out.
    fn advance(&mut self, now: Instant) -> bool {
        if !self.paused {
            let elapsed = now.saturating_duration_since(self.last_tick);
            self.remaining = self.remaining.saturating_sub(elapsed);
        }
        self.last_tick = now;
        self.is_enabled() && self.remaining.is_zero()
    }

    fn remaining_secs(&self) -> u64 {
        let millis = self.remaining.as_millis() as u64;
        millis.div_ceil(1000)
    }
}

enum AppEvent {
    Input(Event),
    Tick,
    TitleResolved {
        guess: String,
        result: Result<Option<Movie>>,
    },
}

struct FeedEntry {
    message: String,
    accepted: bool,
}

/// Terminal front end driving one [`GameController`].
pub struct MovieLinkApp {
    controller: GameController<MovieDatabase>,
    theme: Theme,
    stage: Stage,
    input: InputLine,
    player_one: String,
    player_two: String,
    rules: Vec<WinCondition>,
    rule_cursor: usize,
    suggestions: Vec<String>,
    suggestion_cursor: Option<usize>,
    clock: TurnClock,
    pending_guess: Option<String>,
    feed: Vec<FeedEntry>,
    status: String,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    should_quit: bool,
}

impl MovieLinkApp {
    pub fn new(controller: GameController<MovieDatabase>, turn_time_limit: Duration) -> Self {
        Self {
            controller,
            theme: Theme::default(),
            stage: Stage::PlayerOneName,
            input: InputLine::new(MAX_NAME_LEN),
            player_one: String::new(),
            player_two: String::new(),
            rules: WinCondition::presets(),
            rule_cursor: 0,
            suggestions: Vec::new(),
            suggestion_cursor: None,
            clock: TurnClock::new(turn_time_limit, Instant::now()),
            pending_guess: None,
            feed: Vec::new(),
            status: "Ready".to_string(),
            event_tx: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let catalog_size = self.controller.lookup().len();
        self.status = if self.controller.lookup().is_online() {
            format!("{catalog_size} movies loaded • TMDB lookups enabled")
        } else {
            format!("{catalog_size} movies loaded • offline")
        };

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }

            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(Event::Key(key))) => {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
                true
            }
            Some(AppEvent::Input(_)) => true,
            Some(AppEvent::Tick) => {
                self.handle_tick(Instant::now());
                true
            }
            Some(AppEvent::TitleResolved { guess, result }) => {
                self.handle_title_resolved(guess, result);
                true
            }
            None => false,
        }
    }

    fn handle_tick(&mut self, now: Instant) {
        if self.stage != Stage::InGame || self.pending_guess.is_some() {
            return;
        }
        if !self.clock.advance(now) {
            return;
        }

        match self.controller.time_expired() {
            Ok(result) => self.apply_result(&result),
            Err(err) => {
                error!(?err, "timer expired without an active game");
                self.status = format!("Error: {err}");
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }

        match self.stage {
            Stage::PlayerOneName | Stage::PlayerTwoName => self.handle_name_key(key),
            Stage::ChooseRule => self.handle_rule_key(key),
            Stage::InGame => self.handle_game_key(key),
            Stage::GameOver => self.handle_game_over_key(key),
        }
    }

    fn handle_name_key(&mut self, key: KeyEvent) {
        if key.code != KeyCode::Enter {
            self.input.handle_edit_key(&key);
            return;
        }

        let first = self.stage == Stage::PlayerOneName;
        let name = match self.input.value() {
            "" if first => "Player 1".to_string(),
            "" => "Player 2".to_string(),
            value => value.to_string(),
        };
        self.input.clear();

        if first {
            self.status = format!("Welcome, {name}!");
            self.player_one = name;
            self.stage = Stage::PlayerTwoName;
        } else if name.eq_ignore_ascii_case(&self.player_one) {
            self.status = "Players need different names".to_string();
        } else {
            self.status = format!("Welcome, {name}!");
            self.player_two = name;
            self.stage = Stage::ChooseRule;
        }
    }

    fn handle_rule_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.rule_cursor = self.rule_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.rule_cursor + 1 < self.rules.len() {
                    self.rule_cursor += 1;
                }
            }
            KeyCode::Enter => self.start_game(),
            _ => {}
        }
    }

    fn start_game(&mut self) {
        let Some(rule) = self.rules.get(self.rule_cursor).cloned() else {
            return;
        };
        let description = rule.description();
        match self
            .controller
            .start_game(&self.player_one, &self.player_two, rule)
        {
            Ok(movie) => {
                self.status = format!("Starting movie: {}", movie.display_name());
                self.stage = Stage::InGame;
                self.input = InputLine::new(MAX_TITLE_LEN);
                self.feed.clear();
                self.refresh_suggestions();
                self.clock.reset(Instant::now());
                info!(rule = %description, "new game on screen");
            }
            Err(err) => {
                warn!(?err, "could not start game");
                self.status = format!("Cannot start: {err}");
            }
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        if self.pending_guess.is_some() {
            return;
        }
        match key.code {
            KeyCode::Up => self.move_suggestion(-1),
            KeyCode::Down => self.move_suggestion(1),
            KeyCode::Tab => {
                let selected = self
                    .suggestion_cursor
                    .and_then(|index| self.suggestions.get(index))
                    .cloned();
                if let Some(title) = selected {
                    self.input.set(&title);
                    self.refresh_suggestions();
                }
            }
            KeyCode::Enter => self.submit_guess(),
            _ => {
                if self.input.handle_edit_key(&key) {
                    self.refresh_suggestions();
                }
            }
        }
    }

    fn handle_game_over_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.stage = Stage::ChooseRule;
            self.suggestions.clear();
            self.suggestion_cursor = None;
            self.status = "Pick a rule for the rematch".to_string();
        }
    }

    fn move_suggestion(&mut self, delta: isize) {
        if self.suggestions.is_empty() {
            self.suggestion_cursor = None;
            return;
        }
        let last = self.suggestions.len() as isize - 1;
        let next = match self.suggestion_cursor {
            Some(index) => (index as isize + delta).clamp(0, last),
            None if delta > 0 => 0,
            None => last,
        };
        self.suggestion_cursor = Some(next as usize);
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = self
            .controller
            .autocomplete_suggestions(self.input.text().trim_start());
        self.suggestion_cursor = if self.suggestions.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    fn submit_guess(&mut self) {
        let guess = self.input.value().to_string();
        let database = self.controller.lookup().clone();
        if guess.is_empty() || !database.is_online() || database.contains_title(&guess) {
            self.play_turn(&guess);
            return;
        }

        let Some(sender) = self.event_tx.clone() else {
            error!("event_channel_missing");
            self.play_turn(&guess);
            return;
        };

        self.clock.pause(Instant::now());
        self.pending_guess = Some(guess.clone());
        self.status = format!("Looking up {guess}…");
        debug!(guess = %guess, "fetching unknown title");
        spawn(async move {
            let result = database.fetch_title(&guess).await;
            let _ = sender.send(AppEvent::TitleResolved { guess, result }).await;
        });
    }

    fn handle_title_resolved(&mut self, guess: String, result: Result<Option<Movie>>) {
        if self.pending_guess.as_deref() != Some(guess.as_str()) {
            debug!(guess = %guess, "ignoring stale lookup");
            return;
        }
        self.pending_guess = None;
        self.clock.resume(Instant::now());

        match result {
            Ok(Some(movie)) => {
                let autocomplete = self.controller.autocomplete_mut();
                if !autocomplete.contains(movie.title()) {
                    if let Err(err) = autocomplete.insert(movie.title(), 0) {
                        warn!(?err, title = movie.title(), "could not index fetched title");
                    }
                }
            }
            Ok(None) => {}
            Err(err) => {
                error!("title lookup failed: {err:#}");
                self.push_feed(format!("Lookup failed: {err}"), false);
            }
        }
        self.play_turn(&guess);
    }

    fn play_turn(&mut self, guess: &str) {
        match self.controller.process_turn(guess) {
            Ok(result) => self.apply_result(&result),
            Err(err) => {
                error!(?err, "turn submitted without a playable game");
                self.status = format!("Error: {err}");
            }
        }
    }

    fn apply_result(&mut self, result: &TurnResult) {
        self.push_feed(result.message().to_string(), result.is_accepted());
        self.status = result.message().to_string();

        if result.is_game_over() {
            self.stage = Stage::GameOver;
            self.suggestions.clear();
            self.suggestion_cursor = None;
        } else if result.is_accepted() {
            self.input.clear();
            self.refresh_suggestions();
            self.clock.reset(Instant::now());
        }
    }

    fn push_feed(&mut self, message: String, accepted: bool) {
        self.feed.push(FeedEntry { message, accepted });
        if self.feed.len() > FEED_LEN {
            let overflow = self.feed.len() - FEED_LEN;
            self.feed.drain(..overflow);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        match self.stage {
            Stage::PlayerOneName | Stage::PlayerTwoName => self.draw_name_entry(frame),
            Stage::ChooseRule => self.draw_rules(frame),
            Stage::InGame | Stage::GameOver => self.draw_game(frame),
        }
    }

    fn draw_name_entry(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(4),
            ])
            .split(frame.size());

        self.render_banner(frame, chunks[0]);

        let title = if self.stage == Stage::PlayerOneName {
            "Player 1 name"
        } else {
            "Player 2 name"
        };
        let area = chunks[1];
        let input = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::raw(self.input.text().to_string()),
        ]))
        .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(input, area);
        self.place_cursor(frame, area);

        self.render_status(frame, chunks[3], "Enter confirm  Esc quit");
    }

    fn draw_rules(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(3),
                Constraint::Length(4),
            ])
            .split(frame.size());

        self.render_banner(frame, chunks[0]);

        let items: Vec<ListItem> = self
            .rules
            .iter()
            .map(|rule| ListItem::new(rule.description()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} vs {}: choose a win condition", self.player_one, self.player_two)),
            )
            .highlight_style(self.selection_style())
            .highlight_symbol("▶ ");
        let mut state = ListState::default().with_selected(Some(self.rule_cursor));
        frame.render_stateful_widget(list, chunks[1], &mut state);

        self.render_status(frame, chunks[2], "↑/↓ select  Enter start  Esc quit");
    }

    fn draw_game(&self, frame: &mut Frame) {
        let Some(state) = self.controller.state() else {
            return;
        };
        let suggestion_height = self.controller.autocomplete().limit().min(8) as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(suggestion_height),
                Constraint::Length(4),
            ])
            .split(frame.size());

        self.render_header(frame, chunks[0], state);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);
        self.render_history(frame, body[0], state);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(3)])
            .split(body[1]);
        self.render_players(frame, side[0], state);
        self.render_feed(frame, side[1]);

        self.render_input(frame, chunks[2]);
        self.render_suggestions(frame, chunks[3]);

        let help = if self.stage == Stage::GameOver {
            "Enter rematch  Esc quit"
        } else {
            "↑/↓ pick  Tab fill  Enter submit  Esc quit"
        };
        self.render_status(frame, chunks[4], help);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &GameState) {
        let timer = if self.pending_guess.is_some() {
            Span::styled("⏸ lookup", Style::default().fg(self.theme.muted))
        } else if !self.clock.is_enabled() {
            Span::styled("no timer", Style::default().fg(self.theme.muted))
        } else {
            let secs = self.clock.remaining_secs();
            let color = if secs <= DANGER_SECS {
                self.theme.danger
            } else if secs <= WARNING_SECS {
                self.theme.warning
            } else {
                self.theme.success
            };
            Span::styled(
                format!("{secs:>3}s"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        };

        let turn = match state.phase() {
            GamePhase::Concluded(_) => match state.winner() {
                Some(winner) => format!("Winner: {}", winner.name()),
                None => "Game over".to_string(),
            },
            _ => format!("{} to play", state.current_player().name()),
        };

        let line = Line::from(vec![
            Span::styled(
                format!("Round {}  ", state.round()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(turn, Style::default().fg(self.theme.accent)),
            Span::raw("  •  "),
            Span::raw(state.win_condition().description()),
            Span::raw("  •  "),
            timer,
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("movielink"));
        frame.render_widget(paragraph, area);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect, state: &GameState) {
        let current = state.current_movie();
        let items: Vec<ListItem> = state
            .recent_history()
            .iter()
            .rev()
            .map(|movie| {
                let mut style = Style::default();
                if movie == current {
                    style = style.fg(self.theme.accent).add_modifier(Modifier::BOLD);
                }
                let mut lines = vec![Line::from(Span::styled(movie.display_name(), style))];
                if let Some(connections) = movie.latest_connections() {
                    let via = connections
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    lines.push(Line::from(Span::styled(
                        format!("  via {via}"),
                        Style::default().fg(self.theme.muted),
                    )));
                } else if movie == state.starting_movie() {
                    lines.push(Line::from(Span::styled(
                        "  starting movie",
                        Style::default().fg(self.theme.muted),
                    )));
                }
                ListItem::new(lines)
            })
            .collect();

        let title = format!("Recent movies ({} played)", state.movies_played());
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(list, area);
    }

    fn render_players(&self, frame: &mut Frame, area: Rect, state: &GameState) {
        let current = state.current_player();
        let lines: Vec<Line> = state
            .players()
            .iter()
            .map(|player| self.player_line(player, player == current, state))
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Players"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn player_line(&self, player: &Player, is_current: bool, state: &GameState) -> Line<'static> {
        let marker = if is_current && !state.is_concluded() {
            "▶ "
        } else {
            "  "
        };
        let mut name_style = Style::default().add_modifier(Modifier::BOLD);
        if state.winner() == Some(player) {
            name_style = name_style.fg(self.theme.success);
        }
        Line::from(vec![
            Span::raw(marker),
            Span::styled(player.name().to_string(), name_style),
            Span::raw(format!(
                "  {} • {} guessed",
                state.win_condition().player_progress(player),
                player.num_movies_guessed()
            )),
        ])
    }

    fn render_feed(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .feed
            .iter()
            .rev()
            .map(|entry| {
                let color = if entry.accepted {
                    self.theme.success
                } else {
                    self.theme.warning
                };
                Line::from(Span::styled(entry.message.clone(), Style::default().fg(color)))
            })
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Turns"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let title = match self.controller.state() {
            Some(state) if self.stage == Stage::InGame => format!(
                "{}, name a movie connected to {}",
                state.current_player().name(),
                state.current_movie().title()
            ),
            _ => "Game over".to_string(),
        };
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::raw(self.input.text().to_string()),
        ]))
        .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);

        if self.stage == Stage::InGame && self.pending_guess.is_none() {
            self.place_cursor(frame, area);
        }
    }

    fn render_suggestions(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .suggestions
            .iter()
            .map(|title| ListItem::new(title.clone()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Suggestions"))
            .highlight_style(self.selection_style());
        let mut state = ListState::default().with_selected(self.suggestion_cursor);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, help: &str) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let paragraph = Paragraph::new(vec![
            Line::from(self.status.clone()),
            Line::from(Span::styled(
                help.to_string(),
                Style::default().fg(self.theme.muted),
            )),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "M O V I E L I N K",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Chain movies through shared cast and crew",
                Style::default().fg(self.theme.muted),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn place_cursor(&self, frame: &mut Frame, area: Rect) {
        let cursor_x =
            (area.x + 3 + self.input.cursor as u16).min(area.x + area.width.saturating_sub(2));
        frame.set_cursor(cursor_x, area.y + 1);
    }

    fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.theme.selection_bg)
            .fg(self.theme.selection_fg)
            .add_modifier(Modifier::BOLD)
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
