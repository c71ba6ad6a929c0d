//! Top-level application state and the main event loop.
//!
//! [`AppState`] is plain data plus synchronous transitions, so it can be
//! driven from tests. Anything asynchronous (loading data, probing images) is
//! queued as an [`Effect`]; [`App`] spawns those on its tokio runtime and
//! feeds the results back as [`Update`]s over a channel.

use std::cell::Cell;
use std::io;
use std::time::Duration;

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        card_list::CardList,
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        page::{page_text, StaticPage},
        query_bar::{QueryBar, QueryBarState, QueryStatus},
        tab_bar::TabBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use introboard_core::{config::Config, image::ImageSlot, LoadState, Route, ViewState};
use introboard_feeds::{ImageProber, Loader};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use tokio::sync::mpsc;

const PAGE_STEP: u16 = 10;

// ---------------------------------------------------------------------------
// Focus, effects and updates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

/// Asynchronous work requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Load,
    Probe { position: usize, url: String },
}

/// Result of an [`Effect`], tagged with the load generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Loaded {
        generation: u64,
        state: LoadState,
    },
    Image {
        generation: u64,
        position: usize,
        ok: bool,
    },
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub route: Route,
    pub load: LoadState,
    pub view: ViewState,
    /// One slot per record position; `None` when the record has no photo.
    pub images: Vec<Option<ImageSlot>>,
    /// Bumped on every reload so late results from an old load are dropped.
    pub generation: u64,
    pub query: QueryBarState,
    pub scroll: u16,
    /// Largest useful scroll offset, measured at the last draw.
    pub max_scroll: Cell<u16>,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub effects: Vec<Effect>,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme, route: Route) -> Self {
        let view = ViewState::default()
            .with_toggles(config.ui.toggles())
            .with_slideshow(config.ui.slideshow);
        Self {
            route,
            load: LoadState::Loading,
            view,
            images: Vec::new(),
            generation: 0,
            query: QueryBarState::default(),
            scroll: 0,
            max_scroll: Cell::new(u16::MAX),
            focus: Focus::Page,
            prev_focus: Focus::Page,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            effects: vec![Effect::Load],
            quit: false,
        }
    }

    /// Pre-fill the search box.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query.query = query.to_string();
        self.query.cursor = query.len();
        self.view.set_query(query);
        self
    }

    pub fn set_route(&mut self, route: Route) {
        if route != self.route {
            tracing::debug!(from = %self.route, to = %route, "route changed");
            self.route = route;
            self.scroll = 0;
        }
        if self.focus == Focus::QueryBar && route != Route::Introductions {
            self.focus = Focus::Page;
        }
    }

    /// Throw the current records away and run the loader again.
    pub fn request_reload(&mut self) {
        self.generation += 1;
        self.load = LoadState::Loading;
        self.view.set_records(Vec::new());
        self.images.clear();
        self.scroll = 0;
        self.effects.push(Effect::Load);
        tracing::info!(generation = self.generation, "reload requested");
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Loaded { generation, state } if generation == self.generation => {
                let origin = state.dataset().and_then(|d| d.origin.clone());
                self.view.set_records(state.records().to_vec());
                self.images = self
                    .view
                    .records()
                    .iter()
                    .enumerate()
                    .map(|(pos, _)| {
                        self.view
                            .record(pos)
                            .and_then(|r| r.image(origin.as_deref()))
                            .map(|img| ImageSlot::new(&img))
                    })
                    .collect();
                if self.config.ui.probe_images {
                    for (position, slot) in self.images.iter().enumerate() {
                        if let Some(slot) = slot {
                            self.effects.push(Effect::Probe {
                                position,
                                url: slot.current().to_string(),
                            });
                        }
                    }
                }
                self.load = state;
                self.scroll = 0;
            }
            Update::Image {
                generation,
                position,
                ok,
            } if generation == self.generation => {
                let default_origin = self.config.data.default_image_origin.clone();
                let Some(Some(slot)) = self.images.get_mut(position) else {
                    return;
                };
                if ok {
                    slot.on_load();
                } else if let Some(url) = slot.on_error(&default_origin) {
                    self.effects.push(Effect::Probe { position, url });
                }
            }
            stale => tracing::debug!(?stale, current = self.generation, "dropping stale update"),
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.max_scroll.get());
        self.scroll = (i32::from(self.scroll) + delta).clamp(0, max) as u16;
    }

    /// Handle one semantic event.
    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        match self.focus {
            Focus::Command => self.handle_command(event),
            Focus::QueryBar => self.handle_query(event),
            Focus::Page => self.handle_page(event),
        }
    }

    fn handle_command(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Quit => self.quit = true,
            AppEvent::Enter => match Command::parse(&self.command_bar.input) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                    execute_command(self, cmd);
                }
                Err(msg) if msg.is_empty() => {
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                Err(msg) => self.command_bar.error = Some(msg),
            },
            other => self.command_bar.handle(&other),
        }
    }

    fn handle_query(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape | AppEvent::Enter => {
                tracing::debug!("focus: QueryBar -> Page");
                self.focus = Focus::Page;
            }
            AppEvent::Quit => self.quit = true,
            other => {
                if self.query.handle(&other) {
                    self.view.set_query(self.query.query.clone());
                    self.scroll = 0;
                }
            }
        }
    }

    fn handle_page(&mut self, event: AppEvent) {
        let on_intros = self.route == Route::Introductions;
        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::NextPage => self.set_route(self.route.next()),
            AppEvent::PrevPage => self.set_route(self.route.prev()),
            AppEvent::QueryFocus => {
                self.set_route(Route::Introductions);
                self.focus = Focus::QueryBar;
            }
            AppEvent::ToggleSlideshow if on_intros => {
                self.view.toggle_slideshow();
                self.scroll = 0;
            }
            AppEvent::ToggleSection(section) if on_intros => {
                self.view.toggle_section(section);
            }
            AppEvent::Nav(Direction::Left) if on_intros => {
                self.view.prev();
                self.scroll = 0;
            }
            AppEvent::Nav(Direction::Right) if on_intros => {
                self.view.next();
                self.scroll = 0;
            }
            AppEvent::Reload => self.request_reload(),
            AppEvent::Nav(Direction::Up) => self.scroll_by(-1),
            AppEvent::Nav(Direction::Down) => self.scroll_by(1),
            AppEvent::ScrollUp => self.scroll_by(-i32::from(PAGE_STEP)),
            AppEvent::ScrollDown => self.scroll_by(i32::from(PAGE_STEP)),
            AppEvent::ScrollToTop => self.scroll = 0,
            AppEvent::ScrollToBottom => self.scroll = self.max_scroll.get(),
            _ => {}
        }
    }

    fn query_status(&self) -> QueryStatus {
        QueryStatus {
            matched: self.view.filtered().len(),
            total: self.view.records().len(),
            slide: self
                .view
                .current_index()
                .map(|i| (i, self.view.filtered().len())),
            slideshow: self.view.is_slideshow(),
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    loader: Loader,
    prober: ImageProber,
    runtime: tokio::runtime::Runtime,
    tx: mpsc::UnboundedSender<Update>,
    rx: mpsc::UnboundedReceiver<Update>,
}

impl App {
    pub fn new(state: AppState, loader: Loader) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let prober = ImageProber::new(loader.client().clone(), &state.config.data.public_dir);
        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            state,
            loader,
            prober,
            runtime,
            tx,
            rx,
        })
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut titled: Option<Route> = None;
        loop {
            self.spawn_effects();
            while let Ok(update) = self.rx.try_recv() {
                self.state.apply(update);
            }

            if titled != Some(self.state.route) {
                let title = self.state.route.page_title(&self.state.config.site.title);
                execute!(io::stdout(), SetTitle(title))?;
                titled = Some(self.state.route);
            }

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn spawn_effects(&mut self) {
        let generation = self.state.generation;
        for effect in self.state.take_effects() {
            let tx = self.tx.clone();
            match effect {
                Effect::Load => {
                    let loader = self.loader.clone();
                    self.runtime.spawn(async move {
                        let state = loader.load().await;
                        let _ = tx.send(Update::Loaded { generation, state });
                    });
                }
                Effect::Probe { position, url } => {
                    let prober = self.prober.clone();
                    self.runtime.spawn(async move {
                        let ok = prober.probe(&url).await.is_ok();
                        let _ = tx.send(Update::Image {
                            generation,
                            position,
                            ok,
                        });
                    });
                }
            }
        }
    }
}

/// True when a text-input widget has focus, so letters type rather than
/// trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let on_intros = state.route == Route::Introductions;

    // Vertical: 1-line tab bar | body | 3-line query bar (introductions only)
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(if on_intros { 3 } else { 0 }),
        ])
        .split(area);

    frame.render_widget(TabBar::new(state.route, &state.config.site.course, &state.theme), vert[0]);

    // Borders take two rows off the body.
    let viewport = vert[1].height.saturating_sub(2) as usize;
    let content = if on_intros {
        crate::widgets::card_list::body_lines(&state.load, &state.view, &state.images, &state.theme)
            .len()
    } else {
        page_text(state.route).map_or(0, |t| t.lines().count())
    };
    state
        .max_scroll
        .set(content.saturating_sub(viewport).min(u16::MAX as usize) as u16);

    if on_intros {
        frame.render_widget(
            CardList::new(&state.load, &state.view, &state.images, state.scroll, &state.theme),
            vert[1],
        );
        frame.render_widget(
            QueryBar::new(
                &state.query,
                state.query_status(),
                state.focus == Focus::QueryBar,
                &state.theme,
            ),
            vert[2],
        );
    } else {
        frame.render_widget(StaticPage::new(state.route, state.scroll, &state.theme), vert[1]);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar && on_intros {
        let qb = QueryBar::new(&state.query, state.query_status(), true, &state.theme);
        frame.set_cursor_position(qb.cursor_position(vert[2]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
