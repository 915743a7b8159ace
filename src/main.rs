//! Scroll-driven card stack animator with a terminal preview.
//!
//! Run the binary to scroll through the capability section of the page and
//! watch the cards enter, stack and exit.
//! Run with `--print-config` to print the effective configuration.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tokio::time::{interval, MissedTickBehavior};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::AnimatorConfig;
use crate::core::page_progress;
use crate::ui::{
    chrome::{FloatingCtaButton, NavBar, ProgressBar},
    layout::AppLayout,
    page_view::PageView,
    popup::SettingsPopup,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven card stack preview")]
struct Cli {
    /// Show cards statically, without animation.
    #[arg(long)]
    reduced_motion: bool,

    /// Extra scroll room past the last card (0.5–1.0).
    #[arg(long)]
    extension_factor: Option<f64>,

    /// Depth at which cards stop receding.
    #[arg(long)]
    stack_cap: Option<usize>,

    /// Use the mobile constants regardless of terminal width.
    #[arg(long)]
    mobile: bool,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut AnimatorConfig) {
        if self.reduced_motion {
            config.reduced_motion = true;
        }
        if let Some(e) = self.extension_factor {
            config.extension_factor = e;
        }
        if let Some(cap) = self.stack_cap {
            config.max_visible_stack_cards = cap;
        }
        if let Err(err) = config.validate() {
            tracing::warn!("{err}");
            config.clamp();
        }
    }
}

// ───────────────────────────────────────── draw ──────────────

fn draw(frame: &mut ratatui::Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    frame.render_widget(NavBar, layout.nav_area);
    frame.render_widget(
        ProgressBar {
            percent: state.page_percent,
            over_dark: state.dark_tracker.is_over_dark(),
        },
        layout.progress_area,
    );
    frame.render_widget(
        PageView {
            page: &state.page,
            scroll_offset: state.scroll_offset(),
            cards: &state.cards,
            surfaces: &state.surfaces,
        },
        layout.page_area,
    );
    frame.render_widget(FloatingCtaButton { style: state.cta.style() }, layout.page_area);

    let status = match &state.status_message {
        Some(msg) => msg.clone(),
        None => {
            let a = state.driver.animator();
            format!(
                " {}%  stack {:>5.1}%  cards {}/{}  writes {}  {}{}{} | ↑↓/wheel: scroll  1-4: sections  ?: settings  q: quit",
                page_progress::format_percent(state.page_percent),
                a.progress() * 100.0,
                state.visible_cards(),
                a.card_count(),
                a.total_writes(),
                if state.is_mobile() { "mobile " } else { "" },
                if a.settings().reduced_motion { "static " } else { "" },
                if state.motion_active() { "⟳" } else { " " },
            )
        }
    };
    frame.render_widget(
        Paragraph::new(status).style(Theme::status_bar_style()),
        layout.status_area,
    );

    if state.active_view == ActiveView::SettingsMenu {
        frame.render_widget(SettingsPopup { state }, frame.area());
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut config = AnimatorConfig::load();
    cli.apply(&mut config);

    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    let (cols, rows) = terminal::size()?;
    let frame_interval = config.frame_interval();
    let mut state = AppState::new(config, cols, rows, cli.mobile);

    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(frame_interval);
    let mut frames = interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut dirty = true;

    // ── event loop ────────────────────────────────────────────
    loop {
        if dirty {
            terminal.draw(|frame| draw(frame, &state))?;
            dirty = false;
        }

        tokio::select! {
            biased;

            _ = frames.tick() => {
                let report = state.on_frame(Instant::now());
                dirty |= report.ran || report.motion_changed || state.scroll.is_animating();
            }

            Some(event) = events.recv() => {
                let now = Instant::now();
                state.status_message = None;
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k, now),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, now),
                    AppEvent::Resize(w, h) => state.on_resize(w, h, now),
                }
                dirty = true;
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.shutdown();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    tracing::debug!(frames = state.driver.frames_run(), "exited");

    Ok(())
}
