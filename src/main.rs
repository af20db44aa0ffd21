//! A table-based TUI to browse a catalog service's categories.
//!
//! Point the binary at a catalog snapshot file to open the category list.
//! Run with `--init-bash` to print the shell function for your `.bashrc`.

mod app;
mod config;
mod core;
mod shell;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    fetch_runtime::{spawn_fetch, FetchUpdate},
    handler,
    state::{ActiveView, AppState},
};
use crate::core::provider::DataProvider;
use crate::core::query::Page;
use crate::core::store::JsonStore;
use crate::shell::integration;
use crate::ui::{
    layout::AppLayout, popup::ControlsPopup, spinner::FetchIndicator,
    table_widget::CategoryTable, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Catalog category browser")]
struct Cli {
    /// Catalog snapshot file (defaults to `catalog.json`).
    #[arg(default_value = "catalog.json")]
    catalog: PathBuf,

    /// Print the bash shell function and exit.
    #[arg(long = "init-bash")]
    init_bash: bool,

    /// Print the zsh shell function and exit.
    #[arg(long = "init-zsh")]
    init_zsh: bool,

    /// Write the default config file and exit.
    #[arg(long = "init-config")]
    init_config: bool,

    /// Records per page (overrides the config file).
    #[arg(long)]
    page_size: Option<u32>,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── shell-integration / config modes ──────────────────────
    if cli.init_bash {
        print!("{}", integration::bash_function());
        return Ok(());
    }
    if cli.init_zsh {
        print!("{}", integration::zsh_function());
        return Ok(());
    }
    if cli.init_config {
        let path = config::AppConfig::write_default()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    // ── open the catalog ──────────────────────────────────────
    let store = JsonStore::open(&cli.catalog)
        .with_context(|| format!("opening catalog {}", cli.catalog.display()))?;
    let provider: Arc<dyn DataProvider> = Arc::new(store);

    let mut user_config = config::AppConfig::load();
    if let Some(page_size) = cli.page_size {
        user_config.per_page = page_size.clamp(1, 500);
    }
    let mut state = AppState::new(cli.catalog.clone(), user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (fetch_tx, mut fetch_rx) = tokio::sync::mpsc::unbounded_channel::<FetchUpdate>();

    // ── event loop ────────────────────────────────────────────
    loop {
        // ── draw first ─────────────────────────────────────────
        // Always render before issuing any request so the UI stays
        // responsive.  Previous rows stay on screen while a newer fetch
        // is in flight; only the spinner betrays the wait.
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            state.table_area = Some(layout.table_area);

            let mut table_block = Block::default()
                .title(format!(" {} · {} ", state.catalog.display(), state.resource))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            if let Some(total) = state.total {
                let pages = Page::count_for(total, state.page.per_page);
                table_block = table_block.title_bottom(format!(
                    " page {}/{} · {} records ",
                    state.page.number, pages, total
                ));
            }

            let table = CategoryTable::new(&state.records, &state.sort).block(table_block);
            frame.render_stateful_widget(table, layout.table_area, &mut state.table_state);

            if state.records.is_empty() && !state.loading {
                let inner = layout.table_area.inner(ratatui::layout::Margin {
                    horizontal: 1,
                    vertical: 2,
                });
                frame.render_widget(
                    Paragraph::new("no records").style(Theme::empty_style()),
                    inner,
                );
            }

            frame.render_widget(
                FetchIndicator {
                    visible: state.loading,
                    tick: state.tick,
                },
                layout.table_area,
            );

            let (status_text, status_style) = match &state.error {
                Some(err) => (format!(" fetch failed: {err}"), Theme::error_style()),
                None => (
                    format!(" {}", state.config.status_bar_hint()),
                    Theme::status_bar_style(),
                ),
            };
            frame.render_widget(
                Paragraph::new(status_text).style(status_style),
                layout.status_area,
            );

            if state.active_view == ActiveView::Controls {
                frame.render_widget(
                    ControlsPopup {
                        config: &state.config,
                    },
                    frame.area(),
                );
            }
        })?;

        // ── kick off the fetch AFTER draw ──────────────────────
        // The frame above already shows the interaction that requested it
        // (sort indicator flip, page move); the rows land on a later frame.
        if state.needs_fetch {
            let (generation, query) = state.begin_fetch();
            spawn_fetch(fetch_tx.clone(), generation, Arc::clone(&provider), query);
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Tick => {
                        state.tick = state.tick.wrapping_add(1);
                    }
                }
            }

            Some(update) = fetch_rx.recv() => {
                state.apply_fetch(update);
                // Batch-drain whatever else is queued before redrawing, so a
                // burst of stale results doesn't cause per-message redraws.
                while let Ok(update) = fetch_rx.try_recv() {
                    state.apply_fetch(update);
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    integration::print_exit_payload(state.edit_route.as_ref());

    Ok(())
}
