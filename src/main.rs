//! Interactive demo of the label switch.
//!
//! Drag the thumb or click a label; every selection change pops a toast in
//! the status bar.  Run with `--write-config` to persist the effective
//! configuration.

mod app;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use label_switch::config::{AppConfig, Dimension};
use label_switch::core::style::BackgroundRef;
use label_switch::ui::{layout::AppLayout, theme::Theme, LabelSwitchWidget};
use label_switch::{Insets, LabelSwitch};

use crate::app::{
    event::{spawn_event_reader, AppEvent, IndexChange},
    handler,
    state::AppState,
};

const DEFAULT_LABELS: &[&str] = &["Day", "Week", "Month", "Year"];

/// Frame interval while the thumb is settling.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Swipeable label switch demo")]
struct Cli {
    /// Comma-separated labels (overrides the config file).
    #[arg(long)]
    labels: Option<String>,

    /// Initially selected label index.
    #[arg(long, default_value_t = 0)]
    selected: usize,

    /// Preview the neighbouring labels while dragging.
    #[arg(long)]
    show_relative: bool,

    /// Selected-thumb background: an image path or a colour/gradient
    /// description such as `#223366` or `gradient:#223366,#335599`.
    #[arg(long)]
    background: Option<String>,

    /// How far the thumb may be pulled past either end (e.g. `10dp`).
    #[arg(long)]
    drag_out: Option<String>,

    /// Pixels per dp; terminal cells are coarse so this is well below 1.
    #[arg(long)]
    density: Option<f32>,

    /// Config file (defaults to `$XDG_CONFIG_HOME/label-switch/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration and exit.
    #[arg(long)]
    write_config: bool,

    /// Send logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration.
    fn apply(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(labels) = &self.labels {
            config.attrs.set("labels", labels)?;
        }
        if self.show_relative {
            config.attrs.show_swipe_relative = Some(true);
        }
        if let Some(bg) = &self.background {
            config.attrs.selected_background = Some(BackgroundRef(bg.clone()));
        }
        if let Some(d) = &self.drag_out {
            config.attrs.drag_out_dist =
                Some(Dimension::parse(d).with_context(|| format!("--drag-out {d}"))?);
        }
        if let Some(density) = self.density {
            anyhow::ensure!(density > 0.0, "--density must be positive");
            config.density = density;
        }
        Ok(())
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config)?;

    if cli.write_config {
        let path = config.save(cli.config.as_deref())?;
        println!("{}", path.display());
        return Ok(());
    }

    // ── build the switch ──────────────────────────────────────
    let metrics = config.metrics();
    let style = config.attrs.resolve(&metrics);
    let labels: Vec<String> = match &config.attrs.labels {
        Some(labels) if !labels.is_empty() => labels.clone(),
        _ => DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
    };
    let mut switch = LabelSwitch::new(style, &metrics).with_labels(labels);
    switch.set_selected_index(cli.selected);

    let (change_tx, mut change_rx) = tokio::sync::mpsc::unbounded_channel::<IndexChange>();
    switch.set_on_index_change(move |old, new| {
        let _ = change_tx.send(IndexChange { old, new });
    });

    let mut state = AppState::new(switch, Duration::from_millis(config.toast_ms));

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    loop {
        if state.dirty | state.switch.take_redraw_request() {
            state.dirty = false;
            terminal.draw(|frame| {
                state.terminal_area = frame.area();
                let layout = AppLayout::from_area(frame.area());

                let block = AppLayout::switch_block()
                    .title(" label switch ")
                    .title_style(Theme::title_style())
                    .border_style(Theme::border_style());
                let widget = LabelSwitchWidget::new()
                    .block(block)
                    .padding(Insets::symmetric(1, 0));
                frame.render_stateful_widget(widget, layout.switch_area, &mut state.switch);

                let status = match &state.toast {
                    Some(toast) => Paragraph::new(toast.message.as_str()).style(Theme::toast_style()),
                    None => Paragraph::new(state.status_hint()).style(Theme::status_bar_style()),
                };
                frame.render_widget(status, layout.status_area);
            })?;
        }

        let settling = state.switch.is_settling();
        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(_, _) => state.dirty = true,
                    AppEvent::FocusLost => handler::cancel_pointer(&mut state),
                    AppEvent::Tick => state.expire_toast(Instant::now()),
                }
            }

            Some(change) = change_rx.recv() => {
                handler::handle_index_change(&mut state, change, Instant::now());
            }

            _ = frames.tick(), if settling => {
                state.switch.compute_scroll(Instant::now());
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
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Some(label) = state.switch.selected_label() {
        println!("{label}");
    }

    Ok(())
}
