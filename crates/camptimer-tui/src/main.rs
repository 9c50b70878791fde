mod app;
mod audio;
mod ui;

use anyhow::Result;
use app::{App, AppView, InputMode, SettingsItem};
use camptimer_core::engine::{AlertEvent, AlertKind, TimerEngine};
use camptimer_core::storage::{init_data_dir, MobStorage, SettingsStorage};
use chrono::{Local, Utc};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tokio::time::Duration;
use tracing::info;

fn setup_logging() -> Result<()> {
    let mut log_path = std::env::temp_dir();
    log_path.push("camptimer.log");

    let log_file = std::fs::File::create(log_path)?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter("camptimer=trace,camptimer_core=debug")
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = crossterm::execute!(std::io::stdout(), crossterm::cursor::Show);

        tracing::error!(?panic_info, "Application panicked");

        eprintln!("A fatal error occurred: {}", panic_info);

        original_hook(panic_info);
    }));
}

#[derive(Parser, Debug)]
#[command(name = "camptimer")]
#[command(about = "CampTimer TUI - MMO mob respawn tracker", long_about = None)]
struct Args {
    /// Directory for saved timers and settings (defaults to the OS data dir)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

fn send_os_notification(title: &str, body: &str) {
    if let Err(e) = notify_rust::Notification::new()
        .summary(title)
        .body(body)
        .icon("clock")
        .timeout(notify_rust::Timeout::Milliseconds(5000))
        .show()
    {
        tracing::error!("Failed to send notification: {}", e);
    }
}

fn send_urgent_notification(title: &str, body: &str) {
    let mut notification = notify_rust::Notification::new();
    notification
        .summary(title)
        .body(body)
        .icon("alarm-clock")
        .timeout(notify_rust::Timeout::Milliseconds(10000));

    #[cfg(all(unix, not(target_os = "macos")))]
    notification.urgency(notify_rust::Urgency::Critical);

    if let Err(e) = notification.show() {
        tracing::error!("Failed to send urgent notification: {}", e);
    }
}

fn dispatch_alert(app: &mut App, alert: &AlertEvent) {
    let place = if alert.camp.is_empty() {
        alert.mob_name.clone()
    } else {
        format!("{} @ {}", alert.mob_name, alert.camp)
    };
    let expected = alert.respawn_at.with_timezone(&Local).format("%H:%M:%S");

    match alert.kind {
        AlertKind::Warning => {
            app.status_message = format!("⚠️  {} respawns soon ({})", place, expected);
            send_os_notification(
                "⏰ Respawn Soon",
                &format!("{} is expected around {}", place, expected),
            );
            audio::play_tone(audio::ToneKind::Warning);
        }
        AlertKind::Spawn => {
            app.status_message = format!("🐉 {} has spawned!", place);
            send_urgent_notification("🐉 Mob Up!", &format!("{} should be up now", place));
            audio::play_tone(audio::ToneKind::Spawn);
        }
    }
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let now = Utc::now();

    if app.input_mode == InputMode::ConfirmRemove || app.input_mode == InputMode::ConfirmClear {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if app.input_mode == InputMode::ConfirmClear {
                    app.clear_all_confirmed();
                } else {
                    app.remove_selected(now);
                }
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') => {
                app.cancel_input();
            }
            _ => {}
        }
        return;
    }

    if app.input_mode == InputMode::NewMob {
        match code {
            KeyCode::Tab | KeyCode::Down => app.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
            KeyCode::Enter => app.submit_form(now),
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.form.pop_char(),
            KeyCode::Char(c) => {
                if modifiers.contains(KeyModifiers::CONTROL) {
                    if c == 'c' {
                        app.should_quit = true;
                    }
                } else {
                    app.form.push_char(c);
                }
            }
            _ => {}
        }
        return;
    }

    if app.input_mode == InputMode::ImportPath {
        match code {
            KeyCode::Enter => app.submit_import(now),
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => {
                app.import_path.pop();
            }
            KeyCode::Char(c) => {
                if modifiers.contains(KeyModifiers::CONTROL) {
                    if c == 'c' {
                        app.should_quit = true;
                    }
                } else {
                    app.import_path.push(c);
                }
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.should_quit = true;
            }
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = !app.show_help,

        KeyCode::Char('1') => app.current_view = AppView::Mobs,
        KeyCode::Char('2') => app.current_view = AppView::History,
        KeyCode::Char('3') => app.current_view = AppView::Settings,

        _ => match app.current_view {
            AppView::Mobs | AppView::History => handle_mob_keys(app, code),
            AppView::Settings => handle_settings_keys(app, code),
        },
    }
}

fn handle_mob_keys(app: &mut App, code: KeyCode) {
    let now = Utc::now();
    match code {
        KeyCode::Down | KeyCode::Char('j') => app.select_next(now),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('r') => app.reset_selected(now),
        KeyCode::Char('d') => app.request_remove(now),
        KeyCode::Char('n') => app.toggle_notify_selected(now),
        KeyCode::Char('f') => app.toggle_filter(now),
        KeyCode::Char('i') => app.open_import_prompt(),
        KeyCode::Char('e') => app.export(now),
        KeyCode::Char('C') => app.request_clear_all(),
        _ => {}
    }
}

fn handle_settings_keys(app: &mut App, code: KeyCode) {
    let num_settings = SettingsItem::ALL.len();
    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected_setting_index = app.selected_setting_index.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.selected_setting_index = (app.selected_setting_index + 1).min(num_settings - 1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            match SettingsItem::ALL[app.selected_setting_index] {
                SettingsItem::SoundEnabled => app.toggle_sound(),
                SettingsItem::NotifyBeforeMinutes => {}
            }
        }
        KeyCode::Char('+') | KeyCode::Char('l') | KeyCode::Right => {
            if SettingsItem::ALL[app.selected_setting_index] == SettingsItem::NotifyBeforeMinutes {
                app.adjust_notify_before(1);
            }
        }
        KeyCode::Char('-') | KeyCode::Char('h') | KeyCode::Left => {
            if SettingsItem::ALL[app.selected_setting_index] == SettingsItem::NotifyBeforeMinutes {
                app.adjust_notify_before(-1);
            }
        }
        _ => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;
    setup_panic_hook();
    info!("CampTimer TUI starting up");

    let args = Args::parse();

    let data_dir = match args.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            dir
        }
        None => init_data_dir()?,
    };

    let mob_storage = MobStorage::new(data_dir.clone());
    let settings_storage = SettingsStorage::new(data_dir);
    let settings = settings_storage.load()?;
    let mobs = mob_storage.load_or_default();
    info!(count = mobs.len(), "Loaded saved camp timers");

    let engine = TimerEngine::with_mobs(mobs, settings);
    let mut app = App::new(engine, mob_storage, settings_storage);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut alert_interval = tokio::time::interval(Duration::from_secs(1));

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            _ = alert_interval.tick() => {
                let now = Utc::now();
                let alerts = app.engine.tick(now);
                if !alerts.is_empty() {
                    for alert in &alerts {
                        info!(mob = %alert.mob_name, kind = ?alert.kind, "Alert fired");
                        dispatch_alert(&mut app, alert);
                    }
                    // Latched once-per-cycle flags must survive a restart.
                    app.persist_mobs(now);
                }
            }
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            handle_key_event(&mut app, key.code, key.modifiers);
                        }
                        Event::Resize(width, height) => {
                            info!(width, height, "Terminal resized");
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
