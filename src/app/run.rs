use super::{AppEvent, DrinkMaker};
use crate::types::{AppMode, ScrollDirection};
use crate::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::UnboundedReceiver;

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: DrinkMaker,
    mut events: UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(30);

    app.start();

    loop {
        app.drain_events(&mut events);

        terminal.draw(|f| ui::render_all(f, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(&mut app, key) {
                    app.stop();
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

/// Applies one key press. Returns true when the user asked to quit.
pub fn handle_key(app: &mut DrinkMaker, key: KeyEvent) -> bool {
    match app.mode {
        AppMode::ViewLogs => match key.code {
            KeyCode::Esc | KeyCode::Char('l') | KeyCode::Char('L') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up => app.scroll_logs(ScrollDirection::Up),
            KeyCode::Down => app.scroll_logs(ScrollDirection::Down),
            KeyCode::PageUp => app.scroll_logs(ScrollDirection::PageUp),
            KeyCode::PageDown => app.scroll_logs(ScrollDirection::PageDown),
            KeyCode::Home => app.scroll_logs(ScrollDirection::Top),
            KeyCode::End => app.scroll_logs(ScrollDirection::Bottom),
            _ => {}
        },
        AppMode::Normal => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('l') | KeyCode::Char('L') => {
                app.mode = AppMode::ViewLogs;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                app.log("Refreshing drinks");
                app.refresh();
            }
            KeyCode::Char('n') | KeyCode::Char('+') => app.open_form(),
            KeyCode::Up => app.select_previous(),
            KeyCode::Down => app.select_next(),
            KeyCode::Enter => app.open_selected(),
            _ => {}
        },
        AppMode::Popup => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('c') => app.close_popup(),
            _ => {}
        },
        AppMode::CreateDrink => {
            let Some(form) = app.form.as_mut() else {
                app.mode = AppMode::Normal;
                return false;
            };
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Esc => app.cancel_form(),
                KeyCode::Enter => app.submit_form(),
                KeyCode::Tab | KeyCode::Down => form.next_field(),
                KeyCode::BackTab | KeyCode::Up => form.previous_field(),
                KeyCode::Char('a') if ctrl => {
                    if !form.is_busy() {
                        form.add_step();
                    }
                }
                KeyCode::Char('d') if ctrl => {
                    if !form.is_busy() {
                        form.remove_focused_step();
                    }
                }
                KeyCode::Char(c) if !ctrl => form.push_char(c),
                KeyCode::Backspace => form.pop_char(),
                _ => {}
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::directory::DirectorySource;
    use crate::form::FormField;
    use crate::utils::logging::LogBuffer;
    use tokio::sync::mpsc;

    fn press(app: &mut DrinkMaker, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    async fn loaded_app() -> (DrinkMaker, UnboundedReceiver<AppEvent>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = DrinkMaker::new(
            AppConfig::default(),
            DirectorySource::Bundled,
            LogBuffer::new(None, false),
            tx,
        );
        app.refresh();
        let event = rx.recv().await.unwrap();
        app.handle_event(event);
        (app, rx)
    }

    #[tokio::test]
    async fn navigation_wraps_and_opens_popup() {
        let (mut app, _rx) = loaded_app().await;
        assert_eq!(app.drink_names(), vec!["Coffee", "Hot Chocolate", "Lemon Tea"]);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Down);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Popup);
        assert_eq!(app.popup.as_ref().unwrap().title, "Hot Chocolate");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.popup.is_none());

        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[tokio::test]
    async fn log_view_toggles() {
        let (mut app, _rx) = loaded_app().await;
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.mode, AppMode::ViewLogs);
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[tokio::test]
    async fn form_keys_edit_fields() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let config = AppConfig::default();
        let source = DirectorySource::from_config(&config).unwrap();
        let mut app = DrinkMaker::new(config, source, LogBuffer::new(None, false), tx);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, AppMode::CreateDrink);
        for c in "Chai".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('B'));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
        );

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.name, "Chai");
        assert_eq!(form.steps, vec!["B", ""]);
        assert_eq!(form.focus, FormField::Step(1));

        press(&mut app, KeyCode::Esc);
        assert!(app.form.is_none());
        assert_eq!(app.mode, AppMode::Normal);
    }
}
