// src/app/manager.rs
use crate::config::AppConfig;
use crate::directory::{DirectoryLoader, DirectorySource, LoadStatus, LoadTicket};
use crate::error::{LoadError, SubmitError};
use crate::form::{CreationForm, FormOutcome};
use crate::progress::{run_spinner, run_steps, Spinner, StepProgress};
use crate::types::{AppMode, Directory, ScrollDirection};
use crate::utils::logging::{LogBuffer, Logger};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

/// Results of background work, applied on the UI thread.
#[derive(Debug)]
pub enum AppEvent {
    DirectoryLoaded {
        ticket: LoadTicket,
        result: Result<Directory, LoadError>,
    },
    StepCompleted {
        popup: u64,
        index: usize,
    },
    /// `None` ticks the app-wide busy spinner.
    SpinnerTick {
        popup: Option<u64>,
    },
    DrinkSubmitted(Result<(), SubmitError>),
}

/// The step popup for one selected drink.
///
/// Owns the timers animating it: dropping the popup cancels its token, so no
/// event from a retired popup can change state.
#[derive(Debug)]
pub struct Popup {
    pub id: u64,
    pub title: String,
    pub steps: Vec<String>,
    pub progress: StepProgress,
    pub spinner: Spinner,
    token: CancellationToken,
}

impl Popup {
    #[cfg(test)]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for Popup {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

pub struct DrinkMaker {
    pub config: AppConfig,
    pub loader: DirectoryLoader,
    pub mode: AppMode,
    pub selected: usize,
    pub popup: Option<Popup>,
    pub form: Option<CreationForm>,
    pub busy_spinner: Spinner,
    pub log_scroll: usize,
    logs: LogBuffer,
    events: UnboundedSender<AppEvent>,
    next_popup_id: u64,
    shutdown: CancellationToken,
}

impl DrinkMaker {
    pub fn new(
        config: AppConfig,
        source: DirectorySource,
        logs: LogBuffer,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            config,
            loader: DirectoryLoader::new(source),
            mode: AppMode::Normal,
            selected: 0,
            popup: None,
            form: None,
            busy_spinner: Spinner::new(),
            log_scroll: 0,
            logs,
            events,
            next_popup_id: 0,
            shutdown: CancellationToken::new(),
        }
    }

    /// Starts the busy spinner and the first directory load.
    pub fn start(&mut self) {
        let events = self.events.clone();
        let token = self.shutdown.child_token();
        let cadence = self.config.spinner_cadence();
        tokio::spawn(run_spinner(cadence, token, move || {
            let _ = events.send(AppEvent::SpinnerTick { popup: None });
        }));

        self.log(&format!(
            "Loading drinks from {}",
            self.loader.source().describe()
        ));
        self.refresh();
    }

    /// Cancels every timer owned by the app.
    pub fn stop(&mut self) {
        self.popup = None;
        self.shutdown.cancel();
    }

    pub fn logs(&self) -> &[String] {
        self.logs.lines()
    }

    pub fn log(&mut self, message: &str) {
        self.logs.log(message);
        self.scroll_to_bottom();
    }

    pub fn debug_log(&mut self, message: &str) {
        self.logs.debug_log(message);
        self.scroll_to_bottom();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.log_scroll = self.logs.lines().len().saturating_sub(1);
    }

    pub fn scroll_logs(&mut self, direction: ScrollDirection) {
        let max_scroll = self.logs.lines().len().saturating_sub(1);

        match direction {
            ScrollDirection::Up => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
            }
            ScrollDirection::Down => {
                if self.log_scroll < max_scroll {
                    self.log_scroll += 1;
                }
            }
            ScrollDirection::PageUp => {
                self.log_scroll = self.log_scroll.saturating_sub(10);
            }
            ScrollDirection::PageDown => {
                self.log_scroll = (self.log_scroll + 10).min(max_scroll);
            }
            ScrollDirection::Bottom => {
                self.log_scroll = max_scroll;
            }
            ScrollDirection::Top => {
                self.log_scroll = 0;
            }
        }
    }

    /// Drink names in display order.
    pub fn drink_names(&self) -> Vec<String> {
        self.loader.directory().keys().cloned().collect()
    }

    pub fn select_next(&mut self) {
        let count = self.loader.directory().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.loader.directory().len();
        if count > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// Re-fetches the whole directory in the background.
    pub fn refresh(&mut self) {
        let ticket = self.loader.begin_refresh();
        let source = self.loader.source().clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch().await;
            let _ = events.send(AppEvent::DirectoryLoaded { ticket, result });
        });
    }

    /// Opens the highlighted drink. Does nothing unless the list is on screen.
    pub fn open_selected(&mut self) {
        if *self.loader.status() != LoadStatus::Ready {
            return;
        }
        if let Some(name) = self.drink_names().get(self.selected).cloned() {
            self.open_popup(&name);
        }
    }

    /// Opens the step popup for `name`, retiring any popup already open.
    pub fn open_popup(&mut self, name: &str) {
        let Some(steps) = self.loader.directory().get(name).cloned() else {
            self.log(&format!("Error: unknown drink {}", name));
            return;
        };

        // Dropping the previous popup cancels its timers.
        self.popup = None;

        self.next_popup_id += 1;
        let id = self.next_popup_id;
        let token = self.shutdown.child_token();

        let events = self.events.clone();
        tokio::spawn(run_steps(
            steps.len(),
            self.config.dwell(),
            token.clone(),
            move |index| {
                let _ = events.send(AppEvent::StepCompleted { popup: id, index });
            },
        ));

        let events = self.events.clone();
        tokio::spawn(run_spinner(
            self.config.spinner_cadence(),
            token.clone(),
            move || {
                let _ = events.send(AppEvent::SpinnerTick { popup: Some(id) });
            },
        ));

        self.debug_log(&format!("Making {} ({} steps)", name, steps.len()));
        self.popup = Some(Popup {
            id,
            title: name.to_string(),
            progress: StepProgress::new(steps.len()),
            steps,
            spinner: Spinner::new(),
            token,
        });
        self.mode = AppMode::Popup;
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
        self.mode = AppMode::Normal;
    }

    pub fn open_form(&mut self) {
        if self.loader.source().client().is_none() {
            self.log("Error: adding drinks needs the remote backend (--source remote)");
            return;
        }
        self.form = Some(CreationForm::new());
        self.mode = AppMode::CreateDrink;
    }

    /// Closes the form unless a submission is still outstanding.
    pub fn cancel_form(&mut self) {
        if self.form.as_ref().is_some_and(CreationForm::is_busy) {
            return;
        }
        self.form = None;
        self.mode = AppMode::Normal;
    }

    pub fn submit_form(&mut self) {
        let Some(client) = self.loader.source().client().cloned() else {
            return;
        };
        let Some(form) = self.form.as_mut() else {
            return;
        };

        match form.begin_submit() {
            Ok(drink) => {
                self.log(&format!("Adding {} ({} steps)", drink.name, drink.steps.len()));
                let events = self.events.clone();
                tokio::spawn(async move {
                    let result = client.create_drink(&drink).await;
                    let _ = events.send(AppEvent::DrinkSubmitted(result));
                });
            }
            Err(e) => self.debug_log(&format!("Form rejected: {}", e)),
        }
    }

    /// Applies every event waiting in `receiver`.
    pub fn drain_events(&mut self, receiver: &mut UnboundedReceiver<AppEvent>) {
        while let Ok(event) = receiver.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DirectoryLoaded { ticket, result } => {
                let summary = match &result {
                    Ok(directory) => format!("Successfully loaded {} drinks", directory.len()),
                    Err(e) => format!("Error fetching drinks: {}", e),
                };
                if self.loader.finish(ticket, result) {
                    self.log(&summary);
                    let count = self.loader.directory().len();
                    if self.selected >= count {
                        self.selected = count.saturating_sub(1);
                    }
                } else {
                    self.debug_log("Discarded result of a superseded refresh");
                }
            }
            AppEvent::StepCompleted { popup, index } => {
                let Some(current) = self.popup.as_mut().filter(|p| p.id == popup) else {
                    return;
                };
                if let Some(next) = current.progress.complete(index) {
                    current.progress = next;
                    if current.progress.is_done() {
                        let title = current.title.clone();
                        self.log(&format!("{} is ready", title));
                    }
                }
            }
            AppEvent::SpinnerTick { popup: None } => self.busy_spinner.tick(),
            AppEvent::SpinnerTick { popup: Some(id) } => {
                if let Some(current) = self.popup.as_mut().filter(|p| p.id == id) {
                    current.spinner.tick();
                }
            }
            AppEvent::DrinkSubmitted(result) => {
                if let Err(e) = &result {
                    self.log(&format!("Error: failed to add drink: {}", e));
                }
                let Some(form) = self.form.as_mut() else {
                    return;
                };
                match form.finish_submit(result) {
                    FormOutcome::Created => {
                        let name = form.name.trim().to_string();
                        self.form = None;
                        if self.mode == AppMode::CreateDrink {
                            self.mode = AppMode::Normal;
                        }
                        self.log(&format!("{} added successfully", name));
                        self.refresh();
                    }
                    FormOutcome::Failed { .. } => {}
                }
            }
        }
    }

    pub fn status_line(&self) -> String {
        match self.loader.status() {
            LoadStatus::Loading => format!("{} Loading drinks...", self.busy_spinner.frame()),
            LoadStatus::Ready => format!("{} drinks available", self.loader.directory().len()),
            LoadStatus::Error(message) => message.clone(),
        }
    }
}

impl Drop for DrinkMaker {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
