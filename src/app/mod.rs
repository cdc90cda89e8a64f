mod manager;
mod run;

pub use manager::{AppEvent, DrinkMaker, Popup};
pub use run::run_app;
