mod scheduler;
mod spinner;
mod state;

pub use scheduler::{run_spinner, run_steps};
pub use spinner::Spinner;
pub use state::StepProgress;

#[cfg(test)]
pub use spinner::SPINNER_FRAMES;
#[cfg(test)]
pub use state::StepIndicator;
