// progress/state.rs

/// Where a step sequence currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    InProgress(usize),
    AllDone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepIndicator {
    Done,
    InProgress,
    Pending,
}

impl StepIndicator {
    /// Glyph for the step row; the in-progress step shows the spinner frame.
    pub fn get_symbol_and_color<'a>(&self, spinner_frame: &'a str) -> (&'a str, ratatui::style::Color) {
        use ratatui::style::Color;
        match self {
            StepIndicator::Done => ("✔", Color::Green),
            StepIndicator::InProgress => (spinner_frame, Color::Yellow),
            StepIndicator::Pending => (" ", Color::DarkGray),
        }
    }
}

/// Progress through an ordered list of steps.
///
/// Values are never mutated in place: `advance` yields the next state. The
/// completed list only grows and always holds `0..current` in order, so at
/// most one step is in progress at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepProgress {
    total: usize,
    completed: Vec<usize>,
    current: usize,
}

impl StepProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: Vec::with_capacity(total),
            current: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn completed(&self) -> &[usize] {
        &self.completed
    }

    pub fn phase(&self) -> Phase {
        if self.current < self.total {
            Phase::InProgress(self.current)
        } else {
            Phase::AllDone
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase() == Phase::AllDone
    }

    /// Marks the in-progress step complete. `None` once everything is done.
    pub fn advance(&self) -> Option<Self> {
        match self.phase() {
            Phase::InProgress(index) => {
                let mut completed = self.completed.clone();
                completed.push(index);
                Some(Self {
                    total: self.total,
                    completed,
                    current: index + 1,
                })
            }
            Phase::AllDone => None,
        }
    }

    /// Advances only if `index` is the step currently in progress.
    pub fn complete(&self, index: usize) -> Option<Self> {
        match self.phase() {
            Phase::InProgress(current) if current == index => self.advance(),
            _ => None,
        }
    }

    pub fn indicator(&self, index: usize) -> StepIndicator {
        if index < self.current {
            StepIndicator::Done
        } else if index == self.current && index < self.total {
            StepIndicator::InProgress
        } else {
            StepIndicator::Pending
        }
    }
}
