// form.rs
use crate::error::{FormError, SubmitError};
use crate::types::NewDrink;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Step(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    /// The drink was stored; close the form and reload the directory.
    Created,
    /// The form stays open with its contents; `message` is shown inline.
    Failed { message: String },
}

/// State of the "add a drink" form.
#[derive(Clone, Debug)]
pub struct CreationForm {
    pub name: String,
    pub steps: Vec<String>,
    pub focus: FormField,
    pub status: FormStatus,
    pub error: Option<String>,
}

impl Default for CreationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CreationForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            steps: vec![String::new()],
            focus: FormField::Name,
            status: FormStatus::Editing,
            error: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn add_step(&mut self) {
        self.steps.push(String::new());
        self.focus = FormField::Step(self.steps.len() - 1);
    }

    /// Removes a step field; the last remaining field is never removed.
    pub fn remove_step(&mut self, index: usize) {
        if self.steps.len() <= 1 || index >= self.steps.len() {
            return;
        }
        self.steps.remove(index);
        if let FormField::Step(focused) = self.focus {
            if focused >= self.steps.len() || focused > index {
                self.focus = FormField::Step(focused.saturating_sub(1));
            }
        }
    }

    pub fn remove_focused_step(&mut self) {
        if let FormField::Step(index) = self.focus {
            self.remove_step(index);
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Step(0),
            FormField::Step(i) if i + 1 < self.steps.len() => FormField::Step(i + 1),
            FormField::Step(_) => FormField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Step(self.steps.len() - 1),
            FormField::Step(0) => FormField::Name,
            FormField::Step(i) => FormField::Step(i - 1),
        };
    }

    fn focused_value(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Step(i) => &mut self.steps[i],
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !self.is_busy() {
            self.focused_value().push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if !self.is_busy() {
            self.focused_value().pop();
        }
    }

    /// Trimmed name and the trimmed, non-empty steps in their original order.
    pub fn validate(&self) -> Result<NewDrink, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }
        let steps: Vec<String> = self
            .steps
            .iter()
            .map(|step| step.trim())
            .filter(|step| !step.is_empty())
            .map(str::to_string)
            .collect();
        if steps.is_empty() {
            return Err(FormError::NoSteps);
        }
        Ok(NewDrink {
            name: name.to_string(),
            steps,
        })
    }

    /// Validates and marks the form busy. The caller sends the returned body.
    pub fn begin_submit(&mut self) -> Result<NewDrink, FormError> {
        if self.is_busy() {
            return Err(FormError::Busy);
        }
        match self.validate() {
            Ok(drink) => {
                self.status = FormStatus::Submitting;
                self.error = None;
                Ok(drink)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) -> FormOutcome {
        self.status = FormStatus::Editing;
        match result {
            Ok(()) => {
                self.error = None;
                FormOutcome::Created
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(message.clone());
                FormOutcome::Failed { message }
            }
        }
    }
}
