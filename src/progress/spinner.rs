// progress/spinner.rs
/// Braille frames cycled by the spinner.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self { frame: 0 }
    }

    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    #[cfg(test)]
    pub fn frame_index(&self) -> usize {
        self.frame
    }

    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_all_frames_and_wraps() {
        let mut spinner = Spinner::new();
        let mut seen = Vec::new();
        for _ in 0..SPINNER_FRAMES.len() {
            seen.push(spinner.frame());
            spinner.tick();
        }
        assert_eq!(seen, SPINNER_FRAMES.to_vec());
        assert_eq!(spinner.frame_index(), 0);

        for _ in 0..25 {
            spinner.tick();
        }
        assert_eq!(spinner.frame_index(), 5);
    }
}
