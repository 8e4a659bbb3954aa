use crate::mix::FoldMode;

/// What the status surface shows: the selected key, mode, and fold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Status {
    pub note: char,
    pub sharp: bool,
    pub minor: bool,
    pub fold: FoldMode,
}

impl Status {
    pub fn key_line(&self) -> String {
        format!(
            "Key:   {}{}{}",
            self.note,
            if self.sharp { '#' } else { ' ' },
            if self.minor { 'm' } else { 'M' },
        )
    }

    pub fn fold_line(&self) -> String {
        format!("Wfold: {}", self.fold.label())
    }
}

/// Sink for status text, invoked once per control tick. No feedback
/// into the engine.
pub trait StatusDisplay {
    fn render(&mut self, status: &Status);
}

/// Log-backed display; stands in for the hardware panel and only emits
/// when the status actually changed.
pub struct ConsoleDisplay {
    last: Option<Status>,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay for ConsoleDisplay {
    fn render(&mut self, status: &Status) {
        if self.last.as_ref() == Some(status) {
            return;
        }
        log::info!("{}", status.key_line());
        log::info!("{}", status.fold_line());
        self.last = Some(*status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_line_format() {
        let status = Status {
            note: 'A',
            sharp: false,
            minor: false,
            fold: FoldMode::Average,
        };
        assert_eq!(status.key_line(), "Key:   A M");

        let status = Status {
            note: 'C',
            sharp: true,
            minor: true,
            fold: FoldMode::SineFold,
        };
        assert_eq!(status.key_line(), "Key:   C#m");
    }

    #[test]
    fn fold_line_format() {
        let mut status = Status {
            note: 'A',
            sharp: false,
            minor: false,
            fold: FoldMode::Average,
        };
        assert_eq!(status.fold_line(), "Wfold: none");
        status.fold = FoldMode::SineFold;
        assert_eq!(status.fold_line(), "Wfold: sine");
        status.fold = FoldMode::TriangleFold;
        assert_eq!(status.fold_line(), "Wfold: triangle");
    }
}
