use serde::{Deserialize, Serialize};

/// Single-open accordion state over `section_count` sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccordionState {
    section_count: usize,
    open_section: Option<usize>,
}

impl AccordionState {
    #[must_use]
    pub fn new(section_count: usize) -> Self {
        Self {
            section_count,
            open_section: None,
        }
    }

    /// Starts with `open_section` expanded; out-of-range sections are ignored.
    #[must_use]
    pub fn with_open(section_count: usize, open_section: Option<usize>) -> Self {
        Self {
            section_count,
            open_section: open_section.filter(|&section| section < section_count),
        }
    }

    #[must_use]
    pub fn section_count(self) -> usize {
        self.section_count
    }

    #[must_use]
    pub fn open_section(self) -> Option<usize> {
        self.open_section
    }

    #[must_use]
    pub fn is_open(self, section: usize) -> bool {
        self.open_section == Some(section)
    }

    /// Open section closes; anything else opens and implicitly closes the
    /// previously open one.
    #[must_use]
    pub fn toggle(self, section: usize) -> Self {
        if section >= self.section_count {
            return self;
        }
        let open_section = if self.open_section == Some(section) {
            None
        } else {
            Some(section)
        };
        Self {
            section_count: self.section_count,
            open_section,
        }
    }
}
