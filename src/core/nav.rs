use serde::{Deserialize, Serialize};

/// Open/closed flag of the collapsible navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavMenuState {
    open: bool,
}

impl NavMenuState {
    #[must_use]
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    #[must_use]
    pub fn closed(self) -> Self {
        Self { open: false }
    }
}
