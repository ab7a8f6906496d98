use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};

/// Index state of a wrapping carousel.
///
/// `current_index` is always inside `[0, len - 1]`; `len` is at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCarouselState")]
pub struct CarouselState {
    len: usize,
    current_index: usize,
}

#[derive(Deserialize)]
struct RawCarouselState {
    len: usize,
    current_index: usize,
}

impl TryFrom<RawCarouselState> for CarouselState {
    type Error = WidgetError;

    fn try_from(raw: RawCarouselState) -> WidgetResult<Self> {
        Self::with_index(raw.len, raw.current_index)
    }
}

impl CarouselState {
    pub fn new(len: usize) -> WidgetResult<Self> {
        Self::with_index(len, 0)
    }

    pub fn with_index(len: usize, current_index: usize) -> WidgetResult<Self> {
        if len == 0 {
            return Err(WidgetError::InvalidData(
                "carousel needs at least one image".to_owned(),
            ));
        }
        if current_index >= len {
            return Err(WidgetError::InvalidData(format!(
                "carousel start index {current_index} out of range for {len} images"
            )));
        }
        Ok(Self { len, current_index })
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub fn current_index(self) -> usize {
        self.current_index
    }

    /// Returns the state pointing at `index`, or `None` when `index` is out of range.
    #[must_use]
    pub fn go_to(self, index: usize) -> Option<Self> {
        (index < self.len).then_some(Self {
            len: self.len,
            current_index: index,
        })
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self {
            len: self.len,
            current_index: (self.current_index + 1) % self.len,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let current_index = if self.current_index == 0 {
            self.len - 1
        } else {
            self.current_index - 1
        };
        Self {
            len: self.len,
            current_index,
        }
    }

    /// Applies a navigation command. `None` means the command was ignored.
    #[must_use]
    pub fn apply(self, command: CarouselCommand) -> Option<Self> {
        match command {
            CarouselCommand::GoTo(index) => self.go_to(index),
            CarouselCommand::Prev => Some(self.prev()),
            CarouselCommand::Next => Some(self.next()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarouselCommand {
    GoTo(usize),
    Prev,
    Next,
}

/// What the main viewer and indicators should show for the current index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselProjection {
    pub src: String,
    pub alt: String,
    pub active_index: usize,
}

/// Image list plus wrapping index, the state owned by the gallery widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselEngine {
    images: Vec<String>,
    alt_prefix: String,
    state: CarouselState,
}

impl CarouselEngine {
    pub fn new(images: Vec<String>, alt_prefix: impl Into<String>) -> WidgetResult<Self> {
        let state = CarouselState::new(images.len())?;
        Ok(Self {
            images,
            alt_prefix: alt_prefix.into(),
            state,
        })
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    #[must_use]
    pub fn state(&self) -> CarouselState {
        self.state
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    /// Returns `true` when the command changed (or re-selected) the index and a
    /// projection refresh is due.
    pub fn apply(&mut self, command: CarouselCommand) -> bool {
        match self.state.apply(command) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        self.apply(CarouselCommand::GoTo(index))
    }

    pub fn next(&mut self) {
        self.apply(CarouselCommand::Next);
    }

    pub fn prev(&mut self) {
        self.apply(CarouselCommand::Prev);
    }

    #[must_use]
    pub fn projection(&self) -> CarouselProjection {
        let index = self.state.current_index();
        CarouselProjection {
            src: self.images[index].clone(),
            alt: format!("{} - Image {}", self.alt_prefix, index + 1),
            active_index: index,
        }
    }
}
