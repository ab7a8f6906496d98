use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};

/// One selectable choice of an exclusive-choice group, parsed once at mount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub external_id: String,
    pub display_label: String,
}

impl ChoiceOption {
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        external_id: impl Into<String>,
        display_label: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            external_id: external_id.into(),
            display_label: display_label.into(),
        }
    }
}

/// Current selection of one named radio group.
///
/// `selected_index`, when present, always points into `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSelectionModel")]
pub struct SelectionModel {
    group_name: String,
    options: Vec<ChoiceOption>,
    selected_index: Option<usize>,
}

#[derive(Deserialize)]
struct RawSelectionModel {
    group_name: String,
    options: Vec<ChoiceOption>,
    selected_index: Option<usize>,
}

impl TryFrom<RawSelectionModel> for SelectionModel {
    type Error = WidgetError;

    fn try_from(raw: RawSelectionModel) -> WidgetResult<Self> {
        let mut model = Self::new(raw.group_name, raw.options);
        if let Some(index) = raw.selected_index {
            model.select(index)?;
        }
        Ok(model)
    }
}

impl SelectionModel {
    #[must_use]
    pub fn new(group_name: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self {
            group_name: group_name.into(),
            options,
            selected_index: None,
        }
    }

    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    #[must_use]
    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    #[must_use]
    pub fn current(&self) -> Option<&ChoiceOption> {
        self.selected_index.map(|index| &self.options[index])
    }

    /// Records a "selection changed" event for the option at `index`.
    pub fn select(&mut self, index: usize) -> WidgetResult<&ChoiceOption> {
        if index >= self.options.len() {
            return Err(WidgetError::InvalidData(format!(
                "option index {index} out of range for group `{}` ({} options)",
                self.group_name,
                self.options.len()
            )));
        }
        self.selected_index = Some(index);
        Ok(&self.options[index])
    }

    /// Re-reads the checked flags of the group's inputs, in option order.
    ///
    /// Native radio semantics guarantee at most one checked input; the first
    /// checked flag wins if a host reports more. Returns `true` when the
    /// selection changed.
    pub fn sync_checked<I>(&mut self, checked: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        let next = checked
            .into_iter()
            .take(self.options.len())
            .position(|is_checked| is_checked);
        let changed = next != self.selected_index;
        self.selected_index = next;
        changed
    }
}
