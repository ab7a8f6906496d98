use indexmap::IndexMap;

/// Exclusive visibility over a set of tagged panels.
///
/// At most one panel is visible, and which one is a pure function of
/// `visible_tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelVisibilitySet<P> {
    panels: IndexMap<String, P>,
    visible_tag: Option<String>,
}

impl<P> PanelVisibilitySet<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            panels: IndexMap::new(),
            visible_tag: None,
        }
    }

    /// Registers `panel` under `tag`, replacing any earlier panel for that tag.
    pub fn insert(&mut self, tag: impl Into<String>, panel: P) -> Option<P> {
        self.panels.insert(tag.into(), panel)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    #[must_use]
    pub fn visible_tag(&self) -> Option<&str> {
        self.visible_tag.as_deref()
    }

    /// Hides everything, then shows the panel mapped from `tag`.
    ///
    /// Returns the now-visible panel; unknown tags leave every panel hidden.
    pub fn set_visible(&mut self, tag: &str) -> Option<&P> {
        self.visible_tag = self.panels.contains_key(tag).then(|| tag.to_owned());
        self.visible_panel()
    }

    #[must_use]
    pub fn visible_panel(&self) -> Option<&P> {
        self.visible_tag
            .as_deref()
            .and_then(|tag| self.panels.get(tag))
    }

    /// Iterates every panel with its visibility flag, in registration order.
    pub fn visibility(&self) -> impl Iterator<Item = (&str, &P, bool)> + '_ {
        let visible = self.visible_tag.as_deref();
        self.panels
            .iter()
            .map(move |(tag, panel)| (tag.as_str(), panel, Some(tag.as_str()) == visible))
    }
}

impl<P> Default for PanelVisibilitySet<P> {
    fn default() -> Self {
        Self::new()
    }
}
