use std::collections::BTreeSet;

/// Post ids the user marked for the next draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flips one post and returns its new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Selects every visible post unless all of them already are, in which case
    /// they are all deselected.
    pub fn toggle_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a str> + Clone) {
        let mut visible_ids = visible.clone().into_iter().peekable();
        if visible_ids.peek().is_none() {
            return;
        }

        let all_selected = visible.clone().into_iter().all(|id| self.ids.contains(id));
        for id in visible {
            if all_selected {
                self.ids.remove(id);
            } else {
                self.ids.insert(id.to_string());
            }
        }
    }

    pub fn retain_visible<'a>(&mut self, visible: impl IntoIterator<Item = &'a str>) {
        let keep: BTreeSet<&str> = visible.into_iter().collect();
        self.ids.retain(|id| keep.contains(id.as_str()));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn summary(&self) -> String {
        match self.ids.len() {
            n @ (0 | 1) => format!("{n} publication sélectionnée"),
            n => format!("{n} publications sélectionnées"),
        }
    }
}
