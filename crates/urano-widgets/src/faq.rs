use std::collections::HashSet;

use urano_core::{MutableState, State};

use crate::error::WidgetError;

/// Accordion with at most one open entry.
pub struct FaqAccordion {
    ids: Vec<String>,
    open: MutableState<Option<String>>,
}

impl FaqAccordion {
    /// Opens `default_open` initially, or the first entry when no default is
    /// given or the default is not one of `ids`.
    pub fn new(ids: Vec<String>, default_open: Option<&str>) -> Result<Self, WidgetError> {
        let mut seen = HashSet::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            if id.trim().is_empty() {
                return Err(WidgetError::EmptyId { index });
            }
            if !seen.insert(id.as_str()) {
                return Err(WidgetError::DuplicateId(id.clone()));
            }
        }

        let initial = match default_open {
            Some(id) if seen.contains(id) => Some(id.to_string()),
            Some(id) => {
                log::warn!("default FAQ entry `{id}` does not exist; opening the first entry");
                ids.first().cloned()
            }
            None => ids.first().cloned(),
        };
        Ok(Self {
            ids,
            open: MutableState::new(initial),
        })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn open_id(&self) -> Option<String> {
        self.open.get()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.with(|open| open.as_deref() == Some(id))
    }

    pub fn state(&self) -> State<Option<String>> {
        self.open.as_state()
    }

    /// Opens `id`, closing the current entry; toggling the open entry closes
    /// it. Unknown ids are ignored. Returns whether anything changed.
    pub fn toggle(&self, id: &str) -> bool {
        if !self.ids.iter().any(|known| known == id) {
            log::debug!("ignoring toggle for unknown FAQ entry `{id}`");
            return false;
        }
        let next = if self.is_open(id) {
            None
        } else {
            Some(id.to_string())
        };
        self.open.set_value(next)
    }

    pub fn collapse_all(&self) -> bool {
        self.open.set_value(None)
    }
}
