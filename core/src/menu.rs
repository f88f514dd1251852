//! View-model for the expandable course menu and its checklist.
//!
//! Presentation code renders a `MenuSection` and feeds clicks back in as
//! `MenuEvent`s. State lives here, not in the rendered elements.

use serde::{Deserialize, Serialize};

/// A checkable entry inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub checked: bool,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.checked {
            "check-filled"
        } else {
            "check-outline"
        }
    }

    pub fn tone(&self) -> &'static str {
        if self.checked {
            "fifth"
        } else {
            "secondary"
        }
    }
}

/// A titled section whose items are shown only while expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub title: String,
    pub expanded: bool,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    ToggleSection,
    ToggleItem(usize),
}

impl MenuSection {
    pub fn new(title: impl Into<String>, items: impl IntoIterator<Item = MenuItem>) -> Self {
        Self {
            title: title.into(),
            expanded: true,
            items: items.into_iter().collect(),
        }
    }

    /// Next state after `event`. Unknown item indices leave the state as is.
    pub fn apply(mut self, event: MenuEvent) -> Self {
        match event {
            MenuEvent::ToggleSection => self.expanded = !self.expanded,
            MenuEvent::ToggleItem(index) => {
                if let Some(item) = self.items.get_mut(index) {
                    item.checked = !item.checked;
                }
            }
        }
        self
    }

    /// Items currently shown.
    pub fn visible_items(&self) -> &[MenuItem] {
        if self.expanded {
            &self.items
        } else {
            &[]
        }
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|i| i.checked).count()
    }
}
