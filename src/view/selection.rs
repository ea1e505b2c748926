//! Tab and earthquake sub-view selection.
//!
//! Both are plain state machines driven only by user input. Changing either
//! one picks which already-built view is shown; neither ever triggers a fetch.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::i18n::UiKey;

/// Content category shown in the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Earthquake,
    Weather,
    Shelter,
    Checklist,
}

impl Tab {
    /// Navigation order.
    pub const ALL: [Tab; 4] = [Tab::Earthquake, Tab::Weather, Tab::Shelter, Tab::Checklist];

    pub fn label_key(self) -> UiKey {
        match self {
            Tab::Earthquake => UiKey::Earthquake,
            Tab::Weather => UiKey::Weather,
            Tab::Shelter => UiKey::Shelter,
            Tab::Checklist => UiKey::Checklist,
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .iter()
            .copied()
            .find(|tab| tab.label_key().as_str() == s)
            .ok_or_else(|| format!("unknown tab: {s}"))
    }
}

/// Earthquake panel sub-view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuakeMode {
    #[default]
    List,
    Map,
}

impl QuakeMode {
    pub fn toggled(self) -> QuakeMode {
        match self {
            QuakeMode::List => QuakeMode::Map,
            QuakeMode::Map => QuakeMode::List,
        }
    }

    pub fn label_key(self) -> UiKey {
        match self {
            QuakeMode::List => UiKey::ListView,
            QuakeMode::Map => UiKey::MapView,
        }
    }
}

/// Current view selection for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewSelection {
    pub tab: Tab,
    pub quake_mode: QuakeMode,
}

impl ViewSelection {
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn set_quake_mode(&mut self, mode: QuakeMode) {
        self.quake_mode = mode;
    }

    pub fn toggle_quake_mode(&mut self) {
        self.quake_mode = self.quake_mode.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_selection() {
        let selection = ViewSelection::default();
        assert_eq!(selection.tab, Tab::Earthquake);
        assert_eq!(selection.quake_mode, QuakeMode::List);
    }

    #[test]
    fn test_every_tab_reachable_from_every_tab() {
        for from in Tab::ALL {
            for to in Tab::ALL {
                let mut selection = ViewSelection {
                    tab: from,
                    ..ViewSelection::default()
                };
                selection.select_tab(to);
                assert_eq!(selection.tab, to);
            }
        }
    }

    #[test]
    fn test_quake_mode_toggles_both_ways() {
        let mut selection = ViewSelection::default();
        selection.toggle_quake_mode();
        assert_eq!(selection.quake_mode, QuakeMode::Map);
        selection.toggle_quake_mode();
        assert_eq!(selection.quake_mode, QuakeMode::List);
    }

    #[test]
    fn test_tab_change_keeps_quake_mode() {
        let mut selection = ViewSelection::default();
        selection.set_quake_mode(QuakeMode::Map);
        selection.select_tab(Tab::Weather);
        selection.select_tab(Tab::Earthquake);
        assert_eq!(selection.quake_mode, QuakeMode::Map);
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("checklist".parse::<Tab>(), Ok(Tab::Checklist));
        assert!("settings".parse::<Tab>().is_err());
    }
}
