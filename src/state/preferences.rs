// UI preference flags
// Theme, sidebar, language and section expansion, mirrored to durable storage

use super::actions::PreferencesAction;
use crate::storage::{keys, ClientStorage, StorageError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// UI preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
    /// Color theme
    pub theme: Theme,
    /// Whether the sidebar is expanded
    pub sidebar_open: bool,
    /// Interface language code
    pub language: String,
    /// Expansion state of collapsible sections, by name
    pub expanded_sections: BTreeMap<String, bool>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            sidebar_open: true,
            language: "en".to_string(),
            expanded_sections: BTreeMap::new(),
        }
    }
}

impl Preferences {
    /// Read preferences from storage, falling back to defaults per flag
    pub fn load(storage: &ClientStorage) -> Self {
        let mut prefs = Self::default();

        if let Some(raw) = storage.get(keys::THEME) {
            match raw.parse() {
                Ok(theme) => prefs.theme = theme,
                Err(e) => warn!("Ignoring stored theme: {}", e),
            }
        }
        if let Some(raw) = storage.get(keys::SIDEBAR_OPEN) {
            match raw.parse() {
                Ok(open) => prefs.sidebar_open = open,
                Err(_) => warn!("Ignoring stored sidebar flag: {}", raw),
            }
        }
        if let Some(language) = storage.get(keys::LANGUAGE) {
            if !language.trim().is_empty() {
                prefs.language = language;
            }
        }
        for (key, raw) in storage.entries_with_prefix(keys::SECTION_PREFIX) {
            if let Ok(expanded) = raw.parse() {
                let section = key.trim_start_matches(keys::SECTION_PREFIX).to_string();
                prefs.expanded_sections.insert(section, expanded);
            }
        }

        prefs
    }

    /// Whether `section` is expanded (collapsed unless set)
    pub fn is_section_expanded(&self, section: &str) -> bool {
        self.expanded_sections.get(section).copied().unwrap_or(false)
    }

    /// Apply a preference change
    pub fn reduce(&mut self, action: PreferencesAction) {
        match action {
            PreferencesAction::Restored(prefs) => *self = prefs,
            PreferencesAction::SetTheme(theme) => self.theme = theme,
            PreferencesAction::SetSidebarOpen(open) => self.sidebar_open = open,
            PreferencesAction::SetLanguage(language) => self.language = language,
            PreferencesAction::SetSectionExpanded { section, expanded } => {
                self.expanded_sections.insert(section, expanded);
            }
        }
    }
}

impl PreferencesAction {
    /// Write the flag this action changes to storage
    pub fn persist(&self, storage: &ClientStorage) -> Result<(), StorageError> {
        match self {
            PreferencesAction::Restored(_) => Ok(()),
            PreferencesAction::SetTheme(theme) => storage.set(keys::THEME, theme.as_str()),
            PreferencesAction::SetSidebarOpen(open) => {
                storage.set(keys::SIDEBAR_OPEN, open.to_string())
            }
            PreferencesAction::SetLanguage(language) => {
                storage.set(keys::LANGUAGE, language.as_str())
            }
            PreferencesAction::SetSectionExpanded { section, expanded } => storage.set(
                &format!("{}{}", keys::SECTION_PREFIX, section),
                expanded.to_string(),
            ),
        }
    }
}
