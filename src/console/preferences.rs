//! Preference operations
//!
//! Synchronous from the backend's point of view: the store is updated and
//! the flag written to storage, no request is made.

use super::Console;
use crate::state::{Action, PreferencesAction, Theme};
use crate::storage::StorageError;

impl Console {
    /// Switch the color theme
    pub async fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.apply_preference(PreferencesAction::SetTheme(theme)).await
    }

    /// Open or close the sidebar
    pub async fn set_sidebar_open(&self, open: bool) -> Result<(), StorageError> {
        self.apply_preference(PreferencesAction::SetSidebarOpen(open))
            .await
    }

    /// Switch the interface language
    pub async fn set_language(&self, language: &str) -> Result<(), StorageError> {
        self.apply_preference(PreferencesAction::SetLanguage(language.to_string()))
            .await
    }

    /// Expand or collapse a named section
    pub async fn set_section_expanded(
        &self,
        section: &str,
        expanded: bool,
    ) -> Result<(), StorageError> {
        self.apply_preference(PreferencesAction::SetSectionExpanded {
            section: section.to_string(),
            expanded,
        })
        .await
    }

    async fn apply_preference(&self, action: PreferencesAction) -> Result<(), StorageError> {
        action.persist(&self.storage)?;
        self.store.dispatch(Action::Preferences(action)).await;
        Ok(())
    }
}
