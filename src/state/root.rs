//! Root state and reducer
//!
//! Composes every slice under a fixed field. Each slice is the only place
//! its entity lives; no entity is copied into another slice.

use super::actions::{
    Action, AuthAction, FileAction, PhoneNumberAction, ProfileAction, VoiceAction,
};
use super::agents::AgentState;
use super::preferences::Preferences;
use super::slice::Slice;
use crate::models::{FileRecord, PhoneNumber, Session, UserProfile, Voice};
use serde::Serialize;

/// Entire client-side state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RootState {
    /// Current session
    pub auth: Slice<Session>,
    /// Agents
    pub agents: AgentState,
    /// Signed-in user's profile
    pub profile: Slice<UserProfile>,
    /// Imported phone numbers
    pub phone_numbers: Slice<Vec<PhoneNumber>>,
    /// Knowledge-base files
    pub files: Slice<Vec<FileRecord>>,
    /// Available voices
    pub voices: Slice<Vec<Voice>>,
    /// UI preferences (survive logout)
    pub preferences: Preferences,
}

impl RootState {
    /// Apply `action`
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Auth(action) => reduce_auth(&mut self.auth, action),
            Action::Agent(action) => self.agents.reduce(action),
            Action::Profile(action) => reduce_profile(&mut self.profile, action),
            Action::PhoneNumber(action) => reduce_phone_numbers(&mut self.phone_numbers, action),
            Action::File(action) => reduce_files(&mut self.files, action),
            Action::Voice(action) => reduce_voices(&mut self.voices, action),
            Action::Preferences(action) => self.preferences.reduce(action),
            Action::Reset(fence) => {
                self.auth.reset(fence);
                self.agents.reset(fence);
                self.profile.reset(fence);
                self.phone_numbers.reset(fence);
                self.files.reset(fence);
                self.voices.reset(fence);
            }
        }
    }

    /// True when a session is loaded
    pub fn is_authenticated(&self) -> bool {
        self.auth.data.is_some()
    }
}

fn reduce_auth(slice: &mut Slice<Session>, action: AuthAction) {
    match action {
        AuthAction::Restored(session) => slice.data = Some(session),
        AuthAction::Login(request) | AuthAction::Signup(request) => slice.replace(request),
        AuthAction::ChangePassword(request) => slice.merge(request, |_, ()| {}),
        AuthAction::DeleteAccount(request) => slice.merge(request, |session, ()| *session = None),
    }
}

fn reduce_profile(slice: &mut Slice<UserProfile>, action: ProfileAction) {
    match action {
        ProfileAction::Fetch(request)
        | ProfileAction::Update(request)
        | ProfileAction::UpdateAvatar(request) => slice.replace(request),
    }
}

fn reduce_phone_numbers(slice: &mut Slice<Vec<PhoneNumber>>, action: PhoneNumberAction) {
    match action {
        PhoneNumberAction::FetchList(request) => slice.replace(request),
        PhoneNumberAction::Import(request) => slice.merge(request, |numbers, number| {
            numbers.get_or_insert_with(Vec::new).push(number);
        }),
        PhoneNumberAction::Remove(request) => slice.merge(request, |numbers, id| {
            if let Some(numbers) = numbers {
                numbers.retain(|n| n.id != id);
            }
        }),
        PhoneNumberAction::UpdateLabel(request) => slice.merge(request, |numbers, updated| {
            if let Some(slot) = numbers
                .as_mut()
                .and_then(|numbers| numbers.iter_mut().find(|n| n.id == updated.id))
            {
                *slot = updated;
            }
        }),
    }
}

fn reduce_files(slice: &mut Slice<Vec<FileRecord>>, action: FileAction) {
    match action {
        FileAction::FetchList(request) => slice.replace(request),
        FileAction::Upload(request) => slice.merge(request, |files, file| {
            files.get_or_insert_with(Vec::new).push(file);
        }),
        FileAction::Delete(request) => slice.merge(request, |files, id| {
            if let Some(files) = files {
                files.retain(|f| f.id != id);
            }
        }),
    }
}

fn reduce_voices(slice: &mut Slice<Vec<Voice>>, action: VoiceAction) {
    match action {
        VoiceAction::FetchList(request) => slice.replace(request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionUser;
    use crate::state::actions::{AgentAction, PreferencesAction};
    use crate::state::preferences::Theme;
    use crate::state::slice::{Request, RequestStatus, Ticket};

    fn t(seq: u64) -> Ticket {
        Ticket::new(seq)
    }

    fn number(id: i64, label: &str) -> PhoneNumber {
        PhoneNumber {
            id,
            number: format!("+1415555010{}", id),
            label: Some(label.to_string()),
            provider: "twilio".to_string(),
            agent_id: None,
        }
    }

    fn session() -> Session {
        Session {
            token: "abc".to_string(),
            user: SessionUser {
                email: "ops@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_phone_number_mutations() {
        let mut state = RootState::default();
        state.reduce(Action::PhoneNumber(PhoneNumberAction::FetchList(
            Request::fulfilled(t(1), vec![number(1, "Sales")]),
        )));
        state.reduce(Action::PhoneNumber(PhoneNumberAction::Import(
            Request::fulfilled(t(2), number(2, "Support")),
        )));
        state.reduce(Action::PhoneNumber(PhoneNumberAction::UpdateLabel(
            Request::fulfilled(t(3), number(1, "Inbound sales")),
        )));
        state.reduce(Action::PhoneNumber(PhoneNumberAction::Remove(
            Request::fulfilled(t(4), 2),
        )));

        assert_eq!(state.phone_numbers.data, Some(vec![number(1, "Inbound sales")]));
        assert_eq!(state.phone_numbers.status, RequestStatus::Succeeded);
    }

    #[test]
    fn test_file_upload_and_delete() {
        let file = FileRecord {
            id: 8,
            name: "faq.pdf".to_string(),
            size_bytes: 10,
            content_type: None,
            created_at: None,
        };
        let mut state = RootState::default();
        state.reduce(Action::File(FileAction::Upload(Request::pending(t(1)))));
        assert!(state.files.is_loading());
        state.reduce(Action::File(FileAction::Upload(Request::fulfilled(
            t(1),
            file.clone(),
        ))));
        assert_eq!(state.files.data, Some(vec![file]));

        state.reduce(Action::File(FileAction::Delete(Request::pending(t(2)))));
        state.reduce(Action::File(FileAction::Delete(Request::rejected(
            t(2),
            "File is in use",
        ))));
        assert_eq!(state.files.status, RequestStatus::Failed);
        assert_eq!(state.files.data.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_delete_account_clears_session() {
        let mut state = RootState::default();
        state.reduce(Action::Auth(AuthAction::Restored(session())));
        assert!(state.is_authenticated());

        state.reduce(Action::Auth(AuthAction::DeleteAccount(Request::pending(t(1)))));
        assert!(state.auth.is_loading());
        state.reduce(Action::Auth(AuthAction::DeleteAccount(Request::fulfilled(
            t(1),
            (),
        ))));
        assert!(!state.is_authenticated());
        assert_eq!(state.auth.status, RequestStatus::Succeeded);
    }

    #[test]
    fn test_change_password_keeps_session() {
        let mut state = RootState::default();
        state.reduce(Action::Auth(AuthAction::Restored(session())));
        state.reduce(Action::Auth(AuthAction::ChangePassword(Request::pending(t(1)))));
        state.reduce(Action::Auth(AuthAction::ChangePassword(Request::rejected(
            t(1),
            "Current password is wrong",
        ))));

        assert!(state.is_authenticated());
        assert_eq!(state.auth.error.as_deref(), Some("Current password is wrong"));
    }

    #[test]
    fn test_reset_keeps_preferences() {
        let mut state = RootState::default();
        state.reduce(Action::Auth(AuthAction::Restored(session())));
        state.reduce(Action::Agent(AgentAction::SetActiveId(3)));
        state.reduce(Action::Preferences(PreferencesAction::SetTheme(Theme::Dark)));
        state.reduce(Action::Voice(VoiceAction::FetchList(Request::fulfilled(
            t(1),
            vec![],
        ))));

        state.reduce(Action::Reset(t(2)));

        assert!(!state.is_authenticated());
        assert!(state.agents.active_id.is_none());
        assert!(state.voices.data.is_none());
        assert_eq!(state.voices.status, RequestStatus::Idle);
        assert_eq!(state.preferences.theme, Theme::Dark);
    }
}
