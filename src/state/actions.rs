//! Actions accepted by the store
//!
//! One closed enum per slice, wrapped by `Action`. Reducers match on them
//! exhaustively, so adding an operation is a compile error until every
//! reducer handles it.

use super::preferences::{Preferences, Theme};
use super::slice::{Request, Ticket};
use crate::models::{
    Agent, AgentId, FileId, FileRecord, PhoneNumber, PhoneNumberId, Session, UserProfile, Voice,
};

/// Authentication slice actions
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    /// Session loaded from storage at startup
    Restored(Session),
    /// Login request
    Login(Request<Session>),
    /// Signup request
    Signup(Request<Session>),
    /// Password change request
    ChangePassword(Request<()>),
    /// Account deletion request
    DeleteAccount(Request<()>),
}

/// Agent slice actions
#[derive(Debug, Clone, PartialEq)]
pub enum AgentAction {
    /// Make `id` the active agent
    SetActiveId(AgentId),
    /// Fetch every agent
    FetchList(Request<Vec<Agent>>),
    /// Fetch one agent into the detail record
    Fetch(Request<Agent>),
    /// Create an agent
    Create(Request<Agent>),
    /// Update a subset of an agent's fields
    Update(Request<Agent>),
    /// Delete an agent
    Delete(Request<AgentId>),
}

/// Profile slice actions
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileAction {
    /// Fetch the profile
    Fetch(Request<UserProfile>),
    /// Update profile fields
    Update(Request<UserProfile>),
    /// Replace the avatar
    UpdateAvatar(Request<UserProfile>),
}

/// Phone number slice actions
#[derive(Debug, Clone, PartialEq)]
pub enum PhoneNumberAction {
    /// Fetch every number
    FetchList(Request<Vec<PhoneNumber>>),
    /// Import a number
    Import(Request<PhoneNumber>),
    /// Remove a number
    Remove(Request<PhoneNumberId>),
    /// Relabel a number
    UpdateLabel(Request<PhoneNumber>),
}

/// File slice actions
#[derive(Debug, Clone, PartialEq)]
pub enum FileAction {
    /// Fetch every file
    FetchList(Request<Vec<FileRecord>>),
    /// Upload a file
    Upload(Request<FileRecord>),
    /// Delete a file
    Delete(Request<FileId>),
}

/// Voice slice actions
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceAction {
    /// Fetch every voice
    FetchList(Request<Vec<Voice>>),
}

/// UI preference actions
#[derive(Debug, Clone, PartialEq)]
pub enum PreferencesAction {
    /// Preferences loaded from storage at startup
    Restored(Preferences),
    /// Switch theme
    SetTheme(Theme),
    /// Open or close the sidebar
    SetSidebarOpen(bool),
    /// Switch interface language
    SetLanguage(String),
    /// Expand or collapse a named section
    SetSectionExpanded {
        /// Section name
        section: String,
        /// New state
        expanded: bool,
    },
}

/// Everything the store can be asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Authentication slice
    Auth(AuthAction),
    /// Agent slice
    Agent(AgentAction),
    /// Profile slice
    Profile(ProfileAction),
    /// Phone number slice
    PhoneNumber(PhoneNumberAction),
    /// File slice
    File(FileAction),
    /// Voice slice
    Voice(VoiceAction),
    /// UI preferences
    Preferences(PreferencesAction),
    /// Clear every entity slice (logout); requests older than the ticket are ignored
    Reset(Ticket),
}

impl Action {
    /// True when the action starts a request
    pub fn is_pending(&self) -> bool {
        match self {
            Action::Auth(action) => match action {
                AuthAction::Restored(_) => false,
                AuthAction::Login(r) | AuthAction::Signup(r) => r.is_pending(),
                AuthAction::ChangePassword(r) | AuthAction::DeleteAccount(r) => r.is_pending(),
            },
            Action::Agent(action) => match action {
                AgentAction::SetActiveId(_) => false,
                AgentAction::FetchList(r) => r.is_pending(),
                AgentAction::Fetch(r) | AgentAction::Create(r) | AgentAction::Update(r) => {
                    r.is_pending()
                }
                AgentAction::Delete(r) => r.is_pending(),
            },
            Action::Profile(
                ProfileAction::Fetch(r) | ProfileAction::Update(r) | ProfileAction::UpdateAvatar(r),
            ) => r.is_pending(),
            Action::PhoneNumber(action) => match action {
                PhoneNumberAction::FetchList(r) => r.is_pending(),
                PhoneNumberAction::Import(r) | PhoneNumberAction::UpdateLabel(r) => r.is_pending(),
                PhoneNumberAction::Remove(r) => r.is_pending(),
            },
            Action::File(action) => match action {
                FileAction::FetchList(r) => r.is_pending(),
                FileAction::Upload(r) => r.is_pending(),
                FileAction::Delete(r) => r.is_pending(),
            },
            Action::Voice(VoiceAction::FetchList(r)) => r.is_pending(),
            Action::Preferences(_) | Action::Reset(_) => false,
        }
    }
}
