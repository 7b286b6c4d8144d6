// State management module
// Slices, actions, reducers, the store and the agent cache

pub mod actions;
pub mod agents;
pub mod cache;
pub mod preferences;
pub mod root;
pub mod slice;
pub mod store;

pub use actions::{
    Action, AgentAction, AuthAction, FileAction, PhoneNumberAction, PreferencesAction,
    ProfileAction, VoiceAction,
};
pub use agents::AgentState;
pub use cache::EntityCache;
pub use preferences::{Preferences, Theme};
pub use root::RootState;
pub use slice::{Phase, Request, RequestStatus, Slice, Ticket};
pub use store::Store;
