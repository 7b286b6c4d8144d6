// Entity models
// Plain records mirroring the backend's JSON payloads

pub mod account;
pub mod agent;
pub mod catalog;

pub use account::{
    Credentials, PasswordChange, ProfileUpdate, Session, SessionUser, Signup, UserProfile,
};
pub use agent::{Agent, AgentFunction, AgentId, AgentTask, AgentUpdate, NewAgent, TaskKind};
pub use catalog::{FileId, FileRecord, PhoneNumber, PhoneNumberId, PhoneNumberImport, Voice};
