//! Agent data models
//!
//! An agent is configured tab by tab (LLM, transcriber, voice, call,
//! tasks, functions), so almost every field is optional and updates carry
//! only the fields that changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for an agent
pub type AgentId = i64;

/// Post-call task kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Summarize the conversation
    Summarization,
    /// Extract structured fields from the conversation
    Extraction,
    /// Forward call data to a webhook
    Webhook,
}

/// Task run by the backend after a call ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTask {
    /// What the task does
    pub kind: TaskKind,
    /// Instructions for summarization/extraction tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Target for webhook tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// Function the agent may call during a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentFunction {
    /// Name exposed to the model
    pub name: String,
    /// Description exposed to the model
    #[serde(default)]
    pub description: String,
    /// Endpoint the backend calls
    pub url: String,
    /// HTTP method used for the call
    #[serde(default = "default_function_method")]
    pub method: String,
    /// JSON schema of the arguments
    #[serde(default)]
    pub parameters: serde_json::Value,
}

fn default_function_method() -> String {
    "POST".to_string()
}

/// Agent as returned by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name of the agent
    pub name: Option<String>,
    /// First sentence spoken when a call connects
    pub welcome_message: Option<String>,
    /// System prompt
    pub prompt: Option<String>,

    // LLM
    /// LLM provider (e.g. "openai")
    pub llm_provider: Option<String>,
    /// LLM model name
    pub llm_model: Option<String>,
    /// Sampling temperature
    pub llm_temperature: Option<f32>,
    /// Response token limit
    pub llm_max_tokens: Option<u32>,

    // Transcriber
    /// Speech-to-text provider
    pub transcriber_provider: Option<String>,
    /// Speech-to-text model
    pub transcriber_model: Option<String>,
    /// Spoken language code
    pub transcriber_language: Option<String>,
    /// Silence (ms) that ends an utterance
    pub transcriber_endpointing_ms: Option<u32>,

    // Voice
    /// Text-to-speech provider
    pub voice_provider: Option<String>,
    /// Voice identifier from the voice list
    pub voice_id: Option<String>,
    /// Speaking rate multiplier
    pub voice_speed: Option<f32>,
    /// Voice stability (0.0 - 1.0)
    pub voice_stability: Option<f32>,

    // Call handling
    /// Hang up after this many seconds of silence
    pub hangup_after_silence_secs: Option<u32>,
    /// Hard limit on call length
    pub max_call_duration_secs: Option<u32>,
    /// Number of words the caller must speak to interrupt the agent
    pub interruption_words: Option<u32>,
    /// Emit short acknowledgements while the caller talks
    pub backchanneling: Option<bool>,
    /// Background ambience played during the call
    pub ambient_noise: Option<String>,
    /// Detect voicemail and hang up
    pub voicemail_detection: Option<bool>,

    /// Tasks run after a call
    pub tasks: Option<Vec<AgentTask>>,
    /// Callable functions
    pub functions: Option<Vec<AgentFunction>>,
    /// Files used as the agent's knowledge base
    pub knowledge_base_file_ids: Option<Vec<i64>>,
    /// Phone number routed to this agent
    pub phone_number_id: Option<i64>,

    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time
    pub updated_at: Option<DateTime<Utc>>,
}

/// Creation wizard payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAgent {
    /// Display name
    pub name: String,
    /// Starting template chosen in the wizard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Initial system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Initial welcome message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
}

/// Field subset sent by an update
///
/// `None` leaves a field untouched server-side. For every field but `name`,
/// `Some(None)` is sent as `null` and clears it.
#[allow(missing_docs)] // Same fields as `Agent`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub welcome_message: Option<Option<String>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt: Option<Option<String>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub llm_provider: Option<Option<String>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub llm_model: Option<Option<String>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub llm_temperature: Option<Option<f32>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub llm_max_tokens: Option<Option<u32>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub transcriber_provider: Option<Option<String>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub transcriber_model: Option<Option<String>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub transcriber_language: Option<Option<String>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub transcriber_endpointing_ms: Option<Option<u32>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub voice_provider: Option<Option<String>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub voice_id: Option<Option<String>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub voice_speed: Option<Option<f32>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub voice_stability: Option<Option<f32>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub hangup_after_silence_secs: Option<Option<u32>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_call_duration_secs: Option<Option<u32>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub interruption_words: Option<Option<u32>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub backchanneling: Option<Option<bool>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub ambient_noise: Option<Option<String>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub voicemail_detection: Option<Option<bool>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub tasks: Option<Option<Vec<AgentTask>>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub functions: Option<Option<Vec<AgentFunction>>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub knowledge_base_file_ids: Option<Option<Vec<i64>>>,
    #[serde(
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_number_id: Option<Option<i64>>,
}

impl AgentUpdate {
    /// True when the update would not change anything
    pub fn is_empty(&self) -> bool {
        *self == AgentUpdate::default()
    }
}

/// Present-but-null becomes `Some(None)`; an absent field stays `None` via `default`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_tolerates_sparse_payload() {
        let agent: Agent = serde_json::from_str(r#"{"id": 5, "name": "Nina"}"#).unwrap();
        assert_eq!(agent.id, 5);
        assert_eq!(agent.name.as_deref(), Some("Nina"));
        assert!(agent.llm_model.is_none());
        assert!(agent.tasks.is_none());
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = AgentUpdate {
            voice_speed: Some(Some(1.25)),
            backchanneling: Some(Some(true)),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["backchanneling"], serde_json::json!(true));
        assert!(!update.is_empty());
        assert!(AgentUpdate::default().is_empty());
    }

    #[test]
    fn test_update_can_clear_fields() {
        let update: AgentUpdate =
            serde_json::from_str(r#"{"voice_id": null, "llm_model": "gpt-4o"}"#).unwrap();
        assert_eq!(update.voice_id, Some(None));
        assert_eq!(update.llm_model, Some(Some("gpt-4o".to_string())));
        assert_eq!(update.prompt, None);

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"voice_id": null, "llm_model": "gpt-4o"})
        );
    }

    #[test]
    fn test_update_rejects_unknown_fields() {
        let parsed = serde_json::from_str::<AgentUpdate>(r#"{"nmae": "typo"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_function_defaults_to_post() {
        let function: AgentFunction = serde_json::from_str(
            r#"{"name": "book_slot", "url": "https://hooks.example.com/book"}"#,
        )
        .unwrap();
        assert_eq!(function.method, "POST");
        assert!(function.parameters.is_null());
    }

    #[test]
    fn test_task_kind_lowercase() {
        let task = AgentTask {
            kind: TaskKind::Webhook,
            prompt: None,
            webhook_url: Some("https://hooks.example.com".to_string()),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains(r#""kind":"webhook""#));
        assert!(!json.contains("prompt"));
    }
}
