//! Phone number, file and voice endpoints

use super::client::ApiClient;
use super::file_part;
use crate::error::ApiError;
use crate::models::{FileId, FileRecord, PhoneNumber, PhoneNumberId, PhoneNumberImport, Voice};
use reqwest::multipart::Form;
use serde_json::json;
use std::path::Path;

impl ApiClient {
    /// GET /twilio/numbers
    pub async fn list_phone_numbers(&self) -> Result<Vec<PhoneNumber>, ApiError> {
        self.get("/twilio/numbers").await
    }

    /// POST /twilio/numbers
    pub async fn import_phone_number(
        &self,
        import: &PhoneNumberImport,
    ) -> Result<PhoneNumber, ApiError> {
        self.post("/twilio/numbers", import).await
    }

    /// DELETE /twilio/numbers/:id
    pub async fn remove_phone_number(&self, id: PhoneNumberId) -> Result<(), ApiError> {
        self.delete(&format!("/twilio/numbers/{}", id)).await
    }

    /// PATCH /twilio/numbers/:id with a new label
    pub async fn update_phone_number_label(
        &self,
        id: PhoneNumberId,
        label: &str,
    ) -> Result<PhoneNumber, ApiError> {
        self.patch(&format!("/twilio/numbers/{}", id), &json!({ "label": label }))
            .await
    }

    /// GET /file
    pub async fn list_files(&self) -> Result<Vec<FileRecord>, ApiError> {
        self.get("/file").await
    }

    /// POST /file (multipart field `file`)
    pub async fn upload_file(&self, path: &Path) -> Result<FileRecord, ApiError> {
        let form = Form::new().part("file", file_part(path).await?);
        self.upload("/file", form).await
    }

    /// DELETE /file/:id
    pub async fn delete_file(&self, id: FileId) -> Result<(), ApiError> {
        self.delete(&format!("/file/{}", id)).await
    }

    /// GET /voice
    pub async fn list_voices(&self) -> Result<Vec<Voice>, ApiError> {
        self.get("/voice").await
    }
}
