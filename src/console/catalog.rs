//! Phone number, file and voice operations

use super::Console;
use crate::error::{ApiError, Outcome};
use crate::models::{FileId, FileRecord, PhoneNumber, PhoneNumberId, PhoneNumberImport, Voice};
use crate::state::{Action, FileAction, PhoneNumberAction, VoiceAction};
use std::path::Path;

impl Console {
    /// Fetch every imported phone number
    pub async fn fetch_phone_numbers(&self) -> Outcome<Vec<PhoneNumber>> {
        self.run(
            "fetch_phone_numbers",
            |r| Action::PhoneNumber(PhoneNumberAction::FetchList(r)),
            self.api.list_phone_numbers(),
        )
        .await
    }

    /// Import a Twilio number
    pub async fn import_phone_number(&self, import: &PhoneNumberImport) -> Outcome<PhoneNumber> {
        self.run(
            "import_phone_number",
            |r| Action::PhoneNumber(PhoneNumberAction::Import(r)),
            self.api.import_phone_number(import),
        )
        .await
    }

    /// Remove an imported number
    pub async fn remove_phone_number(&self, id: PhoneNumberId) -> Outcome<()> {
        self.run(
            "remove_phone_number",
            |r| Action::PhoneNumber(PhoneNumberAction::Remove(r)),
            async {
                self.api.remove_phone_number(id).await?;
                Ok::<_, ApiError>(id)
            },
        )
        .await
        .map(|_| ())
    }

    /// Change the label of an imported number
    pub async fn update_phone_number_label(
        &self,
        id: PhoneNumberId,
        label: &str,
    ) -> Outcome<PhoneNumber> {
        self.run(
            "update_phone_number_label",
            |r| Action::PhoneNumber(PhoneNumberAction::UpdateLabel(r)),
            self.api.update_phone_number_label(id, label),
        )
        .await
    }

    /// Fetch every knowledge-base file
    pub async fn fetch_files(&self) -> Outcome<Vec<FileRecord>> {
        self.run(
            "fetch_files",
            |r| Action::File(FileAction::FetchList(r)),
            self.api.list_files(),
        )
        .await
    }

    /// Upload a knowledge-base file
    pub async fn upload_file(&self, path: &Path) -> Outcome<FileRecord> {
        self.run(
            "upload_file",
            |r| Action::File(FileAction::Upload(r)),
            self.api.upload_file(path),
        )
        .await
    }

    /// Delete a knowledge-base file
    pub async fn delete_file(&self, id: FileId) -> Outcome<()> {
        self.run(
            "delete_file",
            |r| Action::File(FileAction::Delete(r)),
            async {
                self.api.delete_file(id).await?;
                Ok::<_, ApiError>(id)
            },
        )
        .await
        .map(|_| ())
    }

    /// Fetch every available voice
    pub async fn fetch_voices(&self) -> Outcome<Vec<Voice>> {
        self.run(
            "fetch_voices",
            |r| Action::Voice(VoiceAction::FetchList(r)),
            self.api.list_voices(),
        )
        .await
    }
}
