//! Authentication and profile endpoints

use super::client::ApiClient;
use super::file_part;
use crate::error::ApiError;
use crate::models::{Credentials, PasswordChange, ProfileUpdate, Session, Signup, UserProfile};
use reqwest::multipart::Form;
use std::path::Path;

impl ApiClient {
    /// POST /auth/login
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        self.post("/auth/login", credentials).await
    }

    /// POST /auth/signup
    pub async fn signup(&self, signup: &Signup) -> Result<Session, ApiError> {
        self.post("/auth/signup", signup).await
    }

    /// POST /auth/change-password
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        self.post("/auth/change-password", change).await
    }

    /// DELETE /auth/account
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        self.delete("/auth/account").await
    }

    /// GET /auth/profile
    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.get("/auth/profile").await
    }

    /// PATCH /auth/profile
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.patch("/auth/profile", update).await
    }

    /// POST /auth/profile/avatar (multipart field `avatar`)
    pub async fn upload_avatar(&self, image: &Path) -> Result<UserProfile, ApiError> {
        let form = Form::new().part("avatar", file_part(image).await?);
        self.upload("/auth/profile/avatar", form).await
    }
}
