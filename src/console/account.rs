//! Authentication and profile operations

use super::Console;
use crate::error::{ApiError, Outcome, Rejection};
use crate::models::{Credentials, PasswordChange, ProfileUpdate, Session, Signup, UserProfile};
use crate::state::{Action, AuthAction, ProfileAction};
use std::path::Path;
use tracing::{info, warn};

impl Console {
    /// Log in and persist the returned session
    pub async fn login(&self, email: &str, password: &str) -> Outcome<Session> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let session = self
            .run(
                "login",
                |r| Action::Auth(AuthAction::Login(r)),
                async {
                    let session = self.api.login(&credentials).await?;
                    self.storage.save_session(&session)?;
                    Ok::<_, ApiError>(session)
                },
            )
            .await?;
        info!(email = %session.user.email, "Logged in");
        Ok(session)
    }

    /// Create an account and persist the returned session
    pub async fn signup(&self, signup: Signup) -> Outcome<Session> {
        self.run(
            "signup",
            |r| Action::Auth(AuthAction::Signup(r)),
            async {
                let session = self.api.signup(&signup).await?;
                self.storage.save_session(&session)?;
                Ok::<_, ApiError>(session)
            },
        )
        .await
    }

    /// Change the signed-in user's password
    pub async fn change_password(&self, current: &str, new: &str) -> Outcome<()> {
        let change = PasswordChange {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.run(
            "change_password",
            |r| Action::Auth(AuthAction::ChangePassword(r)),
            self.api.change_password(&change),
        )
        .await
    }

    /// Drop the session and every cached entity
    ///
    /// The in-memory state is cleared even if storage cannot be updated.
    pub async fn logout(&self) -> Outcome<()> {
        self.clear_user_state().await.map_err(|e| {
            warn!("Failed to clear persisted session: {}", e);
            Rejection::from(e)
        })
    }

    /// Delete the account, then log out
    pub async fn delete_account(&self) -> Outcome<()> {
        self.run(
            "delete_account",
            |r| Action::Auth(AuthAction::DeleteAccount(r)),
            self.api.delete_account(),
        )
        .await?;
        self.logout().await
    }

    /// Fetch the signed-in user's profile
    pub async fn fetch_profile(&self) -> Outcome<UserProfile> {
        self.run(
            "fetch_profile",
            |r| Action::Profile(ProfileAction::Fetch(r)),
            self.api.fetch_profile(),
        )
        .await
    }

    /// Update profile fields
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Outcome<UserProfile> {
        self.run(
            "update_profile",
            |r| Action::Profile(ProfileAction::Update(r)),
            self.api.update_profile(update),
        )
        .await
    }

    /// Upload a new avatar image
    pub async fn update_avatar(&self, image: &Path) -> Outcome<UserProfile> {
        self.run(
            "update_avatar",
            |r| Action::Profile(ProfileAction::UpdateAvatar(r)),
            self.api.upload_avatar(image),
        )
        .await
    }
}
