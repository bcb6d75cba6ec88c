use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::{
    ProfileChanges, UserRepository, UserRepositoryError,
};
use crate::auth::application::use_cases::create_user::MAX_NAME_LEN;
use crate::auth::application::use_cases::fetch_profile::UserProfile;

const MAX_PHONE_LEN: usize = 20;
const MAX_ADDRESS_LEN: usize = 500;

#[derive(Clone, Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UpdateUserInput {
    /// Trims every field and checks lengths. Phone numbers accept digits, spaces and a leading `+`.
    pub fn into_changes(self) -> Result<ProfileChanges, UpdateUserError> {
        let name = self.name.map(|n| n.trim().to_string());
        if let Some(name) = &name {
            if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
                return Err(UpdateUserError::InvalidInput(format!(
                    "Name must be 1-{MAX_NAME_LEN} characters"
                )));
            }
        }

        let phone = self.phone.map(|p| p.trim().to_string());
        if let Some(phone) = &phone {
            let digits_ok = phone
                .trim_start_matches('+')
                .chars()
                .all(|c| c.is_ascii_digit() || c == ' ');
            if phone.is_empty() || phone.len() > MAX_PHONE_LEN || !digits_ok {
                return Err(UpdateUserError::InvalidInput(
                    "Invalid phone number".to_string(),
                ));
            }
        }

        let address = self.address.map(|a| a.trim().to_string());
        if let Some(address) = &address {
            if address.is_empty() || address.chars().count() > MAX_ADDRESS_LEN {
                return Err(UpdateUserError::InvalidInput(format!(
                    "Address must be 1-{MAX_ADDRESS_LEN} characters"
                )));
            }
        }

        let changes = ProfileChanges {
            name,
            phone,
            address,
        };
        if changes.is_empty() {
            return Err(UpdateUserError::InvalidInput(
                "At least one field must be provided".to_string(),
            ));
        }
        Ok(changes)
    }
}

#[derive(Debug, thiserror::Error, Clone)]
pub enum UpdateUserError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] UserRepositoryError),
}

#[async_trait]
pub trait UpdateUserProfileUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> Result<UserProfile, UpdateUserError>;
}

#[derive(Clone)]
pub struct UpdateUserProfileService {
    repository: Arc<dyn UserRepository>,
}

impl UpdateUserProfileService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UpdateUserProfileUseCase for UpdateUserProfileService {
    async fn execute(
        &self,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> Result<UserProfile, UpdateUserError> {
        let changes = input.into_changes()?;
        let user = self.repository.update_profile(user_id, changes).await?;
        Ok(UserProfile::from(user))
    }
}
