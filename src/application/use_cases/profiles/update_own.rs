use uuid::Uuid;

use crate::application::errors::AccountError;
use crate::application::ports::profile_repository::ProfileRepository;
use crate::domain::profiles::profile::{Profile, ProfileUpdate};
use crate::domain::users::validation::validate_image_url;

pub struct UpdateOwnProfile<'a, R: ProfileRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProfileRepository + ?Sized> UpdateOwnProfile<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Profile, AccountError> {
        if let Some(image) = &update.image {
            validate_image_url(image)?;
        }
        if update.is_empty() {
            return self
                .repo
                .find_by_user_id(user_id)
                .await?
                .ok_or(AccountError::ProfileNotFound);
        }
        self.repo
            .update_profile(user_id, update)
            .await?
            .ok_or(AccountError::ProfileNotFound)
    }
}
