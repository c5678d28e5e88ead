use crate::application::errors::AccountError;
use crate::application::ports::profile_repository::ProfileRepository;
use crate::domain::profiles::profile::Profile;

pub struct GetProfileByUsername<'a, R: ProfileRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProfileRepository + ?Sized> GetProfileByUsername<'a, R> {
    pub async fn execute(&self, username: &str) -> Result<Profile, AccountError> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or(AccountError::ProfileNotFound)
    }
}
