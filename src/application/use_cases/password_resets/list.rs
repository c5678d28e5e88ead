use crate::application::ports::password_reset_repository::PasswordResetRepository;
use crate::domain::password_resets::request::PasswordResetRequest;

pub struct ListPasswordResetRequests<'a, R: PasswordResetRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PasswordResetRepository + ?Sized> ListPasswordResetRequests<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<PasswordResetRequest>> {
        self.repo.list().await
    }
}
