use crate::application::dto::users::UserAccountDto;
use crate::application::ports::profile_repository::ProfileRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::users::accounts::attach_profiles;

pub struct ListUsers<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
{
    pub users: &'a U,
    pub profiles: &'a P,
}

impl<'a, U, P> ListUsers<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
{
    /// `verified = Some(false)` lists accounts still waiting for approval.
    pub async fn execute(&self, verified: Option<bool>) -> anyhow::Result<Vec<UserAccountDto>> {
        let users = self.users.list_users(verified).await?;
        attach_profiles(self.profiles, users).await
    }
}
