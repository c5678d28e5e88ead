use uuid::Uuid;

use crate::application::dto::users::UserAccountDto;
use crate::application::ports::profile_repository::ProfileRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::users::accounts::attach_profile;

pub struct GetMe<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
{
    pub users: &'a U,
    pub profiles: &'a P,
}

impl<'a, U, P> GetMe<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
{
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<UserAccountDto>> {
        match self.users.find_by_id(id).await? {
            Some(user) => Ok(Some(attach_profile(self.profiles, user).await?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;
    use crate::domain::users::user::Role;

    #[tokio::test]
    async fn returns_user_with_profile() {
        let store = InMemoryStore::new();
        let user = store
            .seed_user("cai", "cai@example.com", "passw0rd!", Role::User, true)
            .await;
        let uc = GetMe {
            users: &store,
            profiles: &store,
        };
        let me = uc.execute(user.id).await.unwrap().unwrap();
        assert_eq!(me.user.username, "cai");
        assert_eq!(me.profile.unwrap().email.as_deref(), Some("cai@example.com"));
        assert!(uc.execute(Uuid::new_v4()).await.unwrap().is_none());
    }
}
