use crate::application::dto::users::UserAccountDto;
use crate::application::ports::profile_repository::ProfileRepository;
use crate::domain::users::user::User;

pub async fn attach_profile<P: ProfileRepository + ?Sized>(
    profiles: &P,
    user: User,
) -> anyhow::Result<UserAccountDto> {
    let profile = profiles.find_by_user_id(user.id).await?;
    Ok(UserAccountDto { user, profile })
}

pub async fn attach_profiles<P: ProfileRepository + ?Sized>(
    profiles: &P,
    users: Vec<User>,
) -> anyhow::Result<Vec<UserAccountDto>> {
    let mut out = Vec::with_capacity(users.len());
    for user in users {
        out.push(attach_profile(profiles, user).await?);
    }
    Ok(out)
}
