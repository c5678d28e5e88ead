use crate::domain::profiles::profile::Profile;
use crate::domain::users::user::User;

/// A user together with the profile created alongside it.
#[derive(Debug, Clone)]
pub struct UserAccountDto {
    pub user: User,
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone)]
pub struct RegisteredUserDto {
    pub account: UserAccountDto,
    pub access_token: String,
}
