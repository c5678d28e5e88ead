//! In-memory implementations of the repository ports for use-case and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::ports::global_notification_repository::GlobalNotificationRepository;
use crate::application::ports::password_reset_repository::PasswordResetRepository;
use crate::application::ports::profile_repository::ProfileRepository;
use crate::application::ports::user_repository::{UserRepository, UserWriteError};
use crate::domain::notifications::notification::{
    FeedEventType, FeedItem, GlobalNotification, NewGlobalNotification,
};
use crate::domain::password_resets::request::PasswordResetRequest;
use crate::domain::profiles::profile::{Profile, ProfileUpdate};
use crate::domain::users::user::{CredentialsUpdate, NewUser, Role, User};
use crate::infrastructure::crypto;

pub fn user_fixture(username: &str, email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: email.to_string(),
        role: Role::User,
        is_verified: true,
        password_hash: String::new(),
        is_active: true,
        is_superuser: false,
        last_notification_at: now,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
struct State {
    /// Email and username lookups miss, as if another request had not committed yet.
    stale_lookups: bool,
    users: Vec<User>,
    profiles: Vec<Profile>,
    resets: Vec<PasswordResetRequest>,
    notifications: Vec<GlobalNotification>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user with a real bcrypt hash for `password`.
    pub async fn seed_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
        is_verified: bool,
    ) -> User {
        let hash = crypto::hash_password(password).unwrap();
        let mut new_user = NewUser::regular(username.into(), email.into(), hash);
        new_user.role = role;
        new_user.is_verified = is_verified;
        self.create_user(&new_user).await.unwrap()
    }

    pub fn serve_stale_lookups(&self) {
        self.state.lock().unwrap().stale_lookups = true;
    }

    pub fn set_superuser(&self, id: Uuid) {
        let mut st = self.state.lock().unwrap();
        if let Some(u) = st.users.iter_mut().find(|u| u.id == id) {
            u.is_superuser = true;
        }
    }

    pub fn set_active(&self, id: Uuid, active: bool) {
        let mut st = self.state.lock().unwrap();
        if let Some(u) = st.users.iter_mut().find(|u| u.id == id) {
            u.is_active = active;
        }
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        let st = self.state.lock().unwrap();
        st.users.iter().find(|u| u.id == id).cloned()
    }

    /// Simulates an edit made after creation.
    pub fn edit_notification(&self, id: Uuid, title: &str, at: DateTime<Utc>) {
        let mut st = self.state.lock().unwrap();
        if let Some(n) = st.notifications.iter_mut().find(|n| n.id == id) {
            n.title = title.to_string();
            n.updated_at = at;
        }
    }

    pub fn backdate_notification(&self, id: Uuid, at: DateTime<Utc>) {
        let mut st = self.state.lock().unwrap();
        if let Some(n) = st.notifications.iter_mut().find(|n| n.id == id) {
            n.created_at = at;
            n.updated_at = at;
        }
    }

    pub fn reset_count(&self) -> usize {
        self.state.lock().unwrap().resets.len()
    }
}

fn attach_owner(profile: &Profile, users: &[User]) -> Profile {
    let mut p = profile.clone();
    if let Some(u) = users.iter().find(|u| u.id == p.user_id) {
        p.username = Some(u.username.clone());
        p.email = Some(u.email.clone());
    }
    p
}

fn unique_check(
    users: &[User],
    except: Option<Uuid>,
    email: &str,
    username: &str,
) -> Result<(), UserWriteError> {
    for other in users.iter().filter(|u| Some(u.id) != except) {
        if other.email == email {
            return Err(UserWriteError::EmailTaken);
        }
        if other.username == username {
            return Err(UserWriteError::UsernameTaken);
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, new_user: &NewUser) -> Result<User, UserWriteError> {
        let mut st = self.state.lock().unwrap();
        unique_check(&st.users, None, &new_user.email, &new_user.username)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            role: new_user.role,
            is_verified: new_user.is_verified,
            password_hash: new_user.password_hash.clone(),
            is_active: true,
            is_superuser: new_user.is_superuser,
            last_notification_at: now,
            created_at: now,
            updated_at: now,
        };
        st.profiles.push(Profile {
            id: Uuid::new_v4(),
            user_id: user.id,
            full_name: None,
            phone_number: None,
            bio: Some(String::new()),
            image: None,
            username: None,
            email: None,
            created_at: now,
            updated_at: now,
        });
        st.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let st = self.state.lock().unwrap();
        if st.stale_lookups {
            return Ok(None);
        }
        Ok(st.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let st = self.state.lock().unwrap();
        if st.stale_lookups {
            return Ok(None);
        }
        Ok(st.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_credentials(
        &self,
        id: Uuid,
        update: &CredentialsUpdate,
    ) -> Result<Option<User>, UserWriteError> {
        let mut st = self.state.lock().unwrap();
        unique_check(&st.users, Some(id), &update.email, &update.username)?;
        let Some(user) = st.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        let old_email = std::mem::replace(&mut user.email, update.email.clone());
        user.username = update.username.clone();
        user.password_hash = update.password_hash.clone();
        user.updated_at = Utc::now();
        let updated = user.clone();
        for r in st.resets.iter_mut().filter(|r| r.email == old_email) {
            r.email = updated.email.clone();
        }
        Ok(Some(updated))
    }

    async fn list_users(&self, verified: Option<bool>) -> anyhow::Result<Vec<User>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .users
            .iter()
            .filter(|u| verified.is_none_or(|v| u.is_verified == v))
            .cloned()
            .collect())
    }

    async fn verify_by_emails(&self, emails: &[String]) -> anyhow::Result<Option<Vec<User>>> {
        let mut st = self.state.lock().unwrap();
        if !emails.iter().all(|e| st.users.iter().any(|u| &u.email == e)) {
            return Ok(None);
        }
        let mut verified = Vec::new();
        for u in st.users.iter_mut().filter(|u| emails.contains(&u.email)) {
            u.is_verified = true;
            verified.push(u.clone());
        }
        Ok(Some(verified))
    }

    async fn reset_password_by_email(
        &self,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let Some(user) = st.users.iter_mut().find(|u| u.email == email) else {
            return Ok(false);
        };
        user.password_hash = password_hash.to_string();
        st.resets.retain(|r| r.email != email);
        Ok(true)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        match st.users.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn touch_last_notification_at(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()> {
        let mut st = self.state.lock().unwrap();
        if let Some(u) = st.users.iter_mut().find(|u| u.id == id) {
            u.last_notification_at = at;
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .map(|p| attach_owner(p, &st.users)))
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Profile>> {
        let st = self.state.lock().unwrap();
        let Some(user) = st.users.iter().find(|u| u.username == username) else {
            return Ok(None);
        };
        Ok(st
            .profiles
            .iter()
            .find(|p| p.user_id == user.id)
            .map(|p| attach_owner(p, &st.users)))
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> anyhow::Result<Option<Profile>> {
        let mut st = self.state.lock().unwrap();
        let Some(p) = st.profiles.iter_mut().find(|p| p.user_id == user_id) else {
            return Ok(None);
        };
        if let Some(v) = &update.full_name {
            p.full_name = Some(v.clone());
        }
        if let Some(v) = &update.phone_number {
            p.phone_number = Some(v.clone());
        }
        if let Some(v) = &update.bio {
            p.bio = Some(v.clone());
        }
        if let Some(v) = &update.image {
            p.image = Some(v.clone());
        }
        p.updated_at = Utc::now();
        let updated = p.clone();
        Ok(Some(attach_owner(&updated, &st.users)))
    }
}

#[async_trait]
impl PasswordResetRepository for InMemoryStore {
    async fn create(
        &self,
        email: &str,
        message: &str,
    ) -> anyhow::Result<Option<PasswordResetRequest>> {
        let mut st = self.state.lock().unwrap();
        if st.resets.iter().any(|r| r.email == email) {
            return Ok(None);
        }
        let now = Utc::now();
        let req = PasswordResetRequest {
            id: Uuid::new_v4(),
            email: email.to_string(),
            message: message.to_string(),
            created_at: now,
            updated_at: now,
        };
        st.resets.push(req.clone());
        Ok(Some(req))
    }

    async fn list(&self) -> anyhow::Result<Vec<PasswordResetRequest>> {
        Ok(self.state.lock().unwrap().resets.clone())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.resets.len();
        st.resets.retain(|r| r.id != id);
        Ok(st.resets.len() != before)
    }
}

#[async_trait]
impl GlobalNotificationRepository for InMemoryStore {
    async fn create(&self, new: &NewGlobalNotification) -> anyhow::Result<GlobalNotification> {
        let now = Utc::now();
        let n = GlobalNotification {
            id: Uuid::new_v4(),
            sender: new.sender.clone(),
            receiver_role: new.receiver_role,
            title: new.title.clone(),
            body: new.body.clone(),
            label: new.label.clone(),
            link: new.link.clone(),
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().notifications.push(n.clone());
        Ok(n)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.notifications.len();
        st.notifications.retain(|n| n.id != id);
        Ok(st.notifications.len() != before)
    }

    async fn feed(
        &self,
        roles: &[Role],
        before: DateTime<Utc>,
        limit: i64,
    ) -> anyhow::Result<Vec<FeedItem>> {
        let st = self.state.lock().unwrap();
        let mut items = Vec::new();
        for n in st.notifications.iter().filter(|n| roles.contains(&n.receiver_role)) {
            if n.updated_at < before && n.updated_at != n.created_at {
                items.push(FeedItem {
                    notification: n.clone(),
                    event_type: FeedEventType::IsUpdate,
                    event_timestamp: n.updated_at,
                });
            }
            if n.created_at < before {
                items.push(FeedItem {
                    notification: n.clone(),
                    event_type: FeedEventType::IsCreate,
                    event_timestamp: n.created_at,
                });
            }
        }
        items.sort_by(|a, b| b.event_timestamp.cmp(&a.event_timestamp));
        items.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(items)
    }

    async fn has_new(&self, roles: &[Role], since: DateTime<Utc>) -> anyhow::Result<bool> {
        let st = self.state.lock().unwrap();
        Ok(st
            .notifications
            .iter()
            .any(|n| roles.contains(&n.receiver_role) && n.updated_at > since))
    }
}
