use std::sync::Arc;

use crate::application::ports::global_notification_repository::GlobalNotificationRepository;
use crate::application::ports::password_reset_repository::PasswordResetRepository;
use crate::application::ports::profile_repository::ProfileRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::tokens::TokenSettings;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    password_reset_repo: Arc<dyn PasswordResetRepository>,
    notification_repo: Arc<dyn GlobalNotificationRepository>,
    tokens: TokenSettings,
}

impl AppServices {
    pub fn new(
        cfg: &Config,
        user_repo: Arc<dyn UserRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        password_reset_repo: Arc<dyn PasswordResetRepository>,
        notification_repo: Arc<dyn GlobalNotificationRepository>,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            password_reset_repo,
            notification_repo,
            tokens: TokenSettings::from_config(cfg),
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn profile_repo(&self) -> Arc<dyn ProfileRepository> {
        self.services.profile_repo.clone()
    }

    pub fn password_reset_repo(&self) -> Arc<dyn PasswordResetRepository> {
        self.services.password_reset_repo.clone()
    }

    pub fn notification_repo(&self) -> Arc<dyn GlobalNotificationRepository> {
        self.services.notification_repo.clone()
    }

    pub fn tokens(&self) -> &TokenSettings {
        &self.services.tokens
    }
}
