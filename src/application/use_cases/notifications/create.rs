use crate::application::errors::AccountError;
use crate::application::ports::global_notification_repository::GlobalNotificationRepository;
use crate::domain::notifications::notification::{GlobalNotification, NewGlobalNotification};
use crate::domain::users::user::{Role, User};
use crate::domain::users::validation::{validate_http_url, validate_required};

pub struct CreateGlobalNotification<'a, R: GlobalNotificationRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct GlobalNotificationInput {
    pub receiver_role: Role,
    pub title: String,
    pub body: String,
    pub label: String,
    pub link: Option<String>,
}

impl<'a, R: GlobalNotificationRepository + ?Sized> CreateGlobalNotification<'a, R> {
    pub async fn execute(
        &self,
        sender: &User,
        input: &GlobalNotificationInput,
    ) -> Result<GlobalNotification, AccountError> {
        validate_required("title", &input.title)?;
        validate_required("body", &input.body)?;
        validate_required("label", &input.label)?;
        if let Some(link) = &input.link {
            validate_http_url("link", link)?;
        }
        let created = self
            .repo
            .create(&NewGlobalNotification {
                sender: Some(sender.email.clone()),
                receiver_role: input.receiver_role,
                title: input.title.clone(),
                body: input.body.clone(),
                label: input.label.clone(),
                link: input.link.clone(),
            })
            .await?;
        tracing::info!(
            notification_id = %created.id,
            receiver_role = %created.receiver_role,
            "global_notification_created"
        );
        Ok(created)
    }
}
