use uuid::Uuid;

/// A password reset that waits for administrator approval.
#[derive(Debug, Clone)]
pub struct PasswordResetRequest {
    pub id: Uuid,
    pub email: String,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
