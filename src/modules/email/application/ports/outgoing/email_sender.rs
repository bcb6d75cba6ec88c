use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum EmailSendError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Failed to build message: {0}")]
    MessageBuild(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str)
        -> Result<(), EmailSendError>;
}
