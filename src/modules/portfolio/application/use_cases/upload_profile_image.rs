use async_trait::async_trait;
use tracing::{error, info};

use crate::modules::portfolio::application::ports::outgoing::portfolio_api::{
    PortfolioApi, PortfolioApiError,
};

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum UploadProfileImageError {
    #[error("Not authorized. Sign in again to change the profile image.")]
    Unauthorized,

    #[error("Only image files are accepted")]
    NotAnImage,

    #[error("Image upload failed: {0}")]
    UploadFailed(String),
}

impl From<PortfolioApiError> for UploadProfileImageError {
    fn from(err: PortfolioApiError) -> Self {
        match err {
            PortfolioApiError::Unauthorized => UploadProfileImageError::Unauthorized,
            PortfolioApiError::Network(msg) => UploadProfileImageError::UploadFailed(msg),
            PortfolioApiError::BadPayload(msg) => UploadProfileImageError::UploadFailed(msg),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming port (use case)
// ──────────────────────────────────────────────────────────
//

/// Uploads a profile image and returns its stored URL. The caller only
/// swaps the displayed image once the URL is confirmed.
#[async_trait]
pub trait IUploadProfileImageUseCase: Send + Sync {
    async fn execute(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadProfileImageError>;
}

//
// ──────────────────────────────────────────────────────────
// Service implementation
// ──────────────────────────────────────────────────────────
//

pub struct UploadProfileImageService<A>
where
    A: PortfolioApi,
{
    api: A,
}

impl<A> UploadProfileImageService<A>
where
    A: PortfolioApi,
{
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A> IUploadProfileImageUseCase for UploadProfileImageService<A>
where
    A: PortfolioApi + Send + Sync,
{
    async fn execute(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadProfileImageError> {
        // The server filters too; rejecting here just saves the upload.
        if !content_type.starts_with("image/") {
            return Err(UploadProfileImageError::NotAnImage);
        }

        match self
            .api
            .upload_profile_image(filename, content_type, bytes)
            .await
        {
            Ok(image_url) => {
                info!("Profile image uploaded as {}", image_url);
                Ok(image_url)
            }
            Err(err) => {
                error!("Profile image upload failed: {}", err);
                Err(err.into())
            }
        }
    }
}
