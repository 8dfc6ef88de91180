use async_trait::async_trait;
use tracing::{error, info};

use crate::modules::portfolio::application::ports::outgoing::portfolio_api::{
    PortfolioApi, PortfolioApiError,
};
use crate::modules::portfolio::domain::entities::PortfolioRecord;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdatePortfolioError {
    #[error("Not authorized. Sign in again to edit the portfolio.")]
    Unauthorized,

    #[error("Saving the portfolio failed: {0}")]
    WriteFailed(String),
}

impl From<PortfolioApiError> for UpdatePortfolioError {
    fn from(err: PortfolioApiError) -> Self {
        match err {
            PortfolioApiError::Unauthorized => UpdatePortfolioError::Unauthorized,
            PortfolioApiError::Network(msg) => UpdatePortfolioError::WriteFailed(msg),
            PortfolioApiError::BadPayload(msg) => UpdatePortfolioError::WriteFailed(msg),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming port (use case)
// ──────────────────────────────────────────────────────────
//

/// Write path for the owner's portfolio record.
///
/// Returns the server-confirmed record; callers must not mutate their
/// view state until they hold it. On error the form surfaces the
/// message inline and the previous view state stays untouched.
#[async_trait]
pub trait IUpdatePortfolioUseCase: Send + Sync {
    async fn execute(
        &self,
        record: &PortfolioRecord,
    ) -> Result<PortfolioRecord, UpdatePortfolioError>;
}

//
// ──────────────────────────────────────────────────────────
// Service implementation
// ──────────────────────────────────────────────────────────
//

pub struct UpdatePortfolioService<A>
where
    A: PortfolioApi,
{
    api: A,
}

impl<A> UpdatePortfolioService<A>
where
    A: PortfolioApi,
{
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A> IUpdatePortfolioUseCase for UpdatePortfolioService<A>
where
    A: PortfolioApi + Send + Sync,
{
    async fn execute(
        &self,
        record: &PortfolioRecord,
    ) -> Result<PortfolioRecord, UpdatePortfolioError> {
        match self.api.update(record).await {
            Ok(confirmed) => {
                info!("Portfolio record updated");
                Ok(confirmed)
            }
            Err(err) => {
                error!("Portfolio update failed: {}", err);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::modules::portfolio::domain::entities::ViewContext;

    /* --------------------------------------------------
     * Mock PortfolioApi
     * -------------------------------------------------- */

    struct MockPortfolioApi {
        update_result: Result<PortfolioRecord, PortfolioApiError>,
    }

    #[async_trait]
    impl PortfolioApi for MockPortfolioApi {
        async fn fetch(
            &self,
            _ctx: &ViewContext,
        ) -> Result<Option<PortfolioRecord>, PortfolioApiError> {
            unimplemented!("not used in UpdatePortfolioService tests")
        }

        async fn update(
            &self,
            _record: &PortfolioRecord,
        ) -> Result<PortfolioRecord, PortfolioApiError> {
            self.update_result.clone()
        }

        async fn upload_profile_image(
            &self,
            _filename: &str,
            _content_type: &str,
            _bytes: Vec<u8>,
        ) -> Result<String, PortfolioApiError> {
            unimplemented!("not used in UpdatePortfolioService tests")
        }
    }

    fn record_named(name: &str) -> PortfolioRecord {
        PortfolioRecord {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /* --------------------------------------------------
     * Tests
     * -------------------------------------------------- */

    #[tokio::test]
    async fn returns_the_confirmed_record() {
        let api = MockPortfolioApi {
            update_result: Ok(record_named("Alice (server)")),
        };
        let service = UpdatePortfolioService::new(api);

        let confirmed = service.execute(&record_named("Alice")).await.unwrap();
        assert_eq!(confirmed.name.as_deref(), Some("Alice (server)"));
    }

    #[tokio::test]
    async fn unauthorized_stays_distinguishable() {
        let api = MockPortfolioApi {
            update_result: Err(PortfolioApiError::Unauthorized),
        };
        let service = UpdatePortfolioService::new(api);

        let err = service.execute(&record_named("Alice")).await.unwrap_err();
        assert!(matches!(err, UpdatePortfolioError::Unauthorized));
    }

    #[tokio::test]
    async fn network_errors_become_write_failures() {
        let api = MockPortfolioApi {
            update_result: Err(PortfolioApiError::Network("status 503".to_string())),
        };
        let service = UpdatePortfolioService::new(api);

        let err = service.execute(&record_named("Alice")).await.unwrap_err();
        match err {
            UpdatePortfolioError::WriteFailed(msg) => assert!(msg.contains("503")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
