//! One-time backend initialization.

use tokio::sync::OnceCell;
use tracing::info;

use crate::error::Result;
use crate::provider::EarthObservation;

/// Wraps a provider behind an idempotent liveness check.
///
/// The first caller runs `ping`; concurrent callers wait for it and a
/// failed check is retried by the next caller. Once the check passes it
/// is never repeated for the lifetime of the value.
pub struct Backend<E> {
    provider: E,
    ready: OnceCell<()>,
}

impl<E: EarthObservation> Backend<E> {
    pub fn new(provider: E) -> Self {
        Self {
            provider,
            ready: OnceCell::new(),
        }
    }

    /// Access the provider, verifying liveness on first use.
    pub async fn ensure_ready(&self) -> Result<&E> {
        self.ready
            .get_or_try_init(|| async {
                self.provider.ping().await?;
                info!("earth observation backend ready");
                Ok::<_, crate::error::EngineError>(())
            })
            .await?;
        Ok(&self.provider)
    }

    /// The wrapped provider, without the liveness check.
    pub fn provider(&self) -> &E {
        &self.provider
    }
}
