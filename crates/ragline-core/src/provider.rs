//! Single-initialization handle for process-lifetime providers.
//!
//! The embedding model and the generator are expensive to construct and
//! shared by every request task. Rather than an implicit module global,
//! each is held in a [`ProviderCell`] constructed at most once under
//! concurrent first use and treated as immutable afterwards.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::error::{RaglineError, Result};

/// A lazily-initialized, process-lifetime provider handle.
///
/// `T` may be a trait object. Construction failure surfaces as
/// [`RaglineError::ProviderInit`], a distinct kind from per-request
/// embedding/generation failures; an init that already produced
/// `ProviderInit` passes through unwrapped.
pub struct ProviderCell<T: ?Sized> {
    cell: OnceCell<Arc<T>>,
    name: &'static str,
}

impl<T: ?Sized> ProviderCell<T> {
    /// Create an empty cell; `name` identifies the provider in errors.
    ///
    /// `const` so cells can live in statics.
    pub const fn new(name: &'static str) -> Self {
        Self {
            cell: OnceCell::const_new(),
            name,
        }
    }

    /// Get the provider, constructing it on first use.
    ///
    /// Concurrent callers race on the same initialization; exactly one
    /// `init` future runs to completion per successful fill. A failed
    /// fill leaves the cell empty, so a later caller may retry.
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<T>>>,
    {
        let name = self.name;
        let arc = self
            .cell
            .get_or_try_init(|| async move {
                init().await.map_err(|e| match e {
                    init_err @ RaglineError::ProviderInit { .. } => init_err,
                    other => RaglineError::provider_init(name, other.to_string()),
                })
            })
            .await?;
        Ok(arc.clone())
    }

    /// Get the provider if it has already been constructed.
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }
}
