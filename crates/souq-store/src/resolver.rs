//! Variation resolution with last-selection-wins semantics.
//!
//! Every change to the attribute selection supersedes any in-flight
//! resolution: requests are numbered by generation, and a response commits
//! only if its generation is still current. A slow stale response can
//! therefore never overwrite the result of a newer selection, and a reset
//! (product change, teardown) suppresses every outstanding commit.

use std::sync::Mutex;

use tracing::debug;

use souq_api::{ApiError, Outcome, StorefrontClient};
use souq_commerce::catalog::{Product, Selection, Variation};
use souq_commerce::ids::{AttributeId, AttributeValueId, VariationId};
use souq_commerce::CommerceError;

use crate::error::StoreError;

/// The resolver's observable state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResolveState {
    /// No complete selection has been made yet.
    #[default]
    Idle,
    /// A resolution request is in flight.
    Pending,
    /// The current selection resolved to a purchasable variation.
    Resolved(Variation),
    /// Resolution failed; the message is user-facing. No automatic retry.
    Failed(String),
}

/// A resolution attempt armed by a selection change.
///
/// Holds the selection snapshot and the generation that must still be
/// current for the eventual response to commit.
#[derive(Debug, Clone)]
pub struct PendingResolution {
    generation: u64,
    selection: Selection,
}

struct ResolverInner {
    selection: Selection,
    state: ResolveState,
    /// Key of the last selection a request was issued for; identical
    /// consecutive selections are deduplicated against it.
    last_requested_key: Option<String>,
    generation: u64,
}

/// Resolves a product's attribute selection to a concrete variation.
pub struct VariationResolver {
    client: StorefrontClient,
    product: Product,
    inner: Mutex<ResolverInner>,
}

impl VariationResolver {
    /// Create a resolver for a product.
    pub fn new(client: StorefrontClient, product: Product) -> Self {
        Self {
            client,
            product,
            inner: Mutex::new(ResolverInner {
                selection: Selection::new(),
                state: ResolveState::Idle,
                last_requested_key: None,
                generation: 0,
            }),
        }
    }

    /// The product being configured.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Current observable state.
    pub fn state(&self) -> ResolveState {
        self.lock().state.clone()
    }

    /// The resolved variation id, when the current selection is resolved.
    pub fn variation_id(&self) -> Option<VariationId> {
        match &self.lock().state {
            ResolveState::Resolved(v) => Some(v.id),
            _ => None,
        }
    }

    /// Snapshot of the current selection.
    pub fn selection(&self) -> Selection {
        self.lock().selection.clone()
    }

    /// Choose a value for an attribute.
    ///
    /// Returns a [`PendingResolution`] when the change arms a fetch: the
    /// selection is complete and differs from the last one requested.
    /// Incomplete selections never arm a fetch, and re-choosing the same
    /// values is deduplicated.
    pub fn select(
        &self,
        attribute: AttributeId,
        value: AttributeValueId,
    ) -> Result<Option<PendingResolution>, CommerceError> {
        if self.product.attribute(attribute).is_none() {
            return Err(CommerceError::UnknownAttribute(attribute.as_i64()));
        }

        let mut inner = self.lock();
        inner.selection.set(attribute, value);

        if !inner.selection.is_complete_for(&self.product) {
            return Ok(None);
        }
        let key = inner.selection.key();
        if inner.last_requested_key.as_deref() == Some(key.as_str()) {
            debug!(key, "selection unchanged, skipping re-fetch");
            return Ok(None);
        }

        inner.generation += 1;
        inner.last_requested_key = Some(key);
        inner.state = ResolveState::Pending;
        Ok(Some(PendingResolution {
            generation: inner.generation,
            selection: inner.selection.clone(),
        }))
    }

    /// Perform the armed resolution and commit its result.
    ///
    /// Returns the resolver state after the attempt. If a newer selection
    /// (or a reset) superseded this attempt while it was in flight, the
    /// response is dropped and the state reflects the newer attempt.
    pub async fn resolve(&self, pending: PendingResolution) -> Result<ResolveState, StoreError> {
        let result = self
            .client
            .resolve_variation(self.product.id, &pending.selection)
            .await;
        Ok(self.commit(pending.generation, result))
    }

    /// Convenience: select and, when armed, resolve in one call.
    pub async fn select_and_resolve(
        &self,
        attribute: AttributeId,
        value: AttributeValueId,
    ) -> Result<ResolveState, StoreError> {
        match self.select(attribute, value)? {
            Some(pending) => self.resolve(pending).await,
            None => Ok(self.state()),
        }
    }

    /// Invalidate the current selection and every outstanding resolution.
    ///
    /// Used on product change or component teardown: responses from
    /// superseded generations are silently dropped, never surfaced.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.selection = Selection::new();
        inner.state = ResolveState::Idle;
        inner.last_requested_key = None;
    }

    fn commit(&self, generation: u64, result: Result<Outcome<Variation>, ApiError>) -> ResolveState {
        let mut inner = self.lock();
        if generation != inner.generation {
            // Superseded while in flight. Drop silently.
            debug!(generation, current = inner.generation, "stale resolution dropped");
            return inner.state.clone();
        }
        inner.state = match result {
            Ok(Outcome::Ok(variation)) => ResolveState::Resolved(variation),
            // Success without a variation id is a failure for the caller:
            // there is nothing purchasable to show.
            Ok(Outcome::Missing) | Ok(Outcome::Empty) => {
                ResolveState::Failed("Selected combination is not available".to_string())
            }
            Err(e) => ResolveState::Failed(e.user_message()),
        };
        inner.state.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ResolverInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
