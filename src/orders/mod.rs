//! Order composition: draft editing, submission, and order history.
//!
//! [`OrderComposer`] holds the draft plus read-only snapshots of the catalog
//! and of accepted orders. It reads the credential from the
//! [`SessionManager`] on every call, so a logout between edits is seen by
//! the next submission.

pub mod draft;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::api::PosApi;
use crate::models::catalog::Item;
use crate::models::order::{ItemId, Order};
use crate::session::SessionManager;
use crate::{AppError, Result};

pub use self::draft::{build_request, parse_line, DraftOrder};

/// What to do with an order that has no positive line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyOrderPolicy {
    /// Send it; the server decides.
    #[default]
    Forward,
    /// Refuse locally with `AppError::Validation`.
    Reject,
}

/// Result of an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitReceipt {
    /// Lines sent to the server.
    pub lines: usize,
    /// Whether the order list was re-fetched afterwards.
    pub orders_refreshed: bool,
}

/// Releases the in-flight latch however the submission ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(latch: &'a AtomicBool) -> Result<Self> {
        latch
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(latch))
            .map_err(|_| AppError::SubmissionInFlight("an order is already being placed".into()))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Draft, catalog, and order history for one order screen.
pub struct OrderComposer {
    api: Arc<dyn PosApi>,
    session: Arc<SessionManager>,
    empty_policy: EmptyOrderPolicy,
    draft: Mutex<DraftOrder>,
    catalog: RwLock<Vec<Item>>,
    orders: RwLock<Vec<Order>>,
    in_flight: AtomicBool,
    // Bumped whenever the draft is abandoned so late results can be told apart.
    generation: AtomicU64,
}

impl OrderComposer {
    /// Create a composer with an empty draft and empty snapshots.
    #[must_use]
    pub fn new(api: Arc<dyn PosApi>, session: Arc<SessionManager>) -> Self {
        Self {
            api,
            session,
            empty_policy: EmptyOrderPolicy::default(),
            draft: Mutex::new(DraftOrder::new()),
            catalog: RwLock::new(Vec::new()),
            orders: RwLock::new(Vec::new()),
            in_flight: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Choose how zero-line orders are handled.
    #[must_use]
    pub fn with_empty_policy(mut self, policy: EmptyOrderPolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    /// Set the requested quantity of `item_id`.
    pub async fn set_quantity(&self, item_id: ItemId, quantity: i64) {
        self.draft.lock().await.set_quantity(item_id, quantity);
    }

    /// Apply several edits under one lock, in order.
    pub async fn set_quantities(&self, entries: impl IntoIterator<Item = (ItemId, i64)>) {
        let mut draft = self.draft.lock().await;
        for (item_id, quantity) in entries {
            draft.set_quantity(item_id, quantity);
        }
    }

    /// Copy of the current draft.
    pub async fn draft(&self) -> DraftOrder {
        self.draft.lock().await.clone()
    }

    /// Drop the draft because the user left the screen.
    ///
    /// A submission still in flight will not clear whatever draft is
    /// started afterwards.
    pub async fn abandon(&self) {
        let mut draft = self.draft.lock().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        draft.clear();
    }

    /// Whether a submission is outstanding.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Send the draft as an order.
    ///
    /// On acceptance the draft is cleared and the order list re-fetched. On
    /// any failure the draft is left as it was.
    ///
    /// # Errors
    ///
    /// - `AppError::AuthorizationMissing` when logged out; nothing is sent.
    /// - `AppError::SubmissionInFlight` while another submission is outstanding.
    /// - `AppError::Validation` for an empty order under [`EmptyOrderPolicy::Reject`].
    /// - `AppError::Request` / `AppError::Rejected` from the backend.
    pub async fn submit(&self) -> Result<SubmitReceipt> {
        let credential = self.session.authorize()?;
        let _latch = InFlight::acquire(&self.in_flight)?;

        let (request, generation) = {
            let draft = self.draft.lock().await;
            (
                build_request(&draft),
                self.generation.load(Ordering::Acquire),
            )
        };

        if request.is_empty() && self.empty_policy == EmptyOrderPolicy::Reject {
            return Err(AppError::Validation("order has no items".into()));
        }

        let lines = request.len();
        self.api
            .place_order(&credential, &request)
            .instrument(info_span!("place_order", lines))
            .await?;
        info!(lines, "order accepted");

        {
            let mut draft = self.draft.lock().await;
            if self.generation.load(Ordering::Acquire) == generation {
                draft.clear();
            } else {
                debug!("draft abandoned during submission, keeping the newer draft");
            }
        }

        let orders_refreshed = match self.refresh_orders().await {
            Ok(_) => true,
            Err(err) => {
                warn!(%err, "order accepted but order list refresh failed");
                false
            }
        };

        Ok(SubmitReceipt {
            lines,
            orders_refreshed,
        })
    }

    /// Replace the catalog snapshot with the server's item list.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    /// The previous snapshot is kept on failure.
    pub async fn refresh_catalog(&self) -> Result<Vec<Item>> {
        let credential = self.session.authorize()?;
        let items = self.api.list_items(&credential).await?;
        debug!(count = items.len(), "catalog refreshed");
        *self.catalog.write().await = items.clone();
        Ok(items)
    }

    /// Replace the order snapshot with the server's order list.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    /// The previous snapshot is kept on failure.
    pub async fn refresh_orders(&self) -> Result<Vec<Order>> {
        let credential = self.session.authorize()?;
        let orders = self.api.list_orders(&credential).await?;
        debug!(count = orders.len(), "orders refreshed");
        *self.orders.write().await = orders.clone();
        Ok(orders)
    }

    /// Last fetched catalog.
    pub async fn catalog(&self) -> Vec<Item> {
        self.catalog.read().await.clone()
    }

    /// Last fetched order list.
    pub async fn orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }
}
