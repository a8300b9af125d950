//! Category, item, and stock management.
//!
//! Each mutation is a single backend call followed by a fresh listing; the
//! returned list is the server's, never a locally patched copy.

use std::sync::Arc;

use tracing::info;

use crate::api::PosApi;
use crate::models::catalog::{Category, CategoryForm, Item, ItemForm, Stock, StockForm};
use crate::session::SessionManager;
use crate::Result;

/// Authorized pass-through to the CRUD endpoints.
pub struct Management {
    api: Arc<dyn PosApi>,
    session: Arc<SessionManager>,
}

impl Management {
    /// Bind to a backend and a session.
    #[must_use]
    pub fn new(api: Arc<dyn PosApi>, session: Arc<SessionManager>) -> Self {
        Self { api, session }
    }

    /// List categories.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let credential = self.session.authorize()?;
        self.api.list_categories(&credential).await
    }

    /// Create (`id == None`) or rename a category, then re-list.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    pub async fn save_category(&self, id: Option<i64>, form: &CategoryForm) -> Result<Vec<Category>> {
        let credential = self.session.authorize()?;
        match id {
            Some(id) => self.api.update_category(&credential, id, form).await?,
            None => self.api.create_category(&credential, form).await?,
        }
        info!(?id, "category saved");
        self.api.list_categories(&credential).await
    }

    /// Delete a category, then re-list.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    pub async fn delete_category(&self, id: i64) -> Result<Vec<Category>> {
        let credential = self.session.authorize()?;
        self.api.delete_category(&credential, id).await?;
        info!(id, "category deleted");
        self.api.list_categories(&credential).await
    }

    /// List items.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    pub async fn items(&self) -> Result<Vec<Item>> {
        let credential = self.session.authorize()?;
        self.api.list_items(&credential).await
    }

    /// Create or update an item, then re-list.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    pub async fn save_item(&self, id: Option<i64>, form: &ItemForm) -> Result<Vec<Item>> {
        let credential = self.session.authorize()?;
        match id {
            Some(id) => self.api.update_item(&credential, id, form).await?,
            None => self.api.create_item(&credential, form).await?,
        }
        info!(?id, "item saved");
        self.api.list_items(&credential).await
    }

    /// Delete an item, then re-list.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    pub async fn delete_item(&self, id: i64) -> Result<Vec<Item>> {
        let credential = self.session.authorize()?;
        self.api.delete_item(&credential, id).await?;
        info!(id, "item deleted");
        self.api.list_items(&credential).await
    }

    /// List stock records.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    pub async fn stocks(&self) -> Result<Vec<Stock>> {
        let credential = self.session.authorize()?;
        self.api.list_stocks(&credential).await
    }

    /// Create or update a stock record, then re-list.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    pub async fn save_stock(&self, id: Option<i64>, form: &StockForm) -> Result<Vec<Stock>> {
        let credential = self.session.authorize()?;
        match id {
            Some(id) => self.api.update_stock(&credential, id, form).await?,
            None => self.api.create_stock(&credential, form).await?,
        }
        info!(?id, "stock saved");
        self.api.list_stocks(&credential).await
    }

    /// Delete a stock record, then re-list.
    ///
    /// # Errors
    ///
    /// `AppError::AuthorizationMissing` when logged out, or the backend error.
    pub async fn delete_stock(&self, id: i64) -> Result<Vec<Stock>> {
        let credential = self.session.authorize()?;
        self.api.delete_stock(&credential, id).await?;
        info!(id, "stock deleted");
        self.api.list_stocks(&credential).await
    }
}
