//! Backend API boundary.
//!
//! The [`PosApi`] trait decouples session handling, order composition and
//! the management views from the transport. Every authorized method takes
//! the credential as an explicit argument; implementations never look it
//! up themselves.

pub mod http;

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::models::catalog::{Category, CategoryForm, Item, ItemForm, Stock, StockForm};
use crate::models::order::{Order, OrderRequest};
use crate::Result;

/// Boxed future returned by [`PosApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Body of the authentication request.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Operations offered by the POS backend.
///
/// # Errors
///
/// Methods return [`AppError::Request`](crate::AppError::Request) on
/// transport failure and [`AppError::Rejected`](crate::AppError::Rejected)
/// when the server answers with a non-success status.
pub trait PosApi: Send + Sync {
    /// Exchange username and password for a bearer credential.
    fn authenticate<'a>(&'a self, request: &'a LoginRequest) -> ApiFuture<'a, String>;

    /// List all categories.
    fn list_categories<'a>(&'a self, credential: &'a str) -> ApiFuture<'a, Vec<Category>>;

    /// Create a category.
    fn create_category<'a>(
        &'a self,
        credential: &'a str,
        form: &'a CategoryForm,
    ) -> ApiFuture<'a, ()>;

    /// Rename category `id`.
    fn update_category<'a>(
        &'a self,
        credential: &'a str,
        id: i64,
        form: &'a CategoryForm,
    ) -> ApiFuture<'a, ()>;

    /// Delete category `id`.
    fn delete_category<'a>(&'a self, credential: &'a str, id: i64) -> ApiFuture<'a, ()>;

    /// List all items.
    fn list_items<'a>(&'a self, credential: &'a str) -> ApiFuture<'a, Vec<Item>>;

    /// Create an item.
    fn create_item<'a>(&'a self, credential: &'a str, form: &'a ItemForm) -> ApiFuture<'a, ()>;

    /// Update item `id`.
    fn update_item<'a>(
        &'a self,
        credential: &'a str,
        id: i64,
        form: &'a ItemForm,
    ) -> ApiFuture<'a, ()>;

    /// Delete item `id`.
    fn delete_item<'a>(&'a self, credential: &'a str, id: i64) -> ApiFuture<'a, ()>;

    /// List all stock records.
    fn list_stocks<'a>(&'a self, credential: &'a str) -> ApiFuture<'a, Vec<Stock>>;

    /// Create a stock record.
    fn create_stock<'a>(&'a self, credential: &'a str, form: &'a StockForm)
        -> ApiFuture<'a, ()>;

    /// Update stock record `id`.
    fn update_stock<'a>(
        &'a self,
        credential: &'a str,
        id: i64,
        form: &'a StockForm,
    ) -> ApiFuture<'a, ()>;

    /// Delete stock record `id`.
    fn delete_stock<'a>(&'a self, credential: &'a str, id: i64) -> ApiFuture<'a, ()>;

    /// List previously accepted orders.
    fn list_orders<'a>(&'a self, credential: &'a str) -> ApiFuture<'a, Vec<Order>>;

    /// Submit an order.
    fn place_order<'a>(
        &'a self,
        credential: &'a str,
        request: &'a OrderRequest,
    ) -> ApiFuture<'a, ()>;
}
