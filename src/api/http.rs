//! `reqwest` implementation of [`PosApi`].
//!
//! Request construction is kept separate from sending: [`HttpApi::request`]
//! is the only place a bearer header is attached, and it refuses to build a
//! request when no credential is supplied.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ApiFuture, LoginRequest, PosApi};
use crate::config::ClientConfig;
use crate::models::catalog::{Category, CategoryForm, Item, ItemForm, Stock, StockForm};
use crate::models::order::{Order, OrderRequest};
use crate::{AppError, Result};

/// Authentication endpoint.
pub const LOGIN_PATH: &str = "/auth/login";

/// Error payload returned by the backend on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client for `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the underlying client cannot be built.
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Build a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the underlying client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Build an authorized request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AuthorizationMissing` if `credential` is `None`;
    /// nothing is sent in that case.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&str>,
    ) -> Result<RequestBuilder> {
        let credential = credential.ok_or_else(|| {
            AppError::AuthorizationMissing(format!("no credential for {method} {path}"))
        })?;
        Ok(self
            .client
            .request(method, self.endpoint(path))
            .bearer_auth(credential))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, credential: &str) -> Result<T> {
        let response = send(self.request(Method::GET, path, Some(credential))?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        credential: &str,
        body: &B,
    ) -> Result<()> {
        send(self.request(method, path, Some(credential))?.json(body)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str, credential: &str) -> Result<()> {
        send(self.request(Method::DELETE, path, Some(credential))?).await?;
        Ok(())
    }
}

/// Send `builder`, turning non-success statuses into `AppError::Rejected`.
async fn send(builder: RequestBuilder) -> Result<Response> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = rejection_message(status, &body);
    warn!(status = status.as_u16(), %message, "request rejected");
    Err(AppError::Rejected(message))
}

/// Human-readable reason for a failed response.
///
/// Prefers the `message` field of a JSON error body, then the status line.
#[must_use]
pub fn rejection_message(status: StatusCode, body: &str) -> String {
    let server_message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty());

    match server_message {
        Some(message) => format!("{} ({message})", status.as_u16()),
        None => status.to_string(),
    }
}

/// Extract the bearer token from an authentication response body.
///
/// The backend answers with the bare token, either as plain text or as a
/// JSON string. Blank bodies yield `None`.
#[must_use]
pub fn parse_token(body: &str) -> Option<String> {
    let trimmed = body.trim();
    let token = if trimmed.starts_with('"') {
        serde_json::from_str::<String>(trimmed).ok()?
    } else {
        trimmed.to_owned()
    };
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

impl PosApi for HttpApi {
    fn authenticate<'a>(&'a self, request: &'a LoginRequest) -> ApiFuture<'a, String> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.endpoint(LOGIN_PATH))
                .json(request)
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(AppError::AuthenticationFailure(rejection_message(
                    status, &body,
                )));
            }
            debug!("authentication endpoint accepted credentials");
            parse_token(&body).ok_or_else(|| {
                AppError::AuthenticationFailure("server returned an empty token".into())
            })
        })
    }

    fn list_categories<'a>(&'a self, credential: &'a str) -> ApiFuture<'a, Vec<Category>> {
        Box::pin(self.get_json::<Vec<Category>>("/categories/all", credential))
    }

    fn create_category<'a>(
        &'a self,
        credential: &'a str,
        form: &'a CategoryForm,
    ) -> ApiFuture<'a, ()> {
        Box::pin(self.send_json(Method::POST, "/categories/addcategories", credential, form))
    }

    fn update_category<'a>(
        &'a self,
        credential: &'a str,
        id: i64,
        form: &'a CategoryForm,
    ) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let path = format!("/categories/update/{id}");
            self.send_json(Method::PUT, &path, credential, form).await
        })
    }

    fn delete_category<'a>(&'a self, credential: &'a str, id: i64) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let path = format!("/categories/deletecategories/{id}");
            self.delete(&path, credential).await
        })
    }

    fn list_items<'a>(&'a self, credential: &'a str) -> ApiFuture<'a, Vec<Item>> {
        Box::pin(self.get_json::<Vec<Item>>("/items/all", credential))
    }

    fn create_item<'a>(&'a self, credential: &'a str, form: &'a ItemForm) -> ApiFuture<'a, ()> {
        Box::pin(self.send_json(Method::POST, "/items/additem", credential, form))
    }

    fn update_item<'a>(
        &'a self,
        credential: &'a str,
        id: i64,
        form: &'a ItemForm,
    ) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let path = format!("/items/update/{id}");
            self.send_json(Method::PUT, &path, credential, form).await
        })
    }

    fn delete_item<'a>(&'a self, credential: &'a str, id: i64) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let path = format!("/items/delete/{id}");
            self.delete(&path, credential).await
        })
    }

    fn list_stocks<'a>(&'a self, credential: &'a str) -> ApiFuture<'a, Vec<Stock>> {
        Box::pin(self.get_json::<Vec<Stock>>("/stocks/all", credential))
    }

    fn create_stock<'a>(
        &'a self,
        credential: &'a str,
        form: &'a StockForm,
    ) -> ApiFuture<'a, ()> {
        Box::pin(self.send_json(Method::POST, "/stocks/add", credential, form))
    }

    fn update_stock<'a>(
        &'a self,
        credential: &'a str,
        id: i64,
        form: &'a StockForm,
    ) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let path = format!("/stocks/update/{id}");
            self.send_json(Method::PUT, &path, credential, form).await
        })
    }

    fn delete_stock<'a>(&'a self, credential: &'a str, id: i64) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let path = format!("/stocks/delete/{id}");
            self.delete(&path, credential).await
        })
    }

    fn list_orders<'a>(&'a self, credential: &'a str) -> ApiFuture<'a, Vec<Order>> {
        Box::pin(self.get_json::<Vec<Order>>("/orders/all", credential))
    }

    fn place_order<'a>(
        &'a self,
        credential: &'a str,
        request: &'a OrderRequest,
    ) -> ApiFuture<'a, ()> {
        Box::pin(self.send_json(Method::POST, "/orders/add", credential, request))
    }
}
