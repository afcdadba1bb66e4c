//! HTTP client for the storefront REST API.
//!
//! Wraps `reqwest` with a fixed base URL, a session cookie store and typed
//! response decoding. Every non-2xx status, transport failure and decode
//! failure surfaces as an [`ApiError`]; nothing is retried.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use storefront_core::{AppConfig, Category, Collection, NewOrder, Order, Product};

use crate::error::ApiError;
use crate::types::{
    Acknowledgement, ContactMessage, Health, NewsletterSignup, PaymentConfirmation,
    PaymentIntent, PaymentIntentRequest, PaymentStatus, ProductPage, ProductQuery, SearchResults,
};

/// Client for the storefront REST API.
///
/// Construct one at startup and share it; use [`ApiClient::new`] with a
/// mock server URL in tests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:3000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute URL that can carry a path.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;

        // A trailing slash keeps the last base segment when endpoint segments
        // are appended.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        tracing::debug!(base_url = %parsed, "API client initialized");
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Creates a client from the process configuration.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /health`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn health(&self) -> Result<Health, ApiError> {
        self.get(self.endpoint(&["health"])).await
    }

    /// `GET /products` with the set fields of `query` as parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let url = self.endpoint_with_query(&["products"], &query.to_pairs());
        self.get(url).await
    }

    /// `GET /products/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn product(&self, id: &str) -> Result<Product, ApiError> {
        self.get(self.endpoint(&["products", id])).await
    }

    /// `GET /products/search?q=`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn search_products(&self, query: &str) -> Result<SearchResults, ApiError> {
        let url = self.endpoint_with_query(&["products", "search"], &[("q", query.to_string())]);
        self.get(url).await
    }

    /// `GET /categories`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get(self.endpoint(&["categories"])).await
    }

    /// `GET /categories/{slug}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn category(&self, slug: &str) -> Result<Category, ApiError> {
        self.get(self.endpoint(&["categories", slug])).await
    }

    /// `GET /collections`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn collections(&self) -> Result<Vec<Collection>, ApiError> {
        self.get(self.endpoint(&["collections"])).await
    }

    /// `GET /collections/{slug}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn collection(&self, slug: &str) -> Result<Collection, ApiError> {
        self.get(self.endpoint(&["collections", slug])).await
    }

    /// `POST /orders`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        self.post(self.endpoint(&["orders"]), order).await
    }

    /// `GET /orders/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn order(&self, id: &str) -> Result<Order, ApiError> {
        self.get(self.endpoint(&["orders", id])).await
    }

    /// `POST /payments/create-intent`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ApiError> {
        self.post(self.endpoint(&["payments", "create-intent"]), request)
            .await
    }

    /// `POST /payments/confirm`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn confirm_payment(&self, payment_intent_id: &str) -> Result<PaymentStatus, ApiError> {
        let body = PaymentConfirmation { payment_intent_id };
        self.post(self.endpoint(&["payments", "confirm"]), &body)
            .await
    }

    /// `POST /newsletter/subscribe`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn subscribe_newsletter(&self, email: &str) -> Result<Acknowledgement, ApiError> {
        self.post(
            self.endpoint(&["newsletter", "subscribe"]),
            &NewsletterSignup { email },
        )
        .await
    }

    /// `POST /contact`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or a body
    /// that does not decode.
    pub async fn send_contact_message(
        &self,
        message: &ContactMessage,
    ) -> Result<Acknowledgement, ApiError> {
        self.post(self.endpoint(&["contact"]), message).await
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn endpoint_with_query(&self, segments: &[&str], pairs: &[(&str, String)]) -> Url {
        let mut url = self.endpoint(segments);
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (k, v) in pairs {
                query.append_pair(k, v);
            }
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let request = self.client.get(url.clone());
        Self::send(request, &url).await
    }

    async fn post<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(url.clone()).json(body);
        Self::send(request, &url).await
    }

    /// Sends the request, maps non-2xx statuses to [`ApiError::Status`], and
    /// decodes the body.
    async fn send<T: DeserializeOwned>(request: RequestBuilder, url: &Url) -> Result<T, ApiError> {
        tracing::debug!(endpoint = url.path(), "API request");

        let result: Result<T, ApiError> = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                    url: url.to_string(),
                });
            }
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
                context: url.path().to_string(),
                source: e,
            })
        }
        .await;

        match &result {
            Ok(_) => tracing::debug!(endpoint = url.path(), "API response ok"),
            Err(e) => tracing::warn!(endpoint = url.path(), error = %e, "API request failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
