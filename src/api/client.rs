//! HTTP client for the SmartClaim JSON API. A single `reqwest::Client` is built
//! once with a timeout, default headers and an ordered middleware chain;
//! resource modules call the typed helpers below instead of building requests
//! themselves. The helpers never log tokens or request bodies.

use super::{
    config::{build_url_with_base, ApiConfig},
    errors::{api_error_message, AppError},
    middleware::Middleware,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    multipart::Form,
    Client, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Configured API client shared by every resource module.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    middleware: Arc<[Arc<dyn Middleware>]>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

pub struct ApiClientBuilder {
    config: ApiConfig,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl ApiClientBuilder {
    /// Appends a middleware; middleware run in the order they are added.
    #[must_use]
    pub fn with(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// # Errors
    /// Returns `AppError::Config` if the base URL is invalid or the HTTP client cannot be built.
    pub fn build(self) -> Result<ApiClient, AppError> {
        self.config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(self.config.user_agent.as_str())
            .default_headers(headers)
            .timeout(self.config.timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(ApiClient {
            http,
            base_url: self.config.api_base_url,
            middleware: self.middleware.into(),
        })
    }
}

impl ApiClient {
    #[must_use]
    pub fn builder(config: ApiConfig) -> ApiClientBuilder {
        ApiClientBuilder {
            config,
            middleware: Vec::new(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    /// GET a JSON resource.
    ///
    /// # Errors
    /// Returns `AppError` on transport failures, non-success statuses or undecodable bodies.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        handle_json_response(response).await
    }

    /// GET a JSON resource with query parameters.
    ///
    /// # Errors
    /// Returns `AppError` on transport failures, non-success statuses or undecodable bodies.
    pub async fn get_json_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, AppError> {
        let response = self
            .send(self.http.get(self.url(path)).query(query))
            .await?;
        handle_json_response(response).await
    }

    /// POST a JSON body and parse a JSON response.
    ///
    /// # Errors
    /// Returns `AppError` on transport failures, non-success statuses or undecodable bodies.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        handle_json_response(response).await
    }

    /// POST without a body and parse a JSON response.
    ///
    /// # Errors
    /// Returns `AppError` on transport failures, non-success statuses or undecodable bodies.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.http.post(self.url(path))).await?;
        handle_json_response(response).await
    }

    /// PUT a JSON body and parse a JSON response.
    ///
    /// # Errors
    /// Returns `AppError` on transport failures, non-success statuses or undecodable bodies.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.send(self.http.put(self.url(path)).json(body)).await?;
        handle_json_response(response).await
    }

    /// POST a multipart form and parse a JSON response.
    ///
    /// # Errors
    /// Returns `AppError` on transport failures, non-success statuses or undecodable bodies.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, AppError> {
        let response = self
            .send(self.http.post(self.url(path)).multipart(form))
            .await?;
        handle_json_response(response).await
    }

    /// GET a binary resource such as a PDF or an uploaded file.
    ///
    /// # Errors
    /// Returns `AppError` on transport failures or non-success statuses.
    pub async fn get_bytes<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Vec<u8>, AppError> {
        let response = self
            .send(self.http.get(self.url(path)).query(query))
            .await?;
        let response = error_for_status(response).await?;
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|err| AppError::Parse(format!("Failed to read response body: {err}")))
    }

    /// Runs the middleware chain around a single request.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let mut request = builder
            .build()
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;

        for middleware in self.middleware.iter() {
            middleware.on_request(&mut request);
        }

        let method = request.method().clone();
        let url = request.url().clone();
        let response = self.http.execute(request).await.map_err(map_request_error)?;

        let status = response.status();
        for middleware in self.middleware.iter() {
            middleware.on_response(&method, &url, status);
        }

        Ok(response)
    }
}

/// Maps transport errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Converts non-success responses into `AppError::Http` with a normalized message.
async fn error_for_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::Http {
        status: status.as_u16(),
        message: api_error_message(&body, status),
    })
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let response = error_for_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}
