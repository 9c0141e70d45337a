use crate::models::Session;
use crate::storage::load_access_token;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[cfg(test)]
pub(crate) mod mock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
    /// Rejected before any request was issued.
    Invalid,
}

/// Failure of a single gateway call. `Display` is the message shown to the user.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: e.to_string(),
        }
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            status: None,
            message: e.to_string(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Invalid,
            status: None,
            message: message.into(),
        }
    }

    /// Classify a non-success response. The remote service reports failures as JSON
    /// with a `message` (tables, storage) or `error_description` (auth) field.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let kind = if status == 401 || status == 403 {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::Http
        };

        Self {
            kind,
            status: Some(status),
            message: remote_message(status, body),
        }
    }
}

fn remote_message(status: u16, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error_description", "msg", "error"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(|m| m.to_string()))
        });

    match from_json {
        Some(m) if !m.trim().is_empty() => m,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("Request failed ({status})"),
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl EnvConfig {
    const DEFAULT_URL: &'static str = "http://localhost:54321";

    pub fn new() -> Self {
        let mut url = None;
        let mut anon_key = None;

        // We support BOTH `window.ENV.SUPABASE_URL` (documented in README) and
        // lower-case keys for hand-written deployments.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    let read = |key: &str| {
                        js_sys::Reflect::get(&env, &key.into())
                            .ok()
                            .and_then(|v| v.as_string())
                    };
                    url = read("SUPABASE_URL").or_else(|| read("supabase_url"));
                    anon_key = read("SUPABASE_ANON_KEY").or_else(|| read("supabase_anon_key"));
                }
            }
        }

        Self::from_values(url, anon_key)
    }

    pub fn from_values(url: Option<String>, anon_key: Option<String>) -> Self {
        let url = url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_URL.to_string());

        Self {
            supabase_url: url,
            supabase_anon_key: anon_key.unwrap_or_default().trim().to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Bytes of a file picked in the browser, ready to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UploadObject {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UploadOptions {
    /// Seconds, sent as `cache-control: max-age=<n>`.
    pub cache_control: u32,
    pub upsert: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            cache_control: 3600,
            upsert: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AuthGrant {
    pub access_token: String,
    pub user: AuthUser,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct PasswordGrantRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct SignedUrlRequest {
    #[serde(rename = "expiresIn")]
    expires_in: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct SignedUrlResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: String,
}

/// Operations consumed from the hosted backend. Every service in the crate is generic
/// over this trait so it can be driven by a recording fake in tests.
pub(crate) trait Gateway {
    async fn select_all<T: DeserializeOwned>(&self, table: &str) -> ApiResult<Vec<T>>;

    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> ApiResult<Option<T>>;

    async fn insert<R: Serialize>(&self, table: &str, row: &R) -> ApiResult<()>;

    /// Store `object` under `bucket/key`; returns the stored key.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        object: &UploadObject,
        options: &UploadOptions,
    ) -> ApiResult<String>;

    async fn create_signed_url(&self, bucket: &str, key: &str, ttl_secs: u32)
        -> ApiResult<String>;

    fn public_url(&self, bucket: &str, key: &str) -> String;

    async fn get_session(&self) -> ApiResult<Option<Session>>;
}

/// Percent-encode each path segment of an object key, keeping `/` separators.
pub(crate) fn encode_object_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    http: reqwest::Client,
    pub(crate) base_url: String,
    anon_key: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &EnvConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            token: None,
        }
    }

    pub fn load_from_storage(config: &EnvConfig) -> Self {
        let mut client = Self::new(config);
        client.token = load_access_token();
        client
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.as_deref().unwrap_or(&self.anon_key))
    }

    fn with_auth_headers(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.anon_key)
            .header("Authorization", self.bearer())
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket,
            encode_object_key(key)
        )
    }

    fn signed_url_endpoint(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/sign/{}/{}",
            self.base_url,
            bucket,
            encode_object_key(key)
        )
    }

    /// The sign endpoint answers with a path relative to `/storage/v1`.
    fn absolute_signed_url(&self, signed: &str) -> String {
        if signed.starts_with("http://") || signed.starts_with("https://") {
            return signed.to_string();
        }
        let sep = if signed.starts_with('/') { "" } else { "/" };
        format!("{}/storage/v1{}{}", self.base_url, sep, signed)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let res = self
            .with_auth_headers(req)
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::from_response(status, &body))
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ApiResult<T> {
        self.send(req).await?.json().await.map_err(ApiError::parse)
    }

    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> ApiResult<AuthGrant> {
        let req = self
            .http
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "password")])
            .json(&PasswordGrantRequest {
                email: email.to_string(),
                password: password.to_string(),
            });
        self.send_json(req).await
    }
}

impl Gateway for ApiClient {
    async fn select_all<T: DeserializeOwned>(&self, table: &str) -> ApiResult<Vec<T>> {
        let req = self
            .http
            .get(self.rest_url(table))
            .query(&[("select", "*")]);
        self.send_json(req).await
    }

    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> ApiResult<Option<T>> {
        let filter = format!("eq.{value}");
        let req = self
            .http
            .get(self.rest_url(table))
            .query(&[("select", "*"), (column, filter.as_str()), ("limit", "1")]);
        let rows: Vec<T> = self.send_json(req).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert<R: Serialize>(&self, table: &str, row: &R) -> ApiResult<()> {
        let req = self
            .http
            .post(self.rest_url(table))
            .header("Prefer", "return=minimal")
            .json(&[row]);
        self.send(req).await.map(|_| ())
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        object: &UploadObject,
        options: &UploadOptions,
    ) -> ApiResult<String> {
        let content_type = object
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let req = self
            .http
            .post(self.object_url(bucket, key))
            .header("Content-Type", content_type)
            .header("cache-control", format!("max-age={}", options.cache_control))
            .header("x-upsert", options.upsert.to_string())
            .body(object.bytes.clone());
        self.send(req).await?;
        Ok(key.to_string())
    }

    async fn create_signed_url(
        &self,
        bucket: &str,
        key: &str,
        ttl_secs: u32,
    ) -> ApiResult<String> {
        let req = self
            .http
            .post(self.signed_url_endpoint(bucket, key))
            .json(&SignedUrlRequest {
                expires_in: ttl_secs,
            });
        let res: SignedUrlResponse = self.send_json(req).await?;
        Ok(self.absolute_signed_url(&res.signed_url))
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            encode_object_key(key)
        )
    }

    async fn get_session(&self) -> ApiResult<Option<Session>> {
        if self.token.is_none() {
            return Ok(None);
        }

        let req = self.http.get(format!("{}/auth/v1/user", self.base_url));
        match self.send_json::<AuthUser>(req).await {
            Ok(user) if !user.id.trim().is_empty() => Ok(Some(Session { user_id: user.id })),
            Ok(_) => Ok(None),
            Err(e) if e.kind == ApiErrorKind::Unauthorized => Ok(None),
            Err(e) => Err(e),
        }
    }
}
