//! Fetch Gateway
//!
//! Typed wrappers around the backend's HTTP contract. Every call is a single
//! attempt with the platform's default timeout; retrying is the poller's
//! cadence, not the gateway's job.
//!
//! | Method | Path                | Result                                 |
//! |--------|---------------------|----------------------------------------|
//! | GET    | `/sensors/readings` | raw readings (validated by the caller) |
//! | GET    | `/sensors/health`   | health records                         |
//! | GET    | `/predict`          | latest prediction, non-2xx => `None`   |
//! | POST   | `/predict`          | direct inference                       |
//! | POST   | `/register`         | `{success}`                            |
//! | POST   | `/login`            | `{success, user?}`                     |
//! | GET    | `/mine-info`        | site description                       |
//! | GET    | `/notifications`    | notifications                          |
//! | POST   | `/settings`         | echoed settings                        |

use std::future::Future;
use std::sync::Arc;

use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::domain::config::ApiConfig;
use crate::domain::health::{SensorHealth, decode_health_batch};
use crate::domain::mine::{MineInfo, Notification};
use crate::domain::prediction::Prediction;
use crate::domain::reading::RawSensorReading;
use crate::domain::settings::AppSettings;
use crate::domain::user::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::{Error, Result, TransportSnafu};

const READINGS_PATH: &str = "/sensors/readings";
const HEALTH_PATH: &str = "/sensors/health";
const PREDICT_PATH: &str = "/predict";
const REGISTER_PATH: &str = "/register";
const LOGIN_PATH: &str = "/login";
const MINE_INFO_PATH: &str = "/mine-info";
const NOTIFICATIONS_PATH: &str = "/notifications";
const SETTINGS_PATH: &str = "/settings";

/// Data the polling loop needs from the backend
pub trait SensorSource: Send + Sync + 'static {
    fn fetch_sensor_readings(&self) -> impl Future<Output = Result<Vec<RawSensorReading>>> + Send;

    fn fetch_sensor_health(&self) -> impl Future<Output = Result<Vec<SensorHealth>>> + Send;

    /// `Ok(None)` when the backend has no prediction yet
    fn fetch_prediction(&self) -> impl Future<Output = Result<Option<Prediction>>> + Send;
}

/// Account endpoints used by the auth service
pub trait AuthApi: Send + Sync {
    fn register_user(
        &self,
        profile: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthResponse>> + Send;

    fn login_user(
        &self,
        credentials: &LoginRequest,
    ) -> impl Future<Output = Result<AuthResponse>> + Send;
}

/// HTTP client for the monitoring backend
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<str>,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context(TransportSnafu { endpoint: "client" })?;
        Ok(Self {
            http,
            base_url: base_url.as_ref().trim_end_matches('/').into(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ==================== Sensors ====================

    pub async fn fetch_sensor_readings(&self) -> Result<Vec<RawSensorReading>> {
        self.get_json(READINGS_PATH).await
    }

    /// Health records; entries that cannot be decoded are dropped individually
    pub async fn fetch_sensor_health(&self) -> Result<Vec<SensorHealth>> {
        let values: Vec<serde_json::Value> = self.get_json(HEALTH_PATH).await?;
        Ok(decode_health_batch(values))
    }

    // ==================== Prediction ====================

    /// Latest stored prediction; any non-2xx answer means "none yet"
    pub async fn fetch_prediction(&self) -> Result<Option<Prediction>> {
        let response = self
            .http
            .get(self.url(PREDICT_PATH))
            .send()
            .await
            .context(TransportSnafu { endpoint: PREDICT_PATH })?;

        if !response.status().is_success() {
            tracing::debug!("No prediction available (HTTP {})", response.status());
            return Ok(None);
        }

        response
            .json::<Option<Prediction>>()
            .await
            .context(TransportSnafu { endpoint: PREDICT_PATH })
    }

    /// Run inference directly on a feature vector
    pub async fn predict(&self, features: &[f64]) -> Result<Prediction> {
        self.post_json(PREDICT_PATH, features).await
    }

    // ==================== Auth ====================

    pub async fn register_user(&self, profile: &RegisterRequest) -> Result<AuthResponse> {
        self.post_auth(REGISTER_PATH, profile, "Registration failed")
            .await
    }

    pub async fn login_user(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        self.post_auth(LOGIN_PATH, credentials, "Login failed").await
    }

    // ==================== Site ====================

    pub async fn fetch_mine_info(&self) -> Result<MineInfo> {
        self.get_json(MINE_INFO_PATH).await
    }

    pub async fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        self.get_json(NOTIFICATIONS_PATH).await
    }

    pub async fn save_app_settings(&self, settings: &AppSettings) -> Result<AppSettings> {
        self.post_json(SETTINGS_PATH, settings).await
    }

    // ==================== Internals ====================

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .context(TransportSnafu { endpoint: path })?;
        let response = ensure_success(path, response).await?;
        response.json().await.context(TransportSnafu { endpoint: path })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .context(TransportSnafu { endpoint: path })?;
        let response = ensure_success(path, response).await?;
        response.json().await.context(TransportSnafu { endpoint: path })
    }

    async fn post_auth<B>(&self, path: &str, body: &B, fallback: &str) -> Result<AuthResponse>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .context(TransportSnafu { endpoint: path })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("detail")?.as_str().map(str::to_owned));
            tracing::warn!("{} rejected with HTTP {}", path, status);
            return Err(Error::Auth {
                message: detail.unwrap_or_else(|| fallback.to_string()),
            });
        }

        response
            .json()
            .await
            .context(TransportSnafu { endpoint: path })
    }
}

async fn ensure_success(path: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Status {
        endpoint: path.to_string(),
        status: status.as_u16(),
        body,
    })
}

impl SensorSource for ApiClient {
    fn fetch_sensor_readings(&self) -> impl Future<Output = Result<Vec<RawSensorReading>>> + Send {
        ApiClient::fetch_sensor_readings(self)
    }

    fn fetch_sensor_health(&self) -> impl Future<Output = Result<Vec<SensorHealth>>> + Send {
        ApiClient::fetch_sensor_health(self)
    }

    fn fetch_prediction(&self) -> impl Future<Output = Result<Option<Prediction>>> + Send {
        ApiClient::fetch_prediction(self)
    }
}

impl AuthApi for ApiClient {
    fn register_user(
        &self,
        profile: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthResponse>> + Send {
        ApiClient::register_user(self, profile)
    }

    fn login_user(
        &self,
        credentials: &LoginRequest,
    ) -> impl Future<Output = Result<AuthResponse>> + Send {
        ApiClient::login_user(self, credentials)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
