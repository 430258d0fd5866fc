//! App Center API client
//!
//! One typed request/response exchange per call. The wire trace (request
//! line, headers, body, and their response counterparts) is emitted at
//! `trace` level so `--verbose` shows the full exchange.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{AppCenterError, Result};
use crate::types::{
    AppSlug, ReleaseDestinationRequest, ReleaseDestinationResponse, ReleaseDetailsResponse,
    ReleaseUpdateRequest, ReleaseUpdateResponse, ReleaseUploadBeginRequest,
    ReleaseUploadBeginResponse, ReleaseUploadEndRequest, ReleaseUploadEndResponse, SymbolType,
    SymbolUpload, SymbolUploadBeginRequest, SymbolUploadBeginResponse, SymbolUploadEndRequest,
    UploadStatus,
};

/// Production API endpoint
pub const APPCENTER_BASE_URL: &str = "https://api.appcenter.ms";

/// Versioned path prefix
pub const API_VERSION: &str = "v0.1";

/// Header carrying the API token on every request
const API_TOKEN_HEADER: &str = "X-API-Token";

/// Client for the App Center release and symbol upload endpoints
pub struct AppCenter {
    client: Client,
    base_url: String,
    app_slug: AppSlug,
    token: String,
}

impl AppCenter {
    /// Create a client against the production endpoint
    pub fn new(app_slug: AppSlug, token: impl Into<String>) -> Self {
        Self::with_base_url(APPCENTER_BASE_URL, app_slug, token)
    }

    /// Create a client against a specific endpoint
    pub fn with_base_url(
        base_url: impl Into<String>,
        app_slug: AppSlug,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            app_slug,
            token: token.into(),
        }
    }

    /// The slug this client targets
    pub fn app_slug(&self) -> &AppSlug {
        &self.app_slug
    }

    /// HTTP client shared with the binary transfers
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    fn app_url(&self, suffix: &str) -> String {
        format!(
            "{}/{}/apps/{}/{}",
            self.base_url, API_VERSION, self.app_slug, suffix
        )
    }

    /// Perform one exchange against the service.
    ///
    /// The response body is read before the status check so it appears in
    /// the wire trace even when the status is wrong.
    async fn exchange<B, T>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        expected: StatusCode,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self
            .client
            .request(method, url)
            .header(API_TOKEN_HEADER, &self.token)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(AppCenterError::Decode)?;
            builder = builder.body(bytes);
        }

        let request = builder.build().map_err(AppCenterError::Transport)?;

        trace!("--> {} {}", request.method(), request.url().path());
        for (name, value) in request.headers() {
            trace!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
        if let Some(bytes) = request.body().and_then(|b| b.as_bytes()) {
            trace!("{}", String::from_utf8_lossy(bytes));
        }
        trace!("--> END {}", request.method());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(AppCenterError::Transport)?;

        let status = response.status();
        trace!("<-- {:?} {}", response.version(), status);
        for (name, value) in response.headers() {
            trace!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
        }

        let body = response.bytes().await.map_err(AppCenterError::Transport)?;
        trace!("{}", String::from_utf8_lossy(&body));
        trace!("<-- END");

        if status != expected {
            return Err(AppCenterError::UnexpectedStatus(status.as_u16()));
        }

        serde_json::from_slice(&body).map_err(AppCenterError::Decode)
    }

    /// Open a release upload session
    pub async fn begin_release_upload(&self) -> Result<ReleaseUploadBeginResponse> {
        debug!("Begin release upload");

        let url = self.app_url("release_uploads");
        self.exchange(
            Method::POST,
            &url,
            Some(&ReleaseUploadBeginRequest::default()),
            StatusCode::CREATED,
        )
        .await
    }

    /// Close a release upload session as committed
    pub async fn commit_release(&self, upload_id: &str) -> Result<ReleaseUploadEndResponse> {
        debug!("Commit release {}", upload_id);

        let url = self.app_url(&format!("release_uploads/{upload_id}"));
        self.exchange(
            Method::PATCH,
            &url,
            Some(&ReleaseUploadEndRequest {
                status: UploadStatus::Committed,
            }),
            StatusCode::OK,
        )
        .await
    }

    /// Set release notes on a committed release
    pub async fn update_release(
        &self,
        release_id: &str,
        release_notes: &str,
    ) -> Result<ReleaseUpdateResponse> {
        debug!("Update release {}", release_id);

        let url = self.app_url(&format!("releases/{release_id}"));
        let request = ReleaseUpdateRequest {
            release_notes: Some(release_notes.to_string()),
            ..Default::default()
        };
        self.exchange(Method::PUT, &url, Some(&request), StatusCode::OK)
            .await
    }

    /// Publish a release to one destination
    pub async fn publish_release(
        &self,
        release_id: &str,
        destination_type: &str,
        destination_id: &str,
    ) -> Result<ReleaseDestinationResponse> {
        debug!("Publishing to {} {}", destination_type, destination_id);

        let url = self.app_url(&format!("releases/{release_id}/{destination_type}"));
        let request = ReleaseDestinationRequest {
            id: destination_id.to_string(),
            mandatory_update: None,
            notify_testers: None,
        };
        self.exchange(Method::POST, &url, Some(&request), StatusCode::CREATED)
            .await
    }

    /// Fetch release details, including version metadata
    pub async fn get_release(&self, release_id: &str) -> Result<ReleaseDetailsResponse> {
        debug!("Get release {}", release_id);

        let url = self.app_url(&format!("releases/{release_id}"));
        self.exchange(Method::GET, &url, None::<&()>, StatusCode::OK)
            .await
    }

    /// Open a symbol upload session for an Android ProGuard mapping
    pub async fn begin_symbol_upload(
        &self,
        version: &str,
        build: &str,
        file_name: &str,
    ) -> Result<SymbolUploadBeginResponse> {
        debug!("Begin symbol upload");

        let url = self.app_url("symbol_uploads");
        let request = SymbolUploadBeginRequest {
            symbol_type: SymbolType::AndroidProguard,
            client_callback: None,
            file_name: Some(file_name.to_string()),
            build: Some(build.to_string()),
            version: Some(version.to_string()),
        };
        self.exchange(Method::POST, &url, Some(&request), StatusCode::OK)
            .await
    }

    /// Close a symbol upload session with the given disposition
    pub async fn commit_symbols(
        &self,
        symbol_upload_id: &str,
        status: UploadStatus,
    ) -> Result<SymbolUpload> {
        debug!("Commit symbols {}", symbol_upload_id);

        let url = self.app_url(&format!("symbol_uploads/{symbol_upload_id}"));
        self.exchange(
            Method::PATCH,
            &url,
            Some(&SymbolUploadEndRequest { status }),
            StatusCode::OK,
        )
        .await
    }
}
