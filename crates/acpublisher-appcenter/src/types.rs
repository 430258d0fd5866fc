//! Request and response types for the App Center API
//!
//! One record pair per endpoint. Optional request fields serialize as
//! omitted rather than empty: the server treats an absent field and an
//! empty string differently.

use serde::{Deserialize, Serialize};

/// `owner/app` identifier used as a path segment in every request
///
/// The owner is the organization or user name, the app the application
/// name, both as they appear in the App Center web URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSlug {
    owner: String,
    app: String,
}

impl AppSlug {
    /// Create a slug from owner and app name
    pub fn new(owner: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            app: app.into(),
        }
    }

    /// Owner organization or user
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Application name
    pub fn app(&self) -> &str {
        &self.app
    }
}

impl std::fmt::Display for AppSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.app)
    }
}

/// Terminal disposition the client assigns to an upload session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Upload finished, make it available
    Committed,
    /// Upload abandoned, discard it
    Aborted,
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadStatus::Committed => write!(f, "committed"),
            UploadStatus::Aborted => write!(f, "aborted"),
        }
    }
}

/// Body of `POST /apps/{slug}/release_uploads`
///
/// All fields are optional; the workflow sends the default (empty) body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReleaseUploadBeginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
}

/// Upload session returned by `begin_release_upload`
///
/// `upload_url` is a pre-signed destination consumed once by the binary
/// transfer; `upload_id` closes the session on commit.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseUploadBeginResponse {
    pub upload_id: String,
    pub upload_url: String,
    pub asset_id: Option<String>,
    pub asset_domain: Option<String>,
    pub asset_token: Option<String>,
}

/// Body of `PATCH /apps/{slug}/release_uploads/{upload_id}`
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseUploadEndRequest {
    pub status: UploadStatus,
}

/// Committed release identity
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseUploadEndResponse {
    pub release_id: Option<String>,
    pub release_url: Option<String>,
}

/// Destination entry attached to a release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseDestination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Build provenance block of the update request
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseBuildInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
}

/// Metadata block of the update request
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsa_signature: Option<String>,
}

/// Body of `PUT /apps/{slug}/releases/{release_id}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReleaseUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandatory_update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<ReleaseDestination>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<ReleaseBuildInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_testers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ReleaseMetadata>,
}

/// Release state after the metadata update
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseUpdateResponse {
    pub enabled: Option<bool>,
    pub mandatory_update: Option<bool>,
    pub release_notes: Option<String>,
    pub provisioning_status_url: Option<String>,
    pub destinations: Option<Vec<ReleaseDestination>>,
}

/// Body of `POST /apps/{slug}/releases/{release_id}/{destination_type}`
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseDestinationRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandatory_update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_testers: Option<bool>,
}

/// Acknowledgement of a destination publish
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDestinationResponse {
    pub id: String,
    #[serde(default)]
    pub mandatory_update: bool,
    pub provisioning_status_url: Option<String>,
}

/// Release details from `GET /apps/{slug}/releases/{release_id}`
///
/// The symbol-upload path needs `version` and `short_version`; the rest is
/// display metadata the server may omit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReleaseDetailsResponse {
    pub id: i64,
    pub app_name: String,
    pub app_display_name: String,
    pub version: String,
    pub short_version: String,
    pub uploaded_at: String,
    pub app_icon_url: String,
    pub enabled: bool,
}

/// Symbol artifact kind declared when beginning a symbol upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolType {
    Apple,
    JavaScript,
    Breakpad,
    /// Android ProGuard de-obfuscation mapping
    AndroidProguard,
    #[serde(rename = "UWP")]
    Uwp,
}

/// Body of `POST /apps/{slug}/symbol_uploads`
#[derive(Debug, Clone, Serialize)]
pub struct SymbolUploadBeginRequest {
    pub symbol_type: SymbolType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_callback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Symbol upload session
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolUploadBeginResponse {
    pub symbol_upload_id: String,
    pub upload_url: String,
    #[serde(default)]
    pub expiration_date: String,
}

/// Body of `PATCH /apps/{slug}/symbol_uploads/{symbol_upload_id}`
#[derive(Debug, Clone, Serialize)]
pub struct SymbolUploadEndRequest {
    pub status: UploadStatus,
}

/// Server-reported lifecycle of a symbol upload
///
/// The client only ever writes `committed`/`aborted`; the remaining states
/// show up when reading a session back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolUploadStatus {
    Created,
    Committed,
    Aborted,
    Processing,
    Indexed,
    Failed,
}

impl std::fmt::Display for SymbolUploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SymbolUploadStatus::Created => "created",
            SymbolUploadStatus::Committed => "committed",
            SymbolUploadStatus::Aborted => "aborted",
            SymbolUploadStatus::Processing => "processing",
            SymbolUploadStatus::Indexed => "indexed",
            SymbolUploadStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// User block on a symbol upload record
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolUser {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Symbol upload record returned by the commit endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolUpload {
    pub symbol_upload_id: String,
    #[serde(default)]
    pub app_id: String,
    pub user: Option<SymbolUser>,
    pub status: SymbolUploadStatus,
    pub symbol_type: Option<SymbolType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_slug_renders_as_path_segment() {
        let slug = AppSlug::new("Example", "ExampleApp");
        assert_eq!(slug.to_string(), "Example/ExampleApp");
        assert_eq!(slug.owner(), "Example");
        assert_eq!(slug.app(), "ExampleApp");
    }

    #[test]
    fn default_begin_request_serializes_empty() {
        let body = serde_json::to_string(&ReleaseUploadBeginRequest::default()).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn update_request_omits_absent_fields() {
        let request = ReleaseUpdateRequest {
            release_notes: Some("Fixed crash on startup".to_string()),
            ..Default::default()
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "release_notes": "Fixed crash on startup" })
        );
    }

    #[test]
    fn upload_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&UploadStatus::Committed).unwrap(),
            "\"committed\""
        );
        assert_eq!(
            serde_json::to_string(&UploadStatus::Aborted).unwrap(),
            "\"aborted\""
        );
    }

    #[test]
    fn symbol_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&SymbolType::AndroidProguard).unwrap(),
            "\"AndroidProguard\""
        );
        assert_eq!(serde_json::to_string(&SymbolType::Uwp).unwrap(), "\"UWP\"");
    }

    #[test]
    fn begin_response_tolerates_missing_asset_fields() {
        let response: ReleaseUploadBeginResponse = serde_json::from_str(
            r#"{"upload_id": "u-1", "upload_url": "https://upload.example/u-1"}"#,
        )
        .unwrap();

        assert_eq!(response.upload_id, "u-1");
        assert!(response.asset_token.is_none());
    }

    #[test]
    fn release_details_defaults_missing_fields() {
        let details: ReleaseDetailsResponse =
            serde_json::from_str(r#"{"id": 7, "version": "42", "short_version": "1.2.0"}"#)
                .unwrap();

        assert_eq!(details.id, 7);
        assert_eq!(details.version, "42");
        assert_eq!(details.short_version, "1.2.0");
        assert_eq!(details.app_name, "");
        assert!(!details.enabled);
    }

    #[test]
    fn symbol_upload_status_parses_server_states() {
        let upload: SymbolUpload = serde_json::from_str(
            r#"{"symbol_upload_id": "s-1", "status": "indexed", "symbol_type": "AndroidProguard"}"#,
        )
        .unwrap();

        assert_eq!(upload.status, SymbolUploadStatus::Indexed);
        assert_eq!(upload.symbol_type, Some(SymbolType::AndroidProguard));
        assert!(upload.user.is_none());
    }

    #[test]
    fn symbol_begin_request_carries_mapping_name() {
        let request = SymbolUploadBeginRequest {
            symbol_type: SymbolType::AndroidProguard,
            client_callback: None,
            file_name: Some("mapping.txt".to_string()),
            build: Some("42".to_string()),
            version: Some("1.2.0".to_string()),
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "symbol_type": "AndroidProguard",
                "file_name": "mapping.txt",
                "build": "42",
                "version": "1.2.0"
            })
        );
    }
}
