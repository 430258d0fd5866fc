//! App Center upload client for acpublisher
//!
//! This crate implements the release-publication sequence against the
//! App Center REST API: begin a release upload, transfer the APK, commit,
//! set release notes, distribute to groups, and optionally upload a
//! ProGuard mapping file as a symbol artifact.
//!
//! ## Usage
//!
//! ```ignore
//! use acpublisher_appcenter::{AppCenter, AppSlug, UploadApkOptions};
//!
//! let client = AppCenter::new(AppSlug::new("owner", "app"), token);
//! let release = client.publish_apk(&options).await?;
//! println!("released {}", release.release_id);
//! ```

pub mod client;
pub mod error;
pub mod transfer;
pub mod types;
pub mod workflow;

pub use client::AppCenter;
pub use error::{AppCenterError, Result};
pub use types::{AppSlug, SymbolType, SymbolUploadStatus, UploadStatus};
pub use workflow::{PublishedRelease, UploadApkOptions};
