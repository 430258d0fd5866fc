//! Release publication workflow
//!
//! Fail-fast sequence over the client's endpoints: begin upload, transfer
//! the package, commit, set release notes, then the two optional tails —
//! group publication and the symbol (mapping) upload. Every step must
//! succeed before the next one is attempted; the only compensation is the
//! best-effort abort of a symbol session whose transfer failed.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::client::AppCenter;
use crate::error::Result;
use crate::transfer;
use crate::types::UploadStatus;

/// Inputs for one publication run
#[derive(Debug, Clone, Default)]
pub struct UploadApkOptions {
    /// Path to the APK to upload
    pub apk: PathBuf,

    /// Optional ProGuard mapping file to upload as symbols
    pub mapping: Option<PathBuf>,

    /// Release notes, already resolved by the caller
    pub release_notes: String,

    /// Distribution group ids, published one at a time in this order
    pub groups: Vec<String>,
}

/// Identity of the published release
#[derive(Debug, Clone)]
pub struct PublishedRelease {
    pub release_id: String,
    pub release_url: Option<String>,
}

impl AppCenter {
    /// Run the whole publication sequence.
    ///
    /// Step order: begin upload, package transfer, commit, release-notes
    /// update, one publish call per group (skipped when no groups are
    /// given), then the symbol path when a mapping file is given.
    pub async fn publish_apk(&self, options: &UploadApkOptions) -> Result<PublishedRelease> {
        info!("Creating new release...");
        let session = self.begin_release_upload().await?;
        transfer::upload_package(self.http(), &session.upload_url, &options.apk).await?;
        let committed = self.commit_release(&session.upload_id).await?;

        // The server may omit the id; carry on with what it sent.
        let release_id = committed.release_id.unwrap_or_default();

        self.update_release(&release_id, &options.release_notes)
            .await?;
        info!("Release {} OK", release_id);

        if options.groups.is_empty() {
            debug!("No groups defined, skipping publish");
        } else {
            info!("Publishing release {} to group(s)...", release_id);
            for group in &options.groups {
                self.publish_release(&release_id, "groups", group).await?;
            }
            info!("Publish OK");
        }

        if let Some(ref mapping) = options.mapping {
            info!("Uploading mapping file...");
            self.upload_mapping(&release_id, mapping).await?;
            info!("Mapping upload OK");
        } else {
            debug!("No mapping file defined, skipping mapping file upload");
        }

        Ok(PublishedRelease {
            release_id,
            release_url: committed.release_url,
        })
    }

    /// Symbol tail of the workflow: look up version metadata, open a
    /// symbol session, transfer the mapping, and close the session.
    async fn upload_mapping(&self, release_id: &str, mapping: &Path) -> Result<()> {
        let details = self.get_release(release_id).await?;

        let file_name = mapping
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("mapping.txt");

        let session = self
            .begin_symbol_upload(&details.short_version, &details.version, file_name)
            .await?;

        if let Err(err) =
            transfer::upload_symbols(self.http(), &session.upload_url, mapping).await
        {
            // Best-effort abort; the transfer error is what gets reported.
            let _ = self
                .commit_symbols(&session.symbol_upload_id, UploadStatus::Aborted)
                .await;
            return Err(err);
        }

        let upload = self
            .commit_symbols(&session.symbol_upload_id, UploadStatus::Committed)
            .await?;
        debug!(
            "Symbol upload {} reported as {}",
            upload.symbol_upload_id, upload.status
        );

        Ok(())
    }
}
