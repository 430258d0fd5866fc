//! uploadApk command - publish an APK release to App Center

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::debug;

use acpublisher_appcenter::{AppCenter, AppSlug, UploadApkOptions};

use crate::cli::Cli;

/// Upload an APK (and optionally its ProGuard mapping) to App Center
#[derive(Debug, Args)]
pub struct UploadApkCommand {
    /// Api token for App Center
    #[arg(long)]
    pub token: String,

    /// Name of the application owner organization or user. This can be
    /// found from the web url: https://appcenter.ms/users/{owner}/apps/{app}
    /// or https://appcenter.ms/orgs/{owner}/apps/{app}
    #[arg(long)]
    pub owner: String,

    /// Application name, as it appears in the App Center web url
    #[arg(long)]
    pub app: String,

    /// Path to apk file to upload
    #[arg(long)]
    pub apk: PathBuf,

    /// Path to ProGuard mapping file to upload
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Release notes
    #[arg(long = "releasenotes", default_value = "Uploaded with acpublisher")]
    pub release_notes: String,

    /// Path to file containing release notes; its contents override
    /// --releasenotes
    #[arg(long = "releasenotesfile")]
    pub release_notes_file: Option<PathBuf>,

    /// Id of the group where to distribute this release. Multiple groups
    /// can be set with multiple group arguments
    #[arg(long = "group")]
    pub groups: Vec<String>,
}

impl UploadApkCommand {
    pub fn execute(&self, _cli: &Cli) -> anyhow::Result<()> {
        debug!(owner = %self.owner, app = %self.app, "executing uploadApk command");

        // Local inputs are checked before any network call.
        let options = self.build_options()?;
        let client = AppCenter::new(
            AppSlug::new(self.owner.as_str(), self.app.as_str()),
            self.token.as_str(),
        );

        println!(
            "{}",
            style(format!(
                "Uploading {} to {}...",
                self.apk.display(),
                client.app_slug()
            ))
            .bold()
        );

        let runtime = tokio::runtime::Runtime::new()?;
        let release = runtime.block_on(client.publish_apk(&options))?;

        println!(
            "{} Release {} published",
            style("✓").green().bold(),
            style(&release.release_id).cyan()
        );
        if let Some(ref url) = release.release_url {
            println!("  Release URL: {}", style(url).dim());
        }
        if !options.groups.is_empty() {
            println!("  Groups: {}", style(options.groups.join(", ")).dim());
        }
        if options.mapping.is_some() {
            println!("  Mapping uploaded");
        }

        Ok(())
    }

    /// Check the local files and resolve release notes.
    fn build_options(&self) -> anyhow::Result<UploadApkOptions> {
        File::open(&self.apk)
            .with_context(|| format!("Cannot open apk file {}", self.apk.display()))?;

        if let Some(ref mapping) = self.mapping {
            File::open(mapping)
                .with_context(|| format!("Cannot open mapping file {}", mapping.display()))?;
        }

        let release_notes =
            resolve_release_notes(&self.release_notes, self.release_notes_file.as_deref())?;

        Ok(UploadApkOptions {
            apk: self.apk.clone(),
            mapping: self.mapping.clone(),
            release_notes,
            groups: self.groups.clone(),
        })
    }
}

/// File contents win over the literal flag when both are given.
fn resolve_release_notes(literal: &str, file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).with_context(|| {
            format!("Cannot read release notes file contents {}", path.display())
        }),
        None => Ok(literal.to_string()),
    }
}
