//! Binary transfers to pre-signed upload destinations
//!
//! Two variants: a multipart form post for the package itself, and a
//! single-shot block-blob put for the symbol (mapping) file. Neither sends
//! a credential header; authorization is encoded in the destination URL.

use std::path::Path;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{AppCenterError, Result};

/// Upload the package bytes as a multipart form post.
///
/// The single form part is named `ipa` regardless of package type; that is
/// the field name the upload endpoint expects. The destination is
/// pre-signed, and any reachable response is treated as delivery: the
/// response status is deliberately not inspected.
pub async fn upload_package(client: &Client, upload_url: &str, package: &Path) -> Result<()> {
    let file_name = package
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("app.apk")
        .to_string();

    debug!("Upload release {}", file_name);

    let bytes = tokio::fs::read(package)
        .await
        .map_err(|e| AppCenterError::Transfer(format!("Failed to read package: {e}")))?;

    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/vnd.android.package-archive")
        .map_err(|e| AppCenterError::Transfer(format!("Failed to build multipart form: {e}")))?;
    let form = Form::new().part("ipa", part);

    let response = client
        .post(upload_url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| AppCenterError::Transfer(format!("Package upload failed: {e}")))?;

    response
        .bytes()
        .await
        .map_err(|e| AppCenterError::Transfer(format!("Package upload failed: {e}")))?;

    Ok(())
}

/// Upload the mapping file as one committed block blob.
///
/// The destination is a pre-signed Azure block-blob URL; the whole file
/// goes up in a single put with the `BlockBlob` type header. Unlike the
/// package transfer, a storage-service rejection is an error here.
pub async fn upload_symbols(client: &Client, upload_url: &str, mapping: &Path) -> Result<()> {
    debug!("Upload symbols");

    let destination = Url::parse(upload_url)
        .map_err(|e| AppCenterError::Transfer(format!("Invalid upload URL: {e}")))?;

    let bytes = tokio::fs::read(mapping)
        .await
        .map_err(|e| AppCenterError::Transfer(format!("Failed to read mapping file: {e}")))?;

    let response = client
        .put(destination)
        .header("x-ms-blob-type", "BlockBlob")
        .header(CONTENT_TYPE, "application/octet-stream")
        .body(bytes)
        .send()
        .await
        .map_err(|e| AppCenterError::Transfer(format!("Block upload failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppCenterError::Transfer(format!(
            "Block upload rejected ({status}): {body}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::io::Write;

    fn temp_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn package_upload_posts_ipa_form_part() {
        let apk = temp_file(b"apk-bytes");
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/upload/u-1")
                .body_contains("name=\"ipa\"")
                .body_contains("apk-bytes");
            then.status(200).body("ok");
        });

        let client = Client::new();
        let url = format!("{}/upload/u-1", server.base_url());
        upload_package(&client, &url, apk.path()).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn package_upload_ignores_destination_status() {
        // Documented gap: the pre-signed destination's status is not
        // checked, so even a 500 reads as transfer completion.
        let apk = temp_file(b"apk-bytes");
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/upload/u-1");
            then.status(500).body("storage exploded");
        });

        let client = Client::new();
        let url = format!("{}/upload/u-1", server.base_url());
        let result = upload_package(&client, &url, apk.path()).await;

        mock.assert();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn package_upload_fails_when_unreachable() {
        let apk = temp_file(b"apk-bytes");
        let client = Client::new();

        let err = upload_package(&client, "http://127.0.0.1:1/upload", apk.path())
            .await
            .unwrap_err();

        assert!(matches!(err, AppCenterError::Transfer(_)));
    }

    #[tokio::test]
    async fn block_upload_sends_blob_type_header() {
        let mapping = temp_file(b"class -> a.b.c");
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/container/mapping.txt")
                .header("x-ms-blob-type", "BlockBlob")
                .header("Content-Type", "application/octet-stream")
                .body("class -> a.b.c");
            then.status(201);
        });

        let client = Client::new();
        let url = format!("{}/container/mapping.txt?sig=abc", server.base_url());
        upload_symbols(&client, &url, mapping.path()).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn block_upload_rejection_is_a_transfer_error() {
        let mapping = temp_file(b"class -> a.b.c");
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path("/container/mapping.txt");
            then.status(403).body("signature expired");
        });

        let client = Client::new();
        let url = format!("{}/container/mapping.txt", server.base_url());
        let err = upload_symbols(&client, &url, mapping.path())
            .await
            .unwrap_err();

        match err {
            AppCenterError::Transfer(message) => {
                assert!(message.contains("403"));
                assert!(message.contains("signature expired"));
            }
            other => panic!("expected Transfer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn block_upload_rejects_malformed_url() {
        let mapping = temp_file(b"class -> a.b.c");
        let client = Client::new();

        let err = upload_symbols(&client, "::not a url::", mapping.path())
            .await
            .unwrap_err();

        assert!(matches!(err, AppCenterError::Transfer(_)));
    }
}
