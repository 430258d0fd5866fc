//! Command implementations

mod upload_apk;

pub use upload_apk::UploadApkCommand;
