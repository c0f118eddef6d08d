//! Document management services.

pub mod download;
pub mod service;

pub use download::{DownloadService, FileDownload};
pub use service::{DocumentFilter, DocumentService};
