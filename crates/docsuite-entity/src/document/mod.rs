//! Compliance document entities.
//!
//! Policies, manuals, COSHH sheets, risk assessments and the rest all
//! share one versioned, categorized, approvable document shape. The
//! `kind` column is the only thing that distinguishes them.

pub mod action;
pub mod category;
pub mod kind;
pub mod model;
pub mod version;

pub use action::{DocumentAction, ReorderDirection};
pub use category::{CreateDocumentCategory, DocumentCategory};
pub use kind::DocumentKind;
pub use model::{CreateDocument, Document, UpdateDocument};
pub use version::{CreateDocumentVersion, DocumentVersion};
