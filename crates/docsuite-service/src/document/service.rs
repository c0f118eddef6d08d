//! CRUD, flag actions, ordering, categories, and version history for
//! every document kind.
//!
//! All nine kinds share these code paths; the kind only selects the
//! permission system and scopes the queries.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docsuite_auth::PermissionResolver;
use docsuite_core::error::AppError;
use docsuite_core::types::pagination::{PageRequest, PageResponse};
use docsuite_database::repositories::{DocumentCategoryRepository, DocumentRepository};
use docsuite_entity::document::category::{CreateDocumentCategory, DocumentCategory};
use docsuite_entity::document::model::{CreateDocument, Document, UpdateDocument};
use docsuite_entity::document::version::{CreateDocumentVersion, DocumentVersion};
use docsuite_entity::document::{DocumentAction, DocumentKind, ReorderDirection};

use crate::context::RequestContext;
use crate::systems;

/// Listing filter for documents of one kind.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Restrict to one category.
    pub category_id: Option<Uuid>,
    /// Include archived records.
    pub include_archived: bool,
}

/// Manages compliance documents of every kind.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document repository.
    documents: Arc<DocumentRepository>,
    /// Category repository.
    categories: Arc<DocumentCategoryRepository>,
    /// Permission resolver for access checks.
    resolver: Arc<PermissionResolver>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        documents: Arc<DocumentRepository>,
        categories: Arc<DocumentCategoryRepository>,
        resolver: Arc<PermissionResolver>,
    ) -> Self {
        Self {
            documents,
            categories,
            resolver,
        }
    }

    /// Lists documents of one kind.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        filter: &DocumentFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<Document>, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_READ)
            .await?;

        self.documents
            .find_all(kind, filter.category_id, filter.include_archived, page)
            .await
    }

    /// Gets a single document.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        id: Uuid,
    ) -> Result<Document, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_READ)
            .await?;

        self.documents
            .find_by_id(kind, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    /// Creates a new document at the end of its category's ordering.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        mut data: CreateDocument,
    ) -> Result<Document, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_WRITE)
            .await?;

        if data.title.trim().is_empty() {
            return Err(AppError::validation("Title cannot be empty"));
        }
        if let Some(category_id) = data.category_id {
            self.check_category(kind, category_id).await?;
        }

        data.kind = kind;
        data.created_by = Some(ctx.user_id);
        let document = self.documents.create(&data).await?;

        info!(actor_id = %ctx.user_id, document_id = %document.id, kind = %kind, "Document created");

        Ok(document)
    }

    /// Updates a document's metadata.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        data: UpdateDocument,
    ) -> Result<Document, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_WRITE)
            .await?;

        if let Some(title) = &data.title {
            if title.trim().is_empty() {
                return Err(AppError::validation("Title cannot be empty"));
            }
        }
        if let Some(category_id) = data.category_id {
            self.check_category(kind, category_id).await?;
        }

        let document = self.documents.update(kind, &data).await?;

        info!(actor_id = %ctx.user_id, document_id = %document.id, kind = %kind, "Document updated");

        Ok(document)
    }

    /// Archives a document (the default form of deletion), or deletes
    /// it permanently when `permanent` is set. Both require the delete
    /// role.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        id: Uuid,
        permanent: bool,
    ) -> Result<(), AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_DELETE)
            .await?;

        if permanent {
            let deleted = self.documents.hard_delete(kind, id).await?;
            if !deleted {
                return Err(AppError::not_found(format!("Document {id} not found")));
            }
            info!(actor_id = %ctx.user_id, document_id = %id, kind = %kind, "Document permanently deleted");
        } else {
            self.documents
                .set_flag(kind, id, DocumentAction::Archive)
                .await?;
            info!(actor_id = %ctx.user_id, document_id = %id, kind = %kind, "Document archived");
        }

        Ok(())
    }

    /// Applies a flag action to a single document.
    pub async fn apply_action(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        id: Uuid,
        action: DocumentAction,
    ) -> Result<Document, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_WRITE)
            .await?;

        let document = self.documents.set_flag(kind, id, action).await?;

        info!(actor_id = %ctx.user_id, document_id = %id, action = %action, "Document action applied");

        Ok(document)
    }

    /// Applies a flag action to many documents. Returns the number of
    /// records updated; ids belonging to other kinds are skipped.
    pub async fn bulk_action(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        ids: &[Uuid],
        action: DocumentAction,
    ) -> Result<u64, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_WRITE)
            .await?;

        if ids.is_empty() {
            return Err(AppError::validation("No document ids supplied"));
        }

        let updated = self.documents.bulk_set_flag(kind, ids, action).await?;

        info!(actor_id = %ctx.user_id, kind = %kind, action = %action, updated, "Bulk action applied");

        Ok(updated)
    }

    /// Inverts a document's highlighted flag atomically.
    pub async fn toggle_highlight(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        id: Uuid,
    ) -> Result<Document, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_WRITE)
            .await?;

        self.documents.toggle_highlight(kind, id).await
    }

    /// Moves a document up or down within its category's ordering.
    /// A document already at the edge is returned unchanged.
    pub async fn reorder(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        id: Uuid,
        direction: ReorderDirection,
    ) -> Result<Document, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_WRITE)
            .await?;

        self.documents.reorder(kind, id, direction).await
    }

    /// Lists a document's version history, newest first.
    pub async fn versions(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        id: Uuid,
    ) -> Result<Vec<DocumentVersion>, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_READ)
            .await?;

        if self.documents.find_by_id(kind, id).await?.is_none() {
            return Err(AppError::not_found(format!("Document {id} not found")));
        }

        self.documents.find_versions(id).await
    }

    /// Records a new version of a document, bumping its version counter
    /// and snapshotting the revision in one transaction.
    pub async fn publish_version(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        id: Uuid,
        notes: Option<String>,
        attachment_path: Option<String>,
    ) -> Result<DocumentVersion, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_WRITE)
            .await?;

        let version = self
            .documents
            .create_version(
                kind,
                &CreateDocumentVersion {
                    document_id: id,
                    notes,
                    attachment_path,
                    created_by: Some(ctx.user_id),
                },
            )
            .await?;

        info!(actor_id = %ctx.user_id, document_id = %id, version = version.version, "Version published");

        Ok(version)
    }

    /// Lists the categories of one kind.
    pub async fn list_categories(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        include_archived: bool,
    ) -> Result<Vec<DocumentCategory>, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_READ)
            .await?;

        self.categories.find_by_kind(kind, include_archived).await
    }

    /// Creates a new category for one kind.
    pub async fn create_category(
        &self,
        ctx: &RequestContext,
        kind: DocumentKind,
        name: String,
    ) -> Result<DocumentCategory, AppError> {
        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_WRITE)
            .await?;

        if name.trim().is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }

        let category = self
            .categories
            .create(&CreateDocumentCategory { kind, name })
            .await?;

        info!(actor_id = %ctx.user_id, category_id = %category.id, kind = %kind, "Category created");

        Ok(category)
    }

    /// Rejects category ids that don't exist or belong to another kind.
    async fn check_category(&self, kind: DocumentKind, category_id: Uuid) -> Result<(), AppError> {
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Category {category_id} not found")))?;

        if category.kind != kind {
            return Err(AppError::validation(format!(
                "Category {category_id} belongs to kind '{}'",
                category.kind
            )));
        }
        Ok(())
    }
}
