//! Invite records.

use sqlx::PgPool;
use uuid::Uuid;

use docsuite_core::result::AppResult;
use docsuite_entity::invite::model::{CreateInvite, Invite};

use super::db_error;

#[derive(Debug, Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Invite>> {
        sqlx::query_as("SELECT * FROM invites WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load invite"))
    }

    pub async fn create(&self, data: &CreateInvite) -> AppResult<Invite> {
        sqlx::query_as(
            "INSERT INTO invites (email, role_name, invited_by) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.role_name)
        .bind(data.invited_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create invite"))
    }

    /// Consume a pending invite. The status predicate in the UPDATE makes
    /// acceptance exactly-once under concurrent attempts; the loser of
    /// the race sees `None`.
    pub async fn mark_accepted(
        &self,
        id: Uuid,
        accepted_user_id: Uuid,
    ) -> AppResult<Option<Invite>> {
        sqlx::query_as(
            "UPDATE invites SET status = 'accepted', accepted_user_id = $2, accepted_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .bind(accepted_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("accept invite"))
    }
}
