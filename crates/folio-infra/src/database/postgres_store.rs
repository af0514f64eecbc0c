//! PostgreSQL post store.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use folio_core::domain::{Post, PostDocument, PostPatch};
use folio_core::error::RepoError;
use folio_core::ports::PostStore;

use super::entity::post::{self, ActiveModel, Entity as PostEntity};

/// Posts in the `posts` table, one row per document.
pub struct PostgresPostStore {
    db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_error(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        _ => RepoError::Query(e.to_string()),
    }
}

fn write_error(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Rejected("Document already exists".to_string())
    } else {
        query_error(e)
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .order_by_desc(post::Column::Date)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let row = PostEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, document: PostDocument) -> Result<String, RepoError> {
        let id = Uuid::new_v4().simple().to_string();
        PostEntity::insert(post::new_row(id.clone(), document))
            .exec_without_returning(&self.db)
            .await
            .map_err(write_error)?;

        tracing::debug!(post_id = %id, "Post row inserted");
        Ok(id)
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .set(ActiveModel::from(patch))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
