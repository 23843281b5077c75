//! PostgreSQL implementation of the document repository.
//!
//! All collections share one `documents(collection, id, data JSONB)` table.
//! Field names and values are always bound as parameters.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

use crate::domain::document::{
    Collection, Direction, Document, Fields, Filter, GuardedInsert, GuardedOutcome, Query,
};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;
use crate::utils::id_generator::generate_document_id;
use crate::utils::timestamp::Timestamp;

#[derive(FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Fields>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document::new(row.id, row.data.0)
    }
}

/// PostgreSQL repository storing documents as JSONB.
pub struct PgDocumentRepository {
    pool: Arc<PgPool>,
}

impl PgDocumentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Appends `collection = $c AND data -> $f = $v ...` to the builder.
fn push_where<'a>(qb: &mut QueryBuilder<'a, Postgres>, collection: Collection, filters: &[Filter]) {
    qb.push(" WHERE collection = ");
    qb.push_bind(collection.as_str());
    for filter in filters {
        qb.push(" AND data -> ");
        qb.push_bind(filter.field.clone());
        qb.push(" = ");
        qb.push_bind(Json(filter.value.clone()));
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Document::from))
    }

    async fn query(&self, collection: Collection, query: Query) -> Result<Vec<Document>, AppError> {
        let mut qb = QueryBuilder::new("SELECT id, data FROM documents");
        push_where(&mut qb, collection, &query.filters);

        match &query.order_by {
            Some(order) => {
                qb.push(" ORDER BY data -> ");
                qb.push_bind(order.field.clone());
                qb.push(match order.direction {
                    Direction::Asc => " ASC NULLS LAST, id",
                    Direction::Desc => " DESC NULLS LAST, id",
                });
            }
            None => {
                qb.push(" ORDER BY id");
            }
        }

        if let Some(limit) = query.limit {
            qb.push(" LIMIT ");
            qb.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = qb
            .build_query_as::<DocumentRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn count(&self, collection: Collection) -> Result<u64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
                .bind(collection.as_str())
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn add(&self, collection: Collection, fields: Fields) -> Result<Document, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            RETURNING id, data
            "#,
        )
        .bind(collection.as_str())
        .bind(generate_document_id())
        .bind(Json(fields))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET data = data || $3
            WHERE collection = $1 AND id = $2
            RETURNING id, data
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(patch))
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Document::from))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_guarded(&self, insert: GuardedInsert) -> Result<GuardedOutcome, AppError> {
        let GuardedInsert {
            collection,
            data,
            unique_on,
            counter,
        } = insert;

        let mut tx = self.pool.begin().await?;

        // Row lock on the parent serializes concurrent inserts against it.
        let parent: Option<String> = sqlx::query_scalar(
            "SELECT id FROM documents WHERE collection = $1 AND id = $2 FOR UPDATE",
        )
        .bind(counter.collection.as_str())
        .bind(&counter.id)
        .fetch_optional(&mut *tx)
        .await?;

        if parent.is_none() {
            tx.rollback().await?;
            return Ok(GuardedOutcome::ParentMissing);
        }

        let mut qb = QueryBuilder::new("SELECT EXISTS (SELECT 1 FROM documents");
        push_where(&mut qb, collection, &unique_on);
        qb.push(")");
        let duplicate = qb
            .build_query_scalar::<bool>()
            .fetch_one(&mut *tx)
            .await?;

        if duplicate {
            tx.rollback().await?;
            debug!(collection = %collection, parent = %counter.id, "Guarded insert rejected as duplicate");
            return Ok(GuardedOutcome::Duplicate);
        }

        let row = sqlx::query_as::<_, DocumentRow>(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) RETURNING id, data",
        )
        .bind(collection.as_str())
        .bind(generate_document_id())
        .bind(Json(data))
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE documents
            SET data = jsonb_set(
                jsonb_set(data, ARRAY[$3::text], to_jsonb(COALESCE((data ->> $3)::bigint, 0) + 1)),
                '{updatedAt}',
                $4
            )
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(counter.collection.as_str())
        .bind(&counter.id)
        .bind(&counter.field)
        .bind(Json(Value::String(Timestamp::now().to_string())))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(GuardedOutcome::Inserted(row.into()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
