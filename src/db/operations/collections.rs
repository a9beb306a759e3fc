use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use crate::db::operations::now_iso;
use crate::db::DatabaseProxy;

/// A favorite: (userId, sentenceId) plus a denormalized snapshot of the
/// sentence so list reads need no join. Created and destroyed, never
/// updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub sentence_id: String,
    pub sentence: serde_json::Value,
    pub collected_at: String,
    pub create_time: String,
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<CollectionRecord, sqlx::Error> {
    let snapshot: String = row.try_get("sentence")?;
    Ok(CollectionRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("userId")?,
        sentence_id: row.try_get("sentenceId")?,
        sentence: serde_json::from_str(&snapshot).unwrap_or(serde_json::Value::Null),
        collected_at: row.try_get("collectedAt")?,
        create_time: row.try_get("createTime")?,
    })
}

pub async fn exists(
    proxy: &DatabaseProxy,
    user_id: &str,
    sentence_id: &str,
) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar(
        r#"SELECT 1 FROM "user_collections" WHERE "userId" = ? AND "sentenceId" = ? LIMIT 1"#,
    )
    .bind(user_id)
    .bind(sentence_id)
    .fetch_optional(proxy.pool())
    .await?;
    Ok(found.is_some())
}

pub async fn insert(
    proxy: &DatabaseProxy,
    user_id: &str,
    sentence_id: &str,
    snapshot: &serde_json::Value,
) -> Result<CollectionRecord, sqlx::Error> {
    let record = CollectionRecord {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        sentence_id: sentence_id.to_string(),
        sentence: snapshot.clone(),
        collected_at: now_iso(),
        create_time: now_iso(),
    };

    sqlx::query(
        r#"
        INSERT INTO "user_collections"
            ("id", "userId", "sentenceId", "sentence", "collectedAt", "createTime")
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.user_id)
    .bind(&record.sentence_id)
    .bind(record.sentence.to_string())
    .bind(&record.collected_at)
    .bind(&record.create_time)
    .execute(proxy.pool())
    .await?;

    Ok(record)
}

pub async fn remove(
    proxy: &DatabaseProxy,
    user_id: &str,
    sentence_id: &str,
) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query(r#"DELETE FROM "user_collections" WHERE "userId" = ? AND "sentenceId" = ?"#)
            .bind(user_id)
            .bind(sentence_id)
            .execute(proxy.pool())
            .await?;
    Ok(result.rows_affected())
}

fn like_pattern(keyword: &str) -> String {
    format!("%{}%", keyword.to_lowercase())
}

/// Page of favorites ordered by `collectedAt` descending. The keyword, when
/// present, must match the snapshot's content OR translation,
/// case-insensitively, always ANDed with the userId filter.
pub async fn list_page(
    proxy: &DatabaseProxy,
    user_id: &str,
    keyword: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<CollectionRecord>, sqlx::Error> {
    let rows = match keyword {
        Some(keyword) if !keyword.is_empty() => {
            sqlx::query(
                r#"
                SELECT * FROM "user_collections"
                WHERE "userId" = ?
                  AND (lower(json_extract("sentence", '$.content')) LIKE ?
                       OR lower(json_extract("sentence", '$.translation')) LIKE ?)
                ORDER BY "collectedAt" DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(user_id)
            .bind(like_pattern(keyword))
            .bind(like_pattern(keyword))
            .bind(limit)
            .bind(offset)
            .fetch_all(proxy.pool())
            .await?
        }
        _ => {
            sqlx::query(
                r#"
                SELECT * FROM "user_collections"
                WHERE "userId" = ?
                ORDER BY "collectedAt" DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(proxy.pool())
            .await?
        }
    };

    rows.iter().map(row_to_record).collect()
}

/// Total under the same filter as `list_page`, for pagination.
pub async fn count(
    proxy: &DatabaseProxy,
    user_id: &str,
    keyword: Option<&str>,
) -> Result<i64, sqlx::Error> {
    match keyword {
        Some(keyword) if !keyword.is_empty() => {
            sqlx::query_scalar(
                r#"
                SELECT COUNT(*) FROM "user_collections"
                WHERE "userId" = ?
                  AND (lower(json_extract("sentence", '$.content')) LIKE ?
                       OR lower(json_extract("sentence", '$.translation')) LIKE ?)
                "#,
            )
            .bind(user_id)
            .bind(like_pattern(keyword))
            .bind(like_pattern(keyword))
            .fetch_one(proxy.pool())
            .await
        }
        _ => {
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM "user_collections" WHERE "userId" = ?"#)
                .bind(user_id)
                .fetch_one(proxy.pool())
                .await
        }
    }
}
