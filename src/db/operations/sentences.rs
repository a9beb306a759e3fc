use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use crate::db::operations::now_iso;
use crate::db::DatabaseProxy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub word: String,
    pub phonetic: String,
    pub meaning: String,
    pub part_of_speech: String,
}

/// A row of the sentence pool. Immutable once created except `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub id: String,
    pub content: String,
    pub translation: String,
    pub keywords: Vec<Keyword>,
    pub category: String,
    pub difficulty: String,
    pub source: String,
    pub create_time: String,
    pub is_active: bool,
}

/// The canonical sentence-of-the-day record: an embedded copy of the chosen
/// sentence, keyed by calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySentence {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: String,
    pub content: String,
    pub translation: String,
    pub keywords: Vec<Keyword>,
    pub category: String,
    pub difficulty: String,
    pub source: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSentence {
    pub content: String,
    pub translation: String,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_category() -> String {
    "daily".to_string()
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_source() -> String {
    "system".to_string()
}

fn keywords_from_json(raw: &str) -> Vec<Keyword> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn keywords_to_json(keywords: &[Keyword]) -> String {
    serde_json::to_string(keywords).unwrap_or_else(|_| "[]".to_string())
}

fn row_to_sentence(row: &sqlx::sqlite::SqliteRow) -> Result<Sentence, sqlx::Error> {
    let keywords: String = row.try_get("keywords")?;
    Ok(Sentence {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        translation: row.try_get("translation")?,
        keywords: keywords_from_json(&keywords),
        category: row.try_get("category")?,
        difficulty: row.try_get("difficulty")?,
        source: row.try_get("source")?,
        create_time: row.try_get("createTime")?,
        is_active: row.try_get::<i64, _>("isActive")? != 0,
    })
}

/// Active pool in insertion order (rowid), so a modulo index over it is the
/// same for every call on the same date.
pub async fn list_active(proxy: &DatabaseProxy) -> Result<Vec<Sentence>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT * FROM "sentence_bank"
        WHERE "isActive" = 1
        ORDER BY rowid
        "#,
    )
    .fetch_all(proxy.pool())
    .await?;

    rows.iter().map(row_to_sentence).collect()
}

pub async fn insert_sentence(
    proxy: &DatabaseProxy,
    sentence: &NewSentence,
) -> Result<String, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO "sentence_bank"
            ("id", "content", "translation", "keywords", "category", "difficulty", "source", "createTime", "isActive")
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1)
        "#,
    )
    .bind(&id)
    .bind(&sentence.content)
    .bind(&sentence.translation)
    .bind(keywords_to_json(&sentence.keywords))
    .bind(&sentence.category)
    .bind(&sentence.difficulty)
    .bind(&sentence.source)
    .bind(now_iso())
    .execute(proxy.pool())
    .await?;
    Ok(id)
}

pub async fn find_id_by_content(
    proxy: &DatabaseProxy,
    content: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT "id" FROM "sentence_bank" WHERE "content" = ? LIMIT 1"#)
        .bind(content)
        .fetch_optional(proxy.pool())
        .await
}

pub async fn count_all(proxy: &DatabaseProxy) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "sentence_bank""#)
        .fetch_one(proxy.pool())
        .await
}

pub async fn count_active(proxy: &DatabaseProxy) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "sentence_bank" WHERE "isActive" = 1"#)
        .fetch_one(proxy.pool())
        .await
}

fn row_to_daily(row: &sqlx::sqlite::SqliteRow) -> Result<DailySentence, sqlx::Error> {
    let keywords: String = row.try_get("keywords")?;
    Ok(DailySentence {
        id: row.try_get("id")?,
        date: row.try_get("date")?,
        content: row.try_get("content")?,
        translation: row.try_get("translation")?,
        keywords: keywords_from_json(&keywords),
        category: row.try_get("category")?,
        difficulty: row.try_get("difficulty")?,
        source: row.try_get("source")?,
        create_time: row.try_get("createTime")?,
    })
}

pub async fn get_daily_by_date(
    proxy: &DatabaseProxy,
    date: &str,
) -> Result<Option<DailySentence>, sqlx::Error> {
    let row = sqlx::query(r#"SELECT * FROM "daily_sentences" WHERE "date" = ? LIMIT 1"#)
        .bind(date)
        .fetch_optional(proxy.pool())
        .await?;
    row.as_ref().map(row_to_daily).transpose()
}

/// Returns false when another writer already created the row for this date;
/// the caller re-reads and returns the winner's record.
pub async fn insert_daily(
    proxy: &DatabaseProxy,
    daily: &DailySentence,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO "daily_sentences"
            ("id", "date", "content", "translation", "keywords", "category", "difficulty", "source", "createTime")
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT ("date") DO NOTHING
        "#,
    )
    .bind(&daily.id)
    .bind(&daily.date)
    .bind(&daily.content)
    .bind(&daily.translation)
    .bind(keywords_to_json(&daily.keywords))
    .bind(&daily.category)
    .bind(&daily.difficulty)
    .bind(&daily.source)
    .bind(&daily.create_time)
    .execute(proxy.pool())
    .await?;

    Ok(result.rows_affected() == 1)
}
