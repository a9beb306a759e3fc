use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use crate::db::operations::now_iso;
use crate::db::DatabaseProxy;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub openid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unionid: Option<String>,
    pub nick_name: String,
    pub avatar_url: String,
    pub gender: i64,
    pub city: String,
    pub province: String,
    pub country: String,
    pub create_time: String,
    pub last_login_time: String,
    pub total_collections: i64,
    pub consecutive_days: i64,
    pub total_study_days: i64,
    pub level: String,
    pub points: i64,
}

/// Display fields the client may send along with a login. When present they
/// overwrite the stored profile wholesale, as the platform did.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub nick_name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub gender: i64,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub country: String,
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        openid: row.try_get("openid")?,
        unionid: row.try_get("unionid")?,
        nick_name: row.try_get("nickName")?,
        avatar_url: row.try_get("avatarUrl")?,
        gender: row.try_get("gender")?,
        city: row.try_get("city")?,
        province: row.try_get("province")?,
        country: row.try_get("country")?,
        create_time: row.try_get("createTime")?,
        last_login_time: row.try_get("lastLoginTime")?,
        total_collections: row.try_get("totalCollections")?,
        consecutive_days: row.try_get("consecutiveDays")?,
        total_study_days: row.try_get("totalStudyDays")?,
        level: row.try_get("level")?,
        points: row.try_get("points")?,
    })
}

pub async fn find_by_openid(
    proxy: &DatabaseProxy,
    openid: &str,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(r#"SELECT * FROM "users" WHERE "openid" = ? LIMIT 1"#)
        .bind(openid)
        .fetch_optional(proxy.pool())
        .await?;
    row.as_ref().map(row_to_user).transpose()
}

pub async fn insert(proxy: &DatabaseProxy, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO "users"
            ("id", "openid", "unionid", "nickName", "avatarUrl", "gender", "city", "province",
             "country", "createTime", "lastLoginTime", "totalCollections", "consecutiveDays",
             "totalStudyDays", "level", "points")
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.id)
    .bind(&user.openid)
    .bind(&user.unionid)
    .bind(&user.nick_name)
    .bind(&user.avatar_url)
    .bind(user.gender)
    .bind(&user.city)
    .bind(&user.province)
    .bind(&user.country)
    .bind(&user.create_time)
    .bind(&user.last_login_time)
    .bind(user.total_collections)
    .bind(user.consecutive_days)
    .bind(user.total_study_days)
    .bind(&user.level)
    .bind(user.points)
    .execute(proxy.pool())
    .await?;
    Ok(())
}

/// Touches `lastLoginTime`; overwrites display fields when a profile came
/// with the login.
pub async fn update_login(
    proxy: &DatabaseProxy,
    user_id: &str,
    profile: Option<&UserProfile>,
) -> Result<String, sqlx::Error> {
    let last_login = now_iso();

    match profile {
        Some(profile) => {
            sqlx::query(
                r#"
                UPDATE "users" SET
                    "lastLoginTime" = ?,
                    "nickName" = ?,
                    "avatarUrl" = ?,
                    "gender" = ?,
                    "city" = ?,
                    "province" = ?,
                    "country" = ?
                WHERE "id" = ?
                "#,
            )
            .bind(&last_login)
            .bind(&profile.nick_name)
            .bind(&profile.avatar_url)
            .bind(profile.gender)
            .bind(&profile.city)
            .bind(&profile.province)
            .bind(&profile.country)
            .bind(user_id)
            .execute(proxy.pool())
            .await?;
        }
        None => {
            sqlx::query(r#"UPDATE "users" SET "lastLoginTime" = ? WHERE "id" = ?"#)
                .bind(&last_login)
                .bind(user_id)
                .execute(proxy.pool())
                .await?;
        }
    }

    Ok(last_login)
}

/// Best-effort atomic bump of the denormalized favorites counter.
pub async fn adjust_total_collections(
    proxy: &DatabaseProxy,
    openid: &str,
    delta: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"UPDATE "users" SET "totalCollections" = "totalCollections" + ? WHERE "openid" = ?"#,
    )
    .bind(delta)
    .bind(openid)
    .execute(proxy.pool())
    .await?;
    Ok(())
}

pub fn new_user_id() -> String {
    Uuid::new_v4().to_string()
}
