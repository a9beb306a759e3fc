//! Favorites over the (user, sentence) relation.
//!
//! The pair uniqueness is backed by a real UNIQUE index; the existence
//! check up front only buys a friendlier error in the common case. The
//! `totalCollections` counter on the user row is a best-effort secondary
//! write: a failure there is logged and never rolls back the favorite.

use serde::Serialize;
use thiserror::Error;

use crate::db::operations::collections::{self, CollectionRecord};
use crate::db::operations::users;
use crate::db::DatabaseProxy;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("已经收藏过这个句子了")]
    AlreadyExists,
    #[error("收藏记录不存在")]
    NotFound,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct CollectionPage {
    pub items: Vec<CollectionRecord>,
    pub pagination: PageInfo,
}

pub async fn add(
    proxy: &DatabaseProxy,
    openid: &str,
    sentence_id: &str,
    snapshot: &serde_json::Value,
) -> Result<CollectionRecord, CollectionError> {
    if collections::exists(proxy, openid, sentence_id).await? {
        return Err(CollectionError::AlreadyExists);
    }

    let record = match collections::insert(proxy, openid, sentence_id, snapshot).await {
        Ok(record) => record,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            // Lost the insert race; same outcome as the check firing.
            return Err(CollectionError::AlreadyExists);
        }
        Err(err) => return Err(err.into()),
    };

    if let Err(err) = users::adjust_total_collections(proxy, openid, 1).await {
        tracing::warn!(error = %err, openid, "totalCollections increment failed");
    }

    Ok(record)
}

pub async fn remove(
    proxy: &DatabaseProxy,
    openid: &str,
    sentence_id: &str,
) -> Result<u64, CollectionError> {
    let removed = collections::remove(proxy, openid, sentence_id).await?;
    if removed == 0 {
        return Err(CollectionError::NotFound);
    }

    if let Err(err) = users::adjust_total_collections(proxy, openid, -1).await {
        tracing::warn!(error = %err, openid, "totalCollections decrement failed");
    }

    Ok(removed)
}

pub async fn check(
    proxy: &DatabaseProxy,
    openid: &str,
    sentence_id: &str,
) -> Result<bool, CollectionError> {
    Ok(collections::exists(proxy, openid, sentence_id).await?)
}

pub async fn list(
    proxy: &DatabaseProxy,
    openid: &str,
    page: i64,
    page_size: i64,
    keyword: Option<&str>,
) -> Result<CollectionPage, CollectionError> {
    let page = page.max(1);
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * page_size;

    let items = collections::list_page(proxy, openid, keyword, page_size, offset).await?;
    let total = collections::count(proxy, openid, keyword).await?;
    let total_pages = (total + page_size - 1) / page_size;

    Ok(CollectionPage {
        items,
        pagination: PageInfo {
            page,
            page_size,
            total,
            total_pages,
        },
    })
}
