//! Administrative operations on the sentence pool: seeding, one-off
//! inserts, stats, and a connectivity probe. Not on the end-user path.

use serde::Serialize;

use crate::db::operations::sentences::{self, NewSentence};
use crate::db::DatabaseProxy;
use crate::seed::SEED_BANK;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitSummary {
    pub added_ids: Vec<String>,
    pub total_sentences: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceStats {
    pub total_sentences: i64,
    pub active_sentences: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReport {
    pub existing_count: i64,
    pub test_id: String,
}

/// Seeds the bank from the built-in list, skipping entries whose content is
/// already present, so re-running is harmless.
pub async fn init_sentence_bank(proxy: &DatabaseProxy) -> Result<InitSummary, sqlx::Error> {
    let mut added_ids = Vec::new();

    for entry in SEED_BANK {
        if sentences::find_id_by_content(proxy, entry.content)
            .await?
            .is_some()
        {
            tracing::debug!(content = entry.content, "seed sentence already present");
            continue;
        }

        let id = sentences::insert_sentence(proxy, &entry.to_new_sentence()).await?;
        added_ids.push(id);
    }

    tracing::info!(added = added_ids.len(), "sentence bank initialized");

    Ok(InitSummary {
        added_ids,
        total_sentences: SEED_BANK.len(),
    })
}

pub async fn add_sentence(
    proxy: &DatabaseProxy,
    sentence: &NewSentence,
) -> Result<String, sqlx::Error> {
    sentences::insert_sentence(proxy, sentence).await
}

pub async fn sentence_stats(proxy: &DatabaseProxy) -> Result<SentenceStats, sqlx::Error> {
    Ok(SentenceStats {
        total_sentences: sentences::count_all(proxy).await?,
        active_sentences: sentences::count_active(proxy).await?,
    })
}

/// Probe used by operators: counts the bank, then inserts a marker row to
/// prove writes go through.
pub async fn test_connection(proxy: &DatabaseProxy) -> Result<ConnectionReport, sqlx::Error> {
    let existing_count = sentences::count_all(proxy).await?;

    let test_id = sentences::insert_sentence(
        proxy,
        &NewSentence {
            content: "Test sentence".to_string(),
            translation: "测试句子".to_string(),
            keywords: Vec::new(),
            category: "test".to_string(),
            difficulty: "easy".to_string(),
            source: "test".to_string(),
        },
    )
    .await?;

    Ok(ConnectionReport {
        existing_count,
        test_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseProxy;

    #[tokio::test]
    async fn init_seeds_once() {
        let proxy = DatabaseProxy::connect("sqlite::memory:").await.unwrap();

        let first = init_sentence_bank(&proxy).await.unwrap();
        assert_eq!(first.added_ids.len(), SEED_BANK.len());

        let second = init_sentence_bank(&proxy).await.unwrap();
        assert!(second.added_ids.is_empty());

        let stats = sentence_stats(&proxy).await.unwrap();
        assert_eq!(stats.total_sentences, SEED_BANK.len() as i64);
        assert_eq!(stats.active_sentences, SEED_BANK.len() as i64);
    }

    #[tokio::test]
    async fn probe_inserts_a_marker_row() {
        let proxy = DatabaseProxy::connect("sqlite::memory:").await.unwrap();

        let report = test_connection(&proxy).await.unwrap();
        assert_eq!(report.existing_count, 0);
        assert!(!report.test_id.is_empty());

        let stats = sentence_stats(&proxy).await.unwrap();
        assert_eq!(stats.total_sentences, 1);
    }
}
