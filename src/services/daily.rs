//! Sentence-of-the-day selection.
//!
//! Selection is a pure function of the calendar date: the pool index is
//! `epoch_days(date) mod pool_len`, so every call on the same UTC day
//! resolves to the same sentence no matter when, where, or how often it
//! runs. The chosen sentence is persisted under the date key and served
//! from that record on later calls.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::db::operations::sentences::{self, DailySentence};
use crate::db::operations::now_iso;
use crate::db::DatabaseProxy;
use crate::seed::{BankEntry, BankKeyword};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Built-in last resort: when the pool is empty or unreachable the service
/// still answers, picking from these ten with the same modulo scheme.
pub const FALLBACK_SENTENCES: &[BankEntry] = &[
    BankEntry {
        content: "The early bird catches the worm.",
        translation: "早起的鸟儿有虫吃。",
        keywords: &[
            BankKeyword { word: "early", phonetic: "/ˈɜːrli/", meaning: "早的，提前的", part_of_speech: "adj." },
            BankKeyword { word: "catches", phonetic: "/ˈkætʃɪz/", meaning: "抓住，捕获", part_of_speech: "v." },
            BankKeyword { word: "worm", phonetic: "/wɜːrm/", meaning: "虫子", part_of_speech: "n." },
        ],
        category: "daily",
        difficulty: "medium",
        source: "system",
    },
    BankEntry {
        content: "Practice makes perfect.",
        translation: "熟能生巧。",
        keywords: &[
            BankKeyword { word: "practice", phonetic: "/ˈpræktɪs/", meaning: "练习，实践", part_of_speech: "n./v." },
            BankKeyword { word: "perfect", phonetic: "/ˈpɜːrfɪkt/", meaning: "完美的", part_of_speech: "adj." },
        ],
        category: "daily",
        difficulty: "medium",
        source: "system",
    },
    BankEntry {
        content: "Time is money.",
        translation: "时间就是金钱。",
        keywords: &[
            BankKeyword { word: "time", phonetic: "/taɪm/", meaning: "时间", part_of_speech: "n." },
            BankKeyword { word: "money", phonetic: "/ˈmʌni/", meaning: "金钱", part_of_speech: "n." },
        ],
        category: "daily",
        difficulty: "medium",
        source: "system",
    },
    BankEntry {
        content: "Knowledge is power.",
        translation: "知识就是力量。",
        keywords: &[
            BankKeyword { word: "knowledge", phonetic: "/ˈnɑːlɪdʒ/", meaning: "知识", part_of_speech: "n." },
            BankKeyword { word: "power", phonetic: "/ˈpaʊər/", meaning: "力量，权力", part_of_speech: "n." },
        ],
        category: "daily",
        difficulty: "medium",
        source: "system",
    },
    BankEntry {
        content: "Actions speak louder than words.",
        translation: "行动胜过言语。",
        keywords: &[
            BankKeyword { word: "actions", phonetic: "/ˈækʃənz/", meaning: "行动", part_of_speech: "n." },
            BankKeyword { word: "louder", phonetic: "/ˈlaʊdər/", meaning: "更大声的", part_of_speech: "adj." },
        ],
        category: "daily",
        difficulty: "medium",
        source: "system",
    },
    BankEntry {
        content: "Where there is a will, there is a way.",
        translation: "有志者事竟成。",
        keywords: &[
            BankKeyword { word: "will", phonetic: "/wɪl/", meaning: "意志，决心", part_of_speech: "n." },
            BankKeyword { word: "way", phonetic: "/weɪ/", meaning: "方法，道路", part_of_speech: "n." },
        ],
        category: "daily",
        difficulty: "medium",
        source: "system",
    },
    BankEntry {
        content: "Rome wasn't built in a day.",
        translation: "罗马不是一天建成的。",
        keywords: &[
            BankKeyword { word: "Rome", phonetic: "/roʊm/", meaning: "罗马", part_of_speech: "n." },
            BankKeyword { word: "built", phonetic: "/bɪlt/", meaning: "建造", part_of_speech: "v." },
        ],
        category: "daily",
        difficulty: "medium",
        source: "system",
    },
    BankEntry {
        content: "Better late than never.",
        translation: "迟做总比不做好。",
        keywords: &[
            BankKeyword { word: "better", phonetic: "/ˈbetər/", meaning: "更好的", part_of_speech: "adj." },
            BankKeyword { word: "late", phonetic: "/leɪt/", meaning: "迟的", part_of_speech: "adj." },
            BankKeyword { word: "never", phonetic: "/ˈnevər/", meaning: "从不", part_of_speech: "adv." },
        ],
        category: "daily",
        difficulty: "medium",
        source: "system",
    },
    BankEntry {
        content: "Every cloud has a silver lining.",
        translation: "黑暗中总有一线光明。",
        keywords: &[
            BankKeyword { word: "cloud", phonetic: "/klaʊd/", meaning: "云", part_of_speech: "n." },
            BankKeyword { word: "silver", phonetic: "/ˈsɪlvər/", meaning: "银色的", part_of_speech: "adj." },
            BankKeyword { word: "lining", phonetic: "/ˈlaɪnɪŋ/", meaning: "内衬", part_of_speech: "n." },
        ],
        category: "daily",
        difficulty: "medium",
        source: "system",
    },
    BankEntry {
        content: "Don't judge a book by its cover.",
        translation: "不要以貌取人。",
        keywords: &[
            BankKeyword { word: "judge", phonetic: "/dʒʌdʒ/", meaning: "判断", part_of_speech: "v." },
            BankKeyword { word: "cover", phonetic: "/ˈkʌvər/", meaning: "封面", part_of_speech: "n." },
        ],
        category: "daily",
        difficulty: "medium",
        source: "system",
    },
];

/// Whole days since 1970-01-01.
pub fn epoch_days(date: NaiveDate) -> i64 {
    (date - NaiveDate::default()).num_days()
}

/// Stable pool index for a date. `rem_euclid` keeps pre-epoch dates in
/// range.
pub fn pick_index(date: NaiveDate, pool_len: usize) -> usize {
    epoch_days(date).rem_euclid(pool_len as i64) as usize
}

pub async fn today(proxy: &DatabaseProxy) -> Result<DailySentence, sqlx::Error> {
    sentence_for_date(proxy, Utc::now().date_naive()).await
}

/// Idempotent per date: returns the persisted record when one exists,
/// otherwise selects, persists, and returns. Pool fetch failures fall back
/// to the built-in list and are never surfaced; persistence failures are.
pub async fn sentence_for_date(
    proxy: &DatabaseProxy,
    date: NaiveDate,
) -> Result<DailySentence, sqlx::Error> {
    let date_key = date.format(DATE_FORMAT).to_string();

    if let Some(existing) = sentences::get_daily_by_date(proxy, &date_key).await? {
        tracing::debug!(date = %date_key, "serving persisted daily sentence");
        return Ok(existing);
    }

    let daily = match load_pool(proxy).await {
        Some(pool) if !pool.is_empty() => {
            let chosen = &pool[pick_index(date, pool.len())];
            tracing::info!(date = %date_key, content = %chosen.content, "selected daily sentence from pool");
            DailySentence {
                id: Uuid::new_v4().to_string(),
                date: date_key.clone(),
                content: chosen.content.clone(),
                translation: chosen.translation.clone(),
                keywords: chosen.keywords.clone(),
                category: chosen.category.clone(),
                difficulty: chosen.difficulty.clone(),
                source: chosen.source.clone(),
                create_time: now_iso(),
            }
        }
        _ => {
            let chosen = &FALLBACK_SENTENCES[pick_index(date, FALLBACK_SENTENCES.len())];
            tracing::info!(date = %date_key, content = %chosen.content, "selected daily sentence from builtin fallback");
            DailySentence {
                id: Uuid::new_v4().to_string(),
                date: date_key.clone(),
                content: chosen.content.to_string(),
                translation: chosen.translation.to_string(),
                keywords: chosen.keyword_list(),
                category: chosen.category.to_string(),
                difficulty: chosen.difficulty.to_string(),
                source: chosen.source.to_string(),
                create_time: now_iso(),
            }
        }
    };

    let inserted = sentences::insert_daily(proxy, &daily).await?;
    if !inserted {
        // Lost the creation race; the winner's row is canonical.
        if let Some(winner) = sentences::get_daily_by_date(proxy, &date_key).await? {
            return Ok(winner);
        }
    }

    Ok(daily)
}

async fn load_pool(
    proxy: &DatabaseProxy,
) -> Option<Vec<crate::db::operations::sentences::Sentence>> {
    match sentences::list_active(proxy).await {
        Ok(pool) => Some(pool),
        Err(err) => {
            tracing::debug!(error = %err, "sentence pool unavailable, using builtin fallback");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::operations::sentences::NewSentence;
    use crate::db::DatabaseProxy;

    #[test]
    fn epoch_day_zero_is_unix_epoch() {
        assert_eq!(epoch_days(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(epoch_days(NaiveDate::from_ymd_opt(1970, 1, 11).unwrap()), 10);
    }

    #[test]
    fn index_is_pure_in_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(pick_index(date, 7), pick_index(date, 7));
    }

    #[test]
    fn epoch_date_picks_first_fallback() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let index = pick_index(date, FALLBACK_SENTENCES.len());
        assert_eq!(index, 0);
        assert_eq!(
            FALLBACK_SENTENCES[index].content,
            "The early bird catches the worm."
        );
    }

    #[tokio::test]
    async fn empty_pool_falls_back_and_persists() {
        let proxy = DatabaseProxy::connect("sqlite::memory:").await.unwrap();
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();

        let first = sentence_for_date(&proxy, date).await.unwrap();
        assert_eq!(first.content, "The early bird catches the worm.");
        assert_eq!(first.category, "daily");
        assert_eq!(first.source, "system");

        // Second call must come back from the persisted record.
        let second = sentence_for_date(&proxy, date).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.content, first.content);
    }

    #[tokio::test]
    async fn selection_from_pool_is_date_keyed() {
        let proxy = DatabaseProxy::connect("sqlite::memory:").await.unwrap();
        for i in 0..3 {
            sentences::insert_sentence(
                &proxy,
                &NewSentence {
                    content: format!("Pool sentence {i}."),
                    translation: format!("第{i}句"),
                    keywords: Vec::new(),
                    category: "daily".to_string(),
                    difficulty: "easy".to_string(),
                    source: "test".to_string(),
                },
            )
            .await
            .unwrap();
        }

        // epoch day 4 mod 3 == 1
        let date = NaiveDate::from_ymd_opt(1970, 1, 5).unwrap();
        let chosen = sentence_for_date(&proxy, date).await.unwrap();
        assert_eq!(chosen.content, "Pool sentence 1.");
    }

    #[tokio::test]
    async fn different_dates_may_differ_but_stay_deterministic() {
        let proxy = DatabaseProxy::connect("sqlite::memory:").await.unwrap();
        let d1 = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();

        let s1 = sentence_for_date(&proxy, d1).await.unwrap();
        let s2 = sentence_for_date(&proxy, d2).await.unwrap();

        assert_eq!(s1.content, FALLBACK_SENTENCES[0].content);
        assert_eq!(s2.content, FALLBACK_SENTENCES[1].content);
    }
}
