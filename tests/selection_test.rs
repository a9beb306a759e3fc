use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use daily_sentence::services::daily::{epoch_days, pick_index, FALLBACK_SENTENCES};

proptest! {
    #[test]
    fn index_is_a_pure_function_of_the_date(days in 0i64..100_000, len in 1usize..500) {
        let date = NaiveDate::default() + Duration::days(days);
        let index = pick_index(date, len);
        prop_assert!(index < len);
        prop_assert_eq!(index, pick_index(date, len));
    }

    #[test]
    fn index_is_the_epoch_day_modulo_pool_size(days in 0i64..100_000, len in 1usize..500) {
        let date = NaiveDate::default() + Duration::days(days);
        prop_assert_eq!(pick_index(date, len) as i64, epoch_days(date) % len as i64);
    }

    #[test]
    fn consecutive_days_advance_the_index_by_one(days in 0i64..100_000, len in 1usize..500) {
        let today = NaiveDate::default() + Duration::days(days);
        let tomorrow = today + Duration::days(1);
        prop_assert_eq!(
            (pick_index(today, len) + 1) % len,
            pick_index(tomorrow, len)
        );
    }

    #[test]
    fn pre_epoch_dates_still_index_in_range(days in -100_000i64..0, len in 1usize..500) {
        let date = NaiveDate::default() + Duration::days(days);
        prop_assert!(pick_index(date, len) < len);
    }
}

#[test]
fn epoch_day_zero_selects_the_first_fallback() {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    assert_eq!(epoch_days(epoch), 0);
    assert_eq!(pick_index(epoch, FALLBACK_SENTENCES.len()), 0);
    assert_eq!(
        FALLBACK_SENTENCES[0].content,
        "The early bird catches the worm."
    );
}

#[test]
fn fallback_list_has_exactly_ten_entries() {
    assert_eq!(FALLBACK_SENTENCES.len(), 10);
}
