use proptest::prelude::*;

use vaxreg::storage::{Batch, BatchStore, InoculationLog, InoculationRecord};
use vaxreg::{Date, DateCheck};

fn arb_date() -> impl Strategy<Value = Date> {
    (1u32..=28, 1u32..=12, 2025u32..=2030).prop_map(|(d, m, y)| Date::new(d, m, y))
}

fn arb_code() -> impl Strategy<Value = String> {
    "[0-9A-F]{1,6}"
}

fn arb_record() -> impl Strategy<Value = InoculationRecord> {
    ("[ab]", arb_code(), arb_date()).prop_map(|(recipient, code, date)| InoculationRecord {
        recipient,
        code,
        date,
    })
}

fn store_from(batches: Vec<Batch>) -> BatchStore {
    let mut store = BatchStore::new();
    for batch in batches {
        // Generated codes may collide; duplicates are simply skipped.
        let _ = store.register(batch);
    }
    store
}

fn log_from(records: &[InoculationRecord]) -> InoculationLog {
    let mut log = InoculationLog::with_capacity(1);
    for record in records {
        log.append(record.clone()).unwrap();
    }
    log
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Sorting is idempotent and yields a total order: consecutive batches
    /// are strictly increasing by (expiry, code).
    #[test]
    fn sort_is_idempotent_and_total(
        batches in prop::collection::vec(
            (arb_code(), arb_date(), 0u32..10).prop_map(|(code, expiry, remaining)| Batch {
                name: "Gripe".to_string(),
                code,
                expiry,
                remaining,
                uses: 0,
            }),
            0..40,
        )
    ) {
        let mut store = store_from(batches);
        store.sort_chronological();
        let once: Vec<Batch> = store.iter().cloned().collect();
        store.sort_chronological();
        let twice: Vec<Batch> = store.iter().cloned().collect();
        prop_assert_eq!(&once, &twice);

        for pair in once.windows(2) {
            let key = |b: &Batch| (b.expiry, b.code.clone());
            prop_assert!(key(&pair[0]) < key(&pair[1]));
        }
    }

    /// Adding a filter never deletes more records than the broader query.
    #[test]
    fn deletion_narrowing_is_monotonic(
        records in prop::collection::vec(arb_record(), 1..50),
        date in arb_date(),
        code in arb_code(),
    ) {
        let recipient = records[0].recipient.clone();

        let broad = log_from(&records)
            .delete_matching(&recipient, None, None)
            .unwrap();
        let dated = log_from(&records)
            .delete_matching(&recipient, Some(date), None)
            .unwrap();
        let narrow = log_from(&records)
            .delete_matching(&recipient, Some(date), Some(&code))
            .unwrap();

        prop_assert!(broad >= dated);
        prop_assert!(dated >= narrow);
    }

    /// Growth preserves previously appended records, order and content.
    #[test]
    fn growth_preserves_records(records in prop::collection::vec(arb_record(), 0..60)) {
        let log = log_from(&records);
        let stored: Vec<InoculationRecord> = log.iter().cloned().collect();
        prop_assert_eq!(stored, records);
    }

    /// Selection never returns a depleted or expired batch.
    #[test]
    fn selection_respects_stock_and_expiry(
        batches in prop::collection::vec(
            (arb_code(), arb_date(), 0u32..3).prop_map(|(code, expiry, remaining)| Batch {
                name: "Gripe".to_string(),
                code,
                expiry,
                remaining,
                uses: 0,
            }),
            0..30,
        ),
        today in arb_date(),
    ) {
        let mut store = store_from(batches);
        store.sort_chronological();
        if let Some(index) = store.select_for_vaccination("Gripe", today) {
            let selected = store.iter().nth(index).unwrap();
            prop_assert!(selected.remaining > 0);
            prop_assert!(selected.expiry.validate(today, DateCheck::NotInPast));
        } else {
            // No eligible batch must really mean none.
            for batch in store.iter() {
                prop_assert!(
                    batch.remaining == 0
                        || !batch.expiry.validate(today, DateCheck::NotInPast)
                );
            }
        }
    }
}
