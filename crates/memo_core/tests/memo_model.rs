use memo_core::{
    Memo, MemoError, MemoLifecycleError, MemoRecord, MemoValidationError, CONTENT_MAX_CHARS,
    EXPIRY_WINDOW_MS, MODIFIABLE_WINDOW_MS, TITLE_MAX_CHARS,
};

const REGDATE: i64 = 1_700_000_000_000;
const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

fn memo_at(regdate: i64) -> Memo {
    Memo::with_identity(
        Some("title"),
        Some("some body text"),
        Some("memo-1".to_string()),
        Some(regdate),
    )
    .unwrap()
}

#[test]
fn new_trims_fields_and_generates_identity() {
    let memo = Memo::new("  Groceries  ", "\n milk and eggs \t").unwrap();

    assert_eq!(memo.title(), "Groceries");
    assert_eq!(memo.content(), "milk and eggs");
    assert!(!memo.id().is_empty());
    assert!(memo.regdate() > 0);
    assert!(memo.can_be_modified());
    assert!(!memo.is_expired());
}

#[test]
fn generated_ids_are_unique() {
    let first = Memo::new("a", "b").unwrap();
    let second = Memo::new("a", "b").unwrap();
    assert_ne!(first.id(), second.id());
}

#[test]
fn construction_rejects_missing_or_blank_fields() {
    assert_eq!(
        Memo::new("   ", "body").unwrap_err(),
        MemoValidationError::MissingTitle
    );
    assert_eq!(
        Memo::new("title", "\t\n").unwrap_err(),
        MemoValidationError::MissingContent
    );
    assert_eq!(
        Memo::with_identity(None, Some("body"), None, None).unwrap_err(),
        MemoValidationError::MissingTitle
    );
    assert_eq!(
        Memo::with_identity(Some("title"), None, None, None).unwrap_err(),
        MemoValidationError::MissingContent
    );
}

#[test]
fn construction_enforces_length_bounds() {
    let title_ok = "t".repeat(TITLE_MAX_CHARS);
    let content_ok = "c".repeat(CONTENT_MAX_CHARS);
    let memo = Memo::new(&title_ok, &content_ok).unwrap();
    assert!(memo.is_title_valid());
    assert!(memo.is_content_valid());

    let title_long = "t".repeat(TITLE_MAX_CHARS + 1);
    assert_eq!(
        Memo::new(&title_long, "body").unwrap_err(),
        MemoValidationError::TitleTooLong { chars: 201 }
    );

    let content_long = "c".repeat(CONTENT_MAX_CHARS + 1);
    assert_eq!(
        Memo::new("title", &content_long).unwrap_err(),
        MemoValidationError::ContentTooLong { chars: 5001 }
    );
}

#[test]
fn length_is_measured_after_trimming() {
    let padded = format!("  {}  ", "t".repeat(TITLE_MAX_CHARS));
    assert!(Memo::new(&padded, "body").is_ok());
}

#[test]
fn word_count_splits_on_any_whitespace() {
    let memo = Memo::new("title", "one  two\tthree\nfour").unwrap();
    assert_eq!(memo.word_count(), 4);

    let single = Memo::new("title", "word").unwrap();
    assert_eq!(single.word_count(), 1);
}

#[test]
fn modifiable_window_is_exclusive_at_24_hours() {
    let memo = memo_at(REGDATE);

    assert!(memo.can_be_modified_at(REGDATE));
    assert!(memo.can_be_modified_at(REGDATE + 23 * HOUR_MS + 59 * MINUTE_MS));
    assert!(!memo.can_be_modified_at(REGDATE + MODIFIABLE_WINDOW_MS));
    assert!(!memo.can_be_modified_at(REGDATE + 2 * DAY_MS));
}

#[test]
fn expiry_window_is_exclusive_at_30_days() {
    let memo = memo_at(REGDATE);

    assert!(!memo.is_expired_at(REGDATE + 29 * DAY_MS + 23 * HOUR_MS + 59 * MINUTE_MS));
    assert!(!memo.is_expired_at(REGDATE + EXPIRY_WINDOW_MS));
    assert!(memo.is_expired_at(REGDATE + EXPIRY_WINDOW_MS + 1));
}

#[test]
fn extreme_regdates_saturate_instead_of_overflowing() {
    let ancient = memo_at(i64::MIN);
    assert!(ancient.is_expired_at(REGDATE));
    assert!(!ancient.can_be_modified_at(REGDATE));
    assert!(ancient.can_be_deleted_at(REGDATE));

    let future = memo_at(i64::MAX);
    assert!(!future.is_expired_at(i64::MIN));
    assert!(future.can_be_modified_at(i64::MIN));
}

#[test]
fn update_content_replaces_only_supplied_fields() {
    let memo = memo_at(REGDATE);

    let updated = memo
        .update_content_at(None, Some("  fresh body "), REGDATE + HOUR_MS)
        .unwrap();
    assert_eq!(updated.title(), "title");
    assert_eq!(updated.content(), "fresh body");
    assert_eq!(updated.id(), memo.id());
    assert_eq!(updated.regdate(), memo.regdate());

    let retitled = memo
        .update_content_at(Some("renamed"), None, REGDATE + HOUR_MS)
        .unwrap();
    assert_eq!(retitled.title(), "renamed");
    assert_eq!(retitled.content(), "some body text");
}

#[test]
fn update_content_after_window_is_a_lifecycle_error() {
    let memo = memo_at(REGDATE);

    let err = memo
        .update_content_at(Some("late"), None, REGDATE + 25 * HOUR_MS)
        .unwrap_err();
    assert_eq!(
        err,
        MemoError::Lifecycle(MemoLifecycleError::ModifyWindowClosed {
            id: "memo-1".to_string()
        })
    );
    assert!(err.to_string().contains("can no longer be modified"));
}

#[test]
fn update_content_revalidates_new_values() {
    let memo = memo_at(REGDATE);

    let err = memo
        .update_content_at(Some("   "), None, REGDATE + HOUR_MS)
        .unwrap_err();
    assert_eq!(err, MemoError::Validation(MemoValidationError::MissingTitle));
}

#[test]
fn update_content_with_live_clock_on_stale_memo_fails() {
    let stale = memo_at(memo_core::now_epoch_ms() - 25 * HOUR_MS);
    let err = stale.update_content(None, Some("body")).unwrap_err();
    assert!(matches!(err, MemoError::Lifecycle(_)));
}

#[test]
fn delete_is_allowed_only_outside_the_gray_zone() {
    let memo = memo_at(REGDATE);

    assert!(memo.can_be_deleted_at(REGDATE + 23 * HOUR_MS));
    assert!(memo.can_be_deleted_at(REGDATE + 31 * DAY_MS));
    assert!(!memo.can_be_deleted_at(REGDATE + 25 * HOUR_MS));
    assert!(!memo.can_be_deleted_at(REGDATE + EXPIRY_WINDOW_MS));

    assert_eq!(
        memo.ensure_deletable_at(REGDATE + 25 * HOUR_MS).unwrap_err(),
        MemoLifecycleError::DeleteWindowClosed {
            id: "memo-1".to_string()
        }
    );
}

#[test]
fn to_record_and_view_expose_plain_and_derived_fields() {
    let memo = memo_at(REGDATE);

    let record = memo.to_record();
    assert_eq!(
        record,
        MemoRecord {
            id: "memo-1".to_string(),
            title: "title".to_string(),
            content: "some body text".to_string(),
            regdate: REGDATE,
        }
    );

    let view = memo.to_view_at(REGDATE + 2 * DAY_MS);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["id"], "memo-1");
    assert_eq!(json["regdate"], REGDATE);
    assert_eq!(json["wordCount"], 3);
    assert_eq!(json["canBeModified"], false);
    assert_eq!(json["isExpired"], false);
}

#[test]
fn deserialize_rebuilds_and_validates() {
    let valid = serde_json::json!({
        "id": "memo-9",
        "title": "  spaced ",
        "content": "body",
        "regdate": REGDATE,
    });
    let memo: Memo = serde_json::from_value(valid).unwrap();
    assert_eq!(memo.title(), "spaced");
    assert_eq!(memo.regdate(), REGDATE);

    let invalid = serde_json::json!({
        "id": "memo-9",
        "title": "",
        "content": "body",
        "regdate": REGDATE,
    });
    assert!(serde_json::from_value::<Memo>(invalid).is_err());
}
