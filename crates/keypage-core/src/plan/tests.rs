use crate::{
    cursor::CursorDecodeError,
    obs::{MetricsEvent, with_metrics_sink},
    plan::{CursorParam, PageAnchor, PageKind, PagePlanError, plan},
    sort::{OrderDirection, SortSpec},
    test_support::{RecordingSink, age_asc_id_desc, keyset, token},
    value::{KeysetTuple, Value},
};

#[test]
fn first_page_has_no_bounds_and_zero_offsets() {
    let plan = plan(&age_asc_id_desc(), None, None, 10).expect("first page should plan");

    assert_eq!(plan.kind(), PageKind::First);
    assert_eq!(plan.offset(), 0);
    assert_eq!(plan.window_offset(), 0);
    assert_eq!(plan.limit(), 10);
    assert!(plan.is_first_page());
    assert!(plan.lowest().is_none());
    assert!(plan.highest().is_none());
    assert!(!plan.reversed_fetch());
    assert_eq!(plan.query_sort(), age_asc_id_desc());
}

#[test]
fn after_cursor_plans_forward_scan_from_highest() {
    let after = token(&keyset(4, 17));
    let plan = plan(&age_asc_id_desc(), None, Some(after.as_str()), 10)
        .expect("after cursor should plan");

    assert_eq!(plan.kind(), PageKind::Forward);
    assert_eq!(plan.offset(), 0);
    assert_eq!(plan.window_offset(), 10);
    assert_eq!(plan.highest(), Some(&keyset(4, 17)));
    assert!(plan.lowest().is_none());
    assert!(!plan.reversed_fetch());
    assert_eq!(plan.query_sort(), age_asc_id_desc());
}

#[test]
fn before_cursor_plans_reversed_scan_from_lowest() {
    let before = token(&keyset(4, 17));
    let plan = plan(&age_asc_id_desc(), Some(before.as_str()), None, 10)
        .expect("before cursor should plan");

    assert_eq!(plan.kind(), PageKind::Backward);
    assert_eq!(plan.offset(), 20);
    assert_eq!(plan.window_offset(), 10);
    assert_eq!(plan.anchor(), &PageAnchor::Before(keyset(4, 17)));
    assert_eq!(plan.lowest(), Some(&keyset(4, 17)));
    assert!(plan.highest().is_none());
    assert!(plan.reversed_fetch());
    assert_eq!(plan.query_sort(), age_asc_id_desc().reversed());
}

#[test]
fn restore_display_order_only_flips_backward_pages() {
    let sort = age_asc_id_desc();
    let before = token(&keyset(1, 1));

    let mut rows = vec![3, 2, 1];
    plan(&sort, Some(before.as_str()), None, 3)
        .expect("before cursor should plan")
        .restore_display_order(&mut rows);
    assert_eq!(rows, vec![1, 2, 3]);

    plan(&sort, None, None, 3)
        .expect("first page should plan")
        .restore_display_order(&mut rows);
    assert_eq!(rows, vec![1, 2, 3]);
}

#[test]
fn backward_offset_does_not_overflow_for_max_page_size() {
    let before = token(&keyset(1, 1));
    let plan = plan(&age_asc_id_desc(), Some(before.as_str()), None, u32::MAX)
        .expect("max page size should plan");

    assert_eq!(plan.offset(), u64::from(u32::MAX) * 2);
}

#[test]
fn both_cursors_conflict() {
    let err = plan(&age_asc_id_desc(), Some("X"), Some("Y"), 10)
        .expect_err("before and after together must be rejected");

    assert_eq!(err, PagePlanError::ConflictingCursor);
}

#[test]
fn zero_page_size_is_rejected() {
    let err = plan(&age_asc_id_desc(), None, None, 0).expect_err("zero page size");

    assert_eq!(err, PagePlanError::ZeroPageSize);
}

#[test]
fn token_for_other_sort_spec_is_rejected_by_arity() {
    let single = SortSpec::new([("id", OrderDirection::Asc)]).expect("sort spec should build");
    let after = token(&KeysetTuple::from([Value::Int(5)]));

    let err = plan(&age_asc_id_desc(), None, Some(after.as_str()), 10)
        .expect_err("one-column token against two-column spec");
    assert_eq!(
        err,
        PagePlanError::InvalidCursor {
            param: CursorParam::After,
            source: CursorDecodeError::ArityMismatch {
                expected: 2,
                found: 1
            },
        }
    );

    // same token is fine under the spec it was minted for
    assert!(plan(&single, None, Some(after.as_str()), 10).is_ok());
}

#[test]
fn malformed_before_cursor_names_the_parameter() {
    let err = plan(&age_asc_id_desc(), Some("not base64!"), None, 10)
        .expect_err("garbage cursor must be rejected");

    assert!(matches!(
        &err,
        PagePlanError::InvalidCursor {
            param: CursorParam::Before,
            source: CursorDecodeError::MalformedToken { .. },
        }
    ));
    assert!(err.decode_error().is_some());
}

#[test]
fn planner_reports_decode_and_plan_events() {
    let sink = RecordingSink::default();
    let after = token(&keyset(2, 2));

    with_metrics_sink(&sink, || {
        plan(&age_asc_id_desc(), None, Some(after.as_str()), 5).expect("after cursor should plan");
        let _ = plan(&age_asc_id_desc(), Some("AA"), None, 5);
    });

    assert_eq!(
        sink.events(),
        vec![
            MetricsEvent::CursorDecoded {
                param: CursorParam::After
            },
            MetricsEvent::PagePlanned {
                kind: PageKind::Forward
            },
            MetricsEvent::CursorRejected {
                param: CursorParam::Before,
                reason: "arity_mismatch"
            },
        ]
    );
}
