//! Unit tests for draft editing and request building.

use std::collections::HashSet;

use proptest::prelude::*;

use pos_console::models::order::{ItemId, OrderLine};
use pos_console::orders::{build_request, DraftOrder};

fn line(item_id: i64, quantity: i64) -> OrderLine {
    OrderLine { item_id, quantity }
}

#[test]
fn empty_draft_yields_no_lines() {
    assert!(build_request(&DraftOrder::new()).items.is_empty());
}

#[test]
fn mixed_quantities_keep_only_positive() {
    let draft: DraftOrder = [(1, 0), (2, -1), (3, 5)].into_iter().collect();
    assert_eq!(build_request(&draft).items, vec![line(3, 5)]);
}

#[test]
fn build_is_deterministic_and_pure() {
    let draft: DraftOrder = [(4, 2), (1, 1), (9, 3)].into_iter().collect();
    let before = draft.clone();

    let first = build_request(&draft);
    let second = build_request(&draft);

    assert_eq!(first, second);
    assert_eq!(draft, before, "building must not modify the draft");
    assert_eq!(first.items, vec![line(4, 2), line(1, 1), line(9, 3)]);
}

#[test]
fn repeated_edits_produce_unique_lines_with_last_value() {
    let mut draft = DraftOrder::new();
    let edits = [(5, 1), (6, 2), (5, 0), (7, 4), (6, 3), (5, 8)];
    for (item_id, quantity) in edits {
        draft.set_quantity(item_id, quantity);
    }

    let lines = build_request(&draft).items;
    assert_eq!(lines, vec![line(5, 8), line(6, 3), line(7, 4)]);

    let mut ids: Vec<i64> = lines.iter().map(|l| l.item_id).collect();
    ids.dedup();
    assert_eq!(ids.len(), lines.len(), "no duplicate item identifiers");
}

#[test]
fn setting_to_zero_removes_line_but_keeps_entry() {
    let mut draft = DraftOrder::new();
    draft.set_quantity(1, 3);
    draft.set_quantity(1, 0);

    assert_eq!(draft.entries(), &[(1, 0)]);
    assert!(build_request(&draft).is_empty());
}

#[test]
fn clear_empties_draft() {
    let mut draft: DraftOrder = [(1, 1)].into_iter().collect();
    draft.clear();
    assert!(draft.is_empty());
}

#[test]
fn request_serializes_as_camel_case() {
    let draft: DraftOrder = [(3, 2)].into_iter().collect();
    let json = serde_json::to_value(build_request(&draft)).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({ "items": [{ "itemId": 3, "quantity": 2 }] })
    );
}

/// Last write per item, positioned where the item was first set.
fn expected_lines(edits: &[(ItemId, i64)]) -> Vec<OrderLine> {
    let mut latest: Vec<(ItemId, i64)> = Vec::new();
    for &(item_id, quantity) in edits {
        match latest.iter_mut().find(|(id, _)| *id == item_id) {
            Some(slot) => slot.1 = quantity,
            None => latest.push((item_id, quantity)),
        }
    }
    latest
        .into_iter()
        .filter(|(_, quantity)| *quantity > 0)
        .map(|(item_id, quantity)| line(item_id, quantity))
        .collect()
}

proptest! {
    #[test]
    fn any_edit_sequence_builds_the_expected_request(
        // Narrow id range so overwrites are common.
        edits in prop::collection::vec((0_i64..12, -5_i64..20), 0..40)
    ) {
        let mut draft = DraftOrder::new();
        for &(item_id, quantity) in &edits {
            draft.set_quantity(item_id, quantity);
        }

        let request = build_request(&draft);

        prop_assert!(request.items.iter().all(|l| l.quantity > 0));
        let unique: HashSet<ItemId> = request.items.iter().map(|l| l.item_id).collect();
        prop_assert_eq!(unique.len(), request.items.len());
        prop_assert_eq!(&request.items, &expected_lines(&edits));
        prop_assert_eq!(build_request(&draft), request);
    }

    #[test]
    fn draft_entries_never_repeat_an_item(
        edits in prop::collection::vec((any::<ItemId>(), any::<i64>()), 0..40)
    ) {
        let draft: DraftOrder = edits.iter().copied().collect();

        let ids: HashSet<ItemId> = draft.entries().iter().map(|(id, _)| *id).collect();
        prop_assert_eq!(ids.len(), draft.entries().len());
        for &(item_id, _) in &edits {
            let last = edits.iter().rev().find(|(id, _)| *id == item_id).map(|(_, q)| *q);
            prop_assert_eq!(Some(draft.quantity(item_id)), last);
        }
    }
}
