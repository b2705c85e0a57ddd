// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AddOutcome, AllocationEditor, AllocationError, AllocationSubmission, EditorMode, EditorPhase,
    REDIRECT_DELAY, SubmissionTicket,
};
use ceutro_domain::{Allocation, AllocationLine, Giveaway, ResourceKind, Sample};

use super::helpers::{create_test_giveaways, create_test_samples};

const GIVEAWAY: ResourceKind = ResourceKind::Giveaway;
const SAMPLE: ResourceKind = ResourceKind::Sample;

fn create_editor_with_pen() -> AllocationEditor {
    let giveaways: Vec<Giveaway> = create_test_giveaways();
    let mut editor: AllocationEditor = AllocationEditor::new();
    editor.select_employee(5).unwrap();
    editor.add_item(GIVEAWAY, &giveaways[0]).unwrap();
    editor
}

fn create_existing_editor() -> AllocationEditor {
    let allocation: Allocation = Allocation::new(
        5,
        vec![AllocationLine::new(10, 4), AllocationLine::new(99, 2)],
        vec![AllocationLine::new(20, 1)],
    );
    AllocationEditor::for_existing(&allocation, &create_test_giveaways(), &create_test_samples())
}

#[test]
fn test_new_editor_waits_for_an_employee() {
    let mut editor: AllocationEditor = AllocationEditor::new();
    let giveaways: Vec<Giveaway> = create_test_giveaways();

    assert_eq!(editor.phase(), EditorPhase::NoEmployeeSelected);
    assert_eq!(
        editor.add_item(GIVEAWAY, &giveaways[0]),
        Err(AllocationError::NoEmployeeSelected)
    );
    assert_eq!(editor.begin_submit(), Err(AllocationError::NoEmployeeSelected));
}

#[test]
fn test_add_item_appends_with_quantity_one() {
    let editor: AllocationEditor = create_editor_with_pen();

    let items: Vec<_> = editor.visible_items(GIVEAWAY);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Pen");
    assert_eq!(items[0].quantity, 1);
}

#[test]
fn test_adding_an_active_item_twice_is_rejected() {
    let mut editor: AllocationEditor = create_editor_with_pen();
    let giveaways: Vec<Giveaway> = create_test_giveaways();

    let result: Result<AddOutcome, AllocationError> = editor.add_item(GIVEAWAY, &giveaways[0]);

    assert_eq!(
        result,
        Err(AllocationError::AlreadyAdded {
            kind: GIVEAWAY,
            name: String::from("Pen"),
        })
    );
}

#[test]
fn test_committing_non_positive_quantities_stores_one() {
    let mut editor: AllocationEditor = create_editor_with_pen();

    for raw in [0, -1, -500, i64::MIN] {
        assert_eq!(editor.commit_quantity(GIVEAWAY, 10, raw), Ok(1));
        assert_eq!(editor.items(GIVEAWAY)[0].quantity, 1);
    }
    assert_eq!(editor.commit_quantity(GIVEAWAY, 10, 7), Ok(7));
    assert_eq!(
        editor.commit_quantity(GIVEAWAY, 10, i64::MAX),
        Ok(u32::MAX)
    );
}

#[test]
fn test_quantity_text_input_defaults_to_one() {
    let mut editor: AllocationEditor = create_editor_with_pen();

    assert_eq!(editor.commit_quantity_input(GIVEAWAY, 10, ""), Ok(1));
    assert_eq!(editor.commit_quantity_input(GIVEAWAY, 10, "abc"), Ok(1));
    assert_eq!(editor.commit_quantity_input(GIVEAWAY, 10, " 12 "), Ok(12));
    assert_eq!(editor.commit_quantity_input(GIVEAWAY, 10, "3.9"), Ok(3));
    assert_eq!(editor.commit_quantity_input(GIVEAWAY, 10, "-4"), Ok(1));
}

#[test]
fn test_commit_quantity_for_missing_item_fails() {
    let mut editor: AllocationEditor = create_editor_with_pen();

    assert_eq!(
        editor.commit_quantity(SAMPLE, 20, 3),
        Err(AllocationError::ItemNotFound { kind: SAMPLE, id: 20 })
    );
}

#[test]
fn test_search_excludes_active_items_and_matches_description() {
    let editor: AllocationEditor = create_editor_with_pen();
    let giveaways: Vec<Giveaway> = create_test_giveaways();

    let ids: Vec<i64> = editor
        .search_catalog(GIVEAWAY, &giveaways, "PEN")
        .iter()
        .map(|entry| entry.id)
        .collect();

    assert_eq!(ids, vec![12]);

    let all: Vec<&Giveaway> = editor.search_catalog(GIVEAWAY, &giveaways, "");
    assert_eq!(all.len(), 2);
}

#[test]
fn test_create_mode_removal_drops_the_item() {
    let mut editor: AllocationEditor = create_editor_with_pen();

    editor.remove_item(GIVEAWAY, 10).unwrap();

    assert!(editor.items(GIVEAWAY).is_empty());
    assert_eq!(
        editor.remove_item(GIVEAWAY, 10),
        Err(AllocationError::ItemNotFound {
            kind: GIVEAWAY,
            id: 10
        })
    );
}

#[test]
fn test_edit_mode_removal_soft_deletes() {
    let mut editor: AllocationEditor = create_existing_editor();

    editor.remove_item(GIVEAWAY, 10).unwrap();

    let pen = editor
        .items(GIVEAWAY)
        .iter()
        .find(|item| item.id == 10)
        .unwrap();
    assert_eq!(pen.quantity, 0);
    assert!(editor.visible_items(GIVEAWAY).iter().all(|item| item.id != 10));
    assert!(!editor.excluded_ids(GIVEAWAY).contains(&10));
}

#[test]
fn test_readding_a_soft_deleted_item_revives_it() {
    let mut editor: AllocationEditor = create_existing_editor();
    let giveaways: Vec<Giveaway> = create_test_giveaways();
    editor.remove_item(GIVEAWAY, 10).unwrap();

    let outcome: AddOutcome = editor.add_item(GIVEAWAY, &giveaways[0]).unwrap();

    assert_eq!(outcome, AddOutcome::Revived);
    let quantities: Vec<u32> = editor.items(GIVEAWAY).iter().map(|i| i.quantity).collect();
    assert_eq!(quantities, vec![1, 2]);
}

#[test]
fn test_existing_lines_missing_from_catalog_keep_a_placeholder_name() {
    let editor: AllocationEditor = create_existing_editor();

    let names: Vec<&str> = editor
        .items(GIVEAWAY)
        .iter()
        .map(|item| item.name.as_str())
        .collect();

    assert_eq!(names, vec!["Pen", "Giveaway 99"]);
    assert_eq!(editor.mode(), EditorMode::Edit { user_id: 5 });
    assert_eq!(editor.phase(), EditorPhase::Editing);
}

#[test]
fn test_update_payload_carries_removed_items_with_zero_quantity() {
    let giveaways: Vec<Giveaway> = create_test_giveaways();
    let allocation: Allocation = Allocation::new(5, vec![], vec![]);
    let mut editor: AllocationEditor =
        AllocationEditor::for_existing(&allocation, &giveaways, &create_test_samples());

    editor.select_employee(5).unwrap();
    editor.add_item(GIVEAWAY, &giveaways[0]).unwrap();
    editor.commit_quantity(GIVEAWAY, 10, 5).unwrap();
    editor.remove_item(GIVEAWAY, 10).unwrap();
    let ticket: SubmissionTicket = editor.begin_submit().unwrap();

    assert_eq!(
        ticket.submission().giveaway,
        vec![AllocationLine::new(10, 0)]
    );
}

#[test]
fn test_create_payload_excludes_inactive_lines() {
    let mut editor: AllocationEditor = create_editor_with_pen();
    let samples: Vec<Sample> = create_test_samples();
    editor.add_item(SAMPLE, &samples[1]).unwrap();
    editor.commit_quantity(SAMPLE, 21, 3).unwrap();

    let ticket: SubmissionTicket = editor.begin_submit().unwrap();

    assert_eq!(
        ticket.submission(),
        &AllocationSubmission {
            mode: EditorMode::Create,
            user_id: 5,
            giveaway: vec![AllocationLine::new(10, 1)],
            sample: vec![AllocationLine::new(21, 3)],
        }
    );
    assert_eq!(editor.phase(), EditorPhase::Submitting);
}

#[test]
fn test_create_without_lines_is_rejected() {
    let mut editor: AllocationEditor = AllocationEditor::new();
    editor.select_employee(5).unwrap();

    assert_eq!(editor.begin_submit(), Err(AllocationError::NothingToSubmit));
    assert_eq!(editor.phase(), EditorPhase::Editing);
}

#[test]
fn test_switching_employee_in_create_mode_clears_lists() {
    let mut editor: AllocationEditor = create_editor_with_pen();

    editor.select_employee(5).unwrap();
    assert_eq!(editor.items(GIVEAWAY).len(), 1);

    editor.select_employee(6).unwrap();
    assert!(editor.items(GIVEAWAY).is_empty());
    assert_eq!(editor.user_id(), Some(6));
}

#[test]
fn test_edit_mode_is_pinned_to_its_employee() {
    let mut editor: AllocationEditor = create_existing_editor();

    assert_eq!(
        editor.select_employee(6),
        Err(AllocationError::EmployeeLocked { user_id: 5 })
    );
}

#[test]
fn test_successful_submit_moves_to_succeeded_with_redirect_delay() {
    let mut editor: AllocationEditor = create_editor_with_pen();
    let ticket: SubmissionTicket = editor.begin_submit().unwrap();

    assert_eq!(editor.begin_submit(), Err(AllocationError::SubmissionInProgress));
    assert!(editor.complete_submit(&ticket, Ok(())));

    assert_eq!(
        editor.phase(),
        EditorPhase::Succeeded {
            redirect_after: REDIRECT_DELAY
        }
    );
    assert_eq!(REDIRECT_DELAY.as_secs(), 2);
}

#[test]
fn test_failed_submit_returns_to_editing_with_error() {
    let mut editor: AllocationEditor = create_editor_with_pen();
    let ticket: SubmissionTicket = editor.begin_submit().unwrap();

    assert!(editor.complete_submit(&ticket, Err(String::from("Network error"))));

    assert_eq!(editor.phase(), EditorPhase::Editing);
    assert_eq!(editor.last_error(), Some("Network error"));
    assert!(editor.begin_submit().is_ok());
    assert_eq!(editor.last_error(), None);
}

#[test]
fn test_results_after_dispose_are_dropped() {
    let mut editor: AllocationEditor = create_editor_with_pen();
    let ticket: SubmissionTicket = editor.begin_submit().unwrap();

    editor.dispose();

    assert!(!editor.complete_submit(&ticket, Ok(())));
    assert_eq!(editor.phase(), EditorPhase::Submitting);
}

#[test]
fn test_results_after_reset_are_dropped() {
    let mut editor: AllocationEditor = create_editor_with_pen();
    let ticket: SubmissionTicket = editor.begin_submit().unwrap();

    editor.reset();

    assert!(!editor.complete_submit(&ticket, Ok(())));
    assert_eq!(editor.phase(), EditorPhase::NoEmployeeSelected);
    assert!(editor.items(GIVEAWAY).is_empty());
}

#[test]
fn test_editing_after_success_is_rejected() {
    let mut editor: AllocationEditor = create_editor_with_pen();
    let ticket: SubmissionTicket = editor.begin_submit().unwrap();
    editor.complete_submit(&ticket, Ok(()));

    assert_eq!(
        editor.commit_quantity(GIVEAWAY, 10, 2),
        Err(AllocationError::AlreadySubmitted)
    );
}

#[test]
fn test_phase_serializes_redirect_delay_in_millis() {
    let json: serde_json::Value = serde_json::to_value(EditorPhase::Succeeded {
        redirect_after: REDIRECT_DELAY,
    })
    .unwrap();

    assert_eq!(json["phase"], "succeeded");
    assert_eq!(json["redirect_after"], 2000);
}
