use super::*;
use pretty_assertions::assert_eq;

#[test]
fn submit_is_ignored_before_the_last_step() {
    let mut state = state();
    state.position = last_step_index() - 1;

    let effects = user(&mut state, UserAction::Submit);

    assert!(effects.is_empty());
    assert_eq!(state.phase, SubmissionPhase::Idle);
}

#[test]
fn submit_snapshots_answers_and_enters_submitting() {
    let mut state = at_last_step();
    user(&mut state, choice(ChoiceField::MaintenancePlan, "monthly"));
    let expected = state.answers.clone();

    let effects = user(&mut state, UserAction::Submit);

    assert_eq!(
        effects,
        vec![
            WizardEffect::StartSubmission {
                attempt: 1,
                answers: expected,
            },
            WizardEffect::RequestFrame,
        ]
    );
    assert_eq!(state.phase, SubmissionPhase::Submitting { attempt: 1 });
    assert!(state.is_submitting());
    assert_eq!(state.view(), WizardView::Form);
}

#[test]
fn second_submit_while_in_flight_starts_nothing() {
    let mut state = at_last_step();
    let attempt = start_submission(&mut state);

    let effects = user(&mut state, UserAction::Submit);

    assert!(effects.is_empty());
    assert_eq!(state.phase, SubmissionPhase::Submitting { attempt });
}

#[test]
fn document_resolution_switches_to_result_view() {
    let mut state = at_last_step();
    let attempt = start_submission(&mut state);

    run_runtime(
        &mut state,
        RuntimeAction::SubmissionResolved {
            attempt,
            result: SubmissionResult::Document("# Scope".to_string()),
        },
    );

    assert_eq!(state.phase, SubmissionPhase::Idle);
    assert_eq!(state.view(), WizardView::Result);
    assert_eq!(
        state.result,
        Some(SubmissionResult::Document("# Scope".to_string()))
    );
}

#[test]
fn failure_resolution_also_shows_result_view() {
    let mut state = at_last_step();

    resolved(&mut state, SubmissionResult::failure());

    assert_eq!(state.view(), WizardView::Result);
    assert!(state.result.as_ref().is_some_and(SubmissionResult::is_error));
    assert!(!state.is_submitting());
}

#[test]
fn stale_resolution_is_dropped() {
    let mut state = at_last_step();
    let attempt = start_submission(&mut state);

    run_runtime(
        &mut state,
        RuntimeAction::SubmissionResolved {
            attempt: attempt + 7,
            result: SubmissionResult::Document("late".to_string()),
        },
    );

    assert_eq!(state.phase, SubmissionPhase::Submitting { attempt });
    assert_eq!(state.result, None);
}

#[test]
fn reset_returns_to_first_step_and_keeps_answers() {
    let mut state = at_last_step();
    user(&mut state, choice(ChoiceField::ContentCreationHelp, "needs_help"));
    let answers = state.answers.clone();
    resolved(&mut state, SubmissionResult::Document("# Scope".to_string()));
    state.interaction.result_scroll = 12;

    let effects = user(&mut state, UserAction::Reset);

    assert_eq!(
        effects,
        vec![WizardEffect::ScrollToTop, WizardEffect::RequestFrame]
    );
    assert_eq!(state.position, 0);
    assert_eq!(state.result, None);
    assert_eq!(state.view(), WizardView::Form);
    assert_eq!(state.interaction.result_scroll, 0);
    assert_eq!(state.answers, answers);
}

#[test]
fn reset_outside_result_view_does_nothing() {
    let mut state = at_last_step();

    assert!(user(&mut state, UserAction::Reset).is_empty());
    assert_eq!(state.position, last_step_index());
}

#[test]
fn resubmission_after_reset_allocates_a_new_attempt() {
    let mut state = at_last_step();
    resolved(&mut state, SubmissionResult::failure());
    user(&mut state, UserAction::Reset);
    state.position = last_step_index();

    let attempt = start_submission(&mut state);

    assert_eq!(attempt, 2);
}

#[test]
fn copy_and_export_need_a_result() {
    let mut state = at_last_step();
    assert!(user(&mut state, UserAction::CopyResult).is_empty());
    assert!(user(&mut state, UserAction::ExportResult).is_empty());

    resolved(&mut state, SubmissionResult::Document("# Scope".to_string()));

    assert_eq!(
        user(&mut state, UserAction::CopyResult),
        vec![
            WizardEffect::CopyToClipboard("# Scope".to_string()),
            WizardEffect::RequestFrame,
        ]
    );
    assert_eq!(
        user(&mut state, UserAction::ExportResult),
        vec![
            WizardEffect::ExportDocument("# Scope".to_string()),
            WizardEffect::RequestFrame,
        ]
    );
}

#[test]
fn failed_result_is_not_exported() {
    let mut state = at_last_step();
    resolved(&mut state, SubmissionResult::failure());

    assert!(user(&mut state, UserAction::ExportResult).is_empty());
}

#[test]
fn result_scroll_saturates_at_zero() {
    let mut state = at_last_step();
    resolved(&mut state, SubmissionResult::Document("# Scope".to_string()));

    user(&mut state, UserAction::ScrollResult(5));
    assert_eq!(state.interaction.result_scroll, 5);
    user(&mut state, UserAction::ScrollResult(-9));
    assert_eq!(state.interaction.result_scroll, 0);
}
