#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::reagent::ReagentShelf;
use crate::spawn::SequenceSpawn;

// =============================================================
// Helpers
// =============================================================

fn reagent(name: &str) -> Reagent {
    ReagentShelf::builtin().get(name).cloned().unwrap()
}

/// Session whose tokens spawn at the given corners, in order.
fn session_at(points: &[(f64, f64)]) -> LabSession {
    let spawn = SequenceSpawn::new(points.iter().map(|&(x, y)| Point::new(x, y)));
    LabSession::with_spawn(ReactionCatalog::builtin(), LabConfig::default(), Box::new(spawn))
}

fn placed_id(action: &Action) -> TokenId {
    match action {
        Action::TokenPlaced(t) => t.id,
        other => panic!("expected TokenPlaced, got {other:?}"),
    }
}

fn ids(session: &LabSession) -> Vec<TokenId> {
    session.tokens().map(|t| t.id).collect()
}

// =============================================================
// place
// =============================================================

#[test]
fn place_appends_token_at_spawn_position() {
    let mut s = session_at(&[(120.0, 150.0)]);
    let action = s.place(&reagent("HCl"));
    let id = placed_id(&action);
    let token = s.token(&id).unwrap();
    assert_eq!(token.reagent, "HCl");
    assert_eq!(token.image, "flask_red.png");
    assert_eq!((token.x, token.y), (120.0, 150.0));
    assert_eq!(s.token_count(), 1);
}

#[test]
fn place_twice_yields_distinct_tokens_same_metadata() {
    let mut s = session_at(&[(100.0, 100.0), (250.0, 180.0)]);
    let a = placed_id(&s.place(&reagent("CuSO4")));
    let b = placed_id(&s.place(&reagent("CuSO4")));
    assert_ne!(a, b);
    let (ta, tb) = (s.token(&a).unwrap(), s.token(&b).unwrap());
    assert_eq!(ta.reagent, tb.reagent);
    assert_eq!(ta.image, tb.image);
}

#[test]
fn place_does_not_trigger_reaction_even_when_overlapping() {
    let mut s = session_at(&[(100.0, 100.0), (100.0, 100.0)]);
    s.place(&reagent("HCl"));
    s.place(&reagent("NaOH"));
    assert_eq!(s.token_count(), 2);
    assert!(s.outcome().is_none());
}

#[test]
fn place_with_random_spawn_lands_in_region() {
    let mut s = LabSession::default();
    for _ in 0..50 {
        s.place(&reagent("NaCl"));
    }
    let region = s.config().spawn;
    assert!(s.tokens().all(|t| region.contains(t.position())));
}

#[test]
fn place_keeps_existing_outcome() {
    let mut s = session_at(&[(100.0, 100.0), (300.0, 300.0), (500.0, 500.0)]);
    let a = placed_id(&s.place(&reagent("HCl")));
    s.place(&reagent("NaOH"));
    s.move_token(&a, 300.0, 300.0).unwrap();
    assert!(s.outcome().is_some());
    s.place(&reagent("KI"));
    assert!(s.outcome().is_some());
}

// =============================================================
// move_token
// =============================================================

#[test]
fn move_out_of_range_only_updates_position() {
    let mut s = session_at(&[(100.0, 100.0), (400.0, 400.0)]);
    let a = placed_id(&s.place(&reagent("HCl")));
    s.place(&reagent("NaOH"));

    let action = s.move_token(&a, 200.0, 100.0).unwrap();
    assert_eq!(action, Action::TokenMoved { id: a, x: 200.0, y: 100.0 });
    assert_eq!(s.token(&a).unwrap().position(), Point::new(200.0, 100.0));
    assert_eq!(s.token_count(), 2);
    assert!(s.outcome().is_none());
}

#[test]
fn move_at_exactly_threshold_is_no_reaction() {
    let mut s = session_at(&[(100.0, 100.0), (500.0, 500.0)]);
    s.place(&reagent("HCl"));
    let b = placed_id(&s.place(&reagent("NaOH")));
    s.move_token(&b, 180.0, 100.0).unwrap();
    assert_eq!(s.token_count(), 2);
    assert!(s.outcome().is_none());
}

#[test]
fn move_with_no_candidate_leaves_previous_outcome() {
    let mut s = session_at(&[(100.0, 100.0), (500.0, 500.0), (900.0, 900.0)]);
    let a = placed_id(&s.place(&reagent("AgNO3")));
    s.place(&reagent("KI"));
    s.move_token(&a, 500.0, 500.0).unwrap();
    let before = s.outcome().cloned();
    assert!(before.is_some());

    let c = placed_id(&s.place(&reagent("NaCl")));
    s.move_token(&c, 10.0, 10.0).unwrap();
    assert_eq!(s.outcome().cloned(), before);
}

#[test]
fn move_unknown_id_is_not_found_and_changes_nothing() {
    let mut s = session_at(&[(100.0, 100.0), (110.0, 100.0)]);
    let a = placed_id(&s.place(&reagent("AgNO3")));
    s.place(&reagent("KI"));
    s.move_token(&a, 110.0, 100.0).unwrap();
    let outcome_before = s.outcome().cloned();

    let c = placed_id(&s.place(&reagent("HCl")));
    let before = ids(&s);
    let ghost = Uuid::new_v4();
    let err = s.move_token(&ghost, 100.0, 100.0).unwrap_err();

    assert_eq!(err, LabError::TokenNotFound(ghost));
    assert_eq!(err.error_code(), "E_TOKEN_NOT_FOUND");
    assert_eq!(ids(&s), before);
    assert_eq!(ids(&s), vec![c]);
    assert_eq!(s.outcome().cloned(), outcome_before);
}

#[test]
fn move_consumed_token_is_not_found() {
    let mut s = session_at(&[(100.0, 100.0), (120.0, 100.0)]);
    let a = placed_id(&s.place(&reagent("HCl")));
    s.place(&reagent("NaOH"));
    s.move_token(&a, 110.0, 100.0).unwrap();
    assert!(matches!(s.move_token(&a, 0.0, 0.0), Err(LabError::TokenNotFound(id)) if id == a));
}

// =============================================================
// Reactions
// =============================================================

#[test]
fn reaction_removes_both_and_sets_outcome_atomically() {
    let mut s = session_at(&[(100.0, 100.0), (400.0, 100.0), (600.0, 600.0)]);
    let a = placed_id(&s.place(&reagent("BaCl2")));
    let b = placed_id(&s.place(&reagent("H2SO4")));
    let keep = placed_id(&s.place(&reagent("NH3")));

    let action = s.move_token(&b, 150.0, 120.0).unwrap();
    let Action::Reacted { moved, partner, outcome } = action else {
        panic!("expected reaction, got {action:?}");
    };
    assert_eq!((moved, partner), (b, a));
    assert_eq!(outcome.text, "white precipitate forms (BaSO4)");
    assert_eq!(s.outcome(), Some(&outcome));
    assert!(s.token(&a).is_none());
    assert!(s.token(&b).is_none());
    assert_eq!(ids(&s), vec![keep]);
}

#[test]
fn scenario_neutralization_empties_bench() {
    let mut s = session_at(&[(100.0, 100.0), (300.0, 180.0)]);
    let hcl = placed_id(&s.place(&reagent("HCl")));
    let naoh = placed_id(&s.place(&reagent("NaOH")));

    let hcl_pos = s.token(&hcl).unwrap().position();
    let action = s.move_token(&naoh, hcl_pos.x + 30.0, hcl_pos.y + 30.0).unwrap();

    assert!(matches!(action, Action::Reacted { .. }));
    assert_eq!(s.token_count(), 0);
    let outcome = s.outcome().unwrap();
    assert_eq!(outcome.text, "neutralization reaction (water + salt)");
    assert_eq!(outcome.image.as_deref(), Some("gas_bubble.png"));
}

#[test]
fn scenario_unlisted_pair_reacts_with_no_reaction() {
    let mut s = session_at(&[(100.0, 100.0), (300.0, 180.0)]);
    s.place(&reagent("HCl"));
    let ki = placed_id(&s.place(&reagent("KI")));

    s.move_token(&ki, 140.0, 100.0).unwrap();

    assert_eq!(s.token_count(), 0);
    let outcome = s.outcome().unwrap();
    assert!(outcome.is_no_reaction());
    assert!(outcome.image.is_none());
}

#[test]
fn scenario_first_scanned_neighbor_wins() {
    // Two neighbors sit on either side of the drop point, both in range.
    let mut s = session_at(&[(100.0, 100.0), (160.0, 100.0), (400.0, 400.0)]);
    let first = placed_id(&s.place(&reagent("NaCl")));
    let second = placed_id(&s.place(&reagent("KI")));
    let moved = placed_id(&s.place(&reagent("AgNO3")));

    let action = s.move_token(&moved, 130.0, 100.0).unwrap();

    assert!(matches!(action, Action::Reacted { partner, .. } if partner == first));
    assert_eq!(s.outcome().unwrap().text, "white precipitate forms (AgCl)");
    assert_eq!(ids(&s), vec![second]);
    assert_eq!(s.token(&second).unwrap().position(), Point::new(160.0, 100.0));
}

#[test]
fn first_scanned_wins_even_if_farther() {
    let mut s = session_at(&[(170.0, 100.0), (102.0, 100.0), (500.0, 500.0)]);
    let far = placed_id(&s.place(&reagent("Pb(NO3)2")));
    let near = placed_id(&s.place(&reagent("AgNO3")));
    let moved = placed_id(&s.place(&reagent("KI")));

    s.move_token(&moved, 100.0, 100.0).unwrap();

    assert_eq!(s.outcome().unwrap().text, "yellow precipitate forms (PbI2)");
    assert_eq!(ids(&s), vec![near]);
    assert!(s.token(&far).is_none());
}

#[test]
fn moved_token_earlier_in_order_scans_later_tokens() {
    let mut s = session_at(&[(100.0, 100.0), (500.0, 500.0)]);
    let first = placed_id(&s.place(&reagent("CuSO4")));
    s.place(&reagent("NH3"));

    s.move_token(&first, 520.0, 500.0).unwrap();

    assert_eq!(s.token_count(), 0);
    assert_eq!(s.outcome().unwrap().image.as_deref(), Some("darkblue_solution.png"));
}

#[test]
fn one_reaction_per_move_no_chaining() {
    // Four tokens stacked on one spot; a move consumes exactly two.
    let mut s = session_at(&[(100.0, 100.0); 4]);
    let a = placed_id(&s.place(&reagent("HCl")));
    let b = placed_id(&s.place(&reagent("NaOH")));
    let c = placed_id(&s.place(&reagent("AgNO3")));
    let d = placed_id(&s.place(&reagent("KI")));

    s.move_token(&d, 100.0, 100.0).unwrap();

    assert_eq!(ids(&s), vec![b, c]);
    assert!(s.token(&a).is_none());
    assert!(s.outcome().unwrap().is_no_reaction());
}

#[test]
fn same_reagent_pair_is_no_reaction() {
    let mut s = session_at(&[(100.0, 100.0), (300.0, 100.0)]);
    s.place(&reagent("NaCl"));
    let b = placed_id(&s.place(&reagent("NaCl")));
    s.move_token(&b, 100.0, 100.0).unwrap();
    assert_eq!(s.token_count(), 0);
    assert!(s.outcome().unwrap().is_no_reaction());
}

#[test]
fn new_reaction_replaces_previous_outcome() {
    let mut s = session_at(&[(0.0, 0.0), (400.0, 0.0), (0.0, 400.0), (400.0, 400.0)]);
    let a = placed_id(&s.place(&reagent("HCl")));
    s.place(&reagent("NaOH"));
    let c = placed_id(&s.place(&reagent("AgNO3")));
    s.place(&reagent("KI"));

    s.move_token(&a, 400.0, 0.0).unwrap();
    assert_eq!(s.outcome().unwrap().image.as_deref(), Some("gas_bubble.png"));
    s.move_token(&c, 400.0, 400.0).unwrap();
    assert_eq!(s.outcome().unwrap().image.as_deref(), Some("yellow_precipitate.png"));
}

#[test]
fn custom_threshold_and_token_size_apply() {
    let config = LabConfig { proximity_threshold: 20.0, token_size: 10.0, ..LabConfig::default() };
    let spawn = SequenceSpawn::new([Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    let mut s = LabSession::with_spawn(ReactionCatalog::builtin(), config, Box::new(spawn));
    s.place(&reagent("HCl"));
    let b = placed_id(&s.place(&reagent("NaOH")));

    s.move_token(&b, 25.0, 0.0).unwrap();
    assert_eq!(s.token_count(), 2);
    s.move_token(&b, 19.0, 0.0).unwrap();
    assert_eq!(s.token_count(), 0);
}

#[test]
fn custom_catalog_is_consulted() {
    let catalog = ReactionCatalog::from_entries([("KI", "HCl", ReactionOutcome::new("custom", Some("c.png")))]).unwrap();
    let spawn = SequenceSpawn::new([Point::new(0.0, 0.0), Point::new(300.0, 0.0)]);
    let mut s = LabSession::with_spawn(catalog, LabConfig::default(), Box::new(spawn));
    s.place(&reagent("HCl"));
    let b = placed_id(&s.place(&reagent("KI")));
    s.move_token(&b, 10.0, 10.0).unwrap();
    assert_eq!(s.outcome().unwrap().text, "custom");
    assert_eq!(s.catalog().len(), 1);
}

// =============================================================
// reset / dismiss
// =============================================================

#[test]
fn reset_clears_tokens_and_outcome() {
    let mut s = session_at(&[(100.0, 100.0), (120.0, 100.0), (400.0, 400.0)]);
    let a = placed_id(&s.place(&reagent("HCl")));
    s.place(&reagent("NaOH"));
    s.place(&reagent("KI"));
    s.move_token(&a, 120.0, 100.0).unwrap();
    assert!(s.outcome().is_some());
    assert_eq!(s.token_count(), 1);

    assert_eq!(s.reset(), Action::Cleared);
    assert_eq!(s.token_count(), 0);
    assert!(s.outcome().is_none());
}

#[test]
fn reset_on_empty_bench_is_harmless() {
    let mut s = LabSession::default();
    assert_eq!(s.reset(), Action::Cleared);
    assert_eq!(s.token_count(), 0);
}

#[test]
fn dismiss_clears_only_outcome() {
    let mut s = session_at(&[(100.0, 100.0), (120.0, 100.0), (400.0, 400.0)]);
    let a = placed_id(&s.place(&reagent("HCl")));
    s.place(&reagent("NaOH"));
    let c = placed_id(&s.place(&reagent("KI")));
    s.move_token(&a, 120.0, 100.0).unwrap();

    assert_eq!(s.dismiss_outcome(), Action::OutcomeDismissed);
    assert!(s.outcome().is_none());
    assert_eq!(ids(&s), vec![c]);
}

#[test]
fn dismiss_without_outcome_is_harmless() {
    let mut s = session_at(&[(100.0, 100.0)]);
    s.place(&reagent("HCl"));
    s.dismiss_outcome();
    assert_eq!(s.token_count(), 1);
}

#[test]
fn bench_usable_after_reset() {
    let mut s = session_at(&[(100.0, 100.0), (300.0, 100.0)]);
    s.place(&reagent("HCl"));
    s.reset();
    let a = placed_id(&s.place(&reagent("HCl")));
    let b = placed_id(&s.place(&reagent("NaOH")));
    s.move_token(&b, 300.0, 100.0).unwrap();
    assert!(s.token(&a).is_none());
    assert!(!s.outcome().unwrap().is_no_reaction());
}

// =============================================================
// LabError
// =============================================================

#[test]
fn error_codes_and_messages() {
    let id = Uuid::nil();
    let err = LabError::TokenNotFound(id);
    assert_eq!(err.to_string(), format!("token not found: {id}"));
    let err = LabError::UnknownReagent("H2O".into());
    assert_eq!(err.error_code(), "E_UNKNOWN_REAGENT");
    assert_eq!(err.to_string(), "unknown reagent: H2O");
}
