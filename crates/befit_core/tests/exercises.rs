//! Exercise rules: foreign-session rejection, pickers, range validation.

mod common;

use befit_core::{Caller, CoreError, ExerciseInput};
use chrono::{Duration, Utc};
use common::{env, exercise_input, seed_type, session_input};
use pretty_assertions::assert_eq;

fn validation_fields(err: CoreError) -> Vec<&'static str> {
    match err {
        CoreError::Validation(errors) => errors.iter().map(|e| e.field).collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_into_foreign_session_is_rejected() {
    let env = env().await;
    let x = Caller::user("user-x");
    let y = Caller::user("user-y");

    let strength = seed_type(&env, "Strength").await;
    let foreign = env.sessions.create(&x, session_input("X's session")).await.unwrap();

    let err = env
        .exercises
        .create(&y, exercise_input("Squat", foreign.id, strength.id))
        .await
        .unwrap_err();
    assert_eq!(validation_fields(err), ["session_id"]);

    // Nothing persisted anywhere.
    assert!(env.exercises.list(&x).await.unwrap().is_empty());
    assert!(env.exercises.list(&y).await.unwrap().is_empty());
}

#[tokio::test]
async fn unselected_pickers_are_field_errors() {
    let env = env().await;
    let caller = Caller::user("user-x");

    let err = env
        .exercises
        .create(&caller, exercise_input("Squat", 0, 0))
        .await
        .unwrap_err();
    let fields = validation_fields(err);
    assert!(fields.contains(&"exercise_type_id"));
    assert!(fields.contains(&"session_id"));
}

#[tokio::test]
async fn numeric_ranges_are_enforced() {
    let env = env().await;
    let caller = Caller::user("user-x");

    let strength = seed_type(&env, "Strength").await;
    let session = env.sessions.create(&caller, session_input("Push day")).await.unwrap();

    let input = ExerciseInput {
        session_id: session.id,
        exercise_type_id: strength.id,
        name: "Bench".to_string(),
        duration_seconds: 90_000,
        reps: 10_001,
        set_count: 0,
        load_kg: Some(-5.0),
        ..Default::default()
    };
    let err = env.exercises.create(&caller, input).await.unwrap_err();
    let fields = validation_fields(err);
    assert_eq!(
        fields,
        ["duration_seconds", "reps", "set_count", "load_kg"]
    );
}

#[tokio::test]
async fn nonexistent_type_is_a_field_error() {
    let env = env().await;
    let caller = Caller::user("user-x");

    let session = env.sessions.create(&caller, session_input("Push day")).await.unwrap();
    let err = env
        .exercises
        .create(&caller, exercise_input("Bench", session.id, 999))
        .await
        .unwrap_err();
    assert_eq!(validation_fields(err), ["exercise_type_id"]);
}

#[tokio::test]
async fn cannot_move_exercise_into_foreign_session() {
    let env = env().await;
    let x = Caller::user("user-x");
    let y = Caller::user("user-y");

    let strength = seed_type(&env, "Strength").await;
    let mine = env.sessions.create(&x, session_input("Mine")).await.unwrap();
    let theirs = env.sessions.create(&y, session_input("Theirs")).await.unwrap();

    let squat = env
        .exercises
        .create(&x, exercise_input("Squat", mine.id, strength.id))
        .await
        .unwrap();

    let err = env
        .exercises
        .update(&x, squat.id, exercise_input("Squat", theirs.id, strength.id))
        .await
        .unwrap_err();
    assert_eq!(validation_fields(err), ["session_id"]);

    // Still attached to the original session.
    let stored = env.exercises.get(&x, squat.id).await.unwrap();
    assert_eq!(stored.session_id, mine.id);
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let env = env().await;
    let caller = Caller::user("user-x");

    let strength = seed_type(&env, "Strength").await;
    let session = env.sessions.create(&caller, session_input("Legs")).await.unwrap();
    let squat = env
        .exercises
        .create(&caller, exercise_input("Squat", session.id, strength.id))
        .await
        .unwrap();

    let mut input = exercise_input("Front squat", session.id, strength.id);
    input.load_kg = Some(60.0);
    input.reps = 5;
    let updated = env.exercises.update(&caller, squat.id, input).await.unwrap();
    assert_eq!(updated.name, "Front squat");
    assert_eq!(updated.load_kg, Some(60.0));
    assert_eq!(updated.reps, 5);

    env.exercises.delete(&caller, squat.id).await.unwrap();
    let err = env.exercises.get(&caller, squat.id).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}

#[tokio::test]
async fn pick_lists_follow_catalog_and_session_ordering() {
    let env = env().await;
    let caller = Caller::user("user-x");

    seed_type(&env, "Strength").await;
    seed_type(&env, "Cardio").await;
    seed_type(&env, "Mobility").await;

    let older = befit_core::SessionInput {
        title: "Older".to_string(),
        started_at: Some(Utc::now() - Duration::days(3)),
        ..Default::default()
    };
    env.sessions.create(&caller, older).await.unwrap();
    env.sessions.create(&caller, session_input("Newer")).await.unwrap();

    let picks = env.exercises.pick_lists(&caller).await.unwrap();

    let type_names: Vec<_> = picks.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(type_names, ["Cardio", "Mobility", "Strength"]);

    let session_titles: Vec<_> = picks.sessions.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(session_titles, ["Newer", "Older"]);
}
