//! Shared setup for integration tests.

use befit_core::db::ExerciseType;
use befit_core::{
    BefitDb, Caller, CatalogInput, CatalogService, ExerciseInput, ExerciseService, SessionInput,
    SessionService, StatsService,
};

pub struct Env {
    pub db: BefitDb,
    pub catalog: CatalogService,
    pub sessions: SessionService,
    pub exercises: ExerciseService,
    pub stats: StatsService,
}

pub async fn env() -> Env {
    let db = BefitDb::open_in_memory().await.unwrap();
    Env {
        catalog: CatalogService::new(db.clone()),
        sessions: SessionService::new(db.clone()),
        exercises: ExerciseService::new(db.clone()),
        stats: StatsService::new(db.clone()),
        db,
    }
}

pub fn admin() -> Caller {
    Caller::admin("admin-1")
}

pub async fn seed_type(env: &Env, name: &str) -> ExerciseType {
    env.catalog
        .create(
            &admin(),
            CatalogInput {
                name: name.to_string(),
                description: None,
            },
        )
        .await
        .unwrap()
}

pub fn session_input(title: &str) -> SessionInput {
    SessionInput {
        title: title.to_string(),
        ..Default::default()
    }
}

pub fn exercise_input(name: &str, session_id: i64, exercise_type_id: i64) -> ExerciseInput {
    ExerciseInput {
        session_id,
        exercise_type_id,
        name: name.to_string(),
        reps: 10,
        set_count: 3,
        ..Default::default()
    }
}
