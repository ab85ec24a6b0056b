use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use proft::config::Config;
use proft::handlers::{clients, coaches, exercises, workouts};
use proft::repositories::{
    ClientRepository, CoachRepository, ExerciseRepository, SessionRepository, WorkoutRepository,
};
use proft::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proft=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);
    let pool = db::create_pool(&config.database_url)?;
    migrations::run_migrations(&pool)?;

    let coach_repo = CoachRepository::new(pool.clone());
    let client_repo = ClientRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone(), config.session_ttl_secs);

    let removed = session_repo.cleanup_expired().await?;
    if removed > 0 {
        tracing::info!("Removed {} expired session(s)", removed);
    }

    let coaches_state = coaches::CoachesState {
        coach_repo: coach_repo.clone(),
        client_repo: client_repo.clone(),
        session_repo: session_repo.clone(),
    };
    let clients_state = clients::ClientsState {
        client_repo: client_repo.clone(),
        coach_repo: coach_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo,
        client_repo,
        exercise_repo: exercise_repo.clone(),
    };
    let exercises_state = exercises::ExercisesState { exercise_repo };

    let app = routes::create_router(
        coaches_state,
        clients_state,
        workouts_state,
        exercises_state,
        session_repo,
        &config.cors_origins,
    );

    let addr = config.server_addr();
    tracing::info!(
        "Starting server at http://{} ({})",
        addr,
        proft::version::GIT_VERSION
    );

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
