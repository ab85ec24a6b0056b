pub mod client_repo;
pub mod coach_repo;
pub mod exercise_repo;
pub mod session_repo;
pub mod workout_repo;

pub use client_repo::ClientRepository;
pub use coach_repo::CoachRepository;
pub use exercise_repo::ExerciseRepository;
pub use session_repo::SessionRepository;
pub use workout_repo::WorkoutRepository;
