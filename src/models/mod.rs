pub mod client;
pub mod coach;
pub mod exercise;
pub mod from_row;
pub mod workout;

pub use client::{Client, ClientFilter, ClientPayload, NewClient};
pub use coach::{Coach, CoachPayload, CoachProfile, LoginCredentials, LoginResponse, NewCoach};
pub use exercise::{
    Exercise, ExerciseSummary, LoadWeight, LoadWeightsQuery, NamedRef, WeightUnit, WeightsQuery,
};
pub use from_row::FromSqliteRow;
pub use workout::{Workout, WorkoutFilter};
