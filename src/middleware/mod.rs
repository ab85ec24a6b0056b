pub mod auth;

pub use auth::AuthCoach;
