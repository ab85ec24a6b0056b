/// Set by `build.rs`: `GIT_VERSION` env override, `git describe`, or `dev`.
pub const GIT_VERSION: &str = env!("GIT_VERSION");
