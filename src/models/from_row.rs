use rusqlite::Row;

/// Builds a model from a row by column name, so joined queries may carry
/// extra columns such as `exercise_name` or `workouts_count`.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
