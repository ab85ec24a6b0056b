use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

/// Row shape for `GET /exercises`.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseSummary {
    pub id: i64,
    pub name: String,
    pub load_type_id: i64,
}

impl FromSqliteRow for ExerciseSummary {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            load_type_id: row.get("load_type_id")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub load_type_id: i64,
    pub load_type: Option<String>,
    pub type_training: String,
    pub movement_category: String,
    pub body_part: String,
    pub muscle_action: String,
    pub movement_pattern: String,
    pub plane_motion: String,
    pub joint_involvement: String,
    pub joint_position: String,
    pub resistance_modality: String,
    pub primary_muscles: Vec<NamedRef>,
    pub secondary_muscles: Vec<NamedRef>,
    pub equipments: Vec<NamedRef>,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            load_type_id: row.get("load_type_id")?,
            load_type: row.get("load_type")?,
            type_training: row.get("type_training")?,
            movement_category: row.get("movement_category")?,
            body_part: row.get("body_part")?,
            muscle_action: row.get("muscle_action")?,
            movement_pattern: row.get("movement_pattern")?,
            plane_motion: row.get("plane_motion")?,
            joint_involvement: row.get("joint_involvement")?,
            joint_position: row.get("joint_position")?,
            resistance_modality: row.get("resistance_modality")?,
            primary_muscles: Vec::new(),
            secondary_muscles: Vec::new(),
            equipments: Vec::new(),
        })
    }
}

/// `{id, name}` pair for muscles and equipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

impl FromSqliteRow for NamedRef {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadWeight {
    pub id: i64,
    pub value: f64,
    pub unit: String,
    pub load_type_id: i64,
}

impl FromSqliteRow for LoadWeight {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            value: row.get("value")?,
            unit: row.get("unit")?,
            load_type_id: row.get("load_type_id")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    /// Anything other than `lbs` (case-insensitive) is treated as `kg`.
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("lbs") => WeightUnit::Lbs,
            _ => WeightUnit::Kg,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WeightsQuery {
    pub unit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoadWeightsQuery {
    pub unit: Option<String>,
    pub load_type_id: Option<i64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl LoadWeightsQuery {
    pub const DEFAULT_PAGE_SIZE: i64 = 500;
    pub const MAX_PAGE_SIZE: i64 = 2000;

    pub fn page_size(&self) -> i64 {
        self.page_size
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .clamp(1, Self::MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page.unwrap_or(1).max(1) - 1) * self.page_size()
    }
}
