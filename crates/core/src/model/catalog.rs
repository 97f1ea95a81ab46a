use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{ExerciseId, WorkoutId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogParseError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── CLASSIFICATION ────────────────────────────────────────────────────────────
//

/// Training category shared by workouts and exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Strength,
    Cardio,
    Flexibility,
    Sports,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Strength => "strength",
            Category::Cardio => "cardio",
            Category::Flexibility => "flexibility",
            Category::Sports => "sports",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strength" => Ok(Self::Strength),
            "cardio" => Ok(Self::Cardio),
            "flexibility" => Ok(Self::Flexibility),
            "sports" => Ok(Self::Sports),
            _ => Err(CatalogParseError::UnknownCategory(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CatalogParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(CatalogParseError::UnknownDifficulty(s.to_owned())),
        }
    }
}

//
// ─── CATALOG ENTRIES ───────────────────────────────────────────────────────────
//

/// Immutable catalog entry describing a predefined workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    pub id: WorkoutId,
    pub name: String,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Expected length in minutes.
    pub duration: u32,
    pub calories_burned: u32,
    pub description: String,
    pub exercise_ids: Vec<ExerciseId>,
}

impl WorkoutTemplate {
    /// Returns true if the template lists the given exercise.
    #[must_use]
    pub fn includes_exercise(&self, id: &ExerciseId) -> bool {
        self.exercise_ids.iter().any(|candidate| candidate == id)
    }
}

/// A single exercise definition from the catalog.
///
/// `duration` and `calories_burned` are optional; estimators fall back to
/// per-exercise defaults when they are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub category: Category,
    pub description: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub calories_burned: Option<u32>,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

//
// ─── FILTERING ─────────────────────────────────────────────────────────────────
//

/// Dashboard search criteria. `None` means "all" for the enum filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutFilter {
    pub query: String,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
}

impl WorkoutFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Parses a category selector where `"all"` clears the filter.
    ///
    /// # Errors
    ///
    /// Returns `CatalogParseError::UnknownCategory` for unrecognised values.
    pub fn parse_category(raw: &str) -> Result<Option<Category>, CatalogParseError> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        raw.parse().map(Some)
    }

    /// Parses a difficulty selector where `"all"` clears the filter.
    ///
    /// # Errors
    ///
    /// Returns `CatalogParseError::UnknownDifficulty` for unrecognised values.
    pub fn parse_difficulty(raw: &str) -> Result<Option<Difficulty>, CatalogParseError> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        raw.parse().map(Some)
    }

    /// Case-insensitive substring match on name or description, then exact
    /// category and difficulty matches when those filters are set.
    #[must_use]
    pub fn matches(&self, workout: &WorkoutTemplate) -> bool {
        let query = self.query.to_lowercase();
        let matches_search = workout.name.to_lowercase().contains(&query)
            || workout.description.to_lowercase().contains(&query);
        let matches_category = self.category.is_none_or(|c| c == workout.category);
        let matches_difficulty = self.difficulty.is_none_or(|d| d == workout.difficulty);
        matches_search && matches_category && matches_difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, description: &str, category: Category) -> WorkoutTemplate {
        WorkoutTemplate {
            id: WorkoutId::new("1"),
            name: name.to_owned(),
            category,
            difficulty: Difficulty::Beginner,
            duration: 30,
            calories_burned: 200,
            description: description.to_owned(),
            exercise_ids: vec![ExerciseId::new("ex-1")],
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let workout = template("Leg Day", "Squats and lunges", Category::Strength);
        assert!(WorkoutFilter::new().matches(&workout));
    }

    #[test]
    fn query_matches_name_or_description_case_insensitively() {
        let workout = template("Leg Day", "Squats and lunges", Category::Strength);
        assert!(WorkoutFilter::new().with_query("LEG").matches(&workout));
        assert!(WorkoutFilter::new().with_query("lunges").matches(&workout));
        assert!(!WorkoutFilter::new().with_query("yoga").matches(&workout));
    }

    #[test]
    fn category_and_difficulty_narrow_results() {
        let workout = template("Morning Run", "Easy jog", Category::Cardio);
        let cardio = WorkoutFilter::new().with_category(Some(Category::Cardio));
        let strength = WorkoutFilter::new().with_category(Some(Category::Strength));
        assert!(cardio.matches(&workout));
        assert!(!strength.matches(&workout));

        let advanced = WorkoutFilter::new().with_difficulty(Some(Difficulty::Advanced));
        assert!(!advanced.matches(&workout));
    }

    #[test]
    fn all_selector_clears_filter() {
        assert_eq!(WorkoutFilter::parse_category("all").unwrap(), None);
        assert_eq!(
            WorkoutFilter::parse_difficulty("Advanced").unwrap(),
            Some(Difficulty::Advanced)
        );
        assert!(WorkoutFilter::parse_category("swimming").is_err());
    }

    #[test]
    fn exercise_optional_fields_default_when_missing() {
        let json = r#"{"id":"ex-9","name":"Plank","category":"strength","description":"Hold"}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.duration, None);
        assert!(exercise.target_muscles.is_empty());
    }
}
