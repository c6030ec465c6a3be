//! Course catalog: the skill-to-course reference table and the recommender.
//!
//! Matching is deliberately loose: a case-folded bidirectional substring test
//! tolerates phrasing drift between model output and catalog rows, at the
//! price of precision for very short skill names ("R" matches most rows).
//! Known trade-off, kept as-is.

pub mod defaults;
pub mod handlers;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Maximum number of course links returned per skill.
const MAX_COURSES_PER_SKILL: usize = 2;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read the course CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
}

/// One row of the reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseEntry {
    pub skill: String,
    pub course_name: String,
    pub url: String,
    /// Carried from the CSV; the recommendation payload serves only name and
    /// url.
    #[allow(dead_code)]
    pub platform: Option<String>,
}

/// Index of each required column within a CSV header row.
struct ColumnMap {
    skill: usize,
    course: usize,
    url: usize,
    platform: Option<usize>,
}

/// Exact header names, for session uploads.
fn resolve_columns_exact(headers: &csv::StringRecord) -> Result<ColumnMap, CatalogError> {
    let position = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(CatalogError::MissingColumn(name))
    };
    Ok(ColumnMap {
        skill: position("Skill")?,
        course: position("Course Name")?,
        url: position("URL")?,
        platform: headers.iter().position(|h| h.trim() == "Platform"),
    })
}

/// Loose detection for the fixed-path file: the first header containing
/// "skill", "course" or "url" (case-insensitive) wins for each column.
fn resolve_columns_loose(headers: &csv::StringRecord) -> Result<ColumnMap, CatalogError> {
    let containing = |needle: &'static str| {
        headers
            .iter()
            .position(|h| h.to_lowercase().contains(needle))
            .ok_or(CatalogError::MissingColumn(needle))
    };
    Ok(ColumnMap {
        skill: containing("skill")?,
        course: containing("course")?,
        url: containing("url")?,
        platform: headers
            .iter()
            .position(|h| h.to_lowercase().contains("platform")),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCatalog {
    entries: Vec<CourseEntry>,
}

impl CourseCatalog {
    pub fn from_entries(entries: Vec<CourseEntry>) -> Self {
        Self { entries }
    }

    /// Parses an uploaded CSV with exact `Skill,Course Name,URL[,Platform]`
    /// headers.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_reader(bytes);
        let columns = resolve_columns_exact(reader.headers()?)?;
        Self::read_rows(&mut reader, &columns)
    }

    /// Loads the fixed-path CSV with loose column detection.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path)?;
        let columns = resolve_columns_loose(reader.headers()?)?;
        Self::read_rows(&mut reader, &columns)
    }

    /// The embedded 21-row default table.
    pub fn defaults() -> Self {
        defaults::default_catalog()
    }

    fn read_rows<R: std::io::Read>(
        reader: &mut csv::Reader<R>,
        columns: &ColumnMap,
    ) -> Result<Self, CatalogError> {
        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record?;
            let cell = |index: usize| record.get(index).unwrap_or("").trim().to_string();
            let skill = cell(columns.skill);
            if skill.is_empty() {
                // A row without a skill can never match anything.
                continue;
            }
            entries.push(CourseEntry {
                skill,
                course_name: cell(columns.course),
                url: cell(columns.url),
                platform: columns.platform.map(cell).filter(|p| !p.is_empty()),
            });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CourseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves the application-level catalog at startup.
///
/// A missing file falls back to the embedded defaults; a file that exists but
/// fails to load disables recommendations entirely until a session uploads a
/// catalog of its own.
pub fn load_app_catalog(path: &Path) -> Option<CourseCatalog> {
    if !path.exists() {
        info!(
            "No catalog file at {}; using the embedded default table",
            path.display()
        );
        return Some(CourseCatalog::defaults());
    }
    match CourseCatalog::from_path(path) {
        Ok(catalog) => {
            info!(
                "Loaded course catalog from {} ({} entries)",
                path.display(),
                catalog.len()
            );
            Some(catalog)
        }
        Err(e) => {
            warn!(
                "Failed to load course catalog from {}: {e}. Recommendations are disabled until a session uploads a catalog",
                path.display()
            );
            None
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recommender
// ────────────────────────────────────────────────────────────────────────────

/// Courses matched to one missing skill, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRecommendation {
    pub skill: String,
    pub courses: Vec<CourseLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseLink {
    pub course_name: String,
    pub url: String,
}

/// Maps each skill to at most [`MAX_COURSES_PER_SKILL`] courses.
///
/// A row matches when either lower-cased string contains the other. Courses
/// are deduplicated by name, skills with no match are omitted, and input
/// order is preserved (duplicate input skills fold into one entry).
pub fn recommend(skills: &[String], catalog: &CourseCatalog) -> Vec<SkillRecommendation> {
    let mut recommendations: Vec<SkillRecommendation> = Vec::new();
    if catalog.is_empty() {
        return recommendations;
    }

    for skill in skills {
        if recommendations.iter().any(|r| &r.skill == skill) {
            continue;
        }
        let needle = skill.to_lowercase();
        let mut courses: Vec<CourseLink> = Vec::new();
        for entry in catalog.entries() {
            let row = entry.skill.to_lowercase();
            if !(row.contains(&needle) || needle.contains(&row)) {
                continue;
            }
            if courses.iter().any(|c| c.course_name == entry.course_name) {
                continue;
            }
            courses.push(CourseLink {
                course_name: entry.course_name.clone(),
                url: entry.url.clone(),
            });
            if courses.len() == MAX_COURSES_PER_SKILL {
                break;
            }
        }
        if !courses.is_empty() {
            recommendations.push(SkillRecommendation {
                skill: skill.clone(),
                courses,
            });
        }
    }

    recommendations
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_have_all_rows() {
        let catalog = CourseCatalog::defaults();
        assert_eq!(catalog.len(), 21);
        assert!(catalog.entries().iter().any(|e| e.skill == "Docker"));
    }

    #[test]
    fn test_strict_csv_parses_exact_headers() {
        let csv = "Skill,Course Name,URL,Platform\nRust,Rust Fundamentals,https://example.com/rust,Example\n";
        let catalog = CourseCatalog::from_csv(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        let entry = &catalog.entries()[0];
        assert_eq!(entry.skill, "Rust");
        assert_eq!(entry.platform.as_deref(), Some("Example"));
    }

    #[test]
    fn test_strict_csv_rejects_missing_url_column() {
        let csv = "Skill,Course Name\nRust,Rust Fundamentals\n";
        let result = CourseCatalog::from_csv(csv.as_bytes());
        assert!(matches!(result, Err(CatalogError::MissingColumn("URL"))));
    }

    #[test]
    fn test_strict_csv_skips_rows_without_a_skill() {
        let csv = "Skill,Course Name,URL\n,Orphan Course,https://example.com\nSQL,SQL Course,https://example.com/sql\n";
        let catalog = CourseCatalog::from_csv(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].skill, "SQL");
    }

    #[test]
    fn test_loose_headers_resolve_by_substring() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Skill Name,Course Title,Course URL").unwrap();
        writeln!(file, "Kubernetes,GKE Deep Dive,https://example.com/gke").unwrap();
        let catalog = CourseCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].course_name, "GKE Deep Dive");
        assert_eq!(catalog.entries()[0].url, "https://example.com/gke");
    }

    #[test]
    fn test_loose_headers_missing_course_column_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Skill,Link").unwrap();
        writeln!(file, "Rust,https://example.com").unwrap();
        let result = CourseCatalog::from_path(file.path());
        assert!(matches!(result, Err(CatalogError::MissingColumn("course"))));
    }

    #[test]
    fn test_app_catalog_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_app_catalog(&dir.path().join("absent.csv")).unwrap();
        assert_eq!(catalog.len(), 21);
    }

    #[test]
    fn test_app_catalog_unloadable_file_disables_recommendations() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Name,Link").unwrap();
        writeln!(file, "Rust,https://example.com").unwrap();
        assert!(load_app_catalog(file.path()).is_none());
    }

    #[test]
    fn test_recommend_exact_and_substring_matches() {
        let catalog = CourseCatalog::defaults();
        let recommendations = recommend(&skills(&["Docker", "Dockerization"]), &catalog);
        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].skill, "Docker");
        assert_eq!(recommendations[0].courses[0].course_name, "Docker for Developers");
        // "dockerization" contains "docker", so the row matches in reverse too.
        assert_eq!(recommendations[1].courses[0].course_name, "Docker for Developers");
    }

    #[test]
    fn test_recommend_caps_courses_per_skill() {
        let catalog = CourseCatalog::from_entries(vec![
            CourseEntry {
                skill: "SQL".into(),
                course_name: "SQL One".into(),
                url: "https://example.com/1".into(),
                platform: None,
            },
            CourseEntry {
                skill: "SQL".into(),
                course_name: "SQL Two".into(),
                url: "https://example.com/2".into(),
                platform: None,
            },
            CourseEntry {
                skill: "SQL".into(),
                course_name: "SQL Three".into(),
                url: "https://example.com/3".into(),
                platform: None,
            },
        ]);
        let recommendations = recommend(&skills(&["SQL"]), &catalog);
        assert_eq!(recommendations[0].courses.len(), 2);
    }

    #[test]
    fn test_recommend_dedupes_by_course_name() {
        let catalog = CourseCatalog::from_entries(vec![
            CourseEntry {
                skill: "SQL".into(),
                course_name: "Same Course".into(),
                url: "https://example.com/a".into(),
                platform: None,
            },
            CourseEntry {
                skill: "SQL basics".into(),
                course_name: "Same Course".into(),
                url: "https://example.com/b".into(),
                platform: None,
            },
            CourseEntry {
                skill: "SQL advanced".into(),
                course_name: "Other Course".into(),
                url: "https://example.com/c".into(),
                platform: None,
            },
        ]);
        let recommendations = recommend(&skills(&["SQL"]), &catalog);
        let names: Vec<_> = recommendations[0]
            .courses
            .iter()
            .map(|c| c.course_name.as_str())
            .collect();
        assert_eq!(names, vec!["Same Course", "Other Course"]);
    }

    #[test]
    fn test_recommend_omits_unmatched_skills() {
        let catalog = CourseCatalog::defaults();
        let recommendations = recommend(&skills(&["Underwater Basket Weaving"]), &catalog);
        assert!(recommendations.is_empty());
    }

    #[test]
    fn test_recommend_folds_duplicate_inputs() {
        let catalog = CourseCatalog::defaults();
        let recommendations = recommend(&skills(&["Docker", "Docker"]), &catalog);
        assert_eq!(recommendations.len(), 1);
    }

    #[test]
    fn test_recommend_single_letter_matches_broadly() {
        // "r" is a substring of most skill names; the loose matcher happily
        // returns unrelated courses for it.
        let catalog = CourseCatalog::defaults();
        let recommendations = recommend(&skills(&["R"]), &catalog);
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].courses.len(), 2);
    }

    #[test]
    fn test_recommend_empty_catalog_returns_nothing() {
        let catalog = CourseCatalog::default();
        assert!(recommend(&skills(&["Docker"]), &catalog).is_empty());
    }
}
