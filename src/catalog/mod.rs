//! Project catalog: the read-only project records and the lookup seam
//! that stands in for a remote catalog service.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod filter;
mod fixtures;

pub use filter::{
    filter_projects, FilterCriteria, ProjectBrowser, Selection, MIN_INVESTMENT_SLIDER_MAX,
    MIN_INVESTMENT_UNIT,
};

/// Cities where projects are located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Casablanca,
    Marrakech,
    Tangier,
    Rabat,
    Fez,
    Agadir,
}

impl Location {
    /// All locations in the order the location picker lists them
    pub fn all() -> &'static [Location] {
        &[
            Location::Casablanca,
            Location::Marrakech,
            Location::Tangier,
            Location::Rabat,
            Location::Fez,
            Location::Agadir,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Location::Casablanca => "Casablanca",
            Location::Marrakech => "Marrakech",
            Location::Tangier => "Tangier",
            Location::Rabat => "Rabat",
            Location::Fez => "Fez",
            Location::Agadir => "Agadir",
        }
    }

    /// Parse from a label, ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|l| l.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of property a project develops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Residential,
    Commercial,
    #[serde(rename = "Mixed-Use")]
    MixedUse,
}

impl PropertyType {
    pub fn all() -> &'static [PropertyType] {
        &[
            PropertyType::Residential,
            PropertyType::Commercial,
            PropertyType::MixedUse,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Residential => "Residential",
            PropertyType::Commercial => "Commercial",
            PropertyType::MixedUse => "Mixed-Use",
        }
    }

    /// Parse from a label, ignoring case; accepts "mixed-use" and "mixed_use"
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(&normalized))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A crowdfunded real-estate project as listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub location: Location,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub image: String,
    /// Display string, e.g. "10,000,000 MAD"
    pub investment_goal: String,
    /// Display string, e.g. "5,000 MAD"
    pub investment_minimum: String,
    /// Display string, e.g. "8-10% annually"
    pub expected_return: String,
    /// Funded percentage, 0-100
    pub funded: u8,
    pub description: String,
}

impl Project {
    /// Minimum investment in MAD, read from the display string by keeping
    /// only its digits. `None` when the string carries no digits.
    pub fn minimum_investment_amount(&self) -> Option<u64> {
        let digits: String = self
            .investment_minimum
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }
}

/// One point of the return projection chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnProjection {
    pub year: String,
    /// Projected return in percent
    pub returns: f64,
}

/// A downloadable project document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub name: String,
    pub kind: String,
}

/// Full project record shown on the detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub images: Vec<String>,
    pub investor_count: u32,
    /// Long-form description, replaces the listing blurb on the detail page
    pub overview: String,
    /// Ordered (label, value) rows for the "Project Details" tab
    pub details: Vec<(String, String)>,
    /// Ordered (label, value) rows for the "Financials" tab
    pub financials: Vec<(String, String)>,
    pub projections: Vec<ReturnProjection>,
    pub documents: Vec<ProjectDocument>,
}

impl ProjectDetail {
    /// Timeline phases shown for every project
    pub const TIMELINE: &'static [&'static str] = &[
        "Land Acquisition",
        "Planning Approval",
        "Construction Start",
        "Construction Mid-Point",
        "Completion & Handover",
    ];
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog service {service} is unavailable: {message}")]
    Unavailable { service: String, message: String },
}

/// Source of project records.
///
/// The fixture implementation answers from memory; a remote catalog
/// service would implement the same trait.
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    /// All listed projects, in catalog order
    fn projects(&self) -> &[Project];

    /// Look up a project's full record. `Ok(None)` when the id is unknown.
    async fn find(&self, id: u32) -> Result<Option<ProjectDetail>, CatalogError>;

    /// The first `count` projects, used for the home page
    fn featured(&self, count: usize) -> &[Project] {
        let projects = self.projects();
        &projects[..count.min(projects.len())]
    }
}

/// In-memory catalog backed by the built-in fixtures
pub struct FixtureCatalog {
    projects: Vec<Project>,
    details: Vec<ProjectDetail>,
    lookup_delay: Duration,
}

impl FixtureCatalog {
    pub fn new(lookup_delay: Duration) -> Self {
        Self {
            projects: fixtures::projects(),
            details: fixtures::details(),
            lookup_delay,
        }
    }

    /// Catalog without the simulated lookup latency
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl ProjectCatalog for FixtureCatalog {
    fn projects(&self) -> &[Project] {
        &self.projects
    }

    async fn find(&self, id: u32) -> Result<Option<ProjectDetail>, CatalogError> {
        if !self.lookup_delay.is_zero() {
            tokio::time::sleep(self.lookup_delay).await;
        }
        let found = self.details.iter().find(|d| d.project.id == id).cloned();
        tracing::debug!(project_id = id, found = found.is_some(), "Project lookup");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_catalog_has_six_projects_in_id_order() {
        let catalog = FixtureCatalog::instant();
        let ids: Vec<u32> = catalog.projects().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_minimum_investment_amount_strips_formatting() {
        let catalog = FixtureCatalog::instant();
        let amounts: Vec<Option<u64>> = catalog
            .projects()
            .iter()
            .map(Project::minimum_investment_amount)
            .collect();
        assert_eq!(
            amounts,
            vec![
                Some(5_000),
                Some(10_000),
                Some(2_500),
                Some(15_000),
                Some(20_000),
                Some(5_000)
            ]
        );
    }

    #[test]
    fn test_minimum_investment_amount_without_digits() {
        let mut project = FixtureCatalog::instant().projects()[0].clone();
        project.investment_minimum = "on request".to_string();
        assert_eq!(project.minimum_investment_amount(), None);
    }

    #[test]
    fn test_featured_is_clamped_to_catalog_size() {
        let catalog = FixtureCatalog::instant();
        assert_eq!(catalog.featured(3).len(), 3);
        assert_eq!(catalog.featured(3)[0].title, "Casablanca Marina Residences");
        assert_eq!(catalog.featured(50).len(), 6);
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(Location::from_label("fez"), Some(Location::Fez));
        assert_eq!(Location::from_label("Paris"), None);
        assert_eq!(
            PropertyType::from_label("mixed_use"),
            Some(PropertyType::MixedUse)
        );
        assert_eq!(
            PropertyType::from_label("Mixed-Use"),
            Some(PropertyType::MixedUse)
        );
    }

    #[test]
    fn test_project_serializes_type_field() {
        let catalog = FixtureCatalog::instant();
        let project = &catalog.projects()[5];
        let json = serde_json::to_string(project).unwrap();
        assert!(json.contains("\"type\":\"Mixed-Use\""));
    }

    #[tokio::test]
    async fn test_find_known_and_unknown_ids() {
        let catalog = FixtureCatalog::instant();

        let detail = catalog.find(1).await.unwrap().expect("project 1 has a dossier");
        assert_eq!(detail.project.title, "Casablanca Marina Residences");
        assert_eq!(detail.investor_count, 124);
        assert_eq!(detail.projections.len(), 5);

        assert!(catalog.find(42).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_find_waits_for_lookup_delay() {
        let catalog = FixtureCatalog::new(Duration::from_millis(500));
        let started = tokio::time::Instant::now();
        catalog.find(1).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
