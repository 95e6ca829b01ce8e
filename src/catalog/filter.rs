//! Client-side project filtering.
//!
//! `filter_projects` is the pure predicate pass; `ProjectBrowser` owns the
//! criteria for one projects page and recomputes the filtered view in full
//! whenever any criterion changes.

use serde::{Deserialize, Serialize};

use super::{Location, Project, PropertyType};

/// Highest value of the minimum-investment slider (in thousands of MAD)
pub const MIN_INVESTMENT_SLIDER_MAX: u8 = 20;

/// MAD per slider unit
pub const MIN_INVESTMENT_UNIT: u64 = 1_000;

/// Either every value or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::All, Selection::Only)
    }
}

/// The four independent filter criteria of the projects page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub location: Selection<Location>,
    pub property_type: Selection<PropertyType>,
    /// Slider position, 0..=20, in thousands of MAD
    pub min_investment: u8,
}

impl FilterCriteria {
    /// Threshold in MAD, or `None` when the slider is at zero
    pub fn min_investment_amount(&self) -> Option<u64> {
        (self.min_investment > 0).then(|| u64::from(self.min_investment) * MIN_INVESTMENT_UNIT)
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a single project satisfies every active criterion
    pub fn matches(&self, project: &Project) -> bool {
        if !self.search_term.is_empty() {
            let needle = self.search_term.to_lowercase();
            let in_title = project.title.to_lowercase().contains(&needle);
            let in_description = project.description.to_lowercase().contains(&needle);
            if !in_title && !in_description {
                return false;
            }
        }

        if !self.location.matches(&project.location) {
            return false;
        }

        if !self.property_type.matches(&project.property_type) {
            return false;
        }

        if let Some(threshold) = self.min_investment_amount() {
            // A minimum that cannot be read never clears a threshold
            match project.minimum_investment_amount() {
                Some(amount) if amount >= threshold => {}
                _ => return false,
            }
        }

        true
    }
}

/// Keep the projects matching `criteria`, preserving their order
pub fn filter_projects(criteria: &FilterCriteria, projects: &[Project]) -> Vec<Project> {
    projects
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect()
}

/// Filter state for one projects page
#[derive(Debug, Clone)]
pub struct ProjectBrowser {
    all: Vec<Project>,
    criteria: FilterCriteria,
    filtered: Vec<Project>,
    /// Number of recomputations since creation
    revision: u64,
}

impl ProjectBrowser {
    pub fn new(projects: Vec<Project>) -> Self {
        let mut browser = Self {
            filtered: Vec::new(),
            all: projects,
            criteria: FilterCriteria::default(),
            revision: 0,
        };
        browser.recompute();
        browser
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered(&self) -> &[Project] {
        &self.filtered
    }

    pub fn all(&self) -> &[Project] {
        &self.all
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.recompute();
    }

    pub fn set_location(&mut self, location: Selection<Location>) {
        self.criteria.location = location;
        self.recompute();
    }

    pub fn set_property_type(&mut self, property_type: Selection<PropertyType>) {
        self.criteria.property_type = property_type;
        self.recompute();
    }

    /// Move the slider; values above the slider maximum are clamped
    pub fn set_min_investment(&mut self, thousands: u8) {
        self.criteria.min_investment = thousands.min(MIN_INVESTMENT_SLIDER_MAX);
        self.recompute();
    }

    /// Replace all criteria at once
    pub fn apply(&mut self, mut criteria: FilterCriteria) {
        criteria.min_investment = criteria.min_investment.min(MIN_INVESTMENT_SLIDER_MAX);
        self.criteria = criteria;
        self.recompute();
    }

    /// Restore every criterion to its default with a single recomputation
    pub fn reset(&mut self) {
        self.apply(FilterCriteria::default());
    }

    fn recompute(&mut self) {
        self.filtered = filter_projects(&self.criteria, &self.all);
        self.revision += 1;
        tracing::debug!(
            revision = self.revision,
            matches = self.filtered.len(),
            total = self.all.len(),
            "Recomputed project filter"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FixtureCatalog, ProjectCatalog};

    fn fixtures() -> Vec<Project> {
        FixtureCatalog::instant().projects().to_vec()
    }

    fn titles(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_default_criteria_keep_everything_in_order() {
        let all = fixtures();
        let filtered = filter_projects(&FilterCriteria::default(), &all);
        assert_eq!(filtered, all);
    }

    #[test]
    fn test_search_is_case_insensitive_on_title() {
        let criteria = FilterCriteria {
            search_term: "mARINA".to_string(),
            ..FilterCriteria::default()
        };
        let filtered = filter_projects(&criteria, &fixtures());
        assert_eq!(titles(&filtered), vec!["Casablanca Marina Residences"]);
    }

    #[test]
    fn test_search_matches_description() {
        let criteria = FilterCriteria {
            search_term: "medina".to_string(),
            ..FilterCriteria::default()
        };
        let filtered = filter_projects(&criteria, &fixtures());
        assert_eq!(titles(&filtered), vec!["Fez Old City Renovation"]);
    }

    #[test]
    fn test_location_and_type_are_exact() {
        let criteria = FilterCriteria {
            location: Selection::Only(Location::Rabat),
            property_type: Selection::Only(PropertyType::Commercial),
            ..FilterCriteria::default()
        };
        let filtered = filter_projects(&criteria, &fixtures());
        assert_eq!(titles(&filtered), vec!["Rabat Office Tower"]);

        let criteria = FilterCriteria {
            location: Selection::Only(Location::Rabat),
            property_type: Selection::Only(PropertyType::Residential),
            ..FilterCriteria::default()
        };
        assert!(filter_projects(&criteria, &fixtures()).is_empty());
    }

    #[test]
    fn test_min_investment_threshold_is_inclusive() {
        let criteria = FilterCriteria {
            min_investment: 15,
            ..FilterCriteria::default()
        };
        let filtered = filter_projects(&criteria, &fixtures());
        assert_eq!(
            titles(&filtered),
            vec!["Agadir Beachfront Hotel", "Rabat Office Tower"]
        );
    }

    #[test]
    fn test_unreadable_minimum_fails_nonzero_threshold_only() {
        let mut all = fixtures();
        all[0].investment_minimum = "TBD".to_string();

        let open = filter_projects(&FilterCriteria::default(), &all);
        assert_eq!(open.len(), 6);

        let criteria = FilterCriteria {
            min_investment: 1,
            ..FilterCriteria::default()
        };
        let filtered = filter_projects(&criteria, &all);
        assert!(filtered.iter().all(|p| p.id != 1));
    }

    #[test]
    fn test_browser_setters_recompute_each_time() {
        let mut browser = ProjectBrowser::new(fixtures());
        assert_eq!(browser.revision(), 1);

        browser.set_property_type(Selection::Only(PropertyType::Residential));
        assert_eq!(browser.filtered().len(), 3);
        assert_eq!(browser.revision(), 2);

        browser.set_search_term("tangier");
        assert_eq!(titles(browser.filtered()), vec!["Tangier Bay Apartments"]);
        assert_eq!(browser.revision(), 3);
    }

    #[test]
    fn test_browser_clamps_slider() {
        let mut browser = ProjectBrowser::new(fixtures());
        browser.set_min_investment(200);
        assert_eq!(browser.criteria().min_investment, MIN_INVESTMENT_SLIDER_MAX);
        assert_eq!(titles(browser.filtered()), vec!["Rabat Office Tower"]);
    }

    #[test]
    fn test_reset_is_a_single_recomputation() {
        let mut browser = ProjectBrowser::new(fixtures());
        browser.set_search_term("zzz");
        browser.set_location(Selection::Only(Location::Fez));
        browser.set_property_type(Selection::Only(PropertyType::MixedUse));
        browser.set_min_investment(7);
        assert!(browser.filtered().is_empty());
        let before = browser.revision();

        browser.reset();

        assert_eq!(browser.revision(), before + 1);
        assert!(browser.criteria().is_default());
        assert_eq!(browser.filtered(), browser.all());
    }

    #[test]
    fn test_selection_from_option() {
        assert_eq!(Selection::<Location>::from(None), Selection::All);
        assert_eq!(
            Selection::from(Some(Location::Agadir)),
            Selection::Only(Location::Agadir)
        );
    }
}
