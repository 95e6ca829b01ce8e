//! Navigation table: paths, screens and window titles.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no page at {0}")]
    NotFound(String),

    #[error("invalid project id {0:?}")]
    InvalidProjectId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
    ProjectDetail(u32),
    Kyc,
    Register,
    Login,
    HowItWorks,
    About,
    Team,
    Contact,
    Faq,
    Blog,
    Investors,
    Developers,
    Terms,
    Privacy,
    Regulatory,
    RiskDisclosure,
    NotFound(String),
}

/// Fixed-path routes with their page names
const STATIC_ROUTES: &[(&str, Route, &str)] = &[
    ("/", Route::Home, "Home"),
    ("/projects", Route::Projects, "Browse Investment Projects"),
    ("/kyc", Route::Kyc, "KYC Verification"),
    ("/register", Route::Register, "Create Your Account"),
    ("/login", Route::Login, "Login"),
    ("/how-it-works", Route::HowItWorks, "How It Works"),
    ("/about", Route::About, "About Us"),
    ("/team", Route::Team, "Our Team"),
    ("/contact", Route::Contact, "Contact Us"),
    ("/faq", Route::Faq, "FAQ"),
    ("/blog", Route::Blog, "Blog"),
    ("/investors", Route::Investors, "For Investors"),
    ("/developers", Route::Developers, "For Developers"),
    ("/terms", Route::Terms, "Terms of Service"),
    ("/privacy", Route::Privacy, "Privacy Policy"),
    ("/regulatory", Route::Regulatory, "Regulatory Information"),
    ("/risk-disclosure", Route::RiskDisclosure, "Risk Disclosure"),
];

impl Route {
    /// Parse a path. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Result<Route, RouteError> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        if let Some((_, route, _)) = STATIC_ROUTES.iter().find(|(p, _, _)| *p == normalized) {
            return Ok(route.clone());
        }

        if let Some(id) = normalized.strip_prefix("/projects/") {
            if id.contains('/') {
                return Err(RouteError::NotFound(trimmed.to_string()));
            }
            return id
                .parse()
                .map(Route::ProjectDetail)
                .map_err(|_| RouteError::InvalidProjectId(id.to_string()));
        }

        Err(RouteError::NotFound(trimmed.to_string()))
    }

    /// Like `parse`, but every unknown path becomes the not-found page
    pub fn resolve(path: &str) -> Route {
        Self::parse(path).unwrap_or_else(|e| {
            tracing::debug!(path, error = %e, "Unresolved route");
            Route::NotFound(path.to_string())
        })
    }

    pub fn path(&self) -> String {
        match self {
            Route::ProjectDetail(id) => format!("/projects/{id}"),
            Route::NotFound(path) => path.clone(),
            other => STATIC_ROUTES
                .iter()
                .find(|(_, r, _)| r == other)
                .map(|(p, _, _)| (*p).to_string())
                .unwrap_or_default(),
        }
    }

    /// Page name used in titles and headings
    pub fn page_name(&self) -> &'static str {
        match self {
            Route::ProjectDetail(_) => "Project Details",
            Route::NotFound(_) => "Page Not Found",
            other => STATIC_ROUTES
                .iter()
                .find(|(_, r, _)| r == other)
                .map(|(_, _, name)| *name)
                .unwrap_or("Page Not Found"),
        }
    }

    /// Window title. `project_title` replaces the generic detail name
    /// once the project has loaded.
    pub fn title(&self, site_name: &str, project_title: Option<&str>) -> String {
        match (self, project_title) {
            (Route::Home, _) => format!("{site_name} - Real Estate Crowdfunding Platform"),
            (Route::ProjectDetail(_), Some(title)) => format!("{title} | {site_name}"),
            _ => format!("{} | {site_name}", self.page_name()),
        }
    }

    /// Pages that only show a heading and placeholder text
    pub fn is_informational(&self) -> bool {
        !matches!(
            self,
            Route::Home
                | Route::Projects
                | Route::ProjectDetail(_)
                | Route::Kyc
                | Route::Register
        )
    }

    /// Every navigable route, in menu order
    pub fn table() -> Vec<Route> {
        let mut routes: Vec<Route> = STATIC_ROUTES.iter().map(|(_, r, _)| r.clone()).collect();
        routes.insert(2, Route::ProjectDetail(1));
        routes
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
