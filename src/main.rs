use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use estate_rise::app::App;
use estate_rise::calculator::{format_mad, ReturnCalculator};
use estate_rise::catalog::{
    FilterCriteria, FixtureCatalog, Location, ProjectBrowser, ProjectCatalog, PropertyType,
    Selection,
};
use estate_rise::config::Config;
use estate_rise::logging;
use estate_rise::routes::Route;

#[derive(Parser)]
#[command(name = "estate-rise")]
#[command(about = "Terminal client for the Moroccan Real Estate Rise crowdfunding platform")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Page to open the TUI on (e.g. /projects, /projects/1, /kyc)
    #[arg(short, long, default_value = "/")]
    route: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects matching the given filters
    Projects {
        /// Case-insensitive text matched against title and description
        #[arg(short, long)]
        search: Option<String>,

        /// City (Casablanca, Marrakech, Tangier, Rabat, Fez, Agadir)
        #[arg(short, long)]
        location: Option<String>,

        /// Property type (Residential, Commercial, Mixed-Use)
        #[arg(short = 't', long = "type")]
        property_type: Option<String>,

        /// Minimum investment threshold in thousands of MAD (0-20)
        #[arg(short, long, default_value_t = 0)]
        min_investment: u8,
    },

    /// Show a project's details and projected returns
    Project {
        /// Project id
        id: u32,

        /// Amount to invest, in MAD
        #[arg(short, long)]
        amount: Option<u64>,
    },

    /// List every page with its window title
    Routes,

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Projects {
            search,
            location,
            property_type,
            min_investment,
        }) => {
            cmd_projects(search, location, property_type, min_investment)?;
        }
        Some(Commands::Project { id, amount }) => {
            cmd_project(&config, id, amount).await?;
        }
        Some(Commands::Routes) => {
            cmd_routes(&config);
        }
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
        }
        None => {
            // No subcommand = launch TUI
            run_tui(config, &cli.route, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, start: &str, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config, Route::resolve(start));
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn parse_selection<T>(
    value: Option<String>,
    parse: impl Fn(&str) -> Option<T>,
    what: &str,
) -> Result<Selection<T>> {
    match value.as_deref() {
        None => Ok(Selection::All),
        Some(label) if label.eq_ignore_ascii_case("all") => Ok(Selection::All),
        Some(label) => parse(label)
            .map(Selection::Only)
            .ok_or_else(|| anyhow!("unknown {what}: {label}")),
    }
}

fn cmd_projects(
    search: Option<String>,
    location: Option<String>,
    property_type: Option<String>,
    min_investment: u8,
) -> Result<()> {
    let criteria = FilterCriteria {
        search_term: search.unwrap_or_default(),
        location: parse_selection(location, Location::from_label, "location")?,
        property_type: parse_selection(property_type, PropertyType::from_label, "property type")?,
        min_investment,
    };

    let catalog = FixtureCatalog::instant();
    let mut browser = ProjectBrowser::new(catalog.projects().to_vec());
    browser.apply(criteria);
    let projects = browser.filtered();

    if projects.is_empty() {
        println!("No projects match your filters");
        return Ok(());
    }

    println!("Projects ({} of {})", projects.len(), browser.all().len());
    println!("{}", "─".repeat(60));
    for project in projects {
        println!(
            "{:>2}  {:<32} {:<11} {:<12} min {:<11} {}",
            project.id,
            project.title,
            project.location.label(),
            project.property_type.label(),
            project.investment_minimum,
            project.expected_return
        );
    }

    Ok(())
}

async fn cmd_project(config: &Config, id: u32, amount: Option<u64>) -> Result<()> {
    let catalog = FixtureCatalog::new(config.submission.detail_delay());
    let detail = catalog
        .find(id)
        .await
        .with_context(|| format!("failed to look up project {id}"))?;

    let Some(detail) = detail else {
        println!("Project Not Found");
        println!("The project you're looking for doesn't exist or has been removed.");
        return Ok(());
    };

    let project = &detail.project;
    println!("{}", project.title);
    println!("{}", "─".repeat(60));
    println!("{} · {}", project.location, project.property_type);
    println!(
        "{}% funded · {} investors",
        project.funded, detail.investor_count
    );
    println!("Investment Goal:    {}", project.investment_goal);
    println!("Minimum Investment: {}", project.investment_minimum);
    println!("Expected Return:    {}", project.expected_return);
    println!();
    println!("{}", detail.overview);

    let calculator = ReturnCalculator::new(&config.calculator);
    let estimate = calculator.estimate(amount.unwrap_or(config.calculator.default_amount));
    println!();
    println!("Investment Calculator");
    println!("Amount:                  {}", format_mad(estimate.amount as f64));
    println!("Potential Annual Return: {}", format_mad(estimate.annual));
    println!(
        "Total Return ({} years):  {}",
        calculator.years(),
        format_mad(estimate.total)
    );

    Ok(())
}

fn cmd_routes(config: &Config) {
    for route in Route::table() {
        println!(
            "{:<18} {}",
            route.path(),
            route.title(&config.ui.site_name, None)
        );
    }
}
