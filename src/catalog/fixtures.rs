//! Built-in project records

use super::{
    Location, Project, ProjectDetail, ProjectDocument, PropertyType, ReturnProjection,
};

#[allow(clippy::too_many_arguments)]
fn project(
    id: u32,
    title: &str,
    location: Location,
    property_type: PropertyType,
    image: &str,
    investment_goal: &str,
    investment_minimum: &str,
    expected_return: &str,
    funded: u8,
    description: &str,
) -> Project {
    Project {
        id,
        title: title.to_string(),
        location,
        property_type,
        image: image.to_string(),
        investment_goal: investment_goal.to_string(),
        investment_minimum: investment_minimum.to_string(),
        expected_return: expected_return.to_string(),
        funded,
        description: description.to_string(),
    }
}

pub(super) fn projects() -> Vec<Project> {
    vec![
        project(
            1,
            "Casablanca Marina Residences",
            Location::Casablanca,
            PropertyType::Residential,
            "https://images.unsplash.com/photo-1460317442991-0ec209397118?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            "10,000,000 MAD",
            "5,000 MAD",
            "8-10% annually",
            65,
            "Luxury apartment complex in Casablanca's prestigious marina district with sea views and premium amenities.",
        ),
        project(
            2,
            "Marrakech Palm Grove Villas",
            Location::Marrakech,
            PropertyType::Residential,
            "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            "15,000,000 MAD",
            "10,000 MAD",
            "9-12% annually",
            42,
            "Exclusive villa development in Marrakech's iconic Palm Grove, featuring traditional architecture with modern amenities.",
        ),
        project(
            3,
            "Tangier Bay Apartments",
            Location::Tangier,
            PropertyType::Residential,
            "https://images.unsplash.com/photo-1613490493576-7fde63acd811?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            "8,000,000 MAD",
            "2,500 MAD",
            "7-9% annually",
            78,
            "Modern apartments with Mediterranean views in Tangier's rapidly developing bay area.",
        ),
        project(
            4,
            "Agadir Beachfront Hotel",
            Location::Agadir,
            PropertyType::Commercial,
            "https://images.unsplash.com/photo-1566073771259-6a8506099945?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            "25,000,000 MAD",
            "15,000 MAD",
            "10-12% annually",
            35,
            "Boutique hotel development on Agadir's beautiful beach, catering to the growing tourism sector.",
        ),
        project(
            5,
            "Rabat Office Tower",
            Location::Rabat,
            PropertyType::Commercial,
            "https://images.unsplash.com/photo-1567359781514-3b964e2b04d6?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            "30,000,000 MAD",
            "20,000 MAD",
            "8-11% annually",
            22,
            "Modern office space in Rabat's business district, featuring sustainable design and smart building technology.",
        ),
        project(
            6,
            "Fez Old City Renovation",
            Location::Fez,
            PropertyType::MixedUse,
            "https://images.unsplash.com/photo-1512958789103-b34e87b8cd4a?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
            "12,000,000 MAD",
            "5,000 MAD",
            "9-11% annually",
            58,
            "Restoration project converting historic buildings in Fez Medina into boutique accommodations and shops.",
        ),
    ]
}

fn rows(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Only the marina project has a full dossier; other ids are unknown to
/// the detail lookup.
pub(super) fn details() -> Vec<ProjectDetail> {
    let marina = projects().remove(0);

    vec![ProjectDetail {
        project: marina,
        images: vec![
            "https://images.unsplash.com/photo-1460317442991-0ec209397118?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80".to_string(),
            "https://images.unsplash.com/photo-1569152811536-fb47aced8409?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80".to_string(),
            "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80".to_string(),
        ],
        investor_count: 124,
        overview: "The Casablanca Marina Residences is a premier residential development located in Casablanca's prestigious marina district. The complex offers luxury apartments with stunning sea views and modern amenities, providing an exceptional living experience in Morocco's economic capital.".to_string(),
        details: rows(&[
            ("Location", "Casablanca Marina, Boulevard Mohammed V"),
            ("Area", "20,000 m²"),
            ("Units", "120 apartments"),
            ("Completion", "Q3 2026"),
            ("Developer", "Morocco Elite Properties"),
            (
                "Legal Structure",
                "OPCI (Organisme de Placement Collectif Immobilier)",
            ),
            (
                "Risks",
                "Market fluctuations, construction delays, regulatory changes",
            ),
            (
                "Exit Strategy",
                "Property sale upon completion with profit distribution to investors",
            ),
        ]),
        financials: rows(&[
            ("Total Investment", "10,000,000 MAD"),
            ("Equity", "7,000,000 MAD"),
            ("Debt", "3,000,000 MAD"),
            ("Estimated Returns", "8-10% annually"),
            ("Projected Appreciation", "12% over 3 years"),
            ("Holding Period", "3 years"),
            (
                "Distributions",
                "Quarterly rental income + capital appreciation at exit",
            ),
        ]),
        projections: [8.0, 9.0, 10.0, 9.5, 9.0]
            .iter()
            .enumerate()
            .map(|(i, returns)| ReturnProjection {
                year: format!("Year {}", i + 1),
                returns: *returns,
            })
            .collect(),
        documents: [
            ("Investment Prospectus", "PDF"),
            ("Legal Structure", "PDF"),
            ("Financial Projections", "Excel"),
            ("Developer Track Record", "PDF"),
            ("Property Title", "PDF"),
        ]
        .iter()
        .map(|(name, kind)| ProjectDocument {
            name: (*name).to_string(),
            kind: (*kind).to_string(),
        })
        .collect(),
    }]
}
