use serde::Serialize;

/// A project that sells carbon offsets at a fixed price per tonne of CO2.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffsetProject {
    pub id: &'static str,
    pub name: &'static str,
    pub price_per_ton: f64,
    pub certification: &'static str,
    pub location: &'static str,
}

const PROJECTS: [OffsetProject; 4] = [
    OffsetProject {
        id: "trees",
        name: "Rainforest Restoration",
        price_per_ton: 15.0,
        certification: "Gold Standard Verified",
        location: "Brazil, Colombia",
    },
    OffsetProject {
        id: "solar",
        name: "Solar Farm Development",
        price_per_ton: 12.0,
        certification: "VCS Verified",
        location: "India, Kenya",
    },
    OffsetProject {
        id: "wind",
        name: "Wind Energy Projects",
        price_per_ton: 18.0,
        certification: "CDM Verified",
        location: "Denmark, Scotland",
    },
    OffsetProject {
        id: "ocean",
        name: "Ocean Conservation",
        price_per_ton: 20.0,
        certification: "Blue Carbon Verified",
        location: "Maldives, Philippines",
    },
];

/// The offset catalog, in display order
pub fn projects() -> &'static [OffsetProject] {
    &PROJECTS
}

/// Look up a project by id (case-insensitive)
pub fn find_project(id: &str) -> Option<&'static OffsetProject> {
    let id = id.trim();
    PROJECTS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// Price of offsetting `tonnes` of CO2 with `project`. No project costs nothing.
pub fn offset_cost(tonnes: f64, project: Option<&OffsetProject>) -> f64 {
    match project {
        Some(p) => tonnes * p.price_per_ton,
        None => 0.0,
    }
}

pub fn kg_to_tonnes(kg: f64) -> f64 {
    kg / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog() {
        let ids: Vec<_> = projects().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["trees", "solar", "wind", "ocean"]);
    }

    #[test]
    fn test_find_project() {
        assert_eq!(find_project("Wind").unwrap().price_per_ton, 18.0);
        assert!(find_project("coal").is_none());
    }

    #[test]
    fn test_offset_cost() {
        let trees = find_project("trees");
        assert_eq!(offset_cost(10.0, trees), 150.0);
        assert_eq!(offset_cost(10.0, None), 0.0);
        assert_eq!(offset_cost(0.0, find_project("ocean")), 0.0);
    }

    #[test]
    fn test_kg_to_tonnes() {
        assert_eq!(kg_to_tonnes(2500.0), 2.5);
    }
}
