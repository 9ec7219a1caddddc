//! Filter choices offered for a set of practices

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::Practice;

/// Distinct values present in a practice set, one list per filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Newest first; non-numeric years last
    pub years: Vec<String>,
    /// In order of first appearance
    pub statuses: Vec<String>,
    pub regions: Vec<String>,
    pub populations: Vec<String>,
    pub agents: Vec<String>,
}

impl FilterOptions {
    pub fn from_practices(practices: &[Practice]) -> Self {
        let mut years: Vec<String> = distinct(practices.iter().map(|p| p.start_year.as_str()));
        years.sort_by(|a, b| compare_years_desc(a, b));

        let statuses = distinct(practices.iter().map(|p| p.current_status.as_str()));

        let mut regions = distinct(practices.iter().map(|p| p.region.as_str()));
        regions.sort();

        let populations: BTreeSet<String> = practices
            .iter()
            .flat_map(|p| p.target_population.iter())
            .map(str::to_string)
            .collect();

        let agents: BTreeSet<String> = practices
            .iter()
            .flat_map(|p| p.involved_agents.iter())
            .map(str::to_string)
            .collect();

        Self {
            years,
            statuses,
            regions,
            populations: populations.into_iter().collect(),
            agents: agents.into_iter().collect(),
        }
    }
}

/// Non-empty values, first occurrence kept
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values.filter(|v| !v.is_empty()) {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}

fn compare_years_desc(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => y.cmp(&x),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn practice(year: &str, status: &str, region: &str, population: &[&str]) -> Practice {
        Practice {
            start_year: year.to_string(),
            current_status: status.to_string(),
            region: region.to_string(),
            target_population: population.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_options_extraction() {
        let practices = vec![
            practice("2019", "Finalizado", "Galicia", &["personas_mayores"]),
            practice("2022", "En curso", "Asturias", &["cuidadores", "personas_mayores"]),
            practice("desde 2015", "Finalizado", "", &[]),
            practice("2019", "", "Asturias", &[]),
            practice("", "En pausa", "Andalucía", &[]),
        ];

        let options = FilterOptions::from_practices(&practices);

        assert_eq!(options.years, vec!["2022", "2019", "desde 2015"]);
        assert_eq!(options.statuses, vec!["Finalizado", "En curso", "En pausa"]);
        assert_eq!(options.regions, vec!["Andalucía", "Asturias", "Galicia"]);
        assert_eq!(options.populations, vec!["cuidadores", "personas_mayores"]);
        assert!(options.agents.is_empty());
    }

    #[test]
    fn test_empty_set_has_no_options() {
        assert_eq!(FilterOptions::from_practices(&[]), FilterOptions::default());
    }
}
