use thiserror::Error;

use crate::data::model::{Alternative, City};

/// A referenced city, department, or per-city entry does not exist.
///
/// For a validated dataset none of these fire; they signal malformed data and
/// abort the computation instead of substituting a default, which would
/// misrepresent budget figures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no city named {0}")]
    UnknownCity(String),
    #[error("{alternative} has no entry for {city}")]
    CityDataMissing { alternative: String, city: String },
    #[error("{city} has no {dept} department")]
    UnknownDepartment { city: String, dept: String },
    #[error("no city or national unit cost for {alternative} in {city}")]
    UnitCostMissing { alternative: String, city: String },
    #[error("cannot take a percentage of a zero total")]
    ZeroDenominator,
}

/// Cost of one unit of an alternative in the given city: the national figure
/// when one exists, otherwise the city-specific one.
pub fn unit_cost(alt: &Alternative, city_name: &str) -> Result<u64, LookupError> {
    if let Some(cost) = alt.national_unit_cost {
        return Ok(cost);
    }
    alt.city_entry(city_name)
        .ok_or_else(|| LookupError::CityDataMissing {
            alternative: alt.name.clone(),
            city: city_name.to_string(),
        })?
        .unit_cost
        .ok_or_else(|| LookupError::UnitCostMissing {
            alternative: alt.name.clone(),
            city: city_name.to_string(),
        })
}

/// Name of the department associated with an alternative in the given city
pub fn department_name<'a>(alt: &'a Alternative, city_name: &str) -> Result<&'a str, LookupError> {
    alt.city_entry(city_name)
        .map(|entry| entry.dept.as_str())
        .ok_or_else(|| LookupError::CityDataMissing {
            alternative: alt.name.clone(),
            city: city_name.to_string(),
        })
}

/// Budget of the department associated with an alternative in the given city
pub fn department_budget(
    alt: &Alternative,
    city_name: &str,
    cities: &[City],
) -> Result<u64, LookupError> {
    let city = cities
        .iter()
        .find(|c| c.name == city_name)
        .ok_or_else(|| LookupError::UnknownCity(city_name.to_string()))?;
    let dept_name = department_name(alt, city_name)?;
    city.department(dept_name)
        .map(|d| d.budget)
        .ok_or_else(|| LookupError::UnknownDepartment {
            city: city_name.to_string(),
            dept: dept_name.to_string(),
        })
}

/// Percentage `part` represents of `whole`, rounded half away from zero
pub fn percent_of(part: u64, whole: u64) -> Result<u32, LookupError> {
    if whole == 0 {
        return Err(LookupError::ZeroDenominator);
    }
    Ok((part as f64 / whole as f64 * 100.0).round() as u32)
}

/// How many units of the alternative half of the city's police budget buys
pub fn affordable_units(city: &City, alt: &Alternative) -> Result<u64, LookupError> {
    let cost = unit_cost(alt, &city.name)?;
    // Zero unit costs are rejected at dataset load; this is not a runtime case
    debug_assert!(cost > 0);
    Ok(((city.police_budget as f64 / 2.0) / cost as f64).round() as u64)
}

/// Everything the comparison views need for one (city, alternative) pair,
/// computed in one pass so a lookup failure surfaces before partial rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub police_budget: u64,
    pub police_percent: u32,
    pub department: String,
    pub department_budget: u64,
    pub department_percent: u32,
    pub affordable_units: u64,
}

impl Comparison {
    /// Share of the general fund held by neither the police nor the
    /// alternative's department; the three slices sum to 100.
    pub fn remainder_percent(&self) -> u32 {
        100u32
            .saturating_sub(self.police_percent)
            .saturating_sub(self.department_percent)
    }
}

pub fn compare(
    city: &City,
    alt: &Alternative,
    cities: &[City],
) -> Result<Comparison, LookupError> {
    let dept_budget = department_budget(alt, &city.name, cities)?;
    Ok(Comparison {
        police_budget: city.police_budget,
        police_percent: percent_of(city.police_budget, city.general_fund)?,
        department: department_name(alt, &city.name)?.to_string(),
        department_budget: dept_budget,
        department_percent: percent_of(dept_budget, city.general_fund)?,
        affordable_units: affordable_units(city, alt)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CityData, Department};

    fn oakland() -> City {
        City {
            name: "Oakland".to_string(),
            state: "CA".to_string(),
            general_fund: 655127232,
            police_budget: 301809379,
            links: Vec::new(),
            notes: Vec::new(),
            departments: vec![Department {
                name: "Parks and Recreation".to_string(),
                budget: 18558125,
            }],
        }
    }

    fn playgrounds() -> Alternative {
        Alternative {
            name: "new playgrounds".to_string(),
            salary: false,
            national_unit_cost: None,
            city_data: vec![CityData {
                name: "Oakland".to_string(),
                dept: "Parks and Recreation".to_string(),
                unit_cost: Some(105000),
            }],
            notes: Vec::new(),
            links: Vec::new(),
        }
    }

    fn scholarships() -> Alternative {
        Alternative {
            name: "4-year scholarships".to_string(),
            salary: false,
            national_unit_cost: Some(38400),
            city_data: vec![CityData {
                name: "Oakland".to_string(),
                dept: "Parks and Recreation".to_string(),
                unit_cost: None,
            }],
            notes: Vec::new(),
            links: Vec::new(),
        }
    }

    #[test]
    fn unit_cost_prefers_national_figure() {
        assert_eq!(unit_cost(&scholarships(), "Oakland").unwrap(), 38400);
    }

    #[test]
    fn unit_cost_falls_back_to_city_figure() {
        assert_eq!(unit_cost(&playgrounds(), "Oakland").unwrap(), 105000);
    }

    #[test]
    fn unit_cost_errors_when_both_sources_absent() {
        let mut alt = playgrounds();
        alt.city_data[0].unit_cost = None;
        let err = unit_cost(&alt, "Oakland").unwrap_err();
        assert!(matches!(err, LookupError::UnitCostMissing { .. }));
    }

    #[test]
    fn unit_cost_errors_for_unlisted_city() {
        let err = unit_cost(&playgrounds(), "Gotham").unwrap_err();
        assert!(matches!(err, LookupError::CityDataMissing { .. }));
    }

    #[test]
    fn department_budget_resolves_through_city_entry() {
        let cities = vec![oakland()];
        let budget = department_budget(&playgrounds(), "Oakland", &cities).unwrap();
        assert_eq!(budget, 18558125);
    }

    #[test]
    fn department_budget_errors_for_unknown_city() {
        let cities = vec![oakland()];
        let err = department_budget(&playgrounds(), "Gotham", &cities).unwrap_err();
        assert_eq!(err, LookupError::UnknownCity("Gotham".to_string()));
    }

    #[test]
    fn department_budget_errors_for_dangling_department() {
        let mut alt = playgrounds();
        alt.city_data[0].dept = "Aquatics".to_string();
        let cities = vec![oakland()];
        let err = department_budget(&alt, "Oakland", &cities).unwrap_err();
        assert!(matches!(err, LookupError::UnknownDepartment { .. }));
    }

    #[test]
    fn department_name_reads_the_join_record() {
        assert_eq!(
            department_name(&playgrounds(), "Oakland").unwrap(),
            "Parks and Recreation"
        );
    }

    #[test]
    fn percent_of_rounds_half_away_from_zero() {
        assert_eq!(percent_of(1, 8).unwrap(), 13); // 12.5 -> 13
        assert_eq!(percent_of(301809379, 655127232).unwrap(), 46);
        assert_eq!(percent_of(18558125, 655127232).unwrap(), 3);
        assert_eq!(percent_of(0, 100).unwrap(), 0);
        assert_eq!(percent_of(100, 100).unwrap(), 100);
    }

    #[test]
    fn percent_of_rejects_zero_whole() {
        assert_eq!(percent_of(5, 0).unwrap_err(), LookupError::ZeroDenominator);
    }

    #[test]
    fn percent_of_is_monotonic_in_part() {
        let whole = 655127232;
        let mut last = 0;
        for part in (0..=whole).step_by(7919 * 1000) {
            let pct = percent_of(part, whole).unwrap();
            assert!(pct >= last, "percent dropped at part={}", part);
            last = pct;
        }
    }

    #[test]
    fn affordable_units_halves_the_police_budget() {
        // 301809379 / 2 = 150904689.5; / 105000 = 1437.19 -> 1437
        let units = affordable_units(&oakland(), &playgrounds()).unwrap();
        assert_eq!(units, 1437);
    }

    #[test]
    fn compare_assembles_all_figures() {
        let cities = vec![oakland()];
        let cmp = compare(&oakland(), &playgrounds(), &cities).unwrap();
        assert_eq!(cmp.police_percent, 46);
        assert_eq!(cmp.department, "Parks and Recreation");
        assert_eq!(cmp.department_percent, 3);
        assert_eq!(cmp.affordable_units, 1437);
        assert_eq!(cmp.remainder_percent(), 51);
    }

    #[test]
    fn compare_propagates_lookup_failures() {
        let cities = vec![oakland()];
        let mut alt = playgrounds();
        alt.city_data.clear();
        assert!(compare(&oakland(), &alt, &cities).is_err());
    }

    #[test]
    fn lookups_never_fail_on_the_bundled_dataset() {
        let dataset = crate::data::Dataset::bundled().unwrap();
        for city in &dataset.cities {
            for alt in &dataset.alternatives {
                unit_cost(alt, &city.name).unwrap();
                department_budget(alt, &city.name, &dataset.cities).unwrap();
                compare(city, alt, &dataset.cities).unwrap();
            }
        }
    }
}
