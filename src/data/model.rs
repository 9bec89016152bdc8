use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A citation for a budget figure or unit cost
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLink {
    pub url: String,
    pub link_text: String,
}

/// A municipal department and its general-fund allocation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Department {
    pub name: String,
    pub budget: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub name: String,
    pub state: String,
    /// Discretionary budget pool, the percentage denominator
    pub general_fund: u64,
    pub police_budget: u64,
    #[serde(default)]
    pub links: Vec<DataLink>,
    #[serde(default)]
    pub notes: Vec<String>,
    pub departments: Vec<Department>,
}

impl City {
    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name == name)
    }
}

/// Per-(Alternative, City) join record. `unit_cost` is present exactly when
/// the alternative has no national unit cost.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityData {
    pub name: String,
    pub dept: String,
    pub unit_cost: Option<u64>,
}

/// A spending category compared against the police budget
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub name: String,
    /// Salary-based categories use state-average wages instead of a cited source
    pub salary: bool,
    pub national_unit_cost: Option<u64>,
    pub city_data: Vec<CityData>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub links: Vec<DataLink>,
}

impl Alternative {
    pub fn city_entry(&self, city_name: &str) -> Option<&CityData> {
        self.city_data.iter().find(|c| c.name == city_name)
    }
}

/// Dataset invariant violations, detected once at load time.
/// None of these are recoverable; a dataset that fails validation is rejected
/// wholesale rather than partially loaded.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to parse dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("dataset contains no cities")]
    NoCities,
    #[error("dataset contains no alternatives")]
    NoAlternatives,
    #[error("duplicate city {0}")]
    DuplicateCity(String),
    #[error("duplicate department {dept} in {city}")]
    DuplicateDepartment { city: String, dept: String },
    #[error("duplicate alternative {0}")]
    DuplicateAlternative(String),
    #[error("{0} has a zero general fund")]
    ZeroGeneralFund(String),
    #[error("{alternative} has no entry for {city}")]
    MissingCityEntry { alternative: String, city: String },
    #[error("{alternative} has duplicate entries for {city}")]
    DuplicateCityEntry { alternative: String, city: String },
    #[error("{alternative} references unknown city {city}")]
    UnknownCity { alternative: String, city: String },
    #[error("{city} has no {dept} department (referenced by {alternative})")]
    UnknownDepartment {
        alternative: String,
        city: String,
        dept: String,
    },
    #[error("{alternative} has both a national and a {city} unit cost")]
    BothCostSources { alternative: String, city: String },
    #[error("{alternative} has neither a national nor a {city} unit cost")]
    NoCostSource { alternative: String, city: String },
    #[error("{alternative} has a zero unit cost for {city}")]
    ZeroUnitCost { alternative: String, city: String },
}

/// The two bundled collections, loaded wholesale and immutable afterwards
#[derive(Debug, Clone)]
pub struct Dataset {
    pub cities: Vec<City>,
    pub alternatives: Vec<Alternative>,
}

const CITIES_JSON: &str = include_str!("../../data/cities.json");
const ALTERNATIVES_JSON: &str = include_str!("../../data/alternatives.json");

impl Dataset {
    /// Parse and validate a dataset from its two JSON documents
    pub fn from_json(cities_json: &str, alternatives_json: &str) -> Result<Self, DatasetError> {
        let dataset = Dataset {
            cities: serde_json::from_str(cities_json)?,
            alternatives: serde_json::from_str(alternatives_json)?,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// The dataset compiled into the binary
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(CITIES_JSON, ALTERNATIVES_JSON)
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.name == name)
    }

    /// Check every invariant the calculators rely on, so that lookups over a
    /// validated dataset cannot fail and unit costs are never zero.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.cities.is_empty() {
            return Err(DatasetError::NoCities);
        }
        if self.alternatives.is_empty() {
            return Err(DatasetError::NoAlternatives);
        }

        let mut city_names = HashSet::new();
        for city in &self.cities {
            if !city_names.insert(city.name.as_str()) {
                return Err(DatasetError::DuplicateCity(city.name.clone()));
            }
            if city.general_fund == 0 {
                return Err(DatasetError::ZeroGeneralFund(city.name.clone()));
            }
            let mut dept_names = HashSet::new();
            for dept in &city.departments {
                if !dept_names.insert(dept.name.as_str()) {
                    return Err(DatasetError::DuplicateDepartment {
                        city: city.name.clone(),
                        dept: dept.name.clone(),
                    });
                }
            }
        }

        let mut alt_names = HashSet::new();
        for alt in &self.alternatives {
            if !alt_names.insert(alt.name.as_str()) {
                return Err(DatasetError::DuplicateAlternative(alt.name.clone()));
            }

            // Every entry must point at a known city and a real department
            let mut entry_names = HashSet::new();
            for entry in &alt.city_data {
                if !entry_names.insert(entry.name.as_str()) {
                    return Err(DatasetError::DuplicateCityEntry {
                        alternative: alt.name.clone(),
                        city: entry.name.clone(),
                    });
                }
                let Some(city) = self.city(&entry.name) else {
                    return Err(DatasetError::UnknownCity {
                        alternative: alt.name.clone(),
                        city: entry.name.clone(),
                    });
                };
                if city.department(&entry.dept).is_none() {
                    return Err(DatasetError::UnknownDepartment {
                        alternative: alt.name.clone(),
                        city: entry.name.clone(),
                        dept: entry.dept.clone(),
                    });
                }

                // Exactly one of the two cost sources, and never zero
                match (alt.national_unit_cost, entry.unit_cost) {
                    (Some(_), Some(_)) => {
                        return Err(DatasetError::BothCostSources {
                            alternative: alt.name.clone(),
                            city: entry.name.clone(),
                        })
                    }
                    (None, None) => {
                        return Err(DatasetError::NoCostSource {
                            alternative: alt.name.clone(),
                            city: entry.name.clone(),
                        })
                    }
                    (Some(0), None) | (None, Some(0)) => {
                        return Err(DatasetError::ZeroUnitCost {
                            alternative: alt.name.clone(),
                            city: entry.name.clone(),
                        })
                    }
                    _ => {}
                }
            }

            // Completeness: one entry per known city
            for city in &self.cities {
                if alt.city_entry(&city.name).is_none() {
                    return Err(DatasetError::MissingCityEntry {
                        alternative: alt.name.clone(),
                        city: city.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
