use serde::Deserialize;
use serde::Serialize;

/// Countries dropped from every fetched dataset, compared case-insensitively.
pub const EXCLUDED_NAME: &str = "israel";

pub const MISSING_LABEL: &str = "N/A";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Country {
    pub name: String,
    pub capital: Option<String>,
    pub region: String,
    pub population: u64,
    pub area: f64,
    pub flag_url: String,
    pub flag_alt: Option<String>,
}

impl Country {
    pub fn capital_label(&self) -> &str {
        self.capital
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(MISSING_LABEL)
    }

    pub fn flag_alt_text(&self) -> &str {
        self.flag_alt
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

pub fn is_excluded_name(name: &str) -> bool {
    name.to_lowercase() == EXCLUDED_NAME
}

// restcountries v3.1 payload, restricted to the requested fields
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawCountry {
    pub name: RawName,
    #[serde(default)]
    pub flags: RawFlags,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub area: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawName {
    pub common: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawFlags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub alt: Option<String>,
}

impl From<RawCountry> for Country {
    fn from(raw: RawCountry) -> Self {
        let capital = raw.capital.and_then(|c| c.into_iter().next());
        Self {
            name: raw.name.common,
            capital,
            region: raw.region.unwrap_or_default(),
            population: raw.population,
            area: raw.area.max(0.0),
            flag_url: raw.flags.png,
            flag_alt: raw.flags.alt,
        }
    }
}

/// Converts wire records, dropping the excluded country. Order is preserved.
pub fn from_raw(records: Vec<RawCountry>) -> Vec<Country> {
    records
        .into_iter()
        .filter(|r| !is_excluded_name(&r.name.common))
        .map(Country::from)
        .collect()
}
