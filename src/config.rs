use crate::error::Result;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// How the input file is read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Skip invalid UTF-8 byte sequences instead of failing the load.
    pub lenient_encoding: bool,
    /// Field separator for delimited input, written as a one-character
    /// string. Ignored for Parquet.
    #[serde(deserialize_with = "separator_from_str")]
    pub separator: u8,
}

/// The byte for a single ASCII separator character.
pub fn separator_byte(separator: char) -> Option<u8> {
    separator.is_ascii().then_some(separator as u8)
}

fn separator_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u8, D::Error> {
    let text = String::deserialize(deserializer)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => separator_byte(c),
        _ => None,
    }
    .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&text), &"a single ASCII character"))
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            lenient_encoding: true,
            separator: b',',
        }
    }
}

/// Parameters of the fifteen queries. Defaults reproduce the stock report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub release_year: i32,
    pub top_countries: usize,
    pub longest_movies: usize,
    pub recent_years: u32,
    pub director: String,
    pub min_seasons: u32,
    pub year_share_country: String,
    pub top_years: usize,
    pub genre: String,
    pub actor: String,
    pub actor_window_years: i32,
    pub actor_country: String,
    pub top_actors: usize,
    pub bad_keywords: Vec<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            release_year: 2020,
            top_countries: 5,
            longest_movies: 5,
            recent_years: 5,
            director: "Steven Spielberg".to_string(),
            min_seasons: 5,
            year_share_country: "India".to_string(),
            top_years: 5,
            genre: "Documentaries".to_string(),
            actor: "Salman Khan".to_string(),
            actor_window_years: 10,
            actor_country: "India".to_string(),
            top_actors: 10,
            bad_keywords: vec!["kill".to_string(), "violence".to_string()],
        }
    }
}

/// Optional JSON config file with a `load` and a `queries` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub load: LoadOptions,
    pub queries: QueryConfig,
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }
}
