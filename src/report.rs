use crate::config::QueryConfig;
use crate::data::{Catalog, ShowType};
use crate::error::{CatalogError, Result};
use crate::q1::TypeCount;
use crate::q2::RatingCount;
use crate::q4::CountryCount;
use crate::q9::GenreCount;
use crate::q10::YearShare;
use crate::q14::ActorCount;
use crate::q15::{CategoryCount, Keywords};
use crate::{q1, q2, q3, q4, q5, q6, q7, q8, q9, q10, q11, q12, q13, q14, q15};
use polars::prelude::*;
use std::time::Instant;

pub const QUERY_TITLES: [&str; 15] = [
    "Count of movies and TV shows",
    "Most common rating per show type",
    "Movies released in the target year",
    "Top countries by content",
    "Longest movies",
    "Recently added content",
    "Content by director",
    "TV shows with many seasons",
    "Titles per genre",
    "Top release years by share for a country",
    "Titles in genre",
    "Content without a director",
    "Recent titles with actor",
    "Top actors for a country",
    "Good/Bad content by description keywords",
];

/// A derived table produced by one query.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Titles(Catalog),
    TypeCounts(Vec<TypeCount>),
    RatingCounts(Vec<RatingCount>),
    CountryCounts(Vec<CountryCount>),
    GenreCounts(Vec<GenreCount>),
    YearShares(Vec<YearShare>),
    ActorCounts(Vec<ActorCount>),
    CategoryCounts(Vec<CategoryCount>),
}

impl Output {
    pub fn len(&self) -> usize {
        match self {
            Output::Titles(titles) => titles.len(),
            Output::TypeCounts(rows) => rows.len(),
            Output::RatingCounts(rows) => rows.len(),
            Output::CountryCounts(rows) => rows.len(),
            Output::GenreCounts(rows) => rows.len(),
            Output::YearShares(rows) => rows.len(),
            Output::ActorCounts(rows) => rows.len(),
            Output::CategoryCounts(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frame for display.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        fn counts<T>(rows: &[T], count: impl Fn(&T) -> usize) -> Vec<u64> {
            rows.iter().map(|row| count(row) as u64).collect()
        }
        fn texts<T>(rows: &[T], text: impl Fn(&T) -> &str) -> Vec<String> {
            rows.iter().map(|row| text(row).to_string()).collect()
        }
        fn types<'a>(types: impl Iterator<Item = Option<&'a ShowType>>) -> Vec<Option<&'a str>> {
            types.map(|t| t.map(ShowType::as_str)).collect()
        }

        match self {
            Output::Titles(titles) => df!(
                "show_id" => &titles.show_id,
                "show_type" => types(titles.show_type.iter().map(Option::as_ref)),
                "title" => &titles.title,
                "director" => &titles.director,
                "casts" => &titles.casts,
                "country" => &titles.country,
                "date_added" => titles
                    .date_added
                    .iter()
                    .map(|d| d.map(|d| d.format("%Y-%m-%d").to_string()))
                    .collect::<Vec<_>>(),
                "release_year" => &titles.release_year,
                "rating" => &titles.rating,
                "duration" => &titles.duration,
                "listed_in" => &titles.listed_in,
                "show_description" => &titles.show_description
            ),
            Output::TypeCounts(rows) => df!(
                "show_type" => types(rows.iter().map(|r| r.show_type.as_ref())),
                "total" => counts(rows, |r| r.total)
            ),
            Output::RatingCounts(rows) => df!(
                "show_type" => texts(rows, |r| r.show_type.as_str()),
                "rating" => texts(rows, |r| r.rating.as_str()),
                "rating_count" => counts(rows, |r| r.rating_count)
            ),
            Output::CountryCounts(rows) => df!(
                "primary_country" => texts(rows, |r| r.country.as_str()),
                "total_content" => counts(rows, |r| r.total_content)
            ),
            Output::GenreCounts(rows) => df!(
                "genre" => texts(rows, |r| r.genre.as_str()),
                "total_titles" => counts(rows, |r| r.total_titles)
            ),
            Output::YearShares(rows) => df!(
                "release_year" => rows.iter().map(|r| r.release_year).collect::<Vec<_>>(),
                "total_release" => counts(rows, |r| r.total_release),
                "release_percentage" => rows.iter().map(|r| r.release_percentage).collect::<Vec<_>>()
            ),
            Output::ActorCounts(rows) => df!(
                "actor" => texts(rows, |r| r.actor.as_str()),
                "appearances" => counts(rows, |r| r.appearances)
            ),
            Output::CategoryCounts(rows) => df!(
                "category_label" => rows.iter().map(|r| r.category_label.to_string()).collect::<Vec<_>>(),
                "show_type" => texts(rows, |r| r.show_type.as_str()),
                "content_count" => counts(rows, |r| r.content_count)
            ),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Output::Titles(titles) => serde_json::to_value(titles.records().collect::<Vec<_>>()),
            Output::TypeCounts(rows) => serde_json::to_value(rows),
            Output::RatingCounts(rows) => serde_json::to_value(rows),
            Output::CountryCounts(rows) => serde_json::to_value(rows),
            Output::GenreCounts(rows) => serde_json::to_value(rows),
            Output::YearShares(rows) => serde_json::to_value(rows),
            Output::ActorCounts(rows) => serde_json::to_value(rows),
            Output::CategoryCounts(rows) => serde_json::to_value(rows),
        }
    }
}

/// Runs query `number` (1..=15) with the parameters from `config`.
pub fn run_query(db: &Catalog, config: &QueryConfig, number: u8) -> Result<Output> {
    let start = Instant::now();
    let output = match number {
        1 => Output::TypeCounts(q1::count_by_type(db)),
        2 => Output::RatingCounts(q2::top_rating_per_type(db)),
        3 => Output::Titles(q3::movies_released_in(db, config.release_year)),
        4 => Output::CountryCounts(q4::top_countries(db, config.top_countries)),
        5 => Output::Titles(q5::longest_movies(db, config.longest_movies)),
        6 => Output::Titles(q6::recently_added(db, config.recent_years)),
        7 => Output::Titles(q7::by_director(db, &config.director)),
        8 => Output::Titles(q8::long_running_shows(db, config.min_seasons)),
        9 => Output::GenreCounts(q9::genre_counts(db)),
        10 => Output::YearShares(q10::top_release_years(
            db,
            &config.year_share_country,
            config.top_years,
        )),
        11 => Output::Titles(q11::in_genre(db, &config.genre)),
        12 => Output::Titles(q12::missing_director(db)),
        13 => Output::Titles(q13::actor_in_last_years(
            db,
            &config.actor,
            config.actor_window_years,
        )),
        14 => Output::ActorCounts(q14::top_actors_in(
            db,
            &config.actor_country,
            config.top_actors,
        )),
        15 => Output::CategoryCounts(q15::sentiment_counts(
            db,
            &Keywords::new(config.bad_keywords.as_slice()),
        )),
        other => return Err(CatalogError::UnknownQuery(other)),
    };
    log::debug!(
        "q{number}: {} rows in {:.2?}",
        output.len(),
        start.elapsed()
    );
    Ok(output)
}

pub fn title(number: u8) -> Option<&'static str> {
    QUERY_TITLES.get(usize::from(number).checked_sub(1)?).copied()
}
