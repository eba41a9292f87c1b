//! Descriptive queries over a streaming catalog of movies and TV shows.
//!
//! A catalog file is read once with [`load`], cleaned into an immutable
//! [`Catalog`], and then queried by the fifteen independent functions in
//! `q1` .. `q15`. Filtering queries return a smaller [`Catalog`]; aggregating
//! queries return typed rows.

pub mod config;
pub mod data;
pub mod error;
pub mod explode;
pub mod report;

pub mod q1;
pub mod q2;
pub mod q3;
pub mod q4;
pub mod q5;
pub mod q6;
pub mod q7;
pub mod q8;
pub mod q9;
pub mod q10;
pub mod q11;
pub mod q12;
pub mod q13;
pub mod q14;
pub mod q15;

pub use config::{Config, LoadOptions, QueryConfig};
pub use data::{Catalog, CatalogRecord, RawCatalog, RawRecord, ShowType, load};
pub use error::CatalogError;
pub use report::{Output, run_query};
