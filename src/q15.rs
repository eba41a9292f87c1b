use crate::data::{Catalog, ShowType};
use ahash::HashMap;
use memchr::memmem::Finder;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Sentiment {
    Bad,
    Good,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sentiment::Bad => "Bad",
            Sentiment::Good => "Good",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category_label: Sentiment,
    pub show_type: ShowType,
    pub content_count: usize,
}

/// Case-insensitive keyword matcher. Blank keywords are ignored.
pub struct Keywords {
    finders: Vec<Finder<'static>>,
}

impl Keywords {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let finders = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .map(|k| Finder::new(k.as_bytes()).into_owned())
            .collect();
        Keywords { finders }
    }

    /// "Bad" when the lower-cased text mentions any keyword. A missing
    /// description is "Good".
    pub fn categorize(&self, description: Option<&str>) -> Sentiment {
        let Some(description) = description else {
            return Sentiment::Good;
        };
        let lowered = description.to_lowercase();
        if self
            .finders
            .iter()
            .any(|finder| finder.find(lowered.as_bytes()).is_some())
        {
            Sentiment::Bad
        } else {
            Sentiment::Good
        }
    }
}

/// Per-title labels, in catalog order.
pub fn categorize(db: &Catalog, keywords: &Keywords) -> Vec<Sentiment> {
    db.show_description
        .iter()
        .map(|description| keywords.categorize(description.as_deref()))
        .collect()
}

/// Titles per (label, show type), ordered by show type and then label.
/// Titles of unknown type are not counted.
pub fn sentiment_counts(db: &Catalog, keywords: &Keywords) -> Vec<CategoryCount> {
    let counts: HashMap<(Sentiment, &ShowType), usize> = categorize(db, keywords)
        .into_iter()
        .zip(db.show_type.iter())
        .filter_map(|(label, show_type)| Some((label, show_type.as_ref()?)))
        .fold(HashMap::default(), |mut acc, key| {
            *acc.entry(key).or_default() += 1;
            acc
        });

    let mut res: Vec<CategoryCount> = counts
        .into_iter()
        .map(|((category_label, show_type), content_count)| CategoryCount {
            category_label,
            show_type: show_type.clone(),
            content_count,
        })
        .collect();
    res.sort_by(|a, b| {
        a.show_type
            .cmp(&b.show_type)
            .then_with(|| a.category_label.cmp(&b.category_label))
    });
    res
}
