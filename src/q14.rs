use crate::data::{Catalog, cell_contains};
use crate::explode::explode_count;
use memchr::memmem::Finder;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorCount {
    pub actor: String,
    pub appearances: usize,
}

/// Most frequent cast members among titles whose country field contains
/// `country`, top `n`.
pub fn top_actors_in(db: &Catalog, country: &str, n: usize) -> Vec<ActorCount> {
    let finder = Finder::new(country);
    let casts = db
        .country
        .iter()
        .zip(db.casts.iter())
        .filter_map(|(c, casts)| cell_contains(c, &finder).then(|| casts.as_deref()));

    explode_count(casts, false)
        .into_iter()
        .take(n)
        .map(|(actor, appearances)| ActorCount {
            actor: actor.to_string(),
            appearances,
        })
        .collect()
}

#[cfg(test)]
mod test_q14 {
    use super::*;
    use crate::data::{Field, RawRecord, catalog};

    fn cast(id: &str, country: &str, casts: &str) -> RawRecord {
        RawRecord::new(id, "Movie")
            .set(Field::Country, country)
            .set(Field::Casts, casts)
    }

    #[test]
    fn test_top_actors_in() {
        let db = catalog([
            cast("s1", "India", "Shah Rukh Khan, Kajol"),
            cast("s2", "India, UK", "Kajol ,Anupam Kher"),
            cast("s3", "USA", "Kajol, Tom Hanks"),
            cast("s4", "India", "Anupam Kher, Kajol"),
            RawRecord::new("s5", "Movie").set(Field::Country, "India"),
        ]);
        let rows: Vec<(String, usize)> = top_actors_in(&db, "India", 10)
            .into_iter()
            .map(|r| (r.actor, r.appearances))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Kajol".to_string(), 3),
                ("Anupam Kher".to_string(), 2),
                ("Shah Rukh Khan".to_string(), 1),
            ]
        );
    }

    #[test]
    fn at_most_n_actors() {
        let names: Vec<String> = (0..15).map(|i| format!("Actor {i}")).collect();
        let db = catalog([cast("s1", "India", &names.join(", "))]);
        let res = top_actors_in(&db, "India", 10);
        assert_eq!(res.len(), 10);
        assert_eq!(res[0].actor, "Actor 0");
        assert!(top_actors_in(&db, "Peru", 10).is_empty());
    }
}
