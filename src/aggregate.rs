use std::collections::{HashMap, HashSet};

use crate::data::Record;

/// Group totals and first-occurrence orderings for a dataset.
///
/// Publishers and genres keep the order in which they first appear in the
/// input. Totals include every row, duplicates too, while [`lookup`]
/// only ever returns the first row seen for a `(publisher, genre)` pair.
///
/// [`lookup`]: Aggregate::lookup
#[derive(Debug)]
pub struct Aggregate<'a> {
    records: &'a [Record],
    publishers: Vec<&'a str>,
    genres: Vec<&'a str>,
    grand_total: f64,
    publisher_totals: HashMap<&'a str, f64>,
    first_match: HashMap<&'a str, HashMap<&'a str, usize>>,
}

impl<'a> Aggregate<'a> {
    pub fn from_records(records: &'a [Record]) -> Self {
        let mut publishers = Vec::new();
        let mut genres = Vec::new();
        let mut seen_genres: HashSet<&'a str> = HashSet::new();
        let mut publisher_totals: HashMap<&'a str, f64> = HashMap::new();
        let mut first_match: HashMap<&'a str, HashMap<&'a str, usize>> = HashMap::new();
        let mut grand_total = 0.0;

        for (index, record) in records.iter().enumerate() {
            let publisher = record.publisher.as_str();
            let genre = record.genre.as_str();

            if !publisher_totals.contains_key(publisher) {
                publishers.push(publisher);
            }
            *publisher_totals.entry(publisher).or_insert(0.0) += record.count;

            if seen_genres.insert(genre) {
                genres.push(genre);
            }

            first_match
                .entry(publisher)
                .or_default()
                .entry(genre)
                .or_insert(index);

            grand_total += record.count;
        }

        tracing::debug!(
            "Aggregated {} records: {} publishers, {} genres, grand total {}",
            records.len(),
            publishers.len(),
            genres.len(),
            grand_total
        );

        Self {
            records,
            publishers,
            genres,
            grand_total,
            publisher_totals,
            first_match,
        }
    }

    pub fn publishers(&self) -> &[&'a str] {
        &self.publishers
    }

    pub fn genres(&self) -> &[&'a str] {
        &self.genres
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    /// Sum of `count` for a publisher; zero for publishers not in the data.
    pub fn publisher_total(&self, publisher: &str) -> f64 {
        self.publisher_totals.get(publisher).copied().unwrap_or(0.0)
    }

    /// First record for the pair, if the input has one.
    pub fn lookup(&self, publisher: &str, genre: &str) -> Option<&'a Record> {
        let records = self.records;
        self.first_match
            .get(publisher)?
            .get(genre)
            .map(|&index| &records[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("B", "RPG", "PC", 10.0),
            Record::new("A", "Action", "PS4", 5.0),
            Record::new("B", "Sports", "X360", 2.5),
            Record::new("A", "RPG", "PC", 7.5),
        ]
    }

    #[test]
    fn orders_by_first_occurrence() {
        let records = sample();
        let agg = Aggregate::from_records(&records);
        assert_eq!(agg.publishers(), ["B", "A"]);
        assert_eq!(agg.genres(), ["RPG", "Action", "Sports"]);
    }

    #[test]
    fn sums_totals() {
        let records = sample();
        let agg = Aggregate::from_records(&records);
        assert_eq!(agg.grand_total(), 25.0);
        assert_eq!(agg.publisher_total("A"), 12.5);
        assert_eq!(agg.publisher_total("B"), 12.5);
        assert_eq!(agg.publisher_total("C"), 0.0);
    }

    #[test]
    fn lookup_finds_existing_pairs_only() {
        let records = sample();
        let agg = Aggregate::from_records(&records);
        assert_eq!(agg.lookup("A", "RPG").map(|r| r.count), Some(7.5));
        assert!(agg.lookup("A", "Sports").is_none());
        assert!(agg.lookup("Z", "RPG").is_none());
    }

    #[test]
    fn duplicate_pairs_keep_first_match_but_count_in_totals() {
        let records = vec![
            Record::new("A", "RPG", "PC", 4.0),
            Record::new("A", "RPG", "PS4", 6.0),
        ];
        let agg = Aggregate::from_records(&records);
        let first = agg.lookup("A", "RPG").expect("pair exists");
        assert_eq!(first.platform, "PC");
        assert_eq!(agg.publisher_total("A"), 10.0);
        assert_eq!(agg.genres(), ["RPG"]);
    }

    #[test]
    fn empty_input_has_no_groups() {
        let agg = Aggregate::from_records(&[]);
        assert!(agg.publishers().is_empty());
        assert!(agg.genres().is_empty());
        assert_eq!(agg.grand_total(), 0.0);
    }
}
