use std::collections::BTreeMap;

use beeline_engine::{PuzzleData, PuzzleSource, SourceError, WordMap};

/// A tiny built-in puzzle catalog, cycled by day number. Stands in for the
/// word-list generator the full game runs against.
pub struct SampleSource;

struct Entry {
    letters: [char; 7],
    pangrams: &'static [&'static str],
    /// Normalized answer key -> surface forms it scores.
    words: &'static [(&'static str, &'static [&'static str])],
}

const CATALOG: &[Entry] = &[
    // Center letter N.
    Entry {
        letters: ['n', 'a', 's', 't', 'e', 'r', 'o'],
        pangrams: &["treason", "senator"],
        words: &[
            ("atone", &["atone"]),
            ("nest", &["nest"]),
            ("notes", &["notes"]),
            ("ornate", &["ornate"]),
            ("reason", &["reason"]),
            ("senator", &["senator"]),
            ("senor", &["señor"]),
            ("snore", &["snore"]),
            ("stoner", &["stoner"]),
            ("tenor", &["tenor"]),
            ("treason", &["treason"]),
        ],
    },
    // Center letter O.
    Entry {
        letters: ['o', 'd', 'u', 'b', 'l', 'e', 't'],
        pangrams: &["doublet"],
        words: &[
            ("bolted", &["bolted"]),
            ("bottled", &["bottled"]),
            ("dodo", &["dodo"]),
            ("double", &["double"]),
            ("doublet", &["doublet"]),
            ("looted", &["looted"]),
            ("outed", &["outed"]),
        ],
    },
];

impl PuzzleSource for SampleSource {
    async fn generate(&self, day: u32) -> Result<PuzzleData, SourceError> {
        let entry = &CATALOG[day as usize % CATALOG.len()];
        let mut words = WordMap::new();
        for (key, forms) in entry.words {
            words.insert(
                (*key).to_string(),
                forms.iter().map(|f| (*f).to_string()).collect(),
            );
        }
        Ok(PuzzleData {
            letters: entry.letters.to_vec(),
            words,
            lemmas: BTreeMap::new(),
            forms: WordMap::new(),
            pangrams: entry.pangrams.iter().map(|p| (*p).to_string()).collect(),
            day,
        })
    }
}
