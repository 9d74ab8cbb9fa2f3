//! Hint statistics: parallel frequency tables over the puzzle's surface
//! forms.
//!
//! Two instances live side by side: the totals table, derived once at puzzle
//! load and never mutated, and the found table, bumped incrementally on each
//! newly found form. The found table is monotone for the life of a session;
//! only a full load/restart rebuilds it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::puzzle::session::WordMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintsData {
    /// How many pangrams (totals) or how many found so far.
    pub pangrams: u32,
    /// Starting letter -> counts indexed by word length.
    pub lengths: BTreeMap<char, Vec<u32>>,
    /// Two-letter prefix -> count.
    pub starts: BTreeMap<String, u32>,
}

impl HintsData {
    /// Record one newly found surface form. Never decrements.
    pub fn record_found(&mut self, form: &str, pangrams: &[String]) {
        if pangrams.iter().any(|p| p == form) {
            self.pangrams += 1;
        }

        let mut chars = form.chars();
        let Some(first) = chars.next() else {
            return;
        };
        let len = form.chars().count();
        if let Some(row) = self.lengths.get_mut(&first) {
            if let Some(slot) = row.get_mut(len) {
                *slot += 1;
            }
        }

        let prefix: String = form.chars().take(2).collect();
        *self.starts.entry(prefix).or_insert(0) += 1;
    }

    /// Pointwise `self <= other`, the invariant between found and totals.
    pub fn within(&self, other: &HintsData) -> bool {
        if self.pangrams > other.pangrams {
            return false;
        }
        for (letter, row) in &self.lengths {
            let Some(total_row) = other.lengths.get(letter) else {
                return false;
            };
            for (i, count) in row.iter().enumerate() {
                if *count > total_row.get(i).copied().unwrap_or(0) {
                    return false;
                }
            }
        }
        for (prefix, count) in &self.starts {
            if *count > other.starts.get(prefix).copied().unwrap_or(0) {
                return false;
            }
        }
        true
    }
}

/// Build the totals table from scratch plus a zeroed found table with the
/// same row/key shape. O(total surface forms); called once per puzzle
/// load/restart.
pub fn recompute_totals(
    words: &WordMap,
    pangrams: &[String],
    letters: &[char],
) -> (HintsData, HintsData) {
    let mut totals = HintsData::default();
    let mut found = HintsData::default();

    totals.pangrams = pangrams.len() as u32;

    let forms: Vec<&String> = words.values().flatten().collect();
    let max_len = forms.iter().map(|f| f.chars().count()).max().unwrap_or(0);

    // Rows exist for every puzzle letter even when no word starts with it.
    for letter in letters {
        for lower in letter.to_lowercase() {
            totals.lengths.insert(lower, vec![0; max_len + 1]);
            found.lengths.insert(lower, vec![0; max_len + 1]);
        }
    }

    for form in forms {
        let mut chars = form.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        let len = form.chars().count();
        if let Some(row) = totals.lengths.get_mut(&first) {
            row[len] += 1;
        }

        let prefix: String = form.chars().take(2).collect();
        *totals.starts.entry(prefix.clone()).or_insert(0) += 1;
        found.starts.entry(prefix).or_insert(0);
    }

    (totals, found)
}

/// The one serialization boundary for hint tables: map-typed fields become
/// entry-pair sequences for storage and come back through here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedHints {
    pub pangrams: u32,
    pub lengths: Vec<(char, Vec<u32>)>,
    pub starts: Vec<(String, u32)>,
}

impl From<&HintsData> for SavedHints {
    fn from(hints: &HintsData) -> Self {
        Self {
            pangrams: hints.pangrams,
            lengths: hints
                .lengths
                .iter()
                .map(|(k, v)| (*k, v.clone()))
                .collect(),
            starts: hints
                .starts
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        }
    }
}

impl From<SavedHints> for HintsData {
    fn from(saved: SavedHints) -> Self {
        Self {
            pangrams: saved.pangrams,
            lengths: saved.lengths.into_iter().collect(),
            starts: saved.starts.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (WordMap, Vec<String>, Vec<char>) {
        let mut words = WordMap::new();
        words.insert("stoner".into(), vec!["stoner".into()]);
        words.insert("notes".into(), vec!["notes".into()]);
        words.insert("nest".into(), vec!["nest".into()]);
        let pangrams = vec!["stoner".to_string()];
        let letters = vec!['N', 'A', 'S', 'T', 'E', 'R', 'O'];
        (words, pangrams, letters)
    }

    #[test]
    fn totals_count_lengths_and_starts() {
        let (words, pangrams, letters) = sample();
        let (totals, found) = recompute_totals(&words, &pangrams, &letters);

        assert_eq!(totals.pangrams, 1);
        assert_eq!(totals.lengths[&'s'][6], 1);
        assert_eq!(totals.lengths[&'n'][5], 1);
        assert_eq!(totals.lengths[&'n'][4], 1);
        assert_eq!(totals.starts["st"], 1);
        assert_eq!(totals.starts["ne"], 1);
        assert_eq!(totals.starts["no"], 1);

        // Found table has the same shape, all zero.
        assert_eq!(found.pangrams, 0);
        assert!(found.lengths.values().all(|row| row.iter().all(|c| *c == 0)));
        assert!(found.starts.values().all(|c| *c == 0));
        assert!(found.within(&totals));
    }

    #[test]
    fn rows_exist_for_letters_without_words() {
        let (words, pangrams, letters) = sample();
        let (totals, _) = recompute_totals(&words, &pangrams, &letters);
        assert!(totals.lengths.contains_key(&'a'));
        assert!(totals.lengths[&'a'].iter().all(|c| *c == 0));
    }

    #[test]
    fn record_found_stays_within_totals() {
        let (words, pangrams, letters) = sample();
        let (totals, mut found) = recompute_totals(&words, &pangrams, &letters);

        for form in ["stoner", "notes", "nest"] {
            found.record_found(form, &pangrams);
            assert!(found.within(&totals), "monotone invariant broke at {form}");
        }
        assert_eq!(found.pangrams, 1);
        assert_eq!(found.lengths[&'n'][4], 1);
        assert_eq!(found.starts["st"], 1);
    }

    #[test]
    fn saved_hints_round_trip() {
        let (words, pangrams, letters) = sample();
        let (totals, _) = recompute_totals(&words, &pangrams, &letters);
        let json = serde_json::to_string(&SavedHints::from(&totals)).unwrap();
        let back: HintsData = serde_json::from_str::<SavedHints>(&json).unwrap().into();
        assert_eq!(back, totals);
    }
}
