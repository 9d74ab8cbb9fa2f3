//! Persistence of the puzzle session and hint tables, keyed by day.
//!
//! Three records per day, mirroring the session, the hint totals and the
//! found-so-far table. Any missing or malformed record degrades to "not
//! found" so a corrupt save can never wedge startup; the caller regenerates
//! instead.

use crate::puzzle::hints::{HintsData, SavedHints};
use crate::puzzle::session::PuzzleSession;
use crate::store::backend::{Storage, StorageError};

/// One day's persisted state, as loaded.
#[derive(Debug, Clone)]
pub struct SavedGame {
    pub puzzle: PuzzleSession,
    pub hints_puzzle: HintsData,
    pub hints_found: HintsData,
}

pub struct PersistenceGateway<S: Storage> {
    storage: S,
}

impl<S: Storage> PersistenceGateway<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn puzzle_key(day: u32) -> String {
        format!("{day}-puzzle")
    }

    fn hints_puzzle_key(day: u32) -> String {
        format!("{day}-hints-puzzle")
    }

    fn hints_found_key(day: u32) -> String {
        format!("{day}-hints-found")
    }

    /// Load one day's saved game. Returns `None` on a miss, a backend
    /// failure, or malformed data; never an error.
    pub async fn load(&self, day: u32) -> Option<SavedGame> {
        let puzzle = self.fetch(&Self::puzzle_key(day)).await?;
        let hints_puzzle = self.fetch(&Self::hints_puzzle_key(day)).await?;
        let hints_found = self.fetch(&Self::hints_found_key(day)).await?;

        let puzzle: PuzzleSession = parse(&puzzle)?;
        let hints_puzzle: SavedHints = parse(&hints_puzzle)?;
        let hints_found: SavedHints = parse(&hints_found)?;

        Some(SavedGame {
            puzzle,
            hints_puzzle: hints_puzzle.into(),
            hints_found: hints_found.into(),
        })
    }

    /// Write all three records for the session's day. Overlapping saves for
    /// the same day are last-write-wins.
    pub async fn save(
        &mut self,
        session: &PuzzleSession,
        hints_puzzle: &HintsData,
        hints_found: &HintsData,
    ) -> Result<(), StorageError> {
        let day = session.day;
        log::debug!("saving puzzle for day {day}");

        let puzzle = serde_json::to_string(session)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let totals = serde_json::to_string(&SavedHints::from(hints_puzzle))
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let found = serde_json::to_string(&SavedHints::from(hints_found))
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        self.storage.set(&Self::puzzle_key(day), puzzle).await?;
        self.storage.set(&Self::hints_puzzle_key(day), totals).await?;
        self.storage.set(&Self::hints_found_key(day), found).await?;
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(err) => {
                log::warn!("storage read failed for {key}: {err}");
                None
            }
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("discarding malformed saved record: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::puzzle::hints::recompute_totals;
    use crate::puzzle::session::{PuzzleData, WordMap};
    use crate::store::backend::MemoryStorage;

    fn sample_session(day: u32) -> (PuzzleSession, HintsData, HintsData) {
        let mut words = WordMap::new();
        words.insert("stoner".into(), vec!["stoner".into()]);
        let session = PuzzleSession::from_data(PuzzleData {
            letters: vec!['n', 'a', 's', 't', 'e', 'r', 'o'],
            words: words.clone(),
            lemmas: BTreeMap::new(),
            forms: WordMap::new(),
            pangrams: vec!["stoner".into()],
            day,
        });
        let (totals, found) = recompute_totals(&words, &session.pangrams, &session.letters);
        (session, totals, found)
    }

    #[test]
    fn save_then_load_round_trips() {
        pollster::block_on(async {
            let mut gw = PersistenceGateway::new(MemoryStorage::new());
            let (session, totals, found) = sample_session(17);
            gw.save(&session, &totals, &found).await.unwrap();

            let saved = gw.load(17).await.expect("saved game loads");
            assert_eq!(saved.puzzle.day, 17);
            assert_eq!(saved.puzzle.max_score, 13);
            assert_eq!(saved.hints_puzzle, totals);
            assert_eq!(saved.hints_found, found);
        });
    }

    #[test]
    fn miss_returns_none() {
        pollster::block_on(async {
            let gw = PersistenceGateway::new(MemoryStorage::new());
            assert!(gw.load(3).await.is_none());
        });
    }

    #[test]
    fn malformed_record_degrades_to_miss() {
        pollster::block_on(async {
            let mut store = MemoryStorage::new();
            store.set("5-puzzle", "{not json".into()).await.unwrap();
            store.set("5-hints-puzzle", "{}".into()).await.unwrap();
            store.set("5-hints-found", "{}".into()).await.unwrap();
            let gw = PersistenceGateway::new(store);
            assert!(gw.load(5).await.is_none());
        });
    }

    #[test]
    fn partial_record_degrades_to_miss() {
        pollster::block_on(async {
            let mut gw = PersistenceGateway::new(MemoryStorage::new());
            let (session, totals, found) = sample_session(8);
            gw.save(&session, &totals, &found).await.unwrap();
            // A different day sharing the store is still a miss.
            assert!(gw.load(9).await.is_none());
        });
    }

    #[test]
    fn days_do_not_collide() {
        pollster::block_on(async {
            let mut gw = PersistenceGateway::new(MemoryStorage::new());
            let (s1, t1, f1) = sample_session(1);
            let (s2, t2, f2) = sample_session(2);
            gw.save(&s1, &t1, &f1).await.unwrap();
            gw.save(&s2, &t2, &f2).await.unwrap();
            assert_eq!(gw.load(1).await.unwrap().puzzle.day, 1);
            assert_eq!(gw.load(2).await.unwrap().puzzle.day, 2);
        });
    }
}
