use crate::api::types::Notification;
use crate::core::rng::Rng;
use crate::puzzle::hints::{recompute_totals, HintsData};
use crate::puzzle::rank::{rank_index, GENIUS_RANK, QUEEN_BEE_RANK};
use crate::puzzle::session::{remove_accents, score_word, PuzzleData, PuzzleSession};
use crate::store::gateway::SavedGame;

/// Where the session currently stands. `Ready` is re-entered on every
/// successful load/generate/restart; `Failed` halts puzzle interaction until
/// a later attempt succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PuzzleStatus {
    #[default]
    NoPuzzle,
    Loading,
    Ready,
    Failed(String),
}

/// The classified outcome of a submission, surfaced as a message value.
/// Rendering the actual strings is the localization layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordFeedback {
    AlreadyFound,
    TooShort,
    MissingCenter,
    NotInList,
    /// Accepted: total points gained and how many surface forms scored.
    Scored { points: u32, forms: u32 },
}

/// Owns the authoritative puzzle session and applies word-submission
/// transitions. All mutation funnels through these methods; there is no
/// other writer.
#[derive(Debug)]
pub struct PuzzleMachine {
    pub status: PuzzleStatus,
    pub session: PuzzleSession,
    pub hints_puzzle: HintsData,
    pub hints_found: HintsData,
    pub feedback: Option<WordFeedback>,
    genius_reached: bool,
    queen_bee_reached: bool,
    rng: Rng,
}

impl PuzzleMachine {
    pub fn new(seed: u64) -> Self {
        Self {
            status: PuzzleStatus::NoPuzzle,
            session: PuzzleSession::default(),
            hints_puzzle: HintsData::default(),
            hints_found: HintsData::default(),
            feedback: None,
            genius_reached: false,
            queen_bee_reached: false,
            rng: Rng::new(seed),
        }
    }

    pub fn begin_loading(&mut self) {
        self.status = PuzzleStatus::Loading;
        self.session.letters.clear();
    }

    /// Install a freshly generated puzzle: progress zeroed, hint totals
    /// rebuilt, one-shot flags reset.
    pub fn install(&mut self, data: PuzzleData) {
        self.session = PuzzleSession::from_data(data);
        let (totals, found) = recompute_totals(
            &self.session.words,
            &self.session.pangrams,
            &self.session.letters,
        );
        self.hints_puzzle = totals;
        self.hints_found = found;
        self.feedback = None;
        self.genius_reached = false;
        self.queen_bee_reached = false;
        self.status = PuzzleStatus::Ready;
        log::info!(
            "installed puzzle for day {} ({} answers, max score {})",
            self.session.day,
            self.session.words.len(),
            self.session.max_score
        );
    }

    /// Resume a previously saved session. One-shot notification flags reset,
    /// as on any load.
    pub fn resume(&mut self, saved: SavedGame) {
        self.session = saved.puzzle;
        self.hints_puzzle = saved.hints_puzzle;
        self.hints_found = saved.hints_found;
        self.feedback = None;
        self.genius_reached = false;
        self.queen_bee_reached = false;
        self.status = PuzzleStatus::Ready;
        log::info!(
            "resumed puzzle for day {} ({} found, score {}/{})",
            self.session.day,
            self.session.found.len(),
            self.session.score,
            self.session.max_score
        );
    }

    pub fn fail(&mut self, message: String) {
        log::error!("puzzle unavailable: {message}");
        self.status = PuzzleStatus::Failed(message);
    }

    /// Re-zero progress while keeping letters/words/day fixed.
    pub fn restart(&mut self) {
        self.session.word.clear();
        self.session.found.clear();
        self.session.just_found.clear();
        self.session.score = 0;
        let (totals, found) = recompute_totals(
            &self.session.words,
            &self.session.pangrams,
            &self.session.letters,
        );
        self.hints_puzzle = totals;
        self.hints_found = found;
        self.feedback = None;
        self.genius_reached = false;
        self.queen_bee_reached = false;
        self.status = PuzzleStatus::Ready;
    }

    pub fn is_ready(&self) -> bool {
        self.status == PuzzleStatus::Ready
    }

    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    /// Append one letter to the buffer if it belongs to the wheel.
    pub fn append_letter(&mut self, ch: char) {
        self.feedback = None;
        for upper in ch.to_uppercase() {
            if self.session.letters.contains(&upper) {
                self.session.word.push(upper);
            }
        }
    }

    /// Remove the last buffered letter; no-op on an empty buffer.
    pub fn delete_last_letter(&mut self) {
        self.feedback = None;
        self.session.word.pop();
    }

    /// Reorder the outer letters; the center letter never moves.
    pub fn shuffle(&mut self) {
        if self.session.letters.len() > 1 {
            let outer = &mut self.session.letters[1..];
            self.rng.shuffle(outer);
        }
    }

    /// The core transition. Returns true when the submission scored, which
    /// is the only outcome worth persisting.
    pub fn submit_word(&mut self) -> bool {
        let entered = remove_accents(&self.session.word.to_lowercase());
        self.session.word.clear();
        if entered.is_empty() {
            return false;
        }

        let Some(forms) = self.session.words.get(&entered).cloned() else {
            self.feedback = Some(self.classify_miss(&entered));
            return false;
        };

        // The entered word is normalized, so normalize the found list before
        // the duplicate check.
        let already_found = self
            .session
            .found
            .iter()
            .any(|f| remove_accents(&f.to_lowercase()) == entered);
        if already_found {
            self.feedback = Some(WordFeedback::AlreadyFound);
            return false;
        }

        let mut points = 0;
        let mut count = 0;
        self.session.just_found.clear();
        for form in &forms {
            self.session.found.insert(0, form.clone());
            self.session.just_found.insert(0, form.clone());
            points += score_word(form, &self.session.pangrams);
            count += 1;
            self.hints_found.record_found(form, &self.session.pangrams);
        }
        self.session.score += points;
        self.feedback = Some(WordFeedback::Scored {
            points,
            forms: count,
        });
        true
    }

    fn classify_miss(&self, entered: &str) -> WordFeedback {
        if entered.chars().count() < 4 {
            return WordFeedback::TooShort;
        }
        let has_center = self.session.center_letter().is_some_and(|center| {
            entered
                .chars()
                .flat_map(|c| c.to_uppercase())
                .any(|c| c == center)
        });
        if !has_center {
            WordFeedback::MissingCenter
        } else {
            WordFeedback::NotInList
        }
    }

    /// Evaluate the one-shot rank notifications. A single submission that
    /// jumps past both thresholds yields both, in order.
    pub fn poll_rank(&mut self) -> Vec<Notification> {
        let rank = rank_index(self.session.score, self.session.max_score);
        let mut fired = Vec::new();
        if rank >= GENIUS_RANK && !self.genius_reached {
            self.genius_reached = true;
            fired.push(Notification::Genius);
        }
        if rank >= QUEEN_BEE_RANK && !self.queen_bee_reached {
            self.queen_bee_reached = true;
            fired.push(Notification::QueenBee);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::puzzle::session::WordMap;

    fn nastero() -> PuzzleMachine {
        let mut words = WordMap::new();
        words.insert("stoner".into(), vec!["stoner".into()]);
        words.insert("notes".into(), vec!["notes".into(), "notés".into()]);
        words.insert("nest".into(), vec!["nest".into()]);
        let mut machine = PuzzleMachine::new(42);
        machine.install(PuzzleData {
            letters: vec!['n', 'a', 's', 't', 'e', 'r', 'o'],
            words,
            lemmas: BTreeMap::new(),
            forms: WordMap::new(),
            pangrams: vec!["stoner".into()],
            day: 3,
        });
        machine
    }

    fn type_word(machine: &mut PuzzleMachine, word: &str) {
        for ch in word.chars() {
            machine.append_letter(ch);
        }
    }

    #[test]
    fn scoring_success_updates_found_score_and_hints() {
        let mut machine = nastero();
        type_word(&mut machine, "stoner");
        assert!(machine.submit_word());
        assert_eq!(machine.session.found, vec!["stoner".to_string()]);
        assert_eq!(machine.session.score, 13);
        assert_eq!(machine.hints_found.pangrams, 1);
        assert_eq!(
            machine.feedback,
            Some(WordFeedback::Scored {
                points: 13,
                forms: 1
            })
        );
        assert!(machine.session.word.is_empty());
    }

    #[test]
    fn one_key_scores_every_surface_form() {
        let mut machine = nastero();
        type_word(&mut machine, "notes");
        assert!(machine.submit_word());
        // notes + notés, newest first
        assert_eq!(machine.session.found, vec!["notés", "notes"]);
        assert_eq!(machine.session.just_found, vec!["notés", "notes"]);
        assert_eq!(machine.session.score, 10);
        assert_eq!(
            machine.feedback,
            Some(WordFeedback::Scored {
                points: 10,
                forms: 2
            })
        );
    }

    #[test]
    fn resubmission_is_an_idempotent_no_op() {
        let mut machine = nastero();
        type_word(&mut machine, "nest");
        assert!(machine.submit_word());
        let found = machine.session.found.clone();
        let score = machine.session.score;
        let hints = machine.hints_found.clone();

        type_word(&mut machine, "nest");
        assert!(!machine.submit_word());
        assert_eq!(machine.feedback, Some(WordFeedback::AlreadyFound));
        assert_eq!(machine.session.found, found);
        assert_eq!(machine.session.score, score);
        assert_eq!(machine.hints_found, hints);
    }

    #[test]
    fn accented_duplicate_is_detected() {
        let mut machine = nastero();
        type_word(&mut machine, "notes");
        machine.submit_word();
        // The accented surface form is already in `found`; resubmitting the
        // normalized key must be a no-op.
        type_word(&mut machine, "notes");
        assert!(!machine.submit_word());
        assert_eq!(machine.feedback, Some(WordFeedback::AlreadyFound));
    }

    #[test]
    fn misses_are_classified() {
        let mut machine = nastero();

        type_word(&mut machine, "net");
        machine.submit_word();
        assert_eq!(machine.feedback, Some(WordFeedback::TooShort));

        type_word(&mut machine, "toast");
        machine.submit_word();
        assert_eq!(machine.feedback, Some(WordFeedback::MissingCenter));

        type_word(&mut machine, "stone");
        machine.submit_word();
        assert_eq!(machine.feedback, Some(WordFeedback::NotInList));
    }

    #[test]
    fn empty_buffer_submits_as_a_no_op() {
        let mut machine = nastero();
        assert!(!machine.submit_word());
        assert_eq!(machine.feedback, None);
    }

    #[test]
    fn invalid_letters_never_enter_the_buffer() {
        let mut machine = nastero();
        machine.append_letter('z');
        machine.append_letter('n');
        assert_eq!(machine.session.word, "N");
    }

    #[test]
    fn shuffle_keeps_the_center_fixed() {
        let mut machine = nastero();
        for _ in 0..10 {
            machine.shuffle();
            assert_eq!(machine.session.letters[0], 'N');
            let mut sorted = machine.session.letters.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec!['A', 'E', 'N', 'O', 'R', 'S', 'T']);
        }
    }

    #[test]
    fn restart_rezeroes_progress_but_keeps_the_puzzle() {
        let mut machine = nastero();
        type_word(&mut machine, "stoner");
        machine.submit_word();
        let letters = machine.session.letters.clone();

        machine.restart();
        assert_eq!(machine.session.letters, letters);
        assert_eq!(machine.session.day, 3);
        assert_eq!(machine.session.score, 0);
        assert!(machine.session.found.is_empty());
        assert_eq!(machine.hints_found.pangrams, 0);
        assert_eq!(machine.hints_puzzle.pangrams, 1);
    }

    #[test]
    fn rank_notifications_fire_once_each() {
        let mut machine = nastero();
        // max_score = 13 + 10 + 1 = 24; stoner alone is 13 >= round(24*0.5)=12
        type_word(&mut machine, "stoner");
        machine.submit_word();
        assert!(machine.poll_rank().is_empty());

        type_word(&mut machine, "notes");
        machine.submit_word();
        // 23 >= round(24*0.7)=17 but < 24
        assert_eq!(machine.poll_rank(), vec![Notification::Genius]);
        assert!(machine.poll_rank().is_empty());

        type_word(&mut machine, "nest");
        machine.submit_word();
        assert_eq!(machine.poll_rank(), vec![Notification::QueenBee]);
        assert!(machine.poll_rank().is_empty());
    }

    #[test]
    fn jumping_to_full_score_fires_both_notifications() {
        let mut words = WordMap::new();
        words.insert("stoner".into(), vec!["stoner".into()]);
        let mut machine = PuzzleMachine::new(42);
        machine.install(PuzzleData {
            letters: vec!['n', 'a', 's', 't', 'e', 'r', 'o'],
            words,
            lemmas: BTreeMap::new(),
            forms: WordMap::new(),
            pangrams: vec!["stoner".into()],
            day: 0,
        });
        assert_eq!(machine.session.max_score, 13);

        type_word(&mut machine, "stoner");
        machine.submit_word();
        assert_eq!(
            machine.poll_rank(),
            vec![Notification::Genius, Notification::QueenBee]
        );
        assert!(machine.poll_rank().is_empty());
    }
}
