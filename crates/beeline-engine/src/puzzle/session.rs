use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized lowercase answer -> ordered surface forms sharing that answer.
/// One key may expand to several scorable "words" when forms and lemmas
/// differ.
pub type WordMap = BTreeMap<String, Vec<String>>;

/// What the external puzzle generator hands back for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleData {
    pub letters: Vec<char>,
    pub words: WordMap,
    pub lemmas: BTreeMap<String, String>,
    pub forms: WordMap,
    pub pangrams: Vec<String>,
    pub day: u32,
}

/// The authoritative per-day game state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PuzzleSession {
    /// Seven distinct uppercase letters; `letters[0]` is the mandatory center
    /// letter and never moves. Empty while no puzzle is loaded.
    pub letters: Vec<char>,
    pub words: WordMap,
    pub lemmas: BTreeMap<String, String>,
    pub forms: WordMap,
    pub pangrams: Vec<String>,
    /// Epoch day number this puzzle belongs to. Immutable once created.
    pub day: u32,
    /// Sum of `score_word` over every valid surface form, fixed at creation.
    pub max_score: u32,
    /// The in-progress input buffer, cleared on submit.
    pub word: String,
    /// Surface forms discovered so far, newest first.
    pub found: Vec<String>,
    /// The subset of `found` produced by the most recent submission.
    pub just_found: Vec<String>,
    pub score: u32,
}

impl PuzzleSession {
    /// Build a fresh session from generated puzzle data, uppercasing the
    /// letters and fixing `max_score`.
    pub fn from_data(data: PuzzleData) -> Self {
        let max_score = data
            .words
            .values()
            .flatten()
            .map(|form| score_word(form, &data.pangrams))
            .sum();
        Self {
            letters: data
                .letters
                .into_iter()
                .flat_map(|l| l.to_uppercase())
                .collect(),
            words: data.words,
            lemmas: data.lemmas,
            forms: data.forms,
            pangrams: data.pangrams,
            day: data.day,
            max_score,
            word: String::new(),
            found: Vec::new(),
            just_found: Vec::new(),
            score: 0,
        }
    }

    pub fn is_pangram(&self, form: &str) -> bool {
        self.pangrams.iter().any(|p| p == form)
    }

    /// The center letter, when a puzzle is loaded.
    pub fn center_letter(&self) -> Option<char> {
        self.letters.first().copied()
    }
}

/// Score one surface form: 4-letter words are worth exactly 1, otherwise one
/// point per letter plus 7 for a pangram.
pub fn score_word(form: &str, pangrams: &[String]) -> u32 {
    let len = form.chars().count() as u32;
    if len == 4 {
        return 1;
    }
    let bonus = if pangrams.iter().any(|p| p == form) {
        7
    } else {
        0
    };
    len + bonus
}

/// Strip diacritics the way the word lists expect (NFD + mark removal over
/// the Latin range): lookups and duplicate checks compare accent-free.
pub fn remove_accents(s: &str) -> String {
    s.chars().map(fold_accent).collect()
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'ē' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ī' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'ñ' => 'n',
        'ç' => 'c',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' | 'Ā' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' | 'Ē' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' | 'Ī' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ō' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' | 'Ū' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        other => other,
    }
}
