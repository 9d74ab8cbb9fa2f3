pub mod api;
pub mod core;
pub mod input;
pub mod puzzle;
pub mod store;

// Re-export key types at crate root for convenience
pub use api::engine::{ClickFlash, Engine, EngineConfig, UiState};
pub use api::types::{HitFn, HitTester, NoHit, Notification, Region, TickOutcome};
pub use self::core::metrics::Metrics;
pub use self::core::rng::Rng;
pub use self::core::scroll::ScrollPane;
pub use input::pointer::{PointerSample, PointerState};
pub use input::queue::{InputEvent, InputQueue, KeyInput};
pub use input::router::{GestureRouter, Interaction, ScrollAxis};
pub use puzzle::hints::{recompute_totals, HintsData, SavedHints};
pub use puzzle::machine::{PuzzleMachine, PuzzleStatus, WordFeedback};
pub use puzzle::rank::{rank_index, GENIUS_RANK, QUEEN_BEE_RANK, RANK_FRACTIONS};
pub use puzzle::session::{remove_accents, score_word, PuzzleData, PuzzleSession, WordMap};
pub use puzzle::source::{epoch_day, resolve_day, PuzzleSource, SourceError};
pub use store::backend::{MemoryStorage, Storage, StorageError};
pub use store::gateway::{PersistenceGateway, SavedGame};
