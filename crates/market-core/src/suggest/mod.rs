//! Search suggestions.
//!
//! Generators synthesize completions, the engine debounces keystrokes in
//! front of a backend, and the selection cursor turns arrow keys and Enter
//! into a navigation.

mod backend;
mod debounce;
mod navigation;

pub use backend::{
    suggest, CategoryGenerator, QualifierGenerator, SuggestionBackend, SuggestionGenerator,
    SuggestionKind, SuggestionResult, SynthesizedBackend, UsedPrefixGenerator,
    DEFAULT_SUGGESTION_LIMIT,
};
pub use debounce::{SuggestionEngine, SuggestionState, DEFAULT_DEBOUNCE};
pub use navigation::{NavKey, SearchCommit, SelectionCursor};
