//! Smart PC builder engine.
//!
//! Pure, synchronous domain logic: the build state and its reducer, the
//! pairwise compatibility rule table, the candidate filter, and build
//! aggregation. Nothing here performs IO or caches results; callers that need
//! memoization can key on [`BuildSelection::fingerprint`] plus the target
//! category.

pub mod aggregate;
pub mod build;
pub mod filter;
pub mod rules;
pub mod session;

pub use aggregate::{BuildMode, FULL_PC_REQUIRED, is_complete, items, missing, total};
pub use build::{BuildFingerprint, BuildSelection, Selection, apply_selection};
pub use filter::{BuildConstraints, filter_candidates, filter_candidates_with};
pub use rules::{MatchFn, PAIR_RULES, PairRule};
pub use session::BuilderSession;
