//! Smart folder evaluation
//!
//! Decides which documents belong to a smart folder. Evaluation is a pure
//! recomputation over the document cache; callers re-run it whenever the
//! cache or the folder definition changes.

mod date;
mod evaluator;

pub use date::{add_local_days, date_relation_holds, local_midnight, localize_date};
pub use evaluator::{evaluate_leaf, filter_documents, matches, LeafOutcome};
