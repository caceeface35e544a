//! The analytic questions answered over a harvested [`Dataset`].
//!
//! Questions are statically registered in `question_def.rs`, each pairing a number and
//! title with a pure function from the dataset to an [`Answer`]. [`answer_all`] runs
//! every registered question in order.
//!
//! Questions whose precondition is not met (no companies, fewer than two languages,
//! an empty hireable partition, and so on) answer with [`Answer::NoData`] carrying a
//! fixed sentence instead of failing.

mod answer;
mod question_def;
mod questions;
mod stats;

pub use answer::{Answer, QuestionAnswer};
pub use question_def::{QUESTION_DEFINITIONS, QuestionDef};
pub use questions::{
    NO_COMPANY_DATA, NO_LANGUAGE_DATA, NO_NAME_DATA, NO_SURNAME_DATA, NOT_ENOUGH_HIREABLE_DATA, NOT_ENOUGH_LANGUAGE_DATA,
    QueryOptions,
};
pub use stats::{frequency_ranking, ols_slope, pearson, round3};

use crate::dataset::Dataset;

/// Answer every registered question against `dataset`.
pub fn answer_all(dataset: &Dataset, options: &QueryOptions) -> Vec<QuestionAnswer> {
    QUESTION_DEFINITIONS
        .iter()
        .map(|def| QuestionAnswer {
            def,
            answer: (def.answer)(dataset, options),
        })
        .collect()
}
