use super::answer::Answer;
use super::questions::{self, QueryOptions};
use crate::dataset::Dataset;

#[derive(Debug)]
pub struct QuestionDef {
    pub number: u8,
    pub title: &'static str,
    pub answer: fn(&Dataset, &QueryOptions) -> Answer,
}

macro_rules! question_def {
    ($number:expr, $title:expr, $answer:path) => {
        QuestionDef {
            number: $number,
            title: $title,
            answer: $answer,
        }
    };
}

pub const QUESTION_DEFINITIONS: &[QuestionDef] = &[
    question_def!(1, "Top 5 users by followers", questions::top_followers),
    question_def!(2, "5 earliest registered users", questions::earliest_registered),
    question_def!(3, "Top 3 licenses", questions::top_licenses),
    question_def!(4, "Majority company", questions::majority_company),
    question_def!(5, "Most popular language", questions::most_popular_language),
    question_def!(
        6,
        "Second most popular language among users who joined after 2020",
        questions::second_language_of_recent_joiners
    ),
    question_def!(7, "Language with highest average stars", questions::highest_average_stars),
    question_def!(8, "Top 5 users by leader_strength", questions::top_leader_strength),
    question_def!(9, "Correlation between followers and public repos", questions::followers_repos_correlation),
    question_def!(10, "Regression slope of followers on repos", questions::followers_per_repo_slope),
    question_def!(11, "Correlation between projects and wiki enabled", questions::projects_wiki_correlation),
    question_def!(
        12,
        "Average following difference (hireable - non-hireable)",
        questions::hireable_following_difference
    ),
    question_def!(
        13,
        "Regression slope of followers on bio word count",
        questions::followers_per_bio_word_slope
    ),
    question_def!(14, "Top 5 users by weekend repo creations", questions::top_weekend_creators),
    question_def!(
        15,
        "Fraction difference in email sharing (hireable - non-hireable)",
        questions::hireable_email_difference
    ),
    question_def!(16, "Most common surname(s)", questions::most_common_surname),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_are_numbered_in_order() {
        assert_eq!(QUESTION_DEFINITIONS.len(), 16);
        for (i, def) in QUESTION_DEFINITIONS.iter().enumerate() {
            assert_eq!(usize::from(def.number), i + 1);
            assert!(!def.title.is_empty());
        }
    }
}
