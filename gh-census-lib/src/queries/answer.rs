use super::question_def::QuestionDef;
use core::fmt::{Display, Formatter};

/// The answer to one question.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// An ordered list of logins or values, rendered comma-joined.
    List(Vec<String>),

    /// A single categorical value.
    Value(String),

    /// A statistic, already rounded to 3 decimals.
    Number(f64),

    /// The question's precondition was not met.
    NoData(&'static str),
}

impl Answer {
    /// Build a list answer from anything string-like.
    pub fn list<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(super::stats::round3(value))
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::List(items) => write!(f, "{}", items.join(",")),
            Self::Value(value) => write!(f, "{value}"),
            Self::Number(n) => write!(f, "{:.3}", super::stats::round3(*n)),
            Self::NoData(sentinel) => write!(f, "{sentinel}"),
        }
    }
}

/// A question paired with its answer.
#[derive(Debug, Clone)]
pub struct QuestionAnswer {
    pub def: &'static QuestionDef,
    pub answer: Answer,
}

impl QuestionAnswer {
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.def.number
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.def.title
    }
}
