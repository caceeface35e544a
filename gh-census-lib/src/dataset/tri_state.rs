/// A boolean that may also be unknown.
///
/// GitHub reports `hireable` as `true`, `false` or `null`, and the distinction between
/// "no" and "never said" matters for the partitioned statistics. Queries that split a
/// population in two state explicitly which side [`TriState::Unknown`] falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum TriState {
    #[strum(serialize = "true")]
    True,

    #[strum(serialize = "false")]
    False,

    #[default]
    #[strum(serialize = "")]
    Unknown,
}

impl TriState {
    /// Leniently parse a table cell.
    ///
    /// `true`/`1`/`yes` and `false`/`0`/`no` are recognized in any case; anything else,
    /// including the empty string, is unknown.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if ["true", "1", "yes"].iter().any(|t| s.eq_ignore_ascii_case(t)) {
            Self::True
        } else if ["false", "0", "no"].iter().any(|f| s.eq_ignore_ascii_case(f)) {
            Self::False
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// Encode as 1.0 / 0.0 for numeric work, `None` when unknown.
    #[must_use]
    pub const fn encode(self) -> Option<f64> {
        match self {
            Self::True => Some(1.0),
            Self::False => Some(0.0),
            Self::Unknown => None,
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::True,
            Some(false) => Self::False,
            None => Self::Unknown,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        Self::from(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TriState::True.to_string(), "true");
        assert_eq!(TriState::False.to_string(), "false");
        assert_eq!(TriState::Unknown.to_string(), "");
    }

    #[test]
    fn test_parse_recognized_values() {
        assert_eq!(TriState::parse("true"), TriState::True);
        assert_eq!(TriState::parse("TRUE"), TriState::True);
        assert_eq!(TriState::parse(" yes "), TriState::True);
        assert_eq!(TriState::parse("1"), TriState::True);
        assert_eq!(TriState::parse("false"), TriState::False);
        assert_eq!(TriState::parse("False"), TriState::False);
        assert_eq!(TriState::parse("no"), TriState::False);
        assert_eq!(TriState::parse("0"), TriState::False);
    }

    #[test]
    fn test_parse_unknown_values() {
        assert_eq!(TriState::parse(""), TriState::Unknown);
        assert_eq!(TriState::parse("maybe"), TriState::Unknown);
        assert_eq!(TriState::parse("nan"), TriState::Unknown);
    }

    #[test]
    fn test_unknown_is_distinct_from_false() {
        assert_ne!(TriState::Unknown, TriState::False);
        assert_eq!(TriState::Unknown.as_bool(), None);
        assert!(!TriState::Unknown.is_true());
        assert!(!TriState::False.is_true());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(TriState::from(Some(true)), TriState::True);
        assert_eq!(TriState::from(Some(false)), TriState::False);
        assert_eq!(TriState::from(None), TriState::Unknown);
    }

    #[test]
    fn test_encode() {
        assert_eq!(TriState::True.encode(), Some(1.0));
        assert_eq!(TriState::False.encode(), Some(0.0));
        assert_eq!(TriState::Unknown.encode(), None);
    }
}
