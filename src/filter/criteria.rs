use crate::event::{TraceEvent, TraceLevel};
use std::collections::HashSet;

/// Sentinel position bound meaning "no upper limit".
pub const UNBOUNDED: i64 = -1;

/// Parse one endpoint token of a `--range` argument.
///
/// `START`, `BEGIN` and `FIRST` map to 0 and `END`/`LAST` to the unbounded
/// sentinel, case-insensitively; anything else is read as a base-10 integer.
/// An unparsable token silently falls back to `default` rather than raising
/// an error. Existing invocations rely on that fallback, so it is kept as a
/// documented quirk of the range syntax.
pub fn parse_range_bound(token: &str, default: i64) -> i64 {
    match token.to_uppercase().as_str() {
        "START" | "BEGIN" | "FIRST" => 0,
        "END" | "LAST" => UNBOUNDED,
        other => other.parse().unwrap_or(default),
    }
}

/// Immutable multi-criteria filter configuration for one run.
///
/// Every dimension is optional: an empty allow-list or absent substring
/// imposes no restriction on that dimension.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    level_ceiling: TraceLevel,
    position_start: i64,
    position_end: i64,
    allowed_providers: HashSet<String>,
    allowed_event_names: HashSet<String>,
    allowed_activity_ids: HashSet<String>,
    payload_substring: Option<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            level_ceiling: TraceLevel::Verbose,
            position_start: 0,
            position_end: UNBOUNDED,
            allowed_providers: HashSet::new(),
            allowed_event_names: HashSet::new(),
            allowed_activity_ids: HashSet::new(),
            payload_substring: None,
        }
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude events more verbose than `level`.
    pub fn with_level_ceiling(mut self, level: TraceLevel) -> Self {
        self.level_ceiling = level;
        self
    }

    /// Apply a 1-2 token range list as split from the CLI argument: the first
    /// token bounds the start (default 0), the last token, when a second one
    /// exists, bounds the end (default unbounded). A single token therefore
    /// only constrains the start.
    pub fn with_range(mut self, tokens: &[String]) -> Self {
        if let Some(first) = tokens.first() {
            self.position_start = parse_range_bound(first, 0);
        }
        if tokens.len() > 1 {
            if let Some(last) = tokens.last() {
                self.position_end = parse_range_bound(last, UNBOUNDED);
            }
        }
        self
    }

    pub fn with_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_providers.extend(providers.into_iter().map(Into::into));
        self
    }

    pub fn with_event_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_event_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_activity_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_activity_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_payload_substring(mut self, needle: Option<impl Into<String>>) -> Self {
        self.payload_substring = needle.map(Into::into);
        self
    }

    /// True when any single exclusion reason applies to the event at the
    /// given 1-based sequence position. The reasons are independent; there is
    /// no precedence among them.
    pub(crate) fn excludes(
        &self,
        event: &TraceEvent,
        position: i64,
        rendered_payload: &str,
    ) -> bool {
        if event.level > self.level_ceiling {
            return true;
        }
        if position < self.position_start {
            return true;
        }
        if self.position_end != UNBOUNDED && position > self.position_end {
            return true;
        }
        if !self.allowed_providers.is_empty()
            && !self.allowed_providers.contains(&event.provider_name)
        {
            return true;
        }
        if !self.allowed_event_names.is_empty()
            && !self.allowed_event_names.contains(&event.event_name)
        {
            return true;
        }
        if !self.allowed_activity_ids.is_empty()
            && !self.allowed_activity_ids.contains(&event.activity_id)
        {
            return true;
        }
        if let Some(needle) = &self.payload_substring {
            if !needle.is_empty() && !rendered_payload.contains(needle.as_str()) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_bound_keywords() {
        assert_eq!(parse_range_bound("START", 7), 0);
        assert_eq!(parse_range_bound("begin", 7), 0);
        assert_eq!(parse_range_bound("First", 7), 0);
        assert_eq!(parse_range_bound("END", 7), UNBOUNDED);
        assert_eq!(parse_range_bound("last", 7), UNBOUNDED);
    }

    #[test]
    fn test_parse_range_bound_numbers() {
        assert_eq!(parse_range_bound("42", 0), 42);
        assert_eq!(parse_range_bound("0", 9), 0);
    }

    #[test]
    fn test_parse_range_bound_falls_back_silently() {
        assert_eq!(parse_range_bound("oops", 13), 13);
        assert_eq!(parse_range_bound("", UNBOUNDED), UNBOUNDED);
        assert_eq!(parse_range_bound("1x", 0), 0);
    }

    #[test]
    fn test_with_range_single_token_leaves_end_unbounded() {
        let criteria = FilterCriteria::new().with_range(&["3".to_string()]);
        assert_eq!(criteria.position_start, 3);
        assert_eq!(criteria.position_end, UNBOUNDED);
    }

    #[test]
    fn test_with_range_two_tokens() {
        let criteria =
            FilterCriteria::new().with_range(&["2".to_string(), "4".to_string()]);
        assert_eq!(criteria.position_start, 2);
        assert_eq!(criteria.position_end, 4);
    }

    #[test]
    fn test_with_range_keywords_are_unrestricted() {
        let criteria =
            FilterCriteria::new().with_range(&["start".to_string(), "end".to_string()]);
        assert_eq!(criteria.position_start, 0);
        assert_eq!(criteria.position_end, UNBOUNDED);
    }
}
