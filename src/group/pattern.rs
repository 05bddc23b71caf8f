// Author: Lukas Bower
// Purpose: Scale-level name matching and numeric level ordering.
#![forbid(unsafe_code)]

use regex::Regex;

use crate::error::MetadataError;

/// Canonical scale-level name pattern: `s` followed by decimal digits.
pub const DEFAULT_SCALE_LEVEL_PATTERN: &str = r"^s\d+$";

/// Decides whether a child name denotes a scale level and which one.
///
/// The canonical `s<N>` form is checked without a regex; custom patterns are
/// compiled once and owned by the parser holding them.
#[derive(Debug, Clone, Default)]
pub struct ScaleLevelPattern {
    custom: Option<Regex>,
}

impl ScaleLevelPattern {
    /// Compile `pattern`. The canonical pattern string selects the built-in
    /// matcher.
    ///
    /// For custom patterns the level number is taken from the first capture
    /// group when the pattern has one, otherwise from the trailing digits of
    /// the name.
    pub fn new(pattern: &str) -> Result<Self, MetadataError> {
        if pattern == DEFAULT_SCALE_LEVEL_PATTERN {
            return Ok(Self::default());
        }
        Ok(Self {
            custom: Some(Regex::new(pattern)?),
        })
    }

    /// Pattern source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.custom
            .as_ref()
            .map_or(DEFAULT_SCALE_LEVEL_PATTERN, Regex::as_str)
    }

    /// Whether `name` names a scale level.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.level_key(name).is_some()
    }

    /// Ordering key for `name`, or `None` when it is not a scale level.
    #[must_use]
    pub fn level_key(&self, name: &str) -> Option<LevelKey> {
        let digits = match &self.custom {
            None => canonical_digits(name)?,
            Some(regex) => {
                let captures = regex.captures(name)?;
                match captures.get(1) {
                    Some(group) => group.as_str(),
                    None => trailing_digits(name),
                }
            }
        };
        Some(LevelKey::new(digits, name))
    }
}

/// Sort key placing scale levels in ascending numeric order.
///
/// Names whose digits are missing or overflow `u64` sort after every
/// numbered level; ties break on the full name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LevelKey {
    unnumbered: bool,
    index: u64,
    name: String,
}

impl LevelKey {
    fn new(digits: &str, name: &str) -> Self {
        match digits.parse::<u64>() {
            Ok(index) => Self {
                unnumbered: false,
                index,
                name: name.to_owned(),
            },
            Err(_) => Self {
                unnumbered: true,
                index: 0,
                name: name.to_owned(),
            },
        }
    }

    /// Numeric level, when the name carried a representable one.
    #[must_use]
    pub fn index(&self) -> Option<u64> {
        (!self.unnumbered).then_some(self.index)
    }

    /// Child name the key was derived from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn canonical_digits(name: &str) -> Option<&str> {
    let digits = name.strip_prefix('s')?;
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

fn trailing_digits(name: &str) -> &str {
    let start = name
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map_or(name.len(), |(idx, _)| idx);
    &name[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        let pattern = ScaleLevelPattern::default();
        for name in ["s0", "s1", "s10", "s007"] {
            assert!(pattern.is_match(name), "{name} should match");
        }
        for name in ["s", "S0", "s0a", "as0", "scale0", "", "s-1", "s 1"] {
            assert!(!pattern.is_match(name), "{name} should not match");
        }
    }

    #[test]
    fn keys_order_numerically() {
        let pattern = ScaleLevelPattern::default();
        let key = |n: &str| pattern.level_key(n).expect("scale level");
        assert!(key("s2") < key("s10"));
        assert!(key("s01") < key("s1"));
        assert!(key("s1") < key("s2"));
        assert_eq!(key("s10").index(), Some(10));
        let huge = key("s99999999999999999999999");
        assert_eq!(huge.index(), None);
        assert!(key("s18446744073709551615") < huge);
        assert_eq!(huge.name(), "s99999999999999999999999");
    }

    #[test]
    fn explicit_default_pattern_uses_builtin_matcher() {
        let pattern = ScaleLevelPattern::new(DEFAULT_SCALE_LEVEL_PATTERN).expect("compiles");
        assert_eq!(pattern.as_str(), DEFAULT_SCALE_LEVEL_PATTERN);
        assert!(pattern.is_match("s3"));
    }

    #[test]
    fn custom_pattern_with_capture_group() {
        let pattern = ScaleLevelPattern::new(r"^scale(\d+)_v2$").expect("compiles");
        assert_eq!(pattern.level_key("scale3_v2").and_then(|k| k.index()), Some(3));
        assert!(!pattern.is_match("s3"));
    }

    #[test]
    fn custom_pattern_without_capture_uses_trailing_digits() {
        let pattern = ScaleLevelPattern::new(r"^level\d+$").expect("compiles");
        assert_eq!(pattern.level_key("level12").and_then(|k| k.index()), Some(12));
        assert_eq!(trailing_digits("abc"), "");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = ScaleLevelPattern::new("s(").expect_err("unbalanced group");
        assert!(matches!(err, MetadataError::Pattern(_)));
    }
}
