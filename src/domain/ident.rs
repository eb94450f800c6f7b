use std::{convert::Infallible, fmt, ops::Deref, str::FromStr, sync::LazyLock};

use regex::Regex;

/// A node identifier.
///
/// Identity is string equality; the store imposes no format beyond
/// uniqueness. Two grammars occur in practice: `prefix-number` ids such as
/// `br-1` (manually created nodes, and the form [`next_id`] produces) and
/// `N<number>` ids minted by the outline parser. Imported data may carry
/// anything.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for NodeId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for NodeId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+)-(\d+)").expect("pattern is valid"));

/// Derives the next unique id from the ids already in use.
///
/// Scans for ids containing `<letters>-<digits>` and returns the one-higher
/// neighbour of the largest numeric suffix, keeping that id's prefix:
/// `a-3`, `b-7`, `a-10` yields `a-11`. When no id matches the pattern the
/// fixed fallback `z-1` is returned.
///
/// The prefix of the returned id is whichever matching id happened to carry
/// the maximum number; it is not scoped to any kind. When several ids tie
/// for the maximum, which prefix survives is unspecified; callers must not
/// rely on it.
#[must_use]
pub fn next_id<'a, I>(ids: I) -> NodeId
where
    I: IntoIterator<Item = &'a NodeId>,
{
    let mut best: Option<(&str, u64)> = None;
    for id in ids {
        let Some(captures) = ID_PATTERN.captures(id.as_str()) else {
            continue;
        };
        let (Some(prefix), Some(number)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let Ok(number) = number.as_str().parse::<u64>() else {
            continue;
        };
        if best.is_none_or(|(_, max)| number > max) {
            best = Some((prefix.as_str(), number));
        }
    }

    best.map_or_else(
        || NodeId::from("z-1"),
        |(prefix, max)| NodeId(format!("{prefix}-{}", max + 1)),
    )
}
