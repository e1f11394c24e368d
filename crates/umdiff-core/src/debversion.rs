//! Debian version ordering (Debian Policy §5.6.12).
//!
//! Used only to annotate a changed entry as an upgrade or a downgrade. The
//! diff engine decides "same" vs "different" by string equality and never
//! consults this module for that.

use std::cmp::Ordering;

/// A version split into its epoch, upstream and revision parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebianVersion<'a> {
    pub epoch: u64,
    pub upstream: &'a str,
    pub revision: &'a str,
}

impl<'a> DebianVersion<'a> {
    /// Split `[epoch:]upstream[-revision]`.
    ///
    /// A non-numeric epoch is not an epoch: the whole string is then taken as
    /// upstream (plus revision), which still yields a total order.
    pub fn parse(version: &'a str) -> Self {
        let version = version.trim();
        let (epoch, rest) = match version.split_once(':') {
            Some((epoch, rest)) if !epoch.is_empty() && epoch.bytes().all(|b| b.is_ascii_digit()) => {
                (epoch.parse().unwrap_or(u64::MAX), rest)
            }
            _ => (0, version),
        };
        let (upstream, revision) = match rest.rsplit_once('-') {
            Some((upstream, revision)) => (upstream, revision),
            None => (rest, ""),
        };
        Self {
            epoch,
            upstream,
            revision,
        }
    }
}

impl Ord for DebianVersion<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_fragment(self.upstream, other.upstream))
            .then_with(|| compare_fragment(self.revision, other.revision))
    }
}

impl PartialOrd for DebianVersion<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two version strings under Debian rules.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    DebianVersion::parse(a).cmp(&DebianVersion::parse(b))
}

/// True when `new` sorts strictly after `old`.
pub fn is_upgrade(old: &str, new: &str) -> bool {
    compare_versions(old, new) == Ordering::Less
}

// '~' sorts before everything including end of string, letters before
// non-letters, digits are handled by the numeric pass.
fn char_order(c: Option<u8>) -> i32 {
    match c {
        None => 0,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => i32::from(c),
        Some(b'~') => -1,
        Some(c) => i32::from(c) + 256,
    }
}

fn compare_fragment(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0usize, 0usize);

    while i < a.len() || j < b.len() {
        // Non-digit prefix, character by character.
        while (i < a.len() && !a[i].is_ascii_digit()) || (j < b.len() && !b[j].is_ascii_digit()) {
            let ac = char_order(a.get(i).copied());
            let bc = char_order(b.get(j).copied());
            if ac != bc {
                return ac.cmp(&bc);
            }
            i += 1;
            j += 1;
        }

        // Digit run, numerically: skip leading zeros, longer run wins, else
        // the first differing digit decides.
        while i < a.len() && a[i] == b'0' {
            i += 1;
        }
        while j < b.len() && b[j] == b'0' {
            j += 1;
        }
        let mut first_diff = Ordering::Equal;
        while i < a.len() && a[i].is_ascii_digit() && j < b.len() && b[j].is_ascii_digit() {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }
        if i < a.len() && a[i].is_ascii_digit() {
            return Ordering::Greater;
        }
        if j < b.len() && b[j].is_ascii_digit() {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }
    Ordering::Equal
}
