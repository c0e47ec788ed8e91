//! Normalized character sets and the scanning operators built on them.

use std::fmt;

/// Largest set handled by the straight-line membership test.
const FEW_MAX: usize = 10;
/// Largest set handled by the sorted linear scan.
const SCAN_MAX: usize = 80;

/// A set of characters, normalized (sorted, duplicate-free) at construction.
///
/// The membership test is picked once, by set size: tiny sets use a
/// straight-line disjunction, mid-size sets a linear scan that bails early
/// thanks to the sort order, and large sets a binary search.
#[derive(Clone, PartialEq, Eq)]
pub struct CharSet {
    chars: Box<[char]>,
    tier: Tier,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tier {
    Empty,
    Few,
    Scan,
    Search,
}

impl CharSet {
    /// Build a set from the characters of `chars`.
    pub fn new(chars: &str) -> CharSet {
        CharSet::from_chars(chars.chars().collect())
    }

    /// Build a set containing both the uppercase and lowercase forms of
    /// every character in `chars`.
    pub fn case_insensitive(chars: &str) -> CharSet {
        let mut v = Vec::with_capacity(chars.len() * 2);
        for c in chars.chars() {
            v.extend(c.to_lowercase());
            v.extend(c.to_uppercase());
        }
        CharSet::from_chars(v)
    }

    fn from_chars(mut v: Vec<char>) -> CharSet {
        v.sort_unstable();
        v.dedup();
        let tier = match v.len() {
            0 => Tier::Empty,
            1..=FEW_MAX => Tier::Few,
            len if len <= SCAN_MAX => Tier::Scan,
            _ => Tier::Search,
        };
        CharSet {
            chars: v.into_boxed_slice(),
            tier,
        }
    }

    /// True if the set has no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of characters in the set.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Membership test, dispatched on the tier chosen at construction.
    pub fn contains(&self, c: char) -> bool {
        match self.tier {
            Tier::Empty => false,
            Tier::Few => {
                let cs = &self.chars;
                match cs.len() {
                    1 => c == cs[0],
                    2 => c == cs[0] || c == cs[1],
                    3 => c == cs[0] || c == cs[1] || c == cs[2],
                    _ => cs.iter().any(|&x| x == c),
                }
            }
            Tier::Scan => {
                for &x in self.chars.iter() {
                    if x == c {
                        return true;
                    }
                    if x > c {
                        return false;
                    }
                }
                false
            }
            Tier::Search => self.chars.binary_search(&c).is_ok(),
        }
    }

    /// Advance from `from` while the current character is in the set.
    /// Returns the final byte position; never moves backward.
    pub fn seek_while(&self, source: &str, from: usize) -> usize {
        let mut pos = from;
        for c in source[from..].chars() {
            if !self.contains(c) {
                break;
            }
            pos += c.len_utf8();
        }
        pos
    }

    /// Advance from `from` while the current character is *not* in the set.
    pub fn seek_until(&self, source: &str, from: usize) -> usize {
        let mut pos = from;
        for c in source[from..].chars() {
            if self.contains(c) {
                break;
            }
            pos += c.len_utf8();
        }
        pos
    }

    /// The set's characters as a string, for error messages.
    pub fn summary(&self) -> String {
        self.chars.iter().collect()
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharSet({:?})", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let set = CharSet::new("cbaab");
        assert_eq!(set.summary(), "abc");
        assert_eq!(set.len(), 3);

        assert!(CharSet::new("").is_empty());
        assert!(!CharSet::new("").contains('a'));
    }

    #[test]
    fn test_membership_tiers() {
        // One char, a few chars, a scan-size set, and a search-size set
        // must all agree on membership.
        let alphabet: String = ('\u{21}'..'\u{1ff}').collect();
        for n in [1, 2, 5, 10, 11, 79, 80, 81, 200] {
            let subset: String = alphabet.chars().take(n).collect();
            let set = CharSet::new(&subset);
            for c in alphabet.chars() {
                assert_eq!(set.contains(c), subset.contains(c), "n={} c={:?}", n, c);
            }
        }
    }

    #[test]
    fn test_seek() {
        let digits = CharSet::new("0123456789");
        assert_eq!(digits.seek_while("123abc", 0), 3);
        assert_eq!(digits.seek_while("abc", 0), 0);
        assert_eq!(digits.seek_while("123", 0), 3);
        assert_eq!(digits.seek_until("abc123", 0), 3);
        assert_eq!(digits.seek_until("abc", 0), 3);
        assert_eq!(digits.seek_while("", 0), 0);
        assert_eq!(digits.seek_until("", 0), 0);

        // resuming mid-string
        assert_eq!(digits.seek_while("12ab34", 4), 6);
    }

    #[test]
    fn test_seek_multibyte() {
        let set = CharSet::new("é日");
        let s = "é日x";
        let end = set.seek_while(s, 0);
        assert_eq!(&s[..end], "é日");
        assert_eq!(set.seek_until("abé", 0), 2);
    }

    #[test]
    fn test_case_insensitive() {
        let set = CharSet::case_insensitive("aBc");
        for c in "abcABC".chars() {
            assert!(set.contains(c));
        }
        assert!(!set.contains('d'));
        assert_eq!(set.summary(), "ABCabc");
    }
}
