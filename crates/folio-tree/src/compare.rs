//! Natural (numeric-aware) string comparison.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two labels the way a file browser would.
///
/// With `numeric`, runs of ASCII digits compare by value, so `page-2`
/// sorts before `page-10`. With `case_insensitive`, letters compare by
/// their lowercase form.
///
/// Strings that differ only in ignored details (case, leading zeros)
/// compare equal; callers add their own tie-breakers.
pub(crate) fn natural_cmp(a: &str, b: &str, numeric: bool, case_insensitive: bool) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek().copied(), right.peek().copied()) {
            (Some(l), Some(r)) => (l, r),
            (l, r) => return l.is_some().cmp(&r.is_some()),
        };

        if numeric && l.is_ascii_digit() && r.is_ascii_digit() {
            let ln = take_digits(&mut left);
            let rn = take_digits(&mut right);
            let ord = compare_digit_runs(&ln, &rn);
            if ord != Ordering::Equal {
                return ord;
            }
            continue;
        }

        let ord = if case_insensitive {
            l.to_lowercase().cmp(r.to_lowercase())
        } else {
            l.cmp(&r)
        };
        if ord != Ordering::Equal {
            return ord;
        }
        left.next();
        right.next();
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

/// Compare digit strings by numeric value without overflow.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs() {
        assert_eq!(natural_cmp("page-2", "page-10", true, true), Ordering::Less);
        assert_eq!(natural_cmp("page-2", "page-10", false, true), Ordering::Greater);
    }

    #[test]
    fn test_leading_zeros_equal() {
        assert_eq!(natural_cmp("01-start", "1-start", true, true), Ordering::Equal);
        assert_eq!(natural_cmp("02-next", "10-end", true, true), Ordering::Less);
    }

    #[test]
    fn test_huge_numbers() {
        assert_eq!(
            natural_cmp("99999999999999999999999", "100000000000000000000000", true, true),
            Ordering::Less
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(natural_cmp("apple", "Banana", true, true), Ordering::Less);
        assert_eq!(natural_cmp("Apple", "apple", true, true), Ordering::Equal);
        assert_eq!(natural_cmp("apple", "Banana", true, false), Ordering::Greater);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("abc", "abcd", true, true), Ordering::Less);
        assert_eq!(natural_cmp("", "a", true, true), Ordering::Less);
        assert_eq!(natural_cmp("", "", true, true), Ordering::Equal);
    }

    #[test]
    fn test_digit_versus_letter() {
        assert_eq!(natural_cmp("1a", "a1", true, true), Ordering::Less);
    }
}
