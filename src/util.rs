//! Length prefix helpers.

use crate::config::MAX_SIZE_DIGITS;
use smallvec::SmallVec;

/// ASCII decimal digits of a length prefix.
pub type Digits = SmallVec<[u8; MAX_SIZE_DIGITS]>;

/// Converts a `u64` to its ASCII decimal representation.
///
/// # Arguments
///
/// * `num: u64` - The integer to be converted.
///
/// # Example
///
/// ```
/// use lich::util::u64_to_digits;
///
/// assert_eq!(&u64_to_digits(0)[..], b"0");
/// assert_eq!(&u64_to_digits(126)[..], b"126");
/// ```
pub fn u64_to_digits(mut num: u64) -> Digits {
    let mut out = Digits::new();
    loop {
        out.push(b'0' + (num % 10) as u8);
        num /= 10;
        if num == 0 {
            break;
        }
    }
    out.reverse();
    out
}

/// Parses a run of ASCII decimal digits. Returns `None` when the run is empty,
/// contains anything but digits, or doesn't fit into a `u64`.
///
/// # Example
///
/// ```
/// use lich::util::digits_to_u64;
///
/// assert_eq!(digits_to_u64(b"26"), Some(26));
/// assert_eq!(digits_to_u64(b""), None);
/// assert_eq!(digits_to_u64(b"18446744073709551616"), None);
/// ```
pub fn digits_to_u64(digits: &[u8]) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0u64, |acc, &d| {
        if !d.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u64::from(d - b'0'))
    })
}

/// Number of bytes in the decimal representation of `num`.
pub(crate) fn digit_len(mut num: u64) -> u64 {
    let mut len = 1;
    while num >= 10 {
        num /= 10;
        len += 1;
    }
    len
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_agree() {
        for &n in &[0, 1, 9, 10, 99, 100, 12345, u64::max_value()] {
            let digs = u64_to_digits(n);
            assert_eq!(digs.len() as u64, digit_len(n));
            assert_eq!(digits_to_u64(&digs), Some(n));
        }
    }

    #[test]
    fn max_u64_fits_in_prefix() {
        assert_eq!(u64_to_digits(u64::max_value()).len(), MAX_SIZE_DIGITS);
        assert!(!u64_to_digits(u64::max_value()).spilled());
    }
}
