//! Access token check for the feed endpoint.

use std::hint::black_box;

/// Compare a presented token against the configured one.
///
/// Length is not treated as secret and mismatching lengths return early.
/// For equal lengths every byte pair is visited, so the running time depends
/// only on the length and not on where the inputs differ.
pub fn authenticate(presented: &str, expected: &str) -> bool {
    let presented = presented.as_bytes();
    let expected = expected.as_bytes();

    if presented.len() != expected.len() {
        return false;
    }

    let diff = presented
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| black_box(acc | (a ^ b)));

    diff == 0
}
