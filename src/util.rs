use std::collections::HashMap;

/// Returns the longest run of leading bytes shared by `key` and `other`, together with its
/// length.
///
/// Matching stops at the first mismatching byte or at the end of the shorter input. An empty
/// input on either side yields an empty prefix.
pub fn longest_common_prefix<'a>(key: &'a [u8], other: &[u8]) -> (&'a [u8], usize) {
    let mut i = 0;

    while i < key.len() && i < other.len() && key[i] == other[i] {
        i += 1;
    }

    (&key[..i], i)
}

/// Smallest child byte strictly greater than `byte`, if any.
///
/// Children are stored unordered, so this is a scan over the sibling set.
pub fn smallest_successor<T>(children: &HashMap<u8, T>, byte: u8) -> Option<u8> {
    children.keys().copied().filter(|&k| k > byte).min()
}

/// Largest child byte strictly smaller than `byte`, if any.
pub fn largest_predecessor<T>(children: &HashMap<u8, T>, byte: u8) -> Option<u8> {
    children.keys().copied().filter(|&k| k < byte).max()
}

/// The smallest child byte, or `None` for a leaf.
pub fn leftmost_child<T>(children: &HashMap<u8, T>) -> Option<u8> {
    children.keys().copied().min()
}

/// The largest child byte, or `None` for a leaf.
pub fn rightmost_child<T>(children: &HashMap<u8, T>) -> Option<u8> {
    children.keys().copied().max()
}
