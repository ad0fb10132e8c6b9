//! Splits a raw input line into independent command segments.

/// Splits one line on the `&` separator into trimmed, non-empty segments.
///
/// Segments that are empty after trimming are dropped, which is how a
/// trailing `&` or doubled `&&` is tolerated without producing spurious
/// empty commands. Left-to-right order is preserved; it determines the
/// launch order of the resulting commands, nothing more.
///
/// An empty or all-whitespace line yields an empty vector.
pub fn split_commands(line: &str) -> Vec<&str> {
    line.split('&')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
