use std::ops::RangeInclusive;

/// Indices to prefetch around `center`: a short look-behind and a longer
/// look-ahead, clamped to the feed.
///
/// Returns `None` for an empty feed or a centre past its end.
pub fn prefetch_window(
    len: usize,
    center: usize,
    behind: usize,
    ahead: usize,
) -> Option<RangeInclusive<usize>> {
    if len == 0 || center >= len {
        return None;
    }
    let start = center.saturating_sub(behind);
    let end = center.saturating_add(ahead).min(len - 1);
    Some(start..=end)
}
