/// Cut `s` down to `max_width` characters, ending in "…" when something was dropped.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_width.saturating_sub(1)).collect();
    out.push('…');
    out
}
