// src/utils/format.rs

//! Display helpers for cards and list rows.

/// Text shown for a missing or zero amount.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format rupees with Indian digit grouping and no decimals.
///
/// # Examples
/// ```
/// use career_catalog::utils::format::format_inr;
///
/// assert_eq!(format_inr(Some(1_234_567)), "₹12,34,567");
/// assert_eq!(format_inr(Some(0)), "N/A");
/// assert_eq!(format_inr(None), "N/A");
/// ```
pub fn format_inr(amount: Option<u64>) -> String {
    match amount {
        Some(value) if value > 0 => format!("₹{}", group_indian(value)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Group digits as `xx,xx,xxx` (last three, then pairs).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// How the hidden remainder of a chip list is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// `+2 more`
    More,
    /// `+2`
    Count,
}

/// First `max` chips, plus an overflow chip when items were hidden.
pub fn chips<S: AsRef<str>>(items: &[S], max: usize, overflow: Overflow) -> Vec<String> {
    let mut shown: Vec<String> = items
        .iter()
        .take(max)
        .map(|item| item.as_ref().to_string())
        .collect();

    let hidden = items.len().saturating_sub(max);
    if hidden > 0 {
        shown.push(match overflow {
            Overflow::More => format!("+{hidden} more"),
            Overflow::Count => format!("+{hidden}"),
        });
    }
    shown
}

/// Shorten text to `max` characters, ending with an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(Some(999)), "₹999");
        assert_eq!(format_inr(Some(1_000)), "₹1,000");
        assert_eq!(format_inr(Some(100_000)), "₹1,00,000");
        assert_eq!(format_inr(Some(25_000_000)), "₹2,50,00,000");
    }

    #[test]
    fn test_chips_overflow() {
        let streams = ["B.Tech", "M.Tech", "MBA", "PhD", "B.Sc."];
        assert_eq!(
            chips(&streams, 3, Overflow::More),
            vec!["B.Tech", "M.Tech", "MBA", "+2 more"]
        );
        assert_eq!(chips(&streams, 4, Overflow::Count).last().unwrap(), "+1");
        assert_eq!(chips(&streams[..2], 3, Overflow::More).len(), 2);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Engineering Mathematics", 8), "Enginee…");
    }
}
