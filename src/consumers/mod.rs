//! Event Consumers
//!
//! Handlers that turn an event stream into output:
//! - `IdentityTransform` - writes the document back out as XML
//! - `SrcFacts` - source-code measures for srcML documents
//! - `XmlStats` - number of events of each kind

pub mod facts;
pub mod identity;
pub mod stats;

pub use facts::SrcFacts;
pub use identity::IdentityTransform;
pub use stats::XmlStats;

/// Format an integer with `,` between groups of three digits
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Width of the value column of a report, sized from the input length
pub(crate) fn value_width(total_bytes: u64) -> usize {
    if total_bytes == 0 {
        return 5;
    }
    let estimate = (total_bytes as f64).log10() * 1.3 + 1.0;
    (estimate as usize).max(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_value_width() {
        assert_eq!(value_width(0), 5);
        assert_eq!(value_width(10), 5);
        // log10(10^9) * 1.3 + 1 = 12.7
        assert_eq!(value_width(1_000_000_000), 12);
    }
}
