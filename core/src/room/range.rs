//! Room-number range expressions
//!
//! The add-room form accepts input like `101-105, 201, 203`. Each
//! comma-separated token is either a single number or an inclusive
//! `start-end` range; output labels are zero-padded to three digits.

/// Widest range a single token may expand to. Wider tokens are treated as
/// malformed rather than materialized.
pub const MAX_RANGE_SPAN: u32 = 10_000;

/// Expand a range expression into room labels, in input order.
///
/// Malformed tokens (non-numeric, `start > end`, more than one `-`, or a
/// span above [`MAX_RANGE_SPAN`]) are dropped without error. An empty
/// result must be reported to the user by the caller.
pub fn parse_room_numbers(expression: &str) -> Vec<String> {
    let mut labels = Vec::new();

    for token in expression.split(',').map(str::trim) {
        if token.is_empty() {
            continue;
        }

        match token.split_once('-') {
            Some((start, end)) => {
                let (Some(start), Some(end)) = (parse_number(start), parse_number(end)) else {
                    continue;
                };
                if start > end || end - start >= MAX_RANGE_SPAN {
                    continue;
                }
                labels.extend((start..=end).map(format_label));
            }
            None => {
                if let Some(number) = parse_number(token) {
                    labels.push(format_label(number));
                }
            }
        }
    }

    labels
}

fn parse_number(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn format_label(number: u32) -> String {
    format!("{:03}", number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        assert_eq!(parse_room_numbers("101-103"), vec!["101", "102", "103"]);
    }

    #[test]
    fn test_list() {
        assert_eq!(parse_room_numbers("101,103"), vec!["101", "103"]);
    }

    #[test]
    fn test_single_is_padded() {
        assert_eq!(parse_room_numbers("5"), vec!["005"]);
    }

    #[test]
    fn test_non_numeric_dropped() {
        assert!(parse_room_numbers("abc").is_empty());
    }

    #[test]
    fn test_reversed_range_dropped() {
        assert!(parse_room_numbers("5-3").is_empty());
    }

    #[test]
    fn test_mixed_input_keeps_valid_tokens() {
        assert_eq!(
            parse_room_numbers(" 101-102 , x, 201 ,9-1, 203"),
            vec!["101", "102", "201", "203"]
        );
    }

    #[test]
    fn test_spaces_around_dash() {
        assert_eq!(parse_room_numbers("7 - 9"), vec!["007", "008", "009"]);
    }

    #[test]
    fn test_wide_numbers_not_truncated() {
        assert_eq!(parse_room_numbers("1001"), vec!["1001"]);
    }

    #[test]
    fn test_malformed_ranges() {
        assert!(parse_room_numbers("1-2-3").is_empty());
        assert!(parse_room_numbers("-5").is_empty());
        assert!(parse_room_numbers("1-").is_empty());
        assert!(parse_room_numbers("").is_empty());
        assert!(parse_room_numbers(" , ,").is_empty());
    }

    #[test]
    fn test_extra_dash_and_trailing_text_dropped() {
        // Lenient parsing would read these as 001-002 and 012
        assert_eq!(parse_room_numbers("1-2-3"), Vec::<String>::new());
        assert_eq!(parse_room_numbers("12abc"), Vec::<String>::new());
        assert_eq!(parse_room_numbers("1-2-3, 12abc, 4"), vec!["004"]);
    }

    #[test]
    fn test_oversized_range_dropped() {
        assert!(parse_room_numbers("1-20000").is_empty());
        assert_eq!(parse_room_numbers("1-10000").len(), 10_000);
    }

    #[test]
    fn test_duplicates_are_kept_for_the_guard() {
        assert_eq!(parse_room_numbers("101,101"), vec!["101", "101"]);
    }

    #[test]
    fn test_reparsing_output_is_stable() {
        let first = parse_room_numbers("1-3, 10, 250-251");
        let second = parse_room_numbers(&first.join(","));
        assert_eq!(first, second);
    }
}
