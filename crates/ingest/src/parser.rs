use std::sync::LazyLock;

use blood_core::RollEvent;
use regex::Regex;

/// Success phrasings used by dice bots, most specific first. The first
/// pattern that matches a block decides its count.
/// Counts are ASCII digits only; other scripts' digits never count.
const SUCCESS_PATTERNS: &[&str] = &[
    r"(?i)successes?:\s*([0-9]+)",
    r"(?i)([0-9]+)\s+successes?",
    r"(?i)total successes?:\s*([0-9]+)",
    r"(?i)result:\s*([0-9]+)\s+successes?",
    r"(?i)success.*?([0-9]+)",
    r"(?i)([0-9]+).*?success",
];

static COMPILED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SUCCESS_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("success pattern compiles"))
        .collect()
});

/// Success count extracted from a whole roll message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRoll {
    pub successes: u64,
    /// Message body, or the embed block that produced the count when the body is empty.
    pub source_text: Option<String>,
}

/// Extracts the success count from one block of text; 0 when nothing matches.
pub fn parse_successes(text: &str) -> u64 {
    for pattern in COMPILED_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            let digits = captures.get(1).map(|m| m.as_str()).unwrap_or("0");
            return parse_count(digits);
        }
    }
    0
}

/// Counts too large for `u64` saturate; anything that is not ASCII digits is 0.
fn parse_count(digits: &str) -> u64 {
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Parses the body and every embed description and field value, keeping the
/// largest count. Bots repeat results across blocks and partial fields can
/// under-report, so the first non-zero block is not enough.
pub fn parse_roll_event(event: &RollEvent) -> ParsedRoll {
    let mut best: Option<(u64, &str)> = None;
    for block in candidate_blocks(event) {
        let successes = parse_successes(block);
        if best.is_none_or(|(current, _)| successes > current) {
            best = Some((successes, block));
        }
    }
    let Some((successes, block)) = best else {
        return ParsedRoll::default();
    };
    let source_text = if !event.text.is_empty() {
        Some(event.text.clone())
    } else if successes > 0 {
        Some(block.to_string())
    } else {
        None
    };
    ParsedRoll {
        successes,
        source_text,
    }
}

fn candidate_blocks(event: &RollEvent) -> impl Iterator<Item = &str> {
    let body = (!event.text.is_empty()).then_some(event.text.as_str());
    let embed_blocks = event.embeds.iter().flat_map(|embed| {
        embed
            .description
            .as_deref()
            .into_iter()
            .chain(embed.fields.iter().map(|field| field.value.as_str()))
    });
    body.into_iter().chain(embed_blocks)
}

#[cfg(test)]
mod tests {
    use blood_core::{Embed, EmbedField};

    use super::*;

    fn event(text: &str, embeds: Vec<Embed>) -> RollEvent {
        RollEvent {
            author_id: "bot".to_string(),
            channel_id: "chan".to_string(),
            text: text.to_string(),
            embeds,
        }
    }

    fn field(value: &str) -> EmbedField {
        EmbedField {
            name: "Result".to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn unrecognised_text_yields_zero() {
        for text in [
            "",
            "rolled 5d10",
            "The dice clatter across the table",
            "botch!",
            "12345",
        ] {
            assert_eq!(parse_successes(text), 0, "{text:?}");
        }
    }

    #[test]
    fn colon_form_returns_exact_count() {
        for n in [0_u64, 1, 7, 42, 200, 1234, 4_294_967_296] {
            assert_eq!(parse_successes(&format!("successes: {n}")), n);
            assert_eq!(parse_successes(&format!("Successes:{n}")), n);
            assert_eq!(parse_successes(&format!("success: {n}")), n);
        }
    }

    #[test]
    fn recognises_common_phrasings() {
        assert_eq!(parse_successes("4 successes"), 4);
        assert_eq!(parse_successes("1 success"), 1);
        assert_eq!(parse_successes("Total successes: 6"), 6);
        assert_eq!(parse_successes("Result: 3 successes"), 3);
        assert_eq!(parse_successes("Roll result: 3 successes"), 3);
        assert_eq!(parse_successes("Success! You rolled 9"), 9);
        assert_eq!(parse_successes("Rolled 2 dice for a success"), 2);
        assert_eq!(parse_successes("SUCCESSES: 5"), 5);
    }

    #[test]
    fn earlier_patterns_take_priority() {
        // "successes: N" wins over the loose number-before-success form.
        assert_eq!(parse_successes("10 dice, successes: 3"), 3);
    }

    #[test]
    fn loose_patterns_do_not_cross_lines() {
        assert_eq!(parse_successes("success\n5"), 0);
    }

    #[test]
    fn large_counts_stay_exact() {
        assert_eq!(parse_successes("99999999999 successes"), 99_999_999_999);
        assert_eq!(
            parse_successes("successes: 99999999999999999999999"),
            u64::MAX
        );
    }

    #[test]
    fn non_ascii_digits_do_not_count() {
        for text in [
            "successes: ٣",
            "５ successes",
            "Total successes: ４２",
            "٣ dice for a success",
        ] {
            assert_eq!(parse_successes(text), 0, "{text:?}");
        }
        let parsed = parse_roll_event(&event("successes: ٣", Vec::new()));
        assert_eq!(parsed.successes, 0);
        assert_eq!(parse_count("٣"), 0);
    }

    #[test]
    fn takes_maximum_across_body_and_embeds() {
        let parsed = parse_roll_event(&event(
            "Roll result: 3 successes",
            vec![Embed {
                description: None,
                fields: vec![field("5 successes")],
            }],
        ));
        assert_eq!(parsed.successes, 5);
        assert_eq!(parsed.source_text.as_deref(), Some("Roll result: 3 successes"));
    }

    #[test]
    fn later_zero_blocks_do_not_hide_earlier_counts() {
        let parsed = parse_roll_event(&event(
            "",
            vec![
                Embed {
                    description: Some("Total successes: 4".to_string()),
                    fields: vec![field("no luck")],
                },
                Embed {
                    description: None,
                    fields: vec![field("2 successes")],
                },
            ],
        ));
        assert_eq!(parsed.successes, 4);
        assert_eq!(parsed.source_text.as_deref(), Some("Total successes: 4"));
    }

    #[test]
    fn empty_event_parses_to_nothing() {
        assert_eq!(parse_roll_event(&event("", Vec::new())), ParsedRoll::default());
        let parsed = parse_roll_event(&event("the storyteller sighs", Vec::new()));
        assert_eq!(parsed.successes, 0);
    }
}
