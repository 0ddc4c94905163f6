//! Roster parser for newline-delimited score lists.

use tracing::debug;

/// Highest score a roster entry may carry.
pub const MAX_SCORE: f64 = 100.0;

/// Classification of a single roster line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreToken {
    pub value: f64,
    pub valid: bool,
}

/// Valid scores in input order, plus how many lines were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedScores {
    pub scores: Vec<f64>,
    pub discarded: usize,
}

/// Returns true for scores a roster may carry: not NaN and in `(0, 100]`.
pub fn is_valid_score(value: f64) -> bool {
    !value.is_nan() && value > 0.0 && value <= MAX_SCORE
}

/// Longest leading decimal literal of `s` after leading whitespace.
///
/// Accepts `[+-]digits[.digits][e[+-]digits]` (either side of the point may
/// be empty, not both) or `[+-]Infinity`; anything after the literal is
/// ignored, so `"85 pts"` yields `"85"` and `"1.234.5"` yields `"1.234"`.
fn numeric_prefix(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(&s[..end + "Infinity".len()]);
    }

    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    // exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = bytes[exp..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    Some(&s[..end])
}

/// Classifies one roster token.
///
/// Both `.` and `,` are accepted as decimal separators. The leading numeric
/// part of the token is read and trailing text is ignored. A token is valid
/// when a number is found and [`is_valid_score`] holds. Tokens without a
/// leading number come back as `{ value: NaN, valid: false }`.
pub fn classify_token(token: &str) -> ScoreToken {
    let normalized = token.replace(',', ".");

    let value = numeric_prefix(&normalized)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(f64::NAN);

    ScoreToken {
        value,
        valid: is_valid_score(value),
    }
}

/// Splits `raw` on newlines and keeps the valid scores.
///
/// Blank lines are skipped. Any other invalid line never reaches the
/// statistics; it is only tallied in [`ParsedScores::discarded`].
pub fn parse_scores(raw: &str) -> ParsedScores {
    let mut parsed = ParsedScores::default();

    for (line, token) in raw.split('\n').enumerate() {
        if token.trim().is_empty() {
            continue;
        }

        let classified = classify_token(token);
        if classified.valid {
            parsed.scores.push(classified.value);
        } else {
            debug!(line = line + 1, token, "Discarding roster entry");
            parsed.discarded += 1;
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_accepts_both_separators() {
        assert_eq!(
            classify_token("85,5"),
            ScoreToken {
                value: 85.5,
                valid: true
            }
        );
        assert_eq!(
            classify_token("90.0"),
            ScoreToken {
                value: 90.0,
                valid: true
            }
        );
    }

    #[test]
    fn test_classify_range_boundaries() {
        assert!(classify_token("100").valid);
        assert!(classify_token("0.01").valid);
        assert!(!classify_token("0").valid);
        assert!(!classify_token("-5").valid);
        assert!(!classify_token("100.01").valid);
        assert!(!classify_token("150").valid);
    }

    #[test]
    fn test_classify_rejects_garbage() {
        assert!(!classify_token("").valid);
        assert!(!classify_token("abc").valid);
        assert!(!classify_token("NaN").valid);
        assert!(!classify_token("inf").valid);
        assert!(!classify_token("Infinity").valid);
        assert!(!classify_token(".").valid);
        assert!(!classify_token("-").valid);
        assert!(classify_token("abc").value.is_nan());
        assert!(classify_token("pts 85").value.is_nan());
    }

    #[test]
    fn test_classify_reads_leading_number_only() {
        assert_eq!(classify_token("85 pts").value, 85.0);
        assert!(classify_token("85 pts").valid);
        // second separator ends the number
        assert_eq!(classify_token("1,234.5").value, 1.234);
        assert_eq!(classify_token("72.5abc").value, 72.5);
        assert_eq!(classify_token("+40").value, 40.0);
        assert_eq!(classify_token(".5").value, 0.5);
        assert_eq!(classify_token("5.").value, 5.0);
        assert_eq!(classify_token("5e1").value, 50.0);
        // dangling exponent is not part of the number
        assert_eq!(classify_token("6e").value, 6.0);
        assert_eq!(classify_token("6e+x").value, 6.0);
        assert_eq!(classify_token("-Infinity").value, f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_scores_keeps_annotated_lines() {
        let parsed = parse_scores("85 pts\n1,234.5\n72");
        assert_eq!(parsed.scores, vec![85.0, 1.234, 72.0]);
        assert_eq!(parsed.discarded, 0);
    }

    #[test]
    fn test_classify_tolerates_surrounding_whitespace() {
        let token = classify_token("  72,25\r");
        assert!(token.valid);
        assert_eq!(token.value, 72.25);
    }

    #[test]
    fn test_parse_scores_preserves_order() {
        let parsed = parse_scores("90\n85,5\n70");
        assert_eq!(parsed.scores, vec![90.0, 85.5, 70.0]);
        assert_eq!(parsed.discarded, 0);
    }

    #[test]
    fn test_parse_scores_counts_discarded() {
        let parsed = parse_scores("90\n150\nabsent\n-3\n45");
        assert_eq!(parsed.scores, vec![90.0, 45.0]);
        assert_eq!(parsed.discarded, 3);
    }

    #[test]
    fn test_parse_scores_skips_blank_lines() {
        let parsed = parse_scores("50\r\n\n  \n60\n");
        assert_eq!(parsed.scores, vec![50.0, 60.0]);
        assert_eq!(parsed.discarded, 0);
    }
}
