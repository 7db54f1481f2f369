//! Spoken-number normalization.
//!
//! Converts spelled-out number sequences in dictated text into numerals:
//! "two hundred and sixty five" becomes "265", "four point five" becomes
//! "4.5". Small numbers (ten and below) are protected by context heuristics
//! so idiomatic phrases like "pick one" or "chapter one" keep their words.

use once_cell::sync::Lazy;
use regex::Regex;

/// Cardinal number words and their values. Also the source for the
/// hyphen-expansion pattern.
static NUMBER_WORDS: &[(&str, i64)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

static MULTIPLIERS: &[(&str, i64)] = &[
    ("hundred", 100),
    ("thousand", 1_000),
    ("million", 1_000_000),
    ("billion", 1_000_000_000),
];

/// Words that, immediately before a small number word, mark it as an
/// ordinary word rather than a count ("the one that", "chapter one").
static KEEP_AS_WORD_BEFORE: &[&str] = &[
    // Determiners/articles
    "the", "a", "an", "this", "that", "these", "those", "another", "other",
    // Quantifiers
    "each", "every", "any", "some", "no", "either", "neither",
    // Selection verbs
    "pick", "choose", "select",
    // Comparisons
    "only", "just", "even", "also",
    // Ordinal context
    "number", "option", "choice", "item", "step", "phase", "part", "chapter", "section",
    // Positional
    "next", "last", "first", "previous", "final", "same", "right", "wrong", "correct",
];

/// Words that, immediately after a small number word, mark it as an
/// ordinary word ("one of the best", "one more thing").
static KEEP_AS_WORD_AFTER: &[&str] = &[
    // Partitive
    "of", "out",
    // Comparative
    "more", "less", "another", "other", "else",
    // Generic nouns
    "thing", "time", "way", "reason", "person", "day", "week", "month", "year", "moment",
    "second", "minute", "hour", "place", "side", "hand", "step",
    // Relative pronouns
    "who", "that", "which", "where", "when",
];

/// Matches a hyphen joining a number word to the following word, as in
/// "seventy-five" or "twenty-two".
#[allow(clippy::unwrap_used)] // pattern is built from a fixed word list
static HYPHENATED_NUMBER: Lazy<Regex> = Lazy::new(|| {
    let alternation: Vec<&str> = NUMBER_WORDS.iter().map(|&(word, _)| word).collect();
    let pattern = format!(r"(?i)\b({})-(\w+)\b", alternation.join("|"));
    Regex::new(&pattern).unwrap()
});

/// Converts spelled-out numbers in `text` to numerals.
///
/// Tokens are split on whitespace and re-joined with single spaces;
/// punctuation attached to a token is preserved on the emitted numeral.
#[must_use]
pub fn convert_number_words(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let expanded = expand_hyphens(text);
    let tokens: Vec<&str> = expanded.split_whitespace().collect();
    let mut result: Vec<String> = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let clean = clean_token(tokens[i]);

        if number_value(&clean).is_some() && should_keep_as_word(&tokens, i) {
            result.push(tokens[i].to_owned());
            i += 1;
            continue;
        }

        if let Some(parsed) = parse_number_sequence(&tokens, i) {
            let mut numeral = parsed.value;
            numeral.push_str(trailing_punctuation(tokens[i + parsed.consumed - 1]));
            result.push(numeral);
            i += parsed.consumed;
        } else {
            result.push(tokens[i].to_owned());
            i += 1;
        }
    }

    result.join(" ")
}

/// Expands hyphens joining number words to following words, so
/// "seventy-five" parses as two tokens. One left-to-right pass: after
/// splitting a compound, scanning resumes at its second word, which may
/// itself open another compound ("one-twenty-five"). Earlier text is
/// never rescanned.
fn expand_hyphens(text: &str) -> String {
    let mut expanded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(caps) = HYPHENATED_NUMBER.captures(rest) {
        let Some(word) = caps.get(1) else { break };
        expanded.push_str(&rest[..word.end()]);
        expanded.push(' ');
        rest = &rest[word.end() + 1..];
    }
    expanded.push_str(rest);
    expanded
}

struct ParsedNumber {
    value: String,
    consumed: usize,
}

/// Parses the longest number-word sequence starting at `start`, including
/// "and" connectors and "point" decimals. Returns `None` when the token at
/// `start` opens no sequence, or when the accumulated value overflows
/// `i64` (the tokens then pass through as words).
fn parse_number_sequence(tokens: &[&str], start: usize) -> Option<ParsedNumber> {
    let mut total: i64 = 0;
    let mut current: i64 = 0;
    let mut consumed = 0;
    let mut has_number = false;
    let mut decimal_part: Option<String> = None;

    let mut i = start;
    while i < tokens.len() {
        let word = clean_token(tokens[i]);

        // "and" joins parts of a number ("two hundred and five") but is
        // only swallowed once a number is underway.
        if word == "and" && has_number {
            i += 1;
            continue;
        }

        if word == "point" && has_number && i + 1 < tokens.len() {
            let mut digits = String::new();
            let mut j = i + 1;
            while j < tokens.len() {
                match number_value(&clean_token(tokens[j])) {
                    Some(value) if value < 10 => {
                        digits.push_str(&value.to_string());
                        j += 1;
                    }
                    _ => break,
                }
            }
            if !digits.is_empty() {
                decimal_part = Some(digits);
                consumed = j - start;
                break;
            }
        }

        if let Some(value) = number_value(&word) {
            has_number = true;
            if value < 100 {
                current = current.checked_add(value)?;
            }
            consumed = i - start + 1;
            i += 1;
        } else if let Some(mult) = multiplier_value(&word) {
            has_number = true;
            let base = if current == 0 { 1 } else { current };
            current = base.checked_mul(mult)?;
            if mult != 100 {
                total = total.checked_add(current)?;
                current = 0;
            }
            consumed = i - start + 1;
            i += 1;
        } else {
            break;
        }
    }
    total = total.checked_add(current)?;

    if !has_number {
        return None;
    }
    let value = match decimal_part {
        Some(decimal) => format!("{total}.{decimal}"),
        None => total.to_string(),
    };
    Some(ParsedNumber { value, consumed })
}

/// Decides whether the number word at `index` stays spelled out. Only
/// values of ten and below get context protection; "one" keeps its word
/// form unless it opens a compound like "one hundred".
fn should_keep_as_word(tokens: &[&str], index: usize) -> bool {
    let clean = clean_token(tokens[index]);
    let Some(value) = number_value(&clean) else {
        return false;
    };
    if value > 10 {
        return false;
    }

    let after = tokens
        .get(index + 1)
        .map_or_else(String::new, |t| clean_token(t));

    if value == 1 && multiplier_value(&after).is_none() {
        return true;
    }

    let before = if index > 0 {
        clean_token(tokens[index - 1])
    } else {
        String::new()
    };

    KEEP_AS_WORD_BEFORE.contains(&before.as_str()) || KEEP_AS_WORD_AFTER.contains(&after.as_str())
}

fn number_value(word: &str) -> Option<i64> {
    NUMBER_WORDS
        .iter()
        .find(|&&(w, _)| w == word)
        .map(|&(_, v)| v)
}

fn multiplier_value(word: &str) -> Option<i64> {
    MULTIPLIERS
        .iter()
        .find(|&&(w, _)| w == word)
        .map(|&(_, v)| v)
}

/// Lowercased token with surrounding punctuation stripped, for table
/// lookups. The original token is what gets emitted when a word is kept.
fn clean_token(token: &str) -> String {
    let lowered = token.to_lowercase();
    lowered
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_owned()
}

/// Punctuation suffix of a token, carried over onto an emitted numeral.
fn trailing_punctuation(token: &str) -> &str {
    let trimmed = token.trim_end_matches(|c: char| c.is_ascii_punctuation());
    &token[trimmed.len()..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_numbers() {
        assert_eq!(convert_number_words("I have four apples"), "I have 4 apples");
        assert_eq!(convert_number_words("twenty five"), "25");
        assert_eq!(convert_number_words("I ate ten apples"), "I ate 10 apples");
    }

    #[test]
    fn test_hyphenated_numbers() {
        assert_eq!(convert_number_words("seventy-five"), "75");
        assert_eq!(convert_number_words("it costs twenty-two dollars"), "it costs 22 dollars");
    }

    #[test]
    fn test_compound_with_multipliers() {
        assert_eq!(convert_number_words("one hundred"), "100");
        assert_eq!(convert_number_words("three thousand two hundred"), "3200");
        assert_eq!(convert_number_words("five million"), "5000000");
        assert_eq!(convert_number_words("two billion"), "2000000000");
    }

    #[test]
    fn test_and_connector() {
        assert_eq!(convert_number_words("two hundred and sixty five"), "265");
        assert_eq!(convert_number_words("one hundred and five"), "105");
    }

    #[test]
    fn test_and_outside_number_is_kept() {
        assert_eq!(
            convert_number_words("apples and oranges"),
            "apples and oranges"
        );
    }

    #[test]
    fn test_decimal_point() {
        assert_eq!(convert_number_words("four point five"), "4.5");
        assert_eq!(convert_number_words("three point one four"), "3.14");
        assert_eq!(convert_number_words("it weighs two point five kilos"), "it weighs 2.5 kilos");
    }

    #[test]
    fn test_point_without_digits_is_kept() {
        assert_eq!(
            convert_number_words("two point taken"),
            "2 point taken"
        );
        assert_eq!(
            convert_number_words("the point stands"),
            "the point stands"
        );
    }

    #[test]
    fn test_one_stays_as_word_by_default() {
        assert_eq!(convert_number_words("pick one"), "pick one");
        assert_eq!(convert_number_words("one of the best"), "one of the best");
        assert_eq!(convert_number_words("the one that works"), "the one that works");
        assert_eq!(convert_number_words("one more thing"), "one more thing");
    }

    #[test]
    fn test_one_converts_before_multiplier() {
        assert_eq!(convert_number_words("one hundred dollars"), "100 dollars");
        assert_eq!(convert_number_words("one thousand times"), "1000 times");
    }

    #[test]
    fn test_small_numbers_protected_by_context() {
        assert_eq!(convert_number_words("chapter two"), "chapter two");
        assert_eq!(convert_number_words("step three of the plan"), "step three of the plan");
        assert_eq!(convert_number_words("the first two of them"), "the first two of them");
    }

    #[test]
    fn test_large_numbers_are_not_protected() {
        assert_eq!(convert_number_words("chapter twelve"), "chapter 12");
        assert_eq!(convert_number_words("the last forty"), "the last 40");
    }

    #[test]
    fn test_teens() {
        assert_eq!(convert_number_words("I bought thirteen eggs"), "I bought 13 eggs");
        assert_eq!(convert_number_words("nineteen eighty"), "99");
    }

    #[test]
    fn test_zero() {
        assert_eq!(convert_number_words("zero"), "0");
    }

    #[test]
    fn test_punctuation_carried_onto_numeral() {
        assert_eq!(
            convert_number_words("I counted twenty, then stopped."),
            "I counted 20, then stopped."
        );
        assert_eq!(
            convert_number_words("was it thirty five?"),
            "was it 35?"
        );
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(
            convert_number_words("twenty   five  apples"),
            "25 apples"
        );
    }

    #[test]
    fn test_no_numbers_passes_through() {
        assert_eq!(
            convert_number_words("nothing numeric in here"),
            "nothing numeric in here"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert_number_words(""), "");
    }

    #[test]
    fn test_multiple_sequences() {
        assert_eq!(
            convert_number_words("twenty cats and forty dogs"),
            "20 cats and 40 dogs"
        );
    }

    #[test]
    fn test_multiplier_chain_overflow_passes_words_through() {
        // A stacked "hundred" chain would overflow i64; the affected parses
        // abort and leave their tokens as words instead of wrapping or
        // panicking. The suffix that fits in range still converts.
        let input = format!("ninety nine{}", " hundred".repeat(12));
        assert_eq!(
            convert_number_words(&input),
            "ninety nine hundred hundred hundred 1000000000000000000"
        );
        // In-range chains keep scaling as before
        assert_eq!(convert_number_words("nine hundred hundred"), "90000");
    }

    #[test]
    fn test_hyphen_chain_fully_expanded() {
        assert_eq!(convert_number_words("one-twenty-five"), "one 25");
        assert_eq!(convert_number_words("twenty-two, then"), "22, then");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(convert_number_words("Twenty Five"), "25");
        assert_eq!(convert_number_words("SEVENTY-FIVE"), "75");
    }
}
