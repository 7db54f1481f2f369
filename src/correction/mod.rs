//! Correction engine for raw recognizer output.
//!
//! Applies, in order: built-in phonetic/contextual rules, user dictionary
//! substitutions (longest phrase first), and sentence-case formatting.
//! Every pass is a pure transformation over the current string state; the
//! only external input is the dictionary snapshot held by the engine.

mod rules;

pub use rules::{CorrectionRule, BUILTIN_RULES, CONTEXT_WINDOW, ENTRY_BLOCKLIST};

use crate::dictionary::{DictionaryEntry, DictionaryStore};
use regex::Regex;
use tracing::{debug, warn};

/// Applies built-in rules and user dictionary corrections to transcribed
/// text.
///
/// The engine owns its [`DictionaryStore`]; construct one per pipeline and
/// reach the store through [`Self::dictionary_mut`] for training mutations.
pub struct CorrectionEngine {
    rules: &'static [CorrectionRule],
    store: DictionaryStore,
}

impl CorrectionEngine {
    /// Creates an engine over the built-in rule table.
    #[must_use]
    pub const fn new(store: DictionaryStore) -> Self {
        Self::with_rules(BUILTIN_RULES, store)
    }

    /// Creates an engine with a custom rule table. Used by tests; production
    /// code uses [`Self::new`].
    #[must_use]
    pub const fn with_rules(rules: &'static [CorrectionRule], store: DictionaryStore) -> Self {
        Self { rules, store }
    }

    /// The dictionary snapshot this engine matches against.
    #[must_use]
    pub const fn dictionary(&self) -> &DictionaryStore {
        &self.store
    }

    /// Mutable access to the dictionary, for the training surface.
    pub fn dictionary_mut(&mut self) -> &mut DictionaryStore {
        &mut self.store
    }

    /// Transforms raw transcript text into corrected, sentence-cased text.
    ///
    /// Empty input yields empty output. Malformed rule or entry patterns are
    /// logged and skipped; this function never fails.
    ///
    /// # Performance
    /// Patterns are compiled per call. For typical dictionaries (<100
    /// entries) this is negligible next to recognizer latency; a much larger
    /// dictionary would warrant a pre-compiled pattern cache.
    #[must_use]
    pub fn apply_corrections(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let corrected = self.apply_builtin_rules(text);
        let corrected = self.apply_dictionary(&corrected);
        sentence_case(&corrected)
    }

    /// Built-in rule pass. Each rule is an independent pass over the
    /// evolving text: all occurrences of each mishearing are found in one
    /// compiled-pattern sweep, and each occurrence is accepted or skipped
    /// based on its ±[`CONTEXT_WINDOW`]-word context.
    fn apply_builtin_rules(&self, text: &str) -> String {
        let mut current = text.to_owned();

        for rule in self.rules {
            for mishearing in rule.mishearings {
                let Some(pattern) = phrase_pattern(mishearing) else {
                    continue;
                };
                let regex = match Regex::new(&pattern) {
                    Ok(regex) => regex,
                    Err(e) => {
                        warn!(mishearing, error = %e, "skipping malformed rule pattern");
                        continue;
                    }
                };
                if !regex.is_match(&current) {
                    continue;
                }

                // Tokenize the frozen snapshot once; all context lookups for
                // this sweep are by token index, not recomputed offsets.
                let tokens = tokenize(&current);
                let span = mishearing.split_whitespace().count();

                let replaced = regex.replace_all(&current, |caps: &regex::Captures| {
                    let Some(m) = caps.get(0) else {
                        return String::new();
                    };
                    if rule_applies(rule, &tokens, m.start(), span) {
                        debug!(matched = m.as_str(), correction = rule.correction, "rule applied");
                        rule.correction.to_owned()
                    } else {
                        m.as_str().to_owned()
                    }
                });
                current = replaced.into_owned();
            }
        }

        current
    }

    /// User dictionary pass. Entries are sorted longest phrase first so
    /// specific phrases win over their substrings; ties keep insertion
    /// order. Each entry is applied with a single replace-all over the
    /// current string state, never by iterating match ranges against a
    /// string that is mutating under them.
    fn apply_dictionary(&self, text: &str) -> String {
        let mut entries: Vec<&DictionaryEntry> = self
            .store
            .entries()
            .iter()
            .filter(|entry| !entry.incorrect.is_empty())
            .collect();
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.incorrect.len()));

        let mut current = text.to_owned();
        for entry in entries {
            if ENTRY_BLOCKLIST.contains(&entry.incorrect.as_str()) {
                debug!(phrase = %entry.incorrect, "skipping blocklisted dictionary entry");
                continue;
            }
            let Some(pattern) = phrase_pattern(&entry.incorrect) else {
                continue;
            };
            let regex = match Regex::new(&pattern) {
                Ok(regex) => regex,
                Err(e) => {
                    warn!(phrase = %entry.incorrect, error = %e, "skipping malformed entry pattern");
                    continue;
                }
            };
            // Trailing sentence punctuation is dropped from the replacement
            // so a match that already carried punctuation doesn't double it.
            let replacement = entry
                .correct
                .trim_end_matches(['.', '!', '?', ',', ';', ':']);
            current = regex
                .replace_all(&current, regex::NoExpand(replacement))
                .into_owned();
        }
        current
    }
}

/// One whitespace-delimited token of the text under correction.
struct Token {
    /// Lowercased, punctuation-trimmed form used for context comparisons.
    clean: String,
    /// Byte offset of the token in the source string.
    start: usize,
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token {
                    clean: clean_word(&text[s..i]),
                    start: s,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            clean: clean_word(&text[s..]),
            start: s,
        });
    }
    tokens
}

fn clean_word(word: &str) -> String {
    let lowered = word.to_lowercase();
    lowered
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_owned()
}

/// Decides whether a rule fires for the match starting at byte offset
/// `match_start`, spanning `span` words. Negative context anywhere in the
/// window vetoes; a `requires_context` rule additionally demands a positive
/// hit.
fn rule_applies(rule: &CorrectionRule, tokens: &[Token], match_start: usize, span: usize) -> bool {
    let index = tokens
        .partition_point(|t| t.start <= match_start)
        .saturating_sub(1);
    let lo = index.saturating_sub(CONTEXT_WINDOW);
    let hi = (index + span + CONTEXT_WINDOW).min(tokens.len());
    let window: Vec<&str> = tokens[lo..hi].iter().map(|t| t.clean.as_str()).collect();

    if rule
        .negative_context
        .iter()
        .any(|term| window_contains(&window, term))
    {
        return false;
    }
    if rule.requires_context {
        return rule
            .positive_context
            .iter()
            .any(|term| window_contains(&window, term));
    }
    true
}

/// Whether `term` (a word or an exact multi-word phrase) occurs in the
/// cleaned window words.
fn window_contains(window: &[&str], term: &str) -> bool {
    let term_words: Vec<&str> = term.split_whitespace().collect();
    if term_words.is_empty() {
        return false;
    }
    window
        .windows(term_words.len())
        .any(|w| w == term_words.as_slice())
}

/// Builds a case-insensitive, word-boundary-anchored pattern for a phrase.
/// Words of a multi-word phrase may be separated by whitespace and
/// intervening punctuation, so a stored "supa base" still matches
/// "supa, base". Returns `None` for phrases with no words.
fn phrase_pattern(phrase: &str) -> Option<String> {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let joined = words.join(r"[\s\p{P}]+");
    Some(format!(r"(?i)\b{joined}\b"))
}

/// Sentence-case formatting: the first letter of the string and the first
/// letter after `.`, `!`, or `?` are capitalized. Non-letter characters
/// pass through without clearing the pending-capitalize flag.
fn sentence_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut capitalize_next = true;
    for c in text.chars() {
        if capitalize_next && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
            if matches!(c, '.' | '!' | '?') {
                capitalize_next = true;
            }
        }
    }
    out
}
