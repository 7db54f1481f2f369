/// A built-in phonetic correction rule.
///
/// Mishearings and context terms are stored lowercase; matching against them
/// is case-insensitive and word-boundary anchored. Context terms may be
/// multi-word, in which case they must appear as an exact phrase inside the
/// context window.
pub struct CorrectionRule {
    /// Lowercase phrases that trigger this rule.
    pub mishearings: &'static [&'static str],
    /// Replacement text.
    pub correction: &'static str,
    /// Terms whose presence near a match supports applying the rule.
    pub positive_context: &'static [&'static str],
    /// Terms whose presence near a match vetoes the rule.
    pub negative_context: &'static [&'static str],
    /// When true, the rule only fires if positive context is found nearby;
    /// when false, it fires unless negative context is found nearby.
    pub requires_context: bool,
}

/// Number of words inspected on each side of a match when evaluating
/// context.
pub const CONTEXT_WINDOW: usize = 8;

/// Common contractions and filler words that user dictionary entries must
/// never target. Training on a phrase that collides with one of these would
/// corrupt ordinary speech, so such entries are skipped wholesale.
///
/// Known tension: nothing stops a user from training a *correction* that
/// equals one of these words; the blocklist only gates the match side.
pub static ENTRY_BLOCKLIST: &[&str] = &[
    "gonna", "gotta", "wanna", "kinda", "sorta", "dunno", "lemme", "gimme", "outta", "done",
    "okay",
];

/// Built-in phonetic/contextual corrections for common dictation
/// mishearings. Applied before the user dictionary, in table order.
pub static BUILTIN_RULES: &[CorrectionRule] = &[
    CorrectionRule {
        mishearings: &["clawed", "clawd", "clod"],
        correction: "Claude",
        positive_context: &[
            "code", "ai", "model", "assistant", "api", "chat", "prompt", "agent", "llm",
        ],
        negative_context: &[],
        requires_context: true,
    },
    CorrectionRule {
        mishearings: &["get hub", "git hub"],
        correction: "GitHub",
        positive_context: &[],
        negative_context: &[],
        requires_context: false,
    },
    CorrectionRule {
        mishearings: &["supa base", "super base"],
        correction: "Supabase",
        positive_context: &[],
        negative_context: &[],
        requires_context: false,
    },
    CorrectionRule {
        mishearings: &["jason"],
        correction: "JSON",
        positive_context: &[
            "file", "parse", "parsing", "object", "format", "payload", "schema", "api", "data",
            "response",
        ],
        negative_context: &[],
        requires_context: true,
    },
    CorrectionRule {
        mishearings: &["sequel"],
        correction: "SQL",
        positive_context: &[
            "database", "query", "queries", "table", "server", "light", "lite", "injection",
            "schema",
        ],
        negative_context: &[],
        requires_context: true,
    },
    CorrectionRule {
        mishearings: &["cash", "cachet"],
        correction: "cache",
        positive_context: &[
            "memory", "redis", "hit", "miss", "invalidate", "invalidation", "layer", "browser",
            "lookup", "stale",
        ],
        negative_context: &[],
        requires_context: true,
    },
    CorrectionRule {
        mishearings: &["doctor file", "docker file"],
        correction: "Dockerfile",
        positive_context: &[],
        negative_context: &[],
        requires_context: false,
    },
    CorrectionRule {
        mishearings: &["cooper netties", "cuber netties", "kuber netties"],
        correction: "Kubernetes",
        positive_context: &[],
        negative_context: &[],
        requires_context: false,
    },
    CorrectionRule {
        mishearings: &["rust"],
        correction: "Rust",
        positive_context: &[
            "cargo", "crate", "crates", "compiler", "code", "language", "borrow", "lifetime",
        ],
        negative_context: &["metal", "iron", "corrosion", "paint"],
        requires_context: true,
    },
    CorrectionRule {
        mishearings: &["swift"],
        correction: "Swift",
        positive_context: &["code", "xcode", "ios", "apple", "language", "app", "compiler"],
        negative_context: &["taylor swift"],
        requires_context: true,
    },
];
