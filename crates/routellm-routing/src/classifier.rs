//! Heuristic prompt complexity classification
//!
//! A prompt is complex when it is long, looks like source code, or asks for
//! explanation, creation, analysis, comparison, or debugging. Checks run in
//! that order and stop at the first hit.

use std::sync::LazyLock;

use regex::Regex;
use routellm_core::Classification;

/// A named structural pattern associated with source code
#[derive(Debug)]
pub struct CodePattern {
    /// Short identifier used in logs
    pub name: &'static str,
    regex: Regex,
}

impl CodePattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("code pattern must be valid regex"),
        }
    }

    /// Whether the pattern occurs anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Code patterns, matched case-sensitively against the raw prompt
pub static CODE_PATTERNS: LazyLock<Vec<CodePattern>> = LazyLock::new(|| {
    vec![
        CodePattern::new("code_fence", r"```"),
        CodePattern::new("def", r"def\s+\w+\s*\("),
        CodePattern::new("function", r"function\s+\w+"),
        CodePattern::new("import", r"import\s+\w+"),
        CodePattern::new("from_import", r"from\s+\w+\s+import"),
        CodePattern::new("class", r"class\s+\w+"),
        CodePattern::new("for_in", r"for\s+\w+\s+in"),
        CodePattern::new("while_call", r"while\s*\("),
        CodePattern::new("if_call", r"if\s*\("),
        CodePattern::new("print_call", r"print\s*\("),
        CodePattern::new("return", r"return\s+"),
        CodePattern::new("empty_block", r"\{\s*\}"),
        CodePattern::new("trailing_semicolon", r";\s*$"),
        CodePattern::new("comparison", r"==|!=|<=|>="),
        CodePattern::new("arrow", r"->"),
        CodePattern::new("scope", r"::"),
    ]
});

/// Intent words, matched as substrings of the lower-cased prompt
pub const COMPLEX_KEYWORDS: &[&str] = &[
    "explain",
    "how does",
    "why does",
    "write",
    "create",
    "analyze",
    "compare",
    "difference between",
    "debug",
    "implement",
];

/// Which check decided the classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// Word count reached the threshold
    WordCount { words: usize },
    /// A code pattern matched
    CodePattern(&'static str),
    /// An intent keyword was found
    Keyword(&'static str),
    /// Nothing triggered
    NoSignal,
}

/// Classification plus the evidence behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub classification: Classification,
    pub reason: Reason,
    /// Whitespace-delimited word count of the prompt
    pub word_count: usize,
}

/// Prompt complexity classifier
#[derive(Debug, Clone)]
pub struct Classifier {
    word_threshold: usize,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(routellm_config::DEFAULT_WORD_THRESHOLD)
    }
}

impl Classifier {
    /// Create a classifier with the given word threshold
    pub const fn new(word_threshold: usize) -> Self {
        Self { word_threshold }
    }

    /// Classify a prompt
    pub fn classify(&self, prompt: &str) -> Verdict {
        let word_count = count_words(prompt);

        let reason = if word_count >= self.word_threshold {
            Reason::WordCount { words: word_count }
        } else if let Some(pattern) = find_code_pattern(prompt) {
            Reason::CodePattern(pattern)
        } else if let Some(keyword) = find_complex_keyword(prompt) {
            Reason::Keyword(keyword)
        } else {
            Reason::NoSignal
        };

        let classification = match reason {
            Reason::NoSignal => Classification::Simple,
            _ => Classification::Complex,
        };

        Verdict {
            classification,
            reason,
            word_count,
        }
    }
}

/// Count whitespace-delimited words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Name of the first code pattern found in `text`
pub fn find_code_pattern(text: &str) -> Option<&'static str> {
    CODE_PATTERNS.iter().find(|p| p.is_match(text)).map(|p| p.name)
}

/// First intent keyword contained in `text`, ignoring case
pub fn find_complex_keyword(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    COMPLEX_KEYWORDS.iter().copied().find(|k| lower.contains(k))
}
