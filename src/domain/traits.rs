// ============================================================
// Layer 3 — Core Traits
// ============================================================
// The weak labeller only needs "give me the words of this
// sentence". Production code uses jieba (data::labeler);
// tests use a whitespace splitter so no dictionary is loaded.

/// Splits a sentence into words.
///
/// Implementations must return slices of `sentence` that
/// concatenate back to the full input.
pub trait WordSplitter {
    fn split<'a>(&self, sentence: &'a str) -> Vec<&'a str>;
}
