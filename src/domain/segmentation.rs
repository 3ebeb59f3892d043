// ============================================================
// Layer 3 — Word Boundaries
// ============================================================
// A segmentation is stored as one tag per character:
//   1 → this character ends a word
//   0 → the word continues
//
// Example:
//   words:  ["沪胶", "后市", "有望"]
//   chars:   沪 胶 后 市 有 望
//   labels:  0  1  0  1  0  1
//
// Lengths are counted in chars, never bytes.

/// Build per-character boundary labels from a word sequence.
/// The words are expected to concatenate back to `sentence`;
/// a word running past the end is clamped to the last char.
pub fn boundary_labels(sentence: &str, words: &[&str]) -> Vec<i64> {
    let len = sentence.chars().count();
    let mut labels = vec![0i64; len];
    let mut pointer = 0usize;

    for word in words {
        let n = word.chars().count();
        if n == 0 {
            continue;
        }
        pointer = (pointer + n).min(len);
        if pointer > 0 {
            labels[pointer - 1] = 1;
        }
    }

    labels
}

/// Insert a space after every character predicted as a word end.
///
/// Characters past the end of `predictions` are copied without
/// separators. The trailing separator is dropped.
pub fn render_segmented(text: &str, predictions: &[u8]) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        out.push(c);
        if predictions.get(i) == Some(&1) {
            out.push(' ');
        }
    }
    out.trim_end_matches(' ').to_string()
}
