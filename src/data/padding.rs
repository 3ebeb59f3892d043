// ============================================================
// Layer 4 — Padding / Truncation
// ============================================================
// Every sample is forced to exactly `max_length` positions.
// Inputs and labels use different fillers:
//
//   input_ids: [我, 爱, 你, 0, 0]        (PAD_ID)
//   labels:    [ 1,  1,  1, -100, -100] (IGNORE_LABEL)
//
// so padded positions are embedded but never scored.

use crate::domain::sample::{SegmentSample, IGNORE_LABEL, PAD_ID};

pub fn pad_sequence(mut sequence: Vec<u32>, max_length: usize) -> Vec<u32> {
    sequence.truncate(max_length);
    sequence.resize(max_length, PAD_ID);
    sequence
}

pub fn pad_labels(mut labels: Vec<i64>, max_length: usize) -> Vec<i64> {
    labels.truncate(max_length);
    labels.resize(max_length, IGNORE_LABEL);
    labels
}

pub fn pad_sample(sequence: Vec<u32>, labels: Vec<i64>, max_length: usize) -> SegmentSample {
    SegmentSample {
        input_ids: pad_sequence(sequence, max_length),
        labels:    pad_labels(labels, max_length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sequences_are_padded() {
        let s = pad_sample(vec![7, 8, 9], vec![0, 1, 1], 5);
        assert_eq!(s.input_ids, vec![7, 8, 9, 0, 0]);
        assert_eq!(s.labels, vec![0, 1, 1, IGNORE_LABEL, IGNORE_LABEL]);
    }

    #[test]
    fn test_long_sequences_are_truncated() {
        let s = pad_sample((1..=8).collect(), vec![1; 8], 4);
        assert_eq!(s.input_ids, vec![1, 2, 3, 4]);
        assert_eq!(s.labels, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_empty_input_is_all_padding() {
        let s = pad_sample(Vec::new(), Vec::new(), 3);
        assert_eq!(s.input_ids, vec![PAD_ID; 3]);
        assert_eq!(s.labels, vec![IGNORE_LABEL; 3]);
    }
}
