// ============================================================
// Layer 5 — Losses and Accuracy
// ============================================================
// Cross entropy over class-index targets with an ignore value
// for padded positions (exercise 2), averaged over the kept
// positions only. Exercise 1 uses Burn's own
// cross_entropy_with_logits for its one-hot targets.
//
// Burn's CrossEntropyLoss gathers on the raw target before it
// masks pad tokens, so a negative sentinel would index out of
// range. The masked variant clamps first and masks after.

use burn::{prelude::*, tensor::activation::log_softmax};

/// logits: [n, classes], targets: [n] → scalar loss [1]
///
/// Positions whose target equals `ignore_index` contribute
/// nothing. If every position is ignored the loss is 0.
pub fn masked_cross_entropy<B: Backend>(
    logits:       Tensor<B, 2>,
    targets:      Tensor<B, 1, Int>,
    ignore_index: i64,
) -> Tensor<B, 1> {
    let [n, _] = logits.dims();

    let keep = targets.clone().equal_elem(ignore_index).bool_not().float();
    let safe_targets = targets.clamp_min(0).reshape([n, 1]);

    let picked = log_softmax(logits, 1)
        .gather(1, safe_targets)
        .reshape([n]);

    let kept = keep.clone().sum().clamp_min(1.0);
    (picked * keep).sum().neg() / kept
}

/// Argmax hits over non-ignored positions: (correct, counted).
pub fn masked_accuracy<B: Backend>(
    logits:       Tensor<B, 2>,
    targets:      Tensor<B, 1, Int>,
    ignore_index: i64,
) -> (usize, usize) {
    let [n, _] = logits.dims();
    let keep = targets.clone().equal_elem(ignore_index).bool_not().int();
    let predicted = logits.argmax(1).reshape([n]);

    let correct: i64 = (predicted.equal(targets).int() * keep.clone())
        .sum()
        .into_scalar()
        .elem::<i64>();
    let counted: i64 = keep.sum().into_scalar().elem::<i64>();

    (correct as usize, counted as usize)
}
