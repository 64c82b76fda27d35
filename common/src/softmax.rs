/// Normalized `exp` of the logits. The largest logit is subtracted first so large weights
/// do not overflow.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max_p = logits.iter().cloned().fold(f64::MIN, f64::max);
    let softmaxed = logits
        .iter()
        .map(|&p| (p - max_p).exp())
        .collect::<Vec<_>>();
    let sum = softmaxed.iter().sum::<f64>();

    softmaxed.into_iter().map(|p| p / sum).collect()
}
