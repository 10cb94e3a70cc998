use average::Estimate;

/// Arithmetic mean; `None` for an empty iterator.
pub fn mean(iter: impl Iterator<Item = f64>) -> Option<f64> {
    let mean = iter.collect::<average::Mean>();
    if mean.is_empty() {
        None
    } else {
        Some(mean.estimate())
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn mean_and_rounding() {
        let m = mean([3.0, 8.0, 0.0].into_iter()).unwrap();
        assert_eq!(round2(m), 3.67);
        assert_eq!(round2(5.5), 5.5);
    }
}
