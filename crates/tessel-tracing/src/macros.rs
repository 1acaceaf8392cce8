//! Timing helpers

/// Execute a block with timing, logging the duration at debug level.
///
/// Evaluates to `(result, duration_us)`.
///
/// # Example
///
/// ```rust
/// use tessel_tracing::timed;
///
/// let (sum, duration_us) = timed!("sum", { (1..=100).sum::<i32>() });
/// assert_eq!(sum, 5050);
/// # let _ = duration_us;
/// ```
#[macro_export]
macro_rules! timed {
    ($name:expr, $block:block) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration_us = start.elapsed().as_micros() as u64;
        $crate::debug!(
            operation = $name,
            duration_us,
            duration_ms = duration_us as f64 / 1000.0,
            "timed"
        );
        (result, duration_us)
    }};
}
