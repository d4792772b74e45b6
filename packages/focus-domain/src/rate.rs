//! Rate and average math shared by the statistics reports.
//!
//! Division by zero resolves to `0.0`. Results are rounded to two decimals with
//! round-half-away-from-zero on the binary value, so `1.125` becomes `1.13`.

/// Rounds to two decimal places, ties away from zero.
pub fn round2(value: f64) -> f64 {
	(value * 100.0).round() / 100.0
}

/// `completed / total * 100`, or `0.0` when `total` is zero.
pub fn completion_rate(completed: u64, total: u64) -> f64 {
	if total == 0 {
		return 0.0;
	}

	round2(completed as f64 / total as f64 * 100.0)
}

/// Mean minutes per session, or `0.0` when there are no sessions.
pub fn average_minutes(total_minutes: u64, sessions: u64) -> f64 {
	if sessions == 0 {
		return 0.0;
	}

	round2(total_minutes as f64 / sessions as f64)
}
