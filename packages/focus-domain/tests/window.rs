use time::{Duration, Weekday, macros::date};

use focus_domain::window::{self, DateWindow};

fn sample_dates() -> impl Iterator<Item = time::Date> {
	// Covers a leap day and two year boundaries.
	(0..900).map(|offset| date!(2023 - 11 - 20) + Duration::days(offset))
}

#[test]
fn last_7_days_is_seven_consecutive_dates_ending_at_reference() {
	for reference in sample_dates() {
		let days = window::last_7_days(reference);

		assert_eq!(days.len(), 7);
		assert_eq!(days[6], reference);

		for pair in days.windows(2) {
			assert_eq!(pair[0].next_day(), Some(pair[1]));
		}
	}
}

#[test]
fn last_7_days_crosses_year_boundary() {
	let days = window::last_7_days(date!(2027 - 01 - 03));

	assert_eq!(days[0], date!(2026 - 12 - 28));
	assert_eq!(
		window::last_7_days_window(date!(2027 - 01 - 03)),
		DateWindow::new(date!(2026 - 12 - 28), date!(2027 - 01 - 03))
	);
}

#[test]
fn week_start_is_the_monday_on_or_before_reference() {
	for reference in sample_dates() {
		let start = window::week_start(reference);

		assert_eq!(start.weekday(), Weekday::Monday);
		assert!(start <= reference);
		assert!(reference - start < Duration::days(7));
	}
}

#[test]
fn week_start_of_a_monday_is_itself() {
	assert_eq!(window::week_start(date!(2026 - 10 - 12)), date!(2026 - 10 - 12));
	assert_eq!(window::week_start(date!(2026 - 10 - 18)), date!(2026 - 10 - 12));
}

#[test]
fn week_to_date_is_inclusive() {
	let window = window::week_to_date(date!(2026 - 10 - 16));

	assert!(window.contains(date!(2026 - 10 - 12)));
	assert!(window.contains(date!(2026 - 10 - 16)));
	assert!(!window.contains(date!(2026 - 10 - 11)));
	assert!(!window.contains(date!(2026 - 10 - 17)));
}

#[test]
fn results_are_deterministic() {
	let reference = date!(2026 - 10 - 16);

	assert_eq!(window::last_7_days(reference), window::last_7_days(reference));
	assert_eq!(window::week_start(reference), window::week_start(reference));
}
