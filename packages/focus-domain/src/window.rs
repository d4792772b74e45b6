//! Calendar window arithmetic.
//!
//! Every date comparison happens in one canonical offset held by [`Calendar`]. The free functions
//! are pure functions of a reference date.

use time::{Date, Duration, OffsetDateTime, UtcOffset, macros::time};

/// Number of days covered by the rolling study report.
pub const ROLLING_DAYS: usize = 7;

/// Inclusive range of calendar dates.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateWindow {
	pub start: Date,
	pub end: Date,
}
impl DateWindow {
	pub const fn new(start: Date, end: Date) -> Self {
		Self { start, end }
	}

	pub const fn single(date: Date) -> Self {
		Self { start: date, end: date }
	}

	pub fn contains(&self, date: Date) -> bool {
		self.start <= date && date <= self.end
	}
}

/// The instant a request is evaluated at, paired with its date in the canonical offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reference {
	pub date: Date,
	pub now: OffsetDateTime,
}
impl Reference {
	pub const fn today(&self) -> Date {
		self.date
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Calendar {
	offset: UtcOffset,
}
impl Calendar {
	pub const fn new(offset: UtcOffset) -> Self {
		Self { offset }
	}

	pub const fn utc() -> Self {
		Self { offset: UtcOffset::UTC }
	}

	pub fn reference(&self, now: OffsetDateTime) -> Reference {
		let now = now.to_offset(self.offset);

		Reference { date: now.date(), now }
	}

	/// Calendar date of `instant` in the canonical offset.
	pub fn date_of(&self, instant: OffsetDateTime) -> Date {
		instant.to_offset(self.offset).date()
	}

	/// First instant of `date` in the canonical offset.
	pub fn start_of(&self, date: Date) -> OffsetDateTime {
		date.midnight().assume_offset(self.offset)
	}

	/// Half-open instant range `[start, end)` covering every day of `window`.
	pub fn span(&self, window: DateWindow) -> (OffsetDateTime, OffsetDateTime) {
		let end = window.end.next_day().map(|day| self.start_of(day)).unwrap_or_else(|| {
			window.end.with_time(time!(23:59:59.999_999_999)).assume_offset(self.offset)
		});

		(self.start_of(window.start), end)
	}
}
impl Default for Calendar {
	fn default() -> Self {
		Self::utc()
	}
}

/// The seven consecutive dates ending at `reference_date`, oldest first.
pub fn last_7_days(reference_date: Date) -> [Date; ROLLING_DAYS] {
	std::array::from_fn(|index| {
		let back = (ROLLING_DAYS - 1 - index) as i64;

		reference_date.saturating_sub(Duration::days(back))
	})
}

pub fn last_7_days_window(reference_date: Date) -> DateWindow {
	let days = last_7_days(reference_date);

	DateWindow::new(days[0], days[ROLLING_DAYS - 1])
}

/// Monday of the ISO week containing `reference_date`.
pub fn week_start(reference_date: Date) -> Date {
	let offset = i64::from(reference_date.weekday().number_days_from_monday());

	reference_date.saturating_sub(Duration::days(offset))
}

/// `[week_start(reference_date), reference_date]`.
pub fn week_to_date(reference_date: Date) -> DateWindow {
	DateWindow::new(week_start(reference_date), reference_date)
}

#[cfg(test)]
mod tests {
	use time::macros::{date, datetime, offset};

	use super::*;

	#[test]
	fn span_covers_whole_days_in_canonical_offset() {
		let calendar = Calendar::new(offset!(+02:00));
		let (start, end) = calendar.span(DateWindow::single(date!(2026 - 10 - 16)));

		assert_eq!(start, datetime!(2026-10-16 00:00 +02:00));
		assert_eq!(end, datetime!(2026-10-17 00:00 +02:00));
	}

	#[test]
	fn reference_uses_canonical_date() {
		let calendar = Calendar::new(offset!(+09:00));
		let reference = calendar.reference(datetime!(2026-10-16 20:30 UTC));

		assert_eq!(reference.today(), date!(2026 - 10 - 17));
		assert_eq!(reference.now, datetime!(2026-10-17 05:30 +09:00));
	}
}
