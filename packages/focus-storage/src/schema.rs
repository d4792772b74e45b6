pub fn render_schema() -> String {
	let init = include_str!("../../../sql/init.sql");

	expand_includes(init)
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_notes.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_notes.sql")),
				"tables/002_daily_plans.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_daily_plans.sql")),
				"tables/003_study_sessions.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_study_sessions.sql")),
				"tables/004_goals.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_goals.sql")),
				"tables/005_reminders.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_reminders.sql")),
				_ => {
					out.push_str(line);
					out.push('\n');
				},
			}

			out.push('\n');

			continue;
		}

		out.push_str(line);
		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	#[test]
	fn every_include_is_expanded() {
		let sql = super::render_schema();

		assert!(!sql.contains("\\ir "));

		for table in ["notes", "daily_plans", "study_sessions", "goals", "reminders"] {
			assert!(sql.contains(&format!("CREATE TABLE IF NOT EXISTS {table} (")));
		}
	}
}
