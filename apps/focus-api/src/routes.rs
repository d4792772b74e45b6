use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use focus_domain::{
	DailyPlan, DailyPlanDraft, DailyPlanPatch, Goal, GoalDraft, GoalPatch, Note, NoteDraft,
	NotePatch, OwnerId, Reminder, ReminderDraft, ReminderPatch, StudySession, StudySessionDraft,
	StudySessionPatch, time_serde,
};
use focus_service::{
	DashboardSnapshot, Error as ServiceError, ProductivitySummary, StudyStatistics,
};

use crate::{auth::AuthContext, state::AppState};

type ApiResult<T> = Result<T, ApiError>;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/auth/user/", get(current_user))
		.route("/dashboard/", get(dashboard))
		.route("/statistics/study/", get(study_statistics))
		.route("/statistics/productivity/", get(productivity_statistics))
		.route("/notes/", get(list_notes).post(create_note))
		.route(
			"/notes/{id}/",
			get(get_note).put(update_note).patch(update_note).delete(delete_note),
		)
		.route("/daily-plans/", get(list_daily_plans).post(create_daily_plan))
		.route(
			"/daily-plans/{id}/",
			get(get_daily_plan)
				.put(update_daily_plan)
				.patch(update_daily_plan)
				.delete(delete_daily_plan),
		)
		.route("/study-sessions/", get(list_study_sessions).post(create_study_session))
		.route(
			"/study-sessions/{id}/",
			get(get_study_session)
				.put(update_study_session)
				.patch(update_study_session)
				.delete(delete_study_session),
		)
		.route("/goals/", get(list_goals).post(create_goal))
		.route(
			"/goals/{id}/",
			get(get_goal).put(update_goal).patch(update_goal).delete(delete_goal),
		)
		.route("/reminders/", get(list_reminders).post(create_reminder))
		.route(
			"/reminders/{id}/",
			get(get_reminder).put(update_reminder).patch(update_reminder).delete(delete_reminder),
		)
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Serialize)]
struct CurrentUser {
	id: OwnerId,
}

async fn current_user(auth: AuthContext) -> Json<CurrentUser> {
	Json(CurrentUser { id: auth.owner })
}

async fn dashboard(
	State(state): State<AppState>,
	auth: AuthContext,
) -> ApiResult<Json<DashboardSnapshot>> {
	let reference = state.service.reference(OffsetDateTime::now_utc());

	Ok(Json(state.service.dashboard(auth.owner, reference).await?))
}

async fn study_statistics(
	State(state): State<AppState>,
	auth: AuthContext,
) -> ApiResult<Json<StudyStatistics>> {
	let reference = state.service.reference(OffsetDateTime::now_utc());

	Ok(Json(state.service.weekly_study_stats(auth.owner, reference).await?))
}

async fn productivity_statistics(
	State(state): State<AppState>,
	auth: AuthContext,
) -> ApiResult<Json<ProductivitySummary>> {
	let reference = state.service.reference(OffsetDateTime::now_utc());

	Ok(Json(state.service.productivity_summary(auth.owner, reference).await?))
}

async fn list_notes(
	State(state): State<AppState>,
	auth: AuthContext,
) -> ApiResult<Json<Vec<Note>>> {
	Ok(Json(state.service.list_notes(auth.owner).await?))
}

async fn create_note(
	State(state): State<AppState>,
	auth: AuthContext,
	payload: Result<Json<NoteDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Note>)> {
	let note =
		state.service.create_note(auth.owner, body(payload)?, OffsetDateTime::now_utc()).await?;

	Ok((StatusCode::CREATED, Json(note)))
}

async fn get_note(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Note>> {
	Ok(Json(state.service.get_note(auth.owner, path_id(id)?).await?))
}

async fn update_note(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
	payload: Result<Json<NotePatch>, JsonRejection>,
) -> ApiResult<Json<Note>> {
	let note = state
		.service
		.update_note(auth.owner, path_id(id)?, body(payload)?, OffsetDateTime::now_utc())
		.await?;

	Ok(Json(note))
}

async fn delete_note(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
	state.service.delete_note(auth.owner, path_id(id)?).await?;

	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct DailyPlanQuery {
	date: Option<String>,
}

async fn list_daily_plans(
	State(state): State<AppState>,
	auth: AuthContext,
	query: Result<Query<DailyPlanQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<DailyPlan>>> {
	let Query(query) = query.map_err(|err| ApiError::invalid(err.body_text(), None))?;
	let planned_date = query
		.date
		.as_deref()
		.map(|raw| {
			time_serde::parse_date(raw).map_err(|_| {
				ApiError::invalid(
					"date must be formatted as YYYY-MM-DD.",
					Some(vec!["date".to_string()]),
				)
			})
		})
		.transpose()?;

	Ok(Json(state.service.list_daily_plans(auth.owner, planned_date).await?))
}

async fn create_daily_plan(
	State(state): State<AppState>,
	auth: AuthContext,
	payload: Result<Json<DailyPlanDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DailyPlan>)> {
	let plan = state
		.service
		.create_daily_plan(auth.owner, body(payload)?, OffsetDateTime::now_utc())
		.await?;

	Ok((StatusCode::CREATED, Json(plan)))
}

async fn get_daily_plan(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DailyPlan>> {
	Ok(Json(state.service.get_daily_plan(auth.owner, path_id(id)?).await?))
}

async fn update_daily_plan(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
	payload: Result<Json<DailyPlanPatch>, JsonRejection>,
) -> ApiResult<Json<DailyPlan>> {
	let plan = state
		.service
		.update_daily_plan(auth.owner, path_id(id)?, body(payload)?, OffsetDateTime::now_utc())
		.await?;

	Ok(Json(plan))
}

async fn delete_daily_plan(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
	state.service.delete_daily_plan(auth.owner, path_id(id)?).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn list_study_sessions(
	State(state): State<AppState>,
	auth: AuthContext,
) -> ApiResult<Json<Vec<StudySession>>> {
	Ok(Json(state.service.list_study_sessions(auth.owner).await?))
}

async fn create_study_session(
	State(state): State<AppState>,
	auth: AuthContext,
	payload: Result<Json<StudySessionDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StudySession>)> {
	let session = state
		.service
		.create_study_session(auth.owner, body(payload)?, OffsetDateTime::now_utc())
		.await?;

	Ok((StatusCode::CREATED, Json(session)))
}

async fn get_study_session(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<StudySession>> {
	Ok(Json(state.service.get_study_session(auth.owner, path_id(id)?).await?))
}

async fn update_study_session(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
	payload: Result<Json<StudySessionPatch>, JsonRejection>,
) -> ApiResult<Json<StudySession>> {
	let session = state
		.service
		.update_study_session(auth.owner, path_id(id)?, body(payload)?, OffsetDateTime::now_utc())
		.await?;

	Ok(Json(session))
}

async fn delete_study_session(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
	state.service.delete_study_session(auth.owner, path_id(id)?).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn list_goals(
	State(state): State<AppState>,
	auth: AuthContext,
) -> ApiResult<Json<Vec<Goal>>> {
	Ok(Json(state.service.list_goals(auth.owner).await?))
}

async fn create_goal(
	State(state): State<AppState>,
	auth: AuthContext,
	payload: Result<Json<GoalDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
	let goal =
		state.service.create_goal(auth.owner, body(payload)?, OffsetDateTime::now_utc()).await?;

	Ok((StatusCode::CREATED, Json(goal)))
}

async fn get_goal(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Goal>> {
	Ok(Json(state.service.get_goal(auth.owner, path_id(id)?).await?))
}

async fn update_goal(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
	payload: Result<Json<GoalPatch>, JsonRejection>,
) -> ApiResult<Json<Goal>> {
	let goal = state
		.service
		.update_goal(auth.owner, path_id(id)?, body(payload)?, OffsetDateTime::now_utc())
		.await?;

	Ok(Json(goal))
}

async fn delete_goal(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
	state.service.delete_goal(auth.owner, path_id(id)?).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn list_reminders(
	State(state): State<AppState>,
	auth: AuthContext,
) -> ApiResult<Json<Vec<Reminder>>> {
	Ok(Json(state.service.list_reminders(auth.owner).await?))
}

async fn create_reminder(
	State(state): State<AppState>,
	auth: AuthContext,
	payload: Result<Json<ReminderDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Reminder>)> {
	let reminder = state
		.service
		.create_reminder(auth.owner, body(payload)?, OffsetDateTime::now_utc())
		.await?;

	Ok((StatusCode::CREATED, Json(reminder)))
}

async fn get_reminder(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Reminder>> {
	Ok(Json(state.service.get_reminder(auth.owner, path_id(id)?).await?))
}

async fn update_reminder(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
	payload: Result<Json<ReminderPatch>, JsonRejection>,
) -> ApiResult<Json<Reminder>> {
	let reminder = state
		.service
		.update_reminder(auth.owner, path_id(id)?, body(payload)?, OffsetDateTime::now_utc())
		.await?;

	Ok(Json(reminder))
}

async fn delete_reminder(
	State(state): State<AppState>,
	auth: AuthContext,
	id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
	state.service.delete_reminder(auth.owner, path_id(id)?).await?;

	Ok(StatusCode::NO_CONTENT)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
	payload.map(|Json(value)| value).map_err(|err| ApiError::invalid(err.body_text(), None))
}

fn path_id(id: Result<Path<Uuid>, PathRejection>) -> ApiResult<Uuid> {
	id.map(|Path(id)| id)
		.map_err(|_| ApiError::invalid("id must be a UUID.", Some(vec!["id".to_string()])))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}

	pub fn unauthorized() -> Self {
		Self::new(
			StatusCode::UNAUTHORIZED,
			"UNAUTHORIZED",
			"A valid bearer token is required.",
			None,
		)
	}

	fn invalid(message: impl Into<String>, fields: Option<Vec<String>>) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, fields)
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } => Self::invalid(message, None),
			ServiceError::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			ServiceError::Storage { message } => {
				tracing::warn!(error = %message, "Request failed with a storage error.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"INTERNAL_ERROR",
					"Internal error.",
					None,
				)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}
