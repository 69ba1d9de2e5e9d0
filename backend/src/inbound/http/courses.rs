//! Courses API handlers.
//!
//! ```text
//! GET    /api/courses
//! GET    /api/courses/recent?limit=4
//! GET    /api/courses/popular?limit=4
//! POST   /api/courses {"title":"Rust","link":"https://doc.rust-lang.org/","category":"Programming"}
//! DELETE /api/courses/{id}
//! ```
//!
//! Ownership comes from the session; any owner fields in the body are
//! ignored.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Course, NewCourse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::MessageResponse;
use crate::inbound::http::schemas::{CourseSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{course_error, listing_limit, parse_course_id, required};

/// Upload form for `POST /api/courses`.
///
/// Fields are optional at the serde level so a missing one is reported as
/// a field error rather than a JSON error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UploadCourseRequest {
    #[schema(example = "Rust for beginners")]
    pub title: Option<String>,
    #[schema(example = "https://doc.rust-lang.org/book/")]
    pub link: Option<String>,
    #[schema(example = "Programming")]
    pub category: Option<String>,
}

impl UploadCourseRequest {
    fn into_new_course(self) -> ApiResult<NewCourse> {
        let title = required(self.title, "title")?;
        let link = required(self.link, "link")?;
        let category = required(self.category, "category")?;
        NewCourse::try_from_parts(&title, &link, &category).map_err(course_error)
    }
}

/// Optional size limit for the ranked listings.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    /// Number of courses to return, 1 to 50; defaults to 4.
    pub limit: Option<usize>,
}

/// List all courses in upload order.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses in upload order", body = [CourseSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Course>>> {
    Ok(web::Json(state.courses.list_courses().await?))
}

/// Newest courses first.
#[utoipa::path(
    get,
    path = "/api/courses/recent",
    params(ListingQuery),
    responses(
        (status = 200, description = "Newest courses", body = [CourseSchema]),
        (status = 400, description = "Invalid limit", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "recentCourses",
    security([])
)]
#[get("/courses/recent")]
pub async fn recent_courses(
    state: web::Data<HttpState>,
    query: web::Query<ListingQuery>,
) -> ApiResult<web::Json<Vec<Course>>> {
    let limit = listing_limit(query.limit)?;
    Ok(web::Json(state.courses.recent_courses(limit).await?))
}

/// Most viewed courses first; ties go to the newest.
#[utoipa::path(
    get,
    path = "/api/courses/popular",
    params(ListingQuery),
    responses(
        (status = 200, description = "Most viewed courses", body = [CourseSchema]),
        (status = 400, description = "Invalid limit", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "popularCourses",
    security([])
)]
#[get("/courses/popular")]
pub async fn popular_courses(
    state: web::Data<HttpState>,
    query: web::Query<ListingQuery>,
) -> ApiResult<web::Json<Vec<Course>>> {
    let limit = listing_limit(query.limit)?;
    Ok(web::Json(state.courses.popular_courses(limit).await?))
}

/// Upload a course owned by the session user.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = UploadCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseSchema),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "uploadCourse"
)]
#[post("/courses")]
pub async fn upload_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UploadCourseRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let upload = payload.into_inner().into_new_course()?;
    let course = state.course_commands.upload_course(&actor, upload).await?;
    Ok(HttpResponse::Created().json(course))
}

/// Delete a course. Owners may delete their own; sub-admins anything not
/// uploaded by an admin; admins anything.
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = u64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not allowed to delete this course", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_course_id(&path.into_inner())?;
    let removed = state.course_commands.delete_course(&actor, id).await?;
    Ok(web::Json(MessageResponse::new(format!(
        "Deleted course \"{}\"",
        removed.title()
    ))))
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
