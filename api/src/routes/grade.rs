use crate::response::{ApiResponse, format_validation_errors};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct GradeRequest {
    #[validate(length(max = 4096, message = "Problem text must be at most 4096 characters"))]
    pub problem_text: String,

    #[validate(length(max = 65536, message = "Submitted code must be at most 65536 characters"))]
    pub code: String,
}

pub fn grade_routes() -> Router<AppState> {
    Router::new().route("/", post(grade))
}

/// POST /grade
///
/// Grade a submission against the problem bank.
///
/// ### Request Body
/// ```json
/// {
///   "problem_text": "Read two integers from standard input and print their sum as \"Sum: <value>\".",
///   "code": "#include <stdio.h>\nint main() { ... }"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK` for every graded submission, including empty code and unknown problems
/// ```json
/// {
///   "success": true,
///   "data": {
///     "score": 100,
///     "issues": ["No issues found."],
///     "summary_text": "Correct output! Your code also closely matches the reference approach.",
///     "matched_problem_text": "Read two integers ...",
///     "user_output": "Sum: 5\n",
///     "expected_output": "Sum: 5\n",
///     "outputs_matched": true,
///     "outcome": "output_matched"
///   },
///   "message": "Grading complete"
/// }
/// ```
///
/// - `400 Bad Request` (oversized input)
/// ```json
/// {
///   "success": false,
///   "data": null,
///   "message": "Submitted code must be at most 65536 characters"
/// }
/// ```
pub async fn grade(State(state): State<AppState>, Json(req): Json<GradeRequest>) -> Response {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(
                &validation_errors,
            ))),
        )
            .into_response();
    }

    let result = state.grader().grade(&req.problem_text, &req.code).await;

    (
        StatusCode::OK,
        Json(ApiResponse::success(result, "Grading complete")),
    )
        .into_response()
}
