use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::User;

/// Profile of the caller. Mounted behind the activated-user gate, which
/// supplies the `User`.
pub async fn get_current_user(Extension(user): Extension<User>) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, (&user).into())
}
