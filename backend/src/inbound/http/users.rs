//! User registry HTTP handlers.
//!
//! ```text
//! POST   /api/v1/users        {"firstName":"User 4","lastName":"Test",...}
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! PATCH  /api/v1/users/{id}   {"lastName":"Updated Test"}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateUserRequest, UpdateUserRequest};
use crate::domain::User;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/v1/users`.
///
/// Fields are optional at the transport level so a missing field is reported
/// as a validation failure naming that field.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    #[schema(example = "User 4")]
    pub first_name: Option<String>,
    #[schema(example = "Test")]
    pub last_name: Option<String>,
    #[schema(example = "Four")]
    pub other_names: Option<String>,
    #[schema(example = "user4@test.com")]
    pub email: Option<String>,
    /// Calendar date (`YYYY-MM-DD`) or RFC 3339 timestamp.
    #[schema(example = "2011-10-05T14:48:00.000Z")]
    pub date_of_birth: Option<String>,
    /// One of `MALE`, `FEMALE`, `OTHERS`.
    #[schema(example = "MALE")]
    pub gender: Option<String>,
}

impl From<CreateUserBody> for CreateUserRequest {
    fn from(body: CreateUserBody) -> Self {
        let CreateUserBody {
            first_name,
            last_name,
            other_names,
            email,
            date_of_birth,
            gender,
        } = body;
        Self {
            first_name,
            last_name,
            other_names,
            email,
            date_of_birth,
            gender,
        }
    }
}

/// Partial update body for `PATCH /api/v1/users/{id}`. Omitted or blank
/// fields keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub first_name: Option<String>,
    #[schema(example = "Updated Test")]
    pub last_name: Option<String>,
    pub other_names: Option<String>,
    #[schema(example = "updated-email@test.com")]
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
}

impl From<UpdateUserBody> for UpdateUserRequest {
    fn from(body: UpdateUserBody) -> Self {
        let UpdateUserBody {
            first_name,
            last_name,
            other_names,
            email,
            date_of_birth,
            gender,
        } = body;
        Self {
            first_name,
            last_name,
            other_names,
            email,
            date_of_birth,
            gender,
        }
    }
}

/// User as returned to clients. The registration sequence number stays
/// internal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "User 4")]
    pub first_name: String,
    #[schema(example = "Test")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Four")]
    pub other_names: Option<String>,
    #[schema(example = "user4@test.com")]
    pub email: String,
    #[schema(example = "2011-10-05")]
    pub date_of_birth: NaiveDate,
    #[schema(example = "MALE")]
    pub gender: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            other_names: user.other_names().map(ToString::to_string),
            email: user.email().to_string(),
            date_of_birth: user.date_of_birth(),
            gender: user.gender().to_string(),
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List every registered user in registration order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use registry::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Registered users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users_query.find_user(&path.into_inner()).await?;
    Ok(web::Json(user.into()))
}

/// Apply a partial update to a user.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Malformed field", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users
        .update(&path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(user.into()))
}

/// Remove a user, returning the removed record.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Removed user", body = UserResponse),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.remove(&path.into_inner()).await?;
    Ok(web::Json(user.into()))
}

/// Mount every user route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}
