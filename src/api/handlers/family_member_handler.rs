//! Family member handlers.

use axum::{
    extract::{OriginalUri, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::payload::{provided_text, required};
use crate::api::extractors::{JsonBody, Resolvable, Resolved};
use crate::api::AppState;
use crate::config::{FAMILY_MEMBER_NOT_FOUND, FAMILY_MEMBER_UPDATE_REQUIRED};
use crate::domain::{FamilyMember, FamilyMemberChanges, NewFamilyMember};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

/// Family member creation request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateFamilyMemberRequest {
    #[schema(example = "Peter")]
    pub first_name: Option<String>,
    #[schema(example = "Tardif")]
    pub last_name: Option<String>,
}

impl CreateFamilyMemberRequest {
    /// Fields are checked in declaration order.
    pub fn into_new(self) -> AppResult<NewFamilyMember> {
        Ok(NewFamilyMember {
            first_name: required(self.first_name, "first_name")?,
            last_name: required(self.last_name, "last_name")?,
        })
    }
}

/// Family member update request, any subset of fields. `null`, `false`,
/// `0` and `""` count as not provided.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFamilyMemberRequest {
    #[serde(default, deserialize_with = "provided_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "provided_text")]
    pub last_name: Option<String>,
}

impl UpdateFamilyMemberRequest {
    pub fn into_changes(self) -> AppResult<FamilyMemberChanges> {
        let changes = FamilyMemberChanges {
            first_name: self.first_name,
            last_name: self.last_name,
        };

        if changes.is_empty() {
            return Err(AppError::validation(FAMILY_MEMBER_UPDATE_REQUIRED));
        }
        Ok(changes)
    }
}

#[axum::async_trait]
impl Resolvable for FamilyMember {
    const NOT_FOUND: &'static str = FAMILY_MEMBER_NOT_FOUND;

    async fn fetch(state: &AppState, id: i32) -> AppResult<Option<Self>> {
        state.family_members.get_by_id(id).await
    }
}

/// Create family member routes
pub fn family_member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_family_members).post(create_family_member))
        .route(
            "/:id",
            get(get_family_member)
                .delete(delete_family_member)
                .patch(update_family_member),
        )
}

/// List all family members
#[utoipa::path(
    get,
    path = "/api/family-members",
    tag = "Family members",
    responses(
        (status = 200, description = "All family members", body = Vec<FamilyMember>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_family_members(State(state): State<AppState>) -> AppResult<Json<Vec<FamilyMember>>> {
    let members = state.family_members.list_all().await?;
    Ok(Json(members.iter().map(FamilyMember::sanitized).collect()))
}

/// Create a family member
#[utoipa::path(
    post,
    path = "/api/family-members",
    tag = "Family members",
    request_body = CreateFamilyMemberRequest,
    responses(
        (status = 201, description = "Family member created", body = FamilyMember,
            headers(("Location" = String, description = "Path of the new family member"))),
        (status = 400, description = "Missing field or malformed JSON")
    )
)]
pub async fn create_family_member(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonBody(payload): JsonBody<CreateFamilyMemberRequest>,
) -> AppResult<Created<FamilyMember>> {
    let member = state.family_members.insert(payload.into_new()?).await?;
    tracing::info!(id = member.id, "Family member created");

    Ok(Created::at(uri.path(), member.id, member.sanitized()))
}

/// Get a family member by ID
#[utoipa::path(
    get,
    path = "/api/family-members/{id}",
    tag = "Family members",
    params(("id" = i32, Path, description = "Family member ID")),
    responses(
        (status = 200, description = "Family member found", body = FamilyMember),
        (status = 404, description = "Family member does not exist")
    )
)]
pub async fn get_family_member(Resolved(member): Resolved<FamilyMember>) -> Json<FamilyMember> {
    Json(member.sanitized())
}

/// Delete a family member. Memories referencing it are left in place.
#[utoipa::path(
    delete,
    path = "/api/family-members/{id}",
    tag = "Family members",
    params(("id" = i32, Path, description = "Family member ID")),
    responses(
        (status = 204, description = "Family member deleted"),
        (status = 404, description = "Family member does not exist")
    )
)]
pub async fn delete_family_member(
    State(state): State<AppState>,
    Resolved(member): Resolved<FamilyMember>,
) -> AppResult<NoContent> {
    let removed = state.family_members.delete_by_id(member.id).await?;
    tracing::info!(id = member.id, removed, "Family member deleted");

    Ok(NoContent)
}

/// Update some fields of a family member
#[utoipa::path(
    patch,
    path = "/api/family-members/{id}",
    tag = "Family members",
    params(("id" = i32, Path, description = "Family member ID")),
    request_body = UpdateFamilyMemberRequest,
    responses(
        (status = 204, description = "Family member updated"),
        (status = 400, description = "No field to update"),
        (status = 404, description = "Family member does not exist")
    )
)]
pub async fn update_family_member(
    State(state): State<AppState>,
    Resolved(member): Resolved<FamilyMember>,
    JsonBody(payload): JsonBody<UpdateFamilyMemberRequest>,
) -> AppResult<NoContent> {
    let changes = payload.into_changes()?;
    state.family_members.update_by_id(member.id, changes).await?;
    tracing::debug!(id = member.id, "Family member updated");

    Ok(NoContent)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use mockall::predicate::eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::api::create_router;
    use crate::config::{Config, Environment};
    use crate::infra::{MockFamilyMemberRepository, MockMemoryRepository, MockUploadSigner};

    fn app(members: MockFamilyMemberRepository, environment: Environment) -> Router {
        let config = Config {
            environment,
            ..Config::default()
        };
        create_router(AppState::new(
            Arc::new(members),
            Arc::new(MockMemoryRepository::new()),
            Arc::new(MockUploadSigner::new()),
            config,
        ))
    }

    fn peter() -> FamilyMember {
        FamilyMember {
            id: 1,
            first_name: "Peter".to_string(),
            last_name: "Tardif".to_string(),
        }
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, axum::http::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, json)
    }

    #[test]
    fn test_create_request_reports_first_missing_field() {
        let err = CreateFamilyMemberRequest::default().into_new().unwrap_err();
        assert_eq!(err.to_string(), "Missing 'first_name' in request body");

        let err = CreateFamilyMemberRequest {
            first_name: Some("Peter".to_string()),
            last_name: None,
        }
        .into_new()
        .unwrap_err();
        assert_eq!(err.to_string(), "Missing 'last_name' in request body");
    }

    #[test]
    fn test_update_request_requires_a_value() {
        let err = UpdateFamilyMemberRequest::default().into_changes().unwrap_err();
        assert_eq!(err.to_string(), FAMILY_MEMBER_UPDATE_REQUIRED);
    }

    #[tokio::test]
    async fn test_update_with_falsy_values_gets_the_resource_message() {
        let mut members = MockFamilyMemberRepository::new();
        members.expect_get_by_id().with(eq(1)).returning(|_| Ok(Some(peter())));
        let app = app(members, Environment::Production);

        for body in [
            json!({ "first_name": false }),
            json!({ "first_name": 0, "last_name": "" }),
            json!({ "first_name": null }),
        ] {
            let (status, _, body) =
                send(app.clone(), Method::PATCH, "/api/family-members/1", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": { "message": FAMILY_MEMBER_UPDATE_REQUIRED } }));
        }
    }

    #[tokio::test]
    async fn test_list_sanitizes_every_member() {
        let mut members = MockFamilyMemberRepository::new();
        members.expect_list_all().times(1).returning(|| {
            Ok(vec![FamilyMember {
                id: 4,
                first_name: "<script>alert(\"xss\");</script>".to_string(),
                last_name: "Lee".to_string(),
            }])
        });

        let (status, _, body) = send(app(members, Environment::Production), Method::GET, "/api/family-members", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body[0]["first_name"],
            "&lt;script&gt;alert(&quot;xss&quot;);&lt;/script&gt;"
        );
    }

    #[tokio::test]
    async fn test_create_missing_field_never_reaches_the_store() {
        // No expectations: any accessor call would fail the test
        let members = MockFamilyMemberRepository::new();

        let (status, _, body) = send(
            app(members, Environment::Production),
            Method::POST,
            "/api/family-members",
            Some(json!({ "first_name": "Peter" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": { "message": "Missing 'last_name' in request body" } }));
    }

    #[tokio::test]
    async fn test_create_returns_location_and_entity() {
        let mut members = MockFamilyMemberRepository::new();
        members
            .expect_insert()
            .withf(|new| new.first_name == "Peter" && new.last_name == "Tardif")
            .times(1)
            .returning(|_| Ok(peter()));

        let (status, headers, body) = send(
            app(members, Environment::Production),
            Method::POST,
            "/api/family-members",
            Some(json!({ "first_name": "Peter", "last_name": "Tardif" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(headers.get(header::LOCATION).unwrap(), "/api/family-members/1");
        assert_eq!(body, json!({ "id": 1, "first_name": "Peter", "last_name": "Tardif" }));
    }

    #[tokio::test]
    async fn test_unknown_and_non_numeric_ids_are_not_found() {
        let mut members = MockFamilyMemberRepository::new();
        members.expect_get_by_id().with(eq(99)).times(1).returning(|_| Ok(None));

        let app = app(members, Environment::Production);
        let expected = json!({ "error": { "message": "Family member does not exist" } });

        let (status, _, body) = send(app.clone(), Method::DELETE, "/api/family-members/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);

        let (status, _, body) = send(app, Method::GET, "/api/family-members/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_update_passes_only_provided_fields() {
        let mut members = MockFamilyMemberRepository::new();
        members.expect_get_by_id().with(eq(1)).returning(|_| Ok(Some(peter())));
        members
            .expect_update_by_id()
            .withf(|id, changes| {
                *id == 1
                    && changes.first_name.as_deref() == Some("Petra")
                    && changes.last_name.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(1));

        let (status, _, body) = send(
            app(members, Environment::Production),
            Method::PATCH,
            "/api/family-members/1",
            Some(json!({ "first_name": "Petra", "last_name": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_storage_failure_hides_detail_in_production() {
        let mut members = MockFamilyMemberRepository::new();
        members
            .expect_list_all()
            .returning(|| Err(sea_orm::DbErr::Custom("connection refused".to_string()).into()));

        let (status, _, body) = send(app(members, Environment::Production), Method::GET, "/api/family-members", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": { "message": "server error" } }));
    }

    #[tokio::test]
    async fn test_storage_failure_shows_detail_in_development() {
        let mut members = MockFamilyMemberRepository::new();
        members
            .expect_list_all()
            .returning(|| Err(sea_orm::DbErr::Custom("connection refused".to_string()).into()));

        let (status, _, body) = send(app(members, Environment::Development), Method::GET, "/api/family-members", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].as_str().unwrap().contains("connection refused"));
        assert!(body["error"]["detail"].as_str().unwrap().contains("Database"));
    }
}
