//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every registry endpoint from the inbound layer along
//! with the request, response and error schemas. The document backs Swagger
//! UI in debug builds and is exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CreateUserBody, UpdateUserBody, UserResponse};
use utoipa::OpenApi;

/// OpenAPI document for the registry REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "Register, list, update and remove users held in memory."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserBody,
        UpdateUserBody,
        UserResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "User registration and maintenance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's paths and schema fields.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn object_fields(schema: &RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/users")]
    #[case("/api/v1/users/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn item_path_exposes_get_patch_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/v1/users/{id}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.patch.is_some());
        assert!(item.delete.is_some());
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get(ERROR_SCHEMA_NAME).expect("Error schema"));

        assert!(fields.iter().any(|field| field == "code"));
        assert!(fields.iter().any(|field| field == "message"));
    }

    #[test]
    fn user_schema_hides_sequence_number() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get("UserResponse").expect("User schema"));

        for expected in [
            "id",
            "firstName",
            "lastName",
            "otherNames",
            "email",
            "dateOfBirth",
            "gender",
        ] {
            assert!(fields.iter().any(|field| field == expected), "missing {expected}");
        }
        assert!(!fields.iter().any(|field| field == "sequenceNumber"));
    }
}
