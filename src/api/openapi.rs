//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{family_member_handler, memory_handler, upload_handler};
use crate::domain::{FamilyMember, Memory};
use crate::infra::SignedUpload;

/// OpenAPI documentation for the family vault API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Family Vault API",
        version = "0.1.0",
        description = "Family members, their memories and direct media uploads"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        // Family member endpoints
        family_member_handler::list_family_members,
        family_member_handler::create_family_member,
        family_member_handler::get_family_member,
        family_member_handler::delete_family_member,
        family_member_handler::update_family_member,
        // Memory endpoints
        memory_handler::list_memories,
        memory_handler::create_memory,
        memory_handler::get_memory,
        memory_handler::delete_memory,
        memory_handler::update_memory,
        // Uploads
        upload_handler::sign_s3,
    ),
    components(
        schemas(
            FamilyMember,
            Memory,
            SignedUpload,
            family_member_handler::CreateFamilyMemberRequest,
            family_member_handler::UpdateFamilyMemberRequest,
            memory_handler::CreateMemoryRequest,
            memory_handler::UpdateMemoryRequest,
        )
    ),
    tags(
        (name = "Family members", description = "Family member records"),
        (name = "Memories", description = "Memories attached to family members"),
        (name = "Uploads", description = "Pre-signed object storage uploads")
    )
)]
pub struct ApiDoc;
