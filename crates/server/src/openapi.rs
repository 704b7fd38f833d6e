use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RepositoryDoc {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub techs: Vec<String>,
    pub likes: u64,
}

#[derive(ToSchema)]
pub struct CreateRepositoryDoc {
    pub title: String,
    pub url: String,
    pub techs: Vec<String>,
}

#[derive(ToSchema)]
pub struct UpdateRepositoryDoc {
    pub title: Option<String>,
    pub url: Option<String>,
    pub techs: Option<Vec<String>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::repositories::list_repositories,
        crate::routes::repositories::create_repository,
        crate::routes::repositories::get_repository,
        crate::routes::repositories::update_repository,
        crate::routes::repositories::delete_repository,
        crate::routes::repositories::like_repository,
    ),
    components(
        schemas(
            HealthResponse,
            RepositoryDoc,
            CreateRepositoryDoc,
            UpdateRepositoryDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "repositories")
    )
)]
pub struct ApiDoc;
