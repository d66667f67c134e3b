use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Taskboard API",
        version = "0.1.0",
        description = "Users, boards with their tasks, and a music library with favorites"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc),
        (path = "/boards", api = domain_boards::ApiDoc)
    )
)]
struct RoutedApiDoc;

/// Full document. The music routes sit at the API root, so their document
/// is merged rather than nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = RoutedApiDoc::openapi();
        doc.merge(domain_music::ApiDoc::openapi());
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_covers_every_domain() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/users",
            "/users/{id}/password",
            "/boards/{boardId}/tasks/{taskId}",
            "/artist/{id}",
            "/favs/{kind}/{id}",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }
}
