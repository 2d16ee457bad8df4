use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use log::warn;
use utoipa::OpenApi;

use crate::constants::ERR_MALFORMED_BODY;
use crate::errors::ApiError;
use crate::handlers;
use crate::models::HealthResponse;
use crate::openapi::ApiDoc;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                // Health check
                .route("/health", web::get().to(health_check))
                .route("/openapi.json", web::get().to(openapi_spec))
                .service(
                    web::scope("/users")
                        .route("", web::post().to(handlers::create_user))
                        .route("/register", web::post().to(handlers::register_user))
                        // before /{username}
                        .route("/search", web::get().to(handlers::search_users))
                        .route("/{username}", web::get().to(handlers::get_user))
                        .route("/{username}", web::patch().to(handlers::update_user_fields))
                        .route("/{username}", web::delete().to(handlers::delete_user))
                        .route("/{username}/raw", web::get().to(handlers::get_raw_user))
                        .route("/{username}/exists", web::get().to(handlers::user_exists))
                        .route(
                            "/{username}/fields/{field}",
                            web::put().to(handlers::update_user_field),
                        )
                        .route(
                            "/{username}/events/participating",
                            web::get().to(handlers::get_participating_events),
                        )
                        .route(
                            "/{username}/events/created",
                            web::get().to(handlers::get_created_events),
                        ),
                ),
        );
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body: {}", err);
    ApiError::bad_request(format!("{}: {}", ERR_MALFORMED_BODY, err)).into()
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}

async fn openapi_spec() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::models::Event;
    use crate::repositories::UserRepository;
    use crate::store::memory::MemoryStore;

    fn repository() -> (Arc<MemoryStore>, web::Data<UserRepository>) {
        let store = Arc::new(MemoryStore::new());
        let repository = web::Data::new(UserRepository::new(store.clone()));
        (store, repository)
    }

    macro_rules! app {
        ($repository:expr) => {
            test::init_service(
                App::new()
                    .app_data($repository.clone())
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn register_body(username: &str) -> Value {
        json!({
            "firstname": "Ada",
            "lastname": "Lovelace",
            "username": username,
            "email": format!("{}@example.com", username)
        })
    }

    #[actix_web::test]
    async fn test_health_check() {
        let (_, repository) = repository();
        let app = app!(repository);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "OK");
    }

    #[actix_web::test]
    async fn test_openapi_document_lists_user_paths() {
        let (_, repository) = repository();
        let app = app!(repository);

        let req = test::TestRequest::get().uri("/api/openapi.json").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["paths"]["/api/users/{username}"].is_object());
    }

    #[actix_web::test]
    async fn test_register_then_get() {
        let (_, repository) = repository();
        let app = app!(repository);

        let req = test::TestRequest::post()
            .uri("/api/users/register")
            .set_json(register_body("ada"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/api/users/ada").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["username"], "ada");
        assert_eq!(body["data"]["participatingIn"], json!([]));
    }

    #[actix_web::test]
    async fn test_create_full_with_events() {
        let (store, repository) = repository();
        let app = app!(repository);
        let creator = repository
            .create_basic("Org", "Anizer", "org", "org@example.com")
            .await
            .unwrap();
        let event_id = store.insert_event(Event {
            id: None,
            title: "Picnic".to_string(),
            description: None,
            location: None,
            date: None,
            creator: creator.id.unwrap(),
            participants: vec![],
        });

        let mut body = register_body("ada");
        body["participatingIn"] = json!([event_id.to_hex()]);
        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/users/ada/events/participating")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["title"], "Picnic");
        assert!(body["data"][0].get("participants").is_none());
    }

    #[actix_web::test]
    async fn test_duplicate_username_is_conflict() {
        let (_, repository) = repository();
        let app = app!(repository);

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/api/users/register")
                .set_json(register_body("ada"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }

    #[actix_web::test]
    async fn test_missing_user_is_not_found() {
        let (_, repository) = repository();
        let app = app!(repository);

        let req = test::TestRequest::get().uri("/api/users/ghost").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "USER_NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_patch_fields_later_write_wins() {
        let (_, repository) = repository();
        let app = app!(repository);
        repository
            .create_basic("Ada", "Lovelace", "ada", "ada@example.com")
            .await
            .unwrap();

        let req = test::TestRequest::patch()
            .uri("/api/users/ada")
            .set_json(json!([
                { "field": "email", "value": "a@x.com" },
                { "field": "email", "value": "b@x.com" }
            ]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["email"], "b@x.com");
    }

    #[actix_web::test]
    async fn test_patch_unknown_field_is_rejected() {
        let (_, repository) = repository();
        let app = app!(repository);
        repository
            .create_basic("Ada", "Lovelace", "ada", "ada@example.com")
            .await
            .unwrap();

        let req = test::TestRequest::patch()
            .uri("/api/users/ada")
            .set_json(json!([
                { "field": "email", "value": "a@x.com" },
                { "field": "isAdmin", "value": true }
            ]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let user = repository.get_raw_user("ada").await.unwrap().unwrap();
        assert_eq!(user.email, "ada@example.com");
    }

    #[actix_web::test]
    async fn test_put_single_field() {
        let (_, repository) = repository();
        let app = app!(repository);
        repository
            .create_basic("Ada", "Lovelace", "ada", "ada@example.com")
            .await
            .unwrap();

        let req = test::TestRequest::put()
            .uri("/api/users/ada/fields/lastname")
            .set_json(json!({ "value": "Byron" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["lastname"], "Byron");

        let req = test::TestRequest::put()
            .uri("/api/users/ghost/fields/lastname")
            .set_json(json!({ "value": "Byron" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_twice_succeeds() {
        let (_, repository) = repository();
        let app = app!(repository);
        repository
            .create_basic("Ada", "Lovelace", "ada", "ada@example.com")
            .await
            .unwrap();

        for _ in 0..2 {
            let req = test::TestRequest::delete().uri("/api/users/ada").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri("/api/users/ada/exists")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["exists"], false);
    }

    #[actix_web::test]
    async fn test_search_regex_and_literal() {
        let (_, repository) = repository();
        let app = app!(repository);
        for username in ["abc", "axc", "a.c"] {
            repository
                .create_basic("Test", "User", username, "t@example.com")
                .await
                .unwrap();
        }

        let req = test::TestRequest::get()
            .uri("/api/users/search?q=a.c")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let req = test::TestRequest::get()
            .uri("/api/users/search?q=a.c&literal=true")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["username"], "a.c");
    }

    #[actix_web::test]
    async fn test_created_events_empty_list() {
        let (_, repository) = repository();
        let app = app!(repository);
        repository
            .create_basic("Ada", "Lovelace", "ada", "ada@example.com")
            .await
            .unwrap();

        let req = test::TestRequest::get()
            .uri("/api/users/ada/events/created")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"], json!([]));
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let (_, repository) = repository();
        let app = app!(repository);

        let req = test::TestRequest::post()
            .uri("/api/users/register")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}
