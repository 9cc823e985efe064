#[cfg(test)]
mod integration_tests {
    use crate::shared::region::Region;
    use crate::shared::test_helpers::{
        mint_token, seed_garden_centre, seed_location, test_app, test_auth_config, test_pool,
    };
    use crate::shared::types::ErrorResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;

    async fn setup() -> (TestServer, SqlitePool) {
        let pool = test_pool().await;
        let server = TestServer::new(test_app(pool.clone())).unwrap();
        (server, pool)
    }

    fn token_for(region: &str) -> String {
        mint_token(&test_auth_config(), "gardener", Some(region), 3600)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (server, _) = setup().await;

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_data_routes_require_bearer_token() {
        let (server, _) = setup().await;

        for path in ["/v1/gardencentres", "/v1/locations", "/auth/me"] {
            let response = server.get(path).await;
            response.assert_status(StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_token_without_region_claim_is_unauthorized() {
        let (server, _) = setup().await;
        let token = mint_token(&test_auth_config(), "gardener", None, 3600);

        let response = server
            .get("/v1/locations")
            .authorization_bearer(&token)
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.message, "Region claim is missing.");
    }

    #[tokio::test]
    async fn test_token_signed_with_other_key_is_unauthorized() {
        let (server, _) = setup().await;
        let mut foreign = test_auth_config();
        foreign.jwt_key = "some-other-service-signing-key-0123456789".to_string();
        let token = mint_token(&foreign, "gardener", Some("UK"), 3600);

        let response = server
            .get("/v1/gardencentres")
            .authorization_bearer(&token)
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_region_claim_is_bad_request() {
        let (server, _) = setup().await;

        let response = server
            .get("/v1/locations")
            .authorization_bearer(&token_for("FR"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_login_and_me() {
        let (server, _) = setup().await;

        let response = server
            .post("/auth/register")
            .json(&json!({"username": "kate", "password": "Gr33n!house", "region": "UK"}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["message"], "User registered successfully");

        let response = server
            .post("/auth/login")
            .json(&json!({"username": "kate", "password": "Gr33n!house"}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        let token = body["token"].as_str().unwrap().to_string();

        let response = server.get("/auth/me").authorization_bearer(&token).await;
        response.assert_status(StatusCode::OK);
        let me: Value = response.json();
        assert_eq!(me["username"], "kate");
        assert_eq!(me["region"], "UK");

        let response = server
            .post("/auth/login")
            .json(&json!({"username": "kate", "password": "Wr0ng!pass"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_failures_are_bad_requests() {
        let (server, pool) = setup().await;

        let response = server
            .post("/auth/register")
            .json(&json!({"username": "pierre", "password": "Gr33n!house", "region": "FR"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.message, "Region must be 'UK' or 'US'.");

        let response = server
            .post("/auth/register")
            .json(&json!({"username": "pierre", "password": "weak", "region": "US"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        let errors = body.errors.expect("identity errors");
        assert!(errors.len() >= 3);

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(users, 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (server, _) = setup().await;

        let response = server
            .post("/v1/locations")
            .authorization_bearer(&token_for("UK"))
            .text("{not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_location_crud_flow() {
        let (server, _) = setup().await;
        let token = token_for("UK");

        let response = server
            .post("/v1/locations")
            .authorization_bearer(&token)
            .json(&json!({"name": "Bristol", "region": "US"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["region"], "UK");
        assert_eq!(
            response.header("location").to_str().unwrap(),
            format!("/v1/locations/{}", id)
        );

        let response = server
            .put(&format!("/v1/locations/{}", id))
            .authorization_bearer(&token)
            .json(&json!({"name": "Bath"}))
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = server
            .get(&format!("/v1/locations/{}", id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::OK);
        let fetched: Value = response.json();
        assert_eq!(fetched["name"], "Bath");

        let response = server.get("/v1/locations").authorization_bearer(&token).await;
        let listed: Vec<Value> = response.json();
        assert_eq!(listed.len(), 1);

        let response = server
            .put(&format!("/v1/locations/{}", id))
            .authorization_bearer(&token)
            .json(&json!({"name": "a".repeat(101)}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .put("/v1/locations/9999")
            .authorization_bearer(&token)
            .json(&json!({"name": "Nowhere"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_location_delete_is_blocked_by_garden_centres() {
        let (server, pool) = setup().await;
        let token = token_for("UK");
        let location = seed_location(&pool, "Leeds", Region::Uk).await;
        let centre = seed_garden_centre(&pool, "Leeds Ferns", location, Region::Uk).await;

        let response = server
            .delete(&format!("/v1/locations/{}", location))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(
            body.message,
            format!(
                "Cannot delete Location {} as it has associated GardenCentres.",
                location
            )
        );

        let response = server
            .get(&format!("/v1/locations/{}/gardencentres", location))
            .authorization_bearer(&token)
            .await;
        let centres: Vec<Value> = response.json();
        assert_eq!(centres.len(), 1);
        assert_eq!(centres[0]["locationName"], "Leeds");

        server
            .delete(&format!("/v1/gardencentres/{}", centre))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .delete(&format!("/v1/locations/{}", location))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/v1/locations/{}", location))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_garden_centre_crud_flow() {
        let (server, pool) = setup().await;
        let token = token_for("US");
        let first = seed_location(&pool, "Austin", Region::Us).await;
        let second = seed_location(&pool, "Dallas", Region::Us).await;

        let response = server
            .post("/v1/gardencentres")
            .authorization_bearer(&token)
            .json(&json!({"name": "Hill Country Plants", "locationId": first}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["locationId"], first);
        assert_eq!(created["region"], "US");
        assert_eq!(
            response.header("location").to_str().unwrap(),
            format!("/v1/gardencentres/{}", id)
        );

        let response = server
            .get(&format!("/v1/gardencentres/{}", id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::OK);
        let fetched: Value = response.json();
        assert_eq!(fetched["locationName"], "Austin");

        let response = server
            .put(&format!("/v1/gardencentres/{}", id))
            .authorization_bearer(&token)
            .json(&json!({"id": id, "name": "Metroplex Plants", "locationId": second}))
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let fetched: Value = server
            .get(&format!("/v1/gardencentres/{}", id))
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(fetched["name"], "Metroplex Plants");
        assert_eq!(fetched["locationName"], "Dallas");

        server
            .delete(&format!("/v1/gardencentres/{}", id))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/v1/gardencentres/{}", id))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .delete(&format!("/v1/gardencentres/{}", id))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_garden_centre_update_rejections() {
        let (server, pool) = setup().await;
        let token = token_for("US");
        let location = seed_location(&pool, "Reno", Region::Us).await;
        let id = seed_garden_centre(&pool, "High Desert", location, Region::Us).await;

        server
            .put(&format!("/v1/gardencentres/{}", id))
            .authorization_bearer(&token)
            .json(&json!({"id": id + 1, "name": "Mismatch", "locationId": location}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .put("/v1/gardencentres/9999")
            .authorization_bearer(&token)
            .json(&json!({"name": "Ghost", "locationId": location}))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .put(&format!("/v1/gardencentres/{}", id))
            .authorization_bearer(&token)
            .json(&json!({"name": "Moved", "locationId": 9999}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_garden_centre_pagination() {
        let (server, pool) = setup().await;
        let token = token_for("UK");
        let location = seed_location(&pool, "Oxford", Region::Uk).await;
        for i in 0..5 {
            seed_garden_centre(&pool, &format!("Centre {i}"), location, Region::Uk).await;
        }

        let response = server
            .get("/v1/gardencentres")
            .add_query_param("page", 1)
            .add_query_param("pageSize", 2)
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::OK);
        let page: Value = response.json();
        assert_eq!(page["totalCount"], 5);
        assert_eq!(page["totalPages"], 3);
        assert_eq!(page["currentPage"], 1);
        assert_eq!(page["pageSize"], 2);
        assert_eq!(page["data"].as_array().unwrap().len(), 2);
        assert_eq!(page["data"][0]["name"], "Centre 0");

        let page: Value = server
            .get("/v1/gardencentres")
            .add_query_param("page", 3)
            .add_query_param("pageSize", 2)
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(page["data"].as_array().unwrap().len(), 1);
        assert_eq!(page["data"][0]["name"], "Centre 4");

        let page: Value = server
            .get("/v1/gardencentres")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(page["pageSize"], 10);
        assert_eq!(page["data"].as_array().unwrap().len(), 5);

        server
            .get("/v1/gardencentres")
            .add_query_param("page", 0)
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_garden_centre_far_page_is_empty() {
        let (server, pool) = setup().await;
        let location = seed_location(&pool, "Austin", Region::Us).await;
        seed_garden_centre(&pool, "Austin Agaves", location, Region::Us).await;

        let response = server
            .get("/v1/gardencentres")
            .add_query_param("page", 92_233_720_368_547_758_i64)
            .add_query_param("pageSize", 100)
            .authorization_bearer(&token_for("US"))
            .await;

        response.assert_status(StatusCode::OK);
        let page: Value = response.json();
        assert_eq!(page["totalCount"], 1);
        assert_eq!(page["currentPage"], 92_233_720_368_547_758_i64);
        assert!(page["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_query_is_bad_request_envelope() {
        let (server, _) = setup().await;

        let response = server
            .get("/v1/gardencentres")
            .add_query_param("page", "abc")
            .authorization_bearer(&token_for("UK"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert!(body.message.starts_with("Invalid query string"));
    }

    #[tokio::test]
    async fn test_regions_are_isolated() {
        let (server, pool) = setup().await;
        let london = seed_location(&pool, "London", Region::Uk).await;
        let centre = seed_garden_centre(&pool, "Kew Corner", london, Region::Uk).await;
        let us_token = token_for("US");

        server
            .get(&format!("/v1/gardencentres/{}", centre))
            .authorization_bearer(&us_token)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .get(&format!("/v1/locations/{}", london))
            .authorization_bearer(&us_token)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let page: Value = server
            .get("/v1/gardencentres")
            .authorization_bearer(&us_token)
            .await
            .json();
        assert_eq!(page["totalCount"], 0);

        server
            .post("/v1/gardencentres")
            .authorization_bearer(&us_token)
            .json(&json!({"name": "Sneaky", "locationId": london}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .delete(&format!("/v1/locations/{}", london))
            .authorization_bearer(&us_token)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let uk_page: Value = server
            .get("/v1/gardencentres")
            .authorization_bearer(&token_for("UK"))
            .await
            .json();
        assert_eq!(uk_page["totalCount"], 1);
    }
}
