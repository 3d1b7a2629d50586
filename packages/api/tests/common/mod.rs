// ABOUTME: Common test utilities for HTTP behaviour tests
// ABOUTME: Builds the router over a fresh in-memory database and sends requests through it

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pizzeria_api::{create_router, DbState};
use pizzeria_pizzas::{Pizza, PizzaCreateInput};
use pizzeria_toppings::{Topping, ToppingCreateInput};
use tower::ServiceExt;

/// Router plus direct access to the storage behind it
pub struct TestApp {
    pub router: Router,
    pub db: DbState,
}

/// What a test needs to know about a response
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

pub async fn setup_test_app() -> TestApp {
    let db = DbState::init_in_memory()
        .await
        .expect("Failed to create in-memory database");

    TestApp {
        router: create_router(db.clone()),
        db,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// POST an urlencoded body, e.g. `new_topping_name=Basil&topping_new=topping_new`
    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn topping(&self, name: &str) -> Topping {
        self.db
            .topping_storage
            .create_topping(ToppingCreateInput {
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn pizza(&self, name: &str, toppings: &[&Topping]) -> Pizza {
        self.db
            .pizza_storage
            .create_pizza(PizzaCreateInput {
                name: name.to_string(),
                topping_ids: toppings.iter().map(|t| t.id).collect(),
            })
            .await
            .unwrap()
    }
}

impl TestResponse {
    pub fn assert_redirects_to(&self, location: &str) {
        assert_eq!(self.status, StatusCode::FOUND, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(location));
    }

    pub fn assert_rendered_with(&self, message: &str) {
        assert_eq!(self.status, StatusCode::OK);
        assert!(
            self.body.contains(message),
            "expected {:?} in body:\n{}",
            message,
            self.body
        );
    }
}
