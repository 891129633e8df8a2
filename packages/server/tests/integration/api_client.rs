use client::api::{ApiClient, ApiError, CreateProperty, UpdateProperty};

use crate::common::TestApp;

fn new_listing(title: &str, price: f64) -> CreateProperty {
    CreateProperty {
        title: title.to_string(),
        description: "Client-created listing".to_string(),
        price,
        location: "Oslo".to_string(),
        image: None,
    }
}

#[tokio::test]
async fn client_can_run_the_full_listing_lifecycle() {
    let app = TestApp::spawn().await;
    let api = ApiClient::new(app.base_url());

    let created = api.create(new_listing("Cabin", 120000.0)).await.unwrap();
    assert_eq!(created.title, "Cabin");
    assert_eq!(created.price, 120000.0);
    assert_eq!(created.image_url, "");

    let listed = api.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    let updated = api
        .update(
            &created.id,
            UpdateProperty {
                price: Some(0.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 0.0);
    assert_eq!(updated.title, "Cabin");

    let message = api.delete(&created.id).await.unwrap();
    assert_eq!(message, "Property deleted successfully");
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn client_surfaces_structured_api_errors() {
    let app = TestApp::spawn().await;
    let api = ApiClient::new(app.base_url());

    let err = api.get("ffffffffffffffffffffffff").await.unwrap_err();
    match err {
        ApiError::Api { status, code, .. } => {
            assert_eq!(status, 404);
            assert_eq!(code, "NOT_FOUND");
        }
        other => panic!("expected structured API error, got {other:?}"),
    }

    let err = api.create(new_listing("Cabin", -5.0)).await.unwrap_err();
    match err {
        ApiError::Api { status, code, .. } => {
            assert_eq!(status, 400);
            assert_eq!(code, "VALIDATION_ERROR");
        }
        other => panic!("expected structured API error, got {other:?}"),
    }
}
