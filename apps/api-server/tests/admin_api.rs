#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::{Value, json};

use api_server::build_app;

fn tag_names(post: &Value) -> Vec<String> {
    post["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_create_post_derives_slug_and_sets_author() {
    let app = test::init_service(build_app(common::state().await)).await;
    let token = login!(&app);

    let post = create_post!(&app, &token, common::post_body("Hello, Rust World!", "draft"));
    assert_eq!(post["slug"], "hello-rust-world");
    assert_eq!(post["authorId"], 1);
    assert_eq!(post["featured"], false);

    let req = TestRequest::post()
        .uri("/api/admin/posts")
        .insert_header(common::bearer(&token))
        .set_json(common::post_body("Hello rust world", "draft"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let mut body = common::post_body("Other", "draft");
    body["slug"] = json!("Not A Slug");
    let req = TestRequest::post()
        .uri("/api/admin/posts")
        .insert_header(common::bearer(&token))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["errors"][0]["field"], "slug");
}

#[actix_web::test]
async fn test_unknown_references_reject_the_post() {
    let app = test::init_service(build_app(common::state().await)).await;
    let token = login!(&app);

    let mut body = common::post_body("Dangling", "published");
    body["categoryId"] = json!(42);
    body["tagIds"] = json!([1, 99]);
    let req = TestRequest::post()
        .uri("/api/admin/posts")
        .insert_header(common::bearer(&token))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["message"], "Invalid post data");
    assert_eq!(error["errors"][0]["field"], "categoryId");
    assert_eq!(error["errors"][1]["field"], "tagIds");

    let (_, all) = get_json!(&app, "/api/admin/posts", &token);
    assert!(all.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_update_post_and_replace_tags() {
    let app = test::init_service(build_app(common::state().await)).await;
    let token = login!(&app);

    let mut body = common::post_body("Tagged", "draft");
    body["tagIds"] = json!([1, 2]);
    let post = create_post!(&app, &token, body);
    let uri = format!("/api/admin/posts/{}", post["id"]);
    let public_uri = format!("/api/posts/{}", post["id"]);

    let (_, fetched) = get_json!(&app, &public_uri, &token);
    assert_eq!(tag_names(&fetched), vec!["React", "TypeScript"]);

    let req = TestRequest::put()
        .uri(&uri)
        .insert_header(common::bearer(&token))
        .set_json(json!({ "title": "Retitled", "status": "published", "tagIds": [5] }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["title"], "Retitled");
    assert_eq!(updated["slug"], "tagged");
    assert_eq!(updated["content"], "Body text");
    assert_eq!(updated["status"], "published");

    let (status, fetched) = get_json!(&app, &public_uri);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tag_names(&fetched), vec!["Docker"]);

    let req = TestRequest::put()
        .uri("/api/admin/posts/9999")
        .insert_header(common::bearer(&token))
        .set_json(json!({ "title": "Ghost" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_post_clears_nullable_fields() {
    let app = test::init_service(build_app(common::state().await)).await;
    let token = login!(&app);

    let mut body = common::post_body("Filed", "published");
    body["categoryId"] = json!(1);
    body["excerpt"] = json!("short");
    body["featuredImage"] = json!("/cover.png");
    let post = create_post!(&app, &token, body);
    let uri = format!("/api/admin/posts/{}", post["id"]);

    let req = TestRequest::put()
        .uri(&uri)
        .insert_header(common::bearer(&token))
        .set_json(json!({ "categoryId": null, "excerpt": null, "featuredImage": " " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert!(updated["categoryId"].is_null());
    assert!(updated["excerpt"].is_null());
    assert!(updated["featuredImage"].is_null());
    assert_eq!(updated["title"], "Filed");

    let (_, fetched) = get_json!(&app, &format!("/api/posts/{}", post["id"]));
    assert!(fetched["category"].is_null());

    // Omitted fields stay as they are.
    let req = TestRequest::put()
        .uri(&uri)
        .insert_header(common::bearer(&token))
        .set_json(json!({ "categoryId": 2 }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["categoryId"], 2);
    assert!(updated["excerpt"].is_null());
}

#[actix_web::test]
async fn test_delete_post_cascades() {
    let app = test::init_service(build_app(common::state().await)).await;
    let token = login!(&app);

    let mut body = common::post_body("Doomed", "published");
    body["tagIds"] = json!([1]);
    let doomed = create_post!(&app, &token, body);
    let survivor = create_post!(&app, &token, common::post_body("Survivor", "published"));

    for post in [&doomed, &survivor] {
        let req = TestRequest::post()
            .uri("/api/comments")
            .set_json(common::comment_body(post["id"].as_i64().unwrap()))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = TestRequest::delete()
        .uri(&format!("/api/admin/posts/{}", doomed["id"]))
        .insert_header(common::bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Post deleted successfully");

    let (status, _) = get_json!(&app, &format!("/api/posts/{}", doomed["id"]));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, comments) = get_json!(&app, "/api/admin/comments", &token);
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["postId"], survivor["id"]);

    let (_, stats) = get_json!(&app, "/api/admin/stats", &token);
    assert_eq!(stats["totalPosts"], 1);
    assert_eq!(stats["totalComments"], 1);

    // Deleting again is not an error.
    let req = TestRequest::delete()
        .uri(&format!("/api/admin/posts/{}", doomed["id"]))
        .insert_header(common::bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_category_crud() {
    let app = test::init_service(build_app(common::state().await)).await;
    let token = login!(&app);

    let req = TestRequest::post()
        .uri("/api/admin/categories")
        .insert_header(common::bearer(&token))
        .set_json(json!({ "name": "Security", "description": "Keeping things safe" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = test::read_body_json(resp).await;
    assert_eq!(category["id"], 6);

    let req = TestRequest::put()
        .uri("/api/admin/categories/6")
        .insert_header(common::bearer(&token))
        .set_json(json!({ "name": "Infosec" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Infosec");
    assert_eq!(updated["description"], "Keeping things safe");

    let req = TestRequest::put()
        .uri("/api/admin/categories/77")
        .insert_header(common::bearer(&token))
        .set_json(json!({ "name": "Nope" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = TestRequest::post()
        .uri("/api/admin/categories")
        .insert_header(common::bearer(&token))
        .set_json(json!({ "name": "" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = TestRequest::delete()
        .uri("/api/admin/categories/6")
        .insert_header(common::bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Category deleted successfully");

    let (_, categories) = get_json!(&app, "/api/admin/categories", &token);
    assert_eq!(categories.as_array().unwrap().len(), 5);
}

#[actix_web::test]
async fn test_tag_delete_unlinks_posts() {
    let app = test::init_service(build_app(common::state().await)).await;
    let token = login!(&app);

    let req = TestRequest::post()
        .uri("/api/admin/tags")
        .insert_header(common::bearer(&token))
        .set_json(json!({ "name": "Rust" }))
        .to_request();
    let tag: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tag["id"], 9);

    let mut body = common::post_body("Borrowck", "published");
    body["tagIds"] = json!([9, 3]);
    let post = create_post!(&app, &token, body);

    let req = TestRequest::delete()
        .uri("/api/admin/tags/9")
        .insert_header(common::bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let (_, fetched) = get_json!(&app, &format!("/api/posts/{}", post["id"]));
    assert_eq!(tag_names(&fetched), vec!["Node.js"]);

    let (_, tags) = get_json!(&app, "/api/tags");
    assert_eq!(tags.as_array().unwrap().len(), 8);
}

#[actix_web::test]
async fn test_admin_comment_filters_and_stats() {
    let app = test::init_service(build_app(common::state().await)).await;
    let token = login!(&app);
    let post = create_post!(&app, &token, common::post_body("Busy", "published"));
    let post_id = post["id"].as_i64().unwrap();

    let mut comment_ids = Vec::new();
    for _ in 0..3 {
        let req = TestRequest::post()
            .uri("/api/comments")
            .set_json(common::comment_body(post_id))
            .to_request();
        let comment: Value = test::call_and_read_body_json(&app, req).await;
        comment_ids.push(comment["id"].as_i64().unwrap());
    }

    let req = TestRequest::put()
        .uri(&format!("/api/admin/comments/{}", comment_ids[0]))
        .insert_header(common::bearer(&token))
        .set_json(json!({ "status": "rejected" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = TestRequest::delete()
        .uri(&format!("/api/admin/comments/{}", comment_ids[1]))
        .insert_header(common::bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let (_, pending) = get_json!(
        &app,
        &format!("/api/admin/comments?postId={post_id}&status=pending"),
        &token
    );
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], comment_ids[2]);
    assert_eq!(pending[0]["post"]["id"], post_id);

    let (status, _) = get_json!(&app, "/api/admin/comments?status=spam", &token);
    assert_eq!(status, StatusCode::BAD_REQUEST);

    get_json!(&app, &format!("/api/posts/{post_id}"));
    let (_, stats) = get_json!(&app, "/api/admin/stats", &token);
    assert_eq!(
        stats,
        json!({
            "totalPosts": 1,
            "totalComments": 2,
            "totalViews": 1,
            "totalCategories": 5
        })
    );
}
