use http::header::{ALLOW, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use postboard_core::{
    ApiError, InMemoryPostRepository, Post, PostCreate, PostPatch, PostReplace, PostsApi,
};
use serde_json::{json, Value};

fn send(
    api: &PostsApi<InMemoryPostRepository>,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> Response<Vec<u8>> {
    let bytes = body
        .map(|value| value.to_string().into_bytes())
        .unwrap_or_default();
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(bytes)
        .unwrap();
    api.handle(request)
}

fn json_body(response: &Response<Vec<u8>>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

#[test]
fn create_returns_201_and_list_returns_array() {
    let api = PostsApi::in_memory();

    let created = send(&api, Method::POST, "/posts", Some(json!({"title": "t1", "content": "c1"})));
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(created.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(json_body(&created), json!({"id": 1, "title": "t1", "content": "c1"}));

    send(&api, Method::POST, "/posts/", Some(json!({"title": "t2", "content": "c2"})));

    let listed = send(&api, Method::GET, "/posts", None);
    assert_eq!(listed.status(), StatusCode::OK);
    assert_eq!(
        json_body(&listed),
        json!([
            {"id": 1, "title": "t1", "content": "c1"},
            {"id": 2, "title": "t2", "content": "c2"}
        ])
    );
}

#[test]
fn get_returns_post_or_404() {
    let api = PostsApi::in_memory();
    api.create_post(PostCreate::new("hello", "world"));

    let found = send(&api, Method::GET, "/posts/1", None);
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(json_body(&found)["title"], "hello");

    let missing = send(&api, Method::GET, "/posts/2", None);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(&missing), json!({"detail": "Post not found"}));
}

#[test]
fn put_replaces_in_place() {
    let api = PostsApi::in_memory();
    for n in 1..=3 {
        api.create_post(PostCreate::new(format!("t{n}"), format!("c{n}")));
    }

    let replaced = send(
        &api,
        Method::PUT,
        "/posts/2",
        Some(json!({"id": 2, "title": "new", "content": "fresh"})),
    );
    assert_eq!(replaced.status(), StatusCode::OK);
    assert_eq!(json_body(&replaced), json!({"id": 2, "title": "new", "content": "fresh"}));

    let ids: Vec<_> = api.list_posts().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn put_with_mismatched_ids_is_400_and_store_is_untouched() {
    let api = PostsApi::in_memory();
    let original = api.create_post(PostCreate::new("keep", "me"));

    let response = send(
        &api,
        Method::PUT,
        "/posts/1",
        Some(json!({"id": 7, "title": "x", "content": "y"})),
    );
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(&response),
        json!({"detail": "Post ID in URL and body do not match"})
    );
    assert_eq!(api.get_post(1).unwrap(), original);
}

#[test]
fn put_on_missing_post_is_404() {
    let api = PostsApi::in_memory();
    let response = send(
        &api,
        Method::PUT,
        "/posts/4",
        Some(json!({"id": 4, "title": "x", "content": "y"})),
    );
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn put_with_incomplete_body_is_422() {
    let api = PostsApi::in_memory();
    api.create_post(PostCreate::new("a", "b"));

    let response = send(&api, Method::PUT, "/posts/1", Some(json!({"title": "only"})));
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail = json_body(&response)["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Invalid request body:"));
}

#[test]
fn patch_merges_present_fields_only() {
    let api = PostsApi::in_memory();
    api.create_post(PostCreate::new("title", "body"));
    api.create_post(PostCreate::new("second", "post"));

    let response = send(&api, Method::PATCH, "/posts/1", Some(json!({"title": "renamed"})));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(&response), json!({"id": 1, "title": "renamed", "content": "body"}));
    assert_eq!(api.list_posts()[0].id, 1);
}

#[test]
fn patch_without_fields_is_400() {
    let api = PostsApi::in_memory();
    api.create_post(PostCreate::new("title", "body"));

    let response = send(&api, Method::PATCH, "/posts/1", Some(json!({})));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&response), json!({"detail": "No fields provided for update"}));
}

#[test]
fn delete_returns_204_then_404() {
    let api = PostsApi::in_memory();
    api.create_post(PostCreate::new("a", "b"));
    api.create_post(PostCreate::new("c", "d"));

    let first = send(&api, Method::DELETE, "/posts/1", None);
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert!(first.body().is_empty());
    assert_eq!(api.list_posts().len(), 1);

    let second = send(&api, Method::DELETE, "/posts/1", None);
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[test]
fn invalid_path_id_is_422() {
    let api = PostsApi::in_memory();
    let response = send(&api, Method::GET, "/posts/abc", None);
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn invalid_json_on_create_is_422_and_creates_nothing() {
    let api = PostsApi::in_memory();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/posts")
        .body(b"{not json".to_vec())
        .unwrap();
    let response = api.handle(request);
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(api.list_posts().is_empty());
}

#[test]
fn unsupported_method_is_405_with_allow_header() {
    let api = PostsApi::in_memory();

    let item = send(&api, Method::POST, "/posts/1", None);
    assert_eq!(item.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(item.headers()[ALLOW], "GET, PUT, PATCH, DELETE");

    let collection = send(&api, Method::DELETE, "/posts", None);
    assert_eq!(collection.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(collection.headers()[ALLOW], "GET, POST");
}

#[test]
fn unknown_path_is_404_not_found() {
    let api = PostsApi::in_memory();
    let response = send(&api, Method::GET, "/users/1", None);
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(&response), json!({"detail": "Not Found"}));
}

#[test]
fn typed_endpoints_share_state_with_dispatcher() {
    let api = PostsApi::in_memory();
    let handle = api.clone();

    let created = handle.create_post(PostCreate::new("typed", "call"));
    let replaced = api
        .replace_post(
            created.id,
            PostReplace {
                id: created.id,
                title: "typed v2".to_string(),
                content: "call".to_string(),
            },
        )
        .unwrap();
    assert_eq!(
        replaced,
        Post {
            id: 1,
            title: "typed v2".to_string(),
            content: "call".to_string(),
        }
    );

    assert_eq!(
        handle.patch_post(42, PostPatch::default()),
        Err(ApiError::EmptyPatch)
    );
    assert_eq!(handle.delete_post(42), Err(ApiError::PostNotFound(42)));
}
