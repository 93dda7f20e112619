//! Transport-agnostic posts API.
//!
//! # Responsibility
//! - Map method + path pairs under `/posts` onto service calls.
//! - Decode typed request bodies and encode JSON responses.
//! - Translate service errors into HTTP statuses.
//!
//! # Invariants
//! - The dispatcher never opens sockets; any HTTP server can feed it
//!   `http::Request<Vec<u8>>` values.
//! - Replace checks body parsing, then the path/body id match, then the store.
//! - Every handled request gets one `req_id` shared by its log lines.

mod error;

pub use error::{ApiError, ApiResult};

use crate::model::post::{Post, PostCreate, PostId, PostPatch, PostReplace};
use crate::repo::post_repo::{InMemoryPostRepository, PostRepository};
use crate::service::shared::SharedPostService;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Path prefix owned by this dispatcher.
pub const POSTS_PREFIX: &str = "/posts";

const COLLECTION_METHODS: &str = "GET, POST";
const ITEM_METHODS: &str = "GET, PUT, PATCH, DELETE";

#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    Collection,
    Item(&'a str),
}

/// Posts API over a shared post service.
pub struct PostsApi<R: PostRepository> {
    service: SharedPostService<R>,
}

impl<R: PostRepository> Clone for PostsApi<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl PostsApi<InMemoryPostRepository> {
    /// Builds an API over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(SharedPostService::in_memory())
    }
}

impl<R: PostRepository> PostsApi<R> {
    pub fn new(service: SharedPostService<R>) -> Self {
        Self { service }
    }

    /// Shared service handle backing this API.
    pub fn service(&self) -> &SharedPostService<R> {
        &self.service
    }

    /// `GET /posts`
    pub fn list_posts(&self) -> Vec<Post> {
        self.service.list_posts()
    }

    /// `GET /posts/{id}`
    pub fn get_post(&self, id: PostId) -> ApiResult<Post> {
        Ok(self.service.get_post(id)?)
    }

    /// `POST /posts`
    pub fn create_post(&self, data: PostCreate) -> Post {
        self.service.create_post(data)
    }

    /// `PUT /posts/{id}`
    ///
    /// The body id must equal `path_id`; the stored id is always `path_id`.
    pub fn replace_post(&self, path_id: PostId, body: PostReplace) -> ApiResult<Post> {
        if body.id != path_id {
            return Err(ApiError::IdMismatch {
                path_id,
                body_id: body.id,
            });
        }
        Ok(self.service.replace_post(path_id, body.into_fields())?)
    }

    /// `PATCH /posts/{id}`
    pub fn patch_post(&self, id: PostId, patch: PostPatch) -> ApiResult<Post> {
        Ok(self.service.patch_post(id, patch)?)
    }

    /// `DELETE /posts/{id}`
    pub fn delete_post(&self, id: PostId) -> ApiResult<()> {
        Ok(self.service.delete_post(id)?)
    }

    /// Dispatches one request and always produces a response.
    pub fn handle(&self, request: Request<Vec<u8>>) -> Response<Vec<u8>> {
        let req_id = Uuid::new_v4();
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        debug!("event=api_request module=api status=start req_id={req_id} method={method} path={path}");

        match self.dispatch(&method, &path, request.body()) {
            Ok(response) => {
                info!(
                    "event=api_request module=api status=ok req_id={req_id} method={method} path={path} http_status={}",
                    response.status().as_u16()
                );
                response
            }
            Err(err) => {
                let status = err.status();
                if status.is_server_error() {
                    error!(
                        "event=api_request module=api status=error req_id={req_id} method={method} path={path} http_status={} error_code={} error={err}",
                        status.as_u16(),
                        err.code()
                    );
                } else {
                    warn!(
                        "event=api_request module=api status=error req_id={req_id} method={method} path={path} http_status={} error_code={}",
                        status.as_u16(),
                        err.code()
                    );
                }
                err.into_response()
            }
        }
    }

    fn dispatch(&self, method: &Method, path: &str, body: &[u8]) -> ApiResult<Response<Vec<u8>>> {
        match parse_route(path)? {
            Route::Collection => match *method {
                Method::GET => json_response(StatusCode::OK, &self.list_posts()),
                Method::POST => {
                    let data: PostCreate = decode_body(body)?;
                    json_response(StatusCode::CREATED, &self.create_post(data))
                }
                _ => Err(ApiError::MethodNotAllowed {
                    allowed: COLLECTION_METHODS,
                }),
            },
            Route::Item(segment) => match *method {
                Method::GET => {
                    let id = parse_post_id(segment)?;
                    json_response(StatusCode::OK, &self.get_post(id)?)
                }
                Method::PUT => {
                    let id = parse_post_id(segment)?;
                    let data: PostReplace = decode_body(body)?;
                    json_response(StatusCode::OK, &self.replace_post(id, data)?)
                }
                Method::PATCH => {
                    let id = parse_post_id(segment)?;
                    let patch: PostPatch = decode_body(body)?;
                    json_response(StatusCode::OK, &self.patch_post(id, patch)?)
                }
                Method::DELETE => {
                    let id = parse_post_id(segment)?;
                    self.delete_post(id)?;
                    Ok(empty_response(StatusCode::NO_CONTENT))
                }
                _ => Err(ApiError::MethodNotAllowed {
                    allowed: ITEM_METHODS,
                }),
            },
        }
    }
}

fn parse_route(path: &str) -> ApiResult<Route<'_>> {
    let rest = path
        .strip_prefix(POSTS_PREFIX)
        .ok_or(ApiError::RouteNotFound)?;
    if rest.is_empty() || rest == "/" {
        return Ok(Route::Collection);
    }

    let segment = rest.strip_prefix('/').ok_or(ApiError::RouteNotFound)?;
    let segment = segment.strip_suffix('/').unwrap_or(segment);
    if segment.is_empty() || segment.contains('/') {
        return Err(ApiError::RouteNotFound);
    }
    Ok(Route::Item(segment))
}

fn parse_post_id(segment: &str) -> ApiResult<PostId> {
    segment
        .parse::<PostId>()
        .map_err(|_| ApiError::InvalidPathId(segment.to_string()))
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|err| ApiError::InvalidBody(err.to_string()))
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> ApiResult<Response<Vec<u8>>> {
    let body = serde_json::to_vec(value).map_err(|err| ApiError::Serialization(err.to_string()))?;
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(response)
}

fn empty_response(status: StatusCode) -> Response<Vec<u8>> {
    let mut response = Response::new(Vec::new());
    *response.status_mut() = status;
    response
}
