//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `postboard_core` linkage.
//! - Drive one scripted create/replace/delete pass through the posts API.
//! - Keep output deterministic apart from the printed date.

use http::{Method, Request, Response};
use postboard_core::{format_date, CoreConfig, DateRequest, PostsApi};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("postboard: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.init_logging() {
        eprintln!("postboard: {err}");
        return ExitCode::FAILURE;
    }

    println!("postboard_core ping={}", postboard_core::ping());
    println!("postboard_core version={}", postboard_core::core_version());

    if let Err(err) = run_smoke() {
        log::error!("event=cli_smoke module=cli status=error error={err}");
        eprintln!("postboard: smoke run failed: {err}");
        return ExitCode::FAILURE;
    }

    let today = DateRequest {
        input: None,
        include_time: true,
        offset_minutes: None,
    };
    match format_date(&today, chrono::Utc::now()) {
        Ok(formatted) => println!("today={}", formatted.text),
        Err(err) => {
            eprintln!("postboard: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn run_smoke() -> Result<(), http::Error> {
    let api = PostsApi::in_memory();
    let steps = [
        (Method::POST, "/posts", r#"{"title":"hello","content":"first post"}"#),
        (Method::GET, "/posts/1", ""),
        (
            Method::PUT,
            "/posts/1",
            r#"{"id":1,"title":"hello again","content":"edited"}"#,
        ),
        (Method::PATCH, "/posts/1", r#"{"content":"patched"}"#),
        (Method::GET, "/posts", ""),
        (Method::DELETE, "/posts/1", ""),
        (Method::GET, "/posts/1", ""),
    ];

    for (method, path, body) in steps {
        let request = Request::builder()
            .method(method.clone())
            .uri(path)
            .body(body.as_bytes().to_vec())?;
        print_exchange(&method, path, &api.handle(request));
    }
    Ok(())
}

fn print_exchange(method: &Method, path: &str, response: &Response<Vec<u8>>) {
    println!(
        "{method} {path} -> {} {}",
        response.status().as_u16(),
        String::from_utf8_lossy(response.body())
    );
}
