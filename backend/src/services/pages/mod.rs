//! Embedded HTML pages.
//!
//! The `static/` directory is compiled into the binary. `/` serves the
//! submission form, `/{job_id}` the status page (which polls
//! `/status/{job_id}` from the browser) and `/assets/...` the files those
//! pages load.

use crate::error::JobError;
use crate::job_controller::store::parse_job_id;
use actix_web::web::{self, get};
use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

const UID_PLACEHOLDER: &str = "{{uid}}";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", get().to(index))
        .route("/assets/{file:.*}", get().to(serve_asset))
        .route("/{job_id}", get().to(result_page));
}

async fn index() -> HttpResponse {
    serve_embedded("index.html")
}

async fn result_page(job_id: web::Path<String>) -> Result<HttpResponse, JobError> {
    let uid = parse_job_id(&job_id)?;
    let page = STATIC_DIR
        .get_file("result.html")
        .and_then(|file| file.contents_utf8());

    Ok(match page {
        Some(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html.replace(UID_PLACEHOLDER, &uid.to_string())),
        None => HttpResponse::NotFound().body("Not Found"),
    })
}

async fn serve_asset(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    serve_embedded(path)
}

fn serve_embedded(file_path: &str) -> HttpResponse {
    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => HttpResponse::NotFound().body("Not Found"),
    }
}
