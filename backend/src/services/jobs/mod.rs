//! Job submission and status endpoints.
//!
//! - `POST /submit`: reads the `textinput` form field (default "World"),
//!   schedules a job through the `Dispatcher` and answers `302 Found` with
//!   `Location: /{job_id}`. A pool that refuses work yields `503`.
//!
//! - `GET /status/{job_id}`: returns the `Job` record from the shared
//!   `JobStore` as JSON. Unknown or malformed IDs yield `404`.

use actix_web::web::{self, get, post};

mod get_status;
mod submit;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/submit", post().to(submit::process))
        .route("/status/{job_id}", get().to(get_status::process));
}
