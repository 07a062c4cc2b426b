//! HTTP boundary of the service.
//!
//! - `jobs`: submission and status polling, backed by the dispatcher and the job store.
//! - `pages`: the embedded HTML form, the status page and their assets.

pub mod jobs;
pub mod pages;

use actix_web::web;

/// Registers every route. Job routes go first so that `/submit` and
/// `/status/{job_id}` are not shadowed by the `/{job_id}` page.
pub fn configure(cfg: &mut web::ServiceConfig) {
    jobs::configure_routes(cfg);
    pages::configure_routes(cfg);
}
