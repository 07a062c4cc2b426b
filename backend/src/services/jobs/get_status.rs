use crate::error::JobError;
use crate::job_controller::store::{parse_job_id, JobStore};
use actix_web::{web, HttpResponse};

pub(crate) async fn process(
    job_id: web::Path<String>,
    store: web::Data<JobStore>,
) -> Result<HttpResponse, JobError> {
    let uid = parse_job_id(&job_id)?;
    let job = store.get(&uid).await?;
    Ok(HttpResponse::Ok().json(job))
}
