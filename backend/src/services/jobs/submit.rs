use crate::error::DispatchError;
use crate::job_controller::dispatcher::Dispatcher;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use common::requests::SubmitForm;

pub(crate) async fn process(
    dispatcher: web::Data<Dispatcher>,
    form: web::Form<SubmitForm>,
) -> Result<HttpResponse, DispatchError> {
    let job_id = dispatcher.submit(form.into_inner().textinput).await?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, format!("/{}", job_id)))
        .finish())
}
