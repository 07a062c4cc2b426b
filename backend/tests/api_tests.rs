//! HTTP surface: form submission, redirect, status polling and pages.

use actix_web::dev::ServiceResponse;
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::rt::time::sleep;
use actix_web::{test, web, App};
use offload_server::job_controller::dispatcher::Dispatcher;
use offload_server::job_controller::store::JobStore;
use offload_server::pool::{ExecutionPool, PoolConfig};
use offload_server::services;
use offload_server::task::Greeting;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn dispatcher(pool: PoolConfig, delay: Duration) -> Dispatcher {
    let pool = Arc::new(ExecutionPool::new(pool));
    pool.start().expect("pool should start");
    Dispatcher::spawn(JobStore::new(), pool, Arc::new(Greeting::new(delay)))
}

macro_rules! app {
    ($dispatcher:expr) => {{
        let dispatcher: Dispatcher = $dispatcher;
        let store = dispatcher.store().clone();
        test::init_service(
            App::new()
                .app_data(web::Data::new(dispatcher))
                .app_data(web::Data::new(store))
                .configure(services::configure),
        )
        .await
    }};
}

fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("redirect should carry a location")
        .to_str()
        .unwrap()
        .to_string()
}

#[actix_web::test]
async fn submit_redirects_and_status_reaches_complete() {
    let app = app!(dispatcher(PoolConfig::with_workers(2), Duration::from_millis(300)));

    let req = test::TestRequest::post()
        .uri("/submit")
        .set_form(&[("textinput", "World")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let page = location(&resp);
    let uid: Uuid = page.trim_start_matches('/').parse().unwrap();

    let status_uri = format!("/status/{}", uid);
    let req = test::TestRequest::get().uri(&status_uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["uid"], uid.to_string());
    assert_eq!(body["status"], "Pending");
    assert!(body["result"].is_null());

    let mut last = body;
    for _ in 0..300 {
        if last["status"] != "Pending" {
            break;
        }
        sleep(Duration::from_millis(10)).await;
        let req = test::TestRequest::get().uri(&status_uri).to_request();
        last = test::call_and_read_body_json(&app, req).await;
    }
    assert_eq!(last["status"], "Complete");
    assert_eq!(last["result"], "Hello World!");
}

#[actix_web::test]
async fn missing_textinput_defaults_to_world() {
    let dispatcher = dispatcher(PoolConfig::with_workers(1), Duration::ZERO);
    let store = dispatcher.store().clone();
    let app = app!(dispatcher);

    let req = test::TestRequest::post()
        .uri("/submit")
        .insert_header(ContentType::form_url_encoded())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let uid: Uuid = location(&resp).trim_start_matches('/').parse().unwrap();
    let mut job = store.get(&uid).await.unwrap();
    for _ in 0..300 {
        if job.is_finished() {
            break;
        }
        sleep(Duration::from_millis(10)).await;
        job = store.get(&uid).await.unwrap();
    }
    assert_eq!(job.result.as_deref(), Some("Hello World!"));
}

#[actix_web::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let app = app!(dispatcher(PoolConfig::with_workers(1), Duration::ZERO));

    let req = test::TestRequest::get()
        .uri(&format!("/status/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/status/not-a-uuid").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/not-a-uuid").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn exhausted_pool_answers_service_unavailable() {
    let pool = PoolConfig {
        workers: 1,
        max_in_flight: 1,
    };
    let app = app!(dispatcher(pool, Duration::from_millis(300)));

    let submit = || {
        test::TestRequest::post()
            .uri("/submit")
            .set_form(&[("textinput", "busy")])
            .to_request()
    };
    let first = test::call_service(&app, submit()).await;
    assert_eq!(first.status(), StatusCode::FOUND);

    let second = test::call_service(&app, submit()).await;
    assert_eq!(second.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn pages_and_assets_are_served() {
    let app = app!(dispatcher(PoolConfig::with_workers(1), Duration::ZERO));

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("action=\"/submit\""));
    assert!(html.contains("name=\"textinput\""));

    let uid = Uuid::new_v4();
    let req = test::TestRequest::get().uri(&format!("/{}", uid)).to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(&uid.to_string()));
    assert!(!html.contains("{{uid}}"));

    let req = test::TestRequest::get().uri("/assets/style.css").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert_eq!(content_type.to_str().unwrap(), "text/css");

    let req = test::TestRequest::get().uri("/assets/missing.js").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
