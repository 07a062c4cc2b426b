use actix_web::{web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::info;
use offload_server::config::Config;
use offload_server::job_controller::dispatcher::Dispatcher;
use offload_server::job_controller::store::JobStore;
use offload_server::pool::ExecutionPool;
use offload_server::services;
use offload_server::task::Greeting;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::parse();
    let url = config.url();

    let pool = Arc::new(ExecutionPool::new(config.pool_config()));
    pool.start().map_err(std::io::Error::other)?;

    let store = JobStore::new();
    let task = Arc::new(Greeting::new(config.task_delay()));
    let dispatcher = Dispatcher::spawn(store.clone(), Arc::clone(&pool), task);

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    info!("Server running at {}", url);

    let served = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(dispatcher.clone()))
            .app_data(web::Data::new(store.clone()))
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    pool.stop().await;
    served
}
