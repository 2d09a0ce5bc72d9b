mod config;
mod middlewares;
mod minijinja_renderer;
mod routes;
mod state;
mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files as afs;
use actix_web::{
    http::{header, StatusCode},
    middleware::{ErrorHandlers, Logger},
    web, App, HttpServer,
};
use minijinja::path_loader;
use minijinja_autoreload::AutoReloader;

use htmlpdf::{HtmlToPdf, WeasyPrintEngine};

use config::SERVER_CONFIG;
use middlewares::not_found;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // MiniJinja
    if SERVER_CONFIG.get_template_autoreload() {
        log::info!("template auto-reloading is enabled");
    } else {
        log::info!(
            "template auto-reloading is disabled; run with TEMPLATE_AUTORELOAD=true to enable"
        );
    }

    // The closure is invoked every time the environment is outdated to recreate it.
    let tmpl_reloader = AutoReloader::new(move |notifier| {
        let mut env: minijinja::Environment<'static> = minijinja::Environment::new();

        let tmpl_path = PathBuf::from("./web/templates");

        // if watch_path is never called, no fs watcher is created
        if SERVER_CONFIG.get_template_autoreload() {
            notifier.watch_path(&tmpl_path, true);
        }

        env.set_loader(path_loader(tmpl_path));

        Ok(env)
    });
    let tmpl_reloader = web::Data::new(tmpl_reloader);

    // PDF rendering engine. Layout and rasterization are fully delegated
    // to the external renderer process.
    let pdf_engine: Arc<dyn HtmlToPdf> =
        Arc::new(WeasyPrintEngine::new(SERVER_CONFIG.get_pdf_renderer_bin()));
    let app_state = AppState { pdf_engine };

    log::info!(
        "starting HTTP server at http://{}:{}",
        &SERVER_CONFIG.get_bind_address(),
        &SERVER_CONFIG.get_port()
    );

    // start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin_fn(|origin, _req_head| {
                SERVER_CONFIG.is_allowed_origin(origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);

        App::new()
            .app_data(tmpl_reloader.clone())
            .app_data(web::Data::new(app_state.clone()))
            .service(afs::Files::new("/static", "./static").show_files_listing())
            .service(routes::index::route)
            .service(routes::export::route)
            .wrap(cors)
            .wrap(ErrorHandlers::new().handler(StatusCode::NOT_FOUND, not_found::handler_fn))
            .wrap(Logger::default())
    })
    .bind((
        SERVER_CONFIG.get_bind_address().clone(),
        SERVER_CONFIG.get_port().clone(),
    ))?
    .workers(SERVER_CONFIG.get_workers().clone())
    .run()
    .await
}
