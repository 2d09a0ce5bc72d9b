// Copyright 2025 Alexandre D. Díaz
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{error, get, web, Error as AWError, HttpRequest, HttpResponse};
use minijinja::value::Value;
use serde::Serialize;

use crate::config::SERVER_CONFIG;
use crate::minijinja_renderer::MiniJinjaRenderer;
use crate::state::AppState;
use crate::utils::{absolute_static_url, request_base_url};

pub const EXPORT_FILENAME: &str = "exported_file.pdf";
pub const EXPORT_TEMPLATE: &str = "pdf/export_document.html";
pub const UNICODE_SAMPLE_TEXT: &str =
    "This is a sample Unicode text: বাংলা, 中文, हिन्दी,  আমার নাম জসিম উদ্দিন ";

/// Context the export document template is rendered against. Built fresh
/// per request and discarded after rendering.
#[derive(Debug, Serialize)]
pub struct RenderContext {
    pub font_url: String,
    pub image_url: String,
    pub unicode_text: String,
}

pub fn build_render_context(base_url: &str) -> Result<RenderContext, url::ParseError> {
    let font_url = absolute_static_url(base_url, SERVER_CONFIG.get_font_asset())?;
    let image_url = absolute_static_url(base_url, SERVER_CONFIG.get_image_asset())?;
    Ok(RenderContext {
        font_url: font_url.into(),
        image_url: image_url.into(),
        unicode_text: UNICODE_SAMPLE_TEXT.to_string(),
    })
}

#[get("/export/pdf")]
pub async fn route(
    state: web::Data<AppState>,
    tmpl_env: MiniJinjaRenderer,
    req: HttpRequest,
) -> Result<HttpResponse, AWError> {
    let ctx = build_render_context(&request_base_url(&req)).map_err(|err| {
        log::error!("asset URL resolution failed: {}", err);
        error::ErrorInternalServerError("asset URL resolution failed")
    })?;

    let html = tmpl_env.render_to_string(EXPORT_TEMPLATE, Value::from_serializable(&ctx))?;

    let engine = state.pdf_engine.clone();
    let pdf = web::block(move || engine.render(&html, &[]))
        .await?
        .map_err(|err| {
            log::error!("PDF rendering failed: {}", err);
            error::ErrorInternalServerError("PDF rendering failed")
        })?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(EXPORT_FILENAME.to_string())],
        })
        .body(pdf))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use actix_web::http::header;
    use actix_web::{test, App};
    use htmlpdf::{HtmlToPdf, PdfError};
    use minijinja::path_loader;
    use minijinja_autoreload::AutoReloader;

    use super::*;

    struct FixedPdfEngine;

    impl HtmlToPdf for FixedPdfEngine {
        fn render(&self, html: &str, _stylesheets: &[String]) -> Result<Vec<u8>, PdfError> {
            // The handler must feed the engine the rendered document,
            // sample text intact.
            assert!(html.contains(UNICODE_SAMPLE_TEXT));
            Ok(b"%PDF-1.7\nstub document\n%%EOF".to_vec())
        }
    }

    struct BrokenEngine;

    impl HtmlToPdf for BrokenEngine {
        fn render(&self, _html: &str, _stylesheets: &[String]) -> Result<Vec<u8>, PdfError> {
            Err(PdfError::Engine("simulated renderer fault".to_string()))
        }
    }

    struct UnreachableEngine;

    impl HtmlToPdf for UnreachableEngine {
        fn render(&self, _html: &str, _stylesheets: &[String]) -> Result<Vec<u8>, PdfError> {
            unreachable!("engine must not run when template rendering fails");
        }
    }

    fn template_reloader(tmpl_path: PathBuf) -> AutoReloader {
        AutoReloader::new(move |_notifier| {
            let mut env: minijinja::Environment<'static> = minijinja::Environment::new();
            env.set_loader(path_loader(tmpl_path.clone()));
            Ok(env)
        })
    }

    fn real_templates() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../web/templates")
    }

    #[::core::prelude::v1::test]
    fn render_context_urls_are_absolute() {
        let ctx = build_render_context("http://testserver:8080").unwrap();
        let font = url::Url::parse(&ctx.font_url).unwrap();
        let image = url::Url::parse(&ctx.image_url).unwrap();
        assert_eq!(font.path(), "/static/fonts/AdorshoLipi.ttf");
        assert_eq!(image.path(), "/static/images/josim_circle.png");
        assert!(!ctx.unicode_text.is_empty());
    }

    #[::core::prelude::v1::test]
    fn export_document_keeps_sample_text_unmodified() {
        let reloader = template_reloader(real_templates());
        let env = reloader.acquire_env().unwrap();
        let ctx = build_render_context("http://testserver").unwrap();
        let html = env
            .get_template(EXPORT_TEMPLATE)
            .unwrap()
            .render(Value::from_serializable(&ctx))
            .unwrap();
        assert!(html.contains(UNICODE_SAMPLE_TEXT));
        assert!(html.contains("http://testserver/static/fonts/AdorshoLipi.ttf"));
        assert!(html.contains("http://testserver/static/images/josim_circle.png"));
    }

    #[actix_web::test]
    async fn export_responds_with_pdf_attachment() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(template_reloader(real_templates())))
                .app_data(web::Data::new(AppState {
                    pdf_engine: Arc::new(FixedPdfEngine),
                }))
                .service(route),
        )
        .await;

        let req = test::TestRequest::get().uri("/export/pdf").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert_eq!(
            res.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"exported_file.pdf\""
        );

        let body = test::read_body(res).await;
        assert!(!body.is_empty());
        assert!(body.starts_with(b"%PDF-"));
    }

    #[actix_web::test]
    async fn engine_fault_is_a_server_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(template_reloader(real_templates())))
                .app_data(web::Data::new(AppState {
                    pdf_engine: Arc::new(BrokenEngine),
                }))
                .service(route),
        )
        .await;

        let req = test::TestRequest::get().uri("/export/pdf").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_server_error());
    }

    #[actix_web::test]
    async fn missing_template_fails_before_the_engine_runs() {
        let empty_dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(template_reloader(
                    empty_dir.path().to_path_buf(),
                )))
                .app_data(web::Data::new(AppState {
                    pdf_engine: Arc::new(UnreachableEngine),
                }))
                .service(route),
        )
        .await;

        let req = test::TestRequest::get().uri("/export/pdf").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_server_error());
    }
}
