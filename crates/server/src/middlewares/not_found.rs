// Copyright Alexandre D. Díaz
use actix_web::{
    dev::ServiceResponse, http::header, middleware::ErrorHandlerResponse, HttpResponse, Responder,
    Result,
};

use crate::minijinja_renderer::MiniJinjaRenderer;

/// Renders the site error page for 404 responses.
pub fn handler_fn<B>(svc_res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let req = svc_res.request();
    let status = svc_res.status();

    let tmpl_env = MiniJinjaRenderer::from_req(req);
    let ctx = minijinja::context! {
        error => "Page not found",
        status_code => status.as_str(),
    };

    // Plain text fallback in case the error page itself fails to render.
    let res = match tmpl_env.render("pages/error.html", ctx) {
        Ok(body) => body
            .customize()
            .with_status(status)
            .respond_to(req)
            .map_into_boxed_body(),
        Err(_) => HttpResponse::build(status)
            .content_type(header::ContentType::plaintext())
            .body("Page not found".to_string()),
    };

    Ok(ErrorHandlerResponse::Response(ServiceResponse::new(
        svc_res.into_parts().0,
        res.map_into_right_body(),
    )))
}
