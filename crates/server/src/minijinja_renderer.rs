// Copyright Alexandre D. Díaz
use actix_utils::future::{ready, Ready};
use actix_web::{
    dev, error,
    http::{header::HeaderValue, StatusCode},
    web, Error, FromRequest, HttpRequest, HttpResponse, Responder,
};
use minijinja_autoreload::AutoReloader;

pub struct MiniJinjaRenderer {
    tmpl_env: web::Data<AutoReloader>,
}

impl MiniJinjaRenderer {
    pub fn from_req(req: &HttpRequest) -> Self {
        Self {
            tmpl_env: req
                .app_data::<web::Data<AutoReloader>>()
                .expect("template env data should be registered")
                .clone(),
        }
    }

    pub fn render(
        &self,
        tmpl: &str,
        ctx: impl Into<minijinja::value::Value>,
    ) -> actix_web::Result<Html> {
        self.render_to_string(tmpl, ctx).map(Html)
    }

    /// Renders a named template to a raw string, for callers that need
    /// the markup itself rather than an HTTP body.
    pub fn render_to_string(
        &self,
        tmpl: &str,
        ctx: impl Into<minijinja::value::Value>,
    ) -> actix_web::Result<String> {
        self.tmpl_env
            .acquire_env()
            .map_err(|_| error::ErrorInternalServerError("could not acquire template env"))?
            .get_template(tmpl)
            .map_err(|_| error::ErrorInternalServerError("could not find template"))?
            .render(ctx.into())
            .map_err(|err| {
                log::error!("{}", err);
                error::ErrorInternalServerError("template error")
            })
    }
}

impl FromRequest for MiniJinjaRenderer {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _pl: &mut dev::Payload) -> Self::Future {
        ready(Ok(Self::from_req(req)))
    }
}

/// Newtype over rendered markup so it can be used as a [`Responder`].
pub struct Html(pub String);

impl Responder for Html {
    type Body = String;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let mut res = HttpResponse::with_body(StatusCode::OK, self.0);
        res.headers_mut().insert(
            actix_web::http::header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        res
    }
}
