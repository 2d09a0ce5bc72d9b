use actix_web::HttpRequest;
use minijinja::{context, Value};
use url::Url;

pub fn get_minijinja_context(req: &HttpRequest) -> Value {
    let scheme = req.connection_info().scheme().to_string();
    let host = req.connection_info().host().to_string();
    context!(
        REQ_SCHEME => scheme.clone(),
        REQ_HOST => host.clone(),
        REQ_BASE_URL => format!("{}://{}", &scheme, &host),
    )
}

pub fn request_base_url(req: &HttpRequest) -> String {
    let conn = req.connection_info();
    format!("{}://{}", conn.scheme(), conn.host())
}

/// Resolves a static asset path against the request base URL. The result
/// must be an absolute URL reachable by whatever consumes the rendered
/// document.
pub fn absolute_static_url(base_url: &str, asset_path: &str) -> Result<Url, url::ParseError> {
    Url::parse(base_url)?.join(asset_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_urls_are_absolute() {
        let url = absolute_static_url("http://localhost:8080", "/static/fonts/AdorshoLipi.ttf")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/static/fonts/AdorshoLipi.ttf"
        );
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.path(), "/static/fonts/AdorshoLipi.ttf");
    }

    #[test]
    fn asset_path_replaces_any_base_path() {
        let url =
            absolute_static_url("https://example.com/app", "/static/images/josim_circle.png")
                .unwrap();
        assert_eq!(url.path(), "/static/images/josim_circle.png");
    }

    #[test]
    fn malformed_base_is_rejected() {
        assert!(absolute_static_url("not a url", "/static/x.png").is_err());
    }
}
