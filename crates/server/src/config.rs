// Copyright Alexandre D. Díaz
use config::Config;
use lazy_static::lazy_static;
use url::Url;

#[derive(Debug)]
pub struct ExporterServerConfig {
    bind_address: String,
    port: u16,
    workers: usize,
    template_autoreload: bool,
    allowed_origins: Vec<Url>,
    pdf_renderer_bin: String,
    font_asset: String,
    image_asset: String,
}

impl ExporterServerConfig {
    pub fn new() -> ExporterServerConfig {
        let settings = Config::builder()
            .add_source(config::File::with_name("./server").required(false))
            .add_source(config::Environment::with_prefix("PDFEXPORTER_"))
            .build()
            .unwrap();

        let bind_address = settings
            .get_string("bind_address")
            .unwrap_or("0.0.0.0".to_string());
        let port = settings.get_int("port").unwrap_or(8080) as u16;
        let workers = settings.get_int("workers").unwrap_or(2) as usize;
        let template_autoreload = settings.get_bool("template_autoreload").unwrap_or(false);
        let allowed_origins = settings
            .get_array("allowed_origins")
            .unwrap_or_else(|_| Vec::new())
            .iter()
            .map(|x| Url::parse(&x.to_string()).unwrap())
            .collect::<Vec<Url>>();
        let pdf_renderer_bin = settings
            .get_string("pdf_renderer_bin")
            .unwrap_or("weasyprint".to_string());
        let font_asset = settings
            .get_string("font_asset")
            .unwrap_or("/static/fonts/AdorshoLipi.ttf".to_string());
        let image_asset = settings
            .get_string("image_asset")
            .unwrap_or("/static/images/josim_circle.png".to_string());
        ExporterServerConfig {
            bind_address,
            port,
            workers,
            template_autoreload,
            allowed_origins,
            pdf_renderer_bin,
            font_asset,
            image_asset,
        }
    }

    pub fn get_bind_address(&self) -> &String {
        &self.bind_address
    }

    pub fn get_port(&self) -> &u16 {
        &self.port
    }

    pub fn get_workers(&self) -> &usize {
        &self.workers
    }

    pub fn get_template_autoreload(&self) -> bool {
        self.template_autoreload
    }

    pub fn get_allowed_origins(&self) -> &Vec<Url> {
        &self.allowed_origins
    }
    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        if self.get_allowed_origins().is_empty() {
            return true;
        }
        let url = match Url::parse(origin) {
            Ok(url) => url,
            Err(_) => return false,
        };
        for origin_url in self.get_allowed_origins() {
            if origin_url.scheme() == url.scheme()
                && origin_url.domain() == url.domain()
                && origin_url.port() == url.port()
            {
                return true;
            }
        }
        false
    }

    pub fn get_pdf_renderer_bin(&self) -> &String {
        &self.pdf_renderer_bin
    }

    pub fn get_font_asset(&self) -> &String {
        &self.font_asset
    }

    pub fn get_image_asset(&self) -> &String {
        &self.image_asset
    }
}

lazy_static! {
    pub static ref SERVER_CONFIG: ExporterServerConfig = ExporterServerConfig::new();
}
