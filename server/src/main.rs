use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use eink_bitplane::{encode_image, load_rgb, ConvertOptions, Plane, Rotation, SecondaryInk};
use image::ImageError;
use log::{error, info};
use serde::Deserialize;
use std::env::var;
use std::io;
use std::path::{Component, Path as FsPath, PathBuf};

const DEFAULT_IMAGE: &str = "test.png";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
struct ServerConfig {
    images_dir: PathBuf,
    port: u16,
    options: ConvertOptions,
}

fn invalid_env(name: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, format!("{}: {}", name, err))
}

fn parse_flag(name: &str, value: &str) -> io::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(invalid_env(
            name,
            format!("expected 1, true, 0 or false, got `{}`", value),
        )),
    }
}

impl ServerConfig {
    fn from_env() -> io::Result<Self> {
        Self::from_lookup(|name| var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> io::Result<Self> {
        let images_dir =
            PathBuf::from(lookup("IMAGES_PATH").unwrap_or("sample-images".to_string()));
        let port = match lookup("PORT") {
            Some(port) => port.parse().map_err(|e| invalid_env("PORT", e))?,
            None => DEFAULT_PORT,
        };
        let rotation = match lookup("ROTATION") {
            Some(rotation) => rotation
                .parse::<Rotation>()
                .map_err(|e| invalid_env("ROTATION", e))?,
            None => Rotation::default(),
        };
        let fit_to_panel = match lookup("FIT_TO_PANEL") {
            Some(flag) => parse_flag("FIT_TO_PANEL", &flag)?,
            None => false,
        };
        let dither = match lookup("DITHER") {
            Some(ink) => Some(
                ink.parse::<SecondaryInk>()
                    .map_err(|e| invalid_env("DITHER", e))?,
            ),
            None => None,
        };
        Ok(ServerConfig {
            images_dir,
            port,
            options: ConvertOptions {
                rotation,
                fit_to_panel,
                dither,
            },
        })
    }

    /// Only a bare file name is accepted, so requests cannot leave the image directory.
    fn image_path(&self, name: &str) -> Option<PathBuf> {
        let mut components = FsPath::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file)), None) => Some(self.images_dir.join(file)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageQuery {
    image: Option<String>,
}

#[get("/{plane}")]
async fn plane_bytes(
    plane: web::Path<String>,
    query: web::Query<ImageQuery>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let Ok(plane) = plane.parse::<Plane>() else {
        return HttpResponse::NotFound().finish();
    };
    let image_name = query
        .into_inner()
        .image
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string());
    let Some(path) = config.image_path(&image_name) else {
        return HttpResponse::BadRequest().body("image must be a plain file name");
    };

    let source = path.clone();
    let options = config.options.clone();
    let img = match web::block(move || load_rgb(&source, &options)).await {
        Ok(Ok(img)) => img,
        Ok(Err(ImageError::IoError(err))) if err.kind() == io::ErrorKind::NotFound => {
            return HttpResponse::NotFound().finish();
        }
        Ok(Err(err)) => {
            error!("Failed to load {}: {}", path.display(), err);
            return HttpResponse::InternalServerError().finish();
        }
        Err(err) => {
            error!("Loading {} was cancelled: {}", path.display(), err);
            return HttpResponse::InternalServerError().finish();
        }
    };
    info!(
        "Encoding {} plane of {} ({}x{})",
        plane,
        path.display(),
        img.width(),
        img.height()
    );

    match encode_image(&img, plane) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/octet-stream")
            .body(bytes),
        Err(err) => {
            error!("Failed to encode {}: {}", path.display(), err);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let config = ServerConfig::from_env()?;
    let port = config.port;
    info!(
        "Serving bitplanes of {} on port {}",
        config.images_dir.display(),
        port
    );
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .wrap(Logger::default())
            .service(plane_bytes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
