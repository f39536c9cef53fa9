use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use std::path::{Path, PathBuf};

/// Serve the project directory over local HTTP for browser testing.
///
/// Every response carries `Cache-Control: no-cache` so freshly generated
/// assets show up on refresh instead of a stale cached copy.
pub async fn serve(root: PathBuf, port: u16) -> std::io::Result<()> {
    log::info!("Dev server running at http://localhost:{}", port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(root.clone()))
            .default_service(web::get().to(serve_file))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}

async fn serve_file(req: HttpRequest, root: web::Data<PathBuf>) -> HttpResponse {
    let rel = req.path().trim_start_matches('/');
    let rel = if rel.is_empty() { "index.html" } else { rel };

    if rel.split('/').any(|segment| segment == "..") {
        return HttpResponse::NotFound().finish();
    }

    let mut path = root.join(rel);
    if path.is_dir() {
        path = path.join("index.html");
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(content_type_for(&path))
            .insert_header(("Cache-Control", "no-cache"))
            .body(bytes),
        Err(_) => HttpResponse::NotFound().body("404 Not Found"),
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("mp3") => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_cover_game_assets() {
        assert_eq!(content_type_for(Path::new("main.js")), "application/javascript");
        assert_eq!(
            content_type_for(Path::new("assets/sprites/murdoch_sheet.json")),
            "application/json"
        );
        assert_eq!(
            content_type_for(Path::new("assets/sprites/murdoch_sheet.png")),
            "image/png"
        );
        assert_eq!(
            content_type_for(Path::new("unknown.bin")),
            "application/octet-stream"
        );
    }
}
