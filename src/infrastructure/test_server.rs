//! Local HTTP server with fixed replies, for exercising outbound clients.

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};

/// A server that answers `path` with one canned status and JSON body.
/// Every other path gets a 404.
pub struct CannedServer {
    pub base_url: String,
    handle: ServerHandle,
}

impl CannedServer {
    pub fn start(path: &'static str, status: u16, body: &'static str) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        let server = HttpServer::new(move || {
            App::new().route(
                path,
                web::route().to(move || async move {
                    HttpResponse::build(status)
                        .content_type("application/json")
                        .body(body)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
