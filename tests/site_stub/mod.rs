#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Route {
    Html(String),
    Xml(String),
    Status(u16),
    /// Hold the connection open without answering.
    Stall(Duration),
}

pub struct SiteStub {
    pub base_url: String,
    shutdown_tx: mpsc::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SiteStub {
    pub fn start(build_routes: impl FnOnce(&str) -> HashMap<String, Route>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let base_url = format!("http://{}", server.server_addr());
        let routes = build_routes(&base_url);

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let route = routes
                    .get(request.url())
                    .cloned()
                    .unwrap_or(Route::Status(404));

                let (status, body, content_type) = match route {
                    Route::Html(body) => (200, body, "text/html; charset=utf-8"),
                    Route::Xml(body) => (200, body, "application/xml"),
                    Route::Status(status) => (status, format!("status {status}"), "text/plain"),
                    Route::Stall(delay) => {
                        thread::spawn(move || {
                            thread::sleep(delay);
                            let _ = request.respond(tiny_http::Response::from_string("late"));
                        });
                        continue;
                    }
                };

                let header =
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes())
                        .expect("build header");
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            shutdown_tx,
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for SiteStub {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn urlset(locs: &[String]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for loc in locs {
        xml.push_str(&format!("  <url>\n    <loc>\n      {loc}\n    </loc>\n  </url>\n"));
    }
    xml.push_str("</urlset>\n");
    xml
}
