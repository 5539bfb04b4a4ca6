mod site_stub;

use std::collections::HashMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

use sitemap2md::archive::read_entries;

use site_stub::{Route, SiteStub, urlset};

const STARTUP_DEADLINE: Duration = Duration::from_secs(20);

struct AppServer {
    base_url: String,
    child: Child,
}

impl AppServer {
    fn start() -> anyhow::Result<Self> {
        let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
        let addr = format!("127.0.0.1:{port}");

        let child = Command::new(env!("CARGO_BIN_EXE_sitemap2md-app"))
            .args(["--addr", &addr, "--page-timeout-secs", "2"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let server = Self {
            base_url: format!("http://{addr}"),
            child,
        };

        let client = Client::new();
        let started = Instant::now();
        loop {
            let ready = client
                .get(server.url("/healthz"))
                .send()
                .is_ok_and(|resp| resp.status().is_success());
            if ready {
                return Ok(server);
            }
            if started.elapsed() > STARTUP_DEADLINE {
                anyhow::bail!("sitemap2md-app did not become ready on {addr}");
            }
            thread::sleep(Duration::from_millis(50));
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for AppServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn crawl_responds_with_zip_attachment() -> anyhow::Result<()> {
    let site = SiteStub::start(|base| {
        HashMap::from([
            (
                "/sitemap.xml".to_owned(),
                Route::Xml(urlset(&[format!("{base}/hi")])),
            ),
            ("/hi".to_owned(), Route::Html("<h1>Hi</h1>".to_owned())),
        ])
    });
    let app = AppServer::start()?;

    let resp = Client::new()
        .get(app.url("/crawl"))
        .query(&[("sitemap_url", site.url("/sitemap.xml"))])
        .send()?;

    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/zip")
    );
    assert_eq!(
        resp.headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"crawled_markdown_files.zip\"")
    );

    let body = resp.bytes()?;
    let entries = read_entries(&body)?;
    assert_eq!(entries.len(), 1);
    let host = site.base_url.trim_start_matches("http://");
    assert_eq!(entries[0].name, format!("{host}_hi.md"));
    assert!(entries[0].content.contains("# Hi"), "{}", entries[0].content);
    Ok(())
}

#[test]
fn crawl_without_sitemap_url_is_unprocessable() -> anyhow::Result<()> {
    let app = AppServer::start()?;

    let resp = Client::new().get(app.url("/crawl")).send()?;

    assert_eq!(resp.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.text()?, "Please provide a sitemap URL first.");
    Ok(())
}

#[test]
fn crawl_with_empty_sitemap_is_unprocessable() -> anyhow::Result<()> {
    let site = SiteStub::start(|_| {
        HashMap::from([("/sitemap.xml".to_owned(), Route::Xml(urlset(&[])))])
    });
    let app = AppServer::start()?;

    let resp = Client::new()
        .get(app.url("/crawl"))
        .query(&[("sitemap_url", site.url("/sitemap.xml"))])
        .send()?;

    assert_eq!(resp.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.text()?, "No URLs found in sitemap or an error occurred.");
    Ok(())
}

#[test]
fn crawl_rejects_non_http_sitemap_url() -> anyhow::Result<()> {
    let app = AppServer::start()?;

    let resp = Client::new()
        .get(app.url("/crawl"))
        .query(&[("sitemap_url", "ftp://a")])
        .send()?;

    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(resp.text()?.contains("http/https"));
    Ok(())
}
