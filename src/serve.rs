//! Development server for the public page and the admin editor.
//!
//! Built on `tiny_http`, single-threaded: requests are handled one at a time
//! on the main thread, so admin mutations never overlap.
//!
//! # Routes
//!
//! | Method | Path                           | Response                            |
//! |--------|--------------------------------|-------------------------------------|
//! | GET    | `/`, `/index.html`             | public page (`?filter=TOKEN`)       |
//! | GET    | `/admin`                       | admin page (`?notice=TEXT`)         |
//! | GET    | `/_folio/site.js`, `admin.js`  | embedded client scripts             |
//! | GET    | `/blob/<handle>`               | session upload bytes                |
//! | GET    | `/<assets>/...`                | static files from the assets dir    |
//! | POST   | `/admin/<collection>`          | add (urlencoded form)               |
//! | POST   | `/admin/<collection>/delete`   | delete by `index` field             |
//! | POST   | `/admin/<collection>/upload`   | raw body upload, `Content-Type`     |
//! | POST   | `/admin/photo/reset`           | revert profile photo                |
//!
//! Every POST answers `303 See Other` to `/admin?notice=...`.

use crate::{
    admin::{
        AdminEditor, AdminError, Collection,
        page::{ADMIN_SCRIPT, load_admin_template, render_admin},
    },
    build::SCRIPT_DIR,
    config::SiteConfig,
    data::{AssetHandle, KvStorage, types::EPHEMERAL_ROUTE},
    log,
    render::{ProjectFilter, SITE_SCRIPT, load_template, render_public},
    utils::form::{Form, split_url},
};
use anyhow::{Context, Result, anyhow, bail};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Component, Path},
    sync::Arc,
};
use tiny_http::{Header, Method, Request, Response, Server};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

const ADMIN_ROUTE: &str = "/admin";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the development server.
///
/// This function:
/// 1. Binds to the configured interface and port (with auto-retry on port conflict)
/// 2. Sets up Ctrl+C handler for graceful shutdown
/// 3. Opens one admin session over the configured storage, or over an
///    in-memory copy of it when `[serve].scratch` is set
/// 4. Enters the main request handling loop
///
/// The server blocks until Ctrl+C is received.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid [serve.interface] `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{addr}");
    log!("serve"; "admin at http://{addr}{ADMIN_ROUTE}");

    let store = config.store();
    if config.serve.scratch {
        log!("serve"; "scratch session, admin edits are kept in memory");
        run(&server, Site::new(config, AdminEditor::open(store.scratch()?)));
    } else {
        run(&server, Site::new(config, AdminEditor::open(store)));
    }
    Ok(())
}

/// Handle requests until the server is unblocked.
fn run<S: KvStorage>(server: &Server, mut site: Site<'_, S>) {
    for request in server.incoming_requests() {
        if let Err(e) = site.handle(request) {
            log!("error"; "request error: {e:#}");
        }
    }

    let uploads = site.editor.upload_count();
    if uploads > 0 {
        log!("serve"; "discarded {uploads} session upload(s)");
    }
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }

    match last_err {
        Some(e) => bail!(
            "Failed to bind after {} attempts (ports {}-{}): {}",
            max_retries,
            base_port,
            base_port.saturating_add(max_retries.saturating_sub(1)),
            e
        ),
        None => bail!("No port to bind (max_retries = 0)"),
    }
}

// ============================================================================
// Routing
// ============================================================================

/// What to send back for one request.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Content { mime: String, body: Vec<u8> },
    /// `303 See Other`
    Redirect(String),
    NotFound,
}

impl Reply {
    fn html(html: String) -> Self {
        Self::Content {
            mime: "text/html; charset=utf-8".into(),
            body: html.into_bytes(),
        }
    }

    fn script(source: &str) -> Self {
        Self::Content {
            mime: "application/javascript; charset=utf-8".into(),
            body: source.as_bytes().to_vec(),
        }
    }

    fn notice(text: &str) -> Self {
        Self::Redirect(format!("{ADMIN_ROUTE}?notice={}", urlencoding::encode(text)))
    }

    fn into_response(self) -> Result<Response<Cursor<Vec<u8>>>> {
        Ok(match self {
            Self::Content { mime, body } => {
                Response::from_data(body).with_header(header("Content-Type", &mime)?)
            }
            Self::Redirect(location) => Response::from_data(Vec::new())
                .with_status_code(303)
                .with_header(header("Location", &location)?),
            Self::NotFound => Response::from_string("404 Not Found")
                .with_status_code(404)
                .with_header(header("Content-Type", "text/plain")?),
        })
    }
}

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|()| anyhow!("invalid header `{name}: {value}`"))
}

/// Per-server state: the config and the single admin session.
struct Site<'a, S> {
    config: &'a SiteConfig,
    editor: AdminEditor<S>,
}

impl<'a, S: KvStorage> Site<'a, S> {
    fn new(config: &'a SiteConfig, editor: AdminEditor<S>) -> Self {
        Self { config, editor }
    }

    fn handle(&mut self, mut request: Request) -> Result<()> {
        let method = request.method().clone();
        let url = request.url().to_string();
        let content_type = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Content-Type"))
            .map(|h| h.value.as_str().to_string())
            .unwrap_or_default();

        let mut body = Vec::new();
        request
            .as_reader()
            .read_to_end(&mut body)
            .context("Failed to read request body")?;

        let reply = match self.route(&method, &url, &content_type, body) {
            Ok(reply) => reply,
            Err(e) => {
                let response = Response::from_string(format!("{e:#}")).with_status_code(500);
                request.respond(response)?;
                return Err(e);
            }
        };
        if reply == Reply::NotFound {
            log!("serve"; "404 {url}");
        }
        request.respond(reply.into_response()?)?;
        Ok(())
    }

    fn route(&mut self, method: &Method, url: &str, content_type: &str, body: Vec<u8>) -> Result<Reply> {
        let (path, query) = split_url(url);

        match (method, path.as_str()) {
            (Method::Get, "/" | "/index.html") => {
                let filter = ProjectFilter::parse(query.get("filter"));
                let doc = self.editor.store().resolve();
                let template = load_template(self.config)?;
                Ok(Reply::html(render_public(&doc, &template, self.config, &filter)?))
            }
            (Method::Get, ADMIN_ROUTE) => {
                let template = load_admin_template(self.config)?;
                let notice = query.get_opt("notice");
                Ok(Reply::html(render_admin(&self.editor, &template, self.config, notice)?))
            }
            (Method::Get, path) => Ok(self.serve_static(path)),
            (Method::Post, path) => Ok(match self.apply(path, content_type, body) {
                Some(Ok(collection)) => Reply::notice(&format!("Saved {collection}")),
                Some(Err(err)) => {
                    log!("admin"; "{err}");
                    Reply::notice(&err.to_string())
                }
                None => Reply::NotFound,
            }),
            _ => Ok(Reply::NotFound),
        }
    }

    /// Scripts, session uploads and files under the assets directory.
    fn serve_static(&self, path: &str) -> Reply {
        if let Some(name) = path
            .strip_prefix('/')
            .and_then(|p| p.strip_prefix(SCRIPT_DIR))
            .and_then(|p| p.strip_prefix('/'))
        {
            return match name {
                "site.js" => Reply::script(SITE_SCRIPT),
                "admin.js" => Reply::script(ADMIN_SCRIPT),
                _ => Reply::NotFound,
            };
        }

        if let Some(handle) = path.strip_prefix(EPHEMERAL_ROUTE) {
            return match self.editor.asset(&AssetHandle::new(handle)) {
                Some(asset) => Reply::Content {
                    mime: asset.mime.clone(),
                    body: asset.bytes.clone(),
                },
                None => Reply::NotFound,
            };
        }

        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Reply::NotFound;
        }

        let local = self.config.get_root().join(relative);
        if !local.starts_with(&self.config.build.assets) || !local.is_file() {
            return Reply::NotFound;
        }
        match fs::read(&local) {
            Ok(body) => Reply::Content {
                mime: guess_content_type(&local).into(),
                body,
            },
            Err(e) => {
                log!("error"; "{}: {e}", local.display());
                Reply::NotFound
            }
        }
    }

    /// Run the admin action addressed by `path`. `None` for unknown routes.
    fn apply(
        &mut self,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Option<Result<Collection, AdminError>> {
        let rest = path.strip_prefix(ADMIN_ROUTE)?.strip_prefix('/')?;
        let (segment, action) = rest.split_once('/').unwrap_or((rest, ""));
        let collection = Collection::from_segment(segment)?;
        let editor = &mut self.editor;

        let result = match action {
            "" => {
                let form = Form::parse(&String::from_utf8_lossy(&body));
                match collection {
                    Collection::Slides => editor.add_slide(form.get("src"), form.get_opt("kind")),
                    Collection::Photo => editor.set_photo(form.get("photo")),
                    Collection::Experience => editor.add_experience(
                        form.get("start"),
                        form.get("end"),
                        form.get("company"),
                        form.get("role"),
                    ),
                    Collection::Projects => editor.add_project(
                        form.get("img"),
                        form.get("link"),
                        form.get("category"),
                    ),
                    Collection::Clients => editor.add_client(form.get("uri")),
                }
            }
            "delete" => {
                let form = Form::parse(&String::from_utf8_lossy(&body));
                let index = match form.get("index").trim().parse::<usize>() {
                    Ok(index) => index,
                    Err(_) => return Some(Err(AdminError::MissingField("Index"))),
                };
                match collection {
                    Collection::Slides => editor.delete_slide(index),
                    Collection::Experience => editor.delete_experience(index),
                    Collection::Projects => editor.delete_project(index),
                    Collection::Clients => editor.delete_client(index),
                    Collection::Photo => return None,
                }
            }
            "upload" => {
                // Drop parameters such as `; charset=...`
                let mime = content_type.split(';').next().unwrap_or_default();
                match collection {
                    Collection::Slides => editor.upload_slide(body, mime),
                    Collection::Photo => editor.upload_photo(body, mime),
                    Collection::Clients => editor.upload_client(body, mime),
                    _ => return None,
                }
            }
            "reset" if collection == Collection::Photo => editor.reset_photo(),
            _ => return None,
        };
        Some(result)
    }
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Video
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogg") => "video/ogg",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Default binary
        _ => "application/octet-stream",
    }
}
