//! HTTP server for interactive comparison mode
//!
//! `skillgrid serve ./candidates` → starts server, opens browser, shows the
//! ranking list and the grid for the current selection.
//!
//! The server holds the roster and the selection. Every change to the
//! selection is followed by a full page reload, which rebuilds the matrix and
//! the grid from scratch.

use crate::candidate::CandidateId;
use crate::config::ServerConfig;
use crate::grid;
use crate::matrix::{build_matrix, Matrix, MatrixError};
use crate::report::{html, json, svg};
use crate::roster::Roster;
use crate::selection::Selection;
use serde::{Deserialize, Serialize};
use std::io;
use tiny_http::{Header, Method, Request, Response, Server};

const REMOVE_URL: &str = "/api/remove";
const TOGGLE_URL: &str = "/api/toggle";

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

impl ApiResponse<()> {
    fn failure(error: impl Into<String>) -> Self {
        Self { ok: false, data: None, error: Some(error.into()) }
    }
}

#[derive(Deserialize, Debug)]
struct IdParams {
    id: String,
}

/// Response produced by the router, before it is handed to tiny_http.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self { status: 200, content_type: "text/html; charset=utf-8", body }
    }

    fn svg(body: String) -> Self {
        Self { status: 200, content_type: "image/svg+xml", body }
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_string(value)
            .unwrap_or_else(|e| format!(r#"{{"ok":false,"data":null,"error":"{}"}}"#, e));
        Self { status, content_type: "application/json", body }
    }

    fn not_found() -> Self {
        Self { status: 404, content_type: "text/plain", body: "Not found".to_string() }
    }
}

/// Roster plus the current selection.
pub struct App {
    roster: Roster,
    selection: Selection,
}

impl App {
    pub fn new(roster: Roster, selection: Selection) -> Self {
        Self { roster, selection }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn matrix(&self) -> Result<Matrix, MatrixError> {
        build_matrix(&self.selection.resolve(&self.roster))
    }

    /// Dispatch one request. `url` may carry a query string.
    pub fn route(&mut self, method: &Method, url: &str) -> Reply {
        let path = url.split('?').next().unwrap_or("/");
        let query = url.split('?').nth(1).unwrap_or("");

        match (method, path) {
            (&Method::Get, "/") => self.page(),

            (&Method::Get, "/api/candidates") => {
                Reply::json(200, &ApiResponse::success(self.roster.rank()))
            }

            (&Method::Get, "/api/selection") => {
                Reply::json(200, &ApiResponse::success(&self.selection))
            }

            (&Method::Get, "/api/matrix") => match self.matrix() {
                Ok(matrix) => Reply::json(200, &ApiResponse::success(json::Snapshot::new(&matrix))),
                Err(e) => Reply::json(500, &ApiResponse::failure(e.to_string())),
            },

            (&Method::Get, "/api/heatmap.svg") => match self.matrix() {
                Ok(matrix) => Reply::svg(svg::to_string(&grid::render(&matrix))),
                Err(e) => Reply::json(500, &ApiResponse::failure(e.to_string())),
            },

            (&Method::Post, TOGGLE_URL) => self.update(query, |selection, id| {
                selection.toggle(id);
            }),

            (&Method::Post, REMOVE_URL) => self.update(query, |selection, id| {
                selection.remove(&id);
            }),

            _ => Reply::not_found(),
        }
    }

    /// The live page. When the selection cannot be compared the ranking list
    /// is still served, with the error in place of the grid, so the
    /// offending candidate can be deselected.
    fn page(&self) -> Reply {
        let (matrix, error) = match self.matrix() {
            Ok(matrix) => (matrix, None),
            Err(e) => {
                tracing::warn!(error = %e, "cannot build comparison");
                (Matrix::default(), Some(e.to_string()))
            }
        };

        let ranked = self.roster.rank();
        let options = html::PageOptions {
            ranking: Some(&ranked),
            selection: Some(&self.selection),
            remove_url: Some(REMOVE_URL),
            toggle_url: Some(TOGGLE_URL),
            error: error.as_deref(),
        };

        let mut buf = Vec::new();
        match html::write(&mut buf, &matrix, &options) {
            Ok(()) => {
                let mut reply = Reply::html(String::from_utf8_lossy(&buf).into_owned());
                if error.is_some() {
                    reply.status = 500;
                }
                reply
            }
            Err(e) => Reply::json(500, &ApiResponse::failure(e.to_string())),
        }
    }

    fn update<F>(&mut self, query: &str, change: F) -> Reply
    where
        F: FnOnce(&mut Selection, CandidateId),
    {
        let params = match serde_urlencoded::from_str::<IdParams>(query) {
            Ok(params) => params,
            Err(e) => return Reply::json(400, &ApiResponse::failure(format!("missing id: {}", e))),
        };

        let id = CandidateId::new(params.id);
        let record = match self.roster.get(&id) {
            Some(record) => record,
            None => return Reply::json(404, &ApiResponse::failure(format!("unknown candidate {}", id))),
        };

        // A candidate joins the selection only if it can be compared
        let mut next = self.selection.clone();
        change(&mut next, id.clone());
        if next.contains(&id) && !self.selection.contains(&id) {
            if let Err(e) = build_matrix(std::slice::from_ref(record)) {
                tracing::warn!(candidate = %id, error = %e, "rejected selection change");
                return Reply::json(422, &ApiResponse::failure(e.to_string()));
            }
        }

        self.selection = next;
        tracing::info!(selected = self.selection.len(), "selection changed");
        Reply::json(200, &ApiResponse::success(&self.selection))
    }
}

/// Start server, open browser, serve UI
pub fn start(config: &ServerConfig, app: App, open_browser: bool) -> crate::Result<()> {
    let addr = config.socket_addr()?;
    let server = Server::http(addr)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let url = format!("http://{}", addr);

    eprintln!("\n\x1b[1;32m▦ Skillgrid\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   {} candidates loaded\n", app.roster.len());
    tracing::info!(%addr, candidates = app.roster.len(), "server listening");

    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    let mut app = app;
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(&mut app, request) {
            tracing::error!(error = %e, "request failed");
        }
    }

    Ok(())
}

fn handle_request(app: &mut App, request: Request) -> io::Result<()> {
    let url = request.url().to_string();
    let method = request.method().clone();
    tracing::debug!(%method, %url, "request");

    let reply = app.route(&method, &url);
    let mut response = Response::from_string(reply.body).with_status_code(reply.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        response = response.with_header(header);
    }
    request.respond(response)
}
