//! Axum web server exposing a session over a JSON API.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{delete, get, post},
    Json, Router,
};
use routesim_render::{GraphDocument, Theme};
use routesim_routing::{Algorithm, ForwardingTable, PATH_SEPARATOR};
use routesim_topology::{Topology, Weight};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::session::{Notice, Session};
use crate::{Result, VisError};

/// Shared application state.
pub struct AppState {
    session: RwLock<Session>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server around an existing session.
    pub fn new(session: Session) -> Self {
        Self {
            state: Arc::new(AppState {
                session: RwLock::new(session),
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/api/status", get(status_handler))
            .route("/api/topology", get(topology_handler))
            // Edits
            .route("/api/routers", post(add_router_handler))
            .route("/api/routers/{name}", delete(remove_router_handler))
            .route("/api/links", post(add_link_handler))
            .route("/api/links/{from}/{to}", delete(remove_link_handler))
            .route("/api/sample", post(sample_handler))
            .route("/api/clear", post(clear_handler))
            .route("/api/algorithm", post(algorithm_handler))
            .route("/api/theme", post(theme_handler))
            // Routing
            .route("/api/route", get(route_handler))
            .route("/api/table/{router}", get(table_handler))
            .route("/api/tables", get(tables_handler))
            .route("/api/export.csv", get(export_handler))
            // Rendering
            .route("/api/document", get(document_handler))
            .route("/api/animation.gif", get(animation_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> std::result::Result<(), std::io::Error> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Routing visualizer running on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router()).await
    }
}

/// Optional route endpoints, given as `?source=A&destination=D`.
#[derive(Debug, Default, Deserialize)]
struct RouteQuery {
    source: Option<String>,
    destination: Option<String>,
}

impl RouteQuery {
    fn endpoints(&self) -> Option<(&str, &str)> {
        Some((self.source.as_deref()?, self.destination.as_deref()?))
    }

    fn required(&self) -> Result<(&str, &str)> {
        let source = self.source.as_deref().ok_or(VisError::MissingParameter("source"))?;
        let destination = self
            .destination
            .as_deref()
            .ok_or(VisError::MissingParameter("destination"))?;
        Ok((source, destination))
    }
}

/// The topology as an interactive page, with a route highlighted when both
/// endpoints are given.
async fn index_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Html<String>> {
    let session = state.session.read().await;
    Ok(Html(session.document_html(query.endpoints())?))
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    routers: usize,
    links: usize,
    algorithm: Algorithm,
    theme: Theme,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let session = state.session.read().await;
    Json(StatusResponse {
        status: "ok",
        routers: session.topology().router_count(),
        links: session.topology().link_count(),
        algorithm: session.algorithm(),
        theme: session.theme(),
    })
}

async fn topology_handler(State(state): State<Arc<AppState>>) -> Json<Topology> {
    let session = state.session.read().await;
    Json(session.topology().clone())
}

#[derive(Deserialize)]
struct AddRouterRequest {
    name: String,
}

async fn add_router_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddRouterRequest>,
) -> Result<(StatusCode, Json<Notice>)> {
    let mut session = state.session.write().await;
    let notice = session.add_router(&req.name)?;
    Ok((StatusCode::CREATED, Json(notice)))
}

async fn remove_router_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Notice>> {
    let mut session = state.session.write().await;
    Ok(Json(session.remove_router(&name)?))
}

#[derive(Deserialize)]
struct AddLinkRequest {
    from: String,
    to: String,
    weight: Weight,
    #[serde(default)]
    bidirectional: bool,
}

async fn add_link_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddLinkRequest>,
) -> Result<(StatusCode, Json<Notice>)> {
    let mut session = state.session.write().await;
    let notice = session.add_link(&req.from, &req.to, req.weight, req.bidirectional)?;
    Ok((StatusCode::CREATED, Json(notice)))
}

async fn remove_link_handler(
    State(state): State<Arc<AppState>>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<Notice>> {
    let mut session = state.session.write().await;
    Ok(Json(session.remove_link(&from, &to)?))
}

async fn sample_handler(State(state): State<Arc<AppState>>) -> Json<Notice> {
    let mut session = state.session.write().await;
    Json(session.load_sample())
}

async fn clear_handler(State(state): State<Arc<AppState>>) -> Json<Notice> {
    let mut session = state.session.write().await;
    Json(session.clear())
}

#[derive(Deserialize)]
struct AlgorithmRequest {
    algorithm: Algorithm,
}

async fn algorithm_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AlgorithmRequest>,
) -> Json<Notice> {
    let mut session = state.session.write().await;
    Json(session.set_algorithm(req.algorithm))
}

#[derive(Deserialize)]
struct ThemeRequest {
    theme: Theme,
}

async fn theme_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ThemeRequest>,
) -> Json<Notice> {
    let mut session = state.session.write().await;
    Json(session.set_theme(req.theme))
}

#[derive(Serialize)]
struct RouteResponse {
    path: Vec<String>,
    cost: Weight,
    display: String,
}

async fn route_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResponse>> {
    let (source, destination) = query.required()?;
    let session = state.session.read().await;
    let route = session.route(source, destination)?;
    Ok(Json(RouteResponse {
        display: route.hops.join(PATH_SEPARATOR),
        path: route.hops,
        cost: route.cost,
    }))
}

async fn table_handler(
    State(state): State<Arc<AppState>>,
    Path(router): Path<String>,
) -> Result<Json<ForwardingTable>> {
    let session = state.session.read().await;
    Ok(Json(session.table(&router)?))
}

async fn tables_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ForwardingTable>>> {
    let session = state.session.read().await;
    Ok(Json(session.all_tables()?))
}

async fn export_handler(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let session = state.session.read().await;
    let csv = session.export_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"routing_tables.csv\""),
        ],
        csv,
    ))
}

async fn document_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<GraphDocument>> {
    let session = state.session.read().await;
    Ok(Json(session.document(query.endpoints())?))
}

async fn animation_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<impl IntoResponse> {
    let (source, destination) = query.required()?;
    let session = state.session.read().await;
    let gif = session.animation_gif(source, destination)?;
    Ok((
        [
            (header::CONTENT_TYPE, "image/gif"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"routing_path.gif\""),
        ],
        gif,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use routesim_render::RenderConfig;
    use tower::ServiceExt;

    fn sample_server() -> VisServer {
        let mut session = Session::new(RenderConfig {
            width: 120,
            height: 90,
            layout_iterations: 50,
            ..RenderConfig::default()
        });
        session.load_sample();
        VisServer::new(session)
    }

    async fn send(server: &VisServer, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = server.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn get_json(server: &VisServer, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(server, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn send_json(
        server: &VisServer,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(server, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn send_empty(server: &VisServer, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(server, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn status_reports_counts() {
        let server = sample_server();
        let (status, body) = get_json(&server, "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["routers"], 4);
        assert_eq!(body["links"], 5);
        assert_eq!(body["algorithm"], "dijkstra");
        assert_eq!(body["theme"], "light");
    }

    #[tokio::test]
    async fn add_and_remove_router() {
        let server = sample_server();
        let (status, body) = send_json(&server, "POST", "/api/routers", serde_json::json!({"name": "E"})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["level"], "success");

        let (_, topology) = get_json(&server, "/api/topology").await;
        assert_eq!(topology["routers"].as_array().unwrap().len(), 5);

        let (status, body) = send_empty(&server, "DELETE", "/api/routers/E").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], "warn");
    }

    #[tokio::test]
    async fn duplicate_router_rejected() {
        let server = sample_server();
        let (status, body) = send_json(&server, "POST", "/api/routers", serde_json::json!({"name": "A"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "router 'A' already exists");
    }

    #[tokio::test]
    async fn add_bidirectional_link() {
        let server = sample_server();
        let (status, _) = send_json(
            &server,
            "POST",
            "/api/links",
            serde_json::json!({"from": "D", "to": "A", "weight": 1, "bidirectional": true}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // A -> D already existed with weight 10, so only D -> A was created.
        let (_, topology) = get_json(&server, "/api/topology").await;
        assert_eq!(topology["links"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn link_weight_validated() {
        let server = sample_server();
        let (status, body) = send_json(
            &server,
            "POST",
            "/api/links",
            serde_json::json!({"from": "D", "to": "A", "weight": 0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Link weight must be a positive integer, got 0.");

        let (status, _) = send_json(
            &server,
            "POST",
            "/api/links",
            serde_json::json!({"from": "D", "to": "A", "weight": i64::MAX}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, topology) = get_json(&server, "/api/topology").await;
        assert_eq!(topology["links"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn remove_missing_link_not_found() {
        let server = sample_server();
        let (status, body) = send_empty(&server, "DELETE", "/api/links/D/A").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("does not exist"));
    }

    #[tokio::test]
    async fn route_query() {
        let server = sample_server();
        let (status, body) = get_json(&server, "/api/route?source=A&destination=D").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cost"], 4);
        assert_eq!(body["path"], serde_json::json!(["A", "B", "D"]));
        assert_eq!(body["display"], "A ➔ B ➔ D");
    }

    #[tokio::test]
    async fn unreachable_route_unprocessable() {
        let server = sample_server();
        let (status, body) = get_json(&server, "/api/route?source=D&destination=A").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "no path exists from D to A");
    }

    #[tokio::test]
    async fn route_needs_both_endpoints() {
        let server = sample_server();
        let (status, body) = get_json(&server, "/api/route?source=A").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing parameter: destination");
    }

    #[tokio::test]
    async fn empty_session_cannot_route() {
        let server = VisServer::new(Session::default());
        let (status, body) = get_json(&server, "/api/tables").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Add at least two nodes to simulate routing.");
    }

    #[tokio::test]
    async fn table_for_router() {
        let server = sample_server();
        let (status, body) = get_json(&server, "/api/table/A").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entries"].as_array().unwrap().len(), 3);

        let (status, _) = get_json(&server, "/api/table/Z").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn algorithm_switch_applies() {
        let server = sample_server();
        let (status, _) = send_json(
            &server,
            "POST",
            "/api/algorithm",
            serde_json::json!({"algorithm": "bellman-ford"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, tables) = get_json(&server, "/api/tables").await;
        let tables = tables.as_array().unwrap();
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[0]["algorithm"], "bellman-ford");
    }

    #[tokio::test]
    async fn sample_resets_topology() {
        let server = VisServer::new(Session::default());
        let (status, body) = send_empty(&server, "POST", "/api/sample").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Sample topology loaded.");

        let (_, status_body) = get_json(&server, "/api/status").await;
        assert_eq!(status_body["links"], 5);
    }

    #[tokio::test]
    async fn csv_download() {
        let server = sample_server();
        let request = Request::builder().uri("/api/export.csv").body(Body::empty()).unwrap();
        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("Router,Destination,Next Hop,Cost,Path"));
    }

    #[tokio::test]
    async fn index_is_html() {
        let server = sample_server();
        let request = Request::builder()
            .uri("/?source=A&destination=D")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&server, request).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("vis-network"));
        assert!(html.contains("\"on_path\":true"));
    }

    #[tokio::test]
    async fn document_without_route() {
        let server = sample_server();
        let (status, body) = get_json(&server, "/api/document").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["edges"].as_array().unwrap().len(), 5);
        assert_eq!(body["path"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn animation_is_gif() {
        let server = sample_server();
        let request = Request::builder()
            .uri("/api/animation.gif?source=A&destination=C")
            .body(Body::empty())
            .unwrap();
        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/gif");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.starts_with(b"GIF"));
    }
}
