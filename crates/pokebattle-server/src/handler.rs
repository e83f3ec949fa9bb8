//! Request handling: routes requests to the engine and query façade

use crate::router::{parse_query, Route, RouteMatch, Router};
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{ALLOW, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};
use log::{error, info, warn};
use pokebattle_core::{BattleConfig, BattleEngine, Catalog, Error, QueryFacade, ScoreStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of a battle request; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct BattleRequest {
    /// Number of draws for this battle
    #[serde(default)]
    pub pokemons: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Shared application state
pub struct App<C, S> {
    engine: BattleEngine<Arc<C>, Arc<S>>,
    queries: QueryFacade<Arc<C>, Arc<S>>,
    router: Router,
}

impl<C, S> App<C, S>
where
    C: Catalog + 'static,
    S: ScoreStore + 'static,
{
    /// Wire the engine and façade to one catalog and store
    pub fn new(catalog: C, store: S, battle: BattleConfig) -> Self {
        let catalog = Arc::new(catalog);
        let store = Arc::new(store);
        Self {
            engine: BattleEngine::new(catalog.clone(), store.clone(), battle),
            queries: QueryFacade::new(catalog, store),
            router: Router::default(),
        }
    }

    pub fn engine(&self) -> &BattleEngine<Arc<C>, Arc<S>> {
        &self.engine
    }

    pub fn queries(&self) -> &QueryFacade<Arc<C>, Arc<S>> {
        &self.queries
    }
}

/// Handle an incoming HTTP request
pub async fn handle_request<C, S>(
    app: Arc<App<C, S>>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error>
where
    C: Catalog + 'static,
    S: ScoreStore + 'static,
{
    let (parts, body) = req.into_parts();
    let body = body.collect().await?.to_bytes();
    Ok(dispatch(app, &parts.method, parts.uri.path(), parts.uri.query(), body).await)
}

/// Route a request and run its operation
pub async fn dispatch<C, S>(
    app: Arc<App<C, S>>,
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: Bytes,
) -> Response<Full<Bytes>>
where
    C: Catalog + 'static,
    S: ScoreStore + 'static,
{
    let matched = app.router.route(method, path);
    let response = match matched {
        RouteMatch::Found(route) => run(app, route, query, body).await,
        RouteMatch::MethodNotAllowed(allowed) => {
            let mut response = error_response(
                StatusCode::METHOD_NOT_ALLOWED,
                &format!("{} {} is not supported", method, path),
            );
            if let Ok(value) = allowed.as_str().parse() {
                response.headers_mut().insert(ALLOW, value);
            }
            response
        }
        RouteMatch::NotFound => {
            error_response(StatusCode::NOT_FOUND, &format!("no route for {}", path))
        }
    };

    info!("{} {} -> {}", method, path, response.status().as_u16());
    response
}

async fn run<C, S>(
    app: Arc<App<C, S>>,
    route: Route,
    query: Option<&str>,
    body: Bytes,
) -> Response<Full<Bytes>>
where
    C: Catalog + 'static,
    S: ScoreStore + 'static,
{
    match route {
        Route::TriggerBattle => {
            let request = match parse_battle_request(&body) {
                Ok(request) => request,
                Err(e) => return error_for(&e),
            };
            let sample_size = request
                .pokemons
                .unwrap_or(app.engine.config().sample_size);
            let result = blocking(app, move |app| app.engine.trigger_battle(sample_size)).await;
            respond(StatusCode::CREATED, result)
        }
        Route::ListCreatures => {
            let result = blocking(app, |app| app.queries.list_creatures()).await;
            respond(StatusCode::OK, result)
        }
        Route::ListBattles => {
            let params = parse_query(query);
            let start = params.get("start_time").cloned().unwrap_or_default();
            let end = params.get("end_time").cloned().unwrap_or_default();
            let result = blocking(app, move |app| app.queries.list_battles(&start, &end)).await;
            respond(StatusCode::OK, result)
        }
        Route::Leaderboard => {
            let result = blocking(app, |app| app.queries.leaderboard()).await;
            respond(StatusCode::OK, result)
        }
    }
}

fn parse_battle_request(body: &[u8]) -> pokebattle_core::Result<BattleRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(BattleRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| Error::InvalidRequest(format!("invalid battle request: {}", e)))
}

/// Run a blocking engine call off the async workers
async fn blocking<C, S, T, F>(app: Arc<App<C, S>>, op: F) -> pokebattle_core::Result<T>
where
    C: Catalog + 'static,
    S: ScoreStore + 'static,
    T: Send + 'static,
    F: FnOnce(&App<C, S>) -> pokebattle_core::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || op(&app)).await {
        Ok(result) => result,
        Err(e) => Err(Error::Persistence(format!("worker task failed: {}", e))),
    }
}

fn respond<T: Serialize>(
    status: StatusCode,
    result: pokebattle_core::Result<T>,
) -> Response<Full<Bytes>> {
    match result {
        Ok(value) => json_response(status, &value),
        Err(e) => error_for(&e),
    }
}

/// HTTP status for a core error
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Upstream(_) => StatusCode::BAD_GATEWAY,
        Error::EmptySample => StatusCode::SERVICE_UNAVAILABLE,
        Error::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_for(err: &Error) -> Response<Full<Bytes>> {
    let status = status_for(err);
    if status.is_server_error() {
        error!("request failed: {}", err);
    } else {
        warn!("request rejected: {}", err);
    }
    error_response(status, &err.to_string())
}

fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, &ErrorBody { error: message })
}

fn json_response<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    let (status, body) = match serde_json::to_vec(value) {
        Ok(body) => (status, body),
        Err(e) => {
            error!("failed to encode response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                br#"{"error":"failed to encode response"}"#.to_vec(),
            )
        }
    };

    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );
    response
}
