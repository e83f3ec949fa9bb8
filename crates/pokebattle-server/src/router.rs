//! Request router for the battle API

use hyper::Method;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// Operations exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `POST /pokemon/battle`
    TriggerBattle,
    /// `GET /pokemon`
    ListCreatures,
    /// `GET /pokemon/battles`
    ListBattles,
    /// `GET /pokemon/scores`
    Leaderboard,
}

/// Result of routing a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Found(Route),
    /// Path exists but not for this method; carries the allowed method
    MethodNotAllowed(Method),
    NotFound,
}

/// Router for matching requests to operations
pub struct Router {
    /// Routes by normalized path (no trailing slash)
    routes: Vec<(String, Method, Route)>,
}

impl Router {
    /// Create a router with every route mounted under `prefix`
    pub fn new(prefix: &str) -> Self {
        let prefix = normalize(prefix);
        let at = |suffix: &str| normalize(&format!("{}{}", prefix, suffix));

        Self {
            routes: vec![
                (at("/battle"), Method::POST, Route::TriggerBattle),
                (at(""), Method::GET, Route::ListCreatures),
                (at("/battles"), Method::GET, Route::ListBattles),
                (at("/scores"), Method::GET, Route::Leaderboard),
            ],
        }
    }

    /// Match a request method and path to an operation
    pub fn route(&self, method: &Method, path: &str) -> RouteMatch {
        let path = normalize(path);
        let mut allowed = None;

        for (route_path, route_method, route) in &self.routes {
            if *route_path != path {
                continue;
            }
            if route_method == method {
                return RouteMatch::Found(*route);
            }
            allowed = Some(route_method.clone());
        }

        match allowed {
            Some(method) => RouteMatch::MethodNotAllowed(method),
            None => RouteMatch::NotFound,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/pokemon")
    }
}

/// Strip trailing slashes; the root stays `/`.
fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Decode a query string into key/value pairs; later keys win.
pub fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let Some(query) = query else {
        return params;
    };

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode(key), decode(value));
    }
    params
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
