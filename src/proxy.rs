use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::uri::PathAndQuery;
use axum::http::{Request, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::DevServerConfig;

#[derive(Clone)]
struct ProxyState {
    client: Client<HttpConnector, Body>,
    upstream: Uri,
    prefix: String,
}

/// Build the development server: static files from the content root, with
/// requests under the proxy prefix forwarded to the API upstream, prefix
/// stripped.
pub fn build_dev_app(config: &DevServerConfig) -> Result<Router, String> {
    let upstream: Uri = config
        .upstream
        .parse()
        .map_err(|e| format!("Invalid upstream `{}`: {e}", config.upstream))?;
    if upstream.scheme().is_none() || upstream.authority().is_none() {
        return Err(format!(
            "Upstream `{}` must include a scheme and host",
            config.upstream
        ));
    }

    let state = ProxyState {
        client: Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
        upstream,
        prefix: config.proxy_prefix.clone(),
    };

    let router = Router::new()
        .route(&format!("{}/{{*path}}", config.proxy_prefix), any(forward))
        .route(&config.proxy_prefix, any(forward))
        .with_state(state);

    let router = if config.hot {
        // Dev refreshes must always refetch.
        let static_files = ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                header::HeaderValue::from_static("no-store"),
            ))
            .service(ServeDir::new(&config.root));
        router.fallback_service(static_files)
    } else {
        router.fallback_service(ServeDir::new(&config.root))
    };

    Ok(router.layer(TraceLayer::new_for_http()))
}

/// Forward one request to the upstream, rewriting the URI and streaming the
/// response back unchanged.
async fn forward(State(state): State<ProxyState>, req: Request<Body>) -> Response {
    let path = req.uri().path();
    let stripped = path.strip_prefix(state.prefix.as_str()).unwrap_or(path);
    let stripped = if stripped.is_empty() { "/" } else { stripped };

    let path_and_query = match req.uri().query() {
        Some(query) => format!("{stripped}?{query}"),
        None => stripped.to_string(),
    };

    let mut parts = state.upstream.clone().into_parts();
    parts.path_and_query = path_and_query.parse::<PathAndQuery>().ok();
    let target = match Uri::from_parts(parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(error = %e, "failed to build upstream URI");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };

    let (mut head, body) = req.into_parts();
    head.uri = target;

    match state.client.request(Request::from_parts(head, body)).await {
        Ok(resp) => {
            let (parts, body) = resp.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(error = %e, "upstream request failed");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
