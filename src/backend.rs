use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, MethodRouter},
    Router,
};
use cyan_portfolio::{
    config::{PageConfig, PAGE_CONFIG_ATTRIBUTE},
    content::StaticContentStore,
    view::{App, AppProps},
    MOUNT_POINT_ID,
};
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const PORT_BOUNDS: (u16, u16) = (1, 65_535);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct ServerConfig {
    port: u16,
    dist_dir: PathBuf,
    log_level: LogLevel,
    page: PageConfig,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_u16_with_bounds(&lookup, "PORT", DEFAULT_PORT, PORT_BOUNDS);
        let dist_dir = parse_non_empty_string(&lookup, "DIST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));
        let log_level = parse_log_level(&lookup, "LOG_LEVEL", DEFAULT_LOG_LEVEL);
        let page = PageConfig::from_json_or_default(
            parse_non_empty_string(&lookup, "PAGE_CONFIG").as_deref(),
        );

        Self {
            port,
            dist_dir,
            log_level,
            page,
        }
    }
}

fn parse_u16_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u16,
    bounds: (u16, u16),
) -> u16 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: LogLevel,
) -> LogLevel {
    match parse_non_empty_string(lookup, name)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        _ => default,
    }
}

fn init_logging(level: LogLevel) {
    let filter = EnvFilter::new(format!(
        "{level},tower_http={level}",
        level = level.as_str()
    ));

    let _ = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_env_filter(filter)
        .try_init();
}

#[derive(Debug, thiserror::Error)]
enum TemplateError {
    #[error("index template has no empty <div id=\"{0}\"> mount point")]
    MissingMountPoint(&'static str),
}

fn inject_page(template: &str, page: &PageConfig, body: &str) -> Result<String, TemplateError> {
    let mount = format!("<div id=\"{MOUNT_POINT_ID}\"></div>");
    let at = template
        .find(&mount)
        .ok_or(TemplateError::MissingMountPoint(MOUNT_POINT_ID))?;

    let page_json = page.to_json();
    let config = html_escape::encode_double_quoted_attribute(&page_json);
    Ok(format!(
        "{before}<div id=\"{MOUNT_POINT_ID}\" {PAGE_CONFIG_ATTRIBUTE}=\"{config}\">{body}</div>{after}",
        before = &template[..at],
        after = &template[at + mount.len()..],
    ))
}

// No viewport on the server: state stays at defaults and the backdrop is bare.
async fn prerender(page: PageConfig) -> String {
    yew::ServerRenderer::<App>::with_props(move || AppProps {
        config: page,
        content: Rc::new(StaticContentStore::portfolio()),
        sources: None,
        viewport: None,
    })
    .render()
    .await
}

#[derive(Clone)]
struct AppState {
    page: Arc<str>,
}

async fn serve_page(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"))],
        Html(state.page.to_string()),
    )
}

fn router(state: AppState, dist_dir: &Path) -> Router {
    let page_fallback: MethodRouter = get(serve_page).with_state(state.clone());
    let assets = ServeDir::new(dist_dir)
        .append_index_html_on_directories(false)
        .fallback(page_fallback);

    Router::new()
        .route("/", get(serve_page))
        .route("/index.html", get(serve_page))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    init_logging(config.log_level);

    let template_path = config.dist_dir.join("index.html");
    let template = fs::read_to_string(&template_path)
        .map_err(|error| format!("failed to read {}: {error}", template_path.display()))?;
    let body = prerender(config.page).await;
    let page = inject_page(&template, &config.page, &body)?;

    let app = router(
        AppState {
            page: Arc::from(page),
        },
        &config.dist_dir,
    );

    let bind_address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!(
        port = config.port,
        dist_dir = %config.dist_dir.display(),
        "server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use std::collections::HashMap;
    use tower::ServiceExt;

    const TEMPLATE: &str = "<html><body><div id=\"app\"></div></body></html>";

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| values.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));

        assert_eq!(
            config,
            ServerConfig {
                port: DEFAULT_PORT,
                dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
                log_level: DEFAULT_LOG_LEVEL,
                page: PageConfig::default(),
            }
        );
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", " 9090 "),
            ("DIST_DIR", "public"),
            ("LOG_LEVEL", "DEBUG"),
            ("PAGE_CONFIG", r#"{"ambient_shape_count": 4}"#),
        ]));

        assert_eq!(config.port, 9090);
        assert_eq!(config.dist_dir, PathBuf::from("public"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.page.ambient_shape_count, 4);
    }

    #[test]
    fn invalid_environment_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "0"),
            ("DIST_DIR", "   "),
            ("LOG_LEVEL", "chatty"),
            ("PAGE_CONFIG", "{not json"),
        ]));

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.dist_dir, PathBuf::from(DEFAULT_DIST_DIR));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.page, PageConfig::default());
    }

    #[test]
    fn page_is_injected_at_the_mount_point() {
        let page = inject_page(TEMPLATE, &PageConfig::default(), "<main>hi</main>")
            .expect("template has a mount point");

        assert!(page.starts_with("<html><body><div id=\"app\" data-page-config=\"{&quot;"));
        assert!(page.ends_with("\"><main>hi</main></div></body></html>"));
    }

    #[test]
    fn injected_config_round_trips_through_the_attribute() {
        let config = PageConfig {
            ambient_seed: 77,
            ..PageConfig::default()
        };
        let page = inject_page(TEMPLATE, &config, "").expect("template has a mount point");

        let start = page.find("data-page-config=\"").expect("attribute") + "data-page-config=\"".len();
        let end = start + page[start..].find('"').expect("closing quote");
        let decoded = page[start..end].replace("&quot;", "\"");

        assert_eq!(PageConfig::from_json(&decoded).ok(), Some(config));
    }

    #[test]
    fn template_without_mount_point_is_rejected() {
        let result = inject_page("<html><body></body></html>", &PageConfig::default(), "");
        assert!(matches!(result, Err(TemplateError::MissingMountPoint("app"))));
    }

    #[test]
    fn config_attribute_never_closes_early() {
        let page = inject_page(TEMPLATE, &PageConfig::default(), "").expect("template has a mount point");
        let opening = tag_of_mount_point(&page);

        assert_eq!(opening.matches('"').count(), 4, "{opening}");
        assert!(opening.contains("&quot;visibility_threshold&quot;"));
    }

    fn tag_of_mount_point(page: &str) -> &str {
        let start = page.find("<div id=\"app\"").expect("mount point");
        let end = start + page[start..].find('>').expect("tag end");
        &page[start..=end]
    }

    #[tokio::test]
    async fn prerendered_page_has_every_section_and_no_backdrop_animation() {
        let body = prerender(PageConfig::default()).await;

        for id in ["home", "about", "experience", "projects", "skills", "contact"] {
            assert!(body.contains(&format!("id=\"{id}\"")), "missing section {id}");
        }
        assert!(body.contains("nav-link-active"));
        assert!(!body.contains("ambient-shape"));
        assert!(!body.contains("cursor-follower"));
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn root_and_unknown_paths_serve_the_prerendered_page() {
        let state = AppState {
            page: Arc::from("<p>prerendered</p>"),
        };
        let dist_dir = std::env::temp_dir().join("cyan-portfolio-missing-dist");

        let (status, body) = get_body(router(state.clone(), &dist_dir), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<p>prerendered</p>");

        let (status, body) = get_body(router(state, &dist_dir), "/some/deep/link").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<p>prerendered</p>");
    }
}
