use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use maze_runner::{parse_maze, render_ascii, run_maze, RunReport, RunnerConfig};
use serde::{Deserialize, Serialize};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Request bodies larger than this are rejected
const JSON_LIMIT: usize = 10_485_760; // 10MB limit

// Request/Response types

#[derive(Debug, Deserialize)]
struct RunRequest {
    maze: String,
    #[serde(default)]
    max_steps: Option<u64>,
    #[serde(default)]
    lenient: bool,
}

#[derive(Debug, Serialize)]
struct RunResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<RunReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rendered: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RenderRequest {
    maze: String,
    #[serde(default)]
    lenient: bool,
}

#[derive(Debug, Serialize)]
struct RenderResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cols: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rendered: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// API Handlers

/// POST /api/run
/// Load a maze and run the runner to completion
async fn run(req: web::Json<RunRequest>, defaults: web::Data<RunnerConfig>) -> impl Responder {
    let mut config = defaults.get_ref().clone();
    if let Some(max_steps) = req.max_steps {
        config.max_steps = max_steps.min(defaults.max_steps);
    }
    if req.lenient {
        config.strict = false;
    }
    // Never sleep inside a request handler.
    config.delay_ms = 0;

    tracing::info!(
        "Received run request: {} bytes, max_steps {}",
        req.maze.len(),
        config.max_steps
    );

    match run_maze(&req.maze, &config) {
        Ok((report, grid)) => {
            tracing::info!("Run {} after {} steps", report.outcome, report.steps);
            let rendered = render_ascii(&grid, Some(report.final_position));
            HttpResponse::Ok().json(RunResponse {
                success: true,
                report: Some(report),
                rendered: Some(rendered),
                error: None,
            })
        }
        Err(e) => {
            tracing::error!("Failed to run maze: {}", e);
            HttpResponse::BadRequest().json(RunResponse {
                success: false,
                report: None,
                rendered: None,
                error: Some(e.to_string()),
            })
        }
    }
}

/// POST /api/render
/// Load a maze and return it as the loader sees it
async fn render(req: web::Json<RenderRequest>) -> impl Responder {
    tracing::info!("Received render request: {} bytes", req.maze.len());

    match parse_maze(&req.maze, !req.lenient) {
        Ok(grid) => HttpResponse::Ok().json(RenderResponse {
            success: true,
            rows: Some(grid.rows()),
            cols: Some(grid.cols()),
            rendered: Some(render_ascii(&grid, None)),
            error: None,
        }),
        Err(e) => {
            tracing::error!("Failed to load maze: {}", e);
            HttpResponse::BadRequest().json(RenderResponse {
                success: false,
                rows: None,
                cols: None,
                rendered: None,
                error: Some(e.to_string()),
            })
        }
    }
}

/// GET /health
/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "maze-runner-api"
    }))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/run", web::post().to(run))
        .route("/api/render", web::post().to(render));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Maze Runner API Server");

    let config = web::Data::new(RunnerConfig::from_env());
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    tracing::info!("Binding to {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::JsonConfig::default().limit(JSON_LIMIT))
            .app_data(config.clone())
            .configure(routes)
    })
    .bind(bind_address)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(RunnerConfig::default()))
                    .configure(routes),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn test_health() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "maze-runner-api");
    }

    #[actix_rt::test]
    async fn test_run_finishes_corridor() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/run")
            .set_json(json!({ "maze": "***\n*G*\n* *\n* *\n* *\n*S*\n***\n" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["report"]["outcome"], "finished");
        assert_eq!(body["report"]["steps"], 2);
        assert_eq!(body["rendered"], "***\n*G*\n*@*\n*1*\n*1*\n*S*\n***\n");
        assert!(body.get("error").is_none());
    }

    #[actix_rt::test]
    async fn test_run_caps_max_steps() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/run")
            .set_json(json!({
                "maze": "*******\n*     *\n* *** *\n*     *\n***S***\n",
                "max_steps": 40,
                "lenient": true
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["report"]["outcome"], "step_limit");
        assert_eq!(body["report"]["steps"], 40);
    }

    #[actix_rt::test]
    async fn test_run_rejects_malformed_maze() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/run")
            .set_json(json!({ "maze": "***\n* *\n***" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "no start door found");
    }

    #[actix_rt::test]
    async fn test_render_pads_rows() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/render")
            .set_json(json!({ "maze": "*G***\n* \n*S*" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["rows"], 3);
        assert_eq!(body["cols"], 5);
        assert_eq!(body["rendered"], "*G***\n* ***\n*S***\n");
    }
}
