use actix_web::error::InternalError;
use actix_web::{web, App, HttpResponse, HttpResponseBuilder, HttpServer, Result as ActixResult};
use actix_cors::Cors;
use nutrisim_core::{AllergenFilter, FoodRecord};
use nutrisim_similarity::Recommender;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

pub const MISSING_FOOD_NAME: &str = "Missing 'food_name' in request.";

#[derive(Deserialize)]
struct RecommendRequest {
    food_name: Option<String>,
    #[serde(default)]
    allergens: Option<Vec<String>>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        recommender: Arc<Recommender>,
        host: String,
        port: u16,
    ) -> std::io::Result<()> {
        let server = HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(recommender.clone()))
                .configure(configure)
        })
        .bind((host.as_str(), port))?;

        info!("HTTP API listening on http://{}:{}/recommend", host, port);
        server.run().await
    }
}

/// Registers the JSON error handler and all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let body = serde_json::json!({ "error": err.to_string() });
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(json_config)
        .route("/recommend", web::post().to(recommend))
        .route("/health", web::get().to(health));
}

fn error_response(mut builder: HttpResponseBuilder, message: &str) -> HttpResponse {
    builder.json(serde_json::json!({ "error": message }))
}

async fn recommend(
    recommender: web::Data<Arc<Recommender>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();

    let food_name = match req.food_name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Ok(error_response(HttpResponse::BadRequest(), MISSING_FOOD_NAME)),
    };
    let allergens = AllergenFilter::new(req.allergens.unwrap_or_default());

    match recommender.recommend(food_name, &allergens) {
        Ok(Some(ranked)) => {
            info!(
                "recommend '{}' excluding {:?}: {} results",
                food_name,
                allergens.tokens(),
                ranked.len()
            );
            let records: Vec<&FoodRecord> = ranked.iter().map(|r| r.record).collect();
            Ok(HttpResponse::Ok().json(records))
        }
        Ok(None) => {
            info!("recommend '{}': food not found", food_name);
            Ok(error_response(
                HttpResponse::NotFound(),
                &format!("Food '{}' not found.", food_name),
            ))
        }
        Err(e) => {
            error!("recommend '{}' failed: {}", food_name, e);
            Ok(error_response(HttpResponse::InternalServerError(), &e.to_string()))
        }
    }
}

async fn health(recommender: web::Data<Arc<Recommender>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "foods": recommender.dataset().len(),
    })))
}
