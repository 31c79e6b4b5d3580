//! HTTP routes.
//!
//! Each lookup route maps query-string parameters onto one [`DrugQueries`]
//! operation and returns its result as JSON. Invalid input becomes a 400
//! with an `{"error": ...}` body; everything else, including no matches and
//! too-short terms, is an empty success.

use axum::async_trait;
use axum::extract::{FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::routing::get;
use axum::{Json, Router};
use drug_loader::{BrowseQuery, DatasetKind, DatasetStatus, DrugQueries, QueryError};
use drug_types::{ContraindicationSummary, DrugPage, FilterOptions, InteractionMatch};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::error::ApiError;
use crate::server::DrugServer;

/// Builds the router with all lookup routes and permissive CORS.
pub fn router(server: DrugServer) -> Router {
    Router::new()
        .route("/search-drug", get(search_drug))
        .route("/check-interactions", get(check_interactions))
        .route("/api/drug-filters", get(drug_filters))
        .route("/api/drugs-by-type", get(drugs_by_type))
        .route("/api/search-contraindications", get(search_contraindications))
        .route("/api/contraindication-suggestions", get(contraindication_suggestions))
        .route("/api/drug-suggestions-by-contra", get(drug_suggestions_by_contra))
        .route("/api/health", get(health))
        .with_state(server)
        .layer(CorsLayer::permissive())
}

/// Query-string extractor whose rejection is an [`ApiError`], so malformed
/// query strings get the same `{"error": ...}` body as other client errors.
struct ApiQuery<T>(T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(params))
    }
}

#[derive(Debug, Deserialize)]
struct TermParams {
    #[serde(default)]
    term: String,
}

#[derive(Debug, Deserialize)]
struct DrugListParams {
    drugs: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeParams {
    #[serde(rename = "type", default)]
    drug_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowseParams {
    #[serde(rename = "type", default)]
    drug_type: String,
    brand_name: Option<String>,
    generic_name: Option<String>,
    manufacturer: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContraSearchParams {
    #[serde(default)]
    contra: String,
    #[serde(default)]
    drug: String,
}

#[derive(Debug, Deserialize)]
struct ContraSuggestParams {
    #[serde(default)]
    contra: String,
    #[serde(default)]
    term: String,
}

/// Parses the `page` parameter: absent means 1, non-numeric means 0.
fn parse_page(page: Option<&str>) -> i64 {
    match page.map(str::trim) {
        None | Some("") => 1,
        Some(page) => page.parse().unwrap_or(0),
    }
}

/// `GET /search-drug?term=`: drug name autocomplete.
async fn search_drug(
    State(server): State<DrugServer>,
    ApiQuery(params): ApiQuery<TermParams>,
) -> Json<Vec<String>> {
    Json(server.search_drug_names(&params.term))
}

/// `GET /check-interactions?drugs=a,b,c`: pairwise interaction lookup.
async fn check_interactions(
    State(server): State<DrugServer>,
    ApiQuery(params): ApiQuery<DrugListParams>,
) -> Result<Json<Vec<InteractionMatch>>, ApiError> {
    let drugs: Vec<String> = match params.drugs.as_deref() {
        None | Some("") => return Err(QueryError::NoDrugs.into()),
        Some(list) => list.split(',').map(str::to_string).collect(),
    };

    Ok(Json(server.check_interactions(&drugs)?))
}

/// `GET /api/drug-filters?type=`: filter values for a drug type.
async fn drug_filters(
    State(server): State<DrugServer>,
    ApiQuery(params): ApiQuery<TypeParams>,
) -> Json<FilterOptions> {
    Json(server.filter_options(&params.drug_type))
}

/// `GET /api/drugs-by-type?type=&brandName=&genericName=&manufacturer=&page=`
async fn drugs_by_type(
    State(server): State<DrugServer>,
    ApiQuery(params): ApiQuery<BrowseParams>,
) -> Result<Json<DrugPage>, ApiError> {
    let query = BrowseQuery {
        page: parse_page(params.page.as_deref()),
        drug_type: params.drug_type,
        brand_name: params.brand_name,
        generic_name: params.generic_name,
        manufacturer: params.manufacturer,
    };

    Ok(Json(server.browse_by_type(&query)?))
}

/// `GET /api/search-contraindications?contra=&drug=`
async fn search_contraindications(
    State(server): State<DrugServer>,
    ApiQuery(params): ApiQuery<ContraSearchParams>,
) -> Json<Vec<ContraindicationSummary>> {
    Json(server.search_contraindications(&params.contra, &params.drug))
}

/// `GET /api/contraindication-suggestions?term=`
async fn contraindication_suggestions(
    State(server): State<DrugServer>,
    ApiQuery(params): ApiQuery<TermParams>,
) -> Json<Vec<String>> {
    Json(server.suggest_contraindication_terms(&params.term))
}

/// `GET /api/drug-suggestions-by-contra?contra=&term=`
async fn drug_suggestions_by_contra(
    State(server): State<DrugServer>,
    ApiQuery(params): ApiQuery<ContraSuggestParams>,
) -> Json<Vec<String>> {
    Json(server.suggest_drugs_by_contraindication(&params.contra, &params.term))
}

#[derive(Debug, Serialize)]
struct DatasetHealth {
    state: &'static str,
    records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DatasetsHealth {
    interactions: DatasetHealth,
    drug_types: DatasetHealth,
    contraindications: DatasetHealth,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    ready: bool,
    datasets: DatasetsHealth,
}

/// `GET /api/health`: readiness and per-dataset load state.
async fn health(State(server): State<DrugServer>) -> Json<HealthResponse> {
    let report = server.load_report();
    let dataset = |kind: DatasetKind| {
        let status = report.status(kind);
        DatasetHealth {
            state: status.state(),
            records: server.record_count(kind),
            error: match status {
                DatasetStatus::Failed { error } => Some(error.clone()),
                _ => None,
            },
        }
    };

    Json(HealthResponse {
        ready: server.is_ready(),
        datasets: DatasetsHealth {
            interactions: dataset(DatasetKind::Interactions),
            drug_types: dataset(DatasetKind::DrugTypes),
            contraindications: dataset(DatasetKind::Contraindications),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use drug_loader::{
        CatalogIndex, ContraindicationIndex, DatasetIndex, InteractionIndex, ParseStats,
    };
    use drug_types::{ContraindicationRecord, DrugRecord, InteractionRecord};
    use tower::ServiceExt;

    fn loaded_server() -> DrugServer {
        let server = DrugServer::new();

        server.finish_load(Ok((
            InteractionIndex::build(vec![
                InteractionRecord::new("DrugA", "DrugB", "Avoid combination"),
                InteractionRecord::new("Warfarin", "Aspirin", "Increased bleeding risk"),
            ]),
            ParseStats::default(),
        )));

        let catalog = (1..=25)
            .map(|i| DrugRecord::new("analgesic", format!("Relief{i:02}"), "Paracetamol", "Acme"))
            .collect();
        server.finish_load(Ok((CatalogIndex::build(catalog), ParseStats::default())));

        server.finish_load(Ok((
            ContraindicationIndex::build(vec![ContraindicationRecord {
                drug_name: "DrugX".to_string(),
                manufacturer: "Acme".to_string(),
                indications: "Pain".to_string(),
                side_effects: "Nausea".to_string(),
                warnings: "Take with food".to_string(),
                contraindications: "pregnancy, liver disease".to_string(),
            }]),
            ParseStats::default(),
        )));

        server
    }

    async fn get_json(server: DrugServer, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router(server)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_search_drug_returns_prefix_matches() {
        let (status, json) = get_json(loaded_server(), "/search-drug?term=Dru").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!(["druga", "drugb"]));

        let (_, json) = get_json(loaded_server(), "/search-drug").await;
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_check_interactions_returns_pairs() {
        let (status, json) =
            get_json(loaded_server(), "/check-interactions?drugs=drugb,druga").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!([
                { "drugs": ["drugb", "druga"], "description": "Avoid combination" }
            ])
        );
    }

    #[tokio::test]
    async fn test_check_interactions_rejects_bad_input() {
        let (status, json) = get_json(loaded_server(), "/check-interactions").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No drugs provided.");

        let (status, json) = get_json(loaded_server(), "/check-interactions?drugs=warfarin").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Please provide at least two drugs.");
    }

    #[tokio::test]
    async fn test_drug_filters_unknown_type_is_empty() {
        let (status, json) = get_json(loaded_server(), "/api/drug-filters?type=antiviral").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({ "brandNames": [], "genericNames": [], "manufacturers": [] })
        );

        let (_, json) = get_json(loaded_server(), "/api/drug-filters?type=Analgesic").await;
        assert_eq!(json["manufacturers"], serde_json::json!(["Acme"]));
        assert_eq!(json["brandNames"].as_array().unwrap().len(), 25);
    }

    #[tokio::test]
    async fn test_drugs_by_type_paginates() {
        let (status, json) =
            get_json(loaded_server(), "/api/drugs-by-type?type=analgesic&page=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["drugs"].as_array().unwrap().len(), 5);
        assert_eq!(json["totalMatches"], 25);
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["pageSize"], 20);
        assert_eq!(json["drugs"][0]["brandName"], "Relief21");
        assert_eq!(json["drugs"][0]["genericName"], "Paracetamol");
    }

    #[tokio::test]
    async fn test_drugs_by_type_defaults_and_filters() {
        let (_, json) = get_json(
            loaded_server(),
            "/api/drugs-by-type?type=analgesic&brandName=relief07&manufacturer=",
        )
        .await;
        assert_eq!(json["totalMatches"], 1);
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["drugs"][0]["brandName"], "Relief07");

        let (_, json) = get_json(loaded_server(), "/api/drugs-by-type?type=analgesic&page=abc").await;
        assert_eq!(json["drugs"], serde_json::json!([]));
        assert_eq!(json["totalMatches"], 25);
    }

    #[tokio::test]
    async fn test_drugs_by_type_requires_type() {
        let (status, json) = get_json(loaded_server(), "/api/drugs-by-type?page=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No drug type provided.");
    }

    #[tokio::test]
    async fn test_contraindication_routes() {
        let (_, json) = get_json(
            loaded_server(),
            "/api/search-contraindications?contra=preg&drug=drugx",
        )
        .await;
        assert_eq!(
            json,
            serde_json::json!([{
                "drug_name": "DrugX",
                "manufacturer": "Acme",
                "indications": "Pain",
                "side_effects": "Nausea",
                "warnings": "Take with food"
            }])
        );

        let (_, json) = get_json(
            loaded_server(),
            "/api/search-contraindications?contra=pr&drug=drugx",
        )
        .await;
        assert_eq!(json, serde_json::json!([]));

        let (_, json) =
            get_json(loaded_server(), "/api/contraindication-suggestions?term=preg").await;
        assert_eq!(json, serde_json::json!(["pregnancy"]));

        let (_, json) = get_json(
            loaded_server(),
            "/api/drug-suggestions-by-contra?contra=liver&term=dr",
        )
        .await;
        assert_eq!(json, serde_json::json!(["DrugX"]));
    }

    #[tokio::test]
    async fn test_health_reports_readiness() {
        let (status, json) = get_json(DrugServer::new(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ready"], false);
        assert_eq!(json["datasets"]["drugTypes"]["state"], "pending");

        let (_, json) = get_json(loaded_server(), "/api/health").await;
        assert_eq!(json["ready"], true);
        assert_eq!(json["datasets"]["interactions"]["state"], "loaded");
        assert_eq!(json["datasets"]["drugTypes"]["records"], 25);
        assert!(json["datasets"]["contraindications"].get("error").is_none());
    }

    #[tokio::test]
    async fn test_malformed_query_returns_json_error() {
        let (status, json) =
            get_json(loaded_server(), "/check-interactions?drugs=a&drugs=b").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query string"));

        let (status, json) = get_json(loaded_server(), "/search-drug?term=a&term=b").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_requests_before_load_are_served_empty() {
        let (status, json) =
            get_json(DrugServer::new(), "/check-interactions?drugs=drugb,druga").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!([]));
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some(" 3 ")), 3);
        assert_eq!(parse_page(Some("-2")), -2);
        assert_eq!(parse_page(Some("two")), 0);
    }
}
