// src/handlers/extract.rs
// DOCUMENTATION: HTTP handler for place extraction
// PURPOSE: Parse the request, run the pipeline, return the workbook download

use crate::config::Config;
use crate::errors::ExtractorError;
use crate::models::ExtractionRequest;
use crate::services::{ExtractionResult, ExtractionService, GoogleMapsClient, XLSX_CONTENT_TYPE};
use actix_web::error::JsonPayloadError;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};

/// Response header carrying the number of exported records
pub const TOTAL_RECORDS_HEADER: &str = "X-Total-Records";

/// Response header carrying the generated filename
pub const FILENAME_HEADER: &str = "X-Filename";

/// POST /api/extract
/// Search Google Maps and download the enriched results as .xlsx
pub async fn extract_places(
    config: web::Data<Config>,
    req: web::Json<ExtractionRequest>,
) -> Result<HttpResponse, ExtractorError> {
    // No upstream call may be made without a key
    if !config.has_api_key() {
        log::error!("Extraction refused: GOOGLE_MAPS_API_KEY is not configured");
        return Err(ExtractorError::Configuration(
            "Google Maps API key is not configured".to_string(),
        ));
    }

    let params = req.into_inner().into_params(config.default_max_results)?;

    let client = GoogleMapsClient::new(
        config.google_maps_api_key.clone(),
        &config.maps_base_url,
        config.http_timeout(),
    )?;

    let result = ExtractionService::run(&client, &params, config.page_delay()).await?;

    Ok(download_response(result))
}

/// Build the attachment response with out-of-band metadata headers
fn download_response(result: ExtractionResult) -> HttpResponse {
    let total = result.total_records();

    HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", result.filename),
        ))
        .insert_header((TOTAL_RECORDS_HEADER, total.to_string()))
        .insert_header((FILENAME_HEADER, result.filename.clone()))
        .insert_header((
            header::ACCESS_CONTROL_EXPOSE_HEADERS,
            format!("{}, {}, Content-Disposition", TOTAL_RECORDS_HEADER, FILENAME_HEADER),
        ))
        .body(result.workbook)
}

/// Report malformed JSON bodies in the same `{ "error": ... }` shape
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ExtractorError::Validation(format!("Invalid request body: {}", err)).into()
}

/// Configuration for extraction routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(
                web::JsonConfig::default()
                    .limit(16 * 1024)
                    .error_handler(json_error_handler),
            )
            .route("/extract", web::post().to(extract_places)),
    );
}
