// src/bin/extract.rs
// Command-line client: sends a query to a running places-extractor and saves the workbook.
use clap::Parser;
use dotenv::dotenv;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colours ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

// --- Data structures ---

#[derive(Parser, Debug)]
#[command(name = "extract")]
#[command(about = "Export Google Maps search results to an .xlsx workbook")]
struct Cli {
    /// Search text, e.g. "restaurants in New York"
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Location used to bias results
    #[arg(long)]
    location: Option<String>,

    /// Bias radius in meters
    #[arg(long)]
    radius: Option<f64>,

    /// Maximum number of places (1-120)
    #[arg(long)]
    max: Option<i64>,

    /// Output path (defaults to the server-generated filename)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Base URL of the running service
    #[arg(long, env = "EXTRACTOR_URL", default_value = "http://localhost:8080")]
    url: String,
}

impl Cli {
    fn payload(&self) -> ExtractPayload {
        ExtractPayload {
            query: self.query.join(" "),
            location_bias: self.location.clone(),
            radius: self.radius,
            max_results: self.max,
        }
    }
}

#[derive(Serialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ExtractPayload {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_bias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
struct Download {
    bytes: Vec<u8>,
    filename: String,
    total_records: usize,
}

// --- Client logic ---

struct ExtractorClient {
    base_url: String,
    client: Client,
}

impl ExtractorClient {
    fn new(base_url: String) -> Result<Self, String> {
        // Extraction waits between result pages, so allow for several minutes
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { base_url, client })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn extract(&self, payload: &ExtractPayload) -> Result<Download, String> {
        let url = format!("{}/api/extract", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(format!("HTTP {} - {}", status, message));
        }

        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let filename = header("X-Filename").unwrap_or_else(|| "places.xlsx".to_string());
        let total_records = header("X-Total-Records")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read workbook: {}", e))?
            .to_vec();

        Ok(Download {
            bytes,
            filename,
            total_records,
        })
    }
}

fn print_header(payload: &ExtractPayload) {
    println!("{}╔══════════════════════════════════════════════════════════════╗{}", CYAN, RESET);
    println!("{}║   🗺️  Places Extractor                                        ║{}", CYAN, RESET);
    println!("{}╚══════════════════════════════════════════════════════════════╝{}", CYAN, RESET);
    println!("\n{}🔎 Query:{} {}", BOLD, RESET, payload.query);
    if let Some(location) = &payload.location_bias {
        println!("{}📍 Near:{} {}", BOLD, RESET, location);
    }
    if let Some(max) = payload.max_results {
        println!("{}📊 Max results:{} {}", BOLD, RESET, max);
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let payload = cli.payload();

    let client = match ExtractorClient::new(cli.url.trim_end_matches('/').to_string()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}❌ {}{}", RED, e, RESET);
            process::exit(1);
        }
    };

    println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
    if !client.check_service_health().await {
        println!("{}❌ Service unavailable at {}.{}", RED, client.base_url, RESET);
        println!("{}Please ensure places-extractor is running (cargo run){}", YELLOW, RESET);
        process::exit(1);
    }
    println!("{}✅ Service available{}\n", GREEN, RESET);

    print_header(&payload);
    println!("\n{}🚀 Extracting (this can take a while for large result sets)...{}", BOLD, RESET);

    let start_time = Instant::now();
    let download = match client.extract(&payload).await {
        Ok(download) => download,
        Err(e) => {
            println!("{}❌ Extraction failed: {}{}", RED, e, RESET);
            process::exit(1);
        }
    };
    let duration = start_time.elapsed().as_secs_f64();

    let out = cli.out.unwrap_or_else(|| PathBuf::from(&download.filename));
    if let Err(e) = std::fs::write(&out, &download.bytes) {
        println!("{}❌ Could not write {}: {}{}", RED, out.display(), e, RESET);
        process::exit(1);
    }

    println!(
        "{}✅ {} places saved to {} ({:.1}s){}",
        GREEN,
        download.total_records,
        out.display(),
        duration,
        RESET
    );
    if download.total_records == 0 {
        println!("{}⚠️  No places matched this query.{}", YELLOW, RESET);
    }
}
