//! Named scenarios against the ANIPM backend
//!
//! Each scenario composes one or more checks for a logical endpoint and
//! returns whether it passed as a whole. Scenarios never abort the run.

use serde_json::json;

use crate::api::{
    is_canonical_uuid, BatchImageExtraction, ImageExtraction, NewsTicker, StatusCheck,
};
use crate::probe::Check;

use super::config::CheckSuite;
use super::report::RunReport;
use super::runner::Runner;

const HTML: &str = "text/html";
const JSON: &str = "application/json";
const PDF: &str = "application/pdf";
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Article used for single image extraction
pub const NEWS_ARTICLE_URL: &str =
    "https://stiri.md/article/social/tot-mai-multi-pasionati-de-panificatie-descopera-farmecul-painii-cu-maia/";

/// Articles used for batch image extraction
pub const BATCH_ARTICLE_URLS: [&str; 2] = [
    "https://agora.md/2025/02/21/cel-mai-mare-producator-din-industria-de-panificatie-din-moldova-inregistreaza-un-profit-record",
    NEWS_ARTICLE_URL,
];

/// A static document served under `/api/download/`
#[derive(Debug, Clone, Copy)]
pub struct Document {
    pub name: &'static str,
    pub filename: &'static str,
    pub mime: &'static str,
}

/// Documents the backend must serve
pub const DOCUMENTS: [Document; 7] = [
    Document {
        name: "Industria Băuturilor PDF",
        filename: "industria-bauturilor.pdf",
        mime: PDF,
    },
    Document {
        name: "Oferta Lactate PDF",
        filename: "oferta-lactate-ro.pdf",
        mime: PDF,
    },
    Document {
        name: "Oferta Carne și Ouă PDF",
        filename: "oferta-carne-si-oua-ro.pdf",
        mime: PDF,
    },
    Document {
        name: "Minist1 PDF",
        filename: "minist1.pdf",
        mime: PDF,
    },
    Document {
        name: "Minist2 PDF",
        filename: "minist2.pdf",
        mime: PDF,
    },
    Document {
        name: "Minist3 DOCX",
        filename: "minist3.docx",
        mime: DOCX,
    },
    Document {
        name: "Minist4 PDF",
        filename: "minist4.pdf",
        mime: PDF,
    },
];

/// `test_client_HHMMSS` in local time
pub fn client_name_now() -> String {
    format!("test_client_{}", chrono::Local::now().format("%H%M%S"))
}

pub async fn api_index(runner: &mut Runner) -> bool {
    let check = Check::get("API Index", "").expect_content_type(HTML);
    runner.check(&check).await.passed()
}

pub async fn api_demo(runner: &mut Runner) -> bool {
    let check = Check::get("API Demo Page", "demo").expect_content_type(HTML);
    runner.check(&check).await.passed()
}

/// Fetch the news ticker
///
/// The payload is returned whenever it decoded, even if `success` is false.
pub async fn news_ticker(runner: &mut Runner) -> (bool, Option<NewsTicker>) {
    let check = Check::get("News Ticker", "news-ticker").expect_content_type(JSON);
    let (outcome, ticker) = runner.check_json::<NewsTicker>(&check).await;

    let passed = match &ticker {
        Some(ticker) if ticker.success => {
            runner.note(true, format!("News ticker returned {} items", ticker.items.len()));
            outcome.passed()
        }
        Some(_) => {
            runner.note(false, "News ticker reported success=false");
            false
        }
        None => false,
    };

    (passed, ticker)
}

pub async fn fetch_news_image(runner: &mut Runner, url: &str) -> bool {
    let check = Check::post("Fetch News Image", "fetch-news-image", json!({ "url": url }))
        .expect_content_type(JSON);
    let (outcome, extraction) = runner.check_json::<ImageExtraction>(&check).await;

    if let Some(extraction) = &extraction {
        match (&extraction.image_url, &extraction.error) {
            (Some(image_url), _) => runner.note(true, format!("Image: {}", image_url)),
            (None, Some(error)) => runner.note(false, format!("No image extracted: {}", error)),
            (None, None) => runner.note(false, "No image extracted"),
        }
    }

    outcome.passed()
}

pub async fn fetch_multiple_news_images(runner: &mut Runner, urls: &[&str]) -> bool {
    let check = Check::post(
        "Fetch Multiple News Images",
        "fetch-multiple-news-images",
        json!({ "urls": urls }),
    )
    .expect_content_type(JSON);
    let (outcome, batch) = runner.check_json::<BatchImageExtraction>(&check).await;

    if let Some(batch) = &batch {
        let extracted = batch.results.iter().filter(|r| r.success).count();
        runner.note(
            extracted == batch.results.len(),
            format!("Extracted {}/{} images", extracted, batch.results.len()),
        );
    }

    outcome.passed()
}

/// Create, list and retrieve status checks
///
/// Retrieval needs the identifier returned at creation and is skipped
/// without one (an empty id counts as none). Listing always runs.
pub async fn status_endpoints(runner: &mut Runner, client_name: &str) -> bool {
    let create = Check::post(
        "Create Status Check",
        "status",
        json!({ "client_name": client_name }),
    )
    .expect_content_type(JSON);
    let (outcome, created) = runner.check_json::<StatusCheck>(&create).await;
    let mut passed = outcome.passed();

    let created_id = created
        .map(|record| {
            if is_canonical_uuid(&record.id) {
                runner.note(true, format!("Valid UUID: {}", record.id));
            } else {
                runner.note(false, format!("Invalid UUID format: {}", record.id));
                passed = false;
            }
            runner.note(true, format!("Timestamp: {}", record.timestamp));
            record.id
        })
        .filter(|id| !id.is_empty());

    let list = Check::get("Get All Status Checks", "status").expect_content_type(JSON);
    let (_, records) = runner.check_json::<Vec<StatusCheck>>(&list).await;
    match records {
        Some(records) => runner.note(true, format!("Retrieved {} status checks", records.len())),
        None => passed = false,
    }

    let Some(id) = created_id else {
        return false;
    };

    let get = Check::get(format!("Get Status Check {}", id), format!("status/{}", id))
        .expect_content_type(JSON);
    let (_, fetched) = runner.check_json::<StatusCheck>(&get).await;
    match fetched {
        Some(record) if record.id == id && record.client_name == client_name => {
            runner.note(true, "Retrieved specific status check with correct data");
        }
        Some(record) => {
            runner.note(
                false,
                format!(
                    "Status check data mismatch: got id '{}', client_name '{}'",
                    record.id, record.client_name
                ),
            );
            passed = false;
        }
        None => passed = false,
    }

    passed
}

pub async fn document_downloads(runner: &mut Runner) -> bool {
    let mut all_passed = true;
    for doc in &DOCUMENTS {
        let check = Check::get(doc.name, format!("download/{}", doc.filename))
            .expect_content_type(doc.mime)
            .expect_non_empty();
        if !runner.check(&check).await.passed() {
            all_passed = false;
        }
    }
    all_passed
}

/// Run the checks of a user-supplied suite in declaration order
pub async fn custom_suite(runner: &mut Runner, suite: &CheckSuite) -> bool {
    let mut all_passed = true;
    for spec in &suite.checks {
        if !runner.check(&spec.to_check()).await.passed() {
            all_passed = false;
        }
    }
    all_passed
}

/// Run every scenario once, in a fixed order
///
/// No scenario is skipped because an earlier one failed.
pub async fn run_all(mut runner: Runner, suite: Option<&CheckSuite>) -> RunReport {
    use colored::Colorize;

    println!("{}", "Starting ANIPM Backend API Tests".blue().bold());
    println!("==================================");
    println!("Backend URL: {}", runner.client().base_url());
    println!("==================================");

    let passed = api_index(&mut runner).await;
    runner.verdict("API index", passed);

    let passed = api_demo(&mut runner).await;
    runner.verdict("API demo page", passed);

    let client_name = client_name_now();
    let passed = status_endpoints(&mut runner, &client_name).await;
    runner.verdict("Database connectivity and operations", passed);

    let (passed, ticker) = news_ticker(&mut runner).await;
    runner.verdict("News ticker API", passed);

    let single = fetch_news_image(&mut runner, NEWS_ARTICLE_URL).await;
    let multiple = fetch_multiple_news_images(&mut runner, &BATCH_ARTICLE_URLS).await;
    runner.verdict("Image extraction APIs", single && multiple);

    let passed = document_downloads(&mut runner).await;
    runner.verdict("Document download endpoints", passed);

    if let Some(suite) = suite {
        if let Some(description) = &suite.description {
            println!("\n{}", description.dimmed());
        }
        let passed = custom_suite(&mut runner, suite).await;
        runner.verdict(&suite.name, passed);
    }

    tracing::info!(
        tests_run = runner.summary().tests_run,
        tests_passed = runner.summary().tests_passed,
        "Run complete"
    );

    let report = runner.finish(ticker);
    report.print_summary();
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_name_shape() {
        let name = client_name_now();
        let suffix = name.strip_prefix("test_client_").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_documents_list() {
        assert_eq!(DOCUMENTS.len(), 7);
        let docx: Vec<_> = DOCUMENTS.iter().filter(|d| d.mime == DOCX).collect();
        assert_eq!(docx.len(), 1);
        assert_eq!(docx[0].filename, "minist3.docx");
    }
}
