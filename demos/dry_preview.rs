//! Preview download requests with `download_dry` before committing to
//! network and disk work.
//!
//! Walks through the decision scenarios the dry run is for: confirming
//! auto-extracted filenames, spotting URLs that need an explicit filename,
//! and catching path separators early.

use parallel_download::{DownloadRequest, Downloader, PreviewOutcome};

fn print_previews(title: &str, previews: &[PreviewOutcome]) {
    println!("\n{title}");
    println!("{}", "-".repeat(100));
    println!("{:<52} {:<24} {:<8} {}", "URL", "Filename", "Status", "Reason");
    for preview in previews {
        let (status, reason) = if preview.is_valid() {
            ("VALID", "-")
        } else {
            ("INVALID", preview.reason().unwrap_or("-"))
        };
        println!(
            "{:<52} {:<24} {:<8} {}",
            preview.url(),
            preview.filename(),
            status,
            reason
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let downloader = Downloader::new("./downloads")?;

    // Scenario 1: the URL clearly names a file, no explicit filename needed.
    let clear_urls = [
        "https://example.com/documents/report.pdf",
        "https://example.com/images/logo.png",
        "https://cdn.example.com/data/dataset.csv",
        "https://example.com/download/file.zip?token=abc123",
        "https://example.com/files/my%20doc.pdf",
    ];
    let auto_requests: Vec<DownloadRequest> = clear_urls
        .iter()
        .map(|url| DownloadRequest::from_url(*url))
        .collect::<Result<_, _>>()?;
    print_previews(
        "SCENARIO 1: auto extraction - filename derived from the URL path",
        &downloader.download_dry(&auto_requests),
    );

    // Scenario 2: ambiguous URLs. Construction without a filename fails;
    // the failure folds into an Invalid preview instead of escaping.
    let ambiguous_urls = [
        "https://example.com",
        "https://example.com/files/",
        "https://example.com?session=abc123",
    ];
    let previews: Vec<PreviewOutcome> = ambiguous_urls
        .iter()
        .map(|url| match DownloadRequest::from_url(*url) {
            Ok(request) => downloader.download_dry(std::slice::from_ref(&request)).remove(0),
            Err(error) => PreviewOutcome::invalid_construction(*url, &error),
        })
        .collect();
    print_previews(
        "SCENARIO 2: must specify - the URL alone is not enough",
        &previews,
    );

    let fixed: Vec<DownloadRequest> = vec![
        DownloadRequest::with_filename("https://example.com", "index.html"),
        DownloadRequest::with_filename("https://example.com/files/", "archive.zip"),
        DownloadRequest::with_filename("https://example.com?session=abc123", "export.json"),
    ];
    print_previews(
        "SCENARIO 2 (fixed): explicit filenames supplied",
        &downloader.download_dry(&fixed),
    );

    // Scenario 3: path separators are caught before any transfer starts.
    let separator_requests = vec![
        DownloadRequest::with_filename("https://example.com/file.zip", "docs/file.zip"),
        DownloadRequest::with_filename("https://example.com/data.csv", "data\\backup\\file.csv"),
        DownloadRequest::with_filename("https://example.com/data.csv", "data_backup.csv"),
    ];
    print_previews(
        "SCENARIO 3: validation - separators are invalid, plain names pass",
        &downloader.download_dry(&separator_requests),
    );

    // Scenario 4: everything that is not a separator is a legal filename.
    let special_names = [
        "report_2024-01-15.pdf",
        "file(v2.1).zip",
        "data@backup.csv",
        "archive~old.tar.gz",
        "日本語ファイル.txt",
    ];
    let special_requests: Vec<DownloadRequest> = special_names
        .iter()
        .map(|name| DownloadRequest::with_filename("https://example.com/download", *name))
        .collect();
    print_previews(
        "SCENARIO 4: special characters in filenames",
        &downloader.download_dry(&special_requests),
    );

    // Scenario 5: mixed batch, summarised and exported as JSON.
    let mixed = vec![
        DownloadRequest::with_filename("https://example.com/doc1.pdf", "document1.pdf"),
        DownloadRequest::with_filename("https://example.com/data", "data/file.csv"),
        DownloadRequest::with_filename("https://example.com/img.png", "image.png"),
    ];
    let previews = downloader.download_dry(&mixed);
    print_previews("SCENARIO 5: batch validation", &previews);

    let valid = previews.iter().filter(|p| p.is_valid()).count();
    println!(
        "\nSummary: {valid} valid, {} invalid",
        previews.len() - valid
    );
    println!("As JSON:\n{}", serde_json::to_string_pretty(&previews)?);

    Ok(())
}
