// Test fixtures for integration testing

use repochat::core::document::{document, Document};
use serde_json::json;

/// `n` lines reading "line 1", "line 2", ...
#[allow(dead_code)] // Used in display tests
pub fn numbered_lines(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("line {i}")).collect()
}

/// `word` repeated `times` times, space separated with a trailing space
#[allow(dead_code)] // Used in core tests
pub fn repeated_text(word: &str, times: usize) -> String {
    format!("{word} ").repeat(times)
}

/// Ranked results with a filename and a short markdown body
#[allow(dead_code)] // Used in display tests
pub fn search_results(n: usize) -> Vec<Document> {
    (1..=n)
        .map(|i| {
            document([
                ("filename", json!(format!("docs/answer-{i}.md"))),
                ("content", json!(format!("## Answer {i}\n\nUse `step {i}` first."))),
            ])
        })
        .collect()
}

/// Small FAQ corpus in the shape produced by the docs app
#[allow(dead_code)] // Used in core tests
pub fn faq_documents() -> Vec<Document> {
    vec![
        document([
            ("filename", json!("module-1/docker-windows.md")),
            ("question", json!("How do I run Docker on Windows?")),
            ("content", json!("Install Docker Desktop and enable the WSL 2 backend.")),
        ]),
        document([
            ("filename", json!("module-1/postgres-port.md")),
            ("question", json!("Port 5432 is already in use")),
            ("content", json!("Stop the local Postgres service or map the container to port 5433.")),
        ]),
        document([
            ("filename", json!("general/late-join.md")),
            ("question", json!("Can I join the course late?")),
            ("content", json!("Yes. Homework deadlines still apply, but you can get a certificate.")),
        ]),
        document([
            ("filename", json!("module-2/terraform-credentials.md")),
            ("question", json!("Terraform cannot find my credentials")),
            ("content", json!("Set GOOGLE_APPLICATION_CREDENTIALS to the service account key path.")),
        ]),
    ]
}
