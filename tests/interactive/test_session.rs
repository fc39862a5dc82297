// Question sessions from welcome banner to goodbye

use crate::common::{MemoryConsole, ScriptedKeys};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use repochat::core::config::DisplayMode;
use repochat::core::document::document;
use repochat::interactive::{self, AppSettings, InteractiveSearch, Session};
use repochat::{ChatError, Result, SearchIndex};
use serde_json::json;
use std::io::Cursor;

struct StaticApp {
    settings: AppSettings,
    fail_load: bool,
}

impl StaticApp {
    fn new(questions: &[&str]) -> Self {
        Self {
            settings: AppSettings::new("Test Search", "Searches a fixed list")
                .with_questions(questions.iter().map(|s| s.to_string()).collect())
                .with_display(DisplayMode::Pager),
            fail_load: false,
        }
    }
}

#[async_trait]
impl InteractiveSearch for StaticApp {
    fn settings(&self) -> &AppSettings {
        &self.settings
    }

    async fn load_data(&self) -> Result<SearchIndex> {
        if self.fail_load {
            return Err(ChatError::GitHubError("404 Not Found".to_string()));
        }
        let mut index = SearchIndex::new(&["content".to_string(), "filename".to_string()], &[])?;
        index.fit(vec![
            document([("filename", json!("docker.md")), ("content", json!("Run docker compose up"))]),
            document([("filename", json!("sql.md")), ("content", json!("Optimize SQL queries"))]),
        ])?;
        Ok(index)
    }
}

async fn run_script(app: &StaticApp, input: &str) -> (Result<()>, MemoryConsole) {
    let mut console = MemoryConsole::new(24);
    let mut keys = ScriptedKeys::unavailable();
    let mut rng = StdRng::seed_from_u64(7);
    let mut session = Session {
        prompt: Cursor::new(input.to_string()),
        console: &mut console,
        keys: &mut keys,
    };
    let result = interactive::run(app, &mut session, &mut rng).await;
    (result, console)
}

#[tokio::test]
async fn test_typed_question_then_quit() {
    let app = StaticApp::new(&["anything"]);
    let (result, console) = run_script(&app, "docker\nn\n").await;

    result.unwrap();
    assert!(console.printed("Test Search"));
    assert!(console.printed("Successfully indexed 2 documents!"));
    assert!(console.printed("docker"));
    assert!(console.printed("Found 1 results for: docker"));
    assert!(console.printed("Goodbye!"));
}

#[tokio::test]
async fn test_empty_answer_uses_sample_question() {
    let app = StaticApp::new(&["SQL queries"]);
    let (result, console) = run_script(&app, "\nno\n").await;

    result.unwrap();
    assert!(console.printed("Found 1 results for: SQL queries"));
    assert!(console.printed("sql.md"));
}

#[tokio::test]
async fn test_end_of_input_ends_loop() {
    let app = StaticApp::new(&["docker"]);
    let (result, console) = run_script(&app, "").await;

    result.unwrap();
    assert!(!console.printed("Searching for:"));
    assert!(console.printed("Goodbye!"));
}

#[tokio::test]
async fn test_multiple_questions() {
    let app = StaticApp::new(&[]);
    let (result, console) = run_script(&app, "docker\ny\nkubernetes\nn\n").await;

    result.unwrap();
    assert!(console.printed("Found 1 results for: docker"));
    assert!(console.printed("No results found!"));
}

#[tokio::test]
async fn test_load_failure_is_returned() {
    let mut app = StaticApp::new(&[]);
    app.fail_load = true;
    let (result, console) = run_script(&app, "docker\n").await;

    assert!(result.unwrap_err().is_remote());
    assert!(!console.printed("Question:"));
}
