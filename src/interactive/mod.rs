//! Interactive question loop.
//!
//! An app implements [`InteractiveSearch`]: it only has to know how to
//! build its index. [`run`] then shows a welcome banner, loads the data
//! and keeps asking questions (offering a random sample question as
//! the default) until the user declines or input ends.

use crate::core::config::DisplayMode;
use crate::core::document::Document;
use crate::core::error::Result;
use crate::core::index::{SearchIndex, SearchOptions};
use crate::display::results::{display_results, ResultFields};
use crate::display::terminal::{Console, KeyInput};
use async_trait::async_trait;
use colored::Colorize;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::io::BufRead;

/// Presentation settings of one app
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub title: String,
    pub description: String,
    pub sample_questions: Vec<String>,
    pub fields: ResultFields,
    pub display: DisplayMode,
    pub num_results: usize,
}

impl AppSettings {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            sample_questions: Vec::new(),
            fields: ResultFields::default(),
            display: DisplayMode::default(),
            num_results: 10,
        }
    }

    pub fn with_questions(mut self, questions: Vec<String>) -> Self {
        self.sample_questions = questions;
        self
    }

    pub fn with_fields(mut self, fields: ResultFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results;
        self
    }
}

/// A searchable data source with an interactive front end
#[async_trait]
pub trait InteractiveSearch: Send + Sync {
    fn settings(&self) -> &AppSettings;

    /// Download, parse and index the app's data.
    async fn load_data(&self) -> Result<SearchIndex>;

    fn search(&self, index: &SearchIndex, query: &str) -> Result<Vec<Document>> {
        index.search(query, &SearchOptions::with_limit(self.settings().num_results))
    }

    fn display_results(
        &self,
        results: &[Document],
        query: &str,
        console: &mut dyn Console,
        keys: &mut dyn KeyInput,
    ) -> Result<()> {
        let settings = self.settings();
        display_results(settings.display, results, query, &settings.fields, console, keys)?;
        Ok(())
    }
}

/// Terminal handles the loop talks to
pub struct Session<'a, R: BufRead> {
    pub prompt: R,
    pub console: &'a mut dyn Console,
    pub keys: &'a mut dyn KeyInput,
}

impl<R: BufRead> Session<'_, R> {
    /// Read one line; `None` at end of input.
    fn read_answer(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.prompt.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        self.console.write_line(line.as_ref())?;
        Ok(())
    }
}

/// Pick a sample question, if there are any.
pub fn random_question<'a, G: Rng + ?Sized>(questions: &'a [String], rng: &mut G) -> Option<&'a str> {
    questions.choose(rng).map(String::as_str)
}

/// Run an app: welcome, load, then the question loop.
pub async fn run<A, R, G>(app: &A, session: &mut Session<'_, R>, rng: &mut G) -> Result<()>
where
    A: InteractiveSearch + ?Sized,
    R: BufRead,
    G: Rng + ?Sized,
{
    show_welcome(app.settings(), session)?;

    session.say("Loading data...".blue().bold().to_string())?;
    session.console.flush()?;

    let index = app.load_data().await?;
    session.say(
        format!("Successfully indexed {} documents!", index.doc_count())
            .green()
            .to_string(),
    )?;
    session.say("Ready to answer your questions...".dimmed().to_string())?;

    search_loop(app, &index, session, rng)?;

    session.say("")?;
    session.say("Goodbye!".blue().bold().to_string())?;
    session.console.flush()?;
    Ok(())
}

fn show_welcome<R: BufRead>(settings: &AppSettings, session: &mut Session<'_, R>) -> Result<()> {
    let width = settings
        .title
        .chars()
        .count()
        .max(settings.description.chars().count())
        + 4;
    let border = "─".repeat(width);

    session.say(format!("╭{border}╮").bright_blue().to_string())?;
    session.say(format!("  {}", settings.title.bold()))?;
    session.say("")?;
    session.say(format!("  {}", settings.description.dimmed()))?;
    session.say(format!("╰{border}╯").bright_blue().to_string())
}

/// Ask questions until the user stops or input ends.
///
/// A failed search is reported and the loop goes on.
pub fn search_loop<A, R, G>(app: &A, index: &SearchIndex, session: &mut Session<'_, R>, rng: &mut G) -> Result<()>
where
    A: InteractiveSearch + ?Sized,
    R: BufRead,
    G: Rng + ?Sized,
{
    let settings = app.settings();

    loop {
        session.say("")?;
        session.say("=".repeat(80))?;
        session.say("")?;

        let sample = random_question(&settings.sample_questions, rng).map(str::to_string);
        if let Some(sample) = &sample {
            session.say("Sample question:".dimmed().to_string())?;
            session.say(sample.cyan().to_string())?;
            session.say(
                "Press Enter to use it, or type your own question (Ctrl+C to exit)"
                    .dimmed()
                    .to_string(),
            )?;
        }
        session.say("Question:".bold().to_string())?;
        session.console.flush()?;

        let Some(answer) = session.read_answer()? else {
            break;
        };

        let question = match (answer.is_empty(), &sample) {
            (false, _) => answer,
            (true, Some(sample)) => sample.clone(),
            (true, None) => continue,
        };

        session.say("")?;
        session.say(format!(
            "{} {}",
            "Searching for:".yellow().bold(),
            question.italic()
        ))?;

        let outcome = match app.search(index, &question) {
            Ok(results) => app.display_results(
                &results,
                &question,
                &mut *session.console,
                &mut *session.keys,
            ),
            Err(e) => Err(e),
        };
        if let Err(e) = outcome {
            tracing::warn!("Search failed: {}", e);
            session.say(format!("Error: {e}").red().to_string())?;
        }

        session.say("")?;
        session.say("─".repeat(50))?;
        session.say(format!("{} [Y/n]", "Ask another question?".bold()))?;
        session.console.flush()?;

        match session.read_answer()? {
            None => break,
            Some(answer) if is_no(&answer) => break,
            Some(_) => {}
        }
    }

    Ok(())
}

fn is_no(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "n" | "no")
}
