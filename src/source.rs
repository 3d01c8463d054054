use crate::db::{self, document};
use crate::error::SourceError;
use crate::logger;
use crate::models::Question;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::path::PathBuf;

pub const DEFAULT_COLLECTION: &str = "questions";

/// Where a quiz screen gets its question list from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// One-shot read of the whole question list.
    async fn fetch_questions(&self) -> Result<Vec<Question>, SourceError>;

    /// Human-readable name shown while loading.
    fn describe(&self) -> String;
}

/// Reads every document of one collection in the SQLite document store.
#[derive(Debug, Clone)]
pub struct StoreQuestionSource {
    db_path: PathBuf,
    collection: String,
    shuffle: bool,
}

impl StoreQuestionSource {
    pub fn new(db_path: PathBuf, collection: &str) -> Self {
        Self {
            db_path,
            collection: collection.to_string(),
            shuffle: false,
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn read_blocking(&self) -> Result<Vec<Question>, SourceError> {
        if !self.db_path.exists() {
            return Err(SourceError::unavailable(format!(
                "no question store at {}",
                self.db_path.display()
            )));
        }
        let conn = db::open_store(&self.db_path).map_err(crate::error::StoreError::from)?;
        let documents = document::query_collection(&conn, &self.collection)?;

        let mut questions = Vec::with_capacity(documents.len());
        for doc in documents {
            match serde_json::from_value::<Question>(doc.data) {
                Ok(question) if question.is_valid() => questions.push(question),
                Ok(_) => logger::log(&format!(
                    "Skipping document {}/{}: answer is not one of the options",
                    self.collection, doc.id
                )),
                Err(e) => logger::log(&format!(
                    "Skipping document {}/{}: {}",
                    self.collection, doc.id, e
                )),
            }
        }

        if self.shuffle {
            questions.shuffle(&mut rand::thread_rng());
        }
        Ok(questions)
    }
}

#[async_trait]
impl QuestionSource for StoreQuestionSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, SourceError> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.read_blocking())
            .await
            .map_err(|e| SourceError::unavailable(format!("fetch task failed: {}", e)))?
    }

    fn describe(&self) -> String {
        self.collection.clone()
    }
}

/// A fixed in-memory list, used for tests and demo decks.
#[derive(Debug, Clone, Default)]
pub struct StaticQuestionSource {
    questions: Vec<Question>,
}

impl StaticQuestionSource {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, SourceError> {
        Ok(self.questions.clone())
    }

    fn describe(&self) -> String {
        "built-in".to_string()
    }
}
