pub mod config;
pub mod controller;
pub mod csv;
pub mod db;
pub mod error;
pub mod fetch;
pub mod input;
pub mod logger;
pub mod models;
pub mod session;
pub mod source;
pub mod timer;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use config::QuizConfig;
pub use controller::{ExitSignal, FetchTicket, Navigator, Phase, QuizController};
pub use csv::{import_csv, load_csv, ImportReport};
pub use error::{ConfigError, ImportError, SourceError, StoreError};
pub use fetch::{spawn_fetch, FetchCompleted};
pub use input::{handle_quiz_input, QuizInput};
pub use models::{AppState, Question, SessionState, TimerPolicy};
pub use session::QuizSession;
pub use source::{QuestionSource, StaticQuestionSource, StoreQuestionSource};
pub use ui::{draw_menu, draw_quiz_screen};
