use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quiz_challenge::config::default_config_path;
use quiz_challenge::db::{self, document::{self, CollectionSummary}};
use quiz_challenge::models::DEFAULT_COUNTDOWN_SECS;
use quiz_challenge::{
    draw_menu, draw_quiz_screen, handle_quiz_input, import_csv, logger, spawn_fetch, AppState,
    ExitSignal, FetchCompleted, QuestionSource, QuizConfig, QuizController, QuizInput,
    StoreQuestionSource, TimerPolicy,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "quiz-challenge", about = "Timed multiple-choice quizzes in the terminal", version)]
struct Cli {
    /// Config file (default: ~/.local/share/quiz-challenge/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Question store database
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Collection to preselect in the menu
    #[arg(long)]
    collection: Option<String>,

    /// Per-question countdown in seconds instead of an elapsed-time display
    #[arg(long, num_args = 0..=1, default_missing_value = "60")]
    countdown: Option<u64>,

    /// Shuffle the question order
    #[arg(long)]
    shuffle: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Import a CSV question bank (prompt,option...,answer per line)
    Import {
        file: PathBuf,
        /// Target collection (defaults to the configured one)
        #[arg(long)]
        collection: Option<String>,
    },

    /// List question collections
    Collections,
}

impl Cli {
    fn apply_to(&self, config: &mut QuizConfig) {
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(collection) = &self.collection {
            config.collection = collection.clone();
        }
        if let Some(seconds) = self.countdown {
            config.timer = TimerPolicy::Countdown {
                seconds: if seconds == 0 { DEFAULT_COUNTDOWN_SECS } else { seconds },
            };
        }
        if self.shuffle {
            config.shuffle = true;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = QuizConfig::load(&config_path)?;
    cli.apply_to(&mut config);

    if let Some(log_path) = &config.log_path {
        logger::init(log_path);
    }

    match cli.command {
        Some(Command::Import { file, collection }) => {
            let collection = collection.unwrap_or_else(|| config.collection.clone());
            let conn = db::open_store(&config.db_path)?;
            let report = import_csv(&conn, &file, &collection)?;
            println!(
                "Imported {} questions into '{}' ({} lines rejected)",
                report.imported, collection, report.rejected
            );
            Ok(())
        }
        Some(Command::Collections) => {
            let conn = db::open_store(&config.db_path)?;
            for collection in document::list_collections(&conn)? {
                println!("{}\t{}", collection.name, collection.documents);
            }
            Ok(())
        }
        None => run_tui(config),
    }
}

struct ActiveQuiz {
    controller: QuizController<ExitSignal>,
    source: Arc<dyn QuestionSource>,
    title: String,
}

struct App {
    config: QuizConfig,
    app_state: AppState,
    collections: Vec<CollectionSummary>,
    selected_index: usize,
    quiz: Option<ActiveQuiz>,
}

impl App {
    fn refresh_collections(&mut self) {
        let listed = db::open_store(&self.config.db_path)
            .map_err(quiz_challenge::StoreError::from)
            .and_then(|conn| document::list_collections(&conn));
        match listed {
            Ok(collections) => self.collections = collections,
            Err(e) => logger::log(&format!("Failed to list collections: {}", e)),
        }
        self.selected_index = self
            .collections
            .iter()
            .position(|c| c.name == self.config.collection)
            .unwrap_or(0);
    }

    fn selected_collection(&self) -> String {
        self.collections
            .get(self.selected_index)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| self.config.collection.clone())
    }
}

fn run_tui(config: QuizConfig) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App {
        config,
        app_state: AppState::Menu,
        collections: Vec::new(),
        selected_index: 0,
        quiz: None,
    };
    app.refresh_collections();

    let result = event_loop(&mut terminal, &mut app, runtime.handle());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runtime: &tokio::runtime::Handle,
) -> Result<(), Box<dyn Error>> {
    let (fetch_tx, fetch_rx) = crossbeam_channel::unbounded::<FetchCompleted>();

    loop {
        terminal.draw(|f| match app.app_state {
            AppState::Menu => draw_menu(f, &app.collections, app.selected_index, app.config.timer),
            AppState::Quiz => {
                if let Some(quiz) = &app.quiz {
                    draw_quiz_screen(f, &quiz.controller, &quiz.title);
                }
            }
        })?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            match app.app_state {
                AppState::Menu => match key.code {
                    KeyCode::Up => {
                        app.selected_index = app.selected_index.saturating_sub(1);
                    }
                    KeyCode::Down => {
                        if app.selected_index < app.collections.len().saturating_sub(1) {
                            app.selected_index += 1;
                        }
                    }
                    KeyCode::Enter => {
                        let collection = app.selected_collection();
                        let source: Arc<dyn QuestionSource> = Arc::new(
                            StoreQuestionSource::new(app.config.db_path.clone(), &collection)
                                .with_shuffle(app.config.shuffle),
                        );
                        let mut controller =
                            QuizController::new(app.config.timer, ExitSignal::default());
                        let ticket = controller.begin_fetch();
                        spawn_fetch(runtime, source.clone(), ticket, fetch_tx.clone());
                        app.quiz = Some(ActiveQuiz {
                            controller,
                            source,
                            title: collection,
                        });
                        app.app_state = AppState::Quiz;
                    }
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    _ => {}
                },
                AppState::Quiz => {
                    if let Some(quiz) = &mut app.quiz
                        && handle_quiz_input(&mut quiz.controller, key) == QuizInput::Retry
                    {
                        let ticket = quiz.controller.begin_fetch();
                        spawn_fetch(runtime, quiz.source.clone(), ticket, fetch_tx.clone());
                    }
                }
            }
        }

        while let Ok(completed) = fetch_rx.try_recv() {
            match &mut app.quiz {
                Some(quiz) => {
                    quiz.controller
                        .apply_fetch(completed.ticket, completed.result);
                }
                None => logger::log("Question fetch finished after leaving the quiz"),
            }
        }

        let exited = match &mut app.quiz {
            Some(quiz) => {
                quiz.controller.pump_ticks();
                quiz.controller.navigator().exited()
            }
            None => false,
        };
        if exited {
            app.quiz = None;
            app.app_state = AppState::Menu;
            app.refresh_collections();
        }
    }

    if let Some(quiz) = &mut app.quiz {
        quiz.controller.teardown();
    }
    Ok(())
}
