use crate::db::document;
use crate::error::ImportError;
use crate::logger;
use crate::models::Question;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub rejected: usize,
}

/// Parse a question bank where each line is `prompt,option...,answer`.
///
/// Returns the valid questions and the number of non-blank lines rejected.
pub fn load_csv(path: &Path) -> std::io::Result<(Vec<Question>, usize)> {
    let content = fs::read_to_string(path)?;
    let mut questions = Vec::new();
    let mut rejected = 0;

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_question_line(line) {
            Some(question) => questions.push(question),
            None => {
                rejected += 1;
                logger::log(&format!(
                    "{}:{}: not a valid question line",
                    path.display(),
                    line_no + 1
                ));
            }
        }
    }

    Ok((questions, rejected))
}

/// Load `path` and add every valid question to `collection`.
pub fn import_csv(
    conn: &Connection,
    path: &Path,
    collection: &str,
) -> Result<ImportReport, ImportError> {
    let (questions, rejected) = load_csv(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    for question in &questions {
        let data = serde_json::to_value(question).map_err(crate::error::StoreError::from)?;
        document::add_document(conn, collection, &data)?;
    }

    Ok(ImportReport {
        imported: questions.len(),
        rejected,
    })
}

pub fn parse_question_line(line: &str) -> Option<Question> {
    let mut fields: Vec<String> = parse_csv_fields(line)
        .into_iter()
        .map(|f| f.trim().to_string())
        .collect();
    if fields.len() < 3 {
        return None;
    }

    let answer = fields.pop()?;
    let prompt = fields.remove(0);
    let options: Vec<String> = fields.into_iter().filter(|o| !o.is_empty()).collect();

    let question = Question {
        prompt,
        options,
        answer,
    };
    (!question.prompt.is_empty() && question.is_valid()).then_some(question)
}

/// Split one CSV line into fields. Quoted fields may contain commas and
/// `""` escapes a literal quote.
pub fn parse_csv_fields(line: &str) -> Vec<String> {
    let mut chars = line.chars().peekable();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes && current.is_empty() => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }
    fields.push(current);

    fields
}
