//! The fixed lookups against the movie schema.
//!
//! Each lookup is a `QueryKind` (fixed SQL text with one `$1` placeholder)
//! plus the value bound to it. `PreparedQuery` pairs the two so the database
//! layer never assembles SQL from user input.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ImdbqError;
use crate::Result;

use super::param::Param;

const TITLES_BY_YEAR_SQL: &str = "SELECT titles.primary_title \
     FROM titles \
     WHERE titles.start_year = $1";

const CHARACTERS_BY_TITLE_SQL: &str = "SELECT title_person_character.character_name \
     FROM title_person_character, titles \
     WHERE title_person_character.title_id = titles.title_id \
     AND titles.primary_title LIKE $1";

const TITLES_BY_GENRE_SQL: &str = "SELECT titles.primary_title \
     FROM titles_genres, titles \
     WHERE titles_genres.title_id = titles.title_id \
     AND titles_genres.genre = $1";

const JOBS_BY_NAME_SQL: &str = "SELECT DISTINCT cast_info.job_category \
     FROM persons, cast_info \
     WHERE cast_info.person_id = persons.person_id \
     AND persons.full_name LIKE $1";

/// Which of the fixed lookups to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    /// Primary titles released in a given year (exact match)
    TitlesByYear,
    /// Character names appearing in titles whose name contains a substring
    CharactersByTitle,
    /// Primary titles tagged with a genre (exact match)
    TitlesByGenre,
    /// Distinct job categories of persons whose name contains a substring
    JobsByName,
}

impl QueryKind {
    /// All lookups, in display order.
    pub const ALL: [QueryKind; 4] = [
        QueryKind::TitlesByYear,
        QueryKind::CharactersByTitle,
        QueryKind::TitlesByGenre,
        QueryKind::JobsByName,
    ];

    /// SQL text with a single `$1` placeholder.
    pub fn sql(self) -> &'static str {
        match self {
            QueryKind::TitlesByYear => TITLES_BY_YEAR_SQL,
            QueryKind::CharactersByTitle => CHARACTERS_BY_TITLE_SQL,
            QueryKind::TitlesByGenre => TITLES_BY_GENRE_SQL,
            QueryKind::JobsByName => JOBS_BY_NAME_SQL,
        }
    }

    /// Short human-readable name, used in logs and error messages.
    pub fn label(self) -> &'static str {
        match self {
            QueryKind::TitlesByYear => "titles by year",
            QueryKind::CharactersByTitle => "characters by title",
            QueryKind::TitlesByGenre => "titles by genre",
            QueryKind::JobsByName => "jobs by name",
        }
    }

    /// Parse raw user input into this lookup's parameter.
    pub fn bind(self, input: &str) -> Result<PreparedQuery> {
        match self {
            QueryKind::TitlesByYear => {
                let year = input.trim().parse::<i32>().map_err(|_| ImdbqError::InvalidParameter {
                    query: self.label().to_string(),
                    message: format!("'{}' is not a year", input),
                })?;
                Ok(PreparedQuery::titles_by_year(year))
            }
            QueryKind::CharactersByTitle => Ok(PreparedQuery::characters_by_title(input)),
            QueryKind::TitlesByGenre => Ok(PreparedQuery::titles_by_genre(input)),
            QueryKind::JobsByName => Ok(PreparedQuery::jobs_by_name(input)),
        }
    }
}

impl FromStr for QueryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" | "titles-by-year" => Ok(QueryKind::TitlesByYear),
            "characters" | "characters-by-title" => Ok(QueryKind::CharactersByTitle),
            "genre" | "titles-by-genre" => Ok(QueryKind::TitlesByGenre),
            "jobs" | "jobs-by-name" => Ok(QueryKind::JobsByName),
            _ => Err(format!("Unknown query: {}", s)),
        }
    }
}

/// A lookup with its parameter bound, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedQuery {
    /// Which lookup this is
    pub kind: QueryKind,
    /// Values for `$1..$n`, in order
    pub params: Vec<Param>,
}

impl PreparedQuery {
    /// Titles whose `start_year` equals `year`.
    pub fn titles_by_year(year: i32) -> Self {
        Self {
            kind: QueryKind::TitlesByYear,
            params: vec![Param::Int(year)],
        }
    }

    /// Character names from titles whose primary title contains `title`.
    /// Matching is case-sensitive.
    pub fn characters_by_title(title: &str) -> Self {
        Self {
            kind: QueryKind::CharactersByTitle,
            params: vec![Param::contains(title)],
        }
    }

    /// Titles tagged with exactly `genre`.
    pub fn titles_by_genre(genre: &str) -> Self {
        Self {
            kind: QueryKind::TitlesByGenre,
            params: vec![Param::from(genre)],
        }
    }

    /// Job categories of persons whose full name contains `name`.
    pub fn jobs_by_name(name: &str) -> Self {
        Self {
            kind: QueryKind::JobsByName,
            params: vec![Param::contains(name)],
        }
    }

    /// SQL text to execute.
    pub fn sql(&self) -> &'static str {
        self.kind.sql()
    }

    /// The same query wrapped to return only its row count.
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM ({}) AS counted", self.sql())
    }

    /// The query as fetched for display.
    ///
    /// Each of the `column_count` result columns is cast to text on the
    /// server, so every type arrives in its textual form. Rows are capped by
    /// one extra placeholder, numbered after the query's own parameters.
    pub fn fetch_sql(&self, column_count: usize) -> String {
        let limit = format!("${}", self.params.len() + 1);
        if column_count == 0 {
            return format!("SELECT * FROM ({}) AS fetched LIMIT {}", self.sql(), limit);
        }

        let names: Vec<String> = (1..=column_count).map(|i| format!("c{}", i)).collect();
        let casts: Vec<String> = names.iter().map(|name| format!("{}::text", name)).collect();
        format!(
            "SELECT {} FROM ({}) AS fetched({}) LIMIT {}",
            casts.join(", "),
            self.sql(),
            names.join(", "),
            limit
        )
    }
}
