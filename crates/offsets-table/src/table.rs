//! An in-memory table of text rows searchable with match expressions.

use std::{collections::HashSet, sync::Arc};

use offsets_core::PhraseInstance;
use offsets_query::{QueryPhrase, parse};
use tracing::debug;

use crate::{Analyzer, RowMatch, TableError};

/// A query phrase prepared for matching against analyzed columns.
#[derive(Debug)]
struct CompiledPhrase {
    /// Normalized terms, one per token.
    terms: Vec<String>,
    /// Column the phrase is restricted to, if any.
    column: Option<usize>,
    /// Negated phrases decide row selection but never report instances.
    negated: bool,
}

/// Terms present at each token position of one column value.
struct ColumnTerms {
    /// Primary term and co-located synonyms, indexed by position.
    positions: Vec<Vec<String>>,
}

impl ColumnTerms {
    /// Analyzes `text` into per-position term sets.
    fn new(analyzer: &Analyzer, text: &str) -> Self {
        let mut positions: Vec<Vec<String>> = Vec::new();
        for token in analyzer.analyze(text) {
            if token.colocated {
                if let Some(last) = positions.last_mut() {
                    last.push(token.text);
                }
            } else {
                positions.push(vec![token.text]);
            }
        }
        Self { positions }
    }

    /// Returns every position where `terms` occurs consecutively.
    fn phrase_starts<'a>(&'a self, terms: &'a [String]) -> impl Iterator<Item = usize> + 'a {
        let window = terms.len();
        let last_start = if window == 0 {
            0
        } else {
            (self.positions.len() + 1).saturating_sub(window)
        };
        (0..last_start).filter(move |&start| {
            terms
                .iter()
                .enumerate()
                .all(|(i, term)| self.positions[start + i].contains(term))
        })
    }
}

/// A table with named text columns.
pub struct Table {
    /// Column names, in column index order.
    columns: Vec<String>,
    /// Row values, one per column.
    rows: Vec<Vec<String>>,
    /// Analyzer for row text and query phrases.
    analyzer: Analyzer,
}

impl Table {
    /// Creates an empty table with the given column names.
    pub fn new(columns: Vec<String>, analyzer: Analyzer) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
            analyzer,
        })
    }

    /// Returns the column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the index of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the table's analyzer.
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Appends a row and returns its id.
    pub fn insert(&mut self, values: Vec<String>) -> Result<usize, TableError> {
        if values.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.rows.push(values);
        Ok(self.rows.len() - 1)
    }

    /// Returns the values of row `id`.
    pub fn row(&self, id: usize) -> Option<&[String]> {
        self.rows.get(id).map(Vec::as_slice)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns every row matching `query`, in row order.
    ///
    /// An empty query matches nothing.
    pub fn search(&self, query: &str) -> Result<Vec<RowMatch<'_>>, TableError> {
        let Some(expr) = parse(query)? else {
            return Ok(Vec::new());
        };
        let phrases = expr
            .phrases()
            .iter()
            .map(|phrase| self.compile(phrase))
            .collect::<Result<Vec<_>, _>>()?;
        let phrase_lens: Arc<[usize]> = phrases.iter().map(|p| p.terms.len()).collect();

        let mut matches = Vec::new();
        for (row_id, values) in self.rows.iter().enumerate() {
            let columns: Vec<ColumnTerms> = values
                .iter()
                .map(|text| ColumnTerms::new(&self.analyzer, text))
                .collect();

            let mut present = vec![false; phrases.len()];
            let mut instances = Vec::new();
            for (id, phrase) in phrases.iter().enumerate() {
                if phrase.terms.is_empty() {
                    continue;
                }
                for (column, terms) in columns.iter().enumerate() {
                    if phrase.column.is_some_and(|c| c != column) {
                        continue;
                    }
                    for start in terms.phrase_starts(&phrase.terms) {
                        present[id] = true;
                        if phrase.negated {
                            break;
                        }
                        instances.push(PhraseInstance::new(id, column, start));
                    }
                }
            }

            if !expr.evaluate(&|id| present.get(id).copied().unwrap_or(false)) {
                continue;
            }
            instances.sort_by_key(|i| (i.column, i.start_token, i.phrase));
            debug!(row = row_id, instances = instances.len(), "row matched");
            matches.push(RowMatch::new(
                self,
                row_id,
                Arc::clone(&phrase_lens),
                instances,
            ));
        }
        Ok(matches)
    }

    /// Resolves a query phrase's column filter and normalizes its words.
    fn compile(&self, phrase: &QueryPhrase) -> Result<CompiledPhrase, TableError> {
        let column = phrase
            .column
            .as_deref()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
            })
            .transpose()?;
        Ok(CompiledPhrase {
            terms: self.analyzer.phrase_terms(&phrase.words),
            column,
            negated: phrase.negated,
        })
    }
}
