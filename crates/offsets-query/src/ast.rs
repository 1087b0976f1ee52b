//! Match-expression syntax tree.

use std::fmt;

/// A parsed match expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpr {
    /// A single word.
    Term(String),

    /// An exact phrase (sequence of words).
    Phrase(Vec<String>),

    /// Negation: matching rows must NOT match this expression.
    Not(Box<Self>),

    /// Conjunction: all sub-expressions must match.
    And(Vec<Self>),

    /// Disjunction: at least one sub-expression must match.
    Or(Vec<Self>),

    /// Column-scoped expression: match only within the named column.
    Column {
        /// Column name.
        name: String,
        /// Expression to match within that column.
        expr: Box<Self>,
    },
}

/// A leaf of a match expression, with the context it appears in.
///
/// Phrases are numbered in the order [`QueryExpr::phrases`] returns them; that index is the
/// phrase id hosts report instances under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPhrase {
    /// Words of the phrase, as written in the query.
    pub words: Vec<String>,
    /// Innermost column filter enclosing the phrase, if any.
    pub column: Option<String>,
    /// True if the phrase sits under a negation.
    pub negated: bool,
}

impl QueryExpr {
    /// Creates an And expression, flattening nested Ands.
    pub fn and(exprs: Vec<Self>) -> Self {
        Self::flatten(exprs, Self::And, |e| match e {
            Self::And(inner) => Ok(inner),
            other => Err(other),
        })
    }

    /// Creates an Or expression, flattening nested Ors.
    pub fn or(exprs: Vec<Self>) -> Self {
        Self::flatten(exprs, Self::Or, |e| match e {
            Self::Or(inner) => Ok(inner),
            other => Err(other),
        })
    }

    /// Flattens nested expressions of one kind and unwraps a single survivor.
    fn flatten(
        exprs: Vec<Self>,
        wrap: fn(Vec<Self>) -> Self,
        unwrap: fn(Self) -> Result<Vec<Self>, Self>,
    ) -> Self {
        let mut flattened: Vec<Self> = Vec::with_capacity(exprs.len());
        for expr in exprs {
            match unwrap(expr) {
                Ok(inner) => flattened.extend(inner),
                Err(other) => flattened.push(other),
            }
        }

        if flattened.len() == 1 {
            flattened.remove(0)
        } else {
            wrap(flattened)
        }
    }

    /// Returns every term and phrase in the expression, in query order.
    ///
    /// Terms are reported as one-word phrases.
    pub fn phrases(&self) -> Vec<QueryPhrase> {
        let mut out = Vec::new();
        self.collect_phrases(None, false, &mut out);
        out
    }

    /// Recursive helper for [`Self::phrases`].
    fn collect_phrases(&self, column: Option<&str>, negated: bool, out: &mut Vec<QueryPhrase>) {
        match self {
            Self::Term(word) => out.push(QueryPhrase {
                words: vec![word.clone()],
                column: column.map(String::from),
                negated,
            }),
            Self::Phrase(words) => out.push(QueryPhrase {
                words: words.clone(),
                column: column.map(String::from),
                negated,
            }),
            Self::Not(inner) => inner.collect_phrases(column, !negated, out),
            Self::And(exprs) | Self::Or(exprs) => {
                for expr in exprs {
                    expr.collect_phrases(column, negated, out);
                }
            }
            Self::Column { name, expr } => expr.collect_phrases(Some(name), negated, out),
        }
    }

    /// Evaluates the expression given whether each phrase (by id) occurs in the row.
    pub fn evaluate(&self, present: &dyn Fn(usize) -> bool) -> bool {
        let mut next_id = 0;
        self.evaluate_from(present, &mut next_id)
    }

    /// Recursive helper for [`Self::evaluate`].
    ///
    /// Every subtree is visited so phrase ids stay aligned with [`Self::phrases`].
    fn evaluate_from(&self, present: &dyn Fn(usize) -> bool, next_id: &mut usize) -> bool {
        match self {
            Self::Term(_) | Self::Phrase(_) => {
                let id = *next_id;
                *next_id += 1;
                present(id)
            }
            Self::Not(inner) => !inner.evaluate_from(present, next_id),
            Self::And(exprs) => exprs
                .iter()
                .map(|e| e.evaluate_from(present, next_id))
                .fold(true, |acc, m| acc && m),
            Self::Or(exprs) => exprs
                .iter()
                .map(|e| e.evaluate_from(present, next_id))
                .fold(false, |acc, m| acc || m),
            Self::Column { expr, .. } => expr.evaluate_from(present, next_id),
        }
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term(s) => writeln!(f, "{prefix}Term({s:?})"),
            Self::Phrase(words) => writeln!(f, "{prefix}Phrase({words:?})"),
            Self::Not(inner) => {
                writeln!(f, "{prefix}Not")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::And(exprs) | Self::Or(exprs) => {
                let label = if matches!(self, Self::And(_)) {
                    "And"
                } else {
                    "Or"
                };
                writeln!(f, "{prefix}{label}")?;
                for expr in exprs {
                    expr.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Column { name, expr } => {
                writeln!(f, "{prefix}Column({name:?})")?;
                expr.fmt_tree(f, indent + 1)
            }
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shorthand for a term.
    fn term(s: &str) -> QueryExpr {
        QueryExpr::Term(s.into())
    }

    #[test]
    fn and_flattens_nested() {
        let nested = QueryExpr::and(vec![
            term("a"),
            QueryExpr::And(vec![term("b"), term("c")]),
        ]);
        assert_eq!(nested, QueryExpr::And(vec![term("a"), term("b"), term("c")]));
    }

    #[test]
    fn or_single_element_unwraps() {
        assert_eq!(QueryExpr::or(vec![term("a")]), term("a"));
    }

    #[test]
    fn phrases_in_query_order_with_context() {
        let expr = QueryExpr::and(vec![
            QueryExpr::Column {
                name: "title".into(),
                expr: Box::new(QueryExpr::Phrase(vec!["quick".into(), "brown".into()])),
            },
            QueryExpr::Not(Box::new(term("lazy"))),
            term("fox"),
        ]);

        let phrases = expr.phrases();
        assert_eq!(phrases.len(), 3);
        assert_eq!(phrases[0].words, vec!["quick", "brown"]);
        assert_eq!(phrases[0].column.as_deref(), Some("title"));
        assert!(phrases[1].negated);
        assert!(!phrases[2].negated);
        assert_eq!(phrases[2].column, None);
    }

    #[test]
    fn double_negation_is_positive() {
        let expr = QueryExpr::Not(Box::new(QueryExpr::Not(Box::new(term("a")))));
        assert!(!expr.phrases()[0].negated);
    }

    #[test]
    fn evaluate_uses_phrase_ids() {
        // (a OR b) -c
        let expr = QueryExpr::and(vec![
            QueryExpr::or(vec![term("a"), term("b")]),
            QueryExpr::Not(Box::new(term("c"))),
        ]);
        assert!(expr.evaluate(&|id| id == 1));
        assert!(!expr.evaluate(&|id| id == 1 || id == 2));
        assert!(!expr.evaluate(&|_| false));
    }

    #[test]
    fn display_renders_tree() {
        let expr = QueryExpr::or(vec![term("a"), QueryExpr::Not(Box::new(term("b")))]);
        assert_eq!(expr.to_string(), "Or\n  Term(\"a\")\n  Not\n    Term(\"b\")\n");
    }
}
