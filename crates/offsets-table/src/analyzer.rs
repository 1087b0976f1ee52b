//! Text analysis pipeline for the reference table.
//!
//! Implements a four-stage text analysis pipeline:
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `LowerCaser` - converts tokens to lowercase
//! 3. `RemoveLongFilter` - removes tokens longer than the configured limit
//! 4. `Stemmer` - applies language-specific stemming, unless disabled with "none"
//!
//! After each primary token, the analyzer reports any configured synonyms of that token as
//! co-located tokens: same position, same byte range.

use std::{
    collections::{BTreeMap, HashMap},
    convert::Infallible,
    ops::{ControlFlow, Range},
};

use offsets_config::{AnalyzerSettings, Config};
use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, TextAnalyzer, TokenStream,
};
use tracing::warn;

use crate::TableError;

/// Stemmer name that disables stemming.
const NO_STEMMER: &str = "none";

/// Parses a stemmer language string into a Tantivy `Language`.
///
/// Supports lowercase language names matching Tantivy's `Language` enum, plus "none" which
/// yields `None`. Returns an error if the language is not recognized.
pub fn parse_language(name: &str) -> Result<Option<Language>, TableError> {
    let language = match name.to_lowercase().as_str() {
        NO_STEMMER => return Ok(None),
        "arabic" => Language::Arabic,
        "danish" => Language::Danish,
        "dutch" => Language::Dutch,
        "english" => Language::English,
        "finnish" => Language::Finnish,
        "french" => Language::French,
        "german" => Language::German,
        "greek" => Language::Greek,
        "hungarian" => Language::Hungarian,
        "italian" => Language::Italian,
        "norwegian" => Language::Norwegian,
        "portuguese" => Language::Portuguese,
        "romanian" => Language::Romanian,
        "russian" => Language::Russian,
        "spanish" => Language::Spanish,
        "swedish" => Language::Swedish,
        "tamil" => Language::Tamil,
        "turkish" => Language::Turkish,
        other => return Err(TableError::InvalidLanguage(other.to_string())),
    };
    Ok(Some(language))
}

/// Builds the Tantivy analyzer chain.
///
/// Tokens longer than `max_token_length` bytes are dropped.
pub fn build_text_analyzer(language: Option<Language>, max_token_length: usize) -> TextAnalyzer {
    // `RemoveLongFilter` keeps tokens strictly shorter than its limit.
    let builder = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(max_token_length.saturating_add(1)));
    match language {
        Some(language) => builder.filter(Stemmer::new(language)).build(),
        None => builder.build(),
    }
}

/// A token produced by [`Analyzer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzedToken {
    /// Normalized token text.
    pub text: String,
    /// Token position. Co-located tokens share the position of the primary token they follow.
    pub position: usize,
    /// Byte range in the analyzed text.
    pub offsets: Range<usize>,
    /// True for synonyms reported after a primary token.
    pub colocated: bool,
}

/// Tokenizer for table text and query phrases.
#[derive(Clone)]
pub struct Analyzer {
    /// Tantivy analyzer chain.
    text: TextAnalyzer,
    /// Synonyms keyed by normalized primary token.
    synonyms: HashMap<String, Vec<String>>,
}

impl Analyzer {
    /// Builds an analyzer from settings and a synonym table.
    ///
    /// Synonym keys and values are normalized with the same pipeline as document text.
    /// Entries that do not normalize to exactly one token are skipped with a warning.
    pub fn new(
        settings: &AnalyzerSettings,
        synonyms: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, TableError> {
        let language = parse_language(&settings.stemmer)?;
        let mut analyzer = Self {
            text: build_text_analyzer(language, settings.max_token_length),
            synonyms: HashMap::new(),
        };

        let mut table: HashMap<String, Vec<String>> = HashMap::new();
        for (word, alternatives) in synonyms {
            let Some(key) = analyzer.single_term(word) else {
                warn!(word = %word, "ignoring synonym entry that is not a single token");
                continue;
            };
            let entry = table.entry(key.clone()).or_default();
            for alternative in alternatives {
                match analyzer.single_term(alternative) {
                    Some(term) if term != key && !entry.contains(&term) => entry.push(term),
                    Some(_) => {}
                    None => {
                        warn!(word = %word, synonym = %alternative, "ignoring multi-token synonym");
                    }
                }
            }
        }
        table.retain(|_, alternatives| !alternatives.is_empty());
        analyzer.synonyms = table;
        Ok(analyzer)
    }

    /// Builds an analyzer from the analyzer and synonym sections of a configuration.
    pub fn from_config(config: &Config) -> Result<Self, TableError> {
        Self::new(&config.analyzer, &config.synonyms)
    }

    /// Streams the tokens of `text` to `on_token` in document order.
    ///
    /// Primary tokens get sequential positions starting at zero. Stops without error when the
    /// handler breaks.
    pub fn each_token<E>(
        &self,
        text: &str,
        mut on_token: impl FnMut(&AnalyzedToken) -> Result<ControlFlow<()>, E>,
    ) -> Result<(), E> {
        let mut analyzer = self.text.clone();
        let mut stream = analyzer.token_stream(text);
        let mut current = AnalyzedToken::default();
        let mut position = 0;

        while stream.advance() {
            let token = stream.token();
            current.text.clear();
            current.text.push_str(&token.text);
            current.position = position;
            current.offsets = token.offset_from..token.offset_to;
            current.colocated = false;
            if on_token(&current)?.is_break() {
                return Ok(());
            }

            if let Some(alternatives) = self.synonyms.get(&token.text) {
                current.colocated = true;
                for alternative in alternatives {
                    current.text.clear();
                    current.text.push_str(alternative);
                    if on_token(&current)?.is_break() {
                        return Ok(());
                    }
                }
            }
            position += 1;
        }
        Ok(())
    }

    /// Returns every token of `text`, including co-located synonyms.
    pub fn analyze(&self, text: &str) -> Vec<AnalyzedToken> {
        let mut tokens = Vec::new();
        let Ok(()) = self.each_token::<Infallible>(text, |token| {
            tokens.push(token.clone());
            Ok(ControlFlow::Continue(()))
        });
        tokens
    }

    /// Returns the normalized primary terms of a query phrase.
    pub fn phrase_terms(&self, words: &[String]) -> Vec<String> {
        self.analyze(&words.join(" "))
            .into_iter()
            .filter(|token| !token.colocated)
            .map(|token| token.text)
            .collect()
    }

    /// Normalizes `word`, returning its term if it yields exactly one primary token.
    fn single_term(&self, word: &str) -> Option<String> {
        let mut terms = self.phrase_terms(&[word.to_string()]);
        if terms.len() == 1 { terms.pop() } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an analyzer with default settings and the given synonyms.
    fn analyzer_with(synonyms: &[(&str, &[&str])]) -> Analyzer {
        let synonyms = synonyms
            .iter()
            .map(|(word, alts)| {
                (
                    word.to_string(),
                    alts.iter().map(|a| a.to_string()).collect(),
                )
            })
            .collect();
        Analyzer::new(&AnalyzerSettings::default(), &synonyms).unwrap()
    }

    /// Returns `(text, position, colocated)` triples.
    fn summary(tokens: &[AnalyzedToken]) -> Vec<(&str, usize, bool)> {
        tokens
            .iter()
            .map(|t| (t.text.as_str(), t.position, t.colocated))
            .collect()
    }

    #[test]
    fn parse_all_languages() {
        let languages = [
            ("arabic", Language::Arabic),
            ("danish", Language::Danish),
            ("dutch", Language::Dutch),
            ("english", Language::English),
            ("finnish", Language::Finnish),
            ("french", Language::French),
            ("german", Language::German),
            ("greek", Language::Greek),
            ("hungarian", Language::Hungarian),
            ("italian", Language::Italian),
            ("norwegian", Language::Norwegian),
            ("portuguese", Language::Portuguese),
            ("romanian", Language::Romanian),
            ("russian", Language::Russian),
            ("spanish", Language::Spanish),
            ("swedish", Language::Swedish),
            ("tamil", Language::Tamil),
            ("turkish", Language::Turkish),
        ];

        for (name, expected) in languages {
            assert_eq!(
                parse_language(name).unwrap(),
                Some(expected),
                "failed to parse {name}"
            );
        }
    }

    #[test]
    fn parse_none_disables_stemming() {
        assert_eq!(parse_language("none").unwrap(), None);
        assert_eq!(parse_language("NONE").unwrap(), None);
    }

    #[test]
    fn parse_invalid_language() {
        let err = parse_language("klingon").unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn tokens_are_lowercased_and_stemmed() {
        let analyzer = analyzer_with(&[]);
        let tokens = analyzer.analyze("Running HANDLING");
        assert_eq!(summary(&tokens), vec![("run", 0, false), ("handl", 1, false)]);
    }

    #[test]
    fn offsets_point_into_source_text() {
        let analyzer = analyzer_with(&[]);
        let text = "the  Quick, brown";
        let tokens = analyzer.analyze(text);
        let spans: Vec<&str> = tokens.iter().map(|t| &text[t.offsets.clone()]).collect();
        assert_eq!(spans, vec!["the", "Quick", "brown"]);
    }

    #[test]
    fn stemming_can_be_disabled() {
        let settings = AnalyzerSettings {
            stemmer: "none".to_string(),
            ..AnalyzerSettings::default()
        };
        let analyzer = Analyzer::new(&settings, &BTreeMap::new()).unwrap();
        assert_eq!(analyzer.phrase_terms(&["Running".to_string()]), vec!["running"]);
    }

    #[test]
    fn long_tokens_are_dropped_without_a_position() {
        let settings = AnalyzerSettings {
            stemmer: "none".to_string(),
            max_token_length: 5,
        };
        let analyzer = Analyzer::new(&settings, &BTreeMap::new()).unwrap();
        let tokens = analyzer.analyze("ab abcdef cd abcde");
        assert_eq!(
            summary(&tokens),
            vec![("ab", 0, false), ("cd", 1, false), ("abcde", 2, false)]
        );
    }

    #[test]
    fn synonyms_follow_their_primary_token() {
        let analyzer = analyzer_with(&[("quick", &["fast", "rapid"])]);
        let tokens = analyzer.analyze("a quick fox");
        assert_eq!(
            summary(&tokens),
            vec![
                ("a", 0, false),
                ("quick", 1, false),
                ("fast", 1, true),
                ("rapid", 1, true),
                ("fox", 2, false),
            ]
        );
        assert_eq!(tokens[2].offsets, 2..7);
    }

    #[test]
    fn multi_token_synonyms_are_skipped() {
        let analyzer = analyzer_with(&[("quick", &["very fast", "quick"]), ("a b", &["c"])]);
        let tokens = analyzer.analyze("quick");
        assert_eq!(summary(&tokens), vec![("quick", 0, false)]);
    }

    #[test]
    fn early_break_stops_stream() {
        let analyzer = analyzer_with(&[]);
        let mut seen = 0;
        let result: Result<(), ()> = analyzer.each_token("a b c d", |_| {
            seen += 1;
            Ok(if seen == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        });
        assert!(result.is_ok());
        assert_eq!(seen, 2);
    }

    #[test]
    fn handler_errors_propagate() {
        let analyzer = analyzer_with(&[]);
        let result = analyzer.each_token("a b", |_| Err("boom"));
        assert_eq!(result, Err("boom"));
    }
}
