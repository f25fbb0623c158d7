//! Output parsers for model responses.
//!
//! Parsers turn raw completion text into a typed value. The ReAct
//! transcript parser used by the agent lives in [`crate::agent::parser`];
//! these are the general-purpose ones.

use weft_types::error::ParseError;

/// Turns raw model output into a typed value.
pub trait OutputParser {
    type Output;

    fn parse(&self, text: &str) -> Result<Self::Output, ParseError>;
}

/// Passes the model output through unchanged, trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrOutputParser;

impl OutputParser for StrOutputParser {
    type Output = String;

    fn parse(&self, text: &str) -> Result<String, ParseError> {
        Ok(text.trim().to_string())
    }
}

/// Splits the model output on commas into a list of trimmed items.
///
/// Empty segments are dropped, so trailing commas and doubled separators
/// are tolerated. Output consisting only of separators/whitespace is an
/// error rather than an empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommaSeparatedListParser;

impl OutputParser for CommaSeparatedListParser {
    type Output = Vec<String>;

    fn parse(&self, text: &str) -> Result<Vec<String>, ParseError> {
        let items: Vec<String> = text
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if items.is_empty() {
            return Err(ParseError::Malformed(
                "expected a comma-separated list, got no items".to_string(),
            ));
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_parser_trims() {
        let parsed = StrOutputParser.parse("  Sock Spectrum  \n").unwrap();
        assert_eq!(parsed, "Sock Spectrum");
    }

    #[test]
    fn test_comma_list_splits_and_trims() {
        let parsed = CommaSeparatedListParser
            .parse("Sock Spectrum, Rainbow Toes , Hue Crew")
            .unwrap();
        assert_eq!(parsed, vec!["Sock Spectrum", "Rainbow Toes", "Hue Crew"]);
    }

    #[test]
    fn test_comma_list_drops_empty_segments() {
        let parsed = CommaSeparatedListParser.parse("a,,b,").unwrap();
        assert_eq!(parsed, vec!["a", "b"]);
    }

    #[test]
    fn test_comma_list_rejects_empty_output() {
        assert!(CommaSeparatedListParser.parse(" , , ").is_err());
        assert!(CommaSeparatedListParser.parse("").is_err());
    }

    #[test]
    fn test_comma_list_single_item() {
        let parsed = CommaSeparatedListParser.parse("Just One").unwrap();
        assert_eq!(parsed, vec!["Just One"]);
    }
}
