//! Directive parser built on the line scanner.

use std::io::Read;

use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{ModelfileError, Result};
use crate::scanner::Scanner;
use crate::types::{Directive, Keyword, ParseOptions};

/// Legacy keyword that is rejected outright rather than skipped.
/// Matched exactly; other spellings are ordinary unknown commands.
const DEPRECATED_EMBED: &str = "EMBED";

/// Classification of one scanner token.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment,
    Unknown(&'a str),
    Deprecated,
    Command(Keyword, &'a str),
    Parameter { name: &'a str, value: Option<&'a str> },
}

impl<'a> Line<'a> {
    fn classify(text: &'a str) -> Self {
        let (word, rest) = text.split_once(' ').unwrap_or((text, ""));
        if word.is_empty() {
            return Self::Blank;
        }

        match Keyword::parse(word) {
            Some(Keyword::Parameter) => match rest.split_once(' ') {
                Some((name, value)) => Self::Parameter {
                    name,
                    value: Some(value),
                },
                None => Self::Parameter {
                    name: rest,
                    value: None,
                },
            },
            Some(keyword) => Self::Command(keyword, rest),
            None if word == DEPRECATED_EMBED => Self::Deprecated,
            None if word.starts_with('#') => Self::Comment,
            None => Self::Unknown(word),
        }
    }
}

/// Parse a Modelfile, logging advisory diagnostics through `tracing`.
pub fn parse<R: Read>(reader: R) -> Result<Vec<Directive>> {
    parse_with(reader, &ParseOptions::default(), &mut TracingSink)
}

/// Parse a Modelfile, reporting advisory diagnostics to `sink`.
///
/// Fatal errors abort the parse and discard everything collected so far.
/// Repeated `FROM` lines are accepted; the last one decides whether the
/// file names a base model.
pub fn parse_with<R, S>(reader: R, options: &ParseOptions, sink: &mut S) -> Result<Vec<Directive>>
where
    R: Read,
    S: DiagnosticSink + ?Sized,
{
    let mut directives = Vec::new();
    let mut has_from = false;

    let mut scanner = Scanner::with_max_token_size(reader, options.max_token_size);
    while let Some(token) = scanner.next_token()? {
        let text = String::from_utf8_lossy(&token.bytes);

        match Line::classify(&text) {
            Line::Blank | Line::Comment => {}
            Line::Unknown(keyword) => {
                sink.report(Diagnostic::unknown_directive(token.line, keyword));
            }
            Line::Deprecated => {
                return Err(ModelfileError::DeprecatedCommand { line: token.line });
            }
            Line::Command(keyword, args) => {
                if keyword == Keyword::From {
                    has_from = !args.is_empty();
                }
                directives.push(Directive::new(keyword.as_str(), args));
            }
            Line::Parameter {
                name,
                value: Some(value),
            } => directives.push(Directive::new(name, value)),
            Line::Parameter { name, value: None } => {
                return Err(ModelfileError::MissingParameterValue {
                    line: token.line,
                    fragment: name.to_string(),
                });
            }
        }
    }

    if !has_from {
        return Err(ModelfileError::MissingFrom);
    }

    debug!(directives = directives.len(), "modelfile parsed");
    Ok(directives)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(input: &str) -> Result<Vec<Directive>> {
        parse_with(input.as_bytes(), &ParseOptions::default(), &mut Vec::<Diagnostic>::new())
    }

    #[test]
    fn test_classify() {
        assert_eq!(Line::classify(""), Line::Blank);
        assert_eq!(Line::classify(" leading space"), Line::Blank);
        assert_eq!(Line::classify("# note"), Line::Comment);
        assert_eq!(Line::classify("#note"), Line::Comment);
        assert_eq!(Line::classify("FOO bar"), Line::Unknown("FOO"));
        assert_eq!(Line::classify("EMBED x"), Line::Deprecated);
        assert_eq!(Line::classify("from llama2"), Line::Command(Keyword::From, "llama2"));
        assert_eq!(Line::classify("FROM"), Line::Command(Keyword::From, ""));
        assert_eq!(
            Line::classify("PARAMETER stop ### User:"),
            Line::Parameter {
                name: "stop",
                value: Some("### User:")
            }
        );
        assert_eq!(
            Line::classify("PARAMETER temperature"),
            Line::Parameter {
                name: "temperature",
                value: None
            }
        );
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let got = parse_str("From llama2\nsYsTeM be brief\nAdapter ./lora.bin\n").unwrap();
        assert_eq!(
            got,
            vec![
                Directive::new("from", "llama2"),
                Directive::new("system", "be brief"),
                Directive::new("adapter", "./lora.bin"),
            ]
        );
    }

    #[test]
    fn test_parameter_key_keeps_case() {
        let got = parse_str("FROM x\nparameter Top_K 40\n").unwrap();
        assert_eq!(got[1], Directive::new("Top_K", "40"));
    }

    #[test]
    fn test_multiline_template() {
        let got = parse_str("FROM llama2\nTEMPLATE \"\"\"a\nb\"\"\"\n").unwrap();
        assert_eq!(got[1], Directive::new("template", "a\nb"));
    }

    #[test]
    fn test_single_and_triple_quotes_agree() {
        let single = parse_str("FROM x\nSYSTEM \"be brief\"\n").unwrap();
        let triple = parse_str("FROM x\nSYSTEM \"\"\"be brief\"\"\"\n").unwrap();
        assert_eq!(single, triple);
        assert_eq!(single[1], Directive::new("system", "be brief"));
    }

    #[test]
    fn test_missing_from() {
        let err = parse_str("LICENSE MIT\n").unwrap_err();
        assert!(matches!(err, ModelfileError::MissingFrom));
    }

    #[test]
    fn test_bare_from_is_missing_from() {
        let err = parse_str("FROM\n").unwrap_err();
        assert!(matches!(err, ModelfileError::MissingFrom));
    }

    #[test]
    fn test_last_from_wins() {
        let got = parse_str("FROM a\nFROM b\n").unwrap();
        assert_eq!(got, vec![Directive::new("from", "a"), Directive::new("from", "b")]);

        let err = parse_str("FROM a\nFROM\n").unwrap_err();
        assert!(matches!(err, ModelfileError::MissingFrom));
    }

    #[test]
    fn test_parameter_requires_value() {
        let err = parse_str("FROM x\nPARAMETER temperature\n").unwrap_err();
        match err {
            ModelfileError::MissingParameterValue { line, fragment } => {
                assert_eq!(line, 2);
                assert_eq!(fragment, "temperature");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_embed_is_rejected_anywhere() {
        for input in ["EMBED foo\nFROM x\n", "FROM x\nEMBED foo\n"] {
            let err = parse_str(input).unwrap_err();
            assert!(matches!(err, ModelfileError::DeprecatedCommand { .. }), "{input:?}");
        }
    }

    #[test]
    fn test_other_embed_spellings_are_unknown() {
        assert_eq!(Line::classify("embed foo"), Line::Unknown("embed"));
        assert_eq!(Line::classify("Embed foo"), Line::Unknown("Embed"));

        let mut sink: Vec<Diagnostic> = Vec::new();
        let got = parse_with(
            "FROM x\nembed foo\n".as_bytes(),
            &ParseOptions::default(),
            &mut sink,
        )
        .unwrap();
        assert_eq!(got, vec![Directive::new("from", "x")]);
        assert_eq!(sink, vec![Diagnostic::unknown_directive(2, "embed")]);
    }

    #[test]
    fn test_unknown_directive_is_advisory() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let got = parse_with(
            "FROM llama2\nFOO bar\n# comment\n".as_bytes(),
            &ParseOptions::default(),
            &mut sink,
        )
        .unwrap();
        assert_eq!(got, vec![Directive::new("from", "llama2")]);
        assert_eq!(sink, vec![Diagnostic::unknown_directive(2, "FOO")]);
    }

    #[test]
    fn test_default_sink_does_not_abort() {
        let got = parse("FROM llama2\nFOO bar\n".as_bytes()).unwrap();
        assert_eq!(got, vec![Directive::new("from", "llama2")]);
    }

    #[test]
    fn test_trailing_text_after_closing_quote_is_dropped() {
        let got = parse_str("FROM x\nPARAMETER stop \"a\" trailing\n").unwrap();
        assert_eq!(got, vec![Directive::new("from", "x"), Directive::new("stop", "a")]);
    }

    #[test]
    fn test_max_token_size_is_honoured() {
        let input = format!("FROM x\nSYSTEM {}\n", "y".repeat(200));
        let opts = ParseOptions { max_token_size: 64 };
        let err = parse_with(input.as_bytes(), &opts, &mut Vec::<Diagnostic>::new()).unwrap_err();
        assert!(matches!(err, ModelfileError::TokenTooLong { limit: 64 }));
    }
}
