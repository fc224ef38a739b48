use pretty_assertions::assert_eq;

use super::*;
use crate::{tokenize, tokenize_with, LexErrorKind};

/// Helper: tokenize and return `(kind, lexeme)` pairs, `EndOfInput` included.
fn lex(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source)
        .into_iter()
        .map(|t| (t.kind, t.lexeme))
        .collect()
}

/// Helper: a `(kind, lexeme)` pair.
fn tok(kind: TokenKind, lexeme: &str) -> (TokenKind, String) {
    (kind, lexeme.to_string())
}

fn eof() -> (TokenKind, String) {
    tok(TokenKind::EndOfInput, "")
}

/// Helper: the single error produced by `source`, which must be exactly one
/// error token followed by `EndOfInput`.
fn single_error(source: &str) -> (LexError, Token) {
    let tokens = tokenize(source);
    assert_eq!(tokens.len(), 2, "expected one token for {source:?}: {tokens:?}");
    assert!(tokens[1].is_end_of_input());
    let err = tokens[0]
        .error()
        .unwrap_or_else(|| panic!("expected an error token for {source:?}, got {:?}", tokens[0]))
        .clone();
    (err, tokens[0].clone())
}

// === Scenarios ===

#[test]
fn simple_call() {
    assert_eq!(
        lex("(+ 1 2.5)"),
        vec![
            tok(TokenKind::LeftParen, "("),
            tok(TokenKind::Symbol, "+"),
            tok(TokenKind::Integer, "1"),
            tok(TokenKind::Float, "2.5"),
            tok(TokenKind::RightParen, ")"),
            eof(),
        ]
    );
}

#[test]
fn unterminated_string_reports_opening_quote() {
    let (err, token) = single_error("\"abc");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.position, Position::new(1, 1, 0));
    assert_eq!(token.lexeme, "\"abc");
    assert_eq!(token.end, Position::new(1, 5, 4));
}

#[test]
fn leading_comment_is_skipped() {
    assert_eq!(
        lex("; comment\n(a)"),
        vec![
            tok(TokenKind::LeftParen, "("),
            tok(TokenKind::Symbol, "a"),
            tok(TokenKind::RightParen, ")"),
            eof(),
        ]
    );
}

#[test]
fn quoted_list() {
    assert_eq!(
        lex("'(a b)"),
        vec![
            tok(TokenKind::Quote, "'"),
            tok(TokenKind::LeftParen, "("),
            tok(TokenKind::Symbol, "a"),
            tok(TokenKind::Symbol, "b"),
            tok(TokenKind::RightParen, ")"),
            eof(),
        ]
    );
}

#[test]
fn empty_source() {
    assert_eq!(lex(""), vec![eof()]);
}

#[test]
fn whitespace_and_comments_only() {
    assert_eq!(lex("  \t\r\n ; one\n;two\n   ;three"), vec![eof()]);
}

// === Structural Tokens ===

#[test]
fn adjacent_parens() {
    assert_eq!(
        lex("(()))"),
        vec![
            tok(TokenKind::LeftParen, "("),
            tok(TokenKind::LeftParen, "("),
            tok(TokenKind::RightParen, ")"),
            tok(TokenKind::RightParen, ")"),
            tok(TokenKind::RightParen, ")"),
            eof(),
        ]
    );
}

#[test]
fn quote_before_symbol() {
    assert_eq!(
        lex("'foo"),
        vec![tok(TokenKind::Quote, "'"), tok(TokenKind::Symbol, "foo"), eof()]
    );
}

#[test]
fn quote_inside_symbol_is_part_of_symbol() {
    assert_eq!(lex("a'b"), vec![tok(TokenKind::Symbol, "a'b"), eof()]);
}

// === Symbols ===

#[test]
fn symbols_with_punctuation() {
    assert_eq!(
        lex("set! integer? <= \\ λx"),
        vec![
            tok(TokenKind::Symbol, "set!"),
            tok(TokenKind::Symbol, "integer?"),
            tok(TokenKind::Symbol, "<="),
            tok(TokenKind::Symbol, "\\"),
            tok(TokenKind::Symbol, "λx"),
            eof(),
        ]
    );
}

#[test]
fn bare_signs_are_symbols() {
    assert_eq!(
        lex("+ - (-)"),
        vec![
            tok(TokenKind::Symbol, "+"),
            tok(TokenKind::Symbol, "-"),
            tok(TokenKind::LeftParen, "("),
            tok(TokenKind::Symbol, "-"),
            tok(TokenKind::RightParen, ")"),
            eof(),
        ]
    );
}

#[test]
fn sign_followed_by_non_digit_is_symbol() {
    assert_eq!(
        lex("-a +.5 ->x"),
        vec![
            tok(TokenKind::Symbol, "-a"),
            tok(TokenKind::Symbol, "+.5"),
            tok(TokenKind::Symbol, "->x"),
            eof(),
        ]
    );
}

#[test]
fn symbol_with_digits_stays_symbol() {
    assert_eq!(
        lex("x1 a2.5 .5"),
        vec![
            tok(TokenKind::Symbol, "x1"),
            tok(TokenKind::Symbol, "a2.5"),
            tok(TokenKind::Symbol, ".5"),
            eof(),
        ]
    );
}

#[test]
fn keywords_are_plain_symbols() {
    assert_eq!(
        lex("lambda nil t"),
        vec![
            tok(TokenKind::Symbol, "lambda"),
            tok(TokenKind::Symbol, "nil"),
            tok(TokenKind::Symbol, "t"),
            eof(),
        ]
    );
}

#[test]
fn symbol_stops_at_string_and_comment() {
    assert_eq!(
        lex("abc\"x\"def;c"),
        vec![
            tok(TokenKind::Symbol, "abc"),
            tok(TokenKind::StringLiteral, "x"),
            tok(TokenKind::Symbol, "def"),
            eof(),
        ]
    );
}

// === Numbers ===

#[test]
fn signed_integers() {
    assert_eq!(
        lex("-3 +42 007"),
        vec![
            tok(TokenKind::Integer, "-3"),
            tok(TokenKind::Integer, "+42"),
            tok(TokenKind::Integer, "007"),
            eof(),
        ]
    );
}

#[test]
fn huge_integer_keeps_lexeme() {
    let digits = "123456789012345678901234567890";
    assert_eq!(lex(digits), vec![tok(TokenKind::Integer, digits), eof()]);
}

#[test]
fn floats_and_exponents() {
    assert_eq!(
        lex("2.5 -0.25 1e5 1E-3 +6.02e+23"),
        vec![
            tok(TokenKind::Float, "2.5"),
            tok(TokenKind::Float, "-0.25"),
            tok(TokenKind::Float, "1e5"),
            tok(TokenKind::Float, "1E-3"),
            tok(TokenKind::Float, "+6.02e+23"),
            eof(),
        ]
    );
}

#[test]
fn number_stops_at_paren() {
    assert_eq!(
        lex("(1)"),
        vec![
            tok(TokenKind::LeftParen, "("),
            tok(TokenKind::Integer, "1"),
            tok(TokenKind::RightParen, ")"),
            eof(),
        ]
    );
}

#[test]
fn second_dot_is_malformed() {
    let (err, token) = single_error("1.2.3");
    assert_eq!(err.kind, LexErrorKind::MalformedNumber);
    assert_eq!(err.offending_char, Some('.'));
    assert_eq!(err.position, Position::START);
    assert_eq!(token.lexeme, "1.2.3");
    assert!(err.message.contains("1.2.3"));
}

#[test]
fn trailing_dot_is_malformed() {
    let (err, token) = single_error("1.");
    assert_eq!(err.kind, LexErrorKind::MalformedNumber);
    assert_eq!(err.offending_char, None);
    assert_eq!(token.lexeme, "1.");
}

#[test]
fn empty_exponent_is_malformed() {
    for source in ["1e", "1e+", "-2.5E-"] {
        let (err, token) = single_error(source);
        assert_eq!(err.kind, LexErrorKind::MalformedNumber, "{source}");
        assert_eq!(token.lexeme, source);
    }
}

#[test]
fn digit_led_word_is_malformed_not_symbol() {
    let (err, token) = single_error("12abc");
    assert_eq!(err.kind, LexErrorKind::MalformedNumber);
    assert_eq!(err.offending_char, Some('a'));
    assert_eq!(token.lexeme, "12abc");
}

#[test]
fn malformed_number_resynchronizes() {
    let tokens = tokenize("(f 1.2.3 4)");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind.display_name()).collect();
    assert_eq!(
        kinds,
        ["LeftParen", "Symbol", "Error", "Integer", "RightParen", "EndOfInput"]
    );
    assert_eq!(tokens[2].start, Position::new(1, 4, 3));
    assert_eq!(tokens[3].lexeme, "4");
}

// === Strings ===

#[test]
fn string_lexeme_is_content_without_quotes() {
    let tokens = tokenize("\"abc\"");
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].lexeme, "abc");
    assert_eq!(tokens[0].start, Position::new(1, 1, 0));
    assert_eq!(tokens[0].end, Position::new(1, 6, 5));
}

#[test]
fn empty_string() {
    assert_eq!(lex("\"\""), vec![tok(TokenKind::StringLiteral, ""), eof()]);
}

#[test]
fn string_escapes_are_decoded() {
    assert_eq!(
        lex(r#""a\nb\tc\"d\\e""#),
        vec![tok(TokenKind::StringLiteral, "a\nb\tc\"d\\e"), eof()]
    );
}

#[test]
fn string_may_contain_delimiters() {
    assert_eq!(
        lex("\"(a ; b)\" x"),
        vec![
            tok(TokenKind::StringLiteral, "(a ; b)"),
            tok(TokenKind::Symbol, "x"),
            eof(),
        ]
    );
}

#[test]
fn string_spans_lines() {
    let tokens = tokenize("\"a\nb\" c");
    assert_eq!(tokens[0].lexeme, "a\nb");
    assert_eq!(tokens[0].end, Position::new(2, 3, 5));
    assert_eq!(tokens[1].start, Position::new(2, 4, 6));
}

#[test]
fn invalid_escape_points_at_backslash() {
    let (err, token) = single_error(r#""ab\qc""#);
    assert_eq!(err.kind, LexErrorKind::InvalidEscape);
    assert_eq!(err.position, Position::new(1, 4, 3));
    assert_eq!(err.offending_char, Some('q'));
    assert_eq!(token.lexeme, r#""ab\qc""#);
    assert_eq!(token.start, Position::START);
}

#[test]
fn first_invalid_escape_wins() {
    let (err, _) = single_error(r#""\r\0""#);
    assert_eq!(err.offending_char, Some('r'));
    assert_eq!(err.position, Position::new(1, 2, 1));
}

#[test]
fn invalid_escape_resynchronizes_after_string() {
    let tokens = tokenize(r#"("\x" y)"#);
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind.display_name()).collect();
    assert_eq!(kinds, ["LeftParen", "Error", "Symbol", "RightParen", "EndOfInput"]);
    assert_eq!(tokens[2].lexeme, "y");
}

#[test]
fn escaped_quote_does_not_close_string() {
    let (err, _) = single_error(r#""abc\""#);
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}

#[test]
fn backslash_at_end_is_unterminated() {
    let (err, token) = single_error("\"abc\\");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(token.lexeme, "\"abc\\");
}

#[test]
fn unterminated_wins_over_invalid_escape() {
    let (err, _) = single_error(r#""a\q"#);
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.position, Position::START);
}

#[test]
fn unterminated_string_after_tokens() {
    let tokens = tokenize("(a \"bc");
    let err = tokens[2].error().unwrap();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.position, Position::new(1, 4, 3));
    assert!(tokens[3].is_end_of_input());
}

// === Comments ===

#[test]
fn comment_runs_to_end_of_line_only() {
    assert_eq!(
        lex("a ; b c\nd"),
        vec![tok(TokenKind::Symbol, "a"), tok(TokenKind::Symbol, "d"), eof()]
    );
}

#[test]
fn comment_cuts_symbol() {
    assert_eq!(lex("abc;def"), vec![tok(TokenKind::Symbol, "abc"), eof()]);
}

#[test]
fn comments_emitted_when_configured() {
    let config = LexerConfig::default().with_comments(true);
    let tokens: Vec<_> = tokenize_with("; hi\n(a) ;; end", config)
        .into_iter()
        .map(|t| (t.kind, t.lexeme))
        .collect();
    assert_eq!(
        tokens,
        vec![
            tok(TokenKind::Comment, "; hi"),
            tok(TokenKind::LeftParen, "("),
            tok(TokenKind::Symbol, "a"),
            tok(TokenKind::RightParen, ")"),
            tok(TokenKind::Comment, ";; end"),
            eof(),
        ]
    );
}

#[test]
fn lone_carriage_return_does_not_end_comment() {
    assert_eq!(
        lex("; note\rhidden\nshown"),
        vec![tok(TokenKind::Symbol, "shown"), eof()]
    );
}

#[test]
fn crlf_comment_keeps_carriage_return() {
    let config = LexerConfig::default().with_comments(true);
    let tokens = tokenize_with("; hi\r\nx", config);
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].lexeme, "; hi\r");
    assert_eq!(tokens[1].start, Position::new(2, 1, 6));
}

#[test]
fn transition_table_comment_ends_only_at_newline() {
    let pos = Position::START;
    assert_eq!(
        ScanState::InComment.step(Some('\r'), pos),
        Step::Continue(ScanState::InComment, Cook::Keep)
    );
    assert_eq!(ScanState::InComment.step(Some('\n'), pos), Step::Stop(Outcome::Comment));
    assert_eq!(ScanState::InComment.step(None, pos), Step::Stop(Outcome::Comment));
}

// === Positions ===

#[test]
fn positions_track_lines_and_columns() {
    let tokens = tokenize("(define x\n  42)");
    let starts: Vec<_> = tokens.iter().map(|t| (t.start.line, t.start.column)).collect();
    assert_eq!(starts, [(1, 1), (1, 2), (1, 9), (2, 3), (2, 5), (2, 6)]);
}

#[test]
fn end_of_input_sits_at_end() {
    let tokens = tokenize("ab \n");
    let last = tokens.last().unwrap();
    assert!(last.is_end_of_input());
    assert_eq!(last.start, Position::new(2, 1, 4));
    assert_eq!(last.start, last.end);
}

#[test]
fn span_width_matches_lexeme_length() {
    for token in tokenize("(foo -12 3.5e2 'λ ; c\n bar)") {
        if token.is_end_of_input() {
            continue;
        }
        assert_eq!(
            token.end.offset - token.start.offset,
            token.lexeme.chars().count(),
            "{token:?}"
        );
    }
}

// === Driver ===

#[test]
fn lexer_repeats_end_of_input() {
    let mut input = "x".as_bytes();
    let mut lexer = Lexer::new(&mut input);
    assert_eq!(lexer.scan_token().unwrap().kind, TokenKind::Symbol);
    for _ in 0..3 {
        assert!(lexer.scan_token().unwrap().is_end_of_input());
    }
}

#[test]
fn transition_table_sign_lookahead() {
    let pos = Position::START;
    assert_eq!(
        ScanState::SignLead('-').step(Some('3'), pos),
        Step::Continue(
            ScanState::InNumber(NumberScan::START.feed('-').feed('3')),
            Cook::Keep
        )
    );
    assert_eq!(
        ScanState::SignLead('-').step(Some(' '), pos),
        Step::Stop(Outcome::Symbol)
    );
    assert_eq!(ScanState::SignLead('+').step(None, pos), Step::Stop(Outcome::Symbol));
    assert_eq!(
        ScanState::SignLead('+').step(Some('x'), pos),
        Step::Continue(ScanState::InSymbol, Cook::Keep)
    );
}

#[test]
fn transition_table_start() {
    assert_eq!(ScanState::start(Some(' ')), Step::Skip);
    assert_eq!(ScanState::start(None), Step::Stop(Outcome::EndOfInput));
    assert_eq!(
        ScanState::start(Some('"')),
        Step::Continue(ScanState::InString(None), Cook::Drop)
    );
}

// === Property tests ===

mod proptest_lexer {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    /// Rebuild the source from token spans and the gaps between them.
    /// Gaps must be whitespace or comments.
    fn reconstruct(source: &str, tokens: &[Token]) -> String {
        let chars: Vec<char> = source.chars().collect();
        let mut out = String::new();
        let mut cursor = 0;
        for token in tokens {
            let gap: String = chars[cursor..token.start.offset].iter().collect();
            let mut in_comment = false;
            for c in gap.chars() {
                if c == ';' {
                    in_comment = true;
                } else if c == '\n' {
                    in_comment = false;
                }
                assert!(
                    in_comment || matches!(c, ' ' | '\t' | '\n' | '\r'),
                    "non-skippable {c:?} between tokens in {source:?}"
                );
            }
            out.push_str(&gap);
            let span: String = chars[token.start.offset..token.end.offset].iter().collect();
            if token.kind != TokenKind::StringLiteral {
                assert_eq!(&span, &token.lexeme);
            }
            out.push_str(&span);
            cursor = token.end.offset;
        }
        out
    }

    proptest! {
        #[test]
        fn integers_lex_to_one_integer(lexeme in "[+-]?[0-9]{1,24}") {
            let tokens = tokenize(&lexeme);
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(&tokens[0].kind, &TokenKind::Integer);
            prop_assert_eq!(&tokens[0].lexeme, &lexeme);
            prop_assert!(tokens[1].is_end_of_input());
        }

        #[test]
        fn whitespace_and_comments_lex_to_end_of_input(
            source in "([ \t\r\n]|;[a-z ()\"';]{0,10}\n)*"
        ) {
            let tokens = tokenize(&source);
            prop_assert_eq!(tokens.len(), 1);
            prop_assert!(tokens[0].is_end_of_input());
        }

        #[test]
        fn spans_reconstruct_source(source in "[a-z0-9 ()'\";.eE+\\-\\\\\n\t]{0,48}") {
            let tokens = tokenize(&source);
            prop_assert!(tokens.last().is_some_and(Token::is_end_of_input));
            prop_assert_eq!(reconstruct(&source, &tokens), source.clone());
        }

        #[test]
        fn spans_never_overlap(source in "[a-z0-9 ()'\";.+\\-\\\\\n]{0,48}") {
            let tokens = tokenize(&source);
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].end.offset <= pair[1].start.offset);
                prop_assert!(pair[0].start.offset <= pair[0].end.offset);
            }
        }

        #[test]
        fn comment_tokens_fill_the_gaps(source in "[a-z ();\"\n]{0,48}") {
            let config = LexerConfig::default().with_comments(true);
            let tokens = tokenize_with(&source, config);
            let chars: Vec<char> = source.chars().collect();
            let mut cursor = 0;
            for token in &tokens {
                let gap = &chars[cursor..token.start.offset];
                prop_assert!(gap.iter().all(|c| c.is_ascii_whitespace()));
                cursor = token.end.offset;
            }
        }
    }
}
