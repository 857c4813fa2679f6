use tape::lang::{lex, ErrorCode, Keyword, Sources, Token, TokenKind};

fn tokens(s: &str) -> Vec<Token> {
    let mut sources = Sources::new();
    let file = sources.add("test", s);
    lex(&sources, file).unwrap()
}

fn kinds(s: &str) -> Vec<TokenKind> {
    tokens(s).iter().map(|t| t.kind).collect()
}

#[test]
fn test_three_plus_four() {
    let t = tokens("3 4 + pr");
    assert_eq!(
        kinds("3 4 + pr"),
        vec![
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::Ident,
            TokenKind::Ident
        ]
    );
    assert_eq!(t[2].lexeme, "+");
    assert_eq!(t[3].loc.span, 6..8);
}

#[test]
fn test_keywords() {
    let t = tokens("fn f n : n do end");
    assert_eq!(t[0].keyword(), Some(Keyword::Fn));
    assert_eq!(t[1].kind, TokenKind::Ident);
    assert!(t[3].is_keyword(Keyword::Colon));
    assert!(t[5].is_keyword(Keyword::Do));
    assert!(t[6].is_keyword(Keyword::End));
    assert_eq!(tokens("else")[0].keyword(), Some(Keyword::Else));
}

#[test]
fn test_words_keep_punctuation() {
    assert_eq!(
        kinds("is-integer str2num -1 1.5 1."),
        vec![
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Number,
            TokenKind::Ident
        ]
    );
}

#[test]
fn test_strings() {
    let t = tokens("\"two words\" pr \"\"");
    assert_eq!(t[0].kind, TokenKind::String);
    assert_eq!(t[0].lexeme, "two words");
    assert_eq!(t[0].loc.span, 0..11);
    assert_eq!(t[2].lexeme, "");
}

#[test]
fn test_multiline_offsets() {
    let t = tokens("1\n  2\r\n\tpr");
    assert_eq!(t[1].loc.span, 4..5);
    assert_eq!(t[2].loc.span, 8..10);
}

#[test]
fn test_unterminated_string() {
    let mut sources = Sources::new();
    let file = sources.add("test", "1 \"abc");
    let error = lex(&sources, file).unwrap_err();
    assert_eq!(error.code(), ErrorCode::UnterminatedString);
    assert_eq!(error.location().unwrap().span.start, 2);
}
