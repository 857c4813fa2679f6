use super::Location;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TokenKind {
    Number,
    String,
    Keyword,
    Ident,
}

/// A classified lexeme. String lexemes hold the unescaped contents.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub loc: Location,
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new<S: Into<String>>(loc: Location, kind: TokenKind, lexeme: S) -> Token {
        Token {
            loc,
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => Keyword::from_str(&self.lexeme),
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Keyword {
    If,
    Else,
    End,
    Repeat,
    While,
    Let,
    Do,
    Fn,
    Colon,
    Var,
    Import,
}

impl Keyword {
    pub fn from_str(s: &str) -> Option<Keyword> {
        use Keyword::*;
        Some(match s {
            "if" => If,
            "else" => Else,
            "end" => End,
            "repeat" => Repeat,
            "while" => While,
            "let" => Let,
            "do" => Do,
            "fn" => Fn,
            ":" => Colon,
            "var" => Var,
            "import" => Import,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Keyword::*;
        match self {
            If => write!(f, "if"),
            Else => write!(f, "else"),
            End => write!(f, "end"),
            Repeat => write!(f, "repeat"),
            While => write!(f, "while"),
            Let => write!(f, "let"),
            Do => write!(f, "do"),
            Fn => write!(f, "fn"),
            Colon => write!(f, ":"),
            Var => write!(f, "var"),
            Import => write!(f, "import"),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "{:?}", self.lexeme),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}
