use super::{Error, FileId, Keyword, Location, Sources, Token, TokenKind};

type Result<T> = std::result::Result<T, Error>;

pub fn lex(sources: &Sources, file: FileId) -> Result<Vec<Token>> {
    let mut lexer = Lexer {
        file,
        chars: sources.get(file).text().char_indices().peekable(),
        end: sources.get(file).text().len(),
    };
    let mut tokens = vec![];
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

fn is_number(s: &str) -> bool {
    let mut parts = s.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let valid = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    valid(whole) && parts.next().map_or(true, valid)
}

struct Lexer<'a> {
    file: FileId,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    end: usize,
}

impl<'a> Lexer<'a> {
    fn offset(&mut self) -> usize {
        match self.chars.peek() {
            Some((index, _)) => *index,
            None => self.end,
        }
    }

    fn location(&mut self, start: usize) -> Location {
        let end = self.offset();
        Location::new(self.file, start..end)
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        while let Some((_, ch)) = self.chars.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.chars.next();
        }
        let start = self.offset();
        match self.chars.peek() {
            None => Ok(None),
            Some((_, '"')) => self.string(start).map(Some),
            Some(_) => Ok(Some(self.word(start))),
        }
    }

    fn word(&mut self, start: usize) -> Token {
        let mut s = String::new();
        while let Some((_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                break;
            }
            s.push(*ch);
            self.chars.next();
        }
        let loc = self.location(start);
        let kind = if is_number(&s) {
            TokenKind::Number
        } else if Keyword::from_str(&s).is_some() {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        Token::new(loc, kind, s)
    }

    fn string(&mut self, start: usize) -> Result<Token> {
        let mut s = String::new();
        self.chars.next();
        loop {
            let ch = match self.chars.next() {
                Some((_, ch)) => ch,
                None => {
                    let loc = self.location(start);
                    return Err(error!(UnterminatedString, ..&loc; "expected end of string, found end of file"));
                }
            };
            match ch {
                '"' => break,
                '\\' => {
                    let escape_start = self.offset() - 1;
                    s.push(self.escape(escape_start)?);
                }
                _ => s.push(ch),
            }
        }
        Ok(Token::new(self.location(start), TokenKind::String, s))
    }

    fn escape(&mut self, start: usize) -> Result<char> {
        let ch = match self.chars.next() {
            Some((_, ch)) => ch,
            None => {
                let loc = self.location(start);
                return Err(error!(UnterminatedString, ..&loc; "expected end of string, found end of file"));
            }
        };
        Ok(match ch {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\u{8}',
            '"' => '"',
            '\\' => '\\',
            'x' => {
                let mut hex = String::new();
                for _ in 0..2 {
                    if let Some((_, c)) = self.chars.next() {
                        hex.push(c);
                    }
                }
                match u8::from_str_radix(&hex, 16) {
                    Ok(code) => char::from(code),
                    Err(_) => {
                        let loc = self.location(start);
                        return Err(error!(InvalidEscape, ..&loc; format!("\\x{} is not a hex byte", hex)));
                    }
                }
            }
            other => {
                let loc = self.location(start);
                return Err(error!(InvalidEscape, ..&loc; format!("unknown escape \\{}", other)));
            }
        })
    }
}
