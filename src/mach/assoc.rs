use super::{Address, Context, FunctionDef, Opcode, Operation, Tape};
use crate::error;
use crate::lang::{lex, Error, Keyword, Location, Token, TokenKind};
use std::rc::Rc;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// Placeholder for a jump target that has not been back-patched yet.
const UNRESOLVED: Address = Address::max_value();

/// Lex and associate a root source file.
pub fn compile<N: Into<String>, T: Into<String>>(
    ctx: &mut Context,
    name: N,
    text: T,
) -> Result<Tape> {
    let file = ctx.add_source(name, text);
    let tokens = lex(&ctx.sources, file)?;
    associate(ctx, &tokens)
}

/// Load and associate the module `name` on its own tape.
pub fn associate_module(ctx: &mut Context, name: &str, loc: &Location) -> Result<Tape> {
    let tape = enter_module(ctx, name, loc)?;
    ctx.close_module();
    Ok(tape)
}

/// Like `associate_module`, but `name` stays on the import chain until the
/// caller has finished with the module and calls `Context::close_module`.
pub(crate) fn enter_module(ctx: &mut Context, name: &str, loc: &Location) -> Result<Tape> {
    let tokens = ctx.open_module(name, loc)?;
    let tape = associate(ctx, &tokens);
    if tape.is_err() {
        ctx.close_module();
    }
    tape
}

/// ## Associator
///
/// Turns tokens into a flat tape in one pass. Block openers are pushed on the
/// pending stack and their targets are written when `do`, `else` or `end`
/// reaches them.

pub fn associate(ctx: &mut Context, tokens: &[Token]) -> Result<Tape> {
    let mut associator = Associator {
        ctx,
        tape: Tape::new(),
        pending: vec![],
        unresolved_whiles: 0,
    };
    let mut tokens = tokens.iter();
    while let Some(token) = tokens.next() {
        associator.token(token, &mut tokens)?;
    }
    associator.finish()
}

struct Associator<'a> {
    ctx: &'a mut Context,
    tape: Tape,
    pending: Vec<Address>,
    unresolved_whiles: usize,
}

impl<'a> Associator<'a> {
    fn token(&mut self, token: &Token, rest: &mut std::slice::Iter<'_, Token>) -> Result<()> {
        let loc = token.loc.clone();
        match token.kind {
            TokenKind::Number => {
                let n = Operation::parse_number(&token.lexeme).map_err(|e| e.in_location(&loc))?;
                self.tape.push(Opcode::NumberLiteral(n), loc);
            }
            TokenKind::String => {
                self.tape
                    .push(Opcode::StringLiteral(token.lexeme.as_str().into()), loc);
            }
            TokenKind::Ident => {
                self.tape.push(Opcode::Call(token.lexeme.as_str().into()), loc);
            }
            TokenKind::Keyword => match token.keyword() {
                Some(keyword) => self.keyword(keyword, loc, rest)?,
                None => return Err(error!(InternalError, ..&loc; "unknown keyword")),
            },
        }
        Ok(())
    }

    fn keyword(
        &mut self,
        keyword: Keyword,
        loc: Location,
        rest: &mut std::slice::Iter<'_, Token>,
    ) -> Result<()> {
        match keyword {
            Keyword::If => {
                let ip = self.tape.push(
                    Opcode::If {
                        else_ip: None,
                        end_ip: UNRESOLVED,
                    },
                    loc,
                );
                self.pending.push(ip);
            }
            Keyword::Else => self.else_branch(loc)?,
            Keyword::Repeat => {
                let ip = self.tape.len();
                self.tape.push(
                    Opcode::Repeat {
                        start_ip: ip,
                        end_ip: UNRESOLVED,
                    },
                    loc,
                );
                self.pending.push(ip);
            }
            Keyword::While => {
                let ip = self.tape.len();
                self.tape.push(
                    Opcode::While {
                        predicate_ip: ip,
                        body_ip: UNRESOLVED,
                        end_ip: UNRESOLVED,
                    },
                    loc,
                );
                self.pending.push(ip);
                self.unresolved_whiles += 1;
            }
            Keyword::Do => self.while_body(loc)?,
            Keyword::Let => {
                let mut names: Vec<Rc<str>> = vec![];
                let mut closed = false;
                for token in rest.by_ref() {
                    if token.is_keyword(Keyword::Do) {
                        closed = true;
                        break;
                    }
                    match token.kind {
                        TokenKind::Ident => names.push(token.lexeme.as_str().into()),
                        _ => {
                            return Err(error!(MalformedBinding, ..&token.loc;
                                format!("expected a name to bind, found {}", token)))
                        }
                    }
                }
                if !closed {
                    return Err(error!(MalformedBinding, ..&loc; "let without do"));
                }
                if names.is_empty() {
                    return Err(error!(MalformedBinding, ..&loc; "let binds no names"));
                }
                let ip = self.tape.push(Opcode::LetBinding(names.into()), loc);
                self.pending.push(ip);
            }
            Keyword::Fn => self.function(loc, rest)?,
            Keyword::Var => {
                let name = match rest.next() {
                    Some(token) if token.kind == TokenKind::Ident => token.lexeme.as_str(),
                    Some(token) => {
                        return Err(error!(MalformedBinding, ..&token.loc;
                            format!("expected a variable name, found {}", token)))
                    }
                    None => return Err(error!(MalformedBinding, ..&loc; "var without a name")),
                };
                let ip = self.tape.push(
                    Opcode::VarDefine {
                        name: name.into(),
                        end_ip: UNRESOLVED,
                    },
                    loc,
                );
                self.pending.push(ip);
            }
            Keyword::Import => {
                let name = match rest.next() {
                    Some(token) if token.kind != TokenKind::Keyword => token.lexeme.clone(),
                    _ => return Err(error!(MissingImport, ..&loc; "import needs a module name")),
                };
                self.import(&name, loc)?;
            }
            Keyword::End => self.end(loc)?,
            Keyword::Colon => {
                return Err(error!(MisplacedKeyword, ..&loc; "`:` outside of a function signature"))
            }
        }
        Ok(())
    }

    fn pending_opcode(&mut self) -> Option<&mut Opcode> {
        let ip = *self.pending.last()?;
        self.tape.get_mut(ip).map(|instruction| &mut instruction.opcode)
    }

    fn else_branch(&mut self, loc: Location) -> Result<()> {
        let at = self.tape.len();
        let patched = match self.pending_opcode() {
            Some(Opcode::If { else_ip, .. }) if else_ip.is_none() => {
                *else_ip = Some(at);
                true
            }
            _ => false,
        };
        if !patched {
            return Err(error!(MisplacedKeyword, ..&loc; "else without a matching if"));
        }
        self.tape.push(Opcode::Noop, loc);
        Ok(())
    }

    fn while_body(&mut self, loc: Location) -> Result<()> {
        let at = self.tape.len();
        let patched = match self.pending_opcode() {
            Some(Opcode::While { body_ip, .. }) if *body_ip == UNRESOLVED => {
                *body_ip = at;
                true
            }
            _ => false,
        };
        if !patched {
            return Err(error!(MisplacedKeyword, ..&loc; "do without a matching while"));
        }
        self.unresolved_whiles -= 1;
        self.tape.push(Opcode::Noop, loc);
        Ok(())
    }

    /// `fn <name> <inputs...> : <outputs...> do`
    fn function(&mut self, loc: Location, rest: &mut std::slice::Iter<'_, Token>) -> Result<()> {
        let name: Rc<str> = match rest.next() {
            Some(token) if token.kind == TokenKind::Ident => token.lexeme.as_str().into(),
            Some(token) => {
                return Err(error!(MalformedFunction, ..&token.loc;
                    format!("expected a function name, found {}", token)))
            }
            None => return Err(error!(MalformedFunction, ..&loc; "fn without a name")),
        };
        let inputs = signature_types(rest, Keyword::Colon, &loc)?;
        let outputs = signature_types(rest, Keyword::Do, &loc)?;
        let ip = self.tape.len();
        let def = FunctionDef {
            name,
            inputs,
            outputs,
            start_ip: ip + 1,
            end_ip: UNRESOLVED,
        };
        self.tape.push(Opcode::Function(Rc::new(def)), loc.clone());
        self.tape.push(Opcode::Noop, loc.clone());
        self.tape.push(Opcode::FunctionStart, loc);
        self.pending.push(ip);
        Ok(())
    }

    fn import(&mut self, name: &str, loc: Location) -> Result<()> {
        if !self.ctx.config.splice_imports {
            self.tape.push(Opcode::Import(name.into()), loc);
            return Ok(());
        }
        let module = associate_module(self.ctx, name, &loc)?;
        debug!(
            module = name,
            instructions = module.len(),
            offset = self.tape.len(),
            "splicing module"
        );
        self.tape.splice(module);
        Ok(())
    }

    fn end(&mut self, loc: Location) -> Result<()> {
        let ip = match self.pending.pop() {
            Some(ip) => ip,
            None => return Err(error!(UnmatchedEnd, ..&loc; "end without an open block")),
        };
        let at = self.tape.len();
        let instruction = match self.tape.get_mut(ip) {
            Some(instruction) => instruction,
            None => return Err(error!(InternalError, ..&loc; "pending block outside the tape")),
        };
        let mut closing = vec![];
        match &mut instruction.opcode {
            Opcode::If { end_ip, .. }
            | Opcode::Repeat { end_ip, .. }
            | Opcode::While { end_ip, .. }
            | Opcode::VarDefine { end_ip, .. } => *end_ip = at,
            Opcode::Function(def) => {
                Rc::make_mut(def).end_ip = at;
                closing.push(Opcode::Return);
                closing.push(Opcode::VarDrop);
            }
            Opcode::LetBinding(names) => closing.push(Opcode::DropBinding(names.clone())),
            _ => return Err(error!(InternalError, ..&loc; "end closes a non-block instruction")),
        }
        for opcode in closing {
            self.tape.push(opcode, loc.clone());
        }
        self.tape.push(Opcode::Noop, loc);
        Ok(())
    }

    fn finish(self) -> Result<Tape> {
        if let Some(&ip) = self.pending.last() {
            if let Some(instruction) = self.tape.get(ip) {
                let construct = match instruction.opcode {
                    Opcode::If { .. } => "if",
                    Opcode::Repeat { .. } => "repeat",
                    Opcode::While { .. } => "while",
                    Opcode::LetBinding(_) => "let",
                    Opcode::VarDefine { .. } => "var",
                    Opcode::Function(_) => "function",
                    _ => "block",
                };
                return Err(error!(UnterminatedBlock, ..&instruction.loc;
                    format!("unterminated {}", construct)));
            }
        }
        if self.unresolved_whiles > 0 {
            for instruction in self.tape.iter() {
                if let Opcode::While { body_ip, .. } = instruction.opcode {
                    if body_ip == UNRESOLVED {
                        return Err(error!(UnterminatedBlock, ..&instruction.loc;
                            "while has no matching do"));
                    }
                }
            }
        }
        Ok(self.tape)
    }
}

/// Collect type names up to `until`.
fn signature_types(
    rest: &mut std::slice::Iter<'_, Token>,
    until: Keyword,
    loc: &Location,
) -> Result<Vec<Rc<str>>> {
    let mut names = vec![];
    for token in rest {
        if token.is_keyword(until) {
            return Ok(names);
        }
        match token.kind {
            TokenKind::Ident => names.push(token.lexeme.as_str().into()),
            _ => {
                return Err(error!(MalformedFunction, ..&token.loc;
                    format!("expected a type name or `{}`, found {}", until, token)))
            }
        }
    }
    Err(error!(MalformedFunction, ..loc; format!("function signature has no `{}`", until)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{ErrorCode, MemoryLoader};
    use crate::mach::Config;

    fn tape(src: &str) -> Result<Tape> {
        let mut ctx = Context::new(Config::default(), MemoryLoader::new());
        compile(&mut ctx, "test", src)
    }

    fn listing(src: &str) -> Vec<String> {
        tape(src)
            .unwrap()
            .opcodes()
            .iter()
            .map(|op| op.to_string())
            .collect()
    }

    #[test]
    fn test_if_targets() {
        assert_eq!(
            listing("0 if 1 pr end"),
            vec!["number 0", "if -> 4", "number 1", "call pr", "noop"]
        );
        assert_eq!(
            listing("1 if 2 else 3 end"),
            vec!["number 1", "if -> 3 -> 5", "number 2", "noop", "number 3", "noop"]
        );
    }

    #[test]
    fn test_while_targets() {
        assert_eq!(
            listing("while 1 do end"),
            vec!["while 0 -> 2 -> 3", "number 1", "noop", "noop"]
        );
    }

    #[test]
    fn test_function_layout() {
        assert_eq!(
            listing("fn double n : n do dup + end"),
            vec![
                "fn double n : n -> 1 -> 5",
                "noop",
                "fn-start",
                "call dup",
                "call +",
                "return",
                "var-drop",
                "noop"
            ]
        );
    }

    #[test]
    fn test_let_layout() {
        assert_eq!(
            listing("1 2 let x y do x end"),
            vec![
                "number 1",
                "number 2",
                "let x y",
                "call x",
                "drop-let x y",
                "noop"
            ]
        );
    }

    #[test]
    fn test_errors() {
        let code = |src| tape(src).unwrap_err().code();
        assert_eq!(code("end"), ErrorCode::UnmatchedEnd);
        assert_eq!(code("1 if"), ErrorCode::UnterminatedBlock);
        assert_eq!(code("while 1 end"), ErrorCode::UnterminatedBlock);
        assert_eq!(code("do"), ErrorCode::MisplacedKeyword);
        assert_eq!(code("while 1 do do end"), ErrorCode::MisplacedKeyword);
        assert_eq!(code("else"), ErrorCode::MisplacedKeyword);
        assert_eq!(code("1 if else else end"), ErrorCode::MisplacedKeyword);
        assert_eq!(code("fn : do end"), ErrorCode::MalformedFunction);
        assert_eq!(code("fn f n do end"), ErrorCode::MalformedFunction);
        assert_eq!(code("let 1 do end"), ErrorCode::MalformedBinding);
        assert_eq!(code("import nothing"), ErrorCode::MissingImport);
        assert_eq!(code("import ./lib"), ErrorCode::ImportNotImplemented);
    }
}
