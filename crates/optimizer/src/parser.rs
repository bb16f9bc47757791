use crate::ast::{AssignStmt, DeclStmt, ForStmt, SourceProgram, Statement};
use crate::errors::{OptimizerError, OptimizerResult};
use crate::ir::{Cmp, Index, Operand, Place};
use crate::lexer::{tokenize, Token, TokenKind};

/// Разобрать исходник в синтаксическое дерево
pub fn parse(source: &str) -> OptimizerResult<SourceProgram> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn error(&self, expected: &str) -> OptimizerError {
        match self.tokens.get(self.pos) {
            Some(token) => OptimizerError::Syntax {
                line: token.line,
                found: token.kind.to_string(),
                expected: expected.to_string(),
            },
            None => OptimizerError::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> OptimizerResult<()> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(self.error(&format!("'{}'", kind)))
        }
    }

    fn ident(&mut self) -> OptimizerResult<String> {
        match self.peek() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error("identifier")),
        }
    }

    fn number(&mut self) -> OptimizerResult<i64> {
        match self.peek() {
            Some(TokenKind::Number(n)) => {
                let n = *n;
                self.pos += 1;
                Ok(n)
            }
            _ => Err(self.error("number")),
        }
    }

    // program := statement+
    fn program(mut self) -> OptimizerResult<SourceProgram> {
        let mut statements = vec![self.statement()?];
        while self.peek().is_some() {
            statements.push(self.statement()?);
        }
        Ok(SourceProgram { statements })
    }

    fn statement(&mut self) -> OptimizerResult<Statement> {
        match self.peek() {
            Some(TokenKind::Int) => self.declaration().map(Statement::Decl),
            Some(TokenKind::For) => self.for_loop().map(Statement::For),
            Some(TokenKind::Ident(_)) => self.assignment().map(Statement::Assign),
            _ => Err(self.error("declaration, for loop or assignment")),
        }
    }

    // decl := "int" ID ("[" NUMBER "]")? ";"
    fn declaration(&mut self) -> OptimizerResult<DeclStmt> {
        let line = self.line();
        self.expect(TokenKind::Int)?;
        let name = self.ident()?;
        let size = if self.eat(&TokenKind::LBracket) {
            let size = self.number()?;
            self.expect(TokenKind::RBracket)?;
            Some(size)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(DeclStmt { name, size, line })
    }

    fn for_loop(&mut self) -> OptimizerResult<ForStmt> {
        let line = self.line();
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;

        self.eat(&TokenKind::Int);
        let var = self.ident()?;
        self.expect(TokenKind::Equals)?;
        let start = self.number()?;
        self.expect(TokenKind::Semicolon)?;

        let cond_var = self.ident()?;
        let cmp = if self.eat(&TokenKind::Lt) {
            Cmp::Lt
        } else if self.eat(&TokenKind::Le) {
            Cmp::Le
        } else {
            return Err(self.error("'<' or '<='"));
        };
        let end = self.number()?;
        self.expect(TokenKind::Semicolon)?;

        let step_var = self.ident()?;
        let step = if self.eat(&TokenKind::PlusPlus) {
            1
        } else if self.eat(&TokenKind::PlusEqual) {
            self.number()?
        } else {
            return Err(self.error("'++' or '+='"));
        };
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !self.eat(&TokenKind::RBrace) {
            if self.peek().is_none() {
                return Err(self.error("'}'"));
            }
            body.push(self.statement()?);
        }

        Ok(ForStmt {
            var,
            start,
            cond_var,
            cmp,
            end,
            step_var,
            step,
            body,
            line,
        })
    }

    // assign := place "=" operand ("+" operand)? ";"
    fn assignment(&mut self) -> OptimizerResult<AssignStmt> {
        let line = self.line();
        let target = self.place()?;
        self.expect(TokenKind::Equals)?;
        let lhs = self.operand()?;
        let rhs = if self.eat(&TokenKind::Plus) {
            Some(self.operand()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(AssignStmt {
            target,
            lhs,
            rhs,
            line,
        })
    }

    fn place(&mut self) -> OptimizerResult<Place> {
        let name = self.ident()?;
        if !self.eat(&TokenKind::LBracket) {
            return Ok(Place::Scalar(name));
        }
        let index = self.index()?;
        self.expect(TokenKind::RBracket)?;
        Ok(Place::Element { array: name, index })
    }

    // index := NUMBER | ID ("+" NUMBER)?
    fn index(&mut self) -> OptimizerResult<Index> {
        if let Some(TokenKind::Number(_)) = self.peek() {
            return self.number().map(Index::Const);
        }
        let name = self.ident()?;
        let offset = if self.eat(&TokenKind::Plus) {
            self.number()?
        } else {
            0
        };
        Ok(Index::Var { name, offset })
    }

    fn operand(&mut self) -> OptimizerResult<Operand> {
        match self.peek() {
            Some(TokenKind::Number(_)) => self.number().map(Operand::Const),
            Some(TokenKind::Ident(_)) => self.place().map(Operand::Place),
            _ => Err(self.error("array element, variable or number")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations() {
        let program = parse("int a[100];\nint x;").unwrap();
        assert_eq!(
            program.statements,
            vec![
                Statement::Decl(DeclStmt {
                    name: "a".into(),
                    size: Some(100),
                    line: 1
                }),
                Statement::Decl(DeclStmt {
                    name: "x".into(),
                    size: None,
                    line: 2
                }),
            ]
        );
    }

    #[test]
    fn test_for_loop_with_step() {
        let program = parse("for (i = 2; i < 10; i += 2) { a[i+1] = a[i] + 1; }").unwrap();
        let Statement::For(ref l) = program.statements[0] else {
            panic!("expected loop");
        };
        assert_eq!((l.start, l.end, l.step, l.cmp), (2, 10, 2, Cmp::Lt));
        assert_eq!(l.body.len(), 1);
        let Statement::Assign(ref assign) = l.body[0] else {
            panic!("expected assignment");
        };
        assert_eq!(assign.target.to_string(), "a[i+1]");
        assert_eq!(assign.rhs, Some(Operand::Const(1)));
    }

    #[test]
    fn test_syntax_error_reports_token_and_line() {
        let err = parse("int a[4];\nfor (int i = 0; i = 4; i++) {}").unwrap_err();
        assert_eq!(
            err,
            OptimizerError::Syntax {
                line: 2,
                found: "=".into(),
                expected: "'<' or '<='".into(),
            }
        );
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse("for (int i = 0; i < 4; i++) { a[i] = 1;").unwrap_err();
        assert!(matches!(err, OptimizerError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            parse("   \n").unwrap_err(),
            OptimizerError::UnexpectedEof { .. }
        ));
    }
}
