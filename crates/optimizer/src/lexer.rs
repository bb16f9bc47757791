use std::fmt;

use tracing::warn;

use crate::errors::{OptimizerError, OptimizerResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Number(i64),
    Ident(String),
    For,
    Int,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Equals,
    Plus,
    PlusPlus,
    PlusEqual,
    Lt,
    Le,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Ident(name) => f.write_str(name),
            TokenKind::For => f.write_str("for"),
            TokenKind::Int => f.write_str("int"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Equals => f.write_str("="),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::PlusPlus => f.write_str("++"),
            TokenKind::PlusEqual => f.write_str("+="),
            TokenKind::Lt => f.write_str("<"),
            TokenKind::Le => f.write_str("<="),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Разбить исходник на токены
///
/// Недопустимые символы пропускаются с предупреждением в лог,
/// разбор продолжается.
pub fn tokenize(source: &str) -> OptimizerResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    let mut line = 1;

    while let Some((start, ch)) = chars.next() {
        let kind = match ch {
            '\n' => {
                line += 1;
                continue;
            }
            c if c.is_whitespace() => continue,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semicolon,
            '=' => TokenKind::Equals,
            '<' => {
                if chars.next_if(|&(_, c)| c == '=').is_some() {
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '+' => match chars.peek() {
                Some(&(_, '+')) => {
                    chars.next();
                    TokenKind::PlusPlus
                }
                Some(&(_, '=')) => {
                    chars.next();
                    TokenKind::PlusEqual
                }
                _ => TokenKind::Plus,
            },
            c if c.is_ascii_digit() => {
                let mut end = start + 1;
                while let Some((i, _)) = chars.next_if(|&(_, c)| c.is_ascii_digit()) {
                    end = i + 1;
                }
                let literal = &source[start..end];
                let value = literal.parse().map_err(|_| OptimizerError::NumberOverflow {
                    line,
                    literal: literal.to_string(),
                })?;
                TokenKind::Number(value)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = start + 1;
                while let Some((i, _)) = chars.next_if(|&(_, c)| c.is_ascii_alphanumeric() || c == '_') {
                    end = i + 1;
                }
                match &source[start..end] {
                    "for" => TokenKind::For,
                    "int" => TokenKind::Int,
                    ident => TokenKind::Ident(ident.to_string()),
                }
            }
            other => {
                warn!(line, character = %other, "Illegal character skipped");
                continue;
            }
        };
        tokens.push(Token { kind, line });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_loop_header() {
        assert_eq!(
            kinds("for (int i = 0; i <= 99; i++)"),
            vec![
                TokenKind::For,
                TokenKind::LParen,
                TokenKind::Int,
                TokenKind::Ident("i".into()),
                TokenKind::Equals,
                TokenKind::Number(0),
                TokenKind::Semicolon,
                TokenKind::Ident("i".into()),
                TokenKind::Le,
                TokenKind::Number(99),
                TokenKind::Semicolon,
                TokenKind::Ident("i".into()),
                TokenKind::PlusPlus,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_keywords_are_whole_words() {
        assert_eq!(
            kinds("format integer i+=2"),
            vec![
                TokenKind::Ident("format".into()),
                TokenKind::Ident("integer".into()),
                TokenKind::Ident("i".into()),
                TokenKind::PlusEqual,
                TokenKind::Number(2),
            ]
        );
    }

    #[test]
    fn test_line_numbers() {
        let tokens = tokenize("int a[4];\n\nx = 1;").unwrap();
        assert_eq!(tokens.first().unwrap().line, 1);
        assert_eq!(tokens.last().unwrap().line, 3);
    }

    #[test]
    fn test_illegal_characters_skipped() {
        assert_eq!(
            kinds("x = 1 @ ;"),
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Equals,
                TokenKind::Number(1),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_number_overflow() {
        let err = tokenize("x = 99999999999999999999;").unwrap_err();
        assert_eq!(err.line(), Some(1));
    }
}
