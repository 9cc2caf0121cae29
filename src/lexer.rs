use crate::ast::Token;

/// Splits a raw query string into parenthesis and text tokens.
///
/// `(` and `)` are always isolated as their own tokens, even when glued to
/// adjacent text. Everything between them is kept as a single trimmed text
/// token with interior whitespace intact, so a command like
/// `duration gt 1000` survives as one unit. Tokenization itself never
/// fails; malformed input surfaces later in the parser.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn read_text(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '(' || ch == ')' {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.current_char() {
            match ch {
                '(' => {
                    self.advance();
                    tokens.push(Token::LParen);
                }
                ')' => {
                    self.advance();
                    tokens.push(Token::RParen);
                }
                _ => {
                    let text = self.read_text();
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        tokens.push(Token::Text(trimmed.to_string()));
                    }
                }
            }
        }

        tokens
    }
}

#[test]
fn test_parens_are_isolated() {
    let tokens = Lexer::new("(duration gt 1000)").tokenize();
    assert_eq!(
        tokens,
        vec![
            Token::LParen,
            Token::Text("duration gt 1000".to_string()),
            Token::RParen,
        ]
    );
}

#[test]
fn test_connectives_between_groups() {
    let tokens = Lexer::new("(distance gt 4100) OR (distance lt 2500)").tokenize();
    assert_eq!(
        tokens,
        vec![
            Token::LParen,
            Token::Text("distance gt 4100".to_string()),
            Token::RParen,
            Token::Text("OR".to_string()),
            Token::LParen,
            Token::Text("distance lt 2500".to_string()),
            Token::RParen,
        ]
    );
}

#[test]
fn test_no_whitespace_around_parens() {
    let tokens = Lexer::new("((duration gt 1)AND(duration lt 9))").tokenize();
    assert_eq!(
        tokens,
        vec![
            Token::LParen,
            Token::LParen,
            Token::Text("duration gt 1".to_string()),
            Token::RParen,
            Token::Text("AND".to_string()),
            Token::LParen,
            Token::Text("duration lt 9".to_string()),
            Token::RParen,
            Token::RParen,
        ]
    );
}

#[test]
fn test_interior_spacing_is_preserved() {
    let tokens = Lexer::new("  (  duration   gt   1000  )  ").tokenize();
    assert_eq!(
        tokens,
        vec![
            Token::LParen,
            Token::Text("duration   gt   1000".to_string()),
            Token::RParen,
        ]
    );
}

#[test]
fn test_empty_input() {
    assert!(Lexer::new("").tokenize().is_empty());
    assert!(Lexer::new("   ").tokenize().is_empty());
}

#[test]
fn test_bare_command_without_parens() {
    let tokens = Lexer::new("duration gt 1000").tokenize();
    assert_eq!(tokens, vec![Token::Text("duration gt 1000".to_string())]);
}
