//! Spoken arithmetic
//!
//! Turns "what is 12 divided by 4" into `12 / 4` and evaluates it with a small
//! recursive-descent parser. The grammar only admits numbers, `+ - * /`,
//! unary signs and parentheses:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | '(' expr ')'
//! ```

use thiserror::Error;

/// Filler phrases removed before parsing
const FILLER: &[&str] = &["what is", "calculate", "what's"];

/// Spoken operators and their symbols, applied in order
const OPERATOR_WORDS: &[(&str, &str)] = &[
    ("plus", "+"),
    ("minus", "-"),
    ("times", "*"),
    ("multiplied by", "*"),
    ("divided by", "/"),
    ("add", "+"),
    ("subtract", "-"),
    ("multiply", "*"),
    ("×", "*"),
    ("÷", "/"),
];

/// Nesting limit for parentheses and unary signs
const MAX_DEPTH: usize = 64;

/// Why an expression could not be evaluated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),

    #[error("expression nested too deeply")]
    TooDeep,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NotFinite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// Rewrite a spoken request as a symbolic expression
///
/// Filler words and trailing punctuation are dropped, thousands separators are
/// removed and operator words become symbols. The result still has to parse.
#[must_use]
pub fn spoken_to_expression(transcript: &str) -> String {
    let mut expr = transcript.to_lowercase();
    for filler in FILLER {
        expr = expr.replace(filler, "");
    }
    for (word, symbol) in OPERATOR_WORDS {
        expr = expr.replace(word, symbol);
    }
    expr.replace(',', "")
        .trim()
        .trim_end_matches(['?', '.', '!'])
        .trim()
        .to_string()
}

/// Evaluate a symbolic arithmetic expression
///
/// # Errors
///
/// Returns [`CalcError`] if the text is not a well-formed expression or the
/// result is undefined
pub fn evaluate(expr: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr(0)?;
    if let Some(&token) = parser.peek() {
        return Err(CalcError::UnexpectedToken(token));
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NotFinite)
    }
}

/// Evaluate a spoken request
///
/// # Errors
///
/// Returns [`CalcError`] if the rewritten text does not evaluate
pub fn evaluate_spoken(transcript: &str) -> Result<f64, CalcError> {
    evaluate(&spoken_to_expression(transcript))
}

/// Render a result the way people say it: `4`, not `4.0`
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn tokenize(expr: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' | '*' | '/' | '(' | ')' => {
                chars.next();
                tokens.push(match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '(' => Token::LParen,
                    _ => Token::RParen,
                });
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &expr[start..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| CalcError::InvalidNumber(literal.to_string()))?;
                tokens.push(Token::Number(value));
            }
            other => return Err(CalcError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    fn expr(&mut self, depth: usize) -> Result<f64, CalcError> {
        let mut value = self.term(depth)?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term(depth)?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term(depth)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self, depth: usize) -> Result<f64, CalcError> {
        let mut value = self.factor(depth)?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.factor(depth)?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.factor(depth)?;
                    if divisor == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self, depth: usize) -> Result<f64, CalcError> {
        if depth > MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }

        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Minus) => Ok(-self.factor(depth + 1)?),
            Some(Token::Plus) => self.factor(depth + 1),
            Some(Token::LParen) => {
                let value = self.expr(depth + 1)?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(token) => Err(CalcError::UnexpectedToken(token)),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(token) => Err(CalcError::UnexpectedToken(token)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spoken_operators_become_symbols() {
        assert_eq!(spoken_to_expression("what is 2 plus 2"), "2 + 2");
        assert_eq!(spoken_to_expression("calculate 10 divided by 4?"), "10 / 4");
        assert_eq!(spoken_to_expression("what's 3 multiplied by 5"), "3 * 5");
        assert_eq!(spoken_to_expression("what is 1,000 minus 1"), "1000 - 1");
    }

    #[test]
    fn precedence_and_grouping() {
        assert!((evaluate("2 + 3 * 4").unwrap() - 14.0).abs() < f64::EPSILON);
        assert!((evaluate("(2 + 3) * 4").unwrap() - 20.0).abs() < f64::EPSILON);
        assert!((evaluate("10 - 4 - 3").unwrap() - 3.0).abs() < f64::EPSILON);
        assert!((evaluate("-3 * -2").unwrap() - 6.0).abs() < f64::EPSILON);
        assert!((evaluate("7 / 2").unwrap() - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn spoken_requests_evaluate() {
        assert!((evaluate_spoken("what is 2 plus 2").unwrap() - 4.0).abs() < f64::EPSILON);
        assert!((evaluate_spoken("6 times 7").unwrap() - 42.0).abs() < f64::EPSILON);
        assert!((evaluate_spoken("subtract 3").unwrap() + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_words_and_code() {
        assert_eq!(
            evaluate_spoken("what is banana plus 2"),
            Err(CalcError::UnexpectedChar('b'))
        );
        assert!(evaluate("__import__('os')").is_err());
        assert!(evaluate("2 ** 3").is_err());
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert_eq!(evaluate(""), Err(CalcError::Empty));
        assert_eq!(evaluate("2 +"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate("(2 + 3"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate("2 3"), Err(CalcError::UnexpectedToken(Token::Number(3.0))));
        assert_eq!(evaluate("1.2.3"), Err(CalcError::InvalidNumber("1.2.3".to_string())));
        assert_eq!(evaluate("1 / 0"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn deep_nesting_is_bounded() {
        let expr = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        assert_eq!(evaluate(&expr), Err(CalcError::TooDeep));
        let minuses = format!("{}1", "-".repeat(500));
        assert_eq!(evaluate(&minuses), Err(CalcError::TooDeep));
    }

    #[test]
    fn overflow_is_not_finite() {
        let huge = format!("1{} * 1{}", "0".repeat(300), "0".repeat(300));
        assert_eq!(evaluate(&huge), Err(CalcError::NotFinite));
    }

    #[test]
    fn numbers_format_like_speech() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.25), "0.25");
    }
}
