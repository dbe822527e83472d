// crates/infra/src/subset/lexer.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CmpOp {
    pub(crate) fn as_evalexpr(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Field(String),
    Number(String),
    Text(String),
    Bool(bool),
    And,
    Or,
    Not,
    Minus,
    Cmp(CmpOp),
    LParen,
    RParen,
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '"' => tokens.push(Token::Field(quoted(&chars, &mut i, '"')?)),
            '\'' => tokens.push(Token::Text(quoted(&chars, &mut i, '\'')?)),
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '<' => {
                let (op, width) = match chars.get(i + 1) {
                    Some('=') => (CmpOp::LtEq, 2),
                    Some('>') => (CmpOp::NotEq, 2),
                    _ => (CmpOp::Lt, 1),
                };
                tokens.push(Token::Cmp(op));
                i += width;
            }
            '>' => {
                let (op, width) =
                    if chars.get(i + 1) == Some(&'=') { (CmpOp::GtEq, 2) } else { (CmpOp::Gt, 1) };
                tokens.push(Token::Cmp(op));
                i += width;
            }
            '=' => {
                tokens.push(Token::Cmp(CmpOp::Eq));
                i += if chars.get(i + 1) == Some(&'=') { 2 } else { 1 };
            }
            '!' if chars.get(i + 1) == Some(&'=') => {
                tokens.push(Token::Cmp(CmpOp::NotEq));
                i += 2;
            }
            c if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit)) => {
                tokens.push(Token::Number(number(&chars, &mut i)));
            }
            c if c.is_alphabetic() || c == '_' => tokens.push(word(&chars, &mut i)),
            other => return Err(format!("unexpected character '{other}' at position {i}")),
        }
    }

    Ok(tokens)
}

/// Reads a `quote`-delimited run starting at `chars[*i]`; a doubled quote is a literal quote.
fn quoted(chars: &[char], i: &mut usize, quote: char) -> Result<String, String> {
    let start = *i;
    let mut text = String::new();
    *i += 1;
    loop {
        match chars.get(*i) {
            None => return Err(format!("unterminated {quote} starting at position {start}")),
            Some(&c) if c == quote => {
                if chars.get(*i + 1) == Some(&quote) {
                    text.push(quote);
                    *i += 2;
                } else {
                    *i += 1;
                    return Ok(text);
                }
            }
            Some(&c) => {
                text.push(c);
                *i += 1;
            }
        }
    }
}

fn number(chars: &[char], i: &mut usize) -> String {
    let mut text = String::new();
    if chars[*i] == '.' {
        text.push('0');
    }
    let mut seen_dot = false;
    while let Some(&c) = chars.get(*i) {
        if c.is_ascii_digit() {
            text.push(c);
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            text.push(c);
        } else {
            break;
        }
        *i += 1;
    }
    text
}

fn word(chars: &[char], i: &mut usize) -> Token {
    let mut text = String::new();
    while let Some(&c) = chars.get(*i) {
        if c.is_alphanumeric() || c == '_' {
            text.push(c);
            *i += 1;
        } else {
            break;
        }
    }
    match text.to_ascii_uppercase().as_str() {
        "AND" => Token::And,
        "OR" => Token::Or,
        "NOT" => Token::Not,
        "TRUE" => Token::Bool(true),
        "FALSE" => Token::Bool(false),
        _ => Token::Field(text),
    }
}
