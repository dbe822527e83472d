// crates/infra/src/subset/parser.rs
use super::lexer::{CmpOp, Token};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Or(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    Compare(Operand, CmpOp, Operand),
    Value(Operand),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    Field(String),
    Number(String),
    Text(String),
    Bool(bool),
    Group(Box<Expr>),
}

/// Deepest expression tree accepted. Deeper input is rejected before it can
/// exhaust the stack while parsing, rewriting or evaluating.
pub(crate) const MAX_DEPTH: usize = 256;

/// Recursive descent with SQL precedence: `OR` < `AND` < `NOT` < comparison.
///
/// Every rule returns the depth of the tree it built alongside the node.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nesting: usize,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0, nesting: 0 }
    }

    pub(crate) fn parse(mut self) -> Result<Expr, String> {
        let (expr, _) = self.or()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(format!("unexpected {token:?} after complete expression")),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn descend(&mut self) -> Result<(), String> {
        self.nesting += 1;
        limit(self.nesting).map(|_| ())
    }

    fn or(&mut self) -> Result<(Expr, usize), String> {
        let (mut lhs, mut depth) = self.and()?;
        while self.eat(&Token::Or) {
            let (rhs, rhs_depth) = self.and()?;
            depth = limit(depth.max(rhs_depth) + 1)?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok((lhs, depth))
    }

    fn and(&mut self) -> Result<(Expr, usize), String> {
        let (mut lhs, mut depth) = self.not()?;
        while self.eat(&Token::And) {
            let (rhs, rhs_depth) = self.not()?;
            depth = limit(depth.max(rhs_depth) + 1)?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok((lhs, depth))
    }

    fn not(&mut self) -> Result<(Expr, usize), String> {
        if self.eat(&Token::Not) {
            self.descend()?;
            let (inner, depth) = self.not()?;
            self.nesting -= 1;
            return Ok((Expr::Not(Box::new(inner)), limit(depth + 1)?));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<(Expr, usize), String> {
        let (lhs, lhs_depth) = self.operand()?;
        if let Some(Token::Cmp(op)) = self.peek().cloned() {
            self.pos += 1;
            let (rhs, rhs_depth) = self.operand()?;
            let depth = limit(lhs_depth.max(rhs_depth) + 1)?;
            return Ok((Expr::Compare(lhs, op, rhs), depth));
        }
        Ok((Expr::Value(lhs), lhs_depth))
    }

    fn operand(&mut self) -> Result<(Operand, usize), String> {
        let operand = match self.next() {
            Some(Token::Field(name)) => Operand::Field(name),
            Some(Token::Number(n)) => Operand::Number(n),
            Some(Token::Text(s)) => Operand::Text(s),
            Some(Token::Bool(b)) => Operand::Bool(b),
            Some(Token::Minus) => match self.next() {
                Some(Token::Number(n)) => Operand::Number(format!("-{n}")),
                other => return Err(format!("expected a number after '-', found {other:?}")),
            },
            Some(Token::LParen) => {
                self.descend()?;
                let (inner, depth) = self.or()?;
                if !self.eat(&Token::RParen) {
                    return Err("missing closing parenthesis".to_string());
                }
                self.nesting -= 1;
                return Ok((Operand::Group(Box::new(inner)), limit(depth + 1)?));
            }
            Some(other) => return Err(format!("unexpected {other:?}")),
            None => return Err("unexpected end of expression".to_string()),
        };
        Ok((operand, 1))
    }
}

fn limit(depth: usize) -> Result<usize, String> {
    if depth > MAX_DEPTH {
        return Err(format!("expression nests deeper than {MAX_DEPTH} levels"));
    }
    Ok(depth)
}

/// Generated variable names for the fields an expression references.
///
/// A field compared against an integer literal is marked as an integer field;
/// its values must coerce to whole numbers.
#[derive(Debug, Default)]
pub(crate) struct FieldVars {
    names: Vec<String>,
    integer: Vec<bool>,
}

impl FieldVars {
    pub(crate) fn variable_name(index: usize) -> String {
        format!("field_{index}")
    }

    fn index(&mut self, field: &str) -> usize {
        self.names.iter().position(|n| n == field).unwrap_or_else(|| {
            self.names.push(field.to_string());
            self.integer.push(false);
            self.names.len() - 1
        })
    }

    fn variable(&mut self, field: &str) -> String {
        Self::variable_name(self.index(field))
    }

    fn mark_integer(&mut self, field: &str) {
        let index = self.index(field);
        self.integer[index] = true;
    }

    /// Field names in first-use order, and whether each is an integer field.
    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<bool>) {
        (self.names, self.integer)
    }
}

impl Expr {
    /// Writes the expression in `evalexpr` syntax, fully parenthesised.
    pub(crate) fn emit(&self, vars: &mut FieldVars, out: &mut String) {
        match self {
            Self::Or(a, b) => binary(a, "||", b, vars, out),
            Self::And(a, b) => binary(a, "&&", b, vars, out),
            Self::Not(inner) => {
                out.push_str("(!");
                inner.emit(vars, out);
                out.push(')');
            }
            Self::Compare(lhs, op, rhs) => {
                if let (Operand::Field(name), Operand::Number(n))
                | (Operand::Number(n), Operand::Field(name)) = (lhs, rhs)
                {
                    if !n.contains('.') {
                        vars.mark_integer(name);
                    }
                }
                out.push('(');
                lhs.emit(vars, out);
                out.push(' ');
                out.push_str(op.as_evalexpr());
                out.push(' ');
                rhs.emit(vars, out);
                out.push(')');
            }
            Self::Value(operand) => operand.emit(vars, out),
        }
    }
}

fn binary(a: &Expr, op: &str, b: &Expr, vars: &mut FieldVars, out: &mut String) {
    out.push('(');
    a.emit(vars, out);
    out.push(' ');
    out.push_str(op);
    out.push(' ');
    b.emit(vars, out);
    out.push(')');
}

impl Operand {
    fn emit(&self, vars: &mut FieldVars, out: &mut String) {
        match self {
            Self::Field(name) => out.push_str(&vars.variable(name)),
            Self::Number(n) => {
                out.push('(');
                out.push_str(n);
                out.push(')');
            }
            Self::Text(s) => {
                out.push('"');
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push('"');
            }
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Group(inner) => inner.emit(vars, out),
        }
    }
}
