//! `mudlocks`: the lock-expression language gating player commands.
//!
//! A lock string is a `;`-separated list of clauses, each
//! `access:expression`, e.g.
//!
//! ```text
//! cmd:all()
//! call:not perm(nonpcs)
//! edit:id(42) and perm(Builders);delete:none()
//! ```
//!
//! Expressions combine predicate calls with `and`/`or`/`not` (keywords are
//! case-insensitive, predicate arguments are case-preserved). Evaluation is
//! against a [`Subject`] and fails closed: an unknown predicate is false and
//! a malformed lock string denies via [`check_str`].

use std::fmt;

use tracing::debug;
use tracing::warn;

/// The thing a lock is evaluated against. Implementations should treat
/// permission names as ASCII case-insensitive (`perm(Builders)` matches a
/// subject holding `builders`).
pub trait Subject {
    fn subject_id(&self) -> u64;
    fn has_perm(&self, perm: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `func(arg, ...)`. The function name is lowercased at parse time.
    Call { func: String, args: Vec<String> },
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn eval(&self, subject: &dyn Subject) -> bool {
        match self {
            Expr::Not(e) => !e.eval(subject),
            Expr::And(a, b) => a.eval(subject) && b.eval(subject),
            Expr::Or(a, b) => a.eval(subject) || b.eval(subject),
            Expr::Call { func, args } => match func.as_str() {
                "all" => true,
                "none" => false,
                "perm" => args
                    .first()
                    .map(|p| subject.has_perm(p))
                    .unwrap_or(false),
                "id" => args
                    .first()
                    .and_then(|a| a.parse::<u64>().ok())
                    .map(|n| subject.subject_id() == n)
                    .unwrap_or(false),
                other => {
                    debug!("unknown lock predicate {other:?}; denying");
                    false
                }
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Call { func, args } => write!(f, "{func}({})", args.join(", ")),
            Expr::Not(e) => write!(f, "not {e}"),
            Expr::And(a, b) => write!(f, "{a} and {b}"),
            Expr::Or(a, b) => write!(f, "{a} or {b}"),
        }
    }
}

/// A parsed lock string: clauses keyed by access type, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockSet {
    clauses: Vec<(String, Expr)>,
}

impl LockSet {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        let mut clauses = Vec::new();
        for part in s.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (access, expr_s) = part
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("missing access type in lock clause {part:?}"))?;
            let access = access.trim().to_ascii_lowercase();
            if access.is_empty() {
                anyhow::bail!("empty access type in lock clause {part:?}");
            }
            clauses.push((access, parse_expr(expr_s)?));
        }
        Ok(Self { clauses })
    }

    pub fn clause(&self, access: &str) -> Option<&Expr> {
        let want = access.trim().to_ascii_lowercase();
        self.clauses
            .iter()
            .find(|(a, _)| *a == want)
            .map(|(_, e)| e)
    }

    /// Check one access type. A lock that has no clause for `access` is
    /// open; only an explicit clause can deny.
    pub fn check(&self, access: &str, subject: &dyn Subject) -> bool {
        match self.clause(access) {
            Some(e) => e.eval(subject),
            None => true,
        }
    }
}

/// Parse-and-check convenience. A lock string that does not parse denies.
pub fn check_str(lockstr: &str, access: &str, subject: &dyn Subject) -> bool {
    match LockSet::parse(lockstr) {
        Ok(set) => set.check(access, subject),
        Err(e) => {
            warn!("malformed lock string {lockstr:?}: {e}; denying");
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Ident(String),
    LParen,
    RParen,
    Comma,
}

fn lex(s: &str) -> Vec<Tok> {
    let mut toks = Vec::new();
    let mut chars = s.char_indices().peekable();
    while let Some(&(i, c)) = chars.peek() {
        match c {
            '(' => {
                toks.push(Tok::LParen);
                chars.next();
            }
            ')' => {
                toks.push(Tok::RParen);
                chars.next();
            }
            ',' => {
                toks.push(Tok::Comma);
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            _ => {
                let mut end = i;
                while let Some(&(j, c)) = chars.peek() {
                    if c == '(' || c == ')' || c == ',' || c.is_whitespace() {
                        break;
                    }
                    end = j + c.len_utf8();
                    chars.next();
                }
                toks.push(Tok::Ident(s[i..end].to_string()));
            }
        }
    }
    toks
}

struct Parser {
    toks: Vec<Tok>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos)
    }

    fn next(&mut self) -> Option<Tok> {
        let t = self.toks.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn peek_keyword(&self) -> Option<String> {
        match self.peek() {
            Some(Tok::Ident(w)) => Some(w.to_ascii_lowercase()),
            _ => None,
        }
    }

    // or := and ('or' and)*
    fn or_expr(&mut self) -> anyhow::Result<Expr> {
        let mut lhs = self.and_expr()?;
        while self.peek_keyword().as_deref() == Some("or") {
            self.next();
            let rhs = self.and_expr()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    // and := unary ('and' unary)*
    fn and_expr(&mut self) -> anyhow::Result<Expr> {
        let mut lhs = self.unary()?;
        while self.peek_keyword().as_deref() == Some("and") {
            self.next();
            let rhs = self.unary()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> anyhow::Result<Expr> {
        if self.peek_keyword().as_deref() == Some("not") {
            self.next();
            return Ok(Expr::Not(Box::new(self.unary()?)));
        }
        self.primary()
    }

    // primary := '(' or ')' | ident '(' args? ')'
    fn primary(&mut self) -> anyhow::Result<Expr> {
        match self.next() {
            Some(Tok::LParen) => {
                let e = self.or_expr()?;
                match self.next() {
                    Some(Tok::RParen) => Ok(e),
                    _ => anyhow::bail!("unbalanced parenthesis in lock expression"),
                }
            }
            Some(Tok::Ident(name)) => {
                match self.next() {
                    Some(Tok::LParen) => {}
                    _ => anyhow::bail!("expected ( after predicate {name:?}"),
                }
                let mut args = Vec::new();
                loop {
                    match self.next() {
                        Some(Tok::RParen) => break,
                        Some(Tok::Ident(a)) => {
                            args.push(a);
                            match self.next() {
                                Some(Tok::RParen) => break,
                                Some(Tok::Comma) => continue,
                                _ => anyhow::bail!(
                                    "expected , or ) in arguments of {name:?}"
                                ),
                            }
                        }
                        _ => anyhow::bail!("unterminated argument list for {name:?}"),
                    }
                }
                Ok(Expr::Call {
                    func: name.to_ascii_lowercase(),
                    args,
                })
            }
            _ => anyhow::bail!("expected predicate in lock expression"),
        }
    }
}

fn parse_expr(s: &str) -> anyhow::Result<Expr> {
    let mut p = Parser {
        toks: lex(s),
        pos: 0,
    };
    let e = p.or_expr()?;
    if p.peek().is_some() {
        anyhow::bail!("trailing input in lock expression {s:?}");
    }
    Ok(e)
}
