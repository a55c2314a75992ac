use memchr::memchr_iter;

/// One tokenized command body.
///
/// Field names follow the classic MUX convention: `lhs`/`rhs` are the sides
/// of the first unescaped `=`, the `*list` fields are comma splits of their
/// source string with each element trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedArgs {
    /// `/`-prefixed tokens found at the start of the body, in order of
    /// appearance, duplicates preserved, leading `/` stripped.
    pub switches: Vec<String>,
    /// The body exactly as given, switches included.
    pub raw: String,
    /// The body minus switches, trimmed.
    pub args: String,
    /// Everything left of the first unescaped `=`; all of `args` when there
    /// is none.
    pub lhs: String,
    /// Everything right of the first unescaped `=`. `Some("")` when a bare
    /// trailing `=` was typed, `None` only when no unescaped `=` exists.
    pub rhs: Option<String>,
    pub lhslist: Vec<String>,
    pub rhslist: Vec<String>,
    /// Whitespace split of the full body, with the first unescaped `=`
    /// forced out as its own token.
    pub arglist: Vec<String>,
}

/// Tokenize one command body. Total over any input; never errors.
pub fn parse(raw: &str) -> ParsedArgs {
    let (switches, rest) = scan_switches(raw);
    let args = rest.trim().to_string();

    let (lhs, rhs) = match find_unescaped_eq(&args) {
        Some(i) => (
            args[..i].trim().to_string(),
            Some(args[i + 1..].trim().to_string()),
        ),
        None => (args.clone(), None),
    };

    let lhslist = comma_list(&lhs);
    let rhslist = match rhs.as_deref() {
        Some(r) => comma_list(r),
        None => Vec::new(),
    };

    ParsedArgs {
        switches,
        raw: raw.to_string(),
        args,
        lhs,
        rhs,
        lhslist,
        rhslist,
        arglist: arg_list(raw),
    }
}

/// Peel leading `/switch` tokens off the body. A switch token runs until
/// whitespace or `=`, so `/sw=x` yields switch `sw` with `=x` left over.
fn scan_switches(raw: &str) -> (Vec<String>, &str) {
    let mut switches = Vec::new();
    let mut rest = raw.trim_start();
    while rest.starts_with('/') {
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        switches.push(rest[1..end].to_string());
        rest = rest[end..].trim_start();
    }
    (switches, rest)
}

/// Byte scan for the first `=` not preceded by a backslash. `=` and `\` are
/// ASCII, so the returned index is always a char boundary.
fn find_unescaped_eq(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    memchr_iter(b'=', b).find(|&i| i == 0 || b[i - 1] != b'\\')
}

fn comma_list(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',').map(|p| p.trim().to_string()).collect()
}

fn arg_list(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen_eq = false;
    for tok in raw.split_whitespace() {
        if !seen_eq {
            if let Some(i) = find_unescaped_eq(tok) {
                seen_eq = true;
                if i > 0 {
                    out.push(tok[..i].to_string());
                }
                out.push("=".to_string());
                if i + 1 < tok.len() {
                    out.push(tok[i + 1..].to_string());
                }
                continue;
            }
        }
        out.push(tok.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_body_has_no_rhs() {
        let p = parse("at Bob");
        assert!(p.switches.is_empty());
        assert_eq!(p.lhs, "at Bob");
        assert_eq!(p.rhs, None);
        assert!(p.rhslist.is_empty());
        assert_eq!(p.lhslist, vec!["at Bob"]);
    }

    #[test]
    fn switches_keep_order_and_duplicates() {
        let p = parse("/loud /slow /loud Bob");
        assert_eq!(p.switches, vec!["loud", "slow", "loud"]);
        assert_eq!(p.args, "Bob");
        assert_eq!(p.lhs, "Bob");
    }

    #[test]
    fn switch_scan_stops_at_first_plain_token() {
        let p = parse("/a Bob /b");
        assert_eq!(p.switches, vec!["a"]);
        assert_eq!(p.args, "Bob /b");
    }

    #[test]
    fn eq_splits_lhs_rhs_trimmed() {
        let p = parse("  Bob , Eve =  hello there ");
        assert_eq!(p.lhs, "Bob , Eve");
        assert_eq!(p.rhs.as_deref(), Some("hello there"));
        assert_eq!(p.lhslist, vec!["Bob", "Eve"]);
        assert_eq!(p.rhslist, vec!["hello there"]);
    }

    #[test]
    fn trailing_eq_is_present_but_empty() {
        let p = parse("Bob =");
        assert_eq!(p.lhs, "Bob");
        assert_eq!(p.rhs.as_deref(), Some(""));
        assert!(p.rhslist.is_empty());
    }

    #[test]
    fn bare_eq_yields_empty_both_sides() {
        let p = parse("=");
        assert_eq!(p.lhs, "");
        assert_eq!(p.rhs.as_deref(), Some(""));
        assert!(p.lhslist.is_empty());
        assert!(p.rhslist.is_empty());
    }

    #[test]
    fn only_first_eq_is_significant() {
        let p = parse("a = b = c");
        assert_eq!(p.lhs, "a");
        assert_eq!(p.rhs.as_deref(), Some("b = c"));
    }

    #[test]
    fn escaped_eq_is_literal() {
        let p = parse(r"2 \= 2");
        assert_eq!(p.rhs, None);
        assert_eq!(p.lhs, r"2 \= 2");

        let p = parse(r"a \= b = c");
        assert_eq!(p.lhs, r"a \= b");
        assert_eq!(p.rhs.as_deref(), Some("c"));
    }

    #[test]
    fn empty_list_elements_are_preserved() {
        let p = parse("a,,b");
        assert_eq!(p.lhslist, vec!["a", "", "b"]);
        let p = parse("a,");
        assert_eq!(p.lhslist, vec!["a", ""]);
    }

    #[test]
    fn empty_lhs_means_empty_lhslist() {
        let p = parse("");
        assert_eq!(p.lhs, "");
        assert!(p.lhslist.is_empty());
        assert!(p.arglist.is_empty());
    }

    #[test]
    fn arglist_isolates_the_eq_token() {
        assert_eq!(parse("/s a=b c").arglist, vec!["/s", "a", "=", "b", "c"]);
        assert_eq!(parse("a = b").arglist, vec!["a", "=", "b"]);
        assert_eq!(parse("=b").arglist, vec!["=", "b"]);
        // only the first unescaped `=` is a boundary
        assert_eq!(parse("a=b=c").arglist, vec!["a", "=", "b=c"]);
    }

    #[test]
    fn case_and_script_are_preserved() {
        let p = parse("ПрИвЕт, Мир");
        assert_eq!(p.lhslist, vec!["ПрИвЕт", "Мир"]);
    }

    // Reconstructing `switches + lhs [= rhs]` and reparsing gives back the
    // same decomposition.
    #[test]
    fn reconstruction_is_idempotent() {
        for raw in [
            "/loud Bob, Eve = hello there",
            "at Bob",
            "Bob =",
            "=",
            "a = b = c",
            r"a \= b = c",
        ] {
            let p = parse(raw);
            let mut rebuilt = String::new();
            for s in &p.switches {
                rebuilt.push('/');
                rebuilt.push_str(s);
                rebuilt.push(' ');
            }
            rebuilt.push_str(&p.lhs);
            if let Some(rhs) = &p.rhs {
                rebuilt.push_str(" = ");
                rebuilt.push_str(rhs);
            }
            let q = parse(&rebuilt);
            assert_eq!(q.switches, p.switches, "raw {raw:?}");
            assert_eq!(q.lhs, p.lhs, "raw {raw:?}");
            assert_eq!(q.rhs, p.rhs, "raw {raw:?}");
            assert_eq!(q.lhslist, p.lhslist, "raw {raw:?}");
            assert_eq!(q.rhslist, p.rhslist, "raw {raw:?}");
        }
    }

    #[test]
    fn comma_rejoin_is_stable() {
        for src in ["a, b ,c", "one", "x, y", "а, б"] {
            let l = comma_list(src);
            let rejoined = l.join(",");
            assert_eq!(comma_list(&rejoined), l, "src {src:?}");
        }
    }
}
