//! Structured parser for the `craq_nodes` address list.
//!
//! Accepts a bracketed or bare comma-separated list whose items are
//! `host:port`, `"host:port"` or `("host", port)`:
//!
//! ```text
//! craq_nodes = [("meru20", 10333), ("meru21", 10333)]
//! craq_nodes = meru20:10333, meru21:10333
//! ```
//!
//! Values are only ever tokenized, never evaluated.

use std::fmt;

use serde::Serialize;

use crate::error::FormatError;

/// A CRAQ storage node address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CraqNode {
    pub host: String,
    pub port: Option<u16>,
}

impl CraqNode {
    fn from_addr(addr: &str) -> Result<Self, FormatError> {
        match addr.rsplit_once(':') {
            Some((host, port)) => Ok(Self {
                host: host.trim().to_string(),
                port: Some(parse_port(port)?),
            }),
            None => Ok(Self {
                host: addr.trim().to_string(),
                port: None,
            }),
        }
    }
}

impl fmt::Display for CraqNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.host, port),
            None => f.write_str(&self.host),
        }
    }
}

/// Parse a `craq_nodes` value. An empty value is an empty list.
pub fn parse_craq_nodes(value: &str) -> Result<Vec<CraqNode>, FormatError> {
    ListParser { src: value, pos: 0 }.parse_list()
}

/// Render nodes as a bracketed list that [`parse_craq_nodes`] reads back
/// unchanged, whatever delimiters the hosts contain.
pub fn format_craq_nodes(nodes: &[CraqNode]) -> String {
    let items: Vec<String> = nodes
        .iter()
        .map(|node| {
            let host = quote(&node.host);
            match node.port {
                Some(port) => format!("({host}, {port})"),
                None => host,
            }
        })
        .collect();
    format!("[{}]", items.join(", "))
}

/// Hosts come from quoted atoms, which cannot hold both quote characters.
fn quote(host: &str) -> String {
    if host.contains('"') {
        format!("'{host}'")
    } else {
        format!("\"{host}\"")
    }
}

fn parse_port(raw: &str) -> Result<u16, FormatError> {
    raw.trim()
        .parse()
        .map_err(|_| FormatError::InvalidList(format!("invalid port `{}`", raw.trim())))
}

struct ListParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> ListParser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn eat(&mut self, want: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(want) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, want: char) -> Result<(), FormatError> {
        if self.eat(want) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{want}`")))
        }
    }

    fn error(&self, msg: &str) -> FormatError {
        FormatError::InvalidList(format!("{msg} at offset {}", self.pos))
    }

    fn parse_list(mut self) -> Result<Vec<CraqNode>, FormatError> {
        let bracketed = self.eat('[');
        let mut nodes = Vec::new();

        loop {
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(']') if bracketed => break,
                _ => {}
            }
            nodes.push(self.parse_item()?);
            if !self.eat(',') {
                break;
            }
        }

        if bracketed {
            self.expect(']')?;
        }
        self.skip_ws();
        if self.peek().is_some() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(nodes)
    }

    fn parse_item(&mut self) -> Result<CraqNode, FormatError> {
        if self.eat('(') {
            let host = self.parse_atom()?;
            self.expect(',')?;
            let port = parse_port(self.parse_atom()?)?;
            self.eat(',');
            self.expect(')')?;
            return Ok(CraqNode {
                host: host.trim().to_string(),
                port: Some(port),
            });
        }
        CraqNode::from_addr(self.parse_atom()?)
    }

    /// A quoted string or a bare run of characters up to a delimiter.
    fn parse_atom(&mut self) -> Result<&'a str, FormatError> {
        self.skip_ws();
        let src = self.src;
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                let len = src[start..]
                    .find(quote)
                    .ok_or_else(|| self.error("unterminated string"))?;
                self.pos = start + len + quote.len_utf8();
                Ok(&src[start..start + len])
            }
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| !matches!(c, ',' | '[' | ']' | '(' | ')'))
                {
                    self.bump();
                }
                let atom = src[start..self.pos].trim();
                if atom.is_empty() {
                    return Err(self.error("expected an address"));
                }
                Ok(atom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(host: &str, port: u16) -> CraqNode {
        CraqNode {
            host: host.to_string(),
            port: Some(port),
        }
    }

    #[test]
    fn empty_value_is_empty_list() {
        assert!(parse_craq_nodes("").unwrap().is_empty());
        assert!(parse_craq_nodes("  [ ] ").unwrap().is_empty());
    }

    #[test]
    fn tuple_list() {
        let nodes = parse_craq_nodes(r#"[("meru20", 10333), ('meru21', 10334)]"#).unwrap();
        assert_eq!(nodes, vec![node("meru20", 10333), node("meru21", 10334)]);
    }

    #[test]
    fn bare_and_quoted_addresses() {
        let nodes = parse_craq_nodes(r#"meru20:10333, "meru21:10334", meru22"#).unwrap();
        assert_eq!(nodes[0], node("meru20", 10333));
        assert_eq!(nodes[1], node("meru21", 10334));
        assert_eq!(nodes[2].host, "meru22");
        assert_eq!(nodes[2].port, None);
    }

    #[test]
    fn trailing_comma_is_allowed() {
        assert_eq!(parse_craq_nodes("[a:1,]").unwrap(), vec![node("a", 1)]);
    }

    #[test]
    fn code_is_rejected_not_evaluated() {
        assert!(parse_craq_nodes("__import__('os').system('true')").is_err());
        assert!(parse_craq_nodes("[a:1] + [b:2]").is_err());
    }

    #[test]
    fn malformed_lists_are_errors() {
        assert!(parse_craq_nodes("[a:1").is_err());
        assert!(parse_craq_nodes("a:notaport").is_err());
        assert!(parse_craq_nodes(r#"[("a" 1)]"#).is_err());
        assert!(parse_craq_nodes(r#"["a:1]"#).is_err());
        assert!(parse_craq_nodes("a:1,,b:2").is_err());
    }

    #[test]
    fn quoted_hosts_are_trimmed() {
        let nodes = parse_craq_nodes(r#"[" meru ", (" meru2 ", 1), " meru3 :2"]"#).unwrap();
        assert_eq!(nodes[0].host, "meru");
        assert_eq!(nodes[0].port, None);
        assert_eq!(nodes[1], node("meru2", 1));
        assert_eq!(nodes[2], node("meru3", 2));
    }

    #[test]
    fn format_reparses_to_same_nodes() {
        let nodes = parse_craq_nodes(r#"[("a", 1), "b"]"#).unwrap();
        assert_eq!(format_craq_nodes(&nodes), r#"[("a", 1), "b"]"#);
        assert_eq!(parse_craq_nodes(&format_craq_nodes(&nodes)).unwrap(), nodes);
    }

    #[test]
    fn format_reparses_hosts_with_delimiters() {
        let nodes = parse_craq_nodes(
            r#"[("a,b", 1), ("c]", 2), ('x"y', 3), "(p)", ("h:1", 4)]"#,
        )
        .unwrap();
        assert_eq!(nodes[0], node("a,b", 1));
        assert_eq!(nodes[1], node("c]", 2));
        assert_eq!(nodes[2], node("x\"y", 3));
        assert_eq!(nodes[3].host, "(p)");
        assert_eq!(nodes[4], node("h:1", 4));

        assert_eq!(parse_craq_nodes(&format_craq_nodes(&nodes)).unwrap(), nodes);
    }

    #[test]
    fn format_empty_list() {
        assert_eq!(format_craq_nodes(&[]), "[]");
        assert!(parse_craq_nodes("[]").unwrap().is_empty());
    }
}
