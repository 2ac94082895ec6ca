//! Reader for the annotated Newick form written by [`to_newick`](crate::to_newick).
//!
//! Plain Newick (no `[&type=..]` tags) is accepted too; untagged segments are
//! read as active.

use sb_core::{NodeId, State};

use crate::newick::is_plain_label_char;
use crate::{SeedbankTree, TreeError, TreeResult};

/// Parse one tree.  The youngest leaf is placed at height 0.
///
/// # Errors
///
/// [`TreeError::Parse`] on malformed text, [`TreeError::NotBinary`] on a
/// group with more than two children, or any [`SeedbankTree::validate`]
/// failure of the result.
pub fn from_newick(text: &str) -> TreeResult<SeedbankTree> {
    let mut parser = Parser { src: text, pos: 0 };
    let root = parser.subtree()?;
    parser.skip_ws();
    parser.expect(b';')?;
    parser.skip_ws();
    if parser.pos != parser.src.len() {
        return Err(parser.error("trailing input after ';'"));
    }

    let max_depth = root.max_leaf_depth(0.0);
    let mut tree = SeedbankTree::new();
    let id = root.build(&mut tree, 0.0, max_depth)?;
    tree.set_root(id)?;
    tree.validate()?;
    Ok(tree)
}

/// One parenthesised group or leaf as written, before heights are known.
struct Parsed {
    children: Vec<Parsed>,
    label:    Option<String>,
    state:    State,
    length:   f64,
}

impl Parsed {
    fn max_leaf_depth(&self, depth: f64) -> f64 {
        self.children
            .iter()
            .map(|c| c.max_leaf_depth(depth + c.length))
            .fold(depth, f64::max)
    }

    /// Insert this group into `tree`; `depth` is its distance from the root.
    /// Returns the lineage the group ends on.
    fn build(self, tree: &mut SeedbankTree, depth: f64, max_depth: f64) -> TreeResult<NodeId> {
        let height = max_depth - depth;
        let mut children = self.children.into_iter();
        match (children.next(), children.next(), children.len()) {
            (None, _, _) => {
                let label = self.label.unwrap_or_default();
                Ok(tree.add_leaf(label, self.state, height))
            }
            (Some(below), None, _) => {
                let lineage = below.build_child(tree, depth, max_depth)?;
                tree.record_change(lineage, self.state, height)?;
                Ok(lineage)
            }
            (Some(l), Some(r), 0) => {
                let left = l.build_child(tree, depth, max_depth)?;
                let right = r.build_child(tree, depth, max_depth)?;
                let id = tree.coalesce(left, right, self.state, height)?;
                if let Some(label) = self.label {
                    tree.set_label(id, label)?;
                }
                Ok(id)
            }
            (Some(_), Some(_), rest) => Err(TreeError::NotBinary(rest + 2)),
        }
    }

    fn build_child(self, tree: &mut SeedbankTree, depth: f64, max_depth: f64) -> TreeResult<NodeId> {
        let depth = depth + self.length;
        self.build(tree, depth, max_depth)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn subtree(&mut self) -> TreeResult<Parsed> {
        self.skip_ws();
        let mut children = Vec::new();
        if self.peek() == Some(b'(') {
            self.pos += 1;
            loop {
                children.push(self.subtree()?);
                self.skip_ws();
                match self.next_byte() {
                    Some(b',') => continue,
                    Some(b')') => break,
                    _ => return Err(self.error("expected ',' or ')'")),
                }
            }
        }

        self.skip_ws();
        let label = self.label()?;
        self.skip_ws();
        let state = if self.peek() == Some(b'[') { self.annotation()? } else { None };
        self.skip_ws();
        let length = if self.peek() == Some(b':') {
            self.pos += 1;
            self.number()?
        } else {
            0.0
        };

        Ok(Parsed {
            children,
            label,
            state: state.unwrap_or_default(),
            length,
        })
    }

    fn label(&mut self) -> TreeResult<Option<String>> {
        if self.peek() == Some(b'\'') {
            self.pos += 1;
            let mut out = Vec::new();
            loop {
                match self.next_byte() {
                    Some(b'\'') if self.peek() == Some(b'\'') => {
                        self.pos += 1;
                        out.push(b'\'');
                    }
                    Some(b'\'') => break,
                    Some(b) => out.push(b),
                    None => return Err(self.error("unterminated quoted label")),
                }
            }
            return self.utf8(out).map(Some);
        }

        let rest = self.rest();
        let len: usize = rest
            .chars()
            .take_while(|&c| is_plain_label_char(c))
            .map(char::len_utf8)
            .sum();
        self.pos += len;
        Ok((len > 0).then(|| rest[..len].to_owned()))
    }

    /// `[&key=value,...]`; returns the `type` value if present.
    fn annotation(&mut self) -> TreeResult<Option<State>> {
        let open = self.pos;
        self.pos += 1;
        let rest = self.rest();
        let end = rest.find(']').ok_or_else(|| self.error("unterminated '['"))?;
        self.pos += end + 1;

        let body = &rest[..end];
        let body = body.strip_prefix('&').unwrap_or(body);
        for entry in body.split(',') {
            let Some((key, value)) = entry.split_once('=') else { continue };
            if key.trim() != "type" {
                continue;
            }
            let value = value.trim().trim_matches('"');
            return State::parse(value).map(Some).ok_or(TreeError::Parse {
                pos: open,
                msg: format!("unknown state {value:?}"),
            });
        }
        Ok(None)
    }

    fn number(&mut self) -> TreeResult<f64> {
        self.skip_ws();
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-') {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.src[start..self.pos]
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite() && *x >= 0.0)
            .ok_or(TreeError::Parse {
                pos: start,
                msg: "expected a non-negative branch length".into(),
            })
    }

    fn expect(&mut self, byte: u8) -> TreeResult<()> {
        if self.next_byte() == Some(byte) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", byte as char)))
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn utf8(&self, bytes: Vec<u8>) -> TreeResult<String> {
        String::from_utf8(bytes).map_err(|_| self.error("invalid UTF-8"))
    }

    fn error(&self, msg: &str) -> TreeError {
        TreeError::Parse { pos: self.pos, msg: msg.to_owned() }
    }
}
