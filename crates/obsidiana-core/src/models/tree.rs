use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;

use super::token::Token;

/// Ordered list of segment names from the tree root to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TokenPath(Vec<String>);

impl TokenPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    pub fn leaf_name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl From<&[&str]> for TokenPath {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A node is either a leaf token or a named group of further nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenNode {
    Token(Token),
    Group(TokenTree),
}

impl TokenNode {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            Self::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&TokenTree> {
        match self {
            Self::Token(_) => None,
            Self::Group(tree) => Some(tree),
        }
    }
}

/// Recursive mapping from group name to token or subgroup.
///
/// Children are kept in sorted key order so every traversal is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenTree {
    nodes: BTreeMap<String, TokenNode>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a token source document.
    pub fn from_json_str(source: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(source).map_err(|e| CoreError::InvalidTree {
            path: String::new(),
            message: e.to_string(),
        })?;
        Self::from_value(&value)
    }

    /// Build a tree from parsed JSON.
    ///
    /// Objects holding both `value` and `type` are leaves; every other object is
    /// a group. Scalars or arrays outside a leaf are rejected.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        Self::parse_group(value, &TokenPath::new())
    }

    fn parse_group(value: &Value, path: &TokenPath) -> Result<Self, CoreError> {
        let Value::Object(map) = value else {
            return Err(CoreError::InvalidTree {
                path: path.to_string(),
                message: "expected a group object".into(),
            });
        };

        let mut nodes = BTreeMap::new();
        for (name, child) in map {
            let child_path = path.child(name);
            let node = if is_leaf(child) {
                let token: Token =
                    serde_json::from_value(child.clone()).map_err(|e| CoreError::InvalidTree {
                        path: child_path.to_string(),
                        message: e.to_string(),
                    })?;
                TokenNode::Token(token)
            } else {
                TokenNode::Group(Self::parse_group(child, &child_path)?)
            };
            nodes.insert(name.clone(), node);
        }
        Ok(Self { nodes })
    }

    /// Builder-style insert used when assembling trees in code.
    pub fn with(mut self, name: impl Into<String>, node: impl Into<TokenNode>) -> Self {
        self.nodes.insert(name.into(), node.into());
        self
    }

    pub(crate) fn insert(&mut self, name: String, node: TokenNode) {
        self.nodes.insert(name, node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TokenNode> {
        self.nodes.get(name)
    }

    pub fn group(&self, name: &str) -> Option<&TokenTree> {
        self.get(name).and_then(TokenNode::as_group)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenNode)> {
        self.nodes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Look up a node by dotted path (`color.primary.light.default`).
    pub fn lookup(&self, dotted: &str) -> Option<&TokenNode> {
        let mut segments = dotted.split('.');
        let first = segments.next()?;
        let mut node = self.get(first)?;
        for segment in segments {
            node = node.as_group()?.get(segment)?;
        }
        Some(node)
    }

    /// Look up a leaf token by dotted path.
    pub fn token(&self, dotted: &str) -> Option<&Token> {
        self.lookup(dotted).and_then(TokenNode::as_token)
    }

    /// All leaves in depth-first, key-sorted order.
    pub fn leaves(&self) -> Vec<(TokenPath, &Token)> {
        let mut out = Vec::new();
        self.collect_leaves(&TokenPath::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: &TokenPath, out: &mut Vec<(TokenPath, &'a Token)>) {
        for (name, node) in &self.nodes {
            let path = prefix.child(name);
            match node {
                TokenNode::Token(token) => out.push((path, token)),
                TokenNode::Group(group) => group.collect_leaves(&path, out),
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .values()
            .map(|node| match node {
                TokenNode::Token(_) => 1,
                TokenNode::Group(group) => group.leaf_count(),
            })
            .sum()
    }
}

fn is_leaf(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("value") && map.contains_key("type"))
}

impl From<Token> for TokenNode {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<TokenTree> for TokenNode {
    fn from(tree: TokenTree) -> Self {
        Self::Group(tree)
    }
}

impl Serialize for TokenTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
        for (name, node) in &self.nodes {
            match node {
                TokenNode::Token(token) => map.serialize_entry(name, token)?,
                TokenNode::Group(group) => map.serialize_entry(name, group)?,
            }
        }
        map.end()
    }
}
