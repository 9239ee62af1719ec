//! Verb and call-shape derivation from a path string.
//!
//! The last segment of a path doubles as an instruction: `get`, `postP`,
//! `putB`, `delZ` and so on. Anything else is an ordinary resource name.

use std::fmt;

/// HTTP verb an endpoint is dispatched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Match an uppercased verb token, including the `DEL` alias.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Verb::Get),
            "POST" => Some(Verb::Post),
            "PUT" => Some(Verb::Put),
            "DELETE" | "DEL" => Some(Verb::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Verb> for reqwest::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Which positional arguments an endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    /// `P` marker: params only.
    ParamsOnly,
    /// `B` marker: body only.
    BodyOnly,
    /// `Z` marker: no data arguments.
    NoArgs,
    /// No marker: params and body.
    ParamsAndBody,
}

impl CallShape {
    fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'P' => Some(CallShape::ParamsOnly),
            'B' => Some(CallShape::BodyOnly),
            'Z' => Some(CallShape::NoArgs),
            _ => None,
        }
    }
}

/// Request target derived from a path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSpec {
    pub url: String,
    pub verb: Verb,
    pub shape: CallShape,
}

impl PathSpec {
    /// Derive the spec for a path. Pure: equal inputs give equal specs.
    pub fn parse(path: &str) -> Self {
        let (head, tail) = match path.rfind('/') {
            Some(idx) => (&path[..idx], &path[idx + 1..]),
            None => ("", path),
        };

        let mut token = tail.to_uppercase();
        let mut shape = CallShape::ParamsAndBody;
        if let Some(marker_shape) = token.chars().last().and_then(CallShape::from_marker) {
            shape = marker_shape;
            token.pop();
        }

        match Verb::from_token(&token) {
            Some(verb) => Self {
                url: head.to_string(),
                verb,
                shape,
            },
            // Plain resource segment: the whole path is the URL.
            None => Self {
                url: path.to_string(),
                verb: Verb::Post,
                shape: CallShape::ParamsAndBody,
            },
        }
    }
}
