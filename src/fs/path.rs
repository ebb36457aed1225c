//! Path normalization — raw path strings → canonical token paths.
//!
//! A raw path like `"../../folder/file.txt"` normalizes to an anchor
//! (absolute or relative) followed by segments, where every `".."` in the
//! input becomes a parent-reference segment and redundant `"."` segments are
//! elided. Resolution in [`crate::fs::tree`] depends on this exact encoding,
//! so the algorithm below must not be "improved" casually.

use std::fmt;

/// Resolution origin of a normalized path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Path started with `/`; resolution begins at the tree root.
    Absolute,
    /// Resolution begins at a supplied current directory.
    Relative,
}

/// One step of a normalized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Ascend to the parent node (a `".."` in the input).
    Parent,
    /// Descend into the child with this name.
    Name(String),
}

/// A canonical token path: an anchor followed by zero or more segments.
///
/// Invariants guaranteed by [`TokenPath::parse`]:
/// - the anchor occupies position zero only;
/// - a parent reference never appears before the first segment position;
/// - no redundant current-directory segments survive normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPath {
    pub anchor: Anchor,
    pub segments: Vec<Segment>,
}

impl TokenPath {
    /// The degenerate "stay here" path.
    pub fn here() -> Self {
        TokenPath {
            anchor: Anchor::Relative,
            segments: Vec::new(),
        }
    }

    /// Normalize a raw path string.
    ///
    /// The algorithm, in order:
    /// 1. split on `/` and drop empty segments;
    /// 2. a sole `"."` is the degenerate stay-here path (this also covers
    ///    inputs like `"./"` and `"/."`, which anchor nothing);
    /// 3. the anchor is absolute iff the raw string started with `/`;
    /// 4. one explicit `"."` directly after the anchor is a no-op and is
    ///    dropped; a `"."` still left in the first position after that
    ///    survives as a parent reference (a quirk, kept because resolution
    ///    depends on it);
    /// 5. `".."` in the first position becomes a parent reference;
    /// 6. later segments: `".."` becomes a parent reference, a literal `"."`
    ///    is elided (mid-path no-ops never mean ascend).
    pub fn parse(raw: &str) -> Self {
        let mut parts: Vec<&str> = raw.split('/').filter(|part| !part.is_empty()).collect();

        if parts == ["."] {
            return TokenPath::here();
        }

        let anchor = if raw.starts_with('/') {
            Anchor::Absolute
        } else {
            Anchor::Relative
        };

        if parts.first() == Some(&".") {
            parts.remove(0);
        }

        let mut segments = Vec::with_capacity(parts.len());
        for (index, part) in parts.iter().enumerate() {
            match (index, *part) {
                // A leading dot that survived the single removal above.
                (0, ".") => segments.push(Segment::Parent),
                (_, "..") => segments.push(Segment::Parent),
                (_, ".") => {}
                (_, name) => segments.push(Segment::Name(name.to_owned())),
            }
        }

        TokenPath { anchor, segments }
    }

    pub fn is_absolute(&self) -> bool {
        self.anchor == Anchor::Absolute
    }

    /// True for the bare-anchor path with no segments.
    pub fn is_degenerate(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path with the final segment removed; locates the container a
    /// create or remove operation acts inside.
    pub fn parent(&self) -> TokenPath {
        let mut segments = self.segments.clone();
        segments.pop();
        TokenPath {
            anchor: self.anchor,
            segments,
        }
    }

    /// The name carried by the final segment, if it is a plain name.
    pub fn last_name(&self) -> Option<&str> {
        match self.segments.last() {
            Some(Segment::Name(name)) => Some(name),
            _ => None,
        }
    }

    /// Human-readable rendering for diagnostics. Parent references render as
    /// `".."`; the result is semantically equivalent to the input it was
    /// parsed from, not byte-identical to it.
    pub fn render(&self) -> String {
        let mut rendered = String::new();
        match self.anchor {
            Anchor::Absolute => rendered.push('/'),
            Anchor::Relative => {
                if self.segments.is_empty() {
                    return String::from(".");
                }
                if !matches!(self.segments.first(), Some(Segment::Parent)) {
                    rendered.push_str("./");
                }
            }
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                rendered.push('/');
            }
            match segment {
                Segment::Parent => rendered.push_str(".."),
                Segment::Name(name) => rendered.push_str(name),
            }
        }
        rendered
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
