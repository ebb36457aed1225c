//! The virtual filesystem tree.
//!
//! Nodes live in an arena owned by [`Filesystem`]; parent links are plain
//! [`NodeId`] indices, never second owners, so there are no reference cycles
//! to manage. Removing an entry splices it out of its parent's child list and
//! nothing else: descendants of a removed directory become unreachable but
//! their arena slots are not reclaimed, and the detached node keeps its stale
//! parent index. Both are deliberate — a single session holds at most a
//! handful of nodes, and a detached subtree must stay intact in case a held
//! [`NodeId`] still points into it.

use crate::fs::error::FsError;
use crate::fs::path::{Segment, TokenPath};

/// Index of a node in the filesystem arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A tree node: either a directory or a file. Closed set by design so that
/// listing and descent handle every case exhaustively.
#[derive(Debug)]
pub enum Node {
    Directory(Directory),
    File(File),
}

/// A directory. Child order is insertion order and is significant for
/// listings. Sibling names are not required to be unique; lookups return the
/// first match.
#[derive(Debug)]
pub struct Directory {
    pub name: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub is_root: bool,
}

/// A file with in-memory string content.
#[derive(Debug)]
pub struct File {
    pub name: String,
    pub content: String,
    pub parent: NodeId,
}

impl File {
    /// Size in bytes, derived from the content.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Arena-backed filesystem tree with a single root.
#[derive(Debug)]
pub struct Filesystem {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Filesystem {
    /// A fresh tree containing only the root directory.
    pub fn new() -> Self {
        let nodes = vec![Node::Directory(Directory {
            name: String::new(),
            children: Vec::new(),
            parent: None,
            is_root: true,
        })];
        Filesystem {
            nodes,
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The node as a directory, if it is one.
    pub fn dir(&self, id: NodeId) -> Option<&Directory> {
        match &self.nodes[id.0] {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    /// The node as a file, if it is one.
    pub fn file(&self, id: NodeId) -> Option<&File> {
        match &self.nodes[id.0] {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        }
    }

    pub fn is_dir(&self, id: NodeId) -> bool {
        matches!(&self.nodes[id.0], Node::Directory(_))
    }

    pub fn name_of(&self, id: NodeId) -> &str {
        match &self.nodes[id.0] {
            Node::Directory(dir) => &dir.name,
            Node::File(file) => &file.name,
        }
    }

    /// Children of a directory, in insertion order. Empty for files.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0] {
            Node::Directory(dir) => &dir.children,
            Node::File(_) => &[],
        }
    }

    /// Render the node's path, rooted at the nearest root ancestor.
    /// The root itself renders as `/`.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        loop {
            match &self.nodes[current.0] {
                Node::Directory(dir) => {
                    if dir.is_root {
                        break;
                    }
                    names.push(dir.name.as_str());
                    match dir.parent {
                        Some(parent) => current = parent,
                        None => break,
                    }
                }
                Node::File(file) => {
                    names.push(file.name.as_str());
                    current = file.parent;
                }
            }
        }
        if names.is_empty() {
            String::from("/")
        } else {
            names.reverse();
            format!("/{}", names.join("/"))
        }
    }

    /// Resolve a directory path starting at `start`.
    ///
    /// An absolute path is only valid when `start` is the designated root;
    /// anything else is a caller contract violation, reported as
    /// [`FsError::AnchorMismatch`]. The degenerate path resolves to `start`
    /// itself. Parent references ascend (failing at the root); names descend
    /// into the first child directory with that name.
    pub fn resolve_dir_from(&self, start: NodeId, path: &TokenPath) -> Result<NodeId, FsError> {
        if path.is_absolute() && !self.dir(start).is_some_and(|dir| dir.is_root) {
            return Err(FsError::AnchorMismatch {
                path: path.render(),
            });
        }

        let mut current = start;
        for segment in &path.segments {
            let dir = self.dir(current).ok_or_else(|| FsError::not_found(path))?;
            current = match segment {
                Segment::Parent => dir.parent.ok_or_else(|| FsError::not_found(path))?,
                Segment::Name(name) => self
                    .find_child_dir(dir, name)
                    .ok_or_else(|| FsError::not_found(path))?,
            };
        }
        Ok(current)
    }

    /// Resolve a directory path as a command would: absolute paths walk from
    /// the root, relative paths from `cwd`.
    pub fn resolve_dir(&self, cwd: NodeId, path: &TokenPath) -> Result<NodeId, FsError> {
        let start = if path.is_absolute() { self.root } else { cwd };
        self.resolve_dir_from(start, path)
    }

    /// Resolve everything but the final segment — the container a create or
    /// remove operation acts inside.
    pub fn resolve_parent(&self, cwd: NodeId, path: &TokenPath) -> Result<NodeId, FsError> {
        self.resolve_dir(cwd, &path.parent())
    }

    /// Resolve a file: the parent directory, then the first file child whose
    /// name matches the final segment.
    pub fn resolve_file(&self, cwd: NodeId, path: &TokenPath) -> Result<NodeId, FsError> {
        let parent = self.resolve_parent(cwd, path)?;
        let name = path.last_name().ok_or_else(|| FsError::not_found(path))?;
        self.find_child(parent, |node| matches!(node, Node::File(file) if file.name == name))
            .ok_or_else(|| FsError::not_found(path))
    }

    /// Create a directory at `path`. The parent must already exist; missing
    /// intermediate directories are never created implicitly.
    pub fn make_directory(&mut self, cwd: NodeId, path: &TokenPath) -> Result<NodeId, FsError> {
        let parent = self.resolve_parent(cwd, path)?;
        let name = path.last_name().ok_or_else(|| FsError::no_target(path))?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::Directory(Directory {
            name: name.to_owned(),
            children: Vec::new(),
            parent: Some(parent),
            is_root: false,
        }));
        self.attach(parent, id, path)?;
        Ok(id)
    }

    /// Add a file to the directory named by `dir_path`. The path names the
    /// containing directory, not the file.
    pub fn add_file(
        &mut self,
        cwd: NodeId,
        dir_path: &TokenPath,
        name: &str,
        content: &str,
    ) -> Result<NodeId, FsError> {
        let parent = self.resolve_dir(cwd, dir_path)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::File(File {
            name: name.to_owned(),
            content: content.to_owned(),
            parent,
        }));
        self.attach(parent, id, dir_path)?;
        Ok(id)
    }

    /// Replace a file's content.
    pub fn write_file(&mut self, id: NodeId, content: &str) -> Result<(), FsError> {
        match &mut self.nodes[id.0] {
            Node::File(file) => {
                file.content = content.to_owned();
                Ok(())
            }
            Node::Directory(dir) => Err(FsError::NotFound {
                path: dir.name.clone(),
            }),
        }
    }

    /// Remove the file at `path` from its parent's child list.
    pub fn remove_file(&mut self, cwd: NodeId, path: &TokenPath) -> Result<(), FsError> {
        let parent = self.resolve_parent(cwd, path)?;
        let name = path.last_name().ok_or_else(|| FsError::no_target(path))?;
        let target = self
            .find_child(parent, |node| matches!(node, Node::File(file) if file.name == name))
            .ok_or_else(|| FsError::not_found(path))?;
        self.detach(parent, target);
        Ok(())
    }

    /// Remove the directory at `path` from its parent's child list. Does not
    /// recurse: a non-empty directory is detached whole.
    pub fn remove_directory(&mut self, cwd: NodeId, path: &TokenPath) -> Result<(), FsError> {
        let parent = self.resolve_parent(cwd, path)?;
        let name = path.last_name().ok_or_else(|| FsError::no_target(path))?;
        let target = self
            .find_child(parent, |node| {
                matches!(node, Node::Directory(dir) if dir.name == name)
            })
            .ok_or_else(|| FsError::not_found(path))?;
        self.detach(parent, target);
        Ok(())
    }

    fn find_child_dir(&self, dir: &Directory, name: &str) -> Option<NodeId> {
        dir.children
            .iter()
            .copied()
            .find(|child| matches!(&self.nodes[child.0], Node::Directory(d) if d.name == name))
    }

    fn find_child(&self, parent: NodeId, matches: impl Fn(&Node) -> bool) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|child| matches(&self.nodes[child.0]))
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, path: &TokenPath) -> Result<(), FsError> {
        match &mut self.nodes[parent.0] {
            Node::Directory(dir) => {
                dir.children.push(child);
                Ok(())
            }
            // Resolution only ever yields directories; kept as an error
            // rather than a panic to honor the no-crash contract.
            Node::File(_) => Err(FsError::not_found(path)),
        }
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) {
        if let Node::Directory(dir) = &mut self.nodes[parent.0] {
            if let Some(position) = dir.children.iter().position(|id| *id == child) {
                dir.children.remove(position);
            }
        }
    }
}

impl Default for Filesystem {
    fn default() -> Self {
        Filesystem::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::path::TokenPath;

    fn path(raw: &str) -> TokenPath {
        TokenPath::parse(raw)
    }

    #[test]
    fn degenerate_path_resolves_to_self() {
        let mut fs = Filesystem::new();
        let a = fs.make_directory(fs.root(), &path("/a")).unwrap();
        assert_eq!(fs.resolve_dir_from(a, &path(".")).unwrap(), a);
        assert_eq!(fs.resolve_dir(a, &path(".")).unwrap(), a);
    }

    #[test]
    fn nested_creation_and_resolution() {
        let mut fs = Filesystem::new();
        let root = fs.root();
        fs.make_directory(root, &path("/a")).unwrap();
        let b = fs.make_directory(root, &path("/a/b")).unwrap();

        assert_eq!(fs.resolve_dir(root, &path("/a/b")).unwrap(), b);
        assert_eq!(
            fs.resolve_dir(root, &path("/a/c")),
            Err(FsError::NotFound {
                path: "/a/c".into()
            })
        );
        assert_eq!(fs.path_of(b), "/a/b");
    }

    #[test]
    fn missing_parent_is_an_error_not_a_crash() {
        let mut fs = Filesystem::new();
        let root = fs.root();
        assert!(matches!(
            fs.make_directory(root, &path("/missing/child")),
            Err(FsError::NotFound { .. })
        ));
    }

    #[test]
    fn parent_references_ascend() {
        let mut fs = Filesystem::new();
        let root = fs.root();
        let a = fs.make_directory(root, &path("/a")).unwrap();
        let b = fs.make_directory(root, &path("/a/b")).unwrap();

        assert_eq!(fs.resolve_dir(b, &path("..")).unwrap(), a);
        assert_eq!(fs.resolve_dir(b, &path("../..")).unwrap(), root);
        // Ascending from the root fails: it has no parent.
        assert!(fs.resolve_dir(root, &path("..")).is_err());
    }

    #[test]
    fn relative_resolution_from_working_directory() {
        let mut fs = Filesystem::new();
        let root = fs.root();
        fs.make_directory(root, &path("/a")).unwrap();
        let a = fs.resolve_dir(root, &path("/a")).unwrap();
        fs.make_directory(root, &path("/a/b")).unwrap();
        fs.add_file(a, &path("../a/b"), "file.txt", "hello").unwrap();

        let file = fs.resolve_file(a, &path("b/file.txt")).unwrap();
        assert_eq!(fs.file(file).unwrap().content, "hello");
        assert_eq!(fs.file(file).unwrap().size(), 5);
        assert_eq!(fs.path_of(file), "/a/b/file.txt");
    }

    #[test]
    fn absolute_resolution_from_non_root_is_a_contract_violation() {
        let mut fs = Filesystem::new();
        let root = fs.root();
        let a = fs.make_directory(root, &path("/a")).unwrap();
        assert!(matches!(
            fs.resolve_dir_from(a, &path("/a")),
            Err(FsError::AnchorMismatch { .. })
        ));
        // The cwd-aware entry point routes absolute paths to the root first.
        assert_eq!(fs.resolve_dir(a, &path("/a")).unwrap(), a);
    }

    #[test]
    fn removal_detaches_from_parent() {
        let mut fs = Filesystem::new();
        let root = fs.root();
        fs.make_directory(root, &path("/a")).unwrap();
        fs.make_directory(root, &path("/a/b")).unwrap();

        fs.remove_directory(root, &path("/a")).unwrap();
        assert!(fs.resolve_dir(root, &path("/a")).is_err());
        // No cascade: the detached child subtree is simply unreachable.
        assert_eq!(fs.children(root).len(), 0);
    }

    #[test]
    fn file_removal_only_removes_files() {
        let mut fs = Filesystem::new();
        let root = fs.root();
        fs.make_directory(root, &path("/a")).unwrap();
        assert!(matches!(
            fs.remove_file(root, &path("/a")),
            Err(FsError::NotFound { .. })
        ));

        fs.add_file(root, &path("/"), "a", "").unwrap();
        fs.remove_file(root, &path("/a")).unwrap();
        // The directory of the same name survives.
        assert!(fs.resolve_dir(root, &path("/a")).is_ok());
    }

    #[test]
    fn duplicate_sibling_names_first_match_wins() {
        let mut fs = Filesystem::new();
        let root = fs.root();
        let first = fs.make_directory(root, &path("/dup")).unwrap();
        let second = fs.make_directory(root, &path("/dup")).unwrap();
        assert_ne!(first, second);
        assert_eq!(fs.resolve_dir(root, &path("/dup")).unwrap(), first);
        assert_eq!(fs.children(root).len(), 2);
    }

    #[test]
    fn files_do_not_shadow_directories_in_directory_lookup() {
        let mut fs = Filesystem::new();
        let root = fs.root();
        fs.add_file(root, &path("/"), "x", "").unwrap();
        let dir = fs.make_directory(root, &path("/x")).unwrap();
        assert_eq!(fs.resolve_dir(root, &path("/x")).unwrap(), dir);
    }

    #[test]
    fn write_file_replaces_content() {
        let mut fs = Filesystem::new();
        let root = fs.root();
        let file = fs.add_file(root, &path("/"), "note.txt", "old").unwrap();
        fs.write_file(file, "new").unwrap();
        assert_eq!(fs.file(file).unwrap().content, "new");
    }

    #[test]
    fn root_path_renders_as_slash() {
        let fs = Filesystem::new();
        assert_eq!(fs.path_of(fs.root()), "/");
    }
}
