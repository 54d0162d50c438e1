//! Property trees as handed over by the host.

/// One node of a component's editable property tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNode {
    name: String,
    path: String,
    depth: usize,
    composite: bool,
    custom_drawer: bool,
    visible: bool,
    children: Vec<PropertyNode>,
}

impl PropertyNode {
    /// A leaf property.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: String::new(),
            depth: 0,
            composite: false,
            custom_drawer: false,
            visible: true,
            children: Vec::new(),
        }
    }

    /// A composite property. A composite with no children still renders as a
    /// foldable header.
    pub fn composite(name: impl Into<String>, children: Vec<PropertyNode>) -> Self {
        Self {
            composite: true,
            children,
            ..Self::leaf(name)
        }
    }

    /// The root of a component tree. Assigns depth and dotted path to every
    /// descendant; the root itself sits at depth 0 with an empty path.
    pub fn root(name: impl Into<String>, children: Vec<PropertyNode>) -> Self {
        let mut root = Self::composite(name, children);
        root.reindex(0, "");
        root
    }

    pub fn with_custom_drawer(mut self) -> Self {
        self.custom_drawer = true;
        self
    }

    /// Mark the node as hidden from the host's inspector.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    fn reindex(&mut self, depth: usize, parent_path: &str) {
        self.depth = depth;
        if depth > 0 {
            self.path = if parent_path.is_empty() {
                self.name.clone()
            } else {
                format!("{parent_path}.{}", self.name)
            };
        }
        let path = self.path.clone();
        for child in &mut self.children {
            child.reindex(depth + 1, &path);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted path from the component root, e.g. `color.r`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_composite(&self) -> bool {
        self.composite
    }

    pub fn has_custom_drawer(&self) -> bool {
        self.custom_drawer
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Children the host shows in its inspector, in order.
    pub fn visible_children(&self) -> impl Iterator<Item = &PropertyNode> {
        self.children.iter().filter(|child| child.visible)
    }

    /// Copy of this node without its children, for header-only rendering.
    pub fn header(&self) -> Self {
        Self {
            name: self.name.clone(),
            path: self.path.clone(),
            depth: self.depth,
            composite: self.composite,
            custom_drawer: self.custom_drawer,
            visible: self.visible,
            children: Vec::new(),
        }
    }

    /// Number of visible nodes in this subtree, the node itself included.
    pub fn visible_len(&self) -> usize {
        1 + self.visible_children().map(PropertyNode::visible_len).sum::<usize>()
    }

    /// Find a descendant by dotted path.
    pub fn find(&self, path: &str) -> Option<&PropertyNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }
}
