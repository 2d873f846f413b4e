use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Size;

/// Stable index of a node inside a [`TemplateArena`].
pub type NodeIdx = usize;

/// How a node sizes one dimension relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dim {
    /// Absolute cell count.
    Fixed(u16),
    /// Percentage of the parent's resolved dimension (0-100).
    Ratio(u8),
    /// Take the parent's full dimension.
    #[default]
    Inherit,
}

/// Fatal template configuration errors, raised once at compile time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("node binds panel `{0}` but also declares children")]
    AmbiguousNode(String),
    #[error("node declares neither children nor a panel binding")]
    UnboundLeaf,
}

/// Declarative template node, the shape configuration files deserialize to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateSpec {
    #[serde(default)]
    pub width: Dim,
    #[serde(default)]
    pub height: Dim,
    #[serde(default)]
    pub min_width: Option<u16>,
    #[serde(default)]
    pub min_height: Option<u16>,
    /// The last child on each flow line absorbs leftover width.
    #[serde(default)]
    pub fill_width: bool,
    /// The last flow line absorbs leftover height.
    #[serde(default)]
    pub fill_height: bool,
    /// Treat the panel as always expandable during elastic adjustment.
    #[serde(default)]
    pub expand: bool,
    pub panel: Option<String>,
    #[serde(default)]
    pub children: Vec<TemplateSpec>,
}

impl TemplateSpec {
    /// Leaf node bound to one panel identity.
    pub fn pane(panel: impl Into<String>) -> Self {
        Self {
            panel: Some(panel.into()),
            ..Self::default()
        }
    }

    /// Container node grouping child templates.
    pub fn group(children: Vec<TemplateSpec>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: Dim) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Dim) -> Self {
        self.height = height;
        self
    }

    pub fn with_min_width(mut self, min: u16) -> Self {
        self.min_width = Some(min);
        self
    }

    pub fn with_min_height(mut self, min: u16) -> Self {
        self.min_height = Some(min);
        self
    }

    pub fn filling_width(mut self) -> Self {
        self.fill_width = true;
        self
    }

    pub fn filling_height(mut self) -> Self {
        self.fill_height = true;
        self
    }

    pub fn always_expand(mut self) -> Self {
        self.expand = true;
        self
    }
}

/// Compiled template node addressed by arena index.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateNode {
    pub width: Dim,
    pub height: Dim,
    pub min_width: Option<u16>,
    pub min_height: Option<u16>,
    pub fill_width: bool,
    pub fill_height: bool,
    pub expand: bool,
    pub panel: Option<String>,
    pub children: Vec<NodeIdx>,
    pub parent: Option<NodeIdx>,
}

/// Flattened, validated template tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateArena {
    nodes: Vec<TemplateNode>,
    root: NodeIdx,
}

impl TemplateArena {
    /// Validate and flatten a declarative spec. Configuration errors are
    /// fatal here so the per-redraw hot path never revalidates.
    pub fn compile(spec: &TemplateSpec) -> Result<Self, TemplateError> {
        let mut nodes = Vec::new();
        let root = flatten(spec, None, &mut nodes)?;
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeIdx {
        self.root
    }

    pub fn node(&self, idx: NodeIdx) -> &TemplateNode {
        &self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Minimum terminal size this template asks for (root node floors).
    pub fn min_size(&self) -> Size {
        let root = self.node(self.root);
        Size::new(root.min_width.unwrap_or(0), root.min_height.unwrap_or(0))
    }

    /// A node is visible iff it is a visible leaf or any descendant is.
    pub fn is_visible(&self, idx: NodeIdx, visible: &HashSet<String>) -> bool {
        let node = self.node(idx);
        if let Some(panel) = &node.panel {
            return visible.contains(panel);
        }
        node.children
            .iter()
            .any(|&child| self.is_visible(child, visible))
    }
}

fn flatten(
    spec: &TemplateSpec,
    parent: Option<NodeIdx>,
    nodes: &mut Vec<TemplateNode>,
) -> Result<NodeIdx, TemplateError> {
    match (&spec.panel, spec.children.is_empty()) {
        (Some(panel), false) => return Err(TemplateError::AmbiguousNode(panel.clone())),
        (None, true) => return Err(TemplateError::UnboundLeaf),
        _ => {}
    }

    let idx = nodes.len();
    nodes.push(TemplateNode {
        width: spec.width,
        height: spec.height,
        min_width: spec.min_width,
        min_height: spec.min_height,
        fill_width: spec.fill_width,
        fill_height: spec.fill_height,
        expand: spec.expand,
        panel: spec.panel.clone(),
        children: Vec::new(),
        parent,
    });

    let mut children = Vec::with_capacity(spec.children.len());
    for child in &spec.children {
        children.push(flatten(child, Some(idx), nodes)?);
    }
    nodes[idx].children = children;

    Ok(idx)
}

/// Ordered candidate templates plus the designated fallback.
///
/// The fallback should declare no minimums; it is used unconditionally when
/// the terminal satisfies no candidate, so a pass always has a template.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    candidates: Vec<TemplateArena>,
    fallback: TemplateArena,
}

impl TemplateSet {
    pub fn new(candidates: Vec<TemplateArena>, fallback: TemplateArena) -> Self {
        Self {
            candidates,
            fallback,
        }
    }

    /// First candidate whose minimums fit the terminal, else the fallback.
    pub fn pick(&self, size: Size) -> &TemplateArena {
        self.candidates
            .iter()
            .find(|arena| {
                let min = arena.min_size();
                size.width >= min.width && size.height >= min.height
            })
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &TemplateArena {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_pane_spec() -> TemplateSpec {
        TemplateSpec::group(vec![
            TemplateSpec::pane("source").with_width(Dim::Ratio(50)),
            TemplateSpec::pane("variables").with_width(Dim::Ratio(50)),
        ])
    }

    #[test]
    fn compile_assigns_parent_indices() {
        let arena = TemplateArena::compile(&two_pane_spec()).unwrap();
        assert_eq!(arena.len(), 3);
        let root = arena.root();
        for &child in &arena.node(root).children {
            assert_eq!(arena.node(child).parent, Some(root));
        }
    }

    #[test]
    fn node_with_binding_and_children_is_rejected() {
        let mut spec = TemplateSpec::pane("source");
        spec.children.push(TemplateSpec::pane("variables"));
        assert_eq!(
            TemplateArena::compile(&spec),
            Err(TemplateError::AmbiguousNode("source".into()))
        );
    }

    #[test]
    fn node_with_neither_is_rejected() {
        let spec = TemplateSpec::default();
        assert_eq!(TemplateArena::compile(&spec), Err(TemplateError::UnboundLeaf));
    }

    #[test]
    fn visibility_propagates_to_ancestors() {
        let arena = TemplateArena::compile(&two_pane_spec()).unwrap();
        let mut visible = HashSet::new();
        assert!(!arena.is_visible(arena.root(), &visible));
        visible.insert("variables".to_string());
        assert!(arena.is_visible(arena.root(), &visible));
    }

    #[test]
    fn pick_falls_back_when_minimums_do_not_fit() {
        let strict =
            TemplateArena::compile(&two_pane_spec().with_min_width(120).with_min_height(40))
                .unwrap();
        let fallback = TemplateArena::compile(&two_pane_spec()).unwrap();
        let set = TemplateSet::new(vec![strict], fallback);

        let picked = set.pick(Size::new(80, 24));
        assert_eq!(picked.min_size(), Size::new(0, 0));

        let picked = set.pick(Size::new(160, 50));
        assert_eq!(picked.min_size(), Size::new(120, 40));
    }

    #[test]
    fn specs_deserialize_from_json() {
        let json = r#"{
            "fill_height": true,
            "children": [
                {"panel": "source", "height": {"ratio": 70}},
                {"panel": "backtrace", "height": {"fixed": 10}, "min_height": 3, "expand": true}
            ]
        }"#;
        let spec: TemplateSpec = serde_json::from_str(json).unwrap();
        let arena = TemplateArena::compile(&spec).unwrap();
        assert!(arena.node(arena.root()).fill_height);
        let backtrace = arena
            .node(arena.root())
            .children
            .iter()
            .map(|&idx| arena.node(idx))
            .find(|node| node.panel.as_deref() == Some("backtrace"))
            .unwrap();
        assert_eq!(backtrace.height, Dim::Fixed(10));
        assert!(backtrace.expand);
    }
}
