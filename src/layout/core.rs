use std::collections::HashSet;

use crate::geometry::{Rect, Size};
use crate::template::{Dim, NodeIdx, TemplateArena};

/// Resolved rectangles for one visible leaf panel.
///
/// `box_rect` is the bordered outer rectangle; `content_rect` is the inner
/// area text renders into. `node`/`parent` are arena indices used for elastic
/// sibling grouping, never object identity.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneLayout {
    pub panel: String,
    pub box_rect: Rect,
    pub content_rect: Rect,
    pub node: NodeIdx,
    pub parent: Option<NodeIdx>,
}

impl PaneLayout {
    fn at(panel: &str, rect: Rect, node: NodeIdx, parent: Option<NodeIdx>) -> Self {
        let mut box_rect = rect;
        // Edge-sharing rule: grow back over the neighbour's border so two
        // adjacent boxes overlap on exactly one border column/row.
        if box_rect.x > 0 {
            box_rect.x -= 1;
            box_rect.width = box_rect.width.saturating_add(1);
        }
        if box_rect.y > 0 {
            box_rect.y -= 1;
            box_rect.height = box_rect.height.saturating_add(1);
        }
        let content_rect = box_rect.inset(1);
        Self {
            panel: panel.to_string(),
            box_rect,
            content_rect,
            node,
            parent,
        }
    }
}

/// Resolve a template arena against the terminal size, producing one layout
/// per visible leaf panel in template order.
pub fn resolve(arena: &TemplateArena, size: Size, visible: &HashSet<String>) -> Vec<PaneLayout> {
    let mut layouts = Vec::new();
    if arena.is_visible(arena.root(), visible) {
        solve(arena, arena.root(), Rect::from_size(size), visible, &mut layouts);
    }
    layouts
}

fn solve(
    arena: &TemplateArena,
    idx: NodeIdx,
    rect: Rect,
    visible: &HashSet<String>,
    out: &mut Vec<PaneLayout>,
) {
    let node = arena.node(idx);

    if let Some(panel) = &node.panel {
        out.push(PaneLayout::at(panel, rect, idx, node.parent));
        return;
    }

    struct Item {
        idx: NodeIdx,
        width: u16,
        height: u16,
    }

    let items: Vec<Item> = node
        .children
        .iter()
        .filter(|&&child| arena.is_visible(child, visible))
        .map(|&child| {
            let spec = arena.node(child);
            Item {
                idx: child,
                width: dim_value(spec.width, rect.width).max(spec.min_width.unwrap_or(0)),
                height: dim_value(spec.height, rect.height).max(spec.min_height.unwrap_or(0)),
            }
        })
        .collect();

    // Flow-wrap: accumulate left to right, wrapping when the next child
    // would exceed the parent width.
    let mut lines: Vec<Vec<Item>> = Vec::new();
    let mut line: Vec<Item> = Vec::new();
    let mut line_width: u16 = 0;
    for item in items {
        if !line.is_empty() && line_width.saturating_add(item.width) > rect.width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        line_width = line_width.saturating_add(item.width);
        line.push(item);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    let line_count = lines.len();
    let mut y = rect.y;
    for (line_idx, line) in lines.into_iter().enumerate() {
        let last_line = line_idx + 1 == line_count;
        let line_height = line.iter().map(|item| item.height).max().unwrap_or(0);
        let item_count = line.len();
        let mut x = rect.x;

        for (item_idx, item) in line.into_iter().enumerate() {
            let last_item = item_idx + 1 == item_count;
            let width = if node.fill_width && last_item {
                rect.right().saturating_sub(x)
            } else {
                item.width.min(rect.right().saturating_sub(x))
            };
            let height = if node.fill_height && last_line {
                rect.bottom().saturating_sub(y)
            } else {
                item.height.min(rect.bottom().saturating_sub(y))
            };
            solve(arena, item.idx, Rect::new(x, y, width, height), visible, out);
            x = x.saturating_add(width);
        }

        y = y.saturating_add(if node.fill_height && last_line {
            rect.bottom().saturating_sub(y)
        } else {
            line_height
        });
    }
}

fn dim_value(dim: Dim, parent: u16) -> u16 {
    match dim {
        Dim::Fixed(value) => value,
        Dim::Ratio(ratio) => ((parent as u32 * ratio as u32) / 100) as u16,
        Dim::Inherit => parent,
    }
}
