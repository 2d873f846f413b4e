use std::collections::HashSet;
use std::io::Write;
use std::time::Instant;

use crate::compositor::{CornerMap, draw_edges, draw_title};
use crate::content::{PhysicalLine, render_row};
use crate::cursor;
use crate::error::{EngineError, Result};
use crate::geometry::Size;
use crate::layout::{PaneNeed, adjust, resolve};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::{RedrawMetrics, RedrawSnapshot};
use crate::panel::{ContentSource, PanelContent, column_widths, row_widths, visible_window};
use crate::style::Scheme;
use crate::template::TemplateSet;

/// Configuration knobs for the redraw pass.
#[derive(Clone)]
pub struct ScreenConfig {
    /// Optional structured logger; pass statistics are emitted at debug level.
    pub logger: Option<Logger>,
    /// Target field used when emitting pass events.
    pub log_target: String,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            logger: None,
            log_target: "atrium::screen".to_string(),
        }
    }
}

/// The engine entry point. Owns the immutable configuration (templates and
/// color scheme); everything else is rebuilt per pass.
pub struct Screen {
    templates: TemplateSet,
    scheme: Scheme,
    config: ScreenConfig,
    metrics: RedrawMetrics,
    started: Instant,
}

struct RenderedPane {
    content: PanelContent,
    lines: Vec<PhysicalLine>,
    lines_per_row: Vec<usize>,
}

impl Screen {
    pub fn new(templates: TemplateSet, scheme: Scheme) -> Self {
        Self::with_config(templates, scheme, ScreenConfig::default())
    }

    pub fn with_config(templates: TemplateSet, scheme: Scheme, config: ScreenConfig) -> Self {
        Self {
            templates,
            scheme,
            config,
            metrics: RedrawMetrics::new(),
            started: Instant::now(),
        }
    }

    pub fn config_mut(&mut self) -> &mut ScreenConfig {
        &mut self.config
    }

    pub fn metrics(&self) -> RedrawSnapshot {
        self.metrics.snapshot(self.started.elapsed())
    }

    /// Run one full redraw pass.
    ///
    /// Single-threaded and synchronous: the caller guarantees at most one
    /// pass at a time and stable inputs for its duration. The composed frame
    /// is written in a single blocking write at the end; I/O failure is
    /// fatal to the caller, which also owns terminal-mode restoration.
    pub fn redraw(
        &mut self,
        out: &mut impl Write,
        size: Size,
        sources: &[&dyn ContentSource],
        visible: &HashSet<String>,
    ) -> Result<()> {
        let arena = self.templates.pick(size);
        let mut layouts = resolve(arena, size, visible);

        // Per-panel content render at the resolved widths.
        let mut rendered: Vec<RenderedPane> = Vec::with_capacity(layouts.len());
        for layout in &layouts {
            let source = sources
                .iter()
                .find(|source| source.panel() == layout.panel)
                .ok_or_else(|| EngineError::MissingSource(layout.panel.clone()))?;
            let content = source.content();

            let base_widths = column_widths(&content.rows, layout.content_rect.width);
            let mut lines = Vec::new();
            let mut lines_per_row = Vec::with_capacity(content.rows.len());
            for row in &content.rows {
                let widths = row_widths(
                    &base_widths,
                    row.columns.len().max(1),
                    layout.content_rect.width,
                );
                let row_lines = render_row(row, &widths);
                lines_per_row.push(row_lines.len());
                lines.extend(row_lines);
            }

            rendered.push(RenderedPane {
                content,
                lines,
                lines_per_row,
            });
        }

        // Elastic adjustment once actual line counts are known.
        let needs: Vec<PaneNeed> = layouts
            .iter()
            .zip(&rendered)
            .map(|(layout, pane)| {
                let node = arena.node(layout.node);
                let overhead = layout
                    .box_rect
                    .height
                    .saturating_sub(layout.content_rect.height);
                PaneNeed {
                    height: ((pane.lines.len() as u16).saturating_add(overhead))
                        .max(node.min_height.unwrap_or(0)),
                    expand: node.expand,
                }
            })
            .collect();
        let adjusted_groups = adjust(&mut layouts, &needs);

        // Compose the frame: clear, per-panel edges and content, merged
        // corners, then titles over the top borders.
        let mut buf = String::new();
        buf.push_str(&cursor::move_to(0, 0));
        buf.push_str(cursor::clear_to_screen_end());

        let background = self.scheme.background();
        let mut corners = CornerMap::new();
        let mut total_lines = 0usize;

        for (layout, pane) in layouts.iter().zip(&rendered) {
            draw_edges(&mut buf, layout.box_rect, &self.scheme);
            corners.record(layout.box_rect);

            let content_rect = layout.content_rect;
            if content_rect.is_empty() {
                continue;
            }

            let window = visible_window(
                &pane.lines_per_row,
                pane.content.anchor,
                content_rect.height as usize,
            );
            let mut y = content_rect.y;
            for line in &pane.lines[window] {
                buf.push_str(&cursor::move_to(y, content_rect.x));
                for cell in &line.cells {
                    buf.push_str(&self.scheme.resolve(&cell.style).paint(&cell.text));
                }
                y += 1;
                total_lines += 1;
            }

            // Background fill for panel rows beyond the content.
            let filler = background.paint(&" ".repeat(content_rect.width as usize));
            while y < content_rect.bottom() {
                buf.push_str(&cursor::move_to(y, content_rect.x));
                buf.push_str(&filler);
                y += 1;
            }
        }

        corners.render(&mut buf, &self.scheme);

        for (layout, pane) in layouts.iter().zip(&rendered) {
            if let Some(title) = &pane.content.title {
                draw_title(&mut buf, layout.box_rect, title, &self.scheme);
            }
        }

        out.write_all(buf.as_bytes())?;
        out.flush()?;

        self.metrics.record_pass(layouts.len(), total_lines);
        self.metrics.record_elastic_groups(adjusted_groups);
        if let Some(logger) = &self.config.logger {
            let _ = logger.log_event(event_with_fields(
                LogLevel::Debug,
                &self.config.log_target,
                "redraw_pass",
                [
                    json_kv("panes", layouts.len() as u64),
                    json_kv("lines", total_lines as u64),
                    json_kv("elastic_groups", adjusted_groups as u64),
                ],
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Column, Row, Span};
    use crate::panel::{StaticSource, Title};
    use crate::template::{Dim, TemplateArena, TemplateSpec};

    fn two_pane_screen() -> Screen {
        let spec = TemplateSpec::group(vec![
            TemplateSpec::pane("source")
                .with_width(Dim::Ratio(50))
                .with_height(Dim::Inherit),
            TemplateSpec::pane("variables")
                .with_width(Dim::Ratio(50))
                .with_height(Dim::Inherit),
        ]);
        let arena = TemplateArena::compile(&spec).unwrap();
        Screen::new(TemplateSet::new(vec![], arena), Scheme::new())
    }

    fn source(panel: &str, texts: &[&str]) -> StaticSource {
        let rows = texts
            .iter()
            .map(|text| Row::new(vec![Column::new(vec![Span::new(*text, "value")])]))
            .collect();
        StaticSource::new(panel, PanelContent::new(rows))
    }

    fn visible(names: &[&str]) -> HashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn pass_starts_with_home_and_clear() {
        let mut screen = two_pane_screen();
        let left = source("source", &["fn main() {"]);
        let right = source("variables", &["x = 1"]);
        let mut out = Vec::new();

        screen
            .redraw(
                &mut out,
                Size::new(80, 24),
                &[&left, &right],
                &visible(&["source", "variables"]),
            )
            .unwrap();

        let frame = String::from_utf8(out).unwrap();
        assert!(frame.starts_with("\x1b[1;1H\x1b[0J"));
        assert!(frame.contains("fn main() {"));
        assert!(frame.contains("x = 1"));
    }

    #[test]
    fn adjacent_panels_share_merged_corner_glyphs() {
        let mut screen = two_pane_screen();
        let left = source("source", &["a"]);
        let right = source("variables", &["b"]);
        let mut out = Vec::new();

        screen
            .redraw(
                &mut out,
                Size::new(80, 24),
                &[&left, &right],
                &visible(&["source", "variables"]),
            )
            .unwrap();

        let frame = String::from_utf8(out).unwrap();
        assert!(frame.contains('┬'));
        assert!(frame.contains('┴'));
        assert!(frame.contains('┌'));
        assert!(frame.contains('─'));
    }

    #[test]
    fn titles_are_drawn_inside_the_top_border() {
        let spec = TemplateSpec::pane("only");
        let arena = TemplateArena::compile(&spec).unwrap();
        let mut screen = Screen::new(TemplateSet::new(vec![], arena), Scheme::new());
        let content = PanelContent::new(vec![])
            .with_title(Title::new(vec![Span::new("Source", "title")]));
        let src = StaticSource::new("only", content);
        let mut out = Vec::new();

        screen
            .redraw(&mut out, Size::new(40, 10), &[&src], &visible(&["only"]))
            .unwrap();

        let frame = String::from_utf8(out).unwrap();
        assert!(frame.contains("Source"));
    }

    #[test]
    fn missing_source_is_an_error() {
        let mut screen = two_pane_screen();
        let left = source("source", &["a"]);
        let mut out = Vec::new();

        let err = screen
            .redraw(
                &mut out,
                Size::new(80, 24),
                &[&left],
                &visible(&["source", "variables"]),
            )
            .unwrap_err();

        assert!(matches!(err, EngineError::MissingSource(name) if name == "variables"));
    }

    #[test]
    fn short_panels_are_background_filled() {
        let spec = TemplateSpec::pane("only");
        let arena = TemplateArena::compile(&spec).unwrap();
        let mut screen = Screen::new(TemplateSet::new(vec![], arena), Scheme::new());
        let src = source("only", &["one line"]);
        let mut out = Vec::new();

        screen
            .redraw(&mut out, Size::new(20, 6), &[&src], &visible(&["only"]))
            .unwrap();

        let frame = String::from_utf8(out).unwrap();
        // Content area is 18 wide; fill lines are full-width space runs.
        assert!(frame.contains(&" ".repeat(18)));
    }

    #[test]
    fn metrics_accumulate_per_pass() {
        let mut screen = two_pane_screen();
        let left = source("source", &["a"]);
        let right = source("variables", &["b"]);
        let names = visible(&["source", "variables"]);
        let mut out = Vec::new();

        screen
            .redraw(&mut out, Size::new(80, 24), &[&left, &right], &names)
            .unwrap();
        screen
            .redraw(&mut out, Size::new(80, 24), &[&left, &right], &names)
            .unwrap();

        let snapshot = screen.metrics();
        assert_eq!(snapshot.passes, 2);
        assert_eq!(snapshot.panes_rendered, 4);
    }
}
