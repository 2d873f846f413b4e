//! Three-panel dashboard driving the engine against a live terminal.
//!
//! Run with `cargo run --example dashboard`. Arrow keys move the source
//! selection, `q` or Esc exits. The engine only renders; raw mode, the
//! alternate screen, and the redraw triggers all live out here in the
//! caller, which is the intended split.

use std::collections::HashSet;
use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor as term_cursor, execute};

use atrium::{
    Anchor, Color, Column, Dim, PanelContent, Row, Scheme, Screen, Span, StaticSource, Style,
    TemplateArena, TemplateSet, TemplateSpec, Title, WrapMode, probe_size, tags,
};

const SOURCE_LINES: &[&str] = &[
    "fn resolve(arena: &TemplateArena, size: Size) {",
    "    let rect = Rect::from_size(size);",
    "    for child in node.children() {",
    "        let width = dim_value(child.width, rect.width);",
    "        solve(arena, child, rect, &mut layouts);",
    "    }",
    "}",
    "",
    "fn dim_value(dim: Dim, parent: u16) -> u16 {",
    "    match dim {",
    "        Dim::Fixed(value) => value,",
    "        Dim::Ratio(ratio) => ratio_of(parent, ratio),",
    "        Dim::Inherit => parent,",
    "    }",
    "}",
];

fn scheme() -> Scheme {
    Scheme::new()
        .with(tags::BORDER, Style::new().fg(Color::Indexed(240)))
        .with(tags::TITLE, Style::new().fg(Color::Indexed(203)))
        .with(tags::BACKGROUND, Style::new())
        .with("lineno", Style::new().fg(Color::Indexed(244)))
        .with("keyword", Style::new().fg(Color::Indexed(110)))
        .with("selected", Style::new().fg(Color::Indexed(229)))
}

fn template() -> TemplateArena {
    let spec = TemplateSpec::group(vec![
        TemplateSpec::pane("source")
            .with_width(Dim::Ratio(60))
            .with_height(Dim::Inherit),
        TemplateSpec::group(vec![
            TemplateSpec::pane("variables").with_height(Dim::Ratio(55)),
            TemplateSpec::pane("backtrace")
                .with_height(Dim::Ratio(45))
                .always_expand(),
        ])
        .with_width(Dim::Ratio(40))
        .filling_height(),
    ])
    .filling_width();
    TemplateArena::compile(&spec).expect("demo template is well formed")
}

fn source_pane(selected: usize) -> StaticSource {
    let rows = SOURCE_LINES
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let style = if idx == selected { "selected" } else { "keyword" };
            Row::new(vec![Column::new(vec![
                Span::new(format!("{:>3} ", idx + 1), "lineno"),
                Span::new(*line, style),
            ])
            .with_wrap(WrapMode::BreakAnywhere)])
        })
        .collect();

    StaticSource::new(
        "source",
        PanelContent::new(rows)
            .with_anchor(Anchor::SelectedRow(selected))
            .with_title(Title::new(vec![
                Span::new("source", tags::TITLE),
                Span::new("resolver.rs", "lineno"),
            ])),
    )
}

fn variables_pane() -> StaticSource {
    let bindings = [
        ("arena", "TemplateArena { nodes: 5 }"),
        ("size", "Size { width: 160, height: 48 }"),
        ("visible", "{\"source\", \"variables\", \"backtrace\"}"),
        ("layouts", "Vec<PaneLayout> (len 3)"),
    ];
    let rows = bindings
        .iter()
        .map(|(name, value)| {
            Row::new(vec![
                Column::new(vec![Span::new(*name, "keyword")]),
                Column::new(vec![Span::new(*value, tags::BACKGROUND)])
                    .with_wrap(WrapMode::Normal),
            ])
            .with_line_limit(2)
        })
        .collect();

    StaticSource::new(
        "variables",
        PanelContent::new(rows)
            .with_title(Title::new(vec![Span::new("variables", tags::TITLE)])),
    )
}

fn backtrace_pane() -> StaticSource {
    let frames = [
        "#0 atrium::screen::redraw",
        "#1 atrium::layout::resolve",
        "#2 demo::main",
    ];
    let rows = frames
        .iter()
        .map(|frame| {
            Row::new(vec![Column::new(vec![Span::new(*frame, tags::BACKGROUND)])])
        })
        .collect();

    StaticSource::new(
        "backtrace",
        PanelContent::new(rows)
            .with_title(Title::new(vec![Span::new("backtrace", tags::TITLE)])),
    )
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, term_cursor::Hide)?;

    let result = run(&mut stdout);

    execute!(stdout, term_cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run(stdout: &mut impl Write) -> io::Result<()> {
    let mut screen = Screen::new(TemplateSet::new(vec![], template()), scheme());
    let visible: HashSet<String> = ["source", "variables", "backtrace"]
        .into_iter()
        .map(String::from)
        .collect();
    let mut selected = 0usize;

    loop {
        let size = probe_size().map_err(io::Error::other)?;
        let source = source_pane(selected);
        let variables = variables_pane();
        let backtrace = backtrace_pane();
        screen
            .redraw(
                stdout,
                size,
                &[&source, &variables, &backtrace],
                &visible,
            )
            .map_err(io::Error::other)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Up => selected = selected.saturating_sub(1),
                KeyCode::Down => {
                    selected = (selected + 1).min(SOURCE_LINES.len().saturating_sub(1));
                }
                _ => {}
            },
            Event::Resize(..) => {}
            _ => {}
        }
    }

    Ok(())
}
