use std::collections::HashSet;
use std::io;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use atrium::{
    Anchor, Column, Dim, PanelContent, Row, Scheme, Screen, Size, Span, StaticSource,
    TemplateArena, TemplateSet, TemplateSpec, Title, WrapMode, tags,
};

fn build_screen() -> Screen {
    let spec = TemplateSpec::group(vec![
        TemplateSpec::pane("source")
            .with_width(Dim::Ratio(60))
            .with_height(Dim::Inherit),
        TemplateSpec::group(vec![
            TemplateSpec::pane("variables").with_height(Dim::Ratio(60)),
            TemplateSpec::pane("backtrace").with_height(Dim::Ratio(40)).always_expand(),
        ])
        .with_width(Dim::Ratio(40))
        .filling_height(),
    ])
    .filling_width();

    let arena = TemplateArena::compile(&spec).expect("template");
    Screen::new(TemplateSet::new(vec![], arena), Scheme::new())
}

fn source_pane() -> StaticSource {
    let rows = (0..200)
        .map(|line| {
            Row::new(vec![Column::new(vec![
                Span::new(format!("{line:>4} "), tags::BORDER),
                Span::new(
                    "let resolved = templates.pick(size).node(idx).clone();",
                    tags::BACKGROUND,
                ),
            ])
            .with_wrap(WrapMode::BreakAnywhere)])
        })
        .collect();
    StaticSource::new(
        "source",
        PanelContent::new(rows)
            .with_anchor(Anchor::SelectedRow(120))
            .with_title(Title::new(vec![Span::new("source", tags::TITLE)])),
    )
}

fn variables_pane() -> StaticSource {
    let rows = (0..60)
        .map(|idx| {
            Row::new(vec![
                Column::new(vec![Span::new(format!("var_{idx}"), tags::BORDER)]),
                Column::new(vec![Span::new(
                    "a value long enough to wrap across lines",
                    tags::BACKGROUND,
                )])
                .with_wrap(WrapMode::Normal),
            ])
            .with_line_limit(2)
        })
        .collect();
    StaticSource::new("variables", PanelContent::new(rows))
}

fn backtrace_pane() -> StaticSource {
    let rows = (0..30)
        .map(|depth| {
            Row::new(vec![Column::new(vec![Span::new(
                format!("#{depth} engine::redraw_pass"),
                tags::BACKGROUND,
            )])])
        })
        .collect();
    StaticSource::new(
        "backtrace",
        PanelContent::new(rows).with_anchor(Anchor::CursorLine(4)),
    )
}

fn redraw_full_pass(c: &mut Criterion) {
    let mut screen = build_screen();
    let source = source_pane();
    let variables = variables_pane();
    let backtrace = backtrace_pane();
    let visible: HashSet<String> = ["source", "variables", "backtrace"]
        .into_iter()
        .map(String::from)
        .collect();

    c.bench_function("redraw_full_pass", |b| {
        b.iter(|| {
            let mut sink = io::sink();
            screen
                .redraw(
                    &mut sink,
                    black_box(Size::new(160, 48)),
                    &[&source, &variables, &backtrace],
                    &visible,
                )
                .expect("redraw");
        });
    });
}

fn redraw_small_terminal(c: &mut Criterion) {
    let mut screen = build_screen();
    let source = source_pane();
    let variables = variables_pane();
    let backtrace = backtrace_pane();
    let visible: HashSet<String> = ["source", "variables", "backtrace"]
        .into_iter()
        .map(String::from)
        .collect();

    c.bench_function("redraw_small_terminal", |b| {
        b.iter(|| {
            let mut sink = io::sink();
            screen
                .redraw(
                    &mut sink,
                    black_box(Size::new(80, 24)),
                    &[&source, &variables, &backtrace],
                    &visible,
                )
                .expect("redraw");
        });
    });
}

criterion_group!(benches, redraw_full_pass, redraw_small_terminal);
criterion_main!(benches);
