use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use colloscope_engine::export::{render, ExportFormat, ExportOptions};
use colloscope_engine::parsing::parse;
use colloscope_engine::transformations::{filter_by_group, sort_entries, SortKey};

const SUBJECTS: [&str; 4] = ["Maths", "Physique", "Anglais", "Informatique"];
const WEEKDAYS: [&str; 6] = ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi"];

/// A year-long colloscope: `rows` slots over 30 weeks, with one holiday column.
fn synthetic_source(rows: usize) -> String {
    let mut source = String::from("subject,professor,weekday,hour,classroom");
    let start = chrono::NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
    for week in 0..30 {
        let date = start + chrono::Duration::weeks(week);
        source.push_str(&format!(",{}", date.format("%d/%m/%y")));
        if week == 7 {
            source.push_str(",Vacances");
        }
    }
    source.push('\n');

    for row in 0..rows {
        source.push_str(&format!(
            "{},Prof {},{},{}h,B{}",
            SUBJECTS[row % SUBJECTS.len()],
            row,
            WEEKDAYS[row % WEEKDAYS.len()],
            8 + row % 10,
            100 + row
        ));
        for week in 0..30 {
            source.push_str(&format!(",{}", (row + week) % 16 + 1));
            if week == 7 {
                source.push(',');
            }
        }
        source.push('\n');
    }
    source
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for rows in [10usize, 50, 200] {
        let source = synthetic_source(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &source, |b, source| {
            b.iter(|| parse(black_box(source)).unwrap());
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let colloscope = parse(&synthetic_source(50)).unwrap();
    let sorted = sort_entries(colloscope.entries(), SortKey::ByTime);
    let entries = filter_by_group(&sorted, "3");
    let options = ExportOptions::default();

    for format in ExportFormat::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(format),
            &format,
            |b, format| {
                b.iter(|| {
                    render(
                        black_box(&entries),
                        *format,
                        "3",
                        colloscope.holidays(),
                        &options,
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
