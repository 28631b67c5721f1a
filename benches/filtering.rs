use criterion::{criterion_group, criterion_main, Criterion};

use tenderdesk::filter::{FilterState, SubcontractorList};
use tenderdesk::model::subcontractor::SubcontractorRow;

const TRADES: [&str; 6] = [
    "Electrical",
    "Plumbing",
    "Roofing",
    "Groundworks",
    "Joinery",
    "Mechanical",
];
const OFFICES: [&str; 4] = ["Leeds", "York", "Hull", "Sheffield"];

fn sample_rows(n: usize) -> Vec<SubcontractorRow> {
    (0..n)
        .map(|i| {
            SubcontractorRow::new(
                i.to_string(),
                format!("Contractor {i} Ltd"),
                TRADES[i % TRADES.len()],
                OFFICES[i % OFFICES.len()],
            )
        })
        .collect()
}

fn bench_apply_filter(c: &mut Criterion) {
    let mut list = SubcontractorList::new(sample_rows(5_000));

    c.bench_function("filter_trade_and_search_5k", |b| {
        b.iter(|| list.apply_filter(FilterState::new("electr", "leeds")))
    });
}

fn bench_select_all_visible(c: &mut Criterion) {
    let mut list = SubcontractorList::new(sample_rows(5_000));
    list.set_trade("roof");

    c.bench_function("select_all_visible_5k", |b| {
        b.iter(|| list.select_all_visible())
    });
}

criterion_group!(benches, bench_apply_filter, bench_select_all_visible);
criterion_main!(benches);
