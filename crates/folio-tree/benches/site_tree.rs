//! Benchmarks for site tree building.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use folio_tree::{FileEntry, OrderBy, SiteTree, TreeOptions, build_site_tree};

/// Generate entries for a tree with specified depth and breadth.
fn generate_entries(depth: usize, breadth: usize) -> Vec<FileEntry> {
    fn level(prefix: &str, current: usize, max: usize, breadth: usize, out: &mut Vec<FileEntry>) {
        if current > max {
            return;
        }
        out.push(FileEntry::new(format!("{prefix}README.md")));
        for i in 0..breadth {
            out.push(
                FileEntry::new(format!("{prefix}page-{i}.md")).with_title(format!("Page {i}")),
            );
            level(&format!("{prefix}section-{i}/"), current + 1, max, breadth, out);
        }
    }

    let mut entries = Vec::new();
    level("", 0, depth, breadth, &mut entries);
    entries
}

fn bench_build_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_site_tree");

    for (depth, breadth) in [(2, 5), (3, 4), (4, 4)] {
        let entries = generate_entries(depth, breadth);

        group.bench_with_input(
            BenchmarkId::new("path_order", entries.len()),
            &entries,
            |b, entries| b.iter(|| build_site_tree(entries, &TreeOptions::default())),
        );

        let by_title = TreeOptions {
            order_by: OrderBy::Title,
            ..TreeOptions::default()
        };
        group.bench_with_input(
            BenchmarkId::new("title_order", entries.len()),
            &entries,
            |b, entries| b.iter(|| build_site_tree(entries, &by_title)),
        );
    }

    group.finish();
}

fn bench_tree_queries(c: &mut Criterion) {
    let entries = generate_entries(4, 4);
    let tree = build_site_tree(&entries, &TreeOptions::default());

    let mut group = c.benchmark_group("tree_queries");

    group.bench_function("get_hit", |b| {
        b.iter(|| tree.get("section-1/section-2/page-3.md"));
    });

    group.bench_function("get_miss", |b| b.iter(|| tree.get("nonexistent/path.md")));

    group.bench_function("items", |b| b.iter(|| tree.items()));

    group.bench_function("breadcrumbs_depth_4", |b| {
        let id = tree
            .get("section-0/section-0/section-0/section-0/page-0.md")
            .unwrap_or(SiteTree::ROOT);
        b.iter(|| tree.breadcrumbs(id));
    });

    group.finish();
}

criterion_group!(benches, bench_build_tree, bench_tree_queries);
criterion_main!(benches);
