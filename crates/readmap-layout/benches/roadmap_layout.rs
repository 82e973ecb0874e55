use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use readmap_layout::{Book, Size, assign_levels, delete_book, layout_roadmap};
use std::hint::black_box;
use std::time::Duration;

fn build_roadmap(book_count: usize, fanout: usize) -> Vec<Book> {
    let mut books: Vec<Book> = Vec::with_capacity(book_count);
    for i in 0..book_count {
        let mut prerequisites: Vec<u64> = Vec::new();
        // A spine so every level is populated.
        if i > 0 {
            prerequisites.push((i - 1) as u64);
        }
        // Extra backward edges for shared prerequisites.
        for k in 2..=(fanout + 1) {
            if i >= k * 3 {
                prerequisites.push((i - k * 3) as u64);
            }
        }
        books.push(Book::new(format!("b{i}"), i as u64).with_prerequisites(prerequisites));
    }
    // Most real roadmaps are bushy rather than deep: peel the spine off every fourth book.
    for (i, book) in books.iter_mut().enumerate() {
        if i % 4 == 0 {
            book.prerequisites.retain(|p| *p + 1 != i as u64);
        }
    }
    books
}

fn bench_roadmap_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("roadmap_layout");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("books_20_f2", 20usize, 2usize),
        ("books_200_f3", 200usize, 3usize),
        ("books_2000_f4", 2000usize, 4usize),
    ];

    for (name, count, fanout) in cases {
        let books = build_roadmap(count, fanout);
        group.bench_with_input(BenchmarkId::new("assign_levels", name), &books, |b, books| {
            b.iter(|| black_box(assign_levels(black_box(books))).map(|l| l.len()))
        });
        group.bench_with_input(BenchmarkId::new("layout_roadmap", name), &books, |b, books| {
            b.iter(|| {
                black_box(layout_roadmap(black_box(books), Size::new(1400.0, 900.0)))
                    .map(|r| r.connections.len())
            })
        });
        group.bench_with_input(BenchmarkId::new("delete_book", name), &books, |b, books| {
            b.iter(|| black_box(delete_book(black_box(books), "b0")).len())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_roadmap_layout);
criterion_main!(benches);
