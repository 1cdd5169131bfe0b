use std::hint::black_box;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;

type RandomState = hashbrown::DefaultHashBuilder;
type CarouselMap<K, V> = carousel::ordered_map::OrderedMap<K, V, RandomState>;

type HashLinkedMap<K, V> = hashlink::LinkedHashMap<K, V, RandomState>;
type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

const SIZES: &[usize] = &[10000];

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("carousel", size), &size, |b, &size| {
            b.iter(|| {
                let mut map: CarouselMap<usize, usize> = CarouselMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(
            BenchmarkId::new("carousel_preallocated", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut map: CarouselMap<usize, usize> =
                        CarouselMap::with_capacity_and_hasher(size, RandomState::default());
                    for i in 0..size {
                        map.insert(black_box(i), black_box(i * 2));
                    }
                    map
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = IndexMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = HashLinkedMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });
    }

    group.finish();
}

fn bench_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("removal");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("carousel", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut map: CarouselMap<usize, usize> = CarouselMap::default();
                    for i in 0..size {
                        map.insert(i, i * 2);
                    }
                    map
                },
                |mut map| {
                    for i in 0..size {
                        map.remove(black_box(&i));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut map = IndexMap::default();
                    for i in 0..size {
                        map.insert(i, i * 2);
                    }
                    map
                },
                |mut map| {
                    for i in 0..size {
                        map.shift_remove(black_box(&i));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut map = HashLinkedMap::default();
                    for i in 0..size {
                        map.insert(i, i * 2);
                    }
                    map
                },
                |mut map| {
                    for i in 0..size {
                        map.remove(black_box(&i));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        let mut carousel_map: CarouselMap<usize, usize> = CarouselMap::default();
        let mut index_map = IndexMap::default();
        let mut hashlinked = HashLinkedMap::default();
        for i in 0..size {
            carousel_map.insert(i, i * 2);
            index_map.insert(i, i * 2);
            hashlinked.insert(i, i * 2);
        }

        group.bench_with_input(BenchmarkId::new("carousel", size), &size, |b, &size| {
            b.iter(|| {
                let mut sum = 0usize;
                for i in 0..size {
                    sum += carousel_map.get(black_box(&i)).copied().unwrap_or(0);
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter(|| {
                let mut sum = 0usize;
                for i in 0..size {
                    sum += index_map.get(black_box(&i)).copied().unwrap_or(0);
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter(|| {
                let mut sum = 0usize;
                for i in 0..size {
                    sum += hashlinked.get(black_box(&i)).copied().unwrap_or(0);
                }
                sum
            })
        });
    }

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        let mut carousel_map: CarouselMap<usize, usize> = CarouselMap::default();
        let mut index_map = IndexMap::default();
        let mut hashlinked = HashLinkedMap::default();
        for i in 0..size {
            carousel_map.insert(i, i * 2);
            index_map.insert(i, i * 2);
            hashlinked.insert(i, i * 2);
        }

        group.bench_with_input(BenchmarkId::new("carousel", size), &size, |b, _| {
            b.iter(|| carousel_map.values().map(|&v| black_box(v)).sum::<usize>())
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, _| {
            b.iter(|| index_map.values().map(|&v| black_box(v)).sum::<usize>())
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, _| {
            b.iter(|| hashlinked.values().map(|&v| black_box(v)).sum::<usize>())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_removal,
    bench_lookup,
    bench_iteration
);
criterion_main!(benches);
