// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_reorder::handler::{GridHandler, LayoutHandler};
use understory_reorder::inference::{find_target, target_and_position};
use understory_reorder::layout::{ColumnDescription, Layout, LayoutDescription};
use understory_reorder::lookup::StaticElements;
use understory_reorder::model::Model;
use understory_reorder::permissions::Permissions;
use understory_reorder::types::{Direction, Position, Step};

const CONTAINER: u32 = u32::MAX;

fn column_id(c: usize) -> u32 {
    1_000_000 + c as u32
}

/// `columns` columns of `per_column` items each, items numbered from 0.
fn gen_module_layout(columns: usize, per_column: usize) -> Layout<u32> {
    let desc = LayoutDescription {
        id: CONTAINER,
        columns: (0..columns)
            .map(|c| ColumnDescription {
                id: column_id(c),
                children: (0..per_column)
                    .map(|i| (c * per_column + i) as u32)
                    .collect(),
            })
            .collect(),
    };
    Layout::from_description(desc).expect("generated layout is well formed")
}

/// Every `stride`th item is locked.
fn gen_locked(layout: &Layout<u32>, stride: usize) -> Vec<u32> {
    layout.items().copied().step_by(stride).collect()
}

/// Bounds for a single-column grid wrapped `width` items to a row.
fn gen_grid_bounds(count: usize, width: usize, cell: f64) -> StaticElements<u32> {
    let mut els = StaticElements::new();
    for i in 0..count {
        let x0 = (i % width) as f64 * cell;
        let y0 = (i / width) as f64 * cell;
        els.set_bounds(i as u32, Rect::new(x0, y0, x0 + cell, y0 + cell));
    }
    els
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

fn gen_moves(layout: &Layout<u32>, count: usize) -> Vec<(u32, u32, Position)> {
    let items: Vec<u32> = layout.items().copied().collect();
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let item = items[rng.below(items.len())];
            let target = items[rng.below(items.len())];
            let position = if rng.below(2) == 0 {
                Position::Before
            } else {
                Position::After
            };
            (item, target, position)
        })
        .collect()
}

fn bench_permissions(c: &mut Criterion) {
    let mut group = c.benchmark_group("permissions");
    for &n in &[16usize, 64, 256] {
        let layout = gen_module_layout(4, n);
        let locked = gen_locked(&layout, 7);
        group.throughput(Throughput::Elements(layout.item_count() as u64));
        group.bench_function(format!("for_locked_items_4x{}", n), |b| {
            b.iter(|| black_box(Permissions::for_locked_items(&locked, &layout)))
        });
    }
    group.finish();
}

fn bench_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("inference");
    for &n in &[16usize, 64, 256] {
        let layout = gen_module_layout(4, n);
        let perms = Permissions::for_locked_items(&gen_locked(&layout, 7), &layout);
        let items: Vec<u32> = layout.items().copied().collect();
        group.throughput(Throughput::Elements(items.len() as u64));
        group.bench_function(format!("find_target_right_4x{}", n), |b| {
            b.iter(|| {
                for item in &items {
                    black_box(find_target(item, Step::Next, &layout, &perms));
                }
            })
        });
        group.bench_function(format!("target_and_position_below_4x{}", n), |b| {
            b.iter(|| {
                for item in &items {
                    black_box(target_and_position(item, Position::After, &layout, &perms));
                }
            })
        });
    }
    // Fully locked: every scan runs to the end of the layout.
    let layout = gen_module_layout(8, 64);
    let locked: Vec<u32> = layout.items().skip(1).copied().collect();
    let perms = Permissions::for_locked_items(&locked, &layout);
    let mover = *layout.columns()[0].items().first().expect("non-empty column");
    group.bench_function("find_target_worst_case_8x64", |b| {
        b.iter(|| black_box(find_target(&mover, Step::Next, &layout, &perms)))
    });
    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit");
    for &n in &[16usize, 64, 256] {
        let layout = gen_module_layout(4, n);
        let moves = gen_moves(&layout, 256);
        group.throughput(Throughput::Elements(moves.len() as u64));
        group.bench_function(format!("unrestricted_4x{}", n), |b| {
            b.iter_batched(
                || Model::new(layout.clone()),
                |mut model| {
                    for (item, target, position) in &moves {
                        black_box(model.commit(item, target, *position));
                    }
                },
                BatchSize::SmallInput,
            )
        });
        // Locked rule: permissions are rederived after every move.
        let locked = gen_locked(&layout, 7);
        group.bench_function(format!("locked_rule_4x{}", n), |b| {
            b.iter_batched(
                || Model::with_locked_items(layout.clone(), locked.clone()),
                |mut model| {
                    for (item, target, position) in &moves {
                        black_box(model.commit(item, target, *position));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_grid_handler(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_handler");
    for &n in &[64usize, 256, 1024] {
        let items: Vec<u32> = (0..n as u32).collect();
        let layout = Layout::single_column(CONTAINER, column_id(0), items.clone())
            .expect("generated layout is well formed");
        let els = gen_grid_bounds(n, 16, 10.0);
        let handler = GridHandler::new();
        let model = Model::new(layout.clone());
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("neighbor_down_n{}", n), |b| {
            b.iter(|| {
                for item in &items {
                    black_box(handler.neighbor(&model, &els, item, Direction::Down));
                }
            })
        });
        group.bench_function(format!("move_down_n{}", n), |b| {
            b.iter_batched(
                || Model::new(layout.clone()),
                |mut model| {
                    for _ in 0..32 {
                        black_box(handler.move_item_down(&mut model, &els, &0));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_permissions,
    bench_inference,
    bench_commit,
    bench_grid_handler,
);
criterion_main!(benches);
