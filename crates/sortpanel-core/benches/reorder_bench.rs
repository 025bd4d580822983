#![forbid(unsafe_code)]

use criterion::{Criterion, criterion_group, criterion_main};
use sortpanel_core::{NodeId, PanelList, PointerPosition, Size, SortConfig, Sortable};
use std::hint::black_box;

fn column(count: usize) -> (PanelList, Vec<NodeId>, Vec<NodeId>) {
    let mut list = PanelList::new();
    let mut panels = Vec::with_capacity(count);
    let mut triggers = Vec::with_capacity(count);
    for _ in 0..count {
        let panel = list.push("div", &["panel"], Size::new(320.0, 48.0));
        triggers.push(list.push_child(panel, "span", &["handle"]));
        panels.push(panel);
    }
    (list, panels, triggers)
}

fn config() -> SortConfig {
    SortConfig::new("panel", "sorting", "shadow", "handle").expect("valid config")
}

fn bench_drag_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("sortpanel/drag/lifecycle");

    for count in [8usize, 64] {
        group.bench_function(format!("grab_sweep_{count}_drop"), |b| {
            b.iter(|| {
                let (mut list, panels, triggers) = column(count);
                let mut sortable = Sortable::new(&list, config()).expect("sortable");
                sortable
                    .pointer_down(&mut list, &triggers[0], PointerPosition::new(4.0, 4.0))
                    .expect("grab");
                for (index, panel) in panels.iter().enumerate().skip(1) {
                    sortable.pointer_enter(&list, panel).expect("enter");
                    let y = index as f64 * 48.0 + 40.0;
                    let dispatch = sortable
                        .pointer_move(&mut list, PointerPosition::new(4.0, y))
                        .expect("move");
                    black_box(dispatch.effect);
                    sortable.pointer_leave(panel);
                }
                let drop = sortable.pointer_up(&mut list).expect("drop");
                black_box(drop.sequence);
            });
        });
    }

    group.finish();
}

fn bench_settled_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("sortpanel/drag/settled");
    let (mut list, panels, triggers) = column(32);
    let mut sortable = Sortable::new(&list, config()).expect("sortable");
    sortable
        .pointer_down(&mut list, &triggers[10], PointerPosition::new(4.0, 490.0))
        .expect("grab");
    sortable.pointer_enter(&list, &panels[4]).expect("enter");

    group.bench_function("identical_move_32", |b| {
        b.iter(|| {
            let dispatch = sortable
                .pointer_move(&mut list, PointerPosition::new(4.0, black_box(200.0)))
                .expect("move");
            black_box(dispatch.shadow_moved());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_drag_lifecycle, bench_settled_moves);
criterion_main!(benches);
