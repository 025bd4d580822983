//! Property-style invariants for random pointer streams.
//!
//! Each case builds a column of panels with random heights, then replays a
//! random stream of grabs, hover changes, moves, releases, and cancels,
//! checking after every step that:
//! - a shadow exists iff a drag session is open, and there is never more
//!   than one;
//! - the set of real panels in the container never changes;
//! - the reported shadow position matches a live re-scan;
//! - on release the panel lands exactly where the shadow was.

use proptest::prelude::*;
use sortpanel_core::{
    NodeId, PanelHost, PanelList, PointerPosition, Size, SortConfig, SortEffect, SortState,
    Sortable, ordinal_position,
};

#[derive(Debug, Clone)]
enum Step {
    Grab { trigger: usize, dy: f64 },
    Enter { panel: usize },
    Leave { panel: usize },
    Move { y: f64 },
    Release,
    Cancel,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..8, 0.0f64..40.0).prop_map(|(trigger, dy)| Step::Grab { trigger, dy }),
        (0usize..8).prop_map(|panel| Step::Enter { panel }),
        (0usize..8).prop_map(|panel| Step::Leave { panel }),
        (-50.0f64..500.0).prop_map(|y| Step::Move { y }),
        Just(Step::Release),
        Just(Step::Cancel),
    ]
}

fn column(heights: &[f64]) -> (PanelList, Vec<NodeId>, Vec<NodeId>) {
    let mut list = PanelList::new();
    let mut panels = Vec::new();
    let mut triggers = Vec::new();
    for &height in heights {
        let panel = list.push("div", &["panel"], Size::new(120.0, height));
        triggers.push(list.push_child(panel, "i", &["handle"]));
        panels.push(panel);
    }
    (list, panels, triggers)
}

fn real_panels(list: &PanelList) -> Vec<NodeId> {
    let mut nodes: Vec<NodeId> = list
        .select("panel")
        .into_iter()
        .filter(|node| !list.has_class(*node, "shadow"))
        .collect();
    nodes.sort();
    nodes
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn random_streams_preserve_structure(
        heights in prop::collection::vec(10.0f64..80.0, 1..8),
        steps in prop::collection::vec(step(), 0..64),
    ) {
        let (mut list, panels, triggers) = column(&heights);
        let config = SortConfig::new("panel", "sorting", "shadow", "handle")
            .expect("valid config");
        let mut sortable = Sortable::new(&list, config).expect("sortable");
        let mut expected_panels = panels.clone();
        expected_panels.sort();

        for step in steps {
            let shadow_before = match sortable.state() {
                SortState::Dragging { shadow_position, .. } => Some(shadow_position),
                SortState::Idle => None,
            };
            match step {
                Step::Grab { trigger, dy } => {
                    let trigger = &triggers[trigger % triggers.len()];
                    let top = list.extent(trigger).expect("trigger extent").top;
                    sortable
                        .pointer_down(&mut list, trigger, PointerPosition::new(0.0, top + dy))
                        .expect("grab");
                }
                Step::Enter { panel } => {
                    let node = panels[panel % panels.len()];
                    sortable.pointer_enter(&list, &node).expect("enter");
                }
                Step::Leave { panel } => {
                    let node = panels[panel % panels.len()];
                    sortable.pointer_leave(&node);
                }
                Step::Move { y } => {
                    sortable
                        .pointer_move(&mut list, PointerPosition::new(0.0, y))
                        .expect("move");
                }
                Step::Release => {
                    let dispatch = sortable.pointer_up(&mut list).expect("release");
                    if let (SortEffect::Dropped { to, .. }, Some(shadow)) =
                        (dispatch.effect, shadow_before)
                    {
                        prop_assert_eq!(to, shadow);
                    }
                }
                Step::Cancel => {
                    sortable.cancel(&mut list).expect("cancel");
                }
            }

            let shadows = list.select("shadow");
            prop_assert!(shadows.len() <= 1);
            prop_assert_eq!(shadows.len() == 1, sortable.is_dragging());
            prop_assert_eq!(real_panels(&list), expected_panels.clone());

            if let Some(session) = sortable.session() {
                let live = ordinal_position(&list, "panel", session.shadow().node());
                prop_assert_eq!(live, Some(session.shadow().position()));
                prop_assert!(list.has_class(*session.node(), "sorting"));
            } else {
                prop_assert!(sortable.hover().is_none());
                prop_assert!(panels.iter().all(|panel| list.overlay(*panel).is_none()));
            }
        }
    }

    #[test]
    fn settled_drag_is_idempotent(
        heights in prop::collection::vec(10.0f64..80.0, 2..8),
        grab in 0usize..8,
        hover in 0usize..8,
        y in -20.0f64..400.0,
    ) {
        let (mut list, panels, triggers) = column(&heights);
        let config = SortConfig::new("panel", "sorting", "shadow", "handle")
            .expect("valid config");
        let mut sortable = Sortable::new(&list, config).expect("sortable");
        let grab = grab % panels.len();
        let mut hover = hover % panels.len();
        if hover == grab {
            hover = (hover + 1) % panels.len();
        }

        sortable
            .pointer_down(&mut list, &triggers[grab], PointerPosition::new(0.0, 1.0))
            .expect("grab");
        sortable.pointer_enter(&list, &panels[hover]).expect("enter");
        sortable
            .pointer_move(&mut list, PointerPosition::new(0.0, y))
            .expect("settling move");

        let revision = list.revision();
        let writes = list.overlay_writes();
        for _ in 0..4 {
            let dispatch = sortable
                .pointer_move(&mut list, PointerPosition::new(0.0, y))
                .expect("repeat move");
            prop_assert!(!dispatch.shadow_moved());
        }
        prop_assert_eq!(list.revision(), revision);
        prop_assert_eq!(list.overlay_writes(), writes);
    }
}
