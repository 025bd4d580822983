//! Replays a scripted drag against an in-memory column and prints the order
//! after each step.
//!
//! Run with `RUST_LOG=sortpanel_core=trace` to see the machine's own logs.

use sortpanel_core::{
    NodeId, PanelHost, PanelList, PointerPosition, Size, SortHooks, SortOptions, Sortable,
};
use tracing_subscriber::EnvFilter;

const OPTIONS: &str = r#"
[panel]
class = "card"
class_sorting = "card--sorting"
class_shadow = "card--shadow"

[drag]
class = "card__grip"
"#;

fn describe(list: &PanelList, names: &[(NodeId, &str)]) -> String {
    list.select("card")
        .iter()
        .map(|node| {
            names
                .iter()
                .find(|(id, _)| id == node)
                .map_or("[shadow]", |(_, name)| *name)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut list = PanelList::with_origin(16.0, 8.0);
    let mut names = Vec::new();
    let mut grips = Vec::new();
    for (name, height) in [("inbox", 40.0), ("today", 64.0), ("later", 40.0), ("done", 52.0)] {
        let card = list.push("article", &["card"], Size::new(280.0, height));
        grips.push(list.push_child(card, "span", &["card__grip"]));
        names.push((card, name));
    }

    let options = SortOptions::from_toml_str(OPTIONS)?;
    let hooks = SortHooks::new()
        .on_sort_start(|| tracing::info!("sort start"))
        .on_sort_change(|| tracing::info!("sort change"))
        .on_sort_end(|| tracing::info!("sort end"));
    let mut sortable = Sortable::from_options(&list, options)?.with_hooks(hooks);

    println!("before: {}", describe(&list, &names));

    // Grab "inbox" by its grip and sweep the pointer down the column,
    // delivering enter/leave the way a browser would from hit testing.
    sortable.pointer_down(&mut list, &grips[0], PointerPosition::new(20.0, 30.0))?;
    let mut hovered: Option<NodeId> = None;
    for y in (30..=190).step_by(8) {
        let y = f64::from(y);
        let under = list.node_at(y).filter(|node| names.iter().any(|(id, _)| id == node));
        if under != hovered {
            if let Some(previous) = hovered {
                sortable.pointer_leave(&previous);
            }
            if let Some(next) = under {
                sortable.pointer_enter(&list, &next)?;
            }
            hovered = under;
        }
        let dispatch = sortable.pointer_move(&mut list, PointerPosition::new(20.0, y))?;
        if dispatch.shadow_moved() {
            println!("  y={y:>5}: {}", describe(&list, &names));
        }
    }
    sortable.pointer_up(&mut list)?;

    println!("after:  {}", describe(&list, &names));
    Ok(())
}
