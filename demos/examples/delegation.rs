// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event delegation over a custom tree.
//!
//! The delegator works on any node type: here a hand-written tree with a button nested in a
//! paragraph and an open popover. A button added after the delegator was created is routed like
//! the others.
//!
//! Run:
//! - `cargo run -p littlefoot_demos --example delegation`

use std::collections::HashMap;

use littlefoot_responder::delegate::Delegator;
use littlefoot_responder::types::{Event, Intent, Key, ParentLookup, Role, RoleLookup};

#[derive(Default)]
struct Tree {
    parents: HashMap<&'static str, &'static str>,
    roles: HashMap<&'static str, Role>,
}

impl Tree {
    fn add(&mut self, node: &'static str, parent: &'static str, role: Option<Role>) {
        self.parents.insert(node, parent);
        if let Some(role) = role {
            self.roles.insert(node, role);
        }
    }
}

impl ParentLookup<&'static str> for Tree {
    fn parent_of(&self, node: &&'static str) -> Option<&'static str> {
        self.parents.get(node).copied()
    }
}

impl RoleLookup<&'static str> for Tree {
    fn role_of(&self, node: &&'static str) -> Option<Role> {
        self.roles.get(node).copied()
    }
}

fn main() {
    let mut tree = Tree::default();
    tree.add("p", "body", None);
    tree.add("button-1", "p", Some(Role::Button));
    tree.add("label-1", "button-1", None);
    tree.add("popover-1", "p", Some(Role::Popover));
    tree.add("content-1", "popover-1", None);

    let mut delegator = Delegator::new();
    let mut show = |tree: &Tree, label: &str, event: Event<&'static str>| {
        let intents: Vec<Intent<&'static str>> = delegator.handle(event, tree, tree);
        println!("{label:<24} -> {intents:?}");
    };

    show(&tree, "click label", Event::Click { target: "label-1" });
    show(&tree, "click popover content", Event::Click { target: "content-1" });
    show(&tree, "click paragraph", Event::Click { target: "p" });
    show(
        &tree,
        "enter on button",
        Event::KeyDown {
            key: Key::Enter,
            target: Some("button-1"),
        },
    );
    show(&tree, "scroll content", Event::ContentScroll { target: "content-1" });
    show(&tree, "resize", Event::Resize);

    tree.add("button-2", "p", Some(Role::Button));
    show(&tree, "click late button", Event::Click { target: "button-2" });

    show(
        &tree,
        "hover button",
        Event::PointerMove {
            path: vec!["body", "p", "button-1", "label-1"],
        },
    );
    show(
        &tree,
        "hover popover",
        Event::PointerMove {
            path: vec!["body", "p", "popover-1", "content-1"],
        },
    );
}
