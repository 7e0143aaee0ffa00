//! Ordered Tree - Binary Entry Point
//!
//! Small demonstration driver: builds a tree, dumps its shape, and walks
//! through the search/remove surface a rendering front end would use.

use ordered_tree::OrderedTree;

fn main() {
    println!("===========================================");
    println!("  Ordered Tree - red-black key index");
    println!("===========================================");
    println!();

    let mut tree = OrderedTree::with_capacity(100);

    let keys = [41u64, 23, 8, 95, 61, 14, 77, 30, 52, 3];
    println!("Inserting {} keys: {:?}", keys.len(), keys);
    for key in keys {
        tree.insert(key);
    }
    println!();

    println!("Pre-order dump (key, color; two spaces per level):");
    print!("{}", tree.render());
    println!("-----------");
    println!();

    println!("Stored keys: {}", tree.len());

    let probe = 61u64;
    match tree.search(&probe) {
        Some(handle) => {
            let view = tree.node(handle).expect("fresh handle resolves");
            println!("search({probe}): found, color {}", view.color);
        }
        None => println!("search({probe}): not found"),
    }

    let absent = 99u64;
    println!("contains({absent}): {}", tree.contains(&absent));
    println!();

    println!("Removing 23 and 41...");
    tree.remove(&23);
    tree.remove(&41);
    println!("Stored keys: {}", tree.len());
    println!();

    print!("{}", tree.render());
    println!("-----------");
    println!();

    match tree.audit() {
        Ok(()) => println!("Invariant audit: OK"),
        Err(err) => println!("Invariant audit: FAILED ({err})"),
    }
}
