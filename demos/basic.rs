//! Examples of using the radix tree
use radix_tree::Radix;

fn main() {
    // Create a new tree
    let mut tree = Radix::new();

    // Insert some values
    tree.insert("nl.miek", "apex");
    tree.insert("nl.miek.a", "a");
    tree.insert("nl.miek.c", "c");
    tree.insert("nl.miek.c.a", "c.a");
    tree.insert("nl.miek.d", "d");

    // Exact lookups
    let (node, exact) = tree.find("nl.miek.c");
    assert!(exact);
    assert_eq!(node.unwrap().value(), Some(&"c"));

    // Missing names fall back to the closest stored ancestor
    let (node, exact) = tree.find("nl.miek.b.www");
    assert!(!exact);
    assert_eq!(node.unwrap().key(), b"nl.miek");

    // Walk the whole ring in key order
    println!("Entries in order:");
    for node in &tree {
        println!(
            "  {} -> {}",
            String::from_utf8_lossy(&node.key()),
            node.value().unwrap_or(&"-")
        );
    }

    // Step around from one entry
    let d = tree.find("nl.miek.d").0.unwrap();
    println!(
        "after nl.miek.d comes {}, before it {}",
        String::from_utf8_lossy(&d.next().unwrap().key()),
        String::from_utf8_lossy(&d.prev().unwrap().key())
    );

    // Remove entries
    let removed = tree.remove("nl.miek.c").unwrap();
    println!("removed {:?}", removed.value);
    assert_eq!(tree.len(), 4);
    assert!(tree.find("nl.miek.c.a").1);
}
