//! Stress tests for the ordered tree.
//!
//! These tests verify:
//! 1. Invariants survive long random insert/remove churn
//! 2. The tree tracks a reference model exactly
//! 3. Determinism is preserved across runs
//! 4. Throughput stays reasonable as the tree grows
//!
//! ## Running Stress Tests
//!
//! ```bash
//! # Run all stress tests (release mode recommended)
//! cargo test --release --test stress_test -- --nocapture
//!
//! # Run specific test
//! cargo test --release --test stress_test stress_random_churn -- --nocapture
//! ```

use std::collections::BTreeSet;
use std::time::Instant;

use ordered_tree::OrderedTree;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Number of operations for the churn test
const CHURN_OPS: usize = 50_000;

/// Run a full invariant audit every this many operations
const AUDIT_INTERVAL: usize = 2_500;

/// Key space for random operations (collisions are intended)
const KEY_SPACE: u64 = 20_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Generate a deterministic key sequence. Same seed = same keys.
fn generate_deterministic_keys(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(0..KEY_SPACE)).collect()
}

/// Run a deterministic churn sequence and return the final rendered tree.
fn run_deterministic_sequence(seed: u64, ops: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut tree = OrderedTree::with_capacity(ops);

    for _ in 0..ops {
        let key = rng.gen_range(0..KEY_SPACE);
        if rng.gen_bool(0.6) {
            tree.insert(key);
        } else {
            tree.remove(&key);
        }
    }

    tree.render()
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Main stress test: random insert/remove churn against a reference model.
///
/// # Verification
/// - Every operation reports the same outcome as a `BTreeSet` model
/// - `len()` tracks the model size exactly
/// - A full invariant audit passes at fixed intervals and at the end
#[test]
fn stress_random_churn() {
    println!("\n=== STRESS TEST: Random Churn ===\n");

    const SEED: u64 = 42;
    println!("Running {} operations (seed={})...", CHURN_OPS, SEED);

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut tree = OrderedTree::with_capacity(CHURN_OPS);
    let mut model: BTreeSet<u64> = BTreeSet::new();

    let mut inserts = 0usize;
    let mut removes = 0usize;

    let start = Instant::now();

    for op in 1..=CHURN_OPS {
        let key = rng.gen_range(0..KEY_SPACE);

        if rng.gen_bool(0.6) {
            let added = tree.insert(key);
            assert_eq!(added, model.insert(key), "insert({key}) outcome diverged");
            inserts += 1;
        } else {
            let removed = tree.remove(&key);
            assert_eq!(removed, model.remove(&key), "remove({key}) outcome diverged");
            removes += 1;
        }

        assert_eq!(tree.len(), model.len(), "len diverged at op {op}");

        if op % AUDIT_INTERVAL == 0 {
            tree.audit().unwrap_or_else(|err| {
                panic!("audit failed at op {op}: {err}");
            });
        }
    }

    let elapsed = start.elapsed();

    tree.audit().expect("final audit");

    // Spot-check membership against the model
    for key in (0..KEY_SPACE).step_by(97) {
        assert_eq!(tree.contains(&key), model.contains(&key));
    }

    println!("\n=== RESULTS ===");
    println!("  Operations:        {:>12}", CHURN_OPS);
    println!("  Inserts:           {:>12}", inserts);
    println!("  Removes:           {:>12}", removes);
    println!("  Final tree size:   {:>12}", tree.len());
    println!("  Elapsed time:      {:>12.2?}", elapsed);

    println!("\n=== STRESS TEST PASSED ===\n");
}

/// Verify determinism: the same operation sequence produces an identical
/// final tree, shape and colors included.
#[test]
fn verify_determinism() {
    println!("\n=== DETERMINISM TEST ===\n");

    const TEST_OPS: usize = 10_000;
    const SEED: u64 = 12345;

    println!("Running sequence with {} operations (seed={})...", TEST_OPS, SEED);

    let render1 = run_deterministic_sequence(SEED, TEST_OPS);
    let render2 = run_deterministic_sequence(SEED, TEST_OPS);

    assert_eq!(render1, render2, "renders must match for determinism");

    // A different seed should land on a different final tree
    let render3 = run_deterministic_sequence(SEED + 1, TEST_OPS);
    assert_ne!(render1, render3, "different seeds should produce different trees");

    println!("  Final tree lines: {}", render1.lines().count());
    println!("\n=== DETERMINISM VERIFIED ===\n");
}

/// Insert n distinct keys, then remove them all in a shuffled order: the
/// tree must drain back to the empty state.
#[test]
fn stress_round_trip_to_empty() {
    println!("\n=== ROUND TRIP TEST ===\n");

    const KEY_COUNT: usize = 5_000;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut tree = OrderedTree::with_capacity(KEY_COUNT);

    // Distinct keys: spread, then shuffled insertion order
    let mut keys: Vec<u64> = (0..KEY_COUNT as u64).map(|i| i * 3 + 1).collect();
    for i in (1..keys.len()).rev() {
        keys.swap(i, rng.gen_range(0..=i));
    }

    for &key in &keys {
        assert!(tree.insert(key), "keys are distinct");
    }
    assert_eq!(tree.len(), KEY_COUNT);
    tree.audit().expect("audit after build");

    // Remove in a different shuffled order
    for i in (1..keys.len()).rev() {
        keys.swap(i, rng.gen_range(0..=i));
    }
    for (removed, &key) in keys.iter().enumerate() {
        assert!(tree.remove(&key), "key {key} should be present");
        if (removed + 1) % 500 == 0 {
            tree.audit().unwrap_or_else(|err| {
                panic!("audit failed after {} removals: {err}", removed + 1);
            });
        }
    }

    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.render(), "");
    tree.audit().expect("empty tree audit");

    println!("  {} keys inserted and drained", KEY_COUNT);
    println!("\n=== ROUND TRIP PASSED ===\n");
}

/// Test varying tree sizes to ensure throughput stays reasonable.
#[test]
fn stress_scaling() {
    println!("\n=== SCALING TEST ===\n");

    let test_sizes = [1_000, 10_000, 50_000];

    println!("{:>12} {:>12} {:>12} {:>12}", "Keys", "Time", "Throughput", "Height");
    println!("{:-<12} {:-<12} {:-<12} {:-<12}", "", "", "", "");

    for &size in &test_sizes {
        let keys = generate_deterministic_keys(size * 2, 42);
        let mut tree = OrderedTree::with_capacity(size * 2);

        let start = Instant::now();
        for &key in &keys {
            tree.insert(key);
        }
        let elapsed = start.elapsed();

        let throughput = keys.len() as f64 / elapsed.as_secs_f64();

        let mut max_depth = 0usize;
        tree.for_each_preorder(|_, _, depth| max_depth = max_depth.max(depth));

        println!("{:>12} {:>12.2?} {:>12.0} {:>12}", tree.len(), elapsed, throughput, max_depth);

        // Height bound: 2*log2(n+1) edges
        let n = tree.len() as f64;
        let bound = (2.0 * (n + 1.0).log2()).floor() as usize;
        assert!(
            max_depth <= bound,
            "height {max_depth} exceeds red-black bound {bound} for {} keys",
            tree.len()
        );

        tree.audit().expect("audit after bulk insert");
    }

    println!("\n=== SCALING TEST COMPLETE ===\n");
}

/// Handles resolved before unrelated mutations still read the same key.
#[test]
fn stress_handle_stability_across_unrelated_ops() {
    println!("\n=== HANDLE STABILITY TEST ===\n");

    let mut tree = OrderedTree::with_capacity(2_000);
    for key in (0..1_000u64).map(|i| i * 2) {
        tree.insert(key);
    }

    let marked: Vec<_> = [100u64, 500, 900]
        .iter()
        .map(|key| (*key, tree.search(key).expect("key present")))
        .collect();

    // Insert fresh odd keys well away from the marked slots
    for key in 1_000..1_500u64 {
        tree.insert(key * 2 + 1);
    }
    for key in (0..100u64).map(|i| i * 2 + 1200) {
        tree.remove(&key);
    }
    tree.audit().expect("audit after churn");

    for (key, handle) in marked {
        let view = tree.node(handle).expect("marked node survives");
        assert_eq!(*view.key, key);
    }

    println!("=== HANDLE STABILITY PASSED ===\n");
}
