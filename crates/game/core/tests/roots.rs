#![cfg(feature = "serde")]

mod common;

use crawl_core::compute_state_root;

use common::{autoplay, catalog, new_run};

#[test]
fn state_roots_match_for_identical_runs() {
    let catalog = catalog();
    let mut first = new_run(42, &catalog);
    let mut second = new_run(42, &catalog);
    autoplay(&mut first, &catalog, 120, |_, _| {});
    autoplay(&mut second, &catalog, 120, |_, _| {});
    assert_eq!(compute_state_root(&first), compute_state_root(&second));

    let other = new_run(43, &catalog);
    assert_ne!(compute_state_root(&first), compute_state_root(&other));
}
