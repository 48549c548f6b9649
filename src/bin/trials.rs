//! Randomised trial driver: repeatedly builds trees from random values,
//! printing every intermediate shape and asserting the search-order invariant
//! at the end of each trial.
//!
//! ```text
//! trials [trials] [nodes-per-trial] [range]
//! ```
//!
//! With one argument only nodes-per-trial is overridden; with two, trials and
//! nodes-per-trial; with three, all of them. Values are drawn uniformly from
//! `[-range/2, range - range/2]`. The PRNG seed is printed so a failing run
//! can be reproduced.

use std::env;
use std::process::ExitCode;

use avlset::{AvlSet, TraversalOrder};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

fn rand_in_range(rng: &mut Pcg32, range: i32) -> i32 {
    rng.random_range(0..=range) - range / 2
}

fn pretty_print(set: &AvlSet) {
    for (label, order) in [
        ("inorder", TraversalOrder::In),
        ("postorder", TraversalOrder::Post),
        ("preorder", TraversalOrder::Pre),
    ] {
        println!("{label}:");
        set.traverse(order, |node, depth| {
            println!("{}{}", "*".repeat(depth), node.value());
        });
        println!();
    }

    if let Some(root) = set.root() {
        println!("balance factor: {}\n", root.balance_factor());
    }
}

/// Apply the positional argument cascade: nodes-per-trial alone, then
/// trials + nodes-per-trial, then all three.
fn parse_args(args: &[String]) -> Option<(u32, u32, i32)> {
    let mut trials = 10;
    let mut nodes_per_trial = 32;
    let mut range = 100;

    match args {
        [] => {}
        [n] => nodes_per_trial = n.parse().ok()?,
        [t, n] => {
            trials = t.parse().ok()?;
            nodes_per_trial = n.parse().ok()?;
        }
        [t, n, r] => {
            trials = t.parse().ok()?;
            nodes_per_trial = n.parse().ok()?;
            range = r.parse().ok()?;
        }
        _ => return None,
    }

    Some((trials, nodes_per_trial, range))
}

fn main() -> ExitCode {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let (trials, nodes_per_trial, range) = match parse_args(&args) {
        Some(v) => v,
        None => {
            eprintln!("usage: trials [trials] [nodes-per-trial] [range]");
            return ExitCode::from(2);
        }
    };

    // A fresh seed per run, printed so failures can be replayed.
    let seed: u64 = rand::rng().random();
    println!("seed: {seed}");
    let mut rng = Pcg32::seed_from_u64(seed);

    for _ in 0..trials {
        let mut set = AvlSet::default();
        set.insert(rand_in_range(&mut rng, range))
            .expect("allocation failed");

        for _ in 1..nodes_per_trial {
            pretty_print(&set);
            set.insert(rand_in_range(&mut rng, range))
                .expect("allocation failed");
        }

        pretty_print(&set);
        assert!(set.is_bst());

        let _ = set.contains(rand_in_range(&mut rng, range));
        drop(set);
    }

    ExitCode::SUCCESS
}
