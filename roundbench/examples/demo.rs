//! RoundBench demo
//!
//! Compares a few ways of summing and searching the same data.
//!
//! ```text
//! cargo run --example demo -p roundbench
//! cargo run --example demo -p roundbench -- --trials 500 --repeat 10 sum
//! cargo run --example demo -p roundbench -- list
//! ```

use std::collections::{BTreeSet, HashSet};

fn main() -> anyhow::Result<()> {
    let data: Vec<u64> = (0..10_000).map(|i| (i * 7_919) % 10_007).collect();
    let sorted: Vec<u64> = {
        let mut v = data.clone();
        v.sort_unstable();
        v
    };
    let hashed: HashSet<u64> = data.iter().copied().collect();
    let ordered: BTreeSet<u64> = data.iter().copied().collect();
    let (data, sorted, hashed, ordered) = (&data, &sorted, &hashed, &ordered);

    roundbench::run(move |runner| {
        runner.add_block("sum_iter", move |_| data.iter().sum::<u64>());
        runner.add_block("sum_fold", move |_| data.iter().fold(0u64, |acc, x| acc + x));
        runner.add_block("sum_loop", move |_| {
            let mut total = 0u64;
            for x in data {
                total += x;
            }
            total
        });

        // The call index varies the probe so results are not hoisted
        runner.add_block("find_linear", move |i| data.iter().position(|&x| x == i % 10_007));
        runner.add_block("find_binary", move |i| sorted.binary_search(&(i % 10_007)).is_ok());
        runner.add_block("find_hash", move |i| hashed.contains(&(i % 10_007)));
        runner.add_block("find_btree", move |i| ordered.contains(&(i % 10_007)));

        runner.add_fallible_block("parse_checked", move |i| i.to_string().parse::<u32>());
    })
}
