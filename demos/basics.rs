//! Walks through every table operation on a small dataset, printing the
//! table after each mutation.

use chained_hashtable::ChainedHashTable;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    env_logger::init();

    let mut table: ChainedHashTable<i32, String> = ChainedHashTable::new();
    for (k, v) in [(1, "One"), (11, "Eleven"), (2, "Two"), (3, "Three"), (13, "Thirteen")] {
        table.insert(k, v.to_string());
    }
    println!("{table}");
    println!("Collisions: {}", table.count_collisions());

    table.insert_or_assign(2, "NewTwo".to_string());
    table.insert_or_assign(4, "Four".to_string());
    println!("{table}");

    println!("Contains 'Two': {}", table.contains_value(&"Two".to_string()));
    println!("Contains 'Five': {}", table.contains_value(&"Five".to_string()));

    let key = 3;
    match table.search(&key) {
        Some(value) => println!("Value for key {key}: {value}"),
        None => println!("Key not found"),
    }

    println!("Erasing key 3: {}", table.erase(&3));
    println!("Erasing key 5: {}", table.erase(&5));
    println!("Count of key 2: {}", table.count(&2));

    if let Err(e) = table.resize(0) {
        println!("Resize rejected: {e}");
    }
    match table.resize(4) {
        Ok(()) => println!("After resize to 4 buckets:\n{table}"),
        Err(e) => println!("Resize failed: {e}"),
    }

    let random: ChainedHashTable<u32, u32> =
        ChainedHashTable::with_random_values(10, &mut ChaCha8Rng::seed_from_u64(2024));
    println!("Random fill:\n{random}");
}
