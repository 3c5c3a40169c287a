// Load driver for the balanced indexes. For each discipline:
// * Load N random keys.
// * Get every loaded key.
// * Delete half of the loaded keys.
// * Validate and report the depth distribution.
//
// Usage: bst-index [N], N defaults to 100_000.

use std::{env, process, time::Instant};

use log::{error, info};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use bst_index::{AvlTree, Error, RedBlackTree, Strategy, Tree};

const DEFAULT_COUNT: usize = 100_000;

fn main() {
    let level = LevelFilter::Info;
    if let Err(err) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("unable to initialize logger: {}", err);
    }

    let count = match env::args().nth(1).map(|arg| arg.parse::<usize>()) {
        None => DEFAULT_COUNT,
        Some(Ok(count)) => count,
        Some(Err(err)) => {
            error!("invalid count: {}", err);
            process::exit(1);
        }
    };

    let seed: u64 = rand::random();
    info!("seed:{} count:{}", seed, count);

    let res = run(AvlTree::new("load-avl"), count, seed)
        .and_then(|_| run(RedBlackTree::new("load-rb"), count, seed));
    if let Err(err) = res {
        error!("{}", err);
        process::exit(1);
    }
}

fn run<S: Strategy>(mut index: Tree<u64, u64, S>, count: usize, seed: u64) -> Result<(), Error<u64, u64>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let keys: Vec<u64> = (0..count).map(|_| rng.gen()).collect();

    let start = Instant::now();
    let mut loaded = vec![];
    for key in keys.into_iter() {
        match index.create(key, key) {
            Ok(()) => loaded.push(key),
            Err(Error::DuplicateKey(_)) => (),
            Err(err) => return Err(err),
        }
    }
    info!("{}: loaded {} entries in {:?}", S::NAME, index.len(), start.elapsed());

    let start = Instant::now();
    for key in loaded.iter() {
        index.lookup(key)?;
    }
    info!("{}: {} lookups in {:?}", S::NAME, loaded.len(), start.elapsed());

    let start = Instant::now();
    let half = loaded.len() / 2;
    for key in loaded[..half].iter() {
        index.delete(key);
    }
    info!("{}: deleted {} entries in {:?}", S::NAME, half, start.elapsed());

    let stats = index.validate()?;
    info!(
        "{}: entries:{} node_size:{} height:{:?} blacks:{:?}",
        S::NAME,
        stats.entries(),
        stats.node_size(),
        stats.height(),
        stats.blacks()
    );
    if let Some(depths) = stats.depths() {
        depths.pretty_print(&format!("{}: ", S::NAME));
    }
    Ok(())
}
