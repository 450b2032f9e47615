use log::{info, LevelFilter};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::time;

use rbtree::{Natural, Order, RbTree};

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "dels", default_value = "0")]
    dels: usize,

    #[structopt(long = "gets", default_value = "0")]
    gets: usize,

    #[structopt(long = "validate")]
    validate: bool,

    #[structopt(long = "verbose")]
    verbose: bool,
}

fn main() {
    let opts = Opt::from_args();

    let level = if opts.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).ok();

    let seed = opts.seed.unwrap_or_else(random);
    info!("seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: RbTree<u64> = RbTree::new(Natural);

    // initial load
    let start = time::Instant::now();
    let mut n_dups = 0;
    for _i in 0..opts.loads {
        if !index.insert(rng.gen()).unwrap() {
            n_dups += 1
        }
    }
    info!(
        "loaded {} items ({} dups) in {:?}",
        opts.loads,
        n_dups,
        start.elapsed()
    );

    do_incremental(&mut rng, &opts, &mut index);

    let start = time::Instant::now();
    let n = index.traverse(Order::InOrder).count();
    info!("iter for iterating {}, took {:?}", n, start.elapsed());

    if opts.validate {
        let start = time::Instant::now();
        index.validate().unwrap();
        info!("validated {} items, took {:?}", index.len(), start.elapsed());
    }
}

fn do_incremental(rng: &mut SmallRng, opts: &Opt, index: &mut RbTree<u64>) {
    let start = time::Instant::now();
    let total = opts.dels + opts.gets;
    let mut n = total;
    while n > 0 {
        let op = rng.gen::<usize>() % total;
        // pick a stored value half the time, so that ops do hit.
        let key = match rng.gen::<bool>() {
            true => index.random(rng).copied().unwrap_or_else(|| rng.gen()),
            false => rng.gen(),
        };
        if op < opts.dels {
            index.delete(&key).unwrap();
        } else {
            index.get(&key).unwrap();
        }
        n -= 1;
    }
    info!(
        "incremental for operations {}, took {:?}",
        total,
        start.elapsed()
    );
}
