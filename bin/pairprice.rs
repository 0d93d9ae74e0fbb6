use anyhow::Context;
use log::{info, warn, LevelFilter};
use serde::Serialize;
use simple_logger::SimpleLogger;

use pairprice::{
    Bundle, Create2PairResolver, FactoryConfig, InMemoryStore, Pair, PriceResolver,
    PricingConfig, Settings, Snapshot, Token,
};

#[derive(Serialize)]
struct Report<'a> {
    bundle: &'a Bundle,
    tokens: Vec<&'a Token>,
    pairs: Vec<&'a Pair>,
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .context("Failed to initialize logger")?;

    // Load configuration
    let settings = Settings::new()
        .context("Failed to load config.yaml. Please ensure it exists and is valid")?;

    let config = PricingConfig::from_settings(&settings.pricing)
        .context("Invalid pricing configuration")?;
    let factory = settings
        .factory
        .as_ref()
        .map(FactoryConfig::from_settings)
        .transpose()
        .context("Invalid factory configuration")?;

    let snapshot_path = std::env::args()
        .nth(1)
        .or_else(|| settings.replay.as_ref().map(|r| r.snapshot_path.clone()))
        .context("No snapshot given. Pass a path or set replay.snapshot_path")?;
    let passes = settings.replay.as_ref().map_or(2, |r| r.passes).max(1);

    let snapshot = Snapshot::from_file(&snapshot_path)?;
    let mut store = InMemoryStore::from_snapshot(&snapshot)?;

    info!(
        "Loaded {} tokens and {} pairs from {}",
        snapshot.tokens.len(),
        snapshot.pairs.len(),
        snapshot_path
    );

    for pass in 1..=passes {
        let synced = replay_syncs(&mut store, &config, factory.as_ref());
        info!(
            "Pass {}/{}: priced {} pairs, numeraire at {} USD",
            pass,
            passes,
            synced,
            store.bundle().numeraire_price_usd
        );
    }

    let mut priced_swaps = 0;
    for swap in &snapshot.swaps {
        let event = swap.to_event()?;
        let (amount0, amount1) = store.swap_amounts(&swap.pair, &event)?;

        let update = match factory.as_ref() {
            Some(factory) => {
                let resolver = Create2PairResolver::new(*factory, &store);
                let prices = PriceResolver::for_cycle(&config, &store, &resolver);
                prices.price_swap(&swap.pair, &amount0, &amount1)
            },
            None => PriceResolver::for_cycle(&config, &store, &store)
                .price_swap(&swap.pair, &amount0, &amount1),
        };

        match update {
            Some(update) => {
                store.apply_swap(&update);
                priced_swaps += 1;
            },
            None => warn!("Skipping swap on unknown pair {}", swap.pair),
        }
    }
    info!("Priced {} of {} swaps", priced_swaps, snapshot.swaps.len());

    let report = Report {
        bundle: store.bundle(),
        tokens: store.tokens().collect(),
        pairs: store.pairs().collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Re-price every pair as if its reserves were just synced, one oracle cycle
/// per pair.
fn replay_syncs(
    store: &mut InMemoryStore,
    config: &PricingConfig,
    factory: Option<&FactoryConfig>,
) -> usize {
    let mut synced = 0;

    for pair_id in store.pair_ids() {
        let update = match factory {
            Some(factory) => {
                let resolver = Create2PairResolver::new(*factory, &*store);
                let prices = PriceResolver::for_cycle(config, &*store, &resolver);
                prices.price_sync(&pair_id)
            },
            None => PriceResolver::for_cycle(config, &*store, &*store).price_sync(&pair_id),
        };

        if let Some(update) = update {
            store.apply_sync(&update);
            synced += 1;
        }
    }

    synced
}
