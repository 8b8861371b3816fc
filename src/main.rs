use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use social_network::{Network, NetworkConfig};

/// Follow edges for the demo network
const DEMO_FOLLOWS: [(&str, &str); 9] = [
    ("Alice", "Bob"),
    ("Alice", "Carol"),
    ("Bob", "Carol"),
    ("Bob", "Alice"),
    ("Carol", "Dave"),
    ("Dave", "Carol"),
    ("Dave", "Bob"),
    ("Erin", "Carol"),
    ("Erin", "Bob"),
];

struct Args {
    config_path: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config_path: None,
        json: false,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config_path = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }

    Ok(args)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => NetworkConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => NetworkConfig::default(),
    };

    let network = build_demo_network(config)?;

    if args.json {
        println!("{}", network.to_json()?);
        return Ok(());
    }

    println!("{}", network);
    println!();

    for user in network.users() {
        let friends = network.friends_of(user.name());
        println!(
            "{:<6} followers={} recommend={} friends=[{}]",
            user.name(),
            network.follower_count(user.name()),
            network.recommend_who_to_follow(user.name()),
            friends.join(", ")
        );
    }

    println!();
    println!("Most popular: {}", network.most_popular_or_sentinel());

    Ok(())
}

fn build_demo_network(config: NetworkConfig) -> Result<Network> {
    let mut network = Network::with_config(config)?;

    for name in ["Alice", "Bob", "Carol", "Dave", "Erin"] {
        if !network.add_user(name) {
            info!(user = name, "skipped demo user");
        }
    }
    for (follower, followee) in DEMO_FOLLOWS {
        if !network.add_followee(follower, followee) {
            info!(follower, followee, "skipped demo follow");
        }
    }

    info!(users = network.user_count(), "demo network ready");
    Ok(network)
}
