use proxyscrape::cli::{Cli, Command};
use proxyscrape::config::ClientConfig;
use proxyscrape::core::ProxyScrapeClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => ClientConfig::default_path()?,
    };

    if cli.init_config {
        if ClientConfig::init(&config_path)? {
            println!("✓ Wrote default config to {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }
        return Ok(());
    }

    let config = ClientConfig::load_or_default(&config_path)?.apply_env_overrides()?;
    let client = ProxyScrapeClient::from_config(&config)?;

    let Some(command) = cli.command else {
        eprintln!("No command given, see --help");
        std::process::exit(2);
    };

    match command {
        Command::List { filters, json } => {
            let list = client.get_proxy_list(filters.to_query()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for proxy in &list.proxies {
                    println!("{}", proxy.proxy);
                }
                eprintln!("{} of {} proxies", list.shown_records, list.total_records);
            }
        }
        Command::Best { filters, count, check } => {
            let best = client.get_best_proxies(filters.to_query(), Some(count)).await?;
            if best.is_empty() {
                eprintln!("No live proxies returned");
            }
            for proxy in &best {
                let line = format!(
                    "{}\tuptime={:.1}%\tavg={:.0}ms\t{}",
                    proxy.proxy, proxy.uptime, proxy.average_timeout, proxy.ip_data.country_code
                );
                if check {
                    let live = client.check_proxy(proxy).await;
                    println!("{}\t{}", line, if live { "live" } else { "dead" });
                } else {
                    println!("{}", line);
                }
            }
        }
        Command::Check { proxy } => {
            let live = client.check_proxy(proxy.as_str()).await;
            println!("{}: {}", proxy, if live { "live" } else { "dead" });
            if !live {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
