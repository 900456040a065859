use market_dashboard_sdk::format::{
    format_large_number, format_percentage, format_price, format_supply,
};
use market_dashboard_sdk::{FetchKind, MarketStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Requires COINGECKO_API_KEY in the environment or a .env file
    let store = MarketStore::global().await?;
    println!("Market overview (source: {})", store.source_name());
    println!("-------------------------------------------");

    if let Err(e) = store.refresh_dashboard().await {
        eprintln!("Warning: dashboard refresh incomplete: {}", e);
    }
    for kind in [FetchKind::Markets, FetchKind::Trending, FetchKind::Global] {
        if let Some(error) = store.request_state(kind).last_error {
            eprintln!("   {}: {}", kind, error);
        }
    }

    if let Some(global) = store.global_stats().await {
        let data = &global.data;
        println!(
            "Total market cap: ${}",
            format_large_number(data.total_market_cap_in("usd").unwrap_or_default())
        );
        println!(
            "24h volume:       ${}",
            format_large_number(data.total_volume_in("usd").unwrap_or_default())
        );
        println!(
            "BTC dominance:    {}",
            format_percentage(data.dominance("btc")).value
        );
        println!();
    }

    println!("{:<4} {:<20} {:>16} {:>10} {:>12}", "#", "NAME", "PRICE", "24h", "MCAP");
    for coin in store.displayed().await {
        println!(
            "{:<4} {:<20} {:>16} {:>10} {:>12}",
            coin.market_cap_rank.map(|r| r.to_string()).unwrap_or_default(),
            coin.name,
            format_price(coin.current_price),
            format_percentage(coin.price_change_percentage_24h).value,
            format_large_number(coin.market_cap.unwrap_or_default()),
        );
    }
    println!();

    if let Some(trending) = store.trending().await {
        println!("Trending:");
        for entry in trending.coins {
            println!("   {} ({})", entry.item.name, entry.item.symbol);
        }
        println!();
    }

    if store.fetch_coin("bitcoin").await.is_ok() {
        if let Some(detail) = store.coin_detail().await {
            let supply = detail
                .market_data
                .as_ref()
                .and_then(|md| md.circulating_supply);
            println!(
                "{}: {} circulating, homepage {}",
                detail.name,
                format_supply(supply),
                detail.homepage().unwrap_or("n/a")
            );
        }
    }

    let metrics = store.fetch_metrics(FetchKind::Markets).await;
    println!(
        "Markets fetch: p50={:.0}ms, success_rate={:.1}%",
        metrics.latency_p50_ms,
        metrics.success_rate * 100.0
    );

    let health = store.health_check().await;
    println!("Health: {:?} ({})", health.status, health.message.unwrap_or_default());

    Ok(())
}
