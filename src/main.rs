use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use homedash_core::error::AppError;
use homedash_core::{clock, Config};
use homedash_todo::{FileStore, TodoStore};
use homedash_weather::locations::LOCATIONS;
use homedash_weather::{day_label, JmaClient, Provenance, WeatherAggregator};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!("{}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    homedash_core::init().map_err(AppError::Other)?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("Homedash started");

    // Todo panel
    let backend =
        FileStore::new(Path::new(&config.todo.storage_dir)).map_err(AppError::service)?;
    let mut todos = TodoStore::open(Box::new(backend));
    if todos.is_empty() {
        todos.seed_samples();
    }

    println!("Homedash — personal dashboard");
    println!("{}", clock::format_clock(Local::now()));

    let stats = todos.detailed_stats();
    println!(
        "\nタスク: 全{}件 / 未完了{}件 / 完了{}件 (達成率 {}%)",
        stats.total, stats.active, stats.completed, stats.completion_rate
    );

    // Weather panel
    let client = JmaClient::with_base_url(&config.weather.base_url).map_err(AppError::service)?;
    let aggregator = Arc::new(WeatherAggregator::new(client));

    let successes = aggregator.refresh_all().await;
    println!(
        "\n天気 ({}/{} 地点が気象庁データ):",
        successes,
        LOCATIONS.len()
    );
    for forecast in aggregator.published() {
        let source = match forecast.source {
            Provenance::Primary => "気象庁",
            Provenance::Fallback => "フォールバック",
        };
        println!("\n{} ({})", forecast.display_name, source);
        for entry in &forecast.forecasts {
            println!(
                "  {} {} {}°/{}° {} 湿度{:.0}% 風{:.1}m/s",
                day_label(entry.day_offset),
                entry.emoji,
                entry.high,
                entry.low,
                entry.description,
                entry.humidity,
                entry.wind_speed
            );
        }
    }

    // Keep refreshing on the configured interval until interrupted
    if config.weather.refresh_minutes > 0 {
        let period = Duration::from_secs(u64::from(config.weather.refresh_minutes) * 60);
        let refresher = aggregator.clone();
        let handle = homedash_core::spawn_repeating(period, move || {
            let aggregator = refresher.clone();
            async move {
                aggregator.refresh_all().await;
            }
        });

        println!(
            "\n{}分ごとに天気を更新します (Ctrl-C で終了)",
            config.weather.refresh_minutes
        );
        tokio::signal::ctrl_c().await?;
        handle.stopped().await;
    }

    tracing::info!("Homedash shutting down");
    Ok(())
}
