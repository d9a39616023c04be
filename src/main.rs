use placement_rating::config::cli::Command;
use placement_rating::config::Config;
use placement_rating::error::Result;
use placement_rating::infrastructure::FileSystemStore;
use placement_rating::services::RatingService;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    let config = Config::new();
    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .init();

    config.ensure_directories()?;

    let store = Arc::new(FileSystemStore::new(
        &config.args.data_dir,
        &config.args.output_dir,
    ));
    let service = RatingService::new(store, config.now);

    let output = match &config.args.command {
        Command::Score { user_id } => serde_json::to_string_pretty(&service.rate_user(user_id)?)?,
        Command::Rank { user_id } => {
            serde_json::to_string_pretty(&service.friends_ranking(user_id)?)?
        }
    };

    println!("{}", output);
    info!("Done");
    Ok(())
}
