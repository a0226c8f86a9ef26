mod config;
mod error;
mod fetch;
mod report;
mod seed;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use job_scraper::adzuna::Client;
use persistence::{files, MongoStore, SkillStore};

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{DEFAULT_RESULTS_PER_PAGE, DEFAULT_SEARCH_TERM};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with the skill vocabulary, replaces the built-in table
    #[clap(long, global = true)]
    vocabulary: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch one page of job postings, extract their skills and persist both
    Fetch {
        #[clap(long, default_value = DEFAULT_SEARCH_TERM)]
        what: String,
        #[clap(long, default_value_t = 1)]
        page: u32,
        #[clap(long, default_value_t = DEFAULT_RESULTS_PER_PAGE)]
        results_per_page: u32,
        /// Record the skill counts of this search in MongoDB
        #[clap(long)]
        store: bool,
    },
    /// Normalize a previously saved raw search response
    Parse {
        raw: PathBuf,
        #[clap(long)]
        out: Option<PathBuf>,
    },
    /// Print the top skills and locations of a processed batch
    Report {
        /// Defaults to the newest processed batch
        #[clap(long)]
        file: Option<PathBuf>,
    },
    /// Upsert every skill of the vocabulary into MongoDB
    Seed {},
}

async fn mongo_store(config: &Config) -> Result<MongoStore> {
    let (url, database) = config.mongodb()?;
    let db = persistence::connect(url, database).await?;
    log::info!("Connected to database");
    Ok(MongoStore::new(db))
}

async fn run(args: Cli, config: Config) -> Result<()> {
    let vocabulary = args.vocabulary.as_deref();
    match args.command {
        Commands::Fetch {
            what,
            page,
            results_per_page,
            store,
        } => {
            let vocabulary = config.vocabulary(vocabulary)?;
            let (app_id, app_key) = config.adzuna_credentials()?;
            let client = Client::new(
                app_id.to_owned(),
                app_key.to_owned(),
                config.adzuna_country.clone(),
            );
            let store = if store {
                Some(mongo_store(&config).await?)
            } else {
                None
            };
            let summary = fetch::fetch(
                &client,
                &config.data_dir,
                &vocabulary,
                &what,
                page,
                results_per_page,
                store.as_ref().map(|s| s as &dyn SkillStore),
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Parse { raw, out } => {
            let vocabulary = config.vocabulary(vocabulary)?;
            let out = out.unwrap_or_else(|| files::processed_path(&config.data_dir));
            let jobs = fetch::parse_raw_file(&raw, &out, &vocabulary)?;
            println!("Parsed {} jobs into {}", jobs.len(), out.display());
        }
        Commands::Report { file } => {
            print!("{}", report::report(&config.data_dir, file)?);
        }
        Commands::Seed {} => {
            let vocabulary = config.vocabulary(vocabulary)?;
            let store = mongo_store(&config).await?;
            let inserted = seed::seed(&store, &vocabulary).await?;
            println!("Seeded {} new skills", inserted);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let args = Cli::parse();
    if let Err(e) = run(args, Config::from_env()).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
