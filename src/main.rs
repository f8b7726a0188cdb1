use log::{debug, error};
use recipe_finder::storage::{JsonFileStore, KeyValueStore, MemoryStore, OnboardingTracker};
use recipe_finder::{
    find_recipes, FilterConstraints, FinderConfig, ResultsScreen, TimePreset, TimeRange,
};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage: recipe-finder [--max-time MINUTES] [--preset under15|15-30|30-60|over60] \
[--diet TAG]... [--page N] <ingredient>...";

struct Args {
    ingredients: Vec<String>,
    constraints: FilterConstraints,
    page: usize,
}

fn parse_preset(value: &str) -> Option<TimePreset> {
    match value {
        "under15" => Some(TimePreset::Under15),
        "15-30" => Some(TimePreset::From15To30),
        "30-60" => Some(TimePreset::From30To60),
        "over60" => Some(TimePreset::Over60),
        _ => None,
    }
}

fn parse_args(raw: &[String]) -> Result<Args, String> {
    let mut args = Args {
        ingredients: Vec::new(),
        constraints: FilterConstraints::new(),
        page: 1,
    };

    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--max-time" => {
                let max = value("--max-time")?
                    .parse::<u32>()
                    .map_err(|e| format!("Invalid --max-time: {}", e))?;
                args.constraints.time_range = Some(TimeRange::new(0, max));
            }
            "--preset" => {
                let preset = value("--preset")?;
                let preset =
                    parse_preset(&preset).ok_or_else(|| format!("Unknown preset: {}", preset))?;
                args.constraints.time_range = Some(preset.range());
            }
            "--diet" => {
                args.constraints.insert_tag(&value("--diet")?);
            }
            "--page" => {
                args.page = value("--page")?
                    .parse()
                    .map_err(|e| format!("Invalid --page: {}", e))?;
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => args.ingredients.push(other.to_string()),
        }
    }

    Ok(args)
}

fn celebrate_first_search(config: &FinderConfig) {
    let result = match &config.storage_path {
        Some(path) => JsonFileStore::open(path).and_then(mark_first_search),
        None => mark_first_search(MemoryStore::new()),
    };
    match result {
        Ok(true) => println!("First search done. Happy cooking!\n"),
        Ok(false) => {}
        Err(e) => debug!("Could not record milestone: {}", e),
    }
}

fn mark_first_search<S: KeyValueStore>(
    store: S,
) -> Result<bool, recipe_finder::FinderError> {
    OnboardingTracker::new(store).mark_milestone("first_search")
}

fn render(screen: ResultsScreen) -> ExitCode {
    match screen {
        ResultsScreen::Redirect => {
            eprintln!("{}", USAGE);
            ExitCode::FAILURE
        }
        ResultsScreen::Loading => ExitCode::SUCCESS,
        ResultsScreen::Error { message, can_retry } => {
            eprintln!("Search failed: {}", message);
            if can_retry {
                eprintln!("Run the same command again to retry.");
            }
            ExitCode::FAILURE
        }
        ResultsScreen::Empty { .. } => {
            println!("No recipes match these filters. Try different ingredients.");
            ExitCode::SUCCESS
        }
        ResultsScreen::Page(page) => {
            for recipe in &page.items {
                let matched = recipe
                    .match_percentage
                    .map(|m| format!("{:.0}% match", m))
                    .unwrap_or_default();
                println!(
                    "{:>5}  {} ({} min) {}",
                    recipe.id, recipe.name, recipe.cooking_time_minutes, matched
                );
            }
            println!(
                "\nPage {} of {} ({} recipes)",
                page.page, page.total_pages, page.total_filtered
            );
            ExitCode::SUCCESS
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let config = match FinderConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match find_recipes(&config, &args.ingredients, args.constraints, args.page).await {
        Ok(screen) => {
            if matches!(screen, ResultsScreen::Page(_) | ResultsScreen::Empty { .. }) {
                celebrate_first_search(&config);
            }
            render(screen)
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
