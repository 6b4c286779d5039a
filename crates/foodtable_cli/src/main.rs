//! CLI entry point.
//!
//! # Responsibility
//! - Own the process lifecycle: config, logging, and the one table instance.
//! - Print a browse view and a sample search for quick local checks.
//!
//! Usage: `foodtable [config.json]`

use foodtable_core::{
    core_version, init_logging, AppConfig, FoodData, FoodPage, FoodService, InMemoryRecordStore,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("foodtable: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>) -> Result<(), String> {
    let config = match config_path {
        Some(path) => AppConfig::load(&path).map_err(|err| err.to_string())?,
        None => AppConfig::default(),
    };

    if let Some(dir) = config.log_dir.as_deref() {
        let level = config.effective_log_level().map_err(|err| err.to_string())?;
        init_logging(level, dir)?;
    }

    let store = InMemoryRecordStore::with_seed(config.seed.iter().cloned());
    let service = FoodService::new(store, config.page_length);
    info!(
        "event=cli_start module=cli status=ok rows={} page_length={}",
        service.size(),
        service.page_length()
    );

    println!("foodtable_core version={}", core_version());
    println!("rows={}", service.size());
    print_page("browse", &service.browse(0));
    if let Some(first) = config.seed.first() {
        print_page(&format!("search `{}`", first.name), &service.search(&first.name, 0));
    }
    Ok(())
}

fn print_page(title: &str, page: &FoodPage) {
    println!(
        "-- {title} (view {}/{})",
        page.view_index + 1,
        page.view_count
    );
    for record in &page.items {
        let FoodData {
            name,
            kcal,
            protein,
            carbs,
            fat,
        } = &record.payload;
        println!(
            "{:>4}  {:<32} kcal={kcal} protein={protein} carbs={carbs} fat={fat}",
            record.id(),
            name
        );
    }
}
