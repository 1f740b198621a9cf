use std::error::Error;
use std::path::Path;
use tracing::info;

use crate::adapters::convert::convert_images;
use crate::adapters::directory::{collection_from_files, deduped_files, scan_image_files};
use crate::adapters::feature_table::FeatureTable;
use crate::config::{AppConfig, Settings};
use crate::core::collection::{dedup_by_stem, SourceFile};
use crate::core::operations::export_split;
use crate::core::split::{
    split_balanced_fixed, split_balanced_greedy, split_ratio as ratio_split, FixedCountConfig,
    RatioConfig, SplitResult,
};

use super::{ConvertArgs, CountArgs, SplitFixedArgs, SplitGreedyArgs, SplitRatioArgs};

pub fn count(args: &CountArgs) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::default();
    let names = scan_image_files(&args.folder, &config)?;

    if args.unique {
        let files = dedup_by_stem(&names, None);
        println!("{} image files, {} unique stems", names.len(), files.len());
    } else {
        println!("{} image files", names.len());
    }
    Ok(())
}

pub fn convert(args: &ConvertArgs) -> Result<(), Box<dyn Error>> {
    let (stats, _outcomes) = convert_images(
        &args.folder,
        &args.from,
        &args.to,
        args.out.as_deref(),
        args.replace,
    )?;
    println!(
        "{} converted, {} failed, {} skipped",
        stats.converted, stats.failed, stats.skipped
    );
    Ok(())
}

pub fn split_ratio(args: &SplitRatioArgs) -> Result<(), Box<dyn Error>> {
    let app_config = AppConfig::default();
    let mut settings = Settings::load();

    let ratio_config = RatioConfig {
        train: args.train.unwrap_or(settings.train_ratio),
        val: args.val.unwrap_or(settings.val_ratio),
        keep_remainder: !args.drop_remainder,
        seed: args.seed,
    };

    let files = deduped_files(&args.folder, &app_config, priority(&args.prefer_ext))?;
    let collection = collection_from_files(&files);
    info!("Splitting {} items from {:?}", collection.len(), args.folder);

    let result = ratio_split(&collection, &ratio_config)?;
    print_split(&result);
    maybe_export(&args.folder, args.out.as_deref(), &result, &files)?;

    settings.last_source_folder = Some(args.folder.clone());
    settings.train_ratio = ratio_config.train;
    settings.val_ratio = ratio_config.val;
    settings.save();

    Ok(())
}

pub fn split_fixed(args: &SplitFixedArgs) -> Result<(), Box<dyn Error>> {
    let app_config = AppConfig::default();
    let mut settings = Settings::load();

    let table = FeatureTable::from_path(&args.features, &args.id_column, &args.weight_column)?;
    let files = deduped_files(&args.folder, &app_config, priority(&args.prefer_ext))?;
    let collection = table.collection_for_files(&files);
    info!(
        "Splitting {} items from {:?} (total weight {:.1})",
        collection.len(),
        args.folder,
        collection.total_weight()
    );

    let fixed_config = FixedCountConfig {
        total_items: args.expect_count.unwrap_or(collection.len()),
        total_weight: args.total_weight.unwrap_or(collection.total_weight()),
        tolerance: args.tolerance.unwrap_or(settings.tolerance),
        seed: args.seed,
        max_attempts: args.max_attempts.unwrap_or(settings.max_attempts),
    };

    let result = split_balanced_fixed(&collection, &fixed_config)?;
    print_split(&result);
    maybe_export(&args.folder, args.out.as_deref(), &result, &files)?;

    settings.last_source_folder = Some(args.folder.clone());
    settings.tolerance = fixed_config.tolerance;
    settings.max_attempts = fixed_config.max_attempts;
    settings.save();

    Ok(())
}

pub fn split_greedy(args: &SplitGreedyArgs) -> Result<(), Box<dyn Error>> {
    let app_config = AppConfig::default();

    let files = deduped_files(&args.folder, &app_config, priority(&args.prefer_ext))?;
    let collection = match &args.features {
        Some(features) => {
            let table = FeatureTable::from_path(features, &args.id_column, &args.weight_column)?;
            table.collection_for_files(&files)
        }
        None => collection_from_files(&files),
    };
    info!("Splitting {} items from {:?}", collection.len(), args.folder);

    let result = split_balanced_greedy(&collection, &args.groups)?;
    print_split(&result);
    maybe_export(&args.folder, args.out.as_deref(), &result, &files)?;

    Ok(())
}

fn priority(prefer_ext: &[String]) -> Option<&[String]> {
    if prefer_ext.is_empty() {
        None
    } else {
        Some(prefer_ext)
    }
}

fn print_split(result: &SplitResult) {
    for group in &result.groups {
        println!(
            "{:>6}: {} items, weight {:.1}",
            group.name,
            group.len(),
            group.weight_sum
        );
    }
}

fn maybe_export(
    folder: &Path,
    out: Option<&Path>,
    result: &SplitResult,
    files: &[SourceFile],
) -> Result<(), Box<dyn Error>> {
    if let Some(dest) = out {
        let report = export_split(folder, dest, result, files)?;
        println!(
            "Copied {} files to {:?} ({} failed)",
            report.copied(),
            dest,
            report.failed()
        );
    }
    Ok(())
}
