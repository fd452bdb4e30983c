use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use nc_scene::cli::Cli;
use nc_scene::{DeferredDispatcher, FileDispatcher, Loader, LoadDispatcher, NcContext, PathMap, ViewerConfig};

fn open_deltas(cli: &Cli) -> Result<Box<dyn BufRead>> {
    match &cli.deltas {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open deltas: {:?}", path))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = ViewerConfig::from_cli(&cli)?;
    let pathmap = PathMap::load(&config.pathmap)?;
    let project_path = pathmap.get_path(&cli.project)?;
    log::info!("project {} -> {}", cli.project, project_path);

    let dispatcher: Box<dyn LoadDispatcher> = match &config.geometry_dir {
        Some(dir) => Box::new(FileDispatcher::new(dir)),
        None => Box::new(DeferredDispatcher),
    };
    let mut nc = NcContext::with_config(cli.project.clone(), None, Loader::new(dispatcher), &config);

    let mut applied = 0usize;
    let mut changed = 0usize;
    for (number, line) in open_deltas(&cli)?.lines().enumerate() {
        let line = line.context("Failed to read delta stream")?;
        if line.trim().is_empty() {
            continue;
        }
        match nc.apply_delta_json(&line) {
            Ok(did_change) => {
                applied += 1;
                if did_change {
                    changed += 1;
                }
            }
            Err(err) => log::warn!("line {}: {err}", number + 1),
        }
    }
    for event in nc.drain_events() {
        log::debug!("{event}");
    }

    let bounds = nc.calc_bounding_box();
    println!("project:     {}", nc.project());
    println!("workingstep: {:?}", nc.workingstep());
    println!("deltas:      {applied} applied, {changed} changed the scene");
    println!("nodes:       {}", nc.registry().len());
    println!("trace:       {} points", nc.trace().len());
    if bounds.is_empty() {
        println!("bounds:      empty");
    } else {
        println!("bounds:      {:?} .. {:?}", bounds.min, bounds.max);
    }

    if cli.tree {
        let tree = nc.get_tree(cli.project.to_lowercase());
        println!("{}", serde_json::to_string_pretty(&tree)?);
    }

    Ok(())
}
