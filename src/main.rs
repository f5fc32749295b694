//! crispin's main application entry point.
//! Handles command-line argument parsing and dispatches to the generate,
//! get and menu commands. Every error ends up in `default_error_handler`.

use std::path::{Path, PathBuf};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crispin::{
    assembler::{assemble, AssembleOptions},
    cli::{Args, Command},
    config::get_config,
    constants::TEMPLATES_DIR,
    cookbook::Cookbook,
    document::load_document,
    error::{Error, Result},
    kickstart::{generate_empty_answers, generate_kickstart},
    logger::init_logger,
    recipe::Recipe,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Parses command line arguments, printing help when required ones are missing.
fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                let _ = Args::command().print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

/// Prints the error and exits with status code 1.
fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}

/// Templates of a cookbook live next to its `recipes` directory.
fn default_template_dir(recipe: &Path) -> PathBuf {
    recipe
        .parent()
        .and_then(Path::parent)
        .map(|cookbook| cookbook.join(TEMPLATES_DIR))
        .unwrap_or_else(|| PathBuf::from(TEMPLATES_DIR))
}

fn write_file<P: AsRef<Path>>(content: &str, output_dir: P, file_name: &str) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir).map_err(|e| Error::from_io(e, output_dir))?;
    let dest_path = output_dir.join(file_name);
    std::fs::write(&dest_path, content).map_err(|e| Error::from_io(e, &dest_path))?;
    Ok(std::fs::canonicalize(&dest_path).unwrap_or(dest_path))
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Generate {
            recipe,
            name,
            generate_answers,
            answers,
            output_dir,
            template_dir,
            ks_logging,
        } => {
            let template_dir = match template_dir {
                Some(dir) => {
                    log::info!("Not using a cookbook layout, templates come from '{}'.", dir.display());
                    dir
                }
                None => default_template_dir(&recipe),
            };
            let options = AssembleOptions { logging: ks_logging };
            let template = assemble(&Recipe::load(&recipe)?, &template_dir, options)?;

            if generate_answers {
                let blank = generate_empty_answers(&template)?;
                let content = serde_json::to_string_pretty(&blank)
                    .map_err(|e| Error::IoError(e.into()))?;
                let path = write_file(&content, &output_dir, &format!("{name}.json"))?;
                println!("Wrote answers for recipe {} to {}.", recipe.display(), path.display());
            } else if let Some(answers) = answers {
                let answers: serde_json::Value = load_document(&answers)?;
                let kickstart = generate_kickstart(&MiniJinjaRenderer::new(), &template, &answers)?;
                let path = write_file(&kickstart, &output_dir, &format!("{name}.ks"))?;
                println!("Wrote the kickstart for recipe {} to {}.", recipe.display(), path.display());
            }
        }
        Command::Get { name, cookbook } => {
            let config = get_config(&cookbook)?;
            let kickstart = Cookbook::new(&cookbook, config).get_kickstart(&name)?;
            print!("{kickstart}");
        }
        Command::Menu { hostname, port, cookbook } => {
            let mut config = get_config(&cookbook)?;
            if let Some(hostname) = hostname {
                config.server.hostname = hostname;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let menu = Cookbook::new(&cookbook, config).boot_menu();
            print!("{}", menu.render());
        }
    }
    Ok(())
}
