// src/main.rs
//
// Calculatrice console : point d’entrée
// -------------------------------------
// But:
// - CLI (clap)                : [CONFIG] + --verbose
// - Journal (env_logger)      : stderr, "warn" par défaut, RUST_LOG respecté
// - Config + liste blanche    : erreur => diagnostic + code 1
// - Boucle                    : stdin/stdout, code 0 à la sortie

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

mod app;
mod noyau;

use app::Session;

/// Calculatrice interactive : arithmétique + fonctions mathématiques autorisées par la config.
#[derive(Parser, Debug)]
#[command(name = "calculatrice_console", version, about)]
struct Args {
    /// Fichier de configuration JSON
    #[arg(default_value = app::CHEMIN_DEFAUT)]
    config: PathBuf,

    /// Journal détaillé (jetons, RPN) sur stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_journal(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_journal(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    // Erreurs de config : fatales, diagnostic exact, pas de reprise.
    let config = match app::charger(&args.config) {
        Ok(c) => c,
        Err(e) => return Ok(echec_config(e)),
    };
    let liste = match app::construire_liste(&config, &args.config) {
        Ok(l) => l,
        Err(e) => return Ok(echec_config(e)),
    };
    if liste.is_empty() {
        log::info!("aucune fonction autorisée : arithmétique seule");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let fin = Session::new(&config, &liste)
        .executer(stdin.lock(), &mut stdout)
        .context("console I/O failed")?;

    log::debug!("session terminée: {fin:?}");
    Ok(ExitCode::SUCCESS)
}

fn echec_config(e: app::ErreurConfig) -> ExitCode {
    log::debug!("{e:?}");
    eprintln!("{e}");
    ExitCode::from(1)
}
