//! src/app/config.rs
//!
//! Configuration (JSON), chargée une fois au démarrage, immuable ensuite.
//!
//! Contrats :
//! - Tous les champs sont optionnels (valeurs par défaut ci-dessous).
//! - Fichier absent / JSON invalide / nom de fonction inconnu : erreur fatale,
//!   le diagnostic est le Display de `ErreurConfig`.
//! - `parse_config_json` ne fait aucune E/S (testable sans fichier).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::noyau::{FonctionInconnue, ListeBlanche};

/// Chemin par défaut (répertoire courant).
pub const CHEMIN_DEFAUT: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub welcome_message: String,
    pub instructions: Vec<String>,
    /// Comparé sans tenir compte de la casse.
    pub exit_command: String,
    pub allowed_functions: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            welcome_message: "Welcome!".to_string(),
            instructions: Vec::new(),
            exit_command: "exit".to_string(),
            allowed_functions: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ErreurConfig {
    #[error("Config file {} not found. Exiting.", .chemin.display())]
    Introuvable { chemin: PathBuf },

    #[error("Config file {} is not valid JSON. Exiting.", .chemin.display())]
    Malformee {
        chemin: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file {} could not be read: {source}. Exiting.", .chemin.display())]
    Illisible {
        chemin: PathBuf,
        #[source]
        source: io::Error,
    },

    /// La liste des noms connus reste dans `source` (journal debug).
    #[error(
        "Unknown function '{}' in allowed_functions of {}. Exiting.",
        .source.nom,
        .chemin.display()
    )]
    FonctionInconnue {
        chemin: PathBuf,
        #[source]
        source: FonctionInconnue,
    },
}

/// Parse le contenu JSON (sans E/S).
pub fn parse_config_json(input: &str) -> Result<Configuration, serde_json::Error> {
    serde_json::from_str(input)
}

/// Lit et parse le fichier de configuration.
pub fn charger(chemin: &Path) -> Result<Configuration, ErreurConfig> {
    let texte = fs::read_to_string(chemin).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ErreurConfig::Introuvable {
            chemin: chemin.to_path_buf(),
        },
        _ => ErreurConfig::Illisible {
            chemin: chemin.to_path_buf(),
            source,
        },
    })?;

    let config = parse_config_json(&texte).map_err(|source| {
        log::debug!("json: {source}");
        ErreurConfig::Malformee {
            chemin: chemin.to_path_buf(),
            source,
        }
    })?;

    log::info!(
        "configuration chargée depuis {} ({} fonction(s) autorisée(s))",
        chemin.display(),
        config.allowed_functions.len()
    );
    Ok(config)
}

/// Construit la liste blanche ; un nom inconnu est fatal (diagnostic clair).
pub fn construire_liste(
    config: &Configuration,
    chemin: &Path,
) -> Result<ListeBlanche, ErreurConfig> {
    ListeBlanche::depuis_noms(&config.allowed_functions).map_err(|source| {
        ErreurConfig::FonctionInconnue {
            chemin: chemin.to_path_buf(),
            source,
        }
    })
}
