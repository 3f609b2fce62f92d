// src/app.rs
//
// Calculatrice console : module App (racine)
// ------------------------------------------
// Rôle:
// - Déclarer les sous-modules (config.rs + boucle.rs)
// - Ré-exporter ce dont main.rs a besoin
//
// Important:
// - Aucune évaluation ici : tout passe par crate::noyau.

pub mod boucle;
pub mod config;

pub use boucle::Session;
pub use config::{charger, construire_liste, ErreurConfig, CHEMIN_DEFAUT};
