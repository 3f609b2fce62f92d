//! Noyau d’évaluation restreint
//!
//! Organisation interne :
//! - erreur.rs        : catégories d’erreurs (Display = message utilisateur)
//! - valeur.rs        : Entier exact / Reel + opérateurs + affichage
//! - registre.rs      : registre statique des fonctions mathématiques
//! - liste_blanche.rs : sous-ensemble du registre retenu par la config
//! - nettoyage.rs     : zéros de tête + refus des guillemets
//! - jetons.rs        : tokenisation
//! - rpn.rs           : shunting-yard + évaluation sur pile
//! - eval.rs          : pipeline complet

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod liste_blanche;
pub mod nettoyage;
pub mod registre;
pub mod rpn;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{afficher_resultat, eval_expression};
pub use liste_blanche::{FonctionInconnue, ListeBlanche};
