//! Noyau : évaluation (pipeline réel)
//!
//! trim -> zéros de tête -> guillemets -> jetons -> RPN (liste blanche) -> pile -> Valeur
//!
//! Aucune erreur ne sort autrement que par `ErreurEval` : la boucle affiche
//! le message de catégorie et continue.

use super::erreur::ErreurEval;
use super::jetons::{format_tokens, tokenize};
use super::liste_blanche::ListeBlanche;
use super::nettoyage::{normaliser_zeros, rejeter_guillemets};
use super::rpn::{eval_rpn, format_rpn, to_rpn};
use super::valeur::Valeur;

/// API publique : évalue une expression contre la liste blanche.
pub fn eval_expression(expr_str: &str, liste: &ListeBlanche) -> Result<Valeur, ErreurEval> {
    // 1) Assainissement
    let s = normaliser_zeros(expr_str.trim());
    rejeter_guillemets(&s)?;
    log::debug!("expression normalisée: {s}");

    // 2) Jetons
    let jetons = tokenize(&s)?;
    log::debug!("jetons: {}", format_tokens(&jetons));

    // 3) RPN (résolution des noms ici)
    let rpn = to_rpn(&jetons, liste)?;
    log::debug!("rpn: {}", format_rpn(&rpn));

    // 4) Pile
    eval_rpn(rpn)
}

/// Texte affiché après "Result: " : la valeur, ou le message de catégorie.
pub fn afficher_resultat(r: &Result<Valeur, ErreurEval>) -> String {
    match r {
        Ok(v) => v.to_string(),
        Err(e) => {
            if let ErreurEval::Syntaxe(detail) = e {
                log::debug!("syntaxe: {detail}");
            }
            e.to_string()
        }
    }
}
