// src/noyau/erreur.rs
//
// Catégories d’erreurs du noyau.
// Le Display de chaque variante EST le message montré à l’utilisateur :
// un message stable par catégorie, jamais de panique, jamais de propagation
// au-delà de eval_expression().

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("❌ Error: division by zero is not allowed.")]
    DivisionParZero,

    /// Domaine numérique invalide (ex: sqrt(-1)) ; le détail est affiché.
    #[error("❌ Value error: {0}")]
    Domaine(String),

    /// Le détail sert au journal (debug), pas à l’utilisateur.
    #[error("❌ Syntax error: please enter a valid mathematical expression.")]
    Syntaxe(String),

    #[error(
        "❌ Name error: '{0}' is not defined. Use only allowed functions (like sqrt(9) or math.sqrt(9))."
    )]
    NomInconnu(String),

    #[error("❌ Error: quotes are not allowed in expressions.")]
    Guillemets,

    #[error(
        "❌ Unexpected error: {0}. Use only numbers, operators and allowed functions; bare letters or identifiers are not accepted."
    )]
    Autre(String),
}

impl ErreurEval {
    pub fn syntaxe(detail: impl Into<String>) -> Self {
        Self::Syntaxe(detail.into())
    }

    pub fn domaine(detail: impl Into<String>) -> Self {
        Self::Domaine(detail.into())
    }

    pub fn autre(detail: impl Into<String>) -> Self {
        Self::Autre(detail.into())
    }

    /// "math domain error" : le message standard des fonctions mathématiques.
    pub fn domaine_math() -> Self {
        Self::domaine("math domain error")
    }

    /// "math range error" : dépassement sur entrée finie.
    pub fn hors_plage() -> Self {
        Self::autre("math range error")
    }
}
