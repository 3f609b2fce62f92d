// src/noyau/liste_blanche.rs
//
// Liste blanche : sous-ensemble du registre, construit UNE fois depuis la config.
// Invariant : aucune entrée hors des noms configurés ; rien d’autre n’est appelable.

use std::collections::BTreeMap;

use thiserror::Error;

use super::registre::{self, Fonction};

/// Préfixe accepté pour compatibilité : `math.sqrt(9)` == `sqrt(9)`.
pub const PREFIXE_MATH: &str = "math.";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown function '{nom}' (known functions: {connues})")]
pub struct FonctionInconnue {
    pub nom: String,
    pub connues: String,
}

#[derive(Clone, Debug, Default)]
pub struct ListeBlanche {
    fonctions: BTreeMap<&'static str, &'static Fonction>,
}

impl ListeBlanche {
    /// Résout chaque nom contre le registre statique.
    /// Un nom inconnu est un défaut de configuration : échec immédiat.
    pub fn depuis_noms<S: AsRef<str>>(noms: &[S]) -> Result<Self, FonctionInconnue> {
        let mut fonctions = BTreeMap::new();

        for nom in noms {
            let nom = nom.as_ref();
            let f = registre::chercher(nom).ok_or_else(|| FonctionInconnue {
                nom: nom.to_string(),
                connues: registre::noms().collect::<Vec<_>>().join(", "),
            })?;
            fonctions.insert(f.nom, f);
        }

        let liste = Self { fonctions };
        log::debug!(
            "liste blanche ({}): [{}]",
            liste.len(),
            liste.noms().collect::<Vec<_>>().join(", ")
        );
        Ok(liste)
    }

    /// Nom direct (`sqrt`) ou préfixé (`math.sqrt`).
    pub fn resoudre(&self, nom: &str) -> Option<&'static Fonction> {
        let nom = nom.strip_prefix(PREFIXE_MATH).unwrap_or(nom);
        self.fonctions.get(nom).copied()
    }

    pub fn noms(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fonctions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.fonctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonctions.is_empty()
    }
}
