//! src/app/boucle.rs
//!
//! Boucle d’interaction : bannière, puis lecture -> évaluation -> affichage.
//! Générique sur BufRead/Write (stdin/stdout en prod, mémoire en test).

use std::io::{self, BufRead, Write};

use super::config::Configuration;
use crate::noyau::{afficher_resultat, eval_expression, ListeBlanche};

pub const INVITE: &str = "Enter your expression: ";
pub const AU_REVOIR: &str = "Thanks for using the calculator!";

/// Comment la session s’est terminée (les deux sont des sorties propres).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fin {
    CommandeSortie,
    FinEntree,
}

pub struct Session<'a> {
    config: &'a Configuration,
    liste: &'a ListeBlanche,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a Configuration, liste: &'a ListeBlanche) -> Self {
        Self { config, liste }
    }

    /// Message d’accueil + instructions + ligne vide.
    pub fn accueil<W: Write>(&self, sortie: &mut W) -> io::Result<()> {
        writeln!(sortie, "{}", self.config.welcome_message)?;
        for ligne in &self.config.instructions {
            writeln!(sortie, "{ligne}")?;
        }
        writeln!(sortie)
    }

    /// Comparaison insensible à la casse.
    pub fn est_sortie(&self, entree: &str) -> bool {
        entree.to_lowercase() == self.config.exit_command.trim().to_lowercase()
    }

    /// Boucle complète ; ne rend la main qu’à la sortie (commande ou EOF).
    pub fn executer<R: BufRead, W: Write>(&self, mut entree: R, sortie: &mut W) -> io::Result<Fin> {
        self.accueil(sortie)?;

        let mut octets = Vec::new();
        loop {
            write!(sortie, "{INVITE}")?;
            sortie.flush()?;

            octets.clear();
            if entree.read_until(b'\n', &mut octets)? == 0 {
                // EOF (entrée redirigée épuisée, Ctrl-D) : sortie propre
                writeln!(sortie)?;
                writeln!(sortie, "{AU_REVOIR}")?;
                log::debug!("fin de l’entrée standard");
                return Ok(Fin::FinEntree);
            }

            // UTF-8 invalide : U+FFFD, donc erreur de syntaxe sur cette ligne seulement
            let ligne = String::from_utf8_lossy(&octets);
            let texte = ligne.trim();
            if self.est_sortie(texte) {
                writeln!(sortie, "{AU_REVOIR}")?;
                return Ok(Fin::CommandeSortie);
            }

            let resultat = eval_expression(texte, self.liste);
            writeln!(sortie, "Result: {}\n", afficher_resultat(&resultat))?;
        }
    }
}
