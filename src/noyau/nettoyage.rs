// src/noyau/nettoyage.rs
//
// Assainissement AVANT tokenisation :
// - zéros de tête superflus sur les entiers isolés (007 -> 7)
// - refus des guillemets (aucun littéral texte n’est légal)

use std::borrow::Cow;

use super::erreur::ErreurEval;

/// Retire les zéros de tête d’un entier “isolé” : `007` -> `7`, `000` -> `0`.
///
/// Un entier est isolé si sa suite de chiffres :
/// - n’est pas précédée d’une lettre, d’un chiffre, de `_` ou de `.` (pas une fraction : `1.007`)
/// - n’est pas suivie de `.`, `e`/`E`, d’une lettre ou de `_` (pas un réel : `007.5`, `007e2`)
pub fn normaliser_zeros(s: &str) -> Cow<'_, str> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut modifie = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !c.is_ascii_digit() {
            out.push(c);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let run = &chars[start..i];

        let avant_ok = start == 0 || !colle(chars[start - 1]);
        let apres_ok = i == chars.len() || !colle(chars[i]);

        if avant_ok && apres_ok && run.len() > 1 && run[0] == '0' {
            let premier = run
                .iter()
                .position(|d| *d != '0')
                .unwrap_or(run.len() - 1);
            out.extend(&run[premier..]);
            modifie = true;
        } else {
            out.extend(run);
        }
    }

    if modifie {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(s)
    }
}

/// Caractère qui “soude” une suite de chiffres à un nom ou à un réel.
fn colle(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

/// Refuse tout guillemet (simple ou double) : bloque l’injection de texte.
pub fn rejeter_guillemets(s: &str) -> Result<(), ErreurEval> {
    if s.contains(['\'', '"']) {
        return Err(ErreurEval::Guillemets);
    }
    Ok(())
}
