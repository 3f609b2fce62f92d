// src/noyau/jetons.rs

use num_bigint::BigInt;

use super::erreur::ErreurEval;
use super::valeur::Valeur;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(Valeur),

    // Noms (fonctions, math.xxx, ou n’importe quel mot)
    // NOTE: c’est la conversion RPN qui décide si le nom est autorisé.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash, // //
    Percent,
    Caret, // ^ ou **

    LPar,
    RPar,
    Comma,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (ex: 12, 1_000) -> Num(Entier)
/// - réels (ex: 1.5, .5, 5., 1e3, 2.5E-3) -> Num(Reel)
/// - opérateurs + - * / // % ^ (et ** comme alias de ^)
/// - parenthèses ( ) et virgule
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* avec suffixes pointés (ex: math.sqrt)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Ponctuation
        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Comma);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Opérateurs (les doubles d’abord)
        let suivant = chars.get(i + 1).copied();
        match (c, suivant) {
            ('*', Some('*')) => {
                out.push(Tok::Caret);
                i += 2;
                continue;
            }
            ('/', Some('/')) => {
                out.push(Tok::DoubleSlash);
                i += 2;
                continue;
            }
            ('+', _) => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            ('-', _) => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            ('*', _) => {
                out.push(Tok::Star);
                i += 1;
                continue;
            }
            ('/', _) => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            ('%', _) => {
                out.push(Tok::Percent);
                i += 1;
                continue;
            }
            ('^', _) => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII (+ segments pointés : math.sqrt)
        if debut_ident(c) {
            let start = i;
            i += 1;
            loop {
                while i < chars.len() && suite_ident(chars[i]) {
                    i += 1;
                }
                // ".xxx" colle au nom seulement si un identifiant suit
                if i + 1 < chars.len() && chars[i] == '.' && debut_ident(chars[i + 1]) {
                    i += 1;
                    continue;
                }
                break;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Nombre : chiffres, ou '.' suivi d’un chiffre
        if c.is_ascii_digit() || (c == '.' && suivant.is_some_and(|d| d.is_ascii_digit())) {
            let (tok, fin) = lire_nombre(&chars, i)?;
            out.push(tok);
            i = fin;
            continue;
        }

        return Err(ErreurEval::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

fn debut_ident(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn suite_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lit un littéral numérique à partir de `start`; renvoie (jeton, index de fin).
fn lire_nombre(chars: &[char], start: usize) -> Result<(Tok, usize), ErreurEval> {
    // `_` seulement entre deux chiffres : `1_000` oui, `1__0` et `1_` non
    let chiffre = |i: usize| chars.get(i).is_some_and(|c| c.is_ascii_digit());
    let separateur =
        |i: usize| chars.get(i) == Some(&'_') && i > 0 && chiffre(i - 1) && chiffre(i + 1);
    let chiffres = |mut i: usize| {
        while chiffre(i) || separateur(i) {
            i += 1;
        }
        i
    };

    let mut i = chiffres(start);
    let mut reel = false;

    // partie fractionnaire
    if i < chars.len() && chars[i] == '.' {
        reel = true;
        i = chiffres(i + 1);
    }

    // exposant : e[+-]?chiffres (sinon le 'e' n’appartient pas au nombre)
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            reel = true;
            i = chiffres(j);
        }
    }

    let texte: String = chars[start..i].iter().filter(|c| **c != '_').collect();

    let tok = if reel {
        let x: f64 = texte
            .parse()
            .map_err(|_| ErreurEval::syntaxe(format!("nombre invalide: {texte}")))?;
        Tok::Num(Valeur::Reel(x))
    } else {
        let n = BigInt::parse_bytes(texte.as_bytes(), 10)
            .ok_or_else(|| ErreurEval::syntaxe(format!("nombre invalide: {texte}")))?;
        Tok::Num(Valeur::Entier(n))
    };

    Ok((tok, i))
}

/// Format utilitaire (journal debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(v) => v.to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::DoubleSlash => "//".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Comma => ",".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
