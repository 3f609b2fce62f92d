// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la syntaxe au passage
// - Puis évaluer la RPN avec une pile (itératif : pas de récursion sur la profondeur)
//
// Règles:
// - Ident(name):
//    - doit être dans la liste blanche (direct ou `math.`), sinon NomInconnu
//    - doit être suivi de '(' : c’est un appel, jamais une valeur
// - Moins unaire: opérateur préfixe `Neg`, plus fort que * / mais plus faible que ^
//   (-2^2 = -4, 2^-1 = 0.5)
// - ^ est associatif à droite (2^3^2 = 512)
//
// NOTE:
// - La première erreur rencontrée de gauche à droite gagne.
// - L’adjacence (deux valeurs collées) est vérifiée AVANT la résolution du nom.

use super::erreur::ErreurEval;
use super::jetons::Tok;
use super::liste_blanche::ListeBlanche;
use super::registre::Fonction;
use super::valeur::{operer, Op, Valeur};

/// Garde-fou : profondeur maximale de la pile d’opérateurs (parenthèses, appels, préfixes).
pub const PROFONDEUR_MAX: usize = 512;

#[derive(Clone, Debug)]
pub enum ElemRpn {
    Num(Valeur),
    Op(Op),
    Neg,
    Appel(&'static Fonction, usize),
}

/// Pile d’opérateurs du shunting-yard.
#[derive(Debug)]
enum Pile {
    Op(Op),
    Neg,
    Paren,
    Appel { f: &'static Fonction, args: usize },
}

const PRIO_NEG: i32 = 3;

fn precedence(op: Op) -> i32 {
    match op {
        Op::Add | Op::Sub => 1,
        Op::Mul | Op::Div | Op::DivEntiere | Op::Modulo => 2,
        Op::Puissance => 4,
    }
}

fn is_right_associative(op: Op) -> bool {
    matches!(op, Op::Puissance)
}

fn op_binaire(t: &Tok) -> Option<Op> {
    Some(match t {
        Tok::Plus => Op::Add,
        Tok::Minus => Op::Sub,
        Tok::Star => Op::Mul,
        Tok::Slash => Op::Div,
        Tok::DoubleSlash => Op::DivEntiere,
        Tok::Percent => Op::Modulo,
        Tok::Caret => Op::Puissance,
        _ => return None,
    })
}

fn empiler(ops: &mut Vec<Pile>, p: Pile) -> Result<(), ErreurEval> {
    if ops.len() >= PROFONDEUR_MAX {
        return Err(ErreurEval::autre("expression too deeply nested"));
    }
    ops.push(p);
    Ok(())
}

/// Dépile vers la sortie jusqu’à '(' ou un appel (exclus).
fn depiler_groupe(ops: &mut Vec<Pile>, out: &mut Vec<ElemRpn>) {
    while let Some(top) = ops.last() {
        match top {
            Pile::Op(op) => out.push(ElemRpn::Op(*op)),
            Pile::Neg => out.push(ElemRpn::Neg),
            Pile::Paren | Pile::Appel { .. } => break,
        }
        ops.pop();
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sqrt"), LPar, Num(9), RPar, Plus, Num(1)]
///   rpn:    [Num(9), Appel(sqrt, 1), Num(1), Op(Add)]
pub fn to_rpn(tokens: &[Tok], liste: &ListeBlanche) -> Result<Vec<ElemRpn>, ErreurEval> {
    let mut out: Vec<ElemRpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();

    // true tant qu’on attend un opérande (début, après un opérateur, après '(' ou ',')
    let mut attend_valeur = true;
    // true juste après "f(" : autorise l’appel vide "f()"
    let mut appel_ouvert = false;

    let mut iter = tokens.iter().peekable();

    while let Some(tok) = iter.next() {
        let vient_d_ouvrir = std::mem::take(&mut appel_ouvert);

        match tok {
            Tok::Num(v) => {
                if !attend_valeur {
                    return Err(ErreurEval::syntaxe(format!("valeur inattendue: {v}")));
                }
                out.push(ElemRpn::Num(v.clone()));
                attend_valeur = false;
            }

            Tok::Ident(nom) => {
                if !attend_valeur {
                    return Err(ErreurEval::syntaxe(format!("nom inattendu: {nom}")));
                }
                let f = liste
                    .resoudre(nom)
                    .ok_or_else(|| ErreurEval::NomInconnu(nom.clone()))?;

                if iter.next_if(|t| matches!(t, Tok::LPar)).is_none() {
                    return Err(ErreurEval::autre(format!(
                        "'{nom}' is a function and must be called, like {nom}(9)"
                    )));
                }
                empiler(&mut ops, Pile::Appel { f, args: 0 })?;
                appel_ouvert = true;
                attend_valeur = true;
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(ErreurEval::syntaxe("'(' inattendue"));
                }
                empiler(&mut ops, Pile::Paren)?;
                attend_valeur = true;
            }

            Tok::Comma => {
                if attend_valeur {
                    return Err(ErreurEval::syntaxe("',' inattendue"));
                }
                depiler_groupe(&mut ops, &mut out);
                match ops.last_mut() {
                    Some(Pile::Appel { args, .. }) => *args += 1,
                    _ => return Err(ErreurEval::syntaxe("',' hors d’un appel")),
                }
                attend_valeur = true;
            }

            Tok::RPar => {
                if attend_valeur {
                    // seul cas légal : "f()"
                    if !vient_d_ouvrir {
                        return Err(ErreurEval::syntaxe("')' inattendue"));
                    }
                    if let Some(Pile::Appel { f, .. }) = ops.pop() {
                        out.push(ElemRpn::Appel(f, 0));
                    }
                    attend_valeur = false;
                    continue;
                }

                depiler_groupe(&mut ops, &mut out);
                match ops.pop() {
                    Some(Pile::Paren) => {}
                    Some(Pile::Appel { f, args }) => out.push(ElemRpn::Appel(f, args + 1)),
                    _ => return Err(ErreurEval::syntaxe("')' sans '(' correspondante")),
                }
                attend_valeur = false;
            }

            // préfixes
            Tok::Minus if attend_valeur => empiler(&mut ops, Pile::Neg)?,
            Tok::Plus if attend_valeur => {}

            _ => {
                let op = op_binaire(tok)
                    .ok_or_else(|| ErreurEval::syntaxe("jeton inattendu"))?;
                if attend_valeur {
                    return Err(ErreurEval::syntaxe(format!(
                        "opérande manquant avant '{}'",
                        op.symbole()
                    )));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou un appel
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                let p_tok = precedence(op);
                while let Some(top) = ops.last() {
                    let (p_top, elem) = match top {
                        Pile::Op(o) => (precedence(*o), ElemRpn::Op(*o)),
                        Pile::Neg => (PRIO_NEG, ElemRpn::Neg),
                        Pile::Paren | Pile::Appel { .. } => break,
                    };

                    let doit_pop = if is_right_associative(op) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop {
                        break;
                    }
                    out.push(elem);
                    ops.pop();
                }

                empiler(&mut ops, Pile::Op(op))?;
                attend_valeur = true;
            }
        }
    }

    if attend_valeur {
        return Err(ErreurEval::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        match p {
            Pile::Op(op) => out.push(ElemRpn::Op(op)),
            Pile::Neg => out.push(ElemRpn::Neg),
            Pile::Paren | Pile::Appel { .. } => {
                return Err(ErreurEval::syntaxe("parenthèses non fermées"))
            }
        }
    }

    Ok(out)
}

/// Évalue une RPN avec une pile de valeurs.
pub fn eval_rpn(rpn: Vec<ElemRpn>) -> Result<Valeur, ErreurEval> {
    let invalide = || ErreurEval::syntaxe("RPN invalide");
    let mut st: Vec<Valeur> = Vec::new();

    for e in rpn {
        match e {
            ElemRpn::Num(v) => st.push(v),
            ElemRpn::Neg => {
                let a = st.pop().ok_or_else(invalide)?;
                st.push(a.neg());
            }
            ElemRpn::Op(op) => {
                let b = st.pop().ok_or_else(invalide)?;
                let a = st.pop().ok_or_else(invalide)?;
                st.push(operer(op, a, b)?);
            }
            ElemRpn::Appel(f, n) => {
                let debut = st.len().checked_sub(n).ok_or_else(invalide)?;
                let args = st.split_off(debut);
                st.push(f.appeler(&args)?);
            }
        }
    }

    if st.len() != 1 {
        return Err(invalide());
    }
    st.pop().ok_or_else(invalide)
}

/// Format utilitaire (journal debug) : RPN en texte.
pub fn format_rpn(rpn: &[ElemRpn]) -> String {
    rpn.iter()
        .map(|e| match e {
            ElemRpn::Num(v) => v.to_string(),
            ElemRpn::Op(op) => op.symbole().to_string(),
            ElemRpn::Neg => "neg".to_string(),
            ElemRpn::Appel(f, n) => format!("{}/{n}", f.nom),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
