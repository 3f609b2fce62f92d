// src/noyau/valeur.rs
//
// Valeur numérique du noyau :
// - Entier : entier exact (BigInt), reste exact tant que les deux opérandes sont entiers
// - Reel   : flottant IEEE-754 (f64)
//
// Règles :
// - `/` rend toujours un Reel
// - `//` et `%` : division plancher (signe du diviseur)
// - `^` entre entiers, exposant >= 0 : entier exact (borné en bits)

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

use super::erreur::ErreurEval;

/// Garde-fou : taille maximale (en bits) d’un résultat entier de `^`.
pub const BITS_MAX: u64 = 1_000_000;

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Entier(BigInt),
    Reel(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    DivEntiere, // //
    Modulo,     // %
    Puissance,  // ^ ou **
}

impl Op {
    pub fn symbole(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::DivEntiere => "//",
            Op::Modulo => "%",
            Op::Puissance => "^",
        }
    }
}

impl Valeur {
    #[cfg(test)]
    pub fn entier(n: i64) -> Self {
        Valeur::Entier(BigInt::from(n))
    }

    pub fn est_zero(&self) -> bool {
        match self {
            Valeur::Entier(n) => n.is_zero(),
            Valeur::Reel(x) => *x == 0.0,
        }
    }

    /// Conversion vers f64 (erreur si l’entier dépasse la plage des flottants).
    pub fn en_reel(&self) -> Result<f64, ErreurEval> {
        match self {
            Valeur::Entier(n) => entier_vers_reel(n),
            Valeur::Reel(x) => Ok(*x),
        }
    }

    pub fn neg(self) -> Valeur {
        match self {
            Valeur::Entier(n) => Valeur::Entier(-n),
            Valeur::Reel(x) => Valeur::Reel(-x),
        }
    }
}

pub fn entier_vers_reel(n: &BigInt) -> Result<f64, ErreurEval> {
    match n.to_f64() {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ErreurEval::autre("int too large to convert to float")),
    }
}

/// f64 (déjà arrondi par l’appelant) -> entier exact.
pub fn reel_vers_entier(x: f64) -> Result<BigInt, ErreurEval> {
    if x.is_nan() {
        return Err(ErreurEval::domaine("cannot convert float NaN to integer"));
    }
    if x.is_infinite() {
        return Err(ErreurEval::autre("cannot convert float infinity to integer"));
    }
    BigInt::from_f64(x.trunc())
        .ok_or_else(|| ErreurEval::autre("cannot convert float to integer"))
}

/// Applique un opérateur binaire.
pub fn operer(op: Op, a: Valeur, b: Valeur) -> Result<Valeur, ErreurEval> {
    use Valeur::*;

    match op {
        Op::Add | Op::Sub | Op::Mul => match (a, b) {
            (Entier(x), Entier(y)) => Ok(Entier(match op {
                Op::Add => x + y,
                Op::Sub => x - y,
                _ => x * y,
            })),
            (a, b) => {
                let (x, y) = (a.en_reel()?, b.en_reel()?);
                Ok(Reel(match op {
                    Op::Add => x + y,
                    Op::Sub => x - y,
                    _ => x * y,
                }))
            }
        },

        Op::Div => {
            if b.est_zero() {
                return Err(ErreurEval::DivisionParZero);
            }
            Ok(Reel(a.en_reel()? / b.en_reel()?))
        }

        Op::DivEntiere | Op::Modulo => {
            if b.est_zero() {
                return Err(ErreurEval::DivisionParZero);
            }
            match (a, b) {
                (Entier(x), Entier(y)) => Ok(Entier(if op == Op::DivEntiere {
                    x.div_floor(&y)
                } else {
                    x.mod_floor(&y)
                })),
                (a, b) => {
                    let (x, y) = (a.en_reel()?, b.en_reel()?);
                    Ok(Reel(if op == Op::DivEntiere {
                        (x / y).floor()
                    } else {
                        modulo_plancher(x, y)
                    }))
                }
            }
        }

        Op::Puissance => puissance(a, b),
    }
}

/// Modulo flottant au signe du diviseur.
fn modulo_plancher(x: f64, y: f64) -> f64 {
    let r = x % y;
    if r != 0.0 && ((r < 0.0) != (y < 0.0)) {
        r + y
    } else {
        r
    }
}

fn puissance(a: Valeur, b: Valeur) -> Result<Valeur, ErreurEval> {
    if let (Valeur::Entier(base), Valeur::Entier(exp)) = (&a, &b) {
        if !exp.is_negative() {
            return puissance_entiere(base, exp).map(Valeur::Entier);
        }
        if base.is_zero() {
            return Err(ErreurEval::DivisionParZero);
        }
    }

    let (x, y) = (a.en_reel()?, b.en_reel()?);
    if x == 0.0 && y < 0.0 {
        return Err(ErreurEval::DivisionParZero);
    }
    if x < 0.0 && y.is_finite() && y.fract() != 0.0 {
        return Err(ErreurEval::domaine(
            "negative number cannot be raised to a fractional power",
        ));
    }

    let r = x.powf(y);
    if r.is_infinite() && x.is_finite() && y.is_finite() {
        return Err(ErreurEval::autre("numerical result out of range"));
    }
    Ok(Valeur::Reel(r))
}

/// base^exp exact, exp >= 0.
fn puissance_entiere(base: &BigInt, exp: &BigInt) -> Result<BigInt, ErreurEval> {
    // bases triviales : aucun calcul, quel que soit l’exposant
    if base.is_zero() {
        return Ok(if exp.is_zero() {
            BigInt::from(1)
        } else {
            BigInt::zero()
        });
    }
    if base.abs() == BigInt::from(1) {
        let impair = exp.is_odd();
        return Ok(if base.is_negative() && impair {
            BigInt::from(-1)
        } else {
            BigInt::from(1)
        });
    }

    // |base| >= 2 => bits(base) >= 2 : on borne bits(base) * exp
    let e = exp
        .to_u64()
        .filter(|e| base.bits().saturating_mul(*e) <= BITS_MAX)
        .ok_or_else(|| ErreurEval::autre("integer result too large"))?;

    // e <= BITS_MAX / 2 : tient dans u32
    Ok(base.pow(e as u32))
}

/* ------------------------ Affichage ------------------------ */

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valeur::Entier(n) => write!(f, "{n}"),
            Valeur::Reel(x) => f.write_str(&format_reel(*x)),
        }
    }
}

/// Forme courte “aller-retour” :
/// - toujours une partie fractionnaire (3.0)
/// - notation exponentielle si |x| >= 1e16 ou |x| < 1e-4 (1e+16, 1e-05)
pub fn format_reel(x: f64) -> String {
    if x.is_nan() {
        return "nan".into();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf".into() } else { "-inf".into() };
    }

    let a = x.abs();
    if a != 0.0 && !(1e-4..1e16).contains(&a) {
        // Rust: "1.5e-5" -> "1.5e-05"
        let brut = format!("{x:e}");
        let (mantisse, exposant) = brut.split_once('e').unwrap_or((brut.as_str(), "0"));
        let e: i32 = exposant.parse().unwrap_or(0);
        let signe = if e < 0 { '-' } else { '+' };
        return format!("{mantisse}e{signe}{:02}", e.abs());
    }

    let s = format!("{x}");
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}
