// src/noyau/registre.rs
//
// Registre statique des fonctions mathématiques de confiance.
// C’est la SEULE source de fonctions appelables : la liste blanche (config)
// n’en retient qu’un sous-ensemble, validé au démarrage.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

use super::erreur::ErreurEval;
use super::valeur::{reel_vers_entier, Valeur};

/// Garde-fou : factorial() au-delà de cette borne est refusée (anti-gel).
pub const FACTORIELLE_MAX: u64 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arite {
    Exacte(usize),
    Entre(usize, usize),
    AuMoins(usize),
}

impl Arite {
    pub fn accepte(self, n: usize) -> bool {
        match self {
            Arite::Exacte(k) => n == k,
            Arite::Entre(lo, hi) => (lo..=hi).contains(&n),
            Arite::AuMoins(k) => n >= k,
        }
    }
}

pub struct Fonction {
    pub nom: &'static str,
    pub arite: Arite,
    pub appliquer: fn(&[Valeur]) -> Result<Valeur, ErreurEval>,
}

impl std::fmt::Debug for Fonction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}()", self.nom)
    }
}

impl Fonction {
    /// Appel avec contrôle d’arité.
    pub fn appeler(&self, args: &[Valeur]) -> Result<Valeur, ErreurEval> {
        if !self.arite.accepte(args.len()) {
            return Err(ErreurEval::Autre(self.message_arite(args.len())));
        }
        (self.appliquer)(args)
    }

    fn message_arite(&self, donnes: usize) -> String {
        let pluriel = |k: usize| if k == 1 { "argument" } else { "arguments" };
        match self.arite {
            Arite::Exacte(k) => format!(
                "{}() takes exactly {k} {} ({donnes} given)",
                self.nom,
                pluriel(k)
            ),
            Arite::Entre(lo, hi) => format!(
                "{}() takes from {lo} to {hi} arguments ({donnes} given)",
                self.nom
            ),
            Arite::AuMoins(k) => format!(
                "{}() takes at least {k} {} ({donnes} given)",
                self.nom,
                pluriel(k)
            ),
        }
    }
}

/// Cherche une fonction par nom exact (sensible à la casse).
pub fn chercher(nom: &str) -> Option<&'static Fonction> {
    REGISTRE.iter().find(|f| f.nom == nom)
}

/// Noms connus (diagnostic de configuration).
pub fn noms() -> impl Iterator<Item = &'static str> {
    REGISTRE.iter().map(|f| f.nom)
}

const fn f(
    nom: &'static str,
    arite: Arite,
    appliquer: fn(&[Valeur]) -> Result<Valeur, ErreurEval>,
) -> Fonction {
    Fonction {
        nom,
        arite,
        appliquer,
    }
}

use Arite::{AuMoins, Entre, Exacte};

static REGISTRE: &[Fonction] = &[
    // racines / exponentielles / logarithmes
    f("sqrt", Exacte(1), |a| reel1(a, |x| domaine_si(x >= 0.0, x.sqrt()))),
    f("isqrt", Exacte(1), isqrt),
    f("exp", Exacte(1), |a| reel1(a, |x| plage(x, x.exp()))),
    f("expm1", Exacte(1), |a| reel1(a, |x| plage(x, x.exp_m1()))),
    f("log", Entre(1, 2), log),
    f("log2", Exacte(1), |a| reel1(a, |x| domaine_si(x > 0.0, x.log2()))),
    f("log10", Exacte(1), |a| reel1(a, |x| domaine_si(x > 0.0, x.log10()))),
    f("log1p", Exacte(1), |a| reel1(a, |x| domaine_si(x > -1.0, x.ln_1p()))),
    f("pow", Exacte(2), pow),
    // trigonométrie
    f("sin", Exacte(1), |a| reel1(a, |x| domaine_si(!x.is_infinite(), x.sin()))),
    f("cos", Exacte(1), |a| reel1(a, |x| domaine_si(!x.is_infinite(), x.cos()))),
    f("tan", Exacte(1), |a| reel1(a, |x| domaine_si(!x.is_infinite(), x.tan()))),
    f("asin", Exacte(1), |a| reel1(a, |x| domaine_si(dans_unite(x), x.asin()))),
    f("acos", Exacte(1), |a| reel1(a, |x| domaine_si(dans_unite(x), x.acos()))),
    f("atan", Exacte(1), |a| reel1(a, |x| Ok(x.atan()))),
    f("atan2", Exacte(2), |a| reel2(a, |y, x| Ok(y.atan2(x)))),
    f("degrees", Exacte(1), |a| reel1(a, |x| Ok(x.to_degrees()))),
    f("radians", Exacte(1), |a| reel1(a, |x| Ok(x.to_radians()))),
    // hyperboliques
    f("sinh", Exacte(1), |a| reel1(a, |x| plage(x, x.sinh()))),
    f("cosh", Exacte(1), |a| reel1(a, |x| plage(x, x.cosh()))),
    f("tanh", Exacte(1), |a| reel1(a, |x| Ok(x.tanh()))),
    f("asinh", Exacte(1), |a| reel1(a, |x| Ok(x.asinh()))),
    f("acosh", Exacte(1), |a| reel1(a, |x| domaine_si(x >= 1.0 || x.is_nan(), x.acosh()))),
    f("atanh", Exacte(1), |a| reel1(a, |x| domaine_si(dans_unite_ouverte(x), x.atanh()))),
    // divers
    f("hypot", AuMoins(0), hypot),
    f("fabs", Exacte(1), |a| reel1(a, |x| Ok(x.abs()))),
    f("fmod", Exacte(2), |a| reel2(a, |x, y| domaine_si(y != 0.0 && !x.is_infinite(), x % y))),
    f("copysign", Exacte(2), |a| reel2(a, |x, y| Ok(x.copysign(y)))),
    // vers entier
    f("floor", Exacte(1), |a| arrondi(a, f64::floor)),
    f("ceil", Exacte(1), |a| arrondi(a, f64::ceil)),
    f("trunc", Exacte(1), |a| arrondi(a, f64::trunc)),
    f("factorial", Exacte(1), factorial),
    f("gcd", AuMoins(0), gcd),
];

/* ------------------------ Helpers ------------------------ */

fn reel1(
    args: &[Valeur],
    op: impl Fn(f64) -> Result<f64, ErreurEval>,
) -> Result<Valeur, ErreurEval> {
    op(args[0].en_reel()?).map(Valeur::Reel)
}

fn reel2(
    args: &[Valeur],
    op: impl Fn(f64, f64) -> Result<f64, ErreurEval>,
) -> Result<Valeur, ErreurEval> {
    op(args[0].en_reel()?, args[1].en_reel()?).map(Valeur::Reel)
}

fn domaine_si(ok: bool, r: f64) -> Result<f64, ErreurEval> {
    if ok {
        Ok(r)
    } else {
        Err(ErreurEval::domaine_math())
    }
}

/// [-1, 1] ; NaN traverse (asin(nan) == nan).
fn dans_unite(x: f64) -> bool {
    (-1.0..=1.0).contains(&x) || x.is_nan()
}

/// ]-1, 1[ pour atanh.
fn dans_unite_ouverte(x: f64) -> bool {
    (x > -1.0 && x < 1.0) || x.is_nan()
}

/// Dépassement : entrée finie, sortie infinie.
fn plage(x: f64, r: f64) -> Result<f64, ErreurEval> {
    if r.is_infinite() && x.is_finite() {
        Err(ErreurEval::hors_plage())
    } else {
        Ok(r)
    }
}

fn arrondi(args: &[Valeur], op: fn(f64) -> f64) -> Result<Valeur, ErreurEval> {
    match &args[0] {
        Valeur::Entier(n) => Ok(Valeur::Entier(n.clone())),
        Valeur::Reel(x) => reel_vers_entier(op(*x)).map(Valeur::Entier),
    }
}

/// Argument entier strict (gcd, isqrt).
fn exiger_entier(v: &Valeur) -> Result<&BigInt, ErreurEval> {
    match v {
        Valeur::Entier(n) => Ok(n),
        Valeur::Reel(_) => Err(ErreurEval::autre(
            "'float' object cannot be interpreted as an integer",
        )),
    }
}

/* ------------------------ Fonctions à logique propre ------------------------ */

fn log(args: &[Valeur]) -> Result<Valeur, ErreurEval> {
    let x = args[0].en_reel()?;
    let ln_x = domaine_si(x > 0.0, x.ln())?;
    let Some(base) = args.get(1) else {
        return Ok(Valeur::Reel(ln_x));
    };

    let b = base.en_reel()?;
    let ln_b = domaine_si(b > 0.0, b.ln())?;
    if ln_b == 0.0 {
        return Err(ErreurEval::DivisionParZero);
    }
    Ok(Valeur::Reel(ln_x / ln_b))
}

fn pow(args: &[Valeur]) -> Result<Valeur, ErreurEval> {
    let (x, y) = (args[0].en_reel()?, args[1].en_reel()?);
    if x == 0.0 && y < 0.0 {
        return Err(ErreurEval::domaine_math());
    }
    if x < 0.0 && y.is_finite() && y.fract() != 0.0 {
        return Err(ErreurEval::domaine_math());
    }
    let r = x.powf(y);
    if r.is_infinite() && x.is_finite() && y.is_finite() {
        return Err(ErreurEval::hors_plage());
    }
    Ok(Valeur::Reel(r))
}

fn hypot(args: &[Valeur]) -> Result<Valeur, ErreurEval> {
    let mut acc = 0.0_f64;
    for a in args {
        acc = acc.hypot(a.en_reel()?);
    }
    Ok(Valeur::Reel(acc))
}

fn isqrt(args: &[Valeur]) -> Result<Valeur, ErreurEval> {
    let n = exiger_entier(&args[0])?;
    if n.is_negative() {
        return Err(ErreurEval::domaine("isqrt() argument must be nonnegative"));
    }
    Ok(Valeur::Entier(n.sqrt()))
}

fn factorial(args: &[Valeur]) -> Result<Valeur, ErreurEval> {
    let n = match &args[0] {
        Valeur::Entier(n) => n.clone(),
        Valeur::Reel(x) => {
            if !x.is_finite() || x.fract() != 0.0 {
                return Err(ErreurEval::domaine(
                    "factorial() only accepts integral values",
                ));
            }
            reel_vers_entier(*x)?
        }
    };
    if n.is_negative() {
        return Err(ErreurEval::domaine(
            "factorial() not defined for negative values",
        ));
    }

    let n = n
        .to_u64()
        .filter(|n| *n <= FACTORIELLE_MAX)
        .ok_or_else(|| ErreurEval::autre("factorial() argument too large"))?;

    let mut acc = BigInt::from(1);
    for k in 2..=n {
        acc *= k;
    }
    Ok(Valeur::Entier(acc))
}

fn gcd(args: &[Valeur]) -> Result<Valeur, ErreurEval> {
    let mut acc = BigInt::zero();
    for a in args {
        acc = acc.gcd(exiger_entier(a)?);
    }
    Ok(Valeur::Entier(acc))
}
