//! Tests scientifiques : valeurs attendues, précédence, fonctions de la liste blanche.
//!
//! Convention :
//! - entiers : comparaison exacte du texte affiché
//! - transcendantes : tolérance flottante

use super::erreur::ErreurEval;
use super::eval_expression;
use super::liste_blanche::ListeBlanche;
use super::registre;
use super::valeur::Valeur;

/* ------------------------ Helpers ------------------------ */

fn tout() -> ListeBlanche {
    let noms: Vec<&str> = registre::noms().collect();
    ListeBlanche::depuis_noms(&noms).unwrap()
}

fn texte(s: &str) -> String {
    match eval_expression(s, &tout()) {
        Ok(v) => v.to_string(),
        Err(e) => panic!("eval_expression({s:?}) erreur: {e}"),
    }
}

fn reel(s: &str) -> f64 {
    match eval_expression(s, &tout()) {
        Ok(v) => v
            .en_reel()
            .unwrap_or_else(|e| panic!("{s:?}: conversion: {e}")),
        Err(e) => panic!("eval_expression({s:?}) erreur: {e}"),
    }
}

fn assert_proche(s: &str, attendu: f64) {
    let x = reel(s);
    assert!(
        (x - attendu).abs() <= 1e-12 * attendu.abs().max(1.0),
        "{s:?}: obtenu {x}, attendu {attendu}"
    );
}

fn erreur(s: &str) -> ErreurEval {
    eval_expression(s, &tout()).expect_err(s)
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn sci_arithmetique_de_base() {
    assert_eq!(texte("1 + 2 * 3"), "7");
    assert_eq!(texte("(1 + 2) * 3"), "9");
    assert_eq!(texte("10 - 4 - 3"), "3");
    assert_eq!(texte("7 / 2"), "3.5");
    assert_eq!(texte("6 / 3"), "2.0");
    assert_eq!(texte("7 // 2"), "3");
    assert_eq!(texte("-7 // 2"), "-4");
    assert_eq!(texte("7 % 3"), "1");
    assert_eq!(texte("-(2 + 3)"), "-5");
    assert_eq!(texte("+4"), "4");
    assert_eq!(texte("0.1 + 0.2"), "0.30000000000000004");
}

#[test]
fn sci_puissance() {
    assert_eq!(texte("2 ^ 10"), "1024");
    assert_eq!(texte("2 ** 10"), "1024");
    assert_eq!(texte("2 ^ 3 ^ 2"), "512");
    assert_eq!(texte("-2 ^ 2"), "-4");
    assert_eq!(texte("(-2) ^ 2"), "4");
    assert_eq!(texte("2 ^ -1"), "0.5");
    assert_eq!(texte("4 ^ 0.5"), "2.0");
    assert_eq!(
        texte("2 ^ 100"),
        "1267650600228229401496703205376"
    );
}

#[test]
fn sci_affichage_reels() {
    assert_eq!(texte("1e16"), "1e+16");
    assert_eq!(texte("1 / 100000"), "1e-05");
    assert_eq!(texte("2.50"), "2.5");
    assert_eq!(texte("1e308 * 10"), "inf");
}

/* ------------------------ Fonctions ------------------------ */

#[test]
fn sci_fonctions_transcendantes() {
    let pi = std::f64::consts::PI;
    assert_proche("sin(0)", 0.0);
    assert_proche("cos(0)", 1.0);
    assert_proche("sin(3.141592653589793 / 2)", 1.0);
    assert_proche("tan(3.141592653589793 / 4)", 1.0);
    assert_proche("exp(1)", std::f64::consts::E);
    assert_proche("log(exp(2))", 2.0);
    assert_proche("log(1024, 2)", 10.0);
    assert_proche("log10(1000)", 3.0);
    assert_proche("log2(8)", 3.0);
    assert_proche("atan2(1, 1)", pi / 4.0);
    assert_proche("degrees(3.141592653589793)", 180.0);
    assert_proche("radians(180)", pi);
    assert_proche("pow(2, 0.5)", std::f64::consts::SQRT_2);
    assert_proche("hypot(3, 4, 12)", 13.0);
}

#[test]
fn sci_fonctions_entieres() {
    assert_eq!(texte("floor(2.7)"), "2");
    assert_eq!(texte("ceil(2.1)"), "3");
    assert_eq!(texte("floor(-2.5)"), "-3");
    assert_eq!(texte("trunc(-2.5)"), "-2");
    assert_eq!(texte("factorial(5)"), "120");
    assert_eq!(
        texte("factorial(25)"),
        "15511210043330985984000000"
    );
    assert_eq!(texte("gcd(12, 18, 27)"), "3");
    assert_eq!(texte("isqrt(99)"), "9");
    assert_eq!(texte("sqrt(16)"), "4.0");
    assert_eq!(texte("fabs(-3)"), "3.0");
    assert_eq!(texte("pow(2, 3)"), "8.0");
}

#[test]
fn sci_composition() {
    assert_eq!(texte("sqrt(sqrt(16)) + floor(2.9) * 2"), "6.0");
    assert_eq!(texte("math.factorial(3) + factorial(math.floor(3.5))"), "12");
    assert_eq!(texte("factorial(3) ^ 2"), "36");
}

/* ------------------------ Domaine / erreurs ------------------------ */

#[test]
fn sci_domaines() {
    assert_eq!(erreur("sqrt(-1)"), ErreurEval::domaine_math());
    assert_eq!(erreur("log(0)"), ErreurEval::domaine_math());
    assert_eq!(erreur("log(-1, 10)"), ErreurEval::domaine_math());
    assert_eq!(erreur("acos(1.5)"), ErreurEval::domaine_math());
    assert_eq!(erreur("pow(-8, 1/3)"), ErreurEval::domaine_math());
    assert_eq!(erreur("sin(1e308 * 10)"), ErreurEval::domaine_math());
    assert!(matches!(erreur("(-8) ^ 0.5"), ErreurEval::Domaine(_)));
    assert!(matches!(erreur("factorial(-1)"), ErreurEval::Domaine(_)));
    assert!(matches!(erreur("isqrt(-4)"), ErreurEval::Domaine(_)));
}

#[test]
fn sci_divisions_par_zero() {
    for s in ["1/0", "1.5 / 0.0", "5 // 0", "5 % 0", "0 ^ -1", "log(5, 1)", "1/(2-2)"] {
        assert_eq!(erreur(s), ErreurEval::DivisionParZero, "{s:?}");
    }
}

#[test]
fn sci_autres_erreurs() {
    for s in [
        "exp(1000)",
        "10.0 ^ 400",
        "floor(1e308 * 10)",
        "gcd(1.5, 3)",
        "sqrt()",
        "sqrt",
        "factorial(100000)",
        "10 ^ 10000000",
        "sqrt(10 ^ 400)",
    ] {
        assert!(matches!(erreur(s), ErreurEval::Autre(_)), "{s:?}");
    }
}

#[test]
fn sci_valeur_type() {
    // entier exact vs réel
    assert!(matches!(
        eval_expression("3 * 4", &tout()),
        Ok(Valeur::Entier(_))
    ));
    assert!(matches!(
        eval_expression("3 * 4.0", &tout()),
        Ok(Valeur::Reel(_))
    ));
}

/* ------------------------ Liste blanche : isolation ------------------------ */

#[test]
fn sci_isolation_liste_blanche() {
    let l = ListeBlanche::depuis_noms(&["cos"]).unwrap();
    assert_eq!(
        eval_expression("sqrt(4)", &l),
        Err(ErreurEval::NomInconnu("sqrt".into()))
    );
    assert_eq!(
        eval_expression("math.sqrt(4)", &l),
        Err(ErreurEval::NomInconnu("math.sqrt".into()))
    );
    assert_eq!(
        eval_expression("pi", &l),
        Err(ErreurEval::NomInconnu("pi".into()))
    );
    assert_eq!(
        eval_expression("__builtins__", &l),
        Err(ErreurEval::NomInconnu("__builtins__".into()))
    );
    assert!(eval_expression("cos(0)", &l).is_ok());
}
