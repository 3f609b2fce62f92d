//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : eval_expression ne panique jamais, toute erreur a une catégorie

use std::time::{Duration, Instant};

use super::erreur::ErreurEval;
use super::eval_expression;
use super::liste_blanche::ListeBlanche;
use super::valeur::Valeur;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn choisir<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn liste() -> ListeBlanche {
    ListeBlanche::depuis_noms(&["sqrt", "log", "exp", "sin", "factorial", "pow", "floor"])
        .unwrap()
}

/// Égalité bit à bit (NaN == NaN ici).
fn meme_resultat(a: &Result<Valeur, ErreurEval>, b: &Result<Valeur, ErreurEval>) -> bool {
    match (a, b) {
        (Ok(Valeur::Reel(x)), Ok(Valeur::Reel(y))) => x.to_bits() == y.to_bits(),
        _ => a == b,
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(20)),
        2 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        3 => format!("00{}", rng.pick(10)),
        4 => format!("-{}", rng.pick(5)),
        _ => "1e3".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(8) {
        0 => gen_atom(rng),
        1..=4 => {
            let op = rng.choisir(&["+", "-", "*", "/", "//", "%", "^"]);
            let b = gen_expr(rng, depth - 1);
            format!("({a}{op}{b})")
        }
        5 => {
            let f = rng.choisir(&["sqrt", "log", "exp", "sin", "factorial", "floor"]);
            format!("{f}({a})")
        }
        6 => format!("pow({a}, {})", gen_atom(rng)),
        _ => format!("-({a})"),
    }
}

/// Texte arbitraire (y compris hostile) : caractères mélangés.
fn gen_bruit(rng: &mut Rng, n: usize) -> String {
    let alphabet = [
        "1", "0", "9", ".", "e", "+", "-", "*", "/", "^", "%", "(", ")", ",", " ", "x", "_",
        "math.", "sqrt", "os", "__", "'", "\"", "[", ";", "=", "π",
    ];
    (0..n).map(|_| rng.choisir(&alphabet)).collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_categories() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);
    let l = liste();

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let r1 = eval_expression(&expr, &l);
        // Même entrée => même sortie (déterminisme)
        let r2 = eval_expression(&expr, &l);
        assert!(meme_resultat(&r1, &r2), "non déterministe: {expr:?}");

        match r1 {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                // Le générateur n’émet que des expressions bien formées.
                assert!(
                    !matches!(e, ErreurEval::Syntaxe(_) | ErreurEval::NomInconnu(_)),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_ne_panique_jamais() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);
    let l = liste();

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..2000 {
        budget(t0, max);
        let n = rng.pick(24) as usize;
        let s = gen_bruit(&mut rng, n);
        // Seule exigence : un résultat, jamais de panique.
        let _ = eval_expression(&s, &l);
    }
}

#[test]
fn fuzz_safe_somme_longue_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    // Évaluation itérative : une somme très longue ne fait pas déborder la pile.
    let expr = vec!["1"; 50_000].join(" + ");
    let v = eval_expression(&expr, &liste()).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);
    assert_eq!(v.to_string(), "50000");
}

#[test]
fn fuzz_safe_imbrication_bornee() {
    let l = liste();

    let profond = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert!(matches!(
        eval_expression(&profond, &l),
        Err(ErreurEval::Autre(_))
    ));

    let moins = format!("{}1", "-".repeat(10_000));
    assert!(matches!(eval_expression(&moins, &l), Err(ErreurEval::Autre(_))));
}
