use proptest::prelude::*;

use super::*;
use crate::morph::Morpheme;

fn table(entries: &[(&str, u64)]) -> FrequencyTable {
    FrequencyTable::from_counts(entries.iter().map(|&(w, c)| (w, c)), true)
}

fn settings(min_size: usize, min_count: u64, junctures: &[&str]) -> SplitSettings {
    SplitSettings {
        min_size,
        min_count,
        max_count: u64::MAX,
        max_hypotheses: 1000,
        junctures: junctures.iter().map(|j| j.to_string()).collect(),
        fewest: false,
        truecase: true,
    }
}

fn forms(d: &Decomposition) -> Vec<String> {
    d.pieces()
        .iter()
        .map(|p| match p {
            Piece::Segment(s) => s.form.clone(),
            Piece::Juncture(j) => format!("@{j}@"),
        })
        .collect()
}

fn seg(form: &str, freq: u64) -> Piece {
    Piece::Segment(Segment {
        surface: form.to_string(),
        form: form.to_string(),
        freq,
    })
}

fn junc(j: &str) -> Piece {
    Piece::Juncture(j.to_string())
}

// ---------------------------------------------------------------------------
// Lattice
// ---------------------------------------------------------------------------

#[test]
fn test_lattice_juncture_between_segments() {
    let t = table(&[("ab", 10), ("c", 8)]);
    let s = settings(1, 1, &["", "es"]);
    let lattice = SegmentationLattice::build("ABesC", &t, &s);
    let all: Vec<_> = lattice.decompositions().collect();
    assert_eq!(all.len(), 1);
    assert_eq!(forms(&all[0]), vec!["ab", "@es@", "c"]);
    assert_eq!(all[0].surface(), "ABesC");
}

#[test]
fn test_lattice_no_decomposition() {
    let t = table(&[("ab", 10)]);
    let s = settings(1, 1, &[""]);
    let lattice = SegmentationLattice::build("xyzzy", &t, &s);
    assert!(!lattice.has_decomposition());
    assert_eq!(lattice.decompositions().count(), 0);
}

#[test]
fn test_lattice_respects_min_size() {
    let t = table(&[("haus", 10), ("tür", 10)]);
    let lattice = SegmentationLattice::build("haustür", &t, &settings(4, 1, &[""]));
    assert!(!lattice.has_decomposition());
    let lattice = SegmentationLattice::build("haustür", &t, &settings(3, 1, &[""]));
    let all: Vec<_> = lattice.decompositions().map(|d| forms(&d)).collect();
    assert_eq!(all, vec![vec!["haus", "@@", "tür"]]);
}

#[test]
fn test_lattice_respects_min_count() {
    let t = table(&[("haus", 10), ("tür", 4)]);
    let lattice = SegmentationLattice::build("haustür", &t, &settings(3, 5, &[""]));
    assert!(!lattice.has_decomposition());
}

#[test]
fn test_lattice_no_juncture_at_word_start() {
    let t = table(&[("amt", 10)]);
    let lattice = SegmentationLattice::build("samt", &t, &settings(1, 1, &["", "s"]));
    assert!(!lattice.has_decomposition());
}

#[test]
fn test_lattice_keeps_higher_frequency_arc() {
    // "samt" (no juncture) and "s" + "amt" span the same boundary pair.
    let t = table(&[("arbeit", 10), ("samt", 3), ("amt", 20)]);
    let s = settings(3, 1, &["", "s"]);
    let lattice = SegmentationLattice::build("arbeitsamt", &t, &s);
    let all: Vec<_> = lattice.decompositions().map(|d| forms(&d)).collect();
    assert_eq!(all, vec![vec!["arbeit", "@s@", "amt"]]);

    let t = table(&[("arbeit", 10), ("samt", 20), ("amt", 3)]);
    let lattice = SegmentationLattice::build("arbeitsamt", &t, &s);
    let all: Vec<_> = lattice.decompositions().map(|d| forms(&d)).collect();
    assert_eq!(all, vec![vec!["arbeit", "@@", "samt"]]);
}

#[test]
fn test_lattice_equal_frequency_keeps_first_juncture() {
    let t = table(&[("arbeit", 10), ("samt", 5), ("amt", 5)]);
    let s = settings(3, 1, &["", "s"]);
    let lattice = SegmentationLattice::build("arbeitsamt", &t, &s);
    let arc = &lattice.arcs_by_end[10][&6];
    assert_eq!(arc.juncture, "");
    assert_eq!(arc.segment.form, "samt");
}

#[test]
fn test_lattice_enumerates_every_kept_path() {
    // One arc per boundary pair, but every start boundary is followed:
    // the weaker "ab cdef" path is produced alongside "abc def".
    let t = table(&[("abc", 5), ("def", 5), ("ab", 1), ("cdef", 1)]);
    let s = settings(2, 1, &[""]);
    let lattice = SegmentationLattice::build("abcdef", &t, &s);
    let all: Vec<_> = lattice.decompositions().map(|d| forms(&d)).collect();
    assert_eq!(
        all,
        vec![vec!["ab", "@@", "cdef"], vec!["abc", "@@", "def"]]
    );
}

#[test]
fn test_lattice_iteration_is_restartable() {
    let t = table(&[("abc", 5), ("def", 5), ("ab", 1), ("cdef", 1)]);
    let lattice = SegmentationLattice::build("abcdef", &t, &settings(2, 1, &[""]));
    let first: Vec<_> = lattice.decompositions().collect();
    let second: Vec<_> = lattice.decompositions().collect();
    assert_eq!(first, second);
}

#[test]
fn test_lattice_non_ascii_positions() {
    let t = table(&[("größe", 10), ("änderung", 10)]);
    let s = settings(4, 1, &["", "n"]);
    let lattice = SegmentationLattice::build("Größenänderung", &t, &s);
    let all: Vec<_> = lattice.decompositions().collect();
    assert_eq!(all.len(), 1);
    assert_eq!(forms(&all[0]), vec!["größe", "@n@", "änderung"]);
    assert_eq!(all[0].surface(), "Größenänderung");
}

#[test]
fn test_lattice_truecased_forms() {
    let t = table(&[("berlin", 1), ("Berlin", 5), ("marathon", 10)]);
    let lattice = SegmentationLattice::build("berlinmarathon", &t, &settings(4, 1, &[""]));
    let all: Vec<_> = lattice.decompositions().collect();
    assert_eq!(forms(&all[0]), vec!["Berlin", "@@", "marathon"]);
    let freqs: Vec<u64> = all[0].segments().map(|s| s.freq).collect();
    assert_eq!(freqs, vec![5, 10]);
}

#[test]
fn test_lattice_without_truecase_keeps_surface() {
    let t = FrequencyTable::from_counts([("berlin", 1), ("Berlin", 5), ("marathon", 10)], false);
    let mut s = settings(4, 1, &[""]);
    s.truecase = false;
    let lattice = SegmentationLattice::build("BERLINmarathon", &t, &s);
    let all: Vec<_> = lattice.decompositions().collect();
    assert_eq!(forms(&all[0]), vec!["BERLIN", "@@", "marathon"]);
}

// ---------------------------------------------------------------------------
// Morphological coarsening
// ---------------------------------------------------------------------------

fn morph_split(pairs: &[(&str, &str)]) -> MorphemeSplit {
    MorphemeSplit::new(pairs.iter().map(|(r, j)| Morpheme::new(*r, *j)).collect())
}

#[test]
fn test_coarsen_every_attested_grouping() {
    let t = table(&[
        ("arbeit", 10),
        ("markt", 10),
        ("politik", 10),
        ("arbeitsmarkt", 50),
    ]);
    let s = settings(4, 1, &[""]);
    let splits = vec![
        MorphemeSplit::trivial("Arbeitsmarktpolitik"),
        morph_split(&[("Arbeit", "s"), ("markt", ""), ("politik", "")]),
    ];
    let all: Vec<_> = MorphDecompositions::new(&splits, &t, &s)
        .map(|d| forms(&d))
        .collect();
    assert_eq!(
        all,
        vec![
            vec!["arbeit", "@s@", "markt", "@@", "politik"],
            vec!["arbeitsmarkt", "@@", "politik"],
        ]
    );
}

#[test]
fn test_coarsen_ignores_min_size() {
    let t = table(&[("ab", 10), ("c", 10)]);
    let s = settings(4, 1, &[""]);
    let splits = vec![morph_split(&[("ab", ""), ("c", "")])];
    let all: Vec<_> = MorphDecompositions::new(&splits, &t, &s).collect();
    assert_eq!(all.len(), 1);
}

#[test]
fn test_coarsen_trivial_split_when_attested() {
    let t = table(&[("haustür", 3)]);
    let s = settings(4, 1, &[""]);
    let splits = vec![MorphemeSplit::trivial("Haustür")];
    let all: Vec<_> = MorphDecompositions::new(&splits, &t, &s).collect();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].segment_count(), 1);
}

#[test]
fn test_coarsen_unattested_gap_yields_nothing() {
    let t = table(&[("arbeit", 10)]);
    let s = settings(4, 1, &[""]);
    let splits = vec![morph_split(&[("Arbeit", "s"), ("markt", "")])];
    assert_eq!(MorphDecompositions::new(&splits, &t, &s).count(), 0);
}

// ---------------------------------------------------------------------------
// Scoring and selection
// ---------------------------------------------------------------------------

#[test]
fn test_geometric_mean() {
    assert!((geometric_mean(&[10, 8]) - 80f64.sqrt()).abs() < 1e-9);
    assert!((geometric_mean(&[7]) - 7.0).abs() < 1e-9);
    assert_eq!(geometric_mean(&[]), 0.0);
}

#[test]
fn test_geometric_mean_overflow_falls_back_to_logs() {
    let big = vec![u64::MAX; 4];
    let mean = geometric_mean(&big);
    assert!((mean / u64::MAX as f64 - 1.0).abs() < 1e-9);
}

#[test]
fn test_baseline_ties_keep_word_unsplit() {
    let mut selector = Selector::new(false);
    let (score, best) = selector.offer(Decomposition::new(vec![seg("a", 1), junc(""), seg("b", 1)]));
    assert_eq!(score.mean, 1.0);
    assert!(!best);
    assert!(selector.into_best().is_none());
}

#[test]
fn test_ties_keep_earlier_candidate() {
    let mut selector = Selector::new(false);
    selector.offer(Decomposition::new(vec![seg("first", 4), junc(""), seg("x", 4)]));
    selector.offer(Decomposition::new(vec![seg("second", 4), junc(""), seg("y", 4)]));
    let (best, _) = selector.into_best().unwrap();
    assert_eq!(forms(&best)[0], "first");
}

#[test]
fn test_fewest_segments_take_precedence() {
    let three = Decomposition::new(vec![
        seg("a", 100),
        junc(""),
        seg("b", 100),
        junc(""),
        seg("c", 100),
    ]);
    let two = Decomposition::new(vec![seg("ab", 2), junc(""), seg("c", 3)]);

    for order in [[&three, &two], [&two, &three]] {
        let mut selector = Selector::new(true);
        for d in order {
            selector.offer(d.clone());
        }
        let (best, score) = selector.into_best().unwrap();
        assert_eq!(best, two);
        assert_eq!(score.segments, 2);

        let mut selector = Selector::new(false);
        for d in order {
            selector.offer(d.clone());
        }
        assert_eq!(selector.into_best().unwrap().0, three);
    }
}

#[test]
fn test_fewest_still_requires_beating_baseline() {
    let mut selector = Selector::new(true);
    selector.offer(Decomposition::new(vec![seg("whole", 1)]));
    selector.offer(Decomposition::new(vec![seg("a", 3), junc(""), seg("b", 3)]));
    assert_eq!(selector.into_best().unwrap().1.segments, 2);
}

// ---------------------------------------------------------------------------
// Splitter
// ---------------------------------------------------------------------------

#[test]
fn test_split_unknown_word_stays_unsplit() {
    let t = table(&[("haus", 10)]);
    let s = settings(4, 1, &[""]);
    let splitter = Splitter::new(&t, &s);
    assert_eq!(splitter.split("Xylophon", Source::Corpus), SplitOutcome::Unsplit);
    assert!(splitter.scored_candidates("Xylophon", Source::Corpus).is_empty());
}

#[test]
fn test_split_prefers_higher_mean() {
    let t = table(&[("haus", 10), ("tür", 10), ("griff", 10), ("haustür", 2)]);
    let s = settings(3, 1, &[""]);
    let splitter = Splitter::new(&t, &s);

    let candidates = splitter.scored_candidates("haustürgriff", Source::Corpus);
    let listed: Vec<_> = candidates.iter().map(|c| forms(&c.decomposition)).collect();
    assert_eq!(
        listed,
        vec![
            vec!["haustür", "@@", "griff"],
            vec!["haus", "@@", "tür", "@@", "griff"],
        ]
    );

    let outcome = splitter.split("haustürgriff", Source::Corpus);
    let best = outcome.decomposition().unwrap();
    assert_eq!(best.segment_count(), 3);
}

#[test]
fn test_split_fewest_mode() {
    let t = table(&[("haus", 10), ("tür", 10), ("griff", 10), ("haustür", 2)]);
    let mut s = settings(3, 1, &[""]);
    s.fewest = true;
    let splitter = Splitter::new(&t, &s);
    let outcome = splitter.split("haustürgriff", Source::Corpus);
    assert_eq!(outcome.decomposition().unwrap().segment_count(), 2);
}

#[test]
fn test_split_hypothesis_cap() {
    let t = table(&[("haus", 10), ("tür", 10), ("griff", 10), ("haustür", 2)]);
    let mut s = settings(3, 1, &[""]);
    s.max_hypotheses = 1;
    let splitter = Splitter::new(&t, &s);
    assert_eq!(splitter.scored_candidates("haustürgriff", Source::Corpus).len(), 1);
    // Only "haustür griff" is considered.
    let outcome = splitter.split("haustürgriff", Source::Corpus);
    assert_eq!(outcome.decomposition().unwrap().segment_count(), 2);
}

#[test]
fn test_split_from_morphology() {
    let t = table(&[
        ("arbeit", 10),
        ("markt", 10),
        ("politik", 10),
        ("arbeitsmarkt", 50),
    ]);
    let s = settings(4, 1, &[""]);
    let splits = vec![
        MorphemeSplit::trivial("Arbeitsmarktpolitik"),
        morph_split(&[("Arbeit", "s"), ("markt", ""), ("politik", "")]),
    ];
    let splitter = Splitter::new(&t, &s);
    let outcome = splitter.split("Arbeitsmarktpolitik", Source::Morphology(&splits));
    let best = outcome.decomposition().unwrap();
    assert_eq!(forms(best), vec!["arbeitsmarkt", "@@", "politik"]);
}

#[test]
fn test_frequent_word() {
    let t = table(&[("Haus", 50)]);
    let mut s = settings(4, 1, &[""]);
    s.max_count = 5;
    let splitter = Splitter::new(&t, &s);
    assert!(splitter.is_frequent("HAUS"));
    assert!(!splitter.is_frequent("Hof"));
}

#[test]
fn test_truecase_resolution() {
    let t = table(&[("berlin", 1), ("Berlin", 5)]);
    let s = settings(1, 1, &[""]);
    let segment = resolve_segment(&t, &s, "berlin").unwrap();
    assert_eq!(segment.form, "Berlin");
    assert_eq!(segment.freq, 5);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_table() -> impl Strategy<Value = Vec<(String, u64)>> {
    prop::collection::vec(("[abes]{1,4}", 1u64..20), 0..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn lattice_decompositions_reproduce_word(
        word in "[abesAB]{1,10}",
        entries in arb_table(),
    ) {
        let t = FrequencyTable::from_counts(entries, true);
        let s = settings(1, 1, &["", "s", "es"]);
        let lattice = SegmentationLattice::build(&word, &t, &s);
        for d in lattice.decompositions().take(5000) {
            prop_assert_eq!(d.surface(), word.clone());
            prop_assert!(matches!(d.pieces().first(), Some(Piece::Segment(_))));
            prop_assert!(matches!(d.pieces().last(), Some(Piece::Segment(_))));
        }
    }

    #[test]
    fn raising_min_count_never_adds_decompositions(
        word in "[abes]{1,10}",
        entries in arb_table(),
        low in 1u64..10,
        raise in 0u64..10,
    ) {
        let t = FrequencyTable::from_counts(entries, true);
        let loose = settings(1, low, &["", "s", "es"]);
        let strict = settings(1, low + raise, &["", "s", "es"]);
        let n_loose = SegmentationLattice::build(&word, &t, &loose).decompositions().count();
        let n_strict = SegmentationLattice::build(&word, &t, &strict).decompositions().count();
        prop_assert!(n_strict <= n_loose);
    }
}
