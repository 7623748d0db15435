use super::*;

fn s(v: &str) -> Option<String> {
    Some(v.to_string())
}

fn dbpepvar() -> Table {
    Table::from_rows(
        "dbPepVar",
        ["Raw file", "Leading Razor Protein", "Sequence", "Score"],
        vec![
            vec![s("R1"), s("GI_1"), s("AAA"), s("10")],
            vec![s("R1"), s("GI_2"), s("BBB"), s("20")],
            vec![s("R2"), s("GI_1"), s("CCC"), s("30")],
            vec![s("R3"), None, s("DDD"), s("40")],
        ],
    )
    .unwrap()
}

fn refseq() -> Table {
    Table::from_rows(
        "refSeq",
        ["Raw file", "Leading Razor Protein", "Sequence", "Score"],
        vec![
            vec![s("R1"), s("GI_1"), s("aaa"), s("1")],
            vec![s("R1"), s("GI_1"), s("aab"), s("2")],
            vec![s("R2"), s("GI_9"), s("ccc"), s("3")],
            vec![s("R3"), None, s("ddd"), s("4")],
        ],
    )
    .unwrap()
}

fn evidence_spec() -> JoinSpec {
    JoinSpec::on(["Raw file", "Leading Razor Protein"]).with_suffixes("_dbPepVar", "_refSeq")
}

/// Reference nested-loop count
fn brute_force(left: &Table, right: &Table, keys: &[(&str, &str)]) -> usize {
    let mut n = 0;
    for i in 0..left.len() {
        for j in 0..right.len() {
            let all_equal = keys.iter().all(|(l, r)| {
                let lv = left.value(i, l).unwrap();
                let rv = right.value(j, r).unwrap();
                lv.is_some() && lv == rv
            });
            if all_equal {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn test_collisions_are_suffixed_on_both_sides() {
    let joined = inner_join(&dbpepvar(), &refseq(), &evidence_spec()).unwrap();

    assert_eq!(
        joined.columns(),
        [
            "Raw file",
            "Leading Razor Protein",
            "Sequence_dbPepVar",
            "Score_dbPepVar",
            "Sequence_refSeq",
            "Score_refSeq",
        ]
    );
    assert!(!joined.has_column("Sequence"));
}

#[test]
fn test_cardinality_matches_true_multiplicity() {
    let left = dbpepvar();
    let right = refseq();
    let joined = inner_join(&left, &right, &evidence_spec()).unwrap();

    // R1/GI_1 on the left matches two refSeq rows; nothing else matches
    assert_eq!(joined.len(), 2);
    assert_eq!(
        joined.len(),
        brute_force(
            &left,
            &right,
            &[("Raw file", "Raw file"), ("Leading Razor Protein", "Leading Razor Protein")]
        )
    );
    assert_eq!(count_matches(&left, &right, &evidence_spec()).unwrap(), 2);
}

#[test]
fn test_row_order_follows_left_then_right() {
    let joined = inner_join(&dbpepvar(), &refseq(), &evidence_spec()).unwrap();
    let right_seqs: Vec<_> = joined.column_values("Sequence_refSeq").unwrap().collect();
    assert_eq!(right_seqs, vec![Some("aaa"), Some("aab")]);
    let left_scores: Vec<_> = joined.column_values("Score_dbPepVar").unwrap().collect();
    assert_eq!(left_scores, vec![Some("10"), Some("10")]);
}

#[test]
fn test_null_keys_never_match() {
    let joined = inner_join(&dbpepvar(), &refseq(), &evidence_spec()).unwrap();
    let raw: Vec<_> = joined.column_values("Raw file").unwrap().collect();
    assert!(!raw.contains(&Some("R3")));
}

#[test]
fn test_no_match_yields_empty_table_with_columns() {
    let left = Table::from_rows("l", ["k", "a"], vec![vec![s("1"), s("x")]]).unwrap();
    let right = Table::from_rows("r", ["k", "b"], vec![vec![s("2"), s("y")]]).unwrap();

    let joined = inner_join(&left, &right, &JoinSpec::on(["k"])).unwrap();
    assert!(joined.is_empty());
    assert_eq!(joined.columns(), ["k", "a", "b"]);
}

#[test]
fn test_differently_named_keys_are_both_kept() {
    let evidence = Table::from_rows(
        "evidence",
        ["Sequence_dbPepVar", "Sequence_refSeq"],
        vec![
            vec![s("KXX"), s("KXX")],
            vec![s("PXP"), s("PEP")],
        ],
    )
    .unwrap();
    let missense = Table::from_rows(
        "missense",
        ["PepRef", "PepMut", "Gene"],
        vec![
            vec![s("KXX"), s("KXX"), s("TP53")],
            vec![s("PEP"), s("QQQ"), s("KRAS")],
        ],
    )
    .unwrap();

    let spec = JoinSpec::pairs([("Sequence_dbPepVar", "PepMut"), ("Sequence_refSeq", "PepRef")]);
    let joined = inner_join(&evidence, &missense, &spec).unwrap();

    assert_eq!(
        joined.columns(),
        ["Sequence_dbPepVar", "Sequence_refSeq", "PepRef", "PepMut", "Gene"]
    );
    assert_eq!(joined.len(), 1);
    assert_eq!(joined.value(0, "Gene").unwrap(), Some("TP53"));
}

#[test]
fn test_default_suffixes_follow_pandas() {
    let left = Table::from_rows("l", ["k", "v"], vec![vec![s("1"), s("a")]]).unwrap();
    let right = Table::from_rows("r", ["k", "v"], vec![vec![s("1"), s("b")]]).unwrap();

    let joined = inner_join(&left, &right, &JoinSpec::on(["k"])).unwrap();
    assert_eq!(joined.columns(), ["k", "v_x", "v_y"]);
}

#[test]
fn test_missing_key_column_is_schema_fault() {
    let err = inner_join(&dbpepvar(), &refseq(), &JoinSpec::on(["MS/MS Scan Number"])).unwrap_err();
    assert!(matches!(err, SchemaError::MissingColumn { .. }));
}

#[test]
fn test_suffix_collision_is_schema_fault() {
    let left = Table::from_rows("l", ["k", "v", "v_x"], vec![]).unwrap();
    let right = Table::from_rows("r", ["k", "v"], vec![]).unwrap();

    let err = inner_join(&left, &right, &JoinSpec::on(["k"])).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateColumn { .. }));
}

#[test]
fn test_inputs_are_not_modified() {
    let left = dbpepvar();
    let right = refseq();
    let _ = inner_join(&left, &right, &evidence_spec()).unwrap();
    assert_eq!(left, dbpepvar());
    assert_eq!(right, refseq());
}
