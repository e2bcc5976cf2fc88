use canonical::{canonicalize, parameterize, split_statements};

struct Case {
    name: &'static str,
    input: &'static str,
    expected_text: &'static str,
    expected_literals: &'static [&'static str],
}

#[test]
fn golden_corpus_regression() {
    let cases = [
        Case {
            name: "simple_select",
            input: "select id from users where email = 'a@b.c'",
            expected_text: "SELECT id FROM users WHERE email = _param1",
            expected_literals: &["'a@b.c'"],
        },
        Case {
            name: "join_group_order_limit",
            input: "select u.id, count(*) from users u\n\tleft join orders o on o.user_id=u.id\ngroup by u.id order by 2 desc limit 10 offset 20",
            expected_text: "SELECT u.id, count(*) FROM users u LEFT JOIN orders o ON o.user_id = u.id GROUP BY u.id ORDER BY _param1 desc LIMIT _param2 OFFSET _param3",
            expected_literals: &["2", "10", "20"],
        },
        Case {
            name: "cte_with_case",
            input: "with t as (select a, case when b>0 then 'pos' else 'neg' end as s from x) select * from t",
            expected_text: "WITH t AS (SELECT a, CASE WHEN b > _param3 THEN _param1 else _param2 END AS s FROM x) SELECT * FROM t",
            expected_literals: &["'pos'", "'neg'", "0"],
        },
        Case {
            name: "double_quoted_identifier_is_masked",
            input: "SELECT \"Order Total\" FROM sales WHERE amount > 99.95",
            expected_text: "SELECT _param1 FROM sales WHERE amount > _param2",
            expected_literals: &["\"Order Total\"", "99.95"],
        },
        Case {
            name: "union_distinct_having",
            input: "select distinct a from t group by a having count(*)>1 union all select a from u",
            expected_text: "SELECT DISTINCT a FROM t GROUP BY a HAVING count(*) > _param1 UNION ALL SELECT a FROM u",
            expected_literals: &["1"],
        },
        Case {
            name: "create_and_delete_keywords",
            input: "delete from t where id = -7",
            expected_text: "DELETE FROM t WHERE id = _param1",
            expected_literals: &["-7"],
        },
        Case {
            name: "postgres_cast_kept",
            input: "select created_at::date from events where id = 5",
            expected_text: "SELECT created_at :: date FROM events WHERE id = _param1",
            expected_literals: &["5"],
        },
        Case {
            name: "arithmetic_and_concat",
            input: "select first||' '||last, price*qty-discount from items where total = price+1",
            expected_text: "SELECT first || _param1 || last, price * qty - discount FROM items WHERE total = price + _param2",
            expected_literals: &["' '", "1"],
        },
        Case {
            name: "json_arrow_operators",
            input: "select doc->'a'->>'b' from docs where (doc->>'k')::int > 3",
            expected_text: "SELECT doc -> _param1 ->> _param2 FROM docs WHERE (doc ->> _param3) :: int > _param4",
            expected_literals: &["'a'", "'b'", "'k'", "3"],
        },
    ];

    for case in cases {
        let form = canonicalize(case.input);
        assert_eq!(
            form.text, case.expected_text,
            "text mismatch for {}",
            case.name
        );

        let masked = parameterize(case.input);
        assert_eq!(
            masked.literals, case.expected_literals,
            "literal mismatch for {}",
            case.name
        );
        assert_eq!(
            masked.reconstruct(),
            case.input,
            "reconstruction mismatch for {}",
            case.name
        );
        assert_eq!(form.literal_count, case.expected_literals.len());
    }
}

#[test]
fn split_count_matches_top_level_terminators() {
    let script = "\
        CREATE TABLE t (a int, b text);\n\
        INSERT INTO t VALUES (1, 'x;y');\n\
        SELECT f(a; b) FROM t;\n\
        -- just a comment line\n\
        SELECT \"weird;name\" FROM t\n";
    let statements = split_statements(script);

    // Three top-level `;` followed by more text, plus one trailing statement.
    assert_eq!(statements.len(), 4);
    assert_eq!(statements[1], "INSERT INTO t VALUES (1, 'x;y')");
    assert!(statements[3].starts_with("-- just a comment line"));
}

#[test]
fn whitespace_and_case_variants_collapse_to_one_fingerprint() {
    let variants = [
        "SELECT name FROM users WHERE id = 1",
        "select name from users where id=2",
        "  Select   name\n  From users\n  Where id   =   3  ",
        "SELECT\tname\r\nFROM users\r\nWHERE id = 400",
    ];
    let first = canonicalize(variants[0]);
    for variant in &variants[1..] {
        assert_eq!(canonicalize(variant).fingerprint, first.fingerprint, "{variant}");
    }
}

#[test]
fn operator_and_paren_spacing_variants_collapse_to_one_fingerprint() {
    let pairs = [
        ("SELECT a FROM t WHERE x = a+1", "SELECT a FROM t WHERE x = a + 1"),
        ("SELECT a-b FROM t", "SELECT a - b FROM t"),
        ("SELECT a*b FROM t", "SELECT a * b FROM t"),
        ("SELECT a||b FROM t", "SELECT a || b FROM t"),
        ("SELECT count( a ) FROM t", "SELECT count(a) FROM t"),
        ("SELECT doc->'k' FROM t", "SELECT doc -> 'k' FROM t"),
        ("SELECT doc->>'k' FROM t", "SELECT doc ->> 'k' FROM t"),
        ("SELECT * FROM t WHERE id IN ( 1, 2 )", "SELECT * FROM t WHERE id IN (1,2)"),
    ];
    for (tight, loose) in pairs {
        let a = canonicalize(tight);
        let b = canonicalize(loose);
        assert_eq!(a.text, b.text, "{tight} vs {loose}");
        assert_eq!(a.fingerprint, b.fingerprint);
    }
    assert_eq!(
        canonicalize("SELECT doc->'k' FROM t").text,
        "SELECT doc -> _param1 FROM t"
    );
}

#[test]
fn canonical_form_serializes_with_serde() {
    let form = canonicalize("SELECT 1");
    let json = serde_json::to_value(&form).expect("serialize");
    assert_eq!(json["text"], "SELECT _param1");
    assert_eq!(json["fingerprint"], form.fingerprint.as_str());
    assert_eq!(json["literal_count"], 1);
}
