mod common;

use common::{compose, delta};
use rich_delta::{attributes, Delta};
use serde_json::json;

#[test]
fn insert_insert() {
    let a = delta(json!([{ "insert": "A" }]));
    let b = delta(json!([{ "insert": "B" }]));
    assert_eq!(compose(&a, &b), delta(json!([{ "insert": "B" }, { "insert": "A" }])));
}

#[test]
fn insert_insert_keeps_both_detections() {
    let a = delta(json!([{ "insert": "A", "attributes": { "detectionId": "123" } }]));
    let b = delta(json!([{ "insert": "B", "attributes": { "detectionId": "234" } }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([
            { "insert": "B", "attributes": { "detectionId": "234" } },
            { "insert": "A", "attributes": { "detectionId": "123" } }
        ]))
    );
}

#[test]
fn insert_retain_drops_nulls() {
    let a = delta(json!([{ "insert": "A" }]));
    let b = delta(json!([{ "retain": 1, "attributes": { "bold": true, "color": "red", "font": null } }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([{ "insert": "A", "attributes": { "bold": true, "color": "red" } }]))
    );
}

#[test]
fn insert_retain_with_detection() {
    let a = delta(json!([{ "insert": "A" }]));
    let b = delta(json!([{
        "retain": 1,
        "attributes": { "bold": true, "color": "red", "font": null, "detectionId": "123" }
    }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([{
            "insert": "A",
            "attributes": { "bold": true, "color": "red", "detectionId": "123" }
        }]))
    );
}

#[test]
fn insert_delete_cancels() {
    let a = delta(json!([{ "insert": "A" }]));
    let b = delta(json!([{ "delete": 1 }]));
    assert_eq!(compose(&a, &b), Delta::new());

    let a = delta(json!([{ "insert": "A", "attributes": { "detectionId": "123" } }]));
    assert_eq!(compose(&a, &b), Delta::new());
}

#[test]
fn partial_insert_delete_clears_detection() {
    let a = delta(json!([{ "insert": "AB", "attributes": { "detectionId": "1" } }]));
    let b = delta(json!([{ "delete": 1 }]));
    assert_eq!(compose(&a, &b), delta(json!([{ "insert": "B" }])));
}

#[test]
fn delete_insert() {
    let a = delta(json!([{ "delete": 1 }]));
    let b = delta(json!([{ "insert": "B", "attributes": { "detectionId": "123" } }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([
            { "insert": "B", "attributes": { "detectionId": "123" } },
            { "delete": 1 }
        ]))
    );
}

#[test]
fn delete_retain() {
    let a = delta(json!([{ "delete": 1 }]));
    let b = delta(json!([{
        "retain": 1,
        "attributes": { "bold": true, "color": "red", "detectionId": "123" }
    }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([
            { "delete": 1 },
            { "retain": 1, "attributes": { "bold": true, "color": "red", "detectionId": "123" } }
        ]))
    );
}

#[test]
fn delete_delete() {
    let a = delta(json!([{ "delete": 1 }]));
    let b = delta(json!([{ "delete": 1 }]));
    assert_eq!(compose(&a, &b), delta(json!([{ "delete": 2 }])));
}

#[test]
fn retain_insert() {
    let a = delta(json!([{ "retain": 1, "attributes": { "color": "blue", "detectionId": "123" } }]));
    let b = delta(json!([{ "insert": "B" }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([
            { "insert": "B" },
            { "retain": 1, "attributes": { "color": "blue", "detectionId": "123" } }
        ]))
    );
}

#[test]
fn retain_retain_keeps_nulls() {
    let a = delta(json!([{ "retain": 1, "attributes": { "color": "blue" } }]));
    let b = delta(json!([{ "retain": 1, "attributes": { "bold": true, "color": "red", "font": null } }]));
    assert_eq!(compose(&a, &b), b);
}

#[test]
fn retain_retain_replaces_detection() {
    let a = delta(json!([{ "retain": 1, "attributes": { "color": "blue", "detectionId": "123" } }]));
    let b = delta(json!([{
        "retain": 1,
        "attributes": { "bold": true, "color": "red", "font": null, "detectionId": "234" }
    }]));
    assert_eq!(compose(&a, &b), b);
}

#[test]
fn retain_delete() {
    let a = delta(json!([{ "retain": 1, "attributes": { "color": "blue", "detectionId": "123" } }]));
    let b = delta(json!([{ "delete": 1 }]));
    assert_eq!(compose(&a, &b), delta(json!([{ "delete": 1 }])));
}

#[test]
fn partial_retain_delete_nulls_detection() {
    let a = delta(json!([{ "retain": 2, "attributes": { "color": "blue", "detectionId": "123" } }]));
    let b = delta(json!([{ "delete": 1 }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([
            { "delete": 1 },
            { "retain": 1, "attributes": { "color": "blue", "detectionId": null } }
        ]))
    );
}

#[test]
fn insert_in_middle_of_text() {
    let a = delta(json!([{ "insert": "Hello" }]));
    let b = delta(json!([{ "retain": 3 }, { "insert": "X" }]));
    assert_eq!(compose(&a, &b), delta(json!([{ "insert": "HelXlo" }])));
}

#[test]
fn insert_in_middle_of_detection_clears_it() {
    let a = delta(json!([{ "insert": "Hello", "attributes": { "detectionId": "123" } }]));
    let b = delta(json!([{ "retain": 3 }, { "insert": "X" }]));
    assert_eq!(compose(&a, &b), delta(json!([{ "insert": "HelXlo" }])));
}

#[test]
fn delete_in_middle_of_detection_clears_it() {
    let a = delta(json!([{ "insert": "Hello", "attributes": { "detectionId": "123" } }]));
    let b = delta(json!([{ "retain": 3 }, { "delete": 1 }]));
    assert_eq!(compose(&a, &b), delta(json!([{ "insert": "Helo" }])));
}

#[test]
fn insert_and_delete_ordering() {
    for attrs in [json!(null), json!({ "detectionId": "123" })] {
        let doc = delta(json!([{ "insert": "Hello", "attributes": attrs }]));
        let insert_first = delta(json!([{ "retain": 3 }, { "insert": "X" }, { "delete": 1 }]));
        let delete_first = delta(json!([{ "retain": 3 }, { "delete": 1 }, { "insert": "X" }]));
        let expected = delta(json!([{ "insert": "HelXo" }]));
        assert_eq!(compose(&doc, &insert_first), expected);
        assert_eq!(compose(&doc, &delete_first), expected);
    }
}

#[test]
fn insert_embed() {
    let a = delta(json!([{ "insert": 1, "attributes": { "src": "http://quilljs.com/image.png" } }]));
    let b = delta(json!([{ "retain": 1, "attributes": { "alt": "logo" } }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([{
            "insert": 1,
            "attributes": { "src": "http://quilljs.com/image.png", "alt": "logo" }
        }]))
    );
}

#[test]
fn delete_entire_text() {
    for attrs in [json!(null), json!({ "detectionId": "123" })] {
        let a = delta(json!([{ "retain": 4 }, { "insert": "Hello", "attributes": attrs }]));
        let b = delta(json!([{ "delete": 9 }]));
        assert_eq!(compose(&a, &b), delta(json!([{ "delete": 4 }])));
    }
}

#[test]
fn retain_past_end() {
    let a = delta(json!([{ "insert": "Hello" }]));
    let b = delta(json!([{ "retain": 10 }]));
    assert_eq!(compose(&a, &b), a);

    let embed = delta(json!([{ "insert": 1 }]));
    let b = delta(json!([{ "retain": 1 }]));
    assert_eq!(compose(&embed, &b), embed);
}

#[test]
fn remove_all_attributes() {
    let cases = [
        (json!({ "bold": true }), json!({ "bold": null })),
        (json!({ "detectionId": "123" }), json!({ "detectionId": null })),
    ];
    for (initial, clear) in cases {
        let a = delta(json!([{ "insert": "A", "attributes": initial }]));
        let b = delta(json!([{ "retain": 1, "attributes": clear }]));
        assert_eq!(compose(&a, &b), delta(json!([{ "insert": "A" }])));
    }

    let a = delta(json!([{ "insert": 2, "attributes": { "bold": true } }]));
    let b = delta(json!([{ "retain": 1, "attributes": { "bold": null } }]));
    assert_eq!(compose(&a, &b), delta(json!([{ "insert": 2 }])));
}

#[test]
fn clearing_part_of_detection_clears_all_of_it() {
    let a = delta(json!([{ "insert": "AB", "attributes": { "detectionId": "123" } }]));
    let b = delta(json!([{ "retain": 1, "attributes": { "detectionId": null } }]));
    assert_eq!(compose(&a, &b), delta(json!([{ "insert": "AB" }])));

    let id = "21b9c1e8-d8f9-43ea-8f91-c3890e25a2aa";
    let a = delta(json!([
        { "insert": { "url": "http://quilljs.com" }, "attributes": { "italic": true, "detectionId": id } },
        { "insert": "k", "attributes": { "italic": true, "detectionId": id, "color": "red" } }
    ]));
    let b = delta(json!([{ "retain": 1 }, { "retain": 1, "attributes": { "detectionId": null } }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([
            { "insert": { "url": "http://quilljs.com" }, "attributes": { "italic": true } },
            { "insert": "k", "attributes": { "italic": true, "color": "red" } }
        ]))
    );
}

#[test]
fn replacing_part_of_detection_clears_the_rest() {
    let a = delta(json!([{ "insert": "AB", "attributes": { "detectionId": "123" } }]));
    let b = delta(json!([{ "retain": 1, "attributes": { "detectionId": "234" } }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([
            { "insert": "A", "attributes": { "detectionId": "234" } },
            { "insert": "B" }
        ]))
    );

    let a = delta(json!([
        { "insert": "AB" },
        { "insert": "CD", "attributes": { "detectionId": "123" } }
    ]));
    let b = delta(json!([{ "retain": 1 }, { "retain": 3, "attributes": { "detectionId": "234" } }]));
    assert_eq!(
        compose(&a, &b),
        delta(json!([
            { "insert": "A" },
            { "insert": "BCD", "attributes": { "detectionId": "234" } }
        ]))
    );
}

#[test]
fn retain_start_optimization_split() {
    let a = Delta::builder()
        .insert_with("A", attributes! { "bold" => true })
        .insert("B")
        .insert_with("C", attributes! { "bold" => true })
        .retain(5)
        .delete(1)
        .build();
    let b = delta(json!([{ "retain": 4 }, { "insert": "D" }]));
    let expected = Delta::builder()
        .insert_with("A", attributes! { "bold" => true })
        .insert("B")
        .insert_with("C", attributes! { "bold" => true })
        .retain(1)
        .insert("D")
        .retain(4)
        .delete(1)
        .build();
    assert_eq!(compose(&a, &b), expected);
}

#[test]
fn retain_end_optimization() {
    let a = Delta::builder()
        .insert_with("A", attributes! { "bold" => true })
        .insert("B")
        .insert_with("C", attributes! { "bold" => true })
        .build();
    let b = delta(json!([{ "delete": 1 }]));
    assert_eq!(
        compose(&a, &b),
        Delta::builder()
            .insert("B")
            .insert_with("C", attributes! { "bold" => true })
            .build()
    );

    let a = Delta::builder()
        .insert_with("A", attributes! { "bold" => true })
        .insert("B")
        .insert_with("C", attributes! { "bold" => true })
        .insert("D")
        .insert_with("E", attributes! { "bold" => true })
        .insert("F")
        .build();
    let b = delta(json!([{ "retain": 1 }, { "delete": 1 }]));
    assert_eq!(
        compose(&a, &b),
        Delta::builder()
            .insert_with("AC", attributes! { "bold" => true })
            .insert("D")
            .insert_with("E", attributes! { "bold" => true })
            .insert("F")
            .build()
    );
}

#[test]
fn edit_chain_with_detections() {
    let edits = [
        json!([{ "insert": "outgrabe", "attributes": { "color": "purple", "detectionId": "0" } }]),
        json!([
            { "retain": 1 },
            { "insert": "blade" },
            { "retain": 5 },
            { "retain": 2, "attributes": { "bold": true, "italic": null, "detectionId": "1" } }
        ]),
        json!([{ "retain": 3 }, { "delete": 4 }]),
        json!([
            { "retain": 4 },
            {
                "insert": { "url": "http://quilljs.com" },
                "attributes": { "font": "serif", "italic": true, "detectionId": "2" }
            },
            { "retain": 1 },
            { "delete": 1 },
            { "retain": 3 }
        ]),
        json!([{ "retain": 1, "attributes": { "color": "orange", "detectionId": null } }]),
        json!([{ "retain": 3 }, { "insert": "in" }]),
    ];
    let be = json!({ "insert": "be", "attributes": { "bold": true, "color": "purple", "detectionId": "1" } });
    let url = json!({
        "insert": { "url": "http://quilljs.com" },
        "attributes": { "font": "serif", "italic": true, "detectionId": "2" }
    });
    let expected = [
        json!([{ "insert": "outgrabe", "attributes": { "color": "purple", "detectionId": "0" } }]),
        json!([
            { "insert": "o", "attributes": { "color": "purple" } },
            { "insert": "blade" },
            { "insert": "utgra", "attributes": { "color": "purple" } },
            be
        ]),
        json!([
            { "insert": "o", "attributes": { "color": "purple" } },
            { "insert": "bl" },
            { "insert": "tgra", "attributes": { "color": "purple" } },
            be
        ]),
        json!([
            { "insert": "o", "attributes": { "color": "purple" } },
            { "insert": "bl" },
            { "insert": "t", "attributes": { "color": "purple" } },
            url,
            { "insert": "ga", "attributes": { "color": "purple" } },
            be
        ]),
        json!([
            { "insert": "o", "attributes": { "color": "orange" } },
            { "insert": "bl" },
            { "insert": "t", "attributes": { "color": "purple" } },
            url,
            { "insert": "ga", "attributes": { "color": "purple" } },
            be
        ]),
        json!([
            { "insert": "o", "attributes": { "color": "orange" } },
            { "insert": "blin" },
            { "insert": "t", "attributes": { "color": "purple" } },
            url,
            { "insert": "ga", "attributes": { "color": "purple" } },
            be
        ]),
    ];

    let mut doc = Delta::new();
    for (edit, expected) in edits.into_iter().zip(expected) {
        doc = compose(&doc, &delta(edit));
        assert_eq!(doc, delta(expected));
    }
}

#[test]
fn insert_before_delete_at_same_index_does_not_fail() {
    let this = delta(json!([
        { "retain": 2, "attributes": { "color": "purple", "font": null } },
        { "retain": 1, "attributes": { "font": "serif", "detectionId": null, "color": "purple" } },
        { "retain": 1, "attributes": { "color": "purple", "font": null } },
        { "delete": 1 },
        { "retain": 1 },
        { "retain": 2, "attributes": { "color": "purple", "font": "serif", "italic": null } },
        { "insert": "his" },
        { "retain": 1 },
        { "insert": "took", "attributes": { "detectionId": "c2e6a141" } },
        { "insert": "that", "attributes": { "color": "purple", "detectionId": "4dd308e1" } }
    ]));
    let other = delta(json!([
        { "retain": 2 },
        { "retain": 4, "attributes": { "bold": null, "italic": null } },
        { "retain": 2 },
        { "delete": 3 },
        { "retain": 2 },
        { "delete": 4 }
    ]));
    assert!(this.compose(&other).is_ok());
}
