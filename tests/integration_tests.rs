use chrono::{TimeZone, Utc};
use num_bigint::BigInt;
use serde::Serialize;
use serde_formquery::{
    encode, encode_with_options, form, to_string, to_string_with_options, to_value,
    EncodingMode, Error, FormMap, QueryOptions, Record, Resource, Scope, Shared, Value,
    Visibility,
};
use std::collections::BTreeMap;

#[derive(Serialize)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    note: Option<String>,
}

#[derive(Serialize)]
enum Status {
    Active,
    Suspended { reason: String },
}

#[derive(Serialize)]
struct Account {
    id: u32,
    status: Status,
}

fn strict() -> QueryOptions {
    QueryOptions::new().with_mode(EncodingMode::Strict)
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let query = to_string(&user).unwrap();
    println!("User query: {}", query);
    assert_eq!(
        query,
        "id=123&name=Alice&active=1&tags%5B0%5D=admin&tags%5B1%5D=developer"
    );
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 1,
            name: "Bob".to_string(),
            active: false,
            tags: vec![],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 10.0,
                quantity: 1,
            },
        ],
        note: None,
    };

    assert_eq!(
        to_string(&order).unwrap(),
        "order_id=12345\
         &customer%5Bid%5D=1&customer%5Bname%5D=Bob&customer%5Bactive%5D=0\
         &items%5B0%5D%5Bsku%5D=WIDGET-001&items%5B0%5D%5Bprice%5D=29.99&items%5B0%5D%5Bquantity%5D=2\
         &items%5B1%5D%5Bsku%5D=GADGET-002&items%5B1%5D%5Bprice%5D=10&items%5B1%5D%5Bquantity%5D=1"
    );
}

#[test]
fn test_enum_fields() {
    let active = Account {
        id: 1,
        status: Status::Active,
    };
    assert_eq!(to_string(&active).unwrap(), "id=1&status=Active");

    let suspended = Account {
        id: 2,
        status: Status::Suspended {
            reason: "spam".to_string(),
        },
    };
    assert_eq!(
        to_string(&suspended).unwrap(),
        "id=2&status%5BSuspended%5D%5Breason%5D=spam"
    );
}

#[test]
fn test_btreemap_top_level() {
    let mut params = BTreeMap::new();
    params.insert("q", "rust & serde");
    params.insert("lang", "en");
    assert_eq!(to_string(&params).unwrap(), "lang=en&q=rust+%26+serde");
}

#[test]
fn test_json_value_input() {
    let json = serde_json::json!({
        "filter": { "kind": "post", "ids": [3, 4] },
        "draft": null,
        "public": true
    });
    assert_eq!(
        to_string(&json).unwrap(),
        "filter%5Bids%5D%5B0%5D=3&filter%5Bids%5D%5B1%5D=4&filter%5Bkind%5D=post&public=1"
    );
}

#[test]
fn test_insertion_order_preserved() {
    let data = form!({ "z": 1, "a": 2, "m": 3 });
    assert_eq!(encode(&data).unwrap(), "z=1&a=2&m=3");
}

#[test]
fn test_mixed_keys_and_modes() {
    let data = form!({ "greeting": "hi there~", 0: "zero", "path": "/a/b" });

    assert_eq!(
        encode(&data).unwrap(),
        "greeting=hi+there%7E&0=zero&path=%2Fa%2Fb"
    );
    assert_eq!(
        encode_with_options(&data, &strict()).unwrap(),
        "greeting=hi%20there~&0=zero&path=%2Fa%2Fb"
    );
}

#[test]
fn test_keys_are_encoded_at_every_level() {
    let data = form!({ "a b": { "c&d": "e=f" } });
    assert_eq!(encode(&data).unwrap(), "a+b%5Bc%26d%5D=e%3Df");
}

#[test]
fn test_numeric_prefix_list_root() {
    let data = form!(["a", "b"]);
    let options = QueryOptions::new().with_numeric_prefix("var_");
    assert_eq!(
        encode_with_options(&data, &options).unwrap(),
        "var_0=a&var_1=b"
    );
}

#[test]
fn test_numeric_prefix_is_literal() {
    let data = form!(["a"]);
    let options = QueryOptions::new().with_numeric_prefix("a b[");
    assert_eq!(encode_with_options(&data, &options).unwrap(), "a b[0=a");
}

#[test]
fn test_float_values() {
    let data = form!({ "a": 0.5, "b": 1e25, "c": (-0.0), "d": 2.0 });
    assert_eq!(encode(&data).unwrap(), "a=0.5&b=1.0E%2B25&c=-0&d=2");
}

#[test]
fn test_wide_and_typed_values() {
    let mut map = FormMap::new();
    map.insert("big", BigInt::parse_bytes(b"98765432109876543210", 10).unwrap());
    map.insert("when", Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
    map.insert("max", u64::MAX);
    assert_eq!(
        encode(&Value::Map(map)).unwrap(),
        "big=98765432109876543210&when=2024-01-02T03%3A04%3A05Z&max=18446744073709551615"
    );
}

#[test]
fn test_resources_are_skipped() {
    let mut map = FormMap::new();
    map.insert("file", Resource::new(1, "stream"));
    map.insert("name", "report");
    assert_eq!(encode(&Value::Map(map)).unwrap(), "name=report");
}

#[test]
fn test_record_scopes() {
    let mut user = Record::new("User").with_ancestor("Model");
    user.declare(Visibility::Public, "name", "ada")
        .declare(Visibility::Protected, "role", "admin")
        .declare(Visibility::Private, "token", "t0k")
        .declare_inherited("Model", Visibility::Private, "table", "users");
    user.set("note", "dyn");
    let user = Value::from(user);

    assert_eq!(encode(&user).unwrap(), "name=ada&note=dyn");

    let from_user = QueryOptions::new().with_scope(Scope::class("User"));
    assert_eq!(
        encode_with_options(&user, &from_user).unwrap(),
        "name=ada&role=admin&token=t0k&note=dyn"
    );

    let from_model = QueryOptions::new().with_scope(Scope::class("Model"));
    assert_eq!(
        encode_with_options(&user, &from_model).unwrap(),
        "name=ada&role=admin&table=users&note=dyn"
    );
}

#[test]
fn test_empty_record() {
    assert_eq!(encode(&Value::from(Record::new("Empty"))).unwrap(), "");
}

#[test]
fn test_cycle_through_map_reference() {
    let node = Shared::new(form!({ "id": 1 }));
    if let Some(map) = node.borrow_mut().as_map_mut() {
        map.insert("children", form!([]));
        if let Some(Value::Map(children)) = map.get_mut("children") {
            children.push(Value::Reference(node.clone()));
        }
    }

    let root = form!({ "tree": (Value::Reference(node.clone())) });
    assert_eq!(encode(&root).unwrap(), "tree%5Bid%5D=1");

    node.replace(Value::Null);
}

#[test]
fn test_cyclic_top_level_reference() {
    let cell = Shared::new(Value::Null);
    cell.replace(Value::Reference(cell.clone()));
    let root = Value::Reference(cell.clone());
    assert_eq!(encode(&root), Err(Error::InvalidInputKind { found: "reference" }));
    cell.replace(Value::Null);
}

#[test]
fn test_depth_limit_reports_no_partial_output() {
    let data = form!({ "ok": 1, "deep": { "a": { "b": { "c": 1 } } } });
    let options = QueryOptions::new().with_max_depth(2);
    assert_eq!(
        encode_with_options(&data, &options),
        Err(Error::DepthLimitExceeded { limit: 2 })
    );
}

#[test]
fn test_to_value_then_encode() {
    let value = to_value(&vec![("a", 1), ("b", 2)]).unwrap();
    assert_eq!(encode(&value).unwrap(), "0%5B0%5D=a&0%5B1%5D=1&1%5B0%5D=b&1%5B1%5D=2");
}

#[test]
fn test_non_scalar_map_key_error() {
    let mut bad = BTreeMap::new();
    bad.insert((1, 2), "pair");
    assert_eq!(
        to_string(&bad),
        Err(Error::KeyMustBeScalar("map".to_string()))
    );
}

#[test]
fn test_options_by_reference_are_reusable() {
    let options = strict().with_separator(";");
    let a = encode_with_options(&form!({ "x": "1 2" }), &options).unwrap();
    let params: BTreeMap<_, _> = [("y", 3), ("z", 4)].into_iter().collect();
    let b = to_string_with_options(&params, &options).unwrap();
    assert_eq!(a, "x=1%202");
    assert_eq!(b, "y=3;z=4");
}
