//! Nested maps, lists and shared references.
//!
//! Run with: cargo run --example nested_values

use serde_formquery::{encode, form, FormMap, Shared, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut order = FormMap::new();
    order.insert("id", 1001);
    order.insert(
        "items",
        form!([
            { "sku": "A-1", "qty": 2 },
            { "sku": "B-7", "qty": 1 }
        ]),
    );
    order.insert("discount", 0.15);
    order.insert("coupon", Value::Null);

    println!("Nested:\n{}\n", encode(&Value::Map(order))?);

    // The same address is reachable twice; both copies are written
    let address = Shared::new(form!({ "city": "Lyon", "zip": "69001" }));
    let mut parties = FormMap::new();
    parties.insert("billing", Value::Reference(address.clone()));
    parties.insert("shipping", Value::Reference(address.clone()));
    println!("Shared:\n{}\n", encode(&Value::Map(parties))?);

    // A container that contains itself is cut where it would re-enter
    if let Some(map) = address.borrow_mut().as_map_mut() {
        map.insert("self", Value::Reference(address.clone()));
    }
    println!("Cyclic:\n{}", encode(&Value::Reference(address.clone()))?);
    address.replace(Value::Null);

    Ok(())
}
