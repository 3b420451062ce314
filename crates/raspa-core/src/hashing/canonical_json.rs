//! Serialización canónica: claves de objetos ordenadas en todos los niveles,
//! sin espacios. Dos `Value` iguales salvo orden de claves producen el mismo
//! texto.

use serde_json::{Map, Value};

/// Reordena recursivamente las claves de cada objeto.
fn sorted(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::with_capacity(map.len());
            for k in keys {
                out.insert(k.clone(), sorted(&map[k]));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

pub fn to_canonical_json(value: &Value) -> String {
    // `serde_json::Map` conserva el orden de inserción sólo con
    // `preserve_order`; sin esa feature es un BTreeMap y ya sale ordenado.
    // `sorted` cubre ambos casos.
    match serde_json::to_string(&sorted(value)) {
        Ok(s) => s,
        Err(_) => String::from("null"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_order_is_irrelevant() {
        let a = json!({"b": {"y": 1, "x": [3, {"k": 1, "a": 2}]}, "a": true});
        let b = json!({"a": true, "b": {"x": [3, {"a": 2, "k": 1}], "y": 1}});
        assert_eq!(to_canonical_json(&a), to_canonical_json(&b));
        assert_eq!(to_canonical_json(&a), r#"{"a":true,"b":{"x":[3,{"a":2,"k":1}],"y":1}}"#);
    }

    #[test]
    fn array_order_is_kept() {
        assert_ne!(to_canonical_json(&json!([1, 2])), to_canonical_json(&json!([2, 1])));
    }
}
