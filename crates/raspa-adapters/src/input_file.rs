//! Render de `simulation.input` (formato `Clave Valor` de RASPA).
//!
//! Reglas:
//! - escalares: `Clave valor`; booleanos como `yes`/`no`.
//! - listas de escalares: valores separados por espacio.
//! - objetos: sus claves se emiten en el mismo nivel (secciones como
//!   `GeneralSettings` no tienen cabecera en RASPA).
//! - listas de objetos (p. ej. `Component`, `Framework`): una cabecera
//!   `Clave i` por elemento (con `MoleculeName` en la misma línea si existe) y
//!   el cuerpo indentado. Se recogen a cualquier profundidad; las que cuelgan
//!   de una sección salen como bloques de primer nivel y las que aparecen
//!   dentro de otro bloque se anidan bajo él.
//!
//! Los bloques se emiten después de toda la configuración general y los de
//! `Component` van siempre al final.
use raspa_core::Parameters;
use serde_json::{Map, Value};

pub const SIMULATION_INPUT: &str = "simulation.input";

const BODY_INDENT: &str = "            ";
const COMPONENT_KEY: &str = "Component";
const MOLECULE_NAME_KEY: &str = "MoleculeName";

type Block<'a> = (&'a str, &'a [Value]);

fn scalar(value: &Value) -> String {
    match value {
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(" "),
        other => other.to_string(),
    }
}

fn is_object_list(value: &Value) -> bool {
    matches!(value, Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object))
}

/// Emite las entradas escalares de `map` y aparta en `blocks` las listas de
/// objetos encontradas, también dentro de secciones.
fn push_entries<'a>(out: &mut String, indent: &str, map: &'a Map<String, Value>, blocks: &mut Vec<Block<'a>>) {
    for (key, value) in map {
        match value {
            Value::Object(inner) => push_entries(out, indent, inner, blocks),
            Value::Array(items) if is_object_list(value) => blocks.push((key.as_str(), items.as_slice())),
            v => {
                out.push_str(indent);
                out.push_str(key);
                let rendered = scalar(v);
                if !rendered.is_empty() {
                    out.push(' ');
                    out.push_str(&rendered);
                }
                out.push('\n');
            }
        }
    }
}

fn push_blocks(out: &mut String, indent: &str, mut blocks: Vec<Block<'_>>) {
    blocks.sort_by_key(|(key, _)| *key == COMPONENT_KEY);
    let body_indent = format!("{indent}{BODY_INDENT}");
    for (key, items) in blocks {
        for (i, item) in items.iter().enumerate() {
            let Value::Object(body) = item else { continue };
            if indent.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("{indent}{key} {i}"));
            if let Some(name) = body.get(MOLECULE_NAME_KEY) {
                out.push_str(&format!(" {MOLECULE_NAME_KEY} {}", scalar(name)));
            }
            out.push('\n');

            let mut fields = body.clone();
            fields.remove(MOLECULE_NAME_KEY);
            let mut nested = Vec::new();
            push_entries(out, &body_indent, &fields, &mut nested);
            push_blocks(out, &body_indent, nested);
        }
    }
}

pub fn render_simulation_input(parameters: &Parameters) -> String {
    let mut out = String::new();
    let mut blocks = Vec::new();
    push_entries(&mut out, "", parameters, &mut blocks);
    push_blocks(&mut out, "", blocks);
    out
}
