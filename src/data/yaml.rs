//! YAML output helpers.

use anyhow::{Context, Result};
use serde::Serialize;
use yaml_rust_davvid::YamlEmitter;

/// Serializes a value to YAML, emitting multi-line strings (commit messages)
/// as literal blocks.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    let serde_value = serde_yaml::to_value(data).context("Failed to serialize to serde value")?;
    let yaml_rust_value = convert_serde_to_yaml_rust(&serde_value);

    let mut output = String::new();
    let mut emitter = YamlEmitter::new(&mut output);
    emitter.multiline_strings(true);
    emitter
        .dump(&yaml_rust_value)
        .context("Failed to emit YAML")?;

    Ok(output)
}

/// Converts a `serde_yaml::Value` into the emitter's document model.
fn convert_serde_to_yaml_rust(value: &serde_yaml::Value) -> yaml_rust_davvid::Yaml {
    use yaml_rust_davvid::Yaml;

    match value {
        serde_yaml::Value::Null => Yaml::Null,
        serde_yaml::Value::Bool(b) => Yaml::Boolean(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Yaml::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Yaml::Real(f.to_string())
            } else {
                Yaml::String(n.to_string())
            }
        }
        serde_yaml::Value::String(s) => Yaml::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => {
            Yaml::Array(seq.iter().map(convert_serde_to_yaml_rust).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut yaml_map = yaml_rust_davvid::yaml::Hash::new();
            for (k, v) in map {
                yaml_map.insert(convert_serde_to_yaml_rust(k), convert_serde_to_yaml_rust(v));
            }
            Yaml::Hash(yaml_map)
        }
        serde_yaml::Value::Tagged(tagged) => convert_serde_to_yaml_rust(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Match, RunOutcome};

    #[test]
    fn outcome_yaml_keeps_field_order_and_messages() {
        let outcome = RunOutcome {
            matches: vec![Match {
                project_name: "curl".to_string(),
                triggered_keyword: "tls".to_string(),
                url: "https://example.com/c/abc".to_string(),
                summary: "Bump TLS".to_string(),
                author: "Ada".to_string(),
                formatted_date: "Fri, 01 Jan 2021".to_string(),
                full_message: "Bump TLS\n\nDetails here\n".to_string(),
            }],
            failures: Vec::new(),
        };

        let yaml = to_yaml(&outcome).unwrap();
        let project_at = yaml.find("project_name").unwrap();
        let keyword_at = yaml.find("triggered_keyword").unwrap();
        assert!(project_at < keyword_at);
        assert!(yaml.contains("Details here"));
        assert!(yaml.contains("failures: []"));
    }
}
