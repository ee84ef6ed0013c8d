//! XPath-like gNMI path conversion
//!
//! Converts between human-written path strings such as
//! `/network-instance[name=default]/protocols/bgp` and the structured
//! `gnmi::Path` used on the wire.

use std::collections::HashMap;

use crate::gnmi::{Path, PathElem};

/// Parse an XPath-like path string into a gNMI `Path`.
///
/// Segments are split on `/` only outside bracketed keys, so key values may
/// themselves contain slashes (`interface[name=ethernet-1/1]`). A trailing
/// slash is ignored.
pub fn parse(path: &str) -> Path {
    let elem = split_segments(path)
        .into_iter()
        .map(|segment| {
            let (name, key) = parse_segment(&segment);
            PathElem { name, key }
        })
        .collect();

    Path {
        elem,
        ..Default::default()
    }
}

/// Render a gNMI `Path` back into its XPath-like string form.
///
/// Keys are emitted in sorted order so the output is deterministic.
pub fn format(path: &Path) -> String {
    path.elem
        .iter()
        .map(|elem| {
            if elem.key.is_empty() {
                elem.name.clone()
            } else {
                let mut keys: Vec<(&String, &String)> = elem.key.iter().collect();
                keys.sort_by_key(|(k, _)| k.as_str());
                let keys: Vec<String> = keys
                    .into_iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                format!("{}[{}]", elem.name, keys.join(","))
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn split_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in path.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '/' if depth == 0 => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

fn parse_segment(segment: &str) -> (String, HashMap<String, String>) {
    // "neighbor[peer-address=1.1.1.1]" -> ("neighbor", {"peer-address": "1.1.1.1"})
    let Some(bracket) = segment.find('[') else {
        return (segment.to_string(), HashMap::new());
    };

    let name = segment[..bracket].to_string();
    let mut keys = HashMap::new();

    // Accept both "[a=1,b=2]" and "[a=1][b=2]" key forms.
    for chunk in segment[bracket + 1..].split('[') {
        let chunk = chunk.trim_end_matches(']');
        for key_val in chunk.split(',') {
            if let Some((k, v)) = key_val.split_once('=') {
                keys.insert(k.trim().to_string(), v.trim().to_string());
            }
        }
    }

    (name, keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let path = parse("/system/app-management/application");
        assert_eq!(path.elem.len(), 3);
        assert_eq!(path.elem[0].name, "system");
        assert_eq!(path.elem[2].name, "application");
        assert!(path.elem[0].key.is_empty());
    }

    #[test]
    fn test_parse_with_keys() {
        let path = parse("/network-instance[name=default]/protocols/bgp/neighbor[peer-address=1.1.1.1]");
        assert_eq!(path.elem.len(), 4);
        assert_eq!(
            path.elem[0].key.get("name"),
            Some(&"default".to_string())
        );
        assert_eq!(
            path.elem[3].key.get("peer-address"),
            Some(&"1.1.1.1".to_string())
        );
    }

    #[test]
    fn test_parse_slash_inside_key() {
        let path = parse("/interface[name=ethernet-1/1]/subinterface[index=0]");
        assert_eq!(path.elem.len(), 2);
        assert_eq!(path.elem[0].name, "interface");
        assert_eq!(
            path.elem[0].key.get("name"),
            Some(&"ethernet-1/1".to_string())
        );
        assert_eq!(path.elem[1].key.get("index"), Some(&"0".to_string()));
    }

    #[test]
    fn test_parse_trailing_slash() {
        let path = parse("/network-instance[name=default]/protocols/static-vxlan-agent/");
        assert_eq!(path.elem.len(), 3);
        assert_eq!(path.elem[2].name, "static-vxlan-agent");
    }

    #[test]
    fn test_parse_multiple_key_brackets() {
        let path = parse("/route[prefix=10.0.0.0/8][id=1]");
        assert_eq!(path.elem.len(), 1);
        assert_eq!(
            path.elem[0].key.get("prefix"),
            Some(&"10.0.0.0/8".to_string())
        );
        assert_eq!(path.elem[0].key.get("id"), Some(&"1".to_string()));
    }

    #[test]
    fn test_format_round_trip() {
        let original = "interface[name=ethernet-1/1]/subinterface[index=242]";
        assert_eq!(format(&parse(original)), original);
    }

    #[test]
    fn test_format_sorts_keys() {
        let path = parse("/elem[b=2,a=1]");
        assert_eq!(format(&path), "elem[a=1,b=2]");
    }
}
