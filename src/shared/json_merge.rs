use serde_json::Value;

/// Merges `patch` into `target` in place: objects merge key by key, any other
/// value (arrays included) replaces what was there.
pub fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                match target_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, patch_value),
                    None => {
                        target_map.insert(key.clone(), patch_value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

/// Looks up `a.b.c` style paths. An empty path returns the root.
pub fn lookup_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Some(root);
    }
    trimmed
        .split('.')
        .try_fold(root, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_instead_of_replacing() {
        let mut target = json!({"launch": {"width": 854, "height": 480}, "language": "en_us"});

        deep_merge(&mut target, &json!({"launch": {"width": 1280}}));

        assert_eq!(
            target,
            json!({"launch": {"width": 1280, "height": 480}, "language": "en_us"})
        );
    }

    #[test]
    fn arrays_and_scalars_are_replaced() {
        let mut target = json!({"list": [1, 2, 3], "flag": true});

        deep_merge(&mut target, &json!({"list": [4], "flag": null}));

        assert_eq!(target, json!({"list": [4], "flag": null}));
    }

    #[test]
    fn lookup_walks_objects_and_arrays() {
        let root = json!({"launch": {"server": {"ip": "mc.example.org"}}, "list": ["a", "b"]});

        assert_eq!(lookup_path(&root, "launch.server.ip"), Some(&json!("mc.example.org")));
        assert_eq!(lookup_path(&root, "list.1"), Some(&json!("b")));
        assert_eq!(lookup_path(&root, "launch.missing"), None);
        assert_eq!(lookup_path(&root, ""), Some(&root));
    }
}
