use serde_json::{Map, Value};

/// Deep-merges `overrides` into `base`; `overrides` wins on collisions.
///
/// Objects merge key by key and arrays merge index by index, so
/// `{"scales": {"yAxes": [{"stacked": false}]}}` only touches `stacked` on the
/// first y axis. Base array elements past the end of `overrides` are kept.
/// Scalars (including `null`) replace. A scalar `overrides` at the root is
/// ignored.
pub fn merge_into(base: &mut Value, overrides: &Value) {
    match overrides {
        Value::Object(overrides) => {
            if !base.is_object() {
                *base = Value::Object(Map::new());
            }
            if let Value::Object(base) = base {
                merge_maps(base, overrides);
            }
        }
        Value::Array(overrides) => {
            if !base.is_array() {
                *base = Value::Array(Vec::new());
            }
            if let Value::Array(base) = base {
                merge_arrays(base, overrides);
            }
        }
        _ => {}
    }
}

/// Merges one override value into `slot`: containers recurse, scalars replace.
pub fn merge_value(slot: &mut Value, value: &Value) {
    if value.is_object() || value.is_array() {
        merge_into(slot, value);
    } else {
        *slot = value.clone();
    }
}

pub fn merge_maps(base: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        let slot = base.entry(key.clone()).or_insert(Value::Null);
        merge_value(slot, value);
    }
}

fn merge_arrays(base: &mut Vec<Value>, overrides: &[Value]) {
    for (index, value) in overrides.iter().enumerate() {
        if index < base.len() {
            merge_value(&mut base[index], value);
        } else {
            let mut slot = Value::Null;
            merge_value(&mut slot, value);
            base.push(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_and_later_values_win() {
        let mut base = json!({"legend": {"display": true}, "title": {"fontSize": 20}});
        merge_into(
            &mut base,
            &json!({"legend": {"position": "top"}, "title": {"fontSize": 12}}),
        );
        assert_eq!(
            base,
            json!({"legend": {"display": true, "position": "top"}, "title": {"fontSize": 12}})
        );
    }

    #[test]
    fn arrays_merge_by_index() {
        let mut base = json!({
            "scales": {"yAxes": [
                {"ticks": {"min": 0, "maxTicksLimit": 4}, "scaleLabel": {"labelString": "USD"}}
            ]}
        });
        merge_into(
            &mut base,
            &json!({"scales": {"yAxes": [{"ticks": {"fontColor": "red"}}, {"id": "right"}]}}),
        );
        assert_eq!(
            base,
            json!({
                "scales": {"yAxes": [
                    {
                        "ticks": {"min": 0, "maxTicksLimit": 4, "fontColor": "red"},
                        "scaleLabel": {"labelString": "USD"}
                    },
                    {"id": "right"}
                ]}
            })
        );
    }

    #[test]
    fn scalars_replace_and_shorter_arrays_keep_the_tail() {
        let mut base = json!({"colors": ["red", "green", "blue"], "animation": false, "x": 1});
        merge_into(
            &mut base,
            &json!({"colors": ["black"], "animation": {"duration": 5}, "x": null}),
        );
        assert_eq!(
            base,
            json!({"colors": ["black", "green", "blue"], "animation": {"duration": 5}, "x": null})
        );
    }

    #[test]
    fn scalar_root_override_is_ignored() {
        let mut base = json!({"legend": {"display": false}});
        merge_into(&mut base, &Value::Null);
        assert_eq!(base, json!({"legend": {"display": false}}));
    }
}
