use serde::{Deserialize, Serialize};

use crate::core::primitives::format_number;

/// Currency/number decoration applied to axis ticks and tooltips.
///
/// Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thousands: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

impl ValueFormat {
    #[must_use]
    pub fn is_active(&self) -> bool {
        non_empty(&self.prefix).is_some()
            || non_empty(&self.suffix).is_some()
            || non_empty(&self.thousands).is_some()
            || non_empty(&self.decimal).is_some()
    }

    /// Formats `value` after the leading text `pre`.
    ///
    /// With a prefix, negative values render as `-$5` rather than `$-5`.
    #[must_use]
    pub fn format(&self, pre: &str, value: f64) -> String {
        let mut head = pre.to_owned();
        let mut value = value;

        if let Some(prefix) = non_empty(&self.prefix) {
            if value < 0.0 {
                value = -value;
                head.push('-');
            }
            head.push_str(prefix);
        }

        let mut body = format_number(value);
        let thousands = non_empty(&self.thousands);
        let decimal = non_empty(&self.decimal);
        if value.is_finite() && (thousands.is_some() || decimal.is_some()) {
            body = separate(&body, thousands, decimal.unwrap_or("."));
        }

        head.push_str(&body);
        if let Some(suffix) = non_empty(&self.suffix) {
            head.push_str(suffix);
        }
        head
    }
}

fn separate(number: &str, thousands: Option<&str>, decimal: &str) -> String {
    let (integer, fraction) = match number.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (number, None),
    };
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer),
    };

    let mut out = String::with_capacity(number.len() + digits.len() / 3 * 2);
    out.push_str(sign);
    match thousands {
        Some(separator) => {
            for (idx, ch) in digits.chars().enumerate() {
                if idx > 0 && (digits.len() - idx) % 3 == 0 {
                    out.push_str(separator);
                }
                out.push(ch);
            }
        }
        None => out.push_str(digits),
    }
    if let Some(fraction) = fraction {
        out.push_str(decimal);
        out.push_str(fraction);
    }
    out
}
