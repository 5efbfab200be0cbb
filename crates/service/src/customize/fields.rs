use serde::{Deserialize, Deserializer, Serialize};

/// Values of the customize form, named as the form posts them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizeFields {
    #[serde(default)]
    pub motto: Option<String>,
    #[serde(default, deserialize_with = "checkbox")]
    pub about_us_enabled: bool,
    #[serde(default)]
    pub about_us: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub custom_terms_enabled: bool,
    #[serde(default)]
    pub custom_terms: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CheckboxValue {
    Bool(bool),
    Text(String),
}

/// Accepts JSON booleans and HTML checkbox values (`on`, `true`, `1`, `yes`).
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match CheckboxValue::deserialize(deserializer)? {
        CheckboxValue::Bool(b) => b,
        CheckboxValue::Text(s) => {
            let s = s.trim();
            ["on", "true", "1", "yes"].iter().any(|v| s.eq_ignore_ascii_case(v))
        }
    })
}
