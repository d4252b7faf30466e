use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize};

use super::Rule;

/// A dialect pack: a named bundle of rewrite rules and protected terms.
///
/// Packs are plain data. Composition happens through `inherits`, which names
/// parent packs by id; the resolver walks those edges explicitly rather than
/// relying on any kind of object inheritance.
///
/// # Example
///
/// ```
/// use dialect::{Pack, Rule};
///
/// let pack = Pack::builder()
///     .id("vlaams/west-vlaams")
///     .label("West-Vlaams")
///     .inherits(vec!["vlaams/basis".to_string()])
///     .rules(vec![Rule::replace_word("goed", "goe")])
///     .build();
///
/// assert_eq!(pack.id, "vlaams/west-vlaams");
/// assert!(pack.protected_terms.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct Pack {
    /// Globally unique, slash-namespaced id (e.g. `"vlaams/west-vlaams"`).
    pub id: String,

    /// Display name.
    pub label: String,

    /// Parent pack ids, in declaration order.
    #[builder(default)]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub inherits: Vec<String>,

    /// Informational only; the engine ignores it.
    #[builder(default)]
    #[serde(default)]
    pub notes: String,

    /// Terms that no rule may rewrite or consume (matched case-insensitively).
    #[builder(default)]
    #[serde(default)]
    pub protected_terms: Vec<String>,

    /// Rewrite rules in declaration order.
    #[builder(default)]
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// One entry of a pack index (`index.json`), used for discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackIndexEntry {
    pub id: String,
    pub label: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub inherits: Vec<String>,
    /// Pack file name, relative to the `packs/` directory.
    pub file: String,
}

impl PackIndexEntry {
    /// Builds the index entry describing `pack`, using the conventional file name.
    pub fn for_pack(pack: &Pack) -> Self {
        Self {
            id: pack.id.clone(),
            label: pack.label.clone(),
            inherits: pack.inherits.clone(),
            file: super::pack_file_name(&pack.id),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
