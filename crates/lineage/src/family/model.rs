//! Family tree document model
//!
//! Mirrors the family-data JSON document: a root person with an optional
//! spouse and an ordered list of children, recursively. Children are owned
//! by value, so the tree is a strict hierarchy by construction.

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{Gender, LayoutError};

/// Deserialize `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One person of the bloodline, with their spouse and shared children
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonNode {
    /// Unique across the tree; empty means the record is malformed
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: Gender,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub life_years: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profession: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub birth_place: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub biography: String,
    #[serde(default)]
    pub spouse: Option<SpouseRecord>,
    /// Own children only; `null` entries are tolerated and skipped
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Option<PersonNode>>,
}

/// A partner attached to a person; never has children of their own
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpouseRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: Gender,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub life_years: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profession: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub birth_place: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub biography: String,
}

impl PersonNode {
    /// Create a person with no spouse and no children
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_life_years(mut self, life_years: impl Into<String>) -> Self {
        self.life_years = life_years.into();
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn with_spouse(mut self, spouse: SpouseRecord) -> Self {
        self.spouse = Some(spouse);
        self
    }

    pub fn with_child(mut self, child: PersonNode) -> Self {
        self.children.push(Some(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = PersonNode>) -> Self {
        self.children.extend(children.into_iter().map(Some));
        self
    }

    /// Parse a family document from JSON
    ///
    /// Documents nested past [`MAX_DOCUMENT_DEPTH`] generations fail with
    /// [`LayoutError::DocumentTooDeep`].
    ///
    /// [`MAX_DOCUMENT_DEPTH`]: crate::core::MAX_DOCUMENT_DEPTH
    pub fn from_json(input: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(input)?)
    }

    /// False for records without a usable id
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    pub fn has_spouse(&self) -> bool {
        self.spouse.is_some()
    }

    /// Id of the synthetic spouse box
    pub fn spouse_id(&self) -> String {
        spouse_node_id(&self.id)
    }

    /// Children that can be laid out: present and carrying an id
    pub fn valid_children(&self) -> impl Iterator<Item = &PersonNode> {
        self.children.iter().flatten().filter(|c| c.has_id())
    }

    pub fn has_valid_children(&self) -> bool {
        self.valid_children().next().is_some()
    }

    /// Copy of this person with the children list emptied
    pub fn without_children(&self) -> PersonNode {
        PersonNode {
            id: self.id.clone(),
            name: self.name.clone(),
            gender: self.gender,
            photo: self.photo.clone(),
            life_years: self.life_years.clone(),
            profession: self.profession.clone(),
            birth_place: self.birth_place.clone(),
            biography: self.biography.clone(),
            spouse: self.spouse.clone(),
            children: Vec::new(),
        }
    }
}

impl SpouseRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_life_years(mut self, life_years: impl Into<String>) -> Self {
        self.life_years = life_years.into();
        self
    }
}

/// Id of the spouse box drawn next to `person_id`
pub fn spouse_node_id(person_id: &str) -> String {
    format!("{}-spouse", person_id)
}
